use emble_client::ApiClient;
use emble_session::{SessionId, SessionIdProvider};
use emble_types::{ChatMessage, ChatRequest};
use std::sync::Arc;
use tokio::sync::watch;

use crate::guard::OnDrop;

/// Shown in place of a reply whenever `/chat` fails. The real error only goes to the log.
pub const BACKEND_ERROR_TEXT: &str = "❌ Backend error.";

pub const DEFAULT_GREETING: &str = "Hi! I am your Finance Analyst.\n\nHow can I help?";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    /// Append-only; entries are never edited, removed or reordered
    pub transcript: Vec<ChatMessage>,
    /// Set exactly while a `/chat` request is outstanding
    pub thinking: bool,
}

/// Result of one [`ChatOrchestrator::send_message`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// Another message is still awaiting its reply; nothing happened
    Busy,
    Replied,
    /// The backend call failed and the synthetic error entry was appended
    Failed,
}

struct ChatInner {
    api: ApiClient,
    session: SessionIdProvider,
    state: watch::Sender<ChatState>,
}

/// Owns the chat transcript and the thinking flag.
///
/// One message may be in flight at a time. A second `send_message` while
/// the first is pending is rejected with [`SendOutcome::Busy`] rather than
/// queued, matching the input box which is disabled while thinking.
#[derive(Clone)]
pub struct ChatOrchestrator {
    inner: Arc<ChatInner>,
}

impl ChatOrchestrator {
    pub fn new(api: ApiClient, session: SessionIdProvider) -> Self {
        Self::with_transcript(api, session, Vec::new())
    }

    /// Start with the assistant's greeting already in the transcript.
    /// The greeting is local only and never sent to the backend.
    pub fn with_greeting(api: ApiClient, session: SessionIdProvider, greeting: impl Into<String>) -> Self {
        Self::with_transcript(api, session, vec![ChatMessage::assistant(greeting)])
    }

    fn with_transcript(api: ApiClient, session: SessionIdProvider, transcript: Vec<ChatMessage>) -> Self {
        let (state, _) = watch::channel(ChatState {
            transcript,
            thinking: false,
        });

        Self {
            inner: Arc::new(ChatInner {
                api,
                session,
                state,
            }),
        }
    }

    pub fn snapshot(&self) -> ChatState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.inner.state.subscribe()
    }

    pub fn is_thinking(&self) -> bool {
        self.inner.state.borrow().thinking
    }

    /// The store may hit the filesystem, so it is consulted off the async workers.
    async fn session_id(&self) -> SessionId {
        let session = self.inner.session.clone();
        match tokio::task::spawn_blocking(move || session.session_id()).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup task failed, using ephemeral id");
                SessionId::generate()
            }
        }
    }

    /// Send one user turn and append the reply.
    ///
    /// The user's entry is appended and `thinking` raised before any network
    /// I/O, so it is visible even if the call fails. Every accepted call
    /// appends exactly two entries, and `thinking` is cleared on every exit
    /// path including cancellation.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        let accepted = self.inner.state.send_if_modified(|s| {
            if s.thinking {
                return false;
            }
            s.transcript.push(ChatMessage::user(text));
            s.thinking = true;
            true
        });

        if !accepted {
            tracing::warn!("Chat message rejected: previous message still awaiting reply");
            return SendOutcome::Busy;
        }

        let guard = OnDrop::new(|| {
            self.inner.state.send_modify(|s| s.thinking = false);
        });

        let session_id = self.session_id().await;
        let request = ChatRequest::user_turn(session_id.into_inner(), text);

        let (reply, outcome) = match self.inner.api.chat(&request).await {
            Ok(response) => {
                tracing::debug!(has_plot = response.plot.is_some(), "Chat reply received");
                (ChatMessage::from_reply(response), SendOutcome::Replied)
            }
            Err(e) => {
                tracing::error!(path = %e.path(), status = ?e.status(), error = %e, "Chat request failed");
                (ChatMessage::assistant(BACKEND_ERROR_TEXT), SendOutcome::Failed)
            }
        };

        self.inner.state.send_modify(|s| {
            s.transcript.push(reply);
            s.thinking = false;
        });
        guard.disarm();

        outcome
    }
}
