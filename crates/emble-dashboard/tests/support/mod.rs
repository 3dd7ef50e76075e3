//! In-process backend for driving the view models deterministically.
#![allow(dead_code)]

use async_trait::async_trait;
use emble_client::{ApiClient, HttpTransport, RequestError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Reply = Result<Value, RequestError>;
type Responder = Box<dyn Fn(&str, &str, Option<&Value>) -> Reply + Send + Sync>;

/// A request parked until the test answers it.
pub struct PendingRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    reply: oneshot::Sender<Reply>,
}

impl PendingRequest {
    pub fn respond(self, value: Value) {
        let _ = self.reply.send(Ok(value));
    }

    pub fn fail(self, status: u16) {
        let error = status_error(&self.path, status);
        let _ = self.reply.send(Err(error));
    }
}

enum Mode {
    Manual(mpsc::UnboundedSender<PendingRequest>),
    Auto(Responder),
}

pub struct ScriptedTransport {
    mode: Mode,
    log: Mutex<Vec<(String, String, Option<Value>)>>,
}

impl ScriptedTransport {
    /// Every request is handed to the returned receiver and waits for an answer.
    pub fn manual() -> (Arc<Self>, mpsc::UnboundedReceiver<PendingRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = Arc::new(Self {
            mode: Mode::Manual(tx),
            log: Mutex::new(Vec::new()),
        });
        (transport, rx)
    }

    /// Every request is answered immediately by `responder(method, path, body)`.
    pub fn auto<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&str, &str, Option<&Value>) -> Reply + Send + Sync + 'static,
    {
        Arc::new(Self {
            mode: Mode::Auto(Box::new(responder)),
            log: Mutex::new(Vec::new()),
        })
    }

    /// `(method, path)` of every request seen, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(m, p, _)| (m.clone(), p.clone()))
            .collect()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, _, b)| b.clone())
            .collect()
    }

    async fn dispatch(&self, method: &'static str, path: &str, body: Option<Value>) -> Reply {
        self.log
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string(), body.clone()));

        match &self.mode {
            Mode::Auto(responder) => responder(method, path, body.as_ref()),
            Mode::Manual(tx) => {
                let (reply, rx) = oneshot::channel();
                tx.send(PendingRequest {
                    method,
                    path: path.to_string(),
                    body,
                    reply,
                })
                .expect("test dropped the request receiver");

                rx.await.unwrap_or_else(|_| {
                    Err(RequestError::Transport {
                        path: path.to_string(),
                        message: "request abandoned".to_string(),
                    })
                })
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, path: &str) -> Reply {
        self.dispatch("GET", path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Reply {
        self.dispatch("POST", path, Some(body)).await
    }
}

pub fn api(transport: &Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::new(transport.clone())
}

pub fn status_error(path: &str, status: u16) -> RequestError {
    RequestError::Status {
        path: path.to_string(),
        status,
    }
}

pub fn kpi_json(revenue: f64) -> Value {
    json!({
        "currency": "SEK",
        "period": {"year": 2024, "from": "2024-01-01", "to": "2024-06-30"},
        "revenue_ytd": revenue,
        "expenses_ytd": 80000.0,
        "net_result_ytd": revenue - 80000.0
    })
}

/// Single-point series whose amount identifies the response
pub fn series_json(group: &str, window: u32, amount: f64) -> Value {
    json!({
        "series": [{"date": "2024-01", "amount": amount, "amountMA": amount}],
        "meta": {"group": group, "window": window}
    })
}
