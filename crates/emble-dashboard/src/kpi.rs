use emble_client::ApiClient;
use emble_types::KpiSummary;
use std::sync::Arc;
use tokio::sync::watch;

use crate::guard::OnDrop;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KpiStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Ready,
    /// Last fetch failed; any earlier snapshot is kept
    Unavailable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiState {
    pub summary: Option<KpiSummary>,
    pub status: KpiStatus,
}

impl KpiState {
    /// True when there is nothing to show and the placeholder should say so
    pub fn is_unavailable(&self) -> bool {
        self.summary.is_none() && self.status == KpiStatus::Unavailable
    }
}

/// Holds the KPI snapshot shown in the summary strip.
#[derive(Clone)]
pub struct KpiViewModel {
    api: ApiClient,
    state: Arc<watch::Sender<KpiState>>,
}

impl KpiViewModel {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(KpiState::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    pub fn snapshot(&self) -> KpiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<KpiState> {
        self.state.subscribe()
    }

    /// Fetch `/kpi/summary` once. Failures are logged and never returned.
    pub async fn load(&self) {
        self.state.send_modify(|s| s.status = KpiStatus::Loading);

        let guard = OnDrop::new(|| {
            self.state.send_if_modified(|s| {
                if s.status == KpiStatus::Loading {
                    s.status = KpiStatus::Unavailable;
                    true
                } else {
                    false
                }
            });
        });

        match self.api.kpi_summary().await {
            Ok(summary) => {
                tracing::debug!(currency = %summary.currency, "KPI summary loaded");
                self.state.send_modify(|s| {
                    s.summary = Some(summary);
                    s.status = KpiStatus::Ready;
                });
            }
            Err(e) => {
                tracing::error!(path = %e.path(), status = ?e.status(), error = %e, "Failed to fetch KPI data");
                self.state.send_modify(|s| s.status = KpiStatus::Unavailable);
            }
        }

        guard.disarm();
    }
}
