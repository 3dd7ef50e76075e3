use emble_client::ApiClient;
use emble_types::{MaWindow, SeriesMeta, SeriesPoint};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::guard::OnDrop;

/// What happens when series fetches overlap.
///
/// Nothing is ever cancelled; the policy only decides whose result is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Every response is applied as it arrives, so the slowest one wins
    #[default]
    #[serde(alias = "last_resolved")]
    LastResolvedWins,
    /// Responses to anything but the newest request are dropped
    #[serde(alias = "latest_request")]
    LatestRequestWins,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesSelection {
    pub group: Option<String>,
    pub window: MaWindow,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesState {
    /// Selectable account groups, in backend order
    pub groups: Vec<String>,
    pub selection: SeriesSelection,
    pub series: Vec<SeriesPoint>,
    /// Meta of the response currently shown, which may lag `selection`
    pub meta: Option<SeriesMeta>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesOptions {
    pub policy: StalePolicy,
    pub window: MaWindow,
}

struct SeriesInner {
    api: ApiClient,
    policy: StalePolicy,
    state: watch::Sender<SeriesState>,
    /// Id of the newest series request issued
    generation: AtomicU64,
}

/// Account-group chart: category list plus the selected series.
#[derive(Clone)]
pub struct SeriesViewModel {
    inner: Arc<SeriesInner>,
}

impl SeriesViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self::with_options(api, SeriesOptions::default())
    }

    pub fn with_options(api: ApiClient, options: SeriesOptions) -> Self {
        let initial = SeriesState {
            selection: SeriesSelection {
                group: None,
                window: options.window,
            },
            ..SeriesState::default()
        };
        let (state, _) = watch::channel(initial);

        Self {
            inner: Arc::new(SeriesInner {
                api,
                policy: options.policy,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn policy(&self) -> StalePolicy {
        self.inner.policy
    }

    pub fn snapshot(&self) -> SeriesState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SeriesState> {
        self.inner.state.subscribe()
    }

    /// Load the category list once and, if nothing is selected yet, select
    /// the first category and fetch its series.
    pub async fn init(&self) {
        let groups = match self.inner.api.account_groups().await {
            Ok(response) => response.groups,
            Err(e) => {
                tracing::error!(path = %e.path(), status = ?e.status(), error = %e, "Failed to load account groups");
                return;
            }
        };

        tracing::debug!(count = groups.len(), "Account groups loaded");

        let mut picked_default = false;
        self.inner.state.send_modify(|s| {
            if s.selection.group.is_none() {
                if let Some(first) = groups.first() {
                    s.selection.group = Some(first.clone());
                    picked_default = true;
                }
            }
            s.groups = groups;
        });

        if picked_default {
            self.load_series().await;
        }
    }

    /// Change the selected category. `None` or a blank name clears the chart
    /// without fetching.
    pub async fn set_group(&self, group: Option<String>) {
        let group = group.filter(|g| !g.trim().is_empty());
        let changed = self.inner.state.send_if_modified(|s| {
            if s.selection.group == group {
                return false;
            }
            s.selection.group = group;
            true
        });

        if changed {
            self.load_series().await;
        }
    }

    pub async fn set_window(&self, window: MaWindow) {
        let changed = self.inner.state.send_if_modified(|s| {
            if s.selection.window == window {
                return false;
            }
            s.selection.window = window;
            true
        });

        if changed {
            self.load_series().await;
        }
    }

    /// Refetch the series for the current selection.
    pub async fn load_series(&self) {
        let selection = self.inner.state.borrow().selection.clone();

        let Some(group) = selection.group else {
            // Supersedes any fetch still in flight
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            let drop_loading = self.inner.policy == StalePolicy::LatestRequestWins;
            self.inner.state.send_if_modified(|s| {
                let changed = !s.series.is_empty() || s.meta.is_some() || (drop_loading && s.loading);
                s.series.clear();
                s.meta = None;
                if drop_loading {
                    s.loading = false;
                }
                changed
            });
            return;
        };

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|s| s.loading = true);

        let guard = OnDrop::new(|| {
            self.finish(generation, |_| {});
        });

        let result = self.inner.api.series(&group, selection.window).await;

        if !self.is_current(generation) {
            tracing::debug!(
                group = %group,
                window = selection.window.months(),
                generation,
                "Discarding stale series response"
            );
            guard.disarm();
            return;
        }

        match result {
            Ok(response) => {
                tracing::debug!(group = %group, points = response.series.len(), "Series loaded");
                self.finish(generation, |s| {
                    s.series = response.series;
                    s.meta = Some(response.meta);
                });
            }
            Err(e) => {
                tracing::warn!(path = %e.path(), status = ?e.status(), error = %e, "Failed to load series");
                self.finish(generation, |s| {
                    s.series.clear();
                    s.meta = None;
                });
            }
        }

        guard.disarm();
    }

    /// Whether a response for `generation` may still touch the state.
    fn is_current(&self, generation: u64) -> bool {
        match self.inner.policy {
            StalePolicy::LastResolvedWins => true,
            StalePolicy::LatestRequestWins => {
                self.inner.generation.load(Ordering::SeqCst) == generation
            }
        }
    }

    /// Apply `update` and drop the loading flag in one notification.
    fn finish(&self, generation: u64, update: impl FnOnce(&mut SeriesState)) {
        let clear_loading = self.is_current(generation);
        self.inner.state.send_modify(|s| {
            update(s);
            if clear_loading {
                s.loading = false;
            }
        });
    }
}
