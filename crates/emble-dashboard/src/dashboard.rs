use emble_client::ApiClient;
use emble_session::SessionIdProvider;
use emble_types::MaWindow;

use crate::chat::ChatOrchestrator;
use crate::kpi::KpiViewModel;
use crate::series::{SeriesOptions, SeriesViewModel, StalePolicy};

#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub stale_policy: StalePolicy,
    pub default_window: MaWindow,
    /// Seed the transcript with an assistant greeting
    pub greeting: Option<String>,
}

/// The three view models behind the two-pane layout.
///
/// They share the API client but no state; their fetches are independent
/// and may interleave freely.
#[derive(Clone)]
pub struct Dashboard {
    pub kpi: KpiViewModel,
    pub series: SeriesViewModel,
    pub chat: ChatOrchestrator,
}

impl Dashboard {
    pub fn new(api: ApiClient, session: SessionIdProvider, options: DashboardOptions) -> Self {
        let kpi = KpiViewModel::new(api.clone());
        let series = SeriesViewModel::with_options(
            api.clone(),
            SeriesOptions {
                policy: options.stale_policy,
                window: options.default_window,
            },
        );
        let chat = match options.greeting {
            Some(greeting) => ChatOrchestrator::with_greeting(api, session, greeting),
            None => ChatOrchestrator::new(api, session),
        };

        Self { kpi, series, chat }
    }

    /// Mount-time loads: KPI snapshot and account groups, concurrently.
    pub async fn init(&self) {
        tokio::join!(self.kpi.load(), self.series.init());
        tracing::info!("Dashboard initialised");
    }
}
