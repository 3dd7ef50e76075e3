pub mod command;
pub mod config;
pub mod logging;
pub mod render;

use std::sync::Arc;
use std::time::Duration;

use emble_client::{ApiClient, ClientConfig};
use emble_dashboard::{Dashboard, DashboardOptions};
use emble_session::{FileSessionStore, MemorySessionStore, SessionIdProvider, SessionStore};

use crate::config::{Config, SessionConfig};

/// Wire the view models from configuration.
pub fn build_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let mut client_config = ClientConfig::new(config.api.base_url.clone());
    if let Some(ms) = config.api.timeout_ms {
        client_config = client_config.with_timeout(Duration::from_millis(ms));
    }
    let api = ApiClient::from_config(client_config)?;

    let options = DashboardOptions {
        stale_policy: config.series.stale_policy,
        default_window: config.series.default_window,
        greeting: config.chat.greeting_text(),
    };

    Ok(Dashboard::new(api, session_provider(&config.session), options))
}

/// File-backed unless persistence is off or there is nowhere to write.
pub fn session_provider(config: &SessionConfig) -> SessionIdProvider {
    let store: Arc<dyn SessionStore> = if !config.persist {
        Arc::new(MemorySessionStore::new())
    } else {
        match config.store_path.clone().or_else(FileSessionStore::default_path) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Using file session store");
                Arc::new(FileSessionStore::new(path))
            }
            None => {
                tracing::warn!("No data directory available, session id will not survive restarts");
                Arc::new(MemorySessionStore::new())
            }
        }
    };

    SessionIdProvider::persistent(store)
}
