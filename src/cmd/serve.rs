//! HTTP API server command: `feedbackhub serve`.

use anyhow::Result;
use feedbackhub::config::HubConfig;

pub async fn cmd_serve(config: &HubConfig) -> Result<()> {
    for warning in config.validate() {
        tracing::warn!(%warning, "configuration warning");
    }
    feedbackhub::roadmap::server::start_server(config.server_config()).await
}
