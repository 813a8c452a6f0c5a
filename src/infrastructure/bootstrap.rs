use std::sync::Arc;

use tracing::error;

use crate::application::use_cases::assistant::LeadAssistant;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::RouterClient;

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

/// Load configuration and wire a ready-to-use assistant session.
pub fn build_assistant() -> Result<LeadAssistant> {
    let config = ConfigService::load().map_err(|err| {
        error!(error = %err, "failed to load configuration");
        err
    })?;

    Ok(LeadAssistant::new(config, Arc::new(RouterClient::new())))
}
