use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::use_cases::row_normalizer::DEFAULT_MAX_ROWS;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;

/// Spreadsheet import limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Data rows consumed per imported file.
    pub max_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Application configuration: defaults, overridden by `leadsense.toml`,
/// overridden by `LEADSENSE_`-prefixed environment variables
/// (e.g. `LEADSENSE_LLM__API_KEY`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LLMConfig,
    pub import: ImportConfig,
}

pub struct ConfigService;

impl ConfigService {
    /// Load configuration, picking up a `.env` file when present.
    pub fn load() -> Result<AppConfig> {
        let _ = dotenvy::dotenv();

        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("leadsense.toml"))
            .merge(Env::prefixed("LEADSENSE_").split("__"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        info!(provider = ?config.llm.provider, model = %config.llm.model, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.import.max_rows, DEFAULT_MAX_ROWS);
        assert!(!config.llm.model.is_empty());
    }
}
