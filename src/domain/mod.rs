pub mod error;
pub mod lead;
pub mod llm_config;
pub mod locale;
pub mod mining;
pub mod table;
pub mod view_state;
