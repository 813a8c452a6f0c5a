pub mod use_cases;

pub use use_cases::assistant::LeadAssistant;
pub use use_cases::lead_miner::LeadMinerUseCase;
pub use use_cases::outreach::OutreachUseCase;
pub use use_cases::table_import::TableImportUseCase;
