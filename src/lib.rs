pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::use_cases::assistant::LeadAssistant;
pub use application::use_cases::header_classifier::classify;
pub use application::use_cases::lead_pipeline::{derive, LeadPage};
pub use application::use_cases::row_normalizer::normalize;
pub use domain::error::{AppError, Result};
pub use domain::lead::MinedLead;
pub use domain::table::{CellValue, ColumnRoleMap, RawTable};
pub use infrastructure::bootstrap::{build_assistant, init_tracing};
