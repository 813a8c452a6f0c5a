use serde::{Deserialize, Serialize};
use validator::Validate;

use super::lead::MinedLead;

/// Literal marker separating free-text input from imported spreadsheet data
/// in the payload sent to the AI collaborator.
pub const IMPORTED_DATA_MARKER: &str = "--- IMPORTED DATA ---";

/// One user-initiated mining request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MiningRequest {
    /// Free-text description of the leads to look for.
    #[validate(length(min = 1, max = 4096))]
    pub query: String,

    /// Normalized spreadsheet corpus, if the user imported a file.
    pub imported_corpus: Option<String>,
}

impl MiningRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            imported_corpus: None,
        }
    }

    pub fn with_corpus(mut self, corpus: impl Into<String>) -> Self {
        self.imported_corpus = Some(corpus.into());
        self
    }

    /// The full user payload: query text, then the imported block behind the
    /// literal separator marker when present.
    pub fn combined_input(&self) -> String {
        match self.imported_corpus.as_deref() {
            Some(corpus) if !corpus.trim().is_empty() => {
                format!(
                    "{}\n\n{}\n{}",
                    self.query.trim(),
                    IMPORTED_DATA_MARKER,
                    corpus
                )
            }
            _ => self.query.trim().to_string(),
        }
    }
}

/// The outcome of one mining call, tagged with the request generation that
/// produced it so stale completions can be discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinedBatch {
    pub generation: u64,
    pub leads: Vec<MinedLead>,
}
