// ============================================================
// RESULT VIEW STATE
// ============================================================
// Pure view state driving the lead result pipeline.
// No side effects beyond re-deriving the visible lead sequence.

use serde::{Deserialize, Serialize};

use super::lead::LeadType;

/// Leads per result page.
pub const PAGE_SIZE: usize = 10;

/// Number of days after which a dated lead counts as stale.
pub const STALE_AFTER_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "valueCategory")]
    ValueCategory,
    #[serde(rename = "outreachStatus")]
    OutreachStatus,
    #[serde(rename = "accountName")]
    AccountName,
    #[serde(rename = "leadType")]
    LeadType,
}

impl SortKey {
    /// Ordinal keys default to descending, textual keys to ascending.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortKey::Date | SortKey::ValueCategory | SortKey::OutreachStatus => {
                SortDirection::Descending
            }
            SortKey::AccountName | SortKey::LeadType => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active sort over the result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortKey::Date.default_direction(),
        }
    }
}

impl SortState {
    /// Toggling the active key flips direction; switching keys resets to the
    /// new key's default direction.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = key.default_direction();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecencyFilter {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "recent")]
    Recent,
    #[serde(rename = "stale")]
    Stale,
}

impl Default for RecencyFilter {
    fn default() -> Self {
        RecencyFilter::All
    }
}

/// Conjunctive, independently toggleable filter predicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub recency: RecencyFilter,
    pub lead_type: Option<LeadType>,
    pub platform: Option<String>,
}
