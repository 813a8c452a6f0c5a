use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::locale::Locale;

/// Kind of account behind a mined lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadType {
    #[serde(rename = "Factory")]
    Factory,
    #[serde(rename = "KOL")]
    Kol,
    #[serde(rename = "User")]
    #[serde(other)]
    User,
}

impl Default for LeadType {
    fn default() -> Self {
        LeadType::User
    }
}

impl LeadType {
    /// Wire string as exchanged with the AI collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadType::User => "User",
            LeadType::Factory => "Factory",
            LeadType::Kol => "KOL",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.as_str(),
            Locale::Zh => match self {
                LeadType::User => "用户",
                LeadType::Factory => "工厂",
                LeadType::Kol => "达人",
            },
        }
    }
}

/// Ordinal classification of a lead's business worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueCategory {
    #[serde(rename = "High Value User")]
    High,
    #[serde(rename = "Potential Partner")]
    PotentialPartner,
    #[serde(rename = "Medium Value User")]
    Medium,
    #[serde(rename = "Low Value User")]
    #[serde(other)]
    Low,
}

impl Default for ValueCategory {
    fn default() -> Self {
        ValueCategory::Low
    }
}

impl ValueCategory {
    /// Sort priority: higher sorts first under the default descending order.
    pub fn priority(&self) -> u8 {
        match self {
            ValueCategory::High => 3,
            ValueCategory::PotentialPartner => 2,
            ValueCategory::Medium => 1,
            ValueCategory::Low => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueCategory::High => "High Value User",
            ValueCategory::PotentialPartner => "Potential Partner",
            ValueCategory::Medium => "Medium Value User",
            ValueCategory::Low => "Low Value User",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.as_str(),
            Locale::Zh => match self {
                ValueCategory::High => "高价值用户",
                ValueCategory::PotentialPartner => "潜在合作伙伴",
                ValueCategory::Medium => "中价值用户",
                ValueCategory::Low => "低价值用户",
            },
        }
    }
}

/// How likely the lead has already been approached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutreachStatus {
    #[serde(rename = "Likely Uncontacted")]
    LikelyUncontacted,
    #[serde(rename = "Likely Contacted")]
    LikelyContacted,
    #[serde(rename = "Unknown")]
    #[serde(other)]
    Unknown,
}

impl Default for OutreachStatus {
    fn default() -> Self {
        OutreachStatus::Unknown
    }
}

impl OutreachStatus {
    pub fn priority(&self) -> u8 {
        match self {
            OutreachStatus::LikelyUncontacted => 2,
            OutreachStatus::Unknown => 1,
            OutreachStatus::LikelyContacted => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutreachStatus::LikelyUncontacted => "Likely Uncontacted",
            OutreachStatus::Unknown => "Unknown",
            OutreachStatus::LikelyContacted => "Likely Contacted",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.as_str(),
            Locale::Zh => match self {
                OutreachStatus::LikelyUncontacted => "大概率未触达",
                OutreachStatus::Unknown => "未知",
                OutreachStatus::LikelyContacted => "大概率已触达",
            },
        }
    }
}

/// A structured lead record returned by the AI collaborator.
///
/// Created in bulk as the result of one mining call; held in memory for the
/// duration of one result view; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinedLead {
    pub account_name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub lead_type: LeadType,
    #[serde(default)]
    pub value_category: ValueCategory,
    #[serde(default)]
    pub outreach_status: OutreachStatus,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub suggested_action: String,
    #[serde(default)]
    pub reason: String,
}

impl MinedLead {
    /// Stable identity for keying per-lead derived view state.
    ///
    /// Positional indices change across sorts and filters, so derived state
    /// is keyed by a content hash of account name + context instead.
    pub fn identity(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.account_name.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.context.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// The lead's date parsed to a UTC instant, if it parses at all.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_flexible_date)
    }

    /// Millisecond timestamp for sorting; unparseable/absent dates sort as
    /// epoch 0.
    pub fn timestamp_or_epoch(&self) -> i64 {
        self.parsed_date().map(|d| d.timestamp_millis()).unwrap_or(0)
    }
}

/// Parse the loosely ISO-like date strings the AI collaborator emits.
pub fn parse_flexible_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight));
        }
    }

    None
}
