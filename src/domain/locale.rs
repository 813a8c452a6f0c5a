use serde::{Deserialize, Serialize};

/// Display locale for user-facing labels and exports.
///
/// The header vocabulary and all enum display labels cover exactly these
/// two locales; anything else is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh")]
    Zh,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

/// A vocabulary entry tagged with the locale it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct MatchTerm {
    pub locale: Locale,
    pub term: &'static str,
}

impl MatchTerm {
    pub const fn new(locale: Locale, term: &'static str) -> Self {
        Self { locale, term }
    }
}
