// ============================================================
// LEAD RESULT PIPELINE
// ============================================================
// Filter, sort, and paginate mined leads into one visible page

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::lead::MinedLead;
use crate::domain::view_state::{
    FilterState, RecencyFilter, SortDirection, SortKey, SortState, STALE_AFTER_DAYS,
};

/// One derived page of the result view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadPage {
    pub items: Vec<MinedLead>,
    pub total_count: usize,
    pub total_pages: usize,
}

/// A lead is stale when its date parses and sits more than 90 days away
/// from `now` in either direction. Unparseable or absent dates are never
/// stale.
pub fn is_stale(lead: &MinedLead, now: DateTime<Utc>) -> bool {
    match lead.parsed_date() {
        Some(date) => (now - date).abs() > Duration::days(STALE_AFTER_DAYS),
        None => false,
    }
}

fn passes_filters(lead: &MinedLead, filters: &FilterState, now: DateTime<Utc>) -> bool {
    let recency_ok = match filters.recency {
        RecencyFilter::All => true,
        RecencyFilter::Recent => !is_stale(lead, now),
        RecencyFilter::Stale => is_stale(lead, now),
    };

    recency_ok
        && filters
            .lead_type
            .map_or(true, |wanted| lead.lead_type == wanted)
        && filters
            .platform
            .as_deref()
            .map_or(true, |wanted| lead.platform == wanted)
}

fn primary_ordering(a: &MinedLead, b: &MinedLead, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.timestamp_or_epoch().cmp(&b.timestamp_or_epoch()),
        SortKey::ValueCategory => a.value_category.priority().cmp(&b.value_category.priority()),
        SortKey::OutreachStatus => a
            .outreach_status
            .priority()
            .cmp(&b.outreach_status.priority()),
        SortKey::AccountName => a
            .account_name
            .to_lowercase()
            .cmp(&b.account_name.to_lowercase()),
        SortKey::LeadType => a
            .lead_type
            .as_str()
            .to_lowercase()
            .cmp(&b.lead_type.as_str().to_lowercase()),
    }
}

/// Full comparator: direction applies to the primary key only; equal leads
/// always fall back to descending parsed date so ordering is deterministic.
pub fn compare_leads(a: &MinedLead, b: &MinedLead, sort: &SortState) -> Ordering {
    let ordering = match sort.direction {
        SortDirection::Ascending => primary_ordering(a, b, sort.key),
        SortDirection::Descending => primary_ordering(a, b, sort.key).reverse(),
    };

    if ordering == Ordering::Equal {
        b.timestamp_or_epoch().cmp(&a.timestamp_or_epoch())
    } else {
        ordering
    }
}

/// Derive the visible page for the given view state.
///
/// Pure over its inputs; `now` is passed in so recency has a single
/// consistent reference point per derive cycle.
pub fn derive(
    leads: &[MinedLead],
    filters: &FilterState,
    sort: &SortState,
    page: usize,
    page_size: usize,
    now: DateTime<Utc>,
) -> LeadPage {
    let mut visible: Vec<MinedLead> = leads
        .iter()
        .filter(|lead| passes_filters(lead, filters, now))
        .cloned()
        .collect();

    visible.sort_by(|a, b| compare_leads(a, b, sort));

    let total_count = visible.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        (total_count + page_size - 1) / page_size
    };

    let page = page.max(1);
    let items = visible
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    LeadPage {
        items,
        total_count,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::{LeadType, OutreachStatus, ValueCategory};
    use crate::domain::view_state::PAGE_SIZE;
    use chrono::TimeZone;

    fn lead(account: &str, category: ValueCategory, date: Option<&str>) -> MinedLead {
        MinedLead {
            account_name: account.to_string(),
            platform: "Douyin".to_string(),
            lead_type: LeadType::User,
            value_category: category,
            outreach_status: OutreachStatus::Unknown,
            date: date.map(str::to_string),
            context: String::new(),
            suggested_action: String::new(),
            reason: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_stale_boundary_at_ninety_days() {
        let ninety = lead("a", ValueCategory::Low, Some("2024-03-03"));
        let ninety_one = lead("b", ValueCategory::Low, Some("2024-03-02"));
        assert!(!is_stale(&ninety, now()));
        assert!(is_stale(&ninety_one, now()));
    }

    #[test]
    fn test_undated_lead_is_never_stale() {
        let undated = lead("a", ValueCategory::Low, None);
        let garbled = lead("b", ValueCategory::Low, Some("soonish"));
        assert!(!is_stale(&undated, now()));
        assert!(!is_stale(&garbled, now()));
    }

    #[test]
    fn test_future_dates_past_window_are_stale() {
        let future = lead("a", ValueCategory::Low, Some("2024-09-15"));
        assert!(is_stale(&future, now()));
    }

    #[test]
    fn test_category_sort_with_date_tiebreak() {
        let leads = vec![
            lead("low", ValueCategory::Low, Some("2024-05-30")),
            lead("high-old", ValueCategory::High, Some("2024-01-01")),
            lead("partner", ValueCategory::PotentialPartner, Some("2024-05-01")),
            lead("high-new", ValueCategory::High, Some("2024-05-20")),
            lead("medium", ValueCategory::Medium, Some("2024-05-10")),
        ];
        let sort = SortState {
            key: SortKey::ValueCategory,
            direction: SortDirection::Descending,
        };
        let page = derive(&leads, &FilterState::default(), &sort, 1, PAGE_SIZE, now());
        let order: Vec<&str> = page.items.iter().map(|l| l.account_name.as_str()).collect();
        assert_eq!(order, vec!["high-new", "high-old", "partner", "medium", "low"]);
    }

    #[test]
    fn test_recency_filter_splits_both_ways() {
        let leads = vec![
            lead("fresh", ValueCategory::Low, Some("2024-05-20")),
            lead("old", ValueCategory::Low, Some("2023-11-01")),
            lead("undated", ValueCategory::Low, None),
        ];
        let mut filters = FilterState::default();

        filters.recency = RecencyFilter::Recent;
        let recent = derive(&leads, &filters, &SortState::default(), 1, PAGE_SIZE, now());
        assert_eq!(recent.total_count, 2);

        filters.recency = RecencyFilter::Stale;
        let stale = derive(&leads, &filters, &SortState::default(), 1, PAGE_SIZE, now());
        assert_eq!(stale.total_count, 1);
        assert_eq!(stale.items[0].account_name, "old");
    }

    #[test]
    fn test_platform_and_type_filters_are_conjunctive() {
        let mut other = lead("other", ValueCategory::Low, None);
        other.platform = "Xiaohongshu".to_string();
        let mut factory = lead("factory", ValueCategory::Low, None);
        factory.lead_type = LeadType::Factory;
        let leads = vec![lead("match", ValueCategory::Low, None), other, factory];

        let filters = FilterState {
            recency: RecencyFilter::All,
            lead_type: Some(LeadType::User),
            platform: Some("Douyin".to_string()),
        };
        let page = derive(&leads, &filters, &SortState::default(), 1, PAGE_SIZE, now());
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].account_name, "match");
    }

    #[test]
    fn test_pagination_math() {
        let leads: Vec<MinedLead> = (0..25)
            .map(|i| lead(&format!("acct{:02}", i), ValueCategory::Low, None))
            .collect();
        let sort = SortState {
            key: SortKey::AccountName,
            direction: SortDirection::Ascending,
        };
        let page = derive(&leads, &FilterState::default(), &sort, 3, PAGE_SIZE, now());
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].account_name, "acct20");
    }

    #[test]
    fn test_ascending_direction_reverses_primary_only() {
        let leads = vec![
            lead("b", ValueCategory::Low, Some("2024-05-01")),
            lead("a", ValueCategory::Low, Some("2024-04-01")),
        ];
        let sort = SortState {
            key: SortKey::AccountName,
            direction: SortDirection::Ascending,
        };
        let page = derive(&leads, &FilterState::default(), &sort, 1, PAGE_SIZE, now());
        assert_eq!(page.items[0].account_name, "a");
    }
}
