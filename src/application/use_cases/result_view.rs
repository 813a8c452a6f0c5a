// ============================================================
// RESULT VIEW
// ============================================================
// Caller-held view state over one mined batch

use std::collections::HashSet;

use chrono::Utc;

use crate::application::use_cases::lead_pipeline::{derive, LeadPage};
use crate::domain::lead::{LeadType, MinedLead};
use crate::domain::view_state::{FilterState, RecencyFilter, SortKey, SortState, PAGE_SIZE};

/// Holds the lead buffer plus filter/sort/page state for one result view.
///
/// Any filter or sort change resets the page to 1. Per-lead expanded state
/// is keyed by stable lead identity, not positional index, so it survives
/// re-sorts and re-filters.
#[derive(Debug)]
pub struct ResultView {
    leads: Vec<MinedLead>,
    filters: FilterState,
    sort: SortState,
    page: usize,
    expanded: HashSet<String>,
}

impl Default for ResultView {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultView {
    pub fn new() -> Self {
        Self {
            leads: Vec::new(),
            filters: FilterState::default(),
            sort: SortState::default(),
            page: 1,
            expanded: HashSet::new(),
        }
    }

    /// Replace the buffer with a freshly mined batch.
    pub fn set_leads(&mut self, leads: Vec<MinedLead>) {
        self.leads = leads;
        self.expanded.clear();
        self.page = 1;
    }

    pub fn leads(&self) -> &[MinedLead] {
        &self.leads
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_recency_filter(&mut self, recency: RecencyFilter) {
        self.filters.recency = recency;
        self.page = 1;
    }

    pub fn set_lead_type_filter(&mut self, lead_type: Option<LeadType>) {
        self.filters.lead_type = lead_type;
        self.page = 1;
    }

    pub fn set_platform_filter(&mut self, platform: Option<String>) {
        self.filters.platform = platform;
        self.page = 1;
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        self.page = 1;
    }

    /// Clamp into the valid page range; an empty view stays on page 1.
    pub fn set_page(&mut self, page: usize) {
        let total_pages = self.current().total_pages;
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn toggle_expanded(&mut self, identity: &str) {
        if !self.expanded.remove(identity) {
            self.expanded.insert(identity.to_string());
        }
    }

    pub fn is_expanded(&self, identity: &str) -> bool {
        self.expanded.contains(identity)
    }

    /// Derive the currently visible page.
    pub fn current(&self) -> LeadPage {
        derive(
            &self.leads,
            &self.filters,
            &self.sort,
            self.page,
            PAGE_SIZE,
            Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::{OutreachStatus, ValueCategory};

    fn lead(account: &str) -> MinedLead {
        MinedLead {
            account_name: account.to_string(),
            platform: "Douyin".to_string(),
            lead_type: LeadType::User,
            value_category: ValueCategory::Medium,
            outreach_status: OutreachStatus::Unknown,
            date: None,
            context: format!("context for {}", account),
            suggested_action: String::new(),
            reason: String::new(),
        }
    }

    fn view_with(count: usize) -> ResultView {
        let mut view = ResultView::new();
        view.set_leads((0..count).map(|i| lead(&format!("acct{:02}", i))).collect());
        view
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = view_with(25);
        view.set_page(3);
        assert_eq!(view.page(), 3);
        view.set_recency_filter(RecencyFilter::Recent);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut view = view_with(25);
        view.set_page(2);
        view.toggle_sort(SortKey::AccountName);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_page_is_clamped_to_range() {
        let mut view = view_with(25);
        view.set_page(99);
        assert_eq!(view.page(), 3);
        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_expanded_state_survives_resort() {
        let mut view = view_with(5);
        let identity = view.leads()[2].identity();
        view.toggle_expanded(&identity);
        view.toggle_sort(SortKey::AccountName);
        view.toggle_sort(SortKey::AccountName);
        assert!(view.is_expanded(&identity));
    }

    #[test]
    fn test_new_batch_clears_expanded_state() {
        let mut view = view_with(3);
        let identity = view.leads()[0].identity();
        view.toggle_expanded(&identity);
        view.set_leads(vec![lead("fresh")]);
        assert!(!view.is_expanded(&identity));
    }
}
