use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::application::use_cases::prompts::{outreach_system_prompt, outreach_user_prompt};
use crate::domain::error::Result;
use crate::domain::lead::{MinedLead, OutreachStatus, ValueCategory};
use crate::domain::llm_config::LLMConfig;
use crate::domain::locale::Locale;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_llm_response;

pub struct OutreachUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl OutreachUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    /// Generate a first-touch outreach script for one lead.
    pub async fn generate_script(
        &self,
        config: &LLMConfig,
        lead: &MinedLead,
        locale: Locale,
    ) -> Result<String> {
        let system = outreach_system_prompt(locale);
        let user = outreach_user_prompt(lead);

        let raw = self.llm_client.generate(config, &system, &user).await?;
        info!(account = %lead.account_name, "outreach script generated");
        Ok(clean_llm_response(&raw))
    }
}

/// Build the plain-text strategy report over one mined batch.
///
/// Fixed template of labeled lines; no AI call involved.
pub fn build_strategy_report(
    leads: &[MinedLead],
    query: &str,
    locale: Locale,
    now: DateTime<Utc>,
) -> String {
    let (title, generated, query_label, total_label, by_value, by_status, by_platform) =
        match locale {
            Locale::En => (
                "Sales Lead Strategy Report",
                "Generated",
                "Query",
                "Total leads",
                "By value category",
                "By outreach status",
                "By platform",
            ),
            Locale::Zh => (
                "销售线索策略报告",
                "生成日期",
                "查询",
                "线索总数",
                "按价值分类",
                "按触达状态",
                "按平台",
            ),
        };

    let mut lines = vec![
        title.to_string(),
        format!("{}: {}", generated, now.format("%Y-%m-%d")),
        format!("{}: {}", query_label, query),
        format!("{}: {}", total_label, leads.len()),
        String::new(),
        format!("{}:", by_value),
    ];

    for category in [
        ValueCategory::High,
        ValueCategory::PotentialPartner,
        ValueCategory::Medium,
        ValueCategory::Low,
    ] {
        let count = leads.iter().filter(|l| l.value_category == category).count();
        lines.push(format!("  {}: {}", category.label(locale), count));
    }

    lines.push(String::new());
    lines.push(format!("{}:", by_status));
    for status in [
        OutreachStatus::LikelyUncontacted,
        OutreachStatus::Unknown,
        OutreachStatus::LikelyContacted,
    ] {
        let count = leads.iter().filter(|l| l.outreach_status == status).count();
        lines.push(format!("  {}: {}", status.label(locale), count));
    }

    let mut platforms: BTreeMap<&str, usize> = BTreeMap::new();
    for lead in leads {
        *platforms.entry(lead.platform.as_str()).or_default() += 1;
    }
    lines.push(String::new());
    lines.push(format!("{}:", by_platform));
    for (platform, count) in platforms {
        lines.push(format!("  {}: {}", platform, count));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::LeadType;
    use chrono::TimeZone;

    fn lead(platform: &str, category: ValueCategory) -> MinedLead {
        MinedLead {
            account_name: "acct".to_string(),
            platform: platform.to_string(),
            lead_type: LeadType::User,
            value_category: category,
            outreach_status: OutreachStatus::Unknown,
            date: None,
            context: String::new(),
            suggested_action: String::new(),
            reason: String::new(),
        }
    }

    #[test]
    fn test_report_counts_categories_and_platforms() {
        let leads = vec![
            lead("Douyin", ValueCategory::High),
            lead("Douyin", ValueCategory::High),
            lead("Xiaohongshu", ValueCategory::Low),
        ];
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let report = build_strategy_report(&leads, "mug factories", Locale::En, now);

        assert!(report.starts_with("Sales Lead Strategy Report"));
        assert!(report.contains("Generated: 2024-06-01"));
        assert!(report.contains("Query: mug factories"));
        assert!(report.contains("Total leads: 3"));
        assert!(report.contains("  High Value User: 2"));
        assert!(report.contains("  Low Value User: 1"));
        assert!(report.contains("  Douyin: 2"));
        assert!(report.contains("  Xiaohongshu: 1"));
    }

    #[test]
    fn test_report_localizes_labels() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let report = build_strategy_report(&[], "查询词", Locale::Zh, now);
        assert!(report.starts_with("销售线索策略报告"));
        assert!(report.contains("线索总数: 0"));
        assert!(report.contains("高价值用户: 0"));
    }
}
