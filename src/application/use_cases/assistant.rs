use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::application::use_cases::crm_tracker::CrmTracker;
use crate::application::use_cases::exporter::{
    export_leads_csv, export_strategy_report,
};
use crate::application::use_cases::lead_miner::LeadMinerUseCase;
use crate::application::use_cases::outreach::{build_strategy_report, OutreachUseCase};
use crate::application::use_cases::result_view::ResultView;
use crate::application::use_cases::table_import::{ImportOutcome, TableImportUseCase};
use crate::domain::error::Result;
use crate::domain::lead::MinedLead;
use crate::domain::locale::Locale;
use crate::domain::mining::MiningRequest;
use crate::domain::table::RawTable;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::LLMClient;

/// One user session of the sales-intelligence assistant.
///
/// Owns the view state the browser UI would otherwise hold: the imported
/// corpus, the mined result view, and the CRM tracker. Single-threaded and
/// event-driven; the only async boundary is the AI call inside `mine` and
/// `outreach_script`.
pub struct LeadAssistant {
    config: AppConfig,
    importer: TableImportUseCase,
    miner: LeadMinerUseCase,
    outreach: OutreachUseCase,
    view: ResultView,
    crm: CrmTracker,
    pending_corpus: Option<String>,
    last_query: String,
}

impl LeadAssistant {
    pub fn new(config: AppConfig, llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self {
            importer: TableImportUseCase::new(config.import.max_rows),
            miner: LeadMinerUseCase::new(llm_client.clone()),
            outreach: OutreachUseCase::new(llm_client),
            view: ResultView::new(),
            crm: CrmTracker::new(),
            pending_corpus: None,
            last_query: String::new(),
            config,
        }
    }

    /// Import a decoded spreadsheet; a usable corpus is kept for the next
    /// mining call, an unusable one leaves any earlier corpus in place.
    pub fn import_table(&mut self, table: &RawTable) -> ImportOutcome {
        let outcome = self.importer.import(table);
        if let Some(corpus) = &outcome.corpus {
            self.pending_corpus = Some(corpus.clone());
        }
        outcome
    }

    pub fn pending_corpus(&self) -> Option<&str> {
        self.pending_corpus.as_deref()
    }

    pub fn clear_pending_corpus(&mut self) {
        self.pending_corpus = None;
    }

    /// Run one mining request against the AI collaborator.
    ///
    /// Returns `true` when the batch was applied to the result view. A
    /// completion that lost the race against a newer request is discarded
    /// and the previous results stay untouched.
    pub async fn mine(&mut self, query: &str) -> Result<bool> {
        let mut request = MiningRequest::new(query);
        if let Some(corpus) = &self.pending_corpus {
            request = request.with_corpus(corpus.clone());
        }

        let batch = self.miner.mine(&self.config.llm, &request).await?;
        if !self.miner.is_current(&batch) {
            warn!(generation = batch.generation, "discarding stale mining result");
            return Ok(false);
        }

        self.last_query = query.to_string();
        self.view.set_leads(batch.leads);
        Ok(true)
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ResultView {
        &mut self.view
    }

    pub fn crm(&self) -> &CrmTracker {
        &self.crm
    }

    pub fn crm_mut(&mut self) -> &mut CrmTracker {
        &mut self.crm
    }

    pub async fn outreach_script(&self, lead: &MinedLead, locale: Locale) -> Result<String> {
        self.outreach
            .generate_script(&self.config.llm, lead, locale)
            .await
    }

    /// BOM-prefixed CSV of everything currently mined (not just the
    /// visible page).
    pub fn export_csv(&self, locale: Locale) -> String {
        export_leads_csv(self.view.leads(), locale)
    }

    /// BOM-prefixed strategy report over the current batch.
    pub fn export_report(&self, locale: Locale) -> String {
        let report =
            build_strategy_report(self.view.leads(), &self.last_query, locale, Utc::now());
        export_strategy_report(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::llm_config::LLMConfig;
    use crate::domain::table::CellValue;
    use async_trait::async_trait;

    struct CannedClient {
        reply: &'static str,
    }

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn generate(
            &self,
            _config: &LLMConfig,
            _system: &str,
            user: &str,
        ) -> Result<String> {
            if user.contains("FAIL") {
                return Err(AppError::LLMError("quota exceeded".to_string()));
            }
            Ok(self.reply.to_string())
        }

        async fn list_models(&self, _config: &LLMConfig) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    const REPLY: &str = r#"[{"accountName":"kiln_co","platform":"Douyin",
        "leadType":"Factory","valueCategory":"Potential Partner",
        "outreachStatus":"Likely Uncontacted","date":"2024-05-01",
        "context":"bulk pricing","suggestedAction":"DM","reason":"intent"}]"#;

    fn assistant() -> LeadAssistant {
        LeadAssistant::new(
            AppConfig::default(),
            Arc::new(CannedClient { reply: REPLY }),
        )
    }

    fn table() -> RawTable {
        RawTable::new(vec![
            vec![CellValue::from("评论内容"), CellValue::from("昵称")],
            vec![CellValue::from("想批发"), CellValue::from("阿强")],
        ])
    }

    #[tokio::test]
    async fn test_mine_applies_batch_to_view() {
        let mut assistant = assistant();
        let applied = assistant.mine("find factories").await.unwrap();
        assert!(applied);
        assert_eq!(assistant.view().leads().len(), 1);
        assert_eq!(assistant.view().current().total_count, 1);
    }

    #[tokio::test]
    async fn test_failed_call_keeps_previous_results() {
        let mut assistant = assistant();
        assistant.mine("find factories").await.unwrap();
        let err = assistant.mine("FAIL").await.unwrap_err();
        assert!(matches!(err, AppError::LLMError(_)));
        assert_eq!(assistant.view().leads().len(), 1);
    }

    #[tokio::test]
    async fn test_import_feeds_next_mining_call() {
        let mut assistant = assistant();
        let outcome = assistant.import_table(&table());
        assert!(outcome.is_usable());
        assert!(assistant.pending_corpus().unwrap().contains("想批发"));
        assert!(assistant.mine("find buyers").await.unwrap());
    }

    #[tokio::test]
    async fn test_export_csv_covers_current_batch() {
        let mut assistant = assistant();
        assistant.mine("find factories").await.unwrap();
        let csv = assistant.export_csv(Locale::En);
        assert!(csv.contains("kiln_co"));
    }
}
