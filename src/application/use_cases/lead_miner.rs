use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::application::use_cases::prompts::{build_mining_prompt, MINING_SYSTEM_PROMPT};
use crate::domain::error::{AppError, Result};
use crate::domain::lead::MinedLead;
use crate::domain::llm_config::LLMConfig;
use crate::domain::mining::{MinedBatch, MiningRequest};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::extract_json_payload;
use crate::shared::token_counter::TokenCounter;

/// Prompts above this estimate are worth flagging before the call goes out.
const LARGE_PROMPT_TOKENS: usize = 30_000;

/// Lead mining through the AI collaborator.
///
/// Each call gets a monotonically increasing generation number. Completions
/// racing a newer request are detected by comparing their generation against
/// the latest issued one, rather than trusting last-write-wins.
pub struct LeadMinerUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    generation: AtomicU64,
}

impl LeadMinerUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self {
            llm_client,
            generation: AtomicU64::new(0),
        }
    }

    /// Run one mining request. No retry; a failure leaves any previously
    /// accepted batch untouched at the caller.
    pub async fn mine(&self, config: &LLMConfig, request: &MiningRequest) -> Result<MinedBatch> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid mining request: {}", e)))?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let user_prompt = build_mining_prompt(request);

        let estimate = TokenCounter::estimate_tokens(&user_prompt);
        if estimate > LARGE_PROMPT_TOKENS {
            warn!(estimate, "mining prompt is unusually large");
        }

        let raw = self
            .llm_client
            .generate(config, MINING_SYSTEM_PROMPT, &user_prompt)
            .await?;

        let leads = parse_lead_batch(&raw)?;
        info!(generation, leads = leads.len(), "mining call completed");

        Ok(MinedBatch { generation, leads })
    }

    /// Whether a completed batch belongs to the latest issued request.
    /// Stale batches must be dropped by the caller, not applied.
    pub fn is_current(&self, batch: &MinedBatch) -> bool {
        batch.generation == self.generation.load(Ordering::SeqCst)
    }
}

/// Parse the model's reply into lead records.
///
/// Models wrap JSON in fences or prose often enough that the payload is
/// extracted first; anything that still fails serde is an LLM contract
/// violation, not a user error.
pub fn parse_lead_batch(raw: &str) -> Result<Vec<MinedLead>> {
    let payload = extract_json_payload(raw);
    serde_json::from_str::<Vec<MinedLead>>(&payload)
        .map_err(|e| AppError::LLMError(format!("Malformed lead payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedClient {
        reply: String,
    }

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn generate(&self, _config: &LLMConfig, _system: &str, _user: &str) -> Result<String> {
            Ok(self.reply.clone())
        }

        async fn list_models(&self, _config: &LLMConfig) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    const REPLY: &str = r#"[{"accountName":"kiln_co","platform":"Douyin",
        "leadType":"Factory","valueCategory":"Potential Partner",
        "outreachStatus":"Likely Uncontacted","date":"2024-05-01",
        "context":"asked for bulk pricing","suggestedAction":"DM with catalog",
        "reason":"explicit purchase intent"}]"#;

    fn miner(reply: &str) -> LeadMinerUseCase {
        LeadMinerUseCase::new(Arc::new(CannedClient {
            reply: reply.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_mine_parses_structured_reply() {
        let miner = miner(REPLY);
        let batch = miner
            .mine(&LLMConfig::default(), &MiningRequest::new("find factories"))
            .await
            .unwrap();
        assert_eq!(batch.leads.len(), 1);
        assert_eq!(batch.leads[0].account_name, "kiln_co");
        assert!(miner.is_current(&batch));
    }

    #[tokio::test]
    async fn test_stale_generation_is_detected() {
        let miner = miner(REPLY);
        let request = MiningRequest::new("find factories");
        let first = miner.mine(&LLMConfig::default(), &request).await.unwrap();
        let second = miner.mine(&LLMConfig::default(), &request).await.unwrap();
        assert!(!miner.is_current(&first));
        assert!(miner.is_current(&second));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_the_call() {
        let miner = miner(REPLY);
        let err = miner
            .mine(&LLMConfig::default(), &MiningRequest::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_fenced_reply_still_parses() {
        let fenced = format!("```json\n{}\n```", REPLY);
        let leads = parse_lead_batch(&fenced).unwrap();
        assert_eq!(leads.len(), 1);
    }

    #[test]
    fn test_prose_reply_is_a_contract_violation() {
        let err = parse_lead_batch("I could not find any leads, sorry!").unwrap_err();
        assert!(matches!(err, AppError::LLMError(_)));
    }

    #[test]
    fn test_empty_array_reply_is_valid() {
        assert!(parse_lead_batch("[]").unwrap().is_empty());
    }
}
