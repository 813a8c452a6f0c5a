// ============================================================
// PROMPT TEMPLATES
// ============================================================
// System/user prompt construction for the AI collaborator

use crate::domain::lead::MinedLead;
use crate::domain::locale::Locale;
use crate::domain::mining::MiningRequest;

/// System prompt pinning the JSON contract for lead mining.
///
/// The wire strings here must stay in lockstep with the serde renames on
/// the lead enums.
pub const MINING_SYSTEM_PROMPT: &str = "\
You are a sales-intelligence analyst. From the user's query and any imported \
comment data, identify concrete business leads.\n\
Respond with ONLY a JSON array, no prose and no code fences. Each element:\n\
{\n\
  \"accountName\": string,\n\
  \"platform\": string,\n\
  \"leadType\": \"User\" | \"Factory\" | \"KOL\",\n\
  \"valueCategory\": \"High Value User\" | \"Potential Partner\" | \"Medium Value User\" | \"Low Value User\",\n\
  \"outreachStatus\": \"Likely Uncontacted\" | \"Unknown\" | \"Likely Contacted\",\n\
  \"date\": string (ISO date) or null,\n\
  \"context\": string,\n\
  \"suggestedAction\": string,\n\
  \"reason\": string\n\
}\n\
Return an empty array when nothing qualifies.";

pub fn build_mining_prompt(request: &MiningRequest) -> String {
    request.combined_input()
}

pub fn outreach_system_prompt(locale: Locale) -> String {
    let language = match locale {
        Locale::En => "English",
        Locale::Zh => "Simplified Chinese",
    };
    format!(
        "You are a sales development representative. Write a short, friendly \
first-touch outreach message in {} for the lead described by the user. \
Mention their own words naturally, make one concrete offer, and keep it \
under 120 words. Return ONLY the message text.",
        language
    )
}

pub fn outreach_user_prompt(lead: &MinedLead) -> String {
    format!(
        "Account: {}\nPlatform: {}\nLead type: {}\nValue category: {}\n\
Context: {}\nSuggested action: {}",
        lead.account_name,
        lead.platform,
        lead.lead_type.as_str(),
        lead.value_category.as_str(),
        lead.context,
        lead.suggested_action
    )
}
