// ============================================================
// EXPORTER
// ============================================================
// CSV and plain-text report exports with BOM for spreadsheet apps

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::lead::MinedLead;
use crate::domain::locale::Locale;

/// Leading byte-order-mark so Excel and WPS pick up UTF-8.
pub const UTF8_BOM: &str = "\u{feff}";

/// Localized column labels for the lead table export.
pub fn lead_csv_headers(locale: Locale) -> [&'static str; 9] {
    match locale {
        Locale::En => [
            "Account Name",
            "Platform",
            "Lead Type",
            "Value Category",
            "Outreach Status",
            "Date",
            "Context",
            "Suggested Action",
            "Reason",
        ],
        Locale::Zh => [
            "账号名称",
            "平台",
            "线索类型",
            "价值分类",
            "触达状态",
            "日期",
            "背景",
            "建议行动",
            "理由",
        ],
    }
}

/// RFC4180-style quoting: any field containing a comma, quote, or newline
/// is wrapped in double quotes with internal quotes doubled.
pub fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the lead table as a BOM-prefixed CSV document.
pub fn export_leads_csv(leads: &[MinedLead], locale: Locale) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(&lead_csv_headers(locale).join(","));
    out.push('\n');

    for lead in leads {
        let fields = [
            lead.account_name.as_str(),
            lead.platform.as_str(),
            lead.lead_type.label(locale),
            lead.value_category.label(locale),
            lead.outreach_status.label(locale),
            lead.date.as_deref().unwrap_or(""),
            lead.context.as_str(),
            lead.suggested_action.as_str(),
            lead.reason.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Wrap an already rendered report in the export envelope.
pub fn export_strategy_report(report: &str) -> String {
    format!("{}{}", UTF8_BOM, report)
}

/// Write an export document to disk.
pub fn write_export(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| AppError::IoError(format!("Failed to write export {}: {}", path.display(), e)))?;
    info!(path = %path.display(), bytes = content.len(), "export written");
    Ok(())
}
