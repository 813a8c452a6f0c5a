// ============================================================
// ROW NORMALIZER
// ============================================================
// Emit one labeled text line per content-bearing data row

use chrono::DateTime;

use crate::domain::table::{CellValue, ColumnRoleMap, RawTable};

/// Default cap on data rows consumed from one import.
pub const DEFAULT_MAX_ROWS: usize = 300;

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch.
const SPREADSHEET_EPOCH_OFFSET_DAYS: f64 = 25569.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert classified data rows into labeled, line-oriented text.
///
/// A row without a resolvable non-empty content cell produces no line at
/// all; everything else appends optional `User`/`Date`/`Loc` segments in
/// fixed order. Input row order is preserved and at most `max_rows` rows
/// are consumed.
pub fn normalize(rows: &[Vec<CellValue>], roles: &ColumnRoleMap, max_rows: usize) -> Vec<String> {
    let content_index = match roles.content {
        Some(index) => index,
        None => return Vec::new(),
    };

    let mut lines = Vec::new();

    for row in rows.iter().take(max_rows) {
        let content_cell = RawTable::cell(row, content_index);
        if content_cell.is_blank() {
            continue;
        }

        let mut line = format!("Content: \"{}\"", content_cell.to_text());

        if let Some(user) = resolve_user(row, roles) {
            line.push_str(" | User: ");
            line.push_str(&user);
        }

        if let Some(date_index) = roles.date {
            let rendered = render_date(RawTable::cell(row, date_index));
            if !rendered.is_empty() {
                line.push_str(" | Date: ");
                line.push_str(&rendered);
            }
        }

        if let Some(location_index) = roles.location {
            let cell = RawTable::cell(row, location_index);
            if !cell.is_blank() {
                line.push_str(" | Loc: ");
                line.push_str(cell.to_text().trim());
            }
        }

        lines.push(line);
    }

    lines
}

/// Resolve the `User` segment from the userName/userId cells.
///
/// URL-shaped values are export artifacts (profile links landing in name
/// columns) and are discarded rather than shown as a user.
fn resolve_user(row: &[CellValue], roles: &ColumnRoleMap) -> Option<String> {
    let name = roles.user_name.and_then(|index| candidate(RawTable::cell(row, index)));
    let id = roles.user_id.and_then(|index| candidate(RawTable::cell(row, index)));

    match (name, id) {
        (Some(name), Some(id)) => Some(format!("{} (ID: {})", name, id)),
        (None, Some(id)) => Some(format!("ID: {}", id)),
        (Some(name), None) => Some(name),
        (None, None) => None,
    }
}

fn candidate(cell: &CellValue) -> Option<String> {
    let value = cell.to_text();
    let trimmed = value.trim();
    if trimmed.is_empty() || looks_like_url(trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

fn looks_like_url(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.starts_with("http") || lower.starts_with("https") || lower.starts_with("www")
}

/// Render a date cell: numeric cells are spreadsheet serial dates, anything
/// else passes through as raw text. Empty cells render as empty.
fn render_date(cell: &CellValue) -> String {
    match cell.as_number() {
        Some(serial) => serial_to_iso_date(serial).unwrap_or_else(|| cell.to_text()),
        None => cell.to_text().trim().to_string(),
    }
}

/// Spreadsheet serial day count to an ISO `YYYY-MM-DD` string.
fn serial_to_iso_date(serial: f64) -> Option<String> {
    let millis = (serial - SPREADSHEET_EPOCH_OFFSET_DAYS) * MILLIS_PER_DAY;
    if !millis.is_finite() {
        return None;
    }
    let timestamp = DateTime::from_timestamp_millis(millis.round() as i64)?;
    Some(timestamp.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::header_classifier::classify;

    fn role_map() -> ColumnRoleMap {
        let headers: Vec<CellValue> = ["评论内容", "昵称", "抖音号", "时间", "地区"]
            .iter()
            .map(|h| CellValue::from(*h))
            .collect();
        classify(&headers)
    }

    fn row(cells: &[CellValue]) -> Vec<CellValue> {
        cells.to_vec()
    }

    #[test]
    fn test_full_row_renders_all_segments() {
        let rows = vec![row(&[
            CellValue::from("这个产品多少钱"),
            CellValue::from("小美"),
            CellValue::from("my123"),
            CellValue::from("2024-05-01"),
            CellValue::from("广州"),
        ])];
        let lines = normalize(&rows, &role_map(), DEFAULT_MAX_ROWS);
        assert_eq!(
            lines,
            vec![
                "Content: \"这个产品多少钱\" | User: 小美 (ID: my123) | Date: 2024-05-01 | Loc: 广州"
            ]
        );
    }

    #[test]
    fn test_empty_content_row_is_skipped() {
        let rows = vec![
            row(&[
                CellValue::Empty,
                CellValue::from("小美"),
                CellValue::from("my123"),
            ]),
            row(&[CellValue::from("在吗")]),
        ];
        let lines = normalize(&rows, &role_map(), DEFAULT_MAX_ROWS);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "Content: \"在吗\"");
    }

    #[test]
    fn test_missing_content_role_yields_no_lines() {
        let rows = vec![row(&[CellValue::from("hello")])];
        let lines = normalize(&rows, &ColumnRoleMap::default(), DEFAULT_MAX_ROWS);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_url_valued_name_is_rejected() {
        let rows = vec![row(&[
            CellValue::from("想了解一下"),
            CellValue::from("https://site.com/u/123"),
        ])];
        let lines = normalize(&rows, &role_map(), DEFAULT_MAX_ROWS);
        assert_eq!(lines[0], "Content: \"想了解一下\"");
        assert!(!lines[0].contains("https://site.com/u/123"));
    }

    #[test]
    fn test_id_only_user_segment() {
        let rows = vec![row(&[
            CellValue::from("求链接"),
            CellValue::from("www.shop.example"),
            CellValue::from("dy998"),
        ])];
        let lines = normalize(&rows, &role_map(), DEFAULT_MAX_ROWS);
        assert_eq!(lines[0], "Content: \"求链接\" | User: ID: dy998");
    }

    #[test]
    fn test_serial_date_renders_as_iso() {
        let rows = vec![row(&[
            CellValue::from("不错"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Number(45000.0),
        ])];
        let lines = normalize(&rows, &role_map(), DEFAULT_MAX_ROWS);
        assert_eq!(lines[0], "Content: \"不错\" | Date: 2023-03-15");
    }

    #[test]
    fn test_textual_date_passes_through() {
        let rows = vec![row(&[
            CellValue::from("不错"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::from("昨天 14:02"),
        ])];
        let lines = normalize(&rows, &role_map(), DEFAULT_MAX_ROWS);
        assert_eq!(lines[0], "Content: \"不错\" | Date: 昨天 14:02");
    }

    #[test]
    fn test_row_cap_preserves_leading_order() {
        let rows: Vec<Vec<CellValue>> = (0..500)
            .map(|i| row(&[CellValue::Text(format!("comment {}", i))]))
            .collect();
        let lines = normalize(&rows, &role_map(), 300);
        assert_eq!(lines.len(), 300);
        assert_eq!(lines[0], "Content: \"comment 0\"");
        assert_eq!(lines[299], "Content: \"comment 299\"");
    }

    #[test]
    fn test_ragged_rows_are_indexed_defensively() {
        let rows = vec![row(&[CellValue::from("只有一列")])];
        let lines = normalize(&rows, &role_map(), DEFAULT_MAX_ROWS);
        assert_eq!(lines, vec!["Content: \"只有一列\""]);
    }
}
