// ============================================================
// TABLE IMPORT USE CASE
// ============================================================
// Orchestrate header classification and row normalization

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::use_cases::header_classifier::classify;
use crate::application::use_cases::row_normalizer::{normalize, DEFAULT_MAX_ROWS};
use crate::domain::table::{ColumnRoleMap, RawTable};

/// Outcome of importing one spreadsheet into the mining corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Newline-joined normalized lines, absent when the table was unusable.
    pub corpus: Option<String>,

    /// Number of normalized lines produced.
    pub rows_imported: usize,

    /// Role assignments used for normalization.
    pub roles: ColumnRoleMap,
}

impl ImportOutcome {
    /// An unusable table is a user-facing condition, not an error; the
    /// caller keeps whatever free text already existed.
    pub fn is_usable(&self) -> bool {
        self.corpus.is_some()
    }
}

pub struct TableImportUseCase {
    max_rows: usize,
}

impl TableImportUseCase {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    /// Classify the header row, normalize the data rows, and join the
    /// result into a corpus block for the AI collaborator.
    pub fn import(&self, table: &RawTable) -> ImportOutcome {
        let roles = classify(table.headers());

        if !roles.has_content() {
            warn!("no content column matched; table is unusable for import");
            return ImportOutcome {
                corpus: None,
                rows_imported: 0,
                roles,
            };
        }

        let lines = normalize(table.data_rows(), &roles, self.max_rows);
        if lines.is_empty() {
            warn!("content column resolved but no row carried content");
            return ImportOutcome {
                corpus: None,
                rows_imported: 0,
                roles,
            };
        }

        info!(rows = lines.len(), "imported spreadsheet rows");
        ImportOutcome {
            rows_imported: lines.len(),
            corpus: Some(lines.join("\n")),
            roles,
        }
    }
}

impl Default for TableImportUseCase {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;

    fn table(rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(CellValue::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_import_joins_lines() {
        let table = table(vec![
            vec!["评论内容", "昵称"],
            vec!["多少钱", "阿强"],
            vec!["发货吗", "丽丽"],
        ]);
        let outcome = TableImportUseCase::default().import(&table);
        assert!(outcome.is_usable());
        assert_eq!(outcome.rows_imported, 2);
        assert_eq!(
            outcome.corpus.unwrap(),
            "Content: \"多少钱\" | User: 阿强\nContent: \"发货吗\" | User: 丽丽"
        );
    }

    #[test]
    fn test_unusable_table_is_not_an_error() {
        let table = table(vec![vec!["ID", "序号"], vec!["1", "2"]]);
        let outcome = TableImportUseCase::default().import(&table);
        assert!(!outcome.is_usable());
        assert_eq!(outcome.rows_imported, 0);
    }

    #[test]
    fn test_content_column_with_only_blank_rows() {
        let table = table(vec![vec!["评论内容"], vec![""], vec!["   "]]);
        let outcome = TableImportUseCase::default().import(&table);
        assert!(!outcome.is_usable());
    }
}
