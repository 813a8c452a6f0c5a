// ============================================================
// TABULAR DOMAIN TYPES
// ============================================================
// Data structures representing an imported spreadsheet grid

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as delivered by the tabular decoders.
///
/// Numbers are kept as `f64` so spreadsheet serial dates survive the trip
/// through the decoder instead of arriving pre-stringified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Stringify the cell the way it would appear in the sheet.
    ///
    /// Integral floats render without a trailing `.0` so an exported ID
    /// column of `12345` does not become `12345.0`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Empty => String::new(),
        }
    }

    /// Whether the cell carries no usable value (absent or blank text).
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// A raw 2-D grid parsed from an uploaded tabular file.
///
/// Row 0 is the header row. Data rows may be ragged; callers index them
/// defensively (out of range = empty cell).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// The header row, or an empty slice for an empty table.
    pub fn headers(&self) -> &[CellValue] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// All rows after the header row.
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, col) of a data-row slice, absent treated as empty.
    pub fn cell<'a>(row: &'a [CellValue], col: usize) -> &'a CellValue {
        row.get(col).unwrap_or(&CellValue::Empty)
    }
}

/// The semantic purpose assigned to a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    Content,
    UserName,
    UserId,
    Date,
    Location,
}

/// Mapping from column role to an optional column index.
///
/// Each role maps to at most one column; the classifier's per-column
/// priority chain keeps the assignments effectively exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    pub content: Option<usize>,
    pub user_name: Option<usize>,
    pub user_id: Option<usize>,
    pub date: Option<usize>,
    pub location: Option<usize>,
}

impl ColumnRoleMap {
    /// A table without a content column is unusable for normalization.
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Content => self.content,
            ColumnRole::UserName => self.user_name,
            ColumnRole::UserId => self.user_id,
            ColumnRole::Date => self.date,
            ColumnRole::Location => self.location,
        }
    }

    pub fn set(&mut self, role: ColumnRole, index: usize) {
        let slot = match role {
            ColumnRole::Content => &mut self.content,
            ColumnRole::UserName => &mut self.user_name,
            ColumnRole::UserId => &mut self.user_id,
            ColumnRole::Date => &mut self.date,
            ColumnRole::Location => &mut self.location,
        };
        if slot.is_none() {
            *slot = Some(index);
        }
    }

    pub fn is_assigned(&self, role: ColumnRole) -> bool {
        self.get(role).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_stringify_drops_integral_fraction() {
        assert_eq!(CellValue::Number(12345.0).to_text(), "12345");
        assert_eq!(CellValue::Number(3.25).to_text(), "3.25");
    }

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".to_string()).is_blank());
        assert!(!CellValue::Text("hi".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_ragged_row_indexing() {
        let row = vec![CellValue::from("a")];
        assert_eq!(RawTable::cell(&row, 5), &CellValue::Empty);
    }

    #[test]
    fn test_role_map_first_assignment_wins() {
        let mut map = ColumnRoleMap::default();
        map.set(ColumnRole::Content, 0);
        map.set(ColumnRole::Content, 3);
        assert_eq!(map.content, Some(0));
    }
}
