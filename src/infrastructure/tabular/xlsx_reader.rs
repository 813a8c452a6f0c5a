// ============================================================
// XLSX TABLE READER
// ============================================================
// Decode the first worksheet of an Excel workbook into the raw grid

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, RawTable};

pub struct XlsxTableReader;

impl XlsxTableReader {
    /// Read the first worksheet into a `RawTable`.
    ///
    /// Numeric cells stay numeric so serial date columns reach the
    /// normalizer untouched.
    pub fn read_file(path: &Path) -> Result<RawTable> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
            .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

        let mut rows = Vec::new();
        for row in range.rows() {
            let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
            rows.push(cells);
        }

        info!(rows = rows.len(), path = %path.display(), "excel worksheet decoded");
        Ok(RawTable::new(rows))
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}
