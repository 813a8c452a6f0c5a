// ============================================================
// CSV TABLE READER
// ============================================================
// Parse CSV files with encoding and delimiter detection

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, RawTable};

/// CSV reader producing the raw cell grid, header row included.
pub struct CsvTableReader {
    /// Delimiter override; detected from content when unset.
    delimiter: Option<u8>,
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self { delimiter: None }
    }
}

impl CsvTableReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Read and decode a CSV file from disk.
    pub fn read_file(&self, path: &Path) -> Result<RawTable> {
        let bytes = fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        self.read_bytes(&bytes)
    }

    /// Decode raw bytes (exports are frequently GBK, not UTF-8) and parse.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        let content = decode_bytes(bytes);
        self.read_content(&content)
    }

    /// Parse CSV text into the raw grid.
    pub fn read_content(&self, content: &str) -> Result<RawTable> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));
        debug!(delimiter = %(delimiter as char), "parsing csv content");

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            let row: Vec<CellValue> = record.iter().map(CellValue::from).collect();
            rows.push(row);
        }

        Ok(RawTable::new(rows))
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe) by
    /// scoring per-line counts for consistency and frequency.
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            if sample_lines.is_empty() {
                continue;
            }

            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());
            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Decode file bytes to text: UTF-8 first, then GBK, then lossy UTF-8.
fn decode_bytes(bytes: &[u8]) -> String {
    if let Ok(content) = std::str::from_utf8(bytes) {
        return content.to_string();
    }

    let (decoded, _, had_errors) = encoding_rs::GBK.decode(bytes);
    if !had_errors {
        debug!("decoded csv bytes as GBK");
        return decoded.into_owned();
    }

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "评论内容,昵称\n多少钱,阿强\n发货吗,丽丽";
        let table = CsvTableReader::new().read_content(content).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.headers()[0], CellValue::from("评论内容"));
        assert_eq!(table.data_rows()[1][1], CellValue::from("丽丽"));
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let content = "a,b,c\n1\n2,3";
        let table = CsvTableReader::new().read_content(content).unwrap();
        assert_eq!(table.data_rows()[0].len(), 1);
        assert_eq!(table.data_rows()[1].len(), 2);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvTableReader::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvTableReader::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvTableReader::detect_delimiter("a\tb\nc\td"), b'\t');
    }

    #[test]
    fn test_gbk_bytes_decode() {
        // "内容" encoded as GBK
        let gbk: &[u8] = &[0xc4, 0xda, 0xc8, 0xdd];
        let table = CsvTableReader::new().read_bytes(gbk).unwrap();
        assert_eq!(table.headers()[0], CellValue::from("内容"));
    }

    #[test]
    fn test_empty_cells_become_empty_values() {
        let content = "a,b\nx,\n,y";
        let table = CsvTableReader::new().read_content(content).unwrap();
        assert_eq!(table.data_rows()[0][1], CellValue::Empty);
        assert_eq!(table.data_rows()[1][0], CellValue::Empty);
    }
}
