// ============================================================
// TABULAR INFRASTRUCTURE LAYER
// ============================================================
// Decode uploaded CSV/XLSX files into the raw cell grid

mod csv_reader;
mod xlsx_reader;

pub use csv_reader::CsvTableReader;
pub use xlsx_reader::XlsxTableReader;
