use std::future::Future;

use crate::error::SheetsError;

/// Row-oriented access to one spreadsheet. Rows are 1-based, as in A1
/// notation.
pub trait RowStore: Send + Sync {
    /// Appends `rows` after the last non-empty row. Returns rows written.
    fn append_rows(
        &self,
        sheet: &str,
        rows: &[Vec<String>],
    ) -> impl Future<Output = Result<usize, SheetsError>> + Send;

    /// Overwrites consecutive rows starting at `start_row`. Returns rows
    /// written.
    fn write_rows_at(
        &self,
        sheet: &str,
        start_row: u32,
        rows: &[Vec<String>],
    ) -> impl Future<Output = Result<usize, SheetsError>> + Send;

    /// Writes each `(row, cells)` pair at its own row in one request.
    /// Returns rows written.
    fn write_row_batch(
        &self,
        sheet: &str,
        rows: &[(u32, Vec<String>)],
    ) -> impl Future<Output = Result<usize, SheetsError>> + Send;

    /// Index of the last row holding any value, or `0` for an empty sheet.
    fn used_row_count(&self, sheet: &str) -> impl Future<Output = Result<u32, SheetsError>> + Send;

    /// Non-empty cells of `column` from `start_row` down, trimmed, paired
    /// with their row numbers.
    fn read_column(
        &self,
        sheet: &str,
        column: &str,
        start_row: u32,
    ) -> impl Future<Output = Result<Vec<(u32, String)>, SheetsError>> + Send;
}
