use shelfscan_core::{AppConfig, ProductRecord, WriteModeKind};
use shelfscan_scraper::RecordSink;

use crate::error::SheetsError;
use crate::projector::project;
use crate::schema::RowSchema;
use crate::store::RowStore;

/// Header row used by the sheet template when none is configured.
pub const DEFAULT_HEADER_ROW: u32 = 5;

/// Where a batch of rows lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// After the last non-empty row, as the store defines it.
    Append,
    /// Below a header at `header_row`, never above it, and never over rows
    /// already in use.
    FixedHeader { header_row: u32 },
}

impl WriteMode {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        match config.write_mode {
            WriteModeKind::Append => WriteMode::Append,
            WriteModeKind::FixedHeader => WriteMode::FixedHeader {
                header_row: config.header_row,
            },
        }
    }
}

/// First row a fixed-header batch is written to: just below the header, or
/// below the last used row when data already extends past it.
#[must_use]
pub fn fixed_start_row(header_row: u32, used_rows: u32) -> u32 {
    header_row
        .saturating_add(1)
        .max(used_rows.saturating_add(1))
}

/// Projects records into rows and writes them to one sheet.
pub struct SheetWriter<S> {
    store: S,
    sheet_name: String,
    schema: RowSchema,
    mode: WriteMode,
    header_row: u32,
}

impl<S: RowStore> SheetWriter<S> {
    #[must_use]
    pub fn new(store: S, sheet_name: impl Into<String>, schema: RowSchema, mode: WriteMode) -> Self {
        let header_row = match mode {
            WriteMode::FixedHeader { header_row } => header_row,
            WriteMode::Append => DEFAULT_HEADER_ROW,
        };
        Self {
            store,
            sheet_name: sheet_name.into(),
            schema,
            mode,
            header_row,
        }
    }

    /// Writer for the configured sheet, schema and write mode.
    #[must_use]
    pub fn from_config(store: S, config: &AppConfig) -> Self {
        Self::new(
            store,
            config.sheet_name.clone(),
            RowSchema::from(config.row_schema),
            WriteMode::from_config(config),
        )
        .with_header_row(config.header_row)
    }

    #[must_use]
    pub fn with_header_row(mut self, header_row: u32) -> Self {
        self.header_row = header_row;
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: RowSchema) -> Self {
        self.schema = schema;
        self
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    #[must_use]
    pub fn schema(&self) -> RowSchema {
        self.schema
    }

    /// Writes one row per record according to the write mode.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the underlying store.
    pub async fn write(&self, records: &[ProductRecord]) -> Result<usize, SheetsError> {
        if records.is_empty() {
            return Ok(0);
        }
        let rows: Vec<Vec<String>> = records.iter().map(|r| project(r, self.schema)).collect();

        let written = match self.mode {
            WriteMode::Append => self.store.append_rows(&self.sheet_name, &rows).await?,
            WriteMode::FixedHeader { header_row } => {
                let used = self.store.used_row_count(&self.sheet_name).await?;
                let start_row = fixed_start_row(header_row, used);
                self.store
                    .write_rows_at(&self.sheet_name, start_row, &rows)
                    .await?
            }
        };

        tracing::info!(
            sheet = %self.sheet_name,
            records = records.len(),
            rows_written = written,
            "records written to sheet"
        );
        Ok(written)
    }

    /// Writes the schema's column headers at the header row.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the underlying store.
    pub async fn write_header(&self) -> Result<usize, SheetsError> {
        let header: Vec<String> = self
            .schema
            .headers()
            .iter()
            .map(|h| (*h).to_string())
            .collect();
        self.store
            .write_rows_at(&self.sheet_name, self.header_row, &[header])
            .await
    }

    /// Writes each record back onto the row its URL was read from.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the underlying store.
    pub async fn write_back(&self, rows: &[(u32, ProductRecord)]) -> Result<usize, SheetsError> {
        let projected: Vec<(u32, Vec<String>)> = rows
            .iter()
            .map(|(row, record)| (*row, project(record, self.schema)))
            .collect();
        let written = self
            .store
            .write_row_batch(&self.sheet_name, &projected)
            .await?;
        tracing::info!(sheet = %self.sheet_name, rows_written = written, "wrote results back to source rows");
        Ok(written)
    }
}

impl<S: RowStore> RecordSink for SheetWriter<S> {
    type Error = SheetsError;

    async fn write_records(&self, records: &[ProductRecord]) -> Result<usize, SheetsError> {
        self.write(records).await
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
