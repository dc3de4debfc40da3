//! [`RowStore`] backed by the Google Sheets v4 REST API.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shelfscan_core::{AppConfig, ConfigError};

use crate::error::SheetsError;
use crate::schema::column_letter;
use crate::store::RowStore;

/// Characters that cannot appear raw in a range path segment. `!` and `:`
/// stay literal so ranges read as A1 notation in logs and mocks.
const RANGE_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const MAX_ERROR_MESSAGE_CHARS: usize = 500;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: String,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateBody<'a> {
    value_input_option: &'static str,
    data: Vec<ValueRangeBody<'a>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSummary {
    #[serde(default)]
    updated_rows: usize,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: UpdateSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    total_updated_rows: usize,
}

#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Quoted A1 range on `sheet`, e.g. `'Compras'!A6:AM6`.
fn sheet_range(sheet: &str, cells: &str) -> String {
    let quoted = sheet.replace('\'', "''");
    if cells.is_empty() {
        format!("'{quoted}'")
    } else {
        format!("'{quoted}'!{cells}")
    }
}

fn row_span(start_row: u32, end_row: u32, width: usize) -> String {
    format!("A{start_row}:{}{end_row}", column_letter(width))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Maps a non-2xx response to [`SheetsError::Api`], preferring Google's
/// structured error message over the raw body.
async fn check_status(response: Response, range: &str) -> Result<Response, SheetsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);

    Err(SheetsError::Api {
        status: status.as_u16(),
        range: range.to_string(),
        message: message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect(),
    })
}

pub struct GoogleSheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
}

impl GoogleSheetsClient {
    /// Creates a client for one spreadsheet.
    ///
    /// `base_url` is the API origin without a trailing slash, normally
    /// `https://sheets.googleapis.com`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        base_url: &str,
        spreadsheet_id: &str,
        access_token: &str,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// Builds the client from `GOOGLE_SHEET_ID`, `GOOGLE_SHEETS_ACCESS_TOKEN`
    /// and `SHELFSCAN_SHEETS_API_BASE`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Config`] when the sheet id or access token is
    /// not configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, SheetsError> {
        let spreadsheet_id = config
            .spreadsheet_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_SHEET_ID".to_string()))?;
        let access_token = config
            .sheets_access_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_SHEETS_ACCESS_TOKEN".to_string()))?;
        Self::new(
            &config.sheets_api_base,
            spreadsheet_id,
            access_token,
            config.page_load_timeout_secs,
        )
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}{suffix}",
            self.base_url,
            self.spreadsheet_id,
            utf8_percent_encode(range, RANGE_SEGMENT)
        )
    }

    fn batch_update_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values:batchUpdate",
            self.base_url, self.spreadsheet_id
        )
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<Value>>, SheetsError> {
        let response = self
            .client
            .get(self.values_url(range, ""))
            .bearer_auth(&self.access_token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?;
        let parsed: ValueRangeResponse = check_status(response, range).await?.json().await?;
        Ok(parsed.values)
    }
}

impl RowStore for GoogleSheetsClient {
    async fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<usize, SheetsError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let range = sheet_range(sheet, "A1");
        let body = ValueRangeBody {
            range: range.clone(),
            major_dimension: "ROWS",
            values: rows,
        };

        let response = self
            .client
            .post(self.values_url(&range, ":append"))
            .bearer_auth(&self.access_token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await?;
        let parsed: AppendResponse = check_status(response, &range).await?.json().await?;

        tracing::debug!(sheet, rows = parsed.updates.updated_rows, "appended rows");
        Ok(parsed.updates.updated_rows)
    }

    async fn write_rows_at(
        &self,
        sheet: &str,
        start_row: u32,
        rows: &[Vec<String>],
    ) -> Result<usize, SheetsError> {
        if start_row == 0 {
            return Err(SheetsError::InvalidRow(start_row));
        }
        if rows.is_empty() {
            return Ok(0);
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(1);
        let end_row = start_row.saturating_add(count_u32(rows.len()) - 1);
        let range = sheet_range(sheet, &row_span(start_row, end_row, width));
        let body = ValueRangeBody {
            range: range.clone(),
            major_dimension: "ROWS",
            values: rows,
        };

        let response = self
            .client
            .put(self.values_url(&range, ""))
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await?;
        let parsed: UpdateSummary = check_status(response, &range).await?.json().await?;

        tracing::debug!(sheet, start_row, rows = parsed.updated_rows, "wrote rows");
        Ok(parsed.updated_rows)
    }

    async fn write_row_batch(
        &self,
        sheet: &str,
        rows: &[(u32, Vec<String>)],
    ) -> Result<usize, SheetsError> {
        if let Some((row, _)) = rows.iter().find(|(row, _)| *row == 0) {
            return Err(SheetsError::InvalidRow(*row));
        }
        if rows.is_empty() {
            return Ok(0);
        }
        let data = rows
            .iter()
            .map(|(row, cells)| ValueRangeBody {
                range: sheet_range(sheet, &row_span(*row, *row, cells.len())),
                major_dimension: "ROWS",
                values: std::slice::from_ref(cells),
            })
            .collect();
        let body = BatchUpdateBody {
            value_input_option: "RAW",
            data,
        };

        let response = self
            .client
            .post(self.batch_update_url())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        let parsed: BatchUpdateResponse = check_status(response, sheet).await?.json().await?;

        tracing::debug!(sheet, rows = parsed.total_updated_rows, "batch-updated rows");
        Ok(parsed.total_updated_rows)
    }

    async fn used_row_count(&self, sheet: &str) -> Result<u32, SheetsError> {
        let values = self.get_values(&sheet_range(sheet, "")).await?;
        Ok(count_u32(values.len()))
    }

    async fn read_column(
        &self,
        sheet: &str,
        column: &str,
        start_row: u32,
    ) -> Result<Vec<(u32, String)>, SheetsError> {
        if start_row == 0 {
            return Err(SheetsError::InvalidRow(start_row));
        }
        let range = sheet_range(sheet, &format!("{column}{start_row}:{column}"));
        let values = self.get_values(&range).await?;

        Ok(values
            .iter()
            .zip(start_row..)
            .filter_map(|(cells, row)| {
                let text = cells.first().map(cell_text)?;
                let text = text.trim();
                (!text.is_empty()).then(|| (row, text.to_string()))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_are_quoted_and_escaped() {
        assert_eq!(sheet_range("Compras", "A1"), "'Compras'!A1");
        assert_eq!(sheet_range("Bob's Sheet", "H3:H"), "'Bob''s Sheet'!H3:H");
        assert_eq!(sheet_range("Compras", ""), "'Compras'");
    }

    #[test]
    fn row_span_covers_width() {
        assert_eq!(row_span(6, 6, 39), "A6:AM6");
        assert_eq!(row_span(3, 7, 5), "A3:E7");
    }

    #[test]
    fn values_url_encodes_quotes_and_spaces() {
        let client = GoogleSheetsClient::new("http://localhost:1/", "sheet-1", "t", 5).unwrap();
        assert_eq!(
            client.values_url("'My Sheet'!A1", ":append"),
            "http://localhost:1/v4/spreadsheets/sheet-1/values/%27My%20Sheet%27!A1:append"
        );
    }

    #[test]
    fn cell_text_renders_non_strings() {
        assert_eq!(cell_text(&Value::from("x")), "x");
        assert_eq!(cell_text(&Value::from(12)), "12");
        assert_eq!(cell_text(&Value::Null), "");
    }
}
