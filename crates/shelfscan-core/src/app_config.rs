use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which page-fetch backend to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    /// Plain HTTP GET of the server-rendered page.
    Http,
    /// Headless Chrome session; requires the `browser` cargo feature.
    Browser,
}

/// Target sheet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSchemaKind {
    /// The wide purchasing sheet (one column per canonical attribute).
    Detailed,
    /// Name, price, description, image, link.
    Basic,
}

/// Where new rows land in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteModeKind {
    /// Let the Sheets API append after the last used row.
    Append,
    /// Write below a fixed header row, never above it.
    FixedHeader,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub targets_path: PathBuf,
    pub fetcher: FetcherKind,
    pub headless: bool,
    pub page_load_timeout_secs: u64,
    pub user_agent: String,
    pub description_max_chars: usize,
    pub spreadsheet_id: Option<String>,
    pub sheet_name: String,
    pub sheets_access_token: Option<String>,
    pub sheets_api_base: String,
    pub write_mode: WriteModeKind,
    pub header_row: u32,
    pub row_schema: RowSchemaKind,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("targets_path", &self.targets_path)
            .field("fetcher", &self.fetcher)
            .field("headless", &self.headless)
            .field("page_load_timeout_secs", &self.page_load_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("description_max_chars", &self.description_max_chars)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field(
                "sheets_access_token",
                &self.sheets_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("sheets_api_base", &self.sheets_api_base)
            .field("write_mode", &self.write_mode)
            .field("header_row", &self.header_row)
            .field("row_schema", &self.row_schema)
            .finish()
    }
}
