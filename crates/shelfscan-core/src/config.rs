use crate::app_config::{AppConfig, Environment, FetcherKind, RowSchemaKind, WriteModeKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(invalid(var, format!("expected true/false, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("SHELFSCAN_ENV", "development"))?;
    let bind_addr = parse_addr("SHELFSCAN_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("SHELFSCAN_LOG_LEVEL", "info");
    let targets_path = PathBuf::from(or_default(
        "SHELFSCAN_TARGETS_PATH",
        "./config/targets.yaml",
    ));

    let fetcher = parse_fetcher(&or_default("SHELFSCAN_FETCHER", "http"))?;
    let headless = parse_bool("SHELFSCAN_HEADLESS", "true")?;
    let page_load_timeout_secs = parse_u64("SHELFSCAN_PAGE_LOAD_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "SHELFSCAN_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    );
    let description_max_chars = parse_usize("SHELFSCAN_DESCRIPTION_MAX_CHARS", "500")?;
    if description_max_chars == 0 {
        return Err(invalid(
            "SHELFSCAN_DESCRIPTION_MAX_CHARS",
            "must be greater than zero".to_string(),
        ));
    }

    let spreadsheet_id = optional("GOOGLE_SHEET_ID");
    let sheet_name = or_default("SHEET_NAME", "Compras");
    let sheets_access_token = optional("GOOGLE_SHEETS_ACCESS_TOKEN");
    let sheets_api_base = or_default(
        "SHELFSCAN_SHEETS_API_BASE",
        "https://sheets.googleapis.com",
    )
    .trim_end_matches('/')
    .to_string();
    let write_mode = parse_write_mode(&or_default("SHELFSCAN_WRITE_MODE", "append"))?;
    let header_row = parse_u32("SHELFSCAN_HEADER_ROW", "5")?;
    let row_schema = parse_row_schema(&or_default("SHELFSCAN_ROW_SCHEMA", "detailed"))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        targets_path,
        fetcher,
        headless,
        page_load_timeout_secs,
        user_agent,
        description_max_chars,
        spreadsheet_id,
        sheet_name,
        sheets_access_token,
        sheets_api_base,
        write_mode,
        header_row,
        row_schema,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFSCAN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_fetcher(s: &str) -> Result<FetcherKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "http" => Ok(FetcherKind::Http),
        "browser" => Ok(FetcherKind::Browser),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFSCAN_FETCHER".to_string(),
            reason: format!("expected 'http' or 'browser', got '{other}'"),
        }),
    }
}

fn parse_write_mode(s: &str) -> Result<WriteModeKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "append" => Ok(WriteModeKind::Append),
        "fixed-header" | "fixed_header" => Ok(WriteModeKind::FixedHeader),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFSCAN_WRITE_MODE".to_string(),
            reason: format!("expected 'append' or 'fixed-header', got '{other}'"),
        }),
    }
}

fn parse_row_schema(s: &str) -> Result<RowSchemaKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "detailed" => Ok(RowSchemaKind::Detailed),
        "basic" => Ok(RowSchemaKind::Basic),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFSCAN_ROW_SCHEMA".to_string(),
            reason: format!("expected 'detailed' or 'basic', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
