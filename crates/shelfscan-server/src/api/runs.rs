//! `POST /run-scraper`: validates the targets, then runs the batch on a
//! background task and acknowledges immediately. The caller never sees the
//! batch outcome; it is only logged.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shelfscan_core::{validate_targets, AppConfig, SiteUrls};
use shelfscan_scraper::{AnyFetcher, ExtractorRegistry, Orchestrator, ScrapeContext};
use shelfscan_sheets::{GoogleSheetsClient, SheetWriter};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ErrorCode};

#[derive(Debug, Deserialize)]
pub(super) struct RunRequest {
    #[serde(default)]
    urls: Option<SiteUrls>,
}

#[derive(Debug, Serialize)]
pub(super) struct RunAccepted {
    status: &'static str,
    run_id: String,
}

pub(super) async fn run_scraper(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<RunAccepted>>), ApiError> {
    let rid = req_id.0;
    let Json(body) = payload.map_err(|e| ApiError::new(rid.clone(), ErrorCode::BadRequest, e.body_text()))?;

    let targets = body.urls.filter(|urls| !urls.is_empty()).ok_or_else(|| {
        ApiError::new(
            rid.clone(),
            ErrorCode::BadRequest,
            "request body must include a non-empty 'urls' object",
        )
    })?;
    validate_targets(&targets)
        .map_err(|e| ApiError::new(rid.clone(), ErrorCode::ValidationError, e.to_string()))?;

    let client = GoogleSheetsClient::from_config(&state.config).map_err(|e| {
        tracing::error!(error = %e, "sheet output not configured");
        ApiError::new(rid.clone(), ErrorCode::Unavailable, "sheet output is not configured")
    })?;
    let writer = SheetWriter::from_config(client, &state.config);

    let run_id = Uuid::new_v4().to_string();
    tracing::info!(request_id = %rid, run_id = %run_id, targets = targets.len(), "scrape run accepted");

    let config = Arc::clone(&state.config);
    let task_run_id = run_id.clone();
    tokio::spawn(async move {
        run_batch(config, &task_run_id, &targets, &writer).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::new(
            RunAccepted {
                status: "accepted",
                run_id,
            },
            rid,
        )),
    ))
}

/// Builds the configured fetcher on the blocking pool; launching Chrome
/// blocks until the browser is up.
async fn build_fetcher(config: Arc<AppConfig>) -> anyhow::Result<AnyFetcher> {
    let fetcher = tokio::task::spawn_blocking(move || AnyFetcher::from_config(&config)).await??;
    Ok(fetcher)
}

async fn run_batch(
    config: Arc<AppConfig>,
    run_id: &str,
    targets: &SiteUrls,
    writer: &SheetWriter<GoogleSheetsClient>,
) {
    let description_max_chars = config.description_max_chars;
    let fetcher = match build_fetcher(config).await {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!(run_id = %run_id, error = %e, "failed to build page fetcher; run abandoned");
            return;
        }
    };
    let orchestrator = Orchestrator::new(
        fetcher,
        ExtractorRegistry::with_defaults(),
        ScrapeContext::new(description_max_chars, run_id),
    );

    match orchestrator.run_and_store(targets, writer).await {
        Ok(report) => tracing::info!(
            run_id = %run_id,
            scraped = report.scraped,
            failed = report.failed,
            unsupported = report.unsupported,
            rows_written = report.rows_written,
            "scrape run finished"
        ),
        Err(e) => tracing::error!(run_id = %run_id, error = %e, "scrape run failed to store results"),
    }
}
