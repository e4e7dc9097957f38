//! services/api/src/web/export.rs
//!
//! The JSON export download.

use crate::error::ApiError;
use crate::web::protocol::RangeQuery;
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use symptom_journal_core::EXPORT_FILE_NAME;

/// Download entries and outputs as `{exportedAt, logEntries, llmOutputs}`.
///
/// With no bounds everything is exported.
#[utoipa::path(
    get,
    path = "/export",
    params(RangeQuery),
    responses(
        (status = 200, description = "Export document as a JSON attachment"),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn export_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let bounds = query.bounds(app_state.journal.today())?;
    let snapshot = app_state.journal.export(&bounds).await;
    let body = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize export: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    ))
}
