//! services/api/src/web/entries.rs
//!
//! Handlers for creating, reading, editing and deleting log entries.

use crate::error::ApiError;
use crate::web::protocol::{EntryRequest, EntryResponse, RangeQuery};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use symptom_journal_core::EntryDraft;

/// Record a new symptom entry.
#[utoipa::path(
    post,
    path = "/entries",
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Complaint text is empty or date is malformed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<EntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state.journal.create_entry(EntryDraft::try_from(req)?).await?;
    Ok((StatusCode::CREATED, Json(EntryResponse::from(entry))))
}

/// List entries, newest date first, optionally limited to a date range.
#[utoipa::path(
    get,
    path = "/entries",
    params(RangeQuery),
    responses(
        (status = 200, description = "Entries in display order", body = [EntryResponse]),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn list_entries_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let bounds = query.bounds(app_state.journal.today())?;
    let entries = app_state.journal.list_entries(&bounds).await;
    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/entries/{id}",
    params(("id" = String, Path, description = "Entry id")),
    responses(
        (status = 200, description = "The entry", body = EntryResponse),
        (status = 404, description = "No such entry")
    )
)]
pub async fn get_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EntryResponse>, ApiError> {
    let entry = app_state.journal.get_entry(&id).await?;
    Ok(Json(entry.into()))
}

/// Replace the date, text, score and tags of an entry.
#[utoipa::path(
    put,
    path = "/entries/{id}",
    params(("id" = String, Path, description = "Entry id")),
    request_body = EntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 400, description = "Complaint text is empty or date is malformed"),
        (status = 404, description = "No such entry")
    )
)]
pub async fn update_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<EntryRequest>,
) -> Result<Json<EntryResponse>, ApiError> {
    let entry = app_state.journal.update_entry(&id, EntryDraft::try_from(req)?).await?;
    Ok(Json(entry.into()))
}

/// Delete an entry. Output records are not affected.
#[utoipa::path(
    delete,
    path = "/entries/{id}",
    params(("id" = String, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "No such entry")
    )
)]
pub async fn delete_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state.journal.delete_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
