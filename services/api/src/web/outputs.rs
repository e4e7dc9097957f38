//! services/api/src/web/outputs.rs
//!
//! Handlers for building prompts and for saving and reviewing pasted model replies.

use crate::error::ApiError;
use crate::web::protocol::{
    parse_optional_date, OutputResponse, PromptRequest, PromptResponse, RangeQuery,
    SaveReplyRequest, SaveReplyResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use symptom_journal_core::review::render_output_detail;
use symptom_journal_core::{DateRange, ReplySubmission};

/// Render the prompt to paste into an external model.
#[utoipa::path(
    post,
    path = "/prompts",
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Rendered prompt", body = PromptResponse),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn build_prompt_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, ApiError> {
    let to = parse_optional_date("to", req.to.as_deref())?.unwrap_or_else(|| app_state.journal.today());
    let range = match parse_optional_date("from", req.from.as_deref())? {
        Some(from) => DateRange::new(from, to),
        None => DateRange::ending_at(to, app_state.config.default_range_days),
    };

    let bundle = app_state.journal.build_prompt(range).await;
    Ok(Json(bundle.into()))
}

/// Save a pasted reply. The raw text is kept even if no section could be parsed.
#[utoipa::path(
    post,
    path = "/outputs",
    request_body = SaveReplyRequest,
    responses(
        (status = 201, description = "Reply stored; `output.parsed` reports parse success", body = SaveReplyResponse),
        (status = 400, description = "Reply text is empty or a date is malformed")
    )
)]
pub async fn save_output_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<SaveReplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = ReplySubmission::try_from(req)?;
    let saved = app_state.journal.save_reply(submission).await?;
    Ok((StatusCode::CREATED, Json(SaveReplyResponse::from(saved))))
}

/// List stored replies, newest first. Bounds apply to the start of each reply's range.
#[utoipa::path(
    get,
    path = "/outputs",
    params(RangeQuery),
    responses(
        (status = 200, description = "Output records", body = [OutputResponse]),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn list_outputs_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<OutputResponse>>, ApiError> {
    let bounds = query.bounds(app_state.journal.today())?;
    let outputs = app_state.journal.list_outputs(&bounds).await;
    Ok(Json(outputs.into_iter().map(OutputResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/outputs/{id}",
    params(("id" = String, Path, description = "Output record id")),
    responses(
        (status = 200, description = "The output record", body = OutputResponse),
        (status = 404, description = "No such output record")
    )
)]
pub async fn get_output_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OutputResponse>, ApiError> {
    let output = app_state.journal.get_output(&id).await?;
    Ok(Json(output.into()))
}

/// Plain-text detail view of a stored reply.
#[utoipa::path(
    get,
    path = "/outputs/{id}/text",
    params(("id" = String, Path, description = "Output record id")),
    responses(
        (status = 200, description = "Sections followed by the raw reply", body = String, content_type = "text/plain"),
        (status = 404, description = "No such output record")
    )
)]
pub async fn output_text_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let output = app_state.journal.get_output(&id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_output_detail(&output),
    ))
}
