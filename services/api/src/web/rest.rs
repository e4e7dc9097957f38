//! services/api/src/web/rest.rs
//!
//! Contains the router for the REST API endpoints, the health handler and the
//! master definition for the OpenAPI specification.

use crate::web::export::{self, export_handler};
use crate::web::entries::{
    self, create_entry_handler, delete_entry_handler, get_entry_handler, list_entries_handler,
    update_entry_handler,
};
use crate::web::outputs::{
    self, build_prompt_handler, get_output_handler, list_outputs_handler, output_text_handler,
    save_output_handler,
};
use crate::web::protocol::{
    EntryRequest, EntryResponse, HealthResponse, OutputResponse, PromptRequest, PromptResponse,
    RangeDto, SaveReplyRequest, SaveReplyResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        entries::create_entry_handler,
        entries::list_entries_handler,
        entries::get_entry_handler,
        entries::update_entry_handler,
        entries::delete_entry_handler,
        outputs::build_prompt_handler,
        outputs::save_output_handler,
        outputs::list_outputs_handler,
        outputs::get_output_handler,
        outputs::output_text_handler,
        export::export_handler,
    ),
    components(
        schemas(
            EntryRequest, EntryResponse, PromptRequest, PromptResponse, SaveReplyRequest,
            SaveReplyResponse, OutputResponse, RangeDto, HealthResponse
        )
    ),
    tags(
        (name = "Symptom Journal API", description = "Log symptoms, build model prompts and store parsed replies.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Pasted replies and complaint texts are small; 1 MiB is plenty.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the API routes over the shared state.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/entries", post(create_entry_handler).get(list_entries_handler))
        .route(
            "/entries/{id}",
            get(get_entry_handler)
                .put(update_entry_handler)
                .delete(delete_entry_handler),
        )
        .route("/prompts", post(build_prompt_handler))
        .route("/outputs", post(save_output_handler).get(list_outputs_handler))
        .route("/outputs/{id}", get(get_output_handler))
        .route("/outputs/{id}/text", get(output_text_handler))
        .route("/export", get(export_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

//=========================================================================================
// Health
//=========================================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
