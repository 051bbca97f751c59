use axum::{extract::State, Json};
use std::sync::Arc;

use crate::services::{BackdropPipeline, SessionSnapshot};

/// Current page state
///
/// Returns the variant, the layer stack exactly as rendered, the results
/// area and whether a search is running.
#[utoipa::path(
    get,
    path = "/api/state",
    responses(
        (status = 200, description = "Current session state", body = SessionSnapshot),
    ),
    tag = "Page"
)]
pub async fn handle_state(State(pipeline): State<Arc<BackdropPipeline>>) -> Json<SessionSnapshot> {
    Json(pipeline.snapshot().await)
}
