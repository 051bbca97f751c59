//! Page endpoints: the rendered page and the form submissions that drive it.
//!
//! Every form endpoint redirects back to `/`, so the browser always ends up
//! on a fresh render of the session.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::rendering::PageRenderer;
use crate::services::{BackdropPipeline, SearchOutcome, SelectedFile};

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

const MAX_BACKDROP_PATH_LEN: usize = 256;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectParams {
    pub backdrop: String,
}

/// Render the page
pub async fn handle_page(
    State(pipeline): State<Arc<BackdropPipeline>>,
    State(renderer): State<Arc<PageRenderer>>,
) -> Result<Html<String>, ApiError> {
    let snapshot = pipeline.snapshot().await;
    Ok(Html(renderer.render(&snapshot)?))
}

/// Run a search, then return to the page
pub async fn handle_search(
    State(pipeline): State<Arc<BackdropPipeline>>,
    Query(params): Query<SearchParams>,
) -> Redirect {
    match pipeline.search(&params.q).await {
        SearchOutcome::Skipped => tracing::debug!("Blank query, search skipped"),
        SearchOutcome::Completed(view) => tracing::info!(
            query = %params.q.trim(),
            cards = view.cards().len(),
            "Search finished"
        ),
    }
    Redirect::to("/")
}

/// Show a result's backdrop and start palette extraction
pub async fn handle_select(
    State(pipeline): State<Arc<BackdropPipeline>>,
    Query(params): Query<SelectParams>,
) -> Result<Redirect, ApiError> {
    let path = validate_backdrop_path(&params.backdrop)?;
    pipeline.select_backdrop(path).await;
    Ok(Redirect::to("/"))
}

/// Accept an uploaded image. Anything unusable is ignored.
pub async fn handle_upload(
    State(pipeline): State<Arc<BackdropPipeline>>,
    multipart: Multipart,
) -> Redirect {
    match read_upload(multipart).await {
        Ok(file) => {
            if let Err(rejection) = pipeline.select_file(file).await {
                tracing::debug!(%rejection, "Upload ignored");
            }
        }
        Err(e) => tracing::debug!(%e, "Unreadable upload ignored"),
    }
    Redirect::to("/")
}

/// Serve a live local resource
pub async fn handle_local(
    State(pipeline): State<Arc<BackdropPipeline>>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let image = pipeline.local_resource(id).ok_or(ApiError::NotFound)?;

    Ok((
        [
            (header::CONTENT_TYPE, image.mime.clone()),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        image.bytes.to_vec(),
    )
        .into_response())
}

async fn read_upload(
    mut multipart: Multipart,
) -> Result<Option<SelectedFile>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Some(SelectedFile {
            name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// Accept only plain path fragments like `/abc.jpg`.
pub fn validate_backdrop_path(path: &str) -> Result<&str, ApiError> {
    let valid = path.starts_with('/')
        && path.len() > 1
        && path.len() <= MAX_BACKDROP_PATH_LEN
        && !path.contains("..")
        && path
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b'.' | b'_' | b'-'));

    if valid {
        Ok(path)
    } else {
        Err(ApiError::BadRequest(format!("Invalid backdrop path: {path}")))
    }
}
