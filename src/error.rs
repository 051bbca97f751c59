use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A movie search that produced no usable response body.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Search response was not valid JSON: {0}")]
    Body(#[source] reqwest::Error),
}

/// Why a selected file was not applied. All of these are silent no-ops for
/// the page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadRejection {
    #[error("No file selected")]
    NoFile,

    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Image could not be decoded: {0}")]
    Undecodable(String),
}

/// Palette extraction failure. The page falls back to a fixed gradient.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Image fetch failed: {0}")]
    Fetch(String),

    #[error("Local resource {0} was released")]
    ResourceReleased(u64),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Palette error: {0}")]
    Swatch(#[from] swatch::SwatchError),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Template(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("invalid backdrop path".to_string());
        assert_eq!(error.to_string(), "Bad request: invalid backdrop path");
    }

    #[test]
    fn test_api_error_not_found() {
        assert_eq!(ApiError::NotFound.to_string(), "Not found");
    }

    #[test]
    fn test_load_rejection_messages() {
        assert_eq!(LoadRejection::NoFile.to_string(), "No file selected");
        assert_eq!(
            LoadRejection::NotAnImage("text/plain".to_string()).to_string(),
            "Not an image: text/plain"
        );
        assert_eq!(
            LoadRejection::TooLarge { size: 10, max: 5 }.to_string(),
            "File too large: 10 bytes (max 5)"
        );
    }

    #[test]
    fn test_extract_error_from_swatch() {
        let error: ExtractError = swatch::SwatchError::NoOpaquePixels.into();
        assert!(matches!(error, ExtractError::Swatch(_)));
    }

    #[test]
    fn test_api_error_from_template_error() {
        let api_error: ApiError = TemplateError::NotFound("index.html".to_string()).into();
        assert!(matches!(api_error, ApiError::Template(_)));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Template(TemplateError::NotFound("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
