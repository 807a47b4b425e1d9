//! HTTP request models and error responses

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tasksift_core::api::{ExportError, RenderError};

pub const NO_EXPORT_MESSAGE: &str = "No processed tasks to download. Please process tasks first.";

// ============= Submit =============

/// Form body of `POST /`.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    /// Newline-separated task descriptions.
    #[serde(default)]
    pub tasks_input: String,
}

// ============= Error Handling =============

#[derive(Debug)]
pub enum HttpServerError {
    NotFound(String),
    NoExport,
    Template(String),
    Internal(String),
}

impl From<RenderError> for HttpServerError {
    fn from(err: RenderError) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<ExportError> for HttpServerError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NoTasks => Self::NoExport,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(path) => (StatusCode::NOT_FOUND, format!("File Not Found: {path}")),
            Self::NoExport => (StatusCode::NOT_FOUND, NO_EXPORT_MESSAGE.to_string()),
            Self::Template(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {msg}"),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_form_deserialize() {
        let form: SubmitForm =
            serde_json::from_str(r#"{"tasks_input":"a\nb"}"#).unwrap();
        assert_eq!(form.tasks_input, "a\nb");
    }

    #[test]
    fn test_submit_form_missing_field_defaults() {
        let form: SubmitForm = serde_json::from_str("{}").unwrap();
        assert!(form.tasks_input.is_empty());
    }

    #[test]
    fn test_error_status_codes() {
        let resp = HttpServerError::NotFound("/nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = HttpServerError::from(ExportError::NoTasks).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );

        let resp = HttpServerError::Template("boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
