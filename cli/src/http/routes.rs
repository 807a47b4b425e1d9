//! HTTP route handlers

use axum::{
    extract::State,
    http::{header, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tasksift_core::api::{process_submission, render_csv, CSV_FILENAME};

use crate::http::{models::*, state::AppState};

/// Builds every route. Unknown paths and methods all answer 404.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(index_handler)
                .post(submit_handler)
                .fallback(not_found_handler),
        )
        .route(
            "/download_csv",
            get(download_csv_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

async fn read_template(state: &AppState) -> Result<String, HttpServerError> {
    tokio::fs::read_to_string(state.template_path.as_path())
        .await
        .map_err(|e| {
            tracing::error!(
                "failed to read template {}: {}",
                state.template_path.display(),
                e
            );
            HttpServerError::Internal(format!(
                "Failed to read page template {}",
                state.template_path.display()
            ))
        })
}

async fn page_with(state: &AppState, fragment: &str) -> Result<Html<String>, HttpServerError> {
    let source = read_template(state).await?;
    let page = state.renderer.render_page(&source, fragment)?;
    Ok(Html(page))
}

/// GET / - base page with an empty results region
async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, HttpServerError> {
    page_with(&state, "").await
}

/// POST / - summarize submitted tasks and render them into the page
async fn submit_handler(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, HttpServerError> {
    let Some(summarizer) = state.services.summarizer.as_ref() else {
        tracing::warn!(
            "submission rejected: {} environment variable not set",
            state.api_key_env
        );
        let fragment = state.renderer.render_missing_key(&state.api_key_env)?;
        return page_with(&state, &fragment).await;
    };

    let outcome = process_submission(&form.tasks_input, summarizer.as_ref(), &state.cache).await;
    if let Some(err) = outcome.error() {
        tracing::warn!(
            target: "tasksift.http",
            stage = "http.submit.degraded",
            kind = %err.kind(),
            status = ?err.status(),
            "answering with an empty result set"
        );
    }
    let fragment = state.renderer.render_results(outcome.items())?;
    tracing::debug!(
        target: "tasksift.http",
        stage = "http.submit.rendered",
        items = outcome.items().len(),
        cached = state.cache.len(),
        fragment_len = fragment.len()
    );
    page_with(&state, &fragment).await
}

/// GET /download_csv - export the cached result set
async fn download_csv_handler(State(state): State<AppState>) -> Result<Response, HttpServerError> {
    let items = state.cache.non_empty().ok_or(HttpServerError::NoExport)?;
    let body = render_csv(&items)?;
    let disposition = format!("attachment; filename=\"{CSV_FILENAME}\"");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn not_found_handler(uri: Uri) -> HttpServerError {
    HttpServerError::NotFound(uri.path().to_string())
}
