//! HTTP middleware

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// Per-request spans at debug, so the one-line summary below is what shows at info.
pub fn create_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::DEBUG)
                .latency_unit(LatencyUnit::Millis),
        )
}

/// Browsers probe `/favicon.ico` and friends; those 404s are not worth a warning.
fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status == StatusCode::NOT_FOUND {
        Level::DEBUG
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// One line per request: method, path, status and latency.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    macro_rules! log_request {
        ($lvl:expr) => {
            tracing::event!(
                target: "tasksift.http",
                $lvl,
                method = %method,
                path = %path,
                status,
                duration_ms,
                "request"
            )
        };
    }

    let level = level_for(response.status());
    if level == Level::ERROR {
        log_request!(Level::ERROR);
    } else if level == Level::WARN {
        log_request!(Level::WARN);
    } else if level == Level::DEBUG {
        log_request!(Level::DEBUG);
    } else {
        log_request!(Level::INFO);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_level_for_status() {
        assert_eq!(level_for(StatusCode::OK), Level::INFO);
        assert_eq!(level_for(StatusCode::NOT_FOUND), Level::DEBUG);
        assert_eq!(level_for(StatusCode::UNPROCESSABLE_ENTITY), Level::WARN);
        assert_eq!(level_for(StatusCode::INTERNAL_SERVER_ERROR), Level::ERROR);
    }

    #[tokio::test]
    async fn test_layers_pass_responses_through() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_logger))
            .layer(create_trace_layer());

        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
