//! HTTP surface for the espresso dial-in assistant.

pub mod api;
pub mod config;

use std::any::Any;
use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use dialin_suggest::{CompletionClient, LlmClient};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use api::ErrorResponse;
use config::ServerConfig;

/// State shared by all handlers. Holds no per-request data.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// `None` when no credential was configured; recipe requests then fail.
    pub completion: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    pub fn new(completion: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { completion }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let completion = config
            .completion_settings()
            .map(|settings| Arc::new(LlmClient::new(settings)) as Arc<dyn CompletionClient>);
        Self { completion }
    }
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(api::GENERIC_FAILURE)),
    )
        .into_response()
}

pub fn build_router(state: AppState) -> Router {
    api::router()
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}
