pub mod equipment;
pub mod extract;
pub mod guidance;
pub mod recipes;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;

/// Message for failures the caller can only retry.
pub const GENERIC_FAILURE: &str = "Failed to generate recipe. Please try again.";

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Every endpoint here is POST-only.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/recipes",
            post(recipes::create_recipe).fallback(method_not_allowed),
        )
        .route(
            "/api/recipes/overview",
            post(recipes::recipe_overview).fallback(method_not_allowed),
        )
        .route(
            "/api/guidance",
            post(guidance::get_guidance).fallback(method_not_allowed),
        )
        .route(
            "/api/summary",
            post(guidance::get_share_summary).fallback(method_not_allowed),
        )
        .route(
            "/api/equipment",
            post(equipment::resolve_equipment).fallback(method_not_allowed),
        )
        .route(
            "/api/drinks/available",
            post(equipment::available_drinks).fallback(method_not_allowed),
        )
}
