use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dialin_core::overview::RecipeOverview;
use dialin_core::{Drink, RecipeResult};
use dialin_suggest::{generate_recipe, RecipeError, RecipeRequestBody};
use serde::Deserialize;

use crate::api::extract::ApiJson;
use crate::api::{ErrorResponse, GENERIC_FAILURE};
use crate::AppState;

/// Generate a drink recipe for the given equipment and drink.
///
/// Stateless: one model call per request, no retries. The recipe is returned
/// as validated, or not at all.
pub async fn create_recipe(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(client) = state.completion.clone() else {
        return error_response(RecipeError::NotConfigured);
    };

    // An unreadable body is treated like an empty one and fails validation.
    let body = RecipeRequestBody::from_slice(&body);

    let request = match body.validate() {
        Ok(r) => r,
        Err(e) => return error_response(e),
    };

    match generate_recipe(client.as_ref(), &request).await {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRequest {
    pub recipe: RecipeResult,
    #[serde(default)]
    pub drink: Drink,
    #[serde(default)]
    pub bean_type: String,
}

/// Dose, yield, time and ratio to show above a generated recipe.
pub async fn recipe_overview(ApiJson(req): ApiJson<OverviewRequest>) -> Json<RecipeOverview> {
    Json(RecipeOverview::from_recipe(
        &req.recipe,
        &req.drink,
        &req.bean_type,
    ))
}

fn error_response(err: RecipeError) -> Response {
    let (status, body) = match &err {
        RecipeError::NotConfigured => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("Missing OPENAI_API_KEY"),
        ),
        RecipeError::MissingFields(fields) => {
            tracing::debug!(?fields, "recipe request rejected");
            (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Missing required fields"),
            )
        }
        RecipeError::Upstream { details } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::with_details("OpenAI API error", details.clone()),
        ),
        RecipeError::InvalidJson => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("Invalid JSON from model"),
        ),
        RecipeError::NoRecipe => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("No recipes returned"),
        ),
        RecipeError::Completion(_) => {
            tracing::error!(error = %err, "Recipe generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(GENERIC_FAILURE),
            )
        }
    };

    (status, Json(body)).into_response()
}
