use axum::Json;
use dialin_core::guidance::{build_guidance, share_summary, Guidance};
use dialin_core::{BrewParameters, DialInSession, RawBrewInput, RawDialInInput};
use serde::Serialize;

use super::extract::ApiJson;

/// Dial-in advice for one shot. Inputs are clamped to the form's ranges
/// first, so this never fails on numbers.
pub async fn get_guidance(ApiJson(raw): ApiJson<RawBrewInput>) -> Json<Guidance> {
    let params = BrewParameters::from_raw(&raw);
    Json(build_guidance(&params))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSummary {
    pub session: DialInSession,
    pub summary: String,
}

/// Plain-text summary of a dial-in session, ready to copy.
pub async fn get_share_summary(ApiJson(raw): ApiJson<RawDialInInput>) -> Json<ShareSummary> {
    let session = DialInSession::from_raw(&raw);
    let summary = share_summary(&session);
    Json(ShareSummary { session, summary })
}
