use axum::Json;
use dialin_core::{filter_drinks, Drink, EquipmentProfile, EquipmentSelection, MilkCapability};
use serde::Deserialize;

use super::extract::ApiJson;

/// Resolve a machine selection into the equipment fields a recipe request
/// carries.
pub async fn resolve_equipment(
    ApiJson(selection): ApiJson<EquipmentSelection>,
) -> Json<EquipmentProfile> {
    Json(EquipmentProfile::derive(&selection))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkFilterRequest {
    pub milk_capability: MilkCapability,
    #[serde(default)]
    pub drinks: Vec<Drink>,
}

/// Drinks the machine can make, in catalog order.
pub async fn available_drinks(ApiJson(req): ApiJson<DrinkFilterRequest>) -> Json<Vec<Drink>> {
    Json(filter_drinks(req.drinks, req.milk_capability))
}
