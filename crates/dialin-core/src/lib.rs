pub mod catalog;
pub mod guidance;
pub mod overview;
pub mod rules;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use catalog::{GrinderType, MachineCapabilities, MachineType, MilkFrothing};

// --- Brew parameters ---

pub const DEFAULT_DOSE_GRAMS: f64 = 18.0;
pub const DEFAULT_YIELD_GRAMS: f64 = 36.0;
pub const DEFAULT_TIME_SECONDS: f64 = 28.0;
pub const DEFAULT_BASKET_GRAMS: f64 = 18.0;

pub const DOSE_RANGE: (f64, f64) = (10.0, 24.0);
pub const YIELD_RANGE: (f64, f64) = (20.0, 60.0);
pub const TIME_RANGE: (f64, f64) = (10.0, 60.0);
pub const BASKET_RANGE: (f64, f64) = (10.0, 24.0);

/// One espresso shot as entered on the dial-in form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewParameters {
    pub dose_grams: f64,
    pub yield_grams: f64,
    pub time_seconds: f64,
}

impl BrewParameters {
    pub fn new(dose_grams: f64, yield_grams: f64, time_seconds: f64) -> Self {
        Self {
            dose_grams,
            yield_grams,
            time_seconds,
        }
    }

    /// Build parameters from raw form values, substituting defaults for
    /// missing/zero/non-finite entries and clamping into the valid ranges.
    pub fn from_raw(raw: &RawBrewInput) -> Self {
        Self {
            dose_grams: clamp_or_default(raw.dose, DEFAULT_DOSE_GRAMS, DOSE_RANGE),
            yield_grams: clamp_or_default(raw.yield_grams, DEFAULT_YIELD_GRAMS, YIELD_RANGE),
            time_seconds: clamp_or_default(raw.time, DEFAULT_TIME_SECONDS, TIME_RANGE),
        }
    }

    /// Yield divided by dose. Dose is never below 10 after clamping.
    pub fn ratio(&self) -> f64 {
        self.yield_grams / self.dose_grams
    }
}

impl Default for BrewParameters {
    fn default() -> Self {
        Self::new(DEFAULT_DOSE_GRAMS, DEFAULT_YIELD_GRAMS, DEFAULT_TIME_SECONDS)
    }
}

/// Unvalidated form values. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawBrewInput {
    #[serde(default)]
    pub dose: Option<f64>,
    #[serde(default, rename = "yield")]
    pub yield_grams: Option<f64>,
    #[serde(default)]
    pub time: Option<f64>,
}

pub fn clamp_or_default(value: Option<f64>, default: f64, (min, max): (f64, f64)) -> f64 {
    let value = match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => default,
    };
    value.clamp(min, max)
}

/// Everything the share summary needs about one dial-in session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialInSession {
    pub machine: String,
    pub basket_grams: f64,
    pub brew: BrewParameters,
    pub roast: String,
    pub grinder: String,
}

impl DialInSession {
    /// Clamp basket and brew numbers the same way the shot form does. Text
    /// fields pass through untouched.
    pub fn from_raw(raw: &RawDialInInput) -> Self {
        Self {
            machine: raw.machine.clone().unwrap_or_default(),
            basket_grams: clamp_or_default(raw.basket, DEFAULT_BASKET_GRAMS, BASKET_RANGE),
            brew: BrewParameters::from_raw(&raw.brew),
            roast: raw.roast.clone().unwrap_or_default(),
            grinder: raw.grinder.clone().unwrap_or_default(),
        }
    }
}

/// Unvalidated dial-in form: brew numbers plus the session's equipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawDialInInput {
    #[serde(default)]
    pub machine: Option<String>,
    #[serde(default)]
    pub basket: Option<f64>,
    #[serde(flatten)]
    pub brew: RawBrewInput,
    #[serde(default)]
    pub roast: Option<String>,
    #[serde(default)]
    pub grinder: Option<String>,
}

// --- Equipment ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MilkCapability {
    #[serde(rename = "steam wand")]
    SteamWand,
    #[serde(rename = "auto milk")]
    AutoMilk,
    #[serde(rename = "no milk")]
    NoMilk,
}

impl MilkCapability {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilkCapability::SteamWand => "steam wand",
            MilkCapability::AutoMilk => "auto milk",
            MilkCapability::NoMilk => "no milk",
        }
    }
}

impl From<MilkFrothing> for MilkCapability {
    fn from(frothing: MilkFrothing) -> Self {
        match frothing {
            MilkFrothing::Steam => MilkCapability::SteamWand,
            MilkFrothing::Frother => MilkCapability::AutoMilk,
            MilkFrothing::None => MilkCapability::NoMilk,
        }
    }
}

/// What the user picked on the equipment form. Type/grinder/milk choices only
/// matter when the machine is not in the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSelection {
    #[serde(default)]
    pub machine: Option<String>,
    #[serde(default)]
    pub machine_type: Option<MachineType>,
    #[serde(default)]
    pub grinder_type: Option<GrinderType>,
    #[serde(default)]
    pub milk_frothing: Option<MilkFrothing>,
    #[serde(default)]
    pub roast: Option<String>,
    #[serde(default)]
    pub latte_art: bool,
}

/// Equipment as sent to the recipe endpoint. Serializes to the request body
/// shape (minus the drink).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentProfile {
    pub machine: String,
    pub grinder: String,
    pub milk_capability: MilkCapability,
    pub bean_type: String,
    pub roast: String,
    pub latte_art: bool,
    pub machine_capabilities: MachineCapabilities,
}

impl EquipmentProfile {
    pub fn derive(selection: &EquipmentSelection) -> Self {
        let machine = selection
            .machine
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(MachineType::SemiAuto.generic_name())
            .to_string();

        let (machine_type, grinder, milk, basket) = match catalog::find_machine(&machine) {
            Some(p) => (p.machine_type, p.grinder, p.milk, p.basket_grams),
            None => {
                let fallback = catalog::resolve_machine(&machine, selection.machine_type);
                (
                    selection.machine_type.unwrap_or(fallback.machine_type),
                    selection.grinder_type.unwrap_or(fallback.grinder),
                    selection.milk_frothing.unwrap_or(fallback.milk),
                    fallback.basket_grams,
                )
            }
        };

        let roast = selection
            .roast
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or("medium")
            .to_string();

        Self {
            machine,
            grinder: grinder.label().to_string(),
            milk_capability: milk.into(),
            bean_type: format!("House blend ({}g basket)", basket),
            roast,
            latte_art: selection.latte_art,
            machine_capabilities: machine_type.capabilities(),
        }
    }
}

// --- Drinks ---

/// A drink from the external catalog. Only the fields the recipe flow reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub espresso_oz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milk_oz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_oz: Option<f64>,
    #[serde(default)]
    pub milk_required: bool,
}

/// Drop milk drinks when the machine cannot make milk.
pub fn filter_drinks(drinks: Vec<Drink>, milk: MilkCapability) -> Vec<Drink> {
    if milk != MilkCapability::NoMilk {
        return drinks;
    }
    drinks.into_iter().filter(|d| !d.milk_required).collect()
}

// --- Recipes ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    Single,
    Double,
}

impl ShotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Single => "single",
            ShotType::Double => "double",
        }
    }

    /// Up to and including 1.5 oz is a single shot.
    pub fn for_espresso_oz(oz: f64) -> Self {
        if oz <= rules::SINGLE_SHOT_MAX_OZ {
            ShotType::Single
        } else {
            ShotType::Double
        }
    }
}

/// A generated drink recipe. Only `name` and `steps` are guaranteed; every
/// other field the model wrote stays in `extra` exactly as it came, so the
/// record goes back to the caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeResult {
    pub name: String,
    pub steps: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecipeResult {
    pub fn summary(&self) -> Option<&str> {
        self.extra.get("summary").and_then(Value::as_str)
    }

    pub fn espresso_oz(&self) -> Option<f64> {
        self.extra.get("espressoOz").and_then(Value::as_f64)
    }

    pub fn milk_oz(&self) -> Option<f64> {
        self.extra.get("milkOz").and_then(Value::as_f64)
    }

    pub fn water_oz(&self) -> Option<f64> {
        self.extra.get("waterOz").and_then(Value::as_f64)
    }

    pub fn shot_type(&self) -> Option<&str> {
        self.extra.get("shotType").and_then(Value::as_str)
    }

    /// Steps that are text. Anything else in the array is skipped.
    pub fn step_texts(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(Value::as_str)
    }
}
