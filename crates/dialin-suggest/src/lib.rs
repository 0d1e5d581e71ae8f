pub mod engine;
mod parse;
mod prompt;

use dialin_core::{Drink, RecipeResult};
use serde_json::Value;
use thiserror::Error;

pub use engine::{CompletionClient, CompletionError, CompletionSettings, FakeClient, LlmClient};
pub use parse::parse_llm_output;
pub use prompt::{latte_art_requested, system_prompt, user_message};

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Missing OPENAI_API_KEY")]
    NotConfigured,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("OpenAI API error: {details}")]
    Upstream { details: String },

    #[error("Invalid JSON from model")]
    InvalidJson,

    #[error("No recipes returned")]
    NoRecipe,

    #[error("completion failed: {0}")]
    Completion(CompletionError),
}

impl From<CompletionError> for RecipeError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Upstream(details) => RecipeError::Upstream { details },
            other => RecipeError::Completion(other),
        }
    }
}

/// Recipe request as it arrives over the wire. Nothing is required yet.
#[derive(Debug, Clone, Default)]
pub struct RecipeRequestBody {
    pub machine: Option<String>,
    pub grinder: Option<String>,
    pub milk_capability: Option<String>,
    pub bean_type: Option<String>,
    pub roast: Option<String>,
    pub latte_art: Value,
    pub drink: Option<Drink>,
}

impl RecipeRequestBody {
    /// Read a request body. Bytes that are not JSON read as an empty body.
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes)
            .map(|value: Value| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// Pick fields out one at a time so a badly typed field only loses
    /// itself. Non-string text fields count as missing; non-numeric drink
    /// volumes count as unknown.
    pub fn from_value(value: &Value) -> Self {
        Self {
            machine: text(value, "machine"),
            grinder: text(value, "grinder"),
            milk_capability: text(value, "milkCapability"),
            bean_type: text(value, "beanType"),
            roast: text(value, "roast"),
            latte_art: value.get("latteArt").cloned().unwrap_or_default(),
            drink: value.get("drink").filter(|d| d.is_object()).map(read_drink),
        }
    }
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}

fn read_drink(value: &Value) -> Drink {
    Drink {
        id: text(value, "id"),
        name: text(value, "name").unwrap_or_default(),
        espresso_oz: value.get("espressoOz").and_then(Value::as_f64),
        milk_oz: value.get("milkOz").and_then(Value::as_f64),
        water_oz: value.get("waterOz").and_then(Value::as_f64),
        milk_required: value
            .get("milkRequired")
            .and_then(Value::as_bool)
            .unwrap_or_default(),
    }
}

/// A request with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRequest {
    pub machine: String,
    pub grinder: String,
    pub milk_capability: String,
    pub bean_type: String,
    pub roast: String,
    pub latte_art: bool,
    pub drink: Drink,
}

fn present(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

/// Loose truthiness so `"latteArt": 1` or `"yes"` still counts as asked for.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl RecipeRequestBody {
    pub fn validate(self) -> Result<RecipeRequest, RecipeError> {
        let mut missing = Vec::new();

        let machine = present(self.machine, "machine", &mut missing);
        let grinder = present(self.grinder, "grinder", &mut missing);
        let milk_capability = present(self.milk_capability, "milkCapability", &mut missing);
        let bean_type = present(self.bean_type, "beanType", &mut missing);
        let roast = present(self.roast, "roast", &mut missing);

        let drink = match self.drink {
            Some(d) if !d.name.is_empty() => d,
            _ => {
                missing.push("drink.name");
                Drink::default()
            }
        };

        if !missing.is_empty() {
            return Err(RecipeError::MissingFields(missing));
        }

        Ok(RecipeRequest {
            machine,
            grinder,
            milk_capability,
            bean_type,
            roast,
            latte_art: is_truthy(&self.latte_art),
            drink,
        })
    }
}

/// Build the prompt, make the one model call, and validate what comes back.
pub async fn generate_recipe(
    client: &dyn CompletionClient,
    request: &RecipeRequest,
) -> Result<RecipeResult, RecipeError> {
    let user_msg = user_message(request);

    tracing::debug!(
        model = client.model_name(),
        drink = %request.drink.name,
        prompt_len = user_msg.len(),
        "requesting recipe"
    );

    let raw = client.complete(system_prompt(), &user_msg).await?;

    tracing::debug!(raw_len = raw.len(), "model replied");

    let recipe = parse_llm_output(&raw).inspect_err(|e| {
        tracing::warn!(error = %e, raw_len = raw.len(), "rejected model output");
    })?;

    tracing::info!(recipe = %recipe.name, steps = recipe.steps.len(), "recipe generated");
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> RecipeRequestBody {
        RecipeRequestBody::from_value(&serde_json::json!({
            "machine": "Breville Bambino",
            "grinder": "Burr grinder",
            "milkCapability": "steam wand",
            "beanType": "House blend (18g basket)",
            "roast": "medium",
            "latteArt": true,
            "drink": { "name": "Flat White", "espressoOz": 2, "milkOz": 4, "waterOz": 0 }
        }))
    }

    const RECIPE: &str = r#"{"name":"Flat White","summary":"2 oz espresso, 4 fl oz milk","espressoOz":2,"milkOz":4,"waterOz":0,"shotType":"double","steps":["Pull a double shot","Steam to create microfoam for 25 seconds","Pour"]}"#;

    #[test]
    fn validate_accepts_complete_body() {
        let req = body().validate().unwrap();
        assert_eq!(req.machine, "Breville Bambino");
        assert!(req.latte_art);
        assert_eq!(req.drink.milk_oz, Some(4.0));
    }

    #[test]
    fn validate_lists_missing_fields() {
        let mut b = body();
        b.roast = None;
        b.grinder = Some(String::new());
        b.drink = Some(Drink::default());
        match b.validate() {
            Err(RecipeError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["grinder", "roast", "drink.name"]);
            }
            other => panic!("expected missing fields, got {other:?}"),
        }

        assert!(matches!(
            RecipeRequestBody::default().validate(),
            Err(RecipeError::MissingFields(f)) if f.len() == 6
        ));
    }

    #[test]
    fn badly_typed_field_only_loses_itself() {
        let body = RecipeRequestBody::from_slice(
            br#"{
                "machine": "Breville Bambino",
                "grinder": "Burr grinder",
                "milkCapability": "steam wand",
                "beanType": "House blend (18g basket)",
                "roast": 3,
                "drink": { "name": "Latte", "milkOz": "6", "espressoOz": 2 }
            }"#,
        );
        match body.clone().validate() {
            Err(RecipeError::MissingFields(fields)) => assert_eq!(fields, vec!["roast"]),
            other => panic!("expected missing roast, got {other:?}"),
        }

        let mut body = body;
        body.roast = Some("medium".into());
        let req = body.validate().unwrap();
        assert_eq!(req.drink.name, "Latte");
        assert_eq!(req.drink.milk_oz, None);
        assert_eq!(req.drink.espresso_oz, Some(2.0));
        assert!(user_message(&req).contains("milk - fl oz"));
    }

    #[test]
    fn unreadable_body_is_empty() {
        let cases: [&[u8]; 4] = [b"not json", b"", b"[1,2]", br#"{"drink":"Latte"}"#];
        for raw in cases {
            assert!(matches!(
                RecipeRequestBody::from_slice(raw).validate(),
                Err(RecipeError::MissingFields(f)) if f.len() == 6
            ));
        }
    }

    #[test]
    fn latte_art_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&serde_json::json!(0)));
        assert!(!is_truthy(&serde_json::json!("")));
        assert!(is_truthy(&serde_json::json!("yes")));
        assert!(is_truthy(&serde_json::json!(1)));
    }

    #[tokio::test]
    async fn generates_recipe_from_fake() {
        let client = FakeClient::new().with_response("Flat White", RECIPE);
        let req = body().validate().unwrap();
        let recipe = generate_recipe(&client, &req).await.unwrap();
        assert_eq!(recipe.name, "Flat White");
        assert_eq!(recipe.steps.len(), 3);

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- Latte art requested: yes"));
    }

    #[tokio::test]
    async fn upstream_error_keeps_details() {
        let client = FakeClient::new()
            .with_default_error(CompletionError::Upstream("rate limit exceeded".into()));
        let req = body().validate().unwrap();
        match generate_recipe(&client, &req).await {
            Err(RecipeError::Upstream { details }) => assert_eq!(details, "rate limit exceeded"),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_error_is_generic() {
        let client =
            FakeClient::new().with_default_error(CompletionError::Transport("timed out".into()));
        let req = body().validate().unwrap();
        assert!(matches!(
            generate_recipe(&client, &req).await,
            Err(RecipeError::Completion(CompletionError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn malformed_output_is_rejected() {
        let req = body().validate().unwrap();

        let client = FakeClient::new().with_default_response("Sure! Here's a recipe.");
        assert!(matches!(
            generate_recipe(&client, &req).await,
            Err(RecipeError::InvalidJson)
        ));

        let client = FakeClient::new().with_default_response(r#"{"name":"Flat White"}"#);
        assert!(matches!(
            generate_recipe(&client, &req).await,
            Err(RecipeError::NoRecipe)
        ));
    }
}
