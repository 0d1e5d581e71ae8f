use dialin_core::RecipeResult;
use serde_json::Value;

use crate::RecipeError;

/// Parse raw model output into a recipe. All or nothing: a top-level array
/// contributes its first element, and the object must carry a non-empty
/// `name` and a non-empty `steps` array. Nothing else is checked, and the
/// object is returned as the model wrote it.
pub fn parse_llm_output(raw: &str) -> Result<RecipeResult, RecipeError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|_| RecipeError::InvalidJson)?;

    let candidate = match parsed {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };

    let Some(Value::Object(mut extra)) = candidate else {
        return Err(RecipeError::NoRecipe);
    };

    let name = match extra.remove("name") {
        Some(Value::String(name)) if !name.is_empty() => name,
        _ => return Err(RecipeError::NoRecipe),
    };
    let steps = match extra.remove("steps") {
        Some(Value::Array(steps)) if !steps.is_empty() => steps,
        _ => return Err(RecipeError::NoRecipe),
    };

    Ok(RecipeResult { name, steps, extra })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object() {
        let raw = r#"{
            "name": "Cappuccino",
            "summary": "2 oz espresso with 4 fl oz milk",
            "espressoOz": 2,
            "milkOz": 4,
            "waterOz": 0,
            "shotType": "double",
            "steps": ["Pull a double shot", "Steam to create microfoam for 30 seconds", "Pour"]
        }"#;
        let recipe = parse_llm_output(raw).unwrap();
        assert_eq!(recipe.name, "Cappuccino");
        assert_eq!(recipe.steps.len(), 3);
        assert_eq!(recipe.milk_oz(), Some(4.0));
        assert_eq!(recipe.shot_type(), Some("double"));
        assert_eq!(recipe.summary(), Some("2 oz espresso with 4 fl oz milk"));
    }

    #[test]
    fn takes_first_array_element() {
        let raw = r#"[{"name":"Americano","steps":["Pull","Add water"]},{"name":"Other","steps":["x"]}]"#;
        assert_eq!(parse_llm_output(raw).unwrap().name, "Americano");
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            parse_llm_output("Here is your recipe: steam the milk"),
            Err(RecipeError::InvalidJson)
        ));
        assert!(matches!(parse_llm_output(""), Err(RecipeError::InvalidJson)));
    }

    #[test]
    fn rejects_incomplete_objects() {
        for raw in [
            "{}",
            r#"{"steps":["Pull"]}"#,
            r#"{"name":"Latte"}"#,
            r#"{"name":"Latte","steps":[]}"#,
            r#"{"name":"","steps":["Pull"]}"#,
            "[]",
            "null",
            r#""Latte""#,
        ] {
            assert!(
                matches!(parse_llm_output(raw), Err(RecipeError::NoRecipe)),
                "{raw}"
            );
        }
    }

    #[test]
    fn rejects_wrongly_typed_required_fields() {
        for raw in [
            r#"{"name":5,"steps":["Pull"]}"#,
            r#"{"name":"Latte","steps":"Pull, steam, pour"}"#,
        ] {
            assert!(
                matches!(parse_llm_output(raw), Err(RecipeError::NoRecipe)),
                "{raw}"
            );
        }
    }

    #[test]
    fn returns_other_fields_unchanged() {
        let raw = r#"{"name":"Latte","steps":["Pull",2],"summary":null,"espressoOz":"2 oz"}"#;
        let recipe = parse_llm_output(raw).unwrap();
        assert_eq!(recipe.name, "Latte");
        assert_eq!(recipe.espresso_oz(), None);
        assert_eq!(recipe.extra["espressoOz"], "2 oz");
        assert_eq!(recipe.extra["summary"], Value::Null);
        assert_eq!(
            serde_json::to_value(&recipe).unwrap(),
            serde_json::from_str::<Value>(raw).unwrap()
        );
    }

    #[test]
    fn blank_name_is_still_a_name() {
        let recipe = parse_llm_output(r#"{"name":" ","steps":["Pull"]}"#).unwrap();
        assert_eq!(recipe.name, " ");
    }
}
