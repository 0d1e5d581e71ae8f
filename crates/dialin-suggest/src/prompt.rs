use dialin_core::catalog::is_magnifica_evo;
use dialin_core::{rules, MilkCapability, ShotType};

use crate::RecipeRequest;

pub fn system_prompt() -> &'static str {
    rules::SYSTEM_INSTRUCTION
}

/// Latte art only when asked for, the drink has milk, and the machine can
/// make milk.
pub fn latte_art_requested(request: &RecipeRequest) -> bool {
    request.latte_art
        && request.drink.milk_oz.is_some_and(|oz| oz > 0.0)
        && request.milk_capability != MilkCapability::NoMilk.as_str()
}

fn volume(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn drink_name(request: &RecipeRequest) -> &str {
    if request.drink.name.is_empty() {
        "Unknown"
    } else {
        &request.drink.name
    }
}

/// Extra directives for machines with fixed behavior.
fn machine_notes(request: &RecipeRequest) -> Option<String> {
    if !is_magnifica_evo(&request.machine) {
        return None;
    }

    let mut out = String::from("Machine notes:\n");
    out.push_str("- Super-automatic with a built-in grinder: do NOT mention grinding.\n");
    if let Some(oz) = request.drink.espresso_oz {
        let shot = ShotType::for_espresso_oz(oz);
        out.push_str(&format!(
            "- Pull a {} shot for {} oz of espresso.\n",
            shot.as_str(),
            oz
        ));
    }
    Some(out)
}

pub fn user_message(request: &RecipeRequest) -> String {
    let mut out = String::with_capacity(2048);

    out.push_str("Create a single espresso drink recipe based on the inputs below.\n\n");

    out.push_str("Inputs:\n");
    out.push_str(&format!("- Machine: {}\n", request.machine));
    out.push_str(&format!("- Grinder: {}\n", request.grinder));
    out.push_str(&format!("- Milk capability: {}\n", request.milk_capability));
    out.push_str(&format!("- Bean type: {}\n", request.bean_type));
    out.push_str(&format!("- Roast: {}\n", request.roast));
    out.push_str(&format!("- Selected drink: {}\n", drink_name(request)));
    out.push_str(&format!(
        "- Drink volumes (liquid): espresso {} oz, milk {} fl oz, water {} fl oz\n",
        volume(request.drink.espresso_oz),
        volume(request.drink.milk_oz),
        volume(request.drink.water_oz),
    ));
    out.push_str(&format!(
        "- Latte art requested: {}\n",
        if latte_art_requested(request) { "yes" } else { "no" }
    ));

    if let Some(notes) = machine_notes(request) {
        out.push('\n');
        out.push_str(&notes);
    }

    out.push_str("\nRules:\n");
    out.push_str(rules::RULES);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialin_core::catalog::MAGNIFICA_EVO;
    use dialin_core::Drink;

    fn request(milk_capability: &str, latte_art: bool, milk_oz: Option<f64>) -> RecipeRequest {
        RecipeRequest {
            machine: "Breville Bambino".into(),
            grinder: "Burr grinder".into(),
            milk_capability: milk_capability.into(),
            bean_type: "House blend (18g basket)".into(),
            roast: "medium".into(),
            latte_art,
            drink: Drink {
                name: "Latte".into(),
                espresso_oz: Some(2.0),
                milk_oz,
                water_oz: Some(0.0),
                ..Default::default()
            },
        }
    }

    #[test]
    fn latte_art_gate_needs_all_three() {
        assert!(latte_art_requested(&request("steam wand", true, Some(6.0))));
        assert!(latte_art_requested(&request("auto milk", true, Some(6.0))));

        assert!(!latte_art_requested(&request("steam wand", false, Some(6.0))));
        assert!(!latte_art_requested(&request("steam wand", true, Some(0.0))));
        assert!(!latte_art_requested(&request("steam wand", true, None)));
        assert!(!latte_art_requested(&request("no milk", true, Some(6.0))));
    }

    #[test]
    fn prompt_lists_inputs() {
        let prompt = user_message(&request("steam wand", true, Some(6.0)));
        assert!(prompt.starts_with("Create a single espresso drink recipe"));
        assert!(prompt.contains("- Machine: Breville Bambino\n"));
        assert!(prompt.contains("- Milk capability: steam wand\n"));
        assert!(prompt.contains("- Selected drink: Latte\n"));
        assert!(prompt.contains(
            "- Drink volumes (liquid): espresso 2 oz, milk 6 fl oz, water 0 fl oz\n"
        ));
        assert!(prompt.contains("- Latte art requested: yes\n"));
        assert!(prompt.contains("steam to create microfoam"));
        assert!(prompt.ends_with(rules::RULES));
        assert!(!prompt.contains("Machine notes:"));
    }

    #[test]
    fn missing_volumes_use_placeholder() {
        let mut req = request("no milk", true, None);
        req.drink.espresso_oz = Some(1.5);
        req.drink.water_oz = None;
        let prompt = user_message(&req);
        assert!(prompt.contains("espresso 1.5 oz, milk - fl oz, water - fl oz"));
        assert!(prompt.contains("- Latte art requested: no\n"));
    }

    #[test]
    fn magnifica_single_shot_without_grinding() {
        let mut req = request("auto milk", false, Some(4.0));
        req.machine = MAGNIFICA_EVO.into();
        req.drink.espresso_oz = Some(1.0);
        let prompt = user_message(&req);
        assert!(prompt.contains("Machine notes:\n"));
        assert!(prompt.contains("do NOT mention grinding"));
        assert!(prompt.contains("- Pull a single shot for 1 oz of espresso.\n"));
        assert!(!prompt.contains("double shot for"));
    }

    #[test]
    fn magnifica_double_shot() {
        let mut req = request("auto milk", false, Some(4.0));
        req.machine = "DeLonghi Magnifica Evo (non-LatteCrema)".into();
        req.drink.espresso_oz = Some(2.0);
        let prompt = user_message(&req);
        assert!(prompt.contains("- Pull a double shot for 2 oz of espresso.\n"));
        assert!(!prompt.contains("single shot for"));
    }

    #[test]
    fn unnamed_drink_is_unknown() {
        let mut req = request("steam wand", false, Some(6.0));
        req.drink.name.clear();
        assert!(user_message(&req).contains("- Selected drink: Unknown\n"));
    }
}
