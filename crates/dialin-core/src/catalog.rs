//! Known espresso machines and what they can do.
//!
//! Lookup is exact-name first, then the generic profile for the machine type,
//! then the generic semi-automatic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MachineType {
    #[serde(rename = "semi-auto")]
    SemiAuto,
    #[serde(rename = "automatic")]
    Automatic,
    #[serde(rename = "super-auto")]
    SuperAuto,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GrinderType {
    #[serde(rename = "burr")]
    Burr,
    #[serde(rename = "built-in")]
    BuiltIn,
    #[serde(rename = "preground")]
    Preground,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MilkFrothing {
    Steam,
    Frother,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrindStyle {
    Manual,
    Auto,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MachineCapabilities {
    pub auto_grind: bool,
    pub auto_dose: bool,
    pub grind_style: GrindStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineProfile {
    pub name: &'static str,
    pub machine_type: MachineType,
    pub grinder: GrinderType,
    pub milk: MilkFrothing,
    pub basket_grams: u32,
}

impl MachineType {
    /// Catalog entry used when a machine of this type is not listed.
    pub fn generic_name(&self) -> &'static str {
        match self {
            MachineType::SemiAuto => "Semi-Auto (Generic)",
            MachineType::Automatic => "Automatic (Generic)",
            MachineType::SuperAuto => "Super-Auto (Generic)",
        }
    }

    pub fn capabilities(&self) -> MachineCapabilities {
        match self {
            MachineType::SemiAuto => MachineCapabilities {
                auto_grind: false,
                auto_dose: false,
                grind_style: GrindStyle::Manual,
            },
            MachineType::Automatic => MachineCapabilities {
                auto_grind: false,
                auto_dose: true,
                grind_style: GrindStyle::Manual,
            },
            MachineType::SuperAuto => MachineCapabilities {
                auto_grind: true,
                auto_dose: true,
                grind_style: GrindStyle::Auto,
            },
        }
    }
}

impl GrinderType {
    pub fn label(&self) -> &'static str {
        match self {
            GrinderType::Burr => "Burr grinder",
            GrinderType::BuiltIn => "Built-in grinder",
            GrinderType::Preground => "Pre-ground coffee",
        }
    }
}

const fn semi_auto(name: &'static str) -> MachineProfile {
    MachineProfile {
        name,
        machine_type: MachineType::SemiAuto,
        grinder: GrinderType::Burr,
        milk: MilkFrothing::Steam,
        basket_grams: 18,
    }
}

const fn super_auto(name: &'static str) -> MachineProfile {
    MachineProfile {
        name,
        machine_type: MachineType::SuperAuto,
        grinder: GrinderType::BuiltIn,
        milk: MilkFrothing::Frother,
        basket_grams: 14,
    }
}

pub const MACHINES: &[MachineProfile] = &[
    semi_auto("Semi-Auto (Generic)"),
    MachineProfile {
        name: "Automatic (Generic)",
        machine_type: MachineType::Automatic,
        grinder: GrinderType::Burr,
        milk: MilkFrothing::Steam,
        basket_grams: 18,
    },
    super_auto("Super-Auto (Generic)"),
    super_auto(MAGNIFICA_EVO),
    semi_auto("Breville Bambino"),
    semi_auto("Gaggia Classic Pro"),
    semi_auto("Lelit Anna"),
    semi_auto("Rancilio Silvia"),
    semi_auto("Smeg Semi-Pro"),
    semi_auto("Lelit MaraX"),
    semi_auto("Rocket Appartamento"),
    super_auto("Miele CM6360"),
    semi_auto("La Marzocco Linea Mini"),
];

/// Super-automatic whose recipes never include grinding and pick the shot
/// size from the espresso volume.
pub const MAGNIFICA_EVO: &str = "DeLonghi Magnifica Evo (non-LatteCrema version)";

pub fn find_machine(name: &str) -> Option<&'static MachineProfile> {
    MACHINES.iter().find(|m| m.name == name)
}

pub fn generic_machine(machine_type: MachineType) -> &'static MachineProfile {
    find_machine(machine_type.generic_name()).unwrap_or(&MACHINES[0])
}

pub fn resolve_machine(name: &str, machine_type: Option<MachineType>) -> &'static MachineProfile {
    if let Some(profile) = find_machine(name) {
        return profile;
    }
    generic_machine(machine_type.unwrap_or(MachineType::SemiAuto))
}

/// True for the Magnifica Evo under either spelling the UI and the rule
/// text use ("... (non-LatteCrema version)" and "... (non-LatteCrema)").
pub fn is_magnifica_evo(machine: &str) -> bool {
    machine.trim().starts_with("DeLonghi Magnifica Evo (non-LatteCrema")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_generic_entry() {
        for t in [
            MachineType::SemiAuto,
            MachineType::Automatic,
            MachineType::SuperAuto,
        ] {
            let generic = generic_machine(t);
            assert_eq!(generic.machine_type, t);
            assert_eq!(generic.name, t.generic_name());
        }
    }

    #[test]
    fn resolve_prefers_exact_name() {
        let p = resolve_machine("Rancilio Silvia", Some(MachineType::SuperAuto));
        assert_eq!(p.name, "Rancilio Silvia");
        assert_eq!(p.machine_type, MachineType::SemiAuto);
    }

    #[test]
    fn resolve_falls_back_by_type_then_semi_auto() {
        assert_eq!(
            resolve_machine("Unknown", Some(MachineType::Automatic)).name,
            "Automatic (Generic)"
        );
        assert_eq!(resolve_machine("Unknown", None).name, "Semi-Auto (Generic)");
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in MACHINES.iter().enumerate() {
            assert!(MACHINES[i + 1..].iter().all(|b| b.name != a.name), "{}", a.name);
        }
    }

    #[test]
    fn magnifica_matches_both_spellings() {
        assert!(is_magnifica_evo(MAGNIFICA_EVO));
        assert!(is_magnifica_evo("DeLonghi Magnifica Evo (non-LatteCrema)"));
        assert!(!is_magnifica_evo("DeLonghi Magnifica Evo LatteCrema"));
        assert!(!is_magnifica_evo("Miele CM6360"));
    }

    #[test]
    fn capabilities_by_type() {
        let semi = MachineType::SemiAuto.capabilities();
        assert!(!semi.auto_grind && !semi.auto_dose);
        let auto = MachineType::Automatic.capabilities();
        assert!(!auto.auto_grind && auto.auto_dose);
        assert_eq!(MachineType::SuperAuto.capabilities().grind_style, GrindStyle::Auto);
    }
}
