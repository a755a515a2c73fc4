// Roster and entry-form catalog
// Loaded from config files at startup; the legacy app kept these as
// hardcoded option lists

use serde::{Deserialize, Serialize};

use crate::value_objects::Passcode;

/// One participant from `roster.yaml`. The passcode never leaves the
/// server; roster responses expose names only.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub passcode: Passcode,
}

/// Brand and volume presets for the entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub brands: Vec<String>,
    /// Liters per unit.
    #[serde(default)]
    pub volumes: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_entry_parses_passcode_as_string() {
        let entry: RosterEntry =
            serde_json::from_str(r#"{"name":"Vitoko","passcode":"85"}"#).expect("parse entry");
        assert_eq!(entry.name, "Vitoko");
        assert!(entry.passcode.matches("85"));
    }

    #[test]
    fn catalog_defaults_to_empty_lists() {
        let catalog: Catalog = serde_json::from_str("{}").expect("parse empty catalog");
        assert!(catalog.brands.is_empty());
        assert!(catalog.volumes.is_empty());
    }
}
