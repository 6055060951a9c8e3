//! Device-command lookup.

use std::collections::{BTreeMap, HashMap};

/// Resolves a device-command id (e.g. `retract`) to instruction text.
pub trait CommandTable {
    /// Instruction text for `id`, or `None` if this machine has no mapping.
    fn resolve(&self, id: &str) -> Option<&str>;
}

impl CommandTable for BTreeMap<String, String> {
    fn resolve(&self, id: &str) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

impl CommandTable for HashMap<String, String> {
    fn resolve(&self, id: &str) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

/// Command table of a generic RepRap-style firmware.
pub fn generic_commands() -> BTreeMap<String, String> {
    [
        ("home", "G28"),
        ("absolute_coords", "G90"),
        ("relative_coords", "G91"),
        ("units_mm", "G21"),
        ("pause", "M601"),
        ("retract", "G10"),
        ("unretract", "G11"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_commands() {
        let table = generic_commands();
        assert_eq!(table.resolve("retract"), Some("G10"));
        assert_eq!(table.resolve("home"), Some("G28"));
        assert_eq!(table.resolve("purge"), None);
    }

    #[test]
    fn test_hashmap_table() {
        let mut table = HashMap::new();
        table.insert("retract".to_string(), "G1 E-0.8 F2400".to_string());
        assert_eq!(table.resolve("retract"), Some("G1 E-0.8 F2400"));
    }
}
