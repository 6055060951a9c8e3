//! G-code flavor definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// G-code flavor (dialect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GcodeFlavor {
    /// Marlin firmware (Ender, Prusa).
    #[default]
    Marlin,
    /// Klipper firmware.
    Klipper,
    /// Bambu Lab printers.
    Bambu,
    /// RepRap firmware.
    RepRap,
}

impl GcodeFlavor {
    /// Instruction text for a device command id on this flavor.
    pub fn command(&self, id: &str) -> Option<&'static str> {
        let text = match (self, id) {
            (_, "home") => "G28",
            (_, "absolute_coords") => "G90",
            (_, "relative_coords") => "G91",
            (_, "units_mm") => "G21",
            (GcodeFlavor::Klipper, "pause") => "PAUSE",
            (GcodeFlavor::Bambu, "pause") => "M400 U1",
            (GcodeFlavor::RepRap, "pause") => "M226",
            (_, "pause") => "M601",
            (_, "retract") => "G10",
            (_, "unretract") => "G11",
            _ => return None,
        };
        Some(text)
    }

    /// Full device-command table for this flavor.
    pub fn commands(&self) -> BTreeMap<String, String> {
        [
            "home",
            "absolute_coords",
            "relative_coords",
            "units_mm",
            "pause",
            "retract",
            "unretract",
        ]
        .into_iter()
        .filter_map(|id| self.command(id).map(|text| (id.to_string(), text.to_string())))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retract_is_firmware_retraction() {
        for flavor in [
            GcodeFlavor::Marlin,
            GcodeFlavor::Klipper,
            GcodeFlavor::Bambu,
            GcodeFlavor::RepRap,
        ] {
            assert_eq!(flavor.command("retract"), Some("G10"));
            assert_eq!(flavor.command("unretract"), Some("G11"));
        }
    }

    #[test]
    fn test_pause_differs_per_flavor() {
        assert_eq!(GcodeFlavor::Marlin.command("pause"), Some("M601"));
        assert_eq!(GcodeFlavor::Klipper.command("pause"), Some("PAUSE"));
        assert_eq!(GcodeFlavor::Klipper.commands().len(), 7);
        assert_eq!(GcodeFlavor::Marlin.command("purge"), None);
    }
}
