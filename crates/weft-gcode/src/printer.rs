//! Printer profile definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use weft_engine::{CommandTable, InitializationData};
use weft_ir::{ExtrusionUnits, Step};

use crate::error::{ProfileError, Result};
use crate::flavor::GcodeFlavor;
use crate::procedure::{first_point, Primer};

/// Printer profile with machine-specific defaults and device commands.
///
/// Fields missing from a TOML profile take the values of
/// [`PrinterProfile::generic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterProfile {
    /// Profile name.
    pub name: String,
    /// G-code flavor.
    pub flavor: GcodeFlavor,
    /// Default print feedrate (mm/min).
    pub print_speed: f64,
    /// Default travel feedrate (mm/min).
    pub travel_speed: f64,
    /// Default nozzle temperature (°C).
    pub nozzle_temp: f64,
    /// Default bed temperature (°C).
    pub bed_temp: f64,
    /// Default part fan speed (%).
    pub fan_percent: f64,
    /// Nozzle diameter (mm); used as the default bead width.
    pub nozzle_diameter: f64,
    /// Default layer height (mm); used as the default bead height.
    pub layer_height: f64,
    /// Filament diameter (mm).
    pub filament_diameter: f64,
    /// Whether the firmware is driven with relative E values.
    pub relative_e: bool,
    /// Device commands overriding the flavor's table.
    pub commands: BTreeMap<String, String>,
    /// Steps run before the primer.
    pub starting_procedure: Vec<Step>,
    /// Steps run after the design.
    pub ending_procedure: Vec<Step>,
    /// Lead-in to the design's first point.
    pub primer: Primer,
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self::generic()
    }
}

impl CommandTable for PrinterProfile {
    fn resolve(&self, id: &str) -> Option<&str> {
        self.commands
            .get(id)
            .map(String::as_str)
            .or_else(|| self.flavor.command(id))
    }
}

impl PrinterProfile {
    /// Generic printer profile.
    pub fn generic() -> Self {
        Self {
            name: "generic".into(),
            flavor: GcodeFlavor::Marlin,
            print_speed: 1000.0,
            travel_speed: 8000.0,
            nozzle_temp: 210.0,
            bed_temp: 40.0,
            fan_percent: 100.0,
            nozzle_diameter: 0.4,
            layer_height: 0.2,
            filament_diameter: 1.75,
            relative_e: false,
            commands: BTreeMap::new(),
            starting_procedure: GcodeFlavor::Marlin.starting_procedure(),
            ending_procedure: GcodeFlavor::Marlin.ending_procedure(),
            primer: Primer::FrontLinesThenY,
        }
    }

    /// Generic commands and defaults with no procedures or primer.
    pub fn bare() -> Self {
        Self {
            starting_procedure: Vec::new(),
            ending_procedure: Vec::new(),
            primer: Primer::NoPrimer,
            ..Self::generic()
        }
    }

    /// Prusa i3 MK3S profile.
    pub fn prusa_i3() -> Self {
        Self {
            name: "prusa_i3".into(),
            print_speed: 1200.0,
            travel_speed: 8000.0,
            nozzle_temp: 215.0,
            bed_temp: 60.0,
            relative_e: true,
            ..Self::generic()
        }
    }

    /// Creality Ender 3 profile.
    pub fn ender_3() -> Self {
        Self {
            name: "ender_3".into(),
            print_speed: 1000.0,
            travel_speed: 6000.0,
            nozzle_temp: 200.0,
            bed_temp: 60.0,
            ..Self::generic()
        }
    }

    /// Voron 2.4 profile (Klipper).
    pub fn voron() -> Self {
        Self {
            name: "voron".into(),
            flavor: GcodeFlavor::Klipper,
            print_speed: 3000.0,
            travel_speed: 12000.0,
            nozzle_temp: 240.0,
            bed_temp: 110.0,
            relative_e: true,
            starting_procedure: GcodeFlavor::Klipper.starting_procedure(),
            ending_procedure: GcodeFlavor::Klipper.ending_procedure(),
            primer: Primer::Travel,
            ..Self::generic()
        }
    }

    /// Bambu Lab X1 Carbon profile.
    pub fn bambulab_x1() -> Self {
        Self {
            name: "bambulab_x1".into(),
            flavor: GcodeFlavor::Bambu,
            print_speed: 3000.0,
            travel_speed: 12000.0,
            nozzle_temp: 220.0,
            bed_temp: 55.0,
            relative_e: true,
            starting_procedure: GcodeFlavor::Bambu.starting_procedure(),
            ending_procedure: GcodeFlavor::Bambu.ending_procedure(),
            ..Self::generic()
        }
    }

    /// Get all built-in profiles.
    pub fn all_profiles() -> Vec<Self> {
        vec![
            Self::generic(),
            Self::prusa_i3(),
            Self::ender_3(),
            Self::voron(),
            Self::bambulab_x1(),
        ]
    }

    /// Look up a built-in profile by name.
    pub fn by_name(name: &str) -> Result<Self> {
        Self::all_profiles()
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ProfileError::UnknownPrinter(name.to_string()))
    }

    /// Parse a profile from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `steps` wrapped in the starting procedure, the primer and the ending
    /// procedure. The primer is skipped when the design has no point.
    pub fn with_procedures(&self, steps: &[Step]) -> Vec<Step> {
        let primer = first_point(steps)
            .map(|first| self.primer.steps(&first))
            .unwrap_or_default();
        vec![
            Step::Group(self.starting_procedure.clone()),
            Step::Group(primer),
            Step::Group(steps.to_vec()),
            Step::Group(self.ending_procedure.clone()),
        ]
    }

    /// Initialization data that establishes this printer's defaults.
    pub fn initialization_data(&self) -> InitializationData {
        InitializationData {
            print_speed: Some(self.print_speed),
            travel_speed: Some(self.travel_speed),
            nozzle_temp: Some(self.nozzle_temp),
            bed_temp: Some(self.bed_temp),
            fan_percent: Some(self.fan_percent),
            extrusion_width: Some(self.nozzle_diameter),
            extrusion_height: Some(self.layer_height),
            e_units: Some(ExtrusionUnits::Mm),
            relative_e: Some(self.relative_e),
            dia_feed: Some(self.filament_diameter),
            ..Default::default()
        }
    }
}
