//! Output controls.

use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_engine::InitializationData;
use weft_gcode::{Primer, PrinterProfile};
use weft_plot::ColorType;

use crate::Result;

/// Machine selection shared by every output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineControls {
    /// Name of a built-in printer profile.
    pub printer_name: Option<String>,
    /// Inline printer profile; takes precedence over `printer_name`.
    pub printer: Option<PrinterProfile>,
    /// Settings applied before the design, on top of the printer's defaults.
    pub initialization_data: InitializationData,
    /// Primer replacing the printer's own.
    pub primer: Option<Primer>,
}

impl MachineControls {
    /// Resolve the command table and effective initialization data.
    ///
    /// Without a printer the generic command table is used, only
    /// `initialization_data` is applied, and the design is not wrapped in
    /// procedures.
    pub fn resolve(&self) -> Result<(PrinterProfile, InitializationData)> {
        let profile = match (&self.printer, &self.printer_name) {
            (Some(profile), _) => Some(profile.clone()),
            (None, Some(name)) => Some(PrinterProfile::by_name(name)?),
            (None, None) => None,
        };
        let (mut profile, init) = match profile {
            Some(profile) => {
                debug!(printer = %profile.name, "using printer profile");
                let init = profile
                    .initialization_data()
                    .merged_with(&self.initialization_data);
                (profile, init)
            }
            None => (PrinterProfile::bare(), self.initialization_data.clone()),
        };
        if let Some(primer) = self.primer {
            profile.primer = primer;
        }
        Ok((profile, init))
    }
}

/// Controls for G-code output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeControls {
    /// Machine selection.
    #[serde(flatten)]
    pub machine: MachineControls,
}

impl GcodeControls {
    /// Parse from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Controls for plot output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotControls {
    /// Vertex color mode.
    pub color_type: ColorType,
    /// Drop non-extruding paths.
    pub hide_travel: bool,
    /// Plot the printer's procedures and primer along with the design.
    pub show_procedures: bool,
    /// Machine selection.
    #[serde(flatten)]
    pub machine: MachineControls,
}

impl PlotControls {
    /// Parse from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Selects the output of [`transform`](crate::transform).
#[derive(Debug, Clone, PartialEq)]
pub enum Controls {
    /// G-code text.
    Gcode(GcodeControls),
    /// Plot data.
    Plot(PlotControls),
}

impl Default for Controls {
    fn default() -> Self {
        Controls::Gcode(GcodeControls::default())
    }
}
