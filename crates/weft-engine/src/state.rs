//! Machine state threaded through a transform.
//!
//! Configuration fragments are merged field by field: a fragment only
//! touches the fields it specifies.

use std::f64::consts::PI;

use weft_ir::{AreaModel, CrossSectionUpdate, ExtruderUpdate, ExtrusionUnits, Position, PrinterUpdate, TravelFormat};

/// Printer speeds (mm/min).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterState {
    /// Feedrate for extruding moves.
    pub print_speed: f64,
    /// Feedrate for travel moves.
    pub travel_speed: f64,
}

impl Default for PrinterState {
    fn default() -> Self {
        Self {
            print_speed: 1000.0,
            travel_speed: 8000.0,
        }
    }
}

impl PrinterState {
    /// Merge a printer fragment.
    pub fn apply(&mut self, update: &PrinterUpdate) {
        if let Some(v) = update.print_speed {
            self.print_speed = v;
        }
        if let Some(v) = update.travel_speed {
            self.travel_speed = v;
        }
    }
}

/// Extruder configuration and runtime state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtruderState {
    /// E-axis units.
    pub units: ExtrusionUnits,
    /// Filament diameter (mm).
    pub filament_diameter: f64,
    /// Relative E values.
    pub relative_mode: bool,
    /// Travel move form.
    pub travel_format: TravelFormat,
    /// Whether moves currently extrude.
    pub on: bool,
    /// Running E position in E units.
    pub cumulative_e: f64,
    /// Mode last announced to the machine, if any.
    pub established_mode: Option<bool>,
}

impl Default for ExtruderState {
    fn default() -> Self {
        Self {
            units: ExtrusionUnits::Mm,
            filament_diameter: 1.75,
            relative_mode: false,
            travel_format: TravelFormat::G1E0,
            on: false,
            cumulative_e: 0.0,
            established_mode: None,
        }
    }
}

impl ExtruderState {
    /// Merge an extruder fragment.
    pub fn apply(&mut self, update: &ExtruderUpdate) {
        if let Some(v) = update.units {
            self.units = v;
        }
        if let Some(v) = update.filament_diameter {
            self.filament_diameter = v;
        }
        if let Some(v) = update.relative_mode {
            self.relative_mode = v;
        }
        if let Some(v) = update.travel_format {
            self.travel_format = v;
        }
    }

    /// Factor converting extruded volume (mm³) into E units.
    pub fn volume_to_e(&self) -> Result<f64, String> {
        match self.units {
            ExtrusionUnits::Mm3 => Ok(1.0),
            ExtrusionUnits::Mm => {
                let d = self.filament_diameter;
                if !(d.is_finite() && d > 0.0) {
                    return Err(format!("filament diameter must be positive, got {d}"));
                }
                Ok(1.0 / (PI * (d / 2.0).powi(2)))
            }
        }
    }

    /// Add `delta` E units and return the value to write on the E field:
    /// the delta in relative mode, the running total in absolute mode.
    pub fn advance(&mut self, delta: f64) -> f64 {
        self.cumulative_e += delta;
        if self.relative_mode {
            delta
        } else {
            self.cumulative_e
        }
    }

    /// E field for a non-extruding `G1` move.
    pub fn hold(&self) -> f64 {
        if self.relative_mode {
            0.0
        } else {
            self.cumulative_e
        }
    }
}

/// Active extrusion cross-section. Fields stay unset until configured.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrossSectionState {
    /// Area model.
    pub model: Option<AreaModel>,
    /// Bead width (mm).
    pub width: Option<f64>,
    /// Bead height (mm).
    pub height: Option<f64>,
    /// Bead diameter (mm).
    pub diameter: Option<f64>,
}

impl CrossSectionState {
    /// Merge a cross-section fragment.
    pub fn apply(&mut self, update: &CrossSectionUpdate) {
        if let Some(v) = update.model {
            self.model = Some(v);
        }
        if let Some(v) = update.width {
            self.width = Some(v);
        }
        if let Some(v) = update.height {
            self.height = Some(v);
        }
        if let Some(v) = update.diameter {
            self.diameter = Some(v);
        }
    }

    /// Bead area (mm²).
    pub fn area(&self) -> Result<f64, String> {
        let model = self.model.ok_or("no active cross-section")?;
        let dim = |name: &str, v: Option<f64>| -> Result<f64, String> {
            match v {
                Some(v) if v.is_finite() && v > 0.0 => Ok(v),
                Some(v) => Err(format!("{model:?} cross-section {name} must be positive, got {v}")),
                None => Err(format!("{model:?} cross-section has no {name}")),
            }
        };
        match model {
            AreaModel::Rectangle => Ok(dim("width", self.width)? * dim("height", self.height)?),
            AreaModel::Stadium => {
                let w = dim("width", self.width)?;
                let h = dim("height", self.height)?;
                Ok((w - h) * h + PI * (h / 2.0).powi(2))
            }
            AreaModel::Circle => Ok(PI * (dim("diameter", self.diameter)? / 2.0).powi(2)),
        }
    }

    /// Width and height of the bead for display, or zeros when unset.
    pub fn extent(&self) -> (f64, f64) {
        match self.model {
            Some(AreaModel::Circle) => {
                let d = self.diameter.unwrap_or(0.0);
                (d, d)
            }
            _ => (self.width.unwrap_or(0.0), self.height.unwrap_or(0.0)),
        }
    }
}

/// Complete machine state for one transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineState {
    /// Speeds.
    pub printer: PrinterState,
    /// Extruder.
    pub extruder: ExtruderState,
    /// Cross-section.
    pub cross_section: CrossSectionState,
    /// Last fan setting (%).
    pub fan_percent: Option<f64>,
    /// Last hotend target (°C).
    pub hotend_temp: Option<f64>,
    /// Last bed target (°C).
    pub bed_temp: Option<f64>,
    /// Current position; `None` until the first point.
    pub position: Option<Position>,
    /// Manual plot color set by the last point that carried one.
    pub color: Option<[f64; 3]>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fragment_keeps_unspecified_fields() {
        let mut printer = PrinterState::default();
        printer.apply(&PrinterUpdate::print_speed(1500.0));
        printer.apply(&PrinterUpdate::travel_speed(5000.0));
        assert_eq!(printer.print_speed, 1500.0);
        assert_eq!(printer.travel_speed, 5000.0);

        let mut cs = CrossSectionState::default();
        cs.apply(&CrossSectionUpdate::rectangle(0.4, 0.2));
        cs.apply(&CrossSectionUpdate {
            width: Some(0.6),
            ..Default::default()
        });
        assert_eq!(cs.height, Some(0.2));
        assert_relative_eq!(cs.area().unwrap(), 0.12, epsilon = 1e-12);
    }

    #[test]
    fn test_area_models() {
        let mut cs = CrossSectionState::default();
        assert_eq!(cs.area(), Err("no active cross-section".to_string()));
        cs.apply(&CrossSectionUpdate::circle(0.5));
        assert_relative_eq!(cs.area().unwrap(), PI * 0.0625);
        assert_eq!(cs.extent(), (0.5, 0.5));
        cs.apply(&CrossSectionUpdate::stadium(0.5, 0.2));
        assert_relative_eq!(cs.area().unwrap(), 0.3 * 0.2 + PI * 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_incomplete_rectangle_is_invalid() {
        let mut cs = CrossSectionState::default();
        cs.apply(&CrossSectionUpdate {
            model: Some(AreaModel::Rectangle),
            width: Some(0.4),
            ..Default::default()
        });
        assert!(cs.area().unwrap_err().contains("height"));
    }

    #[test]
    fn test_volume_to_e() {
        let mut ex = ExtruderState::default();
        assert_relative_eq!(ex.volume_to_e().unwrap(), 1.0 / (PI * 0.875 * 0.875));
        ex.apply(&ExtruderUpdate {
            units: Some(ExtrusionUnits::Mm3),
            ..Default::default()
        });
        assert_eq!(ex.volume_to_e(), Ok(1.0));
    }

    #[test]
    fn test_advance_relative_and_absolute() {
        let mut ex = ExtruderState::default();
        assert_eq!(ex.advance(0.5), 0.5);
        assert_eq!(ex.advance(0.25), 0.75);
        assert_eq!(ex.hold(), 0.75);
        ex.relative_mode = true;
        assert_eq!(ex.advance(0.25), 0.25);
        assert_eq!(ex.hold(), 0.0);
        assert_eq!(ex.cumulative_e, 1.0);
    }
}
