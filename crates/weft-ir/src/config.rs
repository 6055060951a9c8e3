//! Partial configuration fragments.
//!
//! Every field is optional. A fragment only overwrites the fields it
//! specifies; everything else keeps its current value.

use serde::{Deserialize, Serialize};

/// Unit of the E axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrusionUnits {
    /// Length of filament fed into the extruder.
    #[default]
    Mm,
    /// Volume of material extruded.
    Mm3,
}

/// How non-extruding moves are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelFormat {
    /// `G1` with an explicit, non-advancing E field.
    #[default]
    #[serde(rename = "G1_E0")]
    G1E0,
    /// `G0` with no E field.
    #[serde(rename = "G0", alias = "none")]
    G0,
}

/// Extrusion bead cross-section model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaModel {
    /// `width × height`.
    Rectangle,
    /// Rectangle with semicircular ends of diameter `height`.
    Stadium,
    /// Round bead of `diameter`.
    Circle,
}

/// Printer speed fragment (mm/min).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterUpdate {
    /// Feedrate for extruding moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_speed: Option<f64>,
    /// Feedrate for travel moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_speed: Option<f64>,
}

impl PrinterUpdate {
    /// Fragment setting only the print speed.
    pub fn print_speed(speed: f64) -> Self {
        Self {
            print_speed: Some(speed),
            ..Default::default()
        }
    }

    /// Fragment setting only the travel speed.
    pub fn travel_speed(speed: f64) -> Self {
        Self {
            travel_speed: Some(speed),
            ..Default::default()
        }
    }
}

/// Extruder configuration fragment.
///
/// The on/off state is not part of this fragment; it is toggled with
/// [`Event::ExtruderToggle`](crate::Event::ExtruderToggle).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtruderUpdate {
    /// E-axis units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<ExtrusionUnits>,
    /// Filament diameter (mm), used for `mm` units.
    #[serde(skip_serializing_if = "Option::is_none", alias = "dia_feed")]
    pub filament_diameter: Option<f64>,
    /// Relative (`true`) or absolute (`false`) E values.
    #[serde(skip_serializing_if = "Option::is_none", alias = "relative_gcode")]
    pub relative_mode: Option<bool>,
    /// Travel move form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_format: Option<TravelFormat>,
}

impl ExtruderUpdate {
    /// Fragment selecting relative or absolute E values.
    pub fn relative(relative: bool) -> Self {
        Self {
            relative_mode: Some(relative),
            ..Default::default()
        }
    }
}

/// Cross-section fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSectionUpdate {
    /// Area model.
    #[serde(skip_serializing_if = "Option::is_none", rename = "area_model")]
    pub model: Option<AreaModel>,
    /// Bead width (mm).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Bead height (mm).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Bead diameter (mm), used by the circle model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
}

impl CrossSectionUpdate {
    /// Complete rectangular cross-section.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            model: Some(AreaModel::Rectangle),
            width: Some(width),
            height: Some(height),
            diameter: None,
        }
    }

    /// Complete stadium cross-section.
    pub fn stadium(width: f64, height: f64) -> Self {
        Self {
            model: Some(AreaModel::Stadium),
            width: Some(width),
            height: Some(height),
            diameter: None,
        }
    }

    /// Complete circular cross-section.
    pub fn circle(diameter: f64) -> Self {
        Self {
            model: Some(AreaModel::Circle),
            width: None,
            height: None,
            diameter: Some(diameter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_format_names() {
        let f: TravelFormat = serde_json::from_str(r#""G1_E0""#).unwrap();
        assert_eq!(f, TravelFormat::G1E0);
        let f: TravelFormat = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(f, TravelFormat::G0);
    }

    #[test]
    fn test_extruder_aliases() {
        let e: ExtruderUpdate =
            serde_json::from_str(r#"{"dia_feed": 2.85, "relative_gcode": true}"#).unwrap();
        assert_eq!(e.filament_diameter, Some(2.85));
        assert_eq!(e.relative_mode, Some(true));
        assert_eq!(e.units, None);
    }

    #[test]
    fn test_cross_section_partial() {
        let c: CrossSectionUpdate = serde_json::from_str(r#"{"width": 0.6}"#).unwrap();
        assert_eq!(c.model, None);
        assert_eq!(c.width, Some(0.6));
        assert_eq!(c.height, None);
    }
}
