//! Initialization data: machine settings applied before the design runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use weft_ir::{AreaModel, CrossSectionUpdate, Element, Event, ExtruderUpdate, ExtrusionUnits, PrinterUpdate, TravelFormat};

use crate::error::{Result, TransformError};

/// Recognized initialization keys. Every field is optional.
///
/// Keys that are not recognized are kept in `unrecognized` and reported as
/// diagnostics; they never fail a transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitializationData {
    /// Print feedrate (mm/min).
    pub print_speed: Option<f64>,
    /// Travel feedrate (mm/min).
    pub travel_speed: Option<f64>,
    /// Hotend temperature (°C).
    pub nozzle_temp: Option<f64>,
    /// Bed temperature (°C).
    pub bed_temp: Option<f64>,
    /// Part fan speed (%).
    pub fan_percent: Option<f64>,
    /// Bead width (mm).
    pub extrusion_width: Option<f64>,
    /// Bead height (mm).
    pub extrusion_height: Option<f64>,
    /// E-axis units.
    pub e_units: Option<ExtrusionUnits>,
    /// Relative E values.
    pub relative_e: Option<bool>,
    /// Filament diameter (mm).
    pub dia_feed: Option<f64>,
    /// Extruder state at the start of the design.
    pub extruder_on: Option<bool>,
    /// Travel move form.
    pub travel_format: Option<TravelFormat>,
    /// Cross-section model; rectangle when only width/height are given.
    pub area_model: Option<AreaModel>,
    /// Keys that were not recognized.
    #[serde(flatten, skip_serializing)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

impl InitializationData {
    /// Parse from a JSON object.
    pub fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| TransformError::Initialization(e.to_string()))
    }

    /// Parse from a TOML table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TransformError::Initialization(e.to_string()))
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merged_with(&self, overrides: &InitializationData) -> Self {
        let mut unrecognized = self.unrecognized.clone();
        unrecognized.extend(overrides.unrecognized.clone());
        Self {
            print_speed: overrides.print_speed.or(self.print_speed),
            travel_speed: overrides.travel_speed.or(self.travel_speed),
            nozzle_temp: overrides.nozzle_temp.or(self.nozzle_temp),
            bed_temp: overrides.bed_temp.or(self.bed_temp),
            fan_percent: overrides.fan_percent.or(self.fan_percent),
            extrusion_width: overrides.extrusion_width.or(self.extrusion_width),
            extrusion_height: overrides.extrusion_height.or(self.extrusion_height),
            e_units: overrides.e_units.or(self.e_units),
            relative_e: overrides.relative_e.or(self.relative_e),
            dia_feed: overrides.dia_feed.or(self.dia_feed),
            extruder_on: overrides.extruder_on.or(self.extruder_on),
            travel_format: overrides.travel_format.or(self.travel_format),
            area_model: overrides.area_model.or(self.area_model),
            unrecognized,
        }
    }

    /// Elements that establish this data, run ahead of the design.
    ///
    /// Order: printer, extruder, cross-section, bed, hotend, bed wait,
    /// hotend wait, fan, extruder toggle.
    pub fn prologue(&self) -> Vec<Element> {
        let mut out = Vec::new();

        let printer = PrinterUpdate {
            print_speed: self.print_speed,
            travel_speed: self.travel_speed,
        };
        if printer != PrinterUpdate::default() {
            out.push(Element::Printer(printer));
        }

        let extruder = ExtruderUpdate {
            units: self.e_units,
            filament_diameter: self.dia_feed,
            relative_mode: self.relative_e,
            travel_format: self.travel_format,
        };
        if extruder != ExtruderUpdate::default() {
            out.push(Element::Extruder(extruder));
        }

        let has_dims = self.extrusion_width.is_some() || self.extrusion_height.is_some();
        if has_dims || self.area_model.is_some() {
            out.push(Element::CrossSection(CrossSectionUpdate {
                model: self.area_model.or(Some(AreaModel::Rectangle)),
                width: self.extrusion_width,
                height: self.extrusion_height,
                diameter: None,
            }));
        }

        if let Some(temp) = self.bed_temp {
            out.push(Element::Event(Event::BedSetting { temp, wait: false }));
        }
        if let Some(temp) = self.nozzle_temp {
            out.push(Element::Event(Event::HotendSetting {
                temp,
                wait: false,
                tool: None,
            }));
        }
        if let Some(temp) = self.bed_temp {
            out.push(Element::Event(Event::BedSetting { temp, wait: true }));
        }
        if let Some(temp) = self.nozzle_temp {
            out.push(Element::Event(Event::HotendSetting {
                temp,
                wait: true,
                tool: None,
            }));
        }
        if let Some(percent) = self.fan_percent {
            out.push(Element::Event(Event::FanSetting { percent }));
        }
        if let Some(on) = self.extruder_on {
            out.push(Element::Event(Event::ExtruderToggle { on }));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_collects_unknown_keys() {
        let map = json!({"print_speed": 2000, "bed_temp": 80, "primer": "travel"});
        let serde_json::Value::Object(map) = map else {
            unreachable!()
        };
        let data = InitializationData::from_json_map(map).unwrap();
        assert_eq!(data.print_speed, Some(2000.0));
        assert_eq!(data.bed_temp, Some(80.0));
        assert!(data.unrecognized.contains_key("primer"));
    }

    #[test]
    fn test_from_toml() {
        let data = InitializationData::from_toml_str(
            "relative_e = true\ne_units = \"mm3\"\ntravel_format = \"G0\"\n",
        )
        .unwrap();
        assert_eq!(data.relative_e, Some(true));
        assert_eq!(data.e_units, Some(ExtrusionUnits::Mm3));
        assert_eq!(data.travel_format, Some(TravelFormat::G0));
    }

    #[test]
    fn test_prologue_order() {
        let data = InitializationData {
            print_speed: Some(2000.0),
            nozzle_temp: Some(210.0),
            bed_temp: Some(60.0),
            fan_percent: Some(40.0),
            extrusion_width: Some(0.4),
            extrusion_height: Some(0.2),
            ..Default::default()
        };
        let kinds: Vec<_> = data.prologue().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            [
                "Printer",
                "CrossSection",
                "BedSetting",
                "HotendSetting",
                "BedSetting",
                "HotendSetting",
                "FanSetting"
            ]
        );
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = InitializationData {
            print_speed: Some(1000.0),
            bed_temp: Some(60.0),
            ..Default::default()
        };
        let user = InitializationData {
            print_speed: Some(2400.0),
            ..Default::default()
        };
        let merged = base.merged_with(&user);
        assert_eq!(merged.print_speed, Some(2400.0));
        assert_eq!(merged.bed_temp, Some(60.0));
    }
}
