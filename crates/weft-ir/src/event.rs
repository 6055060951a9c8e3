//! State-change events.

use serde::{Deserialize, Serialize};

use crate::Point;

/// An event in a design.
///
/// Events change machine state or inject instructions at their position in
/// the stream. They never move the toolhead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    /// Switch extrusion on or off.
    ExtruderToggle {
        /// New extruder state.
        on: bool,
    },
    /// Named device command, resolved through the printer's command table.
    DeviceCommand {
        /// Command id, e.g. `retract`.
        id: String,
    },
    /// Instruction text emitted verbatim.
    RawInstruction {
        /// One or more lines of instruction text.
        text: String,
    },
    /// Comment line and/or a note appended to the previous line.
    Comment {
        /// Text of a standalone `; ...` line.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Text appended to the previously emitted line.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_of_previous_line: Option<String>,
    },
    /// Extrude material without moving.
    StationaryExtrusion {
        /// Volume to extrude (mm³).
        volume: f64,
        /// Feedrate of the E-only move (mm/min).
        speed: f64,
    },
    /// Part cooling fan speed.
    FanSetting {
        /// Fan speed in percent.
        percent: f64,
    },
    /// Hotend temperature.
    HotendSetting {
        /// Target temperature (°C).
        temp: f64,
        /// Block until the temperature is reached.
        #[serde(default)]
        wait: bool,
        /// Tool index for multi-hotend machines.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool: Option<u32>,
    },
    /// Heated bed temperature.
    BedSetting {
        /// Target temperature (°C).
        temp: f64,
        /// Block until the temperature is reached.
        #[serde(default)]
        wait: bool,
    },
    /// Labelled marker for the plot output.
    Annotation {
        /// Marker text.
        label: String,
        /// Position of the marker; defaults to the current position.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        point: Option<Point>,
    },
}

impl Event {
    /// Variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ExtruderToggle { .. } => "ExtruderToggle",
            Event::DeviceCommand { .. } => "DeviceCommand",
            Event::RawInstruction { .. } => "RawInstruction",
            Event::Comment { .. } => "Comment",
            Event::StationaryExtrusion { .. } => "StationaryExtrusion",
            Event::FanSetting { .. } => "FanSetting",
            Event::HotendSetting { .. } => "HotendSetting",
            Event::BedSetting { .. } => "BedSetting",
            Event::Annotation { .. } => "Annotation",
        }
    }

    /// Shorthand for a retract device command.
    pub fn retract() -> Self {
        Event::DeviceCommand { id: "retract".into() }
    }

    /// Shorthand for an unretract device command.
    pub fn unretract() -> Self {
        Event::DeviceCommand {
            id: "unretract".into(),
        }
    }

    /// Shorthand for a raw instruction.
    pub fn raw(text: impl Into<String>) -> Self {
        Event::RawInstruction { text: text.into() }
    }
}
