#![warn(missing_docs)]

//! Toolpath design representation for weft.
//!
//! A design is an ordered, arbitrarily nested list of [`Step`]s. Leaves are
//! [`Element`]s: points, partial configuration fragments, and events.
//! Before any stateful processing the nesting is removed with [`flatten`],
//! which keeps depth-first order.
//!
//! The IR is purely declarative. Machine state, extrusion amounts, and
//! rendering all live in the engine crates.
//!
//! # Example
//!
//! ```
//! use weft_ir::{flatten, CrossSectionUpdate, Event, Point, Step};
//!
//! let design: Vec<Step> = vec![
//!     CrossSectionUpdate::rectangle(0.45, 0.2).into(),
//!     Point::new(0.0, 0.0, 0.2).into(),
//!     Event::ExtruderToggle { on: true }.into(),
//!     vec![Point::new(10.0, 0.0, 0.2), Point::new(10.0, 10.0, 0.2)].into(),
//! ];
//!
//! assert_eq!(flatten(&design).len(), 5);
//! ```

pub mod config;
pub mod design;
pub mod error;
pub mod event;
pub mod step;

pub use config::{AreaModel, CrossSectionUpdate, ExtruderUpdate, ExtrusionUnits, PrinterUpdate, TravelFormat};
pub use design::{export_design, import_design};
pub use error::{DesignError, Result};
pub use event::Event;
pub use step::{flatten, Element, Step};

use serde::{Deserialize, Serialize};

/// A target position in a design.
///
/// Each axis may be left unspecified, meaning "keep the previous value".
/// `extrude` is a shorthand: when set, the extruder is switched to that
/// state before moving to the point. `speed` replaces the current print or
/// travel speed (whichever this move uses) from this move on. `color` sets
/// the plot color used in manual color mode, also from this move on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    /// X coordinate (mm).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Y coordinate (mm).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Z coordinate (mm).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Shorthand extruder state for this move.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrude: Option<bool>,
    /// Feedrate override (mm/min).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Manual plot color, RGB in 0..=1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<[f64; 3]>,
}

impl Point {
    /// A point with all three axes specified.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            ..Default::default()
        }
    }

    /// Set the X coordinate.
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Set the Y coordinate.
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Set the Z coordinate.
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Attach the extrude shorthand.
    pub fn with_extrude(mut self, on: bool) -> Self {
        self.extrude = Some(on);
        self
    }

    /// Override the feedrate from this move on.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Set the manual plot color.
    pub fn with_color(mut self, color: [f64; 3]) -> Self {
        self.color = Some(color);
        self
    }

    /// Whether all three axes are specified.
    pub fn is_fully_defined(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.z.is_some()
    }

    /// Resolve unspecified axes against a previous position.
    pub fn resolve(&self, previous: Position) -> Position {
        Position {
            x: self.x.unwrap_or(previous.x),
            y: self.y.unwrap_or(previous.y),
            z: self.z.unwrap_or(previous.z),
        }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Point::new(p.x, p.y, p.z)
    }
}

/// A fully resolved machine position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
    /// Z coordinate (mm).
    pub z: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
