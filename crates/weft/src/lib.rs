#![warn(missing_docs)]

//! weft — declarative toolpaths to G-code and plot data.
//!
//! A design is a nested list of points, configuration fragments and events
//! (see [`ir`]). Geometry generators in [`geom`] build the point lists. The
//! design is flattened, walked once with a single machine state, and
//! rendered either as G-code text or as plot data.
//!
//! # Example
//!
//! ```
//! use weft::geom::polygon;
//! use weft::ir::{CrossSectionUpdate, Event, Point, Step};
//! use weft::{transform_gcode, GcodeControls};
//!
//! let centre = Point::new(50.0, 50.0, 0.2);
//! let hexagon = polygon(&centre, 10.0, 0.0, 6, false).unwrap();
//!
//! let design: Vec<Step> = vec![
//!     CrossSectionUpdate::rectangle(0.4, 0.2).into(),
//!     hexagon[0].into(),
//!     Event::ExtruderToggle { on: true }.into(),
//!     hexagon.into(),
//! ];
//!
//! let result = transform_gcode(&design, &GcodeControls::default()).unwrap();
//! assert_eq!(result.output.lines().count(), 7);
//! ```

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

pub mod controls;

pub use controls::{Controls, GcodeControls, MachineControls, PlotControls};
pub use weft_engine::{Diagnostic, InitializationData, TransformError, Transformed};
pub use weft_gcode::{GcodeFlavor, Primer, PrinterProfile, ProfileError};
pub use weft_plot::{BoundingBox, ColorType, PlotData, PlotPath};

/// Design representation.
pub use weft_ir as ir;

/// Geometry generators.
pub use weft_geom as geom;

use weft_gcode::generate_gcode;
use weft_ir::{import_design, Step};
use weft_plot::{generate_plot, PlotRenderer};

/// Errors returned by the facade.
#[derive(Error, Debug)]
pub enum WeftError {
    /// The transform failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// The printer profile could not be resolved.
    #[error(transparent)]
    Profile(#[from] ProfileError),
    /// Controls could not be parsed.
    #[error("invalid controls: {0}")]
    Controls(#[from] toml::de::Error),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, WeftError>;

/// Output of [`transform`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// G-code text.
    Gcode(String),
    /// Plot data.
    Plot(PlotData),
}

/// Transform a design into G-code, wrapped in the printer's procedures.
pub fn transform_gcode(steps: &[Step], controls: &GcodeControls) -> Result<Transformed<String>> {
    let (profile, init) = controls.machine.resolve()?;
    Ok(generate_gcode(&profile.with_procedures(steps), &profile, init)?)
}

/// Transform a design into plot data.
pub fn transform_plot(steps: &[Step], controls: &PlotControls) -> Result<Transformed<PlotData>> {
    let (profile, init) = controls.machine.resolve()?;
    let renderer = PlotRenderer::new(controls.color_type).hide_travel(controls.hide_travel);
    if controls.show_procedures {
        return Ok(generate_plot(&profile.with_procedures(steps), &profile, init, renderer)?);
    }
    Ok(generate_plot(steps, &profile, init, renderer)?)
}

/// Transform a design into the output selected by `controls`.
pub fn transform(steps: &[Step], controls: &Controls) -> Result<Transformed<Rendered>> {
    match controls {
        Controls::Gcode(c) => {
            let t = transform_gcode(steps, c)?;
            Ok(Transformed {
                output: Rendered::Gcode(t.output),
                diagnostics: t.diagnostics,
            })
        }
        Controls::Plot(c) => {
            let t = transform_plot(steps, c)?;
            Ok(Transformed {
                output: Rendered::Plot(t.output),
                diagnostics: t.diagnostics,
            })
        }
    }
}

/// Transform a JSON design.
pub fn transform_json(json: &str, controls: &Controls) -> Result<Transformed<Rendered>> {
    let steps = import_design(json).map_err(TransformError::from)?;
    transform(&steps, controls)
}

/// Transform independent designs in parallel. Results keep input order.
pub fn transform_many(designs: &[Vec<Step>], controls: &Controls) -> Vec<Result<Transformed<Rendered>>> {
    debug!(designs = designs.len(), "batch transform");
    designs
        .par_iter()
        .map(|steps| transform(steps, controls))
        .collect()
}
