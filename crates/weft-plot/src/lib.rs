#![warn(missing_docs)]

//! Plot output for weft designs.
//!
//! The plot walks the same state-threaded visitation as G-code generation
//! but records geometry instead of text: a new path starts whenever the
//! extruder switches on or off, every vertex carries a color and bead
//! size, and a bounding box covers every visited position.
//!
//! # Example
//!
//! ```
//! use weft_engine::generic_commands;
//! use weft_ir::{CrossSectionUpdate, Point, Step};
//! use weft_plot::{generate_plot, ColorType, PlotRenderer};
//!
//! let design: Vec<Step> = vec![
//!     CrossSectionUpdate::rectangle(0.4, 0.2).into(),
//!     Point::new(0.0, 0.0, 0.2).into(),
//!     Point::new(10.0, 0.0, 0.2).with_extrude(true).into(),
//! ];
//!
//! let renderer = PlotRenderer::new(ColorType::PrintSequence);
//! let plot = generate_plot(&design, &generic_commands(), Default::default(), renderer).unwrap();
//! assert_eq!(plot.output.paths.len(), 1);
//! assert_eq!(plot.output.bounding_box.rangex, 10.0);
//! ```

pub mod bounds;
pub mod color;
pub mod plot;

pub use bounds::BoundingBox;
pub use color::{ColorType, Rgb, TRAVEL_COLOR};
pub use plot::{generate_plot, PlotAnnotation, PlotData, PlotPath, PlotRenderer};
