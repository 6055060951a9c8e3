#![warn(missing_docs)]

//! G-code generation for weft designs.
//!
//! [`GcodeRenderer`] turns the engine's action stream into one instruction
//! per line. Printer profiles supply default settings, the device-command
//! table for each G-code flavor, and the starting and ending procedures and
//! primer that wrap a design.
//!
//! # Example
//!
//! ```
//! use weft_gcode::{generate_gcode, PrinterProfile};
//! use weft_ir::{CrossSectionUpdate, Event, Point, Step};
//!
//! let design: Vec<Step> = vec![
//!     CrossSectionUpdate::rectangle(0.4, 0.2).into(),
//!     Point::new(0.0, 0.0, 0.2).into(),
//!     Event::ExtruderToggle { on: true }.into(),
//!     Point::new(20.0, 0.0, 0.2).into(),
//!     Event::retract().into(),
//! ];
//!
//! let profile = PrinterProfile::generic();
//! let result = generate_gcode(&design, &profile, Default::default()).unwrap();
//! assert!(result.output.ends_with("G10"));
//! ```

pub mod error;
pub mod flavor;
pub mod format;
pub mod gcode;
pub mod printer;
pub mod procedure;

pub use error::{ProfileError, Result};
pub use flavor::GcodeFlavor;
pub use format::{format_coord, format_feedrate, format_value};
pub use gcode::{generate_gcode, GcodeRenderer};
pub use printer::PrinterProfile;
pub use procedure::Primer;
