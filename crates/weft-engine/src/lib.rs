#![warn(missing_docs)]

//! State-threading transform engine for weft designs.
//!
//! The engine flattens a design, walks it once with a single
//! [`MachineState`], and hands every resulting [`Action`] to a
//! [`Renderer`]. Renderers live in their own crates (`weft-gcode`,
//! `weft-plot`); the engine knows nothing about output formats.
//!
//! Device commands such as `retract` are resolved through an injected
//! [`CommandTable`], so one engine serves many machine profiles.
//!
//! # Example
//!
//! ```
//! use weft_engine::{generic_commands, Action, Engine, MachineState, Renderer};
//! use weft_ir::{CrossSectionUpdate, Event, Point, Step};
//!
//! struct CountMoves(usize);
//!
//! impl Renderer for CountMoves {
//!     type Output = usize;
//!     fn render(&mut self, action: &Action<'_>, _state: &MachineState) {
//!         if matches!(action, Action::Move(_)) {
//!             self.0 += 1;
//!         }
//!     }
//!     fn finish(self, _state: &MachineState) -> usize {
//!         self.0
//!     }
//! }
//!
//! let design: Vec<Step> = vec![
//!     CrossSectionUpdate::rectangle(0.45, 0.2).into(),
//!     Point::new(0.0, 0.0, 0.2).into(),
//!     Event::ExtruderToggle { on: true }.into(),
//!     Point::new(10.0, 0.0, 0.2).into(),
//! ];
//!
//! let table = generic_commands();
//! let out = Engine::new(&table).run(&design, CountMoves(0)).unwrap();
//! assert_eq!(out.output, 2);
//! ```

pub mod commands;
pub mod engine;
pub mod error;
pub mod init;
pub mod renderer;
pub mod state;

pub use commands::{generic_commands, CommandTable};
pub use engine::{Engine, Transformed};
pub use error::{Diagnostic, Result, TransformError};
pub use init::InitializationData;
pub use renderer::{Action, Move, MoveCommand, MoveKind, Renderer};
pub use state::{CrossSectionState, ExtruderState, MachineState, PrinterState};
