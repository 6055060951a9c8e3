//! The renderer seam between the engine and its output formats.

use weft_ir::Position;

use crate::state::MachineState;

/// What a point move does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveKind {
    /// First point of the stream; establishes the absolute origin.
    Origin,
    /// Non-extruding move.
    Travel,
    /// Extruding move.
    Print {
        /// Extruded volume (mm³).
        volume: f64,
        /// Length of the move (mm).
        length: f64,
    },
}

/// Motion command form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    /// Non-extruding move form (`G0`).
    Rapid,
    /// Linear move (`G1`).
    Linear,
}

/// A resolved toolhead move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    /// Move kind.
    pub kind: MoveKind,
    /// Start position; equal to `to` for the origin.
    pub from: Position,
    /// End position.
    pub to: Position,
    /// Command form.
    pub command: MoveCommand,
    /// E field value, already in E units and mode.
    pub e: Option<f64>,
    /// Feedrate (mm/min).
    pub feedrate: f64,
}

/// One step of the state-threaded visitation, as seen by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<'a> {
    /// Toolhead move.
    Move(Move),
    /// Extruder switched on or off.
    ExtruderToggled {
        /// New state.
        on: bool,
    },
    /// Extrusion mode established or changed.
    ExtrusionMode {
        /// Relative E values from here on.
        relative: bool,
    },
    /// Instruction text emitted as-is; may span several lines.
    Instruction(&'a str),
    /// Comment.
    Comment {
        /// Standalone comment text.
        text: Option<&'a str>,
        /// Note for the previously emitted line.
        end_of_previous_line: Option<&'a str>,
    },
    /// E-only move.
    StationaryExtrusion {
        /// E field value, already in E units and mode.
        e: f64,
        /// Feedrate (mm/min).
        feedrate: f64,
    },
    /// Fan speed.
    Fan {
        /// Percent, clamped to 0..=100.
        percent: f64,
    },
    /// Hotend temperature.
    Hotend {
        /// Target (°C).
        temp: f64,
        /// Blocking variant.
        wait: bool,
        /// Tool index.
        tool: Option<u32>,
    },
    /// Bed temperature.
    Bed {
        /// Target (°C).
        temp: f64,
        /// Blocking variant.
        wait: bool,
    },
    /// Labelled marker.
    Annotation {
        /// Marker text.
        label: &'a str,
        /// Marker position.
        position: Position,
    },
}

/// Consumes actions in visitation order and builds an output artifact.
///
/// `state` is the machine state after the action has been applied.
pub trait Renderer {
    /// Finished artifact.
    type Output;

    /// Handle one action.
    fn render(&mut self, action: &Action<'_>, state: &MachineState);

    /// Produce the artifact once the stream is exhausted.
    fn finish(self, state: &MachineState) -> Self::Output;
}
