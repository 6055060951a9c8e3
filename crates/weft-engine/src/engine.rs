//! The state-threading transform loop.

use tracing::{debug, warn};
use weft_ir::{flatten, import_design, Element, Event, Point, Position, Step, TravelFormat};

use crate::commands::CommandTable;
use crate::error::{Diagnostic, Result, TransformError};
use crate::init::InitializationData;
use crate::renderer::{Action, Move, MoveCommand, MoveKind, Renderer};
use crate::state::MachineState;

/// Output of a successful transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed<T> {
    /// The rendered artifact.
    pub output: T,
    /// Non-fatal problems, in stream order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks a design, threading one [`MachineState`] through it, and feeds the
/// resulting actions to a [`Renderer`].
///
/// An engine holds no per-run state; every `run*` call starts from defaults.
pub struct Engine<'a> {
    commands: &'a dyn CommandTable,
    init: InitializationData,
}

struct Walk<'r, R> {
    state: MachineState,
    renderer: &'r mut R,
    diagnostics: Vec<Diagnostic>,
}

impl<R: Renderer> Walk<'_, R> {
    fn emit(&mut self, action: Action<'_>) {
        self.renderer.render(&action, &self.state);
    }

    fn diagnose(&mut self, index: usize, kind: &str, message: String) {
        warn!(index, kind, "{message}");
        self.diagnostics.push(Diagnostic {
            index,
            kind: kind.to_string(),
            message,
        });
    }

    fn set_extruder(&mut self, on: bool) {
        if self.state.extruder.on != on {
            self.state.extruder.on = on;
            self.emit(Action::ExtruderToggled { on });
        }
    }

    /// Announce the extrusion mode if it differs from the one last announced.
    /// Entering absolute mode resets the E position.
    fn establish_mode(&mut self) {
        let relative = self.state.extruder.relative_mode;
        if self.state.extruder.established_mode == Some(relative) {
            return;
        }
        self.state.extruder.established_mode = Some(relative);
        if !relative {
            self.state.extruder.cumulative_e = 0.0;
        }
        self.emit(Action::ExtrusionMode { relative });
    }
}

impl<'a> Engine<'a> {
    /// Create an engine resolving device commands through `commands`.
    pub fn new(commands: &'a dyn CommandTable) -> Self {
        Self {
            commands,
            init: InitializationData::default(),
        }
    }

    /// Seed every run with `init` before the design is processed.
    pub fn with_initialization(mut self, init: InitializationData) -> Self {
        self.init = init;
        self
    }

    /// Transform a (possibly nested) design.
    pub fn run<R: Renderer>(&self, steps: &[Step], renderer: R) -> Result<Transformed<R::Output>> {
        self.run_elements(&flatten(steps), renderer)
    }

    /// Transform a design given as JSON.
    pub fn run_json<R: Renderer>(&self, json: &str, renderer: R) -> Result<Transformed<R::Output>> {
        let steps = import_design(json)?;
        self.run(&steps, renderer)
    }

    /// Transform an already flattened element stream.
    ///
    /// Diagnostic and error indices refer to positions in `elements`.
    /// Initialization runs first and reports at index 0.
    pub fn run_elements<R: Renderer>(
        &self,
        elements: &[Element],
        mut renderer: R,
    ) -> Result<Transformed<R::Output>> {
        let mut walk = Walk {
            state: MachineState::default(),
            renderer: &mut renderer,
            diagnostics: Vec::new(),
        };

        for key in self.init.unrecognized.keys() {
            walk.diagnose(0, "InitializationData", format!("unrecognized key '{key}' ignored"));
        }
        for element in self.init.prologue() {
            self.visit(0, &element, &mut walk)?;
        }
        for (index, element) in elements.iter().enumerate() {
            self.visit(index, element, &mut walk)?;
        }

        let Walk {
            state, diagnostics, ..
        } = walk;
        debug!(
            elements = elements.len(),
            diagnostics = diagnostics.len(),
            cumulative_e = state.extruder.cumulative_e,
            "transform finished"
        );
        Ok(Transformed {
            output: renderer.finish(&state),
            diagnostics,
        })
    }

    fn visit<R: Renderer>(&self, index: usize, element: &Element, walk: &mut Walk<'_, R>) -> Result<()> {
        match element {
            Element::Point(point) => self.visit_point(index, point, walk),
            Element::Printer(update) => {
                walk.state.printer.apply(update);
                Ok(())
            }
            Element::Extruder(update) => {
                walk.state.extruder.apply(update);
                if update.relative_mode.is_some() {
                    walk.establish_mode();
                }
                Ok(())
            }
            Element::CrossSection(update) => {
                walk.state.cross_section.apply(update);
                Ok(())
            }
            Element::Event(event) => self.visit_event(index, event, walk),
        }
    }

    fn visit_point<R: Renderer>(&self, index: usize, point: &Point, walk: &mut Walk<'_, R>) -> Result<()> {
        if let Some(on) = point.extrude {
            walk.set_extruder(on);
        }
        if point.color.is_some() {
            walk.state.color = point.color;
        }
        if let Some(speed) = point.speed {
            if !speed.is_finite() || speed <= 0.0 {
                walk.diagnose(index, "Point", format!("speed {speed} ignored"));
            } else if walk.state.extruder.on && walk.state.position.is_some() {
                walk.state.printer.print_speed = speed;
            } else {
                walk.state.printer.travel_speed = speed;
            }
        }

        let Some(from) = walk.state.position else {
            if !point.is_fully_defined() {
                walk.diagnose(
                    index,
                    "Point",
                    "first point has unspecified axes; using 0".to_string(),
                );
            }
            let to = point.resolve(Position::default());
            walk.state.position = Some(to);
            let (command, _) = travel_form(walk.state.extruder.travel_format);
            let feedrate = walk.state.printer.travel_speed;
            walk.emit(Action::Move(Move {
                kind: MoveKind::Origin,
                from: to,
                to,
                command,
                e: None,
                feedrate,
            }));
            return Ok(());
        };

        let to = point.resolve(from);
        walk.state.position = Some(to);
        if to == from {
            return Ok(());
        }

        let extruder = &mut walk.state.extruder;
        let mv = if extruder.on {
            let length = from.distance_to(&to);
            let config_error = |reason: String| TransformError::Configuration {
                index,
                kind: "Point".to_string(),
                reason,
            };
            let area = walk.state.cross_section.area().map_err(config_error)?;
            let factor = extruder.volume_to_e().map_err(config_error)?;
            let volume = area * length;
            Move {
                kind: MoveKind::Print { volume, length },
                from,
                to,
                command: MoveCommand::Linear,
                e: Some(extruder.advance(volume * factor)),
                feedrate: walk.state.printer.print_speed,
            }
        } else {
            let (command, holds_e) = travel_form(extruder.travel_format);
            Move {
                kind: MoveKind::Travel,
                from,
                to,
                command,
                e: holds_e.then(|| extruder.hold()),
                feedrate: walk.state.printer.travel_speed,
            }
        };
        walk.emit(Action::Move(mv));
        Ok(())
    }

    fn visit_event<R: Renderer>(&self, index: usize, event: &Event, walk: &mut Walk<'_, R>) -> Result<()> {
        match event {
            Event::ExtruderToggle { on } => walk.set_extruder(*on),
            Event::DeviceCommand { id } => match self.commands.resolve(id) {
                Some(text) => walk.emit(Action::Instruction(text)),
                None => walk.diagnose(
                    index,
                    event.kind(),
                    format!("no instruction mapped for device command '{id}'"),
                ),
            },
            Event::RawInstruction { text } => walk.emit(Action::Instruction(text)),
            Event::Comment {
                text,
                end_of_previous_line,
            } => walk.emit(Action::Comment {
                text: text.as_deref(),
                end_of_previous_line: end_of_previous_line.as_deref(),
            }),
            Event::StationaryExtrusion { volume, speed } => {
                let factor = walk
                    .state
                    .extruder
                    .volume_to_e()
                    .map_err(|reason| TransformError::Configuration {
                        index,
                        kind: event.kind().to_string(),
                        reason,
                    })?;
                let e = walk.state.extruder.advance(volume * factor);
                walk.emit(Action::StationaryExtrusion {
                    e,
                    feedrate: *speed,
                });
            }
            Event::FanSetting { percent } if !percent.is_finite() => walk.diagnose(
                index,
                event.kind(),
                format!("fan speed {percent} ignored"),
            ),
            Event::FanSetting { percent } => {
                let percent = percent.clamp(0.0, 100.0);
                walk.state.fan_percent = Some(percent);
                walk.emit(Action::Fan { percent });
            }
            Event::HotendSetting { temp, wait, tool } => {
                walk.state.hotend_temp = Some(*temp);
                walk.emit(Action::Hotend {
                    temp: *temp,
                    wait: *wait,
                    tool: *tool,
                });
            }
            Event::BedSetting { temp, wait } => {
                walk.state.bed_temp = Some(*temp);
                walk.emit(Action::Bed {
                    temp: *temp,
                    wait: *wait,
                });
            }
            Event::Annotation { label, point } => {
                let current = walk.state.position;
                let position = match (point, current) {
                    (Some(p), _) => Some(p.resolve(current.unwrap_or_default())),
                    (None, current) => current,
                };
                match position {
                    Some(position) => walk.emit(Action::Annotation {
                        label: label.as_str(),
                        position,
                    }),
                    None => walk.diagnose(
                        index,
                        event.kind(),
                        format!("annotation '{label}' has no position"),
                    ),
                }
            }
        }
        Ok(())
    }
}

/// Command form of a travel move and whether it carries an E field.
fn travel_form(format: TravelFormat) -> (MoveCommand, bool) {
    match format {
        TravelFormat::G1E0 => (MoveCommand::Linear, true),
        TravelFormat::G0 => (MoveCommand::Rapid, false),
    }
}
