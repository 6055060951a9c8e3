//! Instruction emitter.

use weft_engine::{
    Action, CommandTable, Engine, InitializationData, MachineState, Move, MoveCommand, MoveKind,
    Renderer, Transformed,
};
use weft_ir::Step;

use crate::format::{format_feedrate, format_value};

/// Renders actions as G-code lines.
///
/// Axis fields are written only when their formatted value differs from
/// the last value written for that axis.
#[derive(Debug, Clone, Default)]
pub struct GcodeRenderer {
    lines: Vec<String>,
    last_axes: [Option<String>; 3],
}

impl GcodeRenderer {
    /// Create an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    fn motion(&mut self, mv: &Move) {
        let command = match mv.command {
            MoveCommand::Rapid => "G0",
            MoveCommand::Linear => "G1",
        };
        let values = [mv.to.x, mv.to.y, mv.to.z];
        let mut line = String::from(command);
        let mut moved = false;
        for (i, axis) in ['X', 'Y', 'Z'].into_iter().enumerate() {
            let text = format_value(values[i]);
            let changed = self.last_axes[i].as_deref() != Some(text.as_str());
            if changed || mv.kind == MoveKind::Origin {
                line.push(' ');
                line.push(axis);
                line.push_str(&text);
                self.last_axes[i] = Some(text);
                moved = true;
            }
        }
        // below the written precision
        if !moved {
            return;
        }
        if let Some(e) = mv.e {
            line.push_str(" E");
            line.push_str(&format_value(e));
        }
        line.push_str(" F");
        line.push_str(&format_feedrate(mv.feedrate));
        self.push(line);
    }
}

impl Renderer for GcodeRenderer {
    type Output = String;

    fn render(&mut self, action: &Action<'_>, _state: &MachineState) {
        match action {
            Action::Move(mv) => self.motion(mv),
            Action::ExtruderToggled { .. } | Action::Annotation { .. } => {}
            Action::ExtrusionMode { relative: true } => self.push("M83".into()),
            Action::ExtrusionMode { relative: false } => {
                self.push("M82".into());
                self.push("G92 E0".into());
            }
            Action::Instruction(text) => {
                for line in text.lines().filter(|l| !l.trim().is_empty()) {
                    self.push(line.to_string());
                }
            }
            Action::Comment {
                text,
                end_of_previous_line,
            } => {
                if let Some(note) = end_of_previous_line {
                    match self.lines.last_mut() {
                        Some(last) => {
                            last.push_str(" ; ");
                            last.push_str(note);
                        }
                        None => self.push(format!("; {note}")),
                    }
                }
                if let Some(text) = text {
                    self.push(format!("; {text}"));
                }
            }
            Action::StationaryExtrusion { e, feedrate } => {
                self.push(format!("G1 E{} F{}", format_value(*e), format_feedrate(*feedrate)));
            }
            Action::Fan { percent } => {
                let pwm = (percent * 255.0 / 100.0).round();
                if pwm <= 0.0 {
                    self.push("M107".into());
                } else {
                    self.push(format!("M106 S{pwm}"));
                }
            }
            Action::Hotend { temp, wait, tool } => {
                let code = if *wait { "M109" } else { "M104" };
                let tool = tool.map(|t| format!(" T{t}")).unwrap_or_default();
                self.push(format!("{code}{tool} S{}", format_value(*temp)));
            }
            Action::Bed { temp, wait } => {
                let code = if *wait { "M190" } else { "M140" };
                self.push(format!("{code} S{}", format_value(*temp)));
            }
        }
    }

    fn finish(self, _state: &MachineState) -> String {
        self.lines.join("\n")
    }
}

/// Transform a design into G-code text.
pub fn generate_gcode(
    steps: &[Step],
    commands: &dyn CommandTable,
    init: InitializationData,
) -> weft_engine::Result<Transformed<String>> {
    Engine::new(commands)
        .with_initialization(init)
        .run(steps, GcodeRenderer::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrinterProfile;
    use weft_engine::{generic_commands, TransformError};
    use weft_ir::{CrossSectionUpdate, Event, ExtruderUpdate, ExtrusionUnits, Point, TravelFormat};

    fn gcode(steps: &[Step]) -> String {
        generate_gcode(steps, &generic_commands(), InitializationData::default())
            .unwrap()
            .output
    }

    fn mm3() -> Step {
        ExtruderUpdate {
            units: Some(ExtrusionUnits::Mm3),
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn test_coordinate_suppression() {
        let out = gcode(&[
            CrossSectionUpdate::rectangle(0.45, 0.2).into(),
            mm3(),
            Point::new(0.0, 0.0, 0.2).into(),
            Event::ExtruderToggle { on: true }.into(),
            Point::new(10.0, 0.0, 0.2).into(),
        ]);
        assert_eq!(out, "G1 X0 Y0 Z0.2 F8000\nG1 X10 E0.9 F1000");
    }

    #[test]
    fn test_absolute_e_accumulates() {
        let out = gcode(&[
            CrossSectionUpdate::rectangle(0.45, 0.2).into(),
            mm3(),
            Point::new(0.0, 0.0, 0.2).into(),
            Event::ExtruderToggle { on: true }.into(),
            Point::new(10.0, 0.0, 0.2).into(),
            Point::new(10.0, 5.0, 0.2).into(),
        ]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[1], "G1 X10 E0.9 F1000");
        assert_eq!(lines[2], "G1 Y5 E1.35 F1000");
    }

    #[test]
    fn test_relative_mode() {
        let out = gcode(&[
            ExtruderUpdate::relative(true).into(),
            CrossSectionUpdate::rectangle(0.45, 0.2).into(),
            mm3(),
            Point::new(0.0, 0.0, 0.2).into(),
            Point::new(10.0, 0.0, 0.2).with_extrude(true).into(),
            Point::new(10.0, 5.0, 0.2).into(),
            Point::new(20.0, 5.0, 0.2).with_extrude(false).into(),
            ExtruderUpdate::relative(true).into(),
        ]);
        assert_eq!(
            out,
            "M83\n\
             G1 X0 Y0 Z0.2 F8000\n\
             G1 X10 E0.9 F1000\n\
             G1 Y5 E0.45 F1000\n\
             G1 X20 E0 F8000"
        );
    }

    #[test]
    fn test_absolute_mode_selector_resets_e() {
        let out = gcode(&[ExtruderUpdate {
            relative_mode: Some(false),
            ..Default::default()
        }
        .into()]);
        assert_eq!(out, "M82\nG92 E0");
    }

    #[test]
    fn test_g0_travel() {
        let out = gcode(&[
            ExtruderUpdate {
                travel_format: Some(TravelFormat::G0),
                ..Default::default()
            }
            .into(),
            Point::new(0.0, 0.0, 0.2).into(),
            Point::new(5.0, 0.0, 0.2).into(),
            Point::new(5.0, 0.0, 0.2).into(),
        ]);
        assert_eq!(out, "G0 X0 Y0 Z0.2 F8000\nG0 X5 F8000");
    }

    #[test]
    fn test_filament_length_units() {
        let out = gcode(&[
            CrossSectionUpdate::rectangle(0.4, 0.2).into(),
            Point::new(0.0, 0.0, 0.2).into(),
            Point::new(10.0, 0.0, 0.2).with_extrude(true).into(),
        ]);
        // 0.8 mm³ over a 1.75 mm filament
        assert_eq!(out.lines().last(), Some("G1 X10 E0.332601 F1000"));
    }

    #[test]
    fn test_device_commands_and_raw_text() {
        let out = gcode(&[
            Event::retract().into(),
            Event::raw("M400\nM117 done").into(),
            Event::unretract().into(),
        ]);
        assert_eq!(out, "G10\nM400\nM117 done\nG11");
    }

    #[test]
    fn test_blank_raw_lines_dropped() {
        let out = gcode(&[
            Event::raw("\n;-----\n  \nM400\n").into(),
            Event::raw("M400\n\n").into(),
        ]);
        assert_eq!(out, ";-----\nM400\nM400");
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_sub_precision_print_move_skipped() {
        let out = gcode(&[
            CrossSectionUpdate::rectangle(0.45, 0.2).into(),
            mm3(),
            Point::new(0.0, 0.0, 0.2).into(),
            Event::ExtruderToggle { on: true }.into(),
            Point::new(0.0000001, 0.0, 0.2).into(),
            Point::new(10.0, 0.0, 0.2).into(),
        ]);
        assert_eq!(out, "G1 X0 Y0 Z0.2 F8000\nG1 X10 E0.9 F1000");
    }

    #[test]
    fn test_unmapped_command_is_skipped() {
        let result = generate_gcode(
            &[Event::DeviceCommand { id: "purge".into() }.into(), Event::raw("M400").into()],
            &generic_commands(),
            InitializationData::default(),
        )
        .unwrap();
        assert_eq!(result.output, "M400");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].index, 0);
    }

    #[test]
    fn test_comments() {
        let out = gcode(&[
            Event::Comment {
                text: Some("start".into()),
                end_of_previous_line: None,
            }
            .into(),
            Point::new(1.0, 2.0, 0.2).into(),
            Event::Comment {
                text: None,
                end_of_previous_line: Some("origin".into()),
            }
            .into(),
        ]);
        assert_eq!(out, "; start\nG1 X1 Y2 Z0.2 F8000 ; origin");
    }

    #[test]
    fn test_auxiliary_devices() {
        let out = gcode(&[
            Event::FanSetting { percent: 50.0 }.into(),
            Event::FanSetting { percent: 0.0 }.into(),
            Event::FanSetting { percent: 150.0 }.into(),
            Event::HotendSetting {
                temp: 210.0,
                wait: false,
                tool: None,
            }
            .into(),
            Event::HotendSetting {
                temp: 215.5,
                wait: true,
                tool: Some(1),
            }
            .into(),
            Event::BedSetting { temp: 60.0, wait: true }.into(),
        ]);
        assert_eq!(out, "M106 S128\nM107\nM106 S255\nM104 S210\nM109 T1 S215.5\nM190 S60");
    }

    #[test]
    fn test_stationary_extrusion() {
        let out = gcode(&[
            mm3(),
            ExtruderUpdate::relative(true).into(),
            Event::StationaryExtrusion {
                volume: 5.0,
                speed: 300.0,
            }
            .into(),
        ]);
        assert_eq!(out, "M83\nG1 E5 F300");
    }

    #[test]
    fn test_missing_cross_section_is_fatal() {
        let err = generate_gcode(
            &[
                Point::new(0.0, 0.0, 0.2).into(),
                Point::new(5.0, 0.0, 0.2).with_extrude(true).into(),
            ],
            &generic_commands(),
            InitializationData::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::Configuration { index: 1, .. }));
    }

    #[test]
    fn test_printer_profile_prologue() {
        let profile = PrinterProfile::ender_3();
        let result = generate_gcode(&[], &profile, profile.initialization_data()).unwrap();
        assert_eq!(
            result.output,
            "M82\nG92 E0\nM140 S60\nM104 S200\nM190 S60\nM109 S200\nM106 S255"
        );
    }
}
