//! Starting and ending procedures and the primer.

use serde::{Deserialize, Serialize};
use weft_ir::{Element, Event, Point, Step};

use crate::flavor::GcodeFlavor;

/// Lead-in printed between the starting procedure and the design.
///
/// Every primer except [`Primer::NoPrimer`] finishes at the design's first
/// point with the extruder on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primer {
    /// Travel straight to the first point.
    Travel,
    /// Box along the front edge, then along X and finally Y to the first point.
    #[default]
    FrontLinesThenY,
    /// Box along the front edge, then along Y and finally X to the first point.
    FrontLinesThenX,
    /// Box along the front edge, then diagonally to the first point.
    FrontLinesThenXy,
    /// Line along X, then Y, to the first point.
    X,
    /// Line along Y, then X, to the first point.
    Y,
    /// Nothing.
    NoPrimer,
}

const PRIMER_START: &str = ";-----\n; START OF PRIMER PROCEDURE\n;-----";
const PRIMER_END: &str = ";-----\n; END OF PRIMER PROCEDURE\n;-----";

fn xy(x: Option<f64>, y: Option<f64>) -> Point {
    Point {
        x,
        y,
        ..Default::default()
    }
}

impl Primer {
    /// Steps leading to `first`, the design's first point.
    pub fn steps(self, first: &Point) -> Vec<Step> {
        let lead_in = |steps: &mut Vec<Step>| {
            steps.push(Event::raw(PRIMER_START).into());
            steps.push(Event::ExtruderToggle { on: false }.into());
            steps.push(
                Point {
                    x: Some(10.0),
                    y: Some(12.0),
                    z: first.z,
                    ..Default::default()
                }
                .into(),
            );
            steps.push(Event::ExtruderToggle { on: true }.into());
        };
        let front_box = [
            xy(Some(110.0), None),
            xy(None, Some(14.0)),
            xy(Some(10.0), None),
            xy(None, Some(16.0)),
        ];
        let along_x = xy(first.x, None);
        let along_y = xy(None, first.y);

        let mut steps = Vec::new();
        match self {
            Primer::NoPrimer => return steps,
            Primer::Travel => {
                steps.push(Event::ExtruderToggle { on: false }.into());
                steps.push((*first).into());
                steps.push(Event::ExtruderToggle { on: true }.into());
                return steps;
            }
            Primer::FrontLinesThenY => {
                lead_in(&mut steps);
                steps.push(front_box.to_vec().into());
                steps.push(vec![along_x, along_y].into());
            }
            Primer::FrontLinesThenX => {
                lead_in(&mut steps);
                steps.push(front_box.to_vec().into());
                steps.push(vec![along_y, along_x].into());
            }
            Primer::FrontLinesThenXy => {
                lead_in(&mut steps);
                steps.push(front_box.to_vec().into());
                steps.push(xy(first.x, first.y).into());
            }
            Primer::X => {
                lead_in(&mut steps);
                steps.push(vec![along_x, along_y].into());
            }
            Primer::Y => {
                lead_in(&mut steps);
                steps.push(vec![along_y, along_x].into());
            }
        }
        steps.push(Event::raw(PRIMER_END).into());
        steps
    }
}

fn command(id: &str) -> Step {
    Event::DeviceCommand { id: id.into() }.into()
}

impl GcodeFlavor {
    /// Steps run after initialization and before the primer.
    ///
    /// Temperatures and the extrusion mode are set by initialization, so the
    /// procedure only homes, levels and fixes the coordinate system.
    pub fn starting_procedure(&self) -> Vec<Step> {
        let mut steps = vec![Event::raw(";-----\n; START OF STARTING PROCEDURE\n;-----").into()];
        match self {
            GcodeFlavor::Marlin => {
                steps.push(command("home"));
                steps.push(Event::raw("G29 ; auto bed leveling").into());
            }
            GcodeFlavor::Klipper => {
                steps.push(command("home"));
                steps.push(Event::raw("BED_MESH_CALIBRATE").into());
            }
            GcodeFlavor::Bambu => {
                steps.push(Event::raw("M400 ; wait for moves to finish").into());
                steps.push(command("home"));
                steps.push(
                    Event::Comment {
                        text: None,
                        end_of_previous_line: Some("including mesh bed level".into()),
                    }
                    .into(),
                );
                steps.push(Event::raw("M106 P2 S255 ; enable aux fan").into());
            }
            GcodeFlavor::RepRap => {
                steps.push(command("home"));
                steps.push(Event::raw("G29 ; probe bed").into());
            }
        }
        steps.push(command("absolute_coords"));
        steps.push(command("units_mm"));
        steps.push(Event::raw(";-----\n; END OF STARTING PROCEDURE\n;-----").into());
        steps
    }

    /// Steps run after the design.
    pub fn ending_procedure(&self) -> Vec<Step> {
        let mut steps = vec![
            Event::raw(";-----\n; START OF ENDING PROCEDURE\n;-----").into(),
            Event::raw("G91 ; relative coordinates\nG1 Z10 F3000 ; lift nozzle\nG90 ; absolute coordinates").into(),
            Event::FanSetting { percent: 0.0 }.into(),
        ];
        match self {
            GcodeFlavor::Klipper => steps.push(Event::raw("TURN_OFF_HEATERS").into()),
            _ => {
                steps.push(Event::BedSetting { temp: 0.0, wait: false }.into());
                steps.push(
                    Event::HotendSetting {
                        temp: 0.0,
                        wait: false,
                        tool: None,
                    }
                    .into(),
                );
            }
        }
        if *self == GcodeFlavor::Bambu {
            steps.push(Event::raw("M106 P2 S0 ; disable aux fan").into());
        }
        steps.push(Event::raw("M84 ; disable steppers").into());
        steps
    }
}

/// First point of a design in stream order.
pub fn first_point(steps: &[Step]) -> Option<Point> {
    steps.iter().find_map(|step| match step {
        Step::Group(inner) => first_point(inner),
        Step::Element(Element::Point(p)) => Some(*p),
        Step::Element(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_ir::flatten;

    fn points(steps: &[Step]) -> Vec<Point> {
        flatten(steps)
            .iter()
            .filter_map(|e| e.as_point().copied())
            .collect()
    }

    #[test]
    fn test_front_lines_end_at_first_point() {
        let first = Point::new(50.0, 60.0, 0.2);
        let pts = points(&Primer::FrontLinesThenY.steps(&first));
        assert_eq!(pts[0], Point::new(10.0, 12.0, 0.2));
        assert_eq!(pts.len(), 7);
        assert_eq!(pts[5], Point::default().with_x(50.0));
        assert_eq!(pts[6], Point::default().with_y(60.0));
    }

    #[test]
    fn test_axis_primer_order() {
        let first = Point::new(50.0, 60.0, 0.2);
        let pts = points(&Primer::Y.steps(&first));
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[1], Point::default().with_y(60.0));
        assert_eq!(pts[2], Point::default().with_x(50.0));
    }

    #[test]
    fn test_travel_and_no_primer() {
        let first = Point::new(5.0, 5.0, 0.3);
        let travel = flatten(&Primer::Travel.steps(&first));
        assert_eq!(travel.len(), 3);
        assert_eq!(travel[1].as_point(), Some(&first));
        assert!(Primer::NoPrimer.steps(&first).is_empty());
    }

    #[test]
    fn test_first_point_searches_groups() {
        let design: Vec<Step> = vec![
            Event::raw("M400").into(),
            vec![Step::from(vec![Point::new(1.0, 2.0, 3.0)])].into(),
            Point::new(4.0, 5.0, 6.0).into(),
        ];
        assert_eq!(first_point(&design), Some(Point::new(1.0, 2.0, 3.0)));
        assert_eq!(first_point(&[]), None);
    }

    #[test]
    fn test_procedures_use_device_commands() {
        for flavor in [GcodeFlavor::Marlin, GcodeFlavor::Klipper, GcodeFlavor::Bambu, GcodeFlavor::RepRap] {
            let start = flatten(&flavor.starting_procedure());
            assert!(start.contains(&Element::Event(Event::DeviceCommand { id: "home".into() })));
            let end = flatten(&flavor.ending_procedure());
            assert_eq!(end.last(), Some(&Element::Event(Event::raw("M84 ; disable steppers"))));
        }
    }
}
