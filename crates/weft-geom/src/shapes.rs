//! Closed shapes, helices and spirals.

use std::f64::consts::TAU;

use weft_ir::{Event, Point, Step};

use crate::arcs::{arc, elliptical_arc, variable_arc};
use crate::error::{at_least, finite, Result};
use crate::linspace;

fn direction(clockwise: bool) -> f64 {
    if clockwise {
        -1.0
    } else {
        1.0
    }
}

/// Regular polygon inscribed in a circle of `radius`.
///
/// Returns `sides + 1` points: the first vertex is repeated to close the loop.
pub fn polygon(
    centre: &Point,
    radius: f64,
    start_angle: f64,
    sides: usize,
    clockwise: bool,
) -> Result<Vec<Point>> {
    at_least("sides", 1, sides)?;
    arc(centre, radius, start_angle, TAU * direction(clockwise), sides)
}

/// Full circle of `segments` segments (`segments + 1` points, closed).
pub fn circle(
    centre: &Point,
    radius: f64,
    start_angle: f64,
    segments: usize,
    clockwise: bool,
) -> Result<Vec<Point>> {
    arc(centre, radius, start_angle, TAU * direction(clockwise), segments)
}

/// Full axis-aligned ellipse.
pub fn ellipse(
    centre: &Point,
    a: f64,
    b: f64,
    start_angle: f64,
    segments: usize,
    clockwise: bool,
) -> Result<Vec<Point>> {
    elliptical_arc(centre, a, b, start_angle, TAU * direction(clockwise), segments)
}

/// Axis-aligned rectangle starting and ending at `start`.
///
/// Counter-clockwise visits +X first; clockwise visits +Y first.
pub fn rectangle(start: &Point, x_size: f64, y_size: f64, clockwise: bool) -> Result<Vec<Point>> {
    finite("x_size", x_size)?;
    finite("y_size", y_size)?;
    let x0 = start.x.unwrap_or(0.0);
    let y0 = start.y.unwrap_or(0.0);
    let (fx, fy) = if clockwise { (0.0, 1.0) } else { (1.0, 0.0) };
    let corner = |x: f64, y: f64| Point {
        x: Some(x),
        y: Some(y),
        z: start.z,
        ..Default::default()
    };
    Ok(vec![
        corner(x0, y0),
        corner(x0 + x_size * fx, y0 + y_size * fy),
        corner(x0 + x_size, y0 + y_size),
        corner(x0 + x_size * fy, y0 + y_size * fx),
        corner(x0, y0),
    ])
}

/// Helix about the Z axis through `centre`.
///
/// The radius moves linearly from `start_radius` to `end_radius` across all
/// points and Z rises by `pitch` per turn. Each segment turns by
/// `2π / segments_per_turn`, negated when `clockwise`.
#[allow(clippy::too_many_arguments)]
pub fn helix(
    centre: &Point,
    start_radius: f64,
    end_radius: f64,
    start_angle: f64,
    turns: f64,
    pitch: f64,
    segments_per_turn: usize,
    clockwise: bool,
) -> Result<Vec<Point>> {
    at_least("segments_per_turn", 1, segments_per_turn)?;
    finite("turns", turns)?;
    finite("pitch", pitch)?;
    finite("start_radius", start_radius)?;
    finite("end_radius", end_radius)?;
    let segments = at_least("segments", 1, (turns.abs() * segments_per_turn as f64).round() as usize)?;
    variable_arc(
        centre,
        start_radius,
        start_angle,
        turns * TAU * direction(clockwise),
        segments,
        end_radius - start_radius,
        pitch * turns,
    )
}

/// Flat spiral: a [`helix`] with no Z advance.
pub fn spiral(
    centre: &Point,
    start_radius: f64,
    end_radius: f64,
    start_angle: f64,
    turns: f64,
    segments_per_turn: usize,
    clockwise: bool,
) -> Result<Vec<Point>> {
    helix(
        centre,
        start_radius,
        end_radius,
        start_angle,
        turns,
        0.0,
        segments_per_turn,
        clockwise,
    )
}

/// Straight line from `p1` to `p2` split into `segments` pieces.
pub fn segmented_line(p1: &Point, p2: &Point, segments: usize) -> Result<Vec<Point>> {
    at_least("segments", 1, segments)?;
    let n = segments + 1;
    let axis = |a: Option<f64>, b: Option<f64>| -> Vec<Option<f64>> {
        match (a, b) {
            (Some(a), Some(b)) => linspace(a, b, n).into_iter().map(Some).collect(),
            (a, b) => vec![b.or(a); n],
        }
    };
    let xs = axis(p1.x, p2.x);
    let ys = axis(p1.y, p2.y);
    let zs = axis(p1.z, p2.z);
    Ok((0..n)
        .map(|i| Point {
            x: xs[i],
            y: ys[i],
            z: zs[i],
            ..Default::default()
        })
        .collect())
}

/// Non-extruding move to `point`, then extrusion back on.
pub fn travel_to(point: Point) -> Vec<Step> {
    vec![
        Event::ExtruderToggle { on: false }.into(),
        point.into(),
        Event::ExtruderToggle { on: true }.into(),
    ]
}
