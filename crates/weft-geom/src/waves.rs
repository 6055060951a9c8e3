//! Square and sine waves along an arbitrary XY direction.

use std::f64::consts::{FRAC_PI_2, TAU};

use weft_ir::Point;

use crate::error::{at_least, finite, Result};
use crate::polar_offset;
use crate::transform::move_polar;

/// Square wave starting at `start` and advancing along `direction` (radians).
///
/// Each period is up by `amplitude`, across by `line_spacing`, down, and
/// across again (the final across is skipped on the last period).
pub fn squarewave(
    start: &Point,
    direction: f64,
    amplitude: f64,
    line_spacing: f64,
    periods: usize,
    extra_half_period: bool,
    extra_end_line: bool,
) -> Result<Vec<Point>> {
    at_least("periods", 1, periods)?;
    finite("direction", direction)?;
    finite("amplitude", amplitude)?;
    finite("line_spacing", line_spacing)?;
    let mut pts = vec![*start];
    let step = |radius: f64, angle: f64, pts: &mut Vec<Point>| {
        let last = pts[pts.len() - 1];
        pts.push(polar_offset(&last, radius, angle));
    };
    for i in 0..periods {
        step(amplitude, direction + FRAC_PI_2, &mut pts);
        step(line_spacing, direction, &mut pts);
        step(amplitude, direction - FRAC_PI_2, &mut pts);
        if i != periods - 1 {
            step(line_spacing, direction, &mut pts);
        }
    }
    if extra_half_period {
        step(line_spacing, direction, &mut pts);
        step(amplitude, direction + FRAC_PI_2, &mut pts);
    }
    if extra_end_line {
        step(line_spacing, direction, &mut pts);
    }
    Ok(pts)
}

/// Sine wave (trough-to-trough, starting at the trough) along `direction`.
#[allow(clippy::too_many_arguments)]
pub fn sinewave(
    start: &Point,
    direction: f64,
    amplitude: f64,
    period_length: f64,
    periods: usize,
    segments_per_period: usize,
    extra_half_period: bool,
    phase_shift: f64,
) -> Result<Vec<Point>> {
    at_least("periods", 1, periods)?;
    at_least("segments_per_period", 1, segments_per_period)?;
    finite("amplitude", amplitude)?;
    finite("period_length", period_length)?;
    finite("phase_shift", phase_shift)?;
    let spp = segments_per_period as f64;
    let total = periods * segments_per_period
        + if extra_half_period {
            segments_per_period / 2
        } else {
            0
        };
    let x0 = start.x.unwrap_or(0.0);
    let y0 = start.y.unwrap_or(0.0);
    let along: Vec<Point> = (0..=total)
        .map(|i| {
            let t = i as f64;
            let axis = t * period_length / spp;
            let amp = amplitude * (0.5 - 0.5 * ((t / spp) * TAU + phase_shift).cos());
            Point {
                x: Some(x0 + axis),
                y: Some(y0 + amp),
                z: start.z,
                ..Default::default()
            }
        })
        .collect();
    let origin = Point {
        x: Some(x0),
        y: Some(y0),
        ..*start
    };
    move_polar(&along, &origin, 0.0, direction)
}
