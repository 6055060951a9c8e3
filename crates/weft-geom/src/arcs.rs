//! Circular and elliptical arcs.

use std::f64::consts::TAU;

use weft_ir::Point;

use crate::error::{at_least, finite, GeometryError, Result};
use crate::{linspace, polar_about, polar_offset, xy};

/// Arc of constant radius at the centre's Z.
///
/// Returns `segments + 1` points stepping by `total_angle / segments`; a
/// negative `total_angle` runs clockwise.
pub fn arc(
    centre: &Point,
    radius: f64,
    start_angle: f64,
    total_angle: f64,
    segments: usize,
) -> Result<Vec<Point>> {
    at_least("segments", 1, segments)?;
    finite("radius", radius)?;
    finite("start_angle", start_angle)?;
    finite("total_angle", total_angle)?;
    Ok(linspace(start_angle, start_angle + total_angle, segments + 1)
        .into_iter()
        .map(|a| polar_offset(centre, radius, a))
        .collect())
}

/// Arc whose radius and Z drift linearly across the segments.
///
/// The first point sits at `radius` and the centre's Z; the last at
/// `radius + radius_delta` and `z + z_delta`. A non-zero `z_delta` needs a
/// centre with Z.
pub fn variable_arc(
    centre: &Point,
    radius: f64,
    start_angle: f64,
    total_angle: f64,
    segments: usize,
    radius_delta: f64,
    z_delta: f64,
) -> Result<Vec<Point>> {
    at_least("segments", 1, segments)?;
    finite("radius", radius)?;
    finite("start_angle", start_angle)?;
    finite("total_angle", total_angle)?;
    finite("radius_delta", radius_delta)?;
    finite("z_delta", z_delta)?;
    if z_delta != 0.0 && centre.z.is_none() {
        return Err(GeometryError::MissingAxis { axis: 'z' });
    }
    let n = segments + 1;
    let angles = linspace(start_angle, start_angle + total_angle, n);
    let radii = linspace(radius, radius + radius_delta, n);
    let dzs = linspace(0.0, z_delta, n);
    Ok((0..n)
        .map(|i| Point {
            z: centre.z.map(|z| z + dzs[i]),
            ..polar_offset(centre, radii[i], angles[i])
        })
        .collect())
}

/// Arc of an axis-aligned ellipse with semi-axes `a` (X) and `b` (Y).
pub fn elliptical_arc(
    centre: &Point,
    a: f64,
    b: f64,
    start_angle: f64,
    total_angle: f64,
    segments: usize,
) -> Result<Vec<Point>> {
    at_least("segments", 1, segments)?;
    finite("a", a)?;
    finite("b", b)?;
    finite("start_angle", start_angle)?;
    finite("total_angle", total_angle)?;
    let cx = centre.x.unwrap_or(0.0);
    let cy = centre.y.unwrap_or(0.0);
    Ok(linspace(start_angle, start_angle + total_angle, segments + 1)
        .into_iter()
        .map(|t| Point {
            x: Some(a * t.cos() + cx),
            y: Some(b * t.sin() + cy),
            z: centre.z,
            ..Default::default()
        })
        .collect())
}

/// Centre of the circle through three points, at the first point's Z.
pub fn centre_xy_3pt(p1: &Point, p2: &Point, p3: &Point) -> Result<Point> {
    let (x1, y1) = xy(p1)?;
    let (x2, y2) = xy(p2)?;
    let (x3, y3) = xy(p3)?;
    let d = 2.0 * (x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2));
    if d == 0.0 {
        return Err(GeometryError::CollinearPoints);
    }
    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;
    let x = (s1 * (y2 - y3) + s2 * (y3 - y1) + s3 * (y1 - y2)) / d;
    let y = (s1 * (x3 - x2) + s2 * (x1 - x3) + s3 * (x2 - x1)) / d;
    Ok(Point {
        x: Some(x),
        y: Some(y),
        z: p1.z,
        ..Default::default()
    })
}

/// Arc from `p1` through `p2` to `p3`.
pub fn arc_xy_3pt(p1: &Point, p2: &Point, p3: &Point, segments: usize) -> Result<Vec<Point>> {
    let centre = centre_xy_3pt(p1, p2, p3)?;
    let (cx, cy) = xy(&centre)?;
    let (x1, y1) = xy(p1)?;
    let (x2, y2) = xy(p2)?;
    let (x3, y3) = xy(p3)?;
    let radius = (x1 - cx).hypot(y1 - cy);
    let start = polar_about(x1, y1, cx, cy).angle;
    let mid = polar_about(x2, y2, cx, cy).angle;
    let end = polar_about(x3, y3, cx, cy).angle;
    let ccw = (mid > start && mid < end) || (start > end && (mid > start || mid < end));
    let sweep = if ccw {
        end - start
    } else {
        -(TAU - (end - start))
    };
    arc(&centre, radius, start, sweep, segments)
}
