#![warn(missing_docs)]

//! Procedural toolpath geometry for weft.
//!
//! Every generator is a pure function of its parameters and returns a
//! finite, fully materialized `Vec<Point>`. Calling one twice with the same
//! arguments yields identical points.
//!
//! Angles are in radians. A centre point with an unspecified X or Y is
//! treated as 0 on that axis; its Z (specified or not) is carried to the
//! generated points.
//!
//! # Example
//!
//! ```
//! use std::f64::consts::TAU;
//! use weft_geom::{arc, polygon};
//! use weft_ir::Point;
//!
//! let centre = Point::new(50.0, 50.0, 0.2);
//! let hexagon = polygon(&centre, 10.0, 0.0, 6, false).unwrap();
//! assert_eq!(hexagon.len(), 7);
//!
//! let three_quarters = arc(&centre, 10.0, 0.0, 0.75 * TAU, 64).unwrap();
//! assert_eq!(three_quarters.len(), 65);
//! ```

mod arcs;
mod error;
mod shapes;
mod transform;
mod waves;

pub use arcs::{arc, arc_xy_3pt, centre_xy_3pt, elliptical_arc, variable_arc};
pub use error::{GeometryError, Result};
pub use shapes::{circle, ellipse, helix, polygon, rectangle, segmented_line, spiral, travel_to};
pub use transform::{move_polar, reflect_xy, translate, translate_copies};
pub use waves::{sinewave, squarewave};

use nalgebra::Vector3;
use std::f64::consts::TAU;
use weft_ir::Point;

/// Polar coordinates of a point about an origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Distance from the origin in XY.
    pub radius: f64,
    /// Angle in `[0, 2π)`.
    pub angle: f64,
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// Fewer than two values yields just `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// The point at `radius` and `angle` from `origin` in XY; Z is `origin.z`.
pub fn polar_offset(origin: &Point, radius: f64, angle: f64) -> Point {
    Point {
        x: Some(origin.x.unwrap_or(0.0) + radius * angle.cos()),
        y: Some(origin.y.unwrap_or(0.0) + radius * angle.sin()),
        z: origin.z,
        ..Default::default()
    }
}

/// Polar coordinates of `target` about `origin`.
pub fn point_to_polar(target: &Point, origin: &Point) -> Result<Polar> {
    let (tx, ty) = xy(target)?;
    let (ox, oy) = xy(origin)?;
    Ok(polar_about(tx, ty, ox, oy))
}

pub(crate) fn polar_about(x: f64, y: f64, cx: f64, cy: f64) -> Polar {
    let radius = (x - cx).hypot(y - cy);
    let angle = (y - cy).atan2(x - cx);
    Polar {
        radius,
        angle: ((angle % TAU) + TAU) % TAU,
    }
}

pub(crate) fn xy(p: &Point) -> Result<(f64, f64)> {
    let x = p.x.ok_or(GeometryError::MissingAxis { axis: 'x' })?;
    let y = p.y.ok_or(GeometryError::MissingAxis { axis: 'y' })?;
    Ok((x, y))
}

/// Per-axis arithmetic mean. An axis missing on either side stays missing.
pub fn midpoint(p1: &Point, p2: &Point) -> Point {
    let avg = |a: Option<f64>, b: Option<f64>| match (a, b) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        _ => None,
    };
    Point {
        x: avg(p1.x, p2.x),
        y: avg(p1.y, p2.y),
        z: avg(p1.z, p2.z),
        ..Default::default()
    }
}

/// Point at fraction `f` of the way from `p1` to `p2`.
///
/// An axis defined on only one side is copied from that side.
pub fn interpolated_point(p1: &Point, p2: &Point, f: f64) -> Point {
    let lerp = |a: Option<f64>, b: Option<f64>| match (a, b) {
        (None, None) => None,
        (a, b) => {
            let a0 = a.or(b).unwrap_or_default();
            let b0 = b.or(a).unwrap_or_default();
            Some(a0 + f * (b0 - a0))
        }
    };
    Point {
        x: lerp(p1.x, p2.x),
        y: lerp(p1.y, p2.y),
        z: lerp(p1.z, p2.z),
        ..Default::default()
    }
}

/// Euclidean distance; missing axes count as 0.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    (to_vector(p2) - to_vector(p1)).norm()
}

/// Total length of a polyline.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

pub(crate) fn to_vector(p: &Point) -> Vector3<f64> {
    Vector3::new(
        p.x.unwrap_or(0.0),
        p.y.unwrap_or(0.0),
        p.z.unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(&Point::new(0.0, 0.0, 0.2), &Point::new(10.0, 4.0, 0.4));
        assert_eq!(m, Point::new(5.0, 2.0, 0.30000000000000004));
        let partial = midpoint(&Point::default().with_x(2.0), &Point::new(4.0, 1.0, 1.0));
        assert_eq!(partial.x, Some(3.0));
        assert_eq!(partial.y, None);
    }

    #[test]
    fn test_polar_offset_keeps_origin_z() {
        let p = polar_offset(&Point::new(1.0, 1.0, 0.6), 2.0, PI / 2.0);
        assert_relative_eq!(p.x.unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y.unwrap(), 3.0, epsilon = 1e-12);
        assert_eq!(p.z, Some(0.6));
    }

    #[test]
    fn test_point_to_polar_normalizes_angle() {
        let polar = point_to_polar(&Point::new(0.0, -1.0, 0.0), &Point::new(0.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(polar.radius, 1.0);
        assert_relative_eq!(polar.angle, 1.5 * PI);
        assert_eq!(
            point_to_polar(&Point::default(), &Point::new(0.0, 0.0, 0.0)),
            Err(GeometryError::MissingAxis { axis: 'x' })
        );
    }

    #[test]
    fn test_interpolated_point() {
        let p = interpolated_point(&Point::new(0.0, 0.0, 1.0), &Point::default().with_x(10.0), 0.25);
        assert_eq!(p.x, Some(2.5));
        assert_eq!(p.y, Some(0.0));
        assert_eq!(p.z, Some(1.0));
    }

    #[test]
    fn test_path_length() {
        let pts = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(3.0, 4.0, 0.0),
            Point::new(3.0, 4.0, 2.0),
        ];
        assert_relative_eq!(path_length(&pts), 7.0);
    }
}
