//! Rigid moves, copies and reflections of point lists.

use nalgebra::Vector3;
use weft_ir::Point;

use crate::error::{finite, Result};
use crate::{polar_about, polar_offset, xy};

/// Shift every point by `offset`. Unspecified axes stay unspecified.
pub fn translate(points: &[Point], offset: Vector3<f64>) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point {
            x: p.x.map(|v| v + offset.x),
            y: p.y.map(|v| v + offset.y),
            z: p.z.map(|v| v + offset.z),
            ..*p
        })
        .collect()
}

/// `quantity` copies of `points`, the i-th shifted by `i × offset`.
pub fn translate_copies(points: &[Point], offset: Vector3<f64>, quantity: usize) -> Vec<Point> {
    (0..quantity)
        .flat_map(|i| translate(points, offset * i as f64))
        .collect()
}

/// Move points in polar coordinates about `centre`: add `radius` to each
/// point's distance and rotate it by `angle`.
pub fn move_polar(points: &[Point], centre: &Point, radius: f64, angle: f64) -> Result<Vec<Point>> {
    finite("radius", radius)?;
    finite("angle", angle)?;
    let (cx, cy) = xy(centre)?;
    points
        .iter()
        .map(|p| {
            let (x, y) = xy(p)?;
            let polar = polar_about(x, y, cx, cy);
            let moved = polar_offset(centre, polar.radius + radius, polar.angle + angle);
            Ok(Point {
                x: moved.x,
                y: moved.y,
                ..*p
            })
        })
        .collect()
}

/// Mirror `p` across the line through `p1` and `p2` in XY.
pub fn reflect_xy(p: &Point, p1: &Point, p2: &Point) -> Result<Point> {
    let (x, y) = (p.x.unwrap_or(0.0), p.y.unwrap_or(0.0));
    let (x1, y1) = xy(p1)?;
    let (x2, y2) = xy(p2)?;
    let (rx, ry) = if x2 == x1 {
        (x + 2.0 * (x1 - x), y)
    } else if y2 == y1 {
        (x, y + 2.0 * (y1 - y))
    } else {
        let m = (y2 - y1) / (x2 - x1);
        let c = y1 - m * x1;
        let m_normal = -1.0 / m;
        let c_normal = y - m_normal * x;
        let fx = (c_normal - c) / (m - m_normal);
        let fy = (c_normal - (m_normal / m) * c) / (1.0 - m_normal / m);
        (x + 2.0 * (fx - x), y + 2.0 * (fy - y))
    };
    Ok(Point {
        x: Some(rx),
        y: Some(ry),
        ..*p
    })
}
