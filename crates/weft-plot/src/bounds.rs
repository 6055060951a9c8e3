//! Axis-aligned bounding box of visited positions.

use serde::{Deserialize, Serialize};
use weft_ir::Position;

/// Per-axis min, max, mid and range over every visited position.
///
/// An empty box is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum X.
    pub minx: f64,
    /// Maximum X.
    pub maxx: f64,
    /// Midpoint X.
    pub midx: f64,
    /// X range.
    pub rangex: f64,
    /// Minimum Y.
    pub miny: f64,
    /// Maximum Y.
    pub maxy: f64,
    /// Midpoint Y.
    pub midy: f64,
    /// Y range.
    pub rangey: f64,
    /// Minimum Z.
    pub minz: f64,
    /// Maximum Z.
    pub maxz: f64,
    /// Midpoint Z.
    pub midz: f64,
    /// Z range.
    pub rangez: f64,
}

impl BoundingBox {
    /// Box around `positions`.
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Self {
        let mut iter = positions.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (mut lo, mut hi) = ([first.x, first.y, first.z], [first.x, first.y, first.z]);
        for p in iter {
            for (i, v) in [p.x, p.y, p.z].into_iter().enumerate() {
                lo[i] = lo[i].min(v);
                hi[i] = hi[i].max(v);
            }
        }
        Self {
            minx: lo[0],
            maxx: hi[0],
            midx: (lo[0] + hi[0]) / 2.0,
            rangex: hi[0] - lo[0],
            miny: lo[1],
            maxy: hi[1],
            midy: (lo[1] + hi[1]) / 2.0,
            rangey: hi[1] - lo[1],
            minz: lo[2],
            maxz: hi[2],
            midz: (lo[2] + hi[2]) / 2.0,
            rangez: hi[2] - lo[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_position_has_zero_range() {
        let b = BoundingBox::from_positions(&[Position::new(1.0, 2.0, 3.0)]);
        assert_eq!((b.minx, b.maxx, b.midx, b.rangex), (1.0, 1.0, 1.0, 0.0));
        assert_eq!(b.rangez, 0.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(BoundingBox::from_positions(&[]), BoundingBox::default());
    }
}
