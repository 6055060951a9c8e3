//! Vertex color modes.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// RGB with components in 0..=1.
pub type Rgb = [f64; 3];

/// Color of every non-extruding vertex outside manual mode.
pub const TRAVEL_COLOR: Rgb = [0.75, 0.5, 0.5];

/// Manual-mode color before any point sets one.
pub const MANUAL_DEFAULT_COLOR: Rgb = [0.0, 0.0, 1.0];

/// How extruding vertices are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorType {
    /// Blue to cyan by height.
    #[default]
    ZGradient,
    /// Magenta through blue to cyan by path order.
    PrintSequence,
    /// Oscillates five times across the vertex sequence.
    PrintSequenceFluctuating,
    /// Colors carried by the points themselves, travel included.
    Manual,
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Height color for `z` given the global Z minimum and range.
pub fn z_gradient(z: f64, minz: f64, rangez: f64) -> Rgb {
    let range = rangez.max(1e-8);
    [0.0, round3((z - round3(minz)) / range), 1.0]
}

/// Progress color for position `now` out of `total`.
pub fn print_sequence(now: usize, total: usize) -> Rgb {
    let progress = now as f64 / total.max(1) as f64;
    [
        round3(0.8 * (1.0 - 2.0 * progress).max(0.0)),
        round3((2.0 * progress - 1.0).max(0.0)),
        1.0,
    ]
}

/// Oscillating progress color with `fluctuations` cycles over `total`.
pub fn print_sequence_fluctuating(now: usize, total: usize, fluctuations: usize) -> Rgb {
    let cycle = total.max(1) as f64 / fluctuations.max(1) as f64;
    let phase = ((now as f64 % cycle) + 0.00001) / cycle;
    [
        round3(0.25 + 0.25 * (phase * TAU).sin()),
        round3(0.5 - 0.5 * (phase * TAU).cos()),
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_gradient() {
        assert_eq!(z_gradient(0.2, 0.2, 0.4), [0.0, 0.0, 1.0]);
        assert_eq!(z_gradient(0.4, 0.2, 0.4), [0.0, 0.5, 1.0]);
        // flat designs map everything to the bottom of the scale
        assert_eq!(z_gradient(0.2, 0.2, 0.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_print_sequence_endpoints() {
        assert_eq!(print_sequence(0, 4), [0.8, 0.0, 1.0]);
        assert_eq!(print_sequence(2, 4), [0.0, 0.0, 1.0]);
        assert_eq!(print_sequence(4, 4), [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_fluctuating_is_bounded() {
        for i in 0..50 {
            let [r, g, b] = print_sequence_fluctuating(i, 50, 5);
            assert!((0.0..=0.5).contains(&r));
            assert!((0.0..=1.0).contains(&g));
            assert_eq!(b, 1.0);
        }
    }
}
