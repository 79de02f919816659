//! Parametric orbit paths
//!
//! Every obstacle follows one of a closed set of paths, sampled by a progress
//! value where one full unit of progress is one lap of the path.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{polar_to_cartesian, rotate_degrees};

/// Shape of an orbital path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrbitSpec {
    Circular {
        radius: f32,
    },
    Elliptical {
        radius_x: f32,
        radius_y: f32,
    },
    /// Radius moves linearly from start to end over one lap while winding
    /// `rotations` times around the center
    Spiral {
        radius_start: f32,
        radius_end: f32,
        rotations: f32,
    },
    /// 1:2 Lissajous curve
    Figure8 {
        width: f32,
        height: f32,
    },
    /// Three sine periods per lap along a line pointing at `direction_degrees`
    Wavy {
        amplitude: f32,
        wavelength: f32,
        direction_degrees: f32,
    },
}

impl OrbitSpec {
    /// A zero-radius circle: the body never moves
    pub const STATIONARY: OrbitSpec = OrbitSpec::Circular { radius: 0.0 };

    /// Position on this path at `progress`, relative to `center`.
    ///
    /// Progress is taken modulo 1, so the result is periodic for every
    /// variant. Inputs must be finite.
    pub fn position(&self, center: Vec2, progress: f32) -> Vec2 {
        let progress = progress.rem_euclid(1.0);
        let angle = progress * TAU;

        let offset = match *self {
            OrbitSpec::Circular { radius } => polar_to_cartesian(radius, angle),
            OrbitSpec::Elliptical { radius_x, radius_y } => {
                Vec2::new(angle.cos() * radius_x, angle.sin() * radius_y)
            }
            OrbitSpec::Spiral {
                radius_start,
                radius_end,
                rotations,
            } => {
                let radius = radius_start + (radius_end - radius_start) * progress;
                polar_to_cartesian(radius, angle * rotations)
            }
            OrbitSpec::Figure8 { width, height } => {
                Vec2::new(angle.sin() * width, (angle * 2.0).sin() * height)
            }
            OrbitSpec::Wavy {
                amplitude,
                wavelength,
                direction_degrees,
            } => {
                let base = Vec2::new(
                    progress * wavelength,
                    (progress * TAU * 3.0).sin() * amplitude,
                );
                rotate_degrees(base, direction_degrees)
            }
        };

        center + offset
    }
}
