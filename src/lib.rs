//! Cosmic Crossing - hop across orbiting hazards to reach the goal zone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (orbits, player, contacts, session flow)
//! - `physics`: Reference circle contact detector feeding the simulation
//! - `render`: Render feed snapshots for the presentation layer
//! - `audio`: Audio context driven by simulation events
//! - `settings` / `tuning`: Player preferences and data-driven game balance

pub mod audio;
pub mod physics;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Player spawn height above the bottom edge
    pub const PLAYER_SPAWN_Y: f32 = 100.0;
    /// Collision radius of the player sprite (40x40)
    pub const PLAYER_RADIUS: f32 = 20.0;

    /// Duration of a hop between tap positions (seconds)
    pub const MOVE_DURATION: f32 = 0.3;
    /// Height of the hop arc above the higher endpoint
    pub const JUMP_HEIGHT: f32 = 50.0;

    /// Projectile speed multiplier applied to the fire direction
    pub const PROJECTILE_SPEED: f32 = 500.0;
    /// Projectile lifetime (seconds)
    pub const PROJECTILE_TTL: f32 = 2.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Collision radius of an orbiting body (40x40 sprite)
    pub const ORBITER_RADIUS: f32 = 20.0;
    /// Safe planets are drawn (and collide) larger
    pub const SAFE_PLANET_SCALE: f32 = 1.3;

    /// Points for shooting down a hazard
    pub const DESTROY_SCORE: u64 = 10;
    /// Points per level number on completion
    pub const LEVEL_SCORE: u64 = 100;

    /// Goal zone threshold below the top edge
    pub const GOAL_MARGIN: f32 = 150.0;
    /// Height of the drawn goal band
    pub const GOAL_ZONE_HEIGHT: f32 = 100.0;
}

/// Playfield size in points (origin bottom-left, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where the player starts each life and each level
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, consts::PLAYER_SPAWN_Y)
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Rotate a vector counter-clockwise by an angle given in degrees
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        // 3π lands on the ±π seam; either side is acceptable in f32
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_degrees_quarter_turn() {
        let r = rotate_degrees(Vec2::new(10.0, 0.0), 90.0);
        assert!(r.x.abs() < 1e-4);
        assert!((r.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_point_centered() {
        let b = Bounds::new(400.0, 800.0);
        assert_eq!(b.spawn_point(), Vec2::new(200.0, 100.0));
    }
}
