//! Data-driven game balance
//!
//! Loaded from JSON alongside the settings file. Missing keys keep their
//! defaults, so a file only needs the values being tuned.

use serde::{Deserialize, Serialize};

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at session start
    pub starting_lives: u32,
    /// Shots at session start; each completed level refills to this plus the
    /// new level number
    pub starting_shots: u32,
    /// How long the "Level N Complete!" banner holds play (seconds)
    pub level_banner_secs: f32,
    /// Delay between game over and the restart notification (seconds)
    pub restart_delay_secs: f32,
    /// Blink duration after a non-fatal hit (seconds)
    pub hit_flash_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            starting_shots: 5,
            // Scale up 0.3 s, hold 1.0 s, fade 0.5 s
            level_banner_secs: 1.8,
            restart_delay_secs: 3.0,
            // Five blinks of 0.2 s
            hit_flash_secs: 1.0,
        }
    }
}
