//! Sprite classification
//!
//! Which texture a body is drawn with. Chosen when the level is built and
//! stored on the entity; the render feed only reads it.

use serde::{Deserialize, Serialize};

use crate::consts::SAFE_PLANET_SCALE;

/// Textures a hazard may be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardSprite {
    Asteroid1,
    Asteroid2,
    Asteroid3,
    PlanetHazard,
    PlanetPurple,
}

impl HazardSprite {
    pub const ALL: [HazardSprite; 5] = [
        HazardSprite::Asteroid1,
        HazardSprite::Asteroid2,
        HazardSprite::Asteroid3,
        HazardSprite::PlanetHazard,
        HazardSprite::PlanetPurple,
    ];
}

/// What a body should be drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Projectile,
    SafePlanet,
    Hazard(HazardSprite),
}

impl SpriteKind {
    /// Deterministic hazard texture for a layout index
    pub fn hazard_for(index: u32) -> Self {
        // Golden ratio hash spreads neighbouring indices across textures
        let hash = index.wrapping_mul(2654435761) >> 16;
        SpriteKind::Hazard(HazardSprite::ALL[hash as usize % HazardSprite::ALL.len()])
    }

    /// Texture asset name
    pub fn texture_name(&self) -> &'static str {
        match self {
            SpriteKind::Player => "Star",
            SpriteKind::Projectile => "Projectile",
            SpriteKind::SafePlanet => "PlanetSafe",
            SpriteKind::Hazard(HazardSprite::Asteroid1) => "Asteroid1",
            SpriteKind::Hazard(HazardSprite::Asteroid2) => "Asteroid2",
            SpriteKind::Hazard(HazardSprite::Asteroid3) => "Asteroid3",
            SpriteKind::Hazard(HazardSprite::PlanetHazard) => "PlanetHazard",
            SpriteKind::Hazard(HazardSprite::PlanetPurple) => "PlanetPurple",
        }
    }

    /// Draw scale relative to the base 40x40 sprite
    pub fn scale(&self) -> f32 {
        match self {
            SpriteKind::SafePlanet => SAFE_PLANET_SCALE,
            _ => 1.0,
        }
    }
}
