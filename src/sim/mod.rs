//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `step(dt)`
//! - No randomness in layouts or rules
//! - Stable iteration order (build order for obstacles, ID order for projectiles)
//! - No rendering or platform dependencies

pub mod contact;
pub mod level;
pub mod orbit;
pub mod schedule;
pub mod sprite;
pub mod state;
pub mod tick;

pub use contact::{
    Body, Category, CategorySet, ContactBody, ContactEvent, ContactOutcome, resolve_contact,
    resolve_contacts,
};
pub use level::{LevelLayout, build_level};
pub use orbit::OrbitSpec;
pub use schedule::{ScheduledAction, Scheduler};
pub use sprite::{HazardSprite, SpriteKind};
pub use state::{
    GameEvent, Hop, OrbitingEntity, Player, Projectile, ProjectileSpawn, Session, SessionPhase,
};
pub use tick::{FrameClock, TickInput, tick};
