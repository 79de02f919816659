//! Game state and core simulation types
//!
//! All state owned by one play session lives here. Nothing in this module
//! touches rendering, audio devices or the platform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::build_level;
use super::orbit::OrbitSpec;
use super::schedule::Scheduler;
use super::sprite::SpriteKind;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{Bounds, normalize_angle};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Level banner showing; the next level is already built
    LevelTransition,
    /// Run ended, simulation frozen
    GameOver,
}

/// Notifications for the presentation and audio layers, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MusicStart,
    MusicStop,
    Jump,
    Shoot,
    /// A hazard was shot down at this position
    Explosion { position: Vec2 },
    PlayerHit { lives_left: u32 },
    LevelComplete { level: u32 },
    /// Banner finished; gameplay resumed on `level`
    LevelStarted { level: u32 },
    GameOver { final_score: u64 },
    /// Restart delay elapsed; the host should create a fresh session
    RestartDue,
}

/// An obstacle or planet moving along an orbit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitingEntity {
    pub id: u32,
    pub orbit: OrbitSpec,
    pub center: Vec2,
    /// Laps per second
    pub speed: f32,
    /// Position along the orbit in [0, 1)
    pub progress: f32,
    /// Sprite rotation (visual only)
    pub rotation: f32,
    pub position: Vec2,
    pub is_hazard: bool,
    pub is_safe_zone: bool,
    pub is_destructible: bool,
    pub sprite: SpriteKind,
}

impl OrbitingEntity {
    /// A destructible hazard starting at `progress` along its orbit
    pub fn hazard(id: u32, orbit: OrbitSpec, center: Vec2, speed: f32, progress: f32) -> Self {
        let mut entity = Self {
            id,
            orbit,
            center,
            speed,
            progress,
            rotation: 0.0,
            position: center,
            is_hazard: true,
            is_safe_zone: false,
            is_destructible: true,
            sprite: SpriteKind::hazard_for(id),
        };
        entity.position = entity.orbit.position(entity.center, entity.progress);
        entity
    }

    /// A stationary planet that never hurts and cannot be shot down
    pub fn safe_planet(id: u32, position: Vec2) -> Self {
        Self {
            id,
            orbit: OrbitSpec::STATIONARY,
            center: position,
            speed: 0.0,
            progress: 0.0,
            rotation: 0.0,
            position,
            is_hazard: false,
            is_safe_zone: true,
            is_destructible: false,
            sprite: SpriteKind::SafePlanet,
        }
    }

    /// Move along the orbit by `dt` seconds.
    ///
    /// Wraps progress at most once, so `speed * dt` must stay below one lap.
    pub fn advance(&mut self, dt: f32) {
        let delta = self.speed * dt;
        self.progress += delta;
        if self.progress >= 1.0 {
            self.progress -= 1.0;
        }
        self.position = self.orbit.position(self.center, self.progress);
        self.rotation = normalize_angle(self.rotation + delta * 0.5);
    }
}

/// A hop in flight: logical position changes only when it lands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    pub from: Vec2,
    pub to: Vec2,
    pub elapsed: f32,
}

impl Hop {
    /// 0 at takeoff, 1 on landing
    pub fn fraction(&self) -> f32 {
        (self.elapsed / MOVE_DURATION).clamp(0.0, 1.0)
    }

    /// Point on the hop arc (quadratic Bézier peaking above the higher end)
    pub fn arc_point(&self) -> Vec2 {
        let control = Vec2::new(
            (self.from.x + self.to.x) / 2.0,
            self.from.y.max(self.to.y) + JUMP_HEIGHT,
        );
        let t = self.fraction();
        let u = 1.0 - t;
        self.from * (u * u) + control * (2.0 * u * t) + self.to * (t * t)
    }
}

/// Projectile descriptor returned by [`Player::fire`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpawn {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub ttl: f32,
}

/// A live projectile owned by the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before it fizzles
    pub ttl: f32,
}

impl Projectile {
    pub fn new(id: u32, spawn: ProjectileSpawn) -> Self {
        Self {
            id,
            pos: spawn.origin,
            vel: spawn.velocity,
            ttl: spawn.ttl,
        }
    }

    /// Move and age; returns false once expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.ttl -= dt;
        self.ttl > 0.0
    }
}

/// The player's star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Logical position used for goal and contact checks
    pub position: Vec2,
    pub lives: u32,
    pub score: u64,
    pub shot_count: u32,
    /// Hop in flight, if any
    pub hop: Option<Hop>,
    /// Remaining hit-flash time (visual only, does not block hits)
    pub flash_timer: f32,
}

impl Player {
    pub fn new(position: Vec2, lives: u32, shot_count: u32) -> Self {
        Self {
            position,
            lives,
            score: 0,
            shot_count,
            hop: None,
            flash_timer: 0.0,
        }
    }

    /// Start a hop toward `target`; a hop in flight is replaced
    pub fn move_to(&mut self, target: Vec2) {
        self.hop = Some(Hop {
            from: self.position,
            to: target,
            elapsed: 0.0,
        });
    }

    /// Advance the hop and flash timers; returns true when a hop lands
    pub fn update(&mut self, dt: f32) -> bool {
        self.flash_timer = (self.flash_timer - dt).max(0.0);

        let Some(hop) = self.hop.as_mut() else {
            return false;
        };
        hop.elapsed += dt;
        if hop.elapsed < MOVE_DURATION {
            return false;
        }
        self.position = hop.to;
        self.hop = None;
        true
    }

    /// Spend one shot; `None` when out of ammunition
    pub fn fire(&mut self, direction: Vec2) -> Option<ProjectileSpawn> {
        if self.shot_count == 0 {
            return None;
        }
        self.shot_count -= 1;
        Some(ProjectileSpawn {
            origin: self.position,
            velocity: direction * PROJECTILE_SPEED,
            ttl: PROJECTILE_TTL,
        })
    }

    pub fn apply_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Teleport to `spawn`, cancelling any hop
    pub fn reset_position(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.hop = None;
    }

    /// Where to draw the player: on the hop arc while airborne
    pub fn display_position(&self) -> Vec2 {
        self.hop.map_or(self.position, |hop| hop.arc_point())
    }

    /// Sprite opacity during the hit flash (0.2 s blink cycles)
    pub fn flash_alpha(&self) -> f32 {
        if self.flash_timer <= 0.0 {
            return 1.0;
        }
        let phase = (self.flash_timer / HIT_FLASH_BLINK).fract();
        if phase >= 0.5 { 0.3 } else { 1.0 }
    }
}

/// Length of one hit-flash blink (fade down and back up)
pub const HIT_FLASH_BLINK: f32 = 0.2;

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub bounds: Bounds,
    /// Decoration seed (starfield)
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// 1-based level number
    pub current_level: u32,
    /// Player wins the level once above this height
    pub target_y: f32,
    pub player: Player,
    /// Live obstacles in build order
    pub entities: Vec<OrbitingEntity>,
    /// Live projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Score frozen at game over
    pub final_score: Option<u64>,
    /// Deferred logical transitions
    pub schedule: Scheduler,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    /// Start a fresh session on level 1
    pub fn new(bounds: Bounds, seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(
            bounds.spawn_point(),
            tuning.starting_lives,
            tuning.starting_shots,
        );
        let mut session = Self {
            bounds,
            seed,
            tuning,
            phase: SessionPhase::Playing,
            current_level: 1,
            target_y: 0.0,
            player,
            entities: Vec::new(),
            projectiles: Vec::new(),
            final_score: None,
            schedule: Scheduler::default(),
            events: Vec::new(),
            next_id: 1,
        };
        session.load_level();
        session.emit(GameEvent::MusicStart);
        log::info!("Session started (seed {})", seed);
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace all obstacles with a fresh layout for the current level
    pub fn load_level(&mut self) {
        let layout = build_level(self.current_level, self.bounds);
        self.target_y = layout.target_y;
        self.projectiles.clear();
        // IDs stay unique across rebuilds so stale contacts never alias
        let base = self.next_id;
        self.entities = layout
            .entities
            .into_iter()
            .map(|mut e| {
                e.id += base;
                e
            })
            .collect();
        self.next_id = base + self.entities.len() as u32;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn entity(&self, id: u32) -> Option<&OrbitingEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Remove a live obstacle, returning it if it was still present
    pub fn take_entity(&mut self, id: u32) -> Option<OrbitingEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    /// Remove a live projectile, returning it if it was still present
    pub fn take_projectile(&mut self, id: u32) -> Option<Projectile> {
        let index = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(index))
    }

    pub fn hazard_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_hazard).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_wraps_progress() {
        let mut e = OrbitingEntity::hazard(
            1,
            OrbitSpec::Circular { radius: 60.0 },
            Vec2::ZERO,
            0.2,
            0.95,
        );
        e.advance(1.0);
        assert!((e.progress - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_zero_speed_stays_put() {
        let mut e = OrbitingEntity::safe_planet(1, Vec2::new(100.0, 300.0));
        for _ in 0..10 {
            e.advance(0.016);
        }
        assert_eq!(e.position, Vec2::new(100.0, 300.0));
        assert_eq!(e.progress, 0.0);
    }

    #[test]
    fn test_safe_planet_classification() {
        let e = OrbitingEntity::safe_planet(1, Vec2::ZERO);
        assert!(e.is_safe_zone && !e.is_hazard && !e.is_destructible);
    }

    #[test]
    fn test_hazard_starts_on_its_orbit() {
        let e = OrbitingEntity::hazard(
            1,
            OrbitSpec::Circular { radius: 60.0 },
            Vec2::ZERO,
            0.1,
            0.25,
        );
        assert!((e.position - Vec2::new(0.0, 60.0)).length() < 1e-3);
    }

    #[test]
    fn test_fire_without_shots_is_noop() {
        let mut p = Player::new(Vec2::ZERO, 3, 0);
        assert!(p.fire(Vec2::Y).is_none());
        assert_eq!(p.shot_count, 0);
    }

    #[test]
    fn test_fire_spends_a_shot() {
        let mut p = Player::new(Vec2::new(200.0, 100.0), 3, 5);
        let spawn = p.fire(Vec2::Y).expect("has shots");
        assert_eq!(p.shot_count, 4);
        assert_eq!(spawn.origin, Vec2::new(200.0, 100.0));
        assert_eq!(spawn.velocity, Vec2::new(0.0, 500.0));
        assert_eq!(spawn.ttl, 2.0);
    }

    #[test]
    fn test_hop_lands_after_duration() {
        let mut p = Player::new(Vec2::new(200.0, 100.0), 3, 5);
        p.move_to(Vec2::new(200.0, 300.0));
        assert!(!p.update(0.1));
        // Logical position does not interpolate mid-hop
        assert_eq!(p.position, Vec2::new(200.0, 100.0));
        assert!(p.display_position().y > 100.0);
        assert!(!p.update(0.1));
        assert!(p.update(0.15));
        assert_eq!(p.position, Vec2::new(200.0, 300.0));
        assert!(p.hop.is_none());
    }

    #[test]
    fn test_apply_hit_saturates() {
        let mut p = Player::new(Vec2::ZERO, 1, 5);
        p.apply_hit();
        p.apply_hit();
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn test_projectile_expires() {
        let mut proj = Projectile::new(
            1,
            ProjectileSpawn {
                origin: Vec2::ZERO,
                velocity: Vec2::new(0.0, 500.0),
                ttl: 2.0,
            },
        );
        assert!(proj.update(1.0));
        assert_eq!(proj.pos, Vec2::new(0.0, 500.0));
        assert!(!proj.update(1.0));
    }

    #[test]
    fn test_session_ids_unique_across_rebuilds() {
        let mut s = Session::new(Bounds::new(400.0, 800.0), 7, Tuning::default());
        let first: Vec<u32> = s.entities.iter().map(|e| e.id).collect();
        s.load_level();
        assert!(s.entities.iter().all(|e| !first.contains(&e.id)));
        let id = s.next_entity_id();
        assert!(s.entities.iter().all(|e| e.id != id));
    }

    proptest! {
        #[test]
        fn prop_advance_keeps_progress_in_unit_range(
            start in 0.0f32..1.0,
            speed in 0.0f32..0.5,
            dt in 0.0f32..1.9,
        ) {
            let mut e = OrbitingEntity::hazard(
                1,
                OrbitSpec::Circular { radius: 60.0 },
                Vec2::ZERO,
                speed,
                start,
            );
            e.advance(dt);
            prop_assert!((0.0..1.0).contains(&e.progress), "progress {}", e.progress);
        }
    }
}
