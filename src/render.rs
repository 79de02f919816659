//! Render feed for the presentation layer
//!
//! Read-only snapshots of a session: what to draw where, HUD text and
//! banners. Drawing itself happens outside this crate.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Bounds;
use crate::consts::GOAL_ZONE_HEIGHT;
use crate::sim::{Session, SessionPhase};

pub use crate::sim::sprite::{HazardSprite, SpriteKind};

/// One drawable body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInstance {
    pub id: u32,
    pub kind: SpriteKind,
    pub position: Vec2,
    pub rotation: f32,
}

/// Player draw state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    /// On the hop arc while airborne
    pub position: Vec2,
    /// Below 1 while the hit flash blinks
    pub alpha: f32,
}

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub shots: u32,
    pub level: u32,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn lives_text(&self) -> String {
        self.lives.to_string()
    }

    pub fn shots_text(&self) -> String {
        format!("⚡ {}", self.shots)
    }
}

/// Centered overlay text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    LevelComplete { level: u32 },
    GameOver { final_score: u64 },
}

impl Banner {
    /// Main line, then an optional sub-line
    pub fn lines(&self) -> (String, Option<String>) {
        match self {
            Banner::LevelComplete { level } => (format!("Level {} Complete!", level), None),
            Banner::GameOver { final_score } => (
                "Game Over".to_string(),
                Some(format!("Final Score: {}", final_score)),
            ),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct RenderFeed {
    pub sprites: Vec<SpriteInstance>,
    pub projectiles: Vec<Vec2>,
    pub player: PlayerView,
    pub hud: Hud,
    pub banner: Option<Banner>,
    /// Goal band: bottom-left corner and size
    pub goal_zone: (Vec2, Vec2),
}

impl RenderFeed {
    pub fn from_session(session: &Session) -> Self {
        let sprites = session
            .entities
            .iter()
            .map(|e| SpriteInstance {
                id: e.id,
                kind: e.sprite,
                position: e.position,
                rotation: e.rotation,
            })
            .collect();

        let banner = match session.phase {
            SessionPhase::Playing => None,
            SessionPhase::LevelTransition => Some(Banner::LevelComplete {
                level: session.current_level - 1,
            }),
            SessionPhase::GameOver => Some(Banner::GameOver {
                final_score: session.final_score.unwrap_or(session.player.score),
            }),
        };

        let bounds = session.bounds;
        Self {
            sprites,
            projectiles: session.projectiles.iter().map(|p| p.pos).collect(),
            player: PlayerView {
                position: session.player.display_position(),
                alpha: session.player.flash_alpha(),
            },
            hud: Hud {
                score: session.player.score,
                lives: session.player.lives,
                shots: session.player.shot_count,
                level: session.current_level,
            },
            banner,
            goal_zone: (
                Vec2::new(0.0, bounds.height - GOAL_ZONE_HEIGHT),
                Vec2::new(bounds.width, GOAL_ZONE_HEIGHT),
            ),
        }
    }
}

/// Background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    pub alpha: f32,
    /// Seconds for one fade-down/fade-up cycle half
    pub twinkle_secs: f32,
}

/// Parallax layers of twinkling stars (decoration only)
#[derive(Debug, Clone)]
pub struct Starfield {
    /// Back to front
    pub layers: Vec<Vec<Star>>,
}

pub const STAR_LAYERS: usize = 3;
pub const STARS_PER_LAYER: usize = 100;

impl Starfield {
    /// Scatter stars across `bounds`; the same seed gives the same sky
    pub fn generate(bounds: Bounds, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let layers = (0..STAR_LAYERS)
            .map(|_| {
                (0..STARS_PER_LAYER)
                    .map(|_| Star {
                        position: Vec2::new(
                            rng.random_range(0.0..=bounds.width),
                            rng.random_range(0.0..=bounds.height),
                        ),
                        radius: rng.random_range(0.5..=2.0),
                        alpha: rng.random_range(0.3..=0.8),
                        twinkle_secs: rng.random_range(1.0..=3.0),
                    })
                    .collect()
            })
            .collect();
        Self { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    fn session() -> Session {
        Session::new(Bounds::new(400.0, 800.0), 42, Tuning::default())
    }

    #[test]
    fn test_feed_mirrors_session() {
        let s = session();
        let feed = RenderFeed::from_session(&s);
        assert_eq!(feed.sprites.len(), 14);
        assert_eq!(
            feed.sprites
                .iter()
                .filter(|sp| sp.kind == SpriteKind::SafePlanet)
                .count(),
            2
        );
        assert_eq!(feed.hud.score_text(), "Score: 0");
        assert_eq!(feed.hud.lives_text(), "3");
        assert_eq!(feed.hud.shots_text(), "⚡ 5");
        assert_eq!(feed.player.position, Vec2::new(200.0, 100.0));
        assert_eq!(feed.player.alpha, 1.0);
        assert!(feed.banner.is_none());
    }

    #[test]
    fn test_banners_follow_phase() {
        let mut s = session();
        s.on_level_complete();
        let feed = RenderFeed::from_session(&s);
        assert_eq!(feed.banner, Some(Banner::LevelComplete { level: 1 }));
        assert_eq!(feed.banner.unwrap().lines().0, "Level 1 Complete!");

        s.on_game_over();
        let (title, sub) = RenderFeed::from_session(&s).banner.unwrap().lines();
        assert_eq!(title, "Game Over");
        assert_eq!(sub.as_deref(), Some("Final Score: 100"));
    }

    #[test]
    fn test_starfield_seeded() {
        let bounds = Bounds::new(400.0, 800.0);
        let a = Starfield::generate(bounds, 9);
        let b = Starfield::generate(bounds, 9);
        assert_eq!(a.layers.len(), STAR_LAYERS);
        assert!(a.layers.iter().all(|l| l.len() == STARS_PER_LAYER));
        assert_eq!(a.layers[2][17], b.layers[2][17]);
        for star in a.layers.iter().flatten() {
            assert!((0.5..=2.0).contains(&star.radius));
            assert!((0.3..=0.8).contains(&star.alpha));
            assert!(star.position.x <= bounds.width && star.position.y <= bounds.height);
        }
    }
}
