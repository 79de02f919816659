//! Cosmic Crossing - headless runner
//!
//! Drives a scripted session through the frame clock, the reference contact
//! detector and a logging audio backend. Usage:
//!
//! ```text
//! cosmic-crossing [settings.json]
//! ```

use std::path::PathBuf;

use cosmic_crossing::audio::{AudioManager, LogBackend};
use cosmic_crossing::physics::ContactDetector;
use cosmic_crossing::render::{RenderFeed, Starfield};
use cosmic_crossing::sim::{FrameClock, GameEvent, Session, TickInput, resolve_contacts, tick};
use cosmic_crossing::{Bounds, Settings};
use glam::Vec2;

/// Simulated display refresh
const FRAME_SECS: f64 = 1.0 / 60.0;
/// Give up after this much simulated time
const MAX_RUN_SECS: f64 = 120.0;
/// Seconds between scripted hops
const HOP_INTERVAL: f64 = 0.5;
/// Seconds between scripted shots
const SHOT_INTERVAL: f64 = 1.2;
/// Vertical distance of each scripted hop
const HOP_DISTANCE: f32 = 80.0;
/// Sessions to play before stopping
const MAX_SESSIONS: u32 = 2;

/// Naive autopilot: hop straight up, shoot at the nearest hazard ahead
struct Autopilot {
    next_hop: f64,
    next_shot: f64,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            next_hop: HOP_INTERVAL,
            next_shot: SHOT_INTERVAL,
        }
    }

    fn input(&mut self, session: &Session, now: f64) -> TickInput {
        let mut input = TickInput::default();
        let player = session.player.position;

        if now >= self.next_hop && session.player.hop.is_none() {
            self.next_hop = now + HOP_INTERVAL;
            input.tap = Some(player + Vec2::new(0.0, HOP_DISTANCE));
        }

        if now >= self.next_shot {
            self.next_shot = now + SHOT_INTERVAL;
            input.fire = session
                .entities
                .iter()
                .filter(|e| e.is_hazard && e.position.y > player.y)
                .min_by(|a, b| {
                    a.position
                        .distance_squared(player)
                        .total_cmp(&b.position.distance_squared(player))
                })
                .map(|e| (e.position - player).normalize_or_zero());
        }

        input
    }
}

fn main() {
    env_logger::init();
    log::info!("Cosmic Crossing (headless) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .map(|path| Settings::load_or_default(&path))
        .unwrap_or_default();

    let bounds = Bounds::new(400.0, 800.0);
    let mut audio = AudioManager::new(LogBackend::default(), &settings);
    let mut clock = FrameClock::default();
    let mut detector = ContactDetector::new();

    let mut seed = 0x00C0_FFEE_u64;
    let mut session = Session::new(bounds, seed, settings.tuning.clone());
    let starfield = Starfield::generate(bounds, seed);
    log::info!(
        "Game initialized with seed: {} ({} star layers)",
        seed,
        starfield.layers.len()
    );

    let mut autopilot = Autopilot::new();
    let mut sessions_played = 1;
    let mut now = 0.0_f64;

    while now < MAX_RUN_SECS {
        let dt = clock.delta(now);
        let input = autopilot.input(&session, now);
        tick(&mut session, &input, dt);

        let contacts = detector.detect(&session);
        resolve_contacts(&mut session, &contacts);

        audio.update(dt);
        let mut restart = false;
        for event in session.drain_events() {
            audio.handle_event(&event);
            match event {
                GameEvent::LevelComplete { level } => {
                    let feed = RenderFeed::from_session(&session);
                    log::info!("{} | {}", feed.hud.score_text(), feed.hud.shots_text());
                    log::info!("Level {} cleared at t={:.1}s", level, now);
                }
                GameEvent::RestartDue => restart = true,
                _ => {}
            }
        }

        if restart {
            let final_score = session.final_score.unwrap_or(session.player.score);
            log::info!("Session {} final score: {}", sessions_played, final_score);
            if sessions_played >= MAX_SESSIONS {
                break;
            }
            sessions_played += 1;
            seed = seed.wrapping_add(1);
            session = Session::new(bounds, seed, settings.tuning.clone());
            detector.reset();
            autopilot = Autopilot::new();
            log::info!("Game restarted with seed: {}", seed);
        }

        now += FRAME_SECS;
    }

    let feed = RenderFeed::from_session(&session);
    log::info!(
        "Stopped on level {}: {}, lives {}, {} sfx played",
        feed.hud.level,
        feed.hud.score_text(),
        feed.hud.lives_text(),
        audio.backend().played.len()
    );
}
