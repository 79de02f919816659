//! Per-frame simulation step
//!
//! Session controller: advances orbits and projectiles, lands hops, detects
//! the goal line and drives level and game-over transitions.

use glam::Vec2;

use super::schedule::ScheduledAction;
use super::state::{GameEvent, Projectile, Session, SessionPhase};
use crate::consts::LEVEL_SCORE;

/// Input gathered for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap location: hop there
    pub tap: Option<Vec2>,
    /// Fire gesture direction
    pub fire: Option<Vec2>,
}

/// Turns host timestamps into frame deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous call; the first call returns 0 so the
    /// world does not jump on startup
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = self.last.map_or(0.0, |last| (now - last).max(0.0));
        self.last = Some(now);
        dt as f32
    }
}

/// Apply one frame of input, then advance the session by `dt`
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if session.phase == SessionPhase::Playing {
        if let Some(target) = input.tap {
            session.move_player(target);
        }
        if let Some(direction) = input.fire {
            session.fire(direction);
        }
    }
    session.step(dt);
}

impl Session {
    /// Start a hop toward a tapped point
    pub fn move_player(&mut self, target: Vec2) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.player.move_to(target);
        self.emit(GameEvent::Jump);
    }

    /// Fire a projectile; returns its ID, or `None` when out of shots
    pub fn fire(&mut self, direction: Vec2) -> Option<u32> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        let spawn = self.player.fire(direction)?;
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, spawn));
        self.emit(GameEvent::Shoot);
        Some(id)
    }

    /// Advance the session by `dt` seconds.
    ///
    /// Only `Playing` moves the world. Other phases just run the scheduler so
    /// banner and restart delays still elapse.
    pub fn step(&mut self, dt: f32) {
        for action in self.schedule.advance(dt) {
            self.run_scheduled(action);
        }

        if self.phase != SessionPhase::Playing {
            return;
        }

        for entity in &mut self.entities {
            entity.advance(dt);
        }
        self.projectiles.retain_mut(|p| p.update(dt));
        self.player.update(dt);

        if self.player.position.y > self.target_y {
            self.on_level_complete();
        }
    }

    /// Score the level, build the next one and show the banner
    pub fn on_level_complete(&mut self) {
        let completed = self.current_level;
        self.player.score += LEVEL_SCORE * u64::from(completed);
        self.current_level += 1;

        self.player.reset_position(self.bounds.spawn_point());
        self.player.shot_count = self.tuning.starting_shots + self.current_level;
        self.load_level();

        self.phase = SessionPhase::LevelTransition;
        self.schedule
            .schedule(self.tuning.level_banner_secs, ScheduledAction::ResumePlay);
        self.emit(GameEvent::LevelComplete { level: completed });
        log::info!(
            "Level {} complete (score {}), next level {}",
            completed,
            self.player.score,
            self.current_level
        );
    }

    /// Take a life; respawn or end the run
    pub fn on_player_hit(&mut self) {
        self.player.apply_hit();
        self.emit(GameEvent::PlayerHit {
            lives_left: self.player.lives,
        });

        if self.player.lives == 0 {
            self.on_game_over();
        } else {
            self.player.reset_position(self.bounds.spawn_point());
            self.player.flash_timer = self.tuning.hit_flash_secs;
            log::debug!("Player hit, {} lives left", self.player.lives);
        }
    }

    /// Freeze the run and start the restart countdown
    pub fn on_game_over(&mut self) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        let final_score = self.player.score;
        self.phase = SessionPhase::GameOver;
        self.final_score = Some(final_score);
        self.player.hop = None;
        self.projectiles.clear();

        self.schedule
            .schedule(self.tuning.restart_delay_secs, ScheduledAction::RestartDue);
        self.emit(GameEvent::GameOver { final_score });
        self.emit(GameEvent::MusicStop);
        log::info!(
            "Game over on level {} with score {}",
            self.current_level,
            final_score
        );
    }

    fn run_scheduled(&mut self, action: ScheduledAction) {
        match action {
            ScheduledAction::ResumePlay => {
                if self.phase == SessionPhase::LevelTransition {
                    self.phase = SessionPhase::Playing;
                    self.emit(GameEvent::LevelStarted {
                        level: self.current_level,
                    });
                }
            }
            ScheduledAction::RestartDue => {
                if self.phase == SessionPhase::GameOver {
                    self.emit(GameEvent::RestartDue);
                }
            }
        }
    }
}
