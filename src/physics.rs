//! Reference contact detector
//!
//! Circle-overlap stand-in for the host's physics engine. Produces the
//! [`ContactEvent`]s the simulation consumes, reporting each pair only on the
//! frame it starts touching.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::{ORBITER_RADIUS, PLAYER_RADIUS, PROJECTILE_RADIUS, SAFE_PLANET_SCALE};
use crate::sim::{Body, Category, ContactBody, ContactEvent, Session};

/// A collision circle tagged with its category
#[derive(Debug, Clone, Copy)]
struct Circle {
    side: ContactBody,
    center: Vec2,
    radius: f32,
}

/// Two circles overlap (touching counts)
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}

/// Tracks touching pairs between frames
#[derive(Debug, Default)]
pub struct ContactDetector {
    touching: HashSet<(Body, Body)>,
}

impl ContactDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contacts that began since the previous call
    pub fn detect(&mut self, session: &Session) -> Vec<ContactEvent> {
        let circles = collect_circles(session);
        let mut now_touching = HashSet::new();
        let mut began = Vec::new();

        for (i, a) in circles.iter().enumerate() {
            for b in &circles[i + 1..] {
                let wanted = a.side.category.contact_mask().contains(b.side.category)
                    || b.side.category.contact_mask().contains(a.side.category);
                if !wanted || !circles_touch(a.center, a.radius, b.center, b.radius) {
                    continue;
                }

                let key = pair_key(a.side.body, b.side.body);
                if !self.touching.contains(&key) {
                    began.push(ContactEvent::new(a.side, b.side));
                }
                now_touching.insert(key);
            }
        }

        self.touching = now_touching;
        began
    }

    /// Forget all pairs (after a respawn or a new session)
    pub fn reset(&mut self) {
        self.touching.clear();
    }
}

fn pair_key(a: Body, b: Body) -> (Body, Body) {
    if a <= b { (a, b) } else { (b, a) }
}

fn collect_circles(session: &Session) -> Vec<Circle> {
    let mut circles = Vec::with_capacity(session.entities.len() + session.projectiles.len() + 1);

    circles.push(Circle {
        side: ContactBody {
            category: Category::Player,
            body: Body::Player,
        },
        center: session.player.position,
        radius: PLAYER_RADIUS,
    });

    for e in &session.entities {
        let (category, radius) = if e.is_hazard {
            (Category::Hazard, ORBITER_RADIUS)
        } else {
            (Category::SafeZone, ORBITER_RADIUS * SAFE_PLANET_SCALE)
        };
        circles.push(Circle {
            side: ContactBody {
                category,
                body: Body::Orbiting(e.id),
            },
            center: e.position,
            radius,
        });
    }

    for p in &session.projectiles {
        circles.push(Circle {
            side: ContactBody {
                category: Category::Projectile,
                body: Body::Projectile(p.id),
            },
            center: p.pos,
            radius: PROJECTILE_RADIUS,
        });
    }

    circles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ContactOutcome, SessionPhase, resolve_contacts};
    use crate::{Bounds, Tuning};

    fn session() -> Session {
        Session::new(Bounds::new(400.0, 800.0), 3, Tuning::default())
    }

    #[test]
    fn test_circles_touch() {
        assert!(circles_touch(Vec2::ZERO, 20.0, Vec2::new(40.0, 0.0), 20.0));
        assert!(!circles_touch(Vec2::ZERO, 20.0, Vec2::new(41.0, 0.0), 20.0));
    }

    #[test]
    fn test_spawn_is_clear_of_hazards() {
        let s = session();
        let mut detector = ContactDetector::new();
        assert!(detector.detect(&s).is_empty());
    }

    #[test]
    fn test_contact_reported_once_while_touching() {
        let mut s = session();
        let hazard = s.entities[0].position;
        s.player.position = hazard;
        let mut detector = ContactDetector::new();

        let first = detector.detect(&s);
        assert_eq!(first.len(), 1);
        assert!(detector.detect(&s).is_empty());

        s.player.position = Vec2::new(-500.0, -500.0);
        assert!(detector.detect(&s).is_empty());
        s.player.position = hazard;
        assert_eq!(detector.detect(&s).len(), 1);
    }

    #[test]
    fn test_projectiles_ignore_safe_planets() {
        let mut s = session();
        let safe = s.entities.iter().find(|e| e.is_safe_zone).unwrap().position;
        s.player.position = Vec2::new(-500.0, -500.0);
        s.fire(Vec2::ZERO).unwrap();
        s.projectiles[0].pos = safe;
        let mut detector = ContactDetector::new();
        assert!(detector.detect(&s).is_empty());
    }

    #[test]
    fn test_shot_hazard_end_to_end() {
        let mut s = session();
        let target = s.entities[0].id;
        let position = s.entities[0].position;
        s.fire(Vec2::ZERO).unwrap();
        s.projectiles[0].pos = position;

        let mut detector = ContactDetector::new();
        let contacts = detector.detect(&s);
        let outcomes = resolve_contacts(&mut s, &contacts);
        assert!(outcomes.contains(&ContactOutcome::HazardDestroyed { id: target }));
        assert!(s.entity(target).is_none());
        assert_eq!(s.player.score, 10);
        assert_eq!(s.phase, SessionPhase::Playing);
    }
}
