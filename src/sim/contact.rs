//! Contact resolution
//!
//! Maps a pair of touching bodies, reported by the physics layer, to a game
//! rule outcome. Detection itself happens elsewhere.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, Session, SessionPhase};
use crate::consts::DESTROY_SCORE;

/// Collision category of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    Hazard,
    SafeZone,
    Projectile,
}

impl Category {
    /// Bit value used by circle contact engines
    pub const fn bit(self) -> u8 {
        match self {
            Category::Player => 1,
            Category::Hazard => 2,
            Category::SafeZone => 4,
            Category::Projectile => 8,
        }
    }

    /// Categories this body wants contact reports for
    pub const fn contact_mask(self) -> CategorySet {
        match self {
            Category::Player => CategorySet::EMPTY
                .with(Category::Hazard)
                .with(Category::SafeZone),
            Category::Hazard | Category::SafeZone => CategorySet::EMPTY.with(Category::Player),
            Category::Projectile => CategorySet::EMPTY.with(Category::Hazard),
        }
    }
}

/// Small set of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    pub const fn with(self, category: Category) -> Self {
        CategorySet(self.0 | category.bit())
    }

    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }
}

/// Which live object a contact refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Player,
    Orbiting(u32),
    Projectile(u32),
}

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactBody {
    pub category: Category,
    pub body: Body,
}

/// Two bodies that started touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactEvent {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl ContactEvent {
    pub fn new(a: ContactBody, b: ContactBody) -> Self {
        Self { a, b }
    }

    /// Sides ordered by category so (A, B) and (B, A) look the same
    pub fn ordered(&self) -> (ContactBody, ContactBody) {
        if self.a.category <= self.b.category {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// What a contact did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    /// No rule applies, or a body was already gone
    Ignored,
    /// Player lost a life and respawned
    PlayerHit { lives_left: u32 },
    /// Player lost the last life
    GameOver,
    /// Projectile spent on a hazard that survives
    ProjectileAbsorbed,
    /// Hazard shot down
    HazardDestroyed { id: u32 },
}

/// Apply the game rule for a single contact
pub fn resolve_contact(session: &mut Session, contact: &ContactEvent) -> ContactOutcome {
    if session.phase != SessionPhase::Playing {
        return ContactOutcome::Ignored;
    }

    let (first, second) = contact.ordered();
    match (first.category, second.category) {
        (Category::Player, Category::Hazard) => player_hits_hazard(session, second.body),
        (Category::Hazard, Category::Projectile) => {
            projectile_hits_hazard(session, second.body, first.body)
        }
        _ => ContactOutcome::Ignored,
    }
}

/// Apply a frame's worth of contacts in order.
///
/// Once the player is hit it has already moved back to spawn, so further
/// player contacts from the same batch are stale and dropped.
pub fn resolve_contacts(session: &mut Session, contacts: &[ContactEvent]) -> Vec<ContactOutcome> {
    let mut player_was_hit = false;
    let mut outcomes = Vec::with_capacity(contacts.len());

    for contact in contacts {
        let involves_player = contact.a.body == Body::Player || contact.b.body == Body::Player;
        if player_was_hit && involves_player {
            outcomes.push(ContactOutcome::Ignored);
            continue;
        }

        let outcome = resolve_contact(session, contact);
        if matches!(
            outcome,
            ContactOutcome::PlayerHit { .. } | ContactOutcome::GameOver
        ) {
            player_was_hit = true;
        }
        outcomes.push(outcome);
    }

    outcomes
}

fn player_hits_hazard(session: &mut Session, hazard: Body) -> ContactOutcome {
    let Body::Orbiting(id) = hazard else {
        return ContactOutcome::Ignored;
    };
    if session.entity(id).is_none_or(|e| !e.is_hazard) {
        return ContactOutcome::Ignored;
    }

    session.on_player_hit();
    if session.is_game_over() {
        ContactOutcome::GameOver
    } else {
        ContactOutcome::PlayerHit {
            lives_left: session.player.lives,
        }
    }
}

fn projectile_hits_hazard(session: &mut Session, projectile: Body, hazard: Body) -> ContactOutcome {
    let (Body::Projectile(projectile_id), Body::Orbiting(hazard_id)) = (projectile, hazard) else {
        return ContactOutcome::Ignored;
    };

    // Remove the projectile first: a second report of the same hit finds
    // nothing to spend
    if session.take_projectile(projectile_id).is_none() {
        return ContactOutcome::Ignored;
    }

    let destructible = match session.entity(hazard_id) {
        Some(e) => e.is_hazard && e.is_destructible,
        None => return ContactOutcome::ProjectileAbsorbed,
    };
    if !destructible {
        return ContactOutcome::ProjectileAbsorbed;
    }

    let Some(entity) = session.take_entity(hazard_id) else {
        return ContactOutcome::ProjectileAbsorbed;
    };
    session.player.score += DESTROY_SCORE;
    session.emit(GameEvent::Explosion {
        position: entity.position,
    });
    log::debug!("Hazard {} destroyed at {:?}", hazard_id, entity.position);

    ContactOutcome::HazardDestroyed { id: hazard_id }
}
