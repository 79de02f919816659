//! Level layout generation
//!
//! Layouts are a pure function of the level number and playfield size.
//! Every level currently reuses the same lane template.

use glam::Vec2;

use super::orbit::OrbitSpec;
use super::state::OrbitingEntity;
use crate::Bounds;
use crate::consts::GOAL_MARGIN;

/// Height of the first lane
pub const FIRST_LANE_Y: f32 = 200.0;
/// Number of orbit lanes per level
pub const LANE_COUNT: usize = 4;

/// One row of identical orbiters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    pub y: f32,
    pub count: usize,
    pub orbit: OrbitSpec,
    pub speed: f32,
}

/// Obstacles and goal line for one level
#[derive(Debug, Clone)]
pub struct LevelLayout {
    /// Entities with IDs numbered from 0 in build order
    pub entities: Vec<OrbitingEntity>,
    pub target_y: f32,
}

/// Lane template for a level
pub fn lanes_for_level(_level: u32, bounds: Bounds) -> [Lane; LANE_COUNT] {
    let spacing = bounds.height / 8.0;
    let lane_y = |k: usize| FIRST_LANE_Y + k as f32 * spacing;

    [
        Lane {
            y: lane_y(0),
            count: 3,
            orbit: OrbitSpec::Circular { radius: 60.0 },
            speed: 0.1,
        },
        Lane {
            y: lane_y(1),
            count: 4,
            orbit: OrbitSpec::Elliptical {
                radius_x: 80.0,
                radius_y: 40.0,
            },
            speed: 0.15,
        },
        Lane {
            y: lane_y(2),
            count: 2,
            orbit: OrbitSpec::Figure8 {
                width: 100.0,
                height: 50.0,
            },
            speed: 0.12,
        },
        Lane {
            y: lane_y(3),
            count: 3,
            orbit: OrbitSpec::Wavy {
                amplitude: 40.0,
                wavelength: bounds.width,
                direction_degrees: 0.0,
            },
            speed: 0.08,
        },
    ]
}

/// Positions of the two safe planets
pub fn safe_planet_positions(bounds: Bounds) -> [Vec2; 2] {
    [
        Vec2::new(bounds.width / 4.0, 300.0),
        Vec2::new(3.0 * bounds.width / 4.0, 500.0),
    ]
}

/// Build the obstacle layout for `level`
pub fn build_level(level: u32, bounds: Bounds) -> LevelLayout {
    let lanes = lanes_for_level(level, bounds);
    let mut entities = Vec::new();

    for lane in &lanes {
        let spacing = bounds.width / (lane.count + 1) as f32;
        for i in 0..lane.count {
            let center = Vec2::new(spacing * (i + 1) as f32, lane.y);
            // Stagger starting points so a lane never moves in lockstep
            let progress = i as f32 / lane.count as f32;
            let id = entities.len() as u32;
            entities.push(OrbitingEntity::hazard(
                id,
                lane.orbit,
                center,
                lane.speed,
                progress,
            ));
        }
    }

    for position in safe_planet_positions(bounds) {
        let id = entities.len() as u32;
        entities.push(OrbitingEntity::safe_planet(id, position));
    }

    let target_y = bounds.height - GOAL_MARGIN;
    log::debug!(
        "Level {}: {} obstacles, goal at y={}",
        level,
        entities.len(),
        target_y
    );

    LevelLayout { entities, target_y }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(400.0, 800.0);

    #[test]
    fn test_level_one_layout() {
        let layout = build_level(1, BOUNDS);
        assert_eq!(layout.target_y, 650.0);

        let hazards: Vec<_> = layout.entities.iter().filter(|e| e.is_hazard).collect();
        let safe: Vec<_> = layout.entities.iter().filter(|e| e.is_safe_zone).collect();
        assert_eq!(hazards.len(), 12);
        assert_eq!(safe.len(), 2);
        assert!(hazards.iter().all(|e| e.is_destructible));
        assert!(safe.iter().all(|e| !e.is_destructible && e.speed == 0.0));
    }

    #[test]
    fn test_lane_heights_and_counts() {
        let layout = build_level(1, BOUNDS);
        for (y, expected) in [(200.0, 3), (300.0, 4), (400.0, 2), (500.0, 3)] {
            let n = layout
                .entities
                .iter()
                .filter(|e| e.is_hazard && e.center.y == y)
                .count();
            assert_eq!(n, expected, "lane at y={}", y);
        }
    }

    #[test]
    fn test_lane_spacing_and_stagger() {
        let layout = build_level(1, BOUNDS);
        let lane: Vec<_> = layout
            .entities
            .iter()
            .filter(|e| e.is_hazard && e.center.y == 300.0)
            .collect();
        let xs: Vec<f32> = lane.iter().map(|e| e.center.x).collect();
        assert_eq!(xs, vec![80.0, 160.0, 240.0, 320.0]);
        let progress: Vec<f32> = lane.iter().map(|e| e.progress).collect();
        assert_eq!(progress, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_safe_planets_placed() {
        let layout = build_level(1, BOUNDS);
        let safe: Vec<Vec2> = layout
            .entities
            .iter()
            .filter(|e| e.is_safe_zone)
            .map(|e| e.position)
            .collect();
        assert_eq!(safe, vec![Vec2::new(100.0, 300.0), Vec2::new(300.0, 500.0)]);
    }

    #[test]
    fn test_layout_is_deterministic_and_flat() {
        let a = build_level(1, BOUNDS);
        let b = build_level(5, BOUNDS);
        assert_eq!(a.entities.len(), b.entities.len());
        for (x, y) in a.entities.iter().zip(&b.entities) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.orbit, y.orbit);
            assert_eq!(x.sprite, y.sprite);
        }
    }
}
