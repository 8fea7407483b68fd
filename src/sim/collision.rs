//! Collision resolution between obstacles, projectiles and the craft
//!
//! Coarse axis-aligned boxes only. Obstacles are visited in array order and
//! projectiles in slot order, so outcomes are deterministic.

use glam::Vec2;

use super::craft::Craft;
use super::entity::VectorEntity;
use super::field::ObstacleField;
use super::pool::ProjectilePool;

/// What a collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Obstacles destroyed by projectiles
    pub obstacles_shot: u32,
    /// Obstacles that hit the craft (craft was reset each time)
    pub craft_hits: u32,
}

/// Resolve every collision for this tick.
///
/// For each obstacle alive when the pass starts:
/// - the first live projectile whose position is inside the obstacle's box
///   kills both; no later projectile is tested against it.
/// - if the obstacle's box overlaps the craft's box, the obstacle dies and
///   the craft goes back to `respawn`. This is checked even when the
///   obstacle was shot a moment earlier in the same pass.
pub fn resolve_collisions(
    obstacles: &mut ObstacleField,
    projectiles: &mut ProjectilePool,
    craft: &mut Craft,
    respawn: Vec2,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for (index, obstacle) in obstacles.obstacles_mut().iter_mut().enumerate() {
        if !obstacle.is_alive() {
            continue;
        }
        let bounds = obstacle.bounds();

        if let Some((slot, projectile)) = projectiles
            .slots_mut()
            .iter_mut()
            .enumerate()
            .find(|(_, p)| p.is_alive() && bounds.contains(p.pos()))
        {
            projectile.set_alive(false);
            obstacle.set_alive(false);
            outcome.obstacles_shot += 1;
            log::debug!("Projectile {slot} destroyed obstacle {index}");
        }

        if bounds.intersects(&craft.bounds()) {
            obstacle.set_alive(false);
            craft.reset(respawn);
            outcome.craft_hits += 1;
            log::debug!("Obstacle {index} hit the craft; respawning");
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::Obstacle;

    fn field(positions: &[Vec2]) -> ObstacleField {
        ObstacleField::from_obstacles(positions.iter().map(|&p| Obstacle::at(p)).collect())
    }

    #[test]
    fn test_projectile_inside_box_kills_both() {
        let mut obstacles = field(&[Vec2::new(100.0, 100.0)]);
        let mut pool = ProjectilePool::new(4);
        let h = pool.fire(Vec2::new(110.0, 90.0), 0.0, Vec2::ZERO);
        let mut craft = Craft::new(Vec2::new(320.0, 240.0));

        let outcome =
            resolve_collisions(&mut obstacles, &mut pool, &mut craft, Vec2::new(320.0, 240.0));
        assert_eq!(outcome.obstacles_shot, 1);
        assert_eq!(outcome.craft_hits, 0);
        assert!(!obstacles.get(0).unwrap().is_alive());
        assert!(!pool.get(h).unwrap().is_alive());
    }

    #[test]
    fn test_projectile_outside_box_survives() {
        let mut obstacles = field(&[Vec2::new(100.0, 100.0)]);
        let mut pool = ProjectilePool::new(4);
        let h = pool.fire(Vec2::new(120.0, 100.0), 0.0, Vec2::ZERO);
        let mut craft = Craft::new(Vec2::new(320.0, 240.0));

        let outcome =
            resolve_collisions(&mut obstacles, &mut pool, &mut craft, Vec2::new(320.0, 240.0));
        assert_eq!(outcome, CollisionOutcome::default());
        assert!(obstacles.get(0).unwrap().is_alive());
        assert!(pool.get(h).unwrap().is_alive());
    }

    #[test]
    fn test_one_projectile_per_obstacle() {
        let mut obstacles = field(&[Vec2::new(100.0, 100.0)]);
        let mut pool = ProjectilePool::new(4);
        let first = pool.fire(Vec2::new(100.0, 100.0), 0.0, Vec2::ZERO);
        let second = pool.fire(Vec2::new(101.0, 101.0), 0.0, Vec2::ZERO);
        let mut craft = Craft::new(Vec2::new(320.0, 240.0));

        resolve_collisions(&mut obstacles, &mut pool, &mut craft, Vec2::new(320.0, 240.0));
        assert!(!pool.get(first).unwrap().is_alive());
        assert!(pool.get(second).unwrap().is_alive());
    }

    #[test]
    fn test_one_obstacle_per_projectile() {
        // Overlapping obstacles: the first one in array order takes the hit
        let mut obstacles = field(&[Vec2::new(100.0, 100.0), Vec2::new(105.0, 100.0)]);
        let mut pool = ProjectilePool::new(4);
        pool.fire(Vec2::new(102.0, 100.0), 0.0, Vec2::ZERO);
        let mut craft = Craft::new(Vec2::new(320.0, 240.0));

        let outcome =
            resolve_collisions(&mut obstacles, &mut pool, &mut craft, Vec2::new(320.0, 240.0));
        assert_eq!(outcome.obstacles_shot, 1);
        assert!(!obstacles.get(0).unwrap().is_alive());
        assert!(obstacles.get(1).unwrap().is_alive());
    }

    #[test]
    fn test_craft_overlap_resets_craft() {
        let center = Vec2::new(320.0, 240.0);
        let mut obstacles = field(&[Vec2::new(50.0, 50.0)]);
        let mut pool = ProjectilePool::new(1);
        let mut craft = Craft::new(Vec2::new(70.0, 60.0));
        craft.face_angle = 90.0;
        craft.thrust(1.0);

        let outcome = resolve_collisions(&mut obstacles, &mut pool, &mut craft, center);
        assert_eq!(outcome.craft_hits, 1);
        assert!(!obstacles.get(0).unwrap().is_alive());
        assert_eq!(craft.pos(), center);
        assert_eq!(craft.vel(), Vec2::ZERO);
        assert_eq!(craft.face_angle, 0.0);
        assert_eq!(craft.move_angle(), 0.0);
    }

    #[test]
    fn test_shot_obstacle_still_hits_craft_same_tick() {
        let center = Vec2::new(320.0, 240.0);
        let mut obstacles = field(&[Vec2::new(50.0, 50.0)]);
        let mut pool = ProjectilePool::new(1);
        pool.fire(Vec2::new(50.0, 50.0), 0.0, Vec2::ZERO);
        let mut craft = Craft::new(Vec2::new(60.0, 50.0));

        let outcome = resolve_collisions(&mut obstacles, &mut pool, &mut craft, center);
        assert_eq!(outcome.obstacles_shot, 1);
        assert_eq!(outcome.craft_hits, 1);
        assert_eq!(craft.pos(), center);
    }

    #[test]
    fn test_dead_entities_ignored() {
        let mut obstacles = field(&[Vec2::new(320.0, 240.0)]);
        obstacles.get_mut(0).unwrap().set_alive(false);
        let mut pool = ProjectilePool::new(1);
        let h = pool.fire(Vec2::new(320.0, 240.0), 0.0, Vec2::ZERO);
        let mut craft = Craft::new(Vec2::new(320.0, 240.0));
        craft.set_vel(Vec2::ONE);

        let outcome = resolve_collisions(&mut obstacles, &mut pool, &mut craft, Vec2::ZERO);
        assert_eq!(outcome, CollisionOutcome::default());
        assert!(pool.get(h).unwrap().is_alive());
        assert_eq!(craft.vel(), Vec2::ONE);
    }
}
