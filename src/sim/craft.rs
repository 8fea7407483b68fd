//! The player's craft

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, Shape, VectorEntity};
use super::pool::{ProjectileHandle, ProjectilePool};
use crate::consts::{CRAFT_HALF_EXTENT, FORWARD_OFFSET};
use crate::{heading_vector, normalize_degrees};

const CRAFT_XS: [i32; 6] = [-6, -3, 0, 3, 6, 0];
const CRAFT_YS: [i32; 6] = [6, 7, 7, 7, 6, -7];

/// Rotation direction for a rotate intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    fn sign(self) -> f32 {
        match self {
            Turn::Left => -1.0,
            Turn::Right => 1.0,
        }
    }
}

/// The player's craft. Facing (where the nose points) is separate from the
/// movement angle (the heading of the last thrust).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Craft {
    pub body: Body,
    /// Visual orientation, degrees in [0, 360)
    pub face_angle: f32,
}

impl Craft {
    /// Create the craft at `pos`
    pub fn new(pos: Vec2) -> Self {
        let mut body = Body::new(Shape::polygon(&CRAFT_XS, &CRAFT_YS), true);
        body.pos = pos;
        Self {
            body,
            face_angle: 0.0,
        }
    }

    /// Heading the nose points along (face angle shifted so 0 means up)
    #[inline]
    pub fn forward_heading(&self) -> f32 {
        normalize_degrees(self.face_angle - FORWARD_OFFSET)
    }

    /// Turn the nose by `step` degrees
    pub fn rotate(&mut self, turn: Turn, step: f32) {
        self.face_angle = normalize_degrees(self.face_angle + turn.sign() * step);
    }

    /// Point the movement angle along the nose and add `accel` along it.
    /// Thrust accumulates; there is no damping.
    pub fn thrust(&mut self, accel: f32) {
        let heading = self.forward_heading();
        self.body.move_angle = heading;
        self.body.vel += heading_vector(heading) * accel;
    }

    /// Launch a projectile from the craft's position along the nose.
    /// It moves at `speed` on top of the craft's own velocity.
    pub fn fire(&self, pool: &mut ProjectilePool, speed: f32) -> ProjectileHandle {
        let heading = self.forward_heading();
        let velocity = self.body.vel + heading_vector(heading) * speed;
        pool.fire(self.body.pos, heading, velocity)
    }

    /// Back to `center`, at rest, facing up
    pub fn reset(&mut self, center: Vec2) {
        self.body.pos = center;
        self.body.vel = Vec2::ZERO;
        self.body.move_angle = 0.0;
        self.face_angle = 0.0;
    }
}

impl VectorEntity for Craft {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn bounds(&self) -> Aabb {
        Aabb::centered(self.body.pos, CRAFT_HALF_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_wraps_both_ways() {
        let mut craft = Craft::new(Vec2::ZERO);
        craft.rotate(Turn::Left, 5.0);
        assert!((craft.face_angle - 355.0).abs() < 1e-4);

        craft.rotate(Turn::Right, 5.0);
        assert_eq!(craft.face_angle, 0.0);

        craft.face_angle = 358.0;
        craft.rotate(Turn::Right, 5.0);
        assert!((craft.face_angle - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_at_zero_facing_goes_up() {
        let mut craft = Craft::new(Vec2::ZERO);
        craft.thrust(0.1);
        assert!((craft.body.move_angle - 270.0).abs() < 1e-4);
        assert!(craft.body.vel.x.abs() < 1e-6);
        assert!((craft.body.vel.y + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_thrust_accumulates() {
        let mut craft = Craft::new(Vec2::ZERO);
        craft.face_angle = 30.0;
        craft.thrust(0.1);
        let single = craft.body.vel;
        craft.thrust(0.1);
        assert!((craft.body.vel - single * 2.0).length() < 1e-6);
    }

    #[test]
    fn test_fire_along_nose_with_craft_velocity() {
        let mut pool = ProjectilePool::new(2);
        let mut craft = Craft::new(Vec2::new(50.0, 60.0));
        craft.face_angle = 90.0;
        craft.body.vel = Vec2::new(0.0, 0.5);

        let handle = craft.fire(&mut pool, 2.0);
        assert_eq!(handle, ProjectileHandle(0));
        let p = pool.get(handle).unwrap();
        assert!(p.is_alive());
        assert_eq!(p.pos(), Vec2::new(50.0, 60.0));
        // Facing 90 is heading 0: straight along +x
        assert!((p.vel() - Vec2::new(2.0, 0.5)).length() < 1e-5);
        assert!(p.move_angle().abs() < 1e-4);
        assert_eq!(pool.cursor(), ProjectileHandle(1));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut craft = Craft::new(Vec2::new(320.0, 240.0));
        craft.face_angle = 45.0;
        craft.thrust(0.5);
        craft.body.pos = Vec2::new(12.0, 34.0);

        craft.reset(Vec2::new(320.0, 240.0));
        assert_eq!(craft.body.pos, Vec2::new(320.0, 240.0));
        assert_eq!(craft.body.vel, Vec2::ZERO);
        assert_eq!(craft.face_angle, 0.0);
        assert_eq!(craft.body.move_angle, 0.0);
        assert!(craft.is_alive());
    }

    #[test]
    fn test_bounds_centered_twelve_wide() {
        let craft = Craft::new(Vec2::new(320.0, 240.0));
        let b = craft.bounds();
        assert_eq!(b.min, Vec2::new(314.0, 234.0));
        assert_eq!(b.size, Vec2::splat(12.0));
    }
}
