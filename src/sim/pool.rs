//! Fixed-capacity projectile pool
//!
//! Slots are allocated once and reused through a circular cursor. Firing
//! never fails: once every slot is in flight the oldest one is overwritten.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, Bounds, Shape, VectorEntity};
use crate::consts::PROJECTILE_SIZE;

/// Index of a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileHandle(pub usize);

/// A single projectile. Born dead; no rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
}

impl Projectile {
    fn new() -> Self {
        Self {
            body: Body::new(
                Shape::Rect {
                    size: Vec2::splat(PROJECTILE_SIZE),
                },
                false,
            ),
        }
    }
}

impl VectorEntity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(self.body.pos, Vec2::splat(PROJECTILE_SIZE))
    }
}

/// Ring buffer of projectiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    /// Slot the next fire will use
    cursor: usize,
}

impl ProjectilePool {
    /// Preallocate `capacity` dead projectiles
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "projectile pool needs at least one slot");
        Self {
            slots: (0..capacity).map(|_| Projectile::new()).collect(),
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot the next fire will land in
    pub fn cursor(&self) -> ProjectileHandle {
        ProjectileHandle(self.cursor)
    }

    /// Activate the slot under the cursor, overwriting whatever was there,
    /// and advance the cursor.
    pub fn fire(&mut self, origin: Vec2, heading: f32, velocity: Vec2) -> ProjectileHandle {
        let handle = ProjectileHandle(self.cursor);
        let body = &mut self.slots[self.cursor].body;
        if body.alive {
            log::trace!("Recycling in-flight projectile in slot {}", self.cursor);
        }
        body.alive = true;
        body.pos = origin;
        body.vel = velocity;
        body.set_move_angle(heading);

        self.cursor += 1;
        if self.cursor >= self.slots.len() {
            self.cursor = 0;
        }
        handle
    }

    /// Move every live projectile and kill the ones outside the field.
    /// Returns how many were culled.
    pub fn step_all(&mut self, bounds: Bounds) -> u32 {
        let mut culled = 0;
        for projectile in self.slots.iter_mut().filter(|p| p.body.alive) {
            projectile.body.integrate();
            if !bounds.contains(projectile.body.pos) {
                projectile.body.alive = false;
                culled += 1;
            }
        }
        culled
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.slots.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: ProjectileHandle) -> Option<&mut Projectile> {
        self.slots.get_mut(handle.0)
    }

    /// All slots, dead ones included, in slot order
    pub fn slots(&self) -> &[Projectile] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Projectile] {
        &mut self.slots
    }

    /// Live projectiles in slot order
    pub fn iter_alive(&self) -> impl Iterator<Item = (ProjectileHandle, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.body.alive)
            .map(|(i, p)| (ProjectileHandle(i), p))
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|p| p.body.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds() -> Bounds {
        Bounds::new(640.0, 480.0)
    }

    #[test]
    fn test_pool_starts_dead() {
        let pool = ProjectilePool::new(4);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.alive_count(), 0);
        assert_eq!(pool.cursor(), ProjectileHandle(0));
    }

    #[test]
    fn test_fire_sets_state() {
        let mut pool = ProjectilePool::new(4);
        let h = pool.fire(Vec2::new(10.0, 20.0), -90.0, Vec2::new(0.0, -2.0));
        assert_eq!(h, ProjectileHandle(0));
        let p = pool.get(h).unwrap();
        assert!(p.is_alive());
        assert_eq!(p.pos(), Vec2::new(10.0, 20.0));
        assert_eq!(p.vel(), Vec2::new(0.0, -2.0));
        assert!((p.move_angle() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_capacity_plus_one_reuses_slot_zero() {
        let capacity = 5;
        let mut pool = ProjectilePool::new(capacity);
        for i in 0..capacity {
            let h = pool.fire(Vec2::new(100.0, 100.0), 0.0, Vec2::ZERO);
            assert_eq!(h, ProjectileHandle(i));
        }
        assert_eq!(pool.alive_count(), capacity);

        let h = pool.fire(Vec2::new(1.0, 2.0), 0.0, Vec2::X);
        assert_eq!(h, ProjectileHandle(0));
        let p = pool.get(h).unwrap();
        assert_eq!(p.pos(), Vec2::new(1.0, 2.0));
        assert_eq!(p.vel(), Vec2::X);
        // Overwrite, not a new allocation
        assert_eq!(pool.alive_count(), capacity);
        assert_eq!(pool.capacity(), capacity);
    }

    #[test]
    fn test_step_culls_each_edge() {
        let cases = [
            (Vec2::new(0.5, 240.0), Vec2::new(-1.0, 0.0)),
            (Vec2::new(639.5, 240.0), Vec2::new(1.0, 0.0)),
            (Vec2::new(320.0, 0.5), Vec2::new(0.0, -1.0)),
            (Vec2::new(320.0, 479.5), Vec2::new(0.0, 1.0)),
        ];
        for (origin, vel) in cases {
            let mut pool = ProjectilePool::new(1);
            let h = pool.fire(origin, 0.0, vel);
            assert_eq!(pool.step_all(bounds()), 1, "origin {origin:?}");
            assert!(!pool.get(h).unwrap().is_alive());
        }
    }

    #[test]
    fn test_projectile_on_edge_survives() {
        let mut pool = ProjectilePool::new(1);
        let h = pool.fire(Vec2::new(639.0, 240.0), 0.0, Vec2::new(1.0, 0.0));
        assert_eq!(pool.step_all(bounds()), 0);
        assert!(pool.get(h).unwrap().is_alive());
        assert_eq!(pool.step_all(bounds()), 1);
    }

    #[test]
    fn test_resting_projectile_lives_forever() {
        let mut pool = ProjectilePool::new(2);
        let h = pool.fire(Vec2::new(320.0, 240.0), 0.0, Vec2::ZERO);
        for _ in 0..1000 {
            pool.step_all(bounds());
        }
        assert!(pool.get(h).unwrap().is_alive());
        assert_eq!(pool.iter_alive().count(), 1);
    }

    proptest! {
        #[test]
        fn prop_fire_handle_is_count_mod_capacity(capacity in 1usize..16, fires in 1usize..64) {
            let mut pool = ProjectilePool::new(capacity);
            let mut last = ProjectileHandle(0);
            for _ in 0..fires {
                last = pool.fire(Vec2::new(100.0, 100.0), 0.0, Vec2::ZERO);
            }
            prop_assert_eq!(last, ProjectileHandle((fires - 1) % capacity));
            prop_assert_eq!(pool.cursor(), ProjectileHandle(fires % capacity));
            prop_assert_eq!(pool.alive_count(), fires.min(capacity));
        }
    }
}
