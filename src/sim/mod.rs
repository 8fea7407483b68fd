//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, velocities in units per tick
//! - Seeded RNG only, used once when the obstacle field is built
//! - Stable iteration order (array order for obstacles, slot order for projectiles)
//! - No rendering or platform dependencies
//! - No allocation while ticking

pub mod collision;
pub mod craft;
pub mod entity;
pub mod field;
pub mod pool;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, resolve_collisions};
pub use craft::{Craft, Turn};
pub use entity::{Aabb, Body, Bounds, Shape, VectorEntity, wrap_position};
pub use field::{AngleWrap, Obstacle, ObstacleField};
pub use pool::{Projectile, ProjectileHandle, ProjectilePool};
pub use state::World;
pub use tick::{Intent, TickInput, TickReport, step, tick};
