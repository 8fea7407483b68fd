//! Vector Rocks - a ship, a bullet pool and a field of drifting rocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, wraparound, pooling, collisions)
//! - `driver`: Run state, fixed timestep and intent queue for the host loop
//! - `render`: Read-only world snapshots and outline vertices for a renderer
//! - `settings`: Play-field and tuning configuration
//! - `error`: Errors for the fallible edges (settings I/O and validation)

pub mod driver;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{Settings, Tuning};
pub use sim::{AngleWrap, Bounds, World};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed tick period in milliseconds (~50 ticks per second)
    pub const TICK_MILLIS: u64 = 20;
    /// Maximum ticks the driver will run for a single frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play-field size
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Degrees per rotate intent
    pub const CRAFT_ROTATION_STEP: f32 = 5.0;
    /// Velocity added per thrust intent
    pub const CRAFT_THRUST: f32 = 0.1;
    /// Half the side of the craft's bounding box
    pub const CRAFT_HALF_EXTENT: f32 = 6.0;
    /// Wraparound margin for the craft
    pub const CRAFT_WRAP_MARGIN: f32 = 10.0;

    /// Projectile pool capacity
    pub const PROJECTILE_CAPACITY: usize = 10_000;
    /// Projectile speed relative to the craft, units per tick
    pub const PROJECTILE_SPEED: f32 = 2.0;
    /// Side of a projectile's bounding box
    pub const PROJECTILE_SIZE: f32 = 1.0;

    /// Number of obstacles created at startup
    pub const OBSTACLE_COUNT: usize = 20;
    /// Linear speed of a freshly spawned obstacle, units per tick
    pub const OBSTACLE_SPEED: f32 = 1.0;
    /// Spin range in degrees per tick (inclusive)
    pub const OBSTACLE_SPIN_MIN: f32 = 1.0;
    pub const OBSTACLE_SPIN_MAX: f32 = 3.0;
    /// Half the side of an obstacle's bounding box
    pub const OBSTACLE_HALF_EXTENT: f32 = 20.0;
    /// Wraparound margin for obstacles
    pub const OBSTACLE_WRAP_MARGIN: f32 = 20.0;
    /// Spawn inset from every edge of the play field
    pub const OBSTACLE_SPAWN_INSET: f32 = 20.0;

    /// Offset between a facing angle and its travel heading.
    /// Shapes point "up" (negative y) at a facing of zero.
    pub const FORWARD_OFFSET: f32 = 90.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading in degrees (0 = +x, 90 = +y, screen coordinates)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
