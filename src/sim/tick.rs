//! Fixed timestep simulation tick
//!
//! Advances the world by one tick in a fixed order: intents, craft,
//! projectiles, obstacles, collisions. Collision outcomes depend on this
//! order.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::craft::Turn;
use super::entity::wrap_position;
use super::state::World;

/// A player command, independent of any input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    /// Flip the bounding-box overlay
    ToggleBounds,
}

/// Intents for a single tick. Each one applies at most once per tick, no
/// matter how many times it was requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub toggle_bounds: bool,
}

impl TickInput {
    /// Mark an intent as requested for this tick
    pub fn press(&mut self, intent: Intent) {
        match intent {
            Intent::RotateLeft => self.rotate_left = true,
            Intent::RotateRight => self.rotate_right = true,
            Intent::Thrust => self.thrust = true,
            Intent::Fire => self.fire = true,
            Intent::ToggleBounds => self.toggle_bounds = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FromIterator<Intent> for TickInput {
    fn from_iter<I: IntoIterator<Item = Intent>>(iter: I) -> Self {
        let mut input = Self::default();
        for intent in iter {
            input.press(intent);
        }
        input
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Projectiles that left the field
    pub projectiles_culled: u32,
    /// Obstacles destroyed by projectiles
    pub obstacles_shot: u32,
    /// Times the craft was hit and reset
    pub craft_resets: u32,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    world.time_ticks += 1;

    // 1. Intents
    let step = world.tuning.rotation_step;
    if input.rotate_left {
        world.craft.rotate(Turn::Left, step);
    }
    if input.rotate_right {
        world.craft.rotate(Turn::Right, step);
    }
    if input.thrust {
        world.craft.thrust(world.tuning.thrust);
    }
    if input.fire {
        world
            .craft
            .fire(&mut world.projectiles, world.tuning.projectile_speed);
    }
    if input.toggle_bounds {
        world.show_bounds = !world.show_bounds;
    }

    // 2. Craft
    world.craft.body.integrate();
    world.craft.body.pos = wrap_position(
        world.craft.body.pos,
        world.bounds,
        world.tuning.craft_wrap_margin,
    );

    // 3. Projectiles
    let projectiles_culled = world.projectiles.step_all(world.bounds);

    // 4. Obstacles
    world.obstacles.step_all(
        world.bounds,
        world.tuning.obstacle_wrap_margin,
        world.angle_wrap,
    );

    // 5. Collisions
    let collisions = resolve_collisions(
        &mut world.obstacles,
        &mut world.projectiles,
        &mut world.craft,
        world.bounds.center(),
    );

    let report = TickReport {
        projectiles_culled,
        obstacles_shot: collisions.obstacles_shot,
        craft_resets: collisions.craft_hits,
    };
    if report != TickReport::default() {
        log::debug!("Tick {}: {:?}", world.time_ticks, report);
    }
    report
}

/// By-value form of [`tick`]: prior state and intents in, next state out
pub fn step(mut world: World, input: &TickInput) -> World {
    tick(&mut world, input);
    world
}
