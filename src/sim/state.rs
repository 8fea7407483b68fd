//! World state
//!
//! Everything the simulation owns lives here. Collections are sized once at
//! construction; ticking never grows them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::craft::Craft;
use super::entity::Bounds;
use super::field::{AngleWrap, ObstacleField};
use super::pool::ProjectilePool;
use crate::settings::{Settings, Tuning};

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Seed the obstacle field was generated from
    pub seed: u64,
    /// Current play-field size
    pub bounds: Bounds,
    /// Gameplay constants
    pub tuning: Tuning,
    /// Spin wrapping policy for obstacles
    pub angle_wrap: AngleWrap,
    /// Renderer should draw bounding boxes
    pub show_bounds: bool,
    /// Ticks advanced so far
    pub time_ticks: u64,
    pub craft: Craft,
    pub projectiles: ProjectilePool,
    pub obstacles: ObstacleField,
}

impl World {
    /// Build a world from settings, seeding the field from `settings.seed`
    pub fn new(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        Self::with_rng(settings, &mut rng)
    }

    /// Build a world, drawing the obstacle field from `rng`
    pub fn with_rng<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let mut world = Self::empty(settings);
        world
            .obstacles
            .init_random(world.bounds, rng, &settings.tuning);
        log::info!(
            "World {}x{} seed={} obstacles={} projectile slots={}",
            world.bounds.width,
            world.bounds.height,
            world.seed,
            world.obstacles.len(),
            world.projectiles.capacity()
        );
        world
    }

    /// Build a world whose obstacles are all at rest at the origin.
    /// Callers place them by hand.
    pub fn empty(settings: &Settings) -> Self {
        let bounds = settings.bounds;
        Self {
            seed: settings.seed,
            bounds,
            tuning: settings.tuning.clone(),
            angle_wrap: settings.angle_wrap,
            show_bounds: settings.show_bounds,
            time_ticks: 0,
            craft: Craft::new(bounds.center()),
            projectiles: ProjectilePool::new(settings.tuning.projectile_capacity),
            obstacles: ObstacleField::new(settings.tuning.obstacle_count),
        }
    }

    /// Host window changed size. Affects wrap and cull thresholds and where
    /// the craft respawns; nothing is moved now.
    pub fn resize(&mut self, bounds: Bounds) {
        debug_assert!(bounds.width > 0.0 && bounds.height > 0.0);
        log::info!(
            "Resize {}x{} -> {}x{}",
            self.bounds.width,
            self.bounds.height,
            bounds.width,
            bounds.height
        );
        self.bounds = bounds;
    }
}
