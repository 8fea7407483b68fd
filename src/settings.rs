//! Game settings and tuning
//!
//! Loaded from a JSON file by the host. Every field has a default, so a
//! document only needs the values it wants to override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::{AngleWrap, Bounds};

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Degrees the craft turns per rotate intent
    pub rotation_step: f32,
    /// Velocity added per thrust intent
    pub thrust: f32,
    /// Projectile speed on top of the craft's own velocity
    pub projectile_speed: f32,
    /// Number of projectile slots (recycled circularly)
    pub projectile_capacity: usize,
    /// Number of obstacles spawned at startup
    pub obstacle_count: usize,
    /// Obstacle linear speed
    pub obstacle_speed: f32,
    /// Obstacle spin range, degrees per tick (inclusive)
    pub obstacle_spin_min: f32,
    pub obstacle_spin_max: f32,
    /// Distance from the edges that obstacles never spawn in
    pub obstacle_spawn_inset: f32,
    /// Wraparound margins
    pub craft_wrap_margin: f32,
    pub obstacle_wrap_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rotation_step: CRAFT_ROTATION_STEP,
            thrust: CRAFT_THRUST,
            projectile_speed: PROJECTILE_SPEED,
            projectile_capacity: PROJECTILE_CAPACITY,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_spin_min: OBSTACLE_SPIN_MIN,
            obstacle_spin_max: OBSTACLE_SPIN_MAX,
            obstacle_spawn_inset: OBSTACLE_SPAWN_INSET,
            craft_wrap_margin: CRAFT_WRAP_MARGIN,
            obstacle_wrap_margin: OBSTACLE_WRAP_MARGIN,
        }
    }
}

/// Host-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the obstacle field
    pub seed: u64,
    /// Play-field size at startup
    pub bounds: Bounds,
    /// Tick period the driver runs at
    pub tick_millis: u64,
    /// Draw bounding boxes (debug overlay)
    pub show_bounds: bool,
    /// How obstacle spin is wrapped into [0, 360)
    pub angle_wrap: AngleWrap,
    /// Gameplay constants
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            bounds: Bounds::new(FIELD_WIDTH, FIELD_HEIGHT),
            tick_millis: TICK_MILLIS,
            show_bounds: false,
            angle_wrap: AngleWrap::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON (for writing a starter settings file)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let t = &self.tuning;
        if !(self.bounds.width > 0.0 && self.bounds.height > 0.0) {
            return Err(Error::InvalidSettings {
                field: "bounds",
                reason: "width and height must be positive",
            });
        }
        if self.tick_millis == 0 {
            return Err(Error::InvalidSettings {
                field: "tick_millis",
                reason: "must be at least 1",
            });
        }
        if t.projectile_capacity == 0 {
            return Err(Error::InvalidSettings {
                field: "projectile_capacity",
                reason: "must be at least 1",
            });
        }
        if !(t.obstacle_spin_min <= t.obstacle_spin_max) {
            return Err(Error::InvalidSettings {
                field: "obstacle_spin_min",
                reason: "must not exceed obstacle_spin_max",
            });
        }
        if !(t.obstacle_spawn_inset >= 0.0) {
            return Err(Error::InvalidSettings {
                field: "obstacle_spawn_inset",
                reason: "must not be negative",
            });
        }
        if !(t.craft_wrap_margin >= 0.0 && t.obstacle_wrap_margin >= 0.0) {
            return Err(Error::InvalidSettings {
                field: "wrap_margin",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
