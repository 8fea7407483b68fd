//! Obstacle field
//!
//! A fixed set of spinning rocks. They drift in a straight line, wrap at
//! the field edges, and are never respawned once destroyed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, Bounds, Shape, VectorEntity, wrap_position};
use crate::consts::{FORWARD_OFFSET, OBSTACLE_HALF_EXTENT};
use crate::settings::Tuning;
use crate::{heading_vector, normalize_degrees};

const OBSTACLE_XS: [i32; 11] = [-20, -13, 0, 20, 22, 20, 12, 2, -10, -22, -16];
const OBSTACLE_YS: [i32; 11] = [20, 23, 17, 20, 16, -20, -22, -14, -17, -20, -5];

/// How spin is folded back into [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleWrap {
    /// Euclidean remainder
    #[default]
    Modulo,
    /// Underflow lands on `360 - spin`, overflow lands on `spin`.
    /// Loses the remainder, so the error grows with the spin rate.
    Legacy,
}

impl AngleWrap {
    /// Add `spin` to `angle` and wrap
    pub fn apply(self, angle: f32, spin: f32) -> f32 {
        let next = angle + spin;
        match self {
            AngleWrap::Modulo => normalize_degrees(next),
            AngleWrap::Legacy => {
                if next < 0.0 {
                    normalize_degrees(360.0 - spin)
                } else if next >= 360.0 {
                    normalize_degrees(spin)
                } else {
                    next
                }
            }
        }
    }
}

/// A drifting, spinning rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    /// Degrees added to the movement angle every tick
    pub rotation_velocity: f32,
}

impl Obstacle {
    pub fn new() -> Self {
        Self {
            body: Body::new(Shape::polygon(&OBSTACLE_XS, &OBSTACLE_YS), true),
            rotation_velocity: 0.0,
        }
    }

    /// Place a live obstacle at rest at `pos`
    pub fn at(pos: Vec2) -> Self {
        let mut obstacle = Self::new();
        obstacle.body.pos = pos;
        obstacle
    }
}

impl Default for Obstacle {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorEntity for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn bounds(&self) -> Aabb {
        Aabb::centered(self.body.pos, OBSTACLE_HALF_EXTENT)
    }
}

/// Uniform draw from `[low, low + span)`, or `low` when the span is empty
fn sample_span<R: Rng + ?Sized>(rng: &mut R, low: f32, span: f32) -> f32 {
    if span > 0.0 {
        low + rng.random_range(0.0..span)
    } else {
        low
    }
}

/// Fixed-size collection of obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// `count` live obstacles at the origin, at rest
    pub fn new(count: usize) -> Self {
        Self {
            obstacles: (0..count).map(|_| Obstacle::new()).collect(),
        }
    }

    /// Build a field from hand-placed obstacles
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Randomize every obstacle: position inside the inset field, heading in
    /// whole degrees, spin from the tuning range, velocity along the heading.
    pub fn init_random<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R, tuning: &Tuning) {
        let inset = tuning.obstacle_spawn_inset;
        let span = Vec2::new(bounds.width - 2.0 * inset, bounds.height - 2.0 * inset);
        if span.x <= 0.0 || span.y <= 0.0 {
            log::warn!(
                "Field {}x{} smaller than spawn inset {}; spawning on the edge",
                bounds.width,
                bounds.height,
                inset
            );
        }

        for obstacle in &mut self.obstacles {
            obstacle.rotation_velocity = if tuning.obstacle_spin_max > tuning.obstacle_spin_min {
                rng.random_range(tuning.obstacle_spin_min..=tuning.obstacle_spin_max)
            } else {
                tuning.obstacle_spin_min
            };

            let body = &mut obstacle.body;
            body.alive = true;
            body.pos = Vec2::new(
                sample_span(rng, inset, span.x),
                sample_span(rng, inset, span.y),
            );
            body.move_angle = rng.random_range(0..360u32) as f32;
            body.vel = heading_vector(body.move_angle - FORWARD_OFFSET) * tuning.obstacle_speed;
        }
    }

    /// Move, wrap and spin every live obstacle
    pub fn step_all(&mut self, bounds: Bounds, margin: f32, wrap: AngleWrap) {
        for obstacle in self.obstacles.iter_mut().filter(|o| o.body.alive) {
            obstacle.body.integrate();
            obstacle.body.pos = wrap_position(obstacle.body.pos, bounds, margin);
            obstacle.body.move_angle =
                wrap.apply(obstacle.body.move_angle, obstacle.rotation_velocity);
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(index)
    }

    /// All obstacles, dead ones included
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub(crate) fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.body.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.iter_alive().count()
    }
}
