//! Shared entity state and geometry
//!
//! Every entity kind (craft, projectile, obstacle) is a [`Body`] plus its own
//! extra fields. The [`VectorEntity`] trait gives the simulation one way to
//! read and move any of them, and a per-kind bounding box for collisions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// Play-field size. The field spans `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the play field
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Closed containment test, edges count as inside
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of side `2 * half_extent` centered on `center`
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            size: Vec2::splat(half_extent * 2.0),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Half-open containment: min edges are inside, max edges are not
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.y >= self.min.y && point.x < max.x && point.y < max.y
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }

    /// Corners in outline order, starting at `min`
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }
}

/// Local-space outline of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed polygon around the entity origin
    Polygon(Vec<Vec2>),
    /// Rectangle with its top-left corner at the entity origin
    Rect { size: Vec2 },
}

impl Shape {
    /// Build a polygon from integer outline coordinates
    pub fn polygon(xs: &[i32], ys: &[i32]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        Shape::Polygon(
            xs.iter()
                .zip(ys)
                .map(|(&x, &y)| Vec2::new(x as f32, y as f32))
                .collect(),
        )
    }

    /// Outline points in local space
    pub fn points(&self) -> ShapePoints<'_> {
        match self {
            Shape::Polygon(points) => ShapePoints::Polygon(points.iter()),
            Shape::Rect { size } => ShapePoints::Rect {
                corners: Aabb::new(Vec2::ZERO, *size).corners(),
                index: 0,
            },
        }
    }
}

/// Iterator over a [`Shape`]'s outline points
pub enum ShapePoints<'a> {
    Polygon(std::slice::Iter<'a, Vec2>),
    Rect { corners: [Vec2; 4], index: usize },
}

impl Iterator for ShapePoints<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        match self {
            ShapePoints::Polygon(iter) => iter.next().copied(),
            ShapePoints::Rect { corners, index } => {
                let point = corners.get(*index).copied();
                *index += 1;
                point
            }
        }
    }
}

/// State every entity kind carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading used for translation, degrees in [0, 360)
    pub move_angle: f32,
    pub alive: bool,
    pub shape: Shape,
}

impl Body {
    pub fn new(shape: Shape, alive: bool) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            move_angle: 0.0,
            alive,
            shape,
        }
    }

    /// One Euler step: position += velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        debug_assert!(self.pos.is_finite(), "non-finite position {:?}", self.pos);
    }

    /// Set the movement angle, normalized into [0, 360)
    #[inline]
    pub fn set_move_angle(&mut self, degrees: f32) {
        self.move_angle = normalize_degrees(degrees);
    }
}

/// Common read/write surface over every entity kind
pub trait VectorEntity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Bounding box used for collisions
    fn bounds(&self) -> Aabb;

    fn pos(&self) -> Vec2 {
        self.body().pos
    }
    fn set_pos(&mut self, pos: Vec2) {
        self.body_mut().pos = pos;
    }
    fn vel(&self) -> Vec2 {
        self.body().vel
    }
    fn set_vel(&mut self, vel: Vec2) {
        self.body_mut().vel = vel;
    }
    fn move_angle(&self) -> f32 {
        self.body().move_angle
    }
    fn set_move_angle(&mut self, degrees: f32) {
        self.body_mut().set_move_angle(degrees);
    }
    fn is_alive(&self) -> bool {
        self.body().alive
    }
    fn set_alive(&mut self, alive: bool) {
        self.body_mut().alive = alive;
    }
    fn shape(&self) -> &Shape {
        &self.body().shape
    }
    fn set_shape(&mut self, shape: Shape) {
        self.body_mut().shape = shape;
    }
}

/// Wrap one coordinate: past `-margin` jumps to `extent + margin` and back
#[inline]
fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Teleport a position that left the field (expanded by `margin`) to the
/// opposite margin, per axis. Positions inside the margin are unchanged.
pub fn wrap_position(pos: Vec2, bounds: Bounds, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, bounds.width, margin),
        wrap_axis(pos.y, bounds.height, margin),
    )
}
