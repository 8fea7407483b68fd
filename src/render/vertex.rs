//! Line-list vertices for 2D outline rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::snapshot::Snapshot;
use crate::sim::{Aabb, Shape};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const CRAFT: [f32; 4] = [1.0, 0.78, 0.0, 1.0]; // Orange
    pub const PROJECTILE: [f32; 4] = [1.0, 0.0, 1.0, 1.0]; // Magenta
    pub const OBSTACLE: [f32; 4] = [0.25, 0.25, 0.25, 1.0]; // Dark gray
    pub const BOUNDS: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Append one closed outline as line-list pairs
fn push_loop(out: &mut Vec<Vertex>, points: impl Iterator<Item = Vec2>, color: [f32; 4]) {
    let start = out.len();
    let mut first = None;
    let mut prev: Option<Vec2> = None;
    for p in points {
        if let Some(q) = prev {
            out.push(Vertex::new(q.x, q.y, color));
            out.push(Vertex::new(p.x, p.y, color));
        } else {
            first = Some(p);
        }
        prev = Some(p);
    }
    // Close the loop (needs at least a segment)
    if out.len() > start {
        if let (Some(a), Some(b)) = (prev, first) {
            out.push(Vertex::new(a.x, a.y, color));
            out.push(Vertex::new(b.x, b.y, color));
        }
    }
}

/// Local shape rotated by `degrees` then moved to `pos`
fn world_points(shape: &Shape, pos: Vec2, degrees: f32) -> impl Iterator<Item = Vec2> + '_ {
    let rot = Vec2::from_angle(degrees.to_radians());
    shape.points().map(move |p| pos + rot.rotate(p))
}

fn push_bounds(out: &mut Vec<Vertex>, bounds: &Aabb) {
    push_loop(out, bounds.corners().into_iter(), colors::BOUNDS);
}

/// Append world-space outline vertices (line list) for every visible entity.
/// `out` is cleared first; reuse it across frames to avoid reallocating.
pub fn outline_vertices(snapshot: &Snapshot<'_>, out: &mut Vec<Vertex>) {
    out.clear();

    for obstacle in &snapshot.obstacles {
        push_loop(
            out,
            world_points(obstacle.shape, obstacle.pos, obstacle.move_angle),
            colors::OBSTACLE,
        );
        if snapshot.show_bounds {
            push_bounds(out, &obstacle.bounds);
        }
    }

    for projectile in &snapshot.projectiles {
        // Projectiles are translated, never rotated
        push_loop(
            out,
            world_points(projectile.shape, projectile.pos, 0.0),
            colors::PROJECTILE,
        );
    }

    let craft = &snapshot.craft;
    push_loop(
        out,
        world_points(craft.shape, craft.pos, craft.face_angle),
        colors::CRAFT,
    );
    if snapshot.show_bounds {
        push_bounds(out, &craft.bounds);
    }
}
