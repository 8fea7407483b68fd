//! Read-only snapshot of the world for one frame

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Aabb, Shape, VectorEntity, World};

/// The craft as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct CraftView<'a> {
    pub pos: Vec2,
    /// Rotation to draw the shape with (facing, not movement)
    pub face_angle: f32,
    pub move_angle: f32,
    pub vel: Vec2,
    pub shape: &'a Shape,
    pub bounds: Aabb,
}

/// A live projectile
#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView<'a> {
    pub slot: usize,
    pub pos: Vec2,
    pub shape: &'a Shape,
    pub bounds: Aabb,
}

/// A live obstacle
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView<'a> {
    pub index: usize,
    pub pos: Vec2,
    /// Rotation to draw the shape with
    pub move_angle: f32,
    pub shape: &'a Shape,
    pub bounds: Aabb,
}

/// Everything a renderer needs for one frame. Borrows the world, so it can
/// only exist between ticks.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub show_bounds: bool,
    pub craft: CraftView<'a>,
    pub projectiles: Vec<ProjectileView<'a>>,
    pub obstacles: Vec<ObstacleView<'a>>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(world: &'a World) -> Self {
        let craft = &world.craft;
        Self {
            tick: world.time_ticks,
            width: world.bounds.width,
            height: world.bounds.height,
            show_bounds: world.show_bounds,
            craft: CraftView {
                pos: craft.pos(),
                face_angle: craft.face_angle,
                move_angle: craft.move_angle(),
                vel: craft.vel(),
                shape: craft.shape(),
                bounds: craft.bounds(),
            },
            projectiles: world
                .projectiles
                .iter_alive()
                .map(|(handle, p)| ProjectileView {
                    slot: handle.0,
                    pos: p.pos(),
                    shape: p.shape(),
                    bounds: p.bounds(),
                })
                .collect(),
            obstacles: world
                .obstacles
                .obstacles()
                .iter()
                .enumerate()
                .filter(|(_, o)| o.is_alive())
                .map(|(index, o)| ObstacleView {
                    index,
                    pos: o.pos(),
                    move_angle: o.move_angle(),
                    shape: o.shape(),
                    bounds: o.bounds(),
                })
                .collect(),
        }
    }

    /// HUD text: craft position and angles, whole numbers.
    /// The move angle is shown relative to the nose (shifted back by 90).
    pub fn status_lines(&self) -> [String; 3] {
        let craft = &self.craft;
        [
            format!("Ship: {},{}", craft.pos.x.round(), craft.pos.y.round()),
            format!(
                "Move angle: {}",
                crate::normalize_degrees(craft.move_angle + crate::consts::FORWARD_OFFSET).round()
            ),
            format!("Face angle: {}", craft.face_angle.round()),
        ]
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
