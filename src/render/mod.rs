//! Renderer-facing views of the world
//!
//! The simulation never draws. A renderer takes a [`Snapshot`] between
//! ticks and either reads entity state directly, asks for world-space
//! outline vertices, or serializes the snapshot for another process.

pub mod snapshot;
pub mod vertex;

pub use snapshot::{CraftView, ObstacleView, ProjectileView, Snapshot};
pub use vertex::{Vertex, colors, outline_vertices};
