//! Rendering module
//!
//! The render step is a pure function from world state to a list of
//! screen-space draw commands; a platform backend executes them.

pub mod commands;
pub mod frame;
pub mod scenery;

use glam::Vec2;

pub use commands::{Color, DrawCommand, SpriteId, Stroke, TextAlign};
pub use frame::render;
pub use scenery::{DecorSizes, Scenery, SceneryConfig};

/// Asset collaborator: reports intrinsic image sizes once loaded
pub trait AssetCatalog {
    fn size_of(&self, sprite: SpriteId) -> Option<Vec2>;
}

/// Catalog with nothing loaded (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetCatalog for NoAssets {
    fn size_of(&self, _sprite: SpriteId) -> Option<Vec2> {
        None
    }
}
