//! World geometry derived from the viewport
//!
//! Everything that depends on screen size (scale, ground line, sprite sizes)
//! is computed once here and rebuilt on resize.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Visible canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Scaled world geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub viewport: Viewport,
    pub scale: f32,
    /// Touch-sized layout (affects jump height)
    pub compact: bool,
    /// Y of the ground line; the player's feet rest here
    pub ground_y: f32,
    pub map_limit: f32,
    pub player_size: Vec2,
    /// Block collision box size
    pub hit_box: Vec2,
    /// Drawn block size (square)
    pub block_size: f32,
    /// Top edge of every block
    pub block_y: f32,
    first_block_x: f32,
    block_spacing: f32,
}

impl WorldLayout {
    pub fn new(viewport: Viewport, tuning: &Tuning, block_count: usize) -> Self {
        let scale = tuning.scale_rule.scale_for(viewport.width);
        let ground_y = viewport.height - GROUND_HEIGHT * scale;
        let layout = Self {
            viewport,
            scale,
            compact: tuning.scale_rule.is_compact(viewport.width),
            ground_y,
            map_limit: tuning.map_limit,
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * scale,
            hit_box: Vec2::new(tuning.hit_box_width, tuning.hit_box_height) * scale,
            block_size: BLOCK_DRAW_SIZE * scale,
            block_y: ground_y - BLOCK_ELEVATION * scale,
            first_block_x: tuning.first_block_x,
            block_spacing: tuning.block_spacing,
        };

        if let Some(last) = block_count.checked_sub(1) {
            let last_x = layout.block_position(last).x;
            if last_x + layout.hit_box.x > layout.map_limit {
                log::warn!(
                    "Block {} at x={} lies beyond the map limit {}",
                    last,
                    last_x,
                    layout.map_limit
                );
            }
        }

        layout
    }

    /// World position (top-left) of the block at `index`
    pub fn block_position(&self, index: usize) -> Vec2 {
        Vec2::new(
            self.first_block_x + index as f32 * self.block_spacing,
            self.block_y,
        )
    }

    /// Largest x the player's left edge may take
    pub fn max_player_x(&self) -> f32 {
        (self.map_limit - self.player_size.x).max(0.0)
    }

    /// Y of the player's top edge when standing on the ground
    pub fn standing_y(&self) -> f32 {
        self.ground_y - self.player_size.y
    }

    /// Largest camera offset; 0 when the map is narrower than the viewport
    pub fn max_camera_x(&self) -> f32 {
        (self.map_limit - self.viewport.width).max(0.0)
    }
}
