//! Game state and core simulation types
//!
//! Everything the update step reads or writes lives in `WorldState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounce::BounceState;
use super::camera::Camera;
use super::collision::Aabb;
use super::layout::{Viewport, WorldLayout};
use crate::content::BlockSpec;
use crate::tuning::Tuning;

/// Horizontal facing of the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (world units)
    pub pos: Vec2,
    /// Velocity per reference frame
    pub vel: Vec2,
    pub size: Vec2,
    /// Airborne after a jump, cleared on landing
    pub jumping: bool,
    pub facing: Facing,
    /// Walk-cycle frame (0..WALK_FRAMES)
    pub frame: usize,
    /// Reference frames accumulated toward the next walk frame
    pub frame_timer: f32,
    /// Jump was held last frame (jumps fire on the press edge only)
    pub jump_latch: bool,
}

impl Player {
    /// Spawn standing on the ground at `x`
    pub fn new(x: f32, layout: &WorldLayout) -> Self {
        Self {
            pos: Vec2::new(x.clamp(0.0, layout.max_player_x()), layout.standing_y()),
            vel: Vec2::ZERO,
            size: layout.player_size,
            jumping: false,
            facing: Facing::Right,
            frame: 0,
            frame_timer: 0.0,
            jump_latch: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A labeled block carrying a portfolio section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner at rest (world units)
    pub pos: Vec2,
    pub label: String,
    pub content: String,
    pub bounce: BounceState,
    /// Simulation clock (seconds) of the last accepted hit
    pub last_hit: Option<f64>,
}

impl Block {
    pub fn new(spec: &BlockSpec, pos: Vec2) -> Self {
        Self {
            pos,
            label: spec.label.clone(),
            content: spec.content.clone(),
            bounce: BounceState::default(),
            last_hit: None,
        }
    }

    /// Collision box (not displaced by the bounce)
    pub fn hit_box(&self, size: Vec2) -> Aabb {
        Aabb::new(self.pos, size)
    }

    /// Y at which the block is drawn this frame
    pub fn draw_y(&self) -> f32 {
        self.pos.y + self.bounce.offset
    }
}

/// Glyph rising and fading above a block that was just hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIndicator {
    /// Anchor point (world units, horizontally centered)
    pub pos: Vec2,
    pub glyph: String,
    /// 1.0 when spawned, removed at 0
    pub opacity: f32,
}

/// Request for the presentation layer to show a block's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    /// Index into the section list
    pub block: usize,
    pub label: String,
    pub content: String,
    /// Screen point the overlay transition should originate from
    pub anchor: Vec2,
}

/// An activation waiting for its delay to elapse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingActivation {
    pub activation: Activation,
    /// Seconds left before it is emitted
    pub remaining: f32,
}

/// Events produced by a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A block was hit this frame (sound cue)
    BlockHit { block: usize },
    /// Show the block's content
    Activate(Activation),
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub tuning: Tuning,
    pub layout: WorldLayout,
    pub player: Player,
    pub camera: Camera,
    /// Ordered as the section list
    pub blocks: Vec<Block>,
    pub indicators: Vec<FloatingIndicator>,
    pub pending: Vec<PendingActivation>,
    /// Seconds of simulated time
    pub clock: f64,
    pub frame_count: u64,
}

impl WorldState {
    pub fn new(tuning: Tuning, viewport: Viewport, sections: &[BlockSpec]) -> Self {
        let layout = WorldLayout::new(viewport, &tuning, sections.len());
        let player = Player::new(tuning.spawn_x, &layout);
        let blocks = sections
            .iter()
            .enumerate()
            .map(|(i, spec)| Block::new(spec, layout.block_position(i)))
            .collect();

        let mut camera = Camera::default();
        camera.follow(player.pos.x, &layout);

        Self {
            tuning,
            layout,
            player,
            camera,
            blocks,
            indicators: Vec::new(),
            pending: Vec::new(),
            clock: 0.0,
            frame_count: 0,
        }
    }

    /// Rebuild geometry for a new viewport.
    ///
    /// Block hit history and pending activations survive; indicators are
    /// dropped since their positions belong to the old scale.
    pub fn relayout(&mut self, viewport: Viewport) {
        self.layout = WorldLayout::new(viewport, &self.tuning, self.blocks.len());
        for (i, block) in self.blocks.iter_mut().enumerate() {
            block.pos = self.layout.block_position(i);
        }

        let standing_y = self.layout.standing_y();
        let player = &mut self.player;
        player.size = self.layout.player_size;
        player.pos.x = player.pos.x.clamp(0.0, self.layout.max_player_x());
        if player.jumping {
            player.pos.y = player.pos.y.min(standing_y);
        } else {
            player.pos.y = standing_y;
            player.vel.y = 0.0;
        }

        self.indicators.clear();
        self.camera.follow(self.player.pos.x, &self.layout);
    }

    /// Effective block collision box size
    pub fn hit_box_size(&self) -> Vec2 {
        self.layout.hit_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_sections;
    use crate::tuning::ScaleRule;

    fn unit_state() -> WorldState {
        let tuning = Tuning {
            scale_rule: ScaleRule::Fixed { scale: 1.0 },
            ..Tuning::smooth()
        };
        WorldState::new(tuning, Viewport::new(800.0, 600.0), &sample_sections())
    }

    #[test]
    fn test_new_state() {
        let state = unit_state();
        assert_eq!(state.blocks.len(), 6);
        assert_eq!(state.blocks[1].pos, Vec2::new(1200.0, 420.0));
        assert_eq!(state.blocks[1].label, "Experience");
        assert_eq!(state.player.pos, Vec2::new(200.0, 486.0));
        assert!(!state.player.jumping);
        assert_eq!(state.camera.x, 0.0);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_relayout_rescales_and_keeps_history() {
        let mut state = unit_state();
        state.blocks[0].last_hit = Some(3.0);
        state.player.pos.x = 4970.0;
        state.indicators.push(FloatingIndicator {
            pos: Vec2::ZERO,
            glyph: "x".into(),
            opacity: 1.0,
        });

        state.tuning.scale_rule = ScaleRule::Fixed { scale: 2.0 };
        state.relayout(Viewport::new(1000.0, 800.0));

        assert_eq!(state.player.size, Vec2::new(50.0, 68.0));
        assert_eq!(state.player.pos.x, 4950.0);
        assert_eq!(state.player.pos.y, 800.0 - 160.0 - 68.0);
        assert_eq!(state.blocks[0].pos.y, 800.0 - 160.0 - 200.0);
        assert_eq!(state.blocks[0].last_hit, Some(3.0));
        assert!(state.indicators.is_empty());
        assert_eq!(state.camera.x, 4000.0);
    }
}
