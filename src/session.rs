//! Game session
//!
//! Owns every piece of mutable game state: the world, the input map and the
//! scenery. The hosting layer creates one per page visit, feeds it input and
//! frame deltas, and tears it down with `dispose`.

use serde::Serialize;

use crate::content::BlockSpec;
use crate::renderer::{AssetCatalog, DrawCommand, Scenery, render};
use crate::sim::{GameEvent, InputState, Viewport, WorldState, tick};
use crate::tuning::Tuning;

/// Output of one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub events: Vec<GameEvent>,
    pub commands: Vec<DrawCommand>,
}

pub struct Session {
    world: WorldState,
    input: InputState,
    scenery: Scenery,
    disposed: bool,
}

impl Session {
    pub fn new(tuning: Tuning, viewport: Viewport, sections: &[BlockSpec], seed: u64) -> Self {
        let scenery = Scenery::generate(&tuning.scenery, seed);
        let world = WorldState::new(tuning, viewport, sections);
        log::info!(
            "Session started: {} blocks, viewport {}x{}, scale {:.2}",
            world.blocks.len(),
            viewport.width,
            viewport.height,
            world.layout.scale
        );
        Self {
            world,
            input: InputState::new(),
            scenery,
            disposed: false,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input adapters write here; the simulation reads a snapshot each frame
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Run the update step for a frame delta in seconds
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.disposed {
            return Vec::new();
        }
        let input = self.input.take_tick_input();
        tick(&mut self.world, &input, dt)
    }

    /// Run the render step
    pub fn draw(&self, assets: &impl AssetCatalog) -> Vec<DrawCommand> {
        if self.disposed {
            return Vec::new();
        }
        render(&self.world, &self.scenery, assets)
    }

    /// Update then render
    pub fn frame(&mut self, dt: f32, assets: &impl AssetCatalog) -> Frame {
        let events = self.advance(dt);
        let commands = self.draw(assets);
        Frame { events, commands }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        self.world.relayout(viewport);
        log::info!(
            "Resized to {}x{} (scale {:.2})",
            viewport.width,
            viewport.height,
            self.world.layout.scale
        );
    }

    /// Stop the session: input released, pending activations dropped, later
    /// frames produce nothing
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.input.release_all();
        self.world.pending.clear();
        log::info!("Session disposed after {} frames", self.world.frame_count);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
