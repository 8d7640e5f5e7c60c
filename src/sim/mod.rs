//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the frame delta passed to `tick`
//! - Input only enters through `TickInput`
//! - Stable iteration order (block index)
//! - No rendering or platform dependencies

pub mod bounce;
pub mod camera;
pub mod collision;
pub mod input;
pub mod layout;
pub mod state;
pub mod tick;

pub use bounce::BounceState;
pub use camera::Camera;
pub use collision::Aabb;
pub use input::{Action, ActionSource, InputState, TickInput};
pub use layout::{Viewport, WorldLayout};
pub use state::{
    Activation, Block, Facing, FloatingIndicator, GameEvent, PendingActivation, Player,
    WorldState,
};
pub use tick::tick;
