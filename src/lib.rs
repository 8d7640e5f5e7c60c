//! Portfolio Platformer - a side-scrolling résumé
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, camera, block bounce)
//! - `renderer`: Pure render step producing canvas draw commands
//! - `session`: Session object owning all mutable state
//! - `platform`: Browser platform layer (canvas, DOM input, audio)
//! - `tuning`: Data-driven physics and layout parameters
//! - `content`: Résumé sections shown by the blocks

pub mod content;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use content::BlockSpec;
pub use session::{Frame, Session};
pub use settings::Settings;
pub use tuning::Tuning;

/// Engine-wide constants
pub mod consts {
    /// Frame rate the tuning values are expressed against (one frame = time factor 1.0)
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest frame delta accepted by the update step (tab-resume guard)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame delta of one reference frame
    pub const REFERENCE_DT: f32 = 1.0 / REFERENCE_FPS;

    /// Walk cycle length
    pub const WALK_FRAMES: usize = 4;

    /// Player sprite size in scale units
    pub const PLAYER_WIDTH: f32 = 25.0;
    pub const PLAYER_HEIGHT: f32 = 34.0;

    /// Height of the ground strip in scale units (ground line = viewport height - this)
    pub const GROUND_HEIGHT: f32 = 80.0;
    /// Height of the blocks' top edge above the ground line, in scale units
    pub const BLOCK_ELEVATION: f32 = 100.0;
    /// Drawn block size in scale units (square)
    pub const BLOCK_DRAW_SIZE: f32 = 25.0;

    /// Fallback background tile width when the image size is not known yet
    pub const DEFAULT_BACKGROUND_WIDTH: f32 = 800.0;
}

/// Convert a frame delta in seconds to the time factor used by the simulation.
///
/// Negative and non-finite deltas become 0, large ones are clamped to
/// [`consts::MAX_FRAME_DT`].
#[inline]
pub fn time_factor(dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DT) * consts::REFERENCE_FPS
}
