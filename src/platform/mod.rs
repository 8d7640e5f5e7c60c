//! Platform layer
//!
//! Browser glue around the platform-independent session:
//! - Canvas 2D execution of draw commands
//! - Image and audio assets
//! - DOM input listeners
//! - Activation events for the hosting page

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Name of the DOM event raised on `window` when a block is activated
pub const ACTIVATE_EVENT: &str = "portfolio:activate";

/// Element whose text holds the section list as JSON, if the page provides one
pub const SECTIONS_ELEMENT_ID: &str = "portfolio-sections";

pub const MUSIC_SRC: &str = "assets/musica.mp3";
pub const HIT_SRC: &str = "assets/hit.mp3";
