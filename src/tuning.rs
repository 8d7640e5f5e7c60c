//! Data-driven physics and layout parameters
//!
//! One engine covers every variant of the game; the differences between them
//! (gravity, jump impulse, friction, hit-box size, activation cooldown, bounce
//! model...) live here. Lengths marked "scale units" are multiplied by the
//! layout scale, everything else is in world units per reference frame.

use serde::{Deserialize, Serialize};

use crate::renderer::scenery::SceneryConfig;

/// How held direction keys translate into horizontal velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HorizontalModel {
    /// Velocity jumps straight to max speed while a key is held, zero otherwise
    Instant,
    /// Velocity ramps up by `accel` and decays by `friction` per frame when released
    Accelerated {
        /// Acceleration per frame (scale units)
        accel: f32,
        /// Velocity multiplier per frame with no key held
        friction: f32,
        /// Speeds below this snap to zero
        stop_epsilon: f32,
    },
}

/// Block bounce animation after a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BounceModel {
    /// Damped spring pulling the offset back to zero
    Spring {
        tension: f32,
        /// Velocity multiplier per frame
        damping: f32,
        /// Initial velocity on hit (scale units, negative = up)
        kick: f32,
        /// Offset and velocity below this count as settled (scale units)
        epsilon: f32,
    },
    /// Move up to `peak`, then back down, then snap to zero
    TwoPhase {
        /// Upward speed per frame (scale units)
        rise_speed: f32,
        /// Downward speed per frame (scale units)
        fall_speed: f32,
        /// Highest displacement (scale units, positive)
        peak: f32,
    },
}

impl BounceModel {
    /// Convert scale-unit lengths to world units
    pub fn scaled(self, scale: f32) -> Self {
        match self {
            BounceModel::Spring {
                tension,
                damping,
                kick,
                epsilon,
            } => BounceModel::Spring {
                tension,
                damping,
                kick: kick * scale,
                epsilon: epsilon * scale,
            },
            BounceModel::TwoPhase {
                rise_speed,
                fall_speed,
                peak,
            } => BounceModel::TwoPhase {
                rise_speed: rise_speed * scale,
                fall_speed: fall_speed * scale,
                peak: peak * scale,
            },
        }
    }
}

/// When an overlap between player and block counts as a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Player must be moving up through the block, once per cooldown window
    FromBelow {
        /// Seconds between two hits on the same block
        cooldown: f64,
    },
    /// Any overlap while the block is at rest (classic variant behavior)
    SettledOverlap,
}

/// How the layout scale is derived from the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaleRule {
    Fixed {
        scale: f32,
    },
    /// `min(max, width / divisor)`
    Capped { divisor: f32, max: f32 },
    /// Separate rules below and above a width breakpoint
    Responsive {
        breakpoint: f32,
        compact_divisor: f32,
        compact_min: f32,
        wide_divisor: f32,
        wide_min: f32,
        wide_max: f32,
    },
}

impl ScaleRule {
    /// Scale for a viewport of the given width
    pub fn scale_for(&self, width: f32) -> f32 {
        match *self {
            ScaleRule::Fixed { scale } => scale,
            ScaleRule::Capped { divisor, max } => (width / divisor).min(max),
            ScaleRule::Responsive {
                breakpoint,
                compact_divisor,
                compact_min,
                wide_divisor,
                wide_min,
                wide_max,
            } => {
                if width < breakpoint {
                    (width / compact_divisor).max(compact_min)
                } else {
                    (width / wide_divisor).clamp(wide_min, wide_max)
                }
            }
        }
    }

    /// Whether the width falls in the compact (touch-sized) range
    pub fn is_compact(&self, width: f32) -> bool {
        match *self {
            ScaleRule::Responsive { breakpoint, .. } => width < breakpoint,
            _ => false,
        }
    }
}

/// Floating glyph spawned above a block on hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorTuning {
    pub enabled: bool,
    pub glyph: String,
    /// Upward drift per frame (world units)
    pub rise_speed: f32,
    /// Opacity lost per frame
    pub fade_rate: f32,
}

impl Default for IndicatorTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            glyph: "📄".to_string(),
            rise_speed: 2.0,
            fade_rate: 0.02,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub scale_rule: ScaleRule,

    // === Player ===
    /// Downward acceleration per frame² (world units)
    pub gravity: f32,
    /// Vertical velocity set on jump (negative = up)
    pub jump_impulse: f32,
    /// Jump multiplier on compact layouts
    pub compact_jump_boost: f32,
    /// Horizontal top speed per frame (scale units)
    pub max_speed: f32,
    pub horizontal: HorizontalModel,
    /// Horizontal speed above which the walk cycle runs
    pub anim_threshold: f32,
    /// Frames per walk-cycle step
    pub frame_interval: f32,
    /// Player start position (world units)
    pub spawn_x: f32,

    // === World ===
    /// Total horizontal extent of the playable world (world units)
    pub map_limit: f32,
    /// X of the first block (world units)
    pub first_block_x: f32,
    /// Distance between consecutive blocks (world units)
    pub block_spacing: f32,
    /// Block collision box (scale units), larger than the drawn sprite
    pub hit_box_width: f32,
    pub hit_box_height: f32,

    // === Blocks ===
    pub bounce: BounceModel,
    pub trigger: TriggerPolicy,
    /// Seconds between a hit and its activation event
    pub activation_delay: f32,
    pub indicator: IndicatorTuning,

    // === Decoration ===
    pub scenery: SceneryConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::smooth()
    }
}

impl Tuning {
    /// Frame-rate independent variant with acceleration, spring bounce and hit cooldown
    pub fn smooth() -> Self {
        Self {
            scale_rule: ScaleRule::Responsive {
                breakpoint: 768.0,
                compact_divisor: 190.0,
                compact_min: 0.5,
                wide_divisor: 40.0,
                wide_min: 1.0,
                wide_max: 2.0,
            },
            gravity: 1.0,
            jump_impulse: -14.0,
            compact_jump_boost: 1.2,
            max_speed: 3.0,
            horizontal: HorizontalModel::Accelerated {
                accel: 0.4,
                friction: 0.85,
                stop_epsilon: 0.1,
            },
            anim_threshold: 0.1,
            frame_interval: 22.0,
            spawn_x: 200.0,
            map_limit: 5000.0,
            first_block_x: 500.0,
            block_spacing: 700.0,
            hit_box_width: 40.0,
            hit_box_height: 32.0,
            bounce: BounceModel::Spring {
                tension: 0.15,
                damping: 0.9,
                kick: -6.0,
                epsilon: 0.05,
            },
            trigger: TriggerPolicy::FromBelow { cooldown: 1.0 },
            activation_delay: 0.3,
            indicator: IndicatorTuning::default(),
            scenery: SceneryConfig::default(),
        }
    }

    /// First canvas variant: instant walking, two-phase bounce, no cooldown
    pub fn classic() -> Self {
        Self {
            scale_rule: ScaleRule::Capped {
                divisor: 200.0,
                max: 2.8,
            },
            gravity: 1.0,
            jump_impulse: -17.0,
            compact_jump_boost: 1.0,
            max_speed: 1.5,
            horizontal: HorizontalModel::Instant,
            spawn_x: 150.0,
            bounce: BounceModel::TwoPhase {
                rise_speed: 10.0,
                fall_speed: 2.0,
                peak: 10.0,
            },
            trigger: TriggerPolicy::SettledOverlap,
            activation_delay: 0.5,
            indicator: IndicatorTuning {
                enabled: false,
                ..IndicatorTuning::default()
            },
            scenery: SceneryConfig::classic(),
            ..Self::smooth()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "smooth" | "default" => Some(Self::smooth()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    /// Parse tuning from JSON; missing fields take the smooth preset's values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Jump impulse for the given layout density
    pub fn effective_jump_impulse(&self, compact: bool) -> f32 {
        if compact {
            self.jump_impulse * self.compact_jump_boost
        } else {
            self.jump_impulse
        }
    }
}
