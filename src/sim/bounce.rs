//! Block bounce animation
//!
//! A hit kicks the block upward; the offset then returns to baseline under
//! the configured `BounceModel`. A block accepts a new hit only once settled.

use serde::{Deserialize, Serialize};

use crate::tuning::BounceModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BouncePhase {
    #[default]
    Idle,
    /// Moving away from baseline (two-phase) or spring in motion
    Rising,
    /// Returning to baseline (two-phase only)
    Falling,
}

/// Transient vertical displacement of a block (negative = up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BounceState {
    pub offset: f32,
    /// Spring velocity per frame; unused by the two-phase model
    pub velocity: f32,
    pub phase: BouncePhase,
}

impl BounceState {
    /// Start a bounce
    pub fn kick(&mut self, model: &BounceModel) {
        self.phase = BouncePhase::Rising;
        // Two-phase motion is driven by phase alone
        if let BounceModel::Spring { kick, .. } = *model {
            self.velocity = kick;
        }
    }

    /// Advance the animation by `tf` reference frames
    pub fn step(&mut self, model: &BounceModel, tf: f32) {
        if self.phase == BouncePhase::Idle {
            return;
        }

        match *model {
            BounceModel::Spring {
                tension,
                damping,
                epsilon,
                ..
            } => {
                self.velocity += -self.offset * tension * tf;
                self.velocity *= damping.powf(tf);
                self.offset += self.velocity * tf;
                if self.offset.abs() < epsilon && self.velocity.abs() < epsilon {
                    self.settle();
                }
            }
            BounceModel::TwoPhase {
                rise_speed,
                fall_speed,
                peak,
            } => match self.phase {
                BouncePhase::Rising => {
                    self.offset -= rise_speed * tf;
                    if self.offset <= -peak {
                        self.offset = -peak;
                        self.phase = BouncePhase::Falling;
                    }
                }
                BouncePhase::Falling => {
                    self.offset += fall_speed * tf;
                    if self.offset >= 0.0 {
                        self.settle();
                    }
                }
                BouncePhase::Idle => {}
            },
        }
    }

    /// Back at baseline and at rest
    pub fn is_settled(&self) -> bool {
        self.phase == BouncePhase::Idle
    }

    fn settle(&mut self) {
        *self = Self::default();
    }
}
