//! Horizontal follow camera

use serde::{Deserialize, Serialize};

use super::layout::WorldLayout;

/// Horizontal scroll subtracted from world x to get screen x
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Center the player in the viewport, clamped to the map
    pub fn follow(&mut self, player_x: f32, layout: &WorldLayout) {
        let center_margin = layout.viewport.width / 2.0 - layout.player_size.x / 2.0;
        self.x = (player_x - center_margin).clamp(0.0, layout.max_camera_x());
    }

    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::Viewport;
    use crate::tuning::{ScaleRule, Tuning};

    fn layout() -> WorldLayout {
        let tuning = Tuning {
            scale_rule: ScaleRule::Fixed { scale: 1.0 },
            ..Tuning::smooth()
        };
        WorldLayout::new(Viewport::new(800.0, 600.0), &tuning, 6)
    }

    #[test]
    fn test_left_edge_clamps_to_zero() {
        let mut camera = Camera::default();
        camera.follow(100.0, &layout());
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn test_centers_player_mid_map() {
        let layout = layout();
        let mut camera = Camera::default();
        camera.follow(2000.0, &layout);
        // center margin = 400 - 12.5
        assert_eq!(camera.x, 1612.5);
        assert_eq!(camera.to_screen_x(2000.0), 387.5);
    }

    #[test]
    fn test_right_edge_clamps_to_map() {
        let layout = layout();
        let mut camera = Camera::default();
        camera.follow(layout.max_player_x(), &layout);
        assert_eq!(camera.x, layout.map_limit - layout.viewport.width);
        assert_ne!(camera.x, layout.max_player_x() - 387.5);
    }
}
