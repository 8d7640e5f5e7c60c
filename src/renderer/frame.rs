//! Render step: world state to draw commands
//!
//! Layers back to front: background city, clouds, ground strip, bushes,
//! street lamps, blocks with labels, floating indicators, player.

use super::commands::{Color, DrawCommand, SpriteId, Stroke, TextAlign};
use super::scenery::Scenery;
use super::AssetCatalog;
use crate::consts::DEFAULT_BACKGROUND_WIDTH;
use crate::sim::{Facing, WorldState};

// Ground tiling in scale units
const GROUND_STEP: f32 = 32.0;
const GROUND_TILE: f32 = 80.0;

// Block label placement
const LABEL_FONT_PX: f32 = 16.0;
const LABEL_INSET: f32 = 8.0;
const LABEL_SHIFT_X: f32 = 20.0;
const LABEL_LIFT: f32 = 25.0;

const INDICATOR_FONT: f32 = 30.0;

/// Build the draw list for the current state
pub fn render(state: &WorldState, scenery: &Scenery, assets: &impl AssetCatalog) -> Vec<DrawCommand> {
    let layout = &state.layout;
    let s = layout.scale;
    let cam = state.camera.x;
    let view_w = layout.viewport.width;
    let view_h = layout.viewport.height;

    let mut out = Vec::with_capacity(64 + state.blocks.len() * 2);
    out.push(DrawCommand::Clear {
        width: view_w,
        height: view_h,
    });

    // Background city, tiled and scrolled by its parallax factor
    let bg_width = assets
        .size_of(SpriteId::Background)
        .map(|size| size.x)
        .filter(|w| *w > 0.0)
        .unwrap_or(DEFAULT_BACKGROUND_WIDTH);
    let mut x = -((cam * scenery.background_parallax) % bg_width);
    while x < view_w {
        out.push(sprite(SpriteId::Background, x, 0.0, bg_width, view_h));
        x += bg_width;
    }

    let visible = |x: f32, w: f32| x + w >= 0.0 && x <= view_w;
    let decor = &scenery.sizes;

    for cloud in &scenery.clouds {
        let (w, h) = (decor.cloud.x * s, decor.cloud.y * s);
        let x = cloud.x - cam * scenery.cloud_parallax;
        if visible(x, w) {
            out.push(sprite(SpriteId::Cloud, x, cloud.y, w, h));
        }
    }

    let ground = GROUND_TILE * s;
    let step = GROUND_STEP * s;
    if step > 0.0 {
        let mut world_x = 0.0;
        while world_x < layout.map_limit {
            let x = world_x - cam;
            if visible(x, ground) {
                out.push(sprite(SpriteId::Ground, x, layout.ground_y, ground, ground));
            }
            world_x += step;
        }
    }

    for bush_x in &scenery.bushes {
        let size = decor.bush * s;
        let x = bush_x - cam;
        if visible(x, size) {
            out.push(sprite(SpriteId::Bush, x, layout.ground_y - decor.bush_rise * s, size, size));
        }
    }

    for lamp_x in &scenery.lamps {
        let (w, h) = (decor.lamp.x * s, decor.lamp.y * s);
        let x = lamp_x - cam;
        if visible(x, w) {
            out.push(sprite(SpriteId::Lamp, x, layout.ground_y - decor.lamp_rise * s, w, h));
        }
    }

    for block in &state.blocks {
        let x = block.pos.x - cam;
        let y = block.draw_y();
        out.push(sprite(SpriteId::Block, x, y, layout.block_size, layout.block_size));
        out.push(DrawCommand::Text {
            text: block.label.clone(),
            x: x + LABEL_INSET * s - LABEL_SHIFT_X,
            y: y - LABEL_LIFT,
            size: LABEL_FONT_PX,
            align: TextAlign::Left,
            fill: Color::WHITE,
            stroke: Some(Stroke {
                color: Color::BLACK,
                width: 2.0,
            }),
            alpha: 1.0,
        });
    }

    for indicator in &state.indicators {
        out.push(DrawCommand::Text {
            text: indicator.glyph.clone(),
            x: indicator.pos.x - cam,
            y: indicator.pos.y,
            size: INDICATOR_FONT * s,
            align: TextAlign::Center,
            fill: Color::WHITE,
            stroke: None,
            alpha: indicator.opacity.clamp(0.0, 1.0),
        });
    }

    let player = &state.player;
    out.push(DrawCommand::Sprite {
        sprite: SpriteId::PlayerWalk(player.frame as u8),
        x: player.pos.x - cam,
        y: player.pos.y,
        width: player.size.x,
        height: player.size.y,
        flip_x: player.facing == Facing::Left,
        alpha: 1.0,
    });

    out
}

fn sprite(sprite: SpriteId, x: f32, y: f32, width: f32, height: f32) -> DrawCommand {
    DrawCommand::Sprite {
        sprite,
        x,
        y,
        width,
        height,
        flip_x: false,
        alpha: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::content::sample_sections;
    use crate::renderer::SceneryConfig;
    use crate::renderer::NoAssets;
    use crate::sim::{FloatingIndicator, Viewport};
    use crate::tuning::{ScaleRule, Tuning};

    struct WideBackground;

    impl AssetCatalog for WideBackground {
        fn size_of(&self, sprite: SpriteId) -> Option<Vec2> {
            (sprite == SpriteId::Background).then_some(Vec2::new(1000.0, 500.0))
        }
    }

    fn setup() -> (WorldState, Scenery) {
        let tuning = Tuning {
            scale_rule: ScaleRule::Fixed { scale: 1.0 },
            ..Tuning::smooth()
        };
        let scenery = Scenery::generate(&tuning.scenery, 42);
        let state = WorldState::new(tuning, Viewport::new(800.0, 600.0), &sample_sections());
        (state, scenery)
    }

    fn sprites_of(commands: &[DrawCommand], id: SpriteId) -> Vec<(f32, f32)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, x, y, .. } if *sprite == id => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_render_is_idempotent() {
        let (state, scenery) = setup();
        assert_eq!(
            render(&state, &scenery, &NoAssets),
            render(&state, &scenery, &NoAssets)
        );
    }

    #[test]
    fn test_clear_first_player_last() {
        let (state, scenery) = setup();
        let commands = render(&state, &scenery, &NoAssets);
        assert_eq!(
            commands.first(),
            Some(&DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            })
        );
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Sprite {
                sprite: SpriteId::PlayerWalk(0),
                flip_x: false,
                ..
            })
        ));
    }

    #[test]
    fn test_player_mirrors_when_facing_left() {
        let (mut state, scenery) = setup();
        state.player.facing = Facing::Left;
        state.player.frame = 2;
        let commands = render(&state, &scenery, &NoAssets);
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Sprite {
                sprite: SpriteId::PlayerWalk(2),
                flip_x: true,
                ..
            })
        ));
    }

    #[test]
    fn test_blocks_follow_camera_and_bounce() {
        let (mut state, scenery) = setup();
        state.camera.x = 300.0;
        state.blocks[0].bounce.offset = -7.0;
        let commands = render(&state, &scenery, &NoAssets);

        let blocks = sprites_of(&commands, SpriteId::Block);
        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks[0], (200.0, 413.0));
        assert_eq!(blocks[1], (900.0, 420.0));

        let label = commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, x, y, .. } if text == "Summary" => Some((*x, *y)),
            _ => None,
        });
        assert_eq!(label, Some((188.0, 388.0)));
    }

    #[test]
    fn test_background_covers_viewport() {
        let (mut state, scenery) = setup();
        state.camera.x = 2500.0;
        let commands = render(&state, &scenery, &WideBackground);
        let tiles = sprites_of(&commands, SpriteId::Background);
        // 2500 * 0.1 = 250 scrolled
        assert_eq!(tiles, vec![(-250.0, 0.0), (750.0, 0.0)]);
    }

    #[test]
    fn test_far_layers_scroll_slower() {
        let (mut state, scenery) = setup();
        let before = sprites_of(&render(&state, &scenery, &NoAssets), SpriteId::Cloud);
        state.camera.x = 100.0;
        let after = sprites_of(&render(&state, &scenery, &NoAssets), SpriteId::Cloud);
        // First cloud visible in both frames moved 15px for a 100px scroll
        assert!((before[0].0 - after[0].0 - 15.0).abs() < 1e-3);

        let ground = sprites_of(&render(&state, &scenery, &NoAssets), SpriteId::Ground);
        // The tile at world x=0 ends at -20 and is culled
        assert_eq!(ground[0].0, 32.0 - 100.0);
    }

    #[test]
    fn test_decor_sizes_follow_scenery_preset() {
        let (state, scenery) = setup();
        let classic = Scenery::generate(&SceneryConfig::classic(), 42);

        let cloud_size = |scenery: &Scenery| {
            render(&state, scenery, &NoAssets).iter().find_map(|c| match c {
                DrawCommand::Sprite {
                    sprite: SpriteId::Cloud,
                    width,
                    height,
                    ..
                } => Some((*width, *height)),
                _ => None,
            })
        };
        assert_eq!(cloud_size(&scenery), Some((180.0, 150.0)));
        assert_eq!(cloud_size(&classic), Some((100.0, 40.0)));

        // Ground line at 520 for an 800x600 unit layout
        let bushes = sprites_of(&render(&state, &scenery, &NoAssets), SpriteId::Bush);
        assert_eq!(bushes[0], (100.0, 520.0 - 115.0));
        let bushes = sprites_of(&render(&state, &classic, &NoAssets), SpriteId::Bush);
        assert_eq!(bushes[0], (400.0, 520.0 - 112.0));
        let lamps = sprites_of(&render(&state, &classic, &NoAssets), SpriteId::Lamp);
        assert_eq!(lamps[0], (600.0, 520.0 - 141.0));
    }

    #[test]
    fn test_offscreen_scenery_is_culled() {
        let (state, scenery) = setup();
        let commands = render(&state, &scenery, &NoAssets);
        for (x, _) in sprites_of(&commands, SpriteId::Lamp) {
            assert!(x <= 800.0);
        }
        assert_eq!(sprites_of(&commands, SpriteId::Lamp).len(), 1);
        assert!(sprites_of(&commands, SpriteId::Ground).len() < 30);
    }

    #[test]
    fn test_indicator_alpha() {
        let (mut state, scenery) = setup();
        state.indicators.push(FloatingIndicator {
            pos: Vec2::new(512.5, 400.0),
            glyph: "📄".into(),
            opacity: 0.4,
        });
        let commands = render(&state, &scenery, &NoAssets);
        let alpha = commands.iter().find_map(|c| match c {
            DrawCommand::Text {
                text,
                alpha,
                align: TextAlign::Center,
                ..
            } if text == "📄" => Some(*alpha),
            _ => None,
        });
        assert_eq!(alpha, Some(0.4));
    }
}
