//! Draw command list consumed by a canvas backend

use serde::{Deserialize, Serialize};

/// Drawable images, requested from the asset collaborator by logical name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Background,
    Cloud,
    Ground,
    Bush,
    Lamp,
    Block,
    /// Walk-cycle frame of the right-facing player sprite
    PlayerWalk(u8),
}

impl SpriteId {
    /// Every sprite the scene can reference
    pub fn all() -> Vec<SpriteId> {
        let mut sprites = vec![
            SpriteId::Background,
            SpriteId::Cloud,
            SpriteId::Ground,
            SpriteId::Bush,
            SpriteId::Lamp,
            SpriteId::Block,
        ];
        sprites.extend((0..crate::consts::WALK_FRAMES as u8).map(SpriteId::PlayerWalk));
        sprites
    }

    /// Asset path relative to the site root
    pub fn asset_name(&self) -> String {
        match self {
            SpriteId::Background => "assets/ciudad.png".to_string(),
            SpriteId::Cloud => "assets/nube.png".to_string(),
            SpriteId::Ground => "assets/suelo.png".to_string(),
            SpriteId::Bush => "assets/arbusto.png".to_string(),
            SpriteId::Lamp => "assets/farol.png".to_string(),
            SpriteId::Block => "assets/bloque.png".to_string(),
            // Right-facing frames are tile004..tile007
            SpriteId::PlayerWalk(frame) => format!("assets/tile{:03}.png", 4 + *frame as u32),
        }
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Text outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A single screen-space drawing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Sprite {
        sprite: SpriteId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Mirror horizontally around the sprite's center
        flip_x: bool,
        alpha: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        /// Font size in pixels
        size: f32,
        align: TextAlign,
        fill: Color,
        stroke: Option<Stroke>,
        alpha: f32,
    },
}
