//! CPU-side draw primitives for the gallows scene
//!
//! The scene emits plain shapes; any backend (or a test) can consume them
//! without a GPU dependency.

use glam::Vec2;
use serde::Serialize;

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

/// Dark wood of the gallows frame
pub const GALLOWS_COLOR: Color = [0.137, 0.118, 0.110, 1.0];
/// Hemp rope
pub const ROPE_COLOR: Color = [0.353, 0.275, 0.196, 1.0];
/// Pale bone gray of the figure
pub const BODY_COLOR: Color = [0.706, 0.686, 0.667, 1.0];

/// A single shape to draw, in scene coordinates (y grows downward).
#[derive(Debug, Clone, Copy, Serialize)]
pub enum DrawCmd {
    Line {
        a: Vec2,
        b: Vec2,
        width: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        filled: bool,
    },
}

pub fn line(a: Vec2, b: Vec2, width: f32, color: Color) -> DrawCmd {
    DrawCmd::Line { a, b, width, color }
}

pub fn circle(center: Vec2, radius: f32, color: Color, filled: bool) -> DrawCmd {
    DrawCmd::Circle {
        center,
        radius,
        color,
        filled,
    }
}
