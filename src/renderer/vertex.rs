//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::renderer::Color;

    /// Sky behind everything (the surface clear color)
    pub const SKY: Color = Color::from_hex(0x8ec9f0);
    pub const PLATFORM: Color = Color::from_hex(0x6b4f2a);
    pub const COIN: Color = Color::GOLD;
    pub const SCORE_TEXT: Color = Color::BLACK;
    pub const GAME_OVER_TEXT: Color = Color::RED;
    pub const WIN_TEXT: Color = Color::GOLD;

    /// Flat tints used when sprites are drawn as colored quads
    pub const PLAYER_TINT: Color = Color::from_hex(0xe52521);
    pub const ENEMY_TINT: Color = Color::from_hex(0x8b3a0f);
    pub const REWARD_TINT: Color = Color::from_hex(0x2ecc40);
    pub const DECORATION_TINT: Color = Color::from_hex(0x5a5a6e);
}
