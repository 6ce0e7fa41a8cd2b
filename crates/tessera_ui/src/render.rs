//! UI rendering system.
//!
//! Widgets and fonts draw through the [`SpriteBatch`] contract and upload
//! pixels through [`TextureDevice`]. [`UIRenderer`] and [`TextureRegistry`]
//! are the headless implementations: they record commands and keep pixels in
//! memory, ready for a GPU backend to consume.

use crate::geometry::{Rect, Vec2};
use crate::style::Color;
use bytemuck::{Pod, Zeroable};
use std::collections::HashMap;

/// Opaque handle to an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// One 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a pixel.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// White with the given coverage as alpha.
    #[must_use]
    pub const fn white_alpha(alpha: u8) -> Self {
        Self::new(255, 255, 255, alpha)
    }
}

/// Mirroring applied to a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpriteEffects {
    /// Draw as-is.
    #[default]
    None,
    /// Mirror horizontally.
    FlipHorizontally,
    /// Mirror vertically.
    FlipVertically,
}

/// A textured quad cut from a texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Source texture.
    pub texture: TextureId,
    /// Destination position in current-resolution pixels.
    pub position: Vec2,
    /// Source rectangle within the texture.
    pub source: Rect,
    /// Tint color.
    pub color: Color,
    /// Rotation around `origin`, in radians.
    pub rotation: f32,
    /// Rotation origin, relative to the source rectangle.
    pub origin: Vec2,
    /// Scale factor.
    pub scale: Vec2,
    /// Mirroring.
    pub effects: SpriteEffects,
    /// Sort depth (0 front, 1 back).
    pub layer_depth: f32,
}

/// Drawing primitives widgets and fonts rely on.
pub trait SpriteBatch {
    /// Queues a textured quad.
    fn draw_sprite(&mut self, sprite: Sprite);

    /// Queues a solid rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color);
}

/// Texture upload and release.
pub trait TextureDevice {
    /// Uploads a `width` × `height` row-major pixel buffer.
    fn create_texture(&mut self, width: u32, height: u32, pixels: &[Rgba]) -> TextureId;

    /// Releases a texture. Releasing an unknown id does nothing.
    fn release_texture(&mut self, texture: TextureId);
}

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Textured quad.
    Sprite(Sprite),
}

impl RenderCommand {
    /// Texture this command samples, if any.
    #[must_use]
    pub const fn texture(&self) -> Option<TextureId> {
        match self {
            Self::Rect { .. } => None,
            Self::Sprite(sprite) => Some(sprite.texture),
        }
    }
}

/// A run of consecutive commands sharing one texture.
#[derive(Debug, Clone, Default)]
pub struct UIBatch {
    /// Commands in this batch.
    pub commands: Vec<RenderCommand>,
    /// Texture bound for the batch (`None` for untextured fills).
    pub texture: Option<TextureId>,
}

/// UI renderer that collects and batches commands.
pub struct UIRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Final batches for rendering.
    batches: Vec<UIBatch>,
}

impl UIRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(4096),
            batches: Vec::with_capacity(64),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.batches.clear();
    }

    /// Commands queued so far this frame.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Ends the frame and returns batches split on texture changes.
    pub fn end_frame(&mut self) -> &[UIBatch] {
        self.batches.clear();
        for command in self.commands.drain(..) {
            let texture = command.texture();
            match self.batches.last_mut() {
                Some(batch) if batch.texture == texture => batch.commands.push(command),
                _ => self.batches.push(UIBatch {
                    commands: vec![command],
                    texture,
                }),
            }
        }
        &self.batches
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteBatch for UIRenderer {
    fn draw_sprite(&mut self, sprite: Sprite) {
        self.commands.push(RenderCommand::Sprite(sprite));
    }

    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.commands.push(RenderCommand::Rect { bounds, color });
    }
}

/// Pixels of an uploaded texture.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Raw RGBA bytes, row-major.
    pub bytes: Vec<u8>,
}

impl Texture {
    /// Pixel at (`x`, `y`), if inside the texture.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pixels: &[Rgba] = bytemuck::cast_slice(&self.bytes);
        pixels.get((y * self.width + x) as usize).copied()
    }
}

/// In-memory texture device.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: HashMap<TextureId, Texture>,
    next_id: u32,
    released: u64,
}

impl TextureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live texture.
    #[must_use]
    pub fn get(&self, texture: TextureId) -> Option<&Texture> {
        self.textures.get(&texture)
    }

    /// Number of live textures.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of textures released so far.
    #[must_use]
    pub const fn released_count(&self) -> u64 {
        self.released
    }
}

impl TextureDevice for TextureRegistry {
    fn create_texture(&mut self, width: u32, height: u32, pixels: &[Rgba]) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(
            id,
            Texture {
                width,
                height,
                bytes: bytemuck::cast_slice(pixels).to_vec(),
            },
        );
        id
    }

    fn release_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_some() {
            self.released += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(texture: u32) -> Sprite {
        Sprite {
            texture: TextureId(texture),
            position: Vec2::ZERO,
            source: Rect::new(0, 0, 4, 4),
            color: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            effects: SpriteEffects::None,
            layer_depth: 0.0,
        }
    }

    #[test]
    fn test_renderer_frame() {
        let mut renderer = UIRenderer::new();

        renderer.begin_frame();
        renderer.fill_rect(Rect::new(0, 0, 100, 50), Color::WHITE);

        let batches = renderer.end_frame();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].commands.len(), 1);
        assert_eq!(batches[0].texture, None);
    }

    #[test]
    fn test_batches_split_on_texture_change() {
        let mut renderer = UIRenderer::new();
        renderer.draw_sprite(sprite(0));
        renderer.draw_sprite(sprite(0));
        renderer.draw_sprite(sprite(1));
        renderer.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK);

        let textures: Vec<_> = renderer.end_frame().iter().map(|b| b.texture).collect();
        assert_eq!(textures, vec![Some(TextureId(0)), Some(TextureId(1)), None]);
    }

    #[test]
    fn test_registry_round_trips_pixels() {
        let mut registry = TextureRegistry::new();
        let mut pixels = vec![Rgba::TRANSPARENT; 4];
        pixels[3] = Rgba::white_alpha(200);

        let id = registry.create_texture(2, 2, &pixels);
        let texture = registry.get(id).unwrap();
        assert_eq!(texture.pixel(1, 1), Some(Rgba::white_alpha(200)));
        assert_eq!(texture.pixel(2, 0), None);

        registry.release_texture(id);
        registry.release_texture(id);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.released_count(), 1);
    }
}
