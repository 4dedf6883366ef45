//! Renderer trait abstraction.

use crate::scene::Scene;
use inkboard_core::canvas::Canvas;
use inkboard_core::gesture::GesturePreview;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Font error: {0}")]
    Font(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// In-progress gesture content.
    pub preview: &'a GesturePreview,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Paper color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Color of placed text.
    pub text_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, preview: &'a GesturePreview, viewport_size: Size) -> Self {
        Self {
            canvas,
            preview,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            text_color: Color::from_rgba8(17, 24, 39, 255),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the paper color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// `build_scene` turns the frame context into a display list; `render` rasterizes the
/// last built scene onto the backend's surface.
pub trait Renderer: Send + Sync {
    /// Build the scene for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// The last built scene.
    fn scene(&self) -> &Scene;

    /// Draw the last built scene onto the surface.
    fn render(&mut self) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
