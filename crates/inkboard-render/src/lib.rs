//! Inkboard Render Library
//!
//! Renderer abstraction for the Inkboard canvas. Frames are built into a
//! backend-neutral [`Scene`]; the default backend rasterizes on the CPU with tiny-skia.

mod export;
mod fonts;
mod renderer;
pub mod scene;
mod skia_impl;

pub use export::{encode_png, export_region_png, render_region};
pub use fonts::FontBook;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{DrawCommand, Scene, build_scene, region_scene};
pub use skia_impl::SkiaRenderer;
