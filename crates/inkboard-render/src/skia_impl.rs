//! CPU raster backend on tiny-skia, with glyphs from ab_glyph.

use crate::fonts::FontBook;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::scene::{DrawCommand, Scene, build_scene};
use ab_glyph::{Font, PxScale, ScaleFont, point};
use inkboard_core::style::FontFamily;
use kurbo::{Affine, Point, Size};
use peniko::Color;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke,
    StrokeDash, Transform,
};

/// Renderer drawing into an in-memory pixmap.
pub struct SkiaRenderer {
    pixmap: Pixmap,
    scene: Scene,
    fonts: FontBook,
}

impl SkiaRenderer {
    /// Create a renderer with a surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
            scene: Scene::new(Color::WHITE, Affine::IDENTITY, Size::new(width as f64, height as f64)),
            fonts: FontBook::new(),
        })
    }

    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// The surface.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Resize the surface, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if self.pixmap.width() != width || self.pixmap.height() != height {
            self.pixmap = new_pixmap(width, height)?;
        }
        Ok(())
    }
}

impl Renderer for SkiaRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene = build_scene(ctx);
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn render(&mut self) -> RenderResult<()> {
        let (width, height) = pixel_size(self.scene.size);
        self.resize(width, height)?;
        rasterize(&self.scene, &self.fonts, &mut self.pixmap);
        Ok(())
    }
}

pub(crate) fn new_pixmap(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height)
        .ok_or_else(|| RendererError::Surface(format!("invalid surface size {width}x{height}")))
}

pub(crate) fn pixel_size(size: Size) -> (u32, u32) {
    (size.width.ceil().max(0.0) as u32, size.height.ceil().max(0.0) as u32)
}

fn to_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn paint(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

/// Draw every command of `scene` onto `pixmap`.
pub(crate) fn rasterize(scene: &Scene, fonts: &FontBook, pixmap: &mut Pixmap) {
    let rgba = scene.background.to_rgba8();
    pixmap.fill(tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a));
    let transform = to_transform(scene.transform);

    for command in &scene.commands {
        match command {
            DrawCommand::Polyline {
                points,
                width,
                color,
                dash,
            } => draw_polyline(pixmap, points, *width, *color, *dash, transform),
            DrawCommand::FillRect { rect, color } => {
                if let Some(rect) = tiny_skia::Rect::from_ltrb(
                    rect.x0 as f32,
                    rect.y0 as f32,
                    rect.x1 as f32,
                    rect.y1 as f32,
                ) {
                    pixmap.fill_rect(rect, &paint(*color), transform, None);
                }
            }
            DrawCommand::Text {
                lines,
                family,
                size,
                color,
            } => draw_text(pixmap, fonts, lines, *family, *size, *color, scene.transform),
        }
    }
}

fn draw_polyline(
    pixmap: &mut Pixmap,
    points: &[Point],
    width: f64,
    color: Color,
    dash: Option<f64>,
    transform: Transform,
) {
    let paint = paint(color);
    let [first, rest @ ..] = points else {
        return;
    };
    if rest.is_empty() {
        // A single point renders as a dot of the stroke's diameter.
        let radius = (width / 2.0).max(0.5) as f32;
        if let Some(dot) = PathBuilder::from_circle(first.x as f32, first.y as f32, radius) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, transform, None);
        }
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    let Some(path) = pb.finish() else {
        return;
    };
    let stroke = Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        dash: dash.and_then(|d| StrokeDash::new(vec![d as f32, d as f32], 0.0)),
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
}

/// Draw text lines by blending glyph coverage straight into the pixmap.
fn draw_text(
    pixmap: &mut Pixmap,
    fonts: &FontBook,
    lines: &[(String, Point)],
    family: FontFamily,
    size: f64,
    color: Color,
    transform: Affine,
) {
    let Some(font) = fonts.get(family) else {
        log::warn!("No font loaded for {}, skipping text", family.name());
        return;
    };
    let zoom = transform.determinant().abs().sqrt();
    let scale = PxScale::from((size * zoom) as f32);
    let scaled = font.as_scaled(scale);
    let rgba = color.to_rgba8();

    for (line, baseline) in lines {
        let origin = transform * *baseline;
        let mut pen_x = origin.x as f32;
        let mut previous = None;
        for ch in line.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                pen_x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(pen_x, origin.y as f32));
            pen_x += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let px = bounds.min.x as i64 + x as i64;
                let py = bounds.min.y as i64 + y as i64;
                blend_pixel(pixmap, px, py, rgba, coverage);
            });
        }
    }
}

/// Source-over blend of `rgba` at `coverage` onto one premultiplied pixel.
fn blend_pixel(pixmap: &mut Pixmap, x: i64, y: i64, rgba: peniko::color::Rgba8, coverage: f32) {
    let (width, height) = (pixmap.width() as i64, pixmap.height() as i64);
    if x < 0 || y < 0 || x >= width || y >= height {
        return;
    }
    let index = (y * width + x) as usize;
    let Some(dst) = pixmap.pixels_mut().get_mut(index) else {
        return;
    };

    let alpha = (rgba.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    let inverse = 1.0 - alpha;
    let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * inverse).round() as u8;
    let a = (alpha * 255.0 + dst.alpha() as f32 * inverse).round() as u8;
    let r = mix(rgba.r, dst.red()).min(a);
    let g = mix(rgba.g, dst.green()).min(a);
    let b = mix(rgba.b, dst.blue()).min(a);
    if let Some(blended) = PremultipliedColorU8::from_rgba(r, g, b, a) {
        *dst = blended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::canvas::Canvas;
    use inkboard_core::document::Stroke as InkStroke;
    use inkboard_core::gesture::GesturePreview;
    use inkboard_core::style::SerializableColor;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap
            .pixel(x, y)
            .expect("pixel in range")
            .demultiply();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn test_invalid_surface_size() {
        assert!(matches!(
            SkiaRenderer::new(0, 10),
            Err(RendererError::Surface(_))
        ));
    }

    #[test]
    fn test_render_stroke_pixels() {
        let mut canvas = Canvas::default();
        canvas.add_strokes(vec![InkStroke::new(
            1,
            vec![Point::new(10.0, 50.0), Point::new(90.0, 50.0)],
            6.0,
            SerializableColor::new(255, 0, 0, 255),
        )]);
        let preview = GesturePreview::default();
        let ctx = RenderContext::new(&canvas, &preview, Size::new(100.0, 100.0));

        let mut renderer = SkiaRenderer::new(100, 100).unwrap();
        renderer.build_scene(&ctx);
        renderer.render().unwrap();

        assert_eq!(pixel(renderer.pixmap(), 50, 50), (255, 0, 0, 255));
        assert_eq!(pixel(renderer.pixmap(), 50, 10), (255, 255, 255, 255));
    }

    #[test]
    fn test_render_resizes_for_pixel_ratio() {
        let canvas = Canvas::default();
        let preview = GesturePreview::default();
        let ctx = RenderContext::new(&canvas, &preview, Size::new(100.0, 60.0))
            .with_scale_factor(2.0);
        let mut renderer = SkiaRenderer::new(10, 10).unwrap();
        renderer.build_scene(&ctx);
        renderer.render().unwrap();
        assert_eq!(renderer.pixmap().width(), 200);
        assert_eq!(renderer.pixmap().height(), 120);
    }

    #[test]
    fn test_text_without_font_is_skipped() {
        let mut canvas = Canvas::default();
        canvas.insert_text("hello", Point::new(10.0, 10.0), 80.0);
        let preview = GesturePreview::default();
        let ctx = RenderContext::new(&canvas, &preview, Size::new(100.0, 100.0));
        let mut renderer = SkiaRenderer::new(100, 100).unwrap();
        renderer.build_scene(&ctx);
        assert!(renderer.render().is_ok());
        assert_eq!(pixel(renderer.pixmap(), 20, 20), (255, 255, 255, 255));
    }

    #[test]
    fn test_blend_pixel_bounds_and_coverage() {
        let mut pixmap = new_pixmap(4, 4).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        let black = peniko::color::Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        };
        blend_pixel(&mut pixmap, -1, 0, black, 1.0);
        blend_pixel(&mut pixmap, 4, 4, black, 1.0);
        blend_pixel(&mut pixmap, 1, 1, black, 1.0);
        blend_pixel(&mut pixmap, 2, 2, black, 0.5);
        assert_eq!(pixel(&pixmap, 1, 1), (0, 0, 0, 255));
        let (r, _, _, a) = pixel(&pixmap, 2, 2);
        assert_eq!(a, 255);
        assert!((126..=129).contains(&r));
    }
}
