//! Backend-neutral display list.
//!
//! Commands are in world coordinates; `Scene::transform` maps them onto the surface.
//! Widths that must look the same at every zoom (pattern lines, the selection outline)
//! are divided by the zoom level when the scene is built.

use crate::renderer::RenderContext;
use inkboard_core::background::{BORDERLINE_MARGIN_X, BackgroundKind, COPYBOOK_GUIDE_OFFSET};
use inkboard_core::document::{Stroke, TextItem};
use inkboard_core::geometry::Bounds;
use inkboard_core::hit_test::RegionExport;
use inkboard_core::style::FontFamily;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;

const SELECTION_FILL_ALPHA: f32 = 25.0 / 255.0;
const GUIDE_ALPHA: f32 = 0.45;
const MARGIN_COLOR: Color = Color::from_rgba8(220, 110, 110, 255);

/// One drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Polyline with round caps and joins; `dash` is the on/off length.
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Color,
        dash: Option<f64>,
    },
    FillRect { rect: Rect, color: Color },
    /// Text laid out baseline by baseline; each line starts at its baseline origin.
    Text {
        lines: Vec<(String, Point)>,
        family: FontFamily,
        size: f64,
        color: Color,
    },
}

/// A frame ready to rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Surface clear color.
    pub background: Color,
    /// World to surface pixels.
    pub transform: Affine,
    /// Surface size in pixels.
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(background: Color, transform: Affine, size: Size) -> Self {
        Self {
            background,
            transform,
            size,
            commands: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.commands.push(DrawCommand::Polyline {
            points: vec![from, to],
            width,
            color,
            dash: None,
        });
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: stroke.points.clone(),
            width: stroke.stroke_width,
            color: stroke.color.into(),
            dash: None,
        });
    }

    fn text(&mut self, item: &TextItem, origin: Point, color: Color) {
        let lines = item
            .baselines_at(origin)
            .map(|(line, baseline)| (line.to_string(), baseline))
            .collect();
        self.commands.push(DrawCommand::Text {
            lines,
            family: item.font_family,
            size: item.font_size,
            color,
        });
    }
}

/// Build the frame for the canvas view.
pub fn build_scene(ctx: &RenderContext) -> Scene {
    let canvas = ctx.canvas;
    let view = &canvas.viewport;
    let size = Size::new(
        ctx.viewport_size.width * ctx.scale_factor,
        ctx.viewport_size.height * ctx.scale_factor,
    );
    let transform = Affine::scale(ctx.scale_factor) * view.transform();
    let mut scene = Scene::new(ctx.background_color, transform, size);

    let settings = &canvas.settings;
    let visible = Bounds::from_corners(
        view.to_world(Point::ZERO),
        view.to_world(Point::new(ctx.viewport_size.width, ctx.viewport_size.height)),
    );
    let hairline = 1.0 / view.scale;
    render_background(
        &mut scene,
        settings.background,
        settings.background_color.into(),
        visible,
        view.scale,
        hairline,
    );

    let page = canvas.page();
    for stroke in &page.strokes {
        scene.stroke(stroke);
    }

    let preview = ctx.preview;
    if let Some(stroke) = &preview.stroke {
        scene.stroke(stroke);
    }
    for stroke in &preview.shape {
        scene.stroke(stroke);
    }

    for item in &page.texts {
        let origin = match preview.text_drag {
            Some((id, offset)) if id == item.id => item.bounds.origin() + offset,
            _ => item.bounds.origin(),
        };
        scene.text(item, origin, ctx.text_color);
    }

    if let Some(selection) = preview.selection {
        render_selection(&mut scene, selection, ctx.selection_color, view.scale);
    }

    scene
}

/// Build the frame for an exported region at `scale` pixels per world unit.
pub fn region_scene(region: &RegionExport, scale: f64, text_color: Color) -> Scene {
    let (width, height) = region.size();
    let size = Size::new((width * scale).ceil(), (height * scale).ceil());
    let mut scene = Scene::new(Color::WHITE, Affine::scale(scale), size);
    for stroke in &region.strokes {
        scene.stroke(stroke);
    }
    for item in &region.texts {
        scene.text(item, item.bounds.origin(), text_color);
    }
    scene
}

/// Pattern lines covering `visible`, hidden when too dense on screen.
fn render_background(
    scene: &mut Scene,
    kind: BackgroundKind,
    color: Color,
    visible: Bounds,
    zoom: f64,
    hairline: f64,
) {
    let Some(spacing) = kind.spacing() else {
        return;
    };
    if !kind.visible_at(zoom) {
        return;
    }

    let start_x = (visible.x / spacing).floor() * spacing;
    let start_y = (visible.y / spacing).floor() * spacing;
    let (end_x, end_y) = (visible.right(), visible.bottom());
    let mut rules = Vec::new();
    let mut y = start_y;
    while y <= end_y + spacing {
        rules.push(y);
        y += spacing;
    }
    let row = |scene: &mut Scene, y: f64, color: Color| {
        scene.line(Point::new(visible.x, y), Point::new(end_x, y), hairline, color);
    };

    match kind {
        BackgroundKind::Plain => {}
        BackgroundKind::Grid => {
            let mut x = start_x;
            while x <= end_x {
                scene.line(Point::new(x, visible.y), Point::new(x, end_y), hairline, color);
                x += spacing;
            }
            for y in rules {
                row(scene, y, color);
            }
        }
        BackgroundKind::Ruled => {
            let guide = color.multiply_alpha(GUIDE_ALPHA);
            for y in rules {
                row(scene, y, color);
                row(scene, y - COPYBOOK_GUIDE_OFFSET, guide);
            }
        }
        BackgroundKind::Borderline => {
            for y in rules {
                row(scene, y, color);
            }
            if visible.x <= BORDERLINE_MARGIN_X && BORDERLINE_MARGIN_X <= end_x {
                scene.line(
                    Point::new(BORDERLINE_MARGIN_X, visible.y),
                    Point::new(BORDERLINE_MARGIN_X, end_y),
                    hairline,
                    MARGIN_COLOR,
                );
            }
        }
    }
}

/// Translucent fill plus a dashed outline that stays the same size on screen.
fn render_selection(scene: &mut Scene, selection: Bounds, color: Color, zoom: f64) {
    let rect = selection.to_rect();
    scene.commands.push(DrawCommand::FillRect {
        rect,
        color: color.with_alpha(SELECTION_FILL_ALPHA),
    });
    let outline = vec![
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x0, rect.y0),
    ];
    scene.commands.push(DrawCommand::Polyline {
        points: outline,
        width: 1.0 / zoom,
        color,
        dash: Some(4.0 / zoom),
    });
}
