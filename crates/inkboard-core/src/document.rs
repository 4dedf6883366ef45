//! Drawing model: strokes, placed text and pages.

use crate::geometry::Bounds;
use crate::style::{FontFamily, SerializableColor};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Identifier of a stroke or text item.
pub type ItemId = u64;

/// Number of consecutive ids reserved per allocation, so a multi-stroke shape can
/// hand out `base + index` to each of its strokes.
pub const ID_BLOCK: u64 = 64;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.3;
/// Distance from the top of a line box to its baseline, as a multiple of the font size.
pub const BASELINE_RATIO: f64 = 0.8;

/// Hands out process-unique ids derived from the creation time.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: ItemId,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Seed the generator from the wall clock.
    pub fn new() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::starting_at(millis.saturating_mul(ID_BLOCK))
    }

    /// Start from a fixed id (used by tests and when resuming a loaded document).
    pub fn starting_at(next: ItemId) -> Self {
        Self { next }
    }

    /// Reserve a block of [`ID_BLOCK`] ids and return its base.
    pub fn next_block(&mut self) -> ItemId {
        let base = self.next;
        self.next = self.next.saturating_add(ID_BLOCK);
        base
    }

    /// Make sure future blocks never collide with `id`.
    pub fn reserve_past(&mut self, id: ItemId) {
        if id >= self.next {
            self.next = (id / ID_BLOCK + 1).saturating_mul(ID_BLOCK);
        }
    }
}

/// An ordered polyline with uniform width and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: ItemId,
    pub points: Vec<Point>,
    pub stroke_width: f64,
    pub color: SerializableColor,
}

impl Stroke {
    pub fn new(id: ItemId, points: Vec<Point>, stroke_width: f64, color: SerializableColor) -> Self {
        Self {
            id,
            points,
            stroke_width,
            color,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.points.iter())
    }

    /// Copy of the stroke shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + delta).collect(),
            ..self.clone()
        }
    }
}

/// A block of placed text (typically the result of handwriting recognition).
///
/// `bounds` anchors the top-left corner; its height is advisory since lines are
/// laid out baseline by baseline and never clipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub id: ItemId,
    pub text: String,
    pub bounds: Bounds,
    pub font_family: FontFamily,
    pub font_size: f64,
}

impl TextItem {
    /// Create a text item at `origin`, sizing the layout box from the line count.
    pub fn new(
        id: ItemId,
        text: impl Into<String>,
        origin: Point,
        width: f64,
        font_family: FontFamily,
        font_size: f64,
    ) -> Self {
        let text = text.into();
        let height = Self::layout_height(&text, font_size);
        Self {
            id,
            text,
            bounds: Bounds::new(origin.x, origin.y, width, height),
            font_family,
            font_size,
        }
    }

    /// Height taken by `text` laid out at `font_size`.
    pub fn layout_height(text: &str, font_size: f64) -> f64 {
        text.lines().count().max(1) as f64 * font_size * LINE_HEIGHT
    }

    /// Baseline y of the first line relative to the item's top edge.
    pub fn baseline_offset(&self) -> f64 {
        self.font_size * BASELINE_RATIO
    }

    /// Lines with their baseline positions for a box whose top-left is `origin`.
    pub fn baselines_at(&self, origin: Point) -> impl Iterator<Item = (&str, Point)> {
        let first = origin.y + self.baseline_offset();
        let advance = self.font_size * LINE_HEIGHT;
        self.text
            .lines()
            .enumerate()
            .map(move |(i, line)| (line, Point::new(origin.x, first + i as f64 * advance)))
    }

    /// Copy of the item shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            bounds: self.bounds.translate(delta),
            ..self.clone()
        }
    }
}

/// One page of the drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub strokes: Vec<Stroke>,
    pub texts: Vec<TextItem>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            strokes: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.texts.is_empty()
    }

    pub fn text(&self, id: ItemId) -> Option<&TextItem> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn text_mut(&mut self, id: ItemId) -> Option<&mut TextItem> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    /// Bounds of all strokes on the page.
    pub fn stroke_bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.strokes.iter().flat_map(|s| s.points.iter()))
    }

    /// Largest id in use on the page.
    pub fn max_id(&self) -> Option<ItemId> {
        self.strokes
            .iter()
            .map(|s| s.id)
            .chain(self.texts.iter().map(|t| t.id))
            .max()
    }
}

/// The unit of undo history: every page of the drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new()],
        }
    }

    pub fn max_id(&self) -> Option<ItemId> {
        self.pages.iter().filter_map(Page::max_id).max()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_blocks_do_not_overlap() {
        let mut ids = IdGenerator::starting_at(1000);
        let a = ids.next_block();
        let b = ids.next_block();
        assert_eq!(a, 1000);
        assert_eq!(b, 1000 + ID_BLOCK);
    }

    #[test]
    fn test_reserve_past() {
        let mut ids = IdGenerator::starting_at(0);
        ids.reserve_past(130);
        assert!(ids.next_block() > 130);
    }

    #[test]
    fn test_text_layout_height() {
        let item = TextItem::new(1, "a\nb\nc", Point::ZERO, 100.0, FontFamily::Sans, 20.0);
        assert!((item.bounds.height - 3.0 * 20.0 * LINE_HEIGHT).abs() < 1e-9);
        let baselines: Vec<_> = item.baselines_at(Point::new(10.0, 0.0)).collect();
        assert_eq!(baselines.len(), 3);
        assert_eq!(baselines[0].0, "a");
        assert!((baselines[0].1.y - 16.0).abs() < 1e-9);
        assert!((baselines[1].1.y - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_document_json_roundtrip_preserves_equality() {
        let mut doc = Document::new();
        doc.pages[0].strokes.push(Stroke::new(
            7,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0)],
            3.0,
            SerializableColor::black(),
        ));
        let json = doc.to_json().unwrap();
        assert_eq!(Document::from_json(&json).unwrap(), doc);
        assert_eq!(doc.max_id(), Some(7));
    }
}
