//! Canvas state: the document, its history, the view and the live selection.

use crate::config::CanvasConfig;
use crate::document::{BASELINE_RATIO, Document, IdGenerator, ItemId, Page, Stroke, TextItem};
use crate::geometry::Bounds;
use crate::hit_test::{EraseHits, erase_hits, extract_region};
use crate::history::History;
use crate::services::{AnswerLength, AnswerRequest, RecognitionRequest, RequestError};
use crate::style::FontFamily;
use crate::tools::ToolSettings;
use crate::viewport::ViewTransform;
use kurbo::{Point, Size, Vec2};

/// Commands the surrounding UI may invoke on the engine.
///
/// Hosts receive a `&mut dyn CanvasCommands` from whoever owns the canvas instead of
/// looking the engine up through shared state.
pub trait CanvasCommands {
    /// Step back one history entry. Returns false at the start of history.
    fn undo(&mut self) -> bool;
    /// Step forward one history entry. Returns false at the end of history.
    fn redo(&mut self) -> bool;
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    /// Record the current document as a history entry. Returns false if unchanged.
    fn commit(&mut self) -> bool;
    /// Remove everything from the current page.
    fn request_clear(&mut self);
    /// Start over with a single empty page and a fresh history.
    fn request_reset(&mut self);
}

/// Runtime canvas state.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: Document,
    current_page: usize,
    history: History<Document>,
    ids: IdGenerator,
    /// View transform (not part of history).
    pub viewport: ViewTransform,
    /// Viewport size in device pixels.
    pub viewport_size: Size,
    /// Tool and style settings.
    pub settings: ToolSettings,
    pub config: CanvasConfig,
    /// Retained selection rectangle in world coordinates.
    pub selection: Option<Bounds>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), ToolSettings::default())
    }
}

impl Canvas {
    /// Create a canvas with a single empty page.
    pub fn new(config: CanvasConfig, settings: ToolSettings) -> Self {
        Self::with_document(Document::new(), config, settings)
    }

    /// Create a canvas editing an existing document. History starts at that document.
    pub fn with_document(document: Document, config: CanvasConfig, settings: ToolSettings) -> Self {
        let document = if document.pages.is_empty() {
            Document::new()
        } else {
            document
        };
        let mut ids = IdGenerator::new();
        if let Some(max) = document.max_id() {
            ids.reserve_past(max);
        }
        Self {
            history: History::new(document.clone(), config.history_limit),
            document,
            current_page: 0,
            ids,
            viewport: ViewTransform::new(config.min_zoom, config.max_zoom),
            viewport_size: Size::new(800.0, 600.0),
            settings,
            config,
            selection: None,
        }
    }

    /// Replace the id source (tests use a fixed seed).
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        if let Some(max) = self.document.max_id() {
            self.ids.reserve_past(max);
        }
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Apply an external edit to the document and commit it as one history entry.
    ///
    /// A document left without pages gets a fresh empty page, so there is always a
    /// current page to draw on.
    pub fn edit_document(&mut self, edit: impl FnOnce(&mut Document)) -> bool {
        edit(&mut self.document);
        if self.document.pages.is_empty() {
            log::warn!("Edit removed every page; adding an empty one");
            self.document.pages.push(Page::new());
        }
        if let Some(max) = self.document.max_id() {
            self.ids.reserve_past(max);
        }
        self.clamp_current_page();
        self.commit()
    }

    pub fn page(&self) -> &Page {
        &self.document.pages[self.current_page]
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.document.pages[self.current_page]
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Base of a fresh id block.
    pub fn next_id(&mut self) -> ItemId {
        self.ids.next_block()
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }

    pub fn undo(&mut self) -> bool {
        let Some(state) = self.history.undo() else {
            return false;
        };
        self.document = state.clone();
        self.clamp_current_page();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(state) = self.history.redo() else {
            return false;
        };
        self.document = state.clone();
        self.clamp_current_page();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn commit(&mut self) -> bool {
        let changed = self.history.commit(self.document.clone());
        if changed {
            log::debug!(
                "Committed history entry {} of {}",
                self.history.cursor() + 1,
                self.history.len()
            );
        }
        changed
    }

    fn clamp_current_page(&mut self) {
        self.current_page = self.current_page.min(self.document.pages.len().saturating_sub(1));
    }

    /// Add strokes to the current page as one history entry.
    pub fn add_strokes(&mut self, strokes: Vec<Stroke>) -> bool {
        if strokes.is_empty() {
            return false;
        }
        self.page_mut().strokes.extend(strokes);
        self.commit()
    }

    /// Remove everything within `radius` (world units) of `point` as one history entry.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> EraseHits {
        let hits = erase_hits(self.page(), point, radius);
        if hits.is_empty() {
            return hits;
        }
        let page = self.page_mut();
        page.strokes.retain(|s| !hits.strokes.contains(&s.id));
        page.texts.retain(|t| !hits.texts.contains(&t.id));
        self.commit();
        hits
    }

    /// Whether dropped or inserted text should land on a rule line.
    fn snaps_text(&self) -> bool {
        self.settings.ruled_snap && self.settings.background.is_ruled()
    }

    /// Top edge for a text block of `font_size` placed at `top`.
    pub fn snapped_text_top(&self, top: f64, font_size: f64) -> f64 {
        if !self.snaps_text() {
            return top;
        }
        self.settings
            .background
            .snap_text_top(top, font_size * BASELINE_RATIO)
    }

    /// Place a text block at `origin` using the current font settings.
    pub fn insert_text(&mut self, text: &str, origin: Point, width: f64) -> Option<ItemId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id();
        let item = self.text_item(id, text, origin, width);
        self.page_mut().texts.push(item);
        self.commit();
        Some(id)
    }

    fn text_item(&self, id: ItemId, text: &str, origin: Point, width: f64) -> TextItem {
        let size = self.settings.font_size;
        let origin = Point::new(origin.x, self.snapped_text_top(origin.y, size));
        TextItem::new(id, text, origin, width, self.settings.font_family, size)
    }

    /// Move a text item's top-left corner to `origin`, snapping to the rules.
    pub fn move_text(&mut self, id: ItemId, origin: Point) -> bool {
        let Some(font_size) = self.page().text(id).map(|t| t.font_size) else {
            log::warn!("Text item {id} not found on the current page");
            return false;
        };
        let top = self.snapped_text_top(origin.y, font_size);
        if let Some(item) = self.page_mut().text_mut(id) {
            item.bounds.x = origin.x;
            item.bounds.y = top;
        }
        self.commit()
    }

    /// Apply a font family and size to the settings and to every text item.
    pub fn apply_text_style(&mut self, family: FontFamily, size: f64) -> bool {
        self.settings.font_family = family;
        self.settings.font_size = size;
        for item in self.document.pages.iter_mut().flat_map(|p| p.texts.iter_mut()) {
            item.font_family = family;
            item.font_size = size;
            item.bounds.height = TextItem::layout_height(&item.text, size);
        }
        self.commit()
    }

    /// Append an empty page and make it current.
    pub fn add_page(&mut self) -> usize {
        self.document.pages.push(Page::new());
        self.current_page = self.document.pages.len() - 1;
        self.selection = None;
        self.commit();
        self.current_page
    }

    pub fn switch_page(&mut self, index: usize) -> bool {
        if index >= self.document.pages.len() || index == self.current_page {
            return false;
        }
        self.current_page = index;
        self.selection = None;
        true
    }

    pub fn request_clear(&mut self) {
        self.selection = None;
        let page = self.page_mut();
        page.strokes.clear();
        page.texts.clear();
        self.commit();
    }

    pub fn request_reset(&mut self) {
        self.document = Document::new();
        self.history.reset(self.document.clone());
        self.current_page = 0;
        self.selection = None;
        self.viewport.reset();
        log::info!("Canvas reset");
    }

    /// Wheel zoom anchored at `position`. One zoom step per event regardless of magnitude.
    pub fn wheel(&mut self, position: Point, delta: Vec2) -> bool {
        let factor = if delta.y < 0.0 {
            self.config.wheel_zoom_step
        } else if delta.y > 0.0 {
            1.0 / self.config.wheel_zoom_step
        } else {
            return false;
        };
        let before = self.viewport.scale;
        self.viewport.zoom_by(position, factor);
        self.viewport.scale != before
    }

    pub fn zoom_in(&mut self) {
        let center = self.viewport_center();
        self.viewport.zoom_by(center, self.config.wheel_zoom_step);
    }

    pub fn zoom_out(&mut self) {
        let center = self.viewport_center();
        self.viewport.zoom_by(center, 1.0 / self.config.wheel_zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Capture every stroke on the current page for recognition.
    pub fn request_recognition(&self) -> Result<RecognitionRequest, RequestError> {
        let page = self.page();
        let content_bounds = page.stroke_bounds().ok_or(RequestError::EmptyPage)?;
        Ok(RecognitionRequest {
            page_index: self.current_page,
            content_bounds,
            stroke_ids: page.strokes.iter().map(|s| s.id).collect(),
            region: extract_region(page, &content_bounds, self.config.export_padding),
        })
    }

    /// Insert recognized text where the captured strokes were and remove those strokes,
    /// as one history entry. Blank results change nothing.
    pub fn apply_recognition(&mut self, request: &RecognitionRequest, text: &str) -> Option<ItemId> {
        let text = text.trim();
        if text.is_empty() {
            log::warn!("Recognition returned no text");
            return None;
        }
        if request.page_index >= self.document.pages.len() {
            log::warn!("Recognized page {} no longer exists", request.page_index);
            return None;
        }
        let id = self.next_id();
        let item = self.text_item(
            id,
            text,
            request.content_bounds.origin(),
            request.content_bounds.width,
        );
        let page = &mut self.document.pages[request.page_index];
        page.strokes.retain(|s| !request.stroke_ids.contains(&s.id));
        page.texts.push(item);
        self.commit();
        log::info!("Inserted recognized text {id} on page {}", request.page_index);
        Some(id)
    }

    /// Export the live selection for the answer collaborator.
    pub fn request_answer(&self, length: AnswerLength) -> Result<AnswerRequest, RequestError> {
        let selection = self.selection.ok_or(RequestError::NoSelection)?;
        Ok(AnswerRequest {
            selection,
            length,
            region: extract_region(self.page(), &selection, self.config.export_padding),
        })
    }
}

impl CanvasCommands for Canvas {
    fn undo(&mut self) -> bool {
        Canvas::undo(self)
    }

    fn redo(&mut self) -> bool {
        Canvas::redo(self)
    }

    fn can_undo(&self) -> bool {
        Canvas::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        Canvas::can_redo(self)
    }

    fn commit(&mut self) -> bool {
        Canvas::commit(self)
    }

    fn request_clear(&mut self) {
        Canvas::request_clear(self)
    }

    fn request_reset(&mut self) {
        Canvas::request_reset(self)
    }
}
