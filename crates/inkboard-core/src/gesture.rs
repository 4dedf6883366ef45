//! Pointer gesture state machine.
//!
//! One contact drives the active tool; a second contact preempts whatever the first
//! was doing and turns the gesture into a pinch (zoom anchored at the midpoint plus a
//! pan by the midpoint's movement). Losing the driving contact finalizes the gesture.

use crate::canvas::Canvas;
use crate::document::{ItemId, Stroke};
use crate::geometry::{Bounds, distance, midpoint};
use crate::hit_test::text_at;
use crate::input::{ContactId, ContactTable, PointerEvent};
use crate::shapes::synthesize;
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// What the active contacts are currently doing.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    /// Pen stroke capture (world points).
    Drawing { contact: ContactId, points: Vec<Point> },
    Erasing { contact: ContactId },
    /// Shape preview between two world corners.
    ShapeDrag { contact: ContactId, start: Point, end: Point },
    /// Selection rectangle between two world corners.
    Selecting { contact: ContactId, start: Point, end: Point },
    Panning { contact: ContactId },
    /// Dragging a text item. `origin` is its top-left when the drag began.
    TextDrag {
        contact: ContactId,
        id: ItemId,
        origin: Point,
        start: Point,
        current: Point,
    },
    /// Two-contact zoom and pan (device distance and midpoint of the last frame).
    ///
    /// Entering a pinch discards the single-contact gesture it preempts: a stroke,
    /// shape or selection in progress is dropped without a commit and a text drag
    /// snaps back. Only losing the driving contact commits.
    Pinch { distance: f64, midpoint: Point },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Drawing { .. } => "drawing",
            GestureState::Erasing { .. } => "erasing",
            GestureState::ShapeDrag { .. } => "shape",
            GestureState::Selecting { .. } => "selecting",
            GestureState::Panning { .. } => "panning",
            GestureState::TextDrag { .. } => "text-drag",
            GestureState::Pinch { .. } => "pinch",
        }
    }

    /// The contact driving a single-contact gesture.
    fn contact(&self) -> Option<ContactId> {
        match self {
            GestureState::Drawing { contact, .. }
            | GestureState::Erasing { contact }
            | GestureState::ShapeDrag { contact, .. }
            | GestureState::Selecting { contact, .. }
            | GestureState::Panning { contact }
            | GestureState::TextDrag { contact, .. } => Some(*contact),
            GestureState::Idle | GestureState::Pinch { .. } => None,
        }
    }
}

/// Transient content the renderer draws on top of the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GesturePreview {
    /// Pen stroke being captured.
    pub stroke: Option<Stroke>,
    /// Strokes of the shape being dragged.
    pub shape: Vec<Stroke>,
    /// Text item being dragged and its world offset from the committed position.
    pub text_drag: Option<(ItemId, Vec2)>,
    /// Selection being dragged, or the retained selection.
    pub selection: Option<Bounds>,
}

/// Turns pointer events into canvas mutations.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    contacts: ContactTable,
    state: GestureState,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMachine {
    pub fn new() -> Self {
        Self {
            contacts: ContactTable::new(),
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Forget all contacts and drop any in-progress gesture without committing.
    pub fn reset(&mut self) {
        self.contacts.clear();
        self.state = GestureState::Idle;
    }

    fn set_state(&mut self, state: GestureState) {
        if self.state.name() != state.name() {
            log::debug!("Gesture {} -> {}", self.state.name(), state.name());
        }
        self.state = state;
    }

    /// Feed one event. Returns true when the canvas needs a redraw.
    pub fn handle(&mut self, canvas: &mut Canvas, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { id, position } => self.on_down(canvas, id, position),
            PointerEvent::Move { id, position } => self.on_move(canvas, id, position),
            PointerEvent::Up { id, position } => {
                if self.state.contact() == Some(id) {
                    self.on_move(canvas, id, position);
                }
                self.on_release(canvas, id)
            }
            PointerEvent::Cancel { id } | PointerEvent::Leave { id } => {
                self.on_release(canvas, id)
            }
            PointerEvent::Wheel { position, delta } => canvas.wheel(position, delta),
        }
    }

    fn on_down(&mut self, canvas: &mut Canvas, id: ContactId, position: Point) -> bool {
        if !self.contacts.insert(id, position) {
            log::warn!("Ignoring duplicate down for contact {id}");
            return false;
        }
        match self.contacts.len() {
            1 => self.begin_single(canvas, id, position),
            2 => self.begin_pinch(),
            n => {
                log::debug!("Ignoring contact {id} ({n} active)");
                false
            }
        }
    }

    fn begin_single(&mut self, canvas: &mut Canvas, contact: ContactId, position: Point) -> bool {
        canvas.selection = None;
        let world = canvas.viewport.to_world(position);
        let state = match canvas.settings.tool {
            ToolKind::Pen => GestureState::Drawing {
                contact,
                points: vec![world],
            },
            ToolKind::Eraser => {
                erase(canvas, world);
                GestureState::Erasing { contact }
            }
            ToolKind::Shape => GestureState::ShapeDrag {
                contact,
                start: world,
                end: world,
            },
            ToolKind::Select => GestureState::Selecting {
                contact,
                start: world,
                end: world,
            },
            ToolKind::Hand => match text_at(canvas.page(), world) {
                Some(id) => {
                    let origin = canvas
                        .page()
                        .text(id)
                        .map(|t| t.bounds.origin())
                        .unwrap_or(world);
                    GestureState::TextDrag {
                        contact,
                        id,
                        origin,
                        start: world,
                        current: world,
                    }
                }
                None => GestureState::Panning { contact },
            },
        };
        self.set_state(state);
        true
    }

    /// Start (or restart) a pinch from the two oldest contacts, discarding any
    /// single-contact gesture in progress.
    fn begin_pinch(&mut self) -> bool {
        let Some(((_, a), (_, b))) = self.contacts.first_pair() else {
            return false;
        };
        if self.state.contact().is_some() {
            log::debug!("Second contact preempts {}", self.state.name());
        }
        self.set_state(GestureState::Pinch {
            distance: distance(a, b),
            midpoint: midpoint(a, b),
        });
        true
    }

    fn on_move(&mut self, canvas: &mut Canvas, id: ContactId, position: Point) -> bool {
        let Some(previous) = self.contacts.update(id, position) else {
            log::warn!("Ignoring move for untracked contact {id}");
            return false;
        };
        if let GestureState::Pinch { .. } = self.state {
            return self.pinch(canvas, id);
        }
        if self.state.contact() != Some(id) {
            return false;
        }

        let world = canvas.viewport.to_world(position);
        match &mut self.state {
            GestureState::Drawing { points, .. } => {
                if points.last() == Some(&world) {
                    return false;
                }
                points.push(world);
            }
            GestureState::ShapeDrag { end, .. } | GestureState::Selecting { end, .. } => {
                *end = world;
            }
            GestureState::TextDrag { current, .. } => *current = world,
            GestureState::Panning { .. } => canvas.viewport.pan(position - previous),
            GestureState::Erasing { .. } => return erase(canvas, world),
            GestureState::Idle | GestureState::Pinch { .. } => return false,
        }
        true
    }

    fn pinch(&mut self, canvas: &mut Canvas, moved: ContactId) -> bool {
        let Some(((first, a), (second, b))) = self.contacts.first_pair() else {
            return false;
        };
        if moved != first && moved != second {
            return false;
        }
        let GestureState::Pinch {
            distance: last_distance,
            midpoint: last_midpoint,
        } = self.state
        else {
            return false;
        };
        let new_distance = distance(a, b);
        let new_midpoint = midpoint(a, b);

        canvas.viewport.pan(new_midpoint - last_midpoint);
        if last_distance > 0.0 && new_distance > 0.0 {
            let scale = canvas.viewport.scale * new_distance / last_distance;
            canvas.viewport.zoom_at(new_midpoint, scale);
        }
        self.state = GestureState::Pinch {
            distance: new_distance,
            midpoint: new_midpoint,
        };
        true
    }

    fn on_release(&mut self, canvas: &mut Canvas, id: ContactId) -> bool {
        if self.contacts.remove(id).is_none() {
            log::warn!("Ignoring release of untracked contact {id}");
            return false;
        }
        if let GestureState::Pinch { .. } = self.state {
            if self.contacts.len() >= 2 {
                return self.begin_pinch();
            }
            self.set_state(GestureState::Idle);
            return true;
        }
        if self.state.contact() != Some(id) {
            return false;
        }
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        finish(canvas, state);
        log::debug!("Gesture finished");
        true
    }

    /// In-progress content for rendering.
    pub fn preview(&self, canvas: &Canvas) -> GesturePreview {
        let settings = &canvas.settings;
        let mut preview = GesturePreview {
            selection: canvas.selection,
            ..GesturePreview::default()
        };
        match &self.state {
            GestureState::Drawing { points, .. } => {
                preview.stroke = Some(Stroke::new(
                    0,
                    points.clone(),
                    settings.pen_size,
                    settings.pen_color,
                ));
            }
            GestureState::ShapeDrag { start, end, .. } => {
                preview.shape = synthesize(
                    *start,
                    *end,
                    settings.shape_kind,
                    settings.shape_size,
                    settings.shape_color,
                    0,
                );
            }
            GestureState::Selecting { start, end, .. } => {
                preview.selection = Some(Bounds::from_corners(*start, *end));
            }
            GestureState::TextDrag {
                id, start, current, ..
            } => {
                preview.text_drag = Some((*id, *current - *start));
            }
            GestureState::Idle
            | GestureState::Erasing { .. }
            | GestureState::Panning { .. }
            | GestureState::Pinch { .. } => {}
        }
        preview
    }
}

/// Erase around `world` with the eraser's on-screen radius.
fn erase(canvas: &mut Canvas, world: Point) -> bool {
    let radius = canvas.viewport.to_world_length(canvas.settings.eraser_size);
    !canvas.erase_at(world, radius).is_empty()
}

/// Commit whatever the released gesture produced.
fn finish(canvas: &mut Canvas, state: GestureState) {
    match state {
        GestureState::Drawing { points, .. } => {
            if points.len() < 2 {
                return;
            }
            let settings = &canvas.settings;
            let (width, color) = (settings.pen_size, settings.pen_color);
            let stroke = Stroke::new(canvas.next_id(), points, width, color);
            canvas.add_strokes(vec![stroke]);
        }
        GestureState::ShapeDrag { start, end, .. } => {
            let settings = &canvas.settings;
            let (kind, width, color) =
                (settings.shape_kind, settings.shape_size, settings.shape_color);
            let base = canvas.next_id();
            canvas.add_strokes(synthesize(start, end, kind, width, color, base));
        }
        GestureState::Selecting { start, end, .. } => {
            let selection = Bounds::from_corners(start, end);
            let scale = canvas.viewport.scale;
            let min = canvas.config.selection_min_size;
            canvas.selection = if selection.width * scale < min || selection.height * scale < min
            {
                None
            } else {
                Some(selection)
            };
        }
        GestureState::TextDrag {
            id,
            origin,
            start,
            current,
            ..
        } => {
            let delta = current - start;
            if delta != Vec2::ZERO {
                canvas.move_text(id, origin + delta);
            }
        }
        GestureState::Idle
        | GestureState::Erasing { .. }
        | GestureState::Panning { .. }
        | GestureState::Pinch { .. } => {}
    }
}
