//! Inkboard Core Library
//!
//! Platform-agnostic canvas engine for the Inkboard handwriting board: drawing model,
//! shape synthesis, view transform, gestures, hit-testing and undo history.

pub mod background;
pub mod canvas;
pub mod config;
pub mod document;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod input;
pub mod services;
pub mod shapes;
pub mod style;
pub mod tools;
pub mod viewport;

pub use background::BackgroundKind;
pub use canvas::{Canvas, CanvasCommands};
pub use config::CanvasConfig;
pub use document::{Document, IdGenerator, ItemId, Page, Stroke, TextItem};
pub use geometry::{Bounds, bounds_intersect, distance, midpoint, point_in_bounds};
pub use gesture::{GestureMachine, GesturePreview, GestureState};
pub use history::History;
pub use hit_test::{RegionExport, extract_region};
pub use input::{ContactId, PointerEvent};
pub use services::{
    AnswerLength, AnswerRequest, AnswerService, BoxFuture, RecognitionRequest,
    RecognitionService, RequestError, ServiceError, ServiceResult,
};
pub use shapes::{ShapeKind, synthesize};
pub use style::{FontFamily, SerializableColor};
pub use tools::{ToolKind, ToolSettings};
pub use viewport::ViewTransform;
