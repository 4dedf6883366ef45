//! JSON scripts replayed against a [`Session`].
//!
//! A script is a list of steps: raw pointer events plus the toolbar actions a settings
//! panel would issue. Steps use serde's externally tagged form, e.g.
//! `{"Pointer": {"Down": {"id": 1, "position": {"x": 0, "y": 0}}}}`, `{"Tool": "Eraser"}`
//! or `"Undo"`.

use crate::app::Session;
use crate::error::{AppError, AppResult};
use inkboard_core::{
    AnswerLength, BackgroundKind, FontFamily, PointerEvent, SerializableColor, ShapeKind,
    ToolKind,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    Pointer(PointerEvent),
    Tool(ToolKind),
    Shape(ShapeKind),
    Background(BackgroundKind),
    PenSize(f64),
    /// Hex color, `#rgb`, `#rrggbb` or `#rrggbbaa`.
    PenColor(String),
    ShapeSize(f64),
    EraserSize(f64),
    RuledSnap(bool),
    Undo,
    Redo,
    Clear,
    Reset,
    AddPage,
    SwitchPage(usize),
    ZoomIn,
    ZoomOut,
    ResetView,
    InsertText {
        text: String,
        x: f64,
        y: f64,
        width: f64,
    },
    TextStyle {
        family: FontFamily,
        size: f64,
    },
    Recognize,
    Ask(AnswerLength),
    /// Write the PNG sent for the live selection.
    ExportSelection(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

/// Summary of a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptReport {
    pub steps: usize,
    /// Pointer events the gesture machine acted on.
    pub handled_events: usize,
    pub recognized: usize,
    pub answers: Vec<String>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Script(e.to_string()))
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| AppError::Script(format!("{}: {e}", path.display())))
    }

    /// Replay every step. Relative export paths resolve against `base`.
    pub async fn run(&self, session: &mut Session, base: &Path) -> AppResult<ScriptReport> {
        let mut report = ScriptReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            log::debug!("Step {index}: {step:?}");
            apply(session, step, base, &mut report)
                .await
                .map_err(|e| match e {
                    AppError::Script(message) => AppError::Script(format!("step {index}: {message}")),
                    other => other,
                })?;
            report.steps += 1;
        }
        log::info!(
            "Replayed {} steps ({} pointer events handled)",
            report.steps,
            report.handled_events
        );
        Ok(report)
    }
}

async fn apply(
    session: &mut Session,
    step: &Step,
    base: &Path,
    report: &mut ScriptReport,
) -> AppResult<()> {
    let settings = &mut session.canvas_mut().settings;
    match step {
        Step::Tool(tool) => settings.tool = *tool,
        Step::Shape(kind) => settings.shape_kind = *kind,
        Step::Background(kind) => settings.background = *kind,
        Step::PenSize(size) => settings.pen_size = *size,
        Step::PenColor(hex) => {
            settings.pen_color = SerializableColor::from_hex(hex)
                .ok_or_else(|| AppError::Script(format!("invalid color {hex:?}")))?;
        }
        Step::ShapeSize(size) => settings.shape_size = *size,
        Step::EraserSize(size) => settings.eraser_size = *size,
        Step::RuledSnap(enabled) => settings.ruled_snap = *enabled,
        Step::Pointer(event) => {
            if session.handle_event(*event) {
                report.handled_events += 1;
            }
        }
        Step::Undo => {
            session.commands().undo();
        }
        Step::Redo => {
            session.commands().redo();
        }
        Step::Clear => session.commands().request_clear(),
        Step::Reset => session.reset(),
        Step::AddPage => {
            session.canvas_mut().add_page();
        }
        Step::SwitchPage(index) => {
            if !session.canvas_mut().switch_page(*index) {
                log::warn!("No page {index}");
            }
        }
        Step::ZoomIn => session.canvas_mut().zoom_in(),
        Step::ZoomOut => session.canvas_mut().zoom_out(),
        Step::ResetView => session.canvas_mut().reset_view(),
        Step::InsertText { text, x, y, width } => {
            session
                .canvas_mut()
                .insert_text(text, Point::new(*x, *y), *width);
        }
        Step::TextStyle { family, size } => {
            session.canvas_mut().apply_text_style(*family, *size);
        }
        Step::Recognize => {
            if session.recognize().await.is_some() {
                report.recognized += 1;
            }
        }
        Step::Ask(length) => {
            if let Some(answer) = session.ask(*length).await {
                report.answers.push(answer);
            }
        }
        Step::ExportSelection(path) => {
            let png = session
                .selection_png()?
                .ok_or_else(|| AppError::Script("no selection to export".into()))?;
            let path = base.join(path);
            std::fs::write(&path, png)?;
            log::info!("Wrote selection to {}", path.display());
        }
    }
    Ok(())
}
