//! Inkboard Application
//!
//! Host shell around the canvas engine: configuration, the interactive session with its
//! remote collaborators, and script replay for the native binary.

mod app;
mod config;
mod error;
mod script;

pub use app::{
    NOTICE_DURATION, Notice, NoticeKind, PendingAnswer, PendingRecognition, Session,
    UnavailableService,
};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use script::{Script, ScriptReport, Step};
