//! Application errors.

use inkboard_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Script error: {0}")]
    Script(String),
}

pub type AppResult<T> = Result<T, AppError>;
