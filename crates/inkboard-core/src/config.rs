//! Engine configuration.

use crate::viewport::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use serde::{Deserialize, Serialize};

/// Tunables of the canvas engine. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom factor applied per wheel event.
    pub wheel_zoom_step: f64,
    /// Selections narrower or shorter than this many device pixels are discarded.
    pub selection_min_size: f64,
    /// Maximum number of history entries; the oldest are dropped first.
    pub history_limit: usize,
    /// Margin in world units around exported regions.
    pub export_padding: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            wheel_zoom_step: 1.1,
            selection_min_size: 10.0,
            history_limit: 100,
            export_padding: 20.0,
        }
    }
}
