//! Background patterns and the rule geometry text snaps to.

use serde::{Deserialize, Serialize};

/// World spacing between grid lines.
pub const GRID_SPACING: f64 = 40.0;
/// World spacing between copybook rows (main rule to main rule).
pub const COPYBOOK_SPACING: f64 = 64.0;
/// Distance of a copybook row's secondary guide line above its main rule.
pub const COPYBOOK_GUIDE_OFFSET: f64 = 24.0;
/// World spacing between borderline rules.
pub const BORDERLINE_SPACING: f64 = 40.0;
/// World x of the borderline margin.
pub const BORDERLINE_MARGIN_X: f64 = 80.0;
/// Patterns whose on-screen spacing falls below this many device pixels are hidden.
pub const MIN_PATTERN_SPACING: f64 = 8.0;

/// Background pattern kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackgroundKind {
    #[default]
    Plain,
    Grid,
    /// Copybook: paired guide lines per row.
    Ruled,
    /// Horizontal rules with one vertical margin line.
    Borderline,
}

impl BackgroundKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackgroundKind::Plain => "Plain",
            BackgroundKind::Grid => "Grid",
            BackgroundKind::Ruled => "Copybook",
            BackgroundKind::Borderline => "Borderline",
        }
    }

    /// World spacing of the repeating pattern, `None` for plain paper.
    pub fn spacing(&self) -> Option<f64> {
        match self {
            BackgroundKind::Plain => None,
            BackgroundKind::Grid => Some(GRID_SPACING),
            BackgroundKind::Ruled => Some(COPYBOOK_SPACING),
            BackgroundKind::Borderline => Some(BORDERLINE_SPACING),
        }
    }

    /// Whether the pattern has writing lines that text can sit on.
    pub fn is_ruled(&self) -> bool {
        matches!(self, BackgroundKind::Ruled | BackgroundKind::Borderline)
    }

    /// Whether the pattern is dense enough on screen to be drawn at `scale`.
    pub fn visible_at(&self, scale: f64) -> bool {
        self.spacing()
            .is_some_and(|spacing| spacing * scale >= MIN_PATTERN_SPACING)
    }

    /// Nearest main rule line to world `y`, for ruled patterns.
    pub fn nearest_rule(&self, y: f64) -> Option<f64> {
        if !self.is_ruled() {
            return None;
        }
        let spacing = self.spacing()?;
        Some((y / spacing).round() * spacing)
    }

    /// Top edge that puts a text block's first baseline on the nearest rule line.
    /// Returns `top` unchanged on unruled backgrounds.
    pub fn snap_text_top(&self, top: f64, baseline_offset: f64) -> f64 {
        match self.nearest_rule(top + baseline_offset) {
            Some(rule) => rule - baseline_offset,
            None => top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_only_on_ruled_backgrounds() {
        assert!((BackgroundKind::Plain.snap_text_top(13.0, 16.0) - 13.0).abs() < f64::EPSILON);
        assert!((BackgroundKind::Grid.snap_text_top(13.0, 16.0) - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_puts_baseline_on_rule() {
        // Baseline at 13 + 16 = 29 → nearest copybook rule is 0 (64 is farther).
        let top = BackgroundKind::Ruled.snap_text_top(13.0, 16.0);
        assert!((top - -16.0).abs() < f64::EPSILON);

        // Baseline at 50 + 16 = 66 → rule 64.
        let top = BackgroundKind::Ruled.snap_text_top(50.0, 16.0);
        assert!((top + 16.0 - 64.0).abs() < f64::EPSILON);

        // Borderline rules every 40.
        let top = BackgroundKind::Borderline.snap_text_top(70.0, 16.0);
        assert!((top + 16.0 - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pattern_hides_when_zoomed_out() {
        assert!(BackgroundKind::Grid.visible_at(1.0));
        assert!(!BackgroundKind::Grid.visible_at(0.1));
        assert!(!BackgroundKind::Plain.visible_at(1.0));
    }
}
