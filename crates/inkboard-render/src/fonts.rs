//! Font faces per family.

use crate::renderer::{RenderResult, RendererError};
use ab_glyph::FontArc;
use inkboard_core::style::FontFamily;
use std::collections::HashMap;

/// Loaded font faces. Families without a face of their own fall back to the first
/// face that was loaded.
#[derive(Clone, Default)]
pub struct FontBook {
    faces: HashMap<FontFamily, FontArc>,
    fallback: Option<FontFamily>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `data` as a TrueType/OpenType face for `family`.
    pub fn load(&mut self, family: FontFamily, data: Vec<u8>) -> RenderResult<()> {
        let face = FontArc::try_from_vec(data)
            .map_err(|e| RendererError::Font(format!("{}: {e}", family.name())))?;
        self.faces.insert(family, face);
        self.fallback.get_or_insert(family);
        log::debug!("Loaded font for {}", family.name());
        Ok(())
    }

    /// Face for `family`, or the fallback face.
    pub fn get(&self, family: FontFamily) -> Option<&FontArc> {
        self.faces
            .get(&family)
            .or_else(|| self.fallback.and_then(|f| self.faces.get(&f)))
    }

    pub fn has_own_face(&self, family: FontFamily) -> bool {
        self.faces.contains_key(&family)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.faces.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_font_rejected() {
        let mut fonts = FontBook::new();
        let err = fonts.load(FontFamily::Sans, vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, RendererError::Font(_)));
        assert!(fonts.is_empty());
        assert!(fonts.get(FontFamily::Sans).is_none());
    }
}
