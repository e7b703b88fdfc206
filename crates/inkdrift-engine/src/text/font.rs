use std::fmt;
use std::path::Path;

/// Error returned when font bytes cannot be read or parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// A parsed TrueType or OpenType font.
pub struct Font {
    inner: fontdue::Font,
}

impl Font {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let inner = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_path(path: &Path) -> Result<Self, FontLoadError> {
        let bytes = std::fs::read(path)
            .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.inner.lookup_glyph_index(ch) != 0
    }

    pub(crate) fn raw(&self) -> &fontdue::Font {
        &self.inner
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.inner.name())
            .field("glyphs", &self.inner.glyph_count())
            .finish()
    }
}
