//! Font lookup for the text tool
//!
//! Families can be backed by font files listed in the configuration. Any
//! family without a registered face falls back to an embedded sans face, so
//! text always renders even on hosts without the named fonts installed.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;

use crate::domain::FontFamily;
use crate::error::AnnotationRenderFailure;

pub struct FontBook {
    faces: HashMap<FontFamily, FontArc>,
    fallback: Option<FontArc>,
}

impl FontBook {
    /// A book with only the embedded fallback face
    pub fn new() -> Self {
        let fallback = match FontArc::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT) {
            Ok(font) => Some(font),
            Err(err) => {
                log::error!("Embedded fallback font is unusable: {err}");
                None
            }
        };
        Self {
            faces: HashMap::new(),
            fallback,
        }
    }

    /// A book without any face, not even the fallback
    pub fn empty() -> Self {
        Self {
            faces: HashMap::new(),
            fallback: None,
        }
    }

    /// Load every configured family, skipping (and logging) the ones that fail
    pub fn from_config(fonts: &BTreeMap<FontFamily, PathBuf>) -> Self {
        let mut book = Self::new();
        for (family, path) in fonts {
            if let Err(err) = book.load_file(*family, path) {
                log::warn!("Using fallback face for {}: {err}", family.name());
            }
        }
        book
    }

    /// Register font bytes for a family
    pub fn register(
        &mut self,
        family: FontFamily,
        bytes: Vec<u8>,
    ) -> Result<(), AnnotationRenderFailure> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|_| AnnotationRenderFailure::InvalidFont(family.name()))?;
        self.faces.insert(family, font);
        Ok(())
    }

    pub fn load_file(
        &mut self,
        family: FontFamily,
        path: &Path,
    ) -> Result<(), AnnotationRenderFailure> {
        let bytes = std::fs::read(path).map_err(|source| AnnotationRenderFailure::FontFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.register(family, bytes)?;
        log::debug!("Loaded {} from {}", family.name(), path.display());
        Ok(())
    }

    /// Face to render `family` with
    pub fn face(&self, family: FontFamily) -> Result<&FontArc, AnnotationRenderFailure> {
        self.faces
            .get(&family)
            .or(self.fallback.as_ref())
            .ok_or(AnnotationRenderFailure::NoFont(family.name()))
    }

    /// Whether `family` has its own face rather than the fallback
    pub fn has_face(&self, family: FontFamily) -> bool {
        self.faces.contains_key(&family)
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_family_resolves_to_fallback() {
        let book = FontBook::new();
        for family in FontFamily::ALL {
            assert!(book.face(family).is_ok());
            assert!(!book.has_face(family));
        }
    }

    #[test]
    fn test_register_rejects_garbage() {
        let mut book = FontBook::new();
        let err = book
            .register(FontFamily::Georgia, b"not a font".to_vec())
            .unwrap_err();
        assert!(matches!(err, AnnotationRenderFailure::InvalidFont("Georgia")));
    }

    #[test]
    fn test_register_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.ttf");
        std::fs::write(&path, epaint_default_fonts::HACK_REGULAR).unwrap();

        let mut fonts = BTreeMap::new();
        fonts.insert(FontFamily::CourierNew, path);
        fonts.insert(FontFamily::Verdana, dir.path().join("missing.ttf"));
        let book = FontBook::from_config(&fonts);
        assert!(book.has_face(FontFamily::CourierNew));
        assert!(!book.has_face(FontFamily::Verdana));
        assert!(book.face(FontFamily::Verdana).is_ok());
    }
}
