use std::{collections::HashMap, path::Path, sync::Arc};

use usvg::fontdb;

use crate::{
    foundation::error::{CarouselError, CarouselResult},
    project::model::FontFamily,
};

/// Font bytes selected for a requested family.
#[derive(Clone)]
pub struct ResolvedFont {
    /// Family name of the face actually chosen.
    pub family: String,
    /// Whether the requested family was found (as opposed to a fallback).
    pub exact: bool,
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index within the font file.
    pub index: u32,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family)
            .field("exact", &self.exact)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Font database plus a per-family resolution cache.
///
/// Resolution order: requested family, default family, generic sans-serif, first face loaded.
pub struct FontRegistry {
    db: fontdb::Database,
    cache: HashMap<FontFamily, ResolvedFont>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    /// Registry with no fonts loaded.
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
            cache: HashMap::new(),
        }
    }

    /// Build a registry from system fonts (optional) and extra font directories.
    pub fn load(font_dirs: &[impl AsRef<Path>], system_fonts: bool) -> Self {
        let mut out = Self::new();
        if system_fonts {
            out.db.load_system_fonts();
        }
        for dir in font_dirs {
            out.load_fonts_from_dir(dir.as_ref());
        }
        tracing::debug!(faces = out.face_count(), "font registry loaded");
        out
    }

    /// Load every `.ttf`/`.otf`/`.ttc` file directly inside `dir`; returns how many loaded.
    pub fn load_fonts_from_dir(&mut self, dir: &Path) -> usize {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return 0;
        };

        let mut loaded = 0;
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            let ext = ext.to_ascii_lowercase();
            if ext != "ttf" && ext != "otf" && ext != "ttc" {
                continue;
            }
            if self.db.load_font_file(&path).is_ok() {
                loaded += 1;
            }
        }
        self.cache.clear();
        loaded
    }

    /// Register font bytes directly.
    pub fn load_font_data(&mut self, bytes: Vec<u8>) {
        self.db.load_font_data(bytes);
        self.cache.clear();
    }

    /// Number of faces known to the registry.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Pick font bytes for `family`, falling back when it is not installed.
    pub fn resolve(&mut self, family: FontFamily) -> CarouselResult<ResolvedFont> {
        if let Some(hit) = self.cache.get(&family) {
            return Ok(hit.clone());
        }

        let requested = [fontdb::Family::Name(family.name())];
        let default = [fontdb::Family::Name(FontFamily::default().name())];
        let generic = [fontdb::Family::SansSerif];

        let exact = self.query(&requested);
        let id = exact
            .or_else(|| self.query(&default))
            .or_else(|| self.query(&generic))
            .or_else(|| self.db.faces().next().map(|f| f.id))
            .ok_or_else(|| CarouselError::render("no fonts available to draw slide text"))?;

        let face = self
            .db
            .face(id)
            .ok_or_else(|| CarouselError::render("font face vanished from registry"))?;
        let chosen = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| "unknown".to_string());
        if exact.is_none() {
            tracing::warn!(
                requested = family.name(),
                chosen = %chosen,
                "font family not installed, using fallback"
            );
        }

        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| CarouselError::render(format!("read font data for '{chosen}'")))?;

        let resolved = ResolvedFont {
            family: chosen,
            exact: exact.is_some(),
            bytes: Arc::new(bytes),
            index,
        };
        self.cache.insert(family, resolved.clone());
        Ok(resolved)
    }

    fn query(&self, families: &[fontdb::Family<'_>]) -> Option<fontdb::ID> {
        self.db.query(&fontdb::Query {
            families,
            weight: fontdb::Weight::SEMIBOLD,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
