use std::path::PathBuf;

use crate::{
    assets::fonts::FontRegistry,
    encode::sink::DEFAULT_FILE_PREFIX,
    foundation::error::{CarouselError, CarouselResult},
    render::compositor::DEFAULT_WRAP_RATIO,
};

/// Extra font directory, appended to [`ExportSettings::font_dirs`].
pub const ENV_FONT_DIR: &str = "CAROUSEL_FONT_DIR";
/// Any value disables system font loading.
pub const ENV_NO_SYSTEM_FONTS: &str = "CAROUSEL_NO_SYSTEM_FONTS";

/// Knobs for an export run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    /// Directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Whether installed system fonts are loaded.
    pub system_fonts: bool,
    /// Maximum line width as a fraction of the canvas width.
    pub wrap_ratio: f32,
    /// Output file prefix; files are named `{prefix}-{n}.png`.
    pub file_prefix: String,
    /// Whether existing output files may be replaced.
    pub overwrite: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            font_dirs: Vec::new(),
            system_fonts: true,
            wrap_ratio: DEFAULT_WRAP_RATIO,
            file_prefix: DEFAULT_FILE_PREFIX.to_owned(),
            overwrite: false,
        }
    }
}

impl ExportSettings {
    /// Apply `CAROUSEL_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `CAROUSEL_*` overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_FONT_DIR).filter(|v| !v.trim().is_empty()) {
            self.font_dirs.push(PathBuf::from(dir));
        }
        if lookup(ENV_NO_SYSTEM_FONTS).is_some() {
            self.system_fonts = false;
        }
        self
    }

    pub fn validate(&self) -> CarouselResult<()> {
        if !self.wrap_ratio.is_finite() || self.wrap_ratio <= 0.0 || self.wrap_ratio > 1.0 {
            return Err(CarouselError::validation(
                "wrap_ratio must be within (0, 1]",
            ));
        }
        let prefix = self.file_prefix.as_str();
        if prefix.trim().is_empty() {
            return Err(CarouselError::validation("file_prefix must be non-empty"));
        }
        if prefix.contains(['/', '\\']) || prefix == "." || prefix == ".." {
            return Err(CarouselError::validation(
                "file_prefix must be a plain file name",
            ));
        }
        Ok(())
    }

    /// Font registry described by these settings.
    pub fn load_fonts(&self) -> FontRegistry {
        FontRegistry::load(&self.font_dirs, self.system_fonts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/settings.rs"]
mod tests;
