use crate::{
    foundation::error::{CarouselError, CarouselResult},
    project::model::TextStyle,
};

/// Named style presets. Each one overwrites a subset of [`TextStyle`] and leaves the rest alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StylePreset {
    /// Plain white text, every effect off.
    Minimal,
    /// Coral text with a heavy shadow.
    Vivid,
    /// Cream text with a soft dark shadow.
    Elegant,
    /// White text with a black outline.
    Contrast,
    /// Peach text on an indigo pad.
    Pastel,
}

impl StylePreset {
    /// Every preset in display order.
    pub const ALL: [StylePreset; 5] = [
        Self::Minimal,
        Self::Vivid,
        Self::Elegant,
        Self::Contrast,
        Self::Pastel,
    ];

    /// Lower-case preset name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Vivid => "vivid",
            Self::Elegant => "elegant",
            Self::Contrast => "contrast",
            Self::Pastel => "pastel",
        }
    }

    /// Overwrite this preset's fields on `style`.
    pub fn apply(self, style: &mut TextStyle) {
        match self {
            Self::Minimal => {
                style.color = "#ffffff".to_string();
                style.shadow_enabled = false;
                style.stroke_enabled = false;
                style.background_enabled = false;
            }
            Self::Vivid => {
                style.color = "#ff6b6b".to_string();
                style.shadow_enabled = true;
                style.shadow_color = "#000000".to_string();
                style.shadow_blur = 8.0;
            }
            Self::Elegant => {
                style.color = "#f8f4e3".to_string();
                style.shadow_enabled = true;
                style.shadow_color = "#1a1a1a".to_string();
                style.shadow_blur = 4.0;
            }
            Self::Contrast => {
                style.color = "#ffffff".to_string();
                style.stroke_enabled = true;
                style.stroke_color = "#000000".to_string();
                style.stroke_width = 3.0;
            }
            Self::Pastel => {
                style.color = "#ffecd2".to_string();
                style.background_enabled = true;
                style.background_color = "#667eea".to_string();
                style.background_opacity = 80.0;
            }
        }
    }
}

impl std::str::FromStr for StylePreset {
    type Err = CarouselError;

    fn from_str(s: &str) -> CarouselResult<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CarouselError::validation(format!("unknown style preset '{s}'")))
    }
}

impl std::fmt::Display for StylePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/preset.rs"]
mod tests;
