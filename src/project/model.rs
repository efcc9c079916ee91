use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    color::parse_hex_color,
    core::{Canvas, Rgba8},
    error::{CarouselError, CarouselResult},
};

/// Maximum number of slides in one carousel.
pub const MAX_SLIDES: usize = 10;

/// Export surface width shared by every aspect ratio.
pub const EXPORT_WIDTH: u32 = 1080;

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Stable slide identifier, unique within a project.
pub struct SlideId(pub String);

impl SlideId {
    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Text anchor as percentages of canvas width (`x`) and height (`y`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextPosition {
    /// Horizontal percentage, 0-100.
    pub x: f64,
    /// Vertical percentage, 0-100.
    pub y: f64,
}

impl TextPosition {
    /// Construct a position from percentages.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_valid(self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// Placement policy for a slide's overlay text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    /// Anchored at 50% / 15%.
    FixedTop,
    /// Anchored at 50% / 50%.
    #[default]
    FixedCenter,
    /// Anchored at 50% / 85%.
    FixedBottom,
    /// User-dragged anchor. Legacy `"smart"` values load as manual and keep their position.
    #[serde(alias = "smart")]
    Manual,
}

impl PositionMode {
    /// Canonical anchor for fixed modes, `None` for [`PositionMode::Manual`].
    pub fn anchor(self) -> Option<TextPosition> {
        match self {
            Self::FixedTop => Some(TextPosition::new(50.0, 15.0)),
            Self::FixedCenter => Some(TextPosition::new(50.0, 50.0)),
            Self::FixedBottom => Some(TextPosition::new(50.0, 85.0)),
            Self::Manual => None,
        }
    }
}

/// One carousel slide: photo reference plus overlay text and its placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Slide identifier.
    pub id: SlideId,
    /// Image reference: a path relative to the project, an absolute `file:///` URI, or a
    /// loader key.
    #[serde(default)]
    pub image: Option<String>,
    /// Overlay text; empty means no overlay.
    #[serde(default)]
    pub text: String,
    /// Text anchor.
    pub text_position: TextPosition,
    /// Placement policy.
    #[serde(default)]
    pub position_mode: PositionMode,
}

impl Slide {
    /// New slide for an uploaded image: empty text, centered.
    pub fn new(id: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id: SlideId(id.into()),
            image,
            text: String::new(),
            text_position: TextPosition::new(50.0, 50.0),
            position_mode: PositionMode::FixedCenter,
        }
    }
}

/// The fixed set of overlay font families offered by the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Montserrat (default).
    #[default]
    Montserrat,
    /// Playfair Display.
    PlayfairDisplay,
    /// Roboto.
    Roboto,
    /// Open Sans.
    OpenSans,
    /// Oswald.
    Oswald,
    /// Merriweather.
    Merriweather,
    /// Lato.
    Lato,
    /// Raleway.
    Raleway,
    /// Poppins.
    Poppins,
    /// Pacifico.
    Pacifico,
}

impl FontFamily {
    /// Every supported family, in editor order.
    pub const ALL: [FontFamily; 10] = [
        Self::Montserrat,
        Self::PlayfairDisplay,
        Self::Roboto,
        Self::OpenSans,
        Self::Oswald,
        Self::Merriweather,
        Self::Lato,
        Self::Raleway,
        Self::Poppins,
        Self::Pacifico,
    ];

    /// Family name as it appears in font files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Montserrat => "Montserrat",
            Self::PlayfairDisplay => "Playfair Display",
            Self::Roboto => "Roboto",
            Self::OpenSans => "Open Sans",
            Self::Oswald => "Oswald",
            Self::Merriweather => "Merriweather",
            Self::Lato => "Lato",
            Self::Raleway => "Raleway",
            Self::Poppins => "Poppins",
            Self::Pacifico => "Pacifico",
        }
    }

    /// Exact (case-insensitive) lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// Lookup that falls back to the default family for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }
}

/// Global overlay styling applied to every slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// Family name; unknown names render with the default family.
    pub font_family: String,
    /// Font size at the 500px reference width, 12-72.
    pub font_size: f32,
    /// Fill color (hex).
    pub color: String,
    /// Whether the drop shadow is drawn.
    pub shadow_enabled: bool,
    /// Shadow color (hex).
    pub shadow_color: String,
    /// Shadow blur, 0-20.
    pub shadow_blur: f32,
    /// Whether the text outline is drawn.
    pub stroke_enabled: bool,
    /// Outline color (hex).
    pub stroke_color: String,
    /// Outline width, 1-10.
    pub stroke_width: f32,
    /// Whether the background pad is drawn.
    pub background_enabled: bool,
    /// Pad color (hex).
    pub background_color: String,
    /// Pad opacity, 0-100.
    pub background_opacity: f32,
    /// Pad corner radius, 0-24.
    pub background_radius: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Montserrat.name().to_string(),
            font_size: 32.0,
            color: "#ffffff".to_string(),
            shadow_enabled: true,
            shadow_color: "#000000".to_string(),
            shadow_blur: 4.0,
            stroke_enabled: false,
            stroke_color: "#000000".to_string(),
            stroke_width: 2.0,
            background_enabled: false,
            background_color: "#000000".to_string(),
            background_opacity: 50.0,
            background_radius: 8.0,
        }
    }
}

/// [`TextStyle`] with colors parsed and the family resolved, ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTextStyle {
    /// Resolved family.
    pub family: FontFamily,
    /// Font size at reference width.
    pub font_size: f32,
    /// Fill color.
    pub color: Rgba8,
    /// Shadow color and blur, when enabled.
    pub shadow: Option<(Rgba8, f32)>,
    /// Stroke color and width, when enabled.
    pub stroke: Option<(Rgba8, f32)>,
    /// Pad color (opacity applied), and corner radius, when enabled.
    pub background: Option<(Rgba8, f32)>,
}

impl TextStyle {
    /// Check numeric ranges and color syntax.
    pub fn validate(&self) -> CarouselResult<()> {
        check_range("fontSize", self.font_size, 12.0, 72.0)?;
        check_range("shadowBlur", self.shadow_blur, 0.0, 20.0)?;
        check_range("strokeWidth", self.stroke_width, 1.0, 10.0)?;
        check_range("backgroundOpacity", self.background_opacity, 0.0, 100.0)?;
        check_range("backgroundRadius", self.background_radius, 0.0, 24.0)?;
        for (field, value) in [
            ("color", &self.color),
            ("shadowColor", &self.shadow_color),
            ("strokeColor", &self.stroke_color),
            ("backgroundColor", &self.background_color),
        ] {
            parse_hex_color(value).map_err(|e| {
                CarouselError::validation(format!("textStyle.{field}: {e}"))
            })?;
        }
        Ok(())
    }

    /// Parse colors and resolve the font family.
    pub fn resolve(&self) -> CarouselResult<ResolvedTextStyle> {
        let shadow = if self.shadow_enabled {
            Some((parse_hex_color(&self.shadow_color)?, self.shadow_blur))
        } else {
            None
        };
        let stroke = if self.stroke_enabled {
            Some((parse_hex_color(&self.stroke_color)?, self.stroke_width))
        } else {
            None
        };
        let background = if self.background_enabled {
            let color = parse_hex_color(&self.background_color)?
                .with_opacity(self.background_opacity / 100.0);
            Some((color, self.background_radius))
        } else {
            None
        };

        Ok(ResolvedTextStyle {
            family: FontFamily::resolve(&self.font_family),
            font_size: self.font_size,
            color: parse_hex_color(&self.color)?,
            shadow,
            stroke,
            background,
        })
    }
}

fn check_range(field: &str, v: f32, min: f32, max: f32) -> CarouselResult<()> {
    if !v.is_finite() || v < min || v > max {
        return Err(CarouselError::validation(format!(
            "textStyle.{field} must be within {min}..={max}, got {v}"
        )));
    }
    Ok(())
}

/// Carousel aspect ratio; fixes the export surface size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// 1:1, exported at 1080x1080.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 4:5, exported at 1080x1350.
    #[serde(rename = "4:5")]
    Portrait,
}

impl AspectRatio {
    /// Export surface size.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Square => Canvas {
                width: EXPORT_WIDTH,
                height: 1080,
            },
            Self::Portrait => Canvas {
                width: EXPORT_WIDTH,
                height: 1350,
            },
        }
    }

}

impl std::str::FromStr for AspectRatio {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" => Ok(Self::Square),
            "4:5" => Ok(Self::Portrait),
            other => Err(CarouselError::validation(format!(
                "unknown aspect ratio '{other}' (expected 1:1 or 4:5)"
            ))),
        }
    }
}

/// A saved carousel: title, global settings and ordered slides.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project title.
    #[serde(default)]
    pub title: String,
    /// Aspect ratio of every slide.
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    /// Global overlay style.
    #[serde(default)]
    pub text_style: TextStyle,
    /// Slides in carousel order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Project {
    /// Check collection and style invariants.
    pub fn validate(&self) -> CarouselResult<()> {
        if self.slides.len() > MAX_SLIDES {
            return Err(CarouselError::validation(format!(
                "a carousel holds at most {MAX_SLIDES} slides, got {}",
                self.slides.len()
            )));
        }

        let mut seen = HashSet::new();
        for slide in &self.slides {
            if slide.id.0.trim().is_empty() {
                return Err(CarouselError::validation("slide id must be non-empty"));
            }
            if !seen.insert(slide.id.as_str()) {
                return Err(CarouselError::validation(format!(
                    "duplicate slide id '{}'",
                    slide.id
                )));
            }
            if !slide.text_position.is_valid() {
                return Err(CarouselError::validation(format!(
                    "slide '{}' text position must be within 0..=100",
                    slide.id
                )));
            }
        }

        self.text_style.validate()
    }

    /// Read a project from a JSON file.
    pub fn load_json(path: &Path) -> CarouselResult<Self> {
        let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
        let project: Project = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| CarouselError::serde(format!("parse project JSON: {e}")))?;
        Ok(project)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CarouselResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to `path`.
    pub fn save_json(&self, path: &Path) -> CarouselResult<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("write project '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
