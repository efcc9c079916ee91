//! Carousel is the core of a photo-carousel editor: it distributes free text across slides and
//! exports one PNG per slide with the text overlay composited on top of the photo.
//!
//! The usual flow:
//!
//! - Load a [`Project`] (ordered slides, one [`TextStyle`], one [`AspectRatio`])
//! - Edit it through a [`SlideDeck`] (add images, drag text, [`distribute_text`], presets)
//! - Export with [`export_carousel`] or an [`Exporter`] into an [`ArtifactSink`]
#![forbid(unsafe_code)]

mod foundation;

/// Image decoding, image loaders and font resolution.
pub mod assets;
/// PNG encoding and artifact sinks.
pub mod encode;
/// Whole-carousel export.
pub mod export;
/// Project model, deck operations and style presets.
pub mod project;
/// Slide rasterization.
pub mod render;
/// Text distribution and layout.
pub mod text;

pub use crate::foundation::color::parse_hex_color;
pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, RoundedRect, Size, Vec2};
pub use crate::foundation::error::{CarouselError, CarouselResult};

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::fonts::{FontRegistry, ResolvedFont};
pub use crate::assets::loader::{FsImageLoader, ImageLoader, MemoryImageLoader};
pub use crate::encode::png::encode_png;
pub use crate::encode::sink::{
    ArtifactSink, DirectorySink, ExportPlan, InMemorySink, SlideArtifact, slide_file_name,
};
pub use crate::export::pipeline::{ExportStats, Exporter, export_carousel};
pub use crate::export::settings::ExportSettings;
pub use crate::project::deck::SlideDeck;
pub use crate::project::model::{
    AspectRatio, EXPORT_WIDTH, FontFamily, MAX_SLIDES, PositionMode, Project, Slide, SlideId,
    TextPosition, TextStyle,
};
pub use crate::project::preset::StylePreset;
pub use crate::render::FrameRGBA;
pub use crate::render::compositor::{SlideCompositor, SlideScene};
pub use crate::text::distribute::{SplitTier, distribute_text};
