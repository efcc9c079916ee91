use crate::{
    assets::{decode::decode_image, fonts::FontRegistry, loader::ImageLoader},
    encode::{
        png::encode_png,
        sink::{ArtifactSink, ExportPlan, SlideArtifact, slide_file_name},
    },
    export::settings::ExportSettings,
    foundation::error::CarouselResult,
    project::model::Project,
    render::compositor::{SlideCompositor, SlideScene},
};

/// Counts from one export run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Slides in the project.
    pub slides_total: usize,
    /// Slides written to the sink.
    pub exported: usize,
    /// Slides left out because they have no image.
    pub skipped: usize,
}

/// Export every slide of `project` that has an image, in deck order, one PNG per slide.
///
/// Slides without an image are skipped. The first load, decode, render or encode failure ends the
/// run with that error; artifacts already pushed to `sink` stay there and `sink.end()` is not
/// called.
pub fn export_carousel<L, S>(
    project: &Project,
    loader: &mut L,
    fonts: FontRegistry,
    settings: &ExportSettings,
    sink: &mut S,
) -> CarouselResult<ExportStats>
where
    L: ImageLoader + ?Sized,
    S: ArtifactSink + ?Sized,
{
    settings.validate()?;
    let mut compositor = SlideCompositor::new(fonts).with_wrap_ratio(settings.wrap_ratio);
    run_export(project, loader, &mut compositor, settings, sink)
}

/// Loader, fonts and settings kept together for repeated exports.
pub struct Exporter<L> {
    loader: L,
    compositor: SlideCompositor,
    settings: ExportSettings,
}

impl<L: ImageLoader> Exporter<L> {
    /// Exporter using the fonts described by `settings`.
    pub fn new(loader: L, settings: ExportSettings) -> CarouselResult<Self> {
        let fonts = settings.load_fonts();
        Self::with_fonts(loader, fonts, settings)
    }

    /// Exporter drawing text with an already loaded font registry.
    pub fn with_fonts(
        loader: L,
        fonts: FontRegistry,
        settings: ExportSettings,
    ) -> CarouselResult<Self> {
        settings.validate()?;
        Ok(Self {
            loader,
            compositor: SlideCompositor::new(fonts).with_wrap_ratio(settings.wrap_ratio),
            settings,
        })
    }

    /// Settings the exporter was built with.
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// See [`export_carousel`].
    pub fn export<S: ArtifactSink + ?Sized>(
        &mut self,
        project: &Project,
        sink: &mut S,
    ) -> CarouselResult<ExportStats> {
        run_export(
            project,
            &mut self.loader,
            &mut self.compositor,
            &self.settings,
            sink,
        )
    }
}

#[tracing::instrument(
    skip_all,
    fields(title = %project.title, slides = project.slides.len())
)]
fn run_export<L, S>(
    project: &Project,
    loader: &mut L,
    compositor: &mut SlideCompositor,
    settings: &ExportSettings,
    sink: &mut S,
) -> CarouselResult<ExportStats>
where
    L: ImageLoader + ?Sized,
    S: ArtifactSink + ?Sized,
{
    project.validate()?;
    let style = project.text_style.resolve()?;
    let canvas = project.aspect_ratio.canvas();

    let mut stats = ExportStats {
        slides_total: project.slides.len(),
        ..ExportStats::default()
    };
    let plan = ExportPlan {
        slides_total: stats.slides_total,
        slides_with_image: project
            .slides
            .iter()
            .filter(|s| s.image.is_some())
            .count(),
        width: canvas.width,
        height: canvas.height,
    };
    sink.begin(&plan)?;

    for (index, slide) in project.slides.iter().enumerate() {
        let Some(reference) = slide.image.as_deref() else {
            tracing::debug!(index, id = %slide.id, "slide has no image; skipped");
            stats.skipped += 1;
            continue;
        };

        let bytes = loader.load(reference)?;
        let image = decode_image(&bytes)?;
        let frame = compositor.compose(&SlideScene {
            image: &image,
            text: &slide.text,
            position: slide.text_position,
            style: &style,
            canvas,
        })?;
        let png = encode_png(&frame)?;

        let file_name = slide_file_name(&settings.file_prefix, index);
        tracing::debug!(index, id = %slide.id, file = %file_name, bytes = png.len(), "slide exported");
        sink.push_artifact(SlideArtifact {
            index,
            file_name,
            width: frame.width,
            height: frame.height,
            png,
        })?;
        stats.exported += 1;
    }

    sink.end()?;
    tracing::info!(
        total = stats.slides_total,
        exported = stats.exported,
        skipped = stats.skipped,
        "carousel export finished"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
