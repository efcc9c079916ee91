use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{CarouselError, CarouselResult};

/// Default output file prefix.
pub const DEFAULT_FILE_PREFIX: &str = "slide";

/// File name of the slide at zero-based deck position `index`.
pub fn slide_file_name(prefix: &str, index: usize) -> String {
    format!("{prefix}-{}.png", index + 1)
}

/// What an export run is about to produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPlan {
    /// Slides in the deck, including those that will be skipped.
    pub slides_total: usize,
    /// Slides that have an image and will be rendered.
    pub slides_with_image: usize,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// One encoded slide.
#[derive(Clone, Debug)]
pub struct SlideArtifact {
    /// Zero-based position of the slide in the deck.
    pub index: usize,
    /// Output file name, e.g. `slide-1.png`.
    pub file_name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Receives encoded slides as an export run produces them.
pub trait ArtifactSink {
    /// Called once before the first artifact.
    fn begin(&mut self, plan: &ExportPlan) -> CarouselResult<()>;
    /// Called once per exported slide, in deck order.
    fn push_artifact(&mut self, artifact: SlideArtifact) -> CarouselResult<()>;
    /// Called once after the last artifact of a successful run.
    fn end(&mut self) -> CarouselResult<()>;
}

/// Writes each artifact to `<dir>/<file_name>`.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for DirectorySink {
    fn begin(&mut self, _plan: &ExportPlan) -> CarouselResult<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        Ok(())
    }

    fn push_artifact(&mut self, artifact: SlideArtifact) -> CarouselResult<()> {
        let path = self.dir.join(&artifact.file_name);
        if !self.overwrite && path.exists() {
            return Err(CarouselError::validation(format!(
                "output file '{}' already exists",
                path.display()
            )));
        }
        std::fs::write(&path, &artifact.png)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "slide written");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> CarouselResult<()> {
        Ok(())
    }
}

/// Keeps every artifact in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    /// Plan received by the last `begin`.
    pub plan: Option<ExportPlan>,
    /// Artifacts in the order they were pushed.
    pub artifacts: Vec<SlideArtifact>,
    /// Whether `end` was called.
    pub finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactSink for InMemorySink {
    fn begin(&mut self, plan: &ExportPlan) -> CarouselResult<()> {
        self.plan = Some(plan.clone());
        self.artifacts.clear();
        self.finished = false;
        Ok(())
    }

    fn push_artifact(&mut self, artifact: SlideArtifact) -> CarouselResult<()> {
        self.artifacts.push(artifact);
        Ok(())
    }

    fn end(&mut self) -> CarouselResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
