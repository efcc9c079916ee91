use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{CarouselError, CarouselResult};

/// Source of raw image bytes for slide image references.
pub trait ImageLoader {
    /// Fetch the encoded bytes behind `reference`.
    fn load(&mut self, reference: &str) -> CarouselResult<Vec<u8>>;
}

/// Loads image references as files relative to a root directory.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Resolve references relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used for resolution.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a reference resolves to.
    ///
    /// `file:///abs/path` (or `file://localhost/abs/path`) URIs name absolute files and are used
    /// as-is after percent-decoding; other URI hosts are rejected. Anything else is a relative
    /// path under the root.
    pub fn resolve(&self, reference: &str) -> CarouselResult<PathBuf> {
        if let Some(rest) = reference.strip_prefix("file://") {
            return file_uri_path(rest);
        }
        let norm = normalize_rel_path(reference)?;
        Ok(self.root.join(Path::new(&norm)))
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&mut self, reference: &str) -> CarouselResult<Vec<u8>> {
        let path = self.resolve(reference)?;
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(|e| CarouselError::decode(format!("{e:#}")))
    }
}

/// Serves image bytes from memory, keyed by reference.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageLoader {
    images: HashMap<String, Vec<u8>>,
}

impl MemoryImageLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for a reference, replacing any previous entry.
    pub fn insert(&mut self, reference: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(reference.into(), bytes);
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&mut self, reference: &str) -> CarouselResult<Vec<u8>> {
        self.images
            .get(reference)
            .cloned()
            .ok_or_else(|| CarouselError::decode(format!("no image registered for '{reference}'")))
    }
}

fn file_uri_path(rest: &str) -> CarouselResult<PathBuf> {
    let path = rest.strip_prefix("localhost").unwrap_or(rest);
    if !path.starts_with('/') {
        return Err(CarouselError::validation(format!(
            "file URI 'file://{rest}' must name an absolute local path (file:///...)"
        )));
    }
    let decoded = urlencoding::decode(path)
        .map_err(|e| CarouselError::validation(format!("file URI 'file://{rest}': {e}")))?;
    let decoded: &str = &decoded;
    // `file:///C:/photos/a.jpg` on Windows.
    let bytes = decoded.as_bytes();
    let local = if bytes.len() >= 3 && bytes[2] == b':' && bytes[1].is_ascii_alphabetic() {
        &decoded[1..]
    } else {
        decoded
    };
    Ok(PathBuf::from(local))
}

/// Normalize and validate project-relative image paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> CarouselResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(CarouselError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(CarouselError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CarouselError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CarouselError::validation(
            "image path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
