//! Whole-carousel export: settings and the sequential per-slide pipeline.

pub mod pipeline;
pub mod settings;
