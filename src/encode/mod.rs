//! PNG encoding and artifact sinks.

pub mod png;
pub mod sink;
