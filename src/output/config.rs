//! Output configuration types

/// How matches are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One path per line.
    #[default]
    Plain,
    /// A JSON array of paths.
    Json,
}

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    pub format: OutputFormat,
    /// Sort matches before writing them.
    pub sort: bool,
}
