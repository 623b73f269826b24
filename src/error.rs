//! Errors of the outer surfaces: files, configuration and the layout engine.
//!
//! Content parsing itself never fails; malformed markup degrades to text.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid record '{path}': {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The record has no `Codigo`, so no output filename can be derived.
    #[error("record has no Codigo")]
    MissingCode,

    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
