use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading definitions or writing outputs.
///
/// Formula translation itself never errors: a malformed formula degrades to
/// an empty string inside the translator. These variants cover the file-level
/// concerns around it, where a failure must name its cause.
#[derive(Debug, Error)]
pub enum SpecidxError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("malformed definition: {0}")]
    Malformed(String),
}
