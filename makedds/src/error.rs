use std::path::PathBuf;

use thiserror::Error;

use crate::DxgiFormat;

/// An error from any stage of writing a DDS file.
#[derive(Debug, Error)]
pub enum DdsError {
    #[error("error parsing manifest: {0}")]
    Manifest(#[from] ManifestError),

    #[error("invalid job: {0}")]
    Job(#[from] JobError),

    #[error("error loading source image: {0}")]
    Source(#[from] SourceError),

    #[error("error writing DDS: {0}")]
    Io(#[from] std::io::Error),
}

/// A manifest that could not be parsed into a [Job](crate::Job).
#[derive(Debug, Error)]
#[error("{message} at line {line} column {column}: {fragment:?}")]
pub struct ManifestError {
    /// The 1-based line of the error or 0 if unknown.
    pub line: usize,
    /// The 1-based column of the error or 0 if unknown.
    pub column: usize,
    /// The text surrounding the error.
    pub fragment: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error("no source files were specified")]
    NoSources,

    #[error("{count} source files exceeds the maximum of {max}")]
    TooManySources { count: usize, max: usize },

    #[error("cube maps require a multiple of 6 source files but found {count}")]
    CubemapSourceCount { count: usize },

    #[error("a texture can not be both a cube map and a volume")]
    CubemapVolume,

    #[error("array size {array_size} does not match the expected array size of {expected} for the source files")]
    ArraySizeMismatch { array_size: u32, expected: u32 },

    #[error("the pixel format has not been determined")]
    MissingFormat,

    #[error("surface dimensions {width} x {height} contain no pixels")]
    ZeroSizedSurface { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to decode {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to allocate {bytes} bytes for a resampled image")]
    Allocation { bytes: usize },

    #[error("resampling images with format {format} is not supported")]
    UnsupportedResample { format: DxgiFormat },

    #[error("expected {expected} elements for a {width}x{height} image with {channels} channels but found {actual}")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        channels: u32,
        expected: usize,
        actual: usize,
    },
}
