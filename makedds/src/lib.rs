//! # makedds
//! makedds composes DDS files from decoded source images.
//!
//! A [Job] describes the output and is completed from the first source image.
//! Sources are loaded one at a time, resampled to each mip level as needed,
//! and streamed to the output in the order required by the DDS format.
//! The headers are written last once all fields of the job are known.
//!
//! Pixel data is written as is without any conversion or block compression.
//! Sources must already match the chosen [DxgiFormat].
//!
//! # Getting Started
//! ```rust no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut job = makedds::Job {
//!     mipmaps: true,
//!     ..makedds::Job::single("image.png", "image.dds")
//! };
//! let summary = makedds::write_dds_file(&mut job)?;
//! println!("{} bytes", summary.file_bytes);
//! # Ok(())
//! # }
//! ```
//!
//! Custom [Decoder] and [Resampler] implementations can supply data
//! that the `image` crate can not load, such as precompressed BCN surfaces.
//! ```rust no_run
//! # use makedds::{Job, DxgiFormat, RawImage, Decoder, SourceError, ImageResampler};
//! # use std::path::Path;
//! struct Bc7Decoder;
//!
//! impl Decoder for Bc7Decoder {
//!     fn decode(&mut self, path: &Path) -> Result<RawImage, SourceError> {
//!         let data = std::fs::read(path).map_err(|e| SourceError::Decode {
//!             path: path.to_owned(),
//!             source: Box::new(e),
//!         })?;
//!         Ok(RawImage::with_format(256, 256, DxgiFormat::BC7Unorm, data))
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut job = Job::single("image.bc7", "image.dds");
//! let file = std::io::BufWriter::new(std::fs::File::create("image.dds")?);
//! makedds::write_dds(&mut job, file, Bc7Decoder, ImageResampler::default())?;
//! # Ok(())
//! # }
//! ```
use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
};

pub mod container;
pub mod error;
pub mod format;
pub mod header;
pub mod job;
pub mod layout;
pub mod manifest;
pub mod scheduler;
pub mod source;
pub mod surface;

pub use container::{DdsSummary, DdsWriter};
pub use error::{DdsError, JobError, ManifestError, SourceError};
pub use format::{DxgiFormat, LegacyPixelFormat};
pub use header::DdsHeaders;
pub use job::{AlphaMode, Job};
pub use manifest::{load_job, parse_manifest, Manifest};
pub use scheduler::SurfaceScheduler;
pub use source::{
    Decoder, ElementType, ImageDecoder, ImageResampler, Pixels, RawImage, Resampler,
};
pub use surface::{CubeFace, Surface, SurfaceSink};

/// Write the DDS file described by `job` to `writer`.
///
/// The `job` is completed from its first source and can be inspected afterwards.
/// The output is left partially written if an error occurs.
pub fn write_dds<W, D, R>(
    job: &mut Job,
    writer: W,
    decoder: D,
    resampler: R,
) -> Result<DdsSummary, DdsError>
where
    W: Write + Seek,
    D: Decoder,
    R: Resampler,
{
    let mut dds = DdsWriter::new(writer)?;
    SurfaceScheduler::new(decoder, resampler).run(job, &mut dds)?;
    dds.finish(job)
}

/// Write the DDS file described by `job` to its output path
/// using the `image` crate to load and resize sources.
pub fn write_dds_file(job: &mut Job) -> Result<DdsSummary, DdsError> {
    // Avoid creating the output for jobs that can never succeed.
    job.prepare()?;

    let file = File::create(&job.output_path)?;
    write_dds(
        job,
        BufWriter::new(file),
        ImageDecoder,
        ImageResampler::default(),
    )
}
