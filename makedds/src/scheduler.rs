//! Loading sources and emitting their surfaces in file order.
//!
//! Surfaces are ordered by array element, then cube face, then mip level.
//! Volume textures have no faces or mipmaps and emit one slice per source.
use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    error::{DdsError, JobError},
    job::Job,
    layout::{level_dimension, level_size},
    source::{Decoder, RawImage, Resampler},
    surface::{CubeFace, Surface, SurfaceSink},
    DxgiFormat,
};

/// Drives the decoder and resampler to produce each surface of a [Job].
pub struct SurfaceScheduler<D, R> {
    decoder: D,
    resampler: R,
}

impl<D: Decoder, R: Resampler> SurfaceScheduler<D, R> {
    pub fn new(decoder: D, resampler: R) -> Self {
        Self { decoder, resampler }
    }

    /// Finalize `job` from its first source and write all surfaces to `sink`.
    ///
    /// Only one source image is in memory at a time.
    /// Each mip level is resampled from the full resolution source.
    pub fn run<S: SurfaceSink>(&mut self, job: &mut Job, sink: &mut S) -> Result<(), DdsError> {
        job.prepare()?;

        let sources = job.sources.clone();
        for (index, path) in sources.iter().enumerate() {
            let image = self.decoder.decode(path)?;

            if index == 0 {
                job.apply_defaults(&image)?;
                info!(
                    width = job.width,
                    height = job.height,
                    depth = job.depth(),
                    array_size = job.array_size(),
                    mip_levels = job.mip_levels(),
                    format = %job.format.unwrap_or_default(),
                    "Writing {} surfaces",
                    job.surface_count()
                );
            }

            let format = job.format.ok_or(JobError::MissingFormat)?;
            check_source_format(path, &image, format);

            if job.volume {
                self.emit_slice(job, format, index, &image, sink)?;
            } else {
                self.emit_mip_chain(job, format, index, &image, sink)?;
            }
        }

        Ok(())
    }

    fn emit_mip_chain<S: SurfaceSink>(
        &mut self,
        job: &Job,
        format: DxgiFormat,
        index: usize,
        image: &RawImage,
        sink: &mut S,
    ) -> Result<(), DdsError> {
        let (array_index, face) = if job.cubemap {
            (index / 6, CubeFace::from_index(index % 6))
        } else {
            (index, None)
        };

        for mip_level in 0..job.mip_levels() {
            let width = level_dimension(job.width, mip_level);
            let height = level_dimension(job.height, mip_level);

            let resampled;
            let data = if (width, height) == (image.width, image.height) {
                image.pixels.as_bytes()
            } else {
                resampled = self.resampler.resample(image, width, height)?;
                resampled.as_bytes()
            };
            let data = data.as_ref();

            debug!(array_index, ?face, mip_level, width, height, "Emitting surface");
            sink.write_surface(&Surface {
                array_index: array_index as u32,
                face,
                mip_level,
                slice: 0,
                width,
                height,
                depth: 1,
                format,
                data,
            })?;
        }

        Ok(())
    }

    fn emit_slice<S: SurfaceSink>(
        &mut self,
        job: &Job,
        format: DxgiFormat,
        index: usize,
        image: &RawImage,
        sink: &mut S,
    ) -> Result<(), DdsError> {
        let resampled;
        let data = if (job.width, job.height) == (image.width, image.height) {
            image.pixels.as_bytes()
        } else {
            resampled = self.resampler.resample(image, job.width, job.height)?;
            resampled.as_bytes()
        };
        let data = data.as_ref();

        debug!(slice = index, width = job.width, height = job.height, "Emitting volume slice");
        sink.write_surface(&Surface {
            array_index: 0,
            face: None,
            mip_level: 0,
            slice: index as u32,
            width: job.width,
            height: job.height,
            depth: job.depth(),
            format,
            data,
        })
    }
}

fn check_source_format(path: &Path, image: &RawImage, format: DxgiFormat) {
    let expected = level_size(format, image.width, image.height, 1);
    let actual = image.pixels.as_bytes().len();
    if expected != actual {
        warn!(
            ?path,
            expected,
            actual,
            "Source with {} channels does not match format {format}. Writing data without conversion.",
            image.channel_count
        );
    }
}
