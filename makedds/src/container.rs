//! Streaming DDS output.
//!
//! The headers depend on fields that are only known after the first source is loaded,
//! so space for them is reserved first and filled in by [DdsWriter::finish].
use std::io::{Read, Seek, SeekFrom, Write};

use tracing::{info, warn};

use crate::{
    error::DdsError,
    header::{DdsHeaders, DDS_PREFIX_SIZE},
    job::Job,
    surface::{Surface, SurfaceSink},
};

/// Totals for a completed DDS file.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DdsSummary {
    /// The number of surfaces where each volume counts as a single surface.
    pub surfaces: u32,
    /// The number of bytes after the headers.
    pub payload_bytes: u64,
    /// The total size of the file including the headers.
    pub file_bytes: u64,
}

/// Writes surfaces after a reserved header region.
pub struct DdsWriter<W: Write + Seek> {
    writer: W,
    start: u64,
    surfaces: u32,
    payload_bytes: u64,
}

impl<W: Write + Seek> DdsWriter<W> {
    /// Reserve space for the headers at the current position of `writer`.
    pub fn new(mut writer: W) -> Result<Self, DdsError> {
        let start = writer.stream_position()?;
        writer.seek(SeekFrom::Start(start + DDS_PREFIX_SIZE as u64))?;
        Ok(Self {
            writer,
            start,
            surfaces: 0,
            payload_bytes: 0,
        })
    }

    /// Write the headers for the finalized `job` and flush the output.
    pub fn finish(mut self, job: &Job) -> Result<DdsSummary, DdsError> {
        let headers = DdsHeaders::from_job(job)?;

        self.writer.seek(SeekFrom::Start(self.start))?;
        self.writer.write_all(&headers.to_bytes())?;

        let file_bytes = DDS_PREFIX_SIZE as u64 + self.payload_bytes;
        self.writer.seek(SeekFrom::Start(self.start + file_bytes))?;
        self.writer.flush()?;

        let summary = DdsSummary {
            surfaces: self.surfaces,
            payload_bytes: self.payload_bytes,
            file_bytes,
        };
        info!(
            surfaces = summary.surfaces,
            bytes = summary.file_bytes,
            "Wrote {:?}",
            job.output_path
        );
        Ok(summary)
    }
}

impl<W: Write + Seek> SurfaceSink for DdsWriter<W> {
    fn write_surface(&mut self, surface: &Surface<'_>) -> Result<(), DdsError> {
        let expected = surface.expected_size();
        let actual = surface.data.len();
        if actual != expected {
            warn!(
                array_index = surface.array_index,
                mip_level = surface.mip_level,
                slice = surface.slice,
                expected,
                actual,
                "Surface size does not match format {}. {}.",
                surface.format,
                if actual < expected {
                    "Padding with zeros"
                } else {
                    "Truncating data"
                }
            );
        }

        let written = actual.min(expected);
        self.writer.write_all(&surface.data[..written])?;
        if written < expected {
            let padding = (expected - written) as u64;
            std::io::copy(&mut std::io::repeat(0).take(padding), &mut self.writer)?;
        }

        if surface.slice == 0 {
            self.surfaces += 1;
        }
        self.payload_bytes += expected as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{header::DDS_MAGIC, DxgiFormat};
    use std::io::Cursor;

    fn surface(format: DxgiFormat, width: u32, height: u32, data: &[u8]) -> Surface<'_> {
        Surface {
            array_index: 0,
            face: None,
            mip_level: 0,
            slice: 0,
            width,
            height,
            depth: 1,
            format,
            data,
        }
    }

    fn finished_job() -> Job {
        Job {
            width: 2,
            height: 2,
            base_width: 2,
            base_height: 2,
            max_mip_levels: 1,
            array_size: Some(1),
            format: Some(DxgiFormat::R8Unorm),
            sources: vec!["a.png".into()],
            ..Default::default()
        }
    }

    #[test]
    fn write_headers_last() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = DdsWriter::new(&mut cursor).unwrap();
        writer
            .write_surface(&surface(DxgiFormat::R8Unorm, 2, 2, &[1, 2, 3, 4]))
            .unwrap();
        let summary = writer.finish(&finished_job()).unwrap();

        assert_eq!(
            DdsSummary {
                surfaces: 1,
                payload_bytes: 4,
                file_bytes: 152
            },
            summary
        );
        let bytes = cursor.into_inner();
        assert_eq!(152, bytes.len());
        assert_eq!(DDS_MAGIC.to_le_bytes(), bytes[0..4]);
        assert_eq!(&[1, 2, 3, 4], &bytes[148..]);
    }

    #[test]
    fn pad_short_surface() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = DdsWriter::new(&mut cursor).unwrap();
        writer
            .write_surface(&surface(DxgiFormat::R8Unorm, 2, 2, &[1]))
            .unwrap();
        writer.finish(&finished_job()).unwrap();
        assert_eq!(&[1, 0, 0, 0], &cursor.into_inner()[148..]);
    }

    #[test]
    fn truncate_long_surface() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = DdsWriter::new(&mut cursor).unwrap();
        writer
            .write_surface(&surface(DxgiFormat::R8Unorm, 2, 2, &[1, 2, 3, 4, 5, 6]))
            .unwrap();
        writer.finish(&finished_job()).unwrap();
        assert_eq!(&[1, 2, 3, 4], &cursor.into_inner()[148..]);
    }

    #[test]
    fn count_volume_as_one_surface() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = DdsWriter::new(&mut cursor).unwrap();
        for slice in 0..3 {
            writer
                .write_surface(&Surface {
                    slice,
                    depth: 3,
                    ..surface(DxgiFormat::R8Unorm, 2, 2, &[0; 4])
                })
                .unwrap();
        }
        let job = Job {
            volume: true,
            sources: vec!["0.png".into(), "1.png".into(), "2.png".into()],
            ..finished_job()
        };
        let summary = writer.finish(&job).unwrap();
        assert_eq!(1, summary.surfaces);
        assert_eq!(160, summary.file_bytes);
    }

    #[test]
    fn finish_incomplete_job() {
        let mut cursor = Cursor::new(Vec::new());
        let writer = DdsWriter::new(&mut cursor).unwrap();
        let job = Job {
            format: None,
            ..finished_job()
        };
        assert!(matches!(
            writer.finish(&job),
            Err(DdsError::Job(crate::error::JobError::MissingFormat))
        ));
    }
}
