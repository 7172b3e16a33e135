//! The description of a DDS file to write and the rules for completing it from its first source.
use std::path::PathBuf;

use strum::{Display, EnumIter, EnumString, FromRepr};
use tracing::warn;

use crate::{
    error::JobError,
    layout::{max_mip_levels, pow2_ge},
    source::RawImage,
    DxgiFormat,
};

/// The maximum number of source files for a single job.
pub const MAX_SOURCES: usize = 4096;

/// The `DDS_ALPHA_MODE` stored in the DXT10 header.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(
    Debug, PartialEq, Eq, Clone, Copy, Default, Display, EnumString, EnumIter, FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u32)]
pub enum AlphaMode {
    #[default]
    Unknown = 0,
    Straight = 1,
    Premultiplied = 2,
    Opaque = 3,
    Custom = 4,
}

/// A declarative description of the DDS file to write.
///
/// Fields left at their default values are completed by [Job::apply_defaults]
/// from the first source image.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Job {
    /// The width of the base mip level or 0 to use the width of the first source.
    pub width: u32,
    /// The height of the base mip level or 0 to use the height of the first source.
    pub height: u32,
    /// The width of the first source.
    pub base_width: u32,
    /// The height of the first source.
    pub base_height: u32,
    /// The number of mip levels or 0 for a full chain down to 1x1.
    pub max_mip_levels: u32,
    /// The number of array elements or cube map sets.
    /// [None] derives the size from the source files.
    pub array_size: Option<u32>,
    pub format: Option<DxgiFormat>,
    pub alpha_mode: Option<AlphaMode>,
    pub mipmaps: bool,
    pub cubemap: bool,
    pub volume: bool,
    /// Round the base dimensions up to powers of two.
    pub force_pow2: bool,
    pub sources: Vec<PathBuf>,
    pub output_path: PathBuf,
}

impl Job {
    /// A job for a single 2D image with all other fields inherited from the image.
    pub fn single<P: Into<PathBuf>, Q: Into<PathBuf>>(source: P, output_path: Q) -> Self {
        Self {
            sources: vec![source.into()],
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    /// Check the source list and resolve the array size before any source is loaded.
    ///
    /// Unsupported requests for volume textures are cleared with a warning.
    pub fn prepare(&mut self) -> Result<(), JobError> {
        let count = self.sources.len();
        if count == 0 {
            return Err(JobError::NoSources);
        }
        if count > MAX_SOURCES {
            return Err(JobError::TooManySources {
                count,
                max: MAX_SOURCES,
            });
        }
        if self.cubemap && self.volume {
            return Err(JobError::CubemapVolume);
        }
        if self.cubemap && count % 6 != 0 {
            return Err(JobError::CubemapSourceCount { count });
        }

        if self.volume {
            if self.mipmaps {
                warn!("Mipmaps are not supported for volume textures and will be disabled.");
                self.mipmaps = false;
                self.max_mip_levels = 1;
            }
            if let Some(array_size) = self.array_size.filter(|s| *s > 1) {
                warn!(array_size, "Volume texture arrays are not supported. Using an array size of 1.");
            }
            self.array_size = Some(1);
        } else {
            let expected = if self.cubemap { count / 6 } else { count } as u32;
            match self.array_size {
                Some(array_size) if array_size != expected => {
                    return Err(JobError::ArraySizeMismatch {
                        array_size,
                        expected,
                    });
                }
                _ => self.array_size = Some(expected),
            }
        }

        Ok(())
    }

    /// Complete any unset fields from the first decoded source.
    ///
    /// Calling this again with the same image does not change the job.
    pub fn apply_defaults(&mut self, image: &RawImage) -> Result<(), JobError> {
        if image.width == 0 || image.height == 0 {
            return Err(JobError::ZeroSizedSurface {
                width: image.width,
                height: image.height,
            });
        }

        if self.width == 0 {
            self.width = image.width;
        }
        if self.height == 0 {
            self.height = image.height;
        }
        self.base_width = image.width;
        self.base_height = image.height;

        self.format.get_or_insert(image.inferred_format);
        self.alpha_mode.get_or_insert(if image.channel_count == 4 {
            AlphaMode::Premultiplied
        } else {
            AlphaMode::Opaque
        });

        if self.force_pow2 {
            self.width = pow2_ge(self.width);
            self.height = pow2_ge(self.height);
        }

        let full_chain = max_mip_levels(self.width, self.height);
        self.max_mip_levels = if !self.mipmaps {
            1
        } else if self.max_mip_levels == 0 {
            full_chain
        } else {
            self.max_mip_levels.min(full_chain)
        };

        Ok(())
    }

    /// The number of mip levels per face or array element.
    pub fn mip_levels(&self) -> u32 {
        if self.mipmaps {
            self.max_mip_levels.max(1)
        } else {
            1
        }
    }

    /// The number of array elements written to the DXT10 header.
    pub fn array_size(&self) -> u32 {
        if self.volume {
            1
        } else {
            let count = self.sources.len() as u32;
            self.array_size
                .unwrap_or(if self.cubemap { count / 6 } else { count })
        }
    }

    /// The number of faces for each array element.
    pub fn faces(&self) -> u32 {
        if self.cubemap {
            6
        } else {
            1
        }
    }

    /// The depth of the base level.
    pub fn depth(&self) -> u32 {
        if self.volume {
            self.sources.len() as u32
        } else {
            1
        }
    }

    /// The total number of surfaces in the payload.
    pub fn surface_count(&self) -> u32 {
        if self.volume {
            1
        } else {
            self.array_size() * self.faces() * self.mip_levels()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Pixels;

    fn rgba8(width: u32, height: u32) -> RawImage {
        RawImage::new(
            width,
            height,
            4,
            Pixels::U8(vec![0u8; (width * height * 4) as usize]),
        )
    }

    fn sources(count: usize) -> Vec<PathBuf> {
        (0..count).map(|i| PathBuf::from(format!("{i}.png"))).collect()
    }

    #[test]
    fn prepare_no_sources() {
        let mut job = Job::default();
        assert!(matches!(job.prepare(), Err(JobError::NoSources)));
    }

    #[test]
    fn prepare_too_many_sources() {
        let mut job = Job {
            sources: sources(MAX_SOURCES + 1),
            ..Default::default()
        };
        assert!(matches!(
            job.prepare(),
            Err(JobError::TooManySources { count: 4097, .. })
        ));
    }

    #[test]
    fn prepare_array_size() {
        let mut job = Job {
            sources: sources(3),
            ..Default::default()
        };
        job.prepare().unwrap();
        assert_eq!(Some(3), job.array_size);
    }

    #[test]
    fn prepare_array_size_mismatch() {
        let mut job = Job {
            sources: sources(3),
            array_size: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            job.prepare(),
            Err(JobError::ArraySizeMismatch {
                array_size: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn prepare_cubemap() {
        let mut job = Job {
            sources: sources(12),
            cubemap: true,
            ..Default::default()
        };
        job.prepare().unwrap();
        assert_eq!(Some(2), job.array_size);
        assert_eq!(6, job.faces());
    }

    #[test]
    fn prepare_cubemap_source_count() {
        let mut job = Job {
            sources: sources(7),
            cubemap: true,
            ..Default::default()
        };
        assert!(matches!(
            job.prepare(),
            Err(JobError::CubemapSourceCount { count: 7 })
        ));
    }

    #[test]
    fn prepare_cubemap_volume() {
        let mut job = Job {
            sources: sources(6),
            cubemap: true,
            volume: true,
            ..Default::default()
        };
        assert!(matches!(job.prepare(), Err(JobError::CubemapVolume)));
    }

    #[test]
    fn prepare_volume_clears_unsupported() {
        let mut job = Job {
            sources: sources(3),
            volume: true,
            mipmaps: true,
            array_size: Some(3),
            ..Default::default()
        };
        job.prepare().unwrap();
        assert!(!job.mipmaps);
        assert_eq!(Some(1), job.array_size);
        assert_eq!(3, job.depth());
        assert_eq!(1, job.surface_count());
    }

    #[test]
    fn defaults_from_image() {
        let mut job = Job::single("a.png", "a.dds");
        job.apply_defaults(&rgba8(3, 5)).unwrap();
        assert_eq!(
            Job {
                width: 3,
                height: 5,
                base_width: 3,
                base_height: 5,
                max_mip_levels: 1,
                format: Some(DxgiFormat::R8G8B8A8Unorm),
                alpha_mode: Some(AlphaMode::Premultiplied),
                ..Job::single("a.png", "a.dds")
            },
            job
        );
    }

    #[test]
    fn defaults_keep_explicit_fields() {
        let mut job = Job {
            width: 8,
            height: 4,
            format: Some(DxgiFormat::BC3Unorm),
            alpha_mode: Some(AlphaMode::Straight),
            ..Job::single("a.png", "a.dds")
        };
        job.apply_defaults(&rgba8(3, 5)).unwrap();
        assert_eq!(8, job.width);
        assert_eq!(4, job.height);
        assert_eq!(3, job.base_width);
        assert_eq!(Some(DxgiFormat::BC3Unorm), job.format);
        assert_eq!(Some(AlphaMode::Straight), job.alpha_mode);
    }

    #[test]
    fn defaults_opaque_alpha() {
        let mut job = Job::single("a.png", "a.dds");
        let image = RawImage::new(1, 1, 1, Pixels::U8(vec![0u8]));
        job.apply_defaults(&image).unwrap();
        assert_eq!(Some(AlphaMode::Opaque), job.alpha_mode);
        assert_eq!(Some(DxgiFormat::R8Unorm), job.format);
    }

    #[test]
    fn defaults_pow2() {
        let mut job = Job {
            force_pow2: true,
            ..Job::single("a.png", "a.dds")
        };
        job.apply_defaults(&rgba8(3, 5)).unwrap();
        assert_eq!((4, 8), (job.width, job.height));
        assert_eq!((3, 5), (job.base_width, job.base_height));
    }

    #[test]
    fn defaults_full_mip_chain() {
        let mut job = Job {
            mipmaps: true,
            ..Job::single("a.png", "a.dds")
        };
        job.apply_defaults(&rgba8(4, 4)).unwrap();
        assert_eq!(3, job.max_mip_levels);
        assert_eq!(3, job.mip_levels());
    }

    #[test]
    fn defaults_single_pixel_mip_chain() {
        let mut job = Job {
            mipmaps: true,
            ..Job::single("a.png", "a.dds")
        };
        job.apply_defaults(&rgba8(1, 1)).unwrap();
        assert_eq!(1, job.mip_levels());
    }

    #[test]
    fn defaults_clamp_mip_levels() {
        let mut job = Job {
            mipmaps: true,
            max_mip_levels: 20,
            ..Job::single("a.png", "a.dds")
        };
        job.apply_defaults(&rgba8(8, 2)).unwrap();
        assert_eq!(4, job.max_mip_levels);
    }

    #[test]
    fn defaults_idempotent() {
        let mut job = Job {
            mipmaps: true,
            force_pow2: true,
            ..Job::single("a.png", "a.dds")
        };
        let image = rgba8(100, 100);
        job.apply_defaults(&image).unwrap();
        let first = job.clone();
        job.apply_defaults(&image).unwrap();
        assert_eq!(first, job);
        assert_eq!((128, 128, 8), (job.width, job.height, job.max_mip_levels));
    }

    #[test]
    fn defaults_zero_sized_image() {
        let mut job = Job::single("a.png", "a.dds");
        let image = RawImage::new(0, 4, 4, Pixels::U8(Vec::new()));
        assert!(matches!(
            job.apply_defaults(&image),
            Err(JobError::ZeroSizedSurface {
                width: 0,
                height: 4
            })
        ));
    }

    #[test]
    fn alpha_mode_names() {
        assert_eq!(Ok(AlphaMode::Premultiplied), "premultiplied".parse());
        assert_eq!("Opaque", AlphaMode::Opaque.to_string());
        assert_eq!(Some(AlphaMode::Custom), AlphaMode::from_repr(4));
    }
}
