//! The 148 byte prefix of every DDS file written by this crate.
//!
//! The prefix is the `"DDS "` magic, the 124 byte base header, and the 20 byte DXT10 header.
//! Flags are tracked as typed bit sets and only converted to raw little endian words
//! when the prefix is serialized.
use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use tracing::warn;

use crate::{
    error::JobError,
    job::{AlphaMode, Job},
    layout::{level_size, pitch},
    DxgiFormat, LegacyPixelFormat,
};

/// The size in bytes of the magic, base header, and DXT10 header.
pub const DDS_PREFIX_SIZE: usize = 148;

/// The bytes `"DDS "` read as a little endian word.
pub const DDS_MAGIC: u32 = 0x20534444;

const HEADER_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;

bitflags! {
    /// `DDSD_*` flags for the base header indicating which fields are valid.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct HeaderFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXELFORMAT = 0x1000;
        const MIPMAPCOUNT = 0x20000;
        const LINEARSIZE = 0x80000;
        const DEPTH = 0x800000;
    }
}

bitflags! {
    /// `DDSCAPS_*` flags describing the complexity of the surfaces.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct Caps: u32 {
        const COMPLEX = 0x8;
        const TEXTURE = 0x1000;
        const MIPMAP = 0x400000;
    }
}

bitflags! {
    /// `DDSCAPS2_*` flags for cube map faces and volumes.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct Caps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_POSITIVEX = 0x400;
        const CUBEMAP_NEGATIVEX = 0x800;
        const CUBEMAP_POSITIVEY = 0x1000;
        const CUBEMAP_NEGATIVEY = 0x2000;
        const CUBEMAP_POSITIVEZ = 0x4000;
        const CUBEMAP_NEGATIVEZ = 0x8000;
        const VOLUME = 0x200000;

        const ALL_CUBE_FACES = Self::CUBEMAP.bits()
            | Self::CUBEMAP_POSITIVEX.bits()
            | Self::CUBEMAP_NEGATIVEX.bits()
            | Self::CUBEMAP_POSITIVEY.bits()
            | Self::CUBEMAP_NEGATIVEY.bits()
            | Self::CUBEMAP_POSITIVEZ.bits()
            | Self::CUBEMAP_NEGATIVEZ.bits();
    }
}

bitflags! {
    /// `DDPF_*` flags for the legacy pixel format.
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
    pub struct PixelFormatFlags: u32 {
        const ALPHAPIXELS = 0x1;
        const ALPHA = 0x2;
        const FOURCC = 0x4;
        const RGB = 0x40;
        const YUV = 0x200;
        const LUMINANCE = 0x20000;
        const BUMPDUDV = 0x80000;

        const RGBA = Self::RGB.bits() | Self::ALPHAPIXELS.bits();
        const LUMINANCE_ALPHA = Self::LUMINANCE.bits() | Self::ALPHAPIXELS.bits();
    }
}

bitflags! {
    /// `D3D10_RESOURCE_MISC_*` flags for the DXT10 header.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct MiscFlags: u32 {
        const TEXTURECUBE = 0x4;
    }
}

/// A four character code stored as a little endian word.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const DXT1: Self = Self::from_bytes(*b"DXT1");
    pub const DXT3: Self = Self::from_bytes(*b"DXT3");
    pub const DXT5: Self = Self::from_bytes(*b"DXT5");
    pub const BC4U: Self = Self::from_bytes(*b"BC4U");
    pub const BC4S: Self = Self::from_bytes(*b"BC4S");
    pub const BC5U: Self = Self::from_bytes(*b"BC5U");
    pub const BC5S: Self = Self::from_bytes(*b"BC5S");
    pub const RGBG: Self = Self::from_bytes(*b"RGBG");
    pub const GRGB: Self = Self::from_bytes(*b"GRGB");
    pub const YUY2: Self = Self::from_bytes(*b"YUY2");
    pub const DX10: Self = Self::from_bytes(*b"DX10");

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }
}

/// The `D3D10_RESOURCE_DIMENSION` of the DXT10 header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u32)]
pub enum ResourceDimension {
    Unknown = 0,
    Buffer = 1,
    Texture1D = 2,
    Texture2D = 3,
    Texture3D = 4,
}

/// The base DDS header with typed flag fields.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    pub flags: HeaderFlags,
    pub height: u32,
    pub width: u32,
    /// The pitch for uncompressed formats or the size of the base level for block compressed formats.
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    pub pixel_format: LegacyPixelFormat,
    pub caps: Caps,
    pub caps2: Caps2,
}

/// The DXT10 extended header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header10 {
    pub format: DxgiFormat,
    pub dimension: ResourceDimension,
    pub misc_flags: MiscFlags,
    /// The number of array elements.
    /// Cube maps store the number of cubes rather than the number of faces.
    pub array_size: u32,
    pub alpha_mode: AlphaMode,
}

/// The headers describing a finalized [Job].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DdsHeaders {
    pub header: Header,
    pub header10: Header10,
}

impl DdsHeaders {
    /// Synthesize the headers for a `job` that has already been completed from its first source.
    pub fn from_job(job: &Job) -> Result<Self, JobError> {
        let format = job.format.ok_or(JobError::MissingFormat)?;
        if job.width == 0 || job.height == 0 {
            return Err(JobError::ZeroSizedSurface {
                width: job.width,
                height: job.height,
            });
        }

        let mip_levels = job.mip_levels();

        let mut flags = HeaderFlags::CAPS
            | HeaderFlags::HEIGHT
            | HeaderFlags::WIDTH
            | HeaderFlags::PIXELFORMAT
            | HeaderFlags::MIPMAPCOUNT;

        // Block compressed formats store the size of the base level instead of a row pitch.
        let pitch_or_linear_size = if format.is_block_compressed() {
            flags |= HeaderFlags::LINEARSIZE;
            level_size(format, job.width, job.height, 1)
        } else {
            flags |= HeaderFlags::PITCH;
            pitch(format, job.width)
        };

        let pitch_or_linear_size = u32::try_from(pitch_or_linear_size).unwrap_or_else(|_| {
            warn!(
                size = pitch_or_linear_size,
                "Pitch or linear size does not fit in the header and is saturated"
            );
            u32::MAX
        });

        let mut caps = Caps::TEXTURE;
        let mut caps2 = Caps2::empty();
        if job.mipmaps {
            caps |= Caps::COMPLEX | Caps::MIPMAP;
        }
        if job.cubemap {
            caps |= Caps::COMPLEX;
            caps2 |= Caps2::ALL_CUBE_FACES;
        }
        if job.volume {
            flags |= HeaderFlags::DEPTH;
            caps2 |= Caps2::VOLUME;
        }

        let dimension = if job.volume {
            ResourceDimension::Texture3D
        } else if job.height == 1 && !job.cubemap {
            ResourceDimension::Texture1D
        } else {
            ResourceDimension::Texture2D
        };

        let misc_flags = if job.cubemap {
            MiscFlags::TEXTURECUBE
        } else {
            MiscFlags::empty()
        };

        Ok(Self {
            header: Header {
                flags,
                height: job.height,
                width: job.width,
                pitch_or_linear_size,
                depth: job.depth(),
                // A single level without the mipmap flag stores a count of 0.
                mipmap_count: if job.mipmaps || mip_levels > 1 {
                    mip_levels
                } else {
                    0
                },
                pixel_format: LegacyPixelFormat::DX10,
                caps,
                caps2,
            },
            header10: Header10 {
                format,
                dimension,
                misc_flags,
                array_size: job.array_size(),
                alpha_mode: job.alpha_mode.unwrap_or_default(),
            },
        })
    }

    /// Serialize the magic and both headers to their little endian file representation.
    pub fn to_bytes(&self) -> [u8; DDS_PREFIX_SIZE] {
        let mut raw = RawPrefix::from(self);
        for word in bytemuck::cast_slice_mut::<RawPrefix, u32>(std::slice::from_mut(&mut raw)) {
            *word = word.to_le();
        }

        let mut bytes = [0u8; DDS_PREFIX_SIZE];
        bytes.copy_from_slice(bytemuck::bytes_of(&raw));
        bytes
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawPrefix {
    magic: u32,
    header: RawHeader,
    header10: RawHeader10,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    size: u32,
    flags: u32,
    height: u32,
    width: u32,
    pitch_or_linear_size: u32,
    depth: u32,
    mipmap_count: u32,
    reserved1: [u32; 11],
    pixel_format: RawPixelFormat,
    caps: u32,
    caps2: u32,
    caps3: u32,
    caps4: u32,
    reserved2: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawPixelFormat {
    size: u32,
    flags: u32,
    four_cc: u32,
    rgb_bit_count: u32,
    r_bit_mask: u32,
    g_bit_mask: u32,
    b_bit_mask: u32,
    a_bit_mask: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawHeader10 {
    dxgi_format: u32,
    resource_dimension: u32,
    misc_flag: u32,
    array_size: u32,
    misc_flags2: u32,
}

const _: () = assert!(std::mem::size_of::<RawHeader>() == HEADER_SIZE as usize);
const _: () = assert!(std::mem::size_of::<RawPixelFormat>() == PIXEL_FORMAT_SIZE as usize);
const _: () = assert!(std::mem::size_of::<RawPrefix>() == DDS_PREFIX_SIZE);

impl From<&DdsHeaders> for RawPrefix {
    fn from(value: &DdsHeaders) -> Self {
        let header = &value.header;
        let header10 = &value.header10;
        let pf = &header.pixel_format;

        Self {
            magic: DDS_MAGIC,
            header: RawHeader {
                size: HEADER_SIZE,
                flags: header.flags.bits(),
                height: header.height,
                width: header.width,
                pitch_or_linear_size: header.pitch_or_linear_size,
                depth: header.depth,
                mipmap_count: header.mipmap_count,
                reserved1: [0; 11],
                pixel_format: RawPixelFormat {
                    size: PIXEL_FORMAT_SIZE,
                    flags: pf.flags.bits(),
                    four_cc: pf.four_cc.0,
                    rgb_bit_count: pf.rgb_bit_count,
                    r_bit_mask: pf.r_bit_mask,
                    g_bit_mask: pf.g_bit_mask,
                    b_bit_mask: pf.b_bit_mask,
                    a_bit_mask: pf.a_bit_mask,
                },
                caps: header.caps.bits(),
                caps2: header.caps2.bits(),
                caps3: 0,
                caps4: 0,
                reserved2: 0,
            },
            header10: RawHeader10 {
                dxgi_format: header10.format as u32,
                resource_dimension: header10.dimension as u32,
                misc_flag: header10.misc_flags.bits(),
                array_size: header10.array_size,
                misc_flags2: header10.alpha_mode as u32,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn finished_job(width: u32, height: u32, format: DxgiFormat) -> Job {
        Job {
            width,
            height,
            base_width: width,
            base_height: height,
            max_mip_levels: 1,
            array_size: Some(1),
            format: Some(format),
            alpha_mode: Some(AlphaMode::Premultiplied),
            sources: vec!["a.png".into()],
            ..Default::default()
        }
    }

    #[test]
    fn four_cc_bytes() {
        assert_eq!(0x30315844, FourCC::DX10.0);
        assert_eq!(u32::from_le_bytes(*b"DXT1"), FourCC::DXT1.0);
    }

    #[test]
    fn all_cube_faces() {
        assert_eq!(0xfe00, Caps2::ALL_CUBE_FACES.bits());
    }

    #[test]
    fn headers_rgba8_single_level() {
        let headers = DdsHeaders::from_job(&finished_job(2, 2, DxgiFormat::R8G8B8A8Unorm)).unwrap();

        assert_eq!(
            HeaderFlags::CAPS
                | HeaderFlags::HEIGHT
                | HeaderFlags::WIDTH
                | HeaderFlags::PIXELFORMAT
                | HeaderFlags::MIPMAPCOUNT
                | HeaderFlags::PITCH,
            headers.header.flags
        );
        assert_eq!(8, headers.header.pitch_or_linear_size);
        assert_eq!(0, headers.header.mipmap_count);
        assert_eq!(1, headers.header.depth);
        assert_eq!(Caps::TEXTURE, headers.header.caps);
        assert_eq!(Caps2::empty(), headers.header.caps2);
        assert_eq!(LegacyPixelFormat::DX10, headers.header.pixel_format);
        assert_eq!(ResourceDimension::Texture2D, headers.header10.dimension);
        assert_eq!(1, headers.header10.array_size);
    }

    #[test]
    fn headers_block_compressed_linear_size() {
        let headers = DdsHeaders::from_job(&finished_job(8, 8, DxgiFormat::BC3Unorm)).unwrap();
        assert!(headers.header.flags.contains(HeaderFlags::LINEARSIZE));
        assert!(!headers.header.flags.contains(HeaderFlags::PITCH));
        assert_eq!(64, headers.header.pitch_or_linear_size);
    }

    #[test]
    fn headers_mipmaps() {
        let job = Job {
            mipmaps: true,
            max_mip_levels: 3,
            ..finished_job(4, 4, DxgiFormat::R8G8B8A8Unorm)
        };
        let headers = DdsHeaders::from_job(&job).unwrap();
        assert_eq!(3, headers.header.mipmap_count);
        assert_eq!(
            Caps::TEXTURE | Caps::COMPLEX | Caps::MIPMAP,
            headers.header.caps
        );
    }

    #[test]
    fn headers_single_level_with_mipmap_flag() {
        let job = Job {
            mipmaps: true,
            max_mip_levels: 1,
            ..finished_job(1, 1, DxgiFormat::R8G8B8A8Unorm)
        };
        assert_eq!(1, DdsHeaders::from_job(&job).unwrap().header.mipmap_count);
    }

    #[test]
    fn headers_cubemap() {
        let job = Job {
            cubemap: true,
            ..finished_job(1, 1, DxgiFormat::R8G8B8A8Unorm)
        };
        let headers = DdsHeaders::from_job(&job).unwrap();
        assert_eq!(Caps2::ALL_CUBE_FACES, headers.header.caps2);
        assert!(headers.header.caps.contains(Caps::COMPLEX));
        assert_eq!(MiscFlags::TEXTURECUBE, headers.header10.misc_flags);
        // Cube maps are never 1D even with a height of 1.
        assert_eq!(ResourceDimension::Texture2D, headers.header10.dimension);
    }

    #[test]
    fn headers_volume() {
        let job = Job {
            volume: true,
            sources: vec!["0.png".into(), "1.png".into(), "2.png".into()],
            ..finished_job(2, 2, DxgiFormat::R8Unorm)
        };
        let headers = DdsHeaders::from_job(&job).unwrap();
        assert_eq!(3, headers.header.depth);
        assert!(headers.header.flags.contains(HeaderFlags::DEPTH));
        assert_eq!(Caps::TEXTURE, headers.header.caps);
        assert_eq!(Caps2::VOLUME, headers.header.caps2);
        assert_eq!(ResourceDimension::Texture3D, headers.header10.dimension);
        assert_eq!(1, headers.header10.array_size);
    }

    #[test]
    fn headers_pitch_saturates() {
        let job = finished_job(u32::MAX, 1, DxgiFormat::R32G32B32A32Float);
        let headers = DdsHeaders::from_job(&job).unwrap();
        assert_eq!(u32::MAX, headers.header.pitch_or_linear_size);
    }

    #[test]
    fn headers_1d() {
        let headers = DdsHeaders::from_job(&finished_job(16, 1, DxgiFormat::R8Unorm)).unwrap();
        assert_eq!(ResourceDimension::Texture1D, headers.header10.dimension);
    }

    #[test]
    fn headers_missing_format() {
        let job = Job {
            format: None,
            ..finished_job(2, 2, DxgiFormat::R8Unorm)
        };
        assert!(matches!(
            DdsHeaders::from_job(&job),
            Err(JobError::MissingFormat)
        ));
    }

    #[test]
    fn prefix_layout() {
        let job = Job {
            alpha_mode: Some(AlphaMode::Opaque),
            ..finished_job(3, 2, DxgiFormat::R8G8B8A8Unorm)
        };
        let bytes = DdsHeaders::from_job(&job).unwrap().to_bytes();

        assert_eq!(b"DDS ", &bytes[0..4]);
        assert_eq!(124, word(&bytes, 4));
        assert_eq!(0x2100f, word(&bytes, 8));
        // Height is stored before width.
        assert_eq!(2, word(&bytes, 12));
        assert_eq!(3, word(&bytes, 16));
        assert_eq!(12, word(&bytes, 20));
        assert_eq!(1, word(&bytes, 24));
        assert_eq!(0, word(&bytes, 28));
        assert!(bytes[32..76].iter().all(|b| *b == 0));
        // Pixel format.
        assert_eq!(32, word(&bytes, 76));
        assert_eq!(0x4, word(&bytes, 80));
        assert_eq!(b"DX10", &bytes[84..88]);
        assert_eq!(0x1000, word(&bytes, 108));
        assert!(bytes[112..128].iter().all(|b| *b == 0));
        // DXT10 header.
        assert_eq!(28, word(&bytes, 128));
        assert_eq!(3, word(&bytes, 132));
        assert_eq!(0, word(&bytes, 136));
        assert_eq!(1, word(&bytes, 140));
        assert_eq!(3, word(&bytes, 144));
    }
}
