//! DXGI pixel formats and the fixed attributes needed to lay them out in a DDS file.
use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::header::{FourCC, PixelFormatFlags};

/// A pixel format from the closed DXGI enumeration.
///
/// The discriminant is the value stored in the DXT10 extended header.
/// Formats display as and parse from their DXGI enumerator names
/// like `R8G8B8A8_UNORM`, ignoring ASCII case.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Display, EnumString, EnumIter, FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u32)]
pub enum DxgiFormat {
    #[default]
    #[strum(to_string = "UNKNOWN")]
    Unknown = 0,
    #[strum(to_string = "R32G32B32A32_TYPELESS")]
    R32G32B32A32Typeless = 1,
    #[strum(to_string = "R32G32B32A32_FLOAT")]
    R32G32B32A32Float = 2,
    #[strum(to_string = "R32G32B32A32_UINT")]
    R32G32B32A32Uint = 3,
    #[strum(to_string = "R32G32B32A32_SINT")]
    R32G32B32A32Sint = 4,
    #[strum(to_string = "R32G32B32_TYPELESS")]
    R32G32B32Typeless = 5,
    #[strum(to_string = "R32G32B32_FLOAT")]
    R32G32B32Float = 6,
    #[strum(to_string = "R32G32B32_UINT")]
    R32G32B32Uint = 7,
    #[strum(to_string = "R32G32B32_SINT")]
    R32G32B32Sint = 8,
    #[strum(to_string = "R16G16B16A16_TYPELESS")]
    R16G16B16A16Typeless = 9,
    #[strum(to_string = "R16G16B16A16_FLOAT")]
    R16G16B16A16Float = 10,
    #[strum(to_string = "R16G16B16A16_UNORM")]
    R16G16B16A16Unorm = 11,
    #[strum(to_string = "R16G16B16A16_UINT")]
    R16G16B16A16Uint = 12,
    #[strum(to_string = "R16G16B16A16_SNORM")]
    R16G16B16A16Snorm = 13,
    #[strum(to_string = "R16G16B16A16_SINT")]
    R16G16B16A16Sint = 14,
    #[strum(to_string = "R32G32_TYPELESS")]
    R32G32Typeless = 15,
    #[strum(to_string = "R32G32_FLOAT")]
    R32G32Float = 16,
    #[strum(to_string = "R32G32_UINT")]
    R32G32Uint = 17,
    #[strum(to_string = "R32G32_SINT")]
    R32G32Sint = 18,
    #[strum(to_string = "R32G8X24_TYPELESS")]
    R32G8X24Typeless = 19,
    #[strum(to_string = "D32_FLOAT_S8X24_UINT")]
    D32FloatS8X24Uint = 20,
    #[strum(to_string = "R32_FLOAT_X8X24_TYPELESS")]
    R32FloatX8X24Typeless = 21,
    #[strum(to_string = "X32_TYPELESS_G8X24_UINT")]
    X32TypelessG8X24Uint = 22,
    #[strum(to_string = "R10G10B10A2_TYPELESS")]
    R10G10B10A2Typeless = 23,
    #[strum(to_string = "R10G10B10A2_UNORM")]
    R10G10B10A2Unorm = 24,
    #[strum(to_string = "R10G10B10A2_UINT")]
    R10G10B10A2Uint = 25,
    #[strum(to_string = "R11G11B10_FLOAT")]
    R11G11B10Float = 26,
    #[strum(to_string = "R8G8B8A8_TYPELESS")]
    R8G8B8A8Typeless = 27,
    #[strum(to_string = "R8G8B8A8_UNORM")]
    R8G8B8A8Unorm = 28,
    #[strum(to_string = "R8G8B8A8_UNORM_SRGB")]
    R8G8B8A8UnormSrgb = 29,
    #[strum(to_string = "R8G8B8A8_UINT")]
    R8G8B8A8Uint = 30,
    #[strum(to_string = "R8G8B8A8_SNORM")]
    R8G8B8A8Snorm = 31,
    #[strum(to_string = "R8G8B8A8_SINT")]
    R8G8B8A8Sint = 32,
    #[strum(to_string = "R16G16_TYPELESS")]
    R16G16Typeless = 33,
    #[strum(to_string = "R16G16_FLOAT")]
    R16G16Float = 34,
    #[strum(to_string = "R16G16_UNORM")]
    R16G16Unorm = 35,
    #[strum(to_string = "R16G16_UINT")]
    R16G16Uint = 36,
    #[strum(to_string = "R16G16_SNORM")]
    R16G16Snorm = 37,
    #[strum(to_string = "R16G16_SINT")]
    R16G16Sint = 38,
    #[strum(to_string = "R32_TYPELESS")]
    R32Typeless = 39,
    #[strum(to_string = "D32_FLOAT")]
    D32Float = 40,
    #[strum(to_string = "R32_FLOAT")]
    R32Float = 41,
    #[strum(to_string = "R32_UINT")]
    R32Uint = 42,
    #[strum(to_string = "R32_SINT")]
    R32Sint = 43,
    #[strum(to_string = "R24G8_TYPELESS")]
    R24G8Typeless = 44,
    #[strum(to_string = "D24_UNORM_S8_UINT")]
    D24UnormS8Uint = 45,
    #[strum(to_string = "R24_UNORM_X8_TYPELESS")]
    R24UnormX8Typeless = 46,
    #[strum(to_string = "X24_TYPELESS_G8_UINT")]
    X24TypelessG8Uint = 47,
    #[strum(to_string = "R8G8_TYPELESS")]
    R8G8Typeless = 48,
    #[strum(to_string = "R8G8_UNORM")]
    R8G8Unorm = 49,
    #[strum(to_string = "R8G8_UINT")]
    R8G8Uint = 50,
    #[strum(to_string = "R8G8_SNORM")]
    R8G8Snorm = 51,
    #[strum(to_string = "R8G8_SINT")]
    R8G8Sint = 52,
    #[strum(to_string = "R16_TYPELESS")]
    R16Typeless = 53,
    #[strum(to_string = "R16_FLOAT")]
    R16Float = 54,
    #[strum(to_string = "D16_UNORM")]
    D16Unorm = 55,
    #[strum(to_string = "R16_UNORM")]
    R16Unorm = 56,
    #[strum(to_string = "R16_UINT")]
    R16Uint = 57,
    #[strum(to_string = "R16_SNORM")]
    R16Snorm = 58,
    #[strum(to_string = "R16_SINT")]
    R16Sint = 59,
    #[strum(to_string = "R8_TYPELESS")]
    R8Typeless = 60,
    #[strum(to_string = "R8_UNORM")]
    R8Unorm = 61,
    #[strum(to_string = "R8_UINT")]
    R8Uint = 62,
    #[strum(to_string = "R8_SNORM")]
    R8Snorm = 63,
    #[strum(to_string = "R8_SINT")]
    R8Sint = 64,
    #[strum(to_string = "A8_UNORM")]
    A8Unorm = 65,
    #[strum(to_string = "R1_UNORM")]
    R1Unorm = 66,
    #[strum(to_string = "R9G9B9E5_SHAREDEXP")]
    R9G9B9E5Sharedexp = 67,
    #[strum(to_string = "R8G8_B8G8_UNORM")]
    R8G8B8G8Unorm = 68,
    #[strum(to_string = "G8R8_G8B8_UNORM")]
    G8R8G8B8Unorm = 69,
    #[strum(to_string = "BC1_TYPELESS")]
    BC1Typeless = 70,
    #[strum(to_string = "BC1_UNORM")]
    BC1Unorm = 71,
    #[strum(to_string = "BC1_UNORM_SRGB")]
    BC1UnormSrgb = 72,
    #[strum(to_string = "BC2_TYPELESS")]
    BC2Typeless = 73,
    #[strum(to_string = "BC2_UNORM")]
    BC2Unorm = 74,
    #[strum(to_string = "BC2_UNORM_SRGB")]
    BC2UnormSrgb = 75,
    #[strum(to_string = "BC3_TYPELESS")]
    BC3Typeless = 76,
    #[strum(to_string = "BC3_UNORM")]
    BC3Unorm = 77,
    #[strum(to_string = "BC3_UNORM_SRGB")]
    BC3UnormSrgb = 78,
    #[strum(to_string = "BC4_TYPELESS")]
    BC4Typeless = 79,
    #[strum(to_string = "BC4_UNORM")]
    BC4Unorm = 80,
    #[strum(to_string = "BC4_SNORM")]
    BC4Snorm = 81,
    #[strum(to_string = "BC5_TYPELESS")]
    BC5Typeless = 82,
    #[strum(to_string = "BC5_UNORM")]
    BC5Unorm = 83,
    #[strum(to_string = "BC5_SNORM")]
    BC5Snorm = 84,
    #[strum(to_string = "B5G6R5_UNORM")]
    B5G6R5Unorm = 85,
    #[strum(to_string = "B5G5R5A1_UNORM")]
    B5G5R5A1Unorm = 86,
    #[strum(to_string = "B8G8R8A8_UNORM")]
    B8G8R8A8Unorm = 87,
    #[strum(to_string = "B8G8R8X8_UNORM")]
    B8G8R8X8Unorm = 88,
    #[strum(to_string = "R10G10B10_XR_BIAS_A2_UNORM")]
    R10G10B10XrBiasA2Unorm = 89,
    #[strum(to_string = "B8G8R8A8_TYPELESS")]
    B8G8R8A8Typeless = 90,
    #[strum(to_string = "B8G8R8A8_UNORM_SRGB")]
    B8G8R8A8UnormSrgb = 91,
    #[strum(to_string = "B8G8R8X8_TYPELESS")]
    B8G8R8X8Typeless = 92,
    #[strum(to_string = "B8G8R8X8_UNORM_SRGB")]
    B8G8R8X8UnormSrgb = 93,
    #[strum(to_string = "BC6H_TYPELESS")]
    BC6HTypeless = 94,
    #[strum(to_string = "BC6H_UF16")]
    BC6HUf16 = 95,
    #[strum(to_string = "BC6H_SF16")]
    BC6HSf16 = 96,
    #[strum(to_string = "BC7_TYPELESS")]
    BC7Typeless = 97,
    #[strum(to_string = "BC7_UNORM")]
    BC7Unorm = 98,
    #[strum(to_string = "BC7_UNORM_SRGB")]
    BC7UnormSrgb = 99,
    #[strum(to_string = "AYUV")]
    Ayuv = 100,
    #[strum(to_string = "Y410")]
    Y410 = 101,
    #[strum(to_string = "Y416")]
    Y416 = 102,
    #[strum(to_string = "NV12")]
    Nv12 = 103,
    #[strum(to_string = "P010")]
    P010 = 104,
    #[strum(to_string = "P016")]
    P016 = 105,
    #[strum(to_string = "420_OPAQUE")]
    Opaque420 = 106,
    #[strum(to_string = "YUY2")]
    Yuy2 = 107,
    #[strum(to_string = "Y210")]
    Y210 = 108,
    #[strum(to_string = "Y216")]
    Y216 = 109,
    #[strum(to_string = "NV11")]
    Nv11 = 110,
    #[strum(to_string = "AI44")]
    Ai44 = 111,
    #[strum(to_string = "IA44")]
    Ia44 = 112,
    #[strum(to_string = "P8")]
    P8 = 113,
    #[strum(to_string = "A8P8")]
    A8P8 = 114,
    #[strum(to_string = "B4G4R4A4_UNORM")]
    B4G4R4A4Unorm = 115,
}

impl DxgiFormat {
    /// The bits per pixel for uncompressed formats or `0` for block compressed formats.
    ///
    /// Planar and subsampled video formats report the average over a full image,
    /// so `NV12` uses 12 bits per pixel.
    pub fn bits_per_pixel(self) -> u32 {
        use DxgiFormat as F;
        match self {
            F::R32G32B32A32Typeless
            | F::R32G32B32A32Float
            | F::R32G32B32A32Uint
            | F::R32G32B32A32Sint => 128,

            F::R32G32B32Typeless | F::R32G32B32Float | F::R32G32B32Uint | F::R32G32B32Sint => 96,

            F::R16G16B16A16Typeless
            | F::R16G16B16A16Float
            | F::R16G16B16A16Unorm
            | F::R16G16B16A16Uint
            | F::R16G16B16A16Snorm
            | F::R16G16B16A16Sint
            | F::R32G32Typeless
            | F::R32G32Float
            | F::R32G32Uint
            | F::R32G32Sint
            | F::R32G8X24Typeless
            | F::D32FloatS8X24Uint
            | F::R32FloatX8X24Typeless
            | F::X32TypelessG8X24Uint
            | F::Y416 => 64,

            F::R10G10B10A2Typeless
            | F::R10G10B10A2Unorm
            | F::R10G10B10A2Uint
            | F::R11G11B10Float
            | F::R8G8B8A8Typeless
            | F::R8G8B8A8Unorm
            | F::R8G8B8A8UnormSrgb
            | F::R8G8B8A8Uint
            | F::R8G8B8A8Snorm
            | F::R8G8B8A8Sint
            | F::R16G16Typeless
            | F::R16G16Float
            | F::R16G16Unorm
            | F::R16G16Uint
            | F::R16G16Snorm
            | F::R16G16Sint
            | F::R32Typeless
            | F::D32Float
            | F::R32Float
            | F::R32Uint
            | F::R32Sint
            | F::R24G8Typeless
            | F::D24UnormS8Uint
            | F::R24UnormX8Typeless
            | F::X24TypelessG8Uint
            | F::R9G9B9E5Sharedexp
            | F::R8G8B8G8Unorm
            | F::G8R8G8B8Unorm
            | F::B8G8R8A8Unorm
            | F::B8G8R8X8Unorm
            | F::R10G10B10XrBiasA2Unorm
            | F::B8G8R8A8Typeless
            | F::B8G8R8A8UnormSrgb
            | F::B8G8R8X8Typeless
            | F::B8G8R8X8UnormSrgb
            | F::Ayuv
            | F::Y410
            | F::Y210
            | F::Y216 => 32,

            F::P010 | F::P016 => 24,

            F::R8G8Typeless
            | F::R8G8Unorm
            | F::R8G8Uint
            | F::R8G8Snorm
            | F::R8G8Sint
            | F::R16Typeless
            | F::R16Float
            | F::D16Unorm
            | F::R16Unorm
            | F::R16Uint
            | F::R16Snorm
            | F::R16Sint
            | F::B5G6R5Unorm
            | F::B5G5R5A1Unorm
            | F::B4G4R4A4Unorm
            | F::Yuy2
            | F::A8P8 => 16,

            F::Nv12 | F::Opaque420 | F::Nv11 => 12,

            F::R8Typeless
            | F::R8Unorm
            | F::R8Uint
            | F::R8Snorm
            | F::R8Sint
            | F::A8Unorm
            | F::Ai44
            | F::Ia44
            | F::P8 => 8,

            F::R1Unorm => 1,

            F::Unknown
            | F::BC1Typeless
            | F::BC1Unorm
            | F::BC1UnormSrgb
            | F::BC2Typeless
            | F::BC2Unorm
            | F::BC2UnormSrgb
            | F::BC3Typeless
            | F::BC3Unorm
            | F::BC3UnormSrgb
            | F::BC4Typeless
            | F::BC4Unorm
            | F::BC4Snorm
            | F::BC5Typeless
            | F::BC5Unorm
            | F::BC5Snorm
            | F::BC6HTypeless
            | F::BC6HUf16
            | F::BC6HSf16
            | F::BC7Typeless
            | F::BC7Unorm
            | F::BC7UnormSrgb => 0,
        }
    }

    /// The size of a 4x4 block in bytes for block compressed formats or `0` otherwise.
    pub fn block_bytes(self) -> u32 {
        use DxgiFormat as F;
        match self {
            F::BC1Typeless
            | F::BC1Unorm
            | F::BC1UnormSrgb
            | F::BC4Typeless
            | F::BC4Unorm
            | F::BC4Snorm => 8,

            F::BC2Typeless
            | F::BC2Unorm
            | F::BC2UnormSrgb
            | F::BC3Typeless
            | F::BC3Unorm
            | F::BC3UnormSrgb
            | F::BC5Typeless
            | F::BC5Unorm
            | F::BC5Snorm
            | F::BC6HTypeless
            | F::BC6HUf16
            | F::BC6HSf16
            | F::BC7Typeless
            | F::BC7Unorm
            | F::BC7UnormSrgb => 16,

            _ => 0,
        }
    }

    /// Returns `true` for the BC1 to BC7 formats stored as 4x4 pixel blocks.
    pub fn is_block_compressed(self) -> bool {
        self.block_bytes() > 0
    }

    /// Returns `true` for the 4:2:2 formats that pack two pixels into four bytes.
    pub fn is_packed(self) -> bool {
        matches!(self, DxgiFormat::R8G8B8G8Unorm | DxgiFormat::G8R8G8B8Unorm)
    }

    /// Returns `true` for video formats with separate luma and chroma planes.
    pub fn is_planar(self) -> bool {
        use DxgiFormat as F;
        matches!(self, F::Nv12 | F::P010 | F::P016 | F::Opaque420 | F::Nv11)
    }

    /// The pixel format descriptor a pre-DXT10 reader expects for this format.
    ///
    /// Formats without a unique legacy representation use the `DX10` four character code.
    /// [DxgiFormat::Unknown] maps to an all zero descriptor.
    pub fn legacy_pixel_format(self) -> LegacyPixelFormat {
        use DxgiFormat as F;
        use LegacyPixelFormat as L;
        use PixelFormatFlags as P;

        // Masks follow the values written by D3DX.
        // This swaps red and blue for 10:10:10:2 like most existing readers expect.
        match self {
            F::Unknown => L::default(),
            F::R8G8B8A8Unorm => L::masks(P::RGBA, 32, 0xff, 0xff00, 0xff0000, 0xff000000),
            F::B8G8R8A8Unorm => L::masks(P::RGBA, 32, 0xff0000, 0xff00, 0xff, 0xff000000),
            F::B8G8R8X8Unorm => L::masks(P::RGB, 32, 0xff0000, 0xff00, 0xff, 0),
            F::R10G10B10A2Unorm => {
                L::masks(P::RGBA, 32, 0x3ff00000, 0xffc00, 0x3ff, 0xc0000000)
            }
            F::R16G16Unorm => L::masks(P::RGB, 32, 0xffff, 0xffff0000, 0, 0),
            F::B5G6R5Unorm => L::masks(P::RGB, 16, 0xf800, 0x07e0, 0x001f, 0),
            F::B5G5R5A1Unorm => L::masks(P::RGBA, 16, 0x7c00, 0x03e0, 0x001f, 0x8000),
            F::B4G4R4A4Unorm => L::masks(P::RGBA, 16, 0x0f00, 0x00f0, 0x000f, 0xf000),
            F::R8Unorm => L::masks(P::LUMINANCE, 8, 0xff, 0, 0, 0),
            F::R16Unorm => L::masks(P::LUMINANCE, 16, 0xffff, 0, 0, 0),
            F::R8G8Unorm => L::masks(P::LUMINANCE_ALPHA, 16, 0xff, 0, 0, 0xff00),
            F::A8Unorm => L::masks(P::ALPHA, 8, 0, 0, 0, 0xff),
            F::R8G8Snorm => L::masks(P::BUMPDUDV, 16, 0xff, 0xff00, 0, 0),
            F::R16G16Snorm => L::masks(P::BUMPDUDV, 32, 0xffff, 0xffff0000, 0, 0),
            F::R8G8B8A8Snorm => {
                L::masks(P::BUMPDUDV, 32, 0xff, 0xff00, 0xff0000, 0xff000000)
            }
            F::BC1Unorm => L::four_cc(FourCC::DXT1),
            F::BC2Unorm => L::four_cc(FourCC::DXT3),
            F::BC3Unorm => L::four_cc(FourCC::DXT5),
            F::BC4Unorm => L::four_cc(FourCC::BC4U),
            F::BC4Snorm => L::four_cc(FourCC::BC4S),
            F::BC5Unorm => L::four_cc(FourCC::BC5U),
            F::BC5Snorm => L::four_cc(FourCC::BC5S),
            F::R8G8B8G8Unorm => L::four_cc(FourCC::RGBG),
            F::G8R8G8B8Unorm => L::four_cc(FourCC::GRGB),
            F::Yuy2 => L::four_cc(FourCC::YUY2),
            // D3DFMT values stored directly in the four character code.
            F::R16G16B16A16Unorm => L::four_cc(FourCC(36)),
            F::R16G16B16A16Snorm => L::four_cc(FourCC(110)),
            F::R16Float => L::four_cc(FourCC(111)),
            F::R16G16Float => L::four_cc(FourCC(112)),
            F::R16G16B16A16Float => L::four_cc(FourCC(113)),
            F::R32Float => L::four_cc(FourCC(114)),
            F::R32G32Float => L::four_cc(FourCC(115)),
            F::R32G32B32A32Float => L::four_cc(FourCC(116)),
            _ => L::DX10,
        }
    }
}

/// The pixel format fields of the base DDS header.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct LegacyPixelFormat {
    pub flags: PixelFormatFlags,
    pub four_cc: FourCC,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl LegacyPixelFormat {
    /// The descriptor announcing that a DXT10 extended header follows.
    pub const DX10: Self = Self::four_cc(FourCC::DX10);

    const fn four_cc(four_cc: FourCC) -> Self {
        Self {
            flags: PixelFormatFlags::FOURCC,
            four_cc,
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        }
    }

    const fn masks(flags: PixelFormatFlags, bits: u32, r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            flags,
            four_cc: FourCC(0),
            rgb_bit_count: bits,
            r_bit_mask: r,
            g_bit_mask: g,
            b_bit_mask: b,
            a_bit_mask: a,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn format_count() {
        assert_eq!(116, DxgiFormat::iter().count());
        assert_eq!(
            Some(DxgiFormat::B4G4R4A4Unorm),
            DxgiFormat::from_repr(115)
        );
        assert_eq!(None, DxgiFormat::from_repr(116));
    }

    #[test]
    fn format_discriminants() {
        assert_eq!(28, DxgiFormat::R8G8B8A8Unorm as u32);
        assert_eq!(61, DxgiFormat::R8Unorm as u32);
        assert_eq!(77, DxgiFormat::BC3Unorm as u32);
        assert_eq!(98, DxgiFormat::BC7Unorm as u32);
    }

    #[test]
    fn uncompressed_or_block_compressed() {
        // Every known format has exactly one of the two size descriptions.
        for format in DxgiFormat::iter().filter(|f| *f != DxgiFormat::Unknown) {
            assert!(
                (format.bits_per_pixel() > 0) != (format.block_bytes() > 0),
                "{format}"
            );
        }
    }

    #[test]
    fn unknown_format_is_zero() {
        let format = DxgiFormat::Unknown;
        assert_eq!(0, format.bits_per_pixel());
        assert_eq!(0, format.block_bytes());
        assert!(!format.is_block_compressed());
        assert_eq!(LegacyPixelFormat::default(), format.legacy_pixel_format());
    }

    #[test]
    fn block_compressed_sizes() {
        assert_eq!(8, DxgiFormat::BC1UnormSrgb.block_bytes());
        assert_eq!(16, DxgiFormat::BC3Unorm.block_bytes());
        assert_eq!(8, DxgiFormat::BC4Snorm.block_bytes());
        assert_eq!(16, DxgiFormat::BC6HUf16.block_bytes());
        assert!(DxgiFormat::BC7Typeless.is_block_compressed());
        assert!(!DxgiFormat::R8G8B8A8Unorm.is_block_compressed());
        assert_eq!(0, DxgiFormat::BC7Unorm.bits_per_pixel());
    }

    #[test]
    fn packed_and_planar() {
        assert!(DxgiFormat::R8G8B8G8Unorm.is_packed());
        assert!(DxgiFormat::G8R8G8B8Unorm.is_packed());
        assert!(!DxgiFormat::Yuy2.is_packed());
        assert!(DxgiFormat::Nv12.is_planar());
        assert!(!DxgiFormat::Ayuv.is_planar());
        assert_eq!(12, DxgiFormat::Nv12.bits_per_pixel());
    }

    #[test]
    fn parse_format_names() {
        assert_eq!(
            DxgiFormat::R8G8B8A8UnormSrgb,
            DxgiFormat::from_str("R8G8B8A8_UNORM_SRGB").unwrap()
        );
        assert_eq!(
            DxgiFormat::BC3Unorm,
            DxgiFormat::from_str("bc3_unorm").unwrap()
        );
        assert_eq!(DxgiFormat::Opaque420, DxgiFormat::from_str("420_OPAQUE").unwrap());
        assert!(DxgiFormat::from_str("R8G8B8_UNORM").is_err());
    }

    #[test]
    fn display_format_names() {
        assert_eq!("BC6H_UF16", DxgiFormat::BC6HUf16.to_string());
        assert_eq!("R8G8_B8G8_UNORM", DxgiFormat::R8G8B8G8Unorm.to_string());
    }

    #[test]
    fn legacy_rgba8() {
        assert_eq!(
            LegacyPixelFormat {
                flags: PixelFormatFlags::RGB | PixelFormatFlags::ALPHAPIXELS,
                four_cc: FourCC(0),
                rgb_bit_count: 32,
                r_bit_mask: 0xff,
                g_bit_mask: 0xff00,
                b_bit_mask: 0xff0000,
                a_bit_mask: 0xff000000,
            },
            DxgiFormat::R8G8B8A8Unorm.legacy_pixel_format()
        );
    }

    #[test]
    fn legacy_four_cc() {
        let pf = DxgiFormat::BC3Unorm.legacy_pixel_format();
        assert_eq!(PixelFormatFlags::FOURCC, pf.flags);
        assert_eq!(FourCC::DXT5, pf.four_cc);
        assert_eq!(0, pf.rgb_bit_count);

        assert_eq!(
            FourCC(113),
            DxgiFormat::R16G16B16A16Float.legacy_pixel_format().four_cc
        );
    }

    #[test]
    fn legacy_dx10_fallback() {
        assert_eq!(
            LegacyPixelFormat::DX10,
            DxgiFormat::BC7UnormSrgb.legacy_pixel_format()
        );
        assert_eq!(
            LegacyPixelFormat::DX10,
            DxgiFormat::R8G8B8A8UnormSrgb.legacy_pixel_format()
        );
        assert_eq!(
            LegacyPixelFormat::DX10,
            DxgiFormat::R32G32B32Float.legacy_pixel_format()
        );
    }
}
