//! Loading and resampling source rasters.
//!
//! The scheduler only depends on the [Decoder] and [Resampler] traits.
//! [ImageDecoder] and [ImageResampler] implement them with the `image` crate.
use std::{borrow::Cow, path::Path};

use image::{
    imageops::FilterType, DynamicImage, ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba,
};

use crate::{error::SourceError, DxgiFormat};

/// Decoded pixel data with one element per channel.
#[derive(Debug, PartialEq, Clone)]
pub enum Pixels {
    U8(Vec<u8>),
    F32(Vec<f32>),
}

/// The type of each channel element.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ElementType {
    U8,
    F32,
}

impl Pixels {
    /// The pixel data as it should be written to the file.
    ///
    /// Float data is always little endian and only copied on big endian targets.
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Pixels::U8(p) => Cow::Borrowed(p),
            Pixels::F32(p) if cfg!(target_endian = "little") => {
                Cow::Borrowed(bytemuck::cast_slice(p))
            }
            Pixels::F32(p) => Cow::Owned(p.iter().flat_map(|f| f.to_le_bytes()).collect()),
        }
    }

    /// The number of channel elements.
    pub fn len(&self) -> usize {
        match self {
            Pixels::U8(p) => p.len(),
            Pixels::F32(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Pixels::U8(_) => ElementType::U8,
            Pixels::F32(_) => ElementType::F32,
        }
    }
}

/// A decoded source image.
#[derive(Debug, PartialEq, Clone)]
pub struct RawImage {
    pub pixels: Pixels,
    pub width: u32,
    pub height: u32,
    /// The number of channels in the source file.
    ///
    /// 8-bit RGB data is stored with an additional opaque alpha channel,
    /// so use [RawImage::pixel_channels] for the layout of [RawImage::pixels].
    pub channel_count: u32,
    pub inferred_format: DxgiFormat,
}

impl RawImage {
    /// Create an image with the format inferred from the channel count and element type.
    ///
    /// Tightly packed 8-bit RGB data is widened to RGBA with opaque alpha.
    pub fn new(width: u32, height: u32, channel_count: u32, pixels: Pixels) -> Self {
        let pixels = match pixels {
            Pixels::U8(data)
                if channel_count == 3
                    && data.len() == width as usize * height as usize * 3 =>
            {
                Pixels::U8(
                    data.chunks_exact(3)
                        .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
                        .collect(),
                )
            }
            pixels => pixels,
        };
        let inferred_format = infer_format(channel_count, pixels.element_type());
        Self {
            pixels,
            width,
            height,
            channel_count,
            inferred_format,
        }
    }

    /// Create an image containing data already stored as `format` such as block compressed data.
    pub fn with_format(width: u32, height: u32, format: DxgiFormat, data: Vec<u8>) -> Self {
        Self {
            pixels: Pixels::U8(data),
            width,
            height,
            channel_count: 4,
            inferred_format: format,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.pixels.element_type()
    }

    /// The number of channel elements stored for each pixel.
    pub fn pixel_channels(&self) -> u32 {
        match (self.channel_count, self.element_type()) {
            (3, ElementType::U8) => 4,
            (c, _) => c,
        }
    }
}

/// The default format for a decoded image.
///
/// There is no 24-bit DXGI format, so 3-channel 8-bit data uses RGBA.
pub fn infer_format(channel_count: u32, element_type: ElementType) -> DxgiFormat {
    match (channel_count, element_type) {
        (1, ElementType::U8) => DxgiFormat::R8Unorm,
        (2, ElementType::U8) => DxgiFormat::R8G8Unorm,
        (3 | 4, ElementType::U8) => DxgiFormat::R8G8B8A8Unorm,
        (1, ElementType::F32) => DxgiFormat::R32Float,
        (2, ElementType::F32) => DxgiFormat::R32G32Float,
        (3, ElementType::F32) => DxgiFormat::R32G32B32Float,
        (4, ElementType::F32) => DxgiFormat::R32G32B32A32Float,
        _ => DxgiFormat::Unknown,
    }
}

/// Loads a source file into memory.
pub trait Decoder {
    fn decode(&mut self, path: &Path) -> Result<RawImage, SourceError>;
}

/// Resizes images while preserving the channel count and element type.
pub trait Resampler {
    fn resample(
        &mut self,
        image: &RawImage,
        width: u32,
        height: u32,
    ) -> Result<Pixels, SourceError>;
}

/// A [Decoder] for any file format supported by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl Decoder for ImageDecoder {
    fn decode(&mut self, path: &Path) -> Result<RawImage, SourceError> {
        let image = image::open(path).map_err(|e| SourceError::Decode {
            path: path.to_owned(),
            source: Box::new(e),
        })?;
        Ok(raw_image_from_dynamic(image))
    }
}

/// Convert a decoded image to 8-bit or 32-bit float channels.
///
/// 16-bit integer images are reduced to 8 bits.
pub fn raw_image_from_dynamic(image: DynamicImage) -> RawImage {
    let (width, height) = (image.width(), image.height());
    let (channel_count, pixels) = match image {
        DynamicImage::ImageLuma8(i) => (1, Pixels::U8(i.into_raw())),
        DynamicImage::ImageLumaA8(i) => (2, Pixels::U8(i.into_raw())),
        DynamicImage::ImageRgb8(i) => (3, Pixels::U8(i.into_raw())),
        DynamicImage::ImageRgba8(i) => (4, Pixels::U8(i.into_raw())),
        DynamicImage::ImageLuma16(i) => (
            1,
            Pixels::U8(DynamicImage::ImageLuma16(i).into_luma8().into_raw()),
        ),
        DynamicImage::ImageLumaA16(i) => (
            2,
            Pixels::U8(DynamicImage::ImageLumaA16(i).into_luma_alpha8().into_raw()),
        ),
        DynamicImage::ImageRgb16(i) => (
            3,
            Pixels::U8(DynamicImage::ImageRgb16(i).into_rgb8().into_raw()),
        ),
        DynamicImage::ImageRgb32F(i) => (3, Pixels::F32(i.into_raw())),
        DynamicImage::ImageRgba32F(i) => (4, Pixels::F32(i.into_raw())),
        other => (4, Pixels::U8(other.into_rgba8().into_raw())),
    };
    RawImage::new(width, height, channel_count, pixels)
}

/// A [Resampler] using triangle filtering from the `image` crate.
///
/// 8-bit color channels are filtered in linear light.
/// Float data is scaled into the unit range for filtering and scaled back afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ImageResampler {
    pub filter: FilterType,
}

impl Default for ImageResampler {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl Resampler for ImageResampler {
    fn resample(
        &mut self,
        image: &RawImage,
        width: u32,
        height: u32,
    ) -> Result<Pixels, SourceError> {
        if image.inferred_format.is_block_compressed() {
            return Err(SourceError::UnsupportedResample {
                format: image.inferred_format,
            });
        }

        let channels = image.pixel_channels();
        if !(1..=4).contains(&channels) {
            return Err(SourceError::UnsupportedResample {
                format: image.inferred_format,
            });
        }

        let expected = image.width as usize * image.height as usize * channels as usize;
        if image.pixels.len() != expected {
            return Err(SourceError::PixelCountMismatch {
                width: image.width,
                height: image.height,
                channels,
                expected,
                actual: image.pixels.len(),
            });
        }

        let channels = channels as usize;
        let has_alpha = channels == 2 || channels == 4;
        let is_alpha = |i: usize| has_alpha && i % channels == channels - 1;

        let output_len = width as usize * height as usize * channels;

        match &image.pixels {
            Pixels::U8(data) => {
                let mut linear = try_alloc(data.len())?;
                linear.extend(data.iter().enumerate().map(|(i, v)| {
                    let v = *v as f32 / 255.0;
                    if is_alpha(i) {
                        v
                    } else {
                        srgb_to_linear(v)
                    }
                }));

                let resized = resize(
                    linear,
                    image.width,
                    image.height,
                    channels,
                    width,
                    height,
                    self.filter,
                )?;

                let mut output = try_alloc(output_len)?;
                output.extend(resized.iter().enumerate().map(|(i, v)| {
                    let v = if is_alpha(i) { *v } else { linear_to_srgb(*v) };
                    (v.clamp(0.0, 1.0) * 255.0).round() as u8
                }));
                Ok(Pixels::U8(output))
            }
            Pixels::F32(data) => {
                // Filtering clamps to the unit range, so normalize to preserve HDR values.
                let (min, max) = data
                    .iter()
                    .filter(|v| v.is_finite())
                    .fold((0.0f32, 1.0f32), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
                let scale = max - min;

                let mut normalized = try_alloc(data.len())?;
                normalized.extend(data.iter().map(|v| (v - min) / scale));

                let mut resized = resize(
                    normalized,
                    image.width,
                    image.height,
                    channels,
                    width,
                    height,
                    self.filter,
                )?;
                for v in &mut resized {
                    *v = *v * scale + min;
                }
                Ok(Pixels::F32(resized))
            }
        }
    }
}

fn resize(
    data: Vec<f32>,
    width: u32,
    height: u32,
    channels: usize,
    new_width: u32,
    new_height: u32,
    filter: FilterType,
) -> Result<Vec<f32>, SourceError> {
    // The image crate does not report allocation failures.
    let bytes = (new_width as usize)
        .checked_mul(new_height as usize)
        .and_then(|n| n.checked_mul(channels * std::mem::size_of::<f32>()))
        .filter(|n| *n <= isize::MAX as usize)
        .ok_or(SourceError::Allocation { bytes: usize::MAX })?;

    let resized = match channels {
        1 => resize_buffer::<Luma<f32>>(data, width, height, new_width, new_height, filter),
        2 => resize_buffer::<LumaA<f32>>(data, width, height, new_width, new_height, filter),
        3 => resize_buffer::<Rgb<f32>>(data, width, height, new_width, new_height, filter),
        _ => resize_buffer::<Rgba<f32>>(data, width, height, new_width, new_height, filter),
    };
    resized.ok_or(SourceError::Allocation { bytes })
}

fn resize_buffer<P>(
    data: Vec<f32>,
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
    filter: FilterType,
) -> Option<Vec<f32>>
where
    P: Pixel<Subpixel = f32> + 'static,
{
    let buffer: ImageBuffer<P, Vec<f32>> = ImageBuffer::from_raw(width, height, data)?;
    Some(image::imageops::resize(&buffer, new_width, new_height, filter).into_raw())
}

fn try_alloc<T>(len: usize) -> Result<Vec<T>, SourceError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| SourceError::Allocation {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    Ok(v)
}

fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f32) -> f32 {
    if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}
