//! Pitch and size calculations for the surfaces of a DDS file.
//!
//! All functions are total and never panic for any input.
//! Sizes that do not fit in a [usize] saturate.
use crate::DxgiFormat;

// Every block compressed DXGI format uses 4x4 blocks.
const BLOCK_DIMENSION: u32 = 4;

/// The dimension of mip level `level` for a base dimension of `base`.
pub fn level_dimension(base: u32, level: u32) -> u32 {
    base.checked_shr(level).unwrap_or(0).max(1)
}

/// The physical dimension of a surface, which is a whole number of blocks for block compressed formats.
pub fn image_dimension(format: DxgiFormat, dimension: u32) -> u32 {
    if format.is_block_compressed() {
        let blocks = div_round_up(dimension as usize, BLOCK_DIMENSION as usize);
        u32::try_from(blocks * BLOCK_DIMENSION as usize)
            .unwrap_or(u32::MAX)
            .max(1)
    } else {
        dimension.max(1)
    }
}

/// The number of bytes in a row of pixels or a row of blocks for block compressed formats.
pub fn pitch(format: DxgiFormat, width: u32) -> usize {
    let width = width as usize;
    if format.is_block_compressed() {
        div_round_up(width, BLOCK_DIMENSION as usize)
            .max(1)
            .saturating_mul(format.block_bytes() as usize)
    } else if format.is_packed() {
        // Two pixels share each 4 byte group.
        div_round_up(width, 2).saturating_mul(4)
    } else {
        div_round_up(width.saturating_mul(format.bits_per_pixel() as usize), 8)
    }
}

/// The number of rows of pixels or rows of blocks for block compressed formats.
pub fn vertical_block_count(format: DxgiFormat, height: u32) -> usize {
    if format.is_block_compressed() {
        div_round_up(height as usize, BLOCK_DIMENSION as usize).max(1)
    } else {
        height as usize
    }
}

/// The size in bytes of a single `width` x `height` x `depth` mip level.
pub fn level_size(format: DxgiFormat, width: u32, height: u32, depth: u32) -> usize {
    pitch(format, width)
        .saturating_mul(vertical_block_count(format, height))
        .saturating_mul(depth as usize)
}

/// The smallest power of two greater than or equal to `value`.
///
/// Saturates at `2^31` for values that have no larger power of two in a [u32].
pub fn pow2_ge(value: u32) -> u32 {
    value
        .max(1)
        .checked_next_power_of_two()
        .unwrap_or(1 << (u32::BITS - 1))
}

/// The number of mip levels in a full chain down to 1x1.
pub fn max_mipmap_count(max_dimension: u32) -> u32 {
    // log2(x) + 1
    u32::BITS - max_dimension.leading_zeros()
}

/// The number of mip levels in a full chain for a `width` x `height` base level.
pub fn max_mip_levels(width: u32, height: u32) -> u32 {
    max_mipmap_count(width.max(height)).max(1)
}

pub(crate) fn div_round_up(x: usize, d: usize) -> usize {
    x.div_ceil(d)
}
