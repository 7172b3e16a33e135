use crate::{
    error::DdsError,
    header::Caps2,
    layout::level_size,
    DxgiFormat,
};

/// The faces of a cube map in the order they are stored.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// The face for the `index` of a source within its set of 6.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The `DDSCAPS2_CUBEMAP_*` bit for this face.
    pub fn caps2(&self) -> Caps2 {
        match self {
            CubeFace::PositiveX => Caps2::CUBEMAP_POSITIVEX,
            CubeFace::NegativeX => Caps2::CUBEMAP_NEGATIVEX,
            CubeFace::PositiveY => Caps2::CUBEMAP_POSITIVEY,
            CubeFace::NegativeY => Caps2::CUBEMAP_NEGATIVEY,
            CubeFace::PositiveZ => Caps2::CUBEMAP_POSITIVEZ,
            CubeFace::NegativeZ => Caps2::CUBEMAP_NEGATIVEZ,
        }
    }
}

/// A single 2D image or volume slice in the DDS payload.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Surface<'a> {
    pub array_index: u32,
    /// The cube face or [None] for textures that are not cube maps.
    pub face: Option<CubeFace>,
    pub mip_level: u32,
    /// The depth slice for volume textures and `0` otherwise.
    pub slice: u32,
    pub width: u32,
    pub height: u32,
    /// The depth of the mip level containing this surface.
    pub depth: u32,
    pub format: DxgiFormat,
    pub data: &'a [u8],
}

impl Surface<'_> {
    /// The number of bytes this surface occupies in the file.
    ///
    /// Volume textures emit one surface per slice, so this is the size of a single slice.
    pub fn expected_size(&self) -> usize {
        level_size(self.format, self.width, self.height, 1)
    }
}

/// A destination for the surfaces of a DDS file in the order they are stored.
pub trait SurfaceSink {
    fn write_surface(&mut self, surface: &Surface<'_>) -> Result<(), DdsError>;
}

impl<S: SurfaceSink + ?Sized> SurfaceSink for &mut S {
    fn write_surface(&mut self, surface: &Surface<'_>) -> Result<(), DdsError> {
        (**self).write_surface(surface)
    }
}
