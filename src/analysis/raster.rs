//! Read-only pixel grids used as the reference image for pattern extraction

use ndarray::Array2;

/// An RGBA color compared by exact byte equality
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel(pub [u8; 4]);

impl Pixel {
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Create a pixel from quantized channel bytes
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Create a pixel from unit-range channels
    ///
    /// Each channel is scaled by 255 and truncated, so values outside
    /// `0.0..=1.0` saturate at the byte bounds.
    pub fn from_unit_rgba(channels: [f32; 4]) -> Self {
        Self(channels.map(|c| (c * 255.0) as u8))
    }

    /// Red channel byte
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    /// Green channel byte
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue channel byte
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Alpha channel byte
    pub const fn a(self) -> u8 {
        self.0[3]
    }
}

/// Minimal read access the extractor needs from an image
pub trait RasterSource {
    /// Number of pixel columns
    fn width(&self) -> usize;

    /// Number of pixel rows
    fn height(&self) -> usize;

    /// Pixel at column `x`, row `y`, or `None` outside the raster
    fn get_pixel(&self, x: usize, y: usize) -> Option<Pixel>;
}

/// In-memory raster stored row-major as `(height, width)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pixels: Array2<Pixel>,
}

impl Raster {
    /// Wrap an existing `(height, width)` pixel array
    pub const fn from_array(pixels: Array2<Pixel>) -> Self {
        Self { pixels }
    }

    /// Build a raster from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels.len()` is not `width * height`
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Pixel>,
    ) -> crate::io::error::Result<Self> {
        let len = pixels.len();
        Array2::from_shape_vec((height, width), pixels)
            .map(Self::from_array)
            .map_err(|e| crate::io::error::ModelError::InvalidSourceData {
                reason: format!("{len} pixels cannot form a {width}x{height} raster: {e}"),
            })
    }

    /// Build a raster filled with a single color
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self::from_array(Array2::from_elem((height, width), pixel))
    }

    /// Underlying pixel array indexed by `(y, x)`
    pub const fn pixels(&self) -> &Array2<Pixel> {
        &self.pixels
    }
}

impl RasterSource for Raster {
    fn width(&self) -> usize {
        self.pixels.ncols()
    }

    fn height(&self) -> usize {
        self.pixels.nrows()
    }

    fn get_pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        self.pixels.get((y, x)).copied()
    }
}
