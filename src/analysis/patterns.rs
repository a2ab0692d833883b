//! Sliding-window pattern extraction from a reference raster
//!
//! Every valid window origin yields one N×N pattern sampled row-major, so
//! identical visual blocks produce identical pixel sequences regardless of
//! where in the raster they were found.

use crate::analysis::raster::{Pixel, RasterSource};

/// An N×N block of pixels stored row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    size: usize,
    pixels: Vec<Pixel>,
}

impl Pattern {
    /// Build a pattern from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels.len()` is not `size * size`
    pub fn from_pixels(size: usize, pixels: Vec<Pixel>) -> crate::io::error::Result<Self> {
        if pixels.len() != size * size {
            return Err(crate::io::error::invalid_parameter(
                "pixels",
                &pixels.len(),
                &format!("a {size}x{size} pattern needs {} pixels", size * size),
            ));
        }
        Ok(Self { size, pixels })
    }

    /// Side length of the pattern
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, `size * size`
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Row-major pixel sequence
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at cell index `i`
    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    /// Pixel at column `x`, row `y` within the pattern
    pub fn at(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.size {
            return None;
        }
        self.get(y * self.size + x)
    }
}

/// A pattern together with the window origin it was sampled from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSample {
    /// Top-left column of the window
    pub x: usize,
    /// Top-left row of the window
    pub y: usize,
    /// Sampled pixels
    pub pattern: Pattern,
}

/// Number of window origins along one axis
///
/// Origins run over `0..extent - size`, so the last `size` positions are never
/// window origins and an extent not larger than `size` yields none.
pub const fn window_origins(extent: usize, size: usize) -> usize {
    extent.saturating_sub(size)
}

/// Sample the window whose top-left corner is `(x, y)`
///
/// Returns `None` if any cell of the window lies outside the raster.
pub fn sample_window<R: RasterSource + ?Sized>(
    raster: &R,
    x: usize,
    y: usize,
    size: usize,
) -> Option<Pattern> {
    let mut pixels = Vec::with_capacity(size * size);
    for dy in 0..size {
        for dx in 0..size {
            pixels.push(raster.get_pixel(x + dx, y + dy)?);
        }
    }
    Some(Pattern { size, pixels })
}

/// Extract one pattern per window origin, in registry scan order
///
/// Scan order is column-major over origins (outer `x`, inner `y`). Order only
/// decides which duplicate is seen first, never the resulting tile set.
///
/// # Errors
///
/// Returns an error if `size` is zero
pub fn extract_patterns<R: RasterSource + ?Sized>(
    raster: &R,
    size: usize,
) -> crate::io::error::Result<Vec<PatternSample>> {
    if size == 0 {
        return Err(crate::io::error::invalid_parameter(
            "pattern_size",
            &size,
            &"must be at least 1",
        ));
    }

    let columns = window_origins(raster.width(), size);
    let rows = window_origins(raster.height(), size);

    let mut samples = Vec::with_capacity(columns * rows);
    for x in 0..columns {
        for y in 0..rows {
            if let Some(pattern) = sample_window(raster, x, y, size) {
                samples.push(PatternSample { x, y, pattern });
            }
        }
    }

    tracing::debug!(
        width = raster.width(),
        height = raster.height(),
        size,
        samples = samples.len(),
        "extracted patterns"
    );

    Ok(samples)
}
