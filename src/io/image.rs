//! Raster loading and tile atlas export

use crate::analysis::raster::{Pixel, Raster};
use crate::io::configuration::{ATLAS_COLUMNS, ATLAS_GUTTER};
use crate::io::error::{ModelError, Result};
use crate::spatial::adjacency::TileModel;
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

/// Load an image file as an RGBA raster
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| ModelError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgba_img = img.to_rgba8();

    let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
    let mut pixels = Array2::from_elem((height, width), Pixel::TRANSPARENT);
    for (x, y, pixel) in rgba_img.enumerate_pixels() {
        if let Some(cell) = pixels.get_mut((y as usize, x as usize)) {
            *cell = Pixel(pixel.0);
        }
    }

    Ok(Raster::from_array(pixels))
}

/// Width and height in pixels of the atlas for `tile_count` tiles of side `size`
pub const fn atlas_dimensions(tile_count: usize, size: usize) -> (u32, u32) {
    if tile_count == 0 {
        return (0, 0);
    }
    let columns = if tile_count < ATLAS_COLUMNS {
        tile_count
    } else {
        ATLAS_COLUMNS
    };
    let rows = tile_count.div_ceil(ATLAS_COLUMNS);
    let stride = size as u32 + ATLAS_GUTTER;
    (
        columns as u32 * stride - ATLAS_GUTTER,
        rows as u32 * stride - ATLAS_GUTTER,
    )
}

/// Export every tile of the model as a PNG atlas
///
/// Tiles are drawn in registry order, left to right and wrapping after
/// [`ATLAS_COLUMNS`], separated by a transparent gutter.
///
/// # Errors
///
/// Returns an error if:
/// - The model holds no tiles
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tile_atlas(model: &TileModel, output_path: &Path) -> Result<()> {
    if model.is_empty() {
        return Err(ModelError::InvalidSourceData {
            reason: "No tiles were extracted from the source".to_string(),
        });
    }

    let size = model.pattern_size();
    let (width, height) = atlas_dimensions(model.len(), size);
    let stride = size as u32 + ATLAS_GUTTER;

    let mut img = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    for (index, tile) in model.tiles().iter().enumerate() {
        let origin_x = (index % ATLAS_COLUMNS) as u32 * stride;
        let origin_y = (index / ATLAS_COLUMNS) as u32 * stride;
        for y in 0..size {
            for x in 0..size {
                if let Some(pixel) = tile.pattern.at(x, y) {
                    img.put_pixel(origin_x + x as u32, origin_y + y as u32, Rgba(pixel.0));
                }
            }
        }
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ModelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| ModelError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
