//! Tests for raster loading and tile atlas export

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use motifstream::ModelError;
    use motifstream::analysis::raster::{Pixel, Raster, RasterSource};
    use motifstream::io::image::{atlas_dimensions, export_tile_atlas, load_raster};
    use motifstream::spatial::adjacency::build_model;

    const RED: Pixel = Pixel::rgba(255, 0, 0, 255);
    const CLEAR: Pixel = Pixel::rgba(0, 0, 255, 0);

    // Tests a saved PNG loads with its size and pixel positions intact
    // Verified by swapping x and y when copying pixels
    #[test]
    fn test_load_raster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");

        let mut img = RgbaImage::from_pixel(5, 4, Rgba([0, 0, 255, 0]));
        img.put_pixel(4, 1, Rgba(RED.0));
        img.save(&path).unwrap();

        let raster = load_raster(&path).unwrap();
        assert_eq!(raster.width(), 5);
        assert_eq!(raster.height(), 4);
        assert_eq!(raster.get_pixel(4, 1), Some(RED));
        assert_eq!(raster.get_pixel(1, 4), None);
        assert_eq!(raster.get_pixel(0, 0), Some(CLEAR));
    }

    // Tests missing files surface as load errors carrying the path
    // Verified by mapping load failures to FileSystem errors
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        match load_raster(&path) {
            Err(ModelError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => unreachable!("Expected ImageLoad error, got {other:?}"),
        }
    }

    // Tests atlas size wraps rows and leaves gutters only between tiles
    // Verified by adding a trailing gutter
    #[test]
    fn test_atlas_dimensions() {
        assert_eq!(atlas_dimensions(0, 3), (0, 0));
        assert_eq!(atlas_dimensions(1, 3), (3, 3));
        assert_eq!(atlas_dimensions(2, 3), (7, 3));
        assert_eq!(atlas_dimensions(16, 2), (47, 2));
        assert_eq!(atlas_dimensions(17, 2), (47, 5));
    }

    // Tests the atlas file is written with the tile pixels into new directories
    // Verified by skipping parent directory creation
    #[test]
    fn test_export_tile_atlas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("atlas.png");
        let model = build_model(&Raster::filled(4, 4, RED), 3).unwrap();
        assert_eq!(model.len(), 1);

        export_tile_atlas(&model, &path).unwrap();

        let written = image::open(&path).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (3, 3));
        assert!(written.pixels().all(|p| p.0 == RED.0));
    }

    // Tests exporting a model without tiles is rejected
    // Verified by writing an empty image instead
    #[test]
    fn test_export_empty_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.png");
        let model = build_model(&Raster::filled(3, 3, RED), 3).unwrap();

        assert!(model.is_empty());
        assert!(matches!(
            export_tile_atlas(&model, &path),
            Err(ModelError::InvalidSourceData { .. })
        ));
        assert!(!path.exists());
    }
}
