use anyhow::{Context, Result};
use image::GrayImage;
use log::debug;

use crate::grid::SampleGrid;

/// Load an image from disk as 8-bit grayscale and convert it into a
/// sample grid with intensities in [0, 255].
pub fn load_grayscale(path: &str) -> Result<SampleGrid> {
    let img = image::open(path)
        .with_context(|| format!("failed to read image '{}'", path))?
        .to_luma8();
    debug!("decoded '{}' as {}x{} grayscale", path, img.width(), img.height());
    grid_from_luma(&img)
}

pub fn grid_from_luma(img: &GrayImage) -> Result<SampleGrid> {
    let (width, height) = img.dimensions();
    let data = img.pixels().map(|p| p.0[0] as f32).collect();
    let grid = SampleGrid::new(height as usize, width as usize, data)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn luma_pixels_land_row_major() {
        let mut img = GrayImage::new(3, 2);
        img.put_pixel(2, 0, Luma([10]));
        img.put_pixel(0, 1, Luma([20]));
        let grid = grid_from_luma(&img).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.get(0, 2), 10.0);
        assert_eq!(grid.get(1, 0), 20.0);
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = GrayImage::new(0, 4);
        assert!(grid_from_luma(&img).is_err());
    }
}
