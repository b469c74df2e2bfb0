use anyhow::{Context, Result};
use image::GrayImage;

use crate::grid::SampleGrid;

/// Round a normalized grid into an 8-bit grayscale image. Values are
/// expected in [0, 255]; anything outside is clamped.
pub fn to_luma8(grid: &SampleGrid) -> GrayImage {
    let mut img = GrayImage::new(grid.width() as u32, grid.height() as u32);
    for (row, samples) in grid.as_slice().chunks_exact(grid.width()).enumerate() {
        for (col, &sample) in samples.iter().enumerate() {
            let value = sample.round().clamp(0.0, 255.0) as u8;
            img.put_pixel(col as u32, row as u32, image::Luma([value]));
        }
    }
    img
}

/// Write a normalized grid to disk as a grayscale image; the format is
/// picked from the file extension.
pub fn save(grid: &SampleGrid, path: &str) -> Result<()> {
    to_luma8(grid)
        .save(path)
        .with_context(|| format!("failed to write image '{}'", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_and_clamps_samples() {
        let grid = SampleGrid::new(1, 4, vec![-2.0, 0.4, 127.5, 300.0]).unwrap();
        let img = to_luma8(&grid);
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(1, 0).0[0], 0);
        assert_eq!(img.get_pixel(2, 0).0[0], 128);
        assert_eq!(img.get_pixel(3, 0).0[0], 255);
    }
}
