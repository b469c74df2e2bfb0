use rustfft::{num_complex::Complex, num_traits::Zero, FftDirection, FftPlanner};

use crate::grid::{ComplexGrid, GridError, SampleGrid};

/// Display range for normalized output grids, matching 8-bit grayscale.
pub const DISPLAY_MIN: f32 = 0.0;
pub const DISPLAY_MAX: f32 = 255.0;

/// Computes 2D DFT spectra and reconstructions of grayscale grids.
///
/// Both transform directions run unnormalized; the missing 1/(H*W) factor
/// of the inverse is absorbed by the min-max display normalization, so the
/// round trip reproduces the padded input up to rescaling.
///
/// The planner only caches FFT twiddle factors; the pipeline holds no
/// per-image state between calls.
pub struct SpectrumPipeline {
    planner: FftPlanner<f32>,
}

impl SpectrumPipeline {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Pad a grid with zero rows/columns at the bottom and right edges so
    /// each dimension becomes the smallest FFT-friendly size (a product of
    /// 2s, 3s and 5s) at least as large as the input.
    pub fn pad_for_transform(&self, grid: &SampleGrid) -> Result<SampleGrid, GridError> {
        let (height, width) = (grid.height(), grid.width());
        if height == 0 || width == 0 {
            return Err(GridError::InvalidInput { height, width });
        }

        let padded_height = optimal_fft_size(height);
        let padded_width = optimal_fft_size(width);
        if padded_height == height && padded_width == width {
            return Ok(grid.clone());
        }

        let mut data = vec![0.0f32; padded_height * padded_width];
        for (row, src) in grid.as_slice().chunks_exact(width).enumerate() {
            data[row * padded_width..row * padded_width + width].copy_from_slice(src);
        }
        Ok(SampleGrid::from_raw(padded_height, padded_width, data))
    }

    /// Treat the samples as the real plane of a complex grid and compute
    /// its 2D DFT. The input grid is left untouched.
    pub fn forward_transform(&mut self, grid: &SampleGrid) -> ComplexGrid {
        let mut data: Vec<Complex<f32>> = grid
            .as_slice()
            .iter()
            .map(|&s| Complex { re: s, im: 0.0 })
            .collect();
        self.fft_2d(
            &mut data,
            grid.height(),
            grid.width(),
            FftDirection::Forward,
        );
        ComplexGrid::from_raw(grid.height(), grid.width(), data)
    }

    /// Produce the displayable spectrum of a complex grid: per-cell
    /// magnitude, log scaling, quadrant shift to center the DC term, and
    /// min-max normalization into [0, 255].
    ///
    /// Odd dimensions are cropped by one row/column before the shift, so
    /// the output can be slightly smaller than the input.
    pub fn compute_display_magnitude(&self, complex: &ComplexGrid) -> SampleGrid {
        // ln(1 + m) keeps near-zero magnitudes out of the log singularity
        let data: Vec<f32> = complex
            .as_slice()
            .iter()
            .map(|c| (1.0 + c.norm()).ln())
            .collect();
        let magnitude = SampleGrid::from_raw(complex.height(), complex.width(), data);
        let mut shifted = shift_quadrants(&magnitude);
        normalize_min_max(shifted.as_mut_slice(), DISPLAY_MIN, DISPLAY_MAX);
        shifted
    }

    /// Compute the inverse 2D DFT, take the real plane as the reconstructed
    /// image, and min-max normalize it into [0, 255].
    pub fn inverse_transform_and_reconstruct(&mut self, complex: ComplexGrid) -> SampleGrid {
        let (height, width, mut data) = complex.into_parts();
        self.fft_2d(&mut data, height, width, FftDirection::Inverse);

        let mut real: Vec<f32> = data.iter().map(|c| c.re).collect();
        normalize_min_max(&mut real, DISPLAY_MIN, DISPLAY_MAX);
        SampleGrid::from_raw(height, width, real)
    }

    /// In-place 2D FFT over a row-major buffer: transform the rows, then
    /// the columns via a transposed copy, then restore row-major order.
    fn fft_2d(
        &mut self,
        data: &mut Vec<Complex<f32>>,
        height: usize,
        width: usize,
        direction: FftDirection,
    ) {
        let row_fft = self.planner.plan_fft(width, direction);
        let mut scratch = vec![Complex::zero(); row_fft.get_inplace_scratch_len()];
        for row in data.chunks_exact_mut(width) {
            row_fft.process_with_scratch(row, &mut scratch);
        }

        let mut transposed = transpose(width, height, data);
        let col_fft = self.planner.plan_fft(height, direction);
        scratch.resize(col_fft.get_inplace_scratch_len(), Complex::zero());
        for col in transposed.chunks_exact_mut(height) {
            col_fft.process_with_scratch(col, &mut scratch);
        }

        *data = transpose(height, width, &transposed);
    }
}

impl Default for SpectrumPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest size >= `n` that factors only into 2, 3 and 5, the sizes the
/// FFT handles without falling back to slower generic algorithms.
fn optimal_fft_size(n: usize) -> usize {
    let mut size = n;
    loop {
        let mut m = size;
        while m % 2 == 0 {
            m /= 2;
        }
        while m % 3 == 0 {
            m /= 3;
        }
        while m % 5 == 0 {
            m /= 5;
        }
        if m == 1 {
            return size;
        }
        size += 1;
    }
}

/// Swap the grid's quadrants diagonally (top-left with bottom-right,
/// top-right with bottom-left), moving the DC term from the corner to the
/// center. Odd dimensions are cropped by one row/column first; a grid
/// thinner than two rows or columns has no quadrants to swap and is
/// returned unchanged.
pub fn shift_quadrants(grid: &SampleGrid) -> SampleGrid {
    let height = grid.height() & !1;
    let width = grid.width() & !1;
    if height == 0 || width == 0 {
        return grid.clone();
    }

    let mut data = Vec::with_capacity(height * width);
    for row in 0..height {
        let start = row * grid.width();
        data.extend_from_slice(&grid.as_slice()[start..start + width]);
    }

    let half_h = height / 2;
    let half_w = width / 2;
    // one quadrant-sized buffer, reused for both diagonal swaps
    let mut tmp = vec![0.0f32; half_h * half_w];
    for &(a_row, a_col, b_row, b_col) in &[(0, 0, half_h, half_w), (0, half_w, half_h, 0)] {
        for row in 0..half_h {
            let a = (a_row + row) * width + a_col;
            tmp[row * half_w..(row + 1) * half_w].copy_from_slice(&data[a..a + half_w]);
        }
        for row in 0..half_h {
            let a = (a_row + row) * width + a_col;
            let b = (b_row + row) * width + b_col;
            data.copy_within(b..b + half_w, a);
        }
        for row in 0..half_h {
            let b = (b_row + row) * width + b_col;
            data[b..b + half_w].copy_from_slice(&tmp[row * half_w..(row + 1) * half_w]);
        }
    }

    SampleGrid::from_raw(height, width, data)
}

/// Linearly rescale values into [lo, hi] using the observed minimum and
/// maximum. A constant input maps to the midpoint of the target range.
pub fn normalize_min_max(values: &mut [f32], lo: f32, hi: f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in values.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    if max == min {
        let midpoint = (lo + hi) / 2.0;
        values.fill(midpoint);
        return;
    }

    let scale = (hi - lo) / (max - min);
    for v in values.iter_mut() {
        *v = (*v - min) * scale + lo;
    }
}

fn transpose(width: usize, height: usize, matrix: &[Complex<f32>]) -> Vec<Complex<f32>> {
    let mut transposed = vec![Complex::zero(); matrix.len()];
    for row in 0..height {
        for col in 0..width {
            transposed[col * height + row] = matrix[row * width + col];
        }
    }
    transposed
}
