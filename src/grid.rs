use rustfft::num_complex::Complex;
use thiserror::Error;

/// Errors produced by the grid types and the spectrum pipeline.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {height}x{width}")]
    InvalidInput { height: usize, width: usize },
    #[error("data length {len} does not match {height}x{width} grid")]
    LengthMismatch {
        len: usize,
        height: usize,
        width: usize,
    },
}

/// A real-valued grayscale image, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    height: usize,
    width: usize,
    data: Vec<f32>,
}

impl SampleGrid {
    pub fn new(height: usize, width: usize, data: Vec<f32>) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidInput { height, width });
        }
        if data.len() != height * width {
            return Err(GridError::LengthMismatch {
                len: data.len(),
                height,
                width,
            });
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Construct from parts already known to be consistent.
    pub(crate) fn from_raw(height: usize, width: usize, data: Vec<f32>) -> Self {
        debug_assert!(height > 0 && width > 0);
        debug_assert_eq!(data.len(), height * width);
        Self {
            height,
            width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// A complex-valued frequency-domain grid, row-major, produced by the
/// forward transform and consumed by the inverse transform.
#[derive(Debug, Clone)]
pub struct ComplexGrid {
    height: usize,
    width: usize,
    data: Vec<Complex<f32>>,
}

impl ComplexGrid {
    pub(crate) fn from_raw(height: usize, width: usize, data: Vec<Complex<f32>>) -> Self {
        debug_assert!(height > 0 && width > 0);
        debug_assert_eq!(data.len(), height * width);
        Self {
            height,
            width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn as_slice(&self) -> &[Complex<f32>] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex<f32>] {
        &mut self.data
    }

    pub(crate) fn into_parts(self) -> (usize, usize, Vec<Complex<f32>>) {
        (self.height, self.width, self.data)
    }
}
