use crate::image_filter::common::error::{FilterError, Result};

/// Weights of the default edge-detection filter, row-major.
#[rustfmt::skip]
const EDGE_DETECTION: [f32; 9] = [
    -1.0, 0.0, -1.0,
     0.0, 4.0,  0.0,
    -1.0, 0.0, -1.0,
];

/// Square convolution kernel with an odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionKernel {
    side: usize,
    weights: Vec<f32>,
}

impl ConvolutionKernel {
    /// Builds a kernel from `side * side` row-major weights.
    pub fn new(side: usize, weights: Vec<f32>) -> Result<Self> {
        if side == 0 || side % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "side must be odd and positive, got {}",
                side
            )));
        }
        if weights.len() != side * side {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for a {}x{} kernel, got {}",
                side * side,
                side,
                side,
                weights.len()
            )));
        }
        if let Some(pos) = weights.iter().position(|w| !w.is_finite()) {
            return Err(FilterError::InvalidKernel(format!(
                "weight {} is {}, weights must be finite",
                pos, weights[pos]
            )));
        }
        Ok(Self { side, weights })
    }

    /// `[[-1, 0, -1], [0, 4, 0], [-1, 0, -1]]`
    pub fn edge_detection() -> Self {
        Self {
            side: 3,
            weights: EDGE_DETECTION.to_vec(),
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of neighbours on each side of the centre tap.
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    pub fn weight(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.side + col]
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl Default for ConvolutionKernel {
    fn default() -> Self {
        Self::edge_detection()
    }
}
