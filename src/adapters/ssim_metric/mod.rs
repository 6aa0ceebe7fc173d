// SSIM adapter - Structural similarity of two grayscale frames

use image::GrayImage;

use crate::domain::errors::*;
use crate::ports::SimilarityMetric;

const DEFAULT_WINDOW: u32 = 7;
const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DATA_RANGE: f64 = 255.0;

/// Mean SSIM over every fully contained square window.
///
/// Window statistics come from summed-area tables, so the cost is linear
/// in the pixel count whatever the window size. Covariances use the
/// sample (n - 1) normalisation.
#[derive(Debug, Clone)]
pub struct SsimMetric {
    window: u32,
}

impl Default for SsimMetric {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl SsimMetric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different window side; even sizes are rounded down to odd
    pub fn with_window(window: u32) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Largest odd window not exceeding the configured one or the image
    fn effective_window(&self, width: u32, height: u32) -> u32 {
        let side = self.window.min(width).min(height);
        if side % 2 == 0 {
            side - 1
        } else {
            side
        }
    }
}

/// Summed-area table with one row and column of zero padding
struct Integral {
    stride: usize,
    values: Vec<f64>,
}

impl Integral {
    fn build(width: u32, height: u32, pixel: impl Fn(u32, u32) -> f64) -> Self {
        let stride = width as usize + 1;
        let mut values = vec![0.0; stride * (height as usize + 1)];
        for y in 0..height as usize {
            let mut row_sum = 0.0;
            for x in 0..width as usize {
                row_sum += pixel(x as u32, y as u32);
                values[(y + 1) * stride + x + 1] = values[y * stride + x + 1] + row_sum;
            }
        }
        Self { stride, values }
    }

    fn window_sum(&self, x: usize, y: usize, side: usize) -> f64 {
        let (x1, y1) = (x + side, y + side);
        self.values[y1 * self.stride + x1] - self.values[y * self.stride + x1]
            - self.values[y1 * self.stride + x]
            + self.values[y * self.stride + x]
    }
}

impl SimilarityMetric for SsimMetric {
    fn similarity(&self, a: &GrayImage, b: &GrayImage) -> Result<f64, DomainError> {
        if a.dimensions() != b.dimensions() {
            return Err(DomainError::ShapeMismatch(format!(
                "{:?} vs {:?}, frames must be compressed with the same options",
                a.dimensions(),
                b.dimensions()
            )));
        }
        let (width, height) = a.dimensions();
        if width == 0 || height == 0 {
            return Err(DomainError::ShapeMismatch("empty image".to_string()));
        }

        let side = self.effective_window(width, height);
        let px = |img: &GrayImage, x: u32, y: u32| img.get_pixel(x, y)[0] as f64;
        let sum_a = Integral::build(width, height, |x, y| px(a, x, y));
        let sum_b = Integral::build(width, height, |x, y| px(b, x, y));
        let sum_aa = Integral::build(width, height, |x, y| px(a, x, y) * px(a, x, y));
        let sum_bb = Integral::build(width, height, |x, y| px(b, x, y) * px(b, x, y));
        let sum_ab = Integral::build(width, height, |x, y| px(a, x, y) * px(b, x, y));

        let n = (side * side) as f64;
        let cov_norm = if n > 1.0 { n / (n - 1.0) } else { 1.0 };
        let c1 = (K1 * DATA_RANGE).powi(2);
        let c2 = (K2 * DATA_RANGE).powi(2);
        let side = side as usize;

        let mut total = 0.0;
        let mut windows = 0usize;
        for y in 0..=(height as usize - side) {
            for x in 0..=(width as usize - side) {
                let mu_a = sum_a.window_sum(x, y, side) / n;
                let mu_b = sum_b.window_sum(x, y, side) / n;
                let var_a = cov_norm * (sum_aa.window_sum(x, y, side) / n - mu_a * mu_a);
                let var_b = cov_norm * (sum_bb.window_sum(x, y, side) / n - mu_b * mu_b);
                let cov_ab = cov_norm * (sum_ab.window_sum(x, y, side) / n - mu_a * mu_b);

                let numerator = (2.0 * mu_a * mu_b + c1) * (2.0 * cov_ab + c2);
                let denominator = (mu_a * mu_a + mu_b * mu_b + c1) * (var_a + var_b + c2);
                total += numerator / denominator;
                windows += 1;
            }
        }

        Ok((total / windows as f64).clamp(0.0, 1.0))
    }
}
