// NCC matcher adapter - Template search by normalized cross-correlation

use image::GrayImage;

use crate::domain::errors::*;
use crate::ports::{MatchResult, TemplateMatcher};

/// Exhaustive zero-mean normalized cross-correlation.
///
/// Scores lie in [-1, 1]; a flat template only matches flat regions.
#[derive(Debug, Clone, Default)]
pub struct NccTemplateMatcher;

impl NccTemplateMatcher {
    pub fn new() -> Self {
        Self
    }

    fn score_at(
        template: &[f64],
        template_norm: f64,
        target: &GrayImage,
        (x0, y0): (u32, u32),
        (tw, th): (u32, u32),
    ) -> f64 {
        let n = (tw * th) as f64;
        let mut sum = 0.0;
        for y in 0..th {
            for x in 0..tw {
                sum += target.get_pixel(x0 + x, y0 + y)[0] as f64;
            }
        }
        let mean = sum / n;

        let mut dot = 0.0;
        let mut norm = 0.0;
        for y in 0..th {
            for x in 0..tw {
                let centered = target.get_pixel(x0 + x, y0 + y)[0] as f64 - mean;
                dot += centered * template[(y * tw + x) as usize];
                norm += centered * centered;
            }
        }

        match (template_norm == 0.0, norm == 0.0) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.0,
            (false, false) => dot / (template_norm * norm.sqrt()),
        }
    }
}

impl TemplateMatcher for NccTemplateMatcher {
    fn find(&self, template: &GrayImage, target: &GrayImage) -> Result<MatchResult, DomainError> {
        let (tw, th) = template.dimensions();
        let (w, h) = target.dimensions();
        if tw == 0 || th == 0 {
            return Err(DomainError::ShapeMismatch("empty template".to_string()));
        }
        if tw > w || th > h {
            return Err(DomainError::ShapeMismatch(format!(
                "template {}x{} larger than target {}x{}",
                tw, th, w, h
            )));
        }

        let mean = template.pixels().map(|p| p[0] as f64).sum::<f64>() / (tw * th) as f64;
        let centered: Vec<f64> = template.pixels().map(|p| p[0] as f64 - mean).collect();
        let template_norm = centered.iter().map(|v| v * v).sum::<f64>().sqrt();

        let mut best = MatchResult {
            position: (0, 0),
            similarity: f64::NEG_INFINITY,
        };
        for y in 0..=(h - th) {
            for x in 0..=(w - tw) {
                let score = Self::score_at(&centered, template_norm, target, (x, y), (tw, th));
                if score > best.similarity {
                    best = MatchResult {
                        position: (x, y),
                        similarity: score,
                    };
                }
            }
        }
        Ok(best)
    }
}
