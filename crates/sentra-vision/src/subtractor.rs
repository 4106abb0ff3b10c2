//! Adaptive mixture-of-Gaussians background subtraction.
//!
//! Each pixel carries a small bank of Gaussians (weight, mean, variance).
//! A sample that lands inside one of the dominant, low-variance components is
//! background; anything else is foreground. Components adapt toward recent
//! samples at a rate bounded by `history`, so the model tracks slow scene
//! changes while flagging fast ones.

use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Background model parameters.
///
/// Defaults follow the MOG2 conventions of the surrounding ecosystem:
/// 500 frames of history and a squared-deviation threshold of 16 (4 sigma).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubtractorParams {
    /// Number of frames over which the model adapts. The learning rate is
    /// `1 / min(frames_seen, history)`.
    pub history: u32,
    /// Squared-deviation match threshold: a sample matches a component when
    /// `(x - mean)^2 < var_threshold * variance`.
    pub var_threshold: f32,
    /// Cumulative weight of components considered background.
    pub background_ratio: f32,
    /// Gaussians per pixel.
    pub gaussians: usize,
    /// Variance assigned to a freshly created component.
    pub initial_variance: f32,
    /// Lower clamp on component variance.
    pub var_min: f32,
    /// Upper clamp on component variance.
    pub var_max: f32,
}

impl Default for SubtractorParams {
    fn default() -> Self {
        Self {
            history: 500,
            var_threshold: 16.0,
            background_ratio: 0.9,
            gaussians: 3,
            initial_variance: 15.0,
            var_min: 4.0,
            var_max: 75.0,
        }
    }
}

/// Seam for swapping subtraction strategies.
pub trait BackgroundSubtractor {
    /// Update the model with one grayscale frame and return the binary
    /// foreground mask (0 background, 255 foreground).
    fn apply(&mut self, frame: &GrayImage) -> GrayImage;

    /// Forget all accumulated statistics.
    fn reset(&mut self);
}

/// Per-pixel mixture-of-Gaussians background model.
pub struct MogSubtractor {
    params: SubtractorParams,
    width: u32,
    height: u32,
    frames_seen: u64,
    // Flat component banks, `gaussians` entries per pixel.
    weights: Vec<f32>,
    means: Vec<f32>,
    variances: Vec<f32>,
}

impl MogSubtractor {
    pub fn new(params: SubtractorParams) -> Self {
        Self {
            params,
            width: 0,
            height: 0,
            frames_seen: 0,
            weights: Vec::new(),
            means: Vec::new(),
            variances: Vec::new(),
        }
    }

    /// Frames fed into the model since the last reset.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    pub fn params(&self) -> &SubtractorParams {
        &self.params
    }

    fn reinit(&mut self, width: u32, height: u32) {
        let len = width as usize * height as usize * self.params.gaussians;
        self.width = width;
        self.height = height;
        self.frames_seen = 0;
        self.weights.clear();
        self.weights.resize(len, 0.0);
        self.means.clear();
        self.means.resize(len, 0.0);
        self.variances.clear();
        self.variances.resize(len, 0.0);
    }

    /// Seed every pixel's dominant component from the first frame. The first
    /// frame therefore classifies entirely as background, which makes warm-up
    /// deterministic instead of a transient burst of spurious foreground.
    fn seed(&mut self, frame: &GrayImage) {
        let k = self.params.gaussians;
        for (i, px) in frame.as_raw().iter().enumerate() {
            let base = i * k;
            self.weights[base] = 1.0;
            self.means[base] = *px as f32;
            self.variances[base] = self.params.initial_variance;
        }
    }
}

impl BackgroundSubtractor for MogSubtractor {
    fn apply(&mut self, frame: &GrayImage) -> GrayImage {
        let (w, h) = frame.dimensions();
        if (w, h) != (self.width, self.height) {
            if self.frames_seen > 0 {
                warn!(
                    old_width = self.width,
                    old_height = self.height,
                    new_width = w,
                    new_height = h,
                    "frame geometry changed, reinitializing background model"
                );
            }
            self.reinit(w, h);
        }
        self.frames_seen += 1;

        let mut mask = GrayImage::new(w, h);
        if self.frames_seen == 1 {
            self.seed(frame);
            return mask;
        }

        let p = self.params;
        let k = p.gaussians;
        let alpha = 1.0 / self.frames_seen.min(p.history.max(1) as u64) as f32;
        let mut order: Vec<usize> = Vec::with_capacity(k);

        let out_pixels: &mut [u8] = &mut mask;
        for (i, (px, out)) in frame.as_raw().iter().zip(out_pixels.iter_mut()).enumerate() {
            let x = *px as f32;
            let base = i * k;
            let weights = &mut self.weights[base..base + k];
            let means = &mut self.means[base..base + k];
            let variances = &mut self.variances[base..base + k];

            // Rank active components by weight/sigma.
            order.clear();
            order.extend((0..k).filter(|&j| weights[j] > 0.0));
            order.sort_by(|&a, &b| {
                let fa = weights[a] / variances[a].sqrt();
                let fb = weights[b] / variances[b].sqrt();
                fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal)
            });

            // The strongest components up to `background_ratio` cumulative
            // weight model the background.
            let mut n_background = 0;
            let mut cumulative = 0.0;
            for &j in &order {
                cumulative += weights[j];
                n_background += 1;
                if cumulative > p.background_ratio {
                    break;
                }
            }

            // Classify against the pre-update model.
            let mut matched = None;
            let mut is_background = false;
            for (rank, &j) in order.iter().enumerate() {
                let d = x - means[j];
                if d * d < p.var_threshold * variances[j] {
                    matched = Some(j);
                    is_background = rank < n_background;
                    break;
                }
            }
            *out = if is_background { 0 } else { 255 };

            // Update the mixture.
            match matched {
                Some(m) => {
                    for &j in &order {
                        let target = if j == m { 1.0 } else { 0.0 };
                        weights[j] += alpha * (target - weights[j]);
                    }
                    let d = x - means[m];
                    means[m] += alpha * d;
                    variances[m] =
                        (variances[m] + alpha * (d * d - variances[m])).clamp(p.var_min, p.var_max);
                }
                None => {
                    // No component explains the sample: decay everything and
                    // spawn a fresh wide component in the weakest slot.
                    for &j in &order {
                        weights[j] *= 1.0 - alpha;
                    }
                    let slot = (0..k)
                        .min_by(|&a, &b| {
                            weights[a]
                                .partial_cmp(&weights[b])
                                .unwrap_or(std::cmp::Ordering::Equal)
                        })
                        .unwrap_or(0);
                    weights[slot] = alpha;
                    means[slot] = x;
                    variances[slot] = p.initial_variance;
                }
            }

            // Renormalize weights.
            let sum: f32 = weights.iter().sum();
            if sum > 0.0 {
                for wj in weights.iter_mut() {
                    *wj /= sum;
                }
            }
        }

        mask
    }

    fn reset(&mut self) {
        let (w, h) = (self.width, self.height);
        self.reinit(w, h);
    }
}
