use panosphere_core::{quantize, RgbF, RgbImage, CHANNELS};

/// Weighted colour sum and feather mass over the equirectangular canvas.
///
/// `color` and `weight` are co-indexed: pixel `i` owns `color[3i..3i+3]` and
/// `weight[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator {
    pub width: usize,
    pub height: usize,
    color: Vec<f32>,
    weight: Vec<f32>,
}

impl Accumulator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![0.0; width * height * CHANNELS],
            weight: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn add(&mut self, x: usize, y: usize, px: RgbF, weight: f32) {
        let i = y * self.width + x;
        let c = &mut self.color[i * CHANNELS..(i + 1) * CHANNELS];
        for (acc, v) in c.iter_mut().zip(px) {
            *acc += v * weight;
        }
        self.weight[i] += weight;
    }

    #[inline]
    pub fn weight_at(&self, x: usize, y: usize) -> f32 {
        self.weight[y * self.width + x]
    }

    /// Pixels that received any weight.
    pub fn covered_pixels(&self) -> usize {
        self.weight.iter().filter(|&&w| w > 0.0).count()
    }

    /// Elementwise sum of two partial accumulators of the same canvas.
    pub fn merged(mut self, other: Accumulator) -> Accumulator {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (a, b) in self.color.iter_mut().zip(other.color) {
            *a += b;
        }
        for (a, b) in self.weight.iter_mut().zip(other.weight) {
            *a += b;
        }
        self
    }

    /// Normalize by accumulated weight and convert to 8-bit.
    ///
    /// Pixels without weight divide by 1 instead and stay black.
    pub fn finalize(self) -> RgbImage {
        let mut data = Vec::with_capacity(self.width * self.height * CHANNELS);
        for (c, &w) in self.color.chunks_exact(CHANNELS).zip(&self.weight) {
            let w = if w == 0.0 { 1.0 } else { w };
            data.extend_from_slice(&quantize([c[0] / w, c[1] / w, c[2] / w]));
        }
        RgbImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}
