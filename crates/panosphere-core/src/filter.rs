use crate::{quantize, RgbImage, RgbImageView};
use serde::{Deserialize, Serialize};

/// Edge-preserving smoothing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Window side in pixels; values <= 1 disable filtering.
    pub diameter: usize,
    /// Colour-distance falloff (8-bit units).
    pub sigma_color: f32,
    /// Spatial falloff in pixels.
    pub sigma_space: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 9,
            sigma_color: 75.0,
            sigma_space: 75.0,
        }
    }
}

/// Bilateral filter: each output pixel is the mean of its window weighted by
/// spatial distance and RGB distance to the centre pixel. Borders clamp.
pub fn bilateral_filter(src: &RgbImageView<'_>, params: &BilateralParams) -> RgbImage {
    if params.diameter <= 1 || params.sigma_color <= 0.0 || params.sigma_space <= 0.0 {
        return src.to_owned_image();
    }
    let radius = (params.diameter / 2) as i64;
    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space);
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color);

    // spatial kernel is shared by every pixel
    let side = (2 * radius + 1) as usize;
    let mut spatial = Vec::with_capacity(side * side);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dx * dx + dy * dy) as f32;
            spatial.push(if d2 > (radius * radius) as f32 {
                0.0
            } else {
                (d2 * space_coeff).exp()
            });
        }
    }

    let (w, h) = (src.width as i64, src.height as i64);
    RgbImage::from_fn(src.width, src.height, |x, y| {
        let centre = src.pixel_f32(x, y);
        let mut acc = [0.0f32; 3];
        let mut norm = 0.0f32;
        let mut k = 0;
        for dy in -radius..=radius {
            let yy = (y as i64 + dy).clamp(0, h - 1) as usize;
            for dx in -radius..=radius {
                let ws = spatial[k];
                k += 1;
                if ws == 0.0 {
                    continue;
                }
                let xx = (x as i64 + dx).clamp(0, w - 1) as usize;
                let p = src.pixel_f32(xx, yy);
                let dc2 = (0..3).map(|c| (p[c] - centre[c]).powi(2)).sum::<f32>();
                let wgt = ws * (dc2 * color_coeff).exp();
                for c in 0..3 {
                    acc[c] += p[c] * wgt;
                }
                norm += wgt;
            }
        }
        // the centre tap always has weight 1, so norm > 0
        quantize(acc.map(|a| a / norm))
    })
}
