use crate::{RgbF, RgbImageView};
use serde::{Deserialize, Serialize};

/// How out-of-range neighbour coordinates are resolved before a fetch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Wrap `x` around the image width (longitude seam), clamp `y`.
    WrapHorizontalClampVertical,
    /// Clamp both axes to the nearest edge pixel.
    Clamp,
    /// Neighbours outside the image read this value.
    Constant(RgbF),
}

#[inline]
fn wrap(i: i64, n: usize) -> usize {
    i.rem_euclid(n as i64) as usize
}

#[inline]
fn clamp(i: i64, n: usize) -> usize {
    i.clamp(0, n as i64 - 1) as usize
}

#[inline]
fn fetch(src: &RgbImageView<'_>, x: i64, y: i64, mode: BorderMode) -> RgbF {
    let (xi, yi) = match mode {
        BorderMode::WrapHorizontalClampVertical => (wrap(x, src.width), clamp(y, src.height)),
        BorderMode::Clamp => (clamp(x, src.width), clamp(y, src.height)),
        BorderMode::Constant(fill) => {
            if x < 0 || y < 0 || x >= src.width as i64 || y >= src.height as i64 {
                return fill;
            }
            (x as usize, y as usize)
        }
    };
    src.pixel_f32(xi, yi)
}

/// Pull a clamped-axis coordinate to within one pixel outside the image.
///
/// Every neighbour of a coordinate at or beyond the edge resolves to the same
/// border value, so the result is unchanged and the integer indices stay small.
#[inline]
fn to_border(c: f32, len: usize) -> f32 {
    c.clamp(-1.0, len as f32)
}

/// Bilinear fetch at fractional `(x, y)`; integer coordinates are pixel centres.
///
/// Channels are interpolated independently and returned unrounded.
/// Non-finite coordinates resolve like the origin pixel.
#[inline]
pub fn bilinear_sample(src: &RgbImageView<'_>, x: f32, y: f32, mode: BorderMode) -> RgbF {
    let (x, y) = if x.is_finite() && y.is_finite() {
        (x, y)
    } else {
        (0.0, 0.0)
    };
    let x = match mode {
        BorderMode::WrapHorizontalClampVertical => x.rem_euclid(src.width as f32),
        _ => to_border(x, src.width),
    };
    let y = to_border(y, src.height);
    let x0f = x.floor();
    let y0f = y.floor();
    let fx = x - x0f;
    let fy = y - y0f;
    let x0 = x0f as i64;
    let y0 = y0f as i64;

    let p00 = fetch(src, x0, y0, mode);
    let p10 = fetch(src, x0 + 1, y0, mode);
    let p01 = fetch(src, x0, y0 + 1, mode);
    let p11 = fetch(src, x0 + 1, y0 + 1, mode);

    let mut out = [0.0f32; 3];
    for c in 0..3 {
        let a = p00[c] + fx * (p10[c] - p00[c]);
        let b = p01[c] + fx * (p11[c] - p01[c]);
        out[c] = a + fy * (b - a);
    }
    out
}

/// Nearest-pixel fetch with the same border resolution as [`bilinear_sample`].
#[inline]
pub fn nearest_sample(src: &RgbImageView<'_>, x: f32, y: f32, mode: BorderMode) -> RgbF {
    if !(x.is_finite() && y.is_finite()) {
        return fetch(src, 0, 0, mode);
    }
    let x = match mode {
        BorderMode::WrapHorizontalClampVertical => x.rem_euclid(src.width as f32),
        _ => to_border(x, src.width),
    };
    fetch(src, x.round() as i64, to_border(y, src.height).round() as i64, mode)
}
