use crate::{RgbImage, RgbImageView};
use serde::{Deserialize, Serialize};

/// Parameters for trimming the dark margins a stitcher leaves around a panorama.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    /// A pixel is dark when the sum of its channels is below this value.
    pub dark_threshold: u32,
    /// Fraction of the height (rows) or width (columns) searched from each edge.
    pub max_fraction: f32,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            dark_threshold: 25,
            max_fraction: 0.125,
        }
    }
}

/// Inclusive-exclusive crop rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[inline]
fn is_dark(src: &RgbImageView<'_>, x: usize, y: usize, threshold: u32) -> bool {
    let p = src.pixel(x, y);
    (p[0] as u32 + p[1] as u32 + p[2] as u32) < threshold
}

/// Longest dark run from one edge over all scan lines.
///
/// `lines` scan lines of length `len`; `dark(line, k)` tests the `k`-th pixel
/// counted from the edge. Lines that stay dark for the whole window do not vote.
fn edge_margin(lines: usize, len: usize, limit: usize, dark: impl Fn(usize, usize) -> bool) -> usize {
    let limit = limit.min(len);
    let mut margin = 0;
    for line in 0..lines {
        if let Some(run) = (0..limit).position(|k| !dark(line, k)) {
            margin = margin.max(run);
        }
    }
    margin
}

/// Find the rectangle left after trimming dark borders, rows first.
pub fn find_dark_border_crop(src: &RgbImageView<'_>, params: &CropParams) -> CropRect {
    let full = CropRect {
        x: 0,
        y: 0,
        width: src.width,
        height: src.height,
    };
    if src.width == 0 || src.height == 0 {
        return full;
    }
    let t = params.dark_threshold;
    let frac = params.max_fraction.clamp(0.0, 0.5);

    let row_limit = (src.height as f32 * frac) as usize;
    let top = edge_margin(src.width, src.height, row_limit, |c, k| is_dark(src, c, k, t));
    let bottom = edge_margin(src.width, src.height, row_limit, |c, k| {
        is_dark(src, c, src.height - 1 - k, t)
    });
    if top + bottom >= src.height {
        return full;
    }
    let height = src.height - top - bottom;

    let col_limit = (src.width as f32 * frac) as usize;
    let left = edge_margin(height, src.width, col_limit, |r, k| is_dark(src, k, top + r, t));
    let right = edge_margin(height, src.width, col_limit, |r, k| {
        is_dark(src, src.width - 1 - k, top + r, t)
    });
    if left + right >= src.width {
        return full;
    }

    CropRect {
        x: left,
        y: top,
        width: src.width - left - right,
        height,
    }
}

/// Trim dark borders; returns an unchanged copy when nothing would be left.
pub fn crop_dark_borders(src: &RgbImageView<'_>, params: &CropParams) -> RgbImage {
    let r = find_dark_border_crop(src, params);
    if r.width != src.width || r.height != src.height {
        log::debug!(
            "cropping dark borders: {}x{} -> {}x{} at ({}, {})",
            src.width,
            src.height,
            r.width,
            r.height,
            r.x,
            r.y
        );
    }
    src.to_owned_image().crop(r.x, r.y, r.width, r.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(w: usize, h: usize, top: usize, bottom: usize, left: usize, right: usize) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            if y < top || y >= h - bottom || x < left || x >= w - right {
                [3, 3, 3]
            } else {
                [120, 80, 60]
            }
        })
    }

    #[test]
    fn removes_black_frame() {
        let img = framed(80, 40, 3, 2, 4, 5);
        let r = find_dark_border_crop(&img.view(), &CropParams::default());
        assert_eq!(
            r,
            CropRect {
                x: 4,
                y: 3,
                width: 71,
                height: 35
            }
        );
        let out = crop_dark_borders(&img.view(), &CropParams::default());
        assert_eq!((out.width, out.height), (71, 35));
        assert!(out.data.chunks(3).all(|p| p == [120, 80, 60]));
    }

    #[test]
    fn ragged_edge_uses_deepest_run() {
        // one column reaches two rows further down than the rest
        let img = RgbImage::from_fn(40, 40, |x, y| {
            let depth = if x == 10 { 4 } else { 2 };
            if y < depth {
                [0, 0, 0]
            } else {
                [200, 200, 200]
            }
        });
        let r = find_dark_border_crop(&img.view(), &CropParams::default());
        assert_eq!(r.y, 4);
    }

    #[test]
    fn clean_image_is_identity() {
        let img = RgbImage::filled(30, 20, [90, 90, 90]);
        assert_eq!(crop_dark_borders(&img.view(), &CropParams::default()), img);
    }

    #[test]
    fn fully_dark_image_is_kept() {
        let img = RgbImage::black(16, 16);
        assert_eq!(crop_dark_borders(&img.view(), &CropParams::default()), img);
    }
}
