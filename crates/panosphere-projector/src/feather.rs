/// Per-pixel blend weights for one source image.
///
/// The weight only depends on the column: linear ramps from 0 to 1 across
/// the leftmost and rightmost `feather_width` columns, 1 elsewhere. When the
/// ramps overlap (`width < 2 * feather_width`) they multiply.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatherMask {
    pub width: usize,
    pub height: usize,
    columns: Vec<f32>,
}

impl FeatherMask {
    #[inline]
    pub fn weight(&self, x: usize, _y: usize) -> f32 {
        self.columns[x]
    }

    /// Weights of one row (identical for every row).
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }
}

#[inline]
fn ramp(distance: usize, feather_width: usize) -> f32 {
    if distance < feather_width {
        distance as f32 / feather_width as f32
    } else {
        1.0
    }
}

/// Feather mask for a `width x height` image.
pub fn gaussian_feather(width: usize, height: usize, feather_width: usize) -> FeatherMask {
    if feather_width > 0 && width < 2 * feather_width {
        log::warn!(
            "feather width {} exceeds half the image width {}; edge ramps overlap",
            feather_width,
            width
        );
    }
    let columns = (0..width)
        .map(|x| ramp(x, feather_width) * ramp(width - 1 - x, feather_width))
        .collect();
    FeatherMask {
        width,
        height,
        columns,
    }
}
