use crate::ProjectionError;

/// Interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// Persisted 8-bit pixel.
pub type Rgb = [u8; CHANNELS];

/// Floating-point pixel used for sampling and accumulation.
pub type RgbF = [f32; CHANNELS];

/// Borrowed 3-channel 8-bit image.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, interleaved, len = w*h*3
}

/// Owned 3-channel 8-bit image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Byte length of a `width x height` RGB buffer.
///
/// Fails for zero sizes and for sizes whose byte count overflows `usize`.
pub fn rgb_buffer_len(context: &str, width: usize, height: usize) -> Result<usize, ProjectionError> {
    if width == 0 || height == 0 {
        return Err(ProjectionError::zero_sized(context, width, height));
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| ProjectionError::mismatch(context, width, height, "addressable size"))
}

fn check_dims(context: &str, width: usize, height: usize, len: usize) -> Result<(), ProjectionError> {
    let expected = rgb_buffer_len(context, width, height)?;
    if len != expected {
        return Err(ProjectionError::mismatch(
            context,
            width,
            height,
            format!("buffer of {expected} bytes, found {len}"),
        ));
    }
    Ok(())
}

impl<'a> RgbImageView<'a> {
    /// Check the buffer invariants: non-zero size and `data.len() == w*h*3`.
    pub fn validate(&self, context: &str) -> Result<(), ProjectionError> {
        check_dims(context, self.width, self.height, self.data.len())
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn pixel_f32(&self, x: usize, y: usize) -> RgbF {
        let p = self.pixel(x, y);
        [p[0] as f32, p[1] as f32, p[2] as f32]
    }

    pub fn to_owned_image(&self) -> RgbImage {
        RgbImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

impl RgbImage {
    /// Wrap a raw interleaved buffer, checking its size.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ProjectionError> {
        check_dims("image buffer", width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image of `width x height` filled with `px`.
    ///
    /// Like [`RgbImage::black`] and [`RgbImage::from_fn`] this accepts zero
    /// sizes; conversions reject them through [`RgbImageView::validate`].
    pub fn filled(width: usize, height: usize, px: Rgb) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn black(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * CHANNELS],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.view().pixel(x, y)
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, px: Rgb) {
        let i = (y * self.width + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    /// Copy out the `w x h` rectangle whose top-left corner is `(x0, y0)`.
    ///
    /// The rectangle is clipped to the image bounds.
    pub fn crop(&self, x0: usize, y0: usize, w: usize, h: usize) -> RgbImage {
        let x0 = x0.min(self.width);
        let y0 = y0.min(self.height);
        let w = w.min(self.width - x0);
        let h = h.min(self.height - y0);
        let mut data = Vec::with_capacity(w * h * CHANNELS);
        for y in y0..y0 + h {
            let start = (y * self.width + x0) * CHANNELS;
            data.extend_from_slice(&self.data[start..start + w * CHANNELS]);
        }
        RgbImage {
            width: w,
            height: h,
            data,
        }
    }
}

/// Round a float pixel to the persisted 8-bit representation.
#[inline]
pub fn quantize(px: RgbF) -> Rgb {
    px.map(|c| c.round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_zero_and_short_buffers() {
        assert!(matches!(
            RgbImage::from_raw(0, 4, Vec::new()),
            Err(ProjectionError::DimensionMismatch { width: 0, .. })
        ));
        assert!(matches!(
            RgbImage::from_raw(2, 2, vec![0; 11]),
            Err(ProjectionError::DimensionMismatch { .. })
        ));
        assert!(RgbImage::from_raw(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn buffer_len_rejects_zero_and_overflow() {
        assert_eq!(rgb_buffer_len("t", 4, 2).unwrap(), 24);
        assert!(matches!(
            rgb_buffer_len("t", 0, 2),
            Err(ProjectionError::DimensionMismatch { width: 0, .. })
        ));
        assert!(matches!(
            rgb_buffer_len("face", 1 << 33, 1 << 33),
            Err(ProjectionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn unchecked_constructors_are_caught_by_validate() {
        for img in [
            RgbImage::black(0, 3),
            RgbImage::filled(5, 0, [1, 2, 3]),
            RgbImage::from_fn(0, 0, |_, _| [0, 0, 0]),
        ] {
            assert!(img.data.is_empty());
            assert!(matches!(
                img.view().validate("empty"),
                Err(ProjectionError::DimensionMismatch { .. })
            ));
        }
    }

    #[test]
    fn put_and_read_back_pixel() {
        let mut img = RgbImage::black(4, 3);
        img.put_pixel(3, 2, [1, 2, 3]);
        assert_eq!(img.pixel(3, 2), [1, 2, 3]);
        assert_eq!(img.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn crop_clips_to_bounds() {
        let img = RgbImage::from_fn(5, 4, |x, y| [x as u8, y as u8, 0]);
        let c = img.crop(3, 1, 10, 2);
        assert_eq!((c.width, c.height), (2, 2));
        assert_eq!(c.pixel(0, 0), [3, 1, 0]);
        assert_eq!(c.pixel(1, 1), [4, 2, 0]);
    }

    #[test]
    fn quantize_rounds_and_clips() {
        assert_eq!(quantize([-3.0, 127.5, 300.0]), [0, 128, 255]);
    }
}
