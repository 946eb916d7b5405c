use panosphere_core::sphere::{equirect_u, equirect_v_unclamped};
use panosphere_core::{bilateral_filter, rgb_buffer_len, ProjectionError, RgbImage, RgbImageView};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::accumulator::Accumulator;
use crate::feather::gaussian_feather;
use crate::params::{Orientation, ProjectorParams};

/// A planar capture together with the direction it was taken in.
#[derive(Clone, Copy, Debug)]
pub struct OrientedImage<'a> {
    pub image: RgbImageView<'a>,
    pub orientation: Orientation,
}

impl<'a> OrientedImage<'a> {
    pub fn new(image: RgbImageView<'a>, orientation: Orientation) -> Self {
        Self { image, orientation }
    }
}

/// Forward-project one image into `acc` and hand the accumulator back.
///
/// Source pixel `(x, y)` lands at longitude `yaw + (x/w - 0.5) * hfov` and
/// latitude `(y/h - 0.5) * vfov - pitch`. Longitudes wrap around the seam;
/// samples whose row falls outside the canvas are dropped.
pub fn accumulate(
    mut acc: Accumulator,
    src: &OrientedImage<'_>,
    params: &ProjectorParams,
) -> Accumulator {
    let img = &src.image;
    let (w, h) = (img.width, img.height);
    let (cw, ch) = (acc.width, acc.height);
    let mask = gaussian_feather(w, h, params.feather_width);

    let yaw = src.orientation.yaw_deg.to_radians();
    let pitch = src.orientation.pitch_deg.to_radians();
    let h_fov = params.h_fov_deg.to_radians();
    let v_fov = params.v_fov_deg.to_radians();

    // longitude depends on the column only
    let columns: Vec<usize> = (0..w)
        .map(|x| {
            let lon = yaw + (x as f64 / w as f64 - 0.5) * h_fov;
            (equirect_u(lon, cw) as usize).min(cw - 1)
        })
        .collect();

    let mut dropped = 0usize;
    for y in 0..h {
        let lat = (y as f64 / h as f64 - 0.5) * v_fov - pitch;
        let v = equirect_v_unclamped(lat, ch);
        if !(v >= 0.0 && v < ch as f64) {
            dropped += w;
            continue;
        }
        let cv = (v as usize).min(ch - 1);
        for (x, (&cu, &weight)) in columns.iter().zip(mask.columns()).enumerate() {
            acc.add(cu, cv, img.pixel_f32(x, y), weight);
        }
    }
    if dropped > 0 {
        log::debug!(
            "dropped {} samples outside the canvas rows (yaw {:.1}, pitch {:.1})",
            dropped,
            src.orientation.yaw_deg,
            src.orientation.pitch_deg
        );
    }
    acc
}

/// Blends oriented captures onto an equirectangular canvas.
#[derive(Clone, Debug, Default)]
pub struct PanoramaProjector {
    params: ProjectorParams,
}

impl PanoramaProjector {
    pub fn new(params: ProjectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProjectorParams {
        &self.params
    }

    fn check_inputs(&self, images: &[OrientedImage<'_>]) -> Result<(), ProjectionError> {
        if images.is_empty() {
            return Err(ProjectionError::empty(
                "panorama projection needs at least one image",
            ));
        }
        let (w, h) = (self.params.output_width, self.params.output_height);
        rgb_buffer_len("panorama canvas", w, h)?;
        for (i, src) in images.iter().enumerate() {
            src.image.validate(&format!("source image #{i}"))?;
        }
        Ok(())
    }

    /// Sum every image's weighted contribution without normalizing.
    ///
    /// Each image is projected into its own partial accumulator; partials are
    /// merged by elementwise sum.
    pub fn accumulate_all(
        &self,
        images: &[OrientedImage<'_>],
    ) -> Result<Accumulator, ProjectionError> {
        self.check_inputs(images)?;
        let (w, h) = (self.params.output_width, self.params.output_height);
        let params = &self.params;

        #[cfg(feature = "rayon")]
        let acc = images
            .par_iter()
            .fold(
                || Accumulator::new(w, h),
                |acc, src| accumulate(acc, src, params),
            )
            .reduce(|| Accumulator::new(w, h), Accumulator::merged);

        #[cfg(not(feature = "rayon"))]
        let acc = images
            .iter()
            .fold(Accumulator::new(w, h), |acc, src| accumulate(acc, src, params));

        Ok(acc)
    }

    /// Project, blend and normalize `images` into one equirectangular image.
    ///
    /// Canvas pixels no image reaches are black.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, images),
            fields(
                images = images.len(),
                width = self.params.output_width,
                height = self.params.output_height
            )
        )
    )]
    pub fn project(&self, images: &[OrientedImage<'_>]) -> Result<RgbImage, ProjectionError> {
        let acc = self.accumulate_all(images)?;
        let covered = acc.covered_pixels();
        let total = acc.width * acc.height;
        let pano = acc.finalize();

        log::info!(
            "projected {} images onto {}x{} canvas, {:.1}% covered",
            images.len(),
            pano.width,
            pano.height,
            100.0 * covered as f64 / total as f64
        );

        Ok(match &self.params.post_filter {
            Some(filter) => {
                log::debug!("applying bilateral post-filter {:?}", filter);
                bilateral_filter(&pano.view(), filter)
            }
            None => pano,
        })
    }
}

/// One-shot [`PanoramaProjector::project`].
pub fn project_panorama(
    images: &[OrientedImage<'_>],
    params: &ProjectorParams,
) -> Result<RgbImage, ProjectionError> {
    PanoramaProjector::new(params.clone()).project(images)
}
