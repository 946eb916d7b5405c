use panosphere_core::sphere::{
    angles_from_equirect_pixel, direction_from_angles, face_coords_from_uv, face_pixel_from_uv,
    face_uv_from_direction,
};
use panosphere_core::{
    bilinear_sample, quantize, rgb_buffer_len, BorderMode, Face, ProjectionError, RgbImage,
    RgbImageView, CHANNELS,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::face_map::{FaceSamplingMap, SamplingMapCache};
use crate::CubeFaces;

/// Mutable row chunks, in parallel when the `rayon` feature is on.
macro_rules! maybe_par_rows {
    ($slice:expr, $row_len:expr) => {{
        #[cfg(feature = "rayon")]
        {
            $slice.par_chunks_mut($row_len)
        }
        #[cfg(not(feature = "rayon"))]
        {
            $slice.chunks_mut($row_len)
        }
    }};
}

/// How `faces_to_equirect` reads the selected face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceInterpolation {
    /// Copy the nearest face pixel.
    #[default]
    Nearest,
    /// Bilinear fetch with clamped face borders.
    Bilinear,
}

/// Cubemap conversion settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubemapParams {
    /// Face side length; derived from the source when `None`.
    pub face_size: Option<usize>,
    /// Face lookup used when composing an equirectangular image.
    pub interpolation: FaceInterpolation,
}

/// Face size used when none is requested: `max(1, min(H, W / 2))`.
pub fn default_face_size(width: usize, height: usize) -> usize {
    height.min(width / 2).max(1)
}

fn render_face(src: &RgbImageView<'_>, map: &FaceSamplingMap) -> RgbImage {
    let size = map.size;
    let mut data = vec![0u8; size * size * CHANNELS];
    maybe_par_rows!(data, size * CHANNELS)
        .enumerate()
        .for_each(|(j, row)| {
            for (px, &[u, v]) in row.chunks_exact_mut(CHANNELS).zip(map.row(j)) {
                let s = bilinear_sample(src, u, v, BorderMode::WrapHorizontalClampVertical);
                px.copy_from_slice(&quantize(s));
            }
        });
    RgbImage {
        width: size,
        height: size,
        data,
    }
}

/// Split an equirectangular panorama into six cube faces.
///
/// `face_size` defaults to [`default_face_size`] of the source.
pub fn equirect_to_faces(
    equirect: &RgbImageView<'_>,
    face_size: Option<usize>,
) -> Result<CubeFaces, ProjectionError> {
    CubemapCodec::new(CubemapParams {
        face_size,
        ..CubemapParams::default()
    })
    .split(equirect)
}

/// Compose six faces into a `width x height` equirectangular image,
/// copying the nearest face pixel.
pub fn faces_to_equirect(
    faces: &CubeFaces,
    width: usize,
    height: usize,
) -> Result<RgbImage, ProjectionError> {
    faces_to_equirect_with(faces, width, height, FaceInterpolation::Nearest)
}

/// [`faces_to_equirect`] with an explicit face lookup.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(faces), fields(face_size = faces.size()))
)]
pub fn faces_to_equirect_with(
    faces: &CubeFaces,
    width: usize,
    height: usize,
    interpolation: FaceInterpolation,
) -> Result<RgbImage, ProjectionError> {
    let len = rgb_buffer_len("equirectangular output", width, height)?;
    let size = faces.size();
    let views: [RgbImageView<'_>; 6] = Face::ALL.map(|f| faces.get(f).view());

    let mut data = vec![0u8; len];
    maybe_par_rows!(data, width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let ll = angles_from_equirect_pixel(x as f64 + 0.5, y as f64 + 0.5, width, height);
                let hit = face_uv_from_direction(direction_from_angles(ll.lon, ll.lat));
                let face = &views[hit.face.index()];
                let value = match interpolation {
                    FaceInterpolation::Nearest => {
                        let (fx, fy) = face_pixel_from_uv(hit.u, hit.v, size);
                        face.pixel(fx, fy)
                    }
                    FaceInterpolation::Bilinear => {
                        let p = face_coords_from_uv(hit.u, hit.v, size);
                        quantize(bilinear_sample(face, p.x as f32, p.y as f32, BorderMode::Clamp))
                    }
                };
                px.copy_from_slice(&value);
            }
        });

    log::info!(
        "composed {}x{} equirectangular image from {}px faces",
        width,
        height,
        size
    );
    Ok(RgbImage {
        width,
        height,
        data,
    })
}

/// Reusable converter that keeps sampling maps between calls.
#[derive(Debug, Default)]
pub struct CubemapCodec {
    params: CubemapParams,
    cache: SamplingMapCache,
}

impl CubemapCodec {
    pub fn new(params: CubemapParams) -> Self {
        Self {
            params,
            cache: SamplingMapCache::new(),
        }
    }

    pub fn params(&self) -> &CubemapParams {
        &self.params
    }

    /// Number of cached sampling maps.
    pub fn cached_maps(&self) -> usize {
        self.cache.len()
    }

    /// Split an equirectangular panorama into six faces.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, equirect),
            fields(width = equirect.width, height = equirect.height)
        )
    )]
    pub fn split(&mut self, equirect: &RgbImageView<'_>) -> Result<CubeFaces, ProjectionError> {
        equirect.validate("equirectangular source")?;
        let (w, h) = (equirect.width, equirect.height);
        let size = match self.params.face_size {
            Some(0) => {
                return Err(ProjectionError::mismatch(
                    "requested face size",
                    0,
                    0,
                    "a positive face size",
                ))
            }
            Some(s) => s,
            None => default_face_size(w, h),
        };
        rgb_buffer_len("requested face size", size, size)?;

        let faces = Face::ALL.map(|face| {
            let map = self.cache.get_or_build(face, size, w, h);
            log::debug!("extracting {face} face ({size}px)");
            render_face(equirect, &map)
        });
        log::info!("split {}x{} panorama into six {}px faces", w, h, size);
        CubeFaces::new(faces)
    }

    /// Compose faces into a `width x height` equirectangular image using the
    /// configured interpolation.
    pub fn merge(
        &self,
        faces: &CubeFaces,
        width: usize,
        height: usize,
    ) -> Result<RgbImage, ProjectionError> {
        faces_to_equirect_with(faces, width, height, self.params.interpolation)
    }
}
