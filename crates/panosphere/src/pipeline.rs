//! End-to-end file workflows: ring projection, cube split and merge.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use panosphere_core::{crop_dark_borders, CropParams, Face, ProjectionError, RgbImage};
use panosphere_cubemap::{CubemapCodec, CubemapParams};
use panosphere_projector::{OrientedImage, PanoramaProjector};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::PanoramaJobConfig;
use crate::io::{find_image_paths, load_faces, load_rgb, save_faces, save_rgb, sort_by_embedded_number};
use crate::PanosphereIoError;

/// What a job produced.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub inputs: Vec<PathBuf>,
    pub panorama_path: PathBuf,
    pub width: usize,
    pub height: usize,
    pub faces: BTreeMap<Face, PathBuf>,
}

/// File stem used as the face base name, `panorama` when there is none.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("panorama")
        .to_string()
}

/// Fewest captures a directory job will stitch.
pub const MIN_JOB_IMAGES: usize = 2;

/// Project every capture in the job's input directory and write the results.
///
/// Captures are ordered by the number in their file name and assigned ring
/// orientations in that order. Fewer than [`MIN_JOB_IMAGES`] captures is an
/// [`ProjectionError::EmptyInput`] error.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(cfg), fields(input_dir = %cfg.input_dir)))]
pub fn run_job(cfg: &PanoramaJobConfig) -> Result<JobSummary, PanosphereIoError> {
    let mut inputs = find_image_paths(cfg.input_dir())?;
    if inputs.len() < MIN_JOB_IMAGES {
        return Err(ProjectionError::empty(format!(
            "found {} image(s) in {}, a panorama needs at least {}",
            inputs.len(),
            cfg.input_dir().display(),
            MIN_JOB_IMAGES
        ))
        .into());
    }
    sort_by_embedded_number(&mut inputs);

    let images = inputs
        .iter()
        .map(load_rgb)
        .collect::<Result<Vec<_>, _>>()?;
    let oriented: Vec<OrientedImage<'_>> = images
        .iter()
        .zip(cfg.orientations(images.len()))
        .map(|(img, o)| OrientedImage::new(img.view(), o))
        .collect();
    for (path, o) in inputs.iter().zip(&oriented) {
        log::debug!(
            "{} -> yaw {:.1}, pitch {:.1}",
            path.display(),
            o.orientation.yaw_deg,
            o.orientation.pitch_deg
        );
    }

    let mut pano = PanoramaProjector::new(cfg.build_params()).project(&oriented)?;
    if let Some(crop) = &cfg.crop {
        pano = crop_dark_borders(&pano.view(), crop);
    }

    let panorama_path = cfg.output_path();
    if let Some(parent) = panorama_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save_rgb(&panorama_path, &pano)?;
    log::info!("saved panorama to {}", panorama_path.display());

    let faces = match cfg.faces_dir() {
        Some(dir) => split_image(&pano, cfg.cubemap_params(), &dir, &base_name(&panorama_path))?,
        None => BTreeMap::new(),
    };

    Ok(JobSummary {
        inputs,
        panorama_path,
        width: pano.width,
        height: pano.height,
        faces,
    })
}

fn split_image(
    pano: &RgbImage,
    params: CubemapParams,
    out_dir: &Path,
    base: &str,
) -> Result<BTreeMap<Face, PathBuf>, PanosphereIoError> {
    let faces = CubemapCodec::new(params).split(&pano.view())?;
    save_faces(&faces, out_dir, base)
}

/// Split the panorama at `input` into `<stem>_<face>.jpg` files in `out_dir`.
pub fn split_file(
    input: &Path,
    out_dir: &Path,
    params: CubemapParams,
) -> Result<BTreeMap<Face, PathBuf>, PanosphereIoError> {
    let pano = load_rgb(input)?;
    split_image(&pano, params, out_dir, &base_name(input))
}

/// Compose `<base>_<face>.jpg` files from `faces_dir` into a
/// `width x height` equirectangular image at `output`.
pub fn merge_files(
    faces_dir: &Path,
    base: &str,
    width: usize,
    height: usize,
    params: CubemapParams,
    output: &Path,
) -> Result<(), PanosphereIoError> {
    let faces = load_faces(faces_dir, base)?;
    let pano = CubemapCodec::new(params).merge(&faces, width, height)?;
    save_rgb(output, &pano)
}

/// Trim dark stitcher borders from `input` and write the result to `output`.
pub fn crop_file(input: &Path, output: &Path, params: &CropParams) -> Result<(), PanosphereIoError> {
    let img = load_rgb(input)?;
    let cropped = crop_dark_borders(&img.view(), params);
    save_rgb(output, &cropped)
}
