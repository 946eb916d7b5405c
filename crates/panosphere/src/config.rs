//! JSON job configuration for ring-capture panoramas.

use std::fs;
use std::path::{Path, PathBuf};

use panosphere_core::CropParams;
use panosphere_cubemap::{CubemapParams, FaceInterpolation};
use panosphere_projector::{ring_orientations, Orientation, ProjectorParams};
use serde::{Deserialize, Serialize};

use crate::PanosphereIoError;

fn default_yaw_step_deg() -> f64 {
    18.0
}

fn default_pitch_deg() -> f64 {
    25.0
}

/// One projection job: which captures to read, how the camera moved between
/// them, and where the results go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoramaJobConfig {
    /// Directory holding the captures, one per ring position.
    pub input_dir: String,
    /// Yaw added between consecutive captures.
    #[serde(default = "default_yaw_step_deg")]
    pub yaw_step_deg: f64,
    /// Pitch shared by every capture; positive looks up.
    #[serde(default = "default_pitch_deg")]
    pub pitch_deg: f64,
    #[serde(default)]
    pub projector: ProjectorParams,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Where to write `<base>_<face>.jpg` faces; no split when absent.
    #[serde(default)]
    pub faces_dir: Option<String>,
    #[serde(default)]
    pub face_size: Option<usize>,
    /// Trim dark borders before saving.
    #[serde(default)]
    pub crop: Option<CropParams>,
}

impl PanoramaJobConfig {
    pub fn new(input_dir: impl Into<String>) -> Self {
        Self {
            input_dir: input_dir.into(),
            yaw_step_deg: default_yaw_step_deg(),
            pitch_deg: default_pitch_deg(),
            projector: ProjectorParams::default(),
            output_path: None,
            faces_dir: None,
            face_size: None,
            crop: None,
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PanosphereIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PanosphereIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn input_dir(&self) -> PathBuf {
        PathBuf::from(&self.input_dir)
    }

    /// Resolve the output panorama path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("panorama.jpg"))
    }

    pub fn faces_dir(&self) -> Option<PathBuf> {
        self.faces_dir.as_ref().map(PathBuf::from)
    }

    pub fn build_params(&self) -> ProjectorParams {
        self.projector.clone()
    }

    pub fn cubemap_params(&self) -> CubemapParams {
        CubemapParams {
            face_size: self.face_size,
            interpolation: FaceInterpolation::Nearest,
        }
    }

    /// Orientations for `count` captures taken around the ring.
    pub fn orientations(&self, count: usize) -> Vec<Orientation> {
        ring_orientations(count, self.yaw_step_deg, self.pitch_deg)
    }
}
