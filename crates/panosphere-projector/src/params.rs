use panosphere_core::BilateralParams;
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::PanoramaProjector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorParams {
    /// Horizontal field of view of every capture, in degrees.
    pub h_fov_deg: f64,
    /// Vertical field of view of every capture, in degrees.
    pub v_fov_deg: f64,
    /// Equirectangular canvas width in pixels.
    pub output_width: usize,
    /// Equirectangular canvas height in pixels.
    pub output_height: usize,
    /// Width in source columns of the linear blend ramp at the left and
    /// right image edges. `0` disables feathering.
    pub feather_width: usize,
    /// Optional edge-preserving smoothing of the finalized canvas.
    pub post_filter: Option<BilateralParams>,
}

impl Default for ProjectorParams {
    fn default() -> Self {
        Self {
            h_fov_deg: 60.0,
            v_fov_deg: 40.0,
            output_width: 4000,
            output_height: 2000,
            feather_width: 100,
            post_filter: None,
        }
    }
}

/// Camera orientation of one capture.
///
/// Positive yaw turns right (towards +x); positive pitch looks up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw_deg: f64,
    pub pitch_deg: f64,
}

impl Orientation {
    pub fn new(yaw_deg: f64, pitch_deg: f64) -> Self {
        Self { yaw_deg, pitch_deg }
    }
}

/// Orientations of `count` shots taken while rotating by `yaw_step_deg`
/// between shots at a fixed pitch.
pub fn ring_orientations(count: usize, yaw_step_deg: f64, pitch_deg: f64) -> Vec<Orientation> {
    (0..count)
        .map(|i| Orientation::new(i as f64 * yaw_step_deg, pitch_deg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_steps_yaw() {
        let r = ring_orientations(3, 18.0, 25.0);
        assert_eq!(
            r,
            vec![
                Orientation::new(0.0, 25.0),
                Orientation::new(18.0, 25.0),
                Orientation::new(36.0, 25.0)
            ]
        );
        assert!(ring_orientations(0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn params_fill_missing_fields_from_defaults() {
        let p: ProjectorParams = serde_json::from_str(r#"{ "output_width": 400 }"#).unwrap();
        assert_eq!(p.output_width, 400);
        assert_eq!(p.output_height, 2000);
        assert_eq!(p.feather_width, 100);
        assert!(p.post_filter.is_none());
    }
}
