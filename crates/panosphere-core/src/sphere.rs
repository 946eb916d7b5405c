//! Spherical coordinate math: cube-face bases, direction vectors, angles and
//! equirectangular pixel coordinates.
//!
//! The camera frame is right-handed with x to the right, y down and z
//! forward. Latitude is positive below the horizon, so it grows with the
//! equirectangular row index. The `top` face is the +y face of the fixed
//! basis below.
//!
//! Nothing here fails on numeric input: longitudes wrap, latitudes and
//! coordinates clamp, degenerate vectors fall back to the forward axis.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

use crate::ProjectionError;

/// One of the six cube faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    /// All faces, in storage order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }

    /// Position in [`Face::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Linear map taking `(a, b, 1)` to the face direction.
    ///
    /// front: (a, b, 1); back: (-a, b, -1); right: (1, b, -a);
    /// left: (-1, b, a); top: (a, 1, -b); bottom: (a, -1, b).
    pub fn basis(self) -> FaceBasis {
        #[rustfmt::skip]
        let m = match self {
            Face::Front => Matrix3::new(
                1.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 0.0, 1.0,
            ),
            Face::Back => Matrix3::new(
                -1.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 0.0, -1.0,
            ),
            Face::Right => Matrix3::new(
                0.0, 0.0, 1.0,
                0.0, 1.0, 0.0,
                -1.0, 0.0, 0.0,
            ),
            Face::Left => Matrix3::new(
                0.0, 0.0, -1.0,
                0.0, 1.0, 0.0,
                1.0, 0.0, 0.0,
            ),
            Face::Top => Matrix3::new(
                1.0, 0.0, 0.0,
                0.0, 0.0, 1.0,
                0.0, -1.0, 0.0,
            ),
            Face::Bottom => Matrix3::new(
                1.0, 0.0, 0.0,
                0.0, 0.0, -1.0,
                0.0, 1.0, 0.0,
            ),
        };
        FaceBasis { m }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Face {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ProjectionError::InvalidFace { name: s.to_string() })
    }
}

/// Per-face basis, resolved once per conversion so the pixel loop does not
/// branch on the face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBasis {
    m: Matrix3<f64>,
}

impl FaceBasis {
    /// Unnormalized direction for face-plane coordinates `a, b` in `[-1, 1]`.
    #[inline]
    pub fn direction(&self, a: f64, b: f64) -> Vector3<f64> {
        self.m * Vector3::new(a, b, 1.0)
    }
}

/// Longitude/latitude pair in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

/// Face hit by a direction and the normalized face-plane coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceUv {
    pub face: Face,
    pub u: f64,
    pub v: f64,
}

/// Unnormalized direction for `face` at face-plane coordinates `(a, b)`.
#[inline]
pub fn direction_for_face(face: Face, a: f64, b: f64) -> Vector3<f64> {
    face.basis().direction(a, b)
}

/// Normalize a direction; zero or non-finite vectors map to +z.
#[inline]
pub fn normalize_direction(d: Vector3<f64>) -> Vector3<f64> {
    d.try_normalize(f64::EPSILON)
        .filter(|n| n.iter().all(|c| c.is_finite()))
        .unwrap_or_else(Vector3::z)
}

/// `lon = atan2(x, z)`, `lat = asin(y)` of the normalized direction.
#[inline]
pub fn angles_from_direction(d: Vector3<f64>) -> LonLat {
    let n = normalize_direction(d);
    LonLat {
        lon: n.x.atan2(n.z),
        lat: n.y.clamp(-1.0, 1.0).asin(),
    }
}

/// Unit direction for the given angles (exact inverse of [`angles_from_direction`]).
#[inline]
pub fn direction_from_angles(lon: f64, lat: f64) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    Vector3::new(cos_lat * sin_lon, sin_lat, cos_lat * cos_lon)
}

/// Wrap a longitude into `[-PI, PI)`.
#[inline]
pub fn wrap_longitude(lon: f64) -> f64 {
    if !lon.is_finite() {
        return 0.0;
    }
    (lon + PI).rem_euclid(TAU) - PI
}

/// Clamp a latitude into `[-PI/2, PI/2]`.
#[inline]
pub fn clamp_latitude(lat: f64) -> f64 {
    if !lat.is_finite() {
        return 0.0;
    }
    lat.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Continuous horizontal canvas coordinate for `lon`, wrapped into `[0, width)`.
#[inline]
pub fn equirect_u(lon: f64, width: usize) -> f64 {
    let w = width as f64;
    let u = (wrap_longitude(lon) + PI) / TAU * w;
    // rem_euclid can round up to exactly `w`
    if u >= w || u < 0.0 {
        0.0
    } else {
        u
    }
}

/// Continuous vertical canvas coordinate for `lat`, not clamped.
#[inline]
pub fn equirect_v_unclamped(lat: f64, height: usize) -> f64 {
    (lat + FRAC_PI_2) / PI * height as f64
}

/// Equirectangular coordinates `(u, v)` for the given angles.
///
/// `u = (lon + PI) / 2PI * W` wrapped into `[0, W)`;
/// `v = (lat + PI/2) / PI * H` clamped into `[0, H - 1]`.
#[inline]
pub fn equirect_pixel_from_angles(lon: f64, lat: f64, width: usize, height: usize) -> Point2<f64> {
    let u = equirect_u(lon, width);
    let v = if lat.is_finite() {
        equirect_v_unclamped(lat, height)
    } else {
        equirect_v_unclamped(0.0, height)
    };
    Point2::new(u, v.clamp(0.0, height.saturating_sub(1) as f64))
}

/// Angles at continuous equirectangular coordinates (use `x + 0.5` for a
/// pixel centre). Inverse of [`equirect_pixel_from_angles`] inside the canvas.
#[inline]
pub fn angles_from_equirect_pixel(u: f64, v: f64, width: usize, height: usize) -> LonLat {
    LonLat {
        lon: wrap_longitude(u / width as f64 * TAU - PI),
        lat: clamp_latitude(v / height as f64 * PI - FRAC_PI_2),
    }
}

/// Select the dominant face of `d` and project onto it.
///
/// Ties between axes resolve in the order x, y, z. Returned `u, v` are in
/// `[-1, 1]` and satisfy `direction_for_face(face, u, v) ∥ d`.
#[inline]
pub fn face_uv_from_direction(d: Vector3<f64>) -> FaceUv {
    let d = normalize_direction(d);
    let (x, y, z) = (d.x, d.y, d.z);
    let (ax, ay, az) = (x.abs(), y.abs(), z.abs());

    let (face, u, v) = if ax >= ay && ax >= az {
        if x > 0.0 {
            (Face::Right, -z / ax, y / ax)
        } else {
            (Face::Left, z / ax, y / ax)
        }
    } else if ay >= az {
        if y > 0.0 {
            (Face::Top, x / ay, -z / ay)
        } else {
            (Face::Bottom, x / ay, z / ay)
        }
    } else if z > 0.0 {
        (Face::Front, x / az, y / az)
    } else {
        (Face::Back, -x / az, y / az)
    };

    FaceUv {
        face,
        u: u.clamp(-1.0, 1.0),
        v: v.clamp(-1.0, 1.0),
    }
}

/// Integer face pixel for face-plane coordinates:
/// `round((u + 1) / 2 * (size - 1))`, clamped into `[0, size - 1]`.
#[inline]
pub fn face_pixel_from_uv(u: f64, v: f64, size: usize) -> (usize, usize) {
    let max = size.saturating_sub(1) as f64;
    let px = ((u + 1.0) * 0.5 * max).round().clamp(0.0, max);
    let py = ((v + 1.0) * 0.5 * max).round().clamp(0.0, max);
    (px as usize, py as usize)
}

/// Continuous face coordinates for face-plane `u, v`, using the same
/// `(size - 1)` scaling as [`face_pixel_from_uv`].
#[inline]
pub fn face_coords_from_uv(u: f64, v: f64, size: usize) -> Point2<f64> {
    let max = size.saturating_sub(1) as f64;
    Point2::new((u + 1.0) * 0.5 * max, (v + 1.0) * 0.5 * max)
}

/// Face-plane coordinate of destination pixel centre `i` on a face of `size` pixels.
#[inline]
pub fn face_plane_coord(i: usize, size: usize) -> f64 {
    (i as f64 + 0.5) / size as f64 * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec(v: Vector3<f64>, e: [f64; 3]) {
        assert_eq!([v.x, v.y, v.z], e, "expected {e:?}, got {v:?}");
    }

    #[test]
    fn face_basis_fixed_points() {
        assert_vec(direction_for_face(Face::Front, 0.0, 0.0), [0.0, 0.0, 1.0]);
        assert_vec(direction_for_face(Face::Back, 0.0, 0.0), [0.0, 0.0, -1.0]);
        assert_vec(direction_for_face(Face::Right, 0.0, 0.0), [1.0, 0.0, 0.0]);
        assert_vec(direction_for_face(Face::Left, 0.0, 0.0), [-1.0, 0.0, 0.0]);
        assert_vec(direction_for_face(Face::Top, 0.0, 0.0), [0.0, 1.0, 0.0]);
        assert_vec(direction_for_face(Face::Bottom, 0.0, 0.0), [0.0, -1.0, 0.0]);
    }

    #[test]
    fn face_basis_matches_documented_formulas() {
        let (a, b) = (0.25, -0.75);
        assert_vec(direction_for_face(Face::Front, a, b), [a, b, 1.0]);
        assert_vec(direction_for_face(Face::Back, a, b), [-a, b, -1.0]);
        assert_vec(direction_for_face(Face::Right, a, b), [1.0, b, -a]);
        assert_vec(direction_for_face(Face::Left, a, b), [-1.0, b, a]);
        assert_vec(direction_for_face(Face::Top, a, b), [a, 1.0, -b]);
        assert_vec(direction_for_face(Face::Bottom, a, b), [a, -1.0, b]);
    }

    #[test]
    fn face_names_parse_and_reject_unknown() {
        for f in Face::ALL {
            assert_eq!(f.name().parse::<Face>().unwrap(), f);
            assert_eq!(Face::ALL[f.index()], f);
        }
        let err = "sideways".parse::<Face>().unwrap_err();
        assert_eq!(
            err,
            ProjectionError::InvalidFace {
                name: "sideways".to_string()
            }
        );
    }

    #[test]
    fn face_uv_inverts_face_direction() {
        for face in Face::ALL {
            for &(a, b) in &[(0.0, 0.0), (0.5, -0.3), (-0.9, 0.9), (0.99, 0.2)] {
                let d = direction_for_face(face, a, b);
                let uv = face_uv_from_direction(d);
                assert_eq!(uv.face, face);
                assert_abs_diff_eq!(uv.u, a, epsilon = 1e-12);
                assert_abs_diff_eq!(uv.v, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn face_ties_prefer_x_then_y() {
        assert_eq!(face_uv_from_direction(Vector3::new(1.0, 1.0, 1.0)).face, Face::Right);
        assert_eq!(face_uv_from_direction(Vector3::new(0.0, -1.0, 1.0)).face, Face::Bottom);
    }

    #[test]
    fn angles_round_trip_through_direction() {
        for &(lon, lat) in &[(0.0, 0.0), (1.2, -0.4), (-2.9, 1.3), (3.0, -1.5)] {
            let d = direction_from_angles(lon, lat);
            assert_abs_diff_eq!(d.norm(), 1.0, epsilon = 1e-12);
            let a = angles_from_direction(d * 3.5);
            assert_abs_diff_eq!(a.lon, lon, epsilon = 1e-12);
            assert_abs_diff_eq!(a.lat, lat, epsilon = 1e-12);
        }
    }

    #[test]
    fn degenerate_direction_falls_back_to_forward() {
        let a = angles_from_direction(Vector3::zeros());
        assert_eq!((a.lon, a.lat), (0.0, 0.0));
        assert_eq!(face_uv_from_direction(Vector3::zeros()).face, Face::Front);
    }

    #[test]
    fn longitude_wraps_continuously_at_seam() {
        for &w in &[64usize, 360, 1000] {
            for &eps in &[1e-6, 0.01, 0.3, 1.0] {
                let a = equirect_pixel_from_angles(PI + eps, 0.2, w, w / 2);
                let b = equirect_pixel_from_angles(-PI + eps, 0.2, w, w / 2);
                assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
                assert!(a.x >= 0.0 && a.x < w as f64);
            }
        }
    }

    #[test]
    fn extreme_longitudes_wrap_to_the_same_pixel() {
        let base = equirect_pixel_from_angles(PI + 0.1, 0.3, 400, 200);
        for turns in [2.0, -3.0, 50.0] {
            let p = equirect_pixel_from_angles(PI + 0.1 + turns * TAU, 0.3, 400, 200);
            assert_abs_diff_eq!(p.x, base.x, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, base.y, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(
            equirect_pixel_from_angles(5.0 * PI + 0.1, 0.3, 400, 200).x,
            base.x,
            epsilon = 1e-9
        );
    }

    #[test]
    fn latitude_clamps_to_last_row() {
        let p = equirect_pixel_from_angles(0.3, 2.0, 200, 100);
        assert_eq!(p.y, 99.0);
        let q = equirect_pixel_from_angles(0.3, -2.0, 200, 100);
        assert_eq!(q.y, 0.0);
    }

    #[test]
    fn equirect_pixel_inverts() {
        let (w, h) = (400, 200);
        let a = angles_from_equirect_pixel(123.5, 77.5, w, h);
        let p = equirect_pixel_from_angles(a.lon, a.lat, w, h);
        assert_abs_diff_eq!(p.x, 123.5, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 77.5, epsilon = 1e-9);
    }

    #[test]
    fn face_pixel_rounds_and_clamps() {
        assert_eq!(face_pixel_from_uv(-1.0, 1.0, 64), (0, 63));
        assert_eq!(face_pixel_from_uv(0.0, 0.0, 65), (32, 32));
        assert_eq!(face_pixel_from_uv(-3.0, 7.0, 8), (0, 7));
    }
}
