//! Equirectangular ⇄ cubemap conversion.
//!
//! ## Quickstart
//!
//! ```
//! use panosphere_core::RgbImage;
//! use panosphere_cubemap::{equirect_to_faces, faces_to_equirect};
//!
//! let pano = RgbImage::filled(64, 32, [30, 90, 150]);
//! let faces = equirect_to_faces(&pano.view(), Some(16)).unwrap();
//! let back = faces_to_equirect(&faces, 64, 32).unwrap();
//! assert_eq!((back.width, back.height), (64, 32));
//! ```
//!
//! Splitting:
//! 1. For each face and destination pixel centre, build the face-plane
//!    coordinate `(i + 0.5) / size * 2 - 1` on both axes.
//! 2. Map it through the fixed face basis to a direction, normalize, and
//!    convert to longitude/latitude and then to equirectangular `(u, v)`.
//! 3. Bilinear-sample the panorama there, wrapping the longitude seam and
//!    clamping at the poles.
//!
//! Composing runs the inverse per output pixel: pixel centre → angles →
//! direction → dominant face and face-plane `(u, v)` → face pixel.

mod codec;
mod face_map;
mod faces;

pub use codec::{
    default_face_size, equirect_to_faces, faces_to_equirect, faces_to_equirect_with,
    CubemapCodec, CubemapParams, FaceInterpolation,
};
pub use face_map::{FaceSamplingMap, SamplingMapCache};
pub use faces::CubeFaces;
