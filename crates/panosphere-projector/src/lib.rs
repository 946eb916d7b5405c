//! Forward projection of oriented planar captures onto an equirectangular
//! canvas.
//!
//! Every source pixel is sent to the canvas pixel at its absolute angle
//! (capture yaw/pitch plus its offset inside the field of view). Overlaps are
//! blended with a [`FeatherMask`] that fades each capture out towards its
//! left and right edges, and the weighted sum is normalized once all images
//! are in.
//!
//! ```
//! use panosphere_core::RgbImage;
//! use panosphere_projector::{project_panorama, OrientedImage, Orientation, ProjectorParams};
//!
//! let shot = RgbImage::filled(120, 80, [200, 40, 40]);
//! let params = ProjectorParams {
//!     output_width: 360,
//!     output_height: 180,
//!     feather_width: 20,
//!     ..ProjectorParams::default()
//! };
//! let pano = project_panorama(
//!     &[OrientedImage::new(shot.view(), Orientation::new(0.0, 0.0))],
//!     &params,
//! )?;
//! assert_eq!(pano.pixel(180, 90), [200, 40, 40]);
//! assert_eq!(pano.pixel(0, 0), [0, 0, 0]);
//! # Ok::<(), panosphere_core::ProjectionError>(())
//! ```
//!
//! With the default `rayon` feature images are projected into per-thread
//! partial accumulators which are then summed.

mod accumulator;
mod feather;
mod params;
mod projector;

pub use accumulator::Accumulator;
pub use feather::{gaussian_feather, FeatherMask};
pub use params::{ring_orientations, Orientation, ProjectorParams};
pub use projector::{accumulate, project_panorama, OrientedImage, PanoramaProjector};
