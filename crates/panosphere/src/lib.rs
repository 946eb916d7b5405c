//! High-level facade crate for the `panosphere-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry, cubemap and projector crates
//! - a JSON job format for ring-capture panoramas ([`config`])
//! - (feature `image`) file helpers and end-to-end workflows on top of the
//!   `image` crate ([`io`], [`pipeline`])
//! - (feature `cli`) the `panosphere` command line tool
//!
//! ## Quickstart
//!
//! ```no_run
//! use panosphere::cubemap::equirect_to_faces;
//! use panosphere::io::{load_rgb, save_faces};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pano = load_rgb("pano.jpg")?;
//! let faces = equirect_to_faces(&pano.view(), None)?;
//! save_faces(&faces, "faces", "pano")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `panosphere::core`: RGB buffers, sampling, sphere math, post-processing.
//! - `panosphere::cubemap`: equirectangular <-> six cube faces.
//! - `panosphere::projector`: oriented captures -> blended equirectangular canvas.
//! - `panosphere::io` (feature `image`): decode/encode and face file naming.
//! - `panosphere::pipeline` (feature `image`): directory-to-panorama jobs.

pub use panosphere_core as core;
pub use panosphere_cubemap as cubemap;
pub use panosphere_projector as projector;

pub use panosphere_core::{Face, ProjectionError, RgbImage, RgbImageView};
pub use panosphere_cubemap::{CubeFaces, CubemapCodec, CubemapParams};
pub use panosphere_projector::{OrientedImage, Orientation, PanoramaProjector, ProjectorParams};

pub mod config;
mod error;

#[cfg(feature = "image")]
pub mod io;
#[cfg(feature = "image")]
pub mod pipeline;

pub use config::PanoramaJobConfig;
pub use error::PanosphereIoError;
#[cfg(feature = "image")]
pub use pipeline::MIN_JOB_IMAGES;
