//! Core types and utilities for panorama projection.
//!
//! This crate is small and purely geometric. It owns the RGB buffer types,
//! the bilinear [`bilinear_sample`] fetch with its border policies, and the
//! [`sphere`] module that converts between face-plane coordinates, direction
//! vectors, longitude/latitude and equirectangular pixels. It never touches
//! files.

mod crop;
mod error;
mod filter;
mod image;
mod logger;
mod sampler;
pub mod sphere;

pub use crop::{crop_dark_borders, find_dark_border_crop, CropParams, CropRect};
pub use error::ProjectionError;
pub use filter::{bilateral_filter, BilateralParams};
pub use image::{quantize, rgb_buffer_len, Rgb, RgbF, RgbImage, RgbImageView, CHANNELS};
pub use sampler::{bilinear_sample, nearest_sample, BorderMode};
pub use sphere::{Face, FaceBasis, FaceUv, LonLat};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{
    init_verbosity, init_with_level, tracing_directives, verbosity_level, LOG_TARGETS,
};
