use panosphere_core::ProjectionError;

/// Errors from the file-facing helpers of the facade.
#[derive(thiserror::Error, Debug)]
pub enum PanosphereIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error("image {width}x{height} does not fit the encoder's 32-bit dimensions")]
    TooLarge { width: usize, height: usize },
}
