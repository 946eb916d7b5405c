/// Errors produced by the projection core.
///
/// Geometric math never fails: angles and sampling coordinates are wrapped or
/// clamped into range. These errors only describe malformed buffers and
/// missing inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("invalid cube face identifier `{name}`")]
    InvalidFace { name: String },

    #[error("dimension mismatch in {context}: got {width}x{height}, expected {expected}")]
    DimensionMismatch {
        context: String,
        width: usize,
        height: usize,
        expected: String,
    },

    #[error("empty input: {reason}")]
    EmptyInput { reason: String },
}

impl ProjectionError {
    pub(crate) fn zero_sized(context: impl Into<String>, width: usize, height: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            width,
            height,
            expected: "non-zero width and height".to_string(),
        }
    }

    /// Build a [`ProjectionError::DimensionMismatch`] for a buffer that
    /// should have had another size.
    pub fn mismatch(
        context: impl Into<String>,
        width: usize,
        height: usize,
        expected: impl Into<String>,
    ) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            width,
            height,
            expected: expected.into(),
        }
    }

    /// Build a [`ProjectionError::EmptyInput`].
    pub fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyInput {
            reason: reason.into(),
        }
    }
}
