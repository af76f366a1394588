//! Error types for neuranet.

use thiserror::Error;

/// Errors produced while building a tensor or updating its gradient.
#[derive(Debug, Error)]
pub enum Error {
    /// The constructor was handed something that is not a tensor, sequence or dense array.
    #[error("the input must be a tensor, sequence or dense array, but '{type_name}' was given")]
    InvalidInputType { type_name: String },

    /// The input was of an accepted kind but could not be turned into a dense buffer.
    #[error("cannot construct tensor: {0}")]
    Construction(String),

    /// Gradient contribution does not match the tensor's shape.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    /// Gradient hook called on a tensor built with `requires_grad = false`.
    #[error("tensor was not created with requires_grad = true")]
    GradNotTracked,

    /// Integer gradient accumulation would overflow the element type.
    #[error("gradient accumulation overflows {dtype}")]
    GradOverflow { dtype: crate::dtype::DType },
}

impl Error {
    pub(crate) fn construction(msg: impl Into<String>) -> Self {
        Error::Construction(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
