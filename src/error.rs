use std::num::ParseFloatError;
use thiserror::Error;

/// Everything that can go wrong while building or mutating a shape.
///
/// All variants are invalid-argument failures: a geometric parameter that is
/// not a positive finite number, a kind or name the factory does not know, or
/// a description that does not follow `<shape> <param>[ <param>]`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("dimensions must be positive, got {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("unknown shape type: '{0}'")]
    UnknownKind(String),

    #[error("unknown shape: '{0}'")]
    UnknownShape(String),

    #[error("shape description is empty")]
    EmptyDescription,

    #[error("missing {parameter} for {shape}")]
    MissingParameter {
        shape: &'static str,
        parameter: &'static str,
    },

    #[error("malformed {parameter} '{token}': {source}")]
    MalformedNumber {
        parameter: &'static str,
        token: String,
        #[source]
        source: ParseFloatError,
    },
}

impl ShapeError {
    /// Every shape error is an invalid argument; kept as a method so callers
    /// can branch on the category without listing variants.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            ShapeError::InvalidRadius(_)
            | ShapeError::InvalidDimensions { .. }
            | ShapeError::UnknownKind(_)
            | ShapeError::UnknownShape(_)
            | ShapeError::EmptyDescription
            | ShapeError::MissingParameter { .. }
            | ShapeError::MalformedNumber { .. } => true,
        }
    }

    /// True for failures coming from the description grammar rather than
    /// from the geometric values themselves.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ShapeError::EmptyDescription
                | ShapeError::MissingParameter { .. }
                | ShapeError::MalformedNumber { .. }
        )
    }
}

pub type Result<T, E = ShapeError> = std::result::Result<T, E>;

/// Accepts only finite values strictly greater than zero.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
