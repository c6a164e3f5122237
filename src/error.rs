//! Validation errors raised while constructing a workout.

/// Why a workout could not be created from the supplied inputs.
///
/// Every variant names the offending field so the caller can point the user
/// at the right form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field} is outside the valid coordinate range")]
    OutOfRange { field: &'static str },

    #[error("id must not be empty")]
    MissingId,
}

impl ValidationError {
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NonFinite { field }
            | Self::NonPositive { field }
            | Self::OutOfRange { field } => field,
            Self::MissingId => "id",
        }
    }
}
