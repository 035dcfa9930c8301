//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types, one per failure class surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// A referenced category or item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed level, fiscal year, or other request argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The persistent store could not be reached or failed the query.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::InvalidArgument(_) => 400,
            Self::StoreUnavailable(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }

    /// Returns true when the message must not be shown to the caller.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "unauthorized")]
    #[case(AppError::Forbidden(String::new()), 403, "forbidden")]
    #[case(AppError::NotFound(String::new()), 404, "not_found")]
    #[case(AppError::InvalidArgument(String::new()), 400, "invalid_argument")]
    #[case(AppError::StoreUnavailable(String::new()), 500, "store_unavailable")]
    fn test_error_status_and_code(
        #[case] error: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_internal_errors_are_hidden() {
        assert!(AppError::StoreUnavailable("pool timed out".into()).is_internal());
        assert!(!AppError::Forbidden("viewer".into()).is_internal());
        assert!(!AppError::NotFound("category".into()).is_internal());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("category 1".into()).to_string(),
            "Not found: category 1"
        );
        assert_eq!(
            AppError::InvalidArgument("level".into()).to_string(),
            "Invalid argument: level"
        );
        assert_eq!(
            AppError::StoreUnavailable("down".into()).to_string(),
            "Store unavailable: down"
        );
    }
}
