//! Error types for the campsite library.
//!
//! This module provides the error hierarchy for every reservation operation,
//! using `thiserror` for ergonomic error handling. Each variant belongs to one
//! [`ErrorKind`], which is what callers (the CLI, an HTTP boundary) match on
//! to decide how to report a failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::reservation::{ReservationId, ReservationStatus};

/// Message reported when a referenced campsite does not exist.
pub const SITE_NOT_FOUND_MESSAGE: &str = "존재하지 않는 캠핑장입니다.";

/// Message reported when a referenced reservation does not exist.
pub const RESERVATION_NOT_FOUND_MESSAGE: &str = "존재하지 않는 예약입니다.";

/// Message reported when a date range overlaps an active reservation.
pub const CONFLICT_MESSAGE: &str = "해당 기간에 이미 예약이 존재합니다.";

/// Message reported when a confirmation code does not match.
pub const UNAUTHORIZED_MESSAGE: &str = "확인 코드가 일치하지 않습니다.";

/// Message reported when cancelling a reservation that is no longer confirmed.
pub const CANNOT_CANCEL_MESSAGE: &str = "취소할 수 없는 상태입니다.";

/// Message reported when updating a reservation that is no longer confirmed.
pub const CANNOT_UPDATE_MESSAGE: &str = "수정할 수 없는 상태입니다.";

/// Result type alias for operations that may fail with a campsite error.
///
/// # Examples
///
/// ```
/// use campsite::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(30)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the campsite library.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced campsite does not exist.
    #[error("{} (site {site_number})", SITE_NOT_FOUND_MESSAGE)]
    SiteNotFound {
        /// The site number that could not be resolved.
        site_number: String,
    },

    /// The referenced reservation does not exist.
    #[error("{} (reservation {id})", RESERVATION_NOT_FOUND_MESSAGE)]
    ReservationNotFound {
        /// The reservation id that could not be found.
        id: ReservationId,
    },

    /// Structurally invalid input.
    #[error("{message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested period overlaps an active reservation on the same site.
    #[error("{}", CONFLICT_MESSAGE)]
    Conflict {
        /// The site number the conflict was detected on.
        site_number: String,
    },

    /// The supplied confirmation code does not match the stored one.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized {
        /// The reservation the caller tried to mutate.
        id: ReservationId,
    },

    /// The reservation's status forbids the requested operation.
    #[error("{message}")]
    InvalidState {
        /// The status the reservation was found in.
        status: ReservationStatus,
        /// The user-facing rejection message.
        message: &'static str,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Coarse classification of [`Error`] values.
///
/// The reservation core guarantees that every failure it reports can be told
/// apart by kind; the concrete variant carries the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced site or reservation does not exist.
    NotFound,
    /// Input failed structural or business-rule validation.
    Validation,
    /// The period overlaps an active reservation.
    Conflict,
    /// The confirmation code did not match.
    Authorization,
    /// The reservation's status forbids the operation.
    InvalidState,
    /// Persistence, configuration, or I/O failure.
    Storage,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not-found"),
            Self::Validation => write!(f, "validation"),
            Self::Conflict => write!(f, "conflict"),
            Self::Authorization => write!(f, "authorization"),
            Self::InvalidState => write!(f, "invalid-state"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns the kind this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use campsite::{Error, ErrorKind};
    ///
    /// let err = Error::Conflict { site_number: "A-1".to_string() };
    /// assert_eq!(err.kind(), ErrorKind::Conflict);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SiteNotFound { .. } | Self::ReservationNotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::DataDirectoryNotFound { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Storage,
        }
    }

    /// Check if error indicates a missing site or reservation.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }

    /// Check if error is a booking conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Builds a validation error for `field`.
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message() {
        let err = Error::Conflict {
            site_number: "A-1".to_string(),
        };
        assert_eq!(err.to_string(), CONFLICT_MESSAGE);
        assert!(err.is_conflict());
    }

    #[test]
    fn test_unauthorized_message() {
        let err = Error::Unauthorized {
            id: ReservationId::new(7),
        };
        assert_eq!(err.to_string(), UNAUTHORIZED_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn test_not_found_messages() {
        let err = Error::SiteNotFound {
            site_number: "Z-9".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains(SITE_NOT_FOUND_MESSAGE));
        assert!(display.contains("Z-9"));
        assert!(err.is_not_found());

        let err = Error::ReservationNotFound {
            id: ReservationId::new(42),
        };
        assert!(err.to_string().contains("42"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_state_message() {
        let err = Error::InvalidState {
            status: ReservationStatus::Cancelled,
            message: CANNOT_CANCEL_MESSAGE,
        };
        assert_eq!(err.to_string(), CANNOT_CANCEL_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: Error = crate::reservation::ValidationError {
            field: "customer_name".into(),
            message: "예약자 이름은 필수입니다.".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "예약자 이름은 필수입니다.");
    }

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            Error::SiteNotFound {
                site_number: "A-1".into(),
            },
            Error::validation("dates", "bad"),
            Error::Conflict {
                site_number: "A-1".into(),
            },
            Error::Unauthorized {
                id: ReservationId::new(1),
            },
            Error::InvalidState {
                status: ReservationStatus::CancelledSameDay,
                message: CANNOT_UPDATE_MESSAGE,
            },
            Error::UnsupportedSchemaVersion {
                expected: 1,
                found: 2,
            },
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(Error::kind).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
