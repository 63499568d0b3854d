//! Campsite identity types.
//!
//! Sites are addressed by callers through their human-readable number
//! (`"A-1"`); the store assigns each one an internal [`SiteId`].

use std::fmt;

use serde::Serialize;

use crate::reservation::ValidationError;

/// Store-assigned identifier of a campsite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SiteId(i64);

impl SiteId {
    /// Wraps a raw database id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable campsite.
///
/// # Examples
///
/// ```
/// use campsite::{Site, SiteId};
///
/// let site = Site::new(SiteId::new(1), "A-1", Some("Riverside".to_string())).unwrap();
/// assert_eq!(site.number(), "A-1");
/// assert_eq!(format!("{site}"), "A-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    id: SiteId,
    number: String,
    description: Option<String>,
}

impl Site {
    /// Creates a site record.
    ///
    /// The site number is trimmed; an empty description is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is blank.
    pub fn new(
        id: SiteId,
        number: impl AsRef<str>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let number = normalize_site_number(number.as_ref())?;
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            number,
            description,
        })
    }

    /// Returns the store-assigned id.
    #[must_use]
    pub const fn id(&self) -> SiteId {
        self.id
    }

    /// Returns the human-readable site number, which is also the lock key.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}

/// Trims a site number and rejects blank input.
///
/// # Errors
///
/// Returns an error if nothing is left after trimming.
pub fn normalize_site_number(number: &str) -> Result<String, ValidationError> {
    let trimmed = number.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: "site_number".into(),
            message: "캠핑장 번호는 필수입니다.".into(),
        });
    }
    Ok(trimmed.to_string())
}
