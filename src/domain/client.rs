//! Client domain entity.
//!
//! Clients are the renting parties. Email is the normalized, globally
//! unique handle; the driver's license number is optional but unique when
//! present (both enforced again at the storage layer).

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::error::ValidationError;
use super::id::ClientId;

/// Minimal `local@domain.tld` shape; full RFC validation is a non-goal.
fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// Whether a client may open new rentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    /// Stored as `0`.
    Inactive,
    /// Stored as `1`.
    Active,
}

impl ClientStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
        }
    }

    /// Parse the storage representation; anything but 0 or 1 is invalid.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Inactive),
            1 => Some(Self::Active),
            _ => None,
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => f.write_str("inactive"),
            Self::Active => f.write_str("active"),
        }
    }
}

/// A registered rental client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: Option<ClientId>,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    license_number: Option<String>,
    status: ClientStatus,
    created_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Build a validated client from raw field values.
    ///
    /// Names are trimmed, the email is trimmed and lower-cased before the
    /// shape check. Phone is stored as given (unvalidated); an empty or
    /// whitespace-only license number is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field if a name
    /// is empty after trimming or the email does not look like
    /// `local@domain.tld`.
    pub fn try_new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
        license_number: Option<&str>,
        status: ClientStatus,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        let email = email.trim().to_lowercase();
        let license_number = license_number
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        if first_name.is_empty() {
            return Err(ValidationError::new("first_name", "cannot be empty"));
        }
        if last_name.is_empty() {
            return Err(ValidationError::new("last_name", "cannot be empty"));
        }
        if email.is_empty() {
            return Err(ValidationError::new("email", "cannot be empty"));
        }
        if !email_regex().is_match(&email) {
            return Err(ValidationError::new(
                "email",
                format!("'{email}' does not match local@domain.tld"),
            ));
        }

        Ok(Self {
            id: None,
            first_name,
            last_name,
            email,
            phone: phone.map(str::to_string),
            license_number,
            status,
            created_at: None,
        })
    }

    /// Rebuild a persisted client from storage, re-running validation.
    pub(crate) fn restore(
        id: ClientId,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
        license_number: Option<&str>,
        status: ClientStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let client = Self::try_new(first_name, last_name, email, phone, license_number, status)?;
        Ok(client.with_identity(id, created_at))
    }

    /// Attach the storage-assigned identity and creation timestamp.
    #[must_use]
    pub(crate) fn with_identity(mut self, id: ClientId, created_at: DateTime<Utc>) -> Self {
        self.id = Some(id);
        self.created_at = Some(created_at);
        self
    }

    /// Storage-assigned identity, if the client has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<ClientId> {
        self.id
    }

    /// Trimmed first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Trimmed last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Normalized (lower-case) email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number exactly as provided.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Driver's license number, if any.
    #[must_use]
    pub fn license_number(&self) -> Option<&str> {
        self.license_number.as_deref()
    }

    /// Account status.
    #[must_use]
    pub const fn status(&self) -> ClientStatus {
        self.status
    }

    /// Creation timestamp, set once by the write path.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// True when the client may open new rentals.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }
}
