//! Errors reported while building a formatter.

use std::fmt;

/// Raised from [`Builder::build`](crate::Builder::build) when the supplied
/// configuration cannot produce a working formatter.
///
/// Both variants are construction-time only and carry the offending value.
/// Formatting itself has no error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Facility code outside the standard 0..=23 range while validation is on.
    NonStandardFacility(u8),
    /// Detail threshold named a level missing from the level table.
    InvalidLevel(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonStandardFacility(code) => {
                write!(f, "syslog facility code invalid: {}", code)
            }
            Self::InvalidLevel(name) => write!(f, "unknown log level: '{}'", name),
        }
    }
}

impl std::error::Error for Error {}
