//! Error types for the scheduling core.

use thiserror::Error;

/// A time-of-day string did not match the `HH:mm` pattern.
///
/// The offending input is carried verbatim so form layers can echo it back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time of day `{0}`: expected HH:mm")]
pub struct FormatError(pub String);
