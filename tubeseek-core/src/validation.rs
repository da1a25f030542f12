//! Typed validation for search input.
//!
//! Each prompted field has its own validator returning a `Result`. Validation
//! is a pure range check: no trimming, no normalization, no I/O.

use std::fmt;
use std::ops::RangeInclusive;

/// Accepted query length, counted in UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane count twice.
pub const QUERY_LENGTH: RangeInclusive<usize> = 1..=100_000;

/// Accepted result limit.
pub const LIMIT_RANGE: RangeInclusive<i64> = 1..=100;

/// Result limit used when the user does not supply one.
pub const DEFAULT_LIMIT: usize = 10;

/// Input rejected by a validator.
///
/// The display text is shown to the user verbatim before re-asking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// Query was empty or longer than the accepted length.
    #[error("Invalid query")]
    Query,
    /// Limit was not a number or fell outside the accepted range.
    #[error("Invalid limits")]
    Limit,
}

/// Validated search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated upper bound on candidates surfaced per search round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResultLimit(usize);

impl ResultLimit {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates raw query text, returning it unchanged when accepted.
///
/// # Errors
/// - `InvalidInput::Query` - Text is empty or exceeds 100 000 UTF-16 code units
pub fn validate_query(raw: impl Into<String>) -> Result<Query, InvalidInput> {
    let raw = raw.into();
    if QUERY_LENGTH.contains(&raw.encode_utf16().count()) {
        Ok(Query(raw))
    } else {
        Err(InvalidInput::Query)
    }
}

/// Validates a numeric result limit.
///
/// # Errors
/// - `InvalidInput::Limit` - Value is below 1 or above 100
pub fn validate_limit(raw: i64) -> Result<ResultLimit, InvalidInput> {
    if LIMIT_RANGE.contains(&raw) {
        // Range check above guarantees the cast is lossless.
        Ok(ResultLimit(raw as usize))
    } else {
        Err(InvalidInput::Limit)
    }
}

/// Parses limit text as typed at a prompt.
///
/// Empty input means "not supplied" and yields the default without
/// consulting [`validate_limit`].
///
/// # Errors
/// - `InvalidInput::Limit` - Text is not an integer or is out of range
pub fn parse_limit(raw: &str) -> Result<ResultLimit, InvalidInput> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(ResultLimit::default());
    }

    let value = raw.parse::<i64>().map_err(|_| InvalidInput::Limit)?;
    validate_limit(value)
}
