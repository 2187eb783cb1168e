//! Field-level validation shared by every entity mutator.
//!
//! # Responsibility
//! - Normalize caller input (trim, lowercase hex, uppercase state codes).
//! - Classify every rejection as an argument failure or a range failure.
//!
//! # Invariants
//! - Validators never mutate entity state; they return the normalized value.
//! - Length limits count characters, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});

/// Typed rejection raised by entity mutators and finder key checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value is empty after trimming.
    Empty { field: &'static str },
    /// Value has the wrong shape (non-hex, bad email, non-numeric, ...).
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
    /// Value exceeds the column width.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Value must have an exact length.
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Identifier or counter is zero or negative.
    NotPositive { field: &'static str, value: i64 },
    /// Number lies outside its closed interval.
    OutOfBounds {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl ValidationError {
    /// Name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::InvalidFormat { field, .. }
            | Self::TooLong { field, .. }
            | Self::WrongLength { field, .. }
            | Self::NotPositive { field, .. }
            | Self::OutOfBounds { field, .. } => field,
        }
    }

    /// Returns `true` for length/range violations and `false` for
    /// empty or malformed input.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            Self::TooLong { .. }
                | Self::WrongLength { .. }
                | Self::NotPositive { .. }
                | Self::OutOfBounds { .. }
        )
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} is empty"),
            Self::InvalidFormat { field, reason } => write!(f, "{field} is invalid: {reason}"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters, max {max}")
            }
            Self::WrongLength {
                field,
                expected,
                actual,
            } => write!(
                f,
                "{field} must be exactly {expected} characters, got {actual}"
            ),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::OutOfBounds {
                field,
                min,
                max,
                value,
            } => write!(f, "{field} must be within [{min}, {max}], got {value}"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and enforces a non-empty, bounded text field.
pub fn bounded_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let actual = trimmed.chars().count();
    if actual > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max: max_chars,
            actual,
        });
    }

    Ok(trimmed.to_string())
}

/// Trims `value` and requires a non-empty lookup key.
pub fn search_key(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

/// Normalizes to lowercase hex and enforces an exact length.
pub fn fixed_hex(
    field: &'static str,
    value: &str,
    expected: usize,
) -> Result<String, ValidationError> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "not a hexadecimal string",
        });
    }

    let actual = normalized.chars().count();
    if actual != expected {
        return Err(ValidationError::WrongLength {
            field,
            expected,
            actual,
        });
    }

    Ok(normalized)
}

/// Trims and checks email syntax, then the column width.
pub fn email(field: &'static str, value: &str, max_chars: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "not a valid email address",
        });
    }

    let actual = trimmed.chars().count();
    if actual > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max: max_chars,
            actual,
        });
    }

    Ok(trimmed.to_string())
}

/// Two ASCII letters, stored uppercase.
pub fn state_code(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "state code must contain letters only",
        });
    }

    let actual = trimmed.chars().count();
    if actual != 2 {
        return Err(ValidationError::WrongLength {
            field,
            expected: 2,
            actual,
        });
    }

    Ok(trimmed.to_ascii_uppercase())
}

pub fn positive_id(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

pub fn optional_positive_id(
    field: &'static str,
    value: Option<i64>,
) -> Result<Option<i64>, ValidationError> {
    value.map(|id| positive_id(field, id)).transpose()
}

/// Requires a finite number inside the closed interval `[min, max]`.
pub fn bounded_float(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "not a finite number",
        });
    }

    if value < min || value > max {
        return Err(ValidationError::OutOfBounds {
            field,
            min,
            max,
            value,
        });
    }

    Ok(value)
}

/// Parses textual coordinate input before any range check.
pub fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let parsed = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "not a number",
        })?;
    if !parsed.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "not a finite number",
        });
    }
    Ok(parsed)
}
