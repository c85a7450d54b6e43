//! Shared GUID canonicalization primitives.
//!
//! This crate is the single source of truth for what a canonical GUID looks
//! like in guidxref output: 32 uppercase hexadecimal digits grouped 8-4-4-4-12
//! and joined by dashes. The scanner builds [`Guid`] values either from the
//! eleven fields of a C initializer (`{ 0x.., 0x.., 0x.., { 0x.., ... } }`) or
//! from an already dash-delimited registry string.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Number of hexadecimal fields in a structured GUID initializer.
pub const FIELD_COUNT: usize = 11;

/// Canonical digit width of each initializer field, in order.
///
/// Field 1 is the 32-bit `Data1`, fields 2-3 are the 16-bit `Data2`/`Data3`,
/// fields 4-11 are the eight bytes of `Data4`.
pub const FIELD_WIDTHS: [usize; FIELD_COUNT] = [8, 4, 4, 2, 2, 2, 2, 2, 2, 2, 2];

/// Digit width of each dash-separated group in the registry form.
pub const GROUP_WIDTHS: [usize; 5] = [8, 4, 4, 4, 12];

/// Errors from GUID canonicalization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuidIdError {
    /// An initializer field has more significant digits than its width allows.
    #[error("Field #{field}: value '{value}' does not fit in {width} hex digits")]
    FieldOverflow {
        /// 1-based field number.
        field: usize,
        /// The field text as written in the source.
        value: String,
        /// Canonical width of the field.
        width: usize,
    },

    /// An initializer field is empty or contains non-hexadecimal characters.
    #[error("Field #{field}: '{value}' is not a hexadecimal number")]
    InvalidHex {
        /// 1-based field number.
        field: usize,
        /// The field text as written in the source.
        value: String,
    },

    /// A registry-form string does not have the 8-4-4-4-12 shape.
    #[error("Invalid GUID '{text}': {cause}")]
    Malformed {
        /// The raw text that failed to parse.
        text: String,
        /// Human-readable description of the problem.
        cause: String,
    },
}

/// A 128-bit GUID.
///
/// Ordering follows the numeric value, which is the same as the lexicographic
/// order of the canonical text because the text is fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid(Uuid);

impl Guid {
    /// GUID whose canonical text is `value` as 32 hex digits, most
    /// significant first.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Build a GUID from the eleven fields of a structured initializer.
    ///
    /// Each field may carry an optional `0x`/`0X` prefix, any number of
    /// leading zeros and mixed case. See [`canonicalize_field`].
    ///
    /// # Errors
    /// Returns [`GuidIdError::InvalidHex`] or [`GuidIdError::FieldOverflow`]
    /// for the first field that cannot be canonicalized.
    pub fn from_fields<S: AsRef<str>>(fields: &[S; FIELD_COUNT]) -> Result<Self, GuidIdError> {
        let mut digits = String::with_capacity(32);
        for (i, (field, width)) in fields.iter().zip(FIELD_WIDTHS).enumerate() {
            digits.push_str(&canonicalize_field(i + 1, field.as_ref(), width)?);
        }
        Self::from_digits(&digits)
    }

    /// Parse a dash-delimited registry-form GUID (`A5102DBA-C528-47bd-...`).
    ///
    /// Group widths must be exactly 8-4-4-4-12; case is ignored.
    ///
    /// # Errors
    /// Returns [`GuidIdError::Malformed`] if the text does not have that shape.
    pub fn parse_registry(text: &str) -> Result<Self, GuidIdError> {
        let malformed = |cause: String| GuidIdError::Malformed {
            text: text.to_owned(),
            cause,
        };

        let groups: Vec<&str> = text.trim().split('-').collect();
        if groups.len() != GROUP_WIDTHS.len() {
            return Err(malformed(format!(
                "expected {} dash-separated groups, got {}",
                GROUP_WIDTHS.len(),
                groups.len()
            )));
        }

        for (i, (group, width)) in groups.iter().zip(GROUP_WIDTHS).enumerate() {
            if group.len() != width || !is_hex(group) {
                return Err(malformed(format!(
                    "group #{} must be {width} hex digits, got '{group}'",
                    i + 1
                )));
            }
        }
        Uuid::try_parse(text.trim())
            .map(Self)
            .map_err(|e| malformed(e.to_string()))
    }

    fn from_digits(digits: &str) -> Result<Self, GuidIdError> {
        u128::from_str_radix(digits, 16)
            .map(Self::from_u128)
            .map_err(|e| GuidIdError::Malformed {
                text: digits.to_owned(),
                cause: e.to_string(),
            })
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.hyphenated())
    }
}

impl FromStr for Guid {
    type Err = GuidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_registry(s)
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returns `true` if `text` is non-empty and made only of ASCII hex digits.
#[inline]
#[must_use]
pub fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Canonicalize one initializer field to exactly `width` uppercase digits.
///
/// Leading zeros are dropped before the width check, so `0x00000005` is a
/// valid 2-digit field (`05`) while `0x1FFFFFFFF` is not a valid 8-digit one.
/// Values are never truncated.
///
/// # Arguments
/// * `field` - 1-based field number, used in error messages
/// * `raw` - The field text, with or without a `0x` prefix
/// * `width` - Canonical digit width of this field
///
/// # Errors
/// Returns [`GuidIdError::InvalidHex`] if the digits are not hexadecimal, or
/// [`GuidIdError::FieldOverflow`] if the value needs more than `width` digits.
pub fn canonicalize_field(field: usize, raw: &str, width: usize) -> Result<String, GuidIdError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);

    if !is_hex(digits) {
        return Err(GuidIdError::InvalidHex {
            field,
            value: raw.to_owned(),
        });
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() > width {
        return Err(GuidIdError::FieldOverflow {
            field,
            value: raw.to_owned(),
            width,
        });
    }

    Ok(format!("{:0>width$}", significant.to_ascii_uppercase()))
}
