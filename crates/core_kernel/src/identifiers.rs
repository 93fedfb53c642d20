//! Strongly-typed business identifiers
//!
//! Claims, policies and payments are referred to by prefixed numeric codes
//! (`PETCLM00012345`, `PETPOL00089234`, ...). Newtype wrappers validate the
//! shape once at the boundary so the rest of the system cannot mix them up.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing an identifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("{kind} must start with '{prefix}': {value}")]
    MissingPrefix {
        kind: &'static str,
        prefix: &'static str,
        value: String,
    },

    #[error("{kind} must have {digits} digits after '{prefix}': {value}")]
    InvalidDigits {
        kind: &'static str,
        prefix: &'static str,
        digits: usize,
        value: String,
    },
}

macro_rules! define_code {
    ($name:ident, $prefix:literal, $digits:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Builds the identifier from its numeric part
            pub fn from_number(number: u64) -> Self {
                Self(format!("{}{:0width$}", $prefix, number, width = $digits))
            }

            /// Returns the identifier prefix
            pub fn prefix() -> &'static str {
                $prefix
            }

            /// Returns the full code
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the numeric part of the code
            pub fn number(&self) -> u64 {
                self.0[$prefix.len()..].parse().unwrap_or_default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let upper = trimmed.to_ascii_uppercase();
                let digits = upper.strip_prefix($prefix).ok_or_else(|| {
                    IdentifierError::MissingPrefix {
                        kind: stringify!($name),
                        prefix: $prefix,
                        value: trimmed.to_string(),
                    }
                })?;
                if digits.len() != $digits || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(IdentifierError::InvalidDigits {
                        kind: stringify!($name),
                        prefix: $prefix,
                        digits: $digits,
                        value: trimmed.to_string(),
                    });
                }
                Ok(Self(upper))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_code!(ClaimNumber, "PETCLM", 8);
define_code!(PolicyNumber, "PETPOL", 8);
define_code!(ReferenceId, "DMAG", 7);
define_code!(PaymentReference, "TXN", 10);

impl PaymentReference {
    /// Generates a reference from the last ten digits of the current
    /// millisecond timestamp
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis().unsigned_abs();
        Self::from_number(millis % 10_000_000_000)
    }
}
