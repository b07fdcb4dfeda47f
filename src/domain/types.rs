//! Value objects that only exist in a valid state.
//!
//! Rows read back from SQLite and payloads accepted over HTTP pass through
//! these constructors before reaching services.
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("id must be greater than zero")]
    NonPositiveId,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("value cannot be empty")]
    EmptyString,
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// `Display` and fallible conversion from the raw representation.
macro_rules! value_object_impls {
    ($name:ident, $raw:ty) => {
        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl TryFrom<$raw> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: $raw) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "i32")]
        pub struct $name(i32);

        impl $name {
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                (value > 0)
                    .then_some(Self(value))
                    .ok_or(TypeConstraintError::NonPositiveId)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        value_object_impls!($name, i32);
    };
}

id_newtype!(AccountId, "Inspection company account (tenant).");
id_newtype!(CustomerId, "Customer row id.");
id_newtype!(DefectId, "Defect row id.");

/// Email address stored trimmed and lower-cased.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let email = email.into().trim().to_lowercase();
        if !email.validate_email() {
            return Err(TypeConstraintError::InvalidEmail);
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

value_object_impls!(EmailAddress, String);

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Trims the input; blank input is rejected.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                match value.trim() {
                    "" => Err(TypeConstraintError::EmptyString),
                    trimmed => Ok(Self(trimmed.to_owned())),
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        value_object_impls!($name, String);
    };
}

non_empty_string_newtype!(CustomerName, "Customer display name.");
non_empty_string_newtype!(DefectArea, "Where the defect was found, e.g. `roof` or `kitchen`.");
non_empty_string_newtype!(DefectDescription, "Inspector's description of a defect.");

/// How serious a recorded defect is.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DefectSeverity {
    #[default]
    Minor,
    Major,
    Safety,
}

impl DefectSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Safety => "safety",
        }
    }
}

impl Display for DefectSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefectSeverity {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "safety" => Ok(Self::Safety),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown severity `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(CustomerId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(AccountId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(DefectId::new(7).map(DefectId::get), Ok(7));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = EmailAddress::new("  Jane@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jane@example.com");
        assert_eq!(
            EmailAddress::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn names_reject_blank_values() {
        assert_eq!(CustomerName::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(&*CustomerName::new(" Acme ").unwrap(), "Acme");
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("Safety".parse::<DefectSeverity>(), Ok(DefectSeverity::Safety));
        assert!("cosmetic".parse::<DefectSeverity>().is_err());
        assert_eq!(DefectSeverity::Major.to_string(), "major");
    }
}
