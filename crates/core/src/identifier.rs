//! UUID-backed identifiers.
//!
//! [`Identifier`] is the untyped value object; [`CategoryId`],
//! [`CastMemberId`] and [`GenreId`] are distinct newtypes over it so one
//! entity's key cannot be handed to another entity's repository.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Immutable, validated UUID value. Equality is by value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a new random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse any textual UUID representation (hyphenated, simple, braced,
    /// URN). Surrounding whitespace is not stripped. Fails with
    /// [`CoreError::InvalidIdentifier`] otherwise.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| CoreError::InvalidIdentifier(value.to_string()))
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for Identifier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.to_string()
    }
}

macro_rules! impl_typed_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Identifier);

        impl $name {
            pub fn new() -> Self {
                Self(Identifier::new())
            }

            pub fn parse(value: &str) -> Result<Self, CoreError> {
                Identifier::parse(value).map(Self)
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(Identifier::from_uuid(uuid))
            }

            pub fn as_uuid(&self) -> &Uuid {
                self.0.as_uuid()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Identifier> for $name {
            fn from(value: Identifier) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Identifier {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

impl_typed_identifier!(
    /// Primary key of a [`crate::category::Category`].
    CategoryId
);
impl_typed_identifier!(
    /// Primary key of a [`crate::cast_member::CastMember`].
    CastMemberId
);
impl_typed_identifier!(
    /// Primary key of a [`crate::genre::Genre`].
    GenreId
);
