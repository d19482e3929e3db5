// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of document identifiers.
pub const ID_LEN: usize = 16;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("invalid id length {0}, expected {1} bytes")]
    InvalidLength(usize, usize),

    #[error("invalid hex encoding in id string")]
    InvalidHexEncoding(#[from] hex::FromHexError),
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(#[serde(with = "hex::serde")] [u8; ID_LEN]);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(rand::random())
            }

            /// Create an identifier from its raw bytes representation.
            pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
                Self(bytes)
            }

            /// Bytes of the identifier.
            pub fn as_bytes(&self) -> &[u8; ID_LEN] {
                &self.0
            }

            /// Convert the identifier to a hex string.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; ID_LEN]> for $name {
            fn from(value: [u8; ID_LEN]) -> Self {
                Self(value)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = IdError;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                let value_len = value.len();
                let checked_value: [u8; ID_LEN] = value
                    .try_into()
                    .map_err(|_| IdError::InvalidLength(value_len, ID_LEN))?;
                Ok(Self(checked_value))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::try_from(hex::decode(value)?.as_slice())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user account.
    UserId
);

define_id!(
    /// Identifier of a workspace.
    WorkspaceId
);

define_id!(
    /// Identifier of a project within a workspace.
    ProjectId
);

define_id!(
    /// Identifier of a task within a project.
    TaskId
);

define_id!(
    /// Identifier of a seeded role document.
    RoleId
);

define_id!(
    /// Identifier of a membership record.
    MemberId
);
