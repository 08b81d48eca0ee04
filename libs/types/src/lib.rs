//! Types library for the hashed timelock swap engine
//!
//! This library provides the data model shared by the contract layer and
//! the tooling around it: identities, digests, asset payloads and the swap
//! record itself.
//!
//! # Version
//! v1.0.0 - Frozen data model
//!
//! # Modules
//! - `ids`: Identities (AccountId, ContractId) and the derived SwapId
//! - `secret`: Hashlock and preimage digests
//! - `asset`: Asset kinds and the asset payload tagged union
//! - `swap`: Swap record and its state machine
//! - `errors`: Type-level validation errors

/// Generates a 32-byte newtype that renders and parses as `0x`-prefixed hex
/// and serializes as that same string.
macro_rules! bytes32_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Wrap raw bytes.
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// The all-zero value.
            pub const fn zero() -> Self {
                Self([0u8; 32])
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Lowercase hex with a `0x` prefix.
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .unwrap_or(s);
                let raw = hex::decode(digits)
                    .map_err(|e| $crate::errors::TypeError::InvalidHex(e.to_string()))?;
                let bytes: [u8; 32] = raw.as_slice().try_into().map_err(|_| {
                    $crate::errors::TypeError::InvalidLength {
                        expected: 32,
                        actual: raw.len(),
                    }
                })?;
                Ok(Self(bytes))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// Public modules
pub mod errors;
pub mod ids;
pub mod secret;
pub mod asset;
pub mod swap;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asset::*;
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::secret::*;
    pub use crate::swap::*;
}
