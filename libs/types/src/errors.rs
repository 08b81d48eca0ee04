//! Error types for the swap data model
//!
//! Validation failures raised while parsing or checking types, before any
//! contract state is touched.

use thiserror::Error;

/// Type-level validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Preimage text too long: {len} bytes (max 32)")]
    PreimageTooLong { len: usize },

    #[error("Asset amount must be positive")]
    ZeroAmount,

    #[error("Token id must be non-zero")]
    ZeroTokenId,

    #[error("Unknown asset kind: {0}")]
    UnknownAssetKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_display() {
        let err = TypeError::InvalidLength {
            expected: 32,
            actual: 20,
        };
        assert_eq!(err.to_string(), "Invalid length: expected 32 bytes, got 20");
    }

    #[test]
    fn test_unknown_asset_kind_display() {
        let err = TypeError::UnknownAssetKind("erc1155".to_string());
        assert!(err.to_string().contains("erc1155"));
    }
}
