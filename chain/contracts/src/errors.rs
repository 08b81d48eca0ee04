//! Contract-specific error types
//!
//! Error taxonomy for the token substrate, the asset adapters and the swap
//! ledger. Every engine failure is one named variant; nothing is swallowed.

use thiserror::Error;
use types::asset::{Amount, AssetKind, TokenId};
use types::errors::TypeError;
use types::ids::SwapId;

/// Token substrate errors (native bank, fungible and non-fungible contracts)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Unknown token contract: {contract}")]
    UnknownContract { contract: String },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("Insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: Amount, approved: Amount },

    #[error("Token #{token_id} does not exist")]
    UnknownToken { token_id: TokenId },

    #[error("Token #{token_id} already minted")]
    AlreadyMinted { token_id: TokenId },

    #[error("Caller does not own token #{token_id}")]
    NotOwner { token_id: TokenId },

    #[error("Caller is neither owner nor approved for token #{token_id}")]
    NotOwnerOrApproved { token_id: TokenId },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Asset adapter errors raised while taking or releasing custody
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Attached value {attached} does not equal swap amount {expected}")]
    InsufficientValue { expected: Amount, attached: Amount },

    #[error("Token transfer failed: {0}")]
    TransferFailed(TokenError),

    #[error("Engine is not owner or approved for token #{token_id}")]
    NotOwnerOrApproved { token_id: TokenId },

    #[error("Value attached to a {kind} swap: {attached}")]
    UnexpectedValue { kind: AssetKind, attached: Amount },

    #[error("Asset kind mismatch: adapter handles {expected}, got {actual}")]
    AssetKindMismatch { expected: AssetKind, actual: AssetKind },
}

/// Swap ledger errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwapError {
    #[error("Invalid timelock {timelock}: must be at or after {earliest}")]
    InvalidTimelock { timelock: i64, earliest: i64 },

    #[error("Timelock {timelock} beyond maximum horizon {latest}")]
    TimelockTooFar { timelock: i64, latest: i64 },

    #[error("Invalid asset: {0}")]
    InvalidAsset(#[from] TypeError),

    #[error("Asset lock failed: {0}")]
    AssetLockFailed(AssetError),

    #[error("Asset transfer failed: {0}")]
    AssetTransferFailed(AssetError),

    #[error("Swap not found: {id}")]
    SwapNotFound { id: SwapId },

    #[error("Caller is not the receiver of swap {id}")]
    NotReceiver { id: SwapId },

    #[error("Caller is not the sender of swap {id}")]
    NotSender { id: SwapId },

    #[error("Swap {id} already settled")]
    AlreadySettled { id: SwapId },

    #[error("Preimage does not match hashlock of swap {id}")]
    InvalidPreimage { id: SwapId },

    #[error("Swap {id} not expired: rollback available at {timelock}")]
    NotExpired { id: SwapId, timelock: i64 },

    #[error("Swap id collision: {id}")]
    DuplicateSwapId { id: SwapId },

    /// The ledger was re-entered while a guarded call was in flight. Only an
    /// adapter that calls back into external code can trigger it.
    #[error("Reentrancy detected")]
    Reentrancy,
}

/// Engine configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Minimum lock duration must be positive, got {0}")]
    NonPositiveMinimum(i64),

    #[error("Maximum lock duration {max} below minimum {min}")]
    MaxBelowMin { min: i64, max: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::InsufficientValue {
            expected: 1000,
            attached: 999,
        };
        assert_eq!(
            err.to_string(),
            "Attached value 999 does not equal swap amount 1000"
        );
    }

    #[test]
    fn test_swap_error_display() {
        let err = SwapError::NotExpired {
            id: SwapId::zero(),
            timelock: 3600,
        };
        assert!(err.to_string().contains("3600"));
    }

    #[test]
    fn test_swap_error_from_type_error() {
        let swap_err: SwapError = TypeError::ZeroAmount.into();
        assert!(matches!(swap_err, SwapError::InvalidAsset(_)));
    }

    #[test]
    fn test_lock_failure_wraps_adapter_error() {
        let err = SwapError::AssetLockFailed(AssetError::TransferFailed(
            TokenError::InsufficientAllowance {
                required: 10,
                approved: 5,
            },
        ));
        assert!(err.to_string().contains("allowance"));
    }
}
