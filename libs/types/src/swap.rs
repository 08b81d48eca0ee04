//! Swap record and lifecycle state
//!
//! A swap is created in `Initiated` and leaves it exactly once, either to
//! `Withdrawn` (receiver revealed the preimage) or to `RolledBack` (sender
//! reclaimed the asset after expiry). Terminal records are never deleted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::Asset;
use crate::ids::{AccountId, SwapId};
use crate::secret::{Hashlock, Preimage};

/// Lifecycle state of a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapState {
    /// Asset in escrow, awaiting withdrawal or rollback
    Initiated,
    /// Receiver withdrew with the correct preimage
    Withdrawn,
    /// Sender reclaimed the asset after expiry
    RolledBack,
}

impl SwapState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapState::Withdrawn | SwapState::RolledBack)
    }

    /// Only `Initiated → Withdrawn` and `Initiated → RolledBack` are legal.
    pub fn can_transition_to(&self, next: SwapState) -> bool {
        matches!(
            (self, next),
            (SwapState::Initiated, SwapState::Withdrawn) | (SwapState::Initiated, SwapState::RolledBack)
        )
    }
}

impl fmt::Display for SwapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SwapState::Initiated => "initiated",
            SwapState::Withdrawn => "withdrawn",
            SwapState::RolledBack => "rolled_back",
        };
        f.write_str(s)
    }
}

/// A hashed timelock swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub id: SwapId,
    pub sender: AccountId,
    pub receiver: AccountId,
    pub hashlock: Hashlock,
    /// Absolute expiry, unix seconds
    pub timelock: i64,
    pub asset: Asset,
    pub state: SwapState,
    /// Set once by a successful withdrawal
    pub preimage: Option<Preimage>,
}

impl Swap {
    /// A freshly created swap in `Initiated` with no revealed preimage.
    pub fn initiated(
        id: SwapId,
        sender: AccountId,
        receiver: AccountId,
        hashlock: Hashlock,
        timelock: i64,
        asset: Asset,
    ) -> Self {
        Self {
            id,
            sender,
            receiver,
            hashlock,
            timelock,
            asset,
            state: SwapState::Initiated,
            preimage: None,
        }
    }

    pub fn is_initiated(&self) -> bool {
        self.state == SwapState::Initiated
    }

    /// `isWithdraw` flag of the classic HTLC view.
    pub fn is_withdraw(&self) -> bool {
        self.state == SwapState::Withdrawn
    }

    /// `isRollback` flag of the classic HTLC view.
    pub fn is_rollback(&self) -> bool {
        self.state == SwapState::RolledBack
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.timelock
    }

    /// Revealed preimage, or the all-zero value while none is known.
    pub fn preimage_or_zero(&self) -> Preimage {
        self.preimage.unwrap_or_else(Preimage::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_swap() -> Swap {
        Swap::initiated(
            SwapId::new([1u8; 32]),
            AccountId::new(),
            AccountId::new(),
            Hashlock::new([2u8; 32]),
            1_700_003_600,
            Asset::native(1_000_000_000_000_000),
        )
    }

    #[test]
    fn test_state_transitions() {
        assert!(SwapState::Initiated.can_transition_to(SwapState::Withdrawn));
        assert!(SwapState::Initiated.can_transition_to(SwapState::RolledBack));
        assert!(!SwapState::Withdrawn.can_transition_to(SwapState::RolledBack));
        assert!(!SwapState::RolledBack.can_transition_to(SwapState::Withdrawn));
        assert!(!SwapState::Initiated.can_transition_to(SwapState::Initiated));
        assert!(!SwapState::Withdrawn.can_transition_to(SwapState::Initiated));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SwapState::Initiated.is_terminal());
        assert!(SwapState::Withdrawn.is_terminal());
        assert!(SwapState::RolledBack.is_terminal());
    }

    #[test]
    fn test_initiated_swap_flags() {
        let swap = sample_swap();
        assert!(swap.is_initiated());
        assert!(!swap.is_withdraw());
        assert!(!swap.is_rollback());
        assert!(swap.preimage_or_zero().is_zero());
    }

    #[test]
    fn test_expiry_boundary() {
        let swap = sample_swap();
        assert!(!swap.is_expired(swap.timelock - 1));
        assert!(swap.is_expired(swap.timelock));
    }

    #[test]
    fn test_swap_serialization() {
        let swap = sample_swap();
        let json = serde_json::to_string(&swap).unwrap();
        let back: Swap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, swap);
    }
}
