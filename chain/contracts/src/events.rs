//! Contract events for the swap lifecycle
//!
//! Events are immutable records emitted by ledger operations and are the
//! only channel through which a presentation layer learns outcomes.

use serde::{Deserialize, Serialize};
use types::asset::Asset;
use types::ids::{AccountId, SwapId};
use types::secret::{Hashlock, Preimage};

/// Swap created, asset taken into custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapCreated {
    pub id: SwapId,
    pub sender: AccountId,
    pub receiver: AccountId,
    pub asset: Asset,
    pub hashlock: Hashlock,
    pub timelock: i64,
}

/// Receiver withdrew; the preimage is now public
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapWithdrawn {
    pub id: SwapId,
    pub preimage: Preimage,
}

/// Sender reclaimed the asset after expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRolledBack {
    pub id: SwapId,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    SwapCreated(SwapCreated),
    SwapWithdrawn(SwapWithdrawn),
    SwapRolledBack(SwapRolledBack),
}

impl ContractEvent {
    /// Id of the swap this event belongs to.
    pub fn swap_id(&self) -> SwapId {
        match self {
            ContractEvent::SwapCreated(e) => e.id,
            ContractEvent::SwapWithdrawn(e) => e.id,
            ContractEvent::SwapRolledBack(e) => e.id,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<SwapCreated> for ContractEvent {
    fn from(event: SwapCreated) -> Self {
        ContractEvent::SwapCreated(event)
    }
}

impl From<SwapWithdrawn> for ContractEvent {
    fn from(event: SwapWithdrawn) -> Self {
        ContractEvent::SwapWithdrawn(event)
    }
}

impl From<SwapRolledBack> for ContractEvent {
    fn from(event: SwapRolledBack) -> Self {
        ContractEvent::SwapRolledBack(event)
    }
}
