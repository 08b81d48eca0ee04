//! HTLC engine — the three asset partitions behind one call surface
//!
//! Each asset kind has its own ledger, id space and event log. Calls are
//! routed by the asset kind of the request (or the caller-supplied kind for
//! id-addressed calls). Each partition sits behind its own mutex, so calls on
//! different partitions run concurrently while calls on the same partition
//! are serialized. "Now" comes from the injected clock.

use parking_lot::Mutex;
use tracing::info;
use types::asset::{Amount, AssetKind};
use types::ids::{AccountId, SwapId};
use types::secret::Preimage;
use types::swap::Swap;

use crate::assets::{AssetAdapter, FungibleAdapter, NativeAdapter, NonFungibleAdapter};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::errors::{ConfigError, SwapError};
use crate::events::{ContractEvent, SwapCreated, SwapRolledBack, SwapWithdrawn};
use crate::ledger::{NewSwap, SwapLedger};
use crate::tokens::{
    FungibleTokens, NativeBank, NonFungibleTokens, SharedBank, SharedFungibleTokens,
    SharedNonFungibleTokens,
};

/// Lock the ledger of partition `$kind` and evaluate `$body` with it bound
/// to `$ledger`.
macro_rules! with_ledger {
    ($engine:expr, $kind:expr, $ledger:ident => $body:expr) => {
        match $kind {
            AssetKind::Native => {
                let mut guard = $engine.native.lock();
                let $ledger = &mut *guard;
                $body
            }
            AssetKind::Fungible => {
                let mut guard = $engine.fungible.lock();
                let $ledger = &mut *guard;
                $body
            }
            AssetKind::NonFungible => {
                let mut guard = $engine.non_fungible.lock();
                let $ledger = &mut *guard;
                $body
            }
        }
    };
}

/// One adapter per partition.
#[derive(Debug, Clone)]
pub struct Adapters {
    pub native: NativeAdapter,
    pub fungible: FungibleAdapter,
    pub non_fungible: NonFungibleAdapter,
}

/// Handles to the in-process token state backing an in-memory engine.
#[derive(Debug, Clone)]
pub struct InMemorySubstrate {
    pub bank: SharedBank,
    pub fungible_tokens: SharedFungibleTokens,
    pub non_fungible_tokens: SharedNonFungibleTokens,
}

pub struct HtlcEngine<C: Clock = SystemClock> {
    native: Mutex<SwapLedger<NativeAdapter>>,
    fungible: Mutex<SwapLedger<FungibleAdapter>>,
    non_fungible: Mutex<SwapLedger<NonFungibleAdapter>>,
    clock: C,
    config: EngineConfig,
}

impl<C: Clock> HtlcEngine<C> {
    pub fn new(config: EngineConfig, clock: C, adapters: Adapters) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            rollback_policy = ?config.rollback_policy,
            min_lock_duration_secs = config.min_lock_duration_secs,
            "htlc engine started"
        );
        Ok(Self {
            native: Mutex::new(SwapLedger::new(adapters.native, config.clone())),
            fungible: Mutex::new(SwapLedger::new(adapters.fungible, config.clone())),
            non_fungible: Mutex::new(SwapLedger::new(adapters.non_fungible, config.clone())),
            clock,
            config,
        })
    }

    /// Engine over fresh in-process token state, one custodian per partition.
    pub fn in_memory(config: EngineConfig, clock: C) -> Result<(Self, InMemorySubstrate), ConfigError> {
        let substrate = InMemorySubstrate {
            bank: NativeBank::shared(),
            fungible_tokens: FungibleTokens::shared(),
            non_fungible_tokens: NonFungibleTokens::shared(),
        };
        let adapters = Adapters {
            native: NativeAdapter::new(substrate.bank.clone(), AccountId::new()),
            fungible: FungibleAdapter::new(substrate.fungible_tokens.clone(), AccountId::new()),
            non_fungible: NonFungibleAdapter::new(
                substrate.non_fungible_tokens.clone(),
                AccountId::new(),
            ),
        };
        let engine = Self::new(config, clock, adapters)?;
        Ok((engine, substrate))
    }

    // ───────────────────────── Operations ─────────────────────────

    /// Create a swap in the partition of `request.asset`.
    pub fn new_swap(
        &self,
        caller: &AccountId,
        request: NewSwap,
        attached_value: Amount,
    ) -> Result<SwapCreated, SwapError> {
        let now = self.clock.now();
        with_ledger!(self, request.asset.kind(), ledger => {
            ledger.new_swap(caller, request, attached_value, now)
        })
    }

    /// Snapshot of a swap record.
    pub fn get_swap(&self, kind: AssetKind, id: &SwapId) -> Result<Swap, SwapError> {
        with_ledger!(self, kind, ledger => ledger.get_swap(id).cloned())
    }

    pub fn withdraw(
        &self,
        caller: &AccountId,
        kind: AssetKind,
        id: &SwapId,
        preimage: Preimage,
    ) -> Result<SwapWithdrawn, SwapError> {
        with_ledger!(self, kind, ledger => ledger.withdraw(caller, id, preimage))
    }

    pub fn rollback(
        &self,
        caller: &AccountId,
        kind: AssetKind,
        id: &SwapId,
    ) -> Result<SwapRolledBack, SwapError> {
        let now = self.clock.now();
        with_ledger!(self, kind, ledger => ledger.rollback(caller, id, now))
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn swaps_by_sender(&self, kind: AssetKind, sender: &AccountId) -> Vec<Swap> {
        with_ledger!(self, kind, ledger => {
            ledger.swaps_by_sender(sender).into_iter().cloned().collect()
        })
    }

    pub fn swaps_by_receiver(&self, kind: AssetKind, receiver: &AccountId) -> Vec<Swap> {
        with_ledger!(self, kind, ledger => {
            ledger.swaps_by_receiver(receiver).into_iter().cloned().collect()
        })
    }

    pub fn swap_count(&self, kind: AssetKind) -> usize {
        with_ledger!(self, kind, ledger => ledger.len())
    }

    pub fn open_count(&self, kind: AssetKind) -> usize {
        with_ledger!(self, kind, ledger => ledger.open_count())
    }

    /// Custodian account of a partition.
    pub fn custodian(&self, kind: AssetKind) -> AccountId {
        with_ledger!(self, kind, ledger => ledger.adapter().custodian())
    }

    pub fn ledger_digest(&self, kind: AssetKind) -> [u8; 32] {
        with_ledger!(self, kind, ledger => ledger.ledger_digest())
    }

    pub fn events(&self, kind: AssetKind) -> Vec<ContractEvent> {
        with_ledger!(self, kind, ledger => ledger.events().to_vec())
    }

    pub fn drain_events(&self, kind: AssetKind) -> Vec<ContractEvent> {
        with_ledger!(self, kind, ledger => ledger.drain_events())
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
