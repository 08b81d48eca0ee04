//! Swap Ledger — the authoritative swap-id → swap mapping and state machine
//!
//! One ledger per asset kind, generic over the asset adapter:
//! - `new_swap`: validate, derive id, lock the asset, record `Initiated`
//! - `withdraw`: receiver reveals the preimage, asset released to receiver
//! - `rollback`: after expiry, asset refunded to sender
//! - `get_swap`: read-only lookup; records are never deleted
//!
//! Every mutating call runs all checks first, makes the adapter call the last
//! fallible step, and only then commits the record. A failed call leaves the
//! ledger and custody exactly as they were. Callers hold `&mut self`, so the
//! `state == Initiated` check and the transition out of it cannot interleave
//! with another call on the same ledger.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use types::asset::{Amount, Asset};
use types::ids::{AccountId, SwapId};
use types::secret::{Hashlock, Preimage};
use types::swap::{Swap, SwapState};

use crate::assets::{AssetAdapter, CustodyReceipt};
use crate::config::{EngineConfig, RollbackPolicy};
use crate::errors::SwapError;
use crate::events::{ContractEvent, SwapCreated, SwapRolledBack, SwapWithdrawn};
use crate::hashing::{derive_swap_id, verify_preimage};
use crate::security::{CreationCounter, ReentrancyGuard};

/// Parameters of a swap creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSwap {
    pub receiver: AccountId,
    pub hashlock: Hashlock,
    /// Absolute expiry, unix seconds
    pub timelock: i64,
    pub asset: Asset,
}

/// Ledger record: the public swap plus the custody receipt backing it.
///
/// The receipt is present exactly while the swap is `Initiated`.
#[derive(Debug, Clone)]
struct SwapEntry {
    swap: Swap,
    receipt: Option<CustodyReceipt>,
}

/// Swap ledger for one asset kind.
#[derive(Debug)]
pub struct SwapLedger<A: AssetAdapter> {
    adapter: A,
    /// Ordered by id so that digests are reproducible
    swaps: BTreeMap<SwapId, SwapEntry>,
    counter: CreationCounter,
    reentrancy_guard: ReentrancyGuard,
    config: EngineConfig,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl<A: AssetAdapter> SwapLedger<A> {
    pub fn new(adapter: A, config: EngineConfig) -> Self {
        Self {
            adapter,
            swaps: BTreeMap::new(),
            counter: CreationCounter::new(),
            reentrancy_guard: ReentrancyGuard::new(),
            config,
            events: Vec::new(),
        }
    }

    // ───────────────────────── Create ─────────────────────────

    /// Create a swap, taking custody of its asset from `sender`.
    ///
    /// Emits `SwapCreated`.
    pub fn new_swap(
        &mut self,
        sender: &AccountId,
        request: NewSwap,
        attached_value: Amount,
        now: i64,
    ) -> Result<SwapCreated, SwapError> {
        self.guarded(|ledger| ledger.create(sender, request, attached_value, now))
    }

    fn create(
        &mut self,
        sender: &AccountId,
        request: NewSwap,
        attached_value: Amount,
        now: i64,
    ) -> Result<SwapCreated, SwapError> {
        let NewSwap {
            receiver,
            hashlock,
            timelock,
            asset,
        } = request;

        self.check_timelock(timelock, now)?;
        asset.validate()?;

        let nonce = self.counter.peek();
        let id = derive_swap_id(sender, &receiver, &hashlock, timelock, &asset, nonce);
        if self.swaps.contains_key(&id) {
            return Err(SwapError::DuplicateSwapId { id });
        }

        let receipt = self
            .adapter
            .lock(sender, &asset, attached_value)
            .map_err(SwapError::AssetLockFailed)?;

        self.counter.advance();
        let swap = Swap::initiated(id, *sender, receiver, hashlock, timelock, asset);
        self.swaps.insert(
            id,
            SwapEntry {
                swap,
                receipt: Some(receipt),
            },
        );

        let event = SwapCreated {
            id,
            sender: *sender,
            receiver,
            asset,
            hashlock,
            timelock,
        };
        self.events.push(event.clone().into());

        info!(
            swap_id = %id,
            kind = %A::KIND,
            %sender,
            %receiver,
            %asset,
            timelock,
            "swap created"
        );
        Ok(event)
    }

    fn check_timelock(&self, timelock: i64, now: i64) -> Result<(), SwapError> {
        let earliest = now.saturating_add(self.config.min_lock_duration_secs);
        if timelock < earliest {
            return Err(SwapError::InvalidTimelock { timelock, earliest });
        }
        if let Some(max) = self.config.max_lock_duration_secs {
            let latest = now.saturating_add(max);
            if timelock > latest {
                return Err(SwapError::TimelockTooFar { timelock, latest });
            }
        }
        Ok(())
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Withdraw to the receiver by revealing the preimage.
    ///
    /// Not time-gated: a swap stays withdrawable until a rollback has
    /// actually settled it. Emits `SwapWithdrawn`.
    pub fn withdraw(
        &mut self,
        caller: &AccountId,
        id: &SwapId,
        preimage: Preimage,
    ) -> Result<SwapWithdrawn, SwapError> {
        self.guarded(|ledger| ledger.settle_withdraw(caller, id, preimage))
    }

    fn settle_withdraw(
        &mut self,
        caller: &AccountId,
        id: &SwapId,
        preimage: Preimage,
    ) -> Result<SwapWithdrawn, SwapError> {
        let entry = self
            .swaps
            .get_mut(id)
            .ok_or(SwapError::SwapNotFound { id: *id })?;

        if entry.swap.state != SwapState::Initiated {
            debug!(swap_id = %id, state = %entry.swap.state, "withdraw on settled swap");
            return Err(SwapError::AlreadySettled { id: *id });
        }
        if *caller != entry.swap.receiver {
            return Err(SwapError::NotReceiver { id: *id });
        }
        if !verify_preimage(&entry.swap.hashlock, &preimage) {
            return Err(SwapError::InvalidPreimage { id: *id });
        }

        let receipt = entry
            .receipt
            .take()
            .ok_or(SwapError::AlreadySettled { id: *id })?;
        if let Err(e) = self.adapter.release(&receipt, &entry.swap.receiver) {
            warn!(swap_id = %id, error = %e, "release failed, swap left initiated");
            entry.receipt = Some(receipt);
            return Err(SwapError::AssetTransferFailed(e));
        }

        entry.swap.state = SwapState::Withdrawn;
        entry.swap.preimage = Some(preimage);

        let event = SwapWithdrawn { id: *id, preimage };
        self.events.push(event.clone().into());

        info!(swap_id = %id, kind = %A::KIND, receiver = %caller, "swap withdrawn");
        Ok(event)
    }

    // ───────────────────────── Rollback ─────────────────────────

    /// Refund the sender once the timelock has passed.
    ///
    /// Emits `SwapRolledBack`.
    pub fn rollback(
        &mut self,
        caller: &AccountId,
        id: &SwapId,
        now: i64,
    ) -> Result<SwapRolledBack, SwapError> {
        self.guarded(|ledger| ledger.settle_rollback(caller, id, now))
    }

    fn settle_rollback(
        &mut self,
        caller: &AccountId,
        id: &SwapId,
        now: i64,
    ) -> Result<SwapRolledBack, SwapError> {
        let policy = self.config.rollback_policy;
        let entry = self
            .swaps
            .get_mut(id)
            .ok_or(SwapError::SwapNotFound { id: *id })?;

        if entry.swap.state != SwapState::Initiated {
            debug!(swap_id = %id, state = %entry.swap.state, "rollback on settled swap");
            return Err(SwapError::AlreadySettled { id: *id });
        }
        if policy == RollbackPolicy::SenderOnly && *caller != entry.swap.sender {
            return Err(SwapError::NotSender { id: *id });
        }
        if !entry.swap.is_expired(now) {
            return Err(SwapError::NotExpired {
                id: *id,
                timelock: entry.swap.timelock,
            });
        }

        let receipt = entry
            .receipt
            .take()
            .ok_or(SwapError::AlreadySettled { id: *id })?;
        if let Err(e) = self.adapter.refund(&receipt, &entry.swap.sender) {
            warn!(swap_id = %id, error = %e, "refund failed, swap left initiated");
            entry.receipt = Some(receipt);
            return Err(SwapError::AssetTransferFailed(e));
        }

        entry.swap.state = SwapState::RolledBack;

        let event = SwapRolledBack { id: *id };
        self.events.push(event.clone().into());

        info!(swap_id = %id, kind = %A::KIND, %caller, "swap rolled back");
        Ok(event)
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Full swap record. No side effects.
    pub fn get_swap(&self, id: &SwapId) -> Result<&Swap, SwapError> {
        self.swaps
            .get(id)
            .map(|entry| &entry.swap)
            .ok_or(SwapError::SwapNotFound { id: *id })
    }

    pub fn contains(&self, id: &SwapId) -> bool {
        self.swaps.contains_key(id)
    }

    /// Swaps created by `sender`, in id order.
    pub fn swaps_by_sender(&self, sender: &AccountId) -> Vec<&Swap> {
        self.swaps
            .values()
            .map(|entry| &entry.swap)
            .filter(|swap| swap.sender == *sender)
            .collect()
    }

    /// Swaps payable to `receiver`, in id order.
    pub fn swaps_by_receiver(&self, receiver: &AccountId) -> Vec<&Swap> {
        self.swaps
            .values()
            .map(|entry| &entry.swap)
            .filter(|swap| swap.receiver == *receiver)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.swaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }

    /// Number of swaps still holding custody.
    pub fn open_count(&self) -> usize {
        self.swaps
            .values()
            .filter(|entry| entry.receipt.is_some())
            .count()
    }

    /// SHA-256 over every field of every record in id order.
    pub fn ledger_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (id, entry) in &self.swaps {
            let swap = &entry.swap;
            hasher.update(id.as_bytes());
            hasher.update(swap.sender.as_bytes());
            hasher.update(swap.receiver.as_bytes());
            hasher.update(swap.hashlock.as_bytes());
            hasher.update(swap.timelock.to_be_bytes());
            hasher.update(swap.asset.encode());
            hasher.update([swap.state as u8]);
            // Presence byte keeps a revealed all-zero preimage distinct from none
            hasher.update([swap.preimage.is_some() as u8]);
            hasher.update(swap.preimage_or_zero().as_bytes());
        }
        hasher.finalize().into()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    /// Run `op` under the reentrancy guard, releasing it on every exit path.
    ///
    /// `&mut self` already rules out nested calls through the ledger itself.
    /// The guard covers adapters whose lock or release calls back into
    /// external code holding another route to this ledger.
    fn guarded<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, SwapError>,
    ) -> Result<T, SwapError> {
        if !self.reentrancy_guard.acquire() {
            return Err(SwapError::Reentrancy);
        }
        let result = op(self);
        self.reentrancy_guard.release();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NativeAdapter;
    use crate::errors::AssetError;
    use crate::hashing::hash_preimage;
    use crate::tokens::{NativeBank, SharedBank};

    const NOW: i64 = 1_700_000_000;
    const AMOUNT: Amount = 1_000_000_000_000_000;

    struct Fixture {
        ledger: SwapLedger<NativeAdapter>,
        bank: SharedBank,
        sender: AccountId,
        receiver: AccountId,
        preimage: Preimage,
    }

    fn setup_with(config: EngineConfig) -> Fixture {
        let bank = NativeBank::shared();
        let sender = AccountId::new();
        let receiver = AccountId::new();
        bank.write().mint(sender, 10 * AMOUNT).unwrap();
        let adapter = NativeAdapter::new(bank.clone(), AccountId::new());
        Fixture {
            ledger: SwapLedger::new(adapter, config),
            bank,
            sender,
            receiver,
            preimage: Preimage::from_text("hello").unwrap(),
        }
    }

    fn setup() -> Fixture {
        setup_with(EngineConfig::default())
    }

    fn request(fx: &Fixture) -> NewSwap {
        NewSwap {
            receiver: fx.receiver,
            hashlock: hash_preimage(&fx.preimage),
            timelock: NOW + 3600,
            asset: Asset::native(AMOUNT),
        }
    }

    fn create(fx: &mut Fixture) -> SwapId {
        let req = request(fx);
        let sender = fx.sender;
        fx.ledger.new_swap(&sender, req, AMOUNT, NOW).unwrap().id
    }

    // ─── Creation ───

    #[test]
    fn test_new_swap_records_initiated() {
        let mut fx = setup();
        let id = create(&mut fx);
        let swap = fx.ledger.get_swap(&id).unwrap();
        assert_eq!(swap.state, SwapState::Initiated);
        assert_eq!(swap.preimage, None);
        assert_eq!(swap.asset, Asset::native(AMOUNT));
        assert_eq!(swap.sender, fx.sender);
        assert_eq!(swap.receiver, fx.receiver);
        assert_eq!(fx.bank.read().balance_of(&fx.sender), 9 * AMOUNT);
    }

    #[test]
    fn test_new_swap_emits_created_event() {
        let mut fx = setup();
        let id = create(&mut fx);
        assert_eq!(fx.ledger.events().len(), 1);
        assert!(matches!(
            &fx.ledger.events()[0],
            ContractEvent::SwapCreated(e) if e.id == id && e.timelock == NOW + 3600
        ));
    }

    #[test]
    fn test_identical_requests_get_distinct_ids() {
        let mut fx = setup();
        let a = create(&mut fx);
        let b = create(&mut fx);
        assert_ne!(a, b);
        assert_eq!(fx.ledger.len(), 2);
    }

    #[test]
    fn test_timelock_not_in_future_rejected() {
        let mut fx = setup();
        let mut req = request(&fx);
        req.timelock = NOW;
        let sender = fx.sender;
        let result = fx.ledger.new_swap(&sender, req, AMOUNT, NOW);
        assert_eq!(
            result,
            Err(SwapError::InvalidTimelock {
                timelock: NOW,
                earliest: NOW + 1
            })
        );
        assert!(fx.ledger.is_empty());
    }

    #[test]
    fn test_timelock_beyond_horizon_rejected() {
        let config = EngineConfig {
            max_lock_duration_secs: Some(600),
            ..EngineConfig::default()
        };
        let mut fx = setup_with(config);
        let req = request(&fx);
        let sender = fx.sender;
        let result = fx.ledger.new_swap(&sender, req, AMOUNT, NOW);
        assert!(matches!(result, Err(SwapError::TimelockTooFar { .. })));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut fx = setup();
        let mut req = request(&fx);
        req.asset = Asset::native(0);
        let sender = fx.sender;
        let result = fx.ledger.new_swap(&sender, req, 0, NOW);
        assert!(matches!(result, Err(SwapError::InvalidAsset(_))));
    }

    #[test]
    fn test_lock_failure_leaves_no_record() {
        let mut fx = setup();
        let req = request(&fx);
        let sender = fx.sender;
        let result = fx.ledger.new_swap(&sender, req, AMOUNT - 1, NOW);
        assert!(matches!(
            result,
            Err(SwapError::AssetLockFailed(AssetError::InsufficientValue { .. }))
        ));
        assert!(fx.ledger.is_empty());
        assert!(fx.ledger.events().is_empty());
        assert_eq!(fx.bank.read().balance_of(&fx.sender), 10 * AMOUNT);
    }

    // ─── Withdraw ───

    #[test]
    fn test_withdraw_with_correct_preimage() {
        let mut fx = setup();
        let id = create(&mut fx);
        let receiver = fx.receiver;
        let event = fx.ledger.withdraw(&receiver, &id, fx.preimage).unwrap();
        assert_eq!(event.preimage, fx.preimage);

        let swap = fx.ledger.get_swap(&id).unwrap();
        assert_eq!(swap.state, SwapState::Withdrawn);
        assert_eq!(swap.preimage, Some(fx.preimage));
        assert_eq!(fx.bank.read().balance_of(&receiver), AMOUNT);
        assert_eq!(fx.ledger.open_count(), 0);
    }

    #[test]
    fn test_second_withdraw_already_settled() {
        let mut fx = setup();
        let id = create(&mut fx);
        let receiver = fx.receiver;
        fx.ledger.withdraw(&receiver, &id, fx.preimage).unwrap();
        let result = fx.ledger.withdraw(&receiver, &id, Preimage::zero());
        assert_eq!(result, Err(SwapError::AlreadySettled { id }));
        assert_eq!(fx.bank.read().balance_of(&receiver), AMOUNT);
    }

    #[test]
    fn test_withdraw_wrong_preimage() {
        let mut fx = setup();
        let id = create(&mut fx);
        let digest = fx.ledger.ledger_digest();
        let receiver = fx.receiver;
        let result = fx
            .ledger
            .withdraw(&receiver, &id, Preimage::from_text("wrong").unwrap());
        assert_eq!(result, Err(SwapError::InvalidPreimage { id }));
        assert_eq!(fx.ledger.ledger_digest(), digest);
    }

    #[test]
    fn test_withdraw_by_non_receiver() {
        let mut fx = setup();
        let id = create(&mut fx);
        let sender = fx.sender;
        let result = fx.ledger.withdraw(&sender, &id, fx.preimage);
        assert_eq!(result, Err(SwapError::NotReceiver { id }));
    }

    #[test]
    fn test_withdraw_unknown_swap() {
        let mut fx = setup();
        let receiver = fx.receiver;
        let id = SwapId::new([0xee; 32]);
        let result = fx.ledger.withdraw(&receiver, &id, fx.preimage);
        assert_eq!(result, Err(SwapError::SwapNotFound { id }));
    }

    #[test]
    fn test_withdraw_after_expiry_still_allowed() {
        let mut fx = setup();
        let id = create(&mut fx);
        let receiver = fx.receiver;
        // No clock involved: only a settled rollback closes the swap
        assert!(fx.ledger.withdraw(&receiver, &id, fx.preimage).is_ok());
    }

    // ─── Rollback ───

    #[test]
    fn test_rollback_before_expiry() {
        let mut fx = setup();
        let id = create(&mut fx);
        let sender = fx.sender;
        let result = fx.ledger.rollback(&sender, &id, NOW + 3599);
        assert_eq!(
            result,
            Err(SwapError::NotExpired {
                id,
                timelock: NOW + 3600
            })
        );
        assert_eq!(fx.ledger.get_swap(&id).unwrap().state, SwapState::Initiated);
    }

    #[test]
    fn test_rollback_at_expiry_refunds_sender() {
        let mut fx = setup();
        let id = create(&mut fx);
        let sender = fx.sender;
        fx.ledger.rollback(&sender, &id, NOW + 3600).unwrap();
        let swap = fx.ledger.get_swap(&id).unwrap();
        assert_eq!(swap.state, SwapState::RolledBack);
        assert!(swap.is_rollback());
        assert_eq!(fx.bank.read().balance_of(&sender), 10 * AMOUNT);
    }

    #[test]
    fn test_rollback_by_stranger_rejected_by_default() {
        let mut fx = setup();
        let id = create(&mut fx);
        let stranger = AccountId::new();
        let result = fx.ledger.rollback(&stranger, &id, NOW + 7200);
        assert_eq!(result, Err(SwapError::NotSender { id }));
    }

    #[test]
    fn test_rollback_by_stranger_allowed_when_public() {
        let config = EngineConfig::default().with_rollback_policy(RollbackPolicy::AnyoneAfterExpiry);
        let mut fx = setup_with(config);
        let id = create(&mut fx);
        let stranger = AccountId::new();
        fx.ledger.rollback(&stranger, &id, NOW + 7200).unwrap();
        assert_eq!(fx.bank.read().balance_of(&fx.sender), 10 * AMOUNT);
        assert_eq!(fx.bank.read().balance_of(&stranger), 0);
    }

    #[test]
    fn test_withdraw_after_rollback_already_settled() {
        let mut fx = setup();
        let id = create(&mut fx);
        let sender = fx.sender;
        let receiver = fx.receiver;
        fx.ledger.rollback(&sender, &id, NOW + 3600).unwrap();
        let result = fx.ledger.withdraw(&receiver, &id, fx.preimage);
        assert_eq!(result, Err(SwapError::AlreadySettled { id }));
        assert_eq!(fx.bank.read().balance_of(&receiver), 0);
    }

    #[test]
    fn test_rollback_after_withdraw_already_settled() {
        let mut fx = setup();
        let id = create(&mut fx);
        let sender = fx.sender;
        let receiver = fx.receiver;
        fx.ledger.withdraw(&receiver, &id, fx.preimage).unwrap();
        let result = fx.ledger.rollback(&sender, &id, NOW + 3600);
        assert_eq!(result, Err(SwapError::AlreadySettled { id }));
    }

    // ─── Queries / events ───

    #[test]
    fn test_swaps_by_party() {
        let mut fx = setup();
        create(&mut fx);
        create(&mut fx);
        assert_eq!(fx.ledger.swaps_by_sender(&fx.sender).len(), 2);
        assert_eq!(fx.ledger.swaps_by_receiver(&fx.receiver).len(), 2);
        assert!(fx.ledger.swaps_by_sender(&fx.receiver).is_empty());
    }

    #[test]
    fn test_drain_events() {
        let mut fx = setup();
        let id = create(&mut fx);
        let receiver = fx.receiver;
        fx.ledger.withdraw(&receiver, &id, fx.preimage).unwrap();
        let events = fx.ledger.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], ContractEvent::SwapWithdrawn(_)));
        assert!(fx.ledger.events().is_empty());
    }

    #[test]
    fn test_failed_release_keeps_swap_open() {
        let mut fx = setup();
        let id = create(&mut fx);
        let custodian = fx.ledger.adapter().custodian();
        // Drain custody behind the ledger's back
        fx.bank
            .write()
            .transfer(&custodian, &AccountId::new(), AMOUNT)
            .unwrap();
        let receiver = fx.receiver;
        let result = fx.ledger.withdraw(&receiver, &id, fx.preimage);
        assert!(matches!(result, Err(SwapError::AssetTransferFailed(_))));
        let swap = fx.ledger.get_swap(&id).unwrap();
        assert_eq!(swap.state, SwapState::Initiated);
        assert_eq!(swap.preimage, None);
        assert_eq!(fx.ledger.open_count(), 1);
    }

    // ─── Digest / Guard ───

    #[test]
    fn test_digest_covers_every_field() {
        let mut fx = setup();
        let id = create(&mut fx);
        let mut seen = vec![fx.ledger.ledger_digest()];
        let mut record = |fx: &mut Fixture, edit: &dyn Fn(&mut Swap)| {
            edit(&mut fx.ledger.swaps.get_mut(&id).unwrap().swap);
            let digest = fx.ledger.ledger_digest();
            assert!(!seen.contains(&digest));
            seen.push(digest);
        };
        record(&mut fx, &|swap| swap.sender = AccountId::new());
        record(&mut fx, &|swap| swap.receiver = AccountId::new());
        record(&mut fx, &|swap| swap.hashlock = Hashlock::new([0x11; 32]));
        record(&mut fx, &|swap| swap.timelock += 1);
        record(&mut fx, &|swap| swap.asset = Asset::native(AMOUNT + 1));
        record(&mut fx, &|swap| swap.state = SwapState::Withdrawn);
        record(&mut fx, &|swap| swap.preimage = Some(Preimage::zero()));
        record(&mut fx, &|swap| swap.preimage = Some(Preimage::from_text("x").unwrap()));
    }

    #[test]
    fn test_guard_released_after_every_call() {
        let mut fx = setup();
        let sender = fx.sender;
        let receiver = fx.receiver;

        let id = create(&mut fx);
        assert!(!fx.ledger.reentrancy_guard.is_locked());

        let req = request(&fx);
        assert!(fx.ledger.new_swap(&sender, req, AMOUNT - 1, NOW).is_err());
        assert!(!fx.ledger.reentrancy_guard.is_locked());

        assert!(fx.ledger.withdraw(&receiver, &id, Preimage::zero()).is_err());
        assert!(!fx.ledger.reentrancy_guard.is_locked());

        assert!(fx.ledger.rollback(&sender, &id, NOW).is_err());
        assert!(!fx.ledger.reentrancy_guard.is_locked());

        fx.ledger.rollback(&sender, &id, NOW + 3600).unwrap();
        assert!(!fx.ledger.reentrancy_guard.is_locked());

        assert_eq!(
            fx.ledger.withdraw(&receiver, &id, fx.preimage),
            Err(SwapError::AlreadySettled { id })
        );
        assert!(!fx.ledger.reentrancy_guard.is_locked());
    }
}
