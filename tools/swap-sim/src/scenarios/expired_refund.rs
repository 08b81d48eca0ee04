//! Expired non-fungible swap refunded to its sender
//!
//! The receiver never learns the secret. Early withdraw and rollback attempts
//! are refused; after expiry the sender takes the token back and the receiver
//! is locked out for good.

use htlc_contracts::clock::ManualClock;
use htlc_contracts::errors::SwapError;
use htlc_contracts::{HtlcEngine, NewSwap};
use types::asset::{Asset, AssetKind, TokenId};
use types::ids::AccountId;

use crate::scenarios::{ensure, ScenarioConfig, ScenarioResult, SimError};
use crate::secrets::SecretSource;
use crate::GENESIS_TIME;

pub const NAME: &str = "expired_refund";

const LOCK_SECS: i64 = 3600;

pub fn run(secrets: &mut SecretSource, config: &ScenarioConfig) -> Result<ScenarioResult, SimError> {
    let mut result = ScenarioResult::new(NAME);
    let clock = ManualClock::new(GENESIS_TIME);
    let (engine, substrate) = HtlcEngine::in_memory(config.engine.clone(), clock.clone())?;

    let alice = AccountId::new();
    let bob = AccountId::new();
    let token_id = TokenId::new(1);
    let custodian = engine.custodian(AssetKind::NonFungible);
    let collection = {
        let mut registry = substrate.non_fungible_tokens.write();
        let collection = registry.deploy();
        let contract = registry.get_mut(&collection)?;
        contract.mint(alice, token_id)?;
        contract.set_approval_for_all(&alice, custodian, true);
        collection
    };

    let (_, hashlock) = secrets.next_secret();
    let (guess, _) = secrets.next_secret();

    let id = engine
        .new_swap(
            &alice,
            NewSwap {
                receiver: bob,
                hashlock,
                timelock: GENESIS_TIME + LOCK_SECS,
                asset: Asset::non_fungible(collection, token_id),
            },
            0,
        )?
        .id;
    result.swaps_created += 1;

    let owner = || -> Result<AccountId, SimError> {
        let registry = substrate.non_fungible_tokens.read();
        let owner = registry.get(&collection)?.owner_of(token_id)?;
        Ok(owner)
    };
    ensure(owner()? == custodian, "token not in custody after creation")?;

    let early = engine.withdraw(&bob, AssetKind::NonFungible, &id, guess);
    ensure(
        early == Err(SwapError::InvalidPreimage { id }),
        "guessed preimage was not refused",
    )?;
    result.rejections += 1;

    let premature = engine.rollback(&alice, AssetKind::NonFungible, &id);
    ensure(
        matches!(premature, Err(SwapError::NotExpired { .. })),
        "rollback before expiry was not refused",
    )?;
    result.rejections += 1;

    clock.advance(LOCK_SECS);
    engine.rollback(&alice, AssetKind::NonFungible, &id)?;
    result.rollbacks += 1;
    ensure(owner()? == alice, "token not returned to sender")?;

    let late = engine.withdraw(&bob, AssetKind::NonFungible, &id, guess);
    ensure(
        late == Err(SwapError::AlreadySettled { id }),
        "settled swap accepted a withdrawal",
    )?;
    result.rejections += 1;

    let swap = engine.get_swap(AssetKind::NonFungible, &id)?;
    ensure(swap.is_rollback() && swap.preimage.is_none(), "swap record not rolled back")?;

    result.events_emitted = engine.events(AssetKind::NonFungible).len();
    result.passed = true;
    result.details = format!("token {} returned to sender after {}s", token_id, LOCK_SECS);
    Ok(result)
}
