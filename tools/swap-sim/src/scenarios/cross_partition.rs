//! Cross-partition atomic swap
//!
//! Alice trades native value for Bob's fungible tokens under one hashlock:
//! 1. Alice locks native value for Bob (long timelock)
//! 2. Bob locks tokens for Alice under the same hashlock (short timelock)
//! 3. Alice withdraws the tokens, revealing the preimage
//! 4. Bob reads the preimage from the event log and withdraws the value

use htlc_contracts::clock::ManualClock;
use htlc_contracts::events::ContractEvent;
use htlc_contracts::{HtlcEngine, NewSwap};
use types::asset::{Amount, Asset, AssetKind};
use types::ids::AccountId;
use types::secret::Preimage;

use crate::scenarios::{ensure, ScenarioConfig, ScenarioResult, SimError};
use crate::secrets::SecretSource;
use crate::GENESIS_TIME;

pub const NAME: &str = "cross_partition_swap";

const NATIVE_AMOUNT: Amount = 1_000_000_000_000_000;
const TOKEN_AMOUNT: Amount = 500;

pub fn run(secrets: &mut SecretSource, config: &ScenarioConfig) -> Result<ScenarioResult, SimError> {
    let mut result = ScenarioResult::new(NAME);
    let clock = ManualClock::new(GENESIS_TIME);
    let (engine, substrate) = HtlcEngine::in_memory(config.engine.clone(), clock.clone())?;

    let alice = AccountId::new();
    let bob = AccountId::new();
    substrate.bank.write().mint(alice, NATIVE_AMOUNT)?;
    let token = {
        let mut registry = substrate.fungible_tokens.write();
        let token = registry.deploy();
        let contract = registry.get_mut(&token)?;
        contract.mint(bob, 1_000)?;
        contract.approve(&bob, engine.custodian(AssetKind::Fungible), TOKEN_AMOUNT);
        token
    };

    let (preimage, hashlock) = secrets.next_secret();

    let native_id = engine
        .new_swap(
            &alice,
            NewSwap {
                receiver: bob,
                hashlock,
                timelock: GENESIS_TIME + 7200,
                asset: Asset::native(NATIVE_AMOUNT),
            },
            NATIVE_AMOUNT,
        )?
        .id;
    result.swaps_created += 1;

    let token_id = engine
        .new_swap(
            &bob,
            NewSwap {
                receiver: alice,
                hashlock,
                timelock: GENESIS_TIME + 3600,
                asset: Asset::fungible(token, TOKEN_AMOUNT),
            },
            0,
        )?
        .id;
    result.swaps_created += 1;

    clock.advance(600);
    engine.withdraw(&alice, AssetKind::Fungible, &token_id, preimage)?;
    result.withdrawals += 1;

    let revealed = engine
        .events(AssetKind::Fungible)
        .iter()
        .find_map(|event| match event {
            ContractEvent::SwapWithdrawn(e) if e.id == token_id => Some(e.preimage),
            _ => None,
        })
        .unwrap_or_else(Preimage::zero);
    ensure(revealed == preimage, "preimage not revealed by withdrawal event")?;

    engine.withdraw(&bob, AssetKind::Native, &native_id, revealed)?;
    result.withdrawals += 1;

    let bank = substrate.bank.read();
    ensure(bank.balance_of(&bob) == NATIVE_AMOUNT, "bob did not receive native value")?;
    ensure(bank.balance_of(&alice) == 0, "alice kept native value")?;
    let tokens = substrate.fungible_tokens.read();
    let contract = tokens.get(&token)?;
    ensure(contract.balance_of(&alice) == TOKEN_AMOUNT, "alice did not receive tokens")?;
    ensure(
        contract.balance_of(&engine.custodian(AssetKind::Fungible)) == 0,
        "tokens left in custody",
    )?;

    result.events_emitted =
        engine.events(AssetKind::Native).len() + engine.events(AssetKind::Fungible).len();
    result.passed = true;
    result.details = format!(
        "native {} -> bob, {} tokens -> alice, preimage {}",
        NATIVE_AMOUNT, TOKEN_AMOUNT, revealed
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_partition_swap_passes() {
        let mut secrets = SecretSource::new(42);
        let result = run(&mut secrets, &ScenarioConfig::default()).unwrap();
        assert!(result.passed, "{}", result.details);
        assert_eq!(result.swaps_created, 2);
        assert_eq!(result.withdrawals, 2);
        assert_eq!(result.events_emitted, 4);
    }

    #[test]
    fn test_short_max_lock_aborts() {
        let mut secrets = SecretSource::new(42);
        let mut config = ScenarioConfig::default();
        config.engine.max_lock_duration_secs = Some(60);
        let result = run(&mut secrets, &config);
        assert!(matches!(result, Err(SimError::Swap(_))));
    }
}
