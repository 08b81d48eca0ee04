//! Withdraw / rollback race at expiry
//!
//! For each round a native swap is left to expire, then the receiver's
//! withdrawal and the sender's rollback are released at the same instant on
//! two threads. Exactly one may settle; the other must see `AlreadySettled`.

use std::sync::{Arc, Barrier};
use std::thread;

use htlc_contracts::clock::{Clock, ManualClock};
use htlc_contracts::errors::SwapError;
use htlc_contracts::{HtlcEngine, NewSwap};
use tracing::debug;
use types::asset::{Amount, Asset, AssetKind};
use types::ids::AccountId;

use crate::scenarios::{ensure, ScenarioConfig, ScenarioResult, SimError};
use crate::secrets::SecretSource;
use crate::GENESIS_TIME;

pub const NAME: &str = "expiry_race";

const STAKE: Amount = 1_000;
const LOCK_SECS: i64 = 30;

pub fn run(secrets: &mut SecretSource, config: &ScenarioConfig) -> Result<ScenarioResult, SimError> {
    let mut result = ScenarioResult::new(NAME);
    let clock = ManualClock::new(GENESIS_TIME);
    let (engine, substrate) = HtlcEngine::in_memory(config.engine.clone(), clock.clone())?;
    let engine = Arc::new(engine);

    let alice = AccountId::new();
    let bob = AccountId::new();
    let rounds = config.race_rounds as u128;
    substrate.bank.write().mint(alice, STAKE * rounds)?;

    for round in 0..config.race_rounds {
        let (preimage, hashlock) = secrets.next_secret();
        let id = engine
            .new_swap(
                &alice,
                NewSwap {
                    receiver: bob,
                    hashlock,
                    timelock: clock.now() + LOCK_SECS,
                    asset: Asset::native(STAKE),
                },
                STAKE,
            )?
            .id;
        result.swaps_created += 1;
        clock.advance(LOCK_SECS);

        let barrier = Arc::new(Barrier::new(2));
        let withdrawer = {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine
                    .withdraw(&bob, AssetKind::Native, &id, preimage)
                    .map(|_| ())
            })
        };
        let roller = {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.rollback(&alice, AssetKind::Native, &id).map(|_| ())
            })
        };
        let withdrawn = withdrawer.join().map_err(|_| SimError::Worker)?;
        let rolled_back = roller.join().map_err(|_| SimError::Worker)?;

        let loser = match (&withdrawn, &rolled_back) {
            (Ok(()), Err(e)) => {
                result.withdrawals += 1;
                e
            }
            (Err(e), Ok(())) => {
                result.rollbacks += 1;
                e
            }
            _ => {
                return Err(SimError::Check(format!(
                    "round {}: withdraw {:?}, rollback {:?}",
                    round, withdrawn, rolled_back
                )))
            }
        };
        ensure(
            *loser == SwapError::AlreadySettled { id },
            format!("round {}: loser saw {}", round, loser),
        )?;
        result.rejections += 1;
        let winner = if withdrawn.is_ok() { "withdraw" } else { "rollback" };
        debug!(round, winner, "race settled");
    }

    let bank = substrate.bank.read();
    ensure(
        bank.balance_of(&alice) + bank.balance_of(&bob) == STAKE * rounds,
        "value not conserved across races",
    )?;
    ensure(
        bank.balance_of(&engine.custodian(AssetKind::Native)) == 0,
        "value left in custody",
    )?;
    ensure(engine.open_count(AssetKind::Native) == 0, "swap left open")?;

    result.events_emitted = engine.events(AssetKind::Native).len();
    result.passed = true;
    result.details = format!(
        "{} rounds: {} withdrawn, {} rolled back",
        config.race_rounds, result.withdrawals, result.rollbacks
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_round_settles_once() {
        let mut secrets = SecretSource::new(9);
        let config = ScenarioConfig {
            race_rounds: 8,
            ..ScenarioConfig::default()
        };
        let result = run(&mut secrets, &config).unwrap();
        assert!(result.passed, "{}", result.details);
        assert_eq!(result.withdrawals + result.rollbacks, 8);
        assert_eq!(result.rejections, 8);
        assert_eq!(result.events_emitted, 16);
    }

    #[test]
    fn test_zero_rounds_trivially_passes() {
        let mut secrets = SecretSource::new(9);
        let config = ScenarioConfig {
            race_rounds: 0,
            ..ScenarioConfig::default()
        };
        let result = run(&mut secrets, &config).unwrap();
        assert!(result.passed);
        assert_eq!(result.swaps_created, 0);
    }
}
