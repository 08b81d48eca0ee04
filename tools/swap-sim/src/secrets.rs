//! Seeded preimage generation
//!
//! Secrets are drawn from a ChaCha8 stream so a run is reproducible from its
//! seed.

use htlc_contracts::hashing::hash_preimage;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use types::secret::{Hashlock, Preimage};

/// Deterministic source of swap secrets.
pub struct SecretSource {
    rng: ChaCha8Rng,
    issued: usize,
}

impl SecretSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            issued: 0,
        }
    }

    /// Draw a fresh preimage and its hashlock.
    pub fn next_secret(&mut self) -> (Preimage, Hashlock) {
        let mut bytes = [0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        self.issued += 1;
        let preimage = Preimage::new(bytes);
        (preimage, hash_preimage(&preimage))
    }

    pub fn issued(&self) -> usize {
        self.issued
    }
}
