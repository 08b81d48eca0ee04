//! Hash & identity — hashlock verification and swap id derivation
//!
//! The digest is SHA-256 throughout: a hashlock is `sha256(preimage)` over
//! the 32 preimage bytes, computed off-engine by whoever negotiates the swap.

use sha2::{Digest, Sha256};
use types::asset::Asset;
use types::ids::{AccountId, SwapId};
use types::secret::{Hashlock, Preimage};

/// Domain tag prefixed to every swap id preimage.
const SWAP_ID_DOMAIN: &[u8] = b"htlc-swap-id/v1";

/// Compute the SHA-256 digest of arbitrary data.
pub fn compute_hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hashlock matching a preimage.
pub fn hash_preimage(preimage: &Preimage) -> Hashlock {
    Hashlock::new(compute_hash(preimage.as_bytes()))
}

/// True iff `sha256(preimage) == hashlock`.
pub fn verify_preimage(hashlock: &Hashlock, preimage: &Preimage) -> bool {
    hash_preimage(preimage) == *hashlock
}

/// Derive a swap id from the swap parameters and a creation nonce.
///
/// Pure and deterministic. Identical parameters with distinct nonces yield
/// distinct ids.
pub fn derive_swap_id(
    sender: &AccountId,
    receiver: &AccountId,
    hashlock: &Hashlock,
    timelock: i64,
    asset: &Asset,
    nonce: u64,
) -> SwapId {
    let mut hasher = Sha256::new();
    hasher.update(SWAP_ID_DOMAIN);
    hasher.update([asset.kind().tag()]);
    hasher.update(sender.as_bytes());
    hasher.update(receiver.as_bytes());
    hasher.update(hashlock.as_bytes());
    hasher.update(timelock.to_be_bytes());
    hasher.update(asset.encode());
    hasher.update(nonce.to_be_bytes());
    SwapId::new(hasher.finalize().into())
}
