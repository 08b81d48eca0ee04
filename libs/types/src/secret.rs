//! Hashlock and preimage types
//!
//! Both are fixed 32-byte values. A preimage is the secret a receiver reveals
//! to withdraw; the hashlock is its SHA-256 digest, agreed off-engine when
//! the swap is negotiated.

use crate::errors::TypeError;

bytes32_newtype!(
    /// Digest gating withdrawal of a swap
    Hashlock
);

bytes32_newtype!(
    /// Secret whose digest equals the hashlock
    ///
    /// The all-zero value stands for "not yet revealed" in compatibility
    /// views of a swap record.
    Preimage
);

impl Preimage {
    /// Right-pad UTF-8 text with zero bytes into a 32-byte preimage.
    ///
    /// `Preimage::from_text("hello")` renders as
    /// `0x68656c6c6f000000…`, the usual way wallets turn a short passphrase
    /// into a fixed-size secret.
    pub fn from_text(text: &str) -> Result<Self, TypeError> {
        let raw = text.as_bytes();
        if raw.len() > 32 {
            return Err(TypeError::PreimageTooLong { len: raw.len() });
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }
}
