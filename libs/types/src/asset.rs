//! Asset kinds and asset payloads
//!
//! A swap escrows exactly one asset: an amount of native value, an amount of a
//! fungible token, or one specific non-fungible token. The asset kind also
//! selects the ledger partition a swap lives in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TypeError;
use crate::ids::ContractId;

/// Amount in the asset's smallest unit
pub type Amount = u128;

/// Identifier of a single non-fungible token within its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u128);

impl TokenId {
    pub const fn new(id: u128) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for TokenId {
    fn from(id: u128) -> Self {
        Self(id)
    }
}

/// Asset kind, doubling as the partition selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Native chain value
    Native,
    /// Allowance-based fungible token
    Fungible,
    /// Single non-fungible token
    NonFungible,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Native, AssetKind::Fungible, AssetKind::NonFungible];

    /// Stable tag byte used when hashing swap parameters.
    pub fn tag(&self) -> u8 {
        match self {
            AssetKind::Native => 0,
            AssetKind::Fungible => 1,
            AssetKind::NonFungible => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Native => "native",
            AssetKind::Fungible => "fungible",
            AssetKind::NonFungible => "non_fungible",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = TypeError;

    /// Accepts the canonical names and the token-standard names wallets use
    /// (`ether`, `erc20`, `erc721`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "ether" => Ok(AssetKind::Native),
            "fungible" | "erc20" => Ok(AssetKind::Fungible),
            "non_fungible" | "nonfungible" | "erc721" => Ok(AssetKind::NonFungible),
            other => Err(TypeError::UnknownAssetKind(other.to_string())),
        }
    }
}

/// Escrowed asset payload
///
/// Fixed at swap creation and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    Native {
        amount: Amount,
    },
    Fungible {
        token_contract: ContractId,
        amount: Amount,
    },
    NonFungible {
        token_contract: ContractId,
        token_id: TokenId,
    },
}

impl Asset {
    pub fn native(amount: Amount) -> Self {
        Asset::Native { amount }
    }

    pub fn fungible(token_contract: ContractId, amount: Amount) -> Self {
        Asset::Fungible {
            token_contract,
            amount,
        }
    }

    pub fn non_fungible(token_contract: ContractId, token_id: impl Into<TokenId>) -> Self {
        Asset::NonFungible {
            token_contract,
            token_id: token_id.into(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            Asset::Native { .. } => AssetKind::Native,
            Asset::Fungible { .. } => AssetKind::Fungible,
            Asset::NonFungible { .. } => AssetKind::NonFungible,
        }
    }

    /// Amount moved by this asset; a non-fungible token always counts as one.
    pub fn amount(&self) -> Amount {
        match self {
            Asset::Native { amount } | Asset::Fungible { amount, .. } => *amount,
            Asset::NonFungible { .. } => 1,
        }
    }

    pub fn token_contract(&self) -> Option<ContractId> {
        match self {
            Asset::Native { .. } => None,
            Asset::Fungible { token_contract, .. } | Asset::NonFungible { token_contract, .. } => {
                Some(*token_contract)
            }
        }
    }

    /// Reject empty payloads: zero amounts and the zero token id.
    pub fn validate(&self) -> Result<(), TypeError> {
        match self {
            Asset::Native { amount } | Asset::Fungible { amount, .. } if *amount == 0 => {
                Err(TypeError::ZeroAmount)
            }
            Asset::NonFungible { token_id, .. } if token_id.value() == 0 => {
                Err(TypeError::ZeroTokenId)
            }
            _ => Ok(()),
        }
    }

    /// Canonical byte encoding used when deriving swap ids.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 16 + 16);
        out.push(self.kind().tag());
        match self {
            Asset::Native { amount } => {
                out.extend_from_slice(&amount.to_be_bytes());
            }
            Asset::Fungible {
                token_contract,
                amount,
            } => {
                out.extend_from_slice(token_contract.as_bytes());
                out.extend_from_slice(&amount.to_be_bytes());
            }
            Asset::NonFungible {
                token_contract,
                token_id,
            } => {
                out.extend_from_slice(token_contract.as_bytes());
                out.extend_from_slice(&token_id.value().to_be_bytes());
            }
        }
        out
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native { amount } => write!(f, "{} native", amount),
            Asset::Fungible {
                token_contract,
                amount,
            } => write!(f, "{} of {}", amount, token_contract),
            Asset::NonFungible {
                token_contract,
                token_id,
            } => write!(f, "token #{} of {}", token_id, token_contract),
        }
    }
}
