//! Asset adapters — how custody is taken and released per asset kind
//!
//! One adapter per kind (native, fungible, non-fungible) behind a common
//! trait, so a single ledger state machine serves all three partitions.

pub mod fungible;
pub mod native;
pub mod non_fungible;

pub use fungible::FungibleAdapter;
pub use native::NativeAdapter;
pub use non_fungible::NonFungibleAdapter;

use serde::{Deserialize, Serialize};
use types::asset::{Amount, Asset, AssetKind};
use types::ids::AccountId;

use crate::errors::AssetError;

/// Proof that an asset sits in escrow with a given custodian.
///
/// Issued by `AssetAdapter::lock`, held by the ledger entry, and consumed by
/// exactly one `release` or `refund`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyReceipt {
    asset: Asset,
    custodian: AccountId,
}

impl CustodyReceipt {
    pub fn new(asset: Asset, custodian: AccountId) -> Self {
        Self { asset, custodian }
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn custodian(&self) -> AccountId {
        self.custodian
    }
}

/// Custody capability set of one asset kind.
pub trait AssetAdapter {
    /// Asset kind this adapter handles.
    const KIND: AssetKind;

    /// Identity holding escrowed assets.
    fn custodian(&self) -> AccountId;

    /// Take custody of `asset` from `sender`.
    ///
    /// Either the full asset moves into custody and a receipt is returned, or
    /// nothing moves.
    fn lock(
        &mut self,
        sender: &AccountId,
        asset: &Asset,
        attached_value: Amount,
    ) -> Result<CustodyReceipt, AssetError>;

    /// Hand the escrowed asset to the receiver.
    fn release(&mut self, receipt: &CustodyReceipt, to: &AccountId) -> Result<(), AssetError>;

    /// Return the escrowed asset to the sender.
    fn refund(&mut self, receipt: &CustodyReceipt, to: &AccountId) -> Result<(), AssetError> {
        self.release(receipt, to)
    }
}

/// Reject assets of another kind than the adapter's.
pub(crate) fn ensure_kind(expected: AssetKind, asset: &Asset) -> Result<(), AssetError> {
    if asset.kind() != expected {
        return Err(AssetError::AssetKindMismatch {
            expected,
            actual: asset.kind(),
        });
    }
    Ok(())
}

/// Token-based kinds are not payable.
pub(crate) fn ensure_no_value(kind: AssetKind, attached_value: Amount) -> Result<(), AssetError> {
    if attached_value != 0 {
        return Err(AssetError::UnexpectedValue {
            kind,
            attached: attached_value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::ContractId;

    #[test]
    fn test_ensure_kind_mismatch() {
        let result = ensure_kind(AssetKind::Native, &Asset::fungible(ContractId::new(), 1));
        assert_eq!(
            result,
            Err(AssetError::AssetKindMismatch {
                expected: AssetKind::Native,
                actual: AssetKind::Fungible
            })
        );
    }

    #[test]
    fn test_ensure_no_value() {
        assert!(ensure_no_value(AssetKind::Fungible, 0).is_ok());
        assert_eq!(
            ensure_no_value(AssetKind::NonFungible, 5),
            Err(AssetError::UnexpectedValue {
                kind: AssetKind::NonFungible,
                attached: 5
            })
        );
    }

    #[test]
    fn test_receipt_accessors() {
        let custodian = AccountId::new();
        let receipt = CustodyReceipt::new(Asset::native(10), custodian);
        assert_eq!(receipt.asset(), &Asset::native(10));
        assert_eq!(receipt.custodian(), custodian);
    }
}
