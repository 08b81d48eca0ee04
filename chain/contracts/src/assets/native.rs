//! Native value adapter
//!
//! Custody is taken from the value attached to the creating call, which must
//! equal the swap amount exactly.

use tracing::debug;
use types::asset::{Amount, Asset, AssetKind};
use types::ids::AccountId;

use super::{ensure_kind, AssetAdapter, CustodyReceipt};
use crate::errors::AssetError;
use crate::tokens::SharedBank;

#[derive(Debug, Clone)]
pub struct NativeAdapter {
    bank: SharedBank,
    custodian: AccountId,
}

impl NativeAdapter {
    pub fn new(bank: SharedBank, custodian: AccountId) -> Self {
        Self { bank, custodian }
    }

    pub fn bank(&self) -> &SharedBank {
        &self.bank
    }

    fn amount_of(asset: &Asset) -> Result<Amount, AssetError> {
        ensure_kind(AssetKind::Native, asset)?;
        Ok(asset.amount())
    }
}

impl AssetAdapter for NativeAdapter {
    const KIND: AssetKind = AssetKind::Native;

    fn custodian(&self) -> AccountId {
        self.custodian
    }

    fn lock(
        &mut self,
        sender: &AccountId,
        asset: &Asset,
        attached_value: Amount,
    ) -> Result<CustodyReceipt, AssetError> {
        let amount = Self::amount_of(asset)?;
        if attached_value != amount {
            return Err(AssetError::InsufficientValue {
                expected: amount,
                attached: attached_value,
            });
        }

        self.bank
            .write()
            .transfer(sender, &self.custodian, amount)
            .map_err(AssetError::TransferFailed)?;

        debug!(%sender, %amount, "native value locked");
        Ok(CustodyReceipt::new(*asset, self.custodian))
    }

    fn release(&mut self, receipt: &CustodyReceipt, to: &AccountId) -> Result<(), AssetError> {
        let amount = Self::amount_of(receipt.asset())?;
        self.bank
            .write()
            .transfer(&receipt.custodian(), to, amount)
            .map_err(AssetError::TransferFailed)?;

        debug!(%to, %amount, "native value released");
        Ok(())
    }
}
