//! Fungible token adapter
//!
//! Custody is pulled from the sender through a prior allowance granted to the
//! custodian, and pushed back out with a plain transfer.

use tracing::debug;
use types::asset::{Amount, Asset, AssetKind};
use types::ids::{AccountId, ContractId};

use super::{ensure_no_value, AssetAdapter, CustodyReceipt};
use crate::errors::AssetError;
use crate::tokens::SharedFungibleTokens;

#[derive(Debug, Clone)]
pub struct FungibleAdapter {
    tokens: SharedFungibleTokens,
    custodian: AccountId,
}

impl FungibleAdapter {
    pub fn new(tokens: SharedFungibleTokens, custodian: AccountId) -> Self {
        Self { tokens, custodian }
    }

    pub fn tokens(&self) -> &SharedFungibleTokens {
        &self.tokens
    }

    fn unpack(asset: &Asset) -> Result<(ContractId, Amount), AssetError> {
        match asset {
            Asset::Fungible {
                token_contract,
                amount,
            } => Ok((*token_contract, *amount)),
            other => Err(AssetError::AssetKindMismatch {
                expected: AssetKind::Fungible,
                actual: other.kind(),
            }),
        }
    }
}

impl AssetAdapter for FungibleAdapter {
    const KIND: AssetKind = AssetKind::Fungible;

    fn custodian(&self) -> AccountId {
        self.custodian
    }

    fn lock(
        &mut self,
        sender: &AccountId,
        asset: &Asset,
        attached_value: Amount,
    ) -> Result<CustodyReceipt, AssetError> {
        let (contract, amount) = Self::unpack(asset)?;
        ensure_no_value(Self::KIND, attached_value)?;

        let mut tokens = self.tokens.write();
        let token = tokens
            .get_mut(&contract)
            .map_err(AssetError::TransferFailed)?;
        token
            .transfer_from(&self.custodian, sender, &self.custodian, amount)
            .map_err(AssetError::TransferFailed)?;

        debug!(%sender, %contract, %amount, "fungible tokens locked");
        Ok(CustodyReceipt::new(*asset, self.custodian))
    }

    fn release(&mut self, receipt: &CustodyReceipt, to: &AccountId) -> Result<(), AssetError> {
        let (contract, amount) = Self::unpack(receipt.asset())?;

        let mut tokens = self.tokens.write();
        let token = tokens
            .get_mut(&contract)
            .map_err(AssetError::TransferFailed)?;
        token
            .transfer(&receipt.custodian(), to, amount)
            .map_err(AssetError::TransferFailed)?;

        debug!(%to, %contract, %amount, "fungible tokens released");
        Ok(())
    }
}
