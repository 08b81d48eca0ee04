//! Non-fungible token adapter
//!
//! The sender must have approved the custodian for the token (or for all of
//! the sender's tokens) before creating the swap.

use tracing::debug;
use types::asset::{Amount, Asset, AssetKind, TokenId};
use types::ids::{AccountId, ContractId};

use super::{ensure_no_value, AssetAdapter, CustodyReceipt};
use crate::errors::{AssetError, TokenError};
use crate::tokens::SharedNonFungibleTokens;

#[derive(Debug, Clone)]
pub struct NonFungibleAdapter {
    tokens: SharedNonFungibleTokens,
    custodian: AccountId,
}

impl NonFungibleAdapter {
    pub fn new(tokens: SharedNonFungibleTokens, custodian: AccountId) -> Self {
        Self { tokens, custodian }
    }

    pub fn tokens(&self) -> &SharedNonFungibleTokens {
        &self.tokens
    }

    fn unpack(asset: &Asset) -> Result<(ContractId, TokenId), AssetError> {
        match asset {
            Asset::NonFungible {
                token_contract,
                token_id,
            } => Ok((*token_contract, *token_id)),
            other => Err(AssetError::AssetKindMismatch {
                expected: AssetKind::NonFungible,
                actual: other.kind(),
            }),
        }
    }
}

impl AssetAdapter for NonFungibleAdapter {
    const KIND: AssetKind = AssetKind::NonFungible;

    fn custodian(&self) -> AccountId {
        self.custodian
    }

    fn lock(
        &mut self,
        sender: &AccountId,
        asset: &Asset,
        attached_value: Amount,
    ) -> Result<CustodyReceipt, AssetError> {
        let (contract, token_id) = Self::unpack(asset)?;
        ensure_no_value(Self::KIND, attached_value)?;

        let mut tokens = self.tokens.write();
        let collection = tokens
            .get_mut(&contract)
            .map_err(AssetError::TransferFailed)?;
        collection
            .transfer_from(&self.custodian, sender, &self.custodian, token_id)
            .map_err(|e| match e {
                TokenError::NotOwnerOrApproved { token_id } | TokenError::UnknownToken { token_id } => {
                    AssetError::NotOwnerOrApproved { token_id }
                }
                other => AssetError::TransferFailed(other),
            })?;

        debug!(%sender, %contract, %token_id, "non-fungible token locked");
        Ok(CustodyReceipt::new(*asset, self.custodian))
    }

    fn release(&mut self, receipt: &CustodyReceipt, to: &AccountId) -> Result<(), AssetError> {
        let (contract, token_id) = Self::unpack(receipt.asset())?;
        let custodian = receipt.custodian();

        let mut tokens = self.tokens.write();
        let collection = tokens
            .get_mut(&contract)
            .map_err(AssetError::TransferFailed)?;
        collection
            .transfer_from(&custodian, &custodian, to, token_id)
            .map_err(AssetError::TransferFailed)?;

        debug!(%to, %contract, %token_id, "non-fungible token released");
        Ok(())
    }
}
