//! Token substrate — native value, fungible tokens and non-fungible tokens
//!
//! In-memory stand-ins for the value ledger and token contracts the escrow
//! talks to. Each operation validates fully before mutating, so a failed call
//! leaves balances, allowances and ownership exactly as they were.
//!
//! State is shared through `Arc<RwLock<_>>` handles: the adapters hold one
//! clone, wallets and tests hold others.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use types::asset::{Amount, TokenId};
use types::ids::{AccountId, ContractId};

use crate::errors::TokenError;

pub type SharedBank = Arc<RwLock<NativeBank>>;
pub type SharedFungibleTokens = Arc<RwLock<FungibleTokens>>;
pub type SharedNonFungibleTokens = Arc<RwLock<NonFungibleTokens>>;

// ───────────────────────── Balances ─────────────────────────

/// Balance book with overflow-checked credit and underflow-checked debit.
#[derive(Debug, Clone, Default)]
struct Balances {
    balances: HashMap<AccountId, Amount>,
}

impl Balances {
    fn get(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn credit(&mut self, account: AccountId, amount: Amount) -> Result<(), TokenError> {
        let current = self.balances.entry(account).or_insert(0);
        *current = current.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Move `amount` from `from` to `to`, checking both sides before writing.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), TokenError> {
        let available = self.get(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .get(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert(*from, available - amount);
        self.balances.insert(*to, credited);
        Ok(())
    }

    fn total(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(0u128, |acc, v| acc.checked_add(*v))
    }
}

// ───────────────────────── Native ─────────────────────────

/// Native value ledger of the hosting substrate.
#[derive(Debug, Clone, Default)]
pub struct NativeBank {
    balances: Balances,
}

impl NativeBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedBank {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Credit freshly issued value to an account.
    pub fn mint(&mut self, to: AccountId, amount: Amount) -> Result<(), TokenError> {
        self.balances.credit(to, amount)
    }

    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account)
    }

    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), TokenError> {
        self.balances.transfer(from, to, amount)
    }

    /// Sum of all balances; constant under transfers.
    pub fn total_supply(&self) -> Option<Amount> {
        self.balances.total()
    }
}

// ───────────────────────── Fungible ─────────────────────────

/// Allowance-based fungible token contract.
#[derive(Debug, Clone, Default)]
pub struct FungibleToken {
    balances: Balances,
    /// (owner, spender) -> remaining allowance
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl FungibleToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, to: AccountId, amount: Amount) -> Result<(), TokenError> {
        self.balances.credit(to, amount)
    }

    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account)
    }

    /// Set (not add to) the allowance `spender` may pull from `owner`.
    pub fn approve(&mut self, owner: &AccountId, spender: AccountId, amount: Amount) {
        self.allowances.insert((*owner, spender), amount);
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), TokenError> {
        self.balances.transfer(from, to, amount)
    }

    /// Pull `amount` from `from` on behalf of `spender`, consuming allowance.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }
        self.balances.transfer(from, to, amount)?;
        self.allowances.insert((*from, *spender), approved - amount);
        Ok(())
    }

    pub fn total_supply(&self) -> Option<Amount> {
        self.balances.total()
    }
}

/// Registry of deployed fungible token contracts.
#[derive(Debug, Clone, Default)]
pub struct FungibleTokens {
    contracts: HashMap<ContractId, FungibleToken>,
}

impl FungibleTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedFungibleTokens {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Deploy an empty token contract and return its id.
    pub fn deploy(&mut self) -> ContractId {
        let id = ContractId::new();
        self.contracts.insert(id, FungibleToken::new());
        id
    }

    pub fn get(&self, contract: &ContractId) -> Result<&FungibleToken, TokenError> {
        self.contracts
            .get(contract)
            .ok_or_else(|| TokenError::UnknownContract {
                contract: contract.to_string(),
            })
    }

    pub fn get_mut(&mut self, contract: &ContractId) -> Result<&mut FungibleToken, TokenError> {
        self.contracts
            .get_mut(contract)
            .ok_or_else(|| TokenError::UnknownContract {
                contract: contract.to_string(),
            })
    }
}

// ───────────────────────── Non-Fungible ─────────────────────────

/// Non-fungible token collection with per-token and operator approvals.
#[derive(Debug, Clone, Default)]
pub struct NonFungibleToken {
    owners: HashMap<TokenId, AccountId>,
    token_approvals: HashMap<TokenId, AccountId>,
    /// (owner, operator) pairs approved for all of the owner's tokens
    operators: HashSet<(AccountId, AccountId)>,
}

impl NonFungibleToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, to: AccountId, token_id: TokenId) -> Result<(), TokenError> {
        if self.owners.contains_key(&token_id) {
            return Err(TokenError::AlreadyMinted { token_id });
        }
        self.owners.insert(token_id, to);
        Ok(())
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<AccountId, TokenError> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or(TokenError::UnknownToken { token_id })
    }

    /// Approve `spender` for one token. Only the owner may approve.
    pub fn approve(&mut self, owner: &AccountId, spender: AccountId, token_id: TokenId) -> Result<(), TokenError> {
        if self.owner_of(token_id)? != *owner {
            return Err(TokenError::NotOwner { token_id });
        }
        self.token_approvals.insert(token_id, spender);
        Ok(())
    }

    pub fn get_approved(&self, token_id: TokenId) -> Option<AccountId> {
        self.token_approvals.get(&token_id).copied()
    }

    pub fn set_approval_for_all(&mut self, owner: &AccountId, operator: AccountId, approved: bool) {
        if approved {
            self.operators.insert((*owner, operator));
        } else {
            self.operators.remove(&(*owner, operator));
        }
    }

    pub fn is_approved_for_all(&self, owner: &AccountId, operator: &AccountId) -> bool {
        self.operators.contains(&(*owner, *operator))
    }

    pub fn is_approved_or_owner(&self, spender: &AccountId, token_id: TokenId) -> Result<bool, TokenError> {
        let owner = self.owner_of(token_id)?;
        Ok(owner == *spender
            || self.get_approved(token_id) == Some(*spender)
            || self.is_approved_for_all(&owner, spender))
    }

    /// Move `token_id` from `from` to `to` on behalf of `spender`.
    ///
    /// Clears the single-token approval.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        token_id: TokenId,
    ) -> Result<(), TokenError> {
        let owner = self.owner_of(token_id)?;
        if owner != *from || !self.is_approved_or_owner(spender, token_id)? {
            return Err(TokenError::NotOwnerOrApproved { token_id });
        }
        self.token_approvals.remove(&token_id);
        self.owners.insert(token_id, *to);
        Ok(())
    }

    pub fn token_count(&self) -> usize {
        self.owners.len()
    }
}

/// Registry of deployed non-fungible collections.
#[derive(Debug, Clone, Default)]
pub struct NonFungibleTokens {
    contracts: HashMap<ContractId, NonFungibleToken>,
}

impl NonFungibleTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedNonFungibleTokens {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn deploy(&mut self) -> ContractId {
        let id = ContractId::new();
        self.contracts.insert(id, NonFungibleToken::new());
        id
    }

    pub fn get(&self, contract: &ContractId) -> Result<&NonFungibleToken, TokenError> {
        self.contracts
            .get(contract)
            .ok_or_else(|| TokenError::UnknownContract {
                contract: contract.to_string(),
            })
    }

    pub fn get_mut(&mut self, contract: &ContractId) -> Result<&mut NonFungibleToken, TokenError> {
        self.contracts
            .get_mut(contract)
            .ok_or_else(|| TokenError::UnknownContract {
                contract: contract.to_string(),
            })
    }
}
