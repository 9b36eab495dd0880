//! Asset ledger boundary
//!
//! The market never moves tokens or funds itself. Custody of the
//! non-fungible assets and the settlement currency belongs to an external
//! ledger, reached through the [`AssetOracle`] trait. [`MemoryOracle`] is
//! the in-process implementation used by the CLI and tests.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auction::{Address, Amount, TokenId};

/// Rejections raised by the asset ledger.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("unknown token: {0}")]
    UnknownToken(TokenId),

    #[error("{from} does not own token {token_id}")]
    NotOwner { token_id: TokenId, from: Address },

    #[error("transfer of token {0} is not approved")]
    TransferNotApproved(TokenId),

    #[error("balance overflow crediting {0}")]
    BalanceOverflow(Address),
}

/// Custody primitives the market consumes.
///
/// Implementations are the system of record for asset ownership and funds;
/// the market invokes them and treats their answers as ground truth.
pub trait AssetOracle {
    /// Current owner of a token.
    fn owner_of(&self, token_id: TokenId) -> Result<Address, OracleError>;

    /// Whether the market may transfer the token on the owner's behalf.
    fn is_approved_for_transfer(&self, token_id: TokenId) -> Result<bool, OracleError>;

    /// Move a token from `from` to `to`. Rejects when `from` is not the
    /// current owner or the market holds no approval.
    fn transfer(&mut self, token_id: TokenId, from: &str, to: &str) -> Result<(), OracleError>;

    /// Credit settlement funds to an account.
    fn credit_seller(&mut self, account: &str, amount: Amount) -> Result<(), OracleError>;
}

/// In-process asset ledger holding token ownership, per-token transfer
/// approvals, and account balances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryOracle {
    owners: HashMap<TokenId, Address>,
    approved: HashSet<TokenId>,
    balances: HashMap<Address, Amount>,
    next_token_id: TokenId,
}

impl MemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new token to `owner` and return its id.
    pub fn mint(&mut self, owner: &str) -> TokenId {
        let token_id = self.next_token_id;
        self.next_token_id += 1;
        self.owners.insert(token_id, owner.to_string());
        token_id
    }

    /// Grant or revoke the market's right to transfer `token_id`.
    pub fn set_approval(&mut self, token_id: TokenId, approved: bool) -> Result<(), OracleError> {
        if !self.owners.contains_key(&token_id) {
            return Err(OracleError::UnknownToken(token_id));
        }
        if approved {
            self.approved.insert(token_id);
        } else {
            self.approved.remove(&token_id);
        }
        Ok(())
    }

    pub fn balance_of(&self, account: &str) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

impl AssetOracle for MemoryOracle {
    fn owner_of(&self, token_id: TokenId) -> Result<Address, OracleError> {
        self.owners
            .get(&token_id)
            .cloned()
            .ok_or(OracleError::UnknownToken(token_id))
    }

    fn is_approved_for_transfer(&self, token_id: TokenId) -> Result<bool, OracleError> {
        if !self.owners.contains_key(&token_id) {
            return Err(OracleError::UnknownToken(token_id));
        }
        Ok(self.approved.contains(&token_id))
    }

    fn transfer(&mut self, token_id: TokenId, from: &str, to: &str) -> Result<(), OracleError> {
        let owner = self
            .owners
            .get(&token_id)
            .ok_or(OracleError::UnknownToken(token_id))?;
        if owner != from {
            return Err(OracleError::NotOwner {
                token_id,
                from: from.to_string(),
            });
        }
        if !self.approved.contains(&token_id) {
            return Err(OracleError::TransferNotApproved(token_id));
        }

        // An approval covers one transfer; it does not survive the change
        // of owner.
        self.approved.remove(&token_id);
        self.owners.insert(token_id, to.to_string());

        Ok(())
    }

    fn credit_seller(&mut self, account: &str, amount: Amount) -> Result<(), OracleError> {
        let balance = self.balances.entry(account.to_string()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| OracleError::BalanceOverflow(account.to_string()))?;
        Ok(())
    }
}
