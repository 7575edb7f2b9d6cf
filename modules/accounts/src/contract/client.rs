use async_trait::async_trait;

use crate::contract::{
    error::AccountsError,
    model::{Account, AccountId, AccountUpdate, NewAccount},
};

/// In-process API of the accounts module for other crates.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account, AccountsError>;

    async fn get_account(&self, id: AccountId) -> Result<Account, AccountsError>;

    /// All accounts ordered by id.
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountsError>;

    /// Replace every mutable field of an existing account.
    async fn update_account(
        &self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountsError>;

    async fn delete_account(&self, id: AccountId) -> Result<(), AccountsError>;
}
