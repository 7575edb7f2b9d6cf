use async_trait::async_trait;

use crate::contract::model::{Account, AccountId, NewAccount};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    /// Load an account by id. A missing row is `Ok(None)`.
    async fn find_by_id(&self, id: AccountId) -> anyhow::Result<Option<Account>>;
    /// Persist a new account; storage assigns the id and the `date_joined` default.
    async fn insert(&self, new_account: NewAccount) -> anyhow::Result<Account>;
    /// Overwrite the row keyed by `account.id`. Fails if no such row exists.
    async fn update(&self, account: Account) -> anyhow::Result<Account>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: AccountId) -> anyhow::Result<bool>;
    /// Every account, ordered by id ascending.
    async fn list_all(&self) -> anyhow::Result<Vec<Account>>;
}

/// A repository bound to one storage transaction.
///
/// Dropping it without `commit` rolls the transaction back.
#[async_trait]
pub trait AccountsTx: AccountsRepository {
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
}

/// Opens transactions; one per service call.
#[async_trait]
pub trait AccountsStore: Send + Sync {
    async fn begin(&self) -> anyhow::Result<Box<dyn AccountsTx>>;
}
