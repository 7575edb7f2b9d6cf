//! SeaORM-backed implementation of the storage ports.
//!
//! `SeaOrmAccountsRepository` is generic over `C: ConnectionTrait`, so it runs
//! on a plain `DatabaseConnection` or on a `DatabaseTransaction`. The
//! transactional form is what `SeaOrmAccountsStore::begin` hands out.

use anyhow::Context;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    NotSet, QueryOrder, Set, TransactionTrait,
};

use crate::contract::model::{Account, AccountId, NewAccount};
use crate::domain::repo::{AccountsRepository, AccountsStore, AccountsTx};
use crate::infra::storage::entity::{ActiveModel as AccountAM, Column, Entity as AccountEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmAccountsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAccountsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> AccountsRepository for SeaOrmAccountsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: AccountId) -> anyhow::Result<Option<Account>> {
        let found = AccountEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, new_account: NewAccount) -> anyhow::Result<Account> {
        let m = AccountAM {
            id: NotSet,
            name: Set(new_account.name),
            email: Set(new_account.email),
            address: Set(new_account.address),
            phone_number: Set(new_account.phone_number),
            date_joined: Set(new_account
                .date_joined
                .unwrap_or_else(|| Utc::now().date_naive())),
        };
        let saved = m.insert(&self.conn).await.context("insert failed")?;
        Ok(saved.into())
    }

    async fn update(&self, account: Account) -> anyhow::Result<Account> {
        let m = AccountAM {
            id: Set(account.id),
            name: Set(account.name),
            email: Set(account.email),
            address: Set(account.address),
            phone_number: Set(account.phone_number),
            date_joined: Set(account.date_joined),
        };
        // RecordNotUpdated when the id has no row
        let saved = m.update(&self.conn).await.context("update failed")?;
        Ok(saved.into())
    }

    async fn delete(&self, id: AccountId) -> anyhow::Result<bool> {
        let res = AccountEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Account>> {
        let rows = AccountEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl AccountsTx for SeaOrmAccountsRepository<DatabaseTransaction> {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let this = *self;
        this.conn.commit().await.context("commit failed")
    }
}

/// Store over a shared connection pool.
#[derive(Clone)]
pub struct SeaOrmAccountsStore {
    db: DatabaseConnection,
}

impl SeaOrmAccountsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl AccountsStore for SeaOrmAccountsStore {
    async fn begin(&self) -> anyhow::Result<Box<dyn AccountsTx>> {
        let txn = self.db.begin().await.context("begin transaction failed")?;
        Ok(Box::new(SeaOrmAccountsRepository::new(txn)))
    }
}
