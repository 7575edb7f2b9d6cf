use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::AccountsApi,
    error::AccountsError,
    model::{Account, AccountId, AccountUpdate, NewAccount},
};
use crate::domain::service::Service;

/// Local implementation of `AccountsApi` that delegates to the domain service
pub struct AccountsLocalClient {
    service: Arc<Service>,
}

impl AccountsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AccountsApi for AccountsLocalClient {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account, AccountsError> {
        self.service
            .create_account(new_account)
            .await
            .map_err(Into::into)
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, AccountsError> {
        self.service.get_account(id).await.map_err(Into::into)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountsError> {
        self.service.list_accounts().await.map_err(Into::into)
    }

    async fn update_account(
        &self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountsError> {
        self.service
            .update_account(id, update)
            .await
            .map_err(Into::into)
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), AccountsError> {
        self.service.delete_account(id).await.map_err(Into::into)
    }
}
