use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{Account, AccountId, AccountUpdate, NewAccount};
use crate::domain::error::DomainError;
use crate::domain::repo::AccountsStore;

/// Domain service with the business rules for accounts.
/// Depends only on the storage ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn AccountsStore>,
    config: ServiceConfig,
}

/// Field length limits, in characters.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub max_email_length: usize,
    pub max_address_length: usize,
    pub max_phone_number_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 64,
            max_email_length: 64,
            max_address_length: 256,
            max_phone_number_length: 32,
        }
    }
}

impl Service {
    pub fn new(store: Arc<dyn AccountsStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    #[instrument(name = "accounts.service.create_account", skip(self, new_account))]
    pub async fn create_account(&self, new_account: NewAccount) -> Result<Account, DomainError> {
        info!("Creating new account");

        self.validate_fields(
            &new_account.name,
            new_account.email.as_deref(),
            new_account.address.as_deref(),
            new_account.phone_number.as_deref(),
        )?;

        let tx = self.store.begin().await?;
        let account = tx.insert(new_account).await?;
        tx.commit().await?;

        info!(account_id = account.id, "Successfully created account");
        Ok(account)
    }

    #[instrument(name = "accounts.service.get_account", skip(self), fields(account_id = id))]
    pub async fn get_account(&self, id: AccountId) -> Result<Account, DomainError> {
        debug!("Getting account by id");

        let tx = self.store.begin().await?;
        let account = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::account_not_found(id))?;
        tx.commit().await?;

        Ok(account)
    }

    #[instrument(name = "accounts.service.list_accounts", skip(self))]
    pub async fn list_accounts(&self) -> Result<Vec<Account>, DomainError> {
        debug!("Listing accounts");

        let tx = self.store.begin().await?;
        let accounts = tx.list_all().await?;
        tx.commit().await?;

        debug!("Listed {} accounts", accounts.len());
        Ok(accounts)
    }

    /// Existence is checked before the new values are validated, both inside
    /// the transaction that performs the write.
    #[instrument(
        name = "accounts.service.update_account",
        skip(self, update),
        fields(account_id = id)
    )]
    pub async fn update_account(
        &self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, DomainError> {
        info!("Updating account");

        let tx = self.store.begin().await?;
        let current = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::account_not_found(id))?;

        self.validate_fields(
            &update.name,
            update.email.as_deref(),
            update.address.as_deref(),
            update.phone_number.as_deref(),
        )?;

        let updated = tx.update(current.replaced_with(update)).await?;
        tx.commit().await?;

        info!("Successfully updated account");
        Ok(updated)
    }

    #[instrument(name = "accounts.service.delete_account", skip(self), fields(account_id = id))]
    pub async fn delete_account(&self, id: AccountId) -> Result<(), DomainError> {
        info!("Deleting account");

        let tx = self.store.begin().await?;
        if tx.find_by_id(id).await?.is_none() {
            return Err(DomainError::account_not_found(id));
        }
        if !tx.delete(id).await? {
            // row vanished between the lookup and the delete
            return Err(DomainError::account_not_found(id));
        }
        tx.commit().await?;

        info!("Successfully deleted account");
        Ok(())
    }

    // --- validation helpers ---

    fn validate_fields(
        &self,
        name: &str,
        email: Option<&str>,
        address: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be blank"));
        }
        check_length("name", Some(name), self.config.max_name_length)?;
        check_length("email", email, self.config.max_email_length)?;
        check_length("address", address, self.config.max_address_length)?;
        check_length(
            "phone_number",
            phone_number,
            self.config.max_phone_number_length,
        )?;
        Ok(())
    }
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), DomainError> {
    let Some(value) = value else {
        return Ok(());
    };
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::validation(
            field,
            format!("too long: {len} characters (max: {max})"),
        ));
    }
    Ok(())
}
