use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::{openapi::AccountsApiDoc, routes};
use crate::config::AccountsConfig;
use crate::contract::client::AccountsApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::AccountsLocalClient;
use crate::infra::storage::{migrations::Migrator, SeaOrmAccountsStore};

/// The accounts module: owns the domain service and exposes it as REST
/// routes and as an in-process client.
#[derive(Clone)]
pub struct Accounts {
    service: Arc<Service>,
}

impl Accounts {
    pub const NAME: &'static str = "accounts";

    /// Bring the schema up to date.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running accounts database migrations");
        Migrator::up(db, None).await?;
        info!("Accounts database migrations completed successfully");
        Ok(())
    }

    /// Wire the SeaORM store into the domain service.
    pub fn init(db: DatabaseConnection, cfg: &AccountsConfig) -> Self {
        debug!(
            "Loaded accounts config: max_name_length={}, max_email_length={}",
            cfg.max_name_length, cfg.max_email_length
        );

        let store = SeaOrmAccountsStore::new(db);
        let service = Service::new(Arc::new(store), ServiceConfig::from(cfg));
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Local in-process client.
    pub fn client(&self) -> Arc<dyn AccountsApi> {
        Arc::new(AccountsLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering accounts REST routes");
        routes::register_routes(router, self.service.clone())
    }

    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi;
        AccountsApiDoc::openapi()
    }
}
