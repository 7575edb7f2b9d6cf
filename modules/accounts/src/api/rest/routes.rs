use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the accounts endpoints on `router`. The service reaches the handlers
/// through an `Extension` layer scoped to these routes.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let accounts = Router::new()
        .route(
            "/accounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/accounts/{id}",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::delete_account),
        )
        .layer(Extension(service));

    router.merge(accounts)
}
