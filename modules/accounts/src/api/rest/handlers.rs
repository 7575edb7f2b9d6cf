use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path},
    http::{header, HeaderMap, StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};

use api_errors::{Problem, ProblemResponse};

use crate::api::rest::content_type::check_content_type;
use crate::api::rest::dto::{AccountDto, AccountReq};
use crate::api::rest::error::{account_not_found, invalid_body, invalid_path_id, map_domain_error};
use crate::contract::model::AccountId;
use crate::domain::service::Service;

const JSON: &str = "application/json";

/// Non-integer ids are a bad request; ids beyond the storage range cannot name an account.
fn to_account_id(
    raw: Result<Path<u64>, PathRejection>,
    instance: &str,
) -> Result<AccountId, ProblemResponse> {
    let Path(raw) = raw.map_err(|e| {
        error!("Invalid account id in path: {}", e.body_text());
        invalid_path_id(&e, instance)
    })?;
    AccountId::try_from(raw).map_err(|_| account_not_found(raw, instance))
}

fn location(headers: &HeaderMap, id: AccountId) -> String {
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{host}/accounts/{id}"),
        None => format!("/accounts/{id}"),
    }
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "accounts",
    request_body(content = AccountReq, content_type = "application/json"),
    responses(
        (status = 201, description = "Created account", body = AccountDto,
            headers(("Location" = String, description = "URL of the new account"))),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 415, description = "Unsupported Media Type", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_account(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<AccountDto>), ProblemResponse> {
    info!("Request to create an account");

    check_content_type(&headers, JSON, uri.path())?;
    let req = AccountReq::from_json(&body).map_err(|e| {
        error!("Failed to decode account: {}", e);
        invalid_body(&e, uri.path())
    })?;

    match svc.create_account(req.into()).await {
        Ok(account) => {
            let loc = location(&headers, account.id);
            info!("Account with id [{}] created", account.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, loc)],
                Json(AccountDto::from(account)),
            ))
        }
        Err(e) => {
            error!("Failed to create account: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Every account, ordered by id", body = [AccountDto]),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_accounts(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<AccountDto>>, ProblemResponse> {
    info!("Request to list accounts");

    match svc.list_accounts().await {
        Ok(accounts) => Ok(Json(accounts.into_iter().map(AccountDto::from).collect())),
        Err(e) => {
            error!("Failed to list accounts: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific account by ID
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = u64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account found", body = AccountDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_account(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    raw_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<AccountDto>, ProblemResponse> {
    let id = to_account_id(raw_id, uri.path())?;
    info!("Request to read an account with id: {}", id);

    match svc.get_account(id).await {
        Ok(account) => Ok(Json(AccountDto::from(account))),
        Err(e) => {
            error!("Failed to get account {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Replace an existing account
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = u64, Path, description = "Account id")),
    request_body(content = AccountReq, content_type = "application/json"),
    responses(
        (status = 200, description = "Updated account", body = AccountDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 415, description = "Unsupported Media Type", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_account(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    raw_id: Result<Path<u64>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AccountDto>, ProblemResponse> {
    check_content_type(&headers, JSON, uri.path())?;
    let id = to_account_id(raw_id, uri.path())?;
    info!("Request to update an account with id: {}", id);

    // A missing account is 404 whatever the body holds.
    if let Err(e) = svc.get_account(id).await {
        error!("Failed to update account {}: {}", id, e);
        return Err(map_domain_error(&e, uri.path()));
    }

    let req = AccountReq::from_json(&body).map_err(|e| {
        error!("Failed to decode account: {}", e);
        invalid_body(&e, uri.path())
    })?;

    match svc.update_account(id, req.into()).await {
        Ok(account) => Ok(Json(AccountDto::from(account))),
        Err(e) => {
            error!("Failed to update account {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete an account by ID
#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = u64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_account(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    raw_id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ProblemResponse> {
    let id = to_account_id(raw_id, uri.path())?;
    info!("Request to delete an account with id: {}", id);

    match svc.delete_account(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete account {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn location_uses_host_when_present() {
        let mut h = HeaderMap::new();
        assert_eq!(location(&h, 5), "/accounts/5");
        h.insert(header::HOST, HeaderValue::from_static("localhost:8080"));
        assert_eq!(location(&h, 5), "http://localhost:8080/accounts/5");
    }

    #[test]
    fn out_of_range_id_is_not_found() {
        assert_eq!(to_account_id(Ok(Path(7)), "/accounts/7").unwrap(), 7);
        let err = to_account_id(Ok(Path(u64::MAX)), "/accounts/x").unwrap_err();
        assert_eq!(err.0.status, 404);
        assert!(err.0.detail.contains(&u64::MAX.to_string()));
    }
}
