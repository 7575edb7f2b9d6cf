use utoipa::OpenApi;

use api_errors::{Problem, ValidationError};

use crate::api::rest::dto::{AccountDto, AccountReq};
use crate::api::rest::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Account REST API Service", version = "1.0"),
    paths(
        handlers::create_account,
        handlers::list_accounts,
        handlers::get_account,
        handlers::update_account,
        handlers::delete_account,
    ),
    components(schemas(AccountDto, AccountReq, Problem, ValidationError)),
    tags((name = "accounts", description = "Account management"))
)]
pub struct AccountsApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_account_paths_and_schemas() {
        let v = serde_json::to_value(AccountsApiDoc::openapi()).unwrap();
        let paths = v["paths"].as_object().unwrap();
        assert!(paths.contains_key("/accounts"));
        assert!(paths.contains_key("/accounts/{id}"));
        assert!(v.pointer("/paths/~1accounts/post").is_some());
        assert!(v.pointer("/paths/~1accounts~1{id}/delete").is_some());
        assert!(v.pointer("/components/schemas/AccountDto").is_some());
        assert!(v.pointer("/components/schemas/Problem").is_some());
    }
}
