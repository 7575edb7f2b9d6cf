use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{Account, AccountId, AccountUpdate, NewAccount};

/// REST representation of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: AccountId,
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    #[schema(value_type = String, format = Date, example = "2024-01-31")]
    pub date_joined: NaiveDate,
}

/// Request body for create and full update. Unknown keys, `id` included, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountReq {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub date_joined: Option<NaiveDate>,
}

impl AccountReq {
    /// Structural decode of a request body: must be a JSON object with a
    /// string `name` and correctly typed optional fields.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<Account> for AccountDto {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            address: a.address,
            phone_number: a.phone_number,
            date_joined: a.date_joined,
        }
    }
}

impl From<AccountReq> for NewAccount {
    fn from(req: AccountReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            address: req.address,
            phone_number: req.phone_number,
            date_joined: req.date_joined,
        }
    }
}

impl From<AccountReq> for AccountUpdate {
    fn from(req: AccountReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            address: req.address,
            phone_number: req.phone_number,
            date_joined: req.date_joined,
        }
    }
}
