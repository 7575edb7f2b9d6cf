use chrono::NaiveDate;

/// Storage-assigned account identifier.
pub type AccountId = i64;

/// A persisted account. Transport-agnostic: no serde here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

/// Data for creating an account. `date_joined` defaults to today (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub date_joined: Option<NaiveDate>,
}

/// Full replacement of an account's mutable fields.
///
/// Optional fields left as `None` are cleared; a `None` `date_joined` keeps
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub date_joined: Option<NaiveDate>,
}

impl Account {
    /// Apply an update, producing the record to persist.
    pub fn replaced_with(&self, upd: AccountUpdate) -> Account {
        Account {
            id: self.id,
            name: upd.name,
            email: upd.email,
            address: upd.address,
            phone_number: upd.phone_number,
            date_joined: upd.date_joined.unwrap_or(self.date_joined),
        }
    }
}
