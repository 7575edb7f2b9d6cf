use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the accounts module (`modules.accounts` in the app config).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountsConfig {
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    #[serde(default = "default_max_email_length")]
    pub max_email_length: usize,
    #[serde(default = "default_max_address_length")]
    pub max_address_length: usize,
    #[serde(default = "default_max_phone_number_length")]
    pub max_phone_number_length: usize,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            max_email_length: default_max_email_length(),
            max_address_length: default_max_address_length(),
            max_phone_number_length: default_max_phone_number_length(),
        }
    }
}

impl From<&AccountsConfig> for ServiceConfig {
    fn from(cfg: &AccountsConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
            max_email_length: cfg.max_email_length,
            max_address_length: cfg.max_address_length,
            max_phone_number_length: cfg.max_phone_number_length,
        }
    }
}

fn default_max_name_length() -> usize {
    64
}

fn default_max_email_length() -> usize {
    64
}

fn default_max_address_length() -> usize {
    256
}

fn default_max_phone_number_length() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_other_defaults() {
        let cfg: AccountsConfig =
            serde_json::from_value(serde_json::json!({ "max_name_length": 10 })).unwrap();
        assert_eq!(cfg.max_name_length, 10);
        assert_eq!(cfg.max_address_length, 256);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_value::<AccountsConfig>(serde_json::json!({ "page_size": 5 }));
        assert!(res.is_err());
    }
}
