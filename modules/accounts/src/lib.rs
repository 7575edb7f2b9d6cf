// === PUBLIC CONTRACT ===
// Other crates consume the module through `contract` only.
pub mod contract;

pub use contract::{client, error, model};

// === MODULE WIRING ===
pub mod module;
pub use module::Accounts;

// === INTERNAL MODULES ===
// Exposed for integration tests and the server binary; not a stable API.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
