pub mod content_type;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
