//! RFC 9457 Problem Details plus a small static error catalog.

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{
    current_request_id, with_request_id, Problem, ProblemResponse, ValidationError,
    APPLICATION_PROBLEM_JSON,
};
