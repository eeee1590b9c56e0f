//! HTTP request handlers.
//!
//! Handlers are thin: short-circuit on the policy evaluator, validate
//! through `precinct_core`, then call a repository and wrap the result in
//! the standard `{ "data": ... }` envelope.

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod cases;
pub mod features;
pub mod officers;
pub mod sanctions;
pub mod warrants;
