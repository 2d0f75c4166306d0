//! Shared wire and domain types for the postbox contact-form service.
//!
//! Kept free of HTTP and database dependencies so the validator and the
//! store can both depend on it.

pub mod api;
pub mod models;
