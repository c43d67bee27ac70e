//! HTTP route handlers for the JSON API.

pub mod transactions;
