//! Request validation engine.
//!
//! Decodes a request body into a typed value, runs derive-driven field
//! validation, checks uploaded files against declared [`FileRule`]s and merges
//! every violation into one ordered list. Framework glue lives in
//! `reqcheck-api`; nothing here knows about HTTP.
//!
//! [`FileRule`]: validation::FileRule

pub mod error;
pub mod naming;
pub mod pagination;
pub mod upload;
pub mod validation;
