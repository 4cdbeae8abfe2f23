//! Generic, registry-driven store behind `/api/tables/{table}`.

pub mod error;
pub mod query;
pub mod repository;
pub mod seed;
pub mod service;

pub use error::StoreError;
