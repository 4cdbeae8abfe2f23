//! Generic CRUD manager driven by a `TableDescriptor`.
//!
//! Serves every reference table and every entity table of the console.

pub mod controller;
pub mod state;
pub mod view;

pub use view::ReferenceTable;
