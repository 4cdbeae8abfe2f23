//! Shared contracts between the console frontend and the table store backend.
//!
//! - `domain`: architecture layers and the entity tables that belong to them
//! - `shared`: rows, table descriptors, reference tables, table API wire types
//! - `system`: authentication and users

pub mod domain;
pub mod shared;
pub mod system;
