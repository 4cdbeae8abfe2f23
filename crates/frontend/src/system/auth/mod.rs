pub mod api;
pub mod context;
pub mod guard;
pub mod listeners;
pub mod storage;
