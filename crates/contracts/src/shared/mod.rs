pub mod descriptor;
pub mod reference;
pub mod registry;
pub mod row;
pub mod table_api;
