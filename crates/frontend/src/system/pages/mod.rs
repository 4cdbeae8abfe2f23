pub mod auth_page;
