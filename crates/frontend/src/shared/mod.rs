pub mod api_utils;
pub mod components;
pub mod icons;
pub mod layer_stats;
pub mod messages;
pub mod modal_frame;
pub mod notifications;
pub mod page_frame;
pub mod page_standard;
pub mod reference_table;
pub mod table_api;
