pub mod api_utils;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod csv_import;
pub mod data_table;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod notifications;
pub mod optimistic;
pub mod page_frame;
pub mod pagination;
pub mod per_page;
pub mod storage;
pub mod table_data;
