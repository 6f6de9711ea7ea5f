pub mod csv_file_uploader;
pub mod metric_card;
pub mod pagination_controls;
pub mod ui;
