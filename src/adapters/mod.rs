//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod json_store_adapter;
pub mod polygon_adapter;
pub mod text_report;
pub mod web_dashboard;
pub mod csv_export;
