//! Port traits implemented by [`crate::adapters`].

pub mod config_port;
pub mod store_port;
pub mod market_data_port;
pub mod report_port;
