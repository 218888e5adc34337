//! Core domain types and logic.

pub mod record;
pub mod series;
pub mod frequency;
pub mod metrics;
pub mod report;
pub mod error;
