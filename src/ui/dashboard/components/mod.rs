//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod diagnostics;
pub mod footer;
pub mod header;
pub mod logs;
pub mod modal;
pub mod overview;
pub mod pricing;
pub mod tasks;
pub mod usage_chart;
