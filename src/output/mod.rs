//! Output module for per-site navigation reports
//!
//! This module handles:
//! - Turning a search outcome into a report row
//! - Printing reports as an aligned table or as JSON lines

mod format;
mod report;

pub use format::{format_table, print_table, write_json_lines};
pub use report::SiteReport;
