//! jba-report
//!
//! Human-readable output for audit results.
//!
//! - [`render_underpayment_report`]: Markdown document, one section per
//!   underpaid project in first-seen order.
//! - [`write_report_file`]: writes that document, truncating any existing file.
//! - [`fee_shortfall_lines`]: one log line per project with fee shortfalls.
//!
//! Amounts are rendered with exact ETH digits; nothing here rounds.

mod fees;
mod markdown;

pub use fees::{fee_shortfall_line, fee_shortfall_lines};
pub use markdown::{render_underpayment_report, write_report_file, ReportLinks};

/// Default report file name, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "report.md";
