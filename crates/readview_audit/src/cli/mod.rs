//! CLI module for readview-audit
//!
//! Argument handling lives in `main.rs`; this module holds the command
//! itself, user-facing errors and report rendering.

pub mod audit;
pub mod error;
pub mod output;

pub use error::HelpfulError;
pub use output::{render_json, render_summary, render_table, render_text};
