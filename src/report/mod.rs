//! Report rendering.
//!
//! This module turns the computed summaries into the text and JSON
//! report formats.

pub mod generator;

pub use generator::{generate_json_report, generate_text_report};
