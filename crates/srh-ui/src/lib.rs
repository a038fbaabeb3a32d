//! Terminal UI components for the smart row highlighter.
//!
//! Provides palette swatches and row highlighting, terminal detection, and
//! pager support for CLI output.

pub mod pager;
pub mod styles;
pub mod terminal;
