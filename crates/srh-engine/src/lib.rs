//! Rule evaluation for the smart row highlighter.
//!
//! Given a board's columns, an ordered rule list and a row, the engine decides
//! which rules match and which one colors the row. Every entry point is a pure
//! function of its inputs and the clock instant it is handed.

pub mod catalog;
pub mod evaluator;
pub mod matcher;
pub mod resolver;
pub mod table;

pub use evaluator::{Evaluator, FailReason, Verdict, evaluate};
pub use matcher::{matching_rules, rule_matches};
pub use resolver::{Highlight, resolve};
pub use table::HighlightTable;
