//! Core types for the smart row highlighter.
//!
//! Board data (columns, items, raw payloads), rules and rule lists, the color
//! palette, rule validation and the rule interchange format. The evaluation
//! engine lives in `srh-engine`.

pub mod board;
pub mod enums;
pub mod idgen;
pub mod interchange;
pub mod number;
pub mod palette;
pub mod payload;
pub mod rule;
pub mod rule_list;
pub mod validation;
