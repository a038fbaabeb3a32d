//! Command handlers, one module per subcommand.

pub mod colors;
pub mod completion;
pub mod config_cmd;
pub mod explain;
pub mod export;
pub mod highlight;
pub mod import;
pub mod operators;
pub mod rules;
pub mod validate;
pub mod version;
