//! Configuration management for the smart row highlighter.
//!
//! This crate handles loading and saving `.srh/config.yaml` files and
//! discovering `.srh/` directories in the filesystem.

pub mod config;
pub mod srh_dir;
