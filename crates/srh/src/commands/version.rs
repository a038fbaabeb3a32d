//! `srh version` -- print the version and the target it was built for.

use anyhow::Result;
use serde::Serialize;

use crate::context::RuntimeContext;
use crate::output::output_json;

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    /// Build id stamped by release builds through `SRH_BUILD`.
    build: &'static str,
    target: String,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build: option_env!("SRH_BUILD").unwrap_or("dev"),
            target: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

/// Execute the `srh version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let info = VersionInfo::current();
    if ctx.json {
        output_json(&info);
    } else {
        println!("srh {} ({}, {})", info.version, info.build, info.target);
    }
    Ok(())
}
