//! Pager support for long CLI output.
//!
//! Long `highlight --all` and `rules list` output is piped through a pager
//! when it exceeds the terminal height.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::terminal::{is_tty, terminal_height};

/// Disables paging when set.
pub const NO_PAGER_ENV: &str = "SRH_NO_PAGER";

/// Pager command override, checked before `PAGER`.
pub const PAGER_ENV: &str = "SRH_PAGER";

/// Returns `true` if the content exceeds the terminal height and should be paged.
pub fn should_page(content: &str) -> bool {
    if env::var_os(NO_PAGER_ENV).is_some() || !is_tty() {
        return false;
    }
    let height = terminal_height();
    if height == 0 {
        return false;
    }
    // Leave one line for the shell prompt.
    content.lines().count() > height.saturating_sub(1)
}

/// Pipes content through a pager if appropriate, otherwise prints directly.
///
/// The pager is `$SRH_PAGER`, then `$PAGER`, then `less`. `LESS=-RFX` is set
/// unless the user already has a `LESS` value.
pub fn page(content: &str) {
    if !should_page(content) {
        print!("{content}");
        return;
    }

    let pager_cmd = pager_command(env::var(PAGER_ENV).ok(), env::var("PAGER").ok());
    let mut parts = pager_cmd.split_whitespace();
    let Some(program) = parts.next() else {
        print!("{content}");
        return;
    };

    let mut cmd = Command::new(program);
    cmd.args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if env::var_os("LESS").is_none() {
        cmd.env("LESS", "-RFX");
    }

    match cmd.spawn() {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                // Broken pipe when the user quits early is fine.
                let _ = stdin.write_all(content.as_bytes());
            }
            let _ = child.wait();
        }
        Err(_) => print!("{content}"),
    }
}

/// Picks the first non-empty pager setting, defaulting to `less`.
fn pager_command(srh_pager: Option<String>, pager: Option<String>) -> String {
    [srh_pager, pager]
        .into_iter()
        .flatten()
        .find(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "less".to_string())
}
