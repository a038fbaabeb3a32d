//! Stored rule files and the export/import document.
//!
//! A stored rule list is a plain JSON array of rules. The export document
//! wraps the rules with a version and timestamp and strips their ids so the
//! file can be imported into any board.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::enums::ConditionLogic;
use crate::rule::{Condition, Rule};
use crate::rule_list::RuleList;

/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;

/// Error type for rule file and interchange operations.
#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an export document or an array of rules")]
    UnrecognizedDocument,

    #[error("rule {position}: {source}")]
    InvalidRule {
        position: usize,
        source: serde_json::Error,
    },
}

/// A rule as written to an export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedRule {
    pub name: String,
    pub color_id: String,
    pub enabled: bool,
    pub conditions: Vec<Condition>,
    pub condition_logic: ConditionLogic,
}

impl From<&Rule> for ExportedRule {
    fn from(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            color_id: rule.color_id.clone(),
            enabled: rule.enabled,
            conditions: rule.conditions.clone(),
            condition_logic: rule.condition_logic,
        }
    }
}

/// The export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleExport {
    pub version: u32,
    pub export_date: String,
    pub rules: Vec<ExportedRule>,
}

/// Builds the export document for `rules`.
pub fn export_rules<'a, I>(rules: I, now: DateTime<Utc>) -> RuleExport
where
    I: IntoIterator<Item = &'a Rule>,
{
    RuleExport {
        version: EXPORT_VERSION,
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        rules: rules.into_iter().map(ExportedRule::from).collect(),
    }
}

/// Parses an export document or a bare array of rules.
///
/// Legacy single-condition rules are normalized. The first rule that cannot
/// be read is reported with its 1-based position.
pub fn parse_import(s: &str) -> Result<Vec<Rule>, InterchangeError> {
    let doc: Value = serde_json::from_str(s)?;
    let entries = match doc {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("rules") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(InterchangeError::UnrecognizedDocument),
        },
        _ => return Err(InterchangeError::UnrecognizedDocument),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            Rule::deserialize(entry).map_err(|source| InterchangeError::InvalidRule {
                position: i + 1,
                source,
            })
        })
        .collect()
}

/// How imported rules combine with an existing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    #[default]
    Append,
    Replace,
}

/// Adds imported rules to `list`, returning their ids in order.
///
/// Rules without an id, or whose id is already taken, get a fresh one.
pub fn import_into(list: &mut RuleList, rules: Vec<Rule>, mode: ImportMode) -> Vec<String> {
    if mode == ImportMode::Replace {
        list.clear();
    }
    let mut ids = Vec::with_capacity(rules.len());
    for mut rule in rules {
        if list.get(&rule.id).is_some() {
            rule.id.clear();
        }
        // Ids are empty or unused here, so adding cannot fail.
        if let Ok(id) = list.add(rule) {
            ids.push(id);
        }
    }
    ids
}

/// Loads a stored rule list. A missing file is an empty list.
pub fn load_rule_list(path: &Path) -> Result<RuleList, InterchangeError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no stored rules; starting empty");
            return Ok(RuleList::new());
        }
        Err(source) => {
            return Err(InterchangeError::Read {
                path: path.to_owned(),
                source,
            });
        }
    };
    let list: RuleList = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), rules = list.len(), "loaded stored rules");
    Ok(list)
}

/// Writes a rule list as pretty JSON, creating parent directories.
pub fn save_rule_list(path: &Path, list: &RuleList) -> Result<(), InterchangeError> {
    let write_err = |source: io::Error| InterchangeError::Write {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string_pretty(list)?;
    fs::write(path, json + "\n").map_err(write_err)?;
    debug!(path = %path.display(), rules = list.len(), "saved stored rules");
    Ok(())
}
