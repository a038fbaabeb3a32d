//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds everything a command handler needs: the
//! discovered `.srh/` directory, the loaded configuration, global flags, the
//! effective theme and the clock that date conditions are evaluated against.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use srh_config::config::{self, CONFIG_FILE_NAME, SrhConfig};
use srh_config::srh_dir::{SRH_DIR_NAME, find_srh_dir};
use srh_core::board::{Board, Column};
use srh_core::enums::Theme;
use srh_core::interchange::{load_rule_list, save_rule_list};
use srh_core::payload::parse_date_time;
use srh_core::rule_list::RuleList;
use srh_engine::Evaluator;
use tracing::debug;

use crate::cli::{BoardArgs, GlobalArgs, RuleSourceArgs};

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Discovered `.srh/` directory, if any.
    pub srh_dir: Option<PathBuf>,

    /// Config file that was (or would be) loaded.
    pub config_path: Option<PathBuf>,

    /// Effective configuration after defaults, file and environment.
    pub config: SrhConfig,

    /// Effective theme (`--theme` over config).
    pub theme: Theme,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,

    /// Local date/time that date conditions are evaluated against.
    pub now: NaiveDateTime,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Config resolution: `--config` > `.srh/config.yaml` found upward from
    /// the working directory > defaults. `SRH_*` variables apply on top.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to read current directory")?;
        let srh_dir = find_srh_dir(&cwd);

        let config_path = match &global.config {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                Some(path.clone())
            }
            None => srh_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME)),
        };

        let config = match &config_path {
            Some(path) => config::load_config_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            // No file: defaults plus environment.
            None => config::load_config(&cwd.join(SRH_DIR_NAME)).context("failed to load config")?,
        };

        let theme = global
            .theme
            .as_deref()
            .map(Theme::from)
            .unwrap_or_else(|| config.theme.clone());

        let now = match &global.now {
            Some(s) => parse_date_time(s).with_context(|| {
                format!("invalid --now value '{s}' (expected YYYY-MM-DD[ HH:MM[:SS]])")
            })?,
            None => Local::now().naive_local(),
        };

        debug!(
            srh_dir = ?srh_dir,
            config = ?config_path,
            theme = %theme,
            now = %now,
            "resolved runtime context"
        );

        Ok(Self {
            json: global.json || config.json,
            srh_dir,
            config_path,
            config,
            theme,
            verbose: global.verbose,
            quiet: global.quiet,
            now,
        })
    }

    /// Whether the dark palette variants apply.
    pub fn dark_mode(&self) -> bool {
        self.theme.is_dark()
    }

    /// An evaluator over `columns` pinned to this context's clock.
    pub fn evaluator<'a>(&self, columns: &'a [Column]) -> Evaluator<'a> {
        Evaluator::at(columns, self.now)
    }

    // -----------------------------------------------------------------------
    // Board input
    // -----------------------------------------------------------------------

    /// Resolve the board data file: `--board` > `board` in config.
    ///
    /// A relative config path is taken relative to the directory that holds
    /// `.srh/`.
    pub fn board_path(&self, args: &BoardArgs) -> Result<PathBuf> {
        if let Some(path) = &args.board {
            return Ok(path.clone());
        }
        match &self.config.board {
            Some(path) => Ok(resolve_from_project(self.srh_dir.as_deref(), path)),
            None => {
                bail!("no board file given\nHint: pass --board or set `board` in .srh/config.yaml")
            }
        }
    }

    /// Load and parse the board data file.
    pub fn load_board(&self, args: &BoardArgs) -> Result<Board> {
        let path = self.board_path(args)?;
        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read board file {}", path.display()))?;
        let board = Board::from_json(&data)
            .with_context(|| format!("failed to parse board file {}", path.display()))?;
        debug!(
            path = %path.display(),
            columns = board.columns.len(),
            items = board.items.len(),
            "loaded board"
        );
        Ok(board)
    }

    /// Load the board only when one was given or configured.
    pub fn load_board_if_available(&self, args: &BoardArgs) -> Result<Option<Board>> {
        if args.board.is_none() && self.config.board.is_none() {
            return Ok(None);
        }
        self.load_board(args).map(Some)
    }

    // -----------------------------------------------------------------------
    // Rule storage
    // -----------------------------------------------------------------------

    /// Resolve the rule list file: `--rules` > `--board-id` > `board-id` in
    /// config. Board ids map to `<rules-dir>/<id>.json` under `.srh/`.
    pub fn rules_path(&self, source: &RuleSourceArgs) -> Result<PathBuf> {
        if let Some(path) = &source.rules {
            return Ok(path.clone());
        }
        let Some(board_id) = source.board_id.as_ref().or(self.config.board_id.as_ref()) else {
            bail!(
                "no rule list given\nHint: pass --rules <file>, --board-id <id>, or set `board-id` in .srh/config.yaml"
            );
        };
        let Some(srh_dir) = &self.srh_dir else {
            bail!(
                "--board-id needs a .srh directory\nHint: run 'srh config init' or pass --rules <file>"
            );
        };
        Ok(self.config.rules_path(srh_dir, board_id))
    }

    /// Load the rule list. A missing file is an empty list.
    pub fn load_rules(&self, source: &RuleSourceArgs) -> Result<(PathBuf, RuleList)> {
        let path = self.rules_path(source)?;
        let list = load_rule_list(&path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?;
        debug!(path = %path.display(), rules = list.len(), "loaded rules");
        Ok((path, list))
    }

    /// Write the rule list back to `path`.
    pub fn save_rules(&self, path: &Path, list: &RuleList) -> Result<()> {
        save_rule_list(path, list)
            .with_context(|| format!("failed to save rules to {}", path.display()))
    }
}

/// Resolve `path` against the directory containing `.srh/`.
fn resolve_from_project(srh_dir: Option<&Path>, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match srh_dir.and_then(Path::parent) {
        Some(root) => root.join(path),
        None => path.to_path_buf(),
    }
}
