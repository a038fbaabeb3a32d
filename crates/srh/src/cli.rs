//! Clap CLI definitions for the `srh` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// srh -- conditional row highlighting for boards.
///
/// Evaluates an ordered list of highlight rules against board rows and shows
/// which rule colors each row.
#[derive(Parser, Debug)]
#[command(
    name = "srh",
    about = "Conditional row highlighting for boards",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Config file (default: .srh/config.yaml, discovered upward).
    #[arg(long, global = true, env = "SRH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Board theme; dark and black use the dark palette.
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Evaluate date conditions as of this local date/time
    /// (YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]).
    #[arg(long, global = true, env = "SRH_NOW")]
    pub now: Option<String>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Highlighting =====
    /// Show board rows with the rule that highlights each one.
    Highlight(HighlightArgs),

    /// Show how every rule evaluates against one row.
    Explain(ExplainArgs),

    /// Check a rule list against a board's columns.
    Validate(ValidateArgs),

    // ===== Rules =====
    /// Edit a stored rule list.
    Rules(RulesArgs),

    /// Export rules to the interchange format.
    Export(ExportArgs),

    /// Import rules from an export document or rule array.
    Import(ImportArgs),

    // ===== Reference =====
    /// List the operators offered for a column type.
    Operators(OperatorsArgs),

    /// List the highlight palette.
    Colors,

    // ===== Setup =====
    /// Show or initialize configuration.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Shared argument groups
// ---------------------------------------------------------------------------

/// Where the rule list comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleSourceArgs {
    /// Rule list file (JSON array of rules).
    #[arg(long, conflicts_with = "board_id")]
    pub rules: Option<PathBuf>,

    /// Board id; selects `<rules-dir>/<board-id>.json` under .srh/.
    #[arg(long)]
    pub board_id: Option<String>,
}

/// Board data input.
#[derive(Args, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Board data file (`{columns, items}` or a board API response).
    #[arg(long)]
    pub board: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Highlighting
// ---------------------------------------------------------------------------

/// Arguments for `srh highlight`.
#[derive(Args, Debug)]
pub struct HighlightArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub source: RuleSourceArgs,

    /// Page to show (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Show every row instead of one page.
    #[arg(long, conflicts_with = "page")]
    pub all: bool,

    /// Only show highlighted rows.
    #[arg(long)]
    pub only_highlighted: bool,
}

/// Arguments for `srh explain`.
#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub source: RuleSourceArgs,

    /// Item id to explain.
    #[arg(long)]
    pub item: String,
}

/// Arguments for `srh validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub source: RuleSourceArgs,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Arguments for `srh rules`.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub source: RuleSourceArgs,

    #[command(subcommand)]
    pub command: RulesCommands,
}

/// Rules subcommands.
#[derive(Subcommand, Debug)]
pub enum RulesCommands {
    /// List rules in priority order.
    #[command(alias = "ls")]
    List(RulesListArgs),

    /// Append a new rule.
    Add(RuleAddArgs),

    /// Change an existing rule.
    Edit(RuleEditArgs),

    /// Delete a rule.
    #[command(alias = "rm")]
    Delete(RuleIdArgs),

    /// Flip a rule between enabled and disabled.
    Toggle(RuleIdArgs),

    /// Enable a rule.
    Enable(RuleIdArgs),

    /// Disable a rule.
    Disable(RuleIdArgs),

    /// Move a rule up or down one position.
    Move(RuleMoveArgs),
}

/// Arguments for `srh rules list`.
#[derive(Args, Debug)]
pub struct RulesListArgs {
    /// Board file used to show column titles and operator labels.
    #[command(flatten)]
    pub board: BoardArgs,
}

/// Condition combination logic.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicArg {
    And,
    Or,
}

/// Arguments for `srh rules add`.
#[derive(Args, Debug)]
pub struct RuleAddArgs {
    /// Rule name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Palette color id.
    #[arg(long, default_value = "yellow")]
    pub color: String,

    /// How conditions combine.
    #[arg(long, value_enum, default_value_t = LogicArg::And)]
    pub logic: LogicArg,

    /// Condition as COLUMN:OPERATOR[:VALUE]; repeat for more. An empty
    /// OPERATOR takes the column's default (needs a board).
    #[arg(long = "condition", short = 'c', required = true)]
    pub conditions: Vec<String>,

    /// Add the rule disabled.
    #[arg(long)]
    pub disabled: bool,

    /// Validate against this board's columns before saving.
    #[command(flatten)]
    pub board: BoardArgs,
}

/// Arguments for `srh rules edit`.
#[derive(Args, Debug)]
pub struct RuleEditArgs {
    /// Rule id.
    pub id: String,

    /// New rule name.
    #[arg(long)]
    pub name: Option<String>,

    /// New palette color id.
    #[arg(long)]
    pub color: Option<String>,

    /// New condition logic.
    #[arg(long, value_enum)]
    pub logic: Option<LogicArg>,

    /// Replacement conditions as COLUMN:OPERATOR[:VALUE].
    #[arg(long = "condition", short = 'c')]
    pub conditions: Vec<String>,

    /// Validate against this board's columns before saving.
    #[command(flatten)]
    pub board: BoardArgs,
}

/// Arguments naming a single rule.
#[derive(Args, Debug)]
pub struct RuleIdArgs {
    /// Rule id.
    pub id: String,
}

/// Direction for `srh rules move`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveArg {
    Up,
    Down,
}

/// Arguments for `srh rules move`.
#[derive(Args, Debug)]
pub struct RuleMoveArgs {
    /// Rule id.
    pub id: String,

    /// Direction to move.
    #[arg(value_enum)]
    pub direction: MoveArg,
}

// ---------------------------------------------------------------------------
// Interchange
// ---------------------------------------------------------------------------

/// Arguments for `srh export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: RuleSourceArgs,

    /// Output file (default: stdout).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `srh import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Export document or JSON array of rules.
    pub file: PathBuf,

    #[command(flatten)]
    pub source: RuleSourceArgs,

    /// Replace the existing rules instead of appending.
    #[arg(long)]
    pub replace: bool,
}

// ---------------------------------------------------------------------------
// Reference & setup
// ---------------------------------------------------------------------------

/// Arguments for `srh operators`.
#[derive(Args, Debug)]
pub struct OperatorsArgs {
    /// Column type (e.g. status, numbers, date, checkbox).
    pub column_type: String,
}

/// Arguments for `srh config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration.
    Show,
    /// Print the config file path.
    Path,
    /// Create .srh/config.yaml in the current directory.
    Init,
}

/// Arguments for `srh completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_rules_add() {
        let cli = Cli::try_parse_from([
            "srh", "rules", "--rules", "r.json", "add", "--name", "Late", "--color", "red",
            "-c", "due:is_overdue", "-c", "status:not_equals:Done",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Rules(args)) => {
                assert_eq!(args.source.rules, Some(PathBuf::from("r.json")));
                match args.command {
                    RulesCommands::Add(add) => {
                        assert_eq!(add.conditions.len(), 2);
                        assert_eq!(add.logic, LogicArg::And);
                    }
                    other => panic!("unexpected: {other:?}"),
                }
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rules_and_board_id_conflict() {
        assert!(
            Cli::try_parse_from(["srh", "export", "--rules", "a.json", "--board-id", "1"]).is_err()
        );
    }
}
