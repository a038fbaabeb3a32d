//! `srh operators` -- list the operators offered for a column type.

use anyhow::Result;
use srh_core::enums::ColumnType;
use srh_engine::catalog::{family_for, operators_for_column_type};

use crate::cli::OperatorsArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `srh operators` command.
pub fn run(ctx: &RuntimeContext, args: &OperatorsArgs) -> Result<()> {
    let column_type = ColumnType::from(args.column_type.trim());
    let family = family_for(&column_type);
    let operators = operators_for_column_type(&column_type);

    if ctx.json {
        output_json(&serde_json::json!({
            "columnType": column_type,
            "family": family,
            "operators": operators,
        }));
        return Ok(());
    }

    if !column_type.is_builtin() && !ctx.quiet {
        eprintln!(
            "note: unknown column type '{column_type}', showing text operators (known: {})",
            ColumnType::builtins().join(", ")
        );
    }
    if !ctx.quiet {
        println!("{column_type} ({family} family)");
        println!();
    }
    let rows: Vec<Vec<String>> = operators
        .iter()
        .map(|op| vec![op.operator_id.to_string(), op.label.to_string()])
        .collect();
    output_table(&["Operator", "Label"], &rows);
    Ok(())
}
