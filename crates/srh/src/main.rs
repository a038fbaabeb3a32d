//! `srh` -- conditional row highlighting for boards.
//!
//! Parses CLI arguments with clap, resolves the runtime context (config,
//! theme, clock), and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // First Ctrl+C exits cleanly, a second one forces exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        std::process::exit(0);
    });

    let cli = Cli::parse();

    // Logging comes first so config loading is traced too.
    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("srh=debug,srh_engine=debug,srh_core=debug,srh_config=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| {
        match cli.command {
            Some(Commands::Highlight(args)) => commands::highlight::run(&ctx, &args),
            Some(Commands::Explain(args)) => commands::explain::run(&ctx, &args),
            Some(Commands::Validate(args)) => commands::validate::run(&ctx, &args),
            Some(Commands::Rules(args)) => commands::rules::run(&ctx, &args),
            Some(Commands::Export(args)) => commands::export::run(&ctx, &args),
            Some(Commands::Import(args)) => commands::import::run(&ctx, &args),
            Some(Commands::Operators(args)) => commands::operators::run(&ctx, &args),
            Some(Commands::Colors) => commands::colors::run(&ctx),
            Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, &args),
            Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
            Some(Commands::Version) => commands::version::run(&ctx),
            None => {
                use clap::CommandFactory;
                Cli::command().print_help().ok();
                println!();
                Ok(())
            }
        }
    });

    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
