//! `srh config` -- show, locate or initialize configuration.

use anyhow::{Context, Result, bail};
use srh_config::config::{CONFIG_FILE_NAME, SrhConfig, save_config};
use srh_config::srh_dir::ensure_srh_dir;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `srh config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            if ctx.json {
                output_json(&ctx.config);
                return Ok(());
            }
            if !ctx.quiet {
                match &ctx.config_path {
                    Some(path) => println!("# {}", path.display()),
                    None => println!("# defaults (no .srh directory found)"),
                }
            }
            let yaml = serde_yaml::to_string(&ctx.config).context("failed to serialize config")?;
            print!("{yaml}");
        }

        ConfigCommands::Path => {
            let Some(path) = &ctx.config_path else {
                bail!("no config file (no .srh directory found)\nHint: run 'srh config init'");
            };
            if ctx.json {
                output_json(&serde_json::json!({
                    "path": path.display().to_string(),
                    "exists": path.is_file(),
                }));
            } else {
                println!("{}", path.display());
            }
        }

        ConfigCommands::Init => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            let srh_dir = ensure_srh_dir(&cwd)?;
            let config_path = srh_dir.join(CONFIG_FILE_NAME);
            let created = !config_path.exists();
            if created {
                save_config(&srh_dir, &SrhConfig::default())?;
            }

            if ctx.json {
                output_json(&serde_json::json!({
                    "path": config_path.display().to_string(),
                    "created": created,
                }));
            } else if !ctx.quiet {
                if created {
                    println!("Created {}", config_path.display());
                } else {
                    println!("{} already exists", config_path.display());
                }
            }
        }
    }
    Ok(())
}
