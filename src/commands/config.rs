//! Config command handler - show the effective configuration

use crate::cli::{ConfigArgs, ConfigOperation, OutputFormat};
use crate::commands::CommandContext;
use crate::config::DocgenConfig;
use crate::error::{DocgenError, Result};

/// Run the config command
pub fn run_config(args: &ConfigArgs, ctx: &CommandContext) -> Result<String> {
    match args.operation {
        ConfigOperation::Show => {
            let config = ctx.load_config()?;
            match ctx.format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&config).map_err(|e| {
                        DocgenError::OutputFailure {
                            message: format!("JSON serialization failed: {}", e),
                        }
                    })?;
                    Ok(format!("{}\n", json))
                }
                OutputFormat::Text => config.to_toml(),
            }
        }
        ConfigOperation::Path => match DocgenConfig::locate(ctx.config_path.as_deref()) {
            Some(path) => Ok(format!("{}\n", path.display())),
            None => Ok("(no configuration file, using defaults)\n".to_string()),
        },
    }
}
