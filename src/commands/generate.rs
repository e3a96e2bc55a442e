//! Generate command handler - documentation records for a set of inputs

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::cli::{GenerateArgs, OutputFormat};
use crate::commands::CommandContext;
use crate::config::{CompilerOptions, DocgenConfig, ExtractionConfig};
use crate::docgen::{generate_documentation_with, ClassSymbolPolicy};
use crate::error::{DocgenError, Result};
use crate::fs_utils::expand_inputs;
use crate::schema::{DocEntry, EntryKind};

/// Run the generate command
///
/// Returns the rendered records, or an empty string when `--out` wrote them
/// to a file.
pub fn run_generate(args: &GenerateArgs, ctx: &CommandContext) -> Result<String> {
    let config = ctx.load_config()?;
    let (options, extraction) = resolve_settings(args, &config)?;

    let files = expand_inputs(&args.paths, options.allow_js, args.max_depth)?;
    debug!(count = files.len(), "expanded inputs");

    let entries = generate_documentation_with(&files, &options, &extraction)?;
    let output = render(&entries, ctx.format)?;

    match &args.out {
        Some(path) => {
            write_output(path, &output)?;
            info!(path = %path.display(), entries = entries.len(), "wrote documentation");
            Ok(String::new())
        }
        None => Ok(output),
    }
}

/// Merge the configuration file, `--project` and command-line flags.
///
/// Flags only ever switch options on; they never turn off what the
/// configuration enables.
fn resolve_settings(
    args: &GenerateArgs,
    config: &DocgenConfig,
) -> Result<(CompilerOptions, ExtractionConfig)> {
    let mut options = match &args.project {
        Some(tsconfig) => CompilerOptions::from_tsconfig(tsconfig)?,
        None => config.compiler.clone(),
    };
    options.strict |= args.strict;
    options.allow_js |= args.allow_js;
    options.no_resolve |= args.no_resolve;

    let mut extraction = config.extraction.clone();
    if args.class_fallback {
        extraction.class_symbol_policy = ClassSymbolPolicy::Fallback;
    }
    if args.no_file_names {
        extraction.include_file_names = false;
    }

    Ok((options, extraction))
}

fn render(entries: &[DocEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(entries).map_err(|e| DocgenError::OutputFailure {
                    message: format!("JSON serialization failed: {}", e),
                })?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Text => Ok(render_text(entries)),
    }
}

fn render_text(entries: &[DocEntry]) -> String {
    let mut out = String::new();

    for entry in entries {
        let kind = match entry.kind {
            Some(EntryKind::Class) => "class",
            Some(EntryKind::Function) | None => "function",
        };
        out.push_str(&format!("{} {}", kind, entry.name()));
        if let Some(file) = &entry.file_name {
            out.push_str(&format!(" ({})", file));
        }
        out.push('\n');

        if let Some(ty) = &entry.type_name {
            out.push_str(&format!("  type: {}\n", ty));
        }
        if let Some(doc) = entry.documentation.as_deref().filter(|d| !d.is_empty()) {
            for line in doc.lines() {
                out.push_str(&format!("  | {}\n", line));
            }
        }
        for signature in entry.signatures() {
            let params: Vec<String> = signature
                .parameters
                .iter()
                .map(|p| format!("{}: {}", p.name(), p.type_name.as_deref().unwrap_or("any")))
                .collect();
            out.push_str(&format!(
                "  ({}) => {}\n",
                params.join(", "),
                signature.return_type
            ));
        }
    }

    out
}

fn write_output(path: &Path, output: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DocgenError::OutputFailure {
            message: format!("cannot create {}: {}", parent.display(), e),
        })?;
    }
    fs::write(path, output).map_err(|e| DocgenError::OutputFailure {
        message: format!("cannot write {}: {}", path.display(), e),
    })
}
