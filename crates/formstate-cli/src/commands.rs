use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use formstate_filter::{FieldStateFilter, FilterConfig, NameCheck};
use formstate_types::{AttributeSelector, FieldPatch, FieldSnapshot, FIELD_ATTRIBUTES};
use serde_json::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Filter(args) => cmd_filter(args, cli.format),
        Command::Attributes => cmd_attributes(cli.format),
    }
}

fn cmd_filter(args: FilterArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let selector = build_selector(&args);
    if selector.is_empty() && !config.force {
        tracing::warn!("no attributes selected; nothing can change");
    }

    let new = load_snapshot(&args.new)?;
    let old = load_snapshot(&args.old)?;

    let filter = FieldStateFilter::new(config);
    let patch = filter.filter(&new, &old, &selector)?;
    println!("{}", render_patch(patch.as_ref(), format)?);
    Ok(())
}

fn cmd_attributes(format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&FIELD_ATTRIBUTES)?),
        OutputFormat::Text => {
            for attribute in FIELD_ATTRIBUTES {
                println!("{attribute}");
            }
        }
    }
    Ok(())
}

/// Read the config file, if any, then let flags override it.
fn resolve_config(args: &FilterArgs) -> anyhow::Result<FilterConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FilterConfig::default(),
    };
    if args.force {
        config.force = true;
    }
    if args.strict_names {
        config.name_check = NameCheck::Reject;
    }
    Ok(config)
}

fn load_config(path: &Path) -> anyhow::Result<FilterConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_snapshot(path: &Path) -> anyhow::Result<FieldSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    FieldSnapshot::from_json(&text).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn build_selector(args: &FilterArgs) -> AttributeSelector {
    let mut selector = if args.all {
        AttributeSelector::all()
    } else {
        AttributeSelector::new()
    };
    for name in args.select.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        selector.select(name);
    }
    selector
}

fn render_patch(patch: Option<&FieldPatch>, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match (patch, format) {
        (None, OutputFormat::Json) => "null".to_string(),
        (None, OutputFormat::Text) => "No changes.".to_string(),
        (Some(patch), OutputFormat::Json) => serde_json::to_string_pretty(patch)?,
        (Some(patch), OutputFormat::Text) => {
            let mut out = format!("{} {}", "changed:".green().bold(), patch.name.yellow());
            for (key, value) in patch.iter() {
                let shown = match value {
                    Some(v) => render_value(v),
                    None => "<absent>".dimmed().to_string(),
                };
                out.push_str(&format!("\n  {}: {}", key.cyan(), shown));
            }
            out
        }
    };
    Ok(rendered)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
