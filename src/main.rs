// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use metatag_defaults::logging::{init_logging, LogConfig};
use metatag_defaults::settings::settings_path;
use metatag_defaults::{
    available_identifiers, load_settings_from, CreateTagSetOptions, DefaultsManager,
    RenderTarget, Settings, SpecialPage, TagValue, TokenContext, YamlStore,
};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Metatag defaults - manage layered metatag defaults and resolve them for pages
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (default: ~/.metatag/config.toml)
    #[arg(long, env = "METATAG_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Directory of stored tag sets, overriding the settings file
    #[arg(long, env = "METATAG_STORE", global = true)]
    store: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, env = "METATAG_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Enable JSON log format
    #[arg(long, env = "METATAG_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the module baselines that are not stored yet
    Install,
    /// List stored tag sets, protected ones first
    List {
        #[arg(long)]
        json: bool,
    },
    /// List identifiers that overrides can still be created for
    Available,
    /// Print one stored tag set
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Create a new tag set, e.g. `create node__article description=...`
    Create {
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(value_parser = parse_assignment)]
        tags: Vec<(String, String)>,
    },
    /// Set tags on a stored tag set; an empty value clears the field
    Set {
        id: String,
        #[arg(value_parser = parse_assignment, required = true)]
        tags: Vec<(String, String)>,
    },
    /// Delete an override. Protected sets cannot be deleted
    Delete { id: String },
    /// Restore a protected set to its baseline
    Revert { id: String },
    /// Resolve the effective tags for a page
    Resolve {
        /// Special page: front, 403 or 404
        #[arg(long, conflicts_with_all = ["entity_type", "bundle"])]
        page: Option<SpecialPage>,
        #[arg(long, required_unless_present = "page")]
        entity_type: Option<String>,
        #[arg(long, requires = "entity_type")]
        bundle: Option<String>,
        /// Token value, e.g. `--token node:title=Hello`
        #[arg(long = "token", value_parser = parse_assignment)]
        tokens: Vec<(String, String)>,
        #[arg(long)]
        json: bool,
    },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))
}

fn tag_values(pairs: Vec<(String, String)>) -> BTreeMap<String, TagValue> {
    pairs
        .into_iter()
        .map(|(name, value)| (name, TagValue::from(value)))
        .collect()
}

fn load_settings(args: &Args) -> Result<Settings> {
    let path = args
        .config
        .clone()
        .or_else(settings_path)
        .ok_or_else(|| eyre!("Could not determine settings path; pass --config"))?;
    let mut settings = load_settings_from(&path)
        .wrap_err_with(|| format!("Failed to load settings from {}", path.display()))?;
    if let Some(store) = &args.store {
        settings.store.path = Some(store.clone());
    }
    if let Some(level) = &args.log_level {
        settings.logging.level.clone_from(level);
    }
    settings.logging.json |= args.log_json;
    Ok(settings)
}

#[allow(unknown_lints, max_lines_per_function, clippy::too_many_lines)]
async fn run(command: Command, settings: Settings) -> Result<()> {
    let store_dir = settings.store.resolved_path();
    debug!("Using tag set store at {}", store_dir.display());
    let manager = DefaultsManager::new(YamlStore::new(store_dir))
        .with_entity_types(settings.entity_types.clone());
    let mut out = std::io::stdout().lock();

    match command {
        Command::Install => {
            let created = manager.install().await?;
            if created.is_empty() {
                writeln!(out, "Nothing to install")?;
            }
            for id in created {
                writeln!(out, "Installed {id}")?;
            }
        }
        Command::List { json } => {
            let summaries = manager.list_grouped().await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
            } else {
                for summary in summaries {
                    let marker = if summary.protected { " (protected)" } else { "" };
                    writeln!(out, "{}\t{}{}", summary.id, summary.label, marker)?;
                }
            }
        }
        Command::Available => {
            let existing: BTreeSet<String> = manager.list_all().await?.into_iter().collect();
            for id in available_identifiers(&settings.entity_types, &existing) {
                writeln!(out, "{id}")?;
            }
        }
        Command::Show { id, json } => {
            let tag_set = manager.get(&id).await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&tag_set)?)?;
            } else {
                write!(out, "{}", serde_yaml::to_string(&tag_set)?)?;
            }
        }
        Command::Create { id, label, tags } => {
            let tag_set = manager
                .create(CreateTagSetOptions {
                    id,
                    label,
                    tags: tag_values(tags),
                })
                .await?;
            writeln!(out, "Created {} ({})", tag_set.id, tag_set.label)?;
        }
        Command::Set { id, tags } => {
            let tag_set = manager.set_tags(&id, tag_values(tags)).await?;
            writeln!(out, "Updated {}", tag_set.id)?;
        }
        Command::Delete { id } => {
            manager.delete(&id).await?;
            writeln!(out, "Deleted {id}")?;
        }
        Command::Revert { id } => {
            manager.revert(&id).await?;
            writeln!(out, "Reverted {id}")?;
        }
        Command::Resolve {
            page,
            entity_type,
            bundle,
            tokens,
            json,
        } => {
            let target = match (page, entity_type) {
                (Some(page), _) => RenderTarget::Page(page),
                (None, Some(entity_type)) => RenderTarget::Entity {
                    entity_type,
                    bundle,
                },
                (None, None) => return Err(eyre!("Pass --page or --entity-type")),
            };
            let mut context: TokenContext = settings.site.tokens();
            for (token, value) in tokens {
                context.insert(token, value);
            }
            let effective = manager.render(&target, &context).await;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&effective)?)?;
            } else {
                for (name, value) in effective.to_meta_pairs() {
                    writeln!(out, "{name}: {value}")?;
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    let args = Args::parse();
    let settings = load_settings(&args)?;

    if let Err(e) = init_logging(LogConfig::from_settings(&settings.logging)) {
        eprintln!("Error: Failed to initialize logging: {e}");
        return Err(e);
    }

    run(args.command, settings).await
}
