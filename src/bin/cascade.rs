use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use cascade_layout::common::config::{Config, config_file};
use cascade_layout::common::log;
use cascade_layout::model::{
    ContextCategory, LayoutResult, Overrides, PixelFrame, PreferenceSnapshot, RunningApp,
    ScreenSize,
};
use cascade_layout::{LayoutEngine, LayoutRequest};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

#[derive(Parser)]
#[command(name = "cascade")]
#[command(about = "Arrange running applications into a context-aware cascade")]
struct Cli {
    /// Config file to use instead of ~/.cascade.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a layout and print it as JSON
    Arrange {
        /// Running application, `Name` or `Name:minimized` (repeatable)
        #[arg(long = "app", required = true)]
        apps: Vec<RunningApp>,
        /// What you want to do, e.g. "i want to code"
        #[arg(long, default_value = "")]
        intent: String,
        /// Screen size as WIDTHxHEIGHT
        #[arg(long, default_value = "1440x900")]
        screen: ScreenSize,
        /// JSON object of manual overrides keyed by app name
        #[arg(long)]
        overrides: Option<PathBuf>,
        /// JSON preference snapshot
        #[arg(long)]
        preferences: Option<PathBuf>,
        /// Also print every placement in screen units
        #[arg(long)]
        pixels: bool,
    },
    /// Print the archetype of each application name
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the context category derived from an intent
    Context {
        #[arg(required = true)]
        intent: Vec<String>,
    },
    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Report every invalid value in the config file
    Validate,
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

#[derive(Serialize)]
struct PixelPlacement<'a> {
    app: &'a str,
    layer: u32,
    focused: bool,
    frame: PixelFrame,
}

#[derive(Serialize)]
struct ArrangeOutput<'a> {
    #[serde(flatten)]
    result: &'a LayoutResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pixels: Option<Vec<PixelPlacement<'a>>>,
}

fn main() {
    log::init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(config_file);

    match cli.command {
        Commands::Arrange {
            apps,
            intent,
            screen,
            overrides,
            preferences,
            pixels,
        } => {
            let engine = LayoutEngine::new(&load_config(&config_path)?);
            let mut request = LayoutRequest::new(apps, intent, screen);
            if let Some(path) = overrides {
                request = request.with_overrides(read_json::<Overrides>(&path)?);
            }
            if let Some(path) = preferences {
                request = request.with_preferences(read_json::<PreferenceSnapshot>(&path)?);
            }

            let result = engine.arrange(&request)?;
            let pixels = pixels.then(|| {
                result
                    .placements
                    .iter()
                    .map(|p| PixelPlacement {
                        app: &p.app,
                        layer: p.layer,
                        focused: p.focused,
                        frame: p.to_pixels(screen),
                    })
                    .collect()
            });
            let output = ArrangeOutput { result: &result, pixels };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Classify { names } => {
            let engine = LayoutEngine::new(&load_config(&config_path)?);
            for name in names {
                println!("{name}: {}", engine.classify(&name));
            }
        }
        Commands::Context { intent } => {
            println!("{}", ContextCategory::from_intent(&intent.join(" ")));
        }
        Commands::Config { config_cmd } => match config_cmd {
            ConfigCommands::Path => println!("{}", config_path.display()),
            ConfigCommands::Show => {
                let config = load_config(&config_path)?;
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigCommands::Validate => {
                let config = Config::load_or_default(&config_path)?;
                let issues = config.validate();
                if issues.is_empty() {
                    println!("{}: ok", config_path.display());
                } else {
                    for issue in &issues {
                        println!("{issue}");
                    }
                    anyhow::bail!("{} invalid value(s) in {}", issues.len(), config_path.display());
                }
            }
        },
    }

    Ok(())
}

/// Reads the config, replacing invalid values with defaults.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path)?;
    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            warn!("Config issue: {}", issue);
        }
        let fixes = config.auto_fix_values();
        warn!("Applied {} automatic fixes to {}", fixes, path.display());
    }
    Ok(config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let buf = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&buf).with_context(|| format!("parsing {}", path.display()))
}
