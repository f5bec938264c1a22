//! FEES labeler entry point.

use std::path::PathBuf;

use clap::Parser;

use fees_labeler::config::{AppConfig, LogLevel};
use fees_labeler::format::{ensure_preload_csv, load_optional_baseline};
use fees_labeler::keybindings::KeyBindings;
use fees_labeler::session::LabelSession;
use fees_labeler::state::BaselineStore;
use fees_labeler::terminal;

/// Command-line arguments for fees-labeler
#[derive(Parser, Debug)]
#[command(name = "fees-labeler")]
#[command(about = "Mark which anatomical structures are visible in each FEES frame")]
#[command(version)]
struct Args {
    /// Dataset root containing video*/swallow*/*frame_*.png
    folder: Option<PathBuf>,

    /// Baseline (preload) CSV with per-swallow severities
    #[arg(long)]
    preload: Option<PathBuf>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() {
    let args = Args::parse();

    let config_path = args.config.clone().or_else(AppConfig::default_path);
    let mut config = config_path
        .as_deref()
        .map(AppConfig::load_or_default)
        .unwrap_or_default();

    let level = args.log_level.unwrap_or(config.preferences.log_level);
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.to_level_filter().as_str()),
    )
    .init();

    let schema = match config.schema() {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    let bindings = KeyBindings::from_schema(&schema);

    let preload = args
        .preload
        .clone()
        .or_else(|| config.preferences.preload_csv.clone())
        .or_else(ensure_preload_csv);
    let baseline = match load_optional_baseline(preload.as_deref(), &schema) {
        Ok(baseline) => baseline.unwrap_or_else(BaselineStore::empty),
        Err(e) => {
            log::warn!("Failed to load baseline {:?}: {}", preload, e);
            eprintln!("Could not load baseline, severities default to 0: {}", e);
            BaselineStore::empty()
        }
    };

    let mut session = LabelSession::new(schema, baseline);

    let folder = args
        .folder
        .clone()
        .or_else(|| config.preferences.last_folder.clone());
    if let Some(folder) = folder {
        match session.open_folder(&folder) {
            Ok(_) => {
                config.preferences.last_folder = Some(folder);
                if let Some(path) = &config_path {
                    if let Err(e) = config.save(path) {
                        log::warn!("Failed to save config: {}", e);
                    }
                }
            }
            Err(e) => eprintln!("{}", terminal::describe_error(&e)),
        }
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(e) = terminal::run(&mut session, &bindings, stdin.lock(), &mut stdout) {
        eprintln!("Application error: {}", e);
    }
}
