mod cli;
mod commands;
mod terminal;

use std::process::ExitCode;

use folio_common::Result;
use folio_config::schema::FolioConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

const DEFAULT_DIRECTIVE: &str = "folio=info";

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments. Values may
/// be wrapped in single or double quotes.
fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Entries from `contents` whose key is not already set.
fn dotenv_updates(contents: &str, is_set: impl Fn(&str) -> bool) -> Vec<(String, String)> {
    parse_dotenv(contents)
        .into_iter()
        .filter(|(key, _)| !is_set(key))
        .collect()
}

/// Load environment variables from the first `.env` found. Variables
/// already set in the environment win.
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        std::path::PathBuf::from(".env"),
        // Workspace root, two levels up from crates/folio-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in dotenv_updates(&contents, |k| std::env::var_os(k).is_some()) {
                std::env::set_var(key, value);
            }
            return;
        }
    }
}

/// An explicit `--config` must load; the default location falls back to
/// built-in defaults.
fn load_config(args: &Args) -> Result<(FolioConfig, Option<String>)> {
    match &args.config {
        Some(path) => Ok((folio_config::load_config_from(path)?, None)),
        None => match folio_config::load_config() {
            Ok(config) => Ok((config, None)),
            Err(e) => Ok((
                FolioConfig::default(),
                Some(format!("Config load failed, using defaults: {e}")),
            )),
        },
    }
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| DEFAULT_DIRECTIVE.parse().unwrap()),
            ),
        )
        .init();
}

async fn run(args: &Args, config: &FolioConfig) -> Result<()> {
    match args.command() {
        Command::Seo { out } => commands::seo(config, out),
        Command::Config => commands::show_config(config),
        Command::Prompt => commands::prompt(&commands::load_resume(&config.content)?),
        Command::Chat => {
            let resume = commands::load_resume(&config.content)?;
            commands::chat(config, &resume).await
        }
        Command::Ask { question } => {
            let resume = commands::load_resume(&config.content)?;
            commands::ask(config, &resume, question).await
        }
    }
}

fn main() -> ExitCode {
    // Load .env file before anything else, while the process is still
    // single-threaded.
    load_dotenv();

    let args = cli::parse();
    let loaded = load_config(&args);

    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => cli::log_directive(level),
        (None, Ok((config, _))) => config.logging.level.directive().to_string(),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("Folio v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok((config, warning)) => {
            if let Some(warning) = warning {
                tracing::warn!("{warning}");
            }
            config
        }
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&args, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
