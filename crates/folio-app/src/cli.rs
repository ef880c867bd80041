use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Folio: a resume-grounded chat assistant and site-artifact generator.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error) or a full filter
    /// directive such as `folio_ai=debug`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat with the assistant (default).
    Chat,
    /// Ask one question and stream the answer to stdout.
    Ask { question: String },
    /// Print the system prompt built from the resume.
    Prompt,
    /// Print the effective configuration as JSON.
    Config,
    /// Write sitemap.xml, rss.xml, feed.json and robots.txt.
    Seo {
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
}

impl Args {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Chat)
    }
}

pub fn parse() -> Args {
    Args::parse()
}

/// Turn a `--log-level` value into a filter directive. Bare levels are
/// scoped to the folio crates.
pub fn log_directive(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') {
        level.to_string()
    } else {
        format!("folio={level}")
    }
}
