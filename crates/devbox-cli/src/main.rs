//! devbox CLI entry point.
//!
//! Previews what a directory upload would send:
//!
//! - **check-ignore**: report whether given paths are excluded
//! - **ls-files**: list every entry that would be uploaded

mod config;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use config::{CliConfig, LogFormat};
use devbox_core::{IgnoreSource, UploadConfig, UploadManifest};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "devbox", version, about = "Preview devbox directory uploads")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report whether each path is excluded from the upload.
    CheckIgnore {
        /// Upload root.
        root: PathBuf,
        /// Paths relative to the root.
        #[arg(required = true)]
        paths: Vec<String>,
        #[command(flatten)]
        ignore: IgnoreArgs,
    },
    /// List the entries that would be uploaded.
    LsFiles {
        /// Upload root.
        root: PathBuf,
        #[command(flatten)]
        ignore: IgnoreArgs,
        /// Also list directories.
        #[arg(long)]
        include_dirs: bool,
        /// Print the manifest as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct IgnoreArgs {
    /// Ignore file to use instead of `<ROOT>/.dockerignore`.
    #[arg(long, conflicts_with_all = ["pattern", "no_ignore"])]
    ignore_file: Option<PathBuf>,
    /// Inline ignore rule (repeatable, evaluated in order).
    #[arg(long, conflicts_with = "no_ignore")]
    pattern: Vec<String>,
    /// Upload everything.
    #[arg(long)]
    no_ignore: bool,
}

impl IgnoreArgs {
    fn source(self, config: &CliConfig) -> IgnoreSource {
        if self.no_ignore {
            IgnoreSource::None
        } else if !self.pattern.is_empty() {
            IgnoreSource::Patterns(self.pattern)
        } else if let Some(path) = self.ignore_file.or_else(|| config.ignore_file.clone()) {
            IgnoreSource::File(path)
        } else {
            IgnoreSource::Default
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env();

    // Logs go to stderr; stdout carries command output.
    let filter = EnvFilter::from_default_env()
        .add_directive("devbox=info".parse()?)
        .add_directive("devbox_core=info".parse()?);
    let (text, json) = match config.log_format {
        LogFormat::Text => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();

    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Command::CheckIgnore {
            root,
            paths,
            ignore,
        } => {
            let source = ignore.source(&config);
            let matcher = source.resolve(&root).await;
            if matcher.is_none() {
                tracing::info!(root = %root.display(), "No ignore rules, everything is included");
            }
            for path in paths {
                let excluded = matcher.as_ref().is_some_and(|m| m.matches(&path));
                let verdict = if excluded { "excluded" } else { "included" };
                println!("{verdict}\t{path}");
            }
        }
        Command::LsFiles {
            root,
            ignore,
            include_dirs,
            json,
        } => {
            let upload = UploadConfig::builder()
                .root(&root)
                .ignore(ignore.source(&config))
                .include_dirs(include_dirs)
                .build()?;
            let manifest = UploadManifest::collect(&upload)
                .await
                .with_context(|| format!("failed to scan {}", root.display()))?;

            if json {
                println!("{}", manifest.to_json()?);
            } else {
                for path in manifest.paths() {
                    println!("{path}");
                }
            }
        }
    }

    Ok(())
}
