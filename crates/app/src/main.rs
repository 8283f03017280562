//! Varflat - Main Entry Point
//!
//! Loads a dataset file, resolves every record and writes the flattened
//! result back, to another file, or to stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use varflat_application::{FlattenDatasetFile, FlattenDatasetFileInput, FlattenTarget};
use varflat_domain::{ResolveSettings, SnapshotPolicy};
use varflat_infrastructure::{
    FileDatasetRepository, TokioFileSystem, load_settings, to_json_stable_bytes,
};

#[derive(Debug, Parser)]
#[command(name = "varflat")]
#[command(about = "Resolve ${...} references and $var directives in a dataset file")]
#[command(version)]
struct Cli {
    /// Dataset file (.json, .yaml or .yml)
    input: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Settings file (.json, .yaml or .yml)
    #[arg(long, env = "VARFLAT_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot policy for cross-record lookups: raw or progressive
    #[arg(long, env = "VARFLAT_POLICY")]
    policy: Option<SnapshotPolicy>,

    /// Fail if any key is left unresolved
    #[arg(long, env = "VARFLAT_STRICT")]
    strict: bool,

    /// Print the result as JSON on stdout and leave files untouched
    #[arg(long)]
    stdout: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Applies command-line overrides on top of file settings.
    fn settings(&self, base: ResolveSettings) -> ResolveSettings {
        let mut settings = base;
        if let Some(policy) = self.policy {
            settings.snapshot_policy = policy;
        }
        if self.strict {
            settings.fail_on_unresolved = true;
        }
        settings
    }

    fn target(&self) -> FlattenTarget {
        if self.stdout {
            FlattenTarget::Discard
        } else if let Some(output) = &self.output {
            FlattenTarget::File(output.clone())
        } else {
            FlattenTarget::Overwrite
        }
    }
}

/// Debug directives for this workspace's crates, added by `--verbose`.
const VERBOSE_DIRECTIVES: &str =
    "varflat=debug,varflat_domain=debug,varflat_application=debug,varflat_infrastructure=debug";

/// Builds the filter directives from `RUST_LOG` (default `info`).
///
/// `--verbose` raises only the workspace crates to `debug`.
fn filter_directives(rust_log: Option<&str>, verbose: bool) -> String {
    let base = rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .unwrap_or("info");
    if verbose {
        format!("{base},{VERBOSE_DIRECTIVES}")
    } else {
        base.to_string()
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(filter_directives(rust_log.as_deref(), verbose))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fs = TokioFileSystem::new();
    let base = match &cli.config {
        Some(path) => load_settings(&fs, path)
            .await
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ResolveSettings::default(),
    };
    let settings = cli.settings(base);

    let input = FlattenDatasetFileInput::new(cli.input.clone())
        .with_target(cli.target())
        .with_settings(settings);

    let output = FlattenDatasetFile::new(FileDatasetRepository::new(fs))
        .execute(input)
        .await
        .with_context(|| format!("flattening {}", cli.input.display()))?;

    if let Some(path) = &output.written_to {
        tracing::info!(path = %path.display(), "wrote flattened dataset");
    }

    if cli.stdout {
        let json = to_json_stable_bytes(&output.dataset)?;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&json).await?;
        stdout.flush().await?;
    }

    Ok(())
}
