//! omni-content CLI: rank a content folder, show one document, or print the record schema.
//!
//! Settings come from `packages/conf/content.yaml` merged with the user's
//! `omni-content/content.yaml`. Override the config directory with `--conf <dir>`.
//!
//! Logging: set `RUST_LOG=omni_content=debug` to see per-document logs on stderr.

mod cli;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use omni_content::{
    ContentPipeline, ContentSettings, NormalizedRecord, RankedCollection, RawDocument,
    load_content_settings, normalized_record_schema, read_text_safe,
};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_content=debug"
        } else {
            "omni_content=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_content_settings(cli.conf.as_deref());

    match cli.command {
        Command::Rank { dir, status, json } => run_rank(&dir, status.as_deref(), json, settings),
        Command::Show { file } => run_show(&file, settings),
        Command::Schema => {
            println!("{}", normalized_record_schema());
            Ok(())
        }
    }
}

fn run_rank(
    dir: &Path,
    status: Option<&str>,
    json: bool,
    settings: ContentSettings,
) -> anyhow::Result<()> {
    let ranked = ContentPipeline::with_settings(settings).run_directory(dir);

    if json {
        let output = match status {
            Some(status) => serde_json::to_string_pretty(ranked.bucket(status))?,
            None => serde_json::to_string_pretty(&ranked)?,
        };
        println!("{output}");
        return Ok(());
    }

    match status {
        Some(status) => print_bucket(status, ranked.bucket(status)),
        None => print_collection(&ranked),
    }
    Ok(())
}

fn run_show(file: &Path, settings: ContentSettings) -> anyhow::Result<()> {
    let content = read_text_safe(file, settings.store.max_bytes)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let identifier = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let record = ContentPipeline::with_settings(settings)
        .process_document(&RawDocument::new(identifier, content));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn print_collection(ranked: &RankedCollection) {
    if ranked.is_empty() {
        println!("(no documents)");
        return;
    }
    for (status, records) in ranked.iter() {
        print_bucket(status, records);
    }
}

fn print_bucket(status: &str, records: &[NormalizedRecord]) {
    println!("== {status} ({})", records.len());
    for record in records {
        let marker = if record.featured { "*" } else { " " };
        let date = if record.date.is_empty() {
            "----------"
        } else {
            record.date.as_str()
        };
        println!("[{marker}] {date}  {}  ({})", record.title, record.slug);
    }
}
