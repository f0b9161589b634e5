use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use anthology::settings::Settings;
use anthology::{
    extract_collection, extract_collections, load_collection_from_json, save_collection_as_json,
    CollectionStats, Document,
};

#[derive(Parser)]
#[command(name = "anthology", about = "Split a fable anthology into a JSON document collection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract documents from anthology text files and save them as JSON
    Extract {
        /// Source text files (default: configured source)
        sources: Vec<PathBuf>,
        /// Output file, single source only (default: configured collection)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List the documents of a saved collection
    Show {
        /// Collection file (default: configured collection)
        #[arg(short, long)]
        collection: Option<PathBuf>,
        /// Print one full document instead of the table
        #[arg(long)]
        id: Option<u64>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Summary figures of a saved collection
    Stats {
        #[arg(short, long)]
        collection: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(settings = ?settings, "Starting anthology extractor");

    let result = match cli.command {
        Commands::Extract { sources, out } => {
            let sources = if sources.is_empty() {
                vec![settings.source_path()]
            } else {
                sources
            };
            if sources.len() == 1 {
                let out = out.unwrap_or_else(|| settings.collection_path());
                extract_one(&sources[0], &out)
            } else if out.is_some() {
                bail!("--out needs exactly one source, got {}", sources.len());
            } else {
                extract_many(&sources)
            }
        }
        Commands::Show { collection, id, limit } => {
            let path = collection.unwrap_or_else(|| settings.collection_path());
            let docs = load_collection_from_json(&path)
                .with_context(|| format!("Failed to load {:?}", path))?;
            if docs.is_empty() {
                println!("No documents. Run 'extract' first.");
                return Ok(());
            }
            match id {
                Some(id) => show_document(&docs, id),
                None => {
                    show_table(&docs, limit);
                    Ok(())
                }
            }
        }
        Commands::Stats { collection } => {
            let path = collection.unwrap_or_else(|| settings.collection_path());
            let docs = load_collection_from_json(&path)
                .with_context(|| format!("Failed to load {:?}", path))?;
            println!("Collection: {:?}", path);
            CollectionStats::from_documents(&docs).print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn extract_one(source: &Path, out: &Path) -> anyhow::Result<()> {
    let docs =
        extract_collection(source).with_context(|| format!("Failed to extract {:?}", source))?;
    save_collection_as_json(&docs, out).with_context(|| format!("Failed to save {:?}", out))?;
    print_summary(source, &docs, out);
    Ok(())
}

fn extract_many(sources: &[PathBuf]) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut ok = 0;
    let mut errors = 0;
    for chunk in sources.chunks(16) {
        for (source, result) in extract_collections(chunk) {
            let out = source.with_extension("json");
            let saved = result
                .map_err(anyhow::Error::from)
                .and_then(|docs| {
                    save_collection_as_json(&docs, &out)?;
                    Ok(docs)
                });
            match saved {
                Ok(docs) => {
                    ok += 1;
                    pb.suspend(|| print_summary(&source, &docs, &out));
                }
                Err(e) => {
                    errors += 1;
                    error!(source = ?source, error = %e, "extraction failed");
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    println!(
        "Done: {} sources ({} ok, {} errors).",
        sources.len(),
        ok,
        errors
    );
    Ok(())
}

fn print_summary(source: &Path, docs: &[Document], out: &Path) {
    let stats = CollectionStats::from_documents(docs);
    println!(
        "{:?}: {} documents, {} terms ({} untitled) -> {:?}",
        source, stats.documents, stats.total_terms, stats.untitled, out
    );
}

fn show_table(docs: &[Document], limit: usize) {
    println!(
        "{:>4} | {:<36} | {:>5} | {:<40}",
        "#", "Title", "Terms", "Text"
    );
    println!("{}", "-".repeat(96));

    for doc in docs.iter().take(limit) {
        let title = truncate(doc.title.as_deref().unwrap_or("-"), 36);
        let text = truncate(doc.text(), 40);
        println!(
            "{:>4} | {:<36} | {:>5} | {:<40}",
            doc.document_id,
            title,
            doc.term_count(),
            text
        );
    }

    println!("\n{} of {} documents", docs.len().min(limit), docs.len());
}

fn show_document(docs: &[Document], id: u64) -> anyhow::Result<()> {
    let Some(doc) = docs.iter().find(|d| d.document_id == id) else {
        bail!("No document with id {}", id);
    };
    println!("{}", serde_json::to_string_pretty(doc)?);
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
