mod dating;
mod error;
mod links;
mod normalize;
mod path;
mod pipeline;
mod registry;
mod settings;
mod source;
mod store;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use serde_json::Value;
use tracing::{error, info};

use settings::Settings;

#[derive(Parser)]
#[command(name = "artwork_normalizer", about = "Normalize museum artwork metadata from search documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage 1: raw search documents -> one normalized record per artwork
    Extract {
        /// Document, search page, list of documents, or directory of pages
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output directory (default: configured raw_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Max documents to process
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Stage 2: attach creation_date to every stage-1 record
    Enrich {
        /// Stage-1 directory (default: configured raw_dir)
        #[arg(short, long)]
        raw: Option<PathBuf>,
        /// Output directory (default: configured enriched_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Max records to enrich, in file name order
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Extract + enrich with the configured directories
    Run {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Normalize one document and print it, writing nothing
    Inspect {
        #[arg(short, long)]
        input: PathBuf,
        /// Position of the document in the input
        #[arg(long, default_value = "0")]
        index: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(settings = ?settings, "configuration loaded");

    let result = match cli.command {
        Commands::Extract { input, out, limit } => {
            let input = input.unwrap_or_else(|| settings.input.clone());
            let out = out.unwrap_or_else(|| settings.raw_dir.clone());
            let docs = load_docs(&input, limit)?;
            if docs.is_empty() {
                println!("No documents in {:?}.", input);
                return Ok(());
            }
            println!("Extracting {} documents...", docs.len());
            let counts = extract_docs(&docs, &out, settings.chunk_size)?;
            counts.print(&out);
            Ok(())
        }
        Commands::Enrich { raw, out, limit } => {
            let raw = raw.unwrap_or_else(|| settings.raw_dir.clone());
            let out = out.unwrap_or_else(|| settings.enriched_dir.clone());
            let counts = enrich_records(&raw, &out, limit, settings.chunk_size)?;
            counts.print(&out);
            Ok(())
        }
        Commands::Run { input, limit } => {
            let input = input.unwrap_or_else(|| settings.input.clone());
            let docs = load_docs(&input, limit)?;
            if docs.is_empty() {
                println!("No documents in {:?}.", input);
                return Ok(());
            }

            // Phase 1: extract
            let t_extract = Instant::now();
            println!("Pipeline: extracting {} documents...", docs.len());
            let counts = extract_docs(&docs, &settings.raw_dir, settings.chunk_size)?;
            println!("Extracted in {:.1}s", t_extract.elapsed().as_secs_f64());
            counts.print(&settings.raw_dir);

            // Phase 2: enrich
            let t_enrich = Instant::now();
            let counts = enrich_records(&settings.raw_dir, &settings.enriched_dir, None, settings.chunk_size)?;
            println!("Enriched in {:.1}s", t_enrich.elapsed().as_secs_f64());
            counts.print(&settings.enriched_dir);
            Ok(())
        }
        Commands::Inspect { input, index } => {
            let docs = source::load(&input)?;
            let doc = docs
                .get(index)
                .with_context(|| format!("{:?} holds {} documents, no index {}", input, docs.len(), index))?;
            match pipeline::normalize_and_date(doc) {
                Ok(out) => {
                    println!("{}", serde_json::to_string_pretty(&out.record)?);
                    for omitted in &out.omitted {
                        eprintln!("omitted {}: {}", omitted.field, omitted.reason);
                    }
                }
                Err(failure) => eprintln!("rejected {}", failure),
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", elapsed_label(elapsed));
    }

    result
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct StageCounts {
    written: usize,
    omitted_fields: usize,
    rejected: usize,
}

impl StageCounts {
    fn print(&self, out: &Path) {
        info!(written = self.written, omitted = self.omitted_fields, rejected = self.rejected, "stage finished");
        println!(
            "Wrote {} records to {:?} ({} fields omitted, {} records rejected).",
            self.written, out, self.omitted_fields, self.rejected,
        );
    }

    fn reject(&mut self, failure: &crate::error::RecordFailure) {
        error!(record = %failure.record_id, reason = %failure.reason, "record rejected");
        self.rejected += 1;
    }

    fn reject_file(&mut self, path: &Path, err: &anyhow::Error) {
        error!(path = %path.display(), error = %format!("{:#}", err), "unreadable stage-1 record");
        self.rejected += 1;
    }
}

fn load_docs(input: &Path, limit: Option<usize>) -> Result<Vec<Value>> {
    let mut docs = source::load(input)?;
    if let Some(n) = limit {
        docs.truncate(n);
    }
    Ok(docs)
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn extract_docs(docs: &[Value], out: &Path, chunk_size: usize) -> Result<StageCounts> {
    let pb = progress_bar(docs.len())?;
    let mut counts = StageCounts::default();

    for chunk in docs.chunks(chunk_size) {
        let results = pipeline::map_records(chunk, pipeline::normalize_record);

        let mut records = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(extracted) => {
                    counts.omitted_fields += extracted.omitted.len();
                    records.push(extracted.record);
                }
                Err(failure) => counts.reject(&failure),
            }
        }

        counts.written += store::save_records(out, &records)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn enrich_records(raw: &Path, out: &Path, limit: Option<usize>, chunk_size: usize) -> Result<StageCounts> {
    let paths = store::list_records(raw, limit)?;
    if paths.is_empty() {
        println!("No stage-1 records in {:?}. Run 'extract' first.", raw);
        return Ok(StageCounts::default());
    }
    println!("Enriching {} records...", paths.len());

    let pb = progress_bar(paths.len())?;
    let mut counts = StageCounts::default();

    for chunk in paths.chunks(chunk_size) {
        let results = pipeline::map_records(chunk, |p| {
            store::load_record(p).map(pipeline::attach_creation_date)
        });

        let mut records = Vec::with_capacity(results.len());
        for (path, result) in chunk.iter().zip(results) {
            match result {
                Ok(Ok(record)) => records.push(record),
                Ok(Err(failure)) => counts.reject(&failure),
                Err(err) => counts.reject_file(path, &err),
            }
        }

        counts.written += store::save_records(out, &records)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

/// `2.5s` under a minute, otherwise whole units from the largest non-zero one.
fn elapsed_label(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        return format!("{:.1}s", d.as_secs_f64());
    }
    [(secs / 3600, 'h'), (secs / 60 % 60, 'm'), (secs % 60, 's')]
        .into_iter()
        .skip_while(|(n, _)| *n == 0)
        .map(|(n, unit)| format!("{}{}", n, unit))
        .join(" ")
}
