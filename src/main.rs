use anyhow::Context;
use clap::Parser;
use etphone::patterns::{fixed_line, PhoneType};
use etphone::{classify, logging, Classification, Filters};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Validate and classify Ethiopian phone numbers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Phone numbers to classify (read from --file or stdin when omitted)
    numbers: Vec<String>,

    /// File with one phone number per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Accepted phone types (comma-separated: all, mobile, fixedLine, special, shortCode)
    #[arg(short = 't', long, env = "ETPHONE_TYPES")]
    types: Option<String>,

    /// Accepted providers (comma-separated: all, ethioTelecom, safaricom)
    #[arg(short, long, env = "ETPHONE_PROVIDERS")]
    providers: Option<String>,

    /// Print one JSON object per number
    #[arg(short, long)]
    json: bool,

    /// Print aggregate statistics instead of per-number results
    #[arg(short, long)]
    stats: bool,

    /// Process only first N numbers (optional)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of threads to use (default: 4)
    #[arg(short = 'T', long, default_value = "4")]
    threads: usize,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Row<'a> {
    input: &'a str,
    #[serde(flatten)]
    classification: &'a Classification,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(if args.verbose { "debug" } else { "warn" });

    let filters = Filters::parse(args.types.as_deref(), args.providers.as_deref())?;
    debug!(?filters, "using filters");

    let inputs = read_inputs(&args)?;
    info!(count = inputs.len(), "classifying numbers");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()
        .context("failed to build thread pool")?;

    let progress_bar = if args.stats {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} numbers ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let results: Vec<Classification> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let classification = classify(input.as_str(), &filters);
                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                }
                classification
            })
            .collect()
    });
    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }
    info!(elapsed = ?start.elapsed(), "classification finished");

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&build_stats(&results))?);
    } else if args.json {
        for (input, classification) in inputs.iter().zip(&results) {
            println!("{}", serde_json::to_string(&Row { input, classification })?);
        }
    } else {
        for (input, classification) in inputs.iter().zip(&results) {
            println!("{}", describe(input, classification));
        }
    }

    Ok(())
}

fn read_inputs(args: &Args) -> anyhow::Result<Vec<String>> {
    let limit = args.limit.unwrap_or(usize::MAX);

    if !args.numbers.is_empty() {
        return Ok(args.numbers.iter().take(limit).cloned().collect());
    }

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::with_capacity(1_000_000, file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let value = line.trim();
        // Blank lines and comments are not numbers
        if value.is_empty() || value.starts_with('#') {
            continue;
        }
        inputs.push(value.to_string());
        if inputs.len() >= limit {
            break;
        }
    }

    Ok(inputs)
}

fn describe(input: &str, classification: &Classification) -> String {
    match (&classification.phone_number, classification.provider, classification.phone_type) {
        (Some(number), Some(provider), Some(phone_type)) => {
            let region = match phone_type {
                PhoneType::FixedLine => fixed_line::region(number)
                    .map(|r| format!(" ({})", r))
                    .unwrap_or_default(),
                _ => String::new(),
            };
            format!("  \"{}\" => {} {} {}{}", input, provider, phone_type, number, region)
        }
        _ => format!("  \"{}\" => invalid", input),
    }
}

fn build_stats(results: &[Classification]) -> serde_json::Value {
    let total = results.len();
    let mut provider_counts: HashMap<String, usize> = HashMap::new();
    let mut type_counts: HashMap<String, usize> = HashMap::new();

    for classification in results {
        if let Some(provider) = classification.provider {
            *provider_counts.entry(provider.to_string()).or_insert(0) += 1;
        }
        if let Some(phone_type) = classification.phone_type {
            *type_counts.entry(phone_type.to_string()).or_insert(0) += 1;
        }
    }
    let valid = results.iter().filter(|c| c.is_valid).count();

    json!({
        "summary": {
            "total": total,
            "valid": valid,
            "invalid": total - valid
        },
        "providers": ranked(provider_counts, "provider", total),
        "types": ranked(type_counts, "phoneType", total)
    })
}

// Sorts counts highest first, with a percentage of all inputs.
fn ranked(counts: HashMap<String, usize>, key: &str, total: usize) -> Vec<serde_json::Value> {
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    entries
        .into_iter()
        .map(|(name, count)| {
            let percentage = if total > 0 {
                ((count as f64) / (total as f64) * 100.0).round()
            } else {
                0.0
            };
            json!({
                key: name,
                "count": count,
                "percentage": percentage
            })
        })
        .collect()
}
