use clap::{Parser, Subcommand};
use keysolve::config;
use keysolve::constraints::AllowedPairs;
use keysolve::corpus::Corpus;
use keysolve::error::KsResult;
use std::fs;
use std::process;
use tracing::{error, warn};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// N-gram corpus: a JSON table file, or raw text (.txt) to ingest.
    #[arg(global = true, short, long, default_value = "data/corpus.json")]
    corpus: String,

    /// Allowed-pairs JSON. Letters pair freely when omitted.
    #[arg(global = true, long)]
    pairs: Option<String>,

    /// Percentile table JSON for stat-card ranks.
    #[arg(global = true, long)]
    percentiles: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Generate(cmd::generate::GenerateArgs),
    Audit(cmd::audit::AuditArgs),
}

fn load_corpus(path: &str) -> KsResult<Corpus> {
    if path.ends_with(".txt") {
        let text = fs::read_to_string(path)?;
        Ok(Corpus::from_text(&text))
    } else {
        Corpus::load_from_file(path)
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let pairs = match &cli.pairs {
        Some(path) => config::load_pairs(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        }),
        None => AllowedPairs::default(),
    };

    let percentiles = match &cli.percentiles {
        Some(path) => match reports::PercentileTable::load_from_file(path) {
            Ok(table) => Some(table),
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let result = match cli.command {
        Commands::Generate(args) => {
            // A missing corpus only costs the stat report.
            let corpus = match load_corpus(&cli.corpus) {
                Ok(c) => Some(c),
                Err(e) => {
                    warn!("Corpus unavailable ({}); skipping the stat report", e);
                    None
                }
            };
            cmd::generate::run(args, pairs, corpus.as_ref(), percentiles.as_ref())
        }
        Commands::Audit(args) => match load_corpus(&cli.corpus) {
            Ok(corpus) => cmd::audit::run(args, &corpus, percentiles.as_ref()),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
