use std::io::{self, BufRead, Read, Write};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use fake_news_tfidf::{logging::LogFormat, AssetConfig, InferenceService, Readiness};
use serde_json::json;

/// fakenews - score news text with a TF-IDF + logistic-regression model
#[derive(Parser, Debug)]
#[command(name = "fakenews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify news text as fake (1) or real (0)", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify texts given as arguments, or stdin when none are given
    Classify {
        #[command(flatten)]
        assets: AssetConfig,

        /// Treat every stdin line as its own document
        #[arg(long)]
        lines: bool,

        #[arg(value_name = "TEXT")]
        texts: Vec<String>,
    },

    /// Print the preprocessed token string of each text
    Preprocess {
        #[arg(value_name = "TEXT")]
        texts: Vec<String>,
    },

    /// Load the assets and report readiness
    Check {
        #[command(flatten)]
        assets: AssetConfig,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    fake_news_tfidf::logging::init(cli.log_format)?;

    match cli.command {
        Command::Classify {
            assets,
            lines,
            texts,
        } => classify(&assets, lines, texts),
        Command::Preprocess { texts } => preprocess(texts),
        Command::Check { assets } => check(&assets),
    }
}

fn read_inputs(texts: Vec<String>, lines: bool) -> anyhow::Result<Vec<String>> {
    if !texts.is_empty() {
        return Ok(texts);
    }
    let stdin = io::stdin();
    if lines {
        stdin
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read stdin")
    } else {
        let mut buf = String::new();
        stdin
            .lock()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(vec![buf])
    }
}

fn classify(assets: &AssetConfig, lines: bool, texts: Vec<String>) -> anyhow::Result<()> {
    let service = InferenceService::from_config(assets);
    if let Some(err) = service.load_error() {
        bail!("model assets could not be loaded: {err}");
    }
    let inputs = read_inputs(texts, lines)?;

    let mut out = io::stdout().lock();
    let mut failed = 0usize;
    for result in service.classify_batch(&inputs) {
        match result {
            Ok(result) => serde_json::to_writer(&mut out, &result)?,
            Err(err) => {
                failed += 1;
                serde_json::to_writer(&mut out, &json!({ "error": err.to_string() }))?;
            }
        }
        writeln!(out)?;
    }
    out.flush()?;
    if failed > 0 {
        bail!("{failed} of {} inputs could not be classified", inputs.len());
    }
    Ok(())
}

fn preprocess(texts: Vec<String>) -> anyhow::Result<()> {
    let service = InferenceService::new();
    let mut out = io::stdout().lock();
    for text in read_inputs(texts, true)? {
        writeln!(out, "{}", service.preprocess(&text))?;
    }
    Ok(())
}

fn check(assets: &AssetConfig) -> anyhow::Result<()> {
    let service = InferenceService::from_config(assets);
    let report = match service.assets() {
        Some(store) => json!({
            "readiness": Readiness::Ready,
            "vocab_size": store.vocabulary().len(),
            "doc_num": store.corpus().get_doc_num(),
            "corpus_terms": store.corpus().vocab_size(),
            "idf_source": store.idf().source,
        }),
        None => json!({
            "readiness": service.readiness(),
            "error": service.load_error().map(|err| err.to_string()),
        }),
    };
    println!("{report}");
    if service.readiness() != Readiness::Ready {
        bail!("service is {}", service.readiness());
    }
    Ok(())
}
