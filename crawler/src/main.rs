use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use wordcrawl::{Config, CrawlError, CrawlReport, Crawler};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "wordcrawl", version, about = "Count the words on a page and on every page it links to")]
struct Cli {
    #[arg(value_name = "URL")]
    url: String,

    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "N")]
    max_concurrency: Option<usize>,

    /// Only print the N most frequent words.
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn print_table(report: &CrawlReport, limit: Option<usize>) {
    let words = match limit {
        Some(limit) => report.words.top(limit),
        None => report.words.as_slice(),
    };
    let width = words
        .iter()
        .map(|entry| entry.word.chars().count())
        .max()
        .unwrap_or(0)
        .max("Word".len());

    println!("Results for {}", report.seed);
    println!(
        "{} pages analysed, {} failed",
        report.pages_fetched, report.pages_failed
    );
    println!();
    println!("{:>width$} {:>8}", "Word", "Count", width = width);
    for entry in words {
        println!("{:>width$} {:>8}", entry.word, entry.count, width = width);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_module("wordcrawl", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.max_concurrency.is_some() {
        config.max_concurrency = cli.max_concurrency;
    }

    let crawler = Crawler::new(config)?;
    let report = match crawler.run(&cli.url).await {
        Ok(report) => report,
        Err(e @ CrawlError::InvalidInput { .. }) => {
            return Err(e).context("Invalid URL submitted");
        }
        Err(e) => return Err(e.into()),
    };

    match cli.format {
        Format::Text => print_table(&report, cli.limit),
        Format::Json => {
            let mut report = report;
            if let Some(limit) = cli.limit {
                report.words = report.words.truncated(limit);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("cannot encode report")?
            );
        }
    }

    Ok(())
}
