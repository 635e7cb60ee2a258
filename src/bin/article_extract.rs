//! CLI that extracts an article and prints it as JSON to stdout.
//!
//! Usage:
//!   article_extract <url>            fetch the page and extract
//!   article_extract --stdin [url]    read HTML from stdin, `url` as its source
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use rs_article_parser::{extract_article, fetch_article, Article, FetchOptions};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: article_extract <url> | article_extract --stdin [url]";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let article = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["--stdin"] => from_stdin(None),
        ["--stdin", url] => from_stdin(Some(*url)),
        [url] if !url.starts_with('-') => match fetch_article(url, &FetchOptions::default()).await {
            Ok(article) => article,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let Some(article) = article else {
        eprintln!("No article found");
        return ExitCode::FAILURE;
    };

    print_article(&article)
}

fn from_stdin(url: Option<&str>) -> Option<Article> {
    let mut html = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut html) {
        eprintln!("Failed to read from stdin: {err}");
        return None;
    }

    extract_article(&html, url)
}

fn print_article(article: &Article) -> ExitCode {
    match serde_json::to_string_pretty(article) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to serialize article: {err}");
            ExitCode::FAILURE
        }
    }
}
