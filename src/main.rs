use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

use sentence_pager::{reader, Document, ParagraphServer, SentenceTokenizer};

#[derive(Parser, Debug)]
#[command(name = "sentence-pager")]
#[command(about = "Serves four-sentence paragraphs of a text file over stdin/stdout")]
#[command(version)]
struct Args {
    /// Text file to segment into sentences
    textfile: PathBuf,
}

fn usage_and_exit() -> ! {
    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sentence-pager".to_string());
    println!("Usage: {program} textfile");
    std::process::exit(1);
}

fn main() -> Result<()> {
    // WHY: stdout carries protocol responses only
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => usage_and_exit(),
    };

    info!(?args, "Parsed CLI arguments");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(args));
    // A stdin read still pending after `exit` must not keep the process alive
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> Result<()> {
    let tokenizer = SentenceTokenizer::new().context("Failed to compile sentence boundary model")?;

    let document = {
        let (text, stats) = reader::read_document(&args.textfile).await?;
        let document = Document::from_text(&text, &tokenizer);
        info!(
            path = %stats.file_path,
            bytes = stats.bytes_read,
            sentences = document.sentence_count(),
            paragraphs = document.paragraph_count(),
            "Document tokenized"
        );
        document
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    let mut server = ParagraphServer::new(&document);
    server.serve(stdin, stdout).await?;

    Ok(())
}
