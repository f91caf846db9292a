use crate::cli::Cli;
use crate::config::ConvertConfig;
use anyhow::Context;
use clap::Parser;
use md_notion_lib::markdown_to_blocks;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage errors exit with 1 like every other failure; help and version exit 0.
        Err(err) if err.use_stderr() => {
            err.print()?;
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    if !cli.ignored.is_empty() {
        log::debug!("Ignoring {} argument(s) after the first", cli.ignored.len());
    }

    let config = ConvertConfig::from_env();
    log::debug!("Resolved converter config: {config:?}");

    let markdown = read_input(cli.input_path())?;
    let options = config.into_options();

    let blocks = markdown_to_blocks(&markdown, &options)
        .context("Failed to convert Markdown into Notion blocks")?;

    // Serialize fully before writing so a failure never leaves partial JSON on stdout.
    let json = serde_json::to_string(&blocks).context("Failed to serialize blocks as JSON")?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(json.as_bytes())
        .context("Failed to write JSON to stdout")?;
    stdout.flush()?;

    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    if let Some(file_path) = path {
        log::debug!("Reading Markdown from {}", file_path.display());
        fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read input file: {}", file_path.display()))
    } else {
        log::debug!("Reading Markdown from stdin");
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read Markdown from stdin")?;
        Ok(buf)
    }
}
