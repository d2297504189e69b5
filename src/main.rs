use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use banking::{menu::Session, Registry};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Cli {
    /// Command script to run; reads stdin interactively when absent
    script: Option<PathBuf>,
    /// Write all account summaries as CSV to this file on exit
    #[clap(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut registry = Registry::new();

    match cli.script {
        Some(path) => {
            let input = BufReader::new(File::open(path)?);
            run(&mut registry, input)?;
        }
        None => {
            let stdin = io::stdin();
            run(&mut registry, stdin.lock())?;
        }
    }

    if let Some(path) = cli.export {
        registry.export(File::create(path)?)?;
    }
    Ok(())
}

fn run(registry: &mut Registry, input: impl BufRead) -> io::Result<()> {
    Session::new(registry, input, io::stdout().lock()).run()
}
