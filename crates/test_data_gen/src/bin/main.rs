//! CLI for generating catalog snapshot fixtures.
//!
//! Usage:
//!   gen-fixtures --scale small --seed 42 > fixtures/small.json
//!   gen-fixtures --scale large -o large.json

use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use test_data_gen::{Generator, Scale};

#[derive(Parser, Debug)]
#[command(name = "gen-fixtures")]
#[command(about = "Generate catalog snapshot fixtures for schema-puml", long_about = None)]
struct Args {
    /// Scale preset: small, medium, large
    #[arg(short, long, default_value = "small")]
    scale: String,

    /// Random seed for reproducibility
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let scale: Scale = args.scale.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let snapshot = Generator::new(args.seed, scale).generate();
    let text = if args.compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };

    if let Some(ref path) = args.output {
        let mut file = File::create(path)?;
        file.write_all(text.as_bytes())?;
        eprintln!("Generated {} tables to {}", scale.tables(), path);
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
        handle.write_all(b"\n")?;
    }

    Ok(())
}
