//! `f2t` - offline tooling for the CTAP2 conformance suite.
//!
//! - `f2t corpus` - generate the deterministic negative-test corpus for the
//!   standard commands, for fuzzing seeds or transport-level replay.

#![forbid(unsafe_code)]

mod commands;
mod corpus;

use clap::{Parser, Subcommand};

/// CTAP2 conformance suite tooling.
#[derive(Parser)]
#[command(name = "f2t")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the mutation corpus without a device attached.
    ///
    /// Emits every negative case the conformance runner would send, in run
    /// order, as JSON (hex payloads) or a text listing of fault labels.
    Corpus(corpus::CorpusArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for corpus output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Corpus(args) => corpus::run(&args),
    }
}
