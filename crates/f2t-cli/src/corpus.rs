//! Offline mutation-corpus generation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use ciborium::value::Value;
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorpusCommand {
    MakeCredential,
    GetAssertion,
    ClientPin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Arguments for `f2t corpus`.
#[derive(Debug, Args)]
pub struct CorpusArgs {
    /// Restrict the corpus to one command (default: all).
    #[arg(long, value_enum)]
    pub command: Option<CorpusCommand>,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CorpusCase {
    description: String,
    payload_hex: String,
}

#[derive(Debug, Serialize)]
struct CommandCorpus {
    command: String,
    command_byte: u8,
    cases: Vec<CorpusCase>,
}

#[derive(Debug, Serialize)]
struct CorpusDocument {
    generated: String,
    commands: Vec<CommandCorpus>,
}

fn encode_hex(payload: &Value) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(payload, &mut bytes).context("encoding mutated payload")?;
    Ok(hex::encode(bytes))
}

fn build_document(filter: Option<CorpusCommand>) -> anyhow::Result<CorpusDocument> {
    let selected = match filter {
        Some(CorpusCommand::MakeCredential) => vec![commands::make_credential()],
        Some(CorpusCommand::GetAssertion) => vec![commands::get_assertion()],
        Some(CorpusCommand::ClientPin) => vec![commands::client_pin()],
        None => commands::all(),
    };

    let mut document = CorpusDocument {
        generated: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        commands: Vec::new(),
    };
    for cut in selected {
        let cases = f2t_runner::generate_cases(&cut)
            .with_context(|| format!("generating cases for {}", cut.command))?;
        tracing::info!(command = %cut.command, cases = cases.len(), "corpus generated");
        document.commands.push(CommandCorpus {
            command: cut.command.name().to_owned(),
            command_byte: cut.command.into(),
            cases: cases
                .iter()
                .map(|case| {
                    Ok(CorpusCase {
                        description: case.description.clone(),
                        payload_hex: encode_hex(&case.payload)?,
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?,
        });
    }
    Ok(document)
}

fn render(document: &CorpusDocument, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).context("serializing corpus")
        }
        OutputFormat::Text => {
            let mut text = String::new();
            for command in &document.commands {
                for case in &command.cases {
                    text.push_str(&format!("{}: {}\n", command.command, case.description));
                }
            }
            Ok(text)
        }
    }
}

pub fn run(args: &CorpusArgs) -> anyhow::Result<()> {
    let document = build_document(args.command)?;
    let rendered = render(&document, args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing corpus to {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes()).context("writing corpus")?;
        }
    }
    Ok(())
}
