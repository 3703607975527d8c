use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use swagger_model_assemble::{Assembler, DefinitionBundle, format_for, load_document, write_document};
use swagger_model_core::{Document, Format, MergeStrategy, encode_as, legacy};
use tracing_subscriber::EnvFilter;

/// Output format for `inspect`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum InspectFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "swagger-model")]
#[command(about = "Decode, normalize and assemble Swagger 2.0 documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode one or more documents and report failures.
    Check(CheckArgs),
    /// Decode a document and re-encode it in canonical form.
    Normalize(NormalizeArgs),
    /// Merge definition files or directories into a document.
    Merge(MergeArgs),
    /// Run an assembly described by a YAML config file.
    Assemble(AssembleArgs),
    /// List the operations and definitions of a document.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Document files (.json, .yaml or .yml).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Document to normalize.
    input: PathBuf,
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format (default: inferred from --output, else json).
    #[arg(long)]
    format: Option<Format>,
    /// Indent JSON output.
    #[arg(long)]
    pretty: bool,
    /// Read the input as a minimal-profile document and upgrade it.
    #[arg(long)]
    legacy: bool,
}

#[derive(Debug, Args)]
struct MergeArgs {
    /// Base document.
    base: PathBuf,
    /// Definition files or directories, merged in order.
    #[arg(long = "definitions", required = true, num_args = 1..)]
    definitions: Vec<PathBuf>,
    /// Conflict resolution for names present on both sides.
    #[arg(long, default_value = "union")]
    strategy: MergeStrategy,
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format (default: inferred from --output, else json).
    #[arg(long)]
    format: Option<Format>,
}

#[derive(Debug, Args)]
struct AssembleArgs {
    /// Path to the assembly config (YAML).
    #[arg(long)]
    config: PathBuf,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Document to inspect.
    input: PathBuf,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: InspectFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Normalize(args) => run_normalize(args),
        Command::Merge(args) => run_merge(args),
        Command::Assemble(args) => run_assemble(args),
        Command::Inspect(args) => run_inspect(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    for input in &args.inputs {
        read_document(input, false)?;
    }
    println!("Decoded {} document(s).", args.inputs.len());
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<(), String> {
    let doc = read_document(&args.input, args.legacy)?;
    emit_document(&doc, args.output.as_deref(), args.format, args.pretty)
}

fn run_merge(args: MergeArgs) -> Result<(), String> {
    let mut doc = read_document(&args.base, false)?;

    let mut merged = 0;
    for source in &args.definitions {
        let bundle = DefinitionBundle::load(source)
            .map_err(|err| format!("Failed to load definitions '{}': {err}", source.display()))?;
        merged += doc.merge_definitions(&bundle, args.strategy).len();
    }
    tracing::info!(merged, strategy = ?args.strategy, "merged definitions");

    emit_document(&doc, args.output.as_deref(), args.format, true)?;
    if let Some(output) = &args.output {
        println!(
            "Merged {merged} definition(s) into {} ({} total).",
            output.display(),
            doc.definitions.len()
        );
    }
    Ok(())
}

fn run_assemble(args: AssembleArgs) -> Result<(), String> {
    let report = Assembler::from_config_file(&args.config)
        .and_then(|assembler| assembler.run())
        .map_err(|err| format!("Assembly from '{}' failed: {err}", args.config.display()))?;

    println!(
        "Wrote {} ({} definition(s), {} merged).",
        report.output.display(),
        report.definitions_total,
        report.merged.len()
    );
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), String> {
    let doc = read_document(&args.input, false)?;
    let summary = DocumentSummary::from(&doc);

    let rendered = match args.format {
        InspectFormat::Table => summary_to_table(&summary),
        InspectFormat::Json => serde_json::to_string_pretty(&summary)
            .map_err(|err| format!("Failed to serialize summary: {err}"))?,
        InspectFormat::Yaml => serde_yaml::to_string(&summary)
            .map_err(|err| format!("Failed to serialize summary: {err}"))?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Loads a document, optionally through the minimal legacy profile.
fn read_document(path: &Path, legacy: bool) -> Result<Document, String> {
    let loaded = if legacy {
        format_for(path).and_then(|format| {
            let bytes = std::fs::read(path)?;
            let doc: Document = legacy::decode_with(&bytes, format)?.into();
            Ok(doc)
        })
    } else {
        load_document(path)
    };
    loaded.map_err(|err| format!("Failed to decode '{}': {err}", path.display()))
}

/// Writes `doc` to `output`, or to stdout when no output path is given.
fn emit_document(
    doc: &Document,
    output: Option<&Path>,
    format: Option<Format>,
    pretty: bool,
) -> Result<(), String> {
    let format = format
        .or_else(|| output.and_then(Format::from_path))
        .unwrap_or_default();

    match output {
        Some(path) => write_document(path, doc, format, pretty)
            .map_err(|err| format!("Failed to write '{}': {err}", path.display())),
        None => {
            let mut bytes =
                encode_as(doc, format, pretty).map_err(|err| format!("Failed to encode: {err}"))?;
            if !bytes.ends_with(b"\n") {
                bytes.push(b'\n');
            }
            std::io::stdout()
                .write_all(&bytes)
                .map_err(|err| format!("Failed to write to stdout: {err}"))
        }
    }
}

#[derive(Debug, Serialize)]
struct DocumentSummary {
    title: String,
    version: String,
    operations: Vec<OperationSummary>,
    definitions: Vec<DefinitionSummary>,
}

#[derive(Debug, Serialize)]
struct OperationSummary {
    method: String,
    path: String,
    summary: String,
    responses: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DefinitionSummary {
    name: String,
    #[serde(rename = "type")]
    definition_type: String,
    properties: usize,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        let operations = doc
            .operations()
            .map(|(path, verb, request)| OperationSummary {
                method: verb.to_string(),
                path: path.to_string(),
                summary: request.summary.clone(),
                responses: request.responses.keys().cloned().collect(),
            })
            .collect();
        let definitions = doc
            .definitions
            .iter()
            .map(|(name, def)| DefinitionSummary {
                name: name.clone(),
                definition_type: def.definition_type.clone(),
                properties: def.properties.len(),
            })
            .collect();

        Self {
            title: doc.info.title.clone(),
            version: doc.info.version.clone(),
            operations,
            definitions,
        }
    }
}

fn summary_to_table(summary: &DocumentSummary) -> String {
    let mut out = format!("{} {}\n", summary.title, summary.version);

    out.push_str("\nOPERATIONS\n");
    if summary.operations.is_empty() {
        out.push_str("  (none)\n");
    } else {
        let method_width = column_width(summary.operations.iter().map(|op| op.method.len()), 6);
        let path_width = column_width(summary.operations.iter().map(|op| op.path.len()), 4);
        out.push_str(&format!(
            "  {:<method_width$}  {:<path_width$}  RESPONSES  SUMMARY\n",
            "METHOD", "PATH"
        ));
        for op in &summary.operations {
            out.push_str(&format!(
                "  {:<method_width$}  {:<path_width$}  {:<9}  {}\n",
                op.method.to_uppercase(),
                op.path,
                op.responses.join(","),
                op.summary
            ));
        }
    }

    out.push_str("\nDEFINITIONS\n");
    if summary.definitions.is_empty() {
        out.push_str("  (none)\n");
    }
    for def in &summary.definitions {
        let kind = if def.definition_type.is_empty() {
            "-"
        } else {
            def.definition_type.as_str()
        };
        out.push_str(&format!(
            "  {} ({kind}, {} properties)\n",
            def.name, def.properties
        ));
    }

    out
}

fn column_width(lengths: impl Iterator<Item = usize>, header: usize) -> usize {
    lengths.max().unwrap_or(0).max(header)
}
