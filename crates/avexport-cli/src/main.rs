// File: crates/avexport-cli/src/main.rs
// Summary: `avexport` entry point; dispatches to full export, single-artifact export or the artifact listing.

mod cli;

use std::collections::BTreeSet;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use avexport_core::{
    check_request, run_single_export, AnalysisResult, DirectorySink, EngineRegistry, ExportConfig, ExportContext,
    ExportError, ExportFormat, Exporter, SingleExportRequest, UsageError,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stderr only: stdout may carry a single exported artifact
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_level().into()))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Usage errors keep their own code wherever they sit in the context chain.
fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err.chain().find_map(|cause| {
        cause
            .downcast_ref::<UsageError>()
            .map(UsageError::exit_code)
            .or_else(|| cause.downcast_ref::<ExportError>().map(ExportError::exit_code))
    });
    code.and_then(|c| u8::try_from(c).ok()).unwrap_or(1)
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            ExportConfig::load(path).with_context(|| format!("failed to load config '{}'", path.display()))?
        }
        None => ExportConfig::default(),
    };
    let ctx = ExportContext::new(config);
    let registry = EngineRegistry::with_default_engines()?;

    if cli.list_artifacts {
        for decl in registry.declarations() {
            println!("{:<32} {:<8} {}", decl.name, decl.kind.label(), decl.engine);
        }
        return Ok(());
    }

    match &cli.single_export {
        Some(request) => single_export(cli, request, &registry, &ctx),
        None => export_all(cli, &registry, &ctx),
    }
}

fn load(path: &Path) -> Result<AnalysisResult> {
    AnalysisResult::from_json_file(path).with_context(|| format!("failed to load analysis result '{}'", path.display()))
}

fn single_export(cli: &Cli, request: &str, registry: &EngineRegistry, ctx: &ExportContext) -> Result<()> {
    let request: SingleExportRequest = request.parse()?;
    let [input] = cli.input.as_slice() else {
        return Err(UsageError::MultipleInputs(cli.input.len()).into());
    };
    check_request(registry, &request)?;
    if !cli.format.is_empty() {
        warn!("--format is ignored with --single-export; the request suffix picks the kind");
    }
    let result = load(input)?;
    run_single_export(registry, &request, &result, ctx)?;
    Ok(())
}

fn export_all(cli: &Cli, registry: &EngineRegistry, ctx: &ExportContext) -> Result<()> {
    let mut formats: BTreeSet<ExportFormat> = cli.format.iter().copied().collect();
    if formats.is_empty() {
        formats.insert(ExportFormat::Html);
    }
    avexport_core::export::validate_formats(&formats)?;

    let mut sink = DirectorySink::new(&cli.output_dir)
        .with_context(|| format!("failed to create output directory '{}'", cli.output_dir.display()))?;
    let exporter = Exporter::new(registry, ctx);
    for input in &cli.input {
        let result = load(input)?;
        let summary = exporter
            .export(&result, &formats, &mut sink)
            .with_context(|| format!("export of '{}' failed", input.display()))?;
        info!(input = %input.display(), files = summary.files.len(), dir = %cli.output_dir.display(), "exported");
    }
    Ok(())
}
