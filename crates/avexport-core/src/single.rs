// File: crates/avexport-core/src/single.rs
// Summary: Single-artifact export; parses `<artifact>.<kind>:<dest>` and runs only the owning engine.

use std::io::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::artifact::ContentType;
use crate::config::ExportContext;
use crate::engine::RendererEngine;
use crate::error::{ExportError, ExportResult, UsageError};
use crate::model::AnalysisResult;
use crate::registry::EngineRegistry;
use crate::tabular::TabularDialect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SingleArtifactKind {
    Tabular(TabularDialect),
    Graphic(ContentType),
}

impl SingleArtifactKind {
    fn from_extension(ext: &str) -> Option<Self> {
        if let Some(d) = TabularDialect::from_selector(ext) {
            return Some(SingleArtifactKind::Tabular(d));
        }
        match ext {
            "png" => Some(SingleArtifactKind::Graphic(ContentType::Png)),
            "jpg" | "jpeg" => Some(SingleArtifactKind::Graphic(ContentType::Jpeg)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleExportRequest {
    pub artifact: String,
    pub kind: SingleArtifactKind,
    pub destination: Destination,
}

impl FromStr for SingleExportRequest {
    type Err = UsageError;

    fn from_str(request: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| UsageError::MalformedSingleExport { request: request.to_string(), reason };
        let (name, dest) = request.split_once(':').ok_or_else(|| malformed("missing `:` before the destination"))?;
        if name.is_empty() {
            return Err(malformed("empty artifact name"));
        }
        if dest.is_empty() {
            return Err(malformed("empty destination"));
        }
        let (artifact, ext) = name.rsplit_once('.').ok_or_else(|| malformed("artifact name has no kind suffix"))?;
        if artifact.is_empty() {
            return Err(malformed("empty artifact name"));
        }
        let kind = SingleArtifactKind::from_extension(ext).ok_or_else(|| malformed("unknown kind suffix"))?;
        let destination = if dest == "-" { Destination::Stdout } else { Destination::File(PathBuf::from(dest)) };
        Ok(Self { artifact: artifact.to_string(), kind, destination })
    }
}

/// Fail with an unknown-artifact usage error unless some engine owns the
/// requested name for the requested kind. Needs no analysis result.
pub fn check_request(registry: &EngineRegistry, request: &SingleExportRequest) -> ExportResult<()> {
    let owner = match request.kind {
        SingleArtifactKind::Tabular(_) => registry.tabular_owner(&request.artifact)?,
        SingleArtifactKind::Graphic(_) => registry.graphic_owner(&request.artifact)?,
    };
    match owner {
        Some(_) => Ok(()),
        None => Err(UsageError::UnknownArtifact(request.artifact.clone()).into()),
    }
}

/// Produce the requested artifact's bytes by invoking only its owning engine.
pub fn resolve(
    registry: &EngineRegistry,
    request: &SingleExportRequest,
    result: &AnalysisResult,
    ctx: &ExportContext,
) -> ExportResult<Vec<u8>> {
    let unknown = || ExportError::from(UsageError::UnknownArtifact(request.artifact.clone()));
    let nothing = |engine: &dyn RendererEngine| ExportError::NothingToExport {
        engine: engine.name().into(),
        name: request.artifact.clone(),
    };
    match request.kind {
        SingleArtifactKind::Tabular(dialect) => {
            let engine = registry.tabular_owner(&request.artifact)?.ok_or_else(unknown)?;
            let exporter = engine.single_tabular().ok_or_else(unknown)?;
            match exporter.to_single_tabular(result, &request.artifact, dialect, ctx)? {
                Some(doc) if !doc.is_empty() => doc.to_bytes(),
                _ => Err(nothing(engine)),
            }
        }
        SingleArtifactKind::Graphic(content_type) => {
            let engine = registry.graphic_owner(&request.artifact)?.ok_or_else(unknown)?;
            let exporter = engine.single_graphic().ok_or_else(unknown)?;
            match exporter.to_single_graphic(result, &request.artifact, ctx)? {
                Some(g) if g.content_type == content_type => Ok(g.bytes),
                Some(_) => Err(unknown()),
                None => Err(nothing(engine)),
            }
        }
    }
}

pub fn write_destination(destination: &Destination, bytes: &[u8]) -> ExportResult<()> {
    match destination {
        Destination::Stdout => {
            let mut out = std::io::stdout().lock();
            out.write_all(bytes)?;
            out.flush()?;
        }
        Destination::File(path) => std::fs::write(path, bytes)?,
    }
    Ok(())
}

/// Resolve and write in one step.
pub fn run_single_export(
    registry: &EngineRegistry,
    request: &SingleExportRequest,
    result: &AnalysisResult,
    ctx: &ExportContext,
) -> ExportResult<()> {
    let bytes = resolve(registry, request, result, ctx)?;
    write_destination(&request.destination, &bytes)?;
    info!(artifact = %request.artifact, bytes = bytes.len(), "single export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_requests() {
        let r: SingleExportRequest = "video-block-detect.txt:-".parse().unwrap();
        assert_eq!(r.artifact, "video-block-detect");
        assert_eq!(r.kind, SingleArtifactKind::Tabular(TabularDialect::Txt));
        assert_eq!(r.destination, Destination::Stdout);

        let r: SingleExportRequest = "audio-loudness.png:C:/out/l.png".parse().unwrap();
        assert_eq!(r.kind, SingleArtifactKind::Graphic(ContentType::Png));
        assert_eq!(r.destination, Destination::File(PathBuf::from("C:/out/l.png")));
    }

    #[test]
    fn malformed_requests() {
        for bad in ["video-block-detect.txt", ":-", "x.txt:", "noext:-", ".txt:-", "x.pdf:-"] {
            let err = bad.parse::<SingleExportRequest>().unwrap_err();
            assert_eq!(err.exit_code(), 3, "{bad}");
        }
    }
}
