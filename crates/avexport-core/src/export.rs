// File: crates/avexport-core/src/export.rs
// Summary: Export orchestrator; one pass over the engines per export, writing every requested format to a sink.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use tracing::{debug, info};

use crate::artifact::GraphicArtifact;
use crate::config::ExportContext;
use crate::error::{ExportResult, UsageError};
use crate::model::AnalysisResult;
use crate::registry::EngineRegistry;
use crate::report::{render_html, ReportDocument};
use crate::tables::{TableDocument, TableFormat};
use crate::tabular::TabularDialect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExportFormat {
    Tabular(TabularDialect),
    Table(TableFormat),
    /// Narrative report, HTML page plus its JSON rendition.
    Html,
    /// One PNG per chart, one JPEG per snapshot.
    Graphic,
}

impl ExportFormat {
    pub const SELECTORS: [&'static str; 9] =
        ["txt", "csv", "csvfr", "xlsx", "sqlite", "xml", "json", "html", "graphic"];

    pub fn selector(self) -> &'static str {
        match self {
            ExportFormat::Tabular(d) => d.selector(),
            ExportFormat::Table(t) => t.extension(),
            ExportFormat::Html => "html",
            ExportFormat::Graphic => "graphic",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if let Some(d) = TabularDialect::from_selector(&lower) {
            return Ok(ExportFormat::Tabular(d));
        }
        Ok(match lower.as_str() {
            "xlsx" => ExportFormat::Table(TableFormat::Xlsx),
            "sqlite" => ExportFormat::Table(TableFormat::Sqlite),
            "xml" => ExportFormat::Table(TableFormat::Xml),
            "json" => ExportFormat::Table(TableFormat::Json),
            "html" => ExportFormat::Html,
            "graphic" => ExportFormat::Graphic,
            _ => return Err(format!("unknown format `{s}`; expected one of {}", Self::SELECTORS.join(", "))),
        })
    }
}

/// CSV and CSV-FR write the same file names, so they exclude each other.
pub fn validate_formats(formats: &BTreeSet<ExportFormat>) -> Result<(), UsageError> {
    let csv = ExportFormat::Tabular(TabularDialect::Csv);
    let csv_fr = ExportFormat::Tabular(TabularDialect::CsvFr);
    if formats.contains(&csv) && formats.contains(&csv_fr) {
        return Err(UsageError::IncompatibleFormats(csv.to_string(), csv_fr.to_string()));
    }
    Ok(())
}

/// Destination of written artifacts.
pub trait ArtifactSink {
    fn write(&mut self, file_name: &str, bytes: &[u8]) -> ExportResult<()>;
}

/// Writes each artifact as a file under one directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> ExportResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, file_name: &str, bytes: &[u8]) -> ExportResult<()> {
        std::fs::write(self.dir.join(file_name), bytes)?;
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files.get(file_name).map(Vec::as_slice)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, file_name: &str, bytes: &[u8]) -> ExportResult<()> {
        self.files.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: Vec<String>,
}

impl ExportSummary {
    fn emit(&mut self, sink: &mut dyn ArtifactSink, name: String, bytes: &[u8]) -> ExportResult<()> {
        sink.write(&name, bytes)?;
        debug!(file = %name, bytes = bytes.len(), "artifact written");
        self.files.push(name);
        Ok(())
    }
}

/// Base name for every file of `result`: configured override or source stem.
pub fn base_file_name(result: &AnalysisResult, ctx: &ExportContext) -> String {
    ctx.config.base_file_name.clone().unwrap_or_else(|| result.base_name())
}

pub struct Exporter<'a> {
    registry: &'a EngineRegistry,
    ctx: &'a ExportContext,
}

impl<'a> Exporter<'a> {
    pub fn new(registry: &'a EngineRegistry, ctx: &'a ExportContext) -> Self {
        Self { registry, ctx }
    }

    pub fn export(
        &self,
        result: &AnalysisResult,
        formats: &BTreeSet<ExportFormat>,
        sink: &mut dyn ArtifactSink,
    ) -> ExportResult<ExportSummary> {
        validate_formats(formats)?;
        let ctx = self.ctx;
        let base = base_file_name(result, ctx);
        let dialects: Vec<TabularDialect> = formats
            .iter()
            .filter_map(|f| if let ExportFormat::Tabular(d) = f { Some(*d) } else { None })
            .collect();
        let table_formats: Vec<TableFormat> = formats
            .iter()
            .filter_map(|f| if let ExportFormat::Table(t) = f { Some(*t) } else { None })
            .collect();
        let want_graphics = formats.contains(&ExportFormat::Graphic);
        let want_report = formats.contains(&ExportFormat::Html);

        let mut summary = ExportSummary::default();

        let mut tables = TableDocument::new();
        let mut report = ReportDocument::new(result.source_name.clone());

        for engine in self.registry.engines() {
            if let Some(tabular) = engine.tabular() {
                for &dialect in &dialects {
                    for doc in tabular.to_tabular(result, dialect, ctx)? {
                        if !doc.is_empty() {
                            summary.emit(sink, doc.file_name(&base), &doc.to_bytes()?)?;
                        }
                    }
                }
            }

            if !table_formats.is_empty() {
                if let Some(table) = engine.table() {
                    table.add_tables(result, &mut tables, ctx)?;
                }
            }

            // Rendered once, shared by the graphic files and the report.
            let graphics: Vec<Rc<GraphicArtifact>> = match engine.graphic() {
                Some(g) if want_graphics || want_report => {
                    g.to_graphics(result, ctx)?.into_iter().map(Rc::new).collect()
                }
                _ => Vec::new(),
            };
            if want_graphics {
                for g in &graphics {
                    summary.emit(sink, g.file_name(&base), &g.bytes)?;
                }
            }

            if want_report {
                if let Some(r) = engine.report() {
                    if let Some(section) = r.to_report(result, &graphics, ctx)? {
                        report.push(section);
                    }
                }
            }
        }

        if !tables.is_empty() {
            for format in &table_formats {
                summary.emit(sink, format!("{base}.{}", format.extension()), &format.write(&tables)?)?;
            }
        }

        if want_report && !report.is_empty() {
            let html = render_html(&report, ctx.locale())?;
            summary.emit(sink, format!("{base}_report.html"), html.as_bytes())?;
            let json = serde_json::to_vec_pretty(&report.to_json())?;
            summary.emit(sink, format!("{base}_report.json"), &json)?;
        }

        info!(source = %result.source_name, files = summary.files.len(), "export finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selectors() {
        assert_eq!("csvfr".parse::<ExportFormat>(), Ok(ExportFormat::Tabular(TabularDialect::CsvFr)));
        assert_eq!("SQLITE".parse::<ExportFormat>(), Ok(ExportFormat::Table(TableFormat::Sqlite)));
        assert!("pdf".parse::<ExportFormat>().is_err());
        for s in ExportFormat::SELECTORS {
            assert_eq!(s.parse::<ExportFormat>().unwrap().selector(), s);
        }
    }

    #[test]
    fn csv_and_csv_fr_conflict() {
        let formats: BTreeSet<ExportFormat> = ["csv", "csvfr"].iter().map(|s| s.parse().unwrap()).collect();
        assert!(matches!(validate_formats(&formats), Err(UsageError::IncompatibleFormats(..))));
    }
}
