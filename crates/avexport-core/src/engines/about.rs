// File: crates/avexport-core/src/engines/about.rs
// Summary: Tool versions and command lines that produced the analysis.

use std::rc::Rc;

use super::table;
use crate::artifact::GraphicArtifact;
use crate::config::ExportContext;
use crate::engine::{RendererEngine, ReportRendererEngine, TableRendererEngine};
use crate::error::ExportResult;
use crate::model::AnalysisResult;
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;

pub struct AboutEngine;

impl RendererEngine for AboutEngine {
    fn name(&self) -> &'static str {
        "about"
    }
    fn table(&self) -> Option<&dyn TableRendererEngine> {
        Some(self)
    }
    fn report(&self) -> Option<&dyn ReportRendererEngine> {
        Some(self)
    }
}

impl TableRendererEngine for AboutEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        let versions = result.versions.iter().map(|(tool, v)| crate::cells![tool.as_str(), v.as_str()]).collect();
        doc.push(table("Versions", &["Tool", "Version"], versions)?);
        let lines = result.command_lines.iter().map(|c| crate::cells![c.tool.as_str(), c.line.as_str()]).collect();
        doc.push(table("Command lines", &["Tool", "Command line"], lines)?);
        Ok(())
    }
}

impl ReportRendererEngine for AboutEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        _graphics: &[Rc<GraphicArtifact>],
        _ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let mut section = ReportSection::new(ReportCategory::About, "About");
        section.push(ReportEntry::key_value("Exported by", concat!("avexport ", env!("CARGO_PKG_VERSION"))));
        for (tool, version) in &result.versions {
            section.push(ReportEntry::key_value(format!("{tool} version"), version.clone()));
        }
        section.push(ReportEntry::KeyValueList {
            key: "Command lines".into(),
            values: result.command_lines.iter().map(|c| c.line.clone()).collect(),
        });
        Ok(Some(section))
    }
}
