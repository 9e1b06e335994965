// File: crates/avexport-core/src/engines/snapshots.rs
// Summary: Snapshot JPEGs carried by the result, exported as images and shown in the report.

use std::rc::Rc;

use crate::artifact::{GraphicArtifact, ImageArtifact};
use crate::config::ExportContext;
use crate::engine::{GraphicRendererEngine, RendererEngine, ReportRendererEngine, SingleGraphicExporter};
use crate::error::ExportResult;
use crate::model::{AnalysisResult, SnapshotImage};
use crate::report::{ReportCategory, ReportEntry, ReportSection};

const PREFIX: &str = "snapshot-";

pub struct SnapshotEngine;

fn image(s: &SnapshotImage) -> ImageArtifact {
    ImageArtifact::jpeg(format!("{PREFIX}{}", s.name), s.width, s.height, s.jpeg.clone())
}

impl RendererEngine for SnapshotEngine {
    fn name(&self) -> &'static str {
        "snapshots"
    }
    fn graphic(&self) -> Option<&dyn GraphicRendererEngine> {
        Some(self)
    }
    fn single_graphic(&self) -> Option<&dyn SingleGraphicExporter> {
        Some(self)
    }
    fn report(&self) -> Option<&dyn ReportRendererEngine> {
        Some(self)
    }
}

impl GraphicRendererEngine for SnapshotEngine {
    fn to_graphics(&self, result: &AnalysisResult, _ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        Ok(result.snapshots.iter().filter(|s| !s.jpeg.is_empty()).map(image).collect())
    }
}

impl SingleGraphicExporter for SnapshotEngine {
    /// Names are `snapshot-<name>` per carried snapshot.
    fn graphic_names(&self) -> &'static [&'static str] {
        &["snapshot-<name>"]
    }

    fn owns_graphic(&self, name: &str) -> bool {
        name.strip_prefix(PREFIX).is_some_and(|rest| !rest.is_empty())
    }

    fn to_single_graphic(
        &self,
        result: &AnalysisResult,
        name: &str,
        _ctx: &ExportContext,
    ) -> ExportResult<Option<GraphicArtifact>> {
        let Some(wanted) = name.strip_prefix(PREFIX) else {
            return Ok(None);
        };
        Ok(result.snapshots.iter().find(|s| s.name == wanted && !s.jpeg.is_empty()).map(image))
    }
}

impl ReportRendererEngine for SnapshotEngine {
    fn to_report(
        &self,
        _result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        _ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        if graphics.is_empty() {
            return Ok(None);
        }
        let mut section = ReportSection::new(ReportCategory::Video, "Snapshots");
        for g in graphics {
            section.push(ReportEntry::Image(Rc::clone(g)));
        }
        Ok(Some(section))
    }
}
