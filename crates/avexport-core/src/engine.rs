// File: crates/avexport-core/src/engine.rs
// Summary: Renderer engine capabilities; an engine exposes the ones it implements through optional accessors.

use std::rc::Rc;

use avexport_chart::{RangeAxis, TimedDataGraphic};

use crate::artifact::GraphicArtifact;
use crate::config::ExportContext;
use crate::error::ExportResult;
use crate::model::AnalysisResult;
use crate::report::ReportSection;
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

/// One independent renderer. Capabilities default to absent; an engine
/// returns `Some(self)` for each one it implements.
pub trait RendererEngine {
    fn name(&self) -> &'static str;

    fn tabular(&self) -> Option<&dyn TabularRendererEngine> {
        None
    }
    fn single_tabular(&self) -> Option<&dyn SingleTabularDocumentExporter> {
        None
    }
    fn table(&self) -> Option<&dyn TableRendererEngine> {
        None
    }
    fn graphic(&self) -> Option<&dyn GraphicRendererEngine> {
        None
    }
    fn single_graphic(&self) -> Option<&dyn SingleGraphicExporter> {
        None
    }
    fn report(&self) -> Option<&dyn ReportRendererEngine> {
        None
    }
}

pub trait TabularRendererEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>>;
}

pub trait SingleTabularDocumentExporter {
    /// Logical names of the documents this engine owns.
    fn tabular_names(&self) -> &'static [&'static str];

    fn to_single_tabular(
        &self,
        result: &AnalysisResult,
        name: &str,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Option<TabularDocument>>;

    fn owns_tabular(&self, name: &str) -> bool {
        self.tabular_names().contains(&name)
    }
}

pub trait TableRendererEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, ctx: &ExportContext) -> ExportResult<()>;
}

pub trait GraphicRendererEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>>;
}

pub trait SingleGraphicExporter {
    /// Declared graphic names; used for ownership checks and listings.
    fn graphic_names(&self) -> &'static [&'static str];

    fn to_single_graphic(
        &self,
        result: &AnalysisResult,
        name: &str,
        ctx: &ExportContext,
    ) -> ExportResult<Option<GraphicArtifact>>;

    fn owns_graphic(&self, name: &str) -> bool {
        self.graphic_names().contains(&name)
    }
}

pub trait ReportRendererEngine {
    /// `graphics` are what this engine rendered earlier in the same export.
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>>;
}

/// Full tabular output assembled from the single-document path, so both agree byte for byte.
pub fn tabular_from_singles(
    exporter: &dyn SingleTabularDocumentExporter,
    result: &AnalysisResult,
    dialect: TabularDialect,
    ctx: &ExportContext,
) -> ExportResult<Vec<TabularDocument>> {
    let mut docs = Vec::new();
    for name in exporter.tabular_names() {
        if let Some(doc) = exporter.to_single_tabular(result, name, dialect, ctx)? {
            docs.push(doc);
        }
    }
    Ok(docs)
}

/// One named chart built from a prepared intermediate `T`.
pub struct GraphicMaker<T> {
    pub name: &'static str,
    pub make: fn(&T, &ExportContext) -> ExportResult<Option<TimedDataGraphic>>,
}

/// Engines whose charts share one intermediate (time axis, extracted series).
pub trait PreparedGraphics {
    type Prepared: 'static;

    /// Computed once per export; `None` when the input section is absent.
    fn prepare(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Option<Self::Prepared>>;

    fn makers(&self) -> &'static [GraphicMaker<Self::Prepared>];
}

/// Prepare once, then render every maker.
pub fn render_prepared<P>(
    source: &P,
    result: &AnalysisResult,
    ctx: &ExportContext,
) -> ExportResult<Vec<GraphicArtifact>>
where
    P: PreparedGraphics + ?Sized,
{
    let Some(prepared) = source.prepare(result, ctx)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    for maker in source.makers() {
        if let Some(graphic) = (maker.make)(&prepared, ctx)? {
            out.push(render_graphic(maker.name, &graphic, ctx)?);
        }
    }
    Ok(out)
}

/// Prepare once, then render only the maker called `name`.
pub fn render_prepared_one<P>(
    source: &P,
    result: &AnalysisResult,
    name: &str,
    ctx: &ExportContext,
) -> ExportResult<Option<GraphicArtifact>>
where
    P: PreparedGraphics + ?Sized,
{
    let Some(maker) = source.makers().iter().find(|m| m.name == name) else {
        return Ok(None);
    };
    let Some(prepared) = source.prepare(result, ctx)? else {
        return Ok(None);
    };
    match (maker.make)(&prepared, ctx)? {
        Some(graphic) => Ok(Some(render_graphic(maker.name, &graphic, ctx)?)),
        None => Ok(None),
    }
}

pub fn render_graphic(name: &str, graphic: &TimedDataGraphic, ctx: &ExportContext) -> ExportResult<GraphicArtifact> {
    let bytes = graphic.render_png(&ctx.render)?;
    tracing::debug!(graphic = name, bytes = bytes.len(), "rendered");
    Ok(GraphicArtifact::png(name, ctx.render.width as u32, ctx.render.height as u32, bytes))
}

/// Automatic axis over `values`, or `None` when nothing finite was measured.
pub fn automatic_axis(label: &str, values: &[f64], min_pad: f64) -> ExportResult<Option<RangeAxis>> {
    if !values.iter().any(|v| v.is_finite()) {
        return Ok(None);
    }
    Ok(Some(RangeAxis::automatic(label, values.iter().copied(), min_pad)?))
}

/// The graphic called `name` among those an engine produced in this export.
pub fn find_graphic<'a>(graphics: &'a [Rc<GraphicArtifact>], name: &str) -> Option<&'a Rc<GraphicArtifact>> {
    graphics.iter().find(|g| g.name == name)
}
