// File: crates/avexport-core/tests/single_export.rs
// Purpose: Single-artifact resolution: laziness, parity with the full export, and error codes.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use avexport_core::engine::{
    GraphicRendererEngine, RendererEngine, ReportRendererEngine, SingleGraphicExporter, SingleTabularDocumentExporter,
    TableRendererEngine, TabularRendererEngine,
};
use avexport_core::{
    cells, resolve, run_single_export, AnalysisResult, ArtifactKind, EngineRegistry, ExportContext, ExportError,
    Exporter, GraphicArtifact, MemorySink, ReportSection, SingleExportRequest, TableDocument, TabularDialect,
    TabularDocument,
};

/// Records every capability call made on it.
struct Spy {
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl Spy {
    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

impl RendererEngine for Spy {
    fn name(&self) -> &'static str {
        "spy"
    }
    fn tabular(&self) -> Option<&dyn TabularRendererEngine> {
        Some(self)
    }
    fn single_tabular(&self) -> Option<&dyn SingleTabularDocumentExporter> {
        Some(self)
    }
    fn table(&self) -> Option<&dyn TableRendererEngine> {
        Some(self)
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

impl TabularRendererEngine for Spy {
    fn to_tabular(
        &self,
        _: &AnalysisResult,
        _: TabularDialect,
        _: &ExportContext,
    ) -> avexport_core::ExportResult<Vec<TabularDocument>> {
        self.record("to_tabular");
        Ok(Vec::new())
    }
}

impl SingleTabularDocumentExporter for Spy {
    fn tabular_names(&self) -> &'static [&'static str] {
        &["video-block-detect"]
    }
    fn to_single_tabular(
        &self,
        _: &AnalysisResult,
        name: &str,
        dialect: TabularDialect,
        _: &ExportContext,
    ) -> avexport_core::ExportResult<Option<TabularDocument>> {
        self.record("to_single_tabular");
        let mut doc = TabularDocument::new(name, dialect, &["Frame", "Value"]);
        doc.add_row(cells![1u64, 2.5])?;
        Ok(Some(doc))
    }
}

impl TableRendererEngine for Spy {
    fn add_tables(
        &self,
        _: &AnalysisResult,
        _: &mut TableDocument,
        _: &ExportContext,
    ) -> avexport_core::ExportResult<()> {
        self.record("add_tables");
        Ok(())
    }
}

impl GraphicRendererEngine for Spy {
    fn to_graphics(&self, _: &AnalysisResult, _: &ExportContext) -> avexport_core::ExportResult<Vec<GraphicArtifact>> {
        self.record("to_graphics");
        Ok(Vec::new())
    }
}

impl SingleGraphicExporter for Spy {
    fn graphic_names(&self) -> &'static [&'static str] {
        &["video-block-detect"]
    }
    fn to_single_graphic(
        &self,
        _: &AnalysisResult,
        _: &str,
        _: &ExportContext,
    ) -> avexport_core::ExportResult<Option<GraphicArtifact>> {
        self.record("to_single_graphic");
        Ok(None)
    }
}

impl ReportRendererEngine for Spy {
    fn to_report(
        &self,
        _: &AnalysisResult,
        _: &[Rc<GraphicArtifact>],
        _: &ExportContext,
    ) -> avexport_core::ExportResult<Option<ReportSection>> {
        self.record("to_report");
        Ok(None)
    }
}

#[test]
fn single_export_invokes_only_the_owning_single_tabular_path() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let registry = EngineRegistry::new(vec![Box::new(Spy { calls: Rc::clone(&calls) })]).unwrap();
    let request: SingleExportRequest = "video-block-detect.txt:-".parse().unwrap();

    let bytes = resolve(&registry, &request, &AnalysisResult::new("clip.mov"), &ExportContext::default()).unwrap();

    assert_eq!(String::from_utf8(bytes).unwrap(), "Frame\tValue\n1\t2.5\n");
    assert_eq!(*calls.borrow(), vec!["to_single_tabular"]);
}

#[test]
fn single_export_writes_to_a_file_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocks.csv");
    let request: SingleExportRequest = format!("video-block-detect.csvfr:{}", path.display()).parse().unwrap();
    let registry = EngineRegistry::with_default_engines().unwrap();

    run_single_export(&registry, &request, &common::sample(), &common::context()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().next(), Some("Frame;Time (s);Blockiness"));
    assert!(text.contains("1;0,04;3,25"), "{text}");
}

#[test]
fn every_owned_artifact_matches_the_full_export() {
    let registry = EngineRegistry::with_default_engines().unwrap();
    let result = common::sample();
    let ctx = common::context();
    let mut sink = MemorySink::new();
    Exporter::new(&registry, &ctx).export(&result, &common::formats(&["csvfr", "graphic"]), &mut sink).unwrap();

    let base = result.base_name();
    let mut compared = 0;
    for decl in registry.declarations().into_iter().filter(|d| !d.name.contains('<')) {
        let (ext, file) = match decl.kind {
            ArtifactKind::Tabular => ("csvfr", format!("{base}_{}.csv", decl.name)),
            ArtifactKind::Graphic => ("png", format!("{base}_{}.png", decl.name)),
        };
        let request: SingleExportRequest = format!("{}.{ext}:-", decl.name).parse().unwrap();
        match resolve(&registry, &request, &result, &ctx) {
            Ok(bytes) => {
                assert_eq!(sink.get(&file), Some(bytes.as_slice()), "{file}");
                compared += 1;
            }
            Err(ExportError::NothingToExport { .. }) => assert!(sink.get(&file).is_none(), "{file}"),
            Err(e) => panic!("{}: {e}", decl.name),
        }
    }
    assert!(compared >= 20, "only {compared} artifacts compared");

    let snapshot: SingleExportRequest = "snapshot-00m01s.jpg:-".parse().unwrap();
    let bytes = resolve(&registry, &snapshot, &result, &ctx).unwrap();
    assert_eq!(bytes, [0xFF, 0xD8, 0xFF, 0xD9]);
    assert_eq!(sink.get(&format!("{base}_snapshot-00m01s.jpg")), Some(bytes.as_slice()));
}

#[test]
fn unknown_and_mismatched_artifacts_are_usage_errors() {
    let registry = EngineRegistry::with_default_engines().unwrap();
    let result = common::sample();
    let ctx = common::context();
    let requests = [
        "no-such-artifact.txt:-",
        "about.csv:-",
        "media-summary.png:-",
        "audio-loudness.jpg:-",
        "snapshot-00m01s.png:-",
    ];
    for request in requests {
        let request: SingleExportRequest = request.parse().unwrap();
        let err = resolve(&registry, &request, &result, &ctx).unwrap_err();
        assert_eq!(err.exit_code(), 5, "{err}");
    }
}

#[test]
fn owned_artifact_without_data_reports_nothing_to_export() {
    let registry = EngineRegistry::with_default_engines().unwrap();
    let request: SingleExportRequest = "video-block-detect.txt:-".parse().unwrap();
    let err = resolve(&registry, &request, &AnalysisResult::new("empty.mov"), &ExportContext::default()).unwrap_err();
    assert!(matches!(err, ExportError::NothingToExport { ref name, .. } if name == "video-block-detect"));
    assert_eq!(err.exit_code(), 1);
}
