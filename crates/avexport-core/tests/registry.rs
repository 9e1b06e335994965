// File: crates/avexport-core/tests/registry.rs
// Purpose: Catalogue ownership rules: unique artifact names and owner lookups.

use avexport_core::engines::{RangeEventEngine, ScoreEngine, SnapshotEngine};
use avexport_core::{
    AnalysisResult, ArtifactKind, EngineRegistry, ExportContext, ExportError, ExportResult, GraphicArtifact,
    RendererEngine, SingleGraphicExporter,
};

/// Graphic-only engine owning a fixed name list, or every name under `prefix`.
struct NamedGraphics {
    names: &'static [&'static str],
    prefix: Option<&'static str>,
}

impl RendererEngine for NamedGraphics {
    fn name(&self) -> &'static str {
        "named-graphics"
    }
    fn single_graphic(&self) -> Option<&dyn SingleGraphicExporter> {
        Some(self)
    }
}

impl SingleGraphicExporter for NamedGraphics {
    fn graphic_names(&self) -> &'static [&'static str] {
        self.names
    }

    fn to_single_graphic(
        &self,
        _: &AnalysisResult,
        _: &str,
        _: &ExportContext,
    ) -> ExportResult<Option<GraphicArtifact>> {
        Ok(None)
    }

    fn owns_graphic(&self, name: &str) -> bool {
        match self.prefix {
            Some(prefix) => name.starts_with(prefix),
            None => self.names.contains(&name),
        }
    }
}

#[test]
fn default_catalogue_is_consistent() {
    let registry = EngineRegistry::with_default_engines().unwrap();
    let decls = registry.declarations();
    assert!(decls.iter().any(|d| d.name == "video-block-detect" && d.kind == ArtifactKind::Tabular));
    assert!(decls.iter().any(|d| d.name == "audio-loudness-true-peak" && d.kind == ArtifactKind::Graphic));
    let owner = |found: Option<&dyn RendererEngine>| found.map(|e| e.name());
    assert_eq!(owner(registry.tabular_owner("audio-ebur128").unwrap()), Some("audio-ebur128"));
    assert_eq!(owner(registry.graphic_owner("audio-loudness").unwrap()), Some("audio-ebur128"));
    assert_eq!(owner(registry.graphic_owner("snapshot-00m12s").unwrap()), Some("snapshots"));
    assert!(registry.tabular_owner("audio-loudness").unwrap().is_none());
}

#[test]
fn duplicate_ownership_is_rejected() {
    let engines: Vec<Box<dyn RendererEngine>> =
        vec![Box::new(ScoreEngine::block()), Box::new(RangeEventEngine::silence()), Box::new(ScoreEngine::block())];
    let err = EngineRegistry::new(engines).err().unwrap();
    assert!(matches!(
        err,
        ExportError::DuplicateArtifact { ref name, .. } if name == "video-block-detect"
    ));
}

#[test]
fn declared_name_inside_the_snapshot_pattern_is_rejected() {
    let engines: Vec<Box<dyn RendererEngine>> =
        vec![Box::new(SnapshotEngine), Box::new(NamedGraphics { names: &["snapshot-intro"], prefix: None })];
    let err = EngineRegistry::new(engines).err().unwrap();
    assert!(matches!(
        err,
        ExportError::DuplicateArtifact { ref name, ref first, ref second }
            if name == "snapshot-intro" && first == "snapshots" && second == "named-graphics"
    ));
}

#[test]
fn overlapping_name_patterns_are_rejected() {
    let engines: Vec<Box<dyn RendererEngine>> = vec![
        Box::new(SnapshotEngine),
        Box::new(NamedGraphics { names: &["thumb-<name>"], prefix: Some("thumb-") }),
    ];
    let registry = EngineRegistry::new(engines).unwrap();
    assert_eq!(registry.graphic_owner("thumb-1").unwrap().map(|e| e.name()), Some("named-graphics"));

    let engines: Vec<Box<dyn RendererEngine>> = vec![
        Box::new(SnapshotEngine),
        Box::new(NamedGraphics { names: &["any-<name>"], prefix: Some("") }),
    ];
    assert!(matches!(EngineRegistry::new(engines).err().unwrap(), ExportError::DuplicateArtifact { .. }));
}

#[test]
fn snapshot_name_claimed_twice_fails_the_lookup() {
    // The declared name is outside both patterns, so only a run-time name collides.
    let engines: Vec<Box<dyn RendererEngine>> = vec![
        Box::new(SnapshotEngine),
        Box::new(NamedGraphics { names: &["clip-a"], prefix: Some("snapshot-00") }),
    ];
    let registry = EngineRegistry::new(engines).unwrap();
    assert!(registry.graphic_owner("snapshot-12m00s").unwrap().is_some());
    let err = registry.graphic_owner("snapshot-00m12s").err().unwrap();
    assert!(matches!(
        err,
        ExportError::DuplicateArtifact { ref name, .. } if name == "snapshot-00m12s"
    ));
}
