// File: crates/avexport-core/src/registry.rs
// Summary: Engine registry; owns the catalogue, enforces unique artifact names and answers ownership lookups.

use std::collections::{BTreeMap, BTreeSet};

use crate::engine::RendererEngine;
use crate::engines;
use crate::error::{ExportError, ExportResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactKind {
    Tabular,
    Graphic,
}

impl ArtifactKind {
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Tabular => "tabular",
            ArtifactKind::Graphic => "graphic",
        }
    }
}

/// One declared artifact: name, kind and owning engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactDeclaration {
    pub name: &'static str,
    pub kind: ArtifactKind,
    pub engine: &'static str,
}

pub struct EngineRegistry {
    engines: Vec<Box<dyn RendererEngine>>,
}

impl EngineRegistry {
    /// Registry over `engines`, in display order. A name may be declared once
    /// per kind, and only by one engine; no other engine may claim it through
    /// a name pattern either.
    pub fn new(engines: Vec<Box<dyn RendererEngine>>) -> ExportResult<Self> {
        let registry = Self { engines };
        let mut owners: BTreeMap<&'static str, &'static str> = BTreeMap::new();
        let mut declared: BTreeSet<(&'static str, ArtifactKind)> = BTreeSet::new();
        for decl in registry.declarations() {
            let first = *owners.entry(decl.name).or_insert(decl.engine);
            if first != decl.engine || !declared.insert((decl.name, decl.kind)) {
                return Err(duplicate(decl.name, first, decl.engine));
            }
            registry.owner(decl.name, decl.kind)?;
        }
        Ok(registry)
    }

    /// The full catalogue.
    pub fn with_default_engines() -> ExportResult<Self> {
        Self::new(engines::default_engines())
    }

    pub fn engines(&self) -> &[Box<dyn RendererEngine>] {
        &self.engines
    }

    pub fn declarations(&self) -> Vec<ArtifactDeclaration> {
        let mut out = Vec::new();
        for engine in &self.engines {
            if let Some(single) = engine.single_tabular() {
                out.extend(single.tabular_names().iter().map(|&name| ArtifactDeclaration {
                    name,
                    kind: ArtifactKind::Tabular,
                    engine: engine.name(),
                }));
            }
            if let Some(single) = engine.single_graphic() {
                out.extend(single.graphic_names().iter().map(|&name| ArtifactDeclaration {
                    name,
                    kind: ArtifactKind::Graphic,
                    engine: engine.name(),
                }));
            }
        }
        out
    }

    pub fn tabular_owner(&self, name: &str) -> ExportResult<Option<&dyn RendererEngine>> {
        self.owner(name, ArtifactKind::Tabular)
    }

    pub fn graphic_owner(&self, name: &str) -> ExportResult<Option<&dyn RendererEngine>> {
        self.owner(name, ArtifactKind::Graphic)
    }

    /// The one engine claiming `name`. Pattern-owned names (snapshots) are
    /// only known at run time, so a second claimant is reported here.
    fn owner(&self, name: &str, kind: ArtifactKind) -> ExportResult<Option<&dyn RendererEngine>> {
        let mut claimants = self.engines.iter().map(|e| e.as_ref()).filter(|e| match kind {
            ArtifactKind::Tabular => e.single_tabular().is_some_and(|s| s.owns_tabular(name)),
            ArtifactKind::Graphic => e.single_graphic().is_some_and(|s| s.owns_graphic(name)),
        });
        match (claimants.next(), claimants.next()) {
            (Some(a), Some(b)) => Err(duplicate(name, a.name(), b.name())),
            (first, _) => Ok(first),
        }
    }
}

fn duplicate(name: &str, first: &str, second: &str) -> ExportError {
    ExportError::DuplicateArtifact { name: name.to_string(), first: first.to_string(), second: second.to_string() }
}
