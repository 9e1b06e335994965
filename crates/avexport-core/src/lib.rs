// File: crates/avexport-core/src/lib.rs
// Summary: Export core entry point; analysis model, renderer engines, orchestrator and single-artifact resolver.

pub mod artifact;
pub mod cell;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod engines;
pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod registry;
pub mod report;
pub mod single;
pub mod stats;
pub mod tables;
pub mod tabular;

pub use artifact::{ContentType, GraphicArtifact, ImageArtifact};
pub use cell::Cell;
pub use config::{ExportConfig, ExportContext};
pub use engine::{
    GraphicRendererEngine, RendererEngine, ReportRendererEngine, SingleGraphicExporter,
    SingleTabularDocumentExporter, TableRendererEngine, TabularRendererEngine,
};
pub use error::{ExportError, ExportResult, UsageError};
pub use export::{ArtifactSink, DirectorySink, ExportFormat, ExportSummary, Exporter, MemorySink};
pub use format::NumberLocale;
pub use model::AnalysisResult;
pub use registry::{ArtifactDeclaration, ArtifactKind, EngineRegistry};
pub use report::{ReportCategory, ReportDocument, ReportEntry, ReportSection};
pub use single::{check_request, resolve, run_single_export, Destination, SingleExportRequest};
pub use stats::{summarize, Summary};
pub use tables::{Table, TableDocument, TableFormat};
pub use tabular::{TabularDialect, TabularDocument};
