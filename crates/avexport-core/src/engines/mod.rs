// File: crates/avexport-core/src/engines/mod.rs
// Summary: Engine catalogue and helpers shared by the per-metric engines.

mod about;
mod astats;
mod container_frames;
mod crop_detect;
mod ebur128;
mod gop;
mod idet;
mod media_summary;
mod phase_meter;
mod range_events;
mod score_detect;
mod siti;
mod snapshots;
mod streams;
mod waveform;

use std::rc::Rc;

use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::RendererEngine;
use crate::error::ExportResult;
use crate::format::Unit;
use crate::stats::StatisticsUnitValueReportEntry;
use crate::tables::Table;
use crate::tabular::{TabularDialect, TabularDocument};

pub use about::AboutEngine;
pub use astats::AudioStatsEngine;
pub use container_frames::ContainerFramesEngine;
pub use crop_detect::CropDetectEngine;
pub use ebur128::LoudnessEngine;
pub use gop::GopEngine;
pub use idet::InterlaceEngine;
pub use media_summary::MediaSummaryEngine;
pub use phase_meter::PhaseMeterEngine;
pub use range_events::RangeEventEngine;
pub use score_detect::ScoreEngine;
pub use siti::SitiEngine;
pub use snapshots::SnapshotEngine;
pub use streams::StreamsEngine;
pub use waveform::WaveformEngine;

/// Every engine, in report order within each category.
pub fn default_engines() -> Vec<Box<dyn RendererEngine>> {
    vec![
        Box::new(MediaSummaryEngine),
        Box::new(StreamsEngine::video()),
        Box::new(StreamsEngine::audio()),
        Box::new(ContainerFramesEngine),
        Box::new(GopEngine),
        Box::new(LoudnessEngine),
        Box::new(AudioStatsEngine),
        Box::new(PhaseMeterEngine),
        Box::new(WaveformEngine),
        Box::new(RangeEventEngine::silence()),
        Box::new(RangeEventEngine::black()),
        Box::new(RangeEventEngine::freeze()),
        Box::new(SitiEngine),
        Box::new(ScoreEngine::block()),
        Box::new(ScoreEngine::blur()),
        Box::new(CropDetectEngine),
        Box::new(InterlaceEngine),
        Box::new(SnapshotEngine),
        Box::new(AboutEngine),
    ]
}

/// Rows as a dialect document; `None` when there are no rows.
pub(crate) fn tabular_document(
    name: &str,
    dialect: TabularDialect,
    header: &[&str],
    rows: Vec<Vec<Cell>>,
) -> ExportResult<Option<TabularDocument>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let mut doc = TabularDocument::new(name, dialect, header);
    for row in rows {
        doc.add_row(row)?;
    }
    Ok(Some(doc))
}

pub(crate) fn table(name: &str, header: &[&str], rows: Vec<Vec<Cell>>) -> ExportResult<Table> {
    let mut table = Table::new(name, header);
    for row in rows {
        table.add_row(row)?;
    }
    Ok(table)
}

pub(crate) fn statistics<I>(key: &str, unit: Unit, values: I, ctx: &ExportContext) -> StatisticsUnitValueReportEntry
where
    I: IntoIterator<Item = f64>,
{
    StatisticsUnitValueReportEntry::from_values(key, unit, values, ctx.locale())
}

/// Time axis shared by every chart of one engine.
pub(crate) fn time_axis<T>(items: &[T], time: impl Fn(&T) -> f64) -> Rc<[f64]> {
    items.iter().map(time).collect()
}

pub(crate) const UNKNOWN: &str = "(unknown)";
