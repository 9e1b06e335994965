// File: crates/avexport-core/src/engines/astats.rs
// Summary: Per-channel audio statistics listing, level and DC offset charts.

use std::rc::Rc;

use avexport_chart::{theme, RangeAxis, Series, TimedDataGraphic};

use super::{statistics, table, tabular_document, time_axis};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{
    automatic_axis, find_graphic, render_prepared, render_prepared_one, tabular_from_singles, GraphicMaker,
    GraphicRendererEngine, PreparedGraphics, RendererEngine, ReportRendererEngine, SingleGraphicExporter,
    SingleTabularDocumentExporter, TableRendererEngine, TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::format::Unit;
use crate::model::{AnalysisResult, AudioChannelStats, AudioStatsFrame};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "audio-astats";
const DBFS: &str = "audio-dbfs";
const DC_OFFSET: &str = "audio-dc-offset";
const HEADER: [&str; 9] = [
    "Frame",
    "Time (s)",
    "Channel",
    "RMS level (dBFS)",
    "Peak level (dBFS)",
    "DC offset",
    "Noise floor (dBFS)",
    "Entropy",
    "Flat factor",
];

pub struct AudioStatsEngine;

fn frames(result: &AnalysisResult) -> &[AudioStatsFrame] {
    result.filters.as_ref().map_or(&[], |f| f.astats.as_slice())
}

fn channel_count(frames: &[AudioStatsFrame]) -> usize {
    frames.iter().map(|f| f.channels.len()).max().unwrap_or(0)
}

/// One value per frame for `channel`; frames lacking the channel give NaN.
fn channel_values(frames: &[AudioStatsFrame], channel: usize, field: fn(&AudioChannelStats) -> f64) -> Vec<f64> {
    frames.iter().map(|f| f.channels.get(channel).map_or(f64::NAN, field)).collect()
}

fn rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    for f in frames(result) {
        for (i, c) in f.channels.iter().enumerate() {
            rows.push(crate::cells![
                f.frame,
                f.pts_time,
                i + 1,
                c.rms_level,
                c.peak_level,
                c.dc_offset,
                c.noise_floor,
                c.entropy,
                c.flat_factor
            ]);
        }
    }
    rows
}

pub struct PreparedStats {
    times: Rc<[f64]>,
    rms: Vec<Vec<f64>>,
    peak: Vec<Vec<f64>>,
    dc_offset: Vec<Vec<f64>>,
}

fn dbfs_graphic(p: &PreparedStats, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let all: Vec<f64> = p.rms.iter().chain(&p.peak).flatten().copied().collect();
    let Some(axis) = automatic_axis("Level (dBFS)", &all, 1.0)? else {
        return Ok(None);
    };
    let mut g = TimedDataGraphic::new(p.times.clone(), axis);
    for (i, (rms, peak)) in p.rms.iter().zip(&p.peak).enumerate() {
        g.add_series(Series::line(format!("RMS ch{}", i + 1), theme::series_color(2 * i), rms.clone()))?;
        g.add_series(Series::line(format!("Peak ch{}", i + 1), theme::series_color(2 * i + 1), peak.clone()))?;
    }
    Ok(Some(g))
}

fn dc_offset_graphic(p: &PreparedStats, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    if !p.dc_offset.iter().flatten().any(|v| v.is_finite()) {
        return Ok(None);
    }
    // DC offset is a ratio of full scale.
    let mut g = TimedDataGraphic::new(p.times.clone(), RangeAxis::fixed("DC offset", 0.0, 1, 1.0));
    for (i, dc) in p.dc_offset.iter().enumerate() {
        g.add_series(Series::line(format!("DC offset ch{}", i + 1), theme::series_color(i), dc.clone()))?;
    }
    Ok(Some(g))
}

const MAKERS: &[GraphicMaker<PreparedStats>] = &[
    GraphicMaker { name: DBFS, make: dbfs_graphic },
    GraphicMaker { name: DC_OFFSET, make: dc_offset_graphic },
];

impl PreparedGraphics for AudioStatsEngine {
    type Prepared = PreparedStats;

    fn prepare(&self, result: &AnalysisResult, _ctx: &ExportContext) -> ExportResult<Option<PreparedStats>> {
        let frames = frames(result);
        let channels = channel_count(frames);
        if channels == 0 {
            return Ok(None);
        }
        let per_channel = |field: fn(&AudioChannelStats) -> f64| -> Vec<Vec<f64>> {
            (0..channels).map(|c| channel_values(frames, c, field)).collect()
        };
        Ok(Some(PreparedStats {
            times: time_axis(frames, |f| f.pts_time),
            rms: per_channel(|c| c.rms_level),
            peak: per_channel(|c| c.peak_level),
            dc_offset: per_channel(|c| c.dc_offset),
        }))
    }

    fn makers(&self) -> &'static [GraphicMaker<PreparedStats>] {
        MAKERS
    }
}

impl RendererEngine for AudioStatsEngine {
    fn name(&self) -> &'static str {
        NAME
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

impl TabularRendererEngine for AudioStatsEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for AudioStatsEngine {
    fn tabular_names(&self) -> &'static [&'static str] {
        &[NAME]
    }

    fn to_single_tabular(
        &self,
        result: &AnalysisResult,
        _name: &str,
        dialect: TabularDialect,
        _ctx: &ExportContext,
    ) -> ExportResult<Option<TabularDocument>> {
        tabular_document(NAME, dialect, &HEADER, rows(result))
    }
}

impl TableRendererEngine for AudioStatsEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Audio statistics", &HEADER, rows(result))?);
        Ok(())
    }
}

impl GraphicRendererEngine for AudioStatsEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        render_prepared(self, result, ctx)
    }
}

impl SingleGraphicExporter for AudioStatsEngine {
    fn graphic_names(&self) -> &'static [&'static str] {
        &[DBFS, DC_OFFSET]
    }

    fn to_single_graphic(
        &self,
        result: &AnalysisResult,
        name: &str,
        ctx: &ExportContext,
    ) -> ExportResult<Option<GraphicArtifact>> {
        render_prepared_one(self, result, name, ctx)
    }
}

impl ReportRendererEngine for AudioStatsEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let frames = frames(result);
        let channels = channel_count(frames);
        if channels == 0 {
            return Ok(None);
        }
        let mut section = ReportSection::new(ReportCategory::Audio, "Audio levels");
        for c in 0..channels {
            let entries = vec![
                ReportEntry::Statistics(statistics(
                    "RMS level",
                    Unit::DBFS,
                    channel_values(frames, c, |s| s.rms_level),
                    ctx,
                )),
                ReportEntry::Statistics(statistics(
                    "Peak level",
                    Unit::DBFS,
                    channel_values(frames, c, |s| s.peak_level),
                    ctx,
                )),
                ReportEntry::Statistics(statistics(
                    "DC offset",
                    Unit::NONE,
                    channel_values(frames, c, |s| s.dc_offset),
                    ctx,
                )),
                ReportEntry::Statistics(statistics(
                    "Noise floor",
                    Unit::DBFS,
                    channel_values(frames, c, |s| s.noise_floor),
                    ctx,
                )),
            ];
            section.push(ReportEntry::Subset { title: format!("Channel {}", c + 1), entries });
        }
        for name in [DBFS, DC_OFFSET] {
            if let Some(g) = find_graphic(graphics, name) {
                section.push(ReportEntry::Graphic(Rc::clone(g)));
            }
        }
        Ok(Some(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(rms: f64) -> AudioChannelStats {
        AudioChannelStats {
            rms_level: rms,
            peak_level: rms + 6.0,
            dc_offset: 0.001,
            noise_floor: -90.0,
            entropy: 0.5,
            flat_factor: 0.0,
        }
    }

    #[test]
    fn missing_channels_are_nan() {
        let frames = vec![
            AudioStatsFrame { frame: 0, pts_time: 0.0, channels: vec![stats(-20.0), stats(-21.0)] },
            AudioStatsFrame { frame: 1, pts_time: 0.1, channels: vec![stats(-22.0)] },
        ];
        assert_eq!(channel_count(&frames), 2);
        let ch2 = channel_values(&frames, 1, |s| s.rms_level);
        assert_eq!(ch2[0], -21.0);
        assert!(ch2[1].is_nan());
    }
}
