// File: crates/avexport-core/src/engines/ebur128.rs
// Summary: EBU R128 loudness listing, loudness and true-peak charts, programme loudness report.

use std::rc::Rc;

use avexport_chart::{theme, Series, Stroke, TimedDataGraphic};

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
use crate::model::{AnalysisResult, LoudnessEvent};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "audio-ebur128";
const LOUDNESS: &str = "audio-loudness";
const TRUE_PEAK: &str = "audio-loudness-true-peak";
const HEADER: [&str; 7] = [
    "Time (s)",
    "Momentary (LUFS)",
    "Short-term (LUFS)",
    "Integrated (LUFS)",
    "LRA (LU)",
    "Sample peak (dBFS)",
    "True peak (dBTP)",
];

pub struct LoudnessEngine;

fn events(result: &AnalysisResult) -> &[LoudnessEvent] {
    result.filters.as_ref().map_or(&[], |f| f.ebur128.as_slice())
}

fn rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    events(result)
        .iter()
        .map(|e| crate::cells![e.t, e.momentary, e.short_term, e.integrated, e.lra, e.sample_peak, e.true_peak])
        .collect()
}

pub struct PreparedLoudness {
    /// Time axis and loudness range, no series; the true-peak chart rebinds its range.
    base: TimedDataGraphic,
    momentary: Vec<f64>,
    short_term: Vec<f64>,
    integrated: Vec<f64>,
    sample_peak: Vec<f64>,
    true_peak: Vec<f64>,
}

fn loudness_graphic(p: &PreparedLoudness, ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let mut g = p.base.clone();
    g.add_series(Series::line("Momentary", theme::series_color(0), p.momentary.clone()).with_stroke(Stroke::THIN))?;
    g.add_series(Series::line("Short-term", theme::series_color(1), p.short_term.clone()))?;
    g.add_series(Series::line("Integrated", theme::series_color(2), p.integrated.clone()))?;
    let target = vec![ctx.config.loudness_target; g.len()];
    g.add_series(Series::line("Target", theme::series_color(3), target).with_stroke(Stroke::DASHED))?;
    Ok(Some(g))
}

fn true_peak_graphic(p: &PreparedLoudness, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let peaks: Vec<f64> = p.true_peak.iter().chain(&p.sample_peak).copied().collect();
    let Some(axis) = automatic_axis("Peak (dBTP)", &peaks, 1.0)? else {
        return Ok(None);
    };
    let mut g = p.base.with_range_axis(axis);
    g.add_series(Series::line("Sample peak", theme::series_color(4), p.sample_peak.clone()).with_stroke(Stroke::THIN))?;
    g.add_series(Series::line("True peak", theme::series_color(5), p.true_peak.clone()))?;
    Ok(Some(g))
}

const MAKERS: &[GraphicMaker<PreparedLoudness>] = &[
    GraphicMaker { name: LOUDNESS, make: loudness_graphic },
    GraphicMaker { name: TRUE_PEAK, make: true_peak_graphic },
];

impl PreparedGraphics for LoudnessEngine {
    type Prepared = PreparedLoudness;

    fn prepare(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Option<PreparedLoudness>> {
        let events = events(result);
        if events.is_empty() {
            return Ok(None);
        }
        let column = |f: fn(&LoudnessEvent) -> f64| events.iter().map(f).collect::<Vec<f64>>();
        let momentary = column(|e| e.momentary);
        let short_term = column(|e| e.short_term);
        let integrated = column(|e| e.integrated);

        let mut range_values: Vec<f64> = momentary.iter().chain(&short_term).chain(&integrated).copied().collect();
        range_values.push(ctx.config.loudness_target);
        let Some(axis) = automatic_axis("Loudness (LUFS)", &range_values, 1.0)? else {
            return Ok(None);
        };
        Ok(Some(PreparedLoudness {
            base: TimedDataGraphic::new(time_axis(events, |e| e.t), axis),
            momentary,
            short_term,
            integrated,
            sample_peak: column(|e| e.sample_peak),
            true_peak: column(|e| e.true_peak),
        }))
    }

    fn makers(&self) -> &'static [GraphicMaker<PreparedLoudness>] {
        MAKERS
    }
}

impl RendererEngine for LoudnessEngine {
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

impl TabularRendererEngine for LoudnessEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for LoudnessEngine {
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

impl TableRendererEngine for LoudnessEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Loudness (EBU R128)", &HEADER, rows(result))?);
        Ok(())
    }
}

impl GraphicRendererEngine for LoudnessEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        render_prepared(self, result, ctx)
    }
}

impl SingleGraphicExporter for LoudnessEngine {
    fn graphic_names(&self) -> &'static [&'static str] {
        &[LOUDNESS, TRUE_PEAK]
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

impl ReportRendererEngine for LoudnessEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let events = events(result);
        if result.loudness.is_none() && events.is_empty() {
            return Ok(None);
        }
        let locale = ctx.locale();
        let mut section = ReportSection::new(ReportCategory::Audio, "Loudness (EBU R128)");
        if let Some(l) = &result.loudness {
            section.push(ReportEntry::numeric("Integrated loudness", l.integrated, Unit::LUFS, locale));
            section.push(ReportEntry::numeric("Integration threshold", l.integrated_threshold, Unit::LUFS, locale));
            section.push(ReportEntry::numeric(
                "Deviation from target",
                l.integrated - ctx.config.loudness_target,
                Unit::LU,
                locale,
            ));
            section.push(ReportEntry::numeric("Loudness range", l.lra, Unit::LU, locale));
            section.push(ReportEntry::numeric("Loudness range threshold", l.lra_threshold, Unit::LUFS, locale));
            section.push(ReportEntry::numeric("LRA low", l.lra_low, Unit::LUFS, locale));
            section.push(ReportEntry::numeric("LRA high", l.lra_high, Unit::LUFS, locale));
            section.push(ReportEntry::numeric("True peak", l.true_peak, Unit::DBTP, locale));
            section.push(ReportEntry::numeric("Sample peak", l.sample_peak, Unit::DBFS, locale));
        }
        if !events.is_empty() {
            section.push(ReportEntry::Statistics(statistics(
                "Momentary loudness",
                Unit::LUFS,
                events.iter().map(|e| e.momentary),
                ctx,
            )));
            section.push(ReportEntry::Statistics(statistics(
                "Short-term loudness",
                Unit::LUFS,
                events.iter().map(|e| e.short_term),
                ctx,
            )));
            section.push(ReportEntry::Statistics(statistics(
                "True peak per event",
                Unit::DBTP,
                events.iter().map(|e| e.true_peak),
                ctx,
            )));
        }
        for name in [LOUDNESS, TRUE_PEAK] {
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
    use crate::model::FilterMetrics;

    fn event(t: f64, m: f64) -> LoudnessEvent {
        LoudnessEvent {
            t,
            momentary: m,
            short_term: m + 1.0,
            integrated: -23.0,
            lra: 5.0,
            sample_peak: -3.0,
            true_peak: -2.5,
        }
    }

    #[test]
    fn charts_share_the_time_axis() {
        let mut r = AnalysisResult::new("a.wav");
        r.filters = Some(FilterMetrics {
            ebur128: vec![event(0.1, f64::NEG_INFINITY), event(0.2, -30.0), event(0.3, -20.0)],
            ..FilterMetrics::default()
        });
        let ctx = ExportContext::default();
        let p = LoudnessEngine.prepare(&r, &ctx).unwrap().unwrap();
        let loud = loudness_graphic(&p, &ctx).unwrap().unwrap();
        let peak = true_peak_graphic(&p, &ctx).unwrap().unwrap();
        assert!(loud.shares_time_axis_with(&peak));
        assert_eq!(loud.series().len(), 4);
        assert!(peak.range_axis().contains(-2.5));
    }
}
