// File: crates/avexport-core/src/engines/waveform.rs
// Summary: Audio waveform envelope chart.

use std::rc::Rc;

use avexport_chart::{theme, Series, Stroke, TimedDataGraphic};

use super::time_axis;
use crate::artifact::GraphicArtifact;
use crate::config::ExportContext;
use crate::engine::{
    automatic_axis, find_graphic, render_prepared, render_prepared_one, GraphicMaker, GraphicRendererEngine,
    PreparedGraphics, RendererEngine, ReportRendererEngine, SingleGraphicExporter,
};
use crate::error::ExportResult;
use crate::format::Unit;
use crate::model::{AnalysisResult, Waveform};
use crate::report::{ReportCategory, ReportEntry, ReportSection};

const NAME: &str = "audio-waveform";

pub struct WaveformEngine;

fn waveform(result: &AnalysisResult) -> Option<&Waveform> {
    result.waveform.as_ref().filter(|w| !w.points.is_empty())
}

pub struct PreparedWaveform {
    times: Rc<[f64]>,
    min: Vec<f64>,
    max: Vec<f64>,
    rms: Vec<f64>,
}

fn envelope_graphic(p: &PreparedWaveform, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let all: Vec<f64> = p.min.iter().chain(&p.max).copied().collect();
    let Some(axis) = automatic_axis("Amplitude", &all, 0.1)? else {
        return Ok(None);
    };
    let mut g = TimedDataGraphic::new(p.times.clone(), axis);
    g.add_series(Series::line("Max", theme::series_color(0), p.max.clone()).with_stroke(Stroke::THIN))?;
    g.add_series(Series::line("Min", theme::series_color(0), p.min.clone()).with_stroke(Stroke::THIN))?;
    if p.rms.iter().any(|v| v.is_finite()) {
        g.add_series(Series::line("RMS", theme::series_color(1), p.rms.clone()))?;
    }
    Ok(Some(g))
}

const MAKERS: &[GraphicMaker<PreparedWaveform>] = &[GraphicMaker { name: NAME, make: envelope_graphic }];

impl PreparedGraphics for WaveformEngine {
    type Prepared = PreparedWaveform;

    fn prepare(&self, result: &AnalysisResult, _ctx: &ExportContext) -> ExportResult<Option<PreparedWaveform>> {
        let Some(w) = waveform(result) else {
            return Ok(None);
        };
        Ok(Some(PreparedWaveform {
            times: time_axis(&w.points, |p| p.pts_time),
            min: w.points.iter().map(|p| p.min).collect(),
            max: w.points.iter().map(|p| p.max).collect(),
            rms: w.points.iter().map(|p| p.rms).collect(),
        }))
    }

    fn makers(&self) -> &'static [GraphicMaker<PreparedWaveform>] {
        MAKERS
    }
}

impl RendererEngine for WaveformEngine {
    fn name(&self) -> &'static str {
        NAME
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

impl GraphicRendererEngine for WaveformEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        render_prepared(self, result, ctx)
    }
}

impl SingleGraphicExporter for WaveformEngine {
    fn graphic_names(&self) -> &'static [&'static str] {
        &[NAME]
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

impl ReportRendererEngine for WaveformEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let Some(w) = waveform(result) else {
            return Ok(None);
        };
        let mut section = ReportSection::new(ReportCategory::Audio, "Waveform");
        let rate = w.sample_rate.map_or(f64::NAN, f64::from);
        section.push(ReportEntry::numeric("Envelope sample rate", rate, Unit::HERTZ, ctx.locale()));
        if let Some(g) = find_graphic(graphics, NAME) {
            section.push(ReportEntry::Graphic(Rc::clone(g)));
        }
        Ok(Some(section))
    }
}
