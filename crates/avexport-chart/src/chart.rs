// File: crates/avexport-chart/src/chart.rs
// Summary: Headless rendering of timed data graphics to RGBA/PNG using Skia CPU raster surfaces.

use std::io::Cursor;

use skia_safe as skia;

use crate::axis::ScaleKind;
use crate::downsample::lttb;
use crate::error::{ChartError, ChartResult};
use crate::geometry::{clamp, Insets, RectI32};
use crate::graphic::TimedDataGraphic;
use crate::grid::{format_time_tick, format_value_tick, linspace};
use crate::scale::{TimeScale, ValueScale};
use crate::series::{Series, SeriesType};
use crate::text::TextShaper;
use crate::theme::Theme;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text (ticks, labels, legend) can be turned off for pixel-stable output.
    pub draw_labels: bool,
    /// A finite run longer than `factor * plot width` points is LTTB-reduced for drawing.
    pub downsample_factor: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
            downsample_factor: 2,
        }
    }
}

const X_TICKS: usize = 9;
const Y_TICKS: usize = 6;
const LABEL_SIZE: f32 = 12.0;

/// Render to a tightly packed, unpremultiplied RGBA8 buffer (`width * height * 4` bytes).
pub fn render_rgba8(graphic: &TimedDataGraphic, opts: &RenderOptions) -> ChartResult<Vec<u8>> {
    let (w, h) = (opts.width, opts.height);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or(ChartError::Surface { width: w, height: h })?;

    {
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);

        let plot = RectI32::plot_area(w, h, &opts.insets);
        let (t0, t1) = graphic.time_bounds();
        let xs = TimeScale::new(plot.left as f32, plot.right as f32, t0, t1);
        let ys = ValueScale::for_axis(plot.top as f32, plot.bottom as f32, graphic.range_axis(), graphic.scale());
        let shaper = if opts.draw_labels { Some(TextShaper::new()) } else { None };

        draw_plot_background(canvas, &plot, &opts.theme);
        draw_grid(canvas, &plot, &opts.theme);

        // Clip series to the plot so clamped extremes never bleed into the margins.
        canvas.save();
        canvas.clip_rect(
            skia::Rect::from_ltrb(plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32),
            None,
            Some(true),
        );
        let max_points = (plot.width().max(1) as usize) * opts.downsample_factor.max(1);
        for s in graphic.series() {
            match s.series_type {
                SeriesType::Line => draw_line_series(canvas, graphic.time_axis(), s, &xs, &ys, max_points),
                SeriesType::Histogram => draw_histogram_series(canvas, &plot, graphic.time_axis(), s, &xs, &ys),
            }
        }
        canvas.restore();

        draw_axes(canvas, &plot, &opts.theme);
        if let Some(shaper) = &shaper {
            draw_ticks(canvas, shaper, &plot, &xs, &ys, &opts.theme);
            draw_labels(canvas, shaper, &plot, graphic, &opts.theme);
            draw_legend(canvas, shaper, &plot, graphic.series(), &opts.theme);
        }
    }

    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(ChartError::ReadPixels);
    }
    Ok(pixels)
}

/// Render to PNG bytes.
pub fn render_png(graphic: &TimedDataGraphic, opts: &RenderOptions) -> ChartResult<Vec<u8>> {
    let pixels = render_rgba8(graphic, opts)?;
    let img = image::RgbaImage::from_raw(opts.width as u32, opts.height as u32, pixels)
        .ok_or(ChartError::ReadPixels)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

// ---- helpers ----------------------------------------------------------------

fn draw_plot_background(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.plot_background);
    paint.set_style(skia::paint::Style::Fill);
    canvas.draw_rect(
        skia::Rect::from_ltrb(plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32),
        &paint,
    );
}

fn draw_grid(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (l, t, r, b) = (plot.left as f64, plot.top as f64, plot.right as f64, plot.bottom as f64);
    // verticals
    for x in linspace(l, r, X_TICKS) {
        canvas.draw_line((x as f32, t as f32), (x as f32, b as f32), &paint);
    }
    // horizontals
    for y in linspace(t, b, Y_TICKS) {
        canvas.draw_line((l as f32, y as f32), (r as f32, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);
}

fn draw_ticks(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectI32,
    xs: &TimeScale,
    ys: &ValueScale,
    theme: &Theme,
) {
    let (l, t, r, b) = (plot.left as f64, plot.top as f64, plot.right as f64, plot.bottom as f64);
    for px in linspace(l, r, X_TICKS) {
        let label = format_time_tick(xs.from_px(px as f32));
        shaper.draw_centered(canvas, &label, px as f32, b as f32 + 18.0, LABEL_SIZE, theme.tick, true);
    }
    // Labels come from the inverse transform so log scales get their real values.
    for py in linspace(t, b, Y_TICKS) {
        let label = format_value_tick(ys.from_px(py as f32));
        shaper.draw_right(canvas, &label, l as f32 - 6.0, py as f32 + 4.0, LABEL_SIZE, theme.tick, true);
    }
}

fn draw_labels(canvas: &skia::Canvas, shaper: &TextShaper, plot: &RectI32, graphic: &TimedDataGraphic, theme: &Theme) {
    let mut y_label = graphic.range_axis().label.clone();
    if graphic.scale() == ScaleKind::Log10 {
        y_label.push_str(" (log)");
    }
    shaper.draw_left(canvas, &y_label, plot.left as f32, plot.top as f32 - 22.0, 14.0, theme.axis_label, false);
    shaper.draw_right(canvas, "Time", plot.right as f32, plot.bottom as f32 + 38.0, 14.0, theme.axis_label, false);
}

fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, plot: &RectI32, series: &[Series], theme: &Theme) {
    let mut swatch = skia::Paint::default();
    swatch.set_style(skia::paint::Style::Fill);
    let mut x = plot.right as f32;
    let y = plot.top as f32 - 10.0;
    // right-aligned, last series rightmost
    for s in series.iter().rev() {
        let w = shaper.measure_width(&s.name, LABEL_SIZE, false);
        x -= w;
        shaper.draw_left(canvas, &s.name, x, y, LABEL_SIZE, theme.axis_label, false);
        x -= 14.0;
        swatch.set_color(s.color);
        canvas.draw_rect(skia::Rect::from_xywh(x, y - 9.0, 10.0, 10.0), &swatch);
        x -= 16.0;
    }
}

fn stroke_paint(series: &Series) -> skia::Paint {
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(series.stroke.width);
    stroke.set_color(series.color);
    if series.stroke.dashed {
        stroke.set_path_effect(skia::PathEffect::dash(&[6.0, 4.0], 0.0));
    }
    stroke
}

fn draw_line_series(
    canvas: &skia::Canvas,
    times: &[f64],
    series: &Series,
    xs: &TimeScale,
    ys: &ValueScale,
    max_points: usize,
) {
    let stroke = stroke_paint(series);
    let (vmin, vmax) = (ys.vmin, ys.vmax);

    for run in series.pinned_runs(times, vmin, vmax) {
        let points = if run.len() > max_points { lttb(&run, max_points) } else { run };
        if points.len() == 1 {
            let (t, v) = points[0];
            canvas.draw_point((xs.to_px(t), ys.to_px(v)), &stroke);
            continue;
        }
        let mut path = skia::Path::new();
        let (t0, v0) = points[0];
        path.move_to((xs.to_px(t0), ys.to_px(v0)));
        for &(t, v) in points.iter().skip(1) {
            path.line_to((xs.to_px(t), ys.to_px(v)));
        }
        canvas.draw_path(&path, &stroke);
    }
}

fn draw_histogram_series(
    canvas: &skia::Canvas,
    plot: &RectI32,
    times: &[f64],
    series: &Series,
    xs: &TimeScale,
    ys: &ValueScale,
) {
    let mut body = skia::Paint::default();
    body.set_anti_alias(true);
    body.set_style(skia::paint::Style::Fill);
    body.set_color(series.color);

    let n = series.len().max(1) as f32;
    let bar_px = (plot.width() as f32 / n * 0.8).max(1.0);
    let origin = ys.origin_px();
    for (&t, &v) in times.iter().zip(&series.values) {
        if !t.is_finite() || v.is_nan() {
            continue;
        }
        let x = xs.to_px(t);
        let y = ys.to_px(clamp(v, ys.vmin, ys.vmax));
        let rect = skia::Rect::from_ltrb(x - bar_px * 0.5, y.min(origin), x + bar_px * 0.5, y.max(origin));
        canvas.draw_rect(rect, &body);
    }
}
