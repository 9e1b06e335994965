// File: crates/avexport-chart/src/lib.rs
// Summary: Chart library entry point; exports range axes, timed data graphics and PNG rendering.

pub mod axis;
pub mod chart;
pub mod downsample;
pub mod error;
pub mod geometry;
pub mod graphic;
pub mod grid;
pub mod scale;
pub mod series;
pub mod text;
pub mod theme;

pub use axis::{RangeAxis, ScaleKind};
pub use chart::{render_png, render_rgba8, RenderOptions};
pub use downsample::lttb;
pub use error::{ChartError, ChartResult};
pub use geometry::Insets;
pub use graphic::TimedDataGraphic;
pub use series::{Series, SeriesType, Stroke};
pub use skia_safe::Color;
pub use text::TextShaper;
pub use theme::Theme;
