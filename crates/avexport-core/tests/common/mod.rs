// File: crates/avexport-core/tests/common/mod.rs
// Purpose: Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;

use avexport_core::{AnalysisResult, ExportConfig, ExportContext, ExportFormat};

pub const SAMPLE: &str = include_str!("../fixtures/sample_analysis.json");

pub fn sample() -> AnalysisResult {
    AnalysisResult::from_json_str(SAMPLE).expect("fixture parses")
}

/// Small, label-free charts keep the tests quick and pixel-stable.
pub fn context() -> ExportContext {
    let config = ExportConfig { graphic_width: 320, graphic_height: 200, ..ExportConfig::default() };
    let mut ctx = ExportContext::new(config);
    ctx.render.draw_labels = false;
    ctx
}

pub fn formats(selectors: &[&str]) -> BTreeSet<ExportFormat> {
    selectors.iter().map(|s| s.parse().expect("known selector")).collect()
}
