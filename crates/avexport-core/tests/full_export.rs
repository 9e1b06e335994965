// File: crates/avexport-core/tests/full_export.rs
// Purpose: Whole-catalogue exports of the sample result: file set, report order, partial input, writers.

mod common;

use avexport_core::{
    AnalysisResult, DirectorySink, EngineRegistry, ExportConfig, ExportContext, ExportError, Exporter, MemorySink,
    UsageError,
};
use serde_json::Value;

fn export(result: &AnalysisResult, ctx: &ExportContext, selectors: &[&str]) -> MemorySink {
    let registry = EngineRegistry::with_default_engines().unwrap();
    let mut sink = MemorySink::new();
    Exporter::new(&registry, ctx).export(result, &common::formats(selectors), &mut sink).unwrap();
    sink
}

#[test]
fn tabular_files_follow_the_naming_convention() {
    let sink = export(&common::sample(), &common::context(), &["txt"]);
    let names: Vec<&str> = sink.file_names().collect();
    for expected in [
        "interview_take3_media-summary.txt",
        "interview_take3_audio-ebur128.txt",
        "interview_take3_video-crop-detect.txt",
        "interview_take3_video-idet.txt",
        "interview_take3_container-gop.txt",
    ] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
    // No freeze events were measured.
    assert!(!names.iter().any(|n| n.contains("freeze")));
    assert!(names.iter().all(|n| n.ends_with(".txt")));
}

#[test]
fn loudness_listing_pins_infinities() {
    let sink = export(&common::sample(), &common::context(), &["csv"]);
    let text = std::str::from_utf8(sink.get("interview_take3_audio-ebur128.csv").unwrap()).unwrap();
    let first_row = text.lines().nth(1).unwrap();
    assert!(first_row.starts_with("0.4,-144,-144,-70,"), "{first_row}");
}

#[test]
fn csv_and_csv_fr_cannot_be_combined() {
    let registry = EngineRegistry::with_default_engines().unwrap();
    let ctx = common::context();
    let mut sink = MemorySink::new();
    let err = Exporter::new(&registry, &ctx)
        .export(&common::sample(), &common::formats(&["csv", "csvfr"]), &mut sink)
        .unwrap_err();
    assert!(matches!(err, ExportError::Usage(UsageError::IncompatibleFormats(..))));
    assert_eq!(err.exit_code(), 6);
    assert!(sink.is_empty());
}

#[test]
fn graphics_decode_as_png_of_the_configured_size() {
    let sink = export(&common::sample(), &common::context(), &["graphic"]);
    let pngs: Vec<&str> = sink.file_names().filter(|n| n.ends_with(".png")).collect();
    assert!(pngs.contains(&"interview_take3_audio-loudness.png"), "{pngs:?}");
    assert!(pngs.contains(&"interview_take3_container-video-frame-sizes.png"), "{pngs:?}");
    for name in pngs {
        let img = image::load_from_memory(sink.get(name).unwrap()).unwrap();
        assert_eq!((img.width(), img.height()), (320, 200), "{name}");
    }
    assert_eq!(sink.get("interview_take3_snapshot-00m01s.jpg"), Some(&[0xFF, 0xD8, 0xFF, 0xD9][..]));
}

#[test]
fn report_sections_follow_category_order() {
    let sink = export(&common::sample(), &common::context(), &["html"]);
    let json: Value = serde_json::from_slice(sink.get("interview_take3_report.json").unwrap()).unwrap();
    let categories: Vec<&str> = json["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["category"].as_str().unwrap())
        .collect();
    let order = ["summary", "audio", "video", "container", "about"];
    let ranks: Vec<usize> = categories.iter().map(|c| order.iter().position(|o| o == c).unwrap()).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{categories:?}");
    assert_eq!(categories.first(), Some(&"summary"));
    assert_eq!(categories.last(), Some(&"about"));

    let html = std::str::from_utf8(sink.get("interview_take3_report.html").unwrap()).unwrap();
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains("data:image/jpeg;base64,"));
    // The report reuses the rendered charts without writing them as files.
    assert!(!sink.file_names().any(|n| n.ends_with(".png")));
}

#[test]
fn programme_and_per_event_true_peak_both_reach_the_report_json() {
    let sink = export(&common::sample(), &common::context(), &["html"]);
    let json: Value = serde_json::from_slice(sink.get("interview_take3_report.json").unwrap()).unwrap();
    let loudness = json["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["title"] == "Loudness (EBU R128)")
        .unwrap();
    let entries = &loudness["entries"];
    assert_eq!(entries["true_peak"]["value"], -2.6);
    assert_eq!(entries["true_peak_per_event"]["count"], 4);
    assert_eq!(entries["true_peak_per_event"]["max"], -2.6);
    assert_eq!(entries["true_peak_per_event"]["min"], -40.1);
}

#[test]
fn missing_sections_only_silence_their_engines() {
    let mut result = common::sample();
    result.filters = None;
    result.container = None;
    let sink = export(&result, &common::context(), &["txt", "html"]);
    let names: Vec<&str> = sink.file_names().collect();
    assert!(names.contains(&"interview_take3_media-summary.txt"));
    assert!(!names.iter().any(|n| n.contains("ebur128") || n.contains("container")));

    let json: Value = serde_json::from_slice(sink.get("interview_take3_report.json").unwrap()).unwrap();
    let titles: Vec<&str> = json["sections"].as_array().unwrap().iter().map(|s| s["title"].as_str().unwrap()).collect();
    assert!(titles.contains(&"Waveform"), "{titles:?}");
    assert!(!titles.contains(&"Interlace detection"), "{titles:?}");
}

#[test]
fn empty_result_writes_no_files() {
    let sink = export(&AnalysisResult::new("nothing.mov"), &ExportContext::default(), &["txt", "csv", "graphic"]);
    assert!(sink.is_empty(), "{:?}", sink.file_names().collect::<Vec<_>>());
}

#[test]
fn base_file_name_can_be_overridden() {
    let ctx = ExportContext::new(ExportConfig { base_file_name: Some("qc".into()), ..ExportConfig::default() });
    let sink = export(&common::sample(), &ctx, &["txt", "json"]);
    assert!(sink.get("qc_media-summary.txt").is_some());
    assert!(sink.get("qc.json").is_some());
}

#[test]
fn table_documents_are_consolidated_per_format() {
    let dir = tempfile::tempdir().unwrap();
    let registry = EngineRegistry::with_default_engines().unwrap();
    let ctx = common::context();
    let mut sink = DirectorySink::new(dir.path().join("out")).unwrap();
    let summary = Exporter::new(&registry, &ctx)
        .export(&common::sample(), &common::formats(&["xlsx", "sqlite", "xml", "json"]), &mut sink)
        .unwrap();
    assert_eq!(
        summary.files,
        ["interview_take3.xlsx", "interview_take3.sqlite", "interview_take3.xml", "interview_take3.json"]
    );

    let conn = rusqlite::Connection::open(dir.path().join("out/interview_take3.sqlite")).unwrap();
    let crops: i64 = conn.query_row("SELECT COUNT(*) FROM crop_detection", [], |r| r.get(0)).unwrap();
    assert_eq!(crops, 2);
    let version: String = conn
        .query_row("SELECT version FROM versions WHERE tool = 'ffmpeg'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(version, "6.1.1");

    let bytes = std::fs::read(dir.path().join("out/interview_take3.json")).unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json.get("media_summary").is_some(), "{json}");

    let xml = std::fs::read_to_string(dir.path().join("out/interview_take3.xml")).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<table name=\"Command lines\">"));
}
