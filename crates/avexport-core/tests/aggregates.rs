// File: crates/avexport-core/tests/aggregates.rs
// Purpose: Statistics aggregator and run-length reducer contracts over arbitrary streams.

use avexport_core::dedup::{CropEventKind, CropRect, RunLengthReducer};
use avexport_core::format::{NumberLocale, Unit};
use avexport_core::stats::StatisticsUnitValueReportEntry;
use avexport_core::summarize;
use proptest::prelude::*;

#[test]
fn median_of_even_stream_takes_the_upper_middle() {
    let s = summarize([4.0, 1.0, 3.0, 2.0]).unwrap();
    assert_eq!((s.min, s.max, s.median, s.average), (1.0, 4.0, 3.0, 2.5));
}

#[test]
fn all_nan_stream_is_the_empty_sentinel() {
    let values = [f64::NAN, f64::NAN];
    let entry = StatisticsUnitValueReportEntry::from_values("Blockiness", Unit::NONE, values, NumberLocale::English);
    assert!(entry.is_empty());
}

#[test]
fn crop_sequence_folds_into_two_events() {
    let full = CropRect::new(0, 0, 640, 480);
    let crop = CropRect::new(10, 10, 600, 440);
    let frames = std::iter::repeat(full)
        .take(50)
        .chain(std::iter::repeat(crop).take(50))
        .chain(std::iter::repeat(full).take(10))
        .enumerate()
        .map(|(i, r)| (i as u64, i as f64 / 25.0, r));
    let events = RunLengthReducer::new().with_baseline(full).reduce(frames);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].frame, 50);
    assert_eq!(CropEventKind::classify(events[0].value, Some((640, 480))).label(), "crop 600x440 at 10,10");
    assert_eq!(CropEventKind::classify(events[1].value, Some((640, 480))).label(), "back to full frame (no crop)");
}

proptest! {
    #[test]
    fn summary_is_ordered(values in prop::collection::vec(-1e9f64..1e9, 1..500)) {
        let s = summarize(values.iter().copied()).unwrap();
        prop_assert_eq!(s.count, values.len());
        prop_assert!(s.min <= s.median && s.median <= s.max);
        prop_assert!(s.min <= s.average && s.average <= s.max);
    }

    #[test]
    fn nan_samples_never_count(values in prop::collection::vec(prop::option::of(-1e3f64..1e3), 0..200)) {
        let finite = values.iter().flatten().count();
        let s = summarize(values.iter().map(|v| v.unwrap_or(f64::NAN)));
        prop_assert_eq!(s.map_or(0, |s| s.count), finite);
    }

    #[test]
    fn reducer_emits_distinct_consecutive_events(values in prop::collection::vec(0u8..4, 0..300), cap in 1usize..20) {
        let frames = values.iter().enumerate().map(|(i, &v)| (i as u64, i as f64, v));
        let events = RunLengthReducer::new().with_baseline(0u8).with_max_events(cap).reduce(frames);
        prop_assert!(events.len() <= values.len());
        prop_assert!(events.len() <= cap);
        prop_assert!(events.windows(2).all(|w| w[0].value != w[1].value));
        prop_assert!(events.windows(2).all(|w| w[0].frame < w[1].frame));
        if let Some(first) = events.first() {
            prop_assert!(first.value != 0);
        }
    }

    #[test]
    fn all_baseline_input_yields_nothing(len in 0usize..500) {
        let frames = (0..len).map(|i| (i as u64, i as f64, 7u32));
        prop_assert!(RunLengthReducer::new().with_baseline(7u32).reduce(frames).is_empty());
    }
}
