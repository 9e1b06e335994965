// File: crates/avexport-core/src/dedup.rs
// Summary: Run-length reduction of per-frame detector values into change events; crop classification.

/// A value first observed at `frame` / `pts_time` and held until the next event.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeEvent<T> {
    pub frame: u64,
    pub pts_time: f64,
    pub value: T,
}

/// Folds a frame-ordered stream into change events.
///
/// A leading run equal to `baseline` is skipped, then an event is emitted each
/// time the value differs from the last emitted one. Consumption stops as soon
/// as `max_events` events exist.
#[derive(Clone, Debug)]
pub struct RunLengthReducer<T> {
    baseline: Option<T>,
    max_events: Option<usize>,
}

impl<T> Default for RunLengthReducer<T> {
    fn default() -> Self {
        Self { baseline: None, max_events: None }
    }
}

impl<T: PartialEq> RunLengthReducer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baseline(mut self, baseline: T) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = Some(max);
        self
    }

    pub fn reduce<I>(&self, frames: I) -> Vec<ChangeEvent<T>>
    where
        I: IntoIterator<Item = (u64, f64, T)>,
    {
        let cap = self.max_events.unwrap_or(usize::MAX);
        let mut events: Vec<ChangeEvent<T>> = Vec::new();
        if cap == 0 {
            return events;
        }
        let mut leading = true;
        for (frame, pts_time, value) in frames {
            if leading && self.baseline.as_ref() == Some(&value) {
                continue;
            }
            leading = false;
            if events.last().map_or(true, |last| last.value != value) {
                events.push(ChangeEvent { frame, pts_time, value });
                if events.len() >= cap {
                    break;
                }
            }
        }
        events
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl CropRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn full_frame(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, w: width as i32, h: height as i32 }
    }
}

/// How a crop event is presented; the special kinds hide the raw rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropEventKind {
    BlackFrame,
    FullFrame,
    Crop(CropRect),
}

impl CropEventKind {
    /// Classify against the source resolution, when known.
    pub fn classify(rect: CropRect, source: Option<(u32, u32)>) -> Self {
        if rect.w < 0 || rect.h < 0 {
            return CropEventKind::BlackFrame;
        }
        match source {
            Some((w, h)) if rect.w == w as i32 && rect.h == h as i32 => CropEventKind::FullFrame,
            _ => CropEventKind::Crop(rect),
        }
    }

    pub fn label(&self) -> String {
        match self {
            CropEventKind::BlackFrame => "black frame".to_string(),
            CropEventKind::FullFrame => "back to full frame (no crop)".to_string(),
            CropEventKind::Crop(r) => format!("crop {}x{} at {},{}", r.w, r.h, r.x, r.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(runs: &[(i32, usize)]) -> Vec<(u64, f64, i32)> {
        let mut out = Vec::new();
        for &(v, n) in runs {
            for _ in 0..n {
                let f = out.len() as u64;
                out.push((f, f as f64 / 25.0, v));
            }
        }
        out
    }

    #[test]
    fn leading_baseline_is_skipped_once() {
        let r = RunLengthReducer::new().with_baseline(0);
        let ev = r.reduce(frames(&[(0, 5), (1, 3), (0, 2)]));
        assert_eq!(ev.iter().map(|e| e.value).collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(ev[0].frame, 5);
    }

    #[test]
    fn all_baseline_yields_nothing() {
        let r = RunLengthReducer::new().with_baseline(7);
        assert!(r.reduce(frames(&[(7, 100)])).is_empty());
    }

    #[test]
    fn cap_truncates_in_order() {
        let r = RunLengthReducer::new().with_max_events(2);
        let ev = r.reduce(frames(&[(1, 1), (2, 1), (3, 1), (4, 1)]));
        assert_eq!(ev.iter().map(|e| e.value).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn crop_classification() {
        let src = Some((640, 480));
        assert_eq!(CropEventKind::classify(CropRect::new(0, 0, -1, 480), src), CropEventKind::BlackFrame);
        assert_eq!(CropEventKind::classify(CropRect::full_frame(640, 480), src), CropEventKind::FullFrame);
        let c = CropRect::new(10, 10, 600, 440);
        assert_eq!(CropEventKind::classify(c, src), CropEventKind::Crop(c));
        let full = CropRect::full_frame(640, 480);
        assert_eq!(CropEventKind::classify(full, None), CropEventKind::Crop(full));
    }
}
