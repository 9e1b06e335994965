// File: crates/avexport-chart/src/geometry.rs
// Summary: Plot margins, plot rectangle math and value clamping for pixel placement.

/// Room kept around the plot for tick labels (left, bottom), the axis label
/// and legend (top).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 24, 40, 48)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    /// Plot area of a `width` x `height` surface once `insets` are removed.
    /// Degenerate insets still leave a 1px plot.
    pub fn plot_area(width: i32, height: i32, insets: &Insets) -> Self {
        let left = insets.left as i32;
        let top = insets.top as i32;
        let right = (width - insets.right as i32).max(left + 1);
        let bottom = (height - insets.bottom as i32).max(top + 1);
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}

/// Clamp a sample into `[lo, hi]`; infinities land on the matching bound.
#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_removes_insets() {
        let r = RectI32::plot_area(200, 100, &Insets::new(10, 20, 5, 15));
        assert_eq!(r, RectI32::from_ltrb(10, 5, 180, 85));
        assert_eq!(r.width(), 170);
        assert_eq!(r.height(), 80);
    }

    #[test]
    fn clamp_handles_infinities() {
        assert_eq!(clamp(f64::INFINITY, -1.0, 1.0), 1.0);
        assert_eq!(clamp(f64::NEG_INFINITY, -1.0, 1.0), -1.0);
    }
}
