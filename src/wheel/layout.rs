//! Angular layout of wheel slots.
//!
//! A wheel with `n` slots is split into `n` equal slices of a full turn. Slice
//! `i` covers the half-open range `[i/n, (i+1)/n)`. Fractions map onto the unit
//! circle with `(cos 2πf, sin 2πf)`, which in SVG's y-down space walks
//! clockwise from the marker at fraction 0.

use std::f64::consts::PI;

use serde::Serialize;

/// Half-width of the marker, as a fraction of a turn.
const MARKER_HALF_WIDTH: f64 = 0.01;
/// Where the marker tip sits along the x axis.
const MARKER_TIP_X: f64 = 0.85;

/// Start fraction of slot `index` on a wheel of `slot_count` slots.
///
/// Both the layout and the resolver use this, so they always agree on where a
/// slice begins.
pub fn boundary(index: usize, slot_count: usize) -> f64 {
    index as f64 / slot_count as f64
}

/// Point on a circle of `radius` at `fraction` of a full turn.
pub fn point_on_circle(fraction: f64, radius: f64) -> (f64, f64) {
    let angle = 2.0 * PI * fraction;
    (radius * angle.cos(), radius * angle.sin())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub mid: f64,
}

impl Slice {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// SVG arc flag: sectors wider than half a turn must take the long way round.
    pub fn large_arc(&self) -> bool {
        self.width() > 0.5
    }

    pub fn contains(&self, fraction: f64) -> bool {
        self.start <= fraction && fraction < self.end
    }

    pub fn start_point(&self) -> (f64, f64) {
        point_on_circle(self.start, 1.0)
    }

    pub fn end_point(&self) -> (f64, f64) {
        point_on_circle(self.end, 1.0)
    }

    pub fn mid_point(&self) -> (f64, f64) {
        point_on_circle(self.mid, 1.0)
    }

    /// Filled sector path: arc along the rim, then back to the centre.
    pub fn sector_path(&self) -> String {
        let (x0, y0) = self.start_point();
        let (x1, y1) = self.end_point();
        let arc = u8::from(self.large_arc());
        format!("M {x0} {y0} A 1 1 0 {arc} 1 {x1} {y1} L 0 0")
    }

    /// Straight path from the rim to the centre through the slice middle, for
    /// label text to follow.
    pub fn label_path(&self) -> String {
        let (xm, ym) = self.mid_point();
        format!("M {xm} {ym} L 0 0")
    }
}

/// Lays out `slot_count` equal slices in label order. Zero slots yield nothing
/// to draw.
pub fn layout(slot_count: usize) -> Vec<Slice> {
    (0..slot_count)
        .map(|index| {
            let start = boundary(index, slot_count);
            let end = boundary(index + 1, slot_count);
            Slice {
                index,
                start,
                end,
                mid: (index as f64 + 0.5) / slot_count as f64,
            }
        })
        .collect()
}

/// The fixed pointer drawn at fraction 0, outside the rotating group.
pub fn marker_path() -> String {
    let (x0, y0) = point_on_circle(-MARKER_HALF_WIDTH, 1.0);
    let (x1, y1) = point_on_circle(MARKER_HALF_WIDTH, 1.0);
    format!("M {x0} {y0} A 1 1 0 0 1 {x1} {y1} L {MARKER_TIP_X} 0")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_layout_partitions_full_turn() {
        for n in 1..=20 {
            let slices = layout(n);
            assert_eq!(slices.len(), n);
            assert_eq!(slices[0].start, 0.0);
            assert_eq!(slices[n - 1].end, 1.0);
            for pair in slices.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "gap or overlap at n={n}");
                assert!(pair[0].start < pair[1].start);
            }
        }
    }

    #[test]
    fn test_layout_zero_slots_is_empty() {
        assert!(layout(0).is_empty());
    }

    #[test]
    fn test_layout_is_pure() {
        assert_eq!(layout(7), layout(7));
    }

    #[test]
    fn test_large_arc_only_for_single_slot() {
        assert!(layout(1)[0].large_arc());
        assert!(layout(2).iter().all(|s| !s.large_arc()));
        assert!(layout(5).iter().all(|s| !s.large_arc()));
    }

    #[test]
    fn test_point_on_circle_quarter_turns() {
        let (x, y) = point_on_circle(0.25, 1.0);
        assert!(x.abs() < EPSILON);
        assert!((y - 1.0).abs() < EPSILON);

        let (x, y) = point_on_circle(0.5, 2.0);
        assert!((x + 2.0).abs() < EPSILON);
        assert!(y.abs() < EPSILON);
    }

    #[test]
    fn test_mid_is_centre_of_slice() {
        for slice in layout(4) {
            assert!((slice.mid - (slice.start + slice.end) / 2.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_sector_path_uses_arc_flag() {
        let single = layout(1)[0].sector_path();
        assert!(single.starts_with("M 1 0 A 1 1 0 1 1"));
        assert!(single.ends_with("L 0 0"));

        let half = layout(2)[0].sector_path();
        assert!(half.contains("A 1 1 0 0 1"));
    }

    #[test]
    fn test_marker_path_points_at_zero() {
        let path = marker_path();
        assert!(path.starts_with("M "));
        assert!(path.ends_with("L 0.85 0"));
    }
}
