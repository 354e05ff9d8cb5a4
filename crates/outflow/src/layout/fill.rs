//! Band-split fill polygons.
//!
//! A loss (or the output) drains a horizontal slice `[floor, top]` of the
//! diagram body. The slice may cross several input bands; it is painted as
//! one polygon per band half it touches, so each colour stays inside the
//! territory of the input it came from. The walk over the bands is an
//! explicit state machine:
//!
//! ```text
//! Scanning(k, edge) ── k past end ──────────────────────────► Done
//!        │  ── edge <= lim_bot[k] ──► Scanning(k+1, edge)
//!        │  ── floor >= lim_bot[k] ─► EmittingSplit(k, edge) ──► Done
//!        └─ otherwise ──────────────► EmittingRemainder(k, edge)
//!                                        └─► Scanning(k+1, lim_bot[k])
//! ```
//!
//! Within one band, a slice lying entirely in one half of the arrowhead
//! notch is one quadrilateral; a slice crossing the notch midpoint is split
//! there. `edge == comp` counts as the lower half and `floor == comp` as the
//! upper half.

use log::trace;

use outflow_core::geometry::Point;

use crate::scene::Band;

/// Comparison tolerance in diagram units.
pub const TOLERANCE: f32 = 1e-6;

/// State of the band walk. `edge` is the top of the part of the slice that
/// is still unpainted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillState {
    Scanning { band: usize, edge: f32 },
    EmittingSplit { band: usize, edge: f32 },
    EmittingRemainder { band: usize, edge: f32 },
    Done,
}

/// One emitted polygon and the band it lies in.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSlice {
    band: usize,
    points: Vec<Point>,
}

impl BandSlice {
    pub fn band(&self) -> usize {
        self.band
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// Fills the slice `[floor, top]` from each band's notched left boundary
/// to `right`.
#[derive(Debug, Clone, Copy)]
pub struct BandFillEngine<'a> {
    bands: &'a [Band],
    depth: f32,
    floor: f32,
    right: f32,
}

impl<'a> BandFillEngine<'a> {
    pub fn new(bands: &'a [Band], depth: f32, floor: f32, right: f32) -> Self {
        Self {
            bands,
            depth,
            floor,
            right,
        }
    }

    pub fn start(&self, top: f32) -> FillState {
        FillState::Scanning { band: 0, edge: top }
    }

    /// Runs the walk to completion.
    pub fn fill(&self, top: f32) -> Vec<BandSlice> {
        let mut slices = Vec::new();
        let mut state = self.start(top);
        while state != FillState::Done {
            state = self.step(state, &mut slices);
        }
        slices
    }

    /// Advances one transition, appending any emitted polygons to `out`.
    pub fn step(&self, state: FillState, out: &mut Vec<BandSlice>) -> FillState {
        trace!(state:?; "Band fill step");
        match state {
            FillState::Scanning { band, edge } => {
                let Some(current) = self.bands.get(band) else {
                    return FillState::Done;
                };
                let lower = current.lower();
                if edge <= lower + TOLERANCE {
                    FillState::Scanning {
                        band: band + 1,
                        edge,
                    }
                } else if self.floor >= lower - TOLERANCE {
                    FillState::EmittingSplit { band, edge }
                } else {
                    FillState::EmittingRemainder { band, edge }
                }
            }
            FillState::EmittingSplit { band, edge } => {
                self.emit(band, self.floor, edge, out);
                FillState::Done
            }
            FillState::EmittingRemainder { band, edge } => {
                let lower = self.bands[band].lower();
                self.emit(band, lower, edge, out);
                FillState::Scanning {
                    band: band + 1,
                    edge: lower,
                }
            }
            FillState::Done => FillState::Done,
        }
    }

    /// Emits `[lo, hi]` within band `k`, split at the notch midpoint when
    /// the interval crosses it.
    fn emit(&self, k: usize, lo: f32, hi: f32, out: &mut Vec<BandSlice>) {
        if hi - lo <= TOLERANCE {
            return;
        }
        let band = &self.bands[k];
        let comp = band.comp();
        let mut push = |lo: f32, hi: f32| {
            out.push(BandSlice {
                band: k,
                points: half_quad(band, lo, hi, self.right, self.depth),
            });
        };

        if hi <= comp + TOLERANCE || lo >= comp - TOLERANCE {
            push(lo, hi);
        } else {
            push(comp, hi);
            push(lo, comp);
        }
    }
}

/// Quadrilateral between the notched boundary and `right` for an interval
/// within one half of `band`.
fn half_quad(band: &Band, lo: f32, hi: f32, right: f32, depth: f32) -> Vec<Point> {
    vec![
        Point::new(band.boundary_x(hi, depth), hi),
        Point::new(right, hi),
        Point::new(right, lo),
        Point::new(band.boundary_x(lo, depth), lo),
    ]
}

/// One polygon for `[lo, hi]` within a single band, following the notch
/// through its deepest point when the interval contains it.
pub fn band_outline(band: &Band, lo: f32, hi: f32, right: f32, depth: f32) -> Vec<Point> {
    let mut points = half_quad(band, lo, hi, right, depth);
    let comp = band.comp();
    if lo < comp - TOLERANCE && hi > comp + TOLERANCE {
        points.push(Point::new(band.boundary_x(comp, depth), comp));
    }
    points
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use outflow_core::geometry::polygon_area;

    use super::*;

    const DEPTH: f32 = 0.06;

    fn y_range(slice: &BandSlice) -> (f32, f32) {
        let ys = slice.points.iter().map(|p| p.y());
        let lo = ys.clone().fold(f32::INFINITY, f32::min);
        let hi = ys.fold(f32::NEG_INFINITY, f32::max);
        (lo, hi)
    }

    fn two_bands() -> Vec<Band> {
        vec![Band::new(0.7, 0.0, 0.0, true), Band::new(0.0, -0.3, 0.4, true)]
    }

    #[test]
    fn test_slice_in_upper_half_is_one_polygon() {
        let bands = [Band::new(1.0, 0.0, 0.0, true)];
        let slices = BandFillEngine::new(&bands, DEPTH, 0.8, 0.5).fill(1.0);
        assert_eq!(slices.len(), 1);
        let (lo, hi) = y_range(&slices[0]);
        assert_approx_eq!(f32, lo, 0.8);
        assert_approx_eq!(f32, hi, 1.0);
    }

    #[test]
    fn test_slice_straddling_midpoint_is_split() {
        let bands = [Band::new(1.0, 0.0, 0.0, true)];
        let slices = BandFillEngine::new(&bands, DEPTH, 0.4, 0.5).fill(0.6);
        assert_eq!(slices.len(), 2);
        assert_eq!(y_range(&slices[0]), (0.5, 0.6));
        assert_eq!(y_range(&slices[1]), (0.4, 0.5));
        // Both halves meet at the deepest point of the notch
        assert_approx_eq!(f32, slices[0].points[3].x(), DEPTH);
        assert_approx_eq!(f32, slices[1].points[0].x(), DEPTH);
    }

    #[test]
    fn test_edge_at_midpoint_counts_as_lower_half() {
        let bands = [Band::new(1.0, 0.0, 0.0, true)];
        let slices = BandFillEngine::new(&bands, DEPTH, 0.3, 0.5).fill(0.5);
        assert_eq!(slices.len(), 1);
    }

    #[test]
    fn test_floor_at_midpoint_counts_as_upper_half() {
        let bands = [Band::new(1.0, 0.0, 0.0, true)];
        let slices = BandFillEngine::new(&bands, DEPTH, 0.5, 0.5).fill(0.9);
        assert_eq!(slices.len(), 1);
    }

    #[test]
    fn test_slice_crossing_into_next_band() {
        let bands = two_bands();
        let slices = BandFillEngine::new(&bands, DEPTH, -0.1, 0.8).fill(0.2);

        let summary: Vec<(usize, (f32, f32))> =
            slices.iter().map(|s| (s.band(), y_range(s))).collect();
        assert_eq!(summary, vec![(0, (0.0, 0.2)), (1, (-0.1, 0.0))]);
        assert_approx_eq!(f32, slices[1].points[0].x(), 0.4);
    }

    #[test]
    fn test_consumed_band_is_skipped() {
        let bands = two_bands();
        let slices = BandFillEngine::new(&bands, DEPTH, -0.25, 0.8).fill(-0.2);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].band(), 1);
    }

    #[test]
    fn test_zero_height_band_is_skipped() {
        let bands = [
            Band::new(0.6, 0.0, 0.0, true),
            Band::new(0.0, 0.0, 0.3, false),
            Band::new(0.0, -0.4, 0.5, true),
        ];
        let slices = BandFillEngine::new(&bands, DEPTH, -0.4, 1.0).fill(0.0);
        assert!(slices.iter().all(|slice| slice.band() == 2));
        assert_eq!(slices.len(), 2);
    }

    #[test]
    fn test_transition_sequence() {
        let bands = two_bands();
        let engine = BandFillEngine::new(&bands, DEPTH, -0.1, 0.8);
        let mut out = Vec::new();

        let mut state = engine.start(0.2);
        let mut trace = vec![state];
        while state != FillState::Done {
            state = engine.step(state, &mut out);
            trace.push(state);
        }

        assert_eq!(
            trace,
            vec![
                FillState::Scanning { band: 0, edge: 0.2 },
                FillState::EmittingRemainder { band: 0, edge: 0.2 },
                FillState::Scanning { band: 1, edge: 0.0 },
                FillState::EmittingSplit { band: 1, edge: 0.0 },
                FillState::Done,
            ]
        );
    }

    #[test]
    fn test_scanning_past_end_is_done() {
        let bands = two_bands();
        let engine = BandFillEngine::new(&bands, DEPTH, -0.5, 0.8);
        let mut out = Vec::new();
        let state = engine.step(FillState::Scanning { band: 2, edge: -0.3 }, &mut out);
        assert_eq!(state, FillState::Done);
        assert!(out.is_empty());
    }

    #[test]
    fn test_full_band_area() {
        let bands = [Band::new(0.7, 0.0, 0.0, true)];
        let slices = BandFillEngine::new(&bands, DEPTH, 0.0, 1.0).fill(0.7);
        let area: f32 = slices.iter().map(|s| polygon_area(&s.points)).sum();
        // Rectangle minus the triangular notch
        assert_approx_eq!(f32, area, 0.7 - DEPTH * 0.7 / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_band_outline_includes_notch_vertex() {
        let band = Band::new(1.0, 0.0, 0.0, true);
        let straddling = band_outline(&band, 0.2, 0.9, 1.0, DEPTH);
        assert_eq!(straddling.len(), 5);
        assert_eq!(straddling[4], Point::new(DEPTH, 0.5));

        let upper = band_outline(&band, 0.6, 0.9, 1.0, DEPTH);
        assert_eq!(upper.len(), 4);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use outflow_core::geometry::polygon_area;

    use super::*;

    const DEPTH: f32 = 0.06;

    /// Stacks bands of the given heights downward from `heights[0]`, with
    /// band lefts moving rightward.
    fn stack(heights: &[f32]) -> Vec<Band> {
        let mut upper = heights[0];
        let mut bands = Vec::new();
        for (k, height) in heights.iter().enumerate() {
            let lower = if k == 0 { 0.0 } else { upper - height };
            bands.push(Band::new(upper, lower, k as f32 * 0.3, true));
            upper = lower;
        }
        bands
    }

    /// Emitted polygons tile `[floor, top]` exactly, without overlap.
    fn check_tiling(heights: Vec<f32>, a: f32, b: f32) -> Result<(), TestCaseError> {
        let bands = stack(&heights);
        let bottom = bands.last().map(Band::lower).unwrap_or(0.0);
        let span = bands[0].upper() - bottom;
        let (floor, top) = (bottom + span * a.min(b), bottom + span * a.max(b));
        prop_assume!(top - floor > 1e-3);

        let right = bands.len() as f32 * 0.3 + 0.5;
        let slices = BandFillEngine::new(&bands, DEPTH, floor, right).fill(top);

        let mut ranges: Vec<(f32, f32)> = slices
            .iter()
            .map(|slice| {
                let ys: Vec<f32> = slice.points.iter().map(|p| p.y()).collect();
                (
                    ys.iter().copied().fold(f32::INFINITY, f32::min),
                    ys.iter().copied().fold(f32::NEG_INFINITY, f32::max),
                )
            })
            .collect();
        ranges.sort_by(|x, y| y.1.total_cmp(&x.1));

        prop_assert!(!ranges.is_empty());
        prop_assert!(approx_eq!(f32, ranges[0].1, top, epsilon = 1e-4));
        prop_assert!(approx_eq!(f32, ranges[ranges.len() - 1].0, floor, epsilon = 1e-4));
        for pair in ranges.windows(2) {
            prop_assert!(approx_eq!(f32, pair[0].0, pair[1].1, epsilon = 1e-4));
        }

        let area: f32 = slices.iter().map(|s| polygon_area(&s.points)).sum();
        let height = top - floor;
        let max_left = bands.last().map(Band::left).unwrap_or(0.0);
        prop_assert!(area <= (right - 0.0) * height + 1e-4);
        prop_assert!(area >= (right - max_left - DEPTH) * height - 1e-4);
        Ok(())
    }

    proptest! {
        #[test]
        fn tiling(
            heights in prop::collection::vec(0.05f32..0.6, 1..5),
            a in 0.0f32..1.0,
            b in 0.0f32..1.0,
        ) {
            check_tiling(heights, a, b)?;
        }
    }
}
