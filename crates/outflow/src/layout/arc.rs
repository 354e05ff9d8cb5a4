//! Sampled circular arcs for bending arrows.

use std::f32::consts::FRAC_PI_4;

use outflow_core::geometry::Point;

/// `sin(pi/4)`, the horizontal reach per unit radius of a 45 degree bend.
pub const SIN_FRAC_PI_4: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Sweep of a secondary input bend.
pub const SECONDARY_SWEEP: f32 = FRAC_PI_4;

/// Samples `samples` points on `center + radius (cos t, sin t)` for `t` from
/// `start` to `start + sweep`, both ends included.
pub fn sample_arc(center: Point, radius: f32, start: f32, sweep: f32, samples: usize) -> Vec<Point> {
    let steps = samples.saturating_sub(1).max(1) as f32;
    (0..samples)
        .map(|i| {
            let t = start + sweep * (i as f32 / steps);
            let (sin, cos) = t.sin_cos();
            Point::new(center.x() + radius * cos, center.y() + radius * sin)
        })
        .collect()
}

/// Inner and outer radii bounding one arrow's thickness through a bend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendRadii {
    inner: f32,
    outer: f32,
}

impl BendRadii {
    /// Radii for a flow of thickness `width`; the inner radius never drops
    /// below `min_inner` so thin flows still curve visibly.
    pub fn for_width(width: f32, min_inner: f32) -> Self {
        let inner = min_inner.max(width / 2.0);
        Self {
            inner,
            outer: inner + width,
        }
    }

    pub fn inner(&self) -> f32 {
        self.inner
    }

    pub fn outer(&self) -> f32 {
        self.outer
    }
}

/// Inner and outer arc samples about one centre.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPair {
    inner: Vec<Point>,
    outer: Vec<Point>,
}

impl ArcPair {
    pub fn new(center: Point, radii: BendRadii, start: f32, sweep: f32, samples: usize) -> Self {
        Self {
            inner: sample_arc(center, radii.inner(), start, sweep, samples),
            outer: sample_arc(center, radii.outer(), start, sweep, samples),
        }
    }

    pub fn inner(&self) -> &[Point] {
        &self.inner
    }

    pub fn outer(&self) -> &[Point] {
        &self.outer
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_sample_arc_endpoints() {
        let points = sample_arc(Point::new(1.0, 1.0), 2.0, -FRAC_PI_2, FRAC_PI_2, 50);
        assert_eq!(points.len(), 50);
        assert_approx_eq!(f32, points[0].x(), 1.0, epsilon = 1e-6);
        assert_approx_eq!(f32, points[0].y(), -1.0, epsilon = 1e-6);
        assert_approx_eq!(f32, points[49].x(), 3.0, epsilon = 1e-6);
        assert_approx_eq!(f32, points[49].y(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sample_arc_stays_on_circle() {
        let center = Point::new(-0.5, 0.25);
        for point in sample_arc(center, 0.3, 0.0, FRAC_PI_4, 10) {
            assert_approx_eq!(f32, point.distance(center), 0.3, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sample_arc_single_point() {
        let points = sample_arc(Point::default(), 1.0, 0.0, FRAC_PI_2, 1);
        assert_eq!(points, vec![Point::new(1.0, 0.0)]);
    }

    #[test]
    fn test_bend_radii_minimum() {
        let thin = BendRadii::for_width(0.02, 0.07);
        assert_approx_eq!(f32, thin.inner(), 0.07);
        assert_approx_eq!(f32, thin.outer(), 0.09);

        let thick = BendRadii::for_width(0.4, 0.07);
        assert_approx_eq!(f32, thick.inner(), 0.2);
        assert_approx_eq!(f32, thick.outer(), 0.6);
    }

    #[test]
    fn test_arc_pair_radial_gap_is_width() {
        let radii = BendRadii::for_width(0.1, 0.07);
        let pair = ArcPair::new(Point::default(), radii, 0.0, FRAC_PI_2, 5);
        for (inner, outer) in pair.inner().iter().zip(pair.outer()) {
            assert_approx_eq!(f32, inner.distance(*outer), 0.1, epsilon = 1e-6);
        }
    }
}
