//! Cubic Bézier segments.

use std::ops::Range;

use crate::{ParamCurve, ParamCurveCurvature, ParamCurveDeriv, Point, QuadBez};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.deriv();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        let pm = self.eval(0.5);
        (
            CubicBez::new(
                self.p0,
                self.p0.midpoint(self.p1),
                ((self.p0.to_vec2() + self.p1.to_vec2() * 2.0 + self.p2.to_vec2()) * 0.25)
                    .to_point(),
                pm,
            ),
            CubicBez::new(
                pm,
                ((self.p1.to_vec2() + self.p2.to_vec2() * 2.0 + self.p3.to_vec2()) * 0.25)
                    .to_point(),
                self.p2.midpoint(self.p3),
                self.p3,
            ),
        )
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}

impl ParamCurveCurvature for CubicBez {}

#[cfg(test)]
mod tests {
    use super::CubicBez;
    use crate::{ParamCurve, ParamCurveCurvature, Point};

    fn assert_near(p0: Point, p1: Point) {
        assert!(p0.distance(p1) < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn subsegment_matches_eval() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, -1.0), (4.0, 1.0));
        let sub = c.subsegment(0.1..0.6);
        for i in 0..=10 {
            let t = (i as f64) * 0.1;
            assert_near(sub.eval(t), c.eval(0.1 + 0.5 * t));
        }
    }

    #[test]
    fn subdivide_continuity() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let (left, right) = c.subdivide();
        assert_near(left.end(), right.start());
        assert_near(left.eval(0.5), c.eval(0.25));
    }

    #[test]
    fn curvature_of_near_circle() {
        // A cubic approximating a quarter of the unit circle. The
        // positional error is tiny but the curvature wobbles a couple of
        // percent, worst at the endpoints.
        const A: f64 = 0.552284749831;
        let c = CubicBez::new((1.0, 0.0), (1.0, A), (A, 1.0), (0.0, 1.0));
        for i in 0..=4 {
            let t = (i as f64) * 0.25;
            assert!((c.curvature(t).abs() - 1.0).abs() < 0.03, "t={t}");
        }
    }
}
