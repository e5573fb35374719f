//! Quadratic Bézier segments.

use std::ops::Range;

use crate::{Line, ParamCurve, ParamCurveCurvature, ParamCurveDeriv, Point};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct QuadBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p2
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let p1 = p0 + (self.p1 - self.p0).lerp(self.p2 - self.p1, t0) * (t1 - t0);
        QuadBez { p0, p1, p2 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (QuadBez, QuadBez) {
        let pm = self.eval(0.5);
        (
            QuadBez::new(self.p0, self.p0.midpoint(self.p1), pm),
            QuadBez::new(pm, self.p1.midpoint(self.p2), self.p2),
        )
    }
}

impl ParamCurveDeriv for QuadBez {
    type DerivResult = Line;

    #[inline]
    fn deriv(&self) -> Line {
        Line::new(
            (2.0 * (self.p1 - self.p0)).to_point(),
            (2.0 * (self.p2 - self.p1)).to_point(),
        )
    }
}

impl ParamCurveCurvature for QuadBez {}

#[cfg(test)]
mod tests {
    use super::QuadBez;
    use crate::{ParamCurve, Point};

    fn assert_near(p0: Point, p1: Point) {
        assert!(p0.distance(p1) < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn eval() {
        let q = QuadBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 0.0));
        assert_near(q.eval(0.0), Point::new(0.0, 0.0));
        assert_near(q.eval(0.5), Point::new(1.0, 0.5));
        assert_near(q.eval(1.0), Point::new(2.0, 0.0));
    }

    #[test]
    fn subsegment_matches_eval() {
        let q = QuadBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8));
        let sub = q.subsegment(0.2..0.8);
        for i in 0..=10 {
            let t = (i as f64) * 0.1;
            assert_near(sub.eval(t), q.eval(0.2 + 0.6 * t));
        }
    }

    #[test]
    fn subdivide_agrees() {
        let q = QuadBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 1.0));
        let (left, right) = q.subdivide();
        assert_near(left.eval(1.0), right.eval(0.0));
        assert_near(left.eval(0.5), q.eval(0.25));
        assert_near(right.eval(0.5), q.eval(0.75));
    }
}
