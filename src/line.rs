//! Lines.

use std::ops::Range;

use crate::{ParamCurve, ParamCurveCurvature, ParamCurveDeriv, Point};

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }

    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }
}

/// A trivial "curve" that is just a constant, arising as the derivative
/// of a line.
#[derive(Clone, Copy)]
pub struct ConstPoint(Point);

impl ParamCurve for ConstPoint {
    #[inline]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }

    fn subsegment(&self, _range: Range<f64>) -> ConstPoint {
        *self
    }
}

impl ParamCurveDeriv for ConstPoint {
    type DerivResult = ConstPoint;

    fn deriv(&self) -> ConstPoint {
        ConstPoint(Point::ZERO)
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint((self.p1 - self.p0).to_point())
    }
}

impl ParamCurveCurvature for Line {
    #[inline]
    fn curvature(&self, _t: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::Line;
    use crate::{ParamCurve, Point};

    #[test]
    fn eval_and_subsegment() {
        let l = Line::new((0.0, 0.0), (2.0, 2.0));
        assert_eq!(l.eval(0.5), Point::new(1.0, 1.0));
        let sub = l.subsegment(0.25..0.75);
        assert_eq!(sub.p0, Point::new(0.5, 0.5));
        assert_eq!(sub.p1, Point::new(1.5, 1.5));
    }
}
