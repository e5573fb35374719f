//! A tagged union of drawable curve primitives, and the operation
//! encoding used by standard contours.

use std::ops::Range;

use crate::param_curve::tangent_of;
use crate::{
    Conic, CubicBez, Line, ParamCurve, ParamCurveCurvature, Point, QuadBez, Vec2,
};

/// The element of a path, as reported by contour enumeration.
///
/// A valid contour starts with `MoveTo`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Draw a rational quadratic using the current location, the control
    /// point, the end point, and the control point's weight.
    ConicTo(Point, Point, f64),
    /// Close off the path.
    ClosePath,
}

/// The kind of a path operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verb {
    /// Start of a contour; one point.
    Move,
    /// Straight line; two points.
    Line,
    /// Quadratic Bézier; three points.
    Quad,
    /// Cubic Bézier; four points.
    Cubic,
    /// Rational quadratic; three points plus a weight.
    Conic,
    /// Closing line back to the contour start; two points.
    Close,
}

impl Verb {
    /// How many control points the operation references, including the
    /// shared start point.
    pub fn point_count(self) -> usize {
        match self {
            Verb::Move => 1,
            Verb::Line | Verb::Close => 2,
            Verb::Quad | Verb::Conic => 3,
            Verb::Cubic => 4,
        }
    }
}

/// One operation of a standard contour.
///
/// Control points live in the contour's shared point pool; `ix` is the
/// index of the operation's first point. Adjacent operations overlap by
/// one point: the first point of an operation is the last point of its
/// predecessor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOp {
    /// The operation kind.
    pub verb: Verb,
    /// Index of the first referenced point in the point pool.
    pub ix: usize,
    /// Rational weight; only meaningful for [`Verb::Conic`].
    pub weight: f64,
}

impl PathOp {
    /// Create a new operation.
    #[inline]
    pub fn new(verb: Verb, ix: usize) -> PathOp {
        PathOp {
            verb,
            ix,
            weight: 0.0,
        }
    }

    /// Create a new conic operation with the given weight.
    #[inline]
    pub fn conic(ix: usize, weight: f64) -> PathOp {
        PathOp {
            verb: Verb::Conic,
            ix,
            weight,
        }
    }

    /// Index of the operation's last referenced point.
    #[inline]
    pub fn last_ix(&self) -> usize {
        self.ix + self.verb.point_count() - 1
    }
}

/// Why the decomposer emitted a chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentReason {
    /// The chord was within tolerance, so subdivision stopped even though
    /// the curve still bends on this range.
    Short,
    /// The curve is (effectively) a straight line on this range.
    Straight,
}

/// A drawable curve primitive, the uniform view of a [`PathOp`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// A line segment, also the view of a close operation.
    Line(Line),
    /// A quadratic Bézier segment.
    Quad(QuadBez),
    /// A cubic Bézier segment.
    Cubic(CubicBez),
    /// A rational quadratic segment.
    Conic(Conic),
}

/// Subdivision limit for chord decomposition.
const MAX_SUBDIVISIONS: u32 = 16;

impl Curve {
    /// Materialize the curve for an operation of a standard contour.
    ///
    /// Panics for `Move` operations, which have no extent.
    pub fn from_op(points: &[Point], op: PathOp) -> Curve {
        let p = &points[op.ix..];
        match op.verb {
            Verb::Move => panic!("move has no curve"),
            Verb::Line | Verb::Close => Curve::Line(Line::new(p[0], p[1])),
            Verb::Quad => Curve::Quad(QuadBez::new(p[0], p[1], p[2])),
            Verb::Cubic => Curve::Cubic(CubicBez::new(p[0], p[1], p[2], p[3])),
            Verb::Conic => Curve::Conic(Conic::new(p[0], p[1], p[2], op.weight)),
        }
    }

    /// The start point.
    pub fn start(&self) -> Point {
        match self {
            Curve::Line(c) => c.p0,
            Curve::Quad(c) => c.p0,
            Curve::Cubic(c) => c.p0,
            Curve::Conic(c) => c.p0,
        }
    }

    /// The end point.
    pub fn end(&self) -> Point {
        match self {
            Curve::Line(c) => c.p1,
            Curve::Quad(c) => c.p2,
            Curve::Cubic(c) => c.p3,
            Curve::Conic(c) => c.p2,
        }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn eval(&self, t: f64) -> Point {
        match self {
            Curve::Line(c) => c.eval(t),
            Curve::Quad(c) => c.eval(t),
            Curve::Cubic(c) => c.eval(t),
            Curve::Conic(c) => c.eval(t),
        }
    }

    /// The unit tangent at parameter `t`.
    pub fn tangent(&self, t: f64) -> Vec2 {
        match self {
            Curve::Line(c) => (c.p1 - c.p0).normalize(),
            Curve::Quad(c) => tangent_of(c, t),
            Curve::Cubic(c) => tangent_of(c, t),
            Curve::Conic(c) => c.tangent(t),
        }
    }

    /// Signed curvature at parameter `t`.
    pub fn curvature(&self, t: f64) -> f64 {
        match self {
            Curve::Line(c) => c.curvature(t),
            Curve::Quad(c) => c.curvature(t),
            Curve::Cubic(c) => c.curvature(t),
            Curve::Conic(c) => c.curvature(t),
        }
    }

    /// The curve restricted to a parameter range.
    pub fn subsegment(&self, range: Range<f64>) -> Curve {
        match self {
            Curve::Line(c) => Curve::Line(c.subsegment(range)),
            Curve::Quad(c) => Curve::Quad(c.subsegment(range)),
            Curve::Cubic(c) => Curve::Cubic(c.subsegment(range)),
            Curve::Conic(c) => Curve::Conic(c.subsegment(range)),
        }
    }

    /// Subdivide into halves.
    pub fn subdivide(&self) -> (Curve, Curve) {
        match self {
            Curve::Line(c) => {
                let (a, b) = c.subdivide();
                (Curve::Line(a), Curve::Line(b))
            }
            Curve::Quad(c) => {
                let (a, b) = c.subdivide();
                (Curve::Quad(a), Curve::Quad(b))
            }
            Curve::Cubic(c) => {
                let (a, b) = c.subdivide();
                (Curve::Cubic(a), Curve::Cubic(b))
            }
            Curve::Conic(c) => {
                let (a, b) = c.subdivide();
                (Curve::Conic(a), Curve::Conic(b))
            }
        }
    }

    /// The same curve traversed in the opposite direction.
    pub fn reverse(&self) -> Curve {
        match *self {
            Curve::Line(c) => Curve::Line(Line::new(c.p1, c.p0)),
            Curve::Quad(c) => Curve::Quad(QuadBez::new(c.p2, c.p1, c.p0)),
            Curve::Cubic(c) => Curve::Cubic(CubicBez::new(c.p3, c.p2, c.p1, c.p0)),
            Curve::Conic(c) => Curve::Conic(Conic::new(c.p2, c.p1, c.p0, c.weight)),
        }
    }

    /// The path element drawing this curve from its start point.
    pub fn to_el(&self) -> PathEl {
        match *self {
            Curve::Line(c) => PathEl::LineTo(c.p1),
            Curve::Quad(c) => PathEl::QuadTo(c.p1, c.p2),
            Curve::Cubic(c) => PathEl::CurveTo(c.p1, c.p2, c.p3),
            Curve::Conic(c) => PathEl::ConicTo(c.p1, c.p2, c.weight),
        }
    }

    /// Whether the curve stays within `tolerance` of its chord.
    fn is_flat(&self, tolerance: f64) -> bool {
        let (a, b) = (self.start(), self.end());
        let within = |p: Point| dist_to_chord(p, a, b) <= tolerance;
        match self {
            Curve::Line(_) => true,
            Curve::Quad(c) => within(c.p1),
            Curve::Cubic(c) => within(c.p1) && within(c.p2),
            Curve::Conic(c) => within(c.p1),
        }
    }

    /// Decompose the curve into chords within `tolerance`.
    ///
    /// The callback receives the chord endpoints, the curve parameters
    /// they correspond to, and the reason subdivision stopped there.
    /// Chords are reported in order and cover the whole parameter range.
    pub fn decompose(
        &self,
        tolerance: f64,
        f: &mut impl FnMut(Point, Point, f64, f64, SegmentReason),
    ) {
        self.decompose_step(0.0, 1.0, 0, tolerance, f);
    }

    fn decompose_step(
        &self,
        t0: f64,
        t1: f64,
        depth: u32,
        tolerance: f64,
        f: &mut impl FnMut(Point, Point, f64, f64, SegmentReason),
    ) {
        if self.is_flat(tolerance) {
            f(self.start(), self.end(), t0, t1, SegmentReason::Straight);
        } else if depth == MAX_SUBDIVISIONS
            || (depth > 0 && self.start().distance(self.end()) <= tolerance)
        {
            // The chord termination only applies below the top level, so
            // an operation looping back to its start still subdivides.
            f(self.start(), self.end(), t0, t1, SegmentReason::Short);
        } else {
            let tm = 0.5 * (t0 + t1);
            let (left, right) = self.subdivide();
            left.decompose_step(t0, tm, depth + 1, tolerance, f);
            right.decompose_step(tm, t1, depth + 1, tolerance, f);
        }
    }
}

/// Distance from `p` to the segment between `a` and `b`, with the foot
/// of the perpendicular clamped to the segment.
fn dist_to_chord(p: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let d2 = d.hypot2();
    if d2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(d) / d2).clamp(0.0, 1.0);
    p.distance(a.lerp(b, t))
}

#[cfg(test)]
mod tests {
    use super::{Curve, PathOp, SegmentReason, Verb};
    use crate::{CubicBez, Point, QuadBez};

    #[test]
    fn op_point_counts() {
        assert_eq!(Verb::Move.point_count(), 1);
        assert_eq!(Verb::Close.point_count(), 2);
        assert_eq!(Verb::Conic.point_count(), 3);
        assert_eq!(Verb::Cubic.point_count(), 4);
        assert_eq!(PathOp::new(Verb::Quad, 3).last_ix(), 5);
    }

    #[test]
    fn from_op_shares_endpoint() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        let quad = Curve::from_op(&points, PathOp::new(Verb::Quad, 0));
        let line = Curve::from_op(&points, PathOp::new(Verb::Line, 2));
        assert_eq!(quad.end(), line.start());
    }

    #[test]
    fn decompose_chords_cover_curve() {
        let c = Curve::Cubic(CubicBez::new(
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
        ));
        let mut prev_end = c.start();
        let mut prev_t = 0.0;
        let mut total = 0.0;
        c.decompose(0.1, &mut |from, to, t0, t1, _| {
            assert_eq!(from, prev_end);
            assert_eq!(t0, prev_t);
            assert!(t1 > t0);
            total += from.distance(to);
            prev_end = to;
            prev_t = t1;
        });
        assert_eq!(prev_t, 1.0);
        assert_eq!(prev_end, c.end());
        // The flattened length converges on the true arc length from below.
        assert!(total > 18.0 && total < 20.0);
    }

    #[test]
    fn decompose_line_is_single_straight_chord() {
        let c = Curve::Line(crate::Line::new((0.0, 0.0), (5.0, 0.0)));
        let mut n = 0;
        c.decompose(0.5, &mut |from, to, t0, t1, reason| {
            n += 1;
            assert_eq!((from, to), (c.start(), c.end()));
            assert_eq!((t0, t1), (0.0, 1.0));
            assert_eq!(reason, SegmentReason::Straight);
        });
        assert_eq!(n, 1);
    }

    #[test]
    fn decompose_subdivides_curvy_quad() {
        let c = Curve::Quad(QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)));
        let mut chords = Vec::new();
        c.decompose(0.01, &mut |from, to, _, _, _| chords.push((from, to)));
        assert!(chords.len() > 4);
        // Every chord stays within tolerance of the curve at its midpoint
        // parameter, loosely checked via chord length versus curve span.
        for (from, to) in &chords {
            assert!(from.distance(*to) < 10.0);
        }
    }
}
