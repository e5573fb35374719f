//! Rational quadratic Bézier segments ("conics").

use std::ops::Range;

use crate::{ParamCurve, Point, Vec2};

/// A rational quadratic Bézier segment.
///
/// The middle control point carries a weight; with weight `√½` the
/// segment is an exact quarter of a circle, which is how rounded
/// rectangles encode their corners. A weight of 1 degenerates to an
/// ordinary quadratic.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conic {
    /// The start point.
    pub p0: Point,
    /// The weighted middle control point.
    pub p1: Point,
    /// The end point.
    pub p2: Point,
    /// The rational weight of `p1`.
    pub weight: f64,
}

/// A point in homogeneous coordinates, used for splitting.
#[derive(Clone, Copy)]
struct HomPoint {
    x: f64,
    y: f64,
    w: f64,
}

impl Conic {
    /// Create a new conic segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, weight: f64) -> Conic {
        Conic {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            weight,
        }
    }

    /// The denominator of the rational parametrization at `t`.
    ///
    /// Strictly positive on [0..1] for positive weights.
    #[inline]
    fn denom(&self, t: f64) -> f64 {
        let mt = 1.0 - t;
        mt * mt + 2.0 * self.weight * mt * t + t * t
    }

    // Numerator and denominator derivative building blocks. The
    // numerator is n0 + n1 t + n2 t², the denominator 1 + d1 t(1 - t).
    fn poly_coefs(&self) -> (Vec2, Vec2, Vec2, f64) {
        let p0 = self.p0.to_vec2();
        let wp1 = self.p1.to_vec2() * self.weight;
        let p2 = self.p2.to_vec2();
        let n1 = 2.0 * (wp1 - p0);
        let n2 = p0 - 2.0 * wp1 + p2;
        let d1 = 2.0 * (self.weight - 1.0);
        (p0, n1, n2, d1)
    }

    /// The (unnormalized) velocity vector at `t`.
    pub fn deriv_eval(&self, t: f64) -> Vec2 {
        let (n0, n1, n2, d1) = self.poly_coefs();
        let n = n0 + (n1 + n2 * t) * t;
        let dn = n1 + 2.0 * t * n2;
        let d = self.denom(t);
        let dd = d1 * (1.0 - 2.0 * t);
        (dn * d - n * dd) / (d * d)
    }

    /// The unit tangent at `t`.
    pub fn tangent(&self, t: f64) -> Vec2 {
        self.deriv_eval(t).normalize()
    }

    /// Signed curvature at `t`.
    pub fn curvature(&self, t: f64) -> f64 {
        let (n0, n1, n2, d1) = self.poly_coefs();
        let n = n0 + (n1 + n2 * t) * t;
        let dn = n1 + 2.0 * t * n2;
        let ddn = 2.0 * n2;
        let d = self.denom(t);
        let dd = d1 * (1.0 - 2.0 * t);
        let ddd = -2.0 * d1;
        // With u = n'd - nd', the curvature of n/d reduces to
        // d² · (u × u') / |u|³, where u' = n''d - nd''.
        let u = dn * d - n * dd;
        let du = ddn * d - n * ddd;
        d * d * u.cross(du) * u.hypot2().powf(-1.5)
    }

    #[inline]
    fn hom(p: Point, w: f64) -> HomPoint {
        HomPoint {
            x: p.x * w,
            y: p.y * w,
            w,
        }
    }

    // Polar form of the homogeneous quadratic.
    fn blossom(&self, u: f64, v: f64) -> HomPoint {
        let a0 = Conic::hom(self.p0, 1.0);
        let a1 = Conic::hom(self.p1, self.weight);
        let a2 = Conic::hom(self.p2, 1.0);
        let c0 = (1.0 - u) * (1.0 - v);
        let c1 = (1.0 - u) * v + u * (1.0 - v);
        let c2 = u * v;
        HomPoint {
            x: c0 * a0.x + c1 * a1.x + c2 * a2.x,
            y: c0 * a0.y + c1 * a1.y + c2 * a2.y,
            w: c0 * a0.w + c1 * a1.w + c2 * a2.w,
        }
    }
}

impl ParamCurve for Conic {
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let w2 = 2.0 * self.weight * mt * t;
        let num = self.p0.to_vec2() * (mt * mt) + self.p1.to_vec2() * w2
            + self.p2.to_vec2() * (t * t);
        (num / self.denom(t)).to_point()
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p2
    }

    /// Split in homogeneous coordinates, then reparametrize so the new
    /// endpoint weights are 1 again.
    fn subsegment(&self, range: Range<f64>) -> Conic {
        let (t0, t1) = (range.start, range.end);
        let c0 = self.blossom(t0, t0);
        let c1 = self.blossom(t0, t1);
        let c2 = self.blossom(t1, t1);
        let p0 = Point::new(c0.x / c0.w, c0.y / c0.w);
        let p2 = Point::new(c2.x / c2.w, c2.y / c2.w);
        let p1 = Point::new(c1.x / c1.w, c1.y / c1.w);
        let weight = c1.w / (c0.w * c2.w).sqrt();
        Conic {
            p0,
            p1,
            p2,
            weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Conic;
    use crate::{ParamCurve, Point, Vec2};
    use std::f64::consts::FRAC_1_SQRT_2;

    fn on_unit_circle(p: Point) {
        assert!(
            (p.to_vec2().hypot() - 1.0).abs() < 1e-12,
            "{p:?} not on unit circle"
        );
    }

    fn quarter() -> Conic {
        Conic::new((1.0, 0.0), (1.0, 1.0), (0.0, 1.0), FRAC_1_SQRT_2)
    }

    #[test]
    fn quarter_circle_eval() {
        let c = quarter();
        for i in 0..=16 {
            on_unit_circle(c.eval(i as f64 / 16.0));
        }
        assert!(c.eval(0.5).distance(Point::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)) < 1e-12);
    }

    #[test]
    fn quarter_circle_subsegment() {
        let c = quarter();
        let sub = c.subsegment(0.25..0.75);
        for i in 0..=16 {
            on_unit_circle(sub.eval(i as f64 / 16.0));
        }
        assert!(sub.start().distance(c.eval(0.25)) < 1e-12);
        assert!(sub.end().distance(c.eval(0.75)) < 1e-12);
    }

    #[test]
    fn quarter_circle_curvature() {
        let c = quarter();
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert!((c.curvature(t) - 1.0).abs() < 1e-12, "t={t}");
        }
    }

    #[test]
    fn tangents_at_endpoints() {
        let c = quarter();
        let t0 = c.tangent(0.0);
        let t1 = c.tangent(1.0);
        assert!((t0 - Vec2::new(0.0, 1.0)).hypot() < 1e-12);
        assert!((t1 - Vec2::new(-1.0, 0.0)).hypot() < 1e-12);
    }

    #[test]
    fn weight_one_is_quadratic() {
        let c = Conic::new((0.0, 0.0), (1.0, 2.0), (2.0, 0.0), 1.0);
        let q = crate::QuadBez::new((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert!(c.eval(t).distance(q.eval(t)) < 1e-12);
        }
    }
}
