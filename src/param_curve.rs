//! Traits for curves parametrized by a scalar.

use std::ops::Range;

use crate::{Point, Vec2};

/// A curve parametrized by a scalar in the range [0..1].
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    fn eval(&self, t: f64) -> Point;

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }

    /// The curve restricted to the given parameter range, reparametrized
    /// to [0..1].
    fn subsegment(&self, range: Range<f64>) -> Self;

    /// Subdivide into (roughly) halves.
    fn subdivide(&self) -> (Self, Self) {
        (self.subsegment(0.0..0.5), self.subsegment(0.5..1.0))
    }
}

/// A differentiable parametrized curve.
pub trait ParamCurveDeriv {
    /// The parametric curve obtained by taking the derivative of this one.
    type DerivResult: ParamCurve;

    /// The derivative of the curve.
    fn deriv(&self) -> Self::DerivResult;
}

/// A parametrized curve that reports its signed curvature.
pub trait ParamCurveCurvature: ParamCurveDeriv
where
    Self::DerivResult: ParamCurveDeriv,
{
    /// Curvature at parameter `t`.
    fn curvature(&self, t: f64) -> f64 {
        let deriv = self.deriv();
        let deriv2 = deriv.deriv();
        let d = deriv.eval(t).to_vec2();
        let d2 = deriv2.eval(t).to_vec2();
        // The signed magnitude of the cross product divided by the cube
        // of the speed.
        d.cross(d2) * d.hypot2().powf(-1.5)
    }
}

/// The unit tangent of a differentiable curve at parameter `t`.
///
/// Produces `NaN` components where the derivative vanishes.
pub(crate) fn tangent_of<C: ParamCurveDeriv>(curve: &C, t: f64) -> Vec2 {
    curve.deriv().eval(t).to_vec2().normalize()
}
