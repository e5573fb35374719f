//! Decomposition of circular arcs into cubic Bézier segments.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::{Point, Vec2};

/// Decompose the arc of the circle at `center` with `radius` between
/// `start` and `end` (radians, `end < start` sweeps backwards) into
/// cubic Bézier segments within `tolerance`.
///
/// The callback receives each segment as its four control points, in
/// traversal order, and may return `false` to stop early; the return
/// value reports whether the decomposition ran to completion.
pub fn decompose_arc(
    center: Point,
    radius: f64,
    tolerance: f64,
    start: f64,
    end: f64,
    f: &mut impl FnMut([Point; 4]) -> bool,
) -> bool {
    let sweep = end - start;
    if sweep == 0.0 {
        return true;
    }
    // Number of subdivisions for a full turn, from the error model used
    // for circle flattening; clamped to at least four segments so a
    // quarter never spans more than 90°.
    let scaled_err = radius.abs() / tolerance;
    let n_err = (1.1163 * scaled_err).powf(1.0 / 6.0).max(3.999_999);
    let n = (n_err * sweep.abs() * (1.0 / (2.0 * PI))).ceil().max(1.0);
    let angle_step = sweep / n;
    let n = n as usize;
    let arm_len = (4.0 / 3.0) * (0.25 * angle_step).tan();

    let mut angle0 = start;
    let mut p0 = sample_circle(center, radius, angle0);
    for _ in 0..n {
        let angle1 = angle0 + angle_step;
        let p3 = sample_circle(center, radius, angle1);
        let p1 = p0 + arm_len * circle_arm(radius, angle0);
        let p2 = p3 - arm_len * circle_arm(radius, angle1);
        if !f([p0, p1, p2, p3]) {
            return false;
        }
        angle0 = angle1;
        p0 = p3;
    }
    true
}

#[inline]
fn sample_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + radius * Vec2::new(angle.cos(), angle.sin())
}

// Derivative direction of the circle parametrization, scaled by radius.
#[inline]
fn circle_arm(radius: f64, angle: f64) -> Vec2 {
    radius * Vec2::new((angle + FRAC_PI_2).cos(), (angle + FRAC_PI_2).sin())
}

#[cfg(test)]
mod tests {
    use super::decompose_arc;
    use crate::{CubicBez, ParamCurve, Point};
    use std::f64::consts::PI;

    fn max_radial_error(center: Point, radius: f64, start: f64, end: f64, tolerance: f64) -> f64 {
        let mut worst = 0.0f64;
        decompose_arc(center, radius, tolerance, start, end, &mut |pts| {
            let c = CubicBez::new(pts[0], pts[1], pts[2], pts[3]);
            for i in 0..=16 {
                let p = c.eval(i as f64 / 16.0);
                worst = worst.max((p.distance(center) - radius).abs());
            }
            true
        });
        worst
    }

    #[test]
    fn full_circle_accuracy() {
        for tolerance in [1.0, 0.1, 1e-3] {
            let err = max_radial_error(Point::new(1.0, 2.0), 10.0, 0.0, 2.0 * PI, tolerance);
            assert!(err <= tolerance, "err {err} > tolerance {tolerance}");
        }
    }

    #[test]
    fn quarter_and_reverse_sweep() {
        let err = max_radial_error(Point::ZERO, 1.0, 0.0, PI / 2.0, 1e-4);
        assert!(err <= 1e-4);
        let err = max_radial_error(Point::ZERO, 1.0, PI, 0.0, 1e-4);
        assert!(err <= 1e-4);
    }

    #[test]
    fn endpoints_exact() {
        let mut first = None;
        let mut last = None;
        decompose_arc(Point::ZERO, 2.0, 0.1, 0.0, PI, &mut |pts| {
            if first.is_none() {
                first = Some(pts[0]);
            }
            last = Some(pts[3]);
            true
        });
        assert!(first.unwrap().distance(Point::new(2.0, 0.0)) < 1e-12);
        assert!(last.unwrap().distance(Point::new(-2.0, 0.0)) < 1e-12);
    }

    #[test]
    fn early_exit() {
        let mut n = 0;
        let done = decompose_arc(Point::ZERO, 1.0, 1e-3, 0.0, 2.0 * PI, &mut |_| {
            n += 1;
            n < 2
        });
        assert!(!done);
        assert_eq!(n, 2);
    }
}
