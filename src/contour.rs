//! Contours: the connected pieces of a path.
//!
//! A [`Contour`] is one of four variants sharing a common contract:
//! the general [`StandardContour`] holding arbitrary curve operations,
//! and three closed-form shapes (rectangle, rounded rectangle, circular
//! arc) that admit exact measurement without flattening.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::arc::decompose_arc;
use crate::builder::PathBuilder;
use crate::{
    Corner, Curve, PathEl, PathOp, Point, Rect, RoundedRect, Vec2, Verb,
};

/// Properties of a contour, as a small bitset.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathFlags(u8);

impl PathFlags {
    /// No flags set.
    pub const NONE: PathFlags = PathFlags(0);
    /// The contour contains only straight lines.
    pub const FLAT: PathFlags = PathFlags(1);
    /// The contour ends where it started and closes explicitly.
    pub const CLOSED: PathFlags = PathFlags(2);

    /// Whether all flags in `other` are set in `self`.
    #[inline]
    pub fn contains(self, other: PathFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PathFlags {
    type Output = PathFlags;

    #[inline]
    fn bitor(self, rhs: PathFlags) -> PathFlags {
        PathFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for PathFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: PathFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PathFlags {
    type Output = PathFlags;

    #[inline]
    fn bitand(self, rhs: PathFlags) -> PathFlags {
        PathFlags(self.0 & rhs.0)
    }
}

impl BitAndAssign for PathFlags {
    #[inline]
    fn bitand_assign(&mut self, rhs: PathFlags) {
        self.0 &= rhs.0;
    }
}

impl Not for PathFlags {
    type Output = PathFlags;

    #[inline]
    fn not(self) -> PathFlags {
        PathFlags(!self.0)
    }
}

/// Selects which of the two tangents incident to a seam is reported.
///
/// At a join between two operations (or at the closing point of a
/// closed contour) the incoming and outgoing tangents differ; `Start`
/// selects the incoming one, `End` the outgoing one. Away from seams
/// the two agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Report the tangent of the operation ending at the queried point.
    Start,
    /// Report the tangent of the operation starting at the queried point.
    End,
}

/// A single connected piece of a path.
#[derive(Clone, Debug)]
pub enum Contour {
    /// A general contour holding a sequence of curve operations.
    Standard(StandardContour),
    /// An axis-aligned rectangle, possibly with negative dimensions.
    Rect(RectContour),
    /// A rectangle with rounded corners.
    RoundedRect(RoundedRectContour),
    /// A circle, or an arc of one.
    Circle(CircleContour),
}

impl Contour {
    /// A rectangular contour. Negative sizes traverse the outline in the
    /// opposite direction.
    pub fn rect(rect: Rect) -> Contour {
        Contour::Rect(RectContour::new(rect))
    }

    /// A rounded-rectangle contour, traversed clockwise (in screen
    /// coordinates).
    pub fn rounded_rect(rect: RoundedRect) -> Contour {
        Contour::RoundedRect(RoundedRectContour::new(rect))
    }

    /// A circular-arc contour. Angles are in degrees; the sweep must not
    /// exceed a full turn.
    pub fn circle(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Contour {
        Contour::Circle(CircleContour::new(center, radius, start_angle, end_angle))
    }

    /// The contour's flags.
    pub fn flags(&self) -> PathFlags {
        match self {
            Contour::Standard(c) => c.flags(),
            Contour::Rect(_) => PathFlags::FLAT | PathFlags::CLOSED,
            Contour::RoundedRect(_) => PathFlags::CLOSED,
            Contour::Circle(c) => c.flags(),
        }
    }

    /// The smallest axis-aligned rectangle containing the contour, or
    /// `None` if the contour is degenerate.
    ///
    /// For standard contours this is the bound of the control points, and
    /// contours without positive extent in both axes (a single point, an
    /// axis-aligned line) report `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Contour::Standard(c) => c.bounds(),
            Contour::Rect(c) => Some(c.rect.abs()),
            Contour::RoundedRect(c) => Some(c.rect.rect),
            Contour::Circle(c) => Some(c.bounds()),
        }
    }

    /// The contour's start and end points. They coincide for closed
    /// contours.
    pub fn start_end(&self) -> (Point, Point) {
        match self {
            Contour::Standard(c) => c.start_end(),
            Contour::Rect(c) => (c.rect.origin(), c.rect.origin()),
            Contour::RoundedRect(c) => {
                let p = c.start_point();
                (p, p)
            }
            Contour::Circle(c) => (
                c.point_at_angle(c.start_angle),
                c.point_at_angle(c.end_angle),
            ),
        }
    }

    /// Enumerate the contour as path elements.
    ///
    /// Closed-form variants synthesize an equivalent element sequence;
    /// the circle's arc is decomposed into cubic Béziers within
    /// `tolerance`. The callback may return `false` to stop early, which
    /// propagates out as the return value.
    pub fn foreach(&self, tolerance: f64, f: &mut impl FnMut(PathEl) -> bool) -> bool {
        match self {
            Contour::Standard(c) => c.foreach(f),
            Contour::Rect(c) => c.foreach(f),
            Contour::RoundedRect(c) => c.foreach(f),
            Contour::Circle(c) => c.foreach(tolerance, f),
        }
    }

    /// The same contour traversed in the opposite direction, of the same
    /// variant.
    pub fn reverse(&self) -> Contour {
        match self {
            Contour::Standard(c) => Contour::Standard(c.reverse()),
            Contour::Rect(c) => Contour::Rect(c.reverse()),
            Contour::RoundedRect(c) => Contour::RoundedRect(c.reverse()),
            Contour::Circle(c) => Contour::Circle(c.reverse()),
        }
    }
}

// ---------------------------------------------------------------------
// Standard

/// A contour holding an arbitrary sequence of curve operations.
///
/// Control points live in a single pool; each operation references a
/// contiguous slice of it and shares its first point with the previous
/// operation's last. The first operation is always a move.
#[derive(Clone, Debug)]
pub struct StandardContour {
    flags: PathFlags,
    points: Vec<Point>,
    ops: Vec<PathOp>,
}

impl StandardContour {
    /// Create a contour from a point pool and operations.
    ///
    /// Panics unless the operations start with a move and reference the
    /// pool contiguously.
    pub fn new(flags: PathFlags, points: Vec<Point>, ops: Vec<PathOp>) -> StandardContour {
        assert!(
            matches!(ops.first(), Some(op) if op.verb == Verb::Move),
            "contour must start with a move"
        );
        for pair in ops.windows(2) {
            debug_assert_eq!(
                pair[1].ix,
                pair[0].last_ix(),
                "operations must share endpoints"
            );
        }
        debug_assert_eq!(ops.last().unwrap().last_ix(), points.len() - 1);
        if flags.contains(PathFlags::CLOSED) {
            debug_assert_eq!(ops.last().unwrap().verb, Verb::Close);
            debug_assert_eq!(points.first(), points.last());
        }
        StandardContour { flags, points, ops }
    }

    /// The contour's flags.
    #[inline]
    pub fn flags(&self) -> PathFlags {
        self.flags
    }

    /// The control point pool.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The operations.
    #[inline]
    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub(crate) fn bounds(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        let mut bounds = Rect::new(first.x, first.y, 0.0, 0.0);
        for pt in &self.points[1..] {
            bounds = bounds.union_pt(*pt);
        }
        (bounds.width > 0.0 && bounds.height > 0.0).then_some(bounds)
    }

    pub(crate) fn start_end(&self) -> (Point, Point) {
        (self.points[0], *self.points.last().unwrap())
    }

    pub(crate) fn foreach(&self, f: &mut impl FnMut(PathEl) -> bool) -> bool {
        for op in &self.ops {
            if !f(self.op_el(*op)) {
                return false;
            }
        }
        true
    }

    /// The path element corresponding to an operation.
    pub(crate) fn op_el(&self, op: PathOp) -> PathEl {
        let p = &self.points[op.ix..];
        match op.verb {
            Verb::Move => PathEl::MoveTo(p[0]),
            Verb::Line => PathEl::LineTo(p[1]),
            Verb::Quad => PathEl::QuadTo(p[1], p[2]),
            Verb::Cubic => PathEl::CurveTo(p[1], p[2], p[3]),
            Verb::Conic => PathEl::ConicTo(p[1], p[2], op.weight),
            Verb::Close => PathEl::ClosePath,
        }
    }

    pub(crate) fn reverse(&self) -> StandardContour {
        let closed = self.flags.contains(PathFlags::CLOSED);
        let mut builder = PathBuilder::new();
        builder.move_to(*self.points.last().unwrap());
        for (i, op) in self.ops.iter().enumerate().rev() {
            match op.verb {
                Verb::Move => continue,
                // The close of the reversed contour redraws a leading
                // straight edge; emitting it twice would leave stray
                // zero-length lines after a double reversal.
                Verb::Line if closed && i == 1 => continue,
                Verb::Close if self.points[op.ix] == self.points[op.last_ix()] => continue,
                _ => {}
            }
            let curve = Curve::from_op(&self.points, *op);
            builder.push(curve.reverse().to_el());
        }
        if closed {
            builder.close();
        }
        let mut contours = builder.build().into_contours();
        match (contours.next(), contours.next()) {
            (Some(Contour::Standard(c)), None) => c,
            _ => unreachable!("reversal produces a single standard contour"),
        }
    }
}

// ---------------------------------------------------------------------
// Rectangle

/// A rectangular contour.
///
/// The outline starts at the origin and visits the four sides in order
/// top, right, bottom, left; negative width or height reverses the side
/// directions, so a reversed rectangle is a rectangle with negated
/// size.
#[derive(Clone, Copy, Debug)]
pub struct RectContour {
    pub(crate) rect: Rect,
}

impl RectContour {
    /// Create a rectangle contour.
    #[inline]
    pub fn new(rect: Rect) -> RectContour {
        RectContour { rect }
    }

    /// The underlying rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The perimeter.
    pub(crate) fn length(&self) -> f64 {
        2.0 * (self.rect.width.abs() + self.rect.height.abs())
    }

    fn corner_points(&self) -> [Point; 4] {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        [
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ]
    }

    pub(crate) fn foreach(&self, f: &mut impl FnMut(PathEl) -> bool) -> bool {
        let pts = self.corner_points();
        f(PathEl::MoveTo(pts[0]))
            && f(PathEl::LineTo(pts[1]))
            && f(PathEl::LineTo(pts[2]))
            && f(PathEl::LineTo(pts[3]))
            && f(PathEl::ClosePath)
    }

    pub(crate) fn reverse(&self) -> RectContour {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        RectContour::new(Rect::new(x + width, y, -width, height))
    }

    // Sign of horizontal and vertical traversal.
    fn signs(&self) -> (f64, f64) {
        (1f64.copysign(self.rect.width), 1f64.copysign(self.rect.height))
    }

    pub(crate) fn point_at(&self, mut distance: f64, direction: Direction) -> (Point, Vec2) {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let (sw, sh) = self.signs();

        if distance == 0.0 {
            let tangent = match direction {
                Direction::Start => Vec2::new(0.0, -sh),
                Direction::End => Vec2::new(sw, 0.0),
            };
            return (Point::new(x, y), tangent);
        }

        if distance < width.abs() {
            return (Point::new(x + distance * sw, y), Vec2::new(sw, 0.0));
        }
        distance -= width.abs();

        if distance == 0.0 {
            let tangent = match direction {
                Direction::Start => Vec2::new(sw, 0.0),
                Direction::End => Vec2::new(0.0, sh),
            };
            return (Point::new(x + width, y), tangent);
        }

        if distance < height.abs() {
            return (
                Point::new(x + width, y + distance * sh),
                Vec2::new(0.0, sh),
            );
        }
        distance -= height.abs();

        if distance == 0.0 {
            let tangent = match direction {
                Direction::Start => Vec2::new(0.0, sh),
                Direction::End => Vec2::new(-sw, 0.0),
            };
            return (Point::new(x + width, y + height), tangent);
        }

        if distance < width.abs() {
            return (
                Point::new(x + width - distance * sw, y + height),
                Vec2::new(-sw, 0.0),
            );
        }
        distance -= width.abs();

        if distance == 0.0 {
            let tangent = match direction {
                Direction::Start => Vec2::new(-sw, 0.0),
                Direction::End => Vec2::new(0.0, -sh),
            };
            return (Point::new(x, y + height), tangent);
        }

        if distance < height.abs() {
            return (
                Point::new(x, y + height - distance * sh),
                Vec2::new(0.0, -sh),
            );
        }

        // Wrapped all the way around.
        let tangent = match direction {
            Direction::Start => Vec2::new(0.0, -sh),
            Direction::End => Vec2::new(sw, 0.0),
        };
        (Point::new(x, y), tangent)
    }

    pub(crate) fn winding(&self, pt: Point) -> i32 {
        if self.rect.contains(pt) {
            -1
        } else {
            0
        }
    }

    pub(crate) fn add_segment_to(
        &self,
        builder: &mut PathBuilder,
        emit_move: bool,
        mut start: f64,
        mut end: f64,
    ) {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let (sw, sh) = self.signs();
        let w = width.abs();
        let h = height.abs();

        if start < w {
            if emit_move {
                builder.move_to((x + start * sw, y));
            }
            if end <= w {
                builder.line_to((x + end * sw, y));
                return;
            }
            builder.line_to((x + width, y));
        }
        start -= w;
        end -= w;

        if start < h {
            if start >= 0.0 && emit_move {
                builder.move_to((x + width, y + start * sh));
            }
            if end <= h {
                builder.line_to((x + width, y + end * sh));
                return;
            }
            builder.line_to((x + width, y + height));
        }
        start -= h;
        end -= h;

        if start < w {
            if start >= 0.0 && emit_move {
                builder.move_to((x + (w - start) * sw, y + height));
            }
            if end <= w {
                builder.line_to((x + (w - end) * sw, y + height));
                return;
            }
            builder.line_to((x, y + height));
        }
        start -= w;
        end -= w;

        if start < h {
            if start >= 0.0 && emit_move {
                builder.move_to((x, y + (h - start) * sh));
            }
            if end <= h {
                builder.line_to((x, y + (h - end) * sh));
                return;
            }
            builder.line_to((x, y));
        }
    }
}

// ---------------------------------------------------------------------
// Rounded rectangle

/// A rounded-rectangle contour.
///
/// The outline alternates straight edges and quarter-arc corners, the
/// arcs encoded as rational quadratics with weight `√½`. Reversal flips
/// a `ccw` flag rather than rebuilding the geometry.
#[derive(Clone, Copy, Debug)]
pub struct RoundedRectContour {
    pub(crate) rect: RoundedRect,
    pub(crate) ccw: bool,
}

/// The conic weight of an exact quarter circle.
pub(crate) const QUARTER_CIRCLE_WEIGHT: f64 = std::f64::consts::FRAC_1_SQRT_2;

impl RoundedRectContour {
    /// Create a rounded-rectangle contour, traversed clockwise.
    #[inline]
    pub fn new(rect: RoundedRect) -> RoundedRectContour {
        RoundedRectContour { rect, ccw: false }
    }

    /// The underlying rounded rectangle.
    #[inline]
    pub fn rounded_rect(&self) -> RoundedRect {
        self.rect
    }

    /// Whether the outline runs counter-clockwise.
    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.ccw
    }

    pub(crate) fn start_point(&self) -> Point {
        Point::new(
            self.rect.rect.x + self.rect.radius(Corner::TopLeft).width,
            self.rect.rect.y,
        )
    }

    /// The thirteen outline points, starting at the end of the top-left
    /// corner arc; when `ccw`, interior points are swapped pairwise in
    /// place so the same emission order traverses the outline backwards.
    pub(crate) fn outline_points(&self) -> [Point; 13] {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect.rect;
        let tl = self.rect.radius(Corner::TopLeft);
        let tr = self.rect.radius(Corner::TopRight);
        let br = self.rect.radius(Corner::BottomRight);
        let bl = self.rect.radius(Corner::BottomLeft);
        let mut pts = [
            Point::new(x + tl.width, y),
            Point::new(x + width - tr.width, y),
            Point::new(x + width, y),
            Point::new(x + width, y + tr.height),
            Point::new(x + width, y + height - br.height),
            Point::new(x + width, y + height),
            // Matches the reference implementation, which reuses the
            // top-right corner width on the bottom edge.
            Point::new(x + width - tr.width, y + height),
            Point::new(x + bl.width, y + height),
            Point::new(x, y + height),
            Point::new(x, y + height - bl.height),
            Point::new(x, y + tl.height),
            Point::new(x, y),
            Point::new(x + tl.width, y),
        ];
        if self.ccw {
            pts.swap(1, 11);
            pts.swap(2, 10);
            pts.swap(3, 9);
            pts.swap(4, 8);
            pts.swap(5, 7);
        }
        pts
    }

    pub(crate) fn foreach(&self, f: &mut impl FnMut(PathEl) -> bool) -> bool {
        let pts = self.outline_points();
        let w = QUARTER_CIRCLE_WEIGHT;
        if self.ccw {
            f(PathEl::MoveTo(pts[0]))
                && f(PathEl::ConicTo(pts[1], pts[2], w))
                && f(PathEl::LineTo(pts[3]))
                && f(PathEl::ConicTo(pts[4], pts[5], w))
                && f(PathEl::LineTo(pts[6]))
                && f(PathEl::ConicTo(pts[7], pts[8], w))
                && f(PathEl::LineTo(pts[9]))
                && f(PathEl::ConicTo(pts[10], pts[11], w))
                && f(PathEl::LineTo(pts[12]))
                && f(PathEl::ClosePath)
        } else {
            f(PathEl::MoveTo(pts[0]))
                && f(PathEl::LineTo(pts[1]))
                && f(PathEl::ConicTo(pts[2], pts[3], w))
                && f(PathEl::LineTo(pts[4]))
                && f(PathEl::ConicTo(pts[5], pts[6], w))
                && f(PathEl::LineTo(pts[7]))
                && f(PathEl::ConicTo(pts[8], pts[9], w))
                && f(PathEl::LineTo(pts[10]))
                && f(PathEl::ConicTo(pts[11], pts[12], w))
                && f(PathEl::ClosePath)
        }
    }

    pub(crate) fn reverse(&self) -> RoundedRectContour {
        RoundedRectContour {
            rect: self.rect,
            ccw: !self.ccw,
        }
    }

    /// Lower the contour to a standard contour with the same outline.
    pub(crate) fn to_standard(&self) -> StandardContour {
        let mut builder = PathBuilder::new();
        self.foreach(&mut |el| {
            builder.push(el);
            true
        });
        let mut contours = builder.build().into_contours();
        match (contours.next(), contours.next()) {
            (Some(Contour::Standard(c)), None) => c,
            _ => unreachable!("outline is a single contour"),
        }
    }

    pub(crate) fn winding(&self, pt: Point) -> i32 {
        if self.rect.contains(pt) {
            if self.ccw {
                1
            } else {
                -1
            }
        } else {
            0
        }
    }
}

// ---------------------------------------------------------------------
// Circle

/// A circular contour, or an arc of one.
///
/// Angles are in degrees; the sweep direction is the sign of
/// `end_angle - start_angle`, and a sweep of ±360° is a closed circle.
#[derive(Clone, Copy, Debug)]
pub struct CircleContour {
    pub(crate) center: Point,
    pub(crate) radius: f64,
    /// Start angle in degrees.
    pub(crate) start_angle: f64,
    /// End angle in degrees, within ±360° of the start.
    pub(crate) end_angle: f64,
}

impl CircleContour {
    /// Create a circular-arc contour.
    ///
    /// Panics if the sweep exceeds a full turn.
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> CircleContour {
        assert!(
            (start_angle - end_angle).abs() <= 360.0,
            "arc sweep must not exceed 360°"
        );
        CircleContour {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// The circle's center.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The circle's radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Start and end angles in degrees.
    #[inline]
    pub fn angles(&self) -> (f64, f64) {
        (self.start_angle, self.end_angle)
    }

    pub(crate) fn is_closed(&self) -> bool {
        (self.start_angle - self.end_angle).abs() >= 360.0
    }

    pub(crate) fn flags(&self) -> PathFlags {
        if self.is_closed() {
            PathFlags::CLOSED
        } else {
            PathFlags::NONE
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            2.0 * self.radius,
            2.0 * self.radius,
        )
    }

    /// The arc length of the sweep.
    pub(crate) fn length(&self) -> f64 {
        (self.start_angle - self.end_angle).abs().to_radians() * self.radius
    }

    pub(crate) fn point_at_angle(&self, angle: f64) -> Point {
        let rad = angle.to_radians();
        self.center + self.radius * Vec2::new(rad.cos(), rad.sin())
    }

    pub(crate) fn point_at(&self, distance: f64) -> (Point, Vec2) {
        let delta = self.end_angle - self.start_angle;
        let length = self.length();
        let angle = if length == 0.0 {
            self.start_angle
        } else {
            self.start_angle + distance / length * delta
        };
        let rad = angle.to_radians();
        let pos = self.point_at_angle(angle);
        let tangent = Vec2::new(-rad.sin(), rad.cos()) * 1f64.copysign(delta);
        (pos, tangent)
    }

    pub(crate) fn foreach(&self, tolerance: f64, f: &mut impl FnMut(PathEl) -> bool) -> bool {
        if !f(PathEl::MoveTo(self.point_at_angle(self.start_angle))) {
            return false;
        }
        if !decompose_arc(
            self.center,
            self.radius,
            tolerance,
            self.start_angle.to_radians(),
            self.end_angle.to_radians(),
            &mut |pts| f(PathEl::CurveTo(pts[1], pts[2], pts[3])),
        ) {
            return false;
        }
        if self.is_closed() {
            return f(PathEl::ClosePath);
        }
        true
    }

    pub(crate) fn reverse(&self) -> CircleContour {
        CircleContour {
            center: self.center,
            radius: self.radius,
            start_angle: self.end_angle,
            end_angle: self.start_angle,
        }
    }

    pub(crate) fn winding(&self, pt: Point) -> i32 {
        if pt.distance(self.center) >= self.radius {
            return 0;
        }
        if self.is_closed() {
            return -1;
        }
        // A proper arc covers the points between its chord and the arc
        // itself: those on the same side of the chord as the arc's
        // midpoint.
        let mid_angle = self.start_angle + 0.5 * (self.end_angle - self.start_angle);
        let start = self.point_at_angle(self.start_angle);
        let mid = self.point_at_angle(mid_angle);
        let end = self.point_at_angle(self.end_angle);
        let normal = Vec2::new(start.y - end.y, end.x - start.x);
        let a = (mid - start).dot(normal);
        let b = (pt - start).dot(normal);
        if (a < 0.0) == (b < 0.0) {
            -1
        } else {
            0
        }
    }

    pub(crate) fn add_segment_to(
        &self,
        builder: &mut PathBuilder,
        emit_move: bool,
        start: f64,
        end: f64,
    ) {
        let delta = self.end_angle - self.start_angle;
        let length = self.length();
        let start_angle = self.start_angle + start / length * delta;
        let end_angle = self.start_angle + end / length * delta;

        if emit_move {
            builder.add_contour(Contour::Circle(CircleContour::new(
                self.center,
                self.radius,
                start_angle,
                end_angle,
            )));
        } else {
            decompose_arc(
                self.center,
                self.radius,
                crate::DEFAULT_TOLERANCE,
                start_angle.to_radians(),
                end_angle.to_radians(),
                &mut |pts| {
                    builder.cubic_to(pts[1], pts[2], pts[3]);
                    true
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Contour, Direction, PathFlags};
    use crate::{PathBuilder, PathEl, Point, Rect, RoundedRect};

    fn open_line_contour() -> Contour {
        let mut b = PathBuilder::new();
        b.move_to((0.0, 0.0));
        b.line_to((5.0, 0.0));
        b.build().into_contours().next().unwrap()
    }

    #[test]
    fn flags_per_variant() {
        let rect = Contour::rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(rect.flags(), PathFlags::FLAT | PathFlags::CLOSED);

        let rr = Contour::rounded_rect(RoundedRect::from_rect_and_radius(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            1.0,
        ));
        assert_eq!(rr.flags(), PathFlags::CLOSED);

        let full = Contour::circle(Point::ZERO, 1.0, 0.0, 360.0);
        assert!(full.flags().contains(PathFlags::CLOSED));
        let arc = Contour::circle(Point::ZERO, 1.0, 0.0, 90.0);
        assert_eq!(arc.flags(), PathFlags::NONE);
    }

    #[test]
    fn axis_aligned_line_has_no_bounds() {
        // Strict positivity in both extents is required.
        assert_eq!(open_line_contour().bounds(), None);
    }

    #[test]
    fn triangle_bounds_cover_control_points() {
        let mut b = PathBuilder::new();
        b.move_to((1.0, 1.0));
        b.line_to((3.0, 1.0));
        b.line_to((2.0, 4.0));
        b.close();
        let c = b.build().into_contours().next().unwrap();
        assert_eq!(c.bounds(), Some(Rect::new(1.0, 1.0, 2.0, 3.0)));
    }

    #[test]
    fn start_end_per_variant() {
        let rect = Contour::rect(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(rect.start_end(), (Point::new(1.0, 2.0), Point::new(1.0, 2.0)));

        let arc = Contour::circle(Point::ZERO, 1.0, 0.0, 90.0);
        let (start, end) = arc.start_end();
        assert!(start.distance(Point::new(1.0, 0.0)) < 1e-12);
        assert!(end.distance(Point::new(0.0, 1.0)) < 1e-12);

        let rr = Contour::rounded_rect(RoundedRect::from_rect_and_radius(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            1.0,
        ));
        assert_eq!(rr.start_end(), (Point::new(1.0, 0.0), Point::new(1.0, 0.0)));
    }

    #[test]
    fn foreach_early_exit_propagates() {
        let rect = Contour::rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        let mut n = 0;
        let done = rect.foreach(0.1, &mut |_| {
            n += 1;
            n < 3
        });
        assert!(!done);
        assert_eq!(n, 3);
    }

    #[test]
    fn rect_foreach_synthesizes_outline() {
        let rect = Contour::rect(Rect::new(0.0, 0.0, 2.0, 1.0));
        let mut els = Vec::new();
        rect.foreach(0.1, &mut |el| {
            els.push(el);
            true
        });
        assert_eq!(
            els,
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(2.0, 0.0)),
                PathEl::LineTo(Point::new(2.0, 1.0)),
                PathEl::LineTo(Point::new(0.0, 1.0)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn circle_foreach_closes_full_turns_only() {
        let full = Contour::circle(Point::ZERO, 1.0, 0.0, 360.0);
        let mut last = None;
        full.foreach(0.1, &mut |el| {
            last = Some(el);
            true
        });
        assert_eq!(last, Some(PathEl::ClosePath));

        let arc = Contour::circle(Point::ZERO, 1.0, 0.0, 180.0);
        let mut last = None;
        arc.foreach(0.1, &mut |el| {
            last = Some(el);
            true
        });
        assert!(matches!(last, Some(PathEl::CurveTo(..))));
    }

    #[test]
    fn reverse_swaps_start_end() {
        let mut b = PathBuilder::new();
        b.move_to((0.0, 0.0));
        b.quad_to((1.0, 2.0), (3.0, 1.0));
        let c = b.build().into_contours().next().unwrap();
        let (start, end) = c.start_end();
        let reversed = c.reverse();
        let (rstart, rend) = reversed.start_end();
        assert_eq!((rstart, rend), (end, start));
        assert_eq!(reversed.bounds(), c.bounds());
    }

    #[test]
    fn rect_reverse_negates_width() {
        let c = Contour::rect(Rect::new(0.0, 0.0, 2.0, 1.0));
        let Contour::Rect(r) = c.reverse() else {
            panic!("reversed rect stays a rect");
        };
        assert_eq!(r.rect(), Rect::new(2.0, 0.0, -2.0, 1.0));
        let m = Contour::Rect(r).measure(0.1);
        assert_eq!(m.length(), 6.0);
    }

    #[test]
    fn circle_reverse_swaps_angles() {
        let c = Contour::circle(Point::ZERO, 1.0, 30.0, 210.0);
        let Contour::Circle(r) = c.reverse() else {
            panic!("reversed circle stays a circle");
        };
        assert_eq!(r.angles(), (210.0, 30.0));
    }

    #[test]
    fn point_tangents_match_start_end_directions() {
        let mut b = PathBuilder::new();
        b.move_to((0.0, 0.0));
        b.line_to((2.0, 0.0));
        b.line_to((2.0, 2.0));
        let c = b.build().into_contours().next().unwrap();
        let m = c.measure(0.1);
        let (pos, tangent) = c.point(&m, 0.0, Direction::End);
        assert_eq!(pos, Point::new(0.0, 0.0));
        assert_eq!(tangent, crate::Vec2::new(1.0, 0.0));
        let (pos, tangent) = c.point(&m, m.length(), Direction::Start);
        assert_eq!(pos, Point::new(2.0, 2.0));
        assert_eq!(tangent, crate::Vec2::new(0.0, 1.0));
    }
}
