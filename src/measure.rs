//! Arc-length measurement of contours, and the queries built on it.
//!
//! [`Contour::measure`] builds a [`ContourMeasure`] handle: for standard
//! contours this holds a table of flattened chords indexed by cumulative
//! arc length; the closed-form variants measure exactly and carry no
//! table. All distance-based queries take the handle by reference, so a
//! contour can be queried at several tolerances concurrently.

use crate::builder::PathBuilder;
use crate::contour::{
    CircleContour, RectContour, RoundedRectContour, StandardContour,
};
use crate::{
    Contour, Curve, Direction, PathFlags, Point, SegmentReason, Vec2, Verb,
};

/// One chord of the flattened contour, covering an arc-length interval.
#[derive(Clone, Copy, Debug)]
struct MeasureSegment {
    /// Cumulative arc length at the chord's start.
    start: f64,
    /// Cumulative arc length at the chord's end.
    end: f64,
    /// Native curve parameter at the chord's start.
    start_t: f64,
    /// Native curve parameter at the chord's end.
    end_t: f64,
    start_point: Point,
    end_point: Point,
    /// Index of the operation this chord belongs to.
    op_ix: usize,
    reason: SegmentReason,
}

impl MeasureSegment {
    /// Linear interpolation along the chord at the given arc length.
    fn chord_point_at(&self, distance: f64) -> Point {
        let t = (distance - self.start) / (self.end - self.start);
        self.start_point.lerp(self.end_point, t)
    }

    /// Map chord-relative progress to the native curve parameter.
    fn curve_t(&self, progress: f64) -> f64 {
        self.start_t + (self.end_t - self.start_t) * progress
    }
}

#[derive(Debug)]
enum MeasureData {
    /// Closed-form variants measure without a table.
    Exact,
    /// The flattened chord table of a standard contour.
    Table(Vec<MeasureSegment>),
    /// A rounded rectangle measures through a lowered standard contour.
    Lowered {
        contour: StandardContour,
        table: Vec<MeasureSegment>,
    },
}

/// An arc-length measure of a contour.
///
/// Owned by the caller of [`Contour::measure`] and passed back by
/// reference to the distance-based queries; dropping it releases the
/// table. The handle must be used with the contour it was built from.
#[derive(Debug)]
pub struct ContourMeasure {
    length: f64,
    data: MeasureData,
}

impl ContourMeasure {
    /// The total arc length of the measured contour.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }
}

/// The result of a successful closest-point query.
#[derive(Clone, Copy, Debug)]
pub struct ClosestPoint {
    /// Distance from the query point to the contour.
    pub distance: f64,
    /// The nearest position on the contour.
    pub pos: Point,
    /// Arc-length offset of `pos` from the contour start.
    pub offset: f64,
    /// Unit tangent at `pos`.
    pub tangent: Vec2,
}

impl Contour {
    /// Measure the contour, flattening within `tolerance` where a table
    /// is needed, and return the handle for distance-based queries.
    pub fn measure(&self, tolerance: f64) -> ContourMeasure {
        match self {
            Contour::Standard(c) => {
                let (table, length) = c.build_table(tolerance);
                ContourMeasure {
                    length,
                    data: MeasureData::Table(table),
                }
            }
            Contour::Rect(c) => ContourMeasure {
                length: c.length(),
                data: MeasureData::Exact,
            },
            Contour::Circle(c) => ContourMeasure {
                length: c.length(),
                data: MeasureData::Exact,
            },
            Contour::RoundedRect(c) => {
                let contour = c.to_standard();
                let (table, length) = contour.build_table(tolerance);
                ContourMeasure {
                    length,
                    data: MeasureData::Lowered { contour, table },
                }
            }
        }
    }

    /// Position and unit tangent at arc length `distance`.
    ///
    /// At seams, `direction` selects the incoming or outgoing tangent;
    /// see [`Direction`].
    pub fn point(
        &self,
        measure: &ContourMeasure,
        distance: f64,
        direction: Direction,
    ) -> (Point, Vec2) {
        debug_assert!(distance >= 0.0);
        match (self, &measure.data) {
            (Contour::Standard(c), MeasureData::Table(table)) => {
                c.point_with(table, distance, direction)
            }
            (Contour::Rect(c), _) => c.point_at(distance, direction),
            (Contour::Circle(c), _) => c.point_at(distance),
            (Contour::RoundedRect(_), MeasureData::Lowered { contour, table }) => {
                contour.point_with(table, distance, direction)
            }
            _ => panic!("measure handle does not belong to this contour"),
        }
    }

    /// Signed curvature at arc length `distance` and, when the curvature
    /// is non-zero, the center of the osculating circle.
    pub fn curvature(&self, measure: &ContourMeasure, distance: f64) -> (f64, Option<Point>) {
        match (self, &measure.data) {
            (Contour::Standard(c), MeasureData::Table(table)) => c.curvature_with(table, distance),
            (Contour::Rect(_), _) => (0.0, None),
            (Contour::Circle(c), _) => (1.0 / c.radius(), Some(c.center())),
            (Contour::RoundedRect(_), MeasureData::Lowered { contour, table }) => {
                contour.curvature_with(table, distance)
            }
            _ => panic!("measure handle does not belong to this contour"),
        }
    }

    /// The point on the contour closest to `point`, if its distance is
    /// within `threshold`.
    ///
    /// A candidate within `tolerance` is accepted immediately; otherwise
    /// the scan keeps tightening the threshold and returns the best
    /// candidate found.
    pub fn closest_point(
        &self,
        measure: &ContourMeasure,
        tolerance: f64,
        point: Point,
        threshold: f64,
    ) -> Option<ClosestPoint> {
        match (self, &measure.data) {
            (Contour::Standard(c), MeasureData::Table(table)) => {
                c.closest_with(table, tolerance, point, threshold)
            }
            (Contour::Rect(c), _) => c.closest_point(point, threshold),
            (Contour::Circle(c), _) => c.closest_point(point, threshold),
            (Contour::RoundedRect(_), MeasureData::Lowered { contour, table }) => {
                contour.closest_with(table, tolerance, point, threshold)
            }
            _ => panic!("measure handle does not belong to this contour"),
        }
    }

    /// Append the sub-contour on the arc-length range `[start, end]` to
    /// the builder.
    ///
    /// When `emit_move` is set the segment starts with a move; otherwise
    /// it continues from the builder's current point.
    pub fn add_segment(
        &self,
        measure: &ContourMeasure,
        builder: &mut PathBuilder,
        emit_move: bool,
        start: f64,
        end: f64,
    ) {
        debug_assert!(start <= end);
        match (self, &measure.data) {
            (Contour::Standard(c), MeasureData::Table(table)) => {
                c.add_segment_with(table, builder, emit_move, start, end);
            }
            (Contour::Rect(c), _) => c.add_segment_to(builder, emit_move, start, end),
            (Contour::Circle(c), _) => c.add_segment_to(builder, emit_move, start, end),
            (Contour::RoundedRect(_), MeasureData::Lowered { contour, table }) => {
                contour.add_segment_with(table, builder, emit_move, start, end);
            }
            _ => panic!("measure handle does not belong to this contour"),
        }
    }

    /// The signed crossing number of a horizontal ray through `point`,
    /// used to evaluate the non-zero fill rule. Clockwise contours (in
    /// screen coordinates) yield −1 for interior points.
    pub fn winding(&self, measure: &ContourMeasure, point: Point) -> i32 {
        match (self, &measure.data) {
            (Contour::Standard(c), MeasureData::Table(table)) => c.winding_with(table, point),
            (Contour::Rect(c), _) => c.winding(point),
            (Contour::Circle(c), _) => c.winding(point),
            (Contour::RoundedRect(c), _) => c.winding(point),
            _ => panic!("measure handle does not belong to this contour"),
        }
    }
}

/// Index of the table segment covering `distance`.
///
/// A segment is too low when its end is at or before the distance, so a
/// distance on a seam resolves to the following segment; distances past
/// the total length clamp to the last segment.
fn find_segment(table: &[MeasureSegment], distance: f64) -> usize {
    let ix = table.partition_point(|seg| seg.end <= distance);
    ix.min(table.len() - 1)
}

/// Foot of the perpendicular from `p` onto the chord from `a` to `b`,
/// clamped to the chord. Returns the chord parameter and the point.
fn nearest_on_chord(a: Point, b: Point, p: Point) -> (f64, Point) {
    let n = b - a;
    let t = (p - a).dot(n) / n.dot(n);
    if t <= 0.0 {
        (0.0, a)
    } else if t >= 1.0 {
        (1.0, b)
    } else {
        (t, a.lerp(b, t))
    }
}

fn crossing(p: Point, a: Point, b: Point) -> i32 {
    if a.y <= p.y {
        if b.y > p.y && (b - a).cross(p - a) < 0.0 {
            return 1;
        }
    } else if b.y <= p.y && (b - a).cross(p - a) > 0.0 {
        return -1;
    }
    0
}

impl StandardContour {
    fn build_table(&self, tolerance: f64) -> (Vec<MeasureSegment>, f64) {
        let mut table = Vec::new();
        let mut length = 0.0;
        for (op_ix, op) in self.ops().iter().enumerate().skip(1) {
            if op.verb == Verb::Move {
                continue;
            }
            let curve = Curve::from_op(self.points(), *op);
            curve.decompose(tolerance, &mut |from, to, t0, t1, reason| {
                let chord_len = from.distance(to);
                if chord_len == 0.0 {
                    return;
                }
                table.push(MeasureSegment {
                    start: length,
                    end: length + chord_len,
                    start_t: t0,
                    end_t: t1,
                    start_point: from,
                    end_point: to,
                    op_ix,
                    reason,
                });
                length += chord_len;
            });
        }
        (table, length)
    }

    fn op_curve(&self, op_ix: usize) -> Curve {
        Curve::from_op(self.points(), self.ops()[op_ix])
    }

    fn point_with(
        &self,
        table: &[MeasureSegment],
        distance: f64,
        direction: Direction,
    ) -> (Point, Vec2) {
        if table.is_empty() {
            // A contour with only a move has a position but no extent.
            debug_assert_eq!(distance, 0.0);
            return (self.points()[0], Vec2::new(1.0, 0.0));
        }
        let mut ix = find_segment(table, distance);
        let mut seg = &table[ix];
        let mut progress = (distance - seg.start) / (seg.end - seg.start);

        // On a seam, `Start` asks for the incoming tangent: evaluate the
        // end of the preceding segment, wrapping on closed contours.
        if distance == seg.start && direction == Direction::Start {
            if ix > 0 {
                ix -= 1;
                seg = &table[ix];
                progress = 1.0;
            } else if self.flags().contains(PathFlags::CLOSED) {
                ix = table.len() - 1;
                seg = &table[ix];
                progress = 1.0;
            }
        }

        let t = seg.curve_t(progress.clamp(0.0, 1.0));
        let curve = self.op_curve(seg.op_ix);
        (curve.eval(t), curve.tangent(t))
    }

    fn curvature_with(&self, table: &[MeasureSegment], distance: f64) -> (f64, Option<Point>) {
        if table.is_empty() {
            debug_assert_eq!(distance, 0.0);
            return (0.0, None);
        }
        let seg = &table[find_segment(table, distance)];
        let progress = (distance - seg.start) / (seg.end - seg.start);
        let t = seg.curve_t(progress.clamp(0.0, 1.0));
        let curve = self.op_curve(seg.op_ix);
        let kappa = curve.curvature(t);
        if kappa == 0.0 || !kappa.is_finite() {
            return (kappa, None);
        }
        let center = curve.eval(t) + curve.tangent(t).turn90() * kappa.recip();
        (kappa, Some(center))
    }

    fn closest_with(
        &self,
        table: &[MeasureSegment],
        tolerance: f64,
        point: Point,
        mut threshold: f64,
    ) -> Option<ClosestPoint> {
        let mut last_point = self.points()[0];

        if table.is_empty() {
            // Point-only contour.
            let distance = last_point.distance(point);
            if distance > threshold {
                return None;
            }
            return Some(ClosestPoint {
                distance,
                pos: last_point,
                offset: 0.0,
                tangent: Vec2::new(1.0, 0.0),
            });
        }

        let mut best = None;
        for seg in table {
            let (mut progress, chord_pos) = nearest_on_chord(last_point, seg.end_point, point);
            last_point = seg.end_point;
            // Slack over the chord distance, since the curve may come
            // closer than its chord.
            if point.distance(chord_pos) > threshold + 1.0 {
                continue;
            }

            let curve = self.op_curve(seg.op_ix);
            let mut found_t = seg.curve_t(progress);
            let mut pos = curve.eval(found_t);
            let mut distance = point.distance(pos);

            // The arc-length parametrization is non-uniform, so the chord
            // foot is only a seed; walk in fixed steps while the distance
            // strictly decreases, in both directions.
            const STEP: f64 = 1.0 / 1024.0;
            while progress + STEP < 1.0 {
                let test_t = seg.curve_t(progress + STEP);
                let test_pos = curve.eval(test_t);
                let test_distance = point.distance(test_pos);
                if test_distance > distance {
                    break;
                }
                progress += STEP;
                found_t = test_t;
                pos = test_pos;
                distance = test_distance;
            }
            while progress - STEP > 0.0 {
                let test_t = seg.curve_t(progress - STEP);
                let test_pos = curve.eval(test_t);
                let test_distance = point.distance(test_pos);
                if test_distance > distance {
                    break;
                }
                progress -= STEP;
                found_t = test_t;
                pos = test_pos;
                distance = test_distance;
            }

            if distance <= threshold {
                best = Some(ClosestPoint {
                    distance,
                    pos,
                    offset: seg.start + (seg.end - seg.start) * progress,
                    tangent: curve.tangent(found_t),
                });
                if tolerance >= distance {
                    return best;
                }
                threshold = distance - tolerance;
            }
        }
        best
    }

    fn winding_with(&self, table: &[MeasureSegment], point: Point) -> i32 {
        if table.is_empty() {
            return 0;
        }
        let first = self.points()[0];
        let mut winding = 0;
        let mut last = first;
        for seg in table {
            winding += crossing(point, last, seg.end_point);
            last = seg.end_point;
        }
        winding + crossing(point, last, first)
    }

    fn add_segment_with(
        &self,
        table: &[MeasureSegment],
        builder: &mut PathBuilder,
        mut emit_move: bool,
        start: f64,
        end: f64,
    ) {
        let n_ops = self.ops().len();
        let locate = |distance: f64| {
            let ix = find_segment(table, distance);
            let seg = &table[ix];
            let progress = (distance - seg.start) / (seg.end - seg.start);
            (ix, seg.curve_t(progress.clamp(0.0, 1.0)))
        };

        let start_info = (start > 0.0 && !table.is_empty()).then(|| locate(start));
        // No end segment means the range runs to the contour's end.
        let end_info = {
            let ix = table.partition_point(|seg| seg.end <= end);
            (ix < table.len()).then(|| {
                let seg = &table[ix];
                let progress = (end - seg.start) / (seg.end - seg.start);
                (ix, seg.curve_t(progress.clamp(0.0, 1.0)))
            })
        };

        let emitted_from_start = start_info.is_some();
        let mut next_op;
        if let Some((mut start_ix, mut start_t)) = start_info {
            let mut seg = &table[start_ix];
            let mut curve = self.op_curve(seg.op_ix);

            if seg.reason == SegmentReason::Straight {
                // The segment is straight on this chord: emit lines from
                // interpolated points rather than splitting the curve.
                if emit_move {
                    builder.move_to(seg.chord_point_at(start));
                }
                if let Some((end_ix, _)) = end_info {
                    if end_ix == start_ix {
                        builder.line_to(table[end_ix].chord_point_at(end));
                        return;
                    }
                }
                builder.line_to(seg.end_point);
                start_ix += 1;
                if start_ix >= table.len() {
                    return;
                }
                seg = &table[start_ix];
                start_t = seg.start_t;
                emit_move = false;
                curve = self.op_curve(seg.op_ix);
            }

            if let Some((end_ix, end_t)) = end_info {
                let end_seg = &table[end_ix];
                if end_seg.op_ix == seg.op_ix {
                    // Start and end within the same operation.
                    if end_seg.reason == SegmentReason::Short {
                        let cut = curve.subsegment(start_t..end_t);
                        if emit_move {
                            builder.move_to(cut.start());
                        }
                        builder.push_curve(cut);
                    } else {
                        if end_seg.start_t > start_t {
                            let cut = curve.subsegment(start_t..end_seg.start_t);
                            if emit_move {
                                builder.move_to(cut.start());
                            }
                            builder.push_curve(cut);
                        } else if emit_move {
                            builder.move_to(curve.eval(start_t));
                        }
                        builder.line_to(end_seg.chord_point_at(end));
                    }
                    return;
                }
            }

            // Tail of the start operation.
            let cut = curve.subsegment(start_t..1.0);
            if emit_move {
                builder.move_to(cut.start());
            }
            builder.push_curve(cut);
            next_op = seg.op_ix + 1;
        } else {
            next_op = if emit_move { 0 } else { 1 };
        }

        // Whole operations strictly between the partial ends.
        let stop = end_info
            .map(|(end_ix, _)| table[end_ix].op_ix)
            .unwrap_or(n_ops - 1);
        while next_op < stop {
            builder.push(self.op_el(self.ops()[next_op]));
            next_op += 1;
        }

        if let Some((end_ix, end_t)) = end_info {
            let end_seg = &table[end_ix];
            let curve = self.op_curve(end_seg.op_ix);
            if end_seg.reason == SegmentReason::Short {
                if end_t > 0.0 {
                    builder.push_curve(curve.subsegment(0.0..end_t));
                }
            } else {
                if end_seg.start_t > 0.0 {
                    builder.push_curve(curve.subsegment(0.0..end_seg.start_t));
                }
                builder.line_to(end_seg.chord_point_at(end));
            }
        } else if next_op == n_ops - 1 {
            let op = self.ops()[next_op];
            if op.verb == Verb::Close {
                if !emitted_from_start && emit_move {
                    // The whole contour was emitted; it may close again.
                    builder.close();
                } else {
                    builder.line_to(self.points()[op.last_ix()]);
                }
            } else {
                builder.push(self.op_el(op));
            }
        }
    }
}

impl RectContour {
    pub(crate) fn closest_point(&self, point: Point, threshold: f64) -> Option<ClosestPoint> {
        let crate::Rect {
            x,
            y,
            width,
            height,
        } = self.rect();

        // Map into unit-square coordinates and clamp onto the square.
        let mut tx = point.x - x;
        let mut ty = point.y - y;
        if width != 0.0 {
            tx = (tx / width).clamp(0.0, 1.0);
        } else {
            tx = 0.0;
        }
        if height != 0.0 {
            ty = (ty / height).clamp(0.0, 1.0);
        } else {
            ty = 0.0;
        }

        if tx > 0.0 && tx < 1.0 && ty > 0.0 && ty < 1.0 {
            // Interior: snap to the nearer of the horizontal and vertical
            // edges, ties resolved in stroke order top, right, bottom.
            let diff = tx.min(1.0 - tx) * width.abs() - ty.min(1.0 - ty) * height.abs();
            if diff < 0.0 {
                tx = (tx - 0.5).ceil();
            } else if diff > 0.0 {
                ty = ty.round();
            } else if ty <= 1.0 - ty {
                ty = 0.0;
            } else if 1.0 - tx <= tx {
                tx = 1.0;
            } else {
                ty = 1.0;
            }
        }

        // Keep -0 out of the arithmetic below.
        tx = tx.abs();
        ty = ty.abs();

        let pos = Point::new(x + tx * width, y + ty * height);
        let distance = point.distance(pos);
        if distance > threshold {
            return None;
        }

        // On the left and bottom sides the stroke runs backwards, so the
        // unit coordinate counts from 2 instead.
        let oy = if tx == 0.0 && ty > 0.0 && width != 0.0 {
            2.0 - ty
        } else {
            ty
        };
        let ox = if ty == 1.0 || (ty > 0.0 && tx == 0.0) {
            2.0 - tx
        } else {
            tx
        };
        let offset = oy * height.abs() + ox * width.abs();

        let sw = 1f64.copysign(width);
        let sh = 1f64.copysign(height);
        let tangent = if ty == 0.0 && tx < 1.0 {
            Vec2::new(sw, 0.0)
        } else if tx == 0.0 {
            Vec2::new(0.0, -sh)
        } else if ty == 1.0 {
            Vec2::new(-sw, 0.0)
        } else {
            Vec2::new(0.0, sh)
        };

        Some(ClosestPoint {
            distance,
            pos,
            offset,
            tangent,
        })
    }
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(360.0);
    d.min(360.0 - d)
}

impl CircleContour {
    pub(crate) fn closest_point(&self, point: Point, threshold: f64) -> Option<ClosestPoint> {
        if point.distance(self.center()) > threshold + self.radius() {
            return None;
        }
        let (start_angle, end_angle) = self.angles();
        let delta = end_angle - start_angle;
        let length = self.length();

        let mut angle = (point.y - self.center().y)
            .atan2(point.x - self.center().x)
            .to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }

        let offset = if delta == 0.0 {
            0.0
        } else {
            let sweep = delta.abs();
            let rel = if delta >= 0.0 {
                (angle - start_angle).rem_euclid(360.0)
            } else {
                (start_angle - angle).rem_euclid(360.0)
            };
            if rel <= sweep {
                // The projection lies on the arc.
                length * rel / sweep
            } else if angular_distance(start_angle, angle) < angular_distance(end_angle, angle) {
                0.0
            } else {
                length
            }
        };

        let (pos, tangent) = self.point_at(offset);
        let distance = pos.distance(point);
        if threshold < distance {
            return None;
        }
        Some(ClosestPoint {
            distance,
            pos,
            offset,
            tangent,
        })
    }
}
