//! SVG-style text output for contours and paths.
//!
//! The format uses the standard `M`/`L`/`Q`/`C`/`Z` commands plus a
//! non-standard `O cx cy, ex ey, weight` command for rational
//! quadratics, which SVG cannot express. Numbers are written in
//! locale-independent decimal.

use std::fmt;
use std::fmt::Write;

use crate::contour::{
    CircleContour, RectContour, RoundedRectContour, StandardContour, QUARTER_CIRCLE_WEIGHT,
};
use crate::{Contour, Path, PathEl, Point};

fn write_point(w: &mut dyn Write, p: Point) -> fmt::Result {
    write!(w, "{} {}", p.x, p.y)
}

impl Contour {
    /// Append an SVG-style description of the contour.
    pub fn write_svg(&self, w: &mut impl Write) -> fmt::Result {
        match self {
            Contour::Standard(c) => c.write_svg(w),
            Contour::Rect(c) => c.write_svg(w),
            Contour::RoundedRect(c) => c.write_svg(w),
            Contour::Circle(c) => c.write_svg(w),
        }
    }

    /// The contour as an SVG-style string.
    pub fn to_svg(&self) -> String {
        let mut s = String::new();
        self.write_svg(&mut s).unwrap();
        s
    }
}

impl Path {
    /// The path as an SVG-style string, contours separated by spaces.
    pub fn to_svg(&self) -> String {
        let mut s = String::new();
        for (i, contour) in self.contours().iter().enumerate() {
            if i > 0 {
                s.push(' ');
            }
            contour.write_svg(&mut s).unwrap();
        }
        s
    }
}

impl StandardContour {
    fn write_svg(&self, w: &mut impl Write) -> fmt::Result {
        for op in self.ops() {
            match self.op_el(*op) {
                PathEl::MoveTo(p) => {
                    w.write_str("M ")?;
                    write_point(w, p)?;
                }
                PathEl::LineTo(p) => {
                    w.write_str(" L ")?;
                    write_point(w, p)?;
                }
                PathEl::QuadTo(p1, p2) => {
                    w.write_str(" Q ")?;
                    write_point(w, p1)?;
                    w.write_str(", ")?;
                    write_point(w, p2)?;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    w.write_str(" C ")?;
                    write_point(w, p1)?;
                    w.write_str(", ")?;
                    write_point(w, p2)?;
                    w.write_str(", ")?;
                    write_point(w, p3)?;
                }
                // Not valid SVG; rational quadratics have no SVG form.
                PathEl::ConicTo(p1, p2, weight) => {
                    w.write_str(" O ")?;
                    write_point(w, p1)?;
                    w.write_str(", ")?;
                    write_point(w, p2)?;
                    write!(w, ", {weight}")?;
                }
                PathEl::ClosePath => w.write_str(" Z")?,
            }
        }
        Ok(())
    }
}

impl RectContour {
    fn write_svg(&self, w: &mut impl Write) -> fmt::Result {
        let rect = self.rect();
        w.write_str("M ")?;
        write_point(w, rect.origin())?;
        write!(w, " h {} v {} h {} z", rect.width, rect.height, -rect.width)
    }
}

impl RoundedRectContour {
    fn write_svg(&self, w: &mut impl Write) -> fmt::Result {
        let pts = self.outline_points();
        let weight = QUARTER_CIRCLE_WEIGHT;
        let conic = |w: &mut dyn Write, p1: Point, p2: Point| -> fmt::Result {
            w.write_str(" O ")?;
            write_point(w, p1)?;
            w.write_str(", ")?;
            write_point(w, p2)?;
            write!(w, ", {weight}")
        };
        let line = |w: &mut dyn Write, p: Point| -> fmt::Result {
            w.write_str(" L ")?;
            write_point(w, p)
        };
        w.write_str("M ")?;
        write_point(w, pts[0])?;
        if self.is_ccw() {
            conic(w, pts[1], pts[2])?;
            line(w, pts[3])?;
            conic(w, pts[4], pts[5])?;
            line(w, pts[6])?;
            conic(w, pts[7], pts[8])?;
            line(w, pts[9])?;
            conic(w, pts[10], pts[11])?;
            line(w, pts[12])?;
        } else {
            line(w, pts[1])?;
            conic(w, pts[2], pts[3])?;
            line(w, pts[4])?;
            conic(w, pts[5], pts[6])?;
            line(w, pts[7])?;
            conic(w, pts[8], pts[9])?;
            line(w, pts[10])?;
            conic(w, pts[11], pts[12])?;
        }
        w.write_str(" z")
    }
}

impl CircleContour {
    fn write_svg(&self, w: &mut impl Write) -> fmt::Result {
        let (start_angle, end_angle) = self.angles();
        let mid_angle = start_angle + 0.5 * (end_angle - start_angle);
        let sweep = if start_angle < end_angle { 0 } else { 1 };
        let r = self.radius();
        w.write_str("M ")?;
        write_point(w, self.point_at_angle(start_angle))?;
        write!(w, " A {r} {r} 0 0 {sweep} ")?;
        write_point(w, self.point_at_angle(mid_angle))?;
        write!(w, " A {r} {r} 0 0 {sweep} ")?;
        write_point(w, self.point_at_angle(end_angle))?;
        if (start_angle - end_angle).abs() >= 360.0 {
            w.write_str(" z")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Contour, PathBuilder, Point, Rect, RoundedRect};

    const W: &str = "0.7071067811865476";

    #[test]
    fn standard_contour_svg() {
        let mut b = PathBuilder::new();
        b.move_to((0.0, 0.0));
        b.line_to((2.0, 0.0));
        b.quad_to((3.0, 1.0), (2.0, 2.0));
        b.cubic_to((1.0, 3.0), (0.0, 3.0), (0.0, 2.0));
        b.close();
        let path = b.build();
        assert_eq!(
            path.to_svg(),
            "M 0 0 L 2 0 Q 3 1, 2 2 C 1 3, 0 3, 0 2 Z"
        );
    }

    #[test]
    fn conic_svg_uses_o_command() {
        let mut b = PathBuilder::new();
        b.move_to((1.0, 0.0));
        b.conic_to((1.0, 1.0), (0.0, 1.0), 0.5);
        let path = b.build();
        assert_eq!(path.to_svg(), "M 1 0 O 1 1, 0 1, 0.5");
    }

    #[test]
    fn rect_svg() {
        let c = Contour::rect(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(c.to_svg(), "M 1 2 h 3 v 4 h -3 z");
        let c = Contour::rect(Rect::new(4.0, 2.0, -3.0, 4.0));
        assert_eq!(c.to_svg(), "M 4 2 h -3 v 4 h 3 z");
    }

    #[test]
    fn rounded_rect_svg_golden() {
        let rr = RoundedRect::from_rect_and_radius(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        let c = Contour::rounded_rect(rr);
        assert_eq!(
            c.to_svg(),
            format!(
                "M 2 0 L 8 0 O 10 0, 10 2, {W} L 10 8 O 10 10, 8 10, {W} \
                 L 2 10 O 0 10, 0 8, {W} L 0 2 O 0 0, 2 0, {W} z"
            )
        );
    }

    #[test]
    fn rounded_rect_ccw_svg_golden() {
        // The reversed outline swaps the point table in place; the output
        // keeps the reference implementation's quirks verbatim.
        let rr = RoundedRect::from_rect_and_radius(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        let c = Contour::rounded_rect(rr).reverse();
        assert_eq!(
            c.to_svg(),
            format!(
                "M 2 0 O 0 0, 0 2, {W} L 0 8 O 0 10, 2 10, {W} \
                 L 8 10 O 10 10, 10 8, {W} L 10 2 O 10 0, 8 0, {W} L 2 0 z"
            )
        );
    }

    #[test]
    fn rounded_rect_reverse_is_involutive() {
        let rr = RoundedRect::from_rect_and_radius(Rect::new(0.0, 0.0, 7.0, 5.0), 1.0);
        let c = Contour::rounded_rect(rr);
        assert_eq!(c.reverse().reverse().to_svg(), c.to_svg());
    }

    #[test]
    fn circle_svg() {
        let c = Contour::circle(Point::new(0.0, 0.0), 2.0, 0.0, 360.0);
        let svg = c.to_svg();
        assert!(svg.starts_with("M 2 0 A 2 2 0 0 0 "), "{svg}");
        assert!(svg.ends_with(" z"), "{svg}");
        // The two arc halves pass through the angular midpoint.
        assert_eq!(svg.matches(" A 2 2 0 0 0 ").count(), 2);
    }

    #[test]
    fn open_arc_svg_not_closed() {
        let c = Contour::circle(Point::new(0.0, 0.0), 1.0, 90.0, 0.0);
        let svg = c.to_svg();
        // Reverse sweep sets the flag and leaves the path open.
        assert!(svg.contains(" A 1 1 0 0 1 "), "{svg}");
        assert!(!svg.ends_with('z'), "{svg}");
    }

    #[test]
    fn reverse_involution_matches_print() {
        let mut b = PathBuilder::new();
        b.move_to((0.0, 0.0));
        b.line_to((2.0, 0.0));
        b.quad_to((3.0, 1.0), (2.0, 2.0));
        b.close();
        let c = b.build().into_contours().next().unwrap();
        assert_eq!(c.reverse().reverse().to_svg(), c.to_svg());
    }
}
