//! A rectangle with rounded corners.

use crate::{Point, Rect, Size};

/// The four corners of a rectangle, in the order the outline visits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    /// The top-left corner.
    TopLeft = 0,
    /// The top-right corner.
    TopRight = 1,
    /// The bottom-right corner.
    BottomRight = 2,
    /// The bottom-left corner.
    BottomLeft = 3,
}

/// A rectangle with rounded corners.
///
/// Each corner carries an elliptical radius as a `(width, height)` pair;
/// a zero radius gives a sharp corner. Radii are assumed to fit inside
/// the bounds.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundedRect {
    /// The bounding rectangle.
    pub rect: Rect,
    /// Corner radii, indexed by [`Corner`].
    pub radii: [Size; 4],
}

impl RoundedRect {
    /// A new rounded rectangle with per-corner radii.
    #[inline]
    pub fn new(rect: Rect, radii: [Size; 4]) -> RoundedRect {
        RoundedRect { rect, radii }
    }

    /// A new rounded rectangle with the same radius at every corner.
    pub fn from_rect_and_radius(rect: Rect, radius: f64) -> RoundedRect {
        RoundedRect {
            rect,
            radii: [Size::new(radius, radius); 4],
        }
    }

    /// The corner radius for the given corner.
    #[inline]
    pub fn radius(&self, corner: Corner) -> Size {
        self.radii[corner as usize]
    }

    /// Whether the rounded rectangle contains the point.
    ///
    /// Points inside the bounds but beyond a corner's elliptical arc are
    /// outside.
    pub fn contains(&self, pt: Point) -> bool {
        if !self.rect.contains(pt) {
            return false;
        }
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        // Ellipse centers of the four corner arcs.
        let centers = [
            Point::new(x + self.radii[0].width, y + self.radii[0].height),
            Point::new(x + width - self.radii[1].width, y + self.radii[1].height),
            Point::new(
                x + width - self.radii[2].width,
                y + height - self.radii[2].height,
            ),
            Point::new(x + self.radii[3].width, y + height - self.radii[3].height),
        ];
        for (ix, (radius, center)) in self.radii.iter().zip(centers.iter()).enumerate() {
            if radius.is_empty() {
                continue;
            }
            let toward_corner = match ix {
                0 => pt.x < center.x && pt.y < center.y,
                1 => pt.x > center.x && pt.y < center.y,
                2 => pt.x > center.x && pt.y > center.y,
                _ => pt.x < center.x && pt.y > center.y,
            };
            if toward_corner {
                let dx = (pt.x - center.x) / radius.width;
                let dy = (pt.y - center.y) / radius.height;
                if dx * dx + dy * dy > 1.0 {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::RoundedRect;
    use crate::{Point, Rect};

    #[test]
    fn contains_corner_cut() {
        let rr = RoundedRect::from_rect_and_radius(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        assert!(rr.contains(Point::new(5.0, 5.0)));
        assert!(rr.contains(Point::new(0.0, 5.0)));
        // The very corner of the bounds lies outside the arc.
        assert!(!rr.contains(Point::new(0.1, 0.1)));
        assert!(!rr.contains(Point::new(10.5, 5.0)));
    }

    #[test]
    fn sharp_corners() {
        let rr = RoundedRect::from_rect_and_radius(Rect::new(0.0, 0.0, 4.0, 4.0), 0.0);
        assert!(rr.contains(Point::new(0.0, 0.0)));
        assert!(rr.contains(Point::new(4.0, 4.0)));
    }
}
