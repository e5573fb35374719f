//! Contours and arc-length measures for 2D vector paths.
//!
//! This crate implements the measurement core of a vector-graphics path
//! engine: a [`Path`] is an ordered sequence of [`Contour`]s, and a
//! contour answers geometric queries about itself — arc length,
//! position and tangent at a distance, curvature, closest point,
//! winding number, and sub-range extraction.
//!
//! Contours come in four variants. The general [`Contour::Standard`]
//! holds a pool of control points and a sequence of curve operations
//! (lines, quadratic and cubic Béziers, rational quadratics) and is
//! measured by adaptive flattening into a chord table. Rectangles,
//! rounded rectangles and circular arcs are kept in closed form, where
//! perimeter and point-at-distance have exact answers.
//!
//! # Example
//!
//! ```
//! use kontur::{Contour, Direction, Point, Rect};
//!
//! let contour = Contour::rect(Rect::new(0.0, 0.0, 1.0, 1.0));
//! let measure = contour.measure(0.1);
//! assert_eq!(measure.length(), 4.0);
//!
//! let (pos, tangent) = contour.point(&measure, 0.5, Direction::End);
//! assert_eq!((pos.x, pos.y), (0.5, 0.0));
//! assert_eq!((tangent.x, tangent.y), (1.0, 0.0));
//!
//! assert_eq!(contour.winding(&measure, Point::new(0.25, 0.25)), -1);
//! ```
//!
//! A contour is immutable once built and freely shareable; a
//! [`ContourMeasure`] is owned by whoever built it and is not
//! synchronized, so concurrent queries need a handle per thread.

#![warn(missing_docs)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]

mod arc;
mod builder;
mod conic;
mod contour;
mod cubicbez;
mod curve;
mod line;
mod measure;
mod param_curve;
mod point;
mod quadbez;
mod rect;
mod rounded_rect;
mod size;
mod svg;
mod vec2;

pub use crate::arc::decompose_arc;
pub use crate::builder::{Path, PathBuilder};
pub use crate::conic::Conic;
pub use crate::contour::{
    CircleContour, Contour, Direction, PathFlags, RectContour, RoundedRectContour,
    StandardContour,
};
pub use crate::cubicbez::CubicBez;
pub use crate::curve::{Curve, PathEl, PathOp, SegmentReason, Verb};
pub use crate::line::Line;
pub use crate::measure::{ClosestPoint, ContourMeasure};
pub use crate::param_curve::{ParamCurve, ParamCurveCurvature, ParamCurveDeriv};
pub use crate::point::Point;
pub use crate::quadbez::QuadBez;
pub use crate::rect::Rect;
pub use crate::rounded_rect::{Corner, RoundedRect};
pub use crate::size::Size;
pub use crate::vec2::Vec2;

/// The flattening tolerance used where no caller-provided value is
/// available, matching the default of the surrounding path engine.
pub const DEFAULT_TOLERANCE: f64 = 0.5;
