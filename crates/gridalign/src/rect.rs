//! Axis aligned bounding boxes.

use approx::{AbsDiffEq, RelativeEq};

use crate::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    top_left: Point,
    bottom_right: Point,
}

impl Rect {
    /// Any two opposite corners, in any order
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let top_left = Point::new(p1.x().min(p2.x()), p1.y().max(p2.y()));
        let bottom_right = Point::new(p1.x().max(p2.x()), p1.y().min(p2.y()));

        Rect { top_left, bottom_right }
    }

    pub fn from_nw_se(nw: Point, se: Point) -> Self {
        Rect {
            top_left: nw,
            bottom_right: se,
        }
    }

    /// Smallest rectangle containing all the points, None for an empty iterator
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let (min_x, max_x, min_y, max_y) = points.into_iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_x, max_x, min_y, max_y), point| {
                (
                    min_x.min(point.x()),
                    max_x.max(point.x()),
                    min_y.min(point.y()),
                    max_y.max(point.y()),
                )
            },
        );

        if min_x > max_x || min_y > max_y {
            return None;
        }

        Some(Rect::from_nw_se(Point::new(min_x, max_y), Point::new(max_x, min_y)))
    }

    pub fn min_x(&self) -> f64 {
        self.top_left.x()
    }

    pub fn max_x(&self) -> f64 {
        self.bottom_right.x()
    }

    pub fn min_y(&self) -> f64 {
        self.bottom_right.y()
    }

    pub fn max_y(&self) -> f64 {
        self.top_left.y()
    }

    /// `(min_x, min_y, max_x, max_y)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.min_x(), self.min_y(), self.max_x(), self.max_y())
    }

    pub fn width(&self) -> f64 {
        (self.bottom_right.x() - self.top_left.x()).abs()
    }

    pub fn height(&self) -> f64 {
        (self.top_left.y() - self.bottom_right.y()).abs()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.bottom_right.x(), self.top_left.y())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x(), self.bottom_right.y())
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }
}

impl AbsDiffEq for Rect {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.top_left.abs_diff_eq(&other.top_left, epsilon) && self.bottom_right.abs_diff_eq(&other.bottom_right, epsilon)
    }
}

impl RelativeEq for Rect {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.top_left.relative_eq(&other.top_left, epsilon, max_relative)
            && self.bottom_right.relative_eq(&other.bottom_right, epsilon, max_relative)
    }
}
