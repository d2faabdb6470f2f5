use crate::canvas::{draw_marker, Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::Axis;

use super::{metrics_suffix, Shape};

/// How close (in degrees, exclusive) an angle must be to 90, 180 or 270 for
/// a rectangle rotation to take effect
pub const ROTATION_TOLERANCE_DEGREES: f64 = 1.0;

/// An axis-aligned rectangle stored as top-left corner, width and height
///
/// Keeping the rectangle axis-aligned is what makes drawing a single
/// rectangle command and area a single multiplication. Rotation is therefore
/// quantized to quarter turns (see `rotate` below).
#[derive(Clone, Debug)]
pub struct Rectangle {
    top_left: Point,
    width: f64,
    height: f64,
    registration: Registration,
}

/// Result of snapping an arbitrary angle to what an axis-aligned rectangle
/// can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterTurn {
    /// Near 90 or 270: dimensions swap
    Odd,
    /// Near 180: footprint unchanged
    Half,
    /// Anything else: the rotation is ignored
    Ignored,
}

impl QuarterTurn {
    fn classify(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let near = |target: f64| (normalized - target).abs() < ROTATION_TOLERANCE_DEGREES;

        if near(90.0) || near(270.0) {
            QuarterTurn::Odd
        } else if near(180.0) {
            QuarterTurn::Half
        } else {
            QuarterTurn::Ignored
        }
    }
}

impl Rectangle {
    /// Create a rectangle counted in the global registry
    pub fn new(top_left: Point, width: f64, height: f64) -> Self {
        Self::new_in(Registry::global(), top_left, width, height)
    }

    /// Create a rectangle counted in `registry`
    pub fn new_in(registry: &Registry, top_left: Point, width: f64, height: f64) -> Self {
        Self {
            top_left,
            width,
            height,
            registration: registry.register(ShapeKind::Rectangle),
        }
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }

    /// Corners in drawing order: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        let Point { x, y } = self.top_left;
        [
            Point::new(x, y),
            Point::new(x + self.width, y),
            Point::new(x, y + self.height),
            Point::new(x + self.width, y + self.height),
        ]
    }

    /// Put the top-left corner where it must be for the current size to be
    /// centered on `center`
    fn recenter(&mut self, center: Point) {
        self.top_left = Point::new(center.x - self.width / 2.0, center.y - self.height / 2.0);
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn area(&self) -> f64 {
        (self.width * self.height).abs()
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width.abs() + self.height.abs())
    }

    fn centroid(&self) -> Point {
        Point::new(
            self.top_left.x + self.width / 2.0,
            self.top_left.y + self.height / 2.0,
        )
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.top_left.move_by(dx, dy);
    }

    /// Quantized rotation about the centroid
    ///
    /// The angle is normalized into `[0, 360)`. Within the tolerance band of
    /// 90 or 270 the width and height swap; within the band of 180 the
    /// rectangle is re-centered with the same size; any other angle leaves the
    /// rectangle exactly as it was.
    fn rotate(&mut self, degrees: f64) {
        let center = self.centroid();
        match QuarterTurn::classify(degrees) {
            QuarterTurn::Odd => {
                std::mem::swap(&mut self.width, &mut self.height);
                self.recenter(center);
            }
            QuarterTurn::Half => self.recenter(center),
            QuarterTurn::Ignored => {}
        }
    }

    /// Reflect the far edge through the centroid, which for an axis-aligned
    /// rectangle maps the footprint onto itself
    fn mirror(&mut self, axis: Axis) {
        let center = self.centroid();
        match axis {
            Axis::Horizontal => self.top_left.y = 2.0 * center.y - self.top_left.y - self.height,
            Axis::Vertical => self.top_left.x = 2.0 * center.x - self.top_left.x - self.width,
        }
    }

    fn scale(&mut self, factor: f64) {
        let center = self.centroid();
        self.width *= factor;
        self.height *= factor;
        self.recenter(center);
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        canvas.draw_rect(self.top_left, self.width, self.height, color);
        for corner in self.corners() {
            draw_marker(canvas, corner, color);
        }
    }

    fn describe(&self) -> String {
        format!(
            "Rectangle at {} width {:.2} height {:.2}{}",
            self.top_left,
            self.width,
            self.height,
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}
