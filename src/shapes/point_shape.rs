use crate::canvas::{draw_marker, Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::{mirror_around, rotate_around, scale_around, Axis};

use super::{metrics_suffix, Shape};

/// A single point treated as a drawable shape
///
/// Unlike the other shapes, counting is opt-in: `new` builds an uncounted
/// point, `registered` asks the global registry to count it. Either way a
/// clone is never counted.
#[derive(Clone, Debug)]
pub struct PointShape {
    position: Point,
    registration: Registration,
}

impl PointShape {
    /// An uncounted point
    pub fn new(position: Point) -> Self {
        Self {
            position,
            registration: Registration::detached(),
        }
    }

    /// A point counted in the global registry
    pub fn registered(position: Point) -> Self {
        Self::registered_in(Registry::global(), position)
    }

    /// A point counted in `registry`
    pub fn registered_in(registry: &Registry, position: Point) -> Self {
        Self {
            position,
            registration: registry.register(ShapeKind::Point),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether this instance holds a registry slot
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }
}

// A point is its own centroid, so rotate, mirror and scale leave it where it
// is. They still go through the pivot functions like every other shape.
impl Shape for PointShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn area(&self) -> f64 {
        0.0
    }

    fn perimeter(&self) -> f64 {
        0.0
    }

    fn centroid(&self) -> Point {
        self.position
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position.move_by(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.position = rotate_around(self.position, self.centroid(), degrees);
    }

    fn mirror(&mut self, axis: Axis) {
        self.position = mirror_around(self.position, self.centroid(), axis);
    }

    fn scale(&mut self, factor: f64) {
        self.position = scale_around(self.position, self.centroid(), factor);
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        draw_marker(canvas, self.position, color);
    }

    fn describe(&self) -> String {
        format!("Point at {}{}", self.position, metrics_suffix(0.0, 0.0))
    }
}
