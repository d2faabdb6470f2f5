use crate::canvas::{draw_marker, Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::{mirror_around, Axis};
use std::f64::consts::PI;

use super::{metrics_suffix, Shape};

/// A circle with a center point and a radius
///
/// The `#[derive(...)]` macro generates `Clone` and `Debug`. Cloning goes
/// through `Registration::clone`, so the copy is not counted.
#[derive(Clone, Debug)]
pub struct Circle {
    /// Center point of the circle
    center: Point,

    /// Radius as given; a negative radius (e.g. after `scale(-1.0)`) describes
    /// the same circle as its absolute value
    radius: f64,

    registration: Registration,
}

impl Circle {
    /// Create a circle counted in the global registry
    pub fn new(center: Point, radius: f64) -> Self {
        Self::new_in(Registry::global(), center, radius)
    }

    /// Create a circle counted in `registry`
    pub fn new_in(registry: &Registry, center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            registration: registry.register(ShapeKind::Circle),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius.abs()
    }

    fn centroid(&self) -> Point {
        self.center
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center.move_by(dx, dy);
    }

    /// A circle looks the same at every angle
    fn rotate(&mut self, _degrees: f64) {}

    /// Mirrors the center about the circle's own centroid, which leaves it in
    /// place. (Mirroring about the coordinate origin would silently move the
    /// circle across the canvas.)
    fn mirror(&mut self, axis: Axis) {
        self.center = mirror_around(self.center, self.centroid(), axis);
    }

    /// Scales the radius; the center stays put
    fn scale(&mut self, factor: f64) {
        self.radius *= factor;
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        canvas.draw_circle(self.center, self.radius, color);
        draw_marker(canvas, self.center, color);
    }

    fn describe(&self) -> String {
        format!(
            "Circle at {} radius {:.2}{}",
            self.center,
            self.radius,
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}
