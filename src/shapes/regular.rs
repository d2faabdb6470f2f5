// Regular polygons built from a center and a side length
use crate::canvas::{Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::Axis;

use super::polygon::VertexRing;
use super::{format_points, metrics_suffix, Shape};

/// An equilateral triangle, apex up, centered on its centroid
///
/// Area and perimeter are derived from the current side length (the
/// distance between the first two vertices), so they follow any scaling.
#[derive(Clone, Debug)]
pub struct EquilateralTriangle {
    ring: VertexRing,
    registration: Registration,
}

impl EquilateralTriangle {
    pub fn new(center: Point, side: f64) -> Self {
        Self::new_in(Registry::global(), center, side)
    }

    pub fn new_in(registry: &Registry, center: Point, side: f64) -> Self {
        let h = side * 3f64.sqrt() / 2.0;
        let vertices = vec![
            Point::new(center.x, center.y - 2.0 * h / 3.0),
            Point::new(center.x - side / 2.0, center.y + h / 3.0),
            Point::new(center.x + side / 2.0, center.y + h / 3.0),
        ];
        Self {
            ring: VertexRing::new(vertices),
            registration: registry.register(ShapeKind::EquilateralTriangle),
        }
    }

    /// Current side length
    pub fn side(&self) -> f64 {
        self.ring.vertex(0).distance_to(self.ring.vertex(1))
    }

    pub fn vertices(&self) -> &[Point] {
        self.ring.vertices()
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }
}

impl Shape for EquilateralTriangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::EquilateralTriangle
    }

    fn area(&self) -> f64 {
        let s = self.side();
        s * s * 3f64.sqrt() / 4.0
    }

    fn perimeter(&self) -> f64 {
        3.0 * self.side()
    }

    fn centroid(&self) -> Point {
        self.ring.centroid()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ring.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.ring.rotate(degrees);
    }

    fn mirror(&mut self, axis: Axis) {
        self.ring.mirror(axis);
    }

    fn scale(&mut self, factor: f64) {
        self.ring.scale(factor);
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        self.ring.draw_edges(canvas, color);
    }

    fn describe(&self) -> String {
        format!(
            "Equilateral triangle side {:.2} vertices: {}{}",
            self.side(),
            format_points(self.ring.vertices()),
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}

/// A regular hexagon whose first vertex sits `side` to the right of center
///
/// For a regular hexagon the circumradius equals the side, so the metrics
/// use `R = |v0 - centroid|`.
#[derive(Clone, Debug)]
pub struct RegularHexagon {
    ring: VertexRing,
    registration: Registration,
}

impl RegularHexagon {
    pub fn new(center: Point, side: f64) -> Self {
        Self::new_in(Registry::global(), center, side)
    }

    pub fn new_in(registry: &Registry, center: Point, side: f64) -> Self {
        let vertices = (0..6)
            .map(|k| {
                let (sin, cos) = (60.0 * k as f64).to_radians().sin_cos();
                Point::new(center.x + side * cos, center.y + side * sin)
            })
            .collect();
        Self {
            ring: VertexRing::new(vertices),
            registration: registry.register(ShapeKind::RegularHexagon),
        }
    }

    /// Circumradius of the current geometry (equal to the side length)
    pub fn radius(&self) -> f64 {
        self.ring.vertex(0).distance_to(self.ring.centroid())
    }

    pub fn vertices(&self) -> &[Point] {
        self.ring.vertices()
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }
}

impl Shape for RegularHexagon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::RegularHexagon
    }

    fn area(&self) -> f64 {
        let r = self.radius();
        3.0 * 3f64.sqrt() / 2.0 * r * r
    }

    fn perimeter(&self) -> f64 {
        6.0 * self.radius()
    }

    fn centroid(&self) -> Point {
        self.ring.centroid()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ring.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.ring.rotate(degrees);
    }

    fn mirror(&mut self, axis: Axis) {
        self.ring.mirror(axis);
    }

    fn scale(&mut self, factor: f64) {
        self.ring.scale(factor);
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        self.ring.draw_edges(canvas, color);
    }

    fn describe(&self) -> String {
        format!(
            "Regular hexagon at {} side {:.2}{}",
            self.centroid(),
            self.radius(),
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}
