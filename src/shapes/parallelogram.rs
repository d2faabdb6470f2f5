use crate::canvas::{Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::Axis;

use super::polygon::VertexRing;
use super::{format_points, metrics_suffix, Shape};

/// A parallelogram given by three consecutive corners
///
/// The fourth corner closes the figure: `p4 = p1 + (p3 - p2)`.
#[derive(Clone, Debug)]
pub struct Parallelogram {
    ring: VertexRing,
    registration: Registration,
}

impl Parallelogram {
    /// Create a parallelogram counted in the global registry
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Self::new_in(Registry::global(), p1, p2, p3)
    }

    /// Create a parallelogram counted in `registry`
    pub fn new_in(registry: &Registry, p1: Point, p2: Point, p3: Point) -> Self {
        Self::with_registration(p1, p2, p3, registry.register(ShapeKind::Parallelogram))
    }

    /// An uncounted parallelogram, used as the geometry inside other shapes
    pub(crate) fn detached(p1: Point, p2: Point, p3: Point) -> Self {
        Self::with_registration(p1, p2, p3, Registration::detached())
    }

    fn with_registration(p1: Point, p2: Point, p3: Point, registration: Registration) -> Self {
        let p4 = p1 + (p3 - p2);
        Self {
            ring: VertexRing::new(vec![p1, p2, p3, p4]),
            registration,
        }
    }

    /// The four corners, the computed one last
    pub fn vertices(&self) -> &[Point] {
        self.ring.vertices()
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }
}

impl Shape for Parallelogram {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Parallelogram
    }

    fn area(&self) -> f64 {
        let v0 = self.ring.vertex(0);
        (self.ring.vertex(1) - v0).cross(self.ring.vertex(3) - v0).abs()
    }

    fn perimeter(&self) -> f64 {
        let side_a = self.ring.vertex(0).distance_to(self.ring.vertex(1));
        let side_b = self.ring.vertex(1).distance_to(self.ring.vertex(2));
        2.0 * (side_a + side_b)
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
            "Parallelogram vertices: {}{}",
            format_points(self.ring.vertices()),
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}

/// A square given by its center and side length
///
/// Geometrically a square is a parallelogram with right angles, so it holds
/// one (uncounted) and forwards every operation to it. Only the square itself
/// shows up in the registry.
#[derive(Clone, Debug)]
pub struct Square {
    base: Parallelogram,
    registration: Registration,
}

impl Square {
    /// Create a square counted in the global registry
    pub fn new(center: Point, side: f64) -> Self {
        Self::new_in(Registry::global(), center, side)
    }

    /// Create a square counted in `registry`
    pub fn new_in(registry: &Registry, center: Point, side: f64) -> Self {
        let half = side / 2.0;
        let base = Parallelogram::detached(
            Point::new(center.x - half, center.y - half),
            Point::new(center.x + half, center.y - half),
            Point::new(center.x + half, center.y + half),
        );
        Self {
            base,
            registration: registry.register(ShapeKind::Square),
        }
    }

    /// Current side length
    pub fn side(&self) -> f64 {
        let v = self.base.vertices();
        v[0].distance_to(v[1])
    }

    pub fn center(&self) -> Point {
        self.base.centroid()
    }

    pub fn vertices(&self) -> &[Point] {
        self.base.vertices()
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }
}

impl Shape for Square {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
    }

    fn area(&self) -> f64 {
        self.base.area()
    }

    fn perimeter(&self) -> f64 {
        self.base.perimeter()
    }

    fn centroid(&self) -> Point {
        self.base.centroid()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.base.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.base.rotate(degrees);
    }

    fn mirror(&mut self, axis: Axis) {
        self.base.mirror(axis);
    }

    fn scale(&mut self, factor: f64) {
        self.base.scale(factor);
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        self.base.draw(canvas, color);
    }

    fn describe(&self) -> String {
        format!(
            "Square at {} side {:.2}{}",
            self.center(),
            self.side(),
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}
