use crate::canvas::{Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::{mirror_around, rotate_around, scale_around, Axis};

use super::{format_points, metrics_suffix, Shape, ShapeError};

/// An ordered, implicitly closed list of at least three vertices
///
/// This is the shared geometry behind every straight-edged shape built from
/// a vertex list (general polygons, parallelograms, squares and the regular
/// shapes). Each of those shapes owns a `VertexRing` and forwards to it
/// instead of inheriting from a base class.
///
/// **Rust Concept: Composition over inheritance**
/// There is no `extends` in Rust. Shapes that share behavior hold the shared
/// part as a field and call into it, so each shape still decides for itself
/// how area and perimeter are computed.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexRing {
    vertices: Vec<Point>,
}

impl VertexRing {
    /// Minimum number of vertices a ring can have
    pub const MIN_VERTICES: usize = 3;

    /// Build a ring from its vertices
    ///
    /// # Panics
    /// Panics when given fewer than three vertices. Use `try_new` when the
    /// vertex list comes from outside the program.
    pub fn new(vertices: Vec<Point>) -> Self {
        assert!(
            vertices.len() >= Self::MIN_VERTICES,
            "a polygon needs at least {} vertices, got {}",
            Self::MIN_VERTICES,
            vertices.len()
        );
        Self { vertices }
    }

    /// Build a ring, rejecting short vertex lists instead of panicking
    pub fn try_new(vertices: Vec<Point>) -> Result<Self, ShapeError> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(ShapeError::TooFewVertices { got: vertices.len() });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Vertex `i`, wrapping around so `vertex(len)` is `vertex(0)`
    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i % self.vertices.len()]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false: a ring has at least three vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Closed edges `(v[i], v[i + 1 mod n])` in order
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..self.vertices.len()).map(move |i| (self.vertex(i), self.vertex(i + 1)))
    }

    /// Arithmetic mean of the vertices
    pub fn centroid(&self) -> Point {
        // The ring is never empty, so the mean always exists
        Point::mean(&self.vertices).unwrap_or_default()
    }

    /// Absolute shoelace area of the closed ring
    pub fn shoelace_area(&self) -> f64 {
        let twice_signed: f64 = self.edges().map(|(a, b)| a.cross(b)).sum();
        (twice_signed / 2.0).abs()
    }

    /// Sum of the closed edge lengths
    pub fn edge_length_sum(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance_to(b)).sum()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            v.move_by(dx, dy);
        }
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.map_vertices(|p, c| rotate_around(p, c, degrees));
    }

    pub fn mirror(&mut self, axis: Axis) {
        self.map_vertices(|p, c| mirror_around(p, c, axis));
    }

    pub fn scale(&mut self, factor: f64) {
        self.map_vertices(|p, c| scale_around(p, c, factor));
    }

    /// Emit one line per closed edge
    pub fn draw_edges(&self, canvas: &mut dyn Canvas, color: Color) {
        for (from, to) in self.edges() {
            canvas.draw_line(from, to, color);
        }
    }

    /// Push every vertex through `f` with the centroid (computed once, before
    /// any vertex moves) as pivot
    fn map_vertices(&mut self, f: impl Fn(Point, Point) -> Point) {
        let center = self.centroid();
        for v in &mut self.vertices {
            *v = f(*v, center);
        }
    }
}

/// A general simple polygon
#[derive(Clone, Debug)]
pub struct Polygon {
    ring: VertexRing,
    registration: Registration,
}

impl Polygon {
    /// Create a polygon counted in the global registry
    ///
    /// # Panics
    /// Panics when given fewer than three vertices.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self::new_in(Registry::global(), vertices)
    }

    /// Create a polygon counted in `registry`
    ///
    /// # Panics
    /// Panics when given fewer than three vertices.
    pub fn new_in(registry: &Registry, vertices: Vec<Point>) -> Self {
        // Validate before registering so a failed construction never counts
        let ring = VertexRing::new(vertices);
        Self {
            ring,
            registration: registry.register(ShapeKind::Polygon),
        }
    }

    pub fn try_new(vertices: Vec<Point>) -> Result<Self, ShapeError> {
        Self::try_new_in(Registry::global(), vertices)
    }

    pub fn try_new_in(registry: &Registry, vertices: Vec<Point>) -> Result<Self, ShapeError> {
        let ring = VertexRing::try_new(vertices)?;
        Ok(Self {
            ring,
            registration: registry.register(ShapeKind::Polygon),
        })
    }

    pub fn ring(&self) -> &VertexRing {
        &self.ring
    }

    pub fn vertices(&self) -> &[Point] {
        self.ring.vertices()
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }
}

impl Shape for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn area(&self) -> f64 {
        self.ring.shoelace_area()
    }

    fn perimeter(&self) -> f64 {
        self.ring.edge_length_sum()
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
            "Polygon with {} vertices: {}{}",
            self.ring.len(),
            format_points(self.ring.vertices()),
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}
