use crate::canvas::{draw_marker, Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::{mirror_around, rotate_around, scale_around, Axis};

use super::{format_points, metrics_suffix, Shape};

/// Area to squared-perimeter ratio below which a triangle counts as flat
/// (an equilateral triangle sits near 0.048)
const DEGENERATE_RATIO: f64 = 1e-10;

/// A triangle with three free vertices
///
/// `[Point; 3]` is a fixed-size array stored inline, so a triangle never
/// allocates. Collinear or repeated vertices are allowed and simply give a
/// zero area.
#[derive(Clone, Debug)]
pub struct Triangle {
    points: [Point; 3],
    registration: Registration,
}

impl Triangle {
    /// Create a triangle counted in the global registry
    pub fn new(points: [Point; 3]) -> Self {
        Self::new_in(Registry::global(), points)
    }

    /// Create a triangle counted in `registry`
    pub fn new_in(registry: &Registry, points: [Point; 3]) -> Self {
        Self {
            points,
            registration: registry.register(ShapeKind::Triangle),
        }
    }

    pub fn points(&self) -> [Point; 3] {
        self.points
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }

    /// True when the vertices are collinear (or repeated)
    ///
    /// Area is compared against the squared perimeter, so the answer does not
    /// depend on how large the triangle is or where it sits.
    pub fn is_degenerate(&self) -> bool {
        let perimeter = self.perimeter();
        perimeter == 0.0 || self.area() <= DEGENERATE_RATIO * perimeter * perimeter
    }

    /// Push every vertex through `f`, using the centroid as pivot
    fn map_points(&mut self, f: impl Fn(Point, Point) -> Point) {
        let center = self.centroid();
        for point in &mut self.points {
            *point = f(*point, center);
        }
    }
}

impl Shape for Triangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn area(&self) -> f64 {
        let [a, b, c] = self.points;
        // Half the absolute cross product of two edge vectors
        ((b - a).cross(c - a) / 2.0).abs()
    }

    fn perimeter(&self) -> f64 {
        let [a, b, c] = self.points;
        a.distance_to(b) + b.distance_to(c) + c.distance_to(a)
    }

    fn centroid(&self) -> Point {
        let [a, b, c] = self.points;
        Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for point in &mut self.points {
            point.move_by(dx, dy);
        }
    }

    fn rotate(&mut self, degrees: f64) {
        self.map_points(|p, c| rotate_around(p, c, degrees));
    }

    fn mirror(&mut self, axis: Axis) {
        self.map_points(|p, c| mirror_around(p, c, axis));
    }

    fn scale(&mut self, factor: f64) {
        self.map_points(|p, c| scale_around(p, c, factor));
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        for i in 0..3 {
            canvas.draw_line(self.points[i], self.points[(i + 1) % 3], color);
        }
        for point in self.points {
            draw_marker(canvas, point, color);
        }
    }

    fn describe(&self) -> String {
        format!(
            "Triangle vertices: {}{}",
            format_points(&self.points),
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}
