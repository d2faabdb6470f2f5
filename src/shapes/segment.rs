use crate::canvas::{draw_marker, Canvas, Color};
use crate::point::Point;
use crate::registry::{Registration, Registry, ShapeKind};
use crate::transform::{mirror_around, rotate_around, scale_around, Axis};

use super::{metrics_suffix, Shape};

/// A straight line segment between two points
///
/// Zero area; its "perimeter" is its length.
#[derive(Clone, Debug)]
pub struct Segment {
    start: Point,
    end: Point,
    registration: Registration,
}

impl Segment {
    /// Create a segment counted in the global registry
    pub fn new(start: Point, end: Point) -> Self {
        Self::new_in(Registry::global(), start, end)
    }

    /// Create a segment counted in `registry`
    pub fn new_in(registry: &Registry, start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            registration: registry.register(ShapeKind::Segment),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Whether this instance holds a registry slot (copies never do)
    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Apply `f` to both endpoints with the midpoint as pivot
    fn map_points(&mut self, f: impl Fn(Point, Point) -> Point) {
        let center = self.centroid();
        self.start = f(self.start, center);
        self.end = f(self.end, center);
    }
}

impl Shape for Segment {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Segment
    }

    fn area(&self) -> f64 {
        0.0
    }

    fn perimeter(&self) -> f64 {
        self.length()
    }

    fn centroid(&self) -> Point {
        self.start.midpoint(self.end)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.start.move_by(dx, dy);
        self.end.move_by(dx, dy);
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
        canvas.draw_line(self.start, self.end, color);
        draw_marker(canvas, self.start, color);
        draw_marker(canvas, self.end, color);
    }

    fn describe(&self) -> String {
        format!(
            "Segment from {} to {}{}",
            self.start,
            self.end,
            metrics_suffix(self.area(), self.perimeter())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, Recorder};
    use crate::shapes::test_support::*;

    fn segment(registry: &Registry) -> Segment {
        Segment::new_in(registry, Point::new(200.0, 250.0), Point::new(350.0, 300.0))
    }

    #[test]
    fn test_length_and_midpoint() {
        let registry = Registry::new();
        let s = Segment::new_in(&registry, Point::new(0.0, 0.0), Point::new(6.0, 8.0));
        assert_eq!(s.perimeter(), 10.0);
        assert_eq!(s.area(), 0.0);
        assert_eq!(s.centroid(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_rotate_about_midpoint() {
        let registry = Registry::new();
        let mut s = Segment::new_in(&registry, Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        s.rotate(90.0);
        assert_point_close(s.start(), Point::new(1.0, -1.0));
        assert_point_close(s.end(), Point::new(1.0, 1.0));

        s.rotate(-90.0);
        assert_point_close(s.start(), Point::new(0.0, 0.0));
        assert_point_close(s.end(), Point::new(2.0, 0.0));
    }

    #[test]
    fn test_rigid_and_scale() {
        let registry = Registry::new();
        let mut s = segment(&registry);
        let length = s.length();
        let mid = s.centroid();

        s.rotate(45.0);
        s.mirror(Axis::Vertical);
        assert_close(s.length(), length);
        assert_point_close(s.centroid(), mid);

        s.scale(1.5);
        assert_close(s.length(), length * 1.5);
        assert_point_close(s.centroid(), mid);
    }

    #[test]
    fn test_mirror_twice_restores_endpoints() {
        let registry = Registry::new();
        let mut s = segment(&registry);
        s.mirror(Axis::Horizontal);
        assert_point_close(s.start(), Point::new(200.0, 300.0));
        s.mirror(Axis::Horizontal);
        assert_point_close(s.start(), Point::new(200.0, 250.0));
        assert_point_close(s.end(), Point::new(350.0, 300.0));
    }

    #[test]
    fn test_draw_line_and_end_markers() {
        let registry = Registry::new();
        let s = segment(&registry);
        let mut rec = Recorder::new();
        s.draw(&mut rec, Color::WHITE);

        assert_eq!(rec.line_count(), 1);
        assert_eq!(rec.marker_count(), 2);
        assert_eq!(
            rec.commands[0],
            DrawCommand::Line {
                from: Point::new(200.0, 250.0),
                to: Point::new(350.0, 300.0),
                color: Color::WHITE,
            }
        );
    }

    #[test]
    fn test_registry_counts() {
        let registry = Registry::new();
        let a = segment(&registry);
        let b = segment(&registry);
        let copy = a.clone();
        assert_eq!(registry.count(ShapeKind::Segment), 2);
        drop(a);
        drop(copy);
        assert_eq!(registry.count(ShapeKind::Segment), 1);
        drop(b);
        assert_eq!(registry.count(ShapeKind::Segment), 0);
    }

    #[test]
    fn test_describe() {
        let registry = Registry::new();
        let s = Segment::new_in(&registry, Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(
            s.describe(),
            "Segment from (0.00, 0.00) to (3.00, 4.00) | area: 0.00 | perimeter: 5.00"
        );
    }
}
