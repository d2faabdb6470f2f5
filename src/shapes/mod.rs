// This file declares the shapes module and its submodules
//
// Layout:
// - `Shape` is the capability contract every concrete shape implements
// - `Figure` is the owning sum type over all concrete kinds, so a scene can
//   hold a `Vec<Figure>` without boxing
// - `polygon::VertexRing` is the shared vertex-list helper composed into every
//   straight-edged shape (there is no base class to inherit from)

use crate::canvas::{Canvas, Color};
use crate::point::Point;
use crate::registry::ShapeKind;
use crate::transform::Axis;
use std::fmt;
use thiserror::Error;

mod circle;
mod parallelogram;
mod point_shape;
mod polygon;
mod rectangle;
mod regular;
mod segment;
mod triangle;

// Re-export the concrete shapes so users can write:
//   use planar_shapes::shapes::Circle;
// instead of:
//   use planar_shapes::shapes::circle::Circle;
pub use circle::Circle;
pub use parallelogram::{Parallelogram, Square};
pub use point_shape::PointShape;
pub use polygon::{Polygon, VertexRing};
pub use rectangle::{Rectangle, ROTATION_TOLERANCE_DEGREES};
pub use regular::{EquilateralTriangle, RegularHexagon};
pub use segment::Segment;
pub use triangle::Triangle;

/// Errors from fallible shape constructors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A polygon needs at least three vertices to have a centroid and edges
    #[error("a polygon needs at least 3 vertices, got {got}")]
    TooFewVertices { got: usize },
}

/// What every shape can do
///
/// All operations are total. Transforms mutate in place and pivot on the
/// shape's own centroid unless a shape documents otherwise (the circle ignores
/// rotation, the rectangle only rotates in quarter turns).
pub trait Shape {
    /// Which registry counter this shape belongs to
    fn kind(&self) -> ShapeKind;

    /// Enclosed area, never negative
    fn area(&self) -> f64;

    /// Length of the outline, never negative
    fn perimeter(&self) -> f64;

    /// Pivot used by rotate, mirror and scale
    fn centroid(&self) -> Point;

    /// Move every stored point by `(dx, dy)`
    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotate about the centroid by `degrees`
    fn rotate(&mut self, degrees: f64);

    /// Reflect across the horizontal or vertical line through the centroid
    fn mirror(&mut self, axis: Axis);

    /// Scale about the centroid by `factor`
    fn scale(&mut self, factor: f64);

    /// Emit the outline (and anchor markers) as primitive draw commands
    fn draw(&self, canvas: &mut dyn Canvas, color: Color);

    /// One-line summary: kind, defining geometry, area and perimeter
    fn describe(&self) -> String;
}

/// Common tail of every `describe()` string
pub(crate) fn metrics_suffix(area: f64, perimeter: f64) -> String {
    format!(" | area: {:.2} | perimeter: {:.2}", area, perimeter)
}

/// Join points as `(x1, y1), (x2, y2), ...`
pub(crate) fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Any concrete shape, owned
///
/// This enum wraps every shape kind, giving one type a collection can own
/// while each variant keeps its own geometry and behavior.
///
/// **Rust Concept: Enums as owning containers**
/// Dropping a `Figure` drops the shape inside it, which drops its
/// `Registration` and decrements the live counter. No manual `delete` pass.
#[derive(Clone, Debug)]
pub enum Figure {
    Point(PointShape),
    Segment(Segment),
    Circle(Circle),
    Rectangle(Rectangle),
    Triangle(Triangle),
    Polygon(Polygon),
    Parallelogram(Parallelogram),
    Square(Square),
    EquilateralTriangle(EquilateralTriangle),
    RegularHexagon(RegularHexagon),
}

impl Figure {
    /// Borrow the wrapped shape through the trait
    pub fn as_shape(&self) -> &dyn Shape {
        match self {
            Figure::Point(s) => s,
            Figure::Segment(s) => s,
            Figure::Circle(s) => s,
            Figure::Rectangle(s) => s,
            Figure::Triangle(s) => s,
            Figure::Polygon(s) => s,
            Figure::Parallelogram(s) => s,
            Figure::Square(s) => s,
            Figure::EquilateralTriangle(s) => s,
            Figure::RegularHexagon(s) => s,
        }
    }

    /// Mutably borrow the wrapped shape through the trait
    pub fn as_shape_mut(&mut self) -> &mut dyn Shape {
        match self {
            Figure::Point(s) => s,
            Figure::Segment(s) => s,
            Figure::Circle(s) => s,
            Figure::Rectangle(s) => s,
            Figure::Triangle(s) => s,
            Figure::Polygon(s) => s,
            Figure::Parallelogram(s) => s,
            Figure::Square(s) => s,
            Figure::EquilateralTriangle(s) => s,
            Figure::RegularHexagon(s) => s,
        }
    }
}

impl Shape for Figure {
    fn kind(&self) -> ShapeKind {
        self.as_shape().kind()
    }

    fn area(&self) -> f64 {
        self.as_shape().area()
    }

    fn perimeter(&self) -> f64 {
        self.as_shape().perimeter()
    }

    fn centroid(&self) -> Point {
        self.as_shape().centroid()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.as_shape_mut().translate(dx, dy)
    }

    fn rotate(&mut self, degrees: f64) {
        self.as_shape_mut().rotate(degrees)
    }

    fn mirror(&mut self, axis: Axis) {
        self.as_shape_mut().mirror(axis)
    }

    fn scale(&mut self, factor: f64) {
        self.as_shape_mut().scale(factor)
    }

    fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        self.as_shape().draw(canvas, color)
    }

    fn describe(&self) -> String {
        self.as_shape().describe()
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// `From` impls so `scene.push(Circle::new(..))` works for every kind
macro_rules! impl_from_shape {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Figure {
                fn from(shape: $variant) -> Self {
                    Figure::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(
    Segment,
    Circle,
    Rectangle,
    Triangle,
    Polygon,
    Parallelogram,
    Square,
    EquilateralTriangle,
    RegularHexagon,
);

impl From<PointShape> for Figure {
    fn from(shape: PointShape) -> Self {
        Figure::Point(shape)
    }
}

/// Helpers shared by the shape test modules
#[cfg(test)]
pub(crate) mod test_support {
    use super::{Figure, Shape};
    use crate::point::Point;
    use crate::transform::Axis;

    pub fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    pub fn assert_point_close(actual: Point, expected: Point) {
        assert!(
            actual.distance_to(expected) < 1e-6,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    /// Every coordinate a figure stores, flattened in storage order
    pub fn stored_coordinates(figure: &Figure) -> Vec<f64> {
        let points: Vec<Point> = match figure {
            Figure::Point(p) => vec![p.position()],
            Figure::Segment(s) => vec![s.start(), s.end()],
            Figure::Circle(c) => vec![c.center(), Point::new(c.radius(), 0.0)],
            Figure::Rectangle(r) => vec![r.top_left(), Point::new(r.width(), r.height())],
            Figure::Triangle(t) => t.points().to_vec(),
            Figure::Polygon(p) => p.vertices().to_vec(),
            Figure::Parallelogram(p) => p.vertices().to_vec(),
            Figure::Square(s) => s.vertices().to_vec(),
            Figure::EquilateralTriangle(t) => t.vertices().to_vec(),
            Figure::RegularHexagon(h) => h.vertices().to_vec(),
        };
        points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn assert_coordinates_close(figure: &Figure, expected: &[f64]) {
        let actual = stored_coordinates(figure);
        assert_eq!(actual.len(), expected.len(), "{}", figure);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{}: expected {:?}, got {:?}", figure, expected, actual);
        }
    }

    /// Area and perimeter must not change when the shape is moved
    pub fn check_translation_invariance(shape: &mut dyn Shape, dx: f64, dy: f64) {
        let (area, perimeter) = (shape.area(), shape.perimeter());
        let before = shape.centroid();
        shape.translate(dx, dy);
        assert_close(shape.area(), area);
        assert_close(shape.perimeter(), perimeter);
        assert_point_close(shape.centroid(), Point::new(before.x + dx, before.y + dy));
    }

    /// Rigid motions and similarity scaling for shapes that rotate freely
    pub fn check_rigid_and_scale(shape: &mut dyn Shape) {
        let (area, perimeter) = (shape.area(), shape.perimeter());
        let centroid = shape.centroid();

        shape.rotate(37.0);
        assert_close(shape.area(), area);
        assert_close(shape.perimeter(), perimeter);
        assert_point_close(shape.centroid(), centroid);

        shape.mirror(Axis::Horizontal);
        shape.mirror(Axis::Vertical);
        assert_close(shape.area(), area);
        assert_close(shape.perimeter(), perimeter);
        assert_point_close(shape.centroid(), centroid);

        shape.scale(2.5);
        assert_close(shape.area(), area * 6.25);
        assert_close(shape.perimeter(), perimeter * 2.5);

        shape.scale(-0.4);
        assert_close(shape.area(), area);
        assert_close(shape.perimeter(), perimeter);
        assert_point_close(shape.centroid(), centroid);
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::canvas::Recorder;
    use crate::registry::Registry;
    use crate::transform::Transform;

    fn one_of_each(registry: &Registry) -> Vec<Figure> {
        let p = Point::new;
        vec![
            PointShape::registered_in(registry, p(1.0, 2.0)).into(),
            Segment::new_in(registry, p(0.0, 0.0), p(3.0, 4.0)).into(),
            Circle::new_in(registry, p(5.0, 5.0), 2.0).into(),
            Rectangle::new_in(registry, p(0.0, 0.0), 4.0, 6.0).into(),
            Triangle::new_in(registry, [p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)]).into(),
            Polygon::new_in(registry, vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)])
                .into(),
            Parallelogram::new_in(registry, p(0.0, 0.0), p(4.0, 0.0), p(5.0, 2.0)).into(),
            Square::new_in(registry, p(10.0, 10.0), 4.0).into(),
            EquilateralTriangle::new_in(registry, p(0.0, 0.0), 2.0).into(),
            RegularHexagon::new_in(registry, p(0.0, 0.0), 10.0).into(),
        ]
    }

    #[test]
    fn test_figure_delegates_kind() {
        let registry = Registry::new();
        let figures = one_of_each(&registry);
        let kinds: Vec<ShapeKind> = figures.iter().map(|f| f.kind()).collect();
        assert_eq!(kinds, ShapeKind::ALL.to_vec());
    }

    #[test]
    fn test_every_kind_counts_once() {
        let registry = Registry::new();
        let figures = one_of_each(&registry);
        for kind in ShapeKind::ALL {
            assert_eq!(registry.count(kind), 1, "{} should be counted once", kind);
        }

        // Copies never register
        let copies = figures.clone();
        assert_eq!(registry.total(), ShapeKind::ALL.len());
        drop(copies);
        assert_eq!(registry.total(), ShapeKind::ALL.len());

        drop(figures);
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn test_translation_invariance_for_all_kinds() {
        let registry = Registry::new();
        for mut figure in one_of_each(&registry) {
            check_translation_invariance(&mut figure, 12.5, -7.25);
        }
    }

    #[test]
    fn test_double_mirror_restores_every_coordinate() {
        let registry = Registry::new();
        for mut figure in one_of_each(&registry) {
            let before = stored_coordinates(&figure);
            figure.mirror(Axis::Horizontal);
            figure.mirror(Axis::Horizontal);
            assert_coordinates_close(&figure, &before);
            figure.mirror(Axis::Vertical);
            figure.mirror(Axis::Vertical);
            assert_coordinates_close(&figure, &before);
        }
    }

    #[test]
    fn test_single_mirror_moves_asymmetric_shapes() {
        let registry = Registry::new();
        let corners = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)];
        let mut figure: Figure = Triangle::new_in(&registry, corners).into();
        let before = stored_coordinates(&figure);
        figure.mirror(Axis::Vertical);
        assert_ne!(stored_coordinates(&figure), before);
    }

    #[test]
    fn test_rotate_then_inverse_restores_every_coordinate() {
        let registry = Registry::new();
        // Quarter turns are exact for the rectangle too, 37 degrees is a no-op for it
        for degrees in [90.0, 180.0, -270.0, 37.0] {
            let rotate = Transform::Rotate { degrees };
            let Some(undo) = rotate.inverse() else {
                panic!("{} has an inverse", rotate);
            };
            for mut figure in one_of_each(&registry) {
                let before = stored_coordinates(&figure);
                rotate.apply(&mut figure);
                undo.apply(&mut figure);
                assert_coordinates_close(&figure, &before);
            }
        }
    }

    #[test]
    fn test_every_invertible_transform_round_trips() {
        let registry = Registry::new();
        let script = [
            Transform::Move { dx: 12.5, dy: -3.0 },
            Transform::Mirror { axis: Axis::Horizontal },
            Transform::Scale { factor: 0.8 },
            Transform::Scale { factor: -2.0 },
        ];
        for transform in script {
            let Some(undo) = transform.inverse() else {
                panic!("{} has an inverse", transform);
            };
            for mut figure in one_of_each(&registry) {
                let before = stored_coordinates(&figure);
                transform.apply(&mut figure);
                undo.apply(&mut figure);
                assert_coordinates_close(&figure, &before);
            }
        }
    }

    #[test]
    fn test_metrics_never_negative() {
        let registry = Registry::new();
        for mut figure in one_of_each(&registry) {
            figure.scale(-3.0);
            assert!(figure.area() >= 0.0, "{}", figure);
            assert!(figure.perimeter() >= 0.0, "{}", figure);
        }
    }

    #[test]
    fn test_display_matches_describe() {
        let registry = Registry::new();
        let figure: Figure = Circle::new_in(&registry, Point::new(1.0, 1.0), 1.0).into();
        assert_eq!(figure.to_string(), figure.describe());
        assert!(figure.to_string().starts_with("Circle"));
    }

    #[test]
    fn test_draw_does_not_mutate() {
        let registry = Registry::new();
        let mut rec = Recorder::new();
        for figure in one_of_each(&registry) {
            let before = figure.describe();
            figure.draw(&mut rec, Color::WHITE);
            assert_eq!(figure.describe(), before);
        }
        assert!(!rec.commands.is_empty());
    }

    #[test]
    fn test_point_zero_metrics() {
        let registry = Registry::new();
        let figures = one_of_each(&registry);
        assert_eq!(figures[0].area(), 0.0);
        assert_eq!(figures[0].perimeter(), 0.0);
        assert_eq!(figures[1].area(), 0.0);
        assert_close(figures[1].perimeter(), 5.0);
    }
}
