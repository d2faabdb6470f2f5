// Library root for the planar shapes engine
//
// This file is the entry point for the library crate (planar_shapes)
// It declares all the modules that make up our library
//
// Leaves first:
// - point and transform are pure geometry
// - registry counts live shapes per kind
// - canvas is the drawing sink the shapes render into
// - shapes holds the `Shape` trait and every concrete kind
// - scene and config are what the demo binary drives

pub mod point;
pub mod transform;
pub mod registry;
pub mod canvas;
pub mod shapes;

// Demo support - owning collection and TOML configuration
pub mod scene;
pub mod config;

// Re-export commonly used types at the library root for convenience
// This allows users to write:
//   use planar_shapes::Circle;
// instead of:
//   use planar_shapes::shapes::Circle;
pub use canvas::{Canvas, Color, DrawCommand, ImageCanvas, Recorder};
pub use config::{ConfigError, DemoConfig, Phase, ShapeSpec};
pub use point::Point;
pub use registry::{instance_count, Registration, Registry, ShapeKind};
pub use scene::Scene;
pub use shapes::{
    Circle, EquilateralTriangle, Figure, Parallelogram, PointShape, Polygon, Rectangle,
    RegularHexagon, Segment, Shape, ShapeError, Square, Triangle, VertexRing,
};
pub use transform::{Axis, Transform};
