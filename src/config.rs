// Demo configuration
//
// Everything the demo binary needs (canvas, output directory, the shapes to
// build and the transform phases to replay) can come from a TOML file. Every
// section is optional; missing values fall back to the built-in demo. For
// example:
//
//     output_dir = "./output"
//
//     [canvas]
//     width = 800
//     height = 600
//
//     [[shapes]]
//     kind = "circle"
//     center = { x = 150.0, y = 260.0 }
//     radius = 60.0
//
//     [[phases]]
//     name = "rotate"
//     transform = { op = "rotate", degrees = 45.0 }

use crate::canvas::Color;
use crate::point::Point;
use crate::registry::{Registry, ShapeKind};
use crate::scene::Scene;
use crate::shapes::{
    Circle, EquilateralTriangle, Figure, Parallelogram, PointShape, Polygon, Rectangle,
    RegularHexagon, Segment, ShapeError, Square, Triangle,
};
use crate::transform::{Axis, Transform};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Where the phase images are written
    pub output_dir: PathBuf,
    pub canvas: CanvasConfig,
    /// Shapes rebuilt from scratch for every phase
    pub shapes: Vec<ShapeSpec>,
    /// Transform phases, each rendered as its own before/after image
    pub phases: Vec<Phase>,
}

/// Raster size and colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Color of the untouched scene
    pub original: Color,
    /// Color of the transformed scene
    pub transformed: Color,
}

/// One named transform step of the demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub transform: Transform,
}

impl Phase {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }
}

/// Description of one shape to build
///
/// Tagged by `kind`, e.g. `{ kind = "square", center = { x = 0.0, y = 0.0 }, side = 10.0 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Point {
        at: Point,
        /// Points are only counted when asked to be
        #[serde(default = "default_true")]
        registered: bool,
    },
    Segment {
        start: Point,
        end: Point,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Rectangle {
        top_left: Point,
        width: f64,
        height: f64,
    },
    Triangle {
        points: [Point; 3],
    },
    Polygon {
        vertices: Vec<Point>,
    },
    Parallelogram {
        p1: Point,
        p2: Point,
        p3: Point,
    },
    Square {
        center: Point,
        side: f64,
    },
    EquilateralTriangle {
        center: Point,
        side: f64,
    },
    RegularHexagon {
        center: Point,
        side: f64,
    },
}

fn default_true() -> bool {
    true
}

impl ShapeSpec {
    /// Which kind of shape this builds
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeSpec::Point { .. } => ShapeKind::Point,
            ShapeSpec::Segment { .. } => ShapeKind::Segment,
            ShapeSpec::Circle { .. } => ShapeKind::Circle,
            ShapeSpec::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeSpec::Triangle { .. } => ShapeKind::Triangle,
            ShapeSpec::Polygon { .. } => ShapeKind::Polygon,
            ShapeSpec::Parallelogram { .. } => ShapeKind::Parallelogram,
            ShapeSpec::Square { .. } => ShapeKind::Square,
            ShapeSpec::EquilateralTriangle { .. } => ShapeKind::EquilateralTriangle,
            ShapeSpec::RegularHexagon { .. } => ShapeKind::RegularHexagon,
        }
    }

    /// Construct the shape, counting it in `registry`
    ///
    /// Only a polygon with fewer than three vertices can fail.
    pub fn build(&self, registry: &Registry) -> Result<Figure, ShapeError> {
        let figure: Figure = match self {
            ShapeSpec::Point { at, registered } => {
                if *registered {
                    PointShape::registered_in(registry, *at).into()
                } else {
                    PointShape::new(*at).into()
                }
            }
            ShapeSpec::Segment { start, end } => Segment::new_in(registry, *start, *end).into(),
            ShapeSpec::Circle { center, radius } => {
                Circle::new_in(registry, *center, *radius).into()
            }
            ShapeSpec::Rectangle {
                top_left,
                width,
                height,
            } => Rectangle::new_in(registry, *top_left, *width, *height).into(),
            ShapeSpec::Triangle { points } => Triangle::new_in(registry, *points).into(),
            ShapeSpec::Polygon { vertices } => {
                Polygon::try_new_in(registry, vertices.clone())?.into()
            }
            ShapeSpec::Parallelogram { p1, p2, p3 } => {
                Parallelogram::new_in(registry, *p1, *p2, *p3).into()
            }
            ShapeSpec::Square { center, side } => Square::new_in(registry, *center, *side).into(),
            ShapeSpec::EquilateralTriangle { center, side } => {
                EquilateralTriangle::new_in(registry, *center, *side).into()
            }
            ShapeSpec::RegularHexagon { center, side } => {
                RegularHexagon::new_in(registry, *center, *side).into()
            }
        };
        Ok(figure)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: Color::NAVY,
            original: Color::WHITE,
            transformed: Color::RED,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            canvas: CanvasConfig::default(),
            shapes: default_shapes(),
            phases: default_phases(),
        }
    }
}

/// The built-in scene: one of every kind
///
/// The top row holds the free-point shapes, the bottom row the ring-based
/// ones.
fn default_shapes() -> Vec<ShapeSpec> {
    let p = Point::new;
    vec![
        ShapeSpec::Point {
            at: p(100.0, 250.0),
            registered: true,
        },
        ShapeSpec::Segment {
            start: p(200.0, 250.0),
            end: p(350.0, 300.0),
        },
        ShapeSpec::Circle {
            center: p(500.0, 300.0),
            radius: 50.0,
        },
        ShapeSpec::Rectangle {
            top_left: p(650.0, 250.0),
            width: 100.0,
            height: 80.0,
        },
        ShapeSpec::Triangle {
            points: [p(900.0, 230.0), p(950.0, 350.0), p(850.0, 350.0)],
        },
        ShapeSpec::Polygon {
            vertices: vec![
                p(1050.0, 230.0),
                p(1120.0, 270.0),
                p(1100.0, 350.0),
                p(1010.0, 350.0),
                p(990.0, 280.0),
            ],
        },
        ShapeSpec::Circle {
            center: p(150.0, 560.0),
            radius: 60.0,
        },
        ShapeSpec::Square {
            center: p(350.0, 560.0),
            side: 100.0,
        },
        ShapeSpec::Parallelogram {
            p1: p(520.0, 510.0),
            p2: p(620.0, 510.0),
            p3: p(650.0, 590.0),
        },
        ShapeSpec::EquilateralTriangle {
            center: p(850.0, 560.0),
            side: 120.0,
        },
        ShapeSpec::RegularHexagon {
            center: p(1050.0, 560.0),
            side: 60.0,
        },
    ]
}

/// The built-in script: move, rotate, scale, mirror
fn default_phases() -> Vec<Phase> {
    vec![
        Phase::new("move", Transform::Move { dx: 50.0, dy: 50.0 }),
        Phase::new("rotate", Transform::Rotate { degrees: 45.0 }),
        Phase::new("scale", Transform::Scale { factor: 0.8 }),
        Phase::new(
            "mirror",
            Transform::Mirror {
                axis: Axis::Horizontal,
            },
        ),
    ]
}

impl DemoConfig {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the renderer cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        for spec in &self.shapes {
            if let ShapeSpec::Polygon { vertices } = spec {
                if vertices.len() < 3 {
                    return Err(ConfigError::Invalid(
                        ShapeError::TooFewVertices { got: vertices.len() }.to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Build a fresh scene from `shapes`, counted in `registry`
    pub fn build_scene(&self, registry: &Registry) -> Result<Scene, ShapeError> {
        self.shapes.iter().map(|spec| spec.build(registry)).collect()
    }
}
