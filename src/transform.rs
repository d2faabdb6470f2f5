// Pivot-based transform primitives shared by every shape
//
// Every shape transform is expressed as "pick a pivot (usually the centroid),
// then push each stored point through one of these three functions". They are
// pure: the input point and the pivot are taken by value and a new point is
// returned.

use crate::point::Point;
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which line through the pivot a mirror reflects across
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Reflect across the horizontal line through the pivot (flips `y`)
    Horizontal,
    /// Reflect across the vertical line through the pivot (flips `x`)
    Vertical,
}

/// Rotate `p` around `center` by `degrees`
///
/// Uses the standard rotation matrix on `p - center`. No normalization of the
/// angle happens here: negative angles and angles above 360 are fine.
pub fn rotate_around(p: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = p - center;
    Point::new(
        d.x * cos - d.y * sin + center.x,
        d.x * sin + d.y * cos + center.y,
    )
}

/// Reflect `p` across the horizontal or vertical line through `center`
pub fn mirror_around(p: Point, center: Point, axis: Axis) -> Point {
    match axis {
        Axis::Horizontal => Point::new(p.x, 2.0 * center.y - p.y),
        Axis::Vertical => Point::new(2.0 * center.x - p.x, p.y),
    }
}

/// Scale `p` away from (or toward) `center` by `factor`
///
/// A negative factor sends the point through the pivot to the other side.
pub fn scale_around(p: Point, center: Point, factor: f64) -> Point {
    center + (p - center) * factor
}

/// One of the four shape operations, as a value
///
/// The demo script and the TOML config name phases with this type, e.g.
/// `{ op = "rotate", degrees = 45.0 }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Transform {
    Move { dx: f64, dy: f64 },
    Rotate { degrees: f64 },
    Mirror { axis: Axis },
    Scale { factor: f64 },
}

impl Transform {
    /// Apply this transform to a shape in place
    pub fn apply(&self, shape: &mut dyn Shape) {
        match *self {
            Transform::Move { dx, dy } => shape.translate(dx, dy),
            Transform::Rotate { degrees } => shape.rotate(degrees),
            Transform::Mirror { axis } => shape.mirror(axis),
            Transform::Scale { factor } => shape.scale(factor),
        }
    }

    /// The transform that undoes this one (for the rectangle's quantized
    /// rotation this only holds for the quantized angles)
    ///
    /// A zero or non-finite scale collapses the shape, so it has no inverse.
    pub fn inverse(&self) -> Option<Transform> {
        let inverse = match *self {
            Transform::Move { dx, dy } => Transform::Move { dx: -dx, dy: -dy },
            Transform::Rotate { degrees } => Transform::Rotate { degrees: -degrees },
            Transform::Mirror { axis } => Transform::Mirror { axis },
            Transform::Scale { factor } if factor == 0.0 || !factor.is_finite() => return None,
            Transform::Scale { factor } => Transform::Scale {
                factor: 1.0 / factor,
            },
        };
        Some(inverse)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Move { dx, dy } => write!(f, "move (dx={}, dy={})", dx, dy),
            Transform::Rotate { degrees } => write!(f, "rotate ({} degrees)", degrees),
            Transform::Mirror { axis: Axis::Horizontal } => write!(f, "mirror (horizontal)"),
            Transform::Mirror { axis: Axis::Vertical } => write!(f, "mirror (vertical)"),
            Transform::Scale { factor } => write!(f, "scale ({}x)", factor),
        }
    }
}
