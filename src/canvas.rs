// Drawing sinks that shapes render themselves into
//
// Shapes only know the `Canvas` trait. Two sinks ship with the crate:
// - `Recorder` keeps the primitive commands in order (tests, diagnostics)
// - `ImageCanvas` rasterizes them into an `RgbaImage` with imageproc

use crate::point::Point;

// Image types from the image crate
// Rgba = Red, Green, Blue, Alpha (color with transparency)
use image::{ImageResult, Rgba, RgbaImage};

// Drawing functions from imageproc
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// An RGBA color, one byte per channel
///
/// Stored as a plain array so it serializes without any help from the image
/// crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const RED: Color = Color([255, 0, 0, 255]);
    pub const YELLOW: Color = Color([255, 255, 0, 255]);

    /// Fully opaque color from red, green and blue
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 255])
    }

    /// Deep blue background the second demo used
    pub const NAVY: Color = Color::rgb(20, 20, 40);
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba(color.0)
    }
}

/// The drawing sink a shape renders into
///
/// Only primitive commands. The color is passed with every call, so a sink
/// never has to keep a "current color".
pub trait Canvas {
    /// Straight line from `from` to `to`
    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    /// Circle outline
    fn draw_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Filled disc, used for vertex markers
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Axis-aligned rectangle outline
    fn draw_rect(&mut self, top_left: Point, width: f64, height: f64, color: Color);
}

/// Radius of the dot drawn at point-like anchors (points, segment ends,
/// circle centers, rectangle corners, triangle vertices)
pub const MARKER_RADIUS: f64 = 2.0;

/// Draw the marker dot for an anchor point
pub fn draw_marker(canvas: &mut dyn Canvas, at: Point, color: Color) {
    canvas.fill_circle(at, MARKER_RADIUS, color);
}

/// One primitive drawing command, as captured by `Recorder`
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line { from: Point, to: Point, color: Color },
    Circle { center: Point, radius: f64, color: Color },
    FilledCircle { center: Point, radius: f64, color: Color },
    Rect { top_left: Point, width: f64, height: f64, color: Color },
}

/// A canvas that only remembers what it was asked to draw
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of line commands recorded so far
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Number of marker dots recorded so far
    pub fn marker_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FilledCircle { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for Recorder {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands
            .push(DrawCommand::FilledCircle { center, radius, color });
    }

    fn draw_rect(&mut self, top_left: Point, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::Rect {
            top_left,
            width,
            height,
            color,
        });
    }
}

/// A raster canvas backed by an `RgbaImage`
///
/// Coordinates are pixels with `y` growing downwards, exactly like the window
/// the shapes were first drawn in. Anything outside the image is clipped by
/// imageproc, so shapes that wander off-screen after a transform are safe.
pub struct ImageCanvas {
    image: RgbaImage,
}

impl ImageCanvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background.into()),
        }
    }

    /// Wrap an existing image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Give up the canvas and keep the pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Save as an image file; the format follows the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.image.save(path)
    }
}

/// Round a float coordinate to the nearest pixel
///
/// Only called on values already clipped to the area around the image, so the
/// cast never saturates.
fn to_pixel(v: f64) -> i32 {
    v.round() as i32
}

/// Clip the segment `from -> to` to the box `min..=max` (Liang-Barsky)
///
/// Returns `None` when no part of the segment lies inside the box, or when an
/// endpoint is not finite.
fn clip_segment(from: Point, to: Point, min: Point, max: Point) -> Option<(Point, Point)> {
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return None;
    }
    let d = to - from;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let bounds = [
        (-d.x, from.x - min.x),
        (d.x, max.x - from.x),
        (-d.y, from.y - min.y),
        (d.y, max.y - from.y),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            // Parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    Some((from + d * t0, from + d * t1))
}

impl ImageCanvas {
    /// The image area plus a one pixel margin; anything drawn outside it is
    /// invisible
    fn visible_box(&self) -> (Point, Point) {
        let (w, h) = self.image.dimensions();
        (Point::new(-1.0, -1.0), Point::new(w as f64, h as f64))
    }

    /// Largest radius handed to imageproc's integer circle routines
    ///
    /// Culling keeps the center within one radius of the image, so with this
    /// cap every sum imageproc forms stays far inside `i32`.
    fn circle_radius_limit(&self) -> f64 {
        let (w, h) = self.image.dimensions();
        2.0 * (w as f64 + h as f64) + 16.0
    }

    /// Whether a circle can touch the image at all
    fn circle_visible(&self, center: Point, radius: f64) -> bool {
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return false;
        }
        let (min, max) = self.visible_box();
        center.x + radius >= min.x
            && center.x - radius <= max.x
            && center.y + radius >= min.y
            && center.y - radius <= max.y
    }

    /// Distance from `center` to the farthest image corner
    fn farthest_corner(&self, center: Point) -> f64 {
        let (min, max) = self.visible_box();
        [min, max, Point::new(min.x, max.y), Point::new(max.x, min.y)]
            .iter()
            .map(|corner| corner.distance_to(center))
            .fold(0.0, f64::max)
    }

    /// Per-pixel circle test, used for radii too large for imageproc
    fn scan_circle(&mut self, center: Point, radius: f64, filled: bool, color: Color) {
        let pixel = Rgba::from(color);
        for (x, y, p) in self.image.enumerate_pixels_mut() {
            let d = Point::new(x as f64, y as f64).distance_to(center);
            let hit = if filled {
                d <= radius
            } else {
                (d - radius).abs() <= 0.5
            };
            if hit {
                *p = pixel;
            }
        }
    }
}

impl Canvas for ImageCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        // imageproc walks every point of the line, so clip first
        let (min, max) = self.visible_box();
        if let Some((a, b)) = clip_segment(from, to, min, max) {
            draw_line_segment_mut(
                &mut self.image,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                color.into(),
            );
        }
    }

    fn draw_circle(&mut self, center: Point, radius: f64, color: Color) {
        // A negative radius (from a negative scale) still describes a circle
        let radius = radius.abs();
        if !self.circle_visible(center, radius) {
            return;
        }
        // The whole image sits inside the circle: no outline pixel to draw
        if self.farthest_corner(center) < radius - 1.0 {
            return;
        }
        if radius > self.circle_radius_limit() {
            self.scan_circle(center, radius, false, color);
            return;
        }
        draw_hollow_circle_mut(
            &mut self.image,
            (to_pixel(center.x), to_pixel(center.y)),
            to_pixel(radius),
            color.into(),
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let radius = radius.abs();
        if !self.circle_visible(center, radius) {
            return;
        }
        if radius > self.circle_radius_limit() {
            self.scan_circle(center, radius, true, color);
            return;
        }
        draw_filled_circle_mut(
            &mut self.image,
            (to_pixel(center.x), to_pixel(center.y)),
            to_pixel(radius),
            color.into(),
        );
    }

    fn draw_rect(&mut self, top_left: Point, width: f64, height: f64, color: Color) {
        if !(top_left.x.is_finite() && top_left.y.is_finite())
            || !(width.is_finite() && height.is_finite())
        {
            return;
        }
        // Normalize so negative sizes still span the same footprint
        let (min, max) = self.visible_box();
        let x0 = top_left.x.min(top_left.x + width).round();
        let y0 = top_left.y.min(top_left.y + height).round();
        let (x1, y1) = (x0 + width.abs().round(), y0 + height.abs().round());
        if x1 < min.x || x0 > max.x || y1 < min.y || y0 > max.y {
            return;
        }

        // imageproc's Rect panics on a zero size, so degenerate rectangles
        // are drawn as the line (or dot) they really are
        if x1 - x0 < 1.0 || y1 - y0 < 1.0 {
            self.draw_line(Point::new(x0, y0), Point::new(x1, y1), color);
            return;
        }

        // Rect covers `left..=left + w - 1`; far edges are pulled in to just
        // outside the image where they stay invisible
        let left = x0.clamp(min.x, max.x);
        let top = y0.clamp(min.y, max.y);
        let right = (x1 - 1.0).clamp(min.x, max.x);
        let bottom = (y1 - 1.0).clamp(min.y, max.y);
        let w = (right - left) as u32 + 1;
        let h = (bottom - top) as u32 + 1;
        let rect = Rect::at(to_pixel(left), to_pixel(top)).of_size(w, h);
        draw_hollow_rect_mut(&mut self.image, rect, color.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order() {
        let mut rec = Recorder::new();
        rec.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Color::RED);
        rec.fill_circle(Point::new(2.0, 2.0), 2.0, Color::WHITE);
        rec.draw_rect(Point::new(0.0, 0.0), 3.0, 4.0, Color::WHITE);

        assert_eq!(rec.commands.len(), 3);
        assert_eq!(rec.line_count(), 1);
        assert_eq!(rec.marker_count(), 1);
        assert!(matches!(rec.commands[2], DrawCommand::Rect { width, .. } if width == 3.0));

        rec.clear();
        assert!(rec.commands.is_empty());
    }

    #[test]
    fn test_image_canvas_background() {
        let canvas = ImageCanvas::new(20, 10, Color::NAVY);
        assert_eq!(canvas.dimensions(), (20, 10));
        assert_eq!(canvas.image().get_pixel(5, 5), &Rgba([20, 20, 40, 255]));
    }

    #[test]
    fn test_image_canvas_line() {
        let mut canvas = ImageCanvas::new(20, 20, Color::BLACK);
        canvas.draw_line(Point::new(0.0, 10.0), Point::new(19.0, 10.0), Color::RED);

        let img = canvas.into_image();
        assert_eq!(img.get_pixel(0, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
        // Nothing drawn off the line
        assert_eq!(img.get_pixel(10, 5), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_image_canvas_circle_outline() {
        let mut canvas = ImageCanvas::new(50, 50, Color::BLACK);
        canvas.draw_circle(Point::new(25.0, 25.0), 10.0, Color::WHITE);

        let img = canvas.image();
        // Rightmost point of the outline is set, the center is not
        assert_eq!(img.get_pixel(35, 25), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(25, 25), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_image_canvas_filled_marker() {
        let mut canvas = ImageCanvas::new(20, 20, Color::BLACK);
        draw_marker(&mut canvas, Point::new(10.0, 10.0), Color::YELLOW);
        assert_eq!(canvas.image().get_pixel(10, 10), &Rgba([255, 255, 0, 255]));
    }

    #[test]
    fn test_image_canvas_rect_and_degenerate_rect() {
        let mut canvas = ImageCanvas::new(30, 30, Color::BLACK);
        canvas.draw_rect(Point::new(5.0, 5.0), 10.0, 8.0, Color::WHITE);
        assert_eq!(canvas.image().get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.image().get_pixel(10, 10), &Rgba([0, 0, 0, 255]));

        // Negative width spans leftwards instead of panicking
        canvas.draw_rect(Point::new(25.0, 20.0), -5.0, 5.0, Color::RED);
        assert_eq!(canvas.image().get_pixel(20, 20), &Rgba([255, 0, 0, 255]));

        // Zero height collapses to a line, no panic
        canvas.draw_rect(Point::new(0.0, 28.0), 10.0, 0.0, Color::RED);
        assert_eq!(canvas.image().get_pixel(3, 28), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_off_canvas_drawing_is_clipped() {
        let mut canvas = ImageCanvas::new(10, 10, Color::BLACK);
        canvas.draw_line(Point::new(-50.0, -50.0), Point::new(-10.0, -20.0), Color::RED);
        canvas.draw_circle(Point::new(500.0, 500.0), 20.0, Color::RED);
        canvas.fill_circle(Point::new(-100.0, 5.0), 3.0, Color::RED);
        assert!(canvas.image().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_far_away_marker_is_culled() {
        use crate::shapes::{PointShape, Shape};

        let mut canvas = ImageCanvas::new(10, 10, Color::BLACK);
        PointShape::new(Point::new(3.0e9, 5.0)).draw(&mut canvas, Color::RED);
        canvas.fill_circle(Point::new(5.0, -4.0e12), 1.0e6, Color::RED);
        assert!(canvas.image().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_hugely_scaled_circle_draws() {
        use crate::registry::Registry;
        use crate::shapes::{Circle, Shape};

        let registry = Registry::new();
        let mut circle = Circle::new_in(&registry, Point::new(25.0, 25.0), 50.0);
        circle.scale(1.0e8);

        let mut canvas = ImageCanvas::new(50, 50, Color::BLACK);
        circle.draw(&mut canvas, Color::WHITE);
        // Outline is far outside the image, only the center marker shows
        assert_eq!(canvas.image().get_pixel(25, 25), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.image().get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_huge_circle_arc_crosses_image() {
        let mut canvas = ImageCanvas::new(10, 10, Color::BLACK);
        // The rightmost point of the outline lands on (5, 5)
        canvas.draw_circle(Point::new(-1.0e9, 5.0), 1.0e9 + 5.0, Color::RED);
        assert_eq!(canvas.image().get_pixel(5, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.image().get_pixel(8, 5), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_huge_filled_circle_covers_image() {
        let mut canvas = ImageCanvas::new(8, 6, Color::BLACK);
        canvas.fill_circle(Point::new(4.0, 3.0), 1.0e12, Color::NAVY);
        assert!(canvas.image().pixels().all(|p| p.0 == Color::NAVY.0));
    }

    #[test]
    fn test_long_line_is_clipped_to_image() {
        let mut canvas = ImageCanvas::new(10, 10, Color::BLACK);
        canvas.draw_line(Point::new(-1.0e9, 5.0), Point::new(1.0e9, 5.0), Color::RED);
        assert_eq!(canvas.image().get_pixel(0, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.image().get_pixel(9, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.image().get_pixel(3, 4), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_non_finite_input_draws_nothing() {
        let mut canvas = ImageCanvas::new(10, 10, Color::BLACK);
        canvas.draw_line(Point::new(f64::NAN, 0.0), Point::new(5.0, 5.0), Color::RED);
        canvas.draw_circle(Point::new(5.0, 5.0), f64::INFINITY, Color::RED);
        canvas.draw_rect(Point::new(1.0, 1.0), f64::NAN, 3.0, Color::RED);
        assert!(canvas.image().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_huge_rect_is_clamped() {
        let mut canvas = ImageCanvas::new(10, 10, Color::BLACK);
        // Every edge lies outside the image
        canvas.draw_rect(Point::new(-1.0e10, -1.0e10), 2.0e10, 2.0e10, Color::RED);
        assert!(canvas.image().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));

        // Only the left edge is far away
        canvas.draw_rect(Point::new(-1.0e10, 2.0), 1.0e10 + 5.0, 3.0, Color::RED);
        assert_eq!(canvas.image().get_pixel(2, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.image().get_pixel(2, 3), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_clip_segment() {
        let (min, max) = (Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let (a, b) = clip_segment(Point::new(-5.0, 5.0), Point::new(15.0, 5.0), min, max)
            .unwrap();
        assert_eq!(a, Point::new(0.0, 5.0));
        assert_eq!(b, Point::new(10.0, 5.0));

        // Inside segments come back untouched
        let inside = (Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(clip_segment(inside.0, inside.1, min, max), Some(inside));

        assert_eq!(clip_segment(Point::new(-5.0, -1.0), Point::new(15.0, -1.0), min, max), None);
    }
}
