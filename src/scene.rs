// An owning collection of shapes that can be transformed and rendered together

use crate::canvas::{Canvas, Color, ImageCanvas};
use crate::shapes::{Figure, Shape};
use crate::transform::Transform;
use image::RgbaImage;

/// A collection of figures drawn in insertion order
///
/// The scene owns its figures, so clearing or dropping it releases every
/// shape and its registry slot in one go.
///
/// **Rust Concept: Vec<T> ownership**
/// - `Vec<Figure>` owns each figure directly, no pointers to manage
/// - `clear()` runs every figure's `Drop`, which decrements the live counters
/// - Cloning the scene clones the figures, and clones are never counted
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Order matters: later figures draw on top of earlier ones
    pub figures: Vec<Figure>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any concrete shape (or an already wrapped `Figure`)
    ///
    /// `impl Into<Figure>` lets callers write `scene.push(Circle::new(..))`.
    pub fn push(&mut self, figure: impl Into<Figure>) {
        self.figures.push(figure.into());
    }

    /// Apply one transform to every figure in place
    pub fn apply(&mut self, transform: &Transform) {
        log::debug!("applying {} to {} figure(s)", transform, self.figures.len());
        for figure in &mut self.figures {
            transform.apply(figure);
        }
    }

    /// Draw every figure in one color
    pub fn draw(&self, canvas: &mut dyn Canvas, color: Color) {
        for figure in &self.figures {
            figure.draw(canvas, color);
        }
    }

    /// Render the scene onto a fresh image
    ///
    /// Returns the image by value; the caller owns it.
    pub fn render(&self, width: u32, height: u32, background: Color, color: Color) -> RgbaImage {
        log::debug!("rendering {} figure(s) at {}x{}", self.figures.len(), width, height);
        let mut canvas = ImageCanvas::new(width, height, background);
        self.draw(&mut canvas, color);
        canvas.into_image()
    }

    /// One `describe()` line per figure
    pub fn describe_all(&self) -> Vec<String> {
        self.figures.iter().map(|f| f.describe()).collect()
    }

    /// Sum of every figure's area
    pub fn total_area(&self) -> f64 {
        self.figures.iter().map(|f| f.area()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Figure> {
        self.figures.iter()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Clippy recommends `is_empty()` next to `len()`
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Drop every figure
    pub fn clear(&mut self) {
        self.figures.clear();
    }
}

impl FromIterator<Figure> for Scene {
    fn from_iter<I: IntoIterator<Item = Figure>>(iter: I) -> Self {
        Self {
            figures: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Figure;
    type IntoIter = std::slice::Iter<'a, Figure>;

    fn into_iter(self) -> Self::IntoIter {
        self.figures.iter()
    }
}
