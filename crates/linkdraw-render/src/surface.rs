//! Immediate-mode drawing surface.

use kurbo::{Point, Rect};
use peniko::Color;

/// A 2D surface with a current path and current stroke/fill/text state.
///
/// Paths are built with `begin_path`, `move_to`, `line_to`, `rect` and
/// `close_path`, then painted with `stroke` or `fill`. Painting does not
/// reset the current path.
pub trait DrawingSurface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Start a new, empty current path.
    fn begin_path(&mut self);

    /// Close the current subpath back to its first point.
    fn close_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Add a closed rectangle subpath.
    fn rect(&mut self, rect: Rect);

    /// Stroke the current path with the stroke color and line width.
    fn stroke(&mut self);

    /// Fill the current path with the fill color.
    fn fill(&mut self);

    /// Draw `text` horizontally centered on `position`, whose y is the baseline.
    ///
    /// When `max_width` is set the run is condensed to fit.
    fn fill_text(&mut self, text: &str, position: Point, max_width: Option<f64>);

    fn set_stroke_color(&mut self, color: Color);

    fn set_fill_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    /// Set the font as a CSS font shorthand (e.g. `"18px serif"`).
    fn set_font(&mut self, font: &str);

    /// Replace the current path with the polyline through `points`.
    fn polyline(&mut self, points: &[Point], close: bool) {
        self.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.move_to(*first);
            for point in iter {
                self.line_to(*point);
            }
            if close {
                self.close_path();
            }
        }
    }
}
