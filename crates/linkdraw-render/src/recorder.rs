//! In-memory drawing surface.

use crate::surface::DrawingSurface;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;

/// One painting operation captured by [`SceneRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
    },
    Fill {
        path: BezPath,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        font: String,
        color: Color,
        max_width: Option<f64>,
    },
}

/// Drawing surface that records every paint call instead of rasterizing.
#[derive(Debug, Clone)]
pub struct SceneRecorder {
    commands: Vec<DrawCommand>,
    path: BezPath,
    stroke_color: Color,
    fill_color: Color,
    line_width: f64,
    font: String,
}

impl Default for SceneRecorder {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            path: BezPath::new(),
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            font: String::from("10px sans-serif"),
        }
    }
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded since creation, including earlier frames.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands of the most recent frame (after the last clear).
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Number of clears, i.e. frames drawn.
    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear))
            .count()
    }

    /// Drop recorded history, keeping only the latest frame.
    pub fn compact(&mut self) {
        let start = self.commands.len() - self.last_frame().len();
        if start > 0 {
            // Keep the clear that opens the frame.
            self.commands.drain(..start - 1);
        }
    }
}

impl DrawingSurface for SceneRecorder {
    fn clear(&mut self) {
        self.path = BezPath::new();
        self.commands.push(DrawCommand::Clear);
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(point);
    }

    fn rect(&mut self, rect: Rect) {
        self.path.move_to((rect.x0, rect.y0));
        self.path.line_to((rect.x1, rect.y0));
        self.path.line_to((rect.x1, rect.y1));
        self.path.line_to((rect.x0, rect.y1));
        self.path.close_path();
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Stroke {
            path: self.path.clone(),
            color: self.stroke_color,
            width: self.line_width,
        });
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Fill {
            path: self.path.clone(),
            color: self.fill_color,
        });
    }

    fn fill_text(&mut self, text: &str, position: Point, max_width: Option<f64>) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font: self.font.clone(),
            color: self.fill_color,
            max_width,
        });
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_stroke_records_current_state() {
        let mut rec = SceneRecorder::new();
        rec.set_stroke_color(Color::WHITE);
        rec.set_line_width(3.0);
        rec.begin_path();
        rec.move_to(Point::new(0.0, 0.0));
        rec.line_to(Point::new(10.0, 0.0));
        rec.stroke();

        let [DrawCommand::Stroke { path, color, width }] = rec.commands() else {
            panic!("expected one stroke, got {:?}", rec.commands());
        };
        assert_eq!(*color, Color::WHITE);
        assert_eq!(*width, 3.0);
        assert_eq!(
            path.elements(),
            &[PathEl::MoveTo(Point::new(0.0, 0.0)), PathEl::LineTo(Point::new(10.0, 0.0))]
        );
    }

    #[test]
    fn test_empty_path_paints_nothing() {
        let mut rec = SceneRecorder::new();
        rec.begin_path();
        rec.stroke();
        rec.fill();
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn test_rect_is_closed() {
        let mut rec = SceneRecorder::new();
        rec.begin_path();
        rec.rect(Rect::new(0.0, 0.0, 4.0, 2.0));
        rec.fill();
        let DrawCommand::Fill { path, .. } = &rec.commands()[0] else {
            panic!("expected a fill");
        };
        assert_eq!(path.elements().len(), 5);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn test_frames() {
        let mut rec = SceneRecorder::new();
        rec.clear();
        rec.fill_text("a", Point::ZERO, None);
        rec.clear();
        rec.fill_text("b", Point::ZERO, None);
        rec.fill_text("c", Point::ZERO, None);

        assert_eq!(rec.frame_count(), 2);
        assert_eq!(rec.last_frame().len(), 2);

        rec.compact();
        assert_eq!(rec.frame_count(), 1);
        assert_eq!(rec.commands().len(), 3);
        assert_eq!(rec.last_frame().len(), 2);
    }

    #[test]
    fn test_polyline() {
        let mut rec = SceneRecorder::new();
        rec.polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)], true);
        rec.stroke();
        let DrawCommand::Stroke { path, .. } = &rec.commands()[0] else {
            panic!("expected a stroke");
        };
        assert_eq!(path.elements().len(), 4);
    }
}
