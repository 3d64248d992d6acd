//! Shape renderer: draws a diagram onto a [`DrawingSurface`] and answers hit queries.

use crate::surface::DrawingSurface;
use kurbo::Point;
use linkdraw_core::shapes::{Connector, Node, draw_order};
use linkdraw_core::{EditorConfig, SceneRenderer, Shape, ShapeId};
use peniko::Color;

/// Colors, stroke width and font used when drawing shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Stroke color of the active shape.
    pub highlight_color: Color,
    /// Stroke color of every other shape.
    pub neutral_color: Color,
    /// Node background; `None` leaves nodes unfilled.
    pub node_fill_color: Option<Color>,
    /// Label color.
    pub text_color: Color,
    pub line_width: f64,
    /// CSS font shorthand for labels.
    pub font: String,
    /// Distance from the node center down to the label baseline.
    pub label_baseline_offset: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            highlight_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            neutral_color: Color::from_rgba8(51, 51, 51, 255),
            node_fill_color: Some(Color::WHITE),
            text_color: Color::from_rgba8(51, 51, 51, 255),
            line_width: 1.0,
            font: String::from("18px serif"),
            label_baseline_offset: 5.0,
        }
    }
}

impl RenderStyle {
    pub fn with_node_fill(mut self, color: Option<Color>) -> Self {
        self.node_fill_color = color;
        self
    }

    fn stroke_color(&self, active: bool) -> Color {
        if active {
            self.highlight_color
        } else {
            self.neutral_color
        }
    }
}

/// Draws nodes and connectors and reports which shape lies under a point.
///
/// Geometry comes from the [`EditorConfig`] only: the node outline is drawn
/// `node_margin` outside the bounds, which is also the node hit tolerance, so
/// what is drawn and what is hit never disagree.
pub struct ShapeRenderer<S: DrawingSurface> {
    surface: S,
    style: RenderStyle,
    config: EditorConfig,
}

impl<S: DrawingSurface> ShapeRenderer<S> {
    pub fn new(surface: S, config: EditorConfig) -> Self {
        Self {
            surface,
            style: RenderStyle::default(),
            config,
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Background, centered label, then the outline just outside the bounds.
    fn draw_node(&mut self, node: &Node, active: bool) {
        let rect = node.as_rect();
        let s = &mut self.surface;

        if let Some(fill) = self.style.node_fill_color {
            s.set_fill_color(fill);
            s.begin_path();
            s.rect(rect);
            s.fill();
        }

        if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) {
            let center = node.center();
            s.set_fill_color(self.style.text_color);
            s.set_font(&self.style.font);
            s.fill_text(
                text,
                Point::new(center.x, center.y + self.style.label_baseline_offset),
                Some(rect.width()),
            );
        }

        let margin = self.config.node_margin;
        s.set_stroke_color(self.style.stroke_color(active));
        s.set_line_width(self.style.line_width);
        s.begin_path();
        s.rect(rect.inflate(margin, margin));
        s.stroke();
    }

    /// Shaft, arrowhead, then the invisible hit corridor.
    fn draw_connector(&mut self, connector: &Connector, active: bool) {
        let s = &mut self.surface;
        s.set_stroke_color(self.style.stroke_color(active));
        s.set_line_width(self.style.line_width);
        s.polyline(&[connector.start, connector.end], false);
        s.stroke();

        if let Some(arrow) =
            connector.arrowhead(self.config.arrow_back_offset, self.config.arrow_wing_offset)
        {
            s.polyline(&arrow, false);
            s.stroke();
        }

        if let Some(corridor) = connector.corridor(self.config.corridor_radius) {
            s.set_stroke_color(Color::TRANSPARENT);
            s.polyline(&corridor, true);
            s.stroke();
        }
    }
}

impl<S: DrawingSurface> SceneRenderer for ShapeRenderer<S> {
    fn render(&mut self, shapes: &[Shape], active: Option<ShapeId>, query: Option<Point>) -> Option<ShapeId> {
        self.surface.clear();

        let mut hit = None;
        for shape in draw_order(shapes) {
            let is_active = active == Some(shape.id());
            match shape {
                Shape::Node(node) => self.draw_node(node, is_active),
                Shape::Connector(connector) => self.draw_connector(connector, is_active),
            }
            if let Some(point) = query {
                if shape.hit_test(point, self.config.hit_tolerance(shape.kind())) {
                    hit = Some(shape.id());
                }
            }
        }

        if let Some(point) = query {
            log::trace!("Hit query at ({}, {}) -> {:?}", point.x, point.y, hit);
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{DrawCommand, SceneRecorder};
    use kurbo::{BezPath, Shape as _};
    use linkdraw_core::shapes::ShapeTrait;

    fn renderer() -> ShapeRenderer<SceneRecorder> {
        ShapeRenderer::new(SceneRecorder::new(), EditorConfig::default())
    }

    fn shapes() -> (Node, Node, Connector) {
        let a = Node::new(Point::new(0.0, 0.0), 100.0, 50.0).with_text("A");
        let b = Node::new(Point::new(200.0, 0.0), 100.0, 50.0).with_text("B");
        let c = Connector::new(Point::new(50.0, 25.0), Point::new(250.0, 25.0));
        (a, b, c)
    }

    fn strokes(commands: &[DrawCommand]) -> Vec<(&BezPath, Color)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke { path, color, .. } => Some((path, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_draws_nodes_before_connectors() {
        let (a, b, c) = shapes();
        // Connector listed first; it must still be drawn last.
        let list: Vec<Shape> = vec![c.into(), a.into(), b.into()];
        let mut r = renderer();
        r.render(&list, None, None);

        let frame = r.surface().last_frame();
        assert!(!frame.is_empty());
        let strokes = strokes(frame);
        // Two outlines, then shaft, arrowhead, corridor.
        assert_eq!(strokes.len(), 5);
        assert_eq!(strokes[2].0.elements().len(), 2);
        assert_eq!(strokes[4].1, Color::TRANSPARENT);
    }

    #[test]
    fn test_each_render_clears_first() {
        let (a, b, c) = shapes();
        let list: Vec<Shape> = vec![a.into(), b.into(), c.into()];
        let mut r = renderer();
        r.render(&list, None, None);
        r.render(&list, None, Some(Point::new(20.0, 10.0)));

        let rec = r.surface();
        assert_eq!(rec.frame_count(), 2);
        assert!(matches!(rec.commands().first(), Some(DrawCommand::Clear)));
        // The second frame starts with its own clear and repeats the first.
        let second = rec.commands().len() - rec.last_frame().len();
        assert!(matches!(rec.commands()[second - 1], DrawCommand::Clear));
        assert_eq!(&rec.commands()[1..second - 1], rec.last_frame());
    }

    #[test]
    fn test_label_is_centered_below_midline() {
        let (a, _, _) = shapes();
        let mut r = renderer();
        r.render(&[a.into()], None, None);

        let text = r.surface().last_frame().iter().find_map(|c| match c {
            DrawCommand::Text {
                text,
                position,
                font,
                max_width,
                ..
            } => Some((text.clone(), *position, font.clone(), *max_width)),
            _ => None,
        });
        assert_eq!(
            text,
            Some(("A".to_string(), Point::new(50.0, 30.0), "18px serif".to_string(), Some(100.0)))
        );
    }

    #[test]
    fn test_outline_uses_margin_and_highlight() {
        let (a, _, _) = shapes();
        let id = a.id();
        let mut r = renderer();
        r.render(&[a.into()], Some(id), None);

        let strokes = strokes(r.surface().last_frame());
        let (path, color) = strokes[0];
        assert_eq!(color, r.style().highlight_color);
        assert_eq!(path.bounding_box(), kurbo::Rect::new(-2.0, -2.0, 102.0, 52.0));
    }

    #[test]
    fn test_inactive_shapes_use_neutral_color() {
        let (a, b, c) = shapes();
        let a_id = a.id();
        let mut r = renderer();
        r.render(&[a.into(), b.into(), c.into()], Some(a_id), None);

        let strokes = strokes(r.surface().last_frame());
        assert_eq!(strokes[0].1, r.style().highlight_color);
        assert_eq!(strokes[1].1, r.style().neutral_color);
        assert_eq!(strokes[2].1, r.style().neutral_color);
    }

    #[test]
    fn test_connector_wins_over_node() {
        let (a, b, c) = shapes();
        let c_id = c.id();
        let a_id = a.id();
        let mut r = renderer();
        let list: Vec<Shape> = vec![a.into(), b.into(), c.into()];

        assert_eq!(r.render(&list, None, Some(Point::new(50.0, 25.0))), Some(c_id));
        assert_eq!(r.render(&list, None, Some(Point::new(20.0, 10.0))), Some(a_id));
        assert_eq!(r.render(&list, None, Some(Point::new(150.0, 100.0))), None);
    }

    #[test]
    fn test_hit_agrees_with_drawn_corridor() {
        let c = Connector::new(Point::new(10.0, 10.0), Point::new(90.0, 70.0));
        let list: Vec<Shape> = vec![c.clone().into()];
        let mut r = renderer();
        r.render(&list, None, None);
        let corridor = strokes(r.surface().last_frame())
            .into_iter()
            .find(|(_, color)| *color == Color::TRANSPARENT)
            .map(|(path, _)| path.clone())
            .unwrap();

        for (x, y) in [(50.0, 40.0), (52.0, 36.0), (20.0, 30.0), (80.0, 55.0), (95.0, 75.0)] {
            let p = Point::new(x, y);
            let hit = r.render(&list, None, Some(p)) == Some(c.id());
            assert_eq!(hit, corridor.contains(p), "disagreement at {p:?}");
        }
    }

    #[test]
    fn test_degenerate_connector_draws_only_shaft() {
        let c = Connector::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        let id = c.id();
        let mut r = renderer();
        let hit = r.render(&[c.into()], None, Some(Point::new(7.0, 5.0)));

        assert_eq!(strokes(r.surface().last_frame()).len(), 1);
        assert_eq!(hit, Some(id));
    }

    #[test]
    fn test_unfilled_unlabeled_node() {
        let node = Node::new(Point::new(0.0, 0.0), 10.0, 10.0);
        let mut r = renderer().with_style(RenderStyle::default().with_node_fill(None));
        r.render(&[node.into()], None, None);

        let frame = r.surface().last_frame();
        assert!(!frame.iter().any(|c| matches!(c, DrawCommand::Fill { .. } | DrawCommand::Text { .. })));
        assert_eq!(strokes(frame).len(), 1);
    }

    #[test]
    fn test_outline_and_hit_area_share_node_margin() {
        let node = Node::new(Point::new(0.0, 0.0), 100.0, 50.0);
        let id = node.id();
        let config = EditorConfig::default().with_node_margin(4.0);
        // Swapping the style never moves the outline away from the hit area.
        let mut r = ShapeRenderer::new(SceneRecorder::new(), config)
            .with_style(RenderStyle::default().with_node_fill(None));
        let list: Vec<Shape> = vec![node.into()];
        r.render(&list, None, None);

        let outline = strokes(r.surface().last_frame())[0].0.bounding_box();
        assert_eq!(outline, kurbo::Rect::new(-4.0, -4.0, 104.0, 54.0));
        assert_eq!(r.config().node_margin, 4.0);
        assert_eq!(r.render(&list, None, Some(Point::new(104.0, 54.0))), Some(id));
        assert_eq!(r.render(&list, None, Some(Point::new(105.0, 25.0))), None);
    }
}
