//! SVG export of recorded draw commands.

use crate::recorder::DrawCommand;
use kurbo::Size;
use peniko::Color;
use std::fmt::Write;

/// Render `commands` as a standalone SVG document of the given size.
///
/// A [`DrawCommand::Clear`] discards everything before it, so passing a whole
/// recording yields its last frame. Fully transparent strokes (the connector
/// hit corridors) are left out.
pub fn to_svg(commands: &[DrawCommand], size: Size) -> String {
    let start = commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Clear))
        .map_or(0, |i| i + 1);

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        size.width, size.height, size.width, size.height
    );
    for command in &commands[start..] {
        match command {
            DrawCommand::Clear => {}
            DrawCommand::Stroke { path, color, width } => {
                if is_transparent(*color) {
                    continue;
                }
                let _ = writeln!(
                    out,
                    r#"  <path d="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
                    path.to_svg(),
                    rgb(*color),
                    opacity(*color),
                    width
                );
            }
            DrawCommand::Fill { path, color } => {
                let _ = writeln!(
                    out,
                    r#"  <path d="{}" fill="{}" fill-opacity="{}"/>"#,
                    path.to_svg(),
                    rgb(*color),
                    opacity(*color)
                );
            }
            DrawCommand::Text {
                text,
                position,
                font,
                color,
                max_width,
            } => {
                let length = max_width
                    .map(|w| format!(r#" textLength="{w}" lengthAdjust="spacingAndGlyphs""#))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    r#"  <text x="{}" y="{}" text-anchor="middle" style="font: {}" fill="{}"{}>{}</text>"#,
                    position.x,
                    position.y,
                    escape(font),
                    rgb(*color),
                    length,
                    escape(text)
                );
            }
        }
    }
    out.push_str("</svg>\n");
    out
}

fn is_transparent(color: Color) -> bool {
    color.to_rgba8().a == 0
}

fn rgb(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn opacity(color: Color) -> f64 {
    color.to_rgba8().a as f64 / 255.0
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, Point};

    fn line() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path
    }

    #[test]
    fn test_skips_transparent_strokes() {
        let commands = vec![
            DrawCommand::Clear,
            DrawCommand::Stroke {
                path: line(),
                color: Color::BLACK,
                width: 1.0,
            },
            DrawCommand::Stroke {
                path: line(),
                color: Color::TRANSPARENT,
                width: 1.0,
            },
        ];
        let svg = to_svg(&commands, Size::new(100.0, 50.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(r##"stroke="#000000""##));
    }

    #[test]
    fn test_only_last_frame() {
        let commands = vec![
            DrawCommand::Fill {
                path: line(),
                color: Color::WHITE,
            },
            DrawCommand::Clear,
            DrawCommand::Text {
                text: "a < b".to_string(),
                position: Point::new(5.0, 6.0),
                font: "18px serif".to_string(),
                color: Color::BLACK,
                max_width: None,
            },
        ];
        let svg = to_svg(&commands, Size::new(10.0, 10.0));
        assert!(!svg.contains("<path"));
        assert!(svg.contains("a &lt; b"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(!svg.contains("textLength"));
    }
}
