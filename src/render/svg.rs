//! SVG rendering of markup trees.
//!
//! Children of a column stack top to bottom; every line is centered
//! horizontally and the whole block vertically.

use super::escape;
use crate::models::markup::{Node, TextStyle, BACKGROUND};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Frame images use a 1.91:1 aspect ratio.
pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";

/// Horizontal padding kept free on each side of a line.
const MARGIN: u32 = 60;

/// Longest line, in characters, that fits the canvas at `font_size`.
///
/// Assumes an average glyph width of 0.55 em, which holds for the sans-serif
/// stack above with mixed-case text.
fn max_chars(font_size: u32) -> usize {
    ((WIDTH - 2 * MARGIN) * 20 / (font_size.max(1) * 11)) as usize
}

/// Cut `content` to fit one line, marking the cut with an ellipsis.
fn fit_line(content: &str, font_size: u32) -> String {
    let limit = max_chars(font_size);
    if content.chars().count() <= limit {
        return content.to_string();
    }
    let mut cut: String = content.chars().take(limit.saturating_sub(1)).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

fn line_height(style: &TextStyle) -> u32 {
    style.font_size * 5 / 4
}

fn height(node: &Node) -> u32 {
    match node {
        Node::Text { style, .. } => line_height(style),
        Node::Column { style, children } => {
            let gaps = style.gap * children.len().saturating_sub(1) as u32;
            children.iter().map(height).sum::<u32>() + gaps
        }
    }
}

fn draw(node: &Node, top: u32, out: &mut String) {
    match node {
        Node::Text { style, content } => {
            // Baseline sits one font size below the top of the line box.
            let baseline = top + style.font_size;
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="middle">{}</text>"#,
                WIDTH / 2,
                baseline,
                FONT_FAMILY,
                style.font_size,
                if style.bold { "bold" } else { "normal" },
                escape(&style.color),
                escape(&fit_line(content, style.font_size)),
            ));
        }
        Node::Column { style, children } => {
            let mut y = top;
            for child in children {
                draw(child, y, out);
                y += height(child) + style.gap;
            }
        }
    }
}

/// Render a markup tree as a standalone SVG document.
pub fn render(root: &Node) -> String {
    let background = root.background().unwrap_or(BACKGROUND);
    let top = HEIGHT.saturating_sub(height(root)) / 2;

    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="{bg}"/>"#,
        w = WIDTH,
        h = HEIGHT,
        bg = escape(background),
    );
    draw(root, top, &mut out);
    out.push_str("</svg>");
    out
}

/// Render a markup tree as a `data:` URI usable as a frame image.
pub fn data_uri(root: &Node) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(render(root)))
}
