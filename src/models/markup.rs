//! Markup tree describing a frame image.
//!
//! A tree of vertical columns and text lines. The SVG renderer lays children
//! out top to bottom and centers everything horizontally.

/// Background used for regular screens.
pub const BACKGROUND: &str = "#000000";
/// Background used for error screens.
pub const ERROR_BACKGROUND: &str = "#7f1d1d";
pub const TEXT_COLOR: &str = "#ffffff";
pub const ACCENT_COLOR: &str = "#a78bfa";

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: u32,
    pub color: String,
    pub bold: bool,
}

impl TextStyle {
    /// Regular white text at `font_size` pixels.
    pub fn new(font_size: u32) -> Self {
        TextStyle {
            font_size,
            color: TEXT_COLOR.to_string(),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStyle {
    /// Only honored on the root node.
    pub background: Option<String>,
    /// Vertical space between children, in pixels.
    pub gap: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Column {
        style: ColumnStyle,
        children: Vec<Node>,
    },
    Text {
        style: TextStyle,
        content: String,
    },
}

impl Node {
    /// Root column filling the image with the given background.
    pub fn screen(background: &str, children: Vec<Node>) -> Self {
        Node::Column {
            style: ColumnStyle {
                background: Some(background.to_string()),
                gap: 24,
            },
            children,
        }
    }

    /// Nested column without a background.
    pub fn column(gap: u32, children: Vec<Node>) -> Self {
        Node::Column {
            style: ColumnStyle {
                background: None,
                gap,
            },
            children,
        }
    }

    /// Single line of text. Lines too long for the image are cut by the renderer.
    pub fn text(style: TextStyle, content: impl Into<String>) -> Self {
        Node::Text {
            style,
            content: content.into(),
        }
    }

    /// Background of this node, if it is a column that sets one.
    pub fn background(&self) -> Option<&str> {
        match self {
            Node::Column { style, .. } => style.background.as_deref(),
            Node::Text { .. } => None,
        }
    }

    /// All text content in document order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Column { children, .. } => {
                for child in children {
                    child.collect_texts(out);
                }
            }
            Node::Text { content, .. } => out.push(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts_are_collected_in_order() {
        let node = Node::screen(
            BACKGROUND,
            vec![
                Node::text(TextStyle::new(48), "a"),
                Node::column(8, vec![Node::text(TextStyle::new(20), "b")]),
                Node::text(TextStyle::new(20), "c"),
            ],
        );
        assert_eq!(node.texts(), vec!["a", "b", "c"]);
        assert_eq!(node.background(), Some(BACKGROUND));
    }
}
