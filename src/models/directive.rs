use super::markup::Node;

/// Base path all frame routes are served under.
pub const BASE_PATH: &str = "/api";

/// Farcaster clients accept at most four buttons per frame.
pub const MAX_BUTTONS: usize = 4;

/// A frame screen addressable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Check,
    Share,
    Leaderboard,
}

impl Screen {
    /// Path of this screen relative to the base path.
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Home => "/",
            Screen::Check => "/check",
            Screen::Share => "/share",
            Screen::Leaderboard => "/leaderboard",
        }
    }

    /// Absolute path including the base path, e.g. `/api/check`.
    pub fn route(&self) -> String {
        match self {
            Screen::Home => BASE_PATH.to_string(),
            other => format!("{}{}", BASE_PATH, other.path()),
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Home => write!(f, "home"),
            Screen::Check => write!(f, "check"),
            Screen::Share => write!(f, "share"),
            Screen::Leaderboard => write!(f, "leaderboard"),
        }
    }
}

/// Where a button leads.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonTarget {
    /// Posts back to another screen of this frame.
    Screen(Screen),
    /// Opens an external URL.
    Link(String),
}

/// One frame button: its label and where it leads.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub target: ButtonTarget,
}

impl Button {
    /// Button that posts back to another screen of this frame.
    pub fn to_screen(label: impl Into<String>, screen: Screen) -> Self {
        Button {
            label: label.into(),
            target: ButtonTarget::Screen(screen),
        }
    }

    /// Button that opens `url` outside the frame.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Button {
            label: label.into(),
            target: ButtonTarget::Link(url.into()),
        }
    }
}

/// Everything needed to render one frame response.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDirective {
    /// Image markup.
    pub image: Node,
    /// Buttons in display order.
    pub buttons: Vec<Button>,
    /// Marks directives produced from a recovered failure.
    pub is_error: bool,
}

impl RenderDirective {
    /// Directive for a screen that rendered normally.
    ///
    /// # Arguments
    /// * `image` - Markup rendered into the frame image
    /// * `buttons` - Buttons in display order; only the first four are shown
    pub fn new(image: Node, buttons: Vec<Button>) -> Self {
        RenderDirective {
            image,
            buttons,
            is_error: false,
        }
    }

    /// Directive for a recovered failure.
    ///
    /// Rendered like any other screen; `is_error` only marks it for logs and
    /// tests, the HTTP status stays `200`.
    pub fn error(image: Node, buttons: Vec<Button>) -> Self {
        RenderDirective {
            image,
            buttons,
            is_error: true,
        }
    }

    /// The first link button's URL, if any.
    pub fn link_target(&self) -> Option<&str> {
        self.buttons.iter().find_map(|b| match &b.target {
            ButtonTarget::Link(url) => Some(url.as_str()),
            ButtonTarget::Screen(_) => None,
        })
    }
}
