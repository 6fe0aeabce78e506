//! Frame router.
//!
//! Maps request paths to screens and runs the matching handler. Paths that
//! match no screen, including requests without a usable button intent, land
//! on the home screen.

pub mod screens;
pub mod share;

use crate::earnings::EarningsSource;
use crate::models::directive::{RenderDirective, Screen, BASE_PATH};
use crate::models::request::{FrameContext, FrameRequest};

/// Screen for a request path, with or without the `/api` base path.
pub fn screen_for_path(path: &str) -> Screen {
    let path = path.split('?').next().unwrap_or_default();
    let relative = path.strip_prefix(BASE_PATH).unwrap_or(path);
    match relative.trim_matches('/') {
        "check" => Screen::Check,
        "share" => Screen::Share,
        "leaderboard" => Screen::Leaderboard,
        _ => Screen::Home,
    }
}

/// Run one screen handler.
///
/// `ctx` is only consulted by screens that need the caller's identity.
pub async fn render(
    screen: Screen,
    request: &FrameRequest,
    ctx: &FrameContext,
    source: &dyn EarningsSource,
    base_url: &str,
) -> RenderDirective {
    match screen {
        Screen::Home => screens::home(),
        Screen::Check => screens::check(ctx, source, base_url).await,
        Screen::Share => screens::share(request),
        Screen::Leaderboard => screens::leaderboard(source).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_for_path() {
        assert_eq!(screen_for_path("/api"), Screen::Home);
        assert_eq!(screen_for_path("/api/"), Screen::Home);
        assert_eq!(screen_for_path("/"), Screen::Home);
        assert_eq!(screen_for_path("/api/check"), Screen::Check);
        assert_eq!(screen_for_path("/check/"), Screen::Check);
        assert_eq!(screen_for_path("/api/share?fid=1"), Screen::Share);
        assert_eq!(screen_for_path("/api/leaderboard"), Screen::Leaderboard);
    }

    #[test]
    fn test_unknown_paths_go_home() {
        assert_eq!(screen_for_path("/api/moxie-stats"), Screen::Home);
        assert_eq!(screen_for_path(""), Screen::Home);
        assert_eq!(screen_for_path("/api/check/extra"), Screen::Home);
    }

    #[test]
    fn test_screen_routes_resolve_to_themselves() {
        for screen in [Screen::Home, Screen::Check, Screen::Share, Screen::Leaderboard] {
            assert_eq!(screen_for_path(&screen.route()), screen);
        }
    }
}
