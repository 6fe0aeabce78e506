//! Screen handlers.
//!
//! Each handler resolves to a [`RenderDirective`]. Failures are turned into an
//! error directive here so the frame always has something to display.

use super::share;
use crate::earnings::EarningsSource;
use crate::error::{FrameError, Result};
use crate::models::directive::{Button, RenderDirective, Screen};
use crate::models::earnings::{format_mox, EarningsQuery, EarningsResult, LeaderboardEntry};
use crate::models::markup::{Node, TextStyle, ACCENT_COLOR, BACKGROUND, ERROR_BACKGROUND};
use crate::models::request::{FrameContext, FrameRequest};
use tracing::{info, warn};

/// Number of rows on the leaderboard screen.
pub const LEADERBOARD_SIZE: usize = 5;

/// Landing screen. Always the same.
pub fn home() -> RenderDirective {
    RenderDirective::new(
        Node::screen(
            BACKGROUND,
            vec![Node::text(TextStyle::new(48).bold(), "MOXIE")],
        ),
        vec![Button::to_screen("Check Moxie Stats", Screen::Check)],
    )
}

/// Caller's own earnings, with a share link.
pub async fn check(
    ctx: &FrameContext,
    source: &dyn EarningsSource,
    base_url: &str,
) -> RenderDirective {
    match check_earnings(ctx, source).await {
        Ok((fid, earnings)) => {
            info!("Rendering check screen for fid {}", fid);
            earnings_directive(ctx, &fid, &earnings, base_url)
        }
        Err(e) => {
            warn!("Check screen failed: {}", e);
            error_directive(&e)
        }
    }
}

async fn check_earnings(
    ctx: &FrameContext,
    source: &dyn EarningsSource,
) -> Result<(String, EarningsResult)> {
    let fid = ctx.fid.clone().ok_or(FrameError::MissingIdentifier)?;
    let earnings = source.fetch(&EarningsQuery::new(fid.as_str())).await?;
    Ok((fid, earnings))
}

fn earnings_directive(
    ctx: &FrameContext,
    fid: &str,
    earnings: &EarningsResult,
    base_url: &str,
) -> RenderDirective {
    let who = earnings
        .display_name
        .as_ref()
        .or(ctx.username.as_ref())
        .map(|name| format!("@{}", name))
        .unwrap_or_else(|| format!("FID {}", fid));

    let mut lines = vec![
        Node::text(TextStyle::new(40).bold(), "Moxie Earnings"),
        Node::text(TextStyle::new(28).color(ACCENT_COLOR), who),
        figure("Today", &earnings.today_earnings),
        figure("Lifetime", &earnings.lifetime_earnings),
    ];
    if let Some(score) = earnings.reputation_score {
        lines.push(Node::text(
            TextStyle::new(22),
            format!("Farcaster score: {:.2}", score),
        ));
    }

    RenderDirective::new(
        Node::screen(BACKGROUND, lines),
        vec![
            Button::to_screen("Home", Screen::Home),
            Button::to_screen("Top earners", Screen::Leaderboard),
            Button::link("Share", share::compose_link(base_url, fid, earnings)),
        ],
    )
}

fn figure(label: &str, amount: &str) -> Node {
    Node::column(
        4,
        vec![
            Node::text(TextStyle::new(24).color(ACCENT_COLOR), label),
            Node::text(TextStyle::new(44).bold(), format_mox(amount)),
        ],
    )
}

/// Figures someone shared, read from the query string.
pub fn share(request: &FrameRequest) -> RenderDirective {
    match share_params(request) {
        Ok((fid, earnings)) => {
            info!("Rendering share screen for fid {}", fid);
            RenderDirective::new(
                Node::screen(
                    BACKGROUND,
                    vec![
                        Node::text(TextStyle::new(40).bold(), "Moxie Earnings"),
                        Node::text(TextStyle::new(28).color(ACCENT_COLOR), format!("FID {}", fid)),
                        figure("Today", &earnings.today_earnings),
                        figure("Lifetime", &earnings.lifetime_earnings),
                    ],
                ),
                vec![Button::to_screen("Check yours", Screen::Check)],
            )
        }
        Err(e) => {
            warn!("Share screen failed: {}", e);
            error_directive(&e)
        }
    }
}

fn share_params(request: &FrameRequest) -> Result<(String, EarningsResult)> {
    let keys = [share::PARAM_FID, share::PARAM_TODAY, share::PARAM_LIFETIME];
    let missing: Vec<&'static str> = keys
        .into_iter()
        .filter(|key| request.param(key).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(FrameError::IncompleteParameters(missing));
    }

    let param = |key| request.param(key).unwrap_or_default().to_string();
    Ok((
        param(share::PARAM_FID),
        EarningsResult {
            today_earnings: param(share::PARAM_TODAY),
            lifetime_earnings: param(share::PARAM_LIFETIME),
            ..EarningsResult::default()
        },
    ))
}

/// Today's top earners.
pub async fn leaderboard(source: &dyn EarningsSource) -> RenderDirective {
    match source.top_earners(LEADERBOARD_SIZE).await {
        Ok(entries) => {
            info!("Rendering leaderboard with {} entries", entries.len());
            leaderboard_directive(&entries)
        }
        Err(e) => {
            warn!("Leaderboard screen failed: {}", e);
            error_directive(&e)
        }
    }
}

fn leaderboard_directive(entries: &[LeaderboardEntry]) -> RenderDirective {
    let rows = if entries.is_empty() {
        vec![Node::text(
            TextStyle::new(24),
            "No Moxie earnings data available at the moment.",
        )]
    } else {
        entries
            .iter()
            .map(|entry| {
                Node::text(
                    TextStyle::new(22),
                    format!("{} earned {}", entry.label(), format_mox(&entry.earnings)),
                )
            })
            .collect()
    };

    RenderDirective::new(
        Node::screen(
            BACKGROUND,
            vec![
                Node::text(TextStyle::new(36).bold(), "Top Earners Today"),
                Node::column(10, rows),
            ],
        ),
        vec![
            Button::to_screen("Home", Screen::Home),
            Button::to_screen("Check mine", Screen::Check),
        ],
    )
}

/// Screen shown for any recovered failure.
pub fn error_directive(error: &FrameError) -> RenderDirective {
    RenderDirective::error(
        Node::screen(
            ERROR_BACKGROUND,
            vec![
                Node::text(TextStyle::new(40).bold(), "Something went wrong"),
                Node::text(TextStyle::new(24), error.to_string()),
            ],
        ),
        vec![Button::to_screen("Back to Home", Screen::Home)],
    )
}
