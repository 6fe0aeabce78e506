//! Glue between the Vercel runtime and the frame screens.
//!
//! Each function in `api/` builds one [`FrameApp`] at cold start and hands it
//! every request. Screen failures never surface here: they are already error
//! screens, so frame responses are always `200 text/html`.

use crate::config::Config;
use crate::earnings::{EarningsClient, EarningsSource};
use crate::error::{FrameError, Result};
use crate::frame::{self, screen_for_path};
use crate::models::directive::Screen;
use crate::models::request::{parse_query, FrameActionPayload, FrameContext, FrameRequest};
use crate::render::html;
use crate::validation::FrameValidator;
use http::Method;
use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};
use vercel_runtime::{Body, Error, Request, Response, StatusCode};

/// Everything a frame function needs across requests of a warm instance.
///
/// # Sharing
/// Immutable once built; bins wrap it in an `Arc` and hand it to every request.
pub struct FrameApp {
    config: Config,
    earnings: Box<dyn EarningsSource>,
    validator: Option<FrameValidator>,
}

impl FrameApp {
    /// Build the app from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Build the app with the Airstack client and, if configured, the validator.
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| FrameError::Config(format!("Failed to build HTTP client: {}", e)))?;
        let earnings = EarningsClient::with_http(http.clone(), &config);
        let validator = config
            .neynar_api_key
            .as_ref()
            .map(|key| FrameValidator::new(http, key.clone()));

        Ok(FrameApp {
            config,
            earnings: Box::new(earnings),
            validator,
        })
    }

    /// Build the app around a custom earnings source.
    pub fn with_source(config: Config, earnings: Box<dyn EarningsSource>) -> Self {
        FrameApp {
            config,
            earnings,
            validator: None,
        }
    }

    /// Serve a request, picking the screen from its path.
    pub async fn serve(&self, req: Request) -> std::result::Result<Response<Body>, Error> {
        let screen = screen_for_path(req.uri().path());
        self.serve_screen(screen, req).await
    }

    /// Serve a request as the given screen.
    pub async fn serve_screen(
        &self,
        screen: Screen,
        req: Request,
    ) -> std::result::Result<Response<Body>, Error> {
        if *req.method() != Method::GET && *req.method() != Method::POST {
            return method_not_allowed();
        }

        let request = frame_request(&req);
        let page = self.render_page(screen, &request).await;

        Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(Body::Text(page))?)
    }

    /// Render the frame page for a screen.
    ///
    /// # Navigation
    /// A POST without a usable button intent (no payload, an unparseable
    /// payload, or no `buttonIndex`) renders the home screen instead of
    /// `screen`.
    pub async fn render_page(&self, screen: Screen, request: &FrameRequest) -> String {
        let screen = if request.method == Method::POST
            && FrameContext::from_untrusted(request).button_index.is_none()
        {
            if screen != Screen::Home {
                warn!("POST {} without a button intent, rendering home", request.path);
            }
            Screen::Home
        } else {
            screen
        };
        info!("{} {} -> {} screen", request.method, request.path, screen);

        let ctx = match screen {
            Screen::Check => self.resolve_context(request).await,
            _ => FrameContext::default(),
        };
        let base_url = self.base_url(request);
        let directive =
            frame::render(screen, request, &ctx, &*self.earnings, &base_url).await;
        html::render(&directive, screen, &base_url)
    }

    /// Identify the caller.
    ///
    /// # Validation
    /// With a validator configured, every POST must carry a signed message
    /// that validates; a POST without one has no caller, whatever its query
    /// string says. Without a validator the client-reported FID is used.
    pub async fn resolve_context(&self, request: &FrameRequest) -> FrameContext {
        match (&self.validator, request.method == Method::POST) {
            (Some(validator), true) => match request.message_bytes() {
                Some(bytes) => validator.validate(bytes).await.unwrap_or_else(|e| {
                    warn!("Frame validation failed: {}", e);
                    FrameContext::default()
                }),
                None => {
                    warn!("Frame action without trusted data");
                    FrameContext::default()
                }
            },
            _ => FrameContext::from_untrusted(request),
        }
    }

    /// Absolute origin for post targets and share links.
    pub fn base_url(&self, request: &FrameRequest) -> String {
        match (&self.config.public_url, &request.host) {
            (Some(url), _) => url.clone(),
            (None, Some(host)) => format!("https://{}", host),
            (None, None) => String::new(),
        }
    }
}

/// Convert a runtime request into a [`FrameRequest`].
///
/// An unparseable POST body is treated as an action without data.
pub fn frame_request(req: &Request) -> FrameRequest {
    let action = if *req.method() == Method::POST {
        let bytes: &[u8] = match req.body() {
            Body::Empty => &[],
            Body::Text(text) => text.as_bytes(),
            Body::Binary(data) => data.as_slice(),
        };
        if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(bytes).unwrap_or_else(|e| {
                warn!("Ignoring malformed frame action payload: {}", e);
                FrameActionPayload::default()
            }))
        }
    } else {
        None
    };

    let host = ["x-forwarded-host", "host"]
        .iter()
        .find_map(|name| req.headers().get(*name)?.to_str().ok())
        .map(|host| host.split(',').next().unwrap_or(host).trim().to_string())
        .filter(|host| !host.is_empty());

    FrameRequest {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(parse_query).unwrap_or_default(),
        action,
        host,
    }
}

fn method_not_allowed() -> std::result::Result<Response<Body>, Error> {
    let error = json!({
        "error": "Method not allowed",
        "message": "Frames accept GET and POST requests"
    });
    Ok(Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .body(Body::Text(error.to_string()))?)
}
