use moxie_frame::app::FrameApp;
use moxie_frame::models::directive::Screen;
use moxie_frame::telemetry;
use std::sync::Arc;
use vercel_runtime::{run, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let app = Arc::new(FrameApp::from_env()?);

    // GET|POST /api/check: Caller's Moxie earnings with a share link.
    run(move |req: Request| {
        let app = Arc::clone(&app);
        async move { app.serve_screen(Screen::Check, req).await }
    })
    .await
}
