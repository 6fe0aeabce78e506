//! Frame HTML documents.
//!
//! A frame is an HTML page whose `fc:frame` meta tags carry the image, the
//! buttons, and where button presses are posted.

use super::{escape, svg};
use crate::models::directive::{ButtonTarget, RenderDirective, Screen, MAX_BUTTONS};

pub const TITLE: &str = "Moxie Frame";
pub const FRAME_VERSION: &str = "vNext";
pub const ASPECT_RATIO: &str = "1.91:1";

fn meta(out: &mut String, property: &str, content: &str) {
    out.push_str(&format!(
        "<meta property=\"{}\" content=\"{}\">\n",
        escape(property),
        escape(content)
    ));
}

/// Render a directive as the frame page for `screen`.
///
/// `base_url` is the absolute origin used for post targets.
pub fn render(directive: &RenderDirective, screen: Screen, base_url: &str) -> String {
    let image = svg::data_uri(&directive.image);

    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(TITLE)));
    meta(&mut out, "og:title", TITLE);
    meta(&mut out, "og:image", &image);
    meta(&mut out, "fc:frame", FRAME_VERSION);
    meta(&mut out, "fc:frame:image", &image);
    meta(&mut out, "fc:frame:image:aspect_ratio", ASPECT_RATIO);
    meta(
        &mut out,
        "fc:frame:post_url",
        &format!("{}{}", base_url, screen.route()),
    );

    for (i, button) in directive.buttons.iter().take(MAX_BUTTONS).enumerate() {
        let key = format!("fc:frame:button:{}", i + 1);
        meta(&mut out, &key, &button.label);
        match &button.target {
            ButtonTarget::Screen(target) => {
                meta(&mut out, &format!("{}:action", key), "post");
                meta(
                    &mut out,
                    &format!("{}:target", key),
                    &format!("{}{}", base_url, target.route()),
                );
            }
            ButtonTarget::Link(url) => {
                meta(&mut out, &format!("{}:action", key), "link");
                meta(&mut out, &format!("{}:target", key), url);
            }
        }
    }

    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape(TITLE)));
    out.push_str("</body>\n</html>\n");
    out
}
