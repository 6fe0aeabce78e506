use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Frame action payload a Farcaster client POSTs when a button is pressed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionPayload {
    #[serde(default)]
    pub untrusted_data: Option<UntrustedData>,
    #[serde(default)]
    pub trusted_data: Option<TrustedData>,
}

/// Client-reported fields. Anyone can forge these; see [`TrustedData`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub button_index: Option<u8>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub input_text: Option<String>,
}

/// Signed frame message, hex encoded. Verified by the validation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    pub message_bytes: String,
}

/// Transport-independent view of an inbound frame request.
#[derive(Debug, Clone)]
pub struct FrameRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub action: Option<FrameActionPayload>,
    /// Public host the request was addressed to, if the platform reported one.
    pub host: Option<String>,
}

impl FrameRequest {
    /// Plain GET with no query and no action payload.
    pub fn get(path: &str) -> Self {
        FrameRequest {
            method: Method::GET,
            path: path.to_string(),
            query: HashMap::new(),
            action: None,
            host: None,
        }
    }

    /// POST carrying a frame action payload, as sent by a button press.
    pub fn post(path: &str, action: FrameActionPayload) -> Self {
        FrameRequest {
            method: Method::POST,
            action: Some(action),
            ..FrameRequest::get(path)
        }
    }

    /// Add a decoded query parameter.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    /// Non-blank query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Client-reported action data, if the request carried any.
    pub fn untrusted(&self) -> Option<&UntrustedData> {
        self.action.as_ref()?.untrusted_data.as_ref()
    }

    /// Signed message to validate, if present and non-empty.
    pub fn message_bytes(&self) -> Option<&str> {
        self.action
            .as_ref()?
            .trusted_data
            .as_ref()
            .map(|t| t.message_bytes.as_str())
            .filter(|bytes| !bytes.is_empty())
    }
}

/// Parse a raw query string into decoded key/value pairs.
///
/// `+` decodes to a space. Later duplicates win. Undecodable values are kept raw.
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    let decode = |s: &str| {
        let spaced = s.replace('+', " ");
        urlencoding::decode(&spaced)
            .map(|d| d.into_owned())
            .unwrap_or(spaced)
    };

    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

/// Who is interacting with the frame in this request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameContext {
    pub fid: Option<String>,
    pub username: Option<String>,
    pub button_index: Option<u8>,
}

impl FrameContext {
    /// Context from client-reported data only.
    ///
    /// Uses the action payload's FID; a `fid` query parameter is honored only
    /// for plain requests without an action payload.
    pub fn from_untrusted(request: &FrameRequest) -> Self {
        match request.untrusted() {
            Some(data) => FrameContext {
                fid: data.fid.map(|fid| fid.to_string()),
                username: None,
                button_index: data.button_index,
            },
            None if request.action.is_none() => FrameContext {
                fid: request.param("fid").map(str::to_string),
                ..FrameContext::default()
            },
            None => FrameContext::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> FrameActionPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_query_decodes_values() {
        let query = parse_query("?fid=42&text=hello%20world&name=a+b&flag");
        assert_eq!(query.get("fid").map(String::as_str), Some("42"));
        assert_eq!(query.get("text").map(String::as_str), Some("hello world"));
        assert_eq!(query.get("name").map(String::as_str), Some("a b"));
        assert_eq!(query.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_blank_param_is_absent() {
        let request = FrameRequest::get("/api/share").with_query("fid", "  ");
        assert_eq!(request.param("fid"), None);
    }

    #[test]
    fn test_context_from_action_payload() {
        let action = payload(
            r#"{"untrustedData":{"fid":42,"buttonIndex":1,"url":"https://x"},
                "trustedData":{"messageBytes":"0a1b"}}"#,
        );
        let request = FrameRequest::post("/api/check", action);
        let ctx = FrameContext::from_untrusted(&request);
        assert_eq!(ctx.fid.as_deref(), Some("42"));
        assert_eq!(ctx.button_index, Some(1));
        assert_eq!(request.message_bytes(), Some("0a1b"));
    }

    #[test]
    fn test_context_ignores_query_fid_when_payload_present() {
        let request = FrameRequest::post("/api/check", payload(r#"{}"#)).with_query("fid", "7");
        assert_eq!(FrameContext::from_untrusted(&request).fid, None);
    }

    #[test]
    fn test_context_from_query_on_plain_get() {
        let request = FrameRequest::get("/api/check").with_query("fid", "7");
        assert_eq!(FrameContext::from_untrusted(&request).fid.as_deref(), Some("7"));
    }
}
