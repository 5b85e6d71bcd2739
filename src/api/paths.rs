//! REST paths and query strings
//!
//! Endpoint templates use `:param` placeholders (`/achievements/:id`) that
//! are substituted before each call. Query strings are built and parsed
//! here so the list pages and the HTTP client agree on encoding.

use std::borrow::Cow;

use super::error::{ApiError, ApiResult};

/// Auth endpoints
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_FORGOT_PASSWORD: &str = "/auth/forgot-password";
pub const AUTH_RESET_PASSWORD: &str = "/auth/reset-password";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const AUTH_ME: &str = "/auth/me";

/// Public portfolio of a profile
pub const PUBLIC_PORTFOLIO: &str = "/public/portfolio/:username";

/// API liveness
pub const HEALTH: &str = "/health";

/// A path with `:name` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: Cow<'static, str>,
}

impl PathTemplate {
    /// Wrap a static template
    pub const fn new(template: &'static str) -> Self {
        Self {
            template: Cow::Borrowed(template),
        }
    }

    /// Build a template at runtime (entity paths)
    pub fn owned(template: impl Into<String>) -> Self {
        Self {
            template: Cow::Owned(template.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Names of the placeholders, in order
    pub fn params(&self) -> Vec<&str> {
        self.template
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .collect()
    }

    /// Substitute every placeholder.
    ///
    /// Values are percent-encoded. Every placeholder must have a value.
    pub fn render(&self, values: &[(&str, &str)]) -> ApiResult<String> {
        let mut rendered = Vec::new();

        for segment in self.template.split('/') {
            match segment.strip_prefix(':') {
                Some(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| ApiError::MissingPathParam(name.to_string()))?;
                    rendered.push(urlencoding::encode(value).into_owned());
                }
                None => rendered.push(segment.to_string()),
            }
        }

        Ok(rendered.join("/"))
    }
}

impl From<&'static str> for PathTemplate {
    fn from(template: &'static str) -> Self {
        Self::new(template)
    }
}

/// Encode key/value pairs as `a=1&b=two`, skipping empty values
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse `?a=1&b=two` (leading `?` optional). `+` decodes to a space.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.trim().trim_start_matches('?');

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
