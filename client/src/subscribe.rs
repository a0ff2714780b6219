//! Email subscription to daily updates for a city.

use serde::{Deserialize, Serialize};

use crate::{config::ClientConfig, Error};

/// Check the address typed into the subscription form.
///
/// Only presence of an `@` is checked; the endpoint does the rest.
pub fn validate_email(raw: &str) -> Result<String, Error> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(Error::MissingEmail);
    }
    if !email.contains('@') {
        return Err(Error::InvalidEmail);
    }
    Ok(email.to_owned())
}

/// Value of the named cookie in a `document.cookie`-style string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix(name)?.strip_prefix('='))
        .map(|v| {
            urlencoding::decode(v)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| v.to_owned())
        })
}

/// Body of a subscription request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub city: String,
}

impl SubscribeRequest {
    pub fn new(email: String, city: &str) -> Self {
        SubscribeRequest {
            email,
            city: city.to_owned(),
        }
    }

    pub fn body(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Request headers, with the CSRF token taken from `cookies`.
    ///
    /// A missing token is sent as an empty header; the endpoint rejects it.
    pub fn headers(&self, config: &ClientConfig, cookies: &str) -> Vec<(String, String)> {
        let token = cookie_value(cookies, &config.csrf_cookie).unwrap_or_else(|| {
            tracing::warn!("no {} cookie; subscribing without a token", config.csrf_cookie);
            String::new()
        });
        vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            (config.csrf_header.clone(), token),
        ]
    }
}

/// Body of the subscription endpoint's reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscribeResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// What to tell the user after the endpoint replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// Subscribed; the form should close.
    Subscribed { notice: String },
    /// Refused by the endpoint; the form stays open.
    Rejected { notice: String },
}

impl SubscribeOutcome {
    pub fn notice(&self) -> &str {
        match self {
            SubscribeOutcome::Subscribed { notice } | SubscribeOutcome::Rejected { notice } => {
                notice
            }
        }
    }
}

impl SubscribeResponse {
    pub fn from_json(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn outcome(&self, request: &SubscribeRequest) -> SubscribeOutcome {
        if self.status == "success" {
            SubscribeOutcome::Subscribed {
                notice: format!(
                    "✅ {}\n\nYou'll receive daily AQI updates for {} at {}",
                    self.message, request.city, request.email
                ),
            }
        } else {
            tracing::warn!("subscription refused: {}", self.message);
            SubscribeOutcome::Rejected {
                notice: format!("Subscription failed: {}", self.message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_checks() {
        assert!(matches!(validate_email("  "), Err(Error::MissingEmail)));
        assert!(matches!(
            validate_email("someone.example.com"),
            Err(Error::InvalidEmail)
        ));
        assert_eq!(validate_email(" a@b.c ").unwrap(), "a@b.c");
    }

    #[test]
    fn finds_cookie() {
        let cookies = "theme=dark; csrftoken=abc%3D123; csrftoken2=nope";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("abc=123"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(cookies, "session"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn prefix_of_other_cookie_does_not_match() {
        assert_eq!(cookie_value("csrftokenx=1", "csrftoken"), None);
    }

    #[test]
    fn request_wire_format() {
        let req = SubscribeRequest::new("a@b.c".into(), "Delhi");
        assert_eq!(req.body().unwrap(), r#"{"email":"a@b.c","city":"Delhi"}"#);

        let headers = req.headers(&ClientConfig::default(), "csrftoken=t0k");
        assert!(headers.contains(&("X-CSRFToken".to_owned(), "t0k".to_owned())));
        assert!(headers.contains(&("Content-Type".to_owned(), "application/json".to_owned())));

        let headers = req.headers(&ClientConfig::default(), "");
        assert!(headers.contains(&("X-CSRFToken".to_owned(), String::new())));
    }

    #[test]
    fn outcomes() {
        let req = SubscribeRequest::new("a@b.c".into(), "Delhi");
        let ok = SubscribeResponse::from_json(
            r#"{"status": "success", "message": "Subscribed successfully!"}"#,
        )
        .unwrap();
        assert_eq!(
            ok.outcome(&req),
            SubscribeOutcome::Subscribed {
                notice: "✅ Subscribed successfully!\n\nYou'll receive daily AQI updates for Delhi at a@b.c".into()
            }
        );

        let refused = SubscribeResponse::from_json(
            r#"{"status": "error", "message": "Email and city are required"}"#,
        )
        .unwrap();
        assert_eq!(
            refused.outcome(&req).notice(),
            "Subscription failed: Email and city are required"
        );
    }
}
