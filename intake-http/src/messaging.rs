//! Chat deep links offered after a successful submission.

use reqwest::Url;

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("Phone number '{0}' contains no digits")]
    NoDigits(String),

    #[error("Invalid messaging host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },
}

/// Strip everything but ASCII digits.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Build `https://<host>/<digits>?text=<greeting>`.
///
/// The greeting is percent-encoded as a query value.
pub fn deep_link(host: &str, phone: &str, greeting: &str) -> Result<Url, MessagingError> {
    let digits = normalize_phone(phone);
    if digits.is_empty() {
        return Err(MessagingError::NoDigits(phone.to_string()));
    }
    let base = format!("https://{}/{digits}", host.trim_matches('/'));
    Url::parse_with_params(&base, &[("text", greeting)]).map_err(|e| MessagingError::InvalidHost {
        host: host.to_string(),
        reason: e.to_string(),
    })
}
