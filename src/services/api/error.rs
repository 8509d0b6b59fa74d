use thiserror::Error;

/// Structured code the backend attaches when it cannot compute a route.
pub const MISSING_ROUTE_ADDRESS_CODE: &str = "MISSING_ROUTE_ADDRESS";

/// Prose emitted by backends that predate the structured code.
pub const MISSING_ROUTE_ADDRESS_TEXT: &str = "Origin and destination must be provided";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the backend refused the change because route computation
    /// lacks an origin or destination address.
    ///
    /// The structured `code`/`error` field wins; the body text is only
    /// searched when no structured code is present.
    pub fn is_missing_route_address(&self) -> bool {
        let ApiError::Status { body, .. } = self else {
            return false;
        };

        if let Some(code) = structured_code(body) {
            return code == MISSING_ROUTE_ADDRESS_CODE;
        }

        body.contains(MISSING_ROUTE_ADDRESS_TEXT)
    }
}

fn structured_code(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["code", "error"]
        .iter()
        .filter_map(|field| value.get(field).and_then(|v| v.as_str()))
        .find(|candidate| is_code_like(candidate))
        .map(str::to_string)
}

/// Codes are SCREAMING_SNAKE_CASE; anything else is prose.
fn is_code_like(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
