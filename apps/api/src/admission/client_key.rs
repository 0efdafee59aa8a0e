use std::convert::Infallible;
use std::fmt;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

/// Bucket shared by every request that carries no origin headers.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Rate-limit bucket for a requester, derived from proxy headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    /// First non-empty of: the first `x-forwarded-for` entry, `x-real-ip`,
    /// or the literal `"unknown"`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let key = header_str(headers, "x-forwarded-for")
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                header_str(headers, "x-real-ip")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or(UNKNOWN_CLIENT);
        Self(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientKey::from_headers(&parts.headers))
    }
}
