//! Cross-origin and response hardening middleware.
//!
//! The browser frontend is served from its own origin, so the API allows
//! exactly that origin with credentials and exposes the `trace-id` header to
//! it. [`security_headers`] adds the baseline hardening headers to every
//! response that does not set them itself.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::middleware::DefaultHeaders;
use reqwest::Url;

use crate::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// The frontend origin could not be derived from the configured URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frontend URL {url}: {message}")]
pub struct InvalidOrigin {
    /// Rejected input.
    pub url: String,
    /// Parser or scheme complaint.
    pub message: String,
}

/// Serialised `scheme://host[:port]` origin of the browser frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendOrigin(String);

impl FrontendOrigin {
    /// Reduce a frontend URL to its origin. Only `http` and `https` URLs are
    /// accepted; paths and queries are dropped.
    ///
    /// # Errors
    /// Returns [`InvalidOrigin`] for unparsable URLs and other schemes.
    ///
    /// # Examples
    /// ```
    /// use geodir_backend::middleware::FrontendOrigin;
    ///
    /// let origin = FrontendOrigin::parse("http://localhost:3000/app").expect("valid URL");
    /// assert_eq!(origin.as_str(), "http://localhost:3000");
    /// assert!(FrontendOrigin::parse("*").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidOrigin> {
        let invalid = |message: String| InvalidOrigin {
            url: raw.to_owned(),
            message,
        };
        let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        Ok(Self(url.origin().ascii_serialization()))
    }

    /// Origin as sent in the `Origin` request header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// CORS policy admitting only `origin`, with credentials.
pub fn cors(origin: &FrontendOrigin) -> Cors {
    Cors::default()
        .allowed_origin(origin.as_str())
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers([header::ACCEPT, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([HeaderName::from_static(TRACE_ID_HEADER)])
        .supports_credentials()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}

/// Hardening headers applied to every response. Resources may be embedded
/// cross-origin since the frontend lives elsewhere.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("X-DNS-Prefetch-Control", "off"))
        .add(("X-Download-Options", "noopen"))
        .add(("X-Permitted-Cross-Domain-Policies", "none"))
        .add(("X-XSS-Protection", "0"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("Cross-Origin-Opener-Policy", "same-origin"))
        .add(("Cross-Origin-Resource-Policy", "cross-origin"))
        .add(("Origin-Agent-Cluster", "?1"))
        .add((
            "Strict-Transport-Security",
            "max-age=15552000; includeSubDomains",
        ))
}
