use axum::http::{header, HeaderName, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// The dashboard dev server and the static frontend served by a local
/// live-reload server.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:5500";

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

#[derive(Debug, Clone, PartialEq)]
pub enum CorsConfig {
    /// `*`: any origin, credentials disabled.
    AnyOrigin,
    Origins(Vec<HeaderValue>),
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        Self::parse(&origins)
    }

    pub fn parse(origins: &str) -> Self {
        let mut allowed = Vec::new();
        for origin in origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if origin == "*" {
                return CorsConfig::AnyOrigin;
            }
            match origin.parse::<HeaderValue>() {
                Ok(value) => {
                    tracing::debug!("CORS: Allowing origin: {}", origin);
                    allowed.push(value);
                }
                Err(e) => tracing::warn!("CORS: Invalid origin '{}': {}", origin, e),
            }
        }

        if allowed.is_empty() {
            tracing::warn!("CORS: No valid origins configured, allowing any origin");
            CorsConfig::AnyOrigin
        } else {
            CorsConfig::Origins(allowed)
        }
    }
}

pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS));

    // Browsers refuse credentialed responses with a wildcard origin, and
    // tower-http panics on that combination, so credentials go with lists only.
    match config {
        CorsConfig::AnyOrigin => layer.allow_origin(AllowOrigin::any()),
        CorsConfig::Origins(origins) => {
            tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
            layer
                .allow_origin(AllowOrigin::list(origins.clone()))
                .allow_credentials(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origins_are_valid() {
        match CorsConfig::parse(DEFAULT_ALLOWED_ORIGINS) {
            CorsConfig::Origins(origins) => assert_eq!(origins.len(), 2),
            other => panic!("expected an origin list, got {:?}", other),
        }
    }

    #[test]
    fn test_wildcard_and_empty_mean_any() {
        assert_eq!(CorsConfig::parse("*"), CorsConfig::AnyOrigin);
        assert_eq!(CorsConfig::parse("http://a.test, *"), CorsConfig::AnyOrigin);
        assert_eq!(CorsConfig::parse(" , "), CorsConfig::AnyOrigin);
    }

    #[test]
    fn test_create_cors_layer() {
        let _any = create_cors_layer(&CorsConfig::AnyOrigin);
        let _list = create_cors_layer(&CorsConfig::parse("http://localhost:3000"));
    }
}
