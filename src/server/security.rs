//! Transport security and request hygiene layers.
//!
//! Headers that are sent in every mode, plus the HTTPS redirect and HSTS header that the
//! production [`SecurityProfile`] turns on.

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::server::config::SecurityProfile;

/// Maximum accepted request body, 5 MiB
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

pub static HSTS_VALUE: &str = "max-age=31536000; includeSubDomains; preload";

/// Wraps `router` with the body limit, security headers and request tracing.
pub fn apply(router: Router, profile: SecurityProfile) -> Router {
    let mut router = router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    if profile.hsts {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        ));
    }

    if profile.ssl_redirect {
        router = router.layer(middleware::from_fn(redirect_to_https));
    }

    router.layer(TraceLayer::new_for_http())
}

/// Whether the request reached the proxy over HTTPS
fn is_secure(request: &Request) -> bool {
    request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
        || request.uri().scheme_str() == Some("https")
}

/// Sends plain HTTP requests to the same URL over HTTPS.
async fn redirect_to_https(request: Request, next: Next) -> Response {
    if is_secure(&request) {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty());

    let Some(host) = host else {
        tracing::debug!("insecure request without Host header, not redirecting");
        return next.run(request).await;
    };

    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    Redirect::permanent(&format!("https://{}{}", host, path)).into_response()
}
