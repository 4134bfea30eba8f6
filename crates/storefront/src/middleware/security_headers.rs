//! Security headers middleware.
//!
//! Adds restrictive security headers to all responses. The CSP allows inline
//! styles only with the request's nonce (see [`CspNonce`]); storefront images
//! may come from any HTTPS origin since stores host them on their own CDNs.

use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::CspNonce;

/// Build the CSP header value for a nonce.
///
/// ```text
/// default-src 'none';
/// script-src 'self';
/// style-src 'self' 'nonce-<nonce>';
/// font-src 'self';
/// img-src 'self' https: data:;
/// connect-src 'self';
/// object-src 'none';
/// base-uri 'self';
/// form-action 'self';
/// frame-ancestors 'none'
/// ```
#[must_use]
pub fn content_security_policy(nonce: &str) -> String {
    let style_src = if nonce.is_empty() {
        "style-src 'self'".to_string()
    } else {
        format!("style-src 'self' 'nonce-{nonce}'")
    };

    [
        "default-src 'none'",
        "script-src 'self'",
        &style_src,
        "font-src 'self'",
        "img-src 'self' https: data:",
        "connect-src 'self'",
        "object-src 'none'",
        "base-uri 'self'",
        "form-action 'self'",
        "frame-ancestors 'none'",
    ]
    .join("; ")
}

/// Add security headers to all responses.
///
/// `Cache-Control` defaults to `no-store` unless the handler set its own
/// (theme stylesheets are cacheable).
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let nonce = request
        .extensions()
        .get::<CspNonce>()
        .map(|n| n.value().to_string())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    apply_security_headers(response.headers_mut(), &nonce);
    response
}

fn apply_security_headers(headers: &mut HeaderMap, nonce: &str) {
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    match HeaderValue::from_str(&content_security_policy(nonce)) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => tracing::error!(error = %e, "Invalid CSP header value"),
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "camera=(), \
             geolocation=(), \
             microphone=(), \
             payment=(), \
             usb=(), \
             browsing-topics=()",
        ),
    );

    headers
        .entry(CACHE_CONTROL)
        .or_insert_with(|| HeaderValue::from_static("no-store, max-age=0"));

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("same-origin"),
    );
    // Store images are cross-origin and rarely send CORP headers.
    headers.insert(
        HeaderName::from_static("cross-origin-embedder-policy"),
        HeaderValue::from_static("credentialless"),
    );
}
