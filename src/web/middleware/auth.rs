//! Session middleware for the protected portal routes.
//!
//! Every request must carry a bearer token signed with the portal's
//! session secret. Requests that fail verification are redirected to
//! the landing page rather than answered with a bare status code, so a
//! browser with a stale token lands back on the sign-in screen.

use axum::{
    http::{header, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::session::{bearer_token, verify_token, Session, SessionError};
use crate::web::types::PortalContext;

/// Verify the bearer token in `headers` against the session secret.
pub fn verify_request(headers: &HeaderMap, secret: &str) -> Result<Session, SessionError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = bearer_token(header_value)?;

    let claims = verify_token(token, secret)?;
    Ok(Session {
        token: token.to_string(),
        claims,
    })
}

/// Middleware that gates the protected routes on a valid session.
pub async fn require_session(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_session_inner(req, next).await {
        Ok(response) => response,
        Err(redirect) => redirect.into_response(),
    }
}

async fn require_session_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Redirect> {
    // 1. Pull the shared context installed by the router.
    let ctx = req
        .extensions()
        .get::<PortalContext>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("Portal context missing from request extensions");
            Redirect::temporary("/")
        })?;

    // 2. Verify the bearer token before any handler runs.
    let session = verify_request(req.headers(), &ctx.config.session_secret).map_err(|e| {
        tracing::debug!(error = %e, path = %req.uri().path(), "Rejected portal request");
        Redirect::temporary("/")
    })?;

    // 3. Hand the verified session to the handler.
    req.extensions_mut().insert(session);

    // 4. Run the handler and stamp the response as uncacheable. Every
    //    protected page renders per-user clinical data.
    let mut response = next.run(req).await;
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    Ok(response)
}
