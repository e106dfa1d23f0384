//! Route table and middleware wiring for the portal.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Extension, Router,
};

use crate::config::PortalConfig;
use crate::web::middleware::auth::require_session;
use crate::web::pages;
use crate::web::types::PortalContext;

/// Build the portal application from runtime settings.
pub fn portal_router(config: PortalConfig) -> Router {
    portal_router_with_ctx(PortalContext::new(config))
}

/// Wire the route table around an existing context. Split out so the
/// server and the tests share one table.
pub(crate) fn portal_router_with_ctx(ctx: PortalContext) -> Router {
    let protected = Router::new()
        .route("/dashboard", get(pages::dashboard::show))
        .route("/active-patients", get(pages::roster::show))
        .route("/patients/:id", get(pages::patient::show))
        .route(
            "/patients/:id/assessment",
            get(pages::assessment::show).post(pages::assessment::submit),
        )
        .route(
            "/enroll",
            get(pages::enrollment::show).post(pages::enrollment::submit),
        )
        .route("/admin", get(pages::admin::show))
        .route("/clinic", post(pages::clinic::select))
        .layer(from_fn(require_session));

    Router::new()
        .route("/", get(pages::landing::show))
        .route("/healthz", get(pages::healthz))
        .merge(protected)
        .layer(Extension(ctx))
}
