//! Public landing page. Signed-in callers are bounced straight to
//! their role home; everyone else sees the sign-in instructions.

use axum::{
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};

use crate::shell::{role_home, SessionState};
use crate::web::middleware::auth::verify_request;
use crate::web::render;
use crate::web::types::PortalContext;

pub async fn show(Extension(ctx): Extension<PortalContext>, headers: HeaderMap) -> Response {
    // This route sits outside the session middleware, so check the
    // token by hand. A valid session with a resolvable profile skips
    // the landing page entirely.
    if let Ok(session) = verify_request(&headers, &ctx.config.session_secret) {
        if let SessionState::Authenticated { profile, .. } = ctx.resolve_session(&session).await {
            return Redirect::temporary(role_home(&profile.role)).into_response();
        }
    }

    Html(render_landing()).into_response()
}

fn render_landing() -> String {
    let body = r#"<h1>Careloop Care Management Portal</h1>
<p>Collaborative care tracking for enrolled behavioral health patients.</p>
<p>Sign in through your organization and present your session credential
as a bearer token to reach the portal pages.</p>"#
        .to_string();
    render::page("Welcome", render::public_header(), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_names_the_portal() {
        let html = render_landing();
        assert!(html.contains("Careloop Care Management Portal"));
        assert!(html.contains("bearer token"));
    }
}
