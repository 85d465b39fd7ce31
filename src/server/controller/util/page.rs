use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::server::{
    error::Error,
    model::{
        auth::AuthUser,
        session::{csrf::SessionCsrfToken, flash::SessionFlash},
    },
    view::{error::error_page, layout::PageContext},
};

/// Collects what the layout needs: the user, pending flash messages and the CSRF token.
///
/// Taking the flashes removes them from the session, so call this once per rendered page.
pub async fn page_context(
    session: &Session,
    user: Option<AuthUser>,
) -> Result<PageContext, Error> {
    let flashes = SessionFlash::take(session).await?;
    let csrf_token = SessionCsrfToken::get_or_create(session).await?;

    Ok(PageContext {
        user,
        flashes,
        csrf_token,
    })
}

/// Replaces the JSON body of a 403, 404 or 500 from an HTML route with an error page.
///
/// Used with [`axum::middleware::map_response`] on the page and admin routers. Headers
/// other than the content type and length are kept.
pub async fn html_error_page(response: Response) -> Response {
    let status = response.status();
    if !matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::NOT_FOUND | StatusCode::INTERNAL_SERVER_ERROR
    ) {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);

    (parts, error_page(status)).into_response()
}
