use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use stockroom_auth::JwtValidator;

use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    /// Where unauthenticated requests are sent; `None` answers 401 instead.
    pub login_url: Option<Arc<str>>,
}

pub async fn auth_middleware(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let claims = match extract_bearer(req.headers()) {
        Some(token) => match state.jwt.validate(token, Utc::now()) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "bearer token rejected");
                return unauthenticated(&state, req.uri());
            }
        },
        None => return unauthenticated(&state, req.uri()),
    };

    req.extensions_mut().insert(PrincipalContext::from_claims(&claims));

    next.run(req).await
}

fn unauthenticated(state: &AuthState, uri: &Uri) -> Response {
    match &state.login_url {
        Some(login_url) => Redirect::to(&login_redirect(login_url, uri)).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Login URL with the full requested path (query included) as `next`.
fn login_redirect(login_url: &str, uri: &Uri) -> String {
    let target = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    let next: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    let sep = if login_url.contains('?') { '&' } else { '?' };
    format!("{login_url}{sep}next={next}")
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn login_redirect_keeps_query_and_encodes_next() {
        let uri: Uri = "/products/?page=2&x=1".parse().unwrap();
        assert_eq!(
            login_redirect("/accounts/login/", &uri),
            "/accounts/login/?next=%2Fproducts%2F%3Fpage%3D2%26x%3D1"
        );

        let uri: Uri = "/products/create/".parse().unwrap();
        assert_eq!(
            login_redirect("/login?lang=en", &uri),
            "/login?lang=en&next=%2Fproducts%2Fcreate%2F"
        );
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer(&headers("Bearer   ")), None);
        assert_eq!(extract_bearer(&headers("Basic abc")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }
}
