use axum::{
    Json,
    body::Bytes,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::sync::Arc;

use super::{ApiError, AppState, LoginRequest};
use crate::services::LoginResult;

// ============================================================================
// Middleware
// ============================================================================

/// Guards protected routes with `Authorization: Bearer <jwt>`.
/// The resolved user is stored in the request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or_else(ApiError::unauthorized)?;

    let user = state.shared.auth_service.authenticate(&token).await?;

    tracing::Span::current().record("user_id", user.id.as_str());
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Decodes `Authorization: Basic base64(username:password)`.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /login
/// Credentials come from a JSON body or a Basic authorization header.
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LoginResult>, ApiError> {
    let (username, password) = if let Some(credentials) = basic_credentials(&headers) {
        credentials
    } else if body.is_empty() {
        return Err(ApiError::unauthorized());
    } else {
        let payload: LoginRequest = serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid login payload: {e}")))?;
        match (payload.username, payload.password) {
            (Some(username), Some(password)) => (username, password),
            _ => return Err(ApiError::unauthorized()),
        }
    };

    let result = state.shared.auth_service.login(&username, &password).await?;
    tracing::info!(user_id = %result.user.id, "User logged in");

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(
            bearer_token(&with_authorization("Bearer abc.def.ghi")).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(bearer_token(&with_authorization("Bearer ")), None);
        assert_eq!(bearer_token(&with_authorization("Basic Zm9vOmJhcg==")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_basic_credentials() {
        let encoded = STANDARD.encode("gomez:Tish:Tash1");
        let headers = with_authorization(&format!("Basic {encoded}"));
        assert_eq!(
            basic_credentials(&headers),
            Some(("gomez".to_string(), "Tish:Tash1".to_string()))
        );
        assert_eq!(basic_credentials(&with_authorization("Basic !!!")), None);
    }
}
