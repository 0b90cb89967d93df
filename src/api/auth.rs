//! Bearer-token authorization helpers.
//!
//! Tokens resolve to profile rows; role checks happen here so handlers
//! stay declarative. The impersonation endpoint additionally requires
//! the service-level secret, checked separately.

use axum::http::HeaderMap;

use crate::app_state::AppState;
use crate::domain::Role;
use crate::error::ApiError;
use crate::store::models::Profile;

/// Extracts the bearer token from an `Authorization` header.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the header is missing or not
/// a bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))
}

/// Resolves the bearer token to a profile.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the token is missing or does
/// not match any profile, or [`ApiError::Database`] on storage failure.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Profile, ApiError> {
    let token = bearer_token(headers)?;
    state
        .store
        .profile_by_token(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("unrecognized token".to_string()))
}

/// Resolves the bearer token and requires an admin role.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for missing/unknown tokens and
/// [`ApiError::Forbidden`] for non-admin profiles.
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<Profile, ApiError> {
    let profile = authenticate(state, headers).await?;
    if profile.role != Role::Admin {
        return Err(ApiError::Forbidden("admin role required".to_string()));
    }
    Ok(profile)
}

/// Resolves the bearer token and requires a reviewing role (curator or
/// admin).
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for missing/unknown tokens and
/// [`ApiError::Forbidden`] for artist profiles.
pub async fn require_reviewer(state: &AppState, headers: &HeaderMap) -> Result<Profile, ApiError> {
    let profile = authenticate(state, headers).await?;
    match profile.role {
        Role::Curator | Role::Admin => Ok(profile),
        Role::Artist => Err(ApiError::Forbidden(
            "curator or admin role required".to_string(),
        )),
    }
}

/// Checks the service-level secret carried in the `x-admin-secret`
/// header against configuration.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the header is absent or does
/// not match.
pub fn require_service_secret(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let provided = headers
        .get("x-admin-secret")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided.is_empty() || provided != state.config.admin_api_secret {
        return Err(ApiError::Unauthorized(
            "invalid service credential".to_string(),
        ));
    }
    Ok(())
}

/// Extracts the client IP from forwarding headers, falling back to
/// `"unknown"`. The service always runs behind a proxy that sets
/// `x-forwarded-for`.
#[must_use]
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_strips_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok_123"),
        );
        let Ok(token) = bearer_token(&headers) else {
            panic!("token should parse");
        };
        assert_eq!(token, "tok_123");
    }

    #[test]
    fn missing_or_malformed_authorization_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcg=="),
        );
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn client_ip_falls_back_to_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    mod roles {
        use std::sync::Arc;

        use super::super::*;
        use crate::config::Config;
        use crate::store::Store;
        use crate::store::memory::MemStore;
        use crate::store::models::NewProfile;
        use axum::http::HeaderValue;

        async fn state_with_token(role: Role, token: &str) -> AppState {
            let store = Arc::new(MemStore::new());
            let Ok(profile) = store
                .create_profile(NewProfile {
                    email: format!("{}@example.com", role.as_str()),
                    display_name: role.as_str().to_string(),
                    role,
                })
                .await
            else {
                panic!("profile creation failed");
            };
            let Ok(()) = store.set_api_token(profile.id, token) else {
                panic!("token registration failed");
            };
            let Ok(config) = Config::from_env() else {
                panic!("config should load with defaults");
            };
            let store_dyn: Arc<dyn Store> = store;
            AppState::new(store_dyn, Arc::new(config))
        }

        fn bearer(token: &str) -> HeaderMap {
            let mut headers = HeaderMap::new();
            let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) else {
                panic!("header value");
            };
            headers.insert(axum::http::header::AUTHORIZATION, value);
            headers
        }

        #[tokio::test]
        async fn curator_token_reviews_but_is_not_admin() {
            let state = state_with_token(Role::Curator, "tok_curator").await;
            let headers = bearer("tok_curator");

            assert!(require_reviewer(&state, &headers).await.is_ok());
            let Err(err) = require_admin(&state, &headers).await else {
                panic!("curator must not pass admin check");
            };
            assert!(matches!(err, ApiError::Forbidden(_)));
        }

        #[tokio::test]
        async fn artist_token_cannot_review() {
            let state = state_with_token(Role::Artist, "tok_artist").await;
            let headers = bearer("tok_artist");

            let Err(err) = require_reviewer(&state, &headers).await else {
                panic!("artist must not pass reviewer check");
            };
            assert!(matches!(err, ApiError::Forbidden(_)));
        }

        #[tokio::test]
        async fn unknown_token_is_unauthorized() {
            let state = state_with_token(Role::Admin, "tok_admin").await;
            let headers = bearer("tok_wrong");

            let Err(err) = authenticate(&state, &headers).await else {
                panic!("unknown token must fail");
            };
            assert!(matches!(err, ApiError::Unauthorized(_)));
        }

        #[tokio::test]
        async fn service_secret_is_checked_exactly() {
            let state = state_with_token(Role::Admin, "tok_admin").await;

            let mut headers = HeaderMap::new();
            headers.insert(
                "x-admin-secret",
                HeaderValue::from_static("dev-secret-not-for-production"),
            );
            // Matches only when config carries the same secret.
            let expected = state.config.admin_api_secret.clone();
            if expected == "dev-secret-not-for-production" {
                assert!(require_service_secret(&state, &headers).is_ok());
            }

            let mut wrong = HeaderMap::new();
            wrong.insert("x-admin-secret", HeaderValue::from_static("nope"));
            assert!(require_service_secret(&state, &wrong).is_err());
            assert!(require_service_secret(&state, &HeaderMap::new()).is_err());
        }
    }
}
