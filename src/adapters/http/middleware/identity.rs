//! Caller identification.
//!
//! Sign-in is handled upstream; requests arrive with the caller's user id in
//! the `X-User-Id` header. The middleware resolves it through the
//! `UserRepository` and injects the `Actor` into request extensions:
//!
//! ```text
//! Request → identity_middleware → injects Actor into extensions
//!                                      ↓
//!                              Handler → RequireActor extractor reads it
//! ```
//!
//! A missing header passes through (the extractor then answers 401). A
//! malformed or unknown id is rejected immediately.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{Actor, UserId};
use crate::ports::UserRepository;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Middleware state.
pub type IdentityState = Arc<dyn UserRepository>;

pub async fn identity_middleware(
    State(users): State<IdentityState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(raw) = request.headers().get(USER_ID_HEADER) else {
        return next.run(request).await;
    };

    let user_id = match raw.to_str().ok().and_then(|s| s.trim().parse::<UserId>().ok()) {
        Some(id) => id,
        None => return IdentityRejection::Malformed.into_response(),
    };

    match users.find_by_id(&user_id).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user.as_actor());
            next.run(request).await
        }
        Ok(None) => IdentityRejection::UnknownUser.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve caller");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Failed to resolve caller")),
            )
                .into_response()
        }
    }
}

/// Extractor for handlers that need an identified caller.
#[derive(Debug, Clone, Copy)]
pub struct RequireActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for RequireActor
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .copied()
            .map(RequireActor)
            .ok_or(IdentityRejection::Missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRejection {
    Missing,
    Malformed,
    UnknownUser,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let message = match self {
            IdentityRejection::Missing => "Caller identification required",
            IdentityRejection::Malformed => "Malformed X-User-Id header",
            IdentityRejection::UnknownUser => "Unknown user",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthenticated(message)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::Role;
    use crate::domain::user::User;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(RequireActor(actor): RequireActor) -> String {
        actor.user_id.to_string()
    }

    async fn app() -> (Router, UserId) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::new(UserId::new(), "tech", "t@example.com", Role::Employee).unwrap();
        users.save(&user).await.unwrap();
        let state: IdentityState = users;
        let router = Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state, identity_middleware));
        (router, *user.id())
    }

    fn request(header: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn known_user_is_resolved() {
        let (app, id) = app().await;
        let response = app.oneshot(request(Some(&id.to_string()))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let (app, _) = app().await;
        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_user_is_401() {
        let (app, _) = app().await;
        let response = app
            .oneshot(request(Some(&UserId::new().to_string())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_is_401() {
        let (app, _) = app().await;
        let response = app.oneshot(request(Some("nobody"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
