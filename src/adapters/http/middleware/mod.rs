//! HTTP middleware for axum.
//!
//! - `identity` - resolves the caller from `X-User-Id`

pub mod identity;

pub use identity::{
    identity_middleware, IdentityRejection, IdentityState, RequireActor, USER_ID_HEADER,
};
