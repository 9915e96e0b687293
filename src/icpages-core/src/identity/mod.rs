//! Credential resolution and the seams to the identity provider.
//!
//! The provider's delegation protocol and its interactive redirect are
//! consumed as black boxes; this module only defines the interfaces the
//! session layer calls and the resolver that awaits the stored credential.
use crate::error::identity::ResolveIdentityError;
use crate::error::session::AuthorizationError;
use async_trait::async_trait;
use ic_agent::Identity;
use std::sync::Arc;
use url::Url;

pub mod delegation;
pub mod session_store;

/// Parameters for one interactive authorization attempt.
pub struct LoginOptions {
    /// Where the provider's authorization flow is opened. Derived from the
    /// deployment target.
    pub identity_provider: Url,
}

/// The identity provider as the session layer sees it.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The identity currently held in the provider's session store. Yields
    /// the anonymous identity when no login has happened yet; fails only
    /// when the store cannot produce any identity object at all.
    async fn get_identity(&self) -> Result<Arc<dyn Identity>, ResolveIdentityError>;

    /// Drives the interactive authorization flow to completion, replacing
    /// the stored session on success.
    async fn login(&self, options: LoginOptions) -> Result<(), AuthorizationError>;

    /// Invalidates the stored session.
    async fn logout(&self);

    /// Whether the store currently holds a live authenticated session.
    async fn is_authenticated(&self) -> bool;
}

/// Awaits the provider's session store at startup.
pub struct IdentityResolver {
    provider: Arc<dyn AuthProvider>,
}

impl IdentityResolver {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Suspends until the provider's session store answers. The returned
    /// credential is not guaranteed to represent an authenticated user.
    pub async fn resolve(&self) -> Result<Arc<dyn Identity>, ResolveIdentityError> {
        self.provider.get_identity().await
    }
}
