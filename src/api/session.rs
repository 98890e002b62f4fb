//! Session context and identity collaborator contract.
//!
//! Who is signed in is held in an explicit [`Session`] passed to the
//! components that need it, with an establish-on-sign-in and
//! clear-on-sign-out lifecycle. The identity provider itself is external;
//! the client treats it as opaque pass/fail plus a human-readable message.

use std::sync::RwLock;

use async_trait::async_trait;

/// Errors surfaced by the identity collaborator.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    /// Human-readable provider message, shown verbatim.
    pub message: String,
}

impl AuthError {
    /// Wraps a provider error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A signed-in user together with the access token the backend expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identity-provider user id.
    pub user_id: String,
    /// The user's email address.
    pub email: String,
    /// Bearer token attached to every backend request.
    pub access_token: String,
}

/// Outcome of a sign-up attempt.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The account is active and signed in.
    SignedIn(AuthenticatedUser),
    /// The provider sent a confirmation email; no session yet.
    ConfirmationPending,
}

/// External identity provider contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs an existing user in.
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<AuthenticatedUser, AuthError>;

    /// Registers a new user, redirecting to `redirect_url` after email
    /// confirmation.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_url: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    /// Signs the current user out provider-side.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Process-lifetime session state.
///
/// Established once at app start (after sign-in) and torn down on
/// sign-out. Interior mutability lets the HTTP client share it while the
/// auth flow replaces its contents.
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<AuthenticatedUser>>,
}

impl Session {
    /// Creates an empty, signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Establishes the session for a signed-in user.
    pub fn establish(&self, user: AuthenticatedUser) {
        *self.user.write().unwrap() = Some(user);
    }

    /// Clears the session on sign-out.
    pub fn clear(&self) {
        *self.user.write().unwrap() = None;
    }

    /// Returns true if a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.read().unwrap().is_some()
    }

    /// Returns the current access token, if signed in.
    pub fn access_token(&self) -> Option<String> {
        self.user
            .read()
            .unwrap()
            .as_ref()
            .map(|u| u.access_token.clone())
    }

    /// Returns the signed-in user's email, if any.
    pub fn user_email(&self) -> Option<String> {
        self.user
            .read()
            .unwrap()
            .as_ref()
            .map(|u| u.email.clone())
    }
}
