//! Backend API contracts and implementations.
//!
//! This module defines the [`MailApi`] trait the rest of the client codes
//! against, the [`HttpMailApi`] implementation over the trackmail backend,
//! and the [`Session`] context the authenticated request channel reads its
//! bearer token from.

mod http;
mod session;
mod traits;

pub use http::HttpMailApi;
pub use session::{AuthError, AuthenticatedUser, IdentityProvider, Session, SignUpOutcome};
pub use traits::{ApiError, ConnectTarget, EmailQuery, MailApi, Result, SyncOutcome};
