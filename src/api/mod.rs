//! HTTP clients for the portal backends.
//!
//! [`ClientFactory`] builds an [`ApiClient`] per call, bound to one
//! [`Audience`]: the general credential API (static API key) or the auth
//! server (bearer token from the session store). Failed requests run through
//! the interceptor chain before the caller sees them.
//!
//! The services in [`auth_service`] and [`credential_service`] are thin
//! typed wrappers over those clients.

pub mod auth_service;
mod client;
pub mod credential_service;

pub use auth_service::{AuthService, SessionInfo, TokenRequest, TokenResponse};
pub use client::{ApiClient, Audience, ClientFactory, ClientOptions};
pub use credential_service::{
    Credential, CredentialService, DiplomaMetadata, HashVerification, SignatureVerification,
    VerificationResult,
};
