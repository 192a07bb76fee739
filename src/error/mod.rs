//! Error types for the portal client.
//!
//! - [`HttpFailure`]: what a failed request turns into at the client boundary,
//!   and what every interceptor receives and passes on
//! - [`ErrorBody`] / [`BackendError`]: the classified failure body
//! - [`ErrorCategory`]: coarse grouping used for logging
//! - [`PortalError`] / [`PortalResult`]: what the services return
//!
//! # Error Categories
//!
//! | Category | Source | User-visible effect |
//! |----------|--------|---------------------|
//! | Network | no response | generic network message |
//! | Auth | 401 | session cleared, reload |
//! | Client | 400, 404, 422 | backend message or generic |
//! | Server | 500 | body text or generic |
//! | Unclassified | anything else | none |

mod body;
mod category;
mod failure;
mod portal_error;

pub use body::{BackendError, ErrorBody, ERR_EXEC};
pub use category::ErrorCategory;
pub use failure::{HttpFailure, TransportCode};
pub use portal_error::{PortalError, PortalResult};
