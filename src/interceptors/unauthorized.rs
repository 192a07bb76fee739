//! Session invalidation on 401.

use async_trait::async_trait;

use super::{FailureStage, InterceptorContext};
use crate::error::HttpFailure;

/// On a 401 response, clear the session and force a reload.
///
/// Failures without a response and every other status pass through
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnauthorizedInterceptor;

#[async_trait]
impl FailureStage for UnauthorizedInterceptor {
    fn name(&self) -> &'static str {
        "unauthorized"
    }

    async fn handle(&self, failure: HttpFailure, ctx: &InterceptorContext) -> HttpFailure {
        if !failure.is_unauthorized() {
            return failure;
        }

        let report = ctx.session.clear().await;
        if !report.is_complete() {
            tracing::warn!(?report, "session cleanup after 401 was incomplete");
        }
        tracing::info!("Session rejected by server, reloading");
        ctx.session.page().reload();

        failure
    }
}
