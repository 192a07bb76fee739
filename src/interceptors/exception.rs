//! Classification of failures into user notifications.

use async_trait::async_trait;

use super::parse::{extract_structured_db_error_message, extract_textual_error_code};
use super::{FailureStage, InterceptorContext};
use crate::error::HttpFailure;

pub const KEY_NETWORK_ERROR: &str = "errors.networkError";
pub const KEY_HTTP_400: &str = "errors.http400";
pub const KEY_HTTP_422: &str = "errors.http422";
pub const KEY_HTTP_500: &str = "errors.http500";

/// Push a localized message for the failure, if it is one the portal
/// reports. First matching rule wins:
///
/// 1. unreachable server: embedded code or `errors.networkError`
/// 2. 400: embedded code or `errors.http400`
/// 3. 422 / 404: `ErrExec` messages or `errors.http422`
/// 4. 500: the body text or `errors.http500`
///
/// Anything else is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExceptionInterceptor;

impl ExceptionInterceptor {
    /// The message to show for a failure, `None` when it stays silent.
    pub fn message_for(failure: &HttpFailure, ctx: &InterceptorContext) -> Option<String> {
        let t = ctx.translator.as_ref();
        match failure {
            HttpFailure::Network { .. } if failure.is_network_unreachable() => Some(
                extract_textual_error_code(failure, t)
                    .unwrap_or_else(|| t.translate(KEY_NETWORK_ERROR)),
            ),
            HttpFailure::Network { .. } => None,
            HttpFailure::Http { status: 400, .. } => Some(
                extract_textual_error_code(failure, t).unwrap_or_else(|| t.translate(KEY_HTTP_400)),
            ),
            HttpFailure::Http {
                status: 422 | 404, ..
            } => Some(
                extract_structured_db_error_message(failure, t)
                    .unwrap_or_else(|| t.translate(KEY_HTTP_422)),
            ),
            HttpFailure::Http { status: 500, body } => {
                Some(body.as_text().unwrap_or_else(|| t.translate(KEY_HTTP_500)))
            }
            HttpFailure::Http { .. } => None,
        }
    }
}

#[async_trait]
impl FailureStage for ExceptionInterceptor {
    fn name(&self) -> &'static str {
        "exception"
    }

    async fn handle(&self, failure: HttpFailure, ctx: &InterceptorContext) -> HttpFailure {
        match Self::message_for(&failure, ctx) {
            Some(message) => ctx.notifier.push_error(&message),
            None => tracing::debug!(
                category = %failure.category(),
                "failure not reported to the user"
            ),
        }
        failure
    }
}
