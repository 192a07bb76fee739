//! Failure interceptors.
//!
//! Every failed request runs through an ordered [`InterceptorChain`]. Each
//! stage observes the failure, may produce a side effect (clear the
//! session, push a notification) and hands the same failure on. No stage
//! turns a failure into a success; the caller always gets the original
//! failure back.
//!
//! The unauthorized stage runs first: once a 401 has forced a reload,
//! nothing later in the chain can do anything useful for the user.

mod exception;
mod parse;
mod unauthorized;

pub use exception::ExceptionInterceptor;
pub use parse::{
    database_errors, extract_structured_db_error_message, extract_textual_error_code,
    parse_db_error, CodedError, UNKNOWN_CODE,
};
pub use unauthorized::UnauthorizedInterceptor;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::HttpFailure;
use crate::session::SessionContext;
use crate::traits::{NotificationSink, Translator};

/// Everything a stage may act on.
#[derive(Clone)]
pub struct InterceptorContext {
    pub session: SessionContext,
    pub notifier: Arc<dyn NotificationSink>,
    pub translator: Arc<dyn Translator>,
}

impl InterceptorContext {
    pub fn new(
        session: SessionContext,
        notifier: Arc<dyn NotificationSink>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            session,
            notifier,
            translator,
        }
    }
}

/// One step of the failure path.
#[async_trait]
pub trait FailureStage: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Observe the failure and return it unchanged.
    async fn handle(&self, failure: HttpFailure, ctx: &InterceptorContext) -> HttpFailure;
}

/// Ordered list of failure stages.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    stages: Vec<Arc<dyn FailureStage>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain for authenticated clients: unauthorized handling, then
    /// (optionally) user notifications.
    pub fn standard(use_exception_interceptor: bool) -> Self {
        let chain = Self::new().with_stage(UnauthorizedInterceptor);
        if use_exception_interceptor {
            chain.with_stage(ExceptionInterceptor)
        } else {
            chain
        }
    }

    pub fn with_stage<S: FailureStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order and return the failure the last one hands back.
    pub async fn run(&self, failure: HttpFailure, ctx: &InterceptorContext) -> HttpFailure {
        tracing::debug!(
            category = %failure.category(),
            status = ?failure.status(),
            "running failure interceptors"
        );
        let mut failure = failure;
        for stage in &self.stages {
            failure = stage.handle(failure, ctx).await;
        }
        failure
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MapTranslator, RecordingNotifier, ReloadCounter};
    use crate::adapters::InMemoryStorage;
    use crate::error::ErrorBody;
    use crate::session::SessionStore;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl FailureStage for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn handle(&self, failure: HttpFailure, _ctx: &InterceptorContext) -> HttpFailure {
            self.log.lock().unwrap().push(self.name);
            failure
        }
    }

    fn ctx() -> InterceptorContext {
        InterceptorContext::new(
            SessionContext::new(
                SessionStore::new(Arc::new(InMemoryStorage::new())),
                Arc::new(InMemoryStorage::new()),
                Arc::new(ReloadCounter::new()),
            ),
            Arc::new(RecordingNotifier::new()),
            Arc::new(MapTranslator::new()),
        )
    }

    #[test]
    fn test_standard_chain_order() {
        assert_eq!(
            InterceptorChain::standard(true).stage_names(),
            vec!["unauthorized", "exception"]
        );
        assert_eq!(
            InterceptorChain::standard(false).stage_names(),
            vec!["unauthorized"]
        );
    }

    #[tokio::test]
    async fn test_stages_run_in_order_and_pass_failure_through() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new()
            .with_stage(Recorder {
                name: "first",
                log: log.clone(),
            })
            .with_stage(Recorder {
                name: "second",
                log: log.clone(),
            });

        let failure = HttpFailure::Http {
            status: 418,
            body: ErrorBody::PlainText("teapot".into()),
        };
        let out = chain.run(failure.clone(), &ctx()).await;

        assert_eq!(out, failure);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let chain = InterceptorChain::new();
        assert!(chain.is_empty());
        let failure = HttpFailure::unauthorized();
        assert_eq!(chain.run(failure.clone(), &ctx()).await, failure);
    }
}
