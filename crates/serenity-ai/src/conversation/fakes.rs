//! Scripted in-memory backend for manager tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::backend::{ChatSession, FragmentStream, ModelBackend, SessionOptions};
use crate::BackendError;

/// One scripted backend response, consumed per send.
pub(super) enum Step {
    Reply(String),
    Fail(BackendError),
    Fragments(Vec<Result<String, BackendError>>),
    /// Reply only after `release` is notified.
    Held { release: Arc<Notify>, reply: String },
}

pub(super) fn reply(text: &str) -> Step {
    Step::Reply(text.to_string())
}

pub(super) fn fragments(parts: &[&str]) -> Step {
    Step::Fragments(parts.iter().map(|p| Ok(p.to_string())).collect())
}

#[derive(Default)]
struct Script {
    steps: Mutex<VecDeque<Step>>,
    received: Mutex<Vec<String>>,
    options: Mutex<Vec<SessionOptions>>,
    sessions_created: AtomicUsize,
    session_failures: AtomicUsize,
}

impl Script {
    fn next_step(&self, text: &str) -> Option<Step> {
        self.received.lock().unwrap().push(text.to_string());
        self.steps.lock().unwrap().pop_front()
    }
}

pub(super) struct ScriptedBackend {
    script: Arc<Script>,
}

impl ScriptedBackend {
    pub(super) fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self::with_session_failures(steps, 0))
    }

    /// The first `failures` session creations fail with a network error.
    pub(super) fn with_session_failures(steps: Vec<Step>, failures: usize) -> Self {
        let script = Script {
            steps: Mutex::new(steps.into()),
            session_failures: AtomicUsize::new(failures),
            ..Script::default()
        };
        Self {
            script: Arc::new(script),
        }
    }

    /// Every text sent to the backend, in order.
    pub(super) fn received(&self) -> Vec<String> {
        self.script.received.lock().unwrap().clone()
    }

    pub(super) fn sessions_created(&self) -> usize {
        self.script.sessions_created.load(Ordering::SeqCst)
    }

    pub(super) fn session_options(&self) -> Vec<SessionOptions> {
        self.script.options.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn create_session(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn ChatSession>, BackendError> {
        let failures = &self.script.session_failures;
        if failures.load(Ordering::SeqCst) > 0 {
            failures.fetch_sub(1, Ordering::SeqCst);
            return Err(BackendError::Network("session refused".into()));
        }
        self.script.sessions_created.fetch_add(1, Ordering::SeqCst);
        self.script.options.lock().unwrap().push(options.clone());
        Ok(Box::new(ScriptedChat {
            script: Arc::clone(&self.script),
        }))
    }
}

struct ScriptedChat {
    script: Arc<Script>,
}

#[async_trait]
impl ChatSession for ScriptedChat {
    async fn send(&mut self, text: &str) -> Result<String, BackendError> {
        match self.script.next_step(text) {
            Some(Step::Reply(reply)) => Ok(reply),
            Some(Step::Fail(e)) => Err(e),
            Some(Step::Held { release, reply }) => {
                release.notified().await;
                Ok(reply)
            }
            Some(Step::Fragments(_)) => Err(BackendError::Api("streaming step in whole mode".into())),
            None => Err(BackendError::Api("script exhausted".into())),
        }
    }

    async fn send_streaming<'a>(
        &'a mut self,
        text: &str,
    ) -> Result<FragmentStream<'a>, BackendError> {
        match self.script.next_step(text) {
            Some(Step::Fragments(items)) => Ok(Box::pin(futures_util::stream::iter(items))),
            Some(Step::Reply(reply)) => Ok(Box::pin(futures_util::stream::iter([Ok(reply)]))),
            Some(Step::Fail(e)) => Err(e),
            Some(Step::Held { release, reply }) => Ok(Box::pin(futures_util::stream::once(
                async move {
                    release.notified().await;
                    Ok(reply)
                },
            ))),
            None => Err(BackendError::Api("script exhausted".into())),
        }
    }
}
