//! Prompt that answers from a fixed script, for tests and non-interactive use.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::PromptError;
use crate::domain::ports::TemplatePrompt;

/// Returns queued answers in order, then reports cancellation.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<usize>>,
}

impl ScriptedPrompt {
    /// Prompt that answers with `answers`, one per request.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().map(Into::into).collect())),
            requests: Arc::new(Mutex::new(0)),
        }
    }

    /// Prompt that cancels every request.
    pub fn empty() -> Self {
        Self::default()
    }

    /// How many times a template was requested.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map_or(0, |count| *count)
    }
}

#[async_trait]
impl TemplatePrompt for ScriptedPrompt {
    async fn request_template(&self) -> Result<String, PromptError> {
        if let Ok(mut count) = self.requests.lock() {
            *count += 1;
        }
        let next = self
            .answers
            .lock()
            .map_err(|e| PromptError::Cancelled(e.to_string()))?
            .pop_front();
        next.ok_or_else(|| PromptError::Cancelled("user aborted".to_string()))
    }
}
