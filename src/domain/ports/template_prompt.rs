//! Template prompt port - asks the operator for a custom command template.

use async_trait::async_trait;

use crate::domain::errors::PromptError;

/// Source of free-text templates for the `custom` command option.
#[async_trait]
pub trait TemplatePrompt: Send + Sync {
    /// Request one line of template text.
    ///
    /// Returns [`PromptError::Cancelled`] when the operator backs out.
    async fn request_template(&self) -> Result<String, PromptError>;
}
