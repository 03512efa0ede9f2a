//! Validation of command templates before a run.

use crate::domain::errors::TemplateError;
use crate::domain::models::CommandTemplate;

/// Check that every template is runnable, stopping at the first bad one.
///
/// A template must contain the placeholder, and the placeholder must not sit
/// at offset 0 where it would become the program name. Only the first
/// occurrence is inspected.
pub fn validate(templates: &[CommandTemplate]) -> Result<(), TemplateError> {
    templates.iter().try_for_each(validate_one)
}

/// Validate a single template.
pub fn validate_one(template: &CommandTemplate) -> Result<(), TemplateError> {
    match template.placeholder_offset() {
        None => Err(TemplateError::MissingPlaceholder {
            template: template.as_str().to_string(),
        }),
        Some(0) => Err(TemplateError::PlaceholderFirst {
            template: template.as_str().to_string(),
        }),
        Some(_) => Ok(()),
    }
}
