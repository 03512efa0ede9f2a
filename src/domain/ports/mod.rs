//! Port trait definitions (Hexagonal Architecture)
//!
//! The execution engine talks to the outside world through these traits:
//! - ProcessRunner: spawning commands and capturing their output
//! - TemplatePrompt: asking the operator for a custom template
//!
//! Adapters in `crate::adapters` implement them for the real terminal and OS,
//! and as recording doubles for tests.

pub mod process_runner;
pub mod template_prompt;

pub use process_runner::ProcessRunner;
pub use template_prompt::TemplatePrompt;
