//! Template prompt adapters.

pub mod console_prompt;
pub mod scripted;

pub use console_prompt::ConsolePrompt;
pub use scripted::ScriptedPrompt;
