//! Service layer: the command execution engine.

pub mod command_expander;
pub mod execution_coordinator;
pub mod template_validator;

pub use command_expander::expand;
pub use execution_coordinator::{ExecutionCoordinator, PreparedTemplates};
pub use template_validator::validate;
