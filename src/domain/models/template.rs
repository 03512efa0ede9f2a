use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker replaced by the cluster identifier at expansion time.
pub const PLACEHOLDER: &str = "%s";

/// Template value asking the operator to type a template at run time.
pub const CUSTOM_SENTINEL: &str = "custom";

/// A command line pattern containing [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    /// Wrap raw template text. No validation happens here.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The sentinel template that is resolved by prompting the operator.
    pub fn custom() -> Self {
        Self::new(CUSTOM_SENTINEL)
    }

    /// Borrow the raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the [`CUSTOM_SENTINEL`] value.
    pub fn is_custom(&self) -> bool {
        self.0 == CUSTOM_SENTINEL
    }

    /// Byte offset of the first placeholder, if any.
    pub fn placeholder_offset(&self) -> Option<usize> {
        self.0.find(PLACEHOLDER)
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandTemplate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CommandTemplate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Tokenized, ready-to-run form of an expanded template.
///
/// Always holds at least two tokens: the program and one argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    /// Build from tokens; `None` unless there is a program and at least one
    /// argument.
    pub fn from_tokens(tokens: Vec<String>) -> Option<Self> {
        (tokens.len() >= 2).then_some(Self(tokens))
    }

    /// Executable name.
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    /// Arguments passed to [`Self::program`].
    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    /// All tokens, program first.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Number of tokens including the program.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no tokens; never true for a built vector.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
