use std::fmt;

/// Errors raised while building or querying controls
#[derive(Debug, Clone, PartialEq)]
pub enum GuiError {
    /// A control with this name already exists
    DuplicateName(String),

    /// No control with this name exists
    UnknownControl(String),

    /// The control exists but is a different kind of widget
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for GuiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GuiError::DuplicateName(name) => write!(f, "Control '{}' already exists", name),
            GuiError::UnknownControl(name) => write!(f, "Unknown control '{}'", name),
            GuiError::WrongKind { name, expected, found } => {
                write!(f, "Control '{}' is a {}, expected a {}", name, found, expected)
            }
        }
    }
}

impl std::error::Error for GuiError {}
