use crate::gui::GuiError;
use crate::settings::SettingsError;
use std::fmt;

/// Errors raised while creating or running the menu
#[derive(Debug)]
pub enum MenuError {
    /// A control the menu needs is missing or of the wrong kind
    MissingControl(GuiError),

    /// The layout could not be built
    Gui(GuiError),

    Settings(SettingsError),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MenuError::MissingControl(e) => write!(f, "Menu control missing: {}", e),
            MenuError::Gui(e) => write!(f, "GUI error: {}", e),
            MenuError::Settings(e) => write!(f, "Settings error: {}", e),
        }
    }
}

impl std::error::Error for MenuError {}

impl From<GuiError> for MenuError {
    fn from(err: GuiError) -> Self {
        MenuError::Gui(err)
    }
}

impl From<SettingsError> for MenuError {
    fn from(err: SettingsError) -> Self {
        MenuError::Settings(err)
    }
}
