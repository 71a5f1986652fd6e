//! What the menu hands back to the host each frame

use crate::activity::ActivityRequest;

/// Decision produced by [`MainMenu::update`](super::MainMenu::update)
///
/// At most one per frame; the host acts on it immediately.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MenuEvent {
    #[default]
    None,
    /// Open the host's scenario browser
    StartScenario,
    StartCampaign,
    /// Throw away any running activity and start this one
    RestartActivity(ActivityRequest),
    ResumeActivity,
    Quit,
}

impl MenuEvent {
    pub fn is_none(&self) -> bool {
        matches!(self, MenuEvent::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert!(MenuEvent::default().is_none());
        assert!(!MenuEvent::Quit.is_none());
    }
}
