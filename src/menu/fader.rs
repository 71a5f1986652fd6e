//! Menu fade in/out
//!
//! A four-phase linear cycle. Transitions are only ever started from outside
//! with [`Fader::set_enabled`]; [`Fader::update`] only finishes them.

/// Seconds a fade in or fade out takes
pub const FADE_DURATION: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Enabling,
    Enabled,
    Disabling,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Fader {
    state: VisibilityState,
    elapsed: f32,
    duration: f32,
}

impl Fader {
    /// Creates a fader that starts fully enabled
    pub fn new() -> Self {
        Self::with_duration(FADE_DURATION)
    }

    pub fn with_duration(duration: f32) -> Self {
        Fader {
            state: VisibilityState::Enabled,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Visible or becoming visible
    pub fn is_enabled(&self) -> bool {
        matches!(self.state, VisibilityState::Enabled | VisibilityState::Enabling)
    }

    /// Starts fading towards the requested state
    ///
    /// Requests for the direction already in progress (or reached) are ignored.
    pub fn set_enabled(&mut self, enable: bool) {
        if enable == self.is_enabled() {
            return;
        }
        self.state = if enable { VisibilityState::Enabling } else { VisibilityState::Disabling };
        self.elapsed = 0.0;
    }

    /// Advances the timer; returns the new state if a fade just finished
    pub fn update(&mut self, dt: f32) -> Option<VisibilityState> {
        let target = match self.state {
            VisibilityState::Enabling => VisibilityState::Enabled,
            VisibilityState::Disabling => VisibilityState::Disabled,
            VisibilityState::Enabled | VisibilityState::Disabled => return None,
        };

        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.state = target;
            self.elapsed = 0.0;
            return Some(target);
        }
        None
    }

    /// Draw opacity (0.0 to 1.0)
    pub fn opacity(&self) -> f32 {
        let progress = if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        match self.state {
            VisibilityState::Enabled => 1.0,
            VisibilityState::Disabled => 0.0,
            VisibilityState::Enabling => progress,
            VisibilityState::Disabling => 1.0 - progress,
        }
    }
}

impl Default for Fader {
    fn default() -> Self {
        Self::new()
    }
}
