//! Flashing warnings
//!
//! When the player tries something the current setup doesn't allow, the
//! relevant label alternates between its normal text and a short warning for
//! a couple of seconds.

/// Seconds a warning keeps flashing
pub const BLINK_DURATION: f32 = 2.0;

/// Seconds per on or off phase
pub const BLINK_PHASE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkNotice {
    /// Start pressed with no starting funds
    NoFunds,
    /// Next pressed on the skirmish screen with no scene to play
    NoScene,
}

impl BlinkNotice {
    pub fn text(self) -> &'static str {
        match self {
            BlinkNotice::NoFunds => "NO STARTING FUNDS!",
            BlinkNotice::NoScene => "NO SCENE SELECTED!",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Blinker {
    active: Option<BlinkNotice>,
    elapsed: f32,
}

impl Blinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) flashing `notice`
    pub fn start(&mut self, notice: BlinkNotice) {
        self.active = Some(notice);
        self.elapsed = 0.0;
    }

    pub fn stop(&mut self) {
        self.active = None;
        self.elapsed = 0.0;
    }

    pub fn notice(&self) -> Option<BlinkNotice> {
        self.active
    }

    /// The warning if it is in its lit phase
    pub fn lit(&self) -> Option<BlinkNotice> {
        let phase = (self.elapsed / BLINK_PHASE) as u32;
        self.active.filter(|_| phase % 2 == 0)
    }

    /// Advances the timer; true when the displayed text needs redrawing
    pub fn update(&mut self, dt: f32) -> bool {
        if self.active.is_none() {
            return false;
        }
        let before = self.lit();
        self.elapsed += dt.max(0.0);
        if self.elapsed >= BLINK_DURATION {
            self.stop();
            return true;
        }
        before != self.lit()
    }
}
