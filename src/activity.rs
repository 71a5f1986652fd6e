//! Host-side activity (game session) tracking
//!
//! The menu only *requests* activities. The embedding game owns the
//! [`ActivityManager`], starts what the menu asks for and tells the menu
//! whether there is something to resume.

use crate::menu::PendingGameConfig;
use chrono::{DateTime, Local};
use log::info;

/// Editors reachable from the editor screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Scene,
    Area,
    Assembly,
    Gib,
    Actor,
}

impl EditorKind {
    pub fn label(self) -> &'static str {
        match self {
            EditorKind::Scene => "Scene Editor",
            EditorKind::Area => "Area Editor",
            EditorKind::Assembly => "Assembly Editor",
            EditorKind::Gib => "Gib Editor",
            EditorKind::Actor => "Actor Editor",
        }
    }
}

/// What the menu asks the host to (re)start
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityRequest {
    Skirmish(PendingGameConfig),
    Tutorial,
    Editor(EditorKind),
    Campaign,
}

impl ActivityRequest {
    pub fn describe(&self) -> String {
        match self {
            ActivityRequest::Skirmish(config) => format!(
                "Skirmish on {} ({} players, {} teams, {} funds, {} {})",
                config.scene.as_deref().unwrap_or("no scene"),
                config.players,
                config.team_count(),
                config.starting_funds,
                config.difficulty.label(),
                config.difficulty.level()
            ),
            ActivityRequest::Tutorial => "Tutorial".to_string(),
            ActivityRequest::Editor(kind) => kind.label().to_string(),
            ActivityRequest::Campaign => "Campaign".to_string(),
        }
    }
}

/// Tracks the single running activity
#[derive(Debug, Default)]
pub struct ActivityManager {
    current: Option<ActivityRequest>,
    paused: bool,
    started_at: Option<DateTime<Local>>,
}

impl ActivityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `request`, replacing whatever was running
    pub fn start(&mut self, request: ActivityRequest) {
        info!("Starting activity: {}", request.describe());
        self.current = Some(request);
        self.paused = false;
        self.started_at = Some(Local::now());
    }

    pub fn pause(&mut self) {
        if self.current.is_some() {
            self.paused = true;
        }
    }

    /// Resumes a paused activity; false if there is nothing to resume
    pub fn resume(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.paused = false;
        true
    }

    pub fn end(&mut self) {
        if let Some(request) = self.current.take() {
            info!("Ended activity: {}", request.describe());
        }
        self.paused = false;
        self.started_at = None;
    }

    pub fn current(&self) -> Option<&ActivityRequest> {
        self.current.as_ref()
    }

    /// True when an activity exists, paused or not
    pub fn has_activity(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }
}
