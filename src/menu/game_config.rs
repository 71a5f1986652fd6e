//! Pending game configuration
//!
//! The skirmish choices the player has made but not yet handed to the game.
//! All rules about what combinations are valid live here, so the screens only
//! forward clicks and read the result back.

use crate::settings::{Resolution, MAX_PLAYERS};
use std::collections::BTreeSet;

/// Highest starting funds the difficulty screen offers
pub const MAX_STARTING_FUNDS: i32 = 10_000;

/// Step between funds choices
pub const FUNDS_STEP: i32 = 500;

pub const DEFAULT_STARTING_FUNDS: i32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Team {
    One,
    Two,
    Three,
    Four,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::One, Team::Two, Team::Three, Team::Four];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next team in order (wraps)
    pub fn next(self) -> Team {
        Team::ALL[(self.index() + 1) % Team::ALL.len()]
    }

    pub fn label(self) -> String {
        format!("Team {}", self.index() + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Cake,
    Easy,
    Medium,
    Hard,
    Nuts,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Cake,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Nuts,
    ];

    /// Numeric level the game's AI tuning expects
    pub fn level(self) -> i32 {
        match self {
            Difficulty::Cake => 20,
            Difficulty::Easy => 40,
            Difficulty::Medium => 60,
            Difficulty::Hard => 80,
            Difficulty::Nuts => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Cake => "Cake",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Nuts => "Nuts!",
        }
    }
}

/// Accumulated skirmish choices
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGameConfig {
    /// Number of human players, 1 to 4
    pub players: usize,
    /// Team of each player slot; only the first `players` entries matter
    pub team_assignments: [Team; MAX_PLAYERS],
    /// Team the AI controls, never one a human is on
    pub cpu_team: Option<Team>,
    pub starting_funds: i32,
    pub difficulty: Difficulty,
    pub scene: Option<String>,
    pub resolution: Resolution,
}

impl Default for PendingGameConfig {
    fn default() -> Self {
        PendingGameConfig {
            players: 1,
            team_assignments: [Team::One; MAX_PLAYERS],
            cpu_team: Some(Team::Two),
            starting_funds: DEFAULT_STARTING_FUNDS,
            difficulty: Difficulty::Medium,
            scene: None,
            resolution: Resolution::new(1280, 720),
        }
    }
}

impl PendingGameConfig {
    /// Teams with at least one active human player
    pub fn human_teams(&self) -> BTreeSet<Team> {
        self.team_assignments[..self.players].iter().copied().collect()
    }

    /// Distinct teams in the game, CPU team included
    pub fn team_count(&self) -> usize {
        self.human_teams().len() + usize::from(self.cpu_team.is_some())
    }

    /// A game needs a scene and at least two sides
    pub fn can_start(&self) -> bool {
        self.scene.is_some() && self.team_count() >= 2
    }

    pub fn set_players(&mut self, players: usize) {
        self.players = players.clamp(1, MAX_PLAYERS);
        self.resolve_cpu_conflict();
    }

    /// Moves a player to the next team
    pub fn cycle_team(&mut self, player: usize) {
        if player >= self.players {
            return;
        }
        self.team_assignments[player] = self.team_assignments[player].next();
        self.resolve_cpu_conflict();
    }

    /// Cycles the CPU team through None and every team no human is on
    pub fn cycle_cpu_team(&mut self) {
        let humans = self.human_teams();
        let free: Vec<Team> = Team::ALL.iter().copied().filter(|t| !humans.contains(t)).collect();
        self.cpu_team = match self.cpu_team {
            None => free.first().copied(),
            Some(current) => free.iter().copied().find(|&t| t > current),
        };
    }

    pub fn set_starting_funds(&mut self, funds: i32) {
        self.starting_funds = funds.clamp(0, MAX_STARTING_FUNDS);
    }

    /// Keeps the CPU off human teams by moving it to the first free team
    fn resolve_cpu_conflict(&mut self) {
        let humans = self.human_teams();
        if let Some(cpu) = self.cpu_team {
            if humans.contains(&cpu) {
                self.cpu_team = Team::ALL.iter().copied().find(|t| !humans.contains(t));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PendingGameConfig::default();
        assert_eq!(config.players, 1);
        assert_eq!(config.team_count(), 2);
        assert_eq!(config.difficulty.level(), 60);
        assert!(!config.can_start()); // no scene yet
    }

    #[test]
    fn test_players_clamped() {
        let mut config = PendingGameConfig::default();
        config.set_players(0);
        assert_eq!(config.players, 1);
        config.set_players(9);
        assert_eq!(config.players, MAX_PLAYERS);
    }

    #[test]
    fn test_cycle_team_moves_cpu_off_humans() {
        let mut config = PendingGameConfig::default();
        config.set_players(2);
        // Player 2 joins team two, which the CPU held
        config.cycle_team(1);
        assert_eq!(config.team_assignments[1], Team::Two);
        assert_eq!(config.cpu_team, Some(Team::Three));
        assert_eq!(config.team_count(), 3);
    }

    #[test]
    fn test_cycle_team_ignores_inactive_players() {
        let mut config = PendingGameConfig::default();
        config.cycle_team(3);
        assert_eq!(config.team_assignments[3], Team::One);
    }

    #[test]
    fn test_cycle_cpu_team_skips_human_teams() {
        let mut config = PendingGameConfig::default();
        config.cpu_team = None;
        config.cycle_cpu_team();
        assert_eq!(config.cpu_team, Some(Team::Two));
        config.cycle_cpu_team();
        assert_eq!(config.cpu_team, Some(Team::Three));
        config.cycle_cpu_team();
        assert_eq!(config.cpu_team, Some(Team::Four));
        config.cycle_cpu_team();
        assert_eq!(config.cpu_team, None);
    }

    #[test]
    fn test_single_team_cannot_start() {
        let mut config = PendingGameConfig {
            scene: Some("Grasslands".to_string()),
            cpu_team: None,
            ..Default::default()
        };
        config.set_players(2);
        assert_eq!(config.team_count(), 1);
        assert!(!config.can_start());
        config.cycle_cpu_team();
        assert!(config.can_start());
    }

    #[test]
    fn test_funds_clamped() {
        let mut config = PendingGameConfig::default();
        config.set_starting_funds(-10);
        assert_eq!(config.starting_funds, 0);
        config.set_starting_funds(50_000);
        assert_eq!(config.starting_funds, MAX_STARTING_FUNDS);
    }
}
