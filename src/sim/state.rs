//! Match state and core types
//!
//! Everything the controller owns between turns lives here: the phase, the
//! score, both tiles, and the events handed to presentation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::power::Quality;
use super::resolve::Reaction;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// Tutorial overlay is showing, waiting for the start button
    Tutorial,
    /// Player's turn, power bar idle
    WaitingForInput,
    /// Power bar indicator is sweeping
    PoweringUp,
    /// Player's tile is in flight or settling
    PlayerThrowing,
    /// Opponent is winding up or throwing
    OpponentThrowing,
    /// Someone reached the win score
    GameOver,
}

impl MatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchState::Tutorial => "tutorial",
            MatchState::WaitingForInput => "waiting_for_input",
            MatchState::PoweringUp => "powering_up",
            MatchState::PlayerThrowing => "player_throwing",
            MatchState::OpponentThrowing => "opponent_throwing",
            MatchState::GameOver => "game_over",
        }
    }

    /// True while a throw is in flight (input is ignored)
    pub fn is_throwing(&self) -> bool {
        matches!(self, MatchState::PlayerThrowing | MatchState::OpponentThrowing)
    }
}

/// One side of the duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// The defender when `self` attacks
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    fn index(&self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u8,
    pub opponent: u8,
}

impl Score {
    pub fn new(player: u8, opponent: u8) -> Self {
        Self { player, opponent }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Add a point for `side`. Frozen once either side has won.
    pub fn award(&mut self, side: Side, win_score: u8) {
        if self.winner(win_score).is_some() {
            log::debug!("Score frozen at {:?}, ignoring point for {:?}", self, side);
            return;
        }
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        *slot = slot.saturating_add(1).min(win_score);
    }

    /// First side at or above the win score (player checked first)
    pub fn winner(&self, win_score: u8) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.opponent >= win_score {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A ddakji tile sitting in its side's lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub side: Side,
    /// Resting position in its lane
    pub rest: Vec3,
    /// False once shattered after losing a match
    pub active: bool,
}

impl Tile {
    pub fn new(side: Side) -> Self {
        let z = match side {
            Side::Player => LANE_OFFSET,
            Side::Opponent => -LANE_OFFSET,
        };
        Self {
            side,
            rest: Vec3::new(0.0, TILE_Y_REST, z),
            active: true,
        }
    }

    pub fn shatter(&mut self) {
        self.active = false;
    }

    /// Back in the lane, whole again
    pub fn restore(&mut self) {
        *self = Self::new(self.side);
    }
}

/// Both tiles, indexed by side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tiles([Tile; 2]);

impl Default for Tiles {
    fn default() -> Self {
        Self([Tile::new(Side::Player), Tile::new(Side::Opponent)])
    }
}

impl Tiles {
    pub fn get(&self, side: Side) -> &Tile {
        &self.0[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Tile {
        &mut self.0[side.index()]
    }

    pub fn restore_all(&mut self) {
        for tile in &mut self.0 {
            tile.restore();
        }
    }
}

/// Events emitted for presentation (drained once per frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// Phase transition
    StateChanged { from: MatchState, to: MatchState },
    /// Tutorial overlay closed, ambient presentation may begin
    TutorialDismissed,
    /// Power bar sweep started
    PowerBarStarted,
    /// A throw left the attacker's lane
    ThrowStarted {
        attacker: Side,
        defender: Side,
        strength: f32,
        /// Player throws only
        quality: Option<Quality>,
        /// Seconds until impact
        impact_in: f32,
        /// Super throws play in slow motion just before impact
        slow_motion: bool,
    },
    /// Impact resolved
    ThrowResolved {
        attacker: Side,
        defender: Side,
        success: bool,
        quality: Option<Quality>,
        reaction: Reaction,
        reaction_intensity: f32,
        score: Score,
        /// This point reached the win score; `GameOver` follows after the pause
        decides_match: bool,
    },
    /// Back to the player's turn
    TurnReady,
    /// Match decided
    GameOver { winner: Side, score: Score },
    /// Score cleared, tiles restored
    MatchReset,
}
