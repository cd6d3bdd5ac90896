//! Ddakji - a tile-flipping duel against the computer
//!
//! Core modules:
//! - `sim`: Match logic (power bar, throw resolution, turn state machine)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Sound cues for match events (Web Audio playback on wasm)
//! - `web`: wasm-bindgen bridge for the host page

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Host frame step used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed to the match in one update
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Points needed to win a match
    pub const WIN_SCORE: u8 = 5;

    /// One-way sweep time of the power bar indicator
    pub const POWER_SWEEP_SECS: f32 = 1.2;
    /// Half-width of the power bar in percent (center is 50%)
    pub const POWER_BAR_HALF_WIDTH: f32 = 50.0;

    /// Opponent strength range (uniform)
    pub const OPPONENT_STRENGTH_MIN: f32 = 0.6;
    pub const OPPONENT_STRENGTH_MAX: f32 = 1.0;

    /// Delay between entering the opponent turn and the opponent's throw
    pub const OPPONENT_DELAY_SECS: f32 = 1.0;
    /// Delay between impact and setting up the next turn
    pub const NEXT_TURN_DELAY_SECS: f32 = 2.0;
    /// Attacker reaction intensity above which the attacker tumbles fully
    pub const REACTION_FULL_THRESHOLD: f32 = 0.5;
    /// Score jingle lags the impact slightly
    pub const SCORE_SOUND_DELAY_SECS: f32 = 0.3;

    /// Throw choreography: lift-rotate-lower before the throw
    pub const THROW_SETUP_SECS: f32 = 0.5;
    /// Throw choreography: wind-up
    pub const THROW_ANTICIPATION_SECS: f32 = 0.3;
    /// Throw choreography: final slam onto the defender
    pub const THROW_SLAM_SECS: f32 = 0.1;
    /// Spin time of a zero-strength throw (the rise overlaps it)
    pub const THROW_BASE_FLIGHT_SECS: f32 = 0.8;
    /// Spin time shaved off per unit of player strength
    pub const THROW_STRENGTH_SPEEDUP_SECS: f32 = 0.4;
    /// The dive onto the defender follows the spin, as a fraction of it
    pub const THROW_DIVE_FRACTION: f32 = 0.7;
    /// Slow motion kicks in this long before the dive ends, and lasts through the slam
    pub const SLOW_MOTION_LEAD_SECS: f32 = 0.2;
    /// Playback rate while slowed
    pub const SLOW_MOTION_SCALE: f32 = 0.25;

    /// Tile geometry
    pub const TILE_WIDTH: f32 = 1.5;
    pub const TILE_HEIGHT: f32 = 0.1;
    /// Height of a tile's center when resting on the floor
    pub const TILE_Y_REST: f32 = 0.05;
    /// Distance of each lane from the center line
    pub const LANE_OFFSET: f32 = 4.0;
}

/// Clamp a value to the unit interval
#[inline]
pub fn unit_clamp(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
