//! Match simulation module
//!
//! All gameplay logic lives here. No rendering, audio, or platform calls:
//! - Time only advances through `MatchController::update`
//! - Randomness only through `RandomSource`
//! - Presentation reads `MatchEvent`s and never feeds back into the rules

pub mod controller;
pub mod power;
pub mod resolve;
pub mod rng;
pub mod schedule;
pub mod state;
pub mod text;

pub use controller::{MatchController, Task};
pub use power::{PowerTiming, QUALITY_LEVELS, Quality, QualityLevel, ThrowOutcome, evaluate};
pub use resolve::{Reaction, Resolution, TurnResolver};
pub use rng::{PcgSource, RandomSource, SequenceSource};
pub use schedule::{Scheduler, TimerId};
pub use state::{MatchEvent, MatchState, Score, Side, Tile, Tiles};
pub use text::InputDevice;
