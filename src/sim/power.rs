//! Power bar timing minigame
//!
//! The indicator sweeps linearly 0% → 100% → 0% forever. Stopping it grades the
//! distance from the bar's center into a [`Quality`] tier and a strength.

use serde::{Deserialize, Serialize};

use crate::consts::{POWER_BAR_HALF_WIDTH, POWER_SWEEP_SECS};

/// Timing accuracy tier, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Super,
    Great,
    Good,
    Poor,
}

impl Quality {
    /// Action text shown over the scene
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Super => "Super Slam!",
            Quality::Great => "Great!",
            Quality::Good => "Good",
            Quality::Poor => "Poor",
        }
    }

    /// CSS class for the indicator's hit feedback
    pub fn feedback_class(&self) -> &'static str {
        match self {
            Quality::Super => "hit-super",
            Quality::Great => "hit-great",
            Quality::Good => "hit-good",
            Quality::Poor => "hit-poor",
        }
    }
}

/// One row of the grading table: distances up to `max_distance` earn `quality`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityLevel {
    pub quality: Quality,
    /// Distance from center, in percent of the bar
    pub max_distance: f32,
}

/// Grading table, checked in order. Poor covers the whole half-bar.
pub const QUALITY_LEVELS: [QualityLevel; 4] = [
    QualityLevel { quality: Quality::Super, max_distance: 1.0 },
    QualityLevel { quality: Quality::Great, max_distance: 4.0 },
    QualityLevel { quality: Quality::Good, max_distance: 20.0 },
    QualityLevel { quality: Quality::Poor, max_distance: POWER_BAR_HALF_WIDTH },
];

/// Result of stopping the bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowOutcome {
    pub quality: Quality,
    /// Probability that the throw flips the defender
    pub strength: f32,
}

/// Grade an indicator position (percent, 0-100)
pub fn evaluate(percent: f32, levels: &[QualityLevel]) -> ThrowOutcome {
    let distance = (percent - 50.0).abs();

    let quality = levels
        .iter()
        .find(|level| distance <= level.max_distance)
        .or(levels.last())
        .map(|level| level.quality)
        .unwrap_or(Quality::Poor);

    // Dead-center hits are never penalized by the falloff
    let strength = if quality == Quality::Super {
        1.0
    } else {
        (1.0 - distance / POWER_BAR_HALF_WIDTH).max(0.0)
    };

    ThrowOutcome { quality, strength }
}

/// Ping-pong oscillator driven by frame delta time
#[derive(Debug, Clone)]
pub struct PowerTiming {
    /// One-way sweep duration
    sweep_secs: f32,
    /// Time into the current 0 → 100 → 0 cycle
    elapsed: f32,
    running: bool,
    levels: Vec<QualityLevel>,
    last: Option<ThrowOutcome>,
}

impl Default for PowerTiming {
    fn default() -> Self {
        Self::new(POWER_SWEEP_SECS, QUALITY_LEVELS.to_vec())
    }
}

impl PowerTiming {
    pub fn new(sweep_secs: f32, levels: Vec<QualityLevel>) -> Self {
        Self {
            sweep_secs,
            elapsed: 0.0,
            running: false,
            levels,
            last: None,
        }
    }

    /// Reset to 0% and begin sweeping
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
        self.last = None;
    }

    /// Move the indicator (no-op while stopped)
    pub fn advance(&mut self, dt: f32) {
        if self.running {
            self.elapsed = (self.elapsed + dt).rem_euclid(self.sweep_secs * 2.0);
        }
    }

    /// Indicator position in percent
    pub fn percent(&self) -> f32 {
        let phase = self.elapsed / self.sweep_secs;
        let t = if phase <= 1.0 { phase } else { 2.0 - phase };
        (t * 100.0).clamp(0.0, 100.0)
    }

    /// Freeze the indicator and grade it.
    ///
    /// # Panics
    ///
    /// Panics if the sweep is not running.
    pub fn stop(&mut self) -> ThrowOutcome {
        assert!(self.running, "PowerTiming::stop called without a running sweep");
        self.running = false;

        let outcome = evaluate(self.percent(), &self.levels);
        self.last = Some(outcome);
        outcome
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Grade of the last stop, cleared by `start`
    pub fn last_outcome(&self) -> Option<ThrowOutcome> {
        self.last
    }

    /// Halt without grading (match reset)
    pub fn cancel(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
        self.last = None;
    }
}
