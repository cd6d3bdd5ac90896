//! Data-driven game balance
//!
//! Defaults mirror `consts`; a host page may ship a JSON override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::power::{QUALITY_LEVELS, QualityLevel};
use crate::sim::state::Side;

/// Errors from loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// Not valid tuning JSON
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// Nobody could ever win
    #[error("Win score must be at least 1")]
    InvalidWinScore,

    /// Opponent strength outside the unit interval or inverted
    #[error("Opponent strength range [{min}, {max}] must satisfy 0 <= min <= max <= 1")]
    InvalidStrengthRange { min: f32, max: f32 },

    /// Quality table empty, unsorted, or short of the bar edge
    #[error("Quality thresholds must be non-empty, strictly increasing and reach the bar edge")]
    UnorderedThresholds,

    /// Negative, non-finite, or zero sweep time
    #[error("Timing value `{0}` is out of range")]
    InvalidTiming(&'static str),
}

/// Uniform strength range for the computer's throws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthRange {
    pub min: f32,
    pub max: f32,
}

impl StrengthRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Fixed strength (min == max)
    pub fn fixed(strength: f32) -> Self {
        Self::new(strength, strength)
    }
}

impl Default for StrengthRange {
    fn default() -> Self {
        Self::new(OPPONENT_STRENGTH_MIN, OPPONENT_STRENGTH_MAX)
    }
}

/// Match balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Points needed to win
    pub win_score: u8,
    /// Power bar grading table, best first
    pub quality_levels: Vec<QualityLevel>,
    /// One-way sweep time of the power bar
    pub sweep_secs: f32,
    pub opponent_strength: StrengthRange,
    /// Opponent wind-up before throwing
    pub opponent_delay_secs: f32,
    /// Impact to next-turn setup
    pub next_turn_delay_secs: f32,
    /// Reaction intensity above which the attacker tumbles
    pub reaction_full_threshold: f32,
    /// Score jingle lag after a landed throw
    pub score_sound_delay_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            win_score: WIN_SCORE,
            quality_levels: QUALITY_LEVELS.to_vec(),
            sweep_secs: POWER_SWEEP_SECS,
            opponent_strength: StrengthRange::default(),
            opponent_delay_secs: OPPONENT_DELAY_SECS,
            next_turn_delay_secs: NEXT_TURN_DELAY_SECS,
            reaction_full_threshold: REACTION_FULL_THRESHOLD,
            score_sound_delay_secs: SCORE_SOUND_DELAY_SECS,
        }
    }
}

impl Tuning {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: win at {}, opponent strength {:.2}-{:.2}",
            tuning.win_score,
            tuning.opponent_strength.min,
            tuning.opponent_strength.max
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.win_score == 0 {
            return Err(TuningError::InvalidWinScore);
        }

        let StrengthRange { min, max } = self.opponent_strength;
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(TuningError::InvalidStrengthRange { min, max });
        }

        let levels = &self.quality_levels;
        let increasing = levels
            .windows(2)
            .all(|pair| pair[0].max_distance < pair[1].max_distance);
        let covers_bar = levels
            .last()
            .is_some_and(|last| last.max_distance >= POWER_BAR_HALF_WIDTH);
        if !increasing || !covers_bar {
            return Err(TuningError::UnorderedThresholds);
        }

        if !(self.sweep_secs.is_finite() && self.sweep_secs > 0.0) {
            return Err(TuningError::InvalidTiming("sweep_secs"));
        }
        let non_negative = [
            ("opponent_delay_secs", self.opponent_delay_secs),
            ("next_turn_delay_secs", self.next_turn_delay_secs),
            ("reaction_full_threshold", self.reaction_full_threshold),
            ("score_sound_delay_secs", self.score_sound_delay_secs),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::InvalidTiming(name));
            }
        }

        Ok(())
    }

    /// Seconds from release to impact, following the throw choreography:
    /// lift and square up, wind up, rise while spinning, dive, slam.
    /// Stronger player throws spin faster. A slowed throw plays its last
    /// stretch (end of the dive plus the slam) at [`SLOW_MOTION_SCALE`].
    pub fn impact_delay(&self, attacker: Side, strength: f32, slow_motion: bool) -> f32 {
        let spin = match attacker {
            Side::Player => {
                THROW_BASE_FLIGHT_SECS - crate::unit_clamp(strength) * THROW_STRENGTH_SPEEDUP_SECS
            }
            Side::Opponent => THROW_BASE_FLIGHT_SECS,
        };
        let flight = spin * (1.0 + THROW_DIVE_FRACTION);
        let mut delay = THROW_SETUP_SECS + THROW_ANTICIPATION_SECS + flight + THROW_SLAM_SECS;
        if slow_motion {
            let slowed = SLOW_MOTION_LEAD_SECS + THROW_SLAM_SECS;
            delay += slowed * (1.0 / SLOW_MOTION_SCALE - 1.0);
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::power::Quality;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.win_score, 5);
        assert_eq!(tuning.quality_levels[0].quality, Quality::Super);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "win_score": 3 }"#).unwrap();
        assert_eq!(tuning.win_score, 3);
        assert_eq!(tuning.sweep_secs, POWER_SWEEP_SECS);
        assert_eq!(tuning.opponent_strength, StrengthRange::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "win_score": 0 }"#),
            Err(TuningError::InvalidWinScore)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "opponent_strength": { "min": 0.9, "max": 0.2 } }"#),
            Err(TuningError::InvalidStrengthRange { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "sweep_secs": 0.0 }"#),
            Err(TuningError::InvalidTiming("sweep_secs"))
        ));

        let unsorted = r#"{ "quality_levels": [
            { "quality": "good", "max_distance": 20.0 },
            { "quality": "super", "max_distance": 1.0 },
            { "quality": "poor", "max_distance": 50.0 }
        ] }"#;
        assert!(matches!(
            Tuning::from_json(unsorted),
            Err(TuningError::UnorderedThresholds)
        ));

        let short = r#"{ "quality_levels": [ { "quality": "super", "max_distance": 10.0 } ] }"#;
        assert!(matches!(
            Tuning::from_json(short),
            Err(TuningError::UnorderedThresholds)
        ));
    }

    #[test]
    fn test_impact_delay() {
        let tuning = Tuning::default();
        // 0.5 setup + 0.3 wind-up + 1.7 x spin + 0.1 slam
        assert!((tuning.impact_delay(Side::Player, 1.0, false) - 1.58).abs() < 1e-5);
        assert!((tuning.impact_delay(Side::Player, 0.0, false) - 2.26).abs() < 1e-5);
        assert!((tuning.impact_delay(Side::Opponent, 1.0, false) - 2.26).abs() < 1e-5);
    }

    #[test]
    fn test_slow_motion_stretches_impact() {
        let tuning = Tuning::default();
        // Last 0.3s of the throw plays at quarter speed: +0.9s
        let slowed = tuning.impact_delay(Side::Player, 1.0, true);
        assert!((slowed - 2.48).abs() < 1e-5);
        assert!(slowed > tuning.impact_delay(Side::Player, 1.0, false));
    }
}
