//! Throw resolution
//!
//! Strength is the flip probability: draw `r` in `[0, 1)`, the throw lands iff
//! `r < strength`.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Score, Side};
use crate::consts::{REACTION_FULL_THRESHOLD, WIN_SCORE};
use crate::tuning::Tuning;

/// How the attacker's tile reacts after a landed throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    /// Attacker tumbles all the way over
    Full,
    /// Attacker wobbles and settles back
    Partial,
    /// Missed throw
    None,
}

/// Outcome of one throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub success: bool,
    pub reaction: Reaction,
    /// Drawn from `[0, strength)` on success, 0 on a miss
    pub reaction_intensity: f32,
}

#[derive(Debug, Clone)]
pub struct TurnResolver {
    win_score: u8,
    full_threshold: f32,
}

impl Default for TurnResolver {
    fn default() -> Self {
        Self {
            win_score: WIN_SCORE,
            full_threshold: REACTION_FULL_THRESHOLD,
        }
    }
}

impl TurnResolver {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            win_score: tuning.win_score,
            full_threshold: tuning.reaction_full_threshold,
        }
    }

    /// Resolve one throw and apply the score change.
    ///
    /// Does not decide game over; callers check `Score::winner` afterwards.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        attacker: Side,
        strength: f32,
        score: &mut Score,
        rng: &mut R,
    ) -> Resolution {
        let strength = crate::unit_clamp(strength);
        let success = rng.next_unit() < strength;

        if !success {
            return Resolution {
                success: false,
                reaction: Reaction::None,
                reaction_intensity: 0.0,
            };
        }

        score.award(attacker, self.win_score);

        let intensity = rng.next_unit() * strength;
        let reaction = if intensity > self.full_threshold {
            Reaction::Full
        } else {
            Reaction::Partial
        };

        Resolution {
            success: true,
            reaction,
            reaction_intensity: intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{PcgSource, SequenceSource};

    #[test]
    fn test_success_rate_tracks_strength() {
        let resolver = TurnResolver::default();
        let mut rng = PcgSource::seeded(2024);
        let trials = 20_000;
        let mut hits = 0;

        for _ in 0..trials {
            // Fresh score so the win cap never freezes it
            let mut score = Score::default();
            if resolver.resolve(Side::Player, 0.7, &mut score, &mut rng).success {
                hits += 1;
            }
        }

        let rate = hits as f32 / trials as f32;
        assert!((rate - 0.7).abs() < 0.02, "observed rate {}", rate);
    }

    #[test]
    fn test_zero_strength_never_lands() {
        let resolver = TurnResolver::default();
        let mut rng = PcgSource::seeded(1);
        let mut score = Score::default();
        for _ in 0..5_000 {
            let res = resolver.resolve(Side::Opponent, 0.0, &mut score, &mut rng);
            assert!(!res.success);
            assert_eq!(res.reaction, Reaction::None);
        }
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_full_strength_always_lands() {
        let resolver = TurnResolver::default();
        let mut rng = PcgSource::seeded(2);
        for _ in 0..5_000 {
            let mut score = Score::default();
            let res = resolver.resolve(Side::Player, 1.0, &mut score, &mut rng);
            assert!(res.success);
            assert_eq!(score, Score::new(1, 0));
        }
    }

    #[test]
    fn test_reaction_kind() {
        let resolver = TurnResolver::default();
        let mut score = Score::default();

        // Hit, then intensity 0.9 * 0.8 = 0.72 > 0.5
        let mut rng = SequenceSource::new([0.1, 0.9]);
        let res = resolver.resolve(Side::Opponent, 0.8, &mut score, &mut rng);
        assert_eq!(res.reaction, Reaction::Full);
        assert!((res.reaction_intensity - 0.72).abs() < 1e-6);
        assert_eq!(score.opponent, 1);

        // Hit, then intensity 0.5 * 0.8 = 0.4
        let mut rng = SequenceSource::new([0.1, 0.5]);
        let res = resolver.resolve(Side::Opponent, 0.8, &mut score, &mut rng);
        assert_eq!(res.reaction, Reaction::Partial);
        assert_eq!(score.opponent, 2);

        // Miss consumes a single draw
        let mut rng = SequenceSource::new([0.8, 0.0]);
        let res = resolver.resolve(Side::Opponent, 0.8, &mut score, &mut rng);
        assert!(!res.success);
        assert_eq!(rng.remaining(), 1);
        assert_eq!(score.opponent, 2);
    }
}
