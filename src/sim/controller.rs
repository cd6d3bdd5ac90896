//! Match controller
//!
//! Owns the turn state machine. The host feeds it `start`/`activate` input and
//! frame deltas via `update`; the controller drives the power bar, schedules
//! throws on its virtual clock, resolves impacts and queues [`MatchEvent`]s for
//! presentation.

use super::power::{PowerTiming, Quality};
use super::resolve::TurnResolver;
use super::rng::{PcgSource, RandomSource};
use super::schedule::{Scheduler, TimerId};
use super::state::{MatchEvent, MatchState, Score, Side, Tile, Tiles};
use crate::tuning::Tuning;

/// Delayed match work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Opponent finishes winding up and throws
    OpponentThrow,
    /// A tile lands on the defender
    Impact(Side),
    /// Post-impact pause over, set up the next turn
    TurnComplete(Side),
}

/// The throw currently in flight (or about to be)
#[derive(Debug, Clone, Copy)]
struct PendingThrow {
    attacker: Side,
    strength: f32,
    quality: Option<Quality>,
}

pub struct MatchController<R: RandomSource = PcgSource> {
    tuning: Tuning,
    state: MatchState,
    score: Score,
    tiles: Tiles,
    power: PowerTiming,
    resolver: TurnResolver,
    scheduler: Scheduler<Task>,
    /// The one task in flight; turns chain one timer at a time
    timer: Option<TimerId>,
    rng: R,
    pending: Option<PendingThrow>,
    winner: Option<Side>,
    slow_motion: bool,
    events: Vec<MatchEvent>,
}

impl MatchController<PcgSource> {
    /// Controller with unseeded randomness
    pub fn new(tuning: Tuning) -> Self {
        Self::with_rng(tuning, PcgSource::from_entropy())
    }
}

impl<R: RandomSource> MatchController<R> {
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        Self {
            power: PowerTiming::new(tuning.sweep_secs, tuning.quality_levels.clone()),
            resolver: TurnResolver::new(&tuning),
            tuning,
            state: MatchState::Tutorial,
            score: Score::default(),
            tiles: Tiles::default(),
            scheduler: Scheduler::new(),
            timer: None,
            rng,
            pending: None,
            winner: None,
            slow_motion: true,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn tile(&self, side: Side) -> &Tile {
        self.tiles.get(side)
    }

    pub fn power(&self) -> &PowerTiming {
        &self.power
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Whether super throws slow down before impact. Impact timing follows
    /// this, so the host must play its tween at the matching speed.
    pub fn set_slow_motion(&mut self, enabled: bool) {
        self.slow_motion = enabled;
    }

    /// Virtual match time in seconds
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tutorial start button. Ignored outside the tutorial.
    pub fn start(&mut self) -> bool {
        if self.state != MatchState::Tutorial {
            return false;
        }
        self.events.push(MatchEvent::TutorialDismissed);
        self.set_state(MatchState::WaitingForInput);
        true
    }

    /// Tap/click. Returns false when the current state ignores input.
    pub fn activate(&mut self) -> bool {
        match self.state {
            MatchState::WaitingForInput => {
                self.power.start();
                self.set_state(MatchState::PoweringUp);
                self.events.push(MatchEvent::PowerBarStarted);
                true
            }
            MatchState::PoweringUp => {
                let outcome = self.power.stop();
                log::debug!(
                    "Power bar stopped at {:.1}%: {:?} ({:.2})",
                    self.power.percent(),
                    outcome.quality,
                    outcome.strength
                );
                self.set_state(MatchState::PlayerThrowing);
                self.launch(Side::Player, outcome.strength, Some(outcome.quality));
                true
            }
            MatchState::GameOver => {
                self.reset();
                true
            }
            MatchState::Tutorial
            | MatchState::PlayerThrowing
            | MatchState::OpponentThrowing => false,
        }
    }

    /// Advance the power bar and fire due tasks. Non-finite deltas are ignored.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite frame delta {}", dt);
            return;
        }
        let dt = dt.max(0.0);
        self.power.advance(dt);
        self.scheduler.advance(dt);

        while let Some(task) = self.scheduler.pop_due() {
            self.run(task);
        }
    }

    fn run(&mut self, task: Task) {
        self.timer = None;
        match task {
            Task::OpponentThrow => {
                if let Some(pending) = self.pending {
                    self.launch(Side::Opponent, pending.strength, None);
                }
            }
            Task::Impact(side) => self.impact(side),
            Task::TurnComplete(side) => self.complete_turn(side),
        }
    }

    fn launch(&mut self, attacker: Side, strength: f32, quality: Option<Quality>) {
        let slow_motion = self.slow_motion && quality == Some(Quality::Super);
        let impact_in = self.tuning.impact_delay(attacker, strength, slow_motion);
        self.pending = Some(PendingThrow {
            attacker,
            strength,
            quality,
        });
        self.events.push(MatchEvent::ThrowStarted {
            attacker,
            defender: attacker.other(),
            strength,
            quality,
            impact_in,
            slow_motion,
        });
        self.schedule(impact_in, Task::Impact(attacker));
    }

    fn impact(&mut self, side: Side) {
        let Some(pending) = self.pending.take() else {
            log::warn!("Impact for {:?} with no throw in flight", side);
            return;
        };

        let resolution =
            self.resolver
                .resolve(pending.attacker, pending.strength, &mut self.score, &mut self.rng);
        log::debug!(
            "{:?} throw at {:.2}: {} ({:?}), score {}-{}",
            pending.attacker,
            pending.strength,
            if resolution.success { "flipped" } else { "missed" },
            resolution.reaction,
            self.score.player,
            self.score.opponent
        );

        self.events.push(MatchEvent::ThrowResolved {
            attacker: pending.attacker,
            defender: pending.attacker.other(),
            success: resolution.success,
            quality: pending.quality,
            reaction: resolution.reaction,
            reaction_intensity: resolution.reaction_intensity,
            score: self.score,
            decides_match: self.score.winner(self.tuning.win_score).is_some(),
        });
        self.schedule(self.tuning.next_turn_delay_secs, Task::TurnComplete(side));
    }

    fn complete_turn(&mut self, side: Side) {
        if let Some(winner) = self.score.winner(self.tuning.win_score) {
            self.game_over(winner);
            return;
        }

        match side {
            Side::Player => self.begin_opponent_turn(),
            Side::Opponent => {
                self.set_state(MatchState::WaitingForInput);
                self.events.push(MatchEvent::TurnReady);
            }
        }
    }

    fn begin_opponent_turn(&mut self) {
        let range = self.tuning.opponent_strength;
        let strength = self.rng.next_in(range.min, range.max);
        self.pending = Some(PendingThrow {
            attacker: Side::Opponent,
            strength,
            quality: None,
        });
        self.set_state(MatchState::OpponentThrowing);
        self.schedule(self.tuning.opponent_delay_secs, Task::OpponentThrow);
    }

    fn game_over(&mut self, winner: Side) {
        self.winner = Some(winner);
        self.tiles.get_mut(winner.other()).shatter();
        self.set_state(MatchState::GameOver);
        log::info!(
            "Match over: {:?} wins {}-{}",
            winner,
            self.score.get(winner),
            self.score.get(winner.other())
        );
        self.events.push(MatchEvent::GameOver {
            winner,
            score: self.score,
        });
    }

    fn reset(&mut self) {
        self.score.reset();
        self.tiles.restore_all();
        if let Some(id) = self.timer.take() {
            if self.scheduler.cancel(id) {
                log::debug!("Cancelled pending match task {:?}", id);
            }
        }
        self.power.cancel();
        self.pending = None;
        self.winner = None;
        self.set_state(MatchState::WaitingForInput);
        self.events.push(MatchEvent::MatchReset);
    }

    fn schedule(&mut self, delay: f32, task: Task) {
        if let Some(stale) = self.timer.replace(self.scheduler.schedule(delay, task)) {
            if self.scheduler.cancel(stale) {
                log::warn!("Replaced match task {:?} before it fired", stale);
            }
        }
    }

    fn set_state(&mut self, next: MatchState) {
        if next == self.state {
            return;
        }
        log::info!("Match state: {:?} -> {:?}", self.state, next);
        self.events.push(MatchEvent::StateChanged {
            from: self.state,
            to: next,
        });
        self.state = next;
    }
}
