//! Whole-match scenarios driven through the public API

use ddakji::Tuning;
use ddakji::consts::*;
use ddakji::sim::{
    MatchController, MatchEvent, MatchState, PcgSource, Quality, RandomSource, Score,
    SequenceSource, Side,
};
use ddakji::tuning::StrengthRange;

/// Longer than any single turn (release to next turn is under 10s)
const TURN_SECS: f32 = 12.0;

fn started<R: RandomSource>(tuning: Tuning, rng: R) -> MatchController<R> {
    let mut ctrl = MatchController::with_rng(tuning, rng);
    assert!(ctrl.start());
    ctrl
}

/// Stop the bar dead center: super, strength 1.0
fn perfect_throw<R: RandomSource>(ctrl: &mut MatchController<R>) {
    assert_eq!(ctrl.state(), MatchState::WaitingForInput);
    assert!(ctrl.activate());
    assert_eq!(ctrl.state(), MatchState::PoweringUp);
    ctrl.update(POWER_SWEEP_SECS / 2.0);
    assert!(ctrl.activate());
    assert_eq!(ctrl.state(), MatchState::PlayerThrowing);
}

/// Run in small frames until `done` or the budget runs out
fn run_until<R: RandomSource>(
    ctrl: &mut MatchController<R>,
    secs: f32,
    done: impl Fn(&MatchController<R>) -> bool,
) {
    let mut left = secs;
    while left > 0.0 && !done(&*ctrl) {
        ctrl.update(SIM_DT);
        left -= SIM_DT;
    }
}

#[test]
fn player_sweeps_five_zero() {
    let tuning = Tuning {
        opponent_strength: StrengthRange::fixed(0.0),
        ..Tuning::default()
    };
    // Every draw is 0.0: the player's sure throws land, the opponent's 0.0 throws miss
    let mut ctrl = started(tuning, SequenceSource::constant(0.0));

    for round in 1..=WIN_SCORE {
        perfect_throw(&mut ctrl);
        run_until(&mut ctrl, TURN_SECS, |c| {
            matches!(c.state(), MatchState::WaitingForInput | MatchState::GameOver)
        });
        assert_eq!(ctrl.score(), Score::new(round, 0));
        if round < WIN_SCORE {
            assert_eq!(ctrl.state(), MatchState::WaitingForInput);
        }
    }

    assert_eq!(ctrl.state(), MatchState::GameOver);
    assert_eq!(ctrl.winner(), Some(Side::Player));
    assert_eq!(ctrl.score(), Score::new(5, 0));
    assert!(!ctrl.tile(Side::Opponent).active);

    let events = ctrl.drain_events();
    let player_throws = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                MatchEvent::ThrowStarted {
                    attacker: Side::Player,
                    quality: Some(Quality::Super),
                    ..
                }
            )
        })
        .count();
    let opponent_throws = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::ThrowStarted { attacker: Side::Opponent, .. }))
        .count();
    assert_eq!(player_throws, 5);
    // The fifth point ends the match before the opponent's turn
    assert_eq!(opponent_throws, 4);
    assert_eq!(
        events.last(),
        Some(&MatchEvent::GameOver {
            winner: Side::Player,
            score: Score::new(5, 0)
        })
    );
}

#[test]
fn game_over_on_the_scoring_turn() {
    let tuning = Tuning {
        opponent_strength: StrengthRange::fixed(0.0),
        ..Tuning::default()
    };
    let mut ctrl = started(tuning, SequenceSource::constant(0.0));

    for _ in 1..WIN_SCORE {
        perfect_throw(&mut ctrl);
        run_until(&mut ctrl, TURN_SECS, |c| c.state() == MatchState::WaitingForInput);
    }

    perfect_throw(&mut ctrl);
    run_until(&mut ctrl, TURN_SECS, |c| c.score().player == WIN_SCORE);
    assert_eq!(ctrl.state(), MatchState::PlayerThrowing);

    // Only the fifth point is flagged as deciding, and it is flagged at impact
    let deciding: Vec<Score> = ctrl
        .events()
        .iter()
        .filter_map(|e| match e {
            MatchEvent::ThrowResolved { decides_match: true, score, .. } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(deciding, vec![Score::new(WIN_SCORE, 0)]);

    // Next-turn setup lands on game over, never the opponent's turn
    run_until(&mut ctrl, TURN_SECS, |c| c.state() != MatchState::PlayerThrowing);
    assert_eq!(ctrl.state(), MatchState::GameOver);
}

#[test]
fn opponent_wins_and_restart_resets() {
    let tuning = Tuning {
        opponent_strength: StrengthRange::fixed(1.0),
        ..Tuning::default()
    };
    let mut ctrl = started(tuning, PcgSource::seeded(11));

    while ctrl.state() != MatchState::GameOver {
        // Release at 0%: strength 0, always a miss
        assert!(ctrl.activate());
        assert!(ctrl.activate());
        run_until(&mut ctrl, TURN_SECS, |c| {
            matches!(c.state(), MatchState::WaitingForInput | MatchState::GameOver)
        });
    }

    assert_eq!(ctrl.winner(), Some(Side::Opponent));
    assert_eq!(ctrl.score(), Score::new(0, 5));
    assert!(!ctrl.tile(Side::Player).active);
    assert!(ctrl.tile(Side::Opponent).active);

    // Restart
    assert!(ctrl.activate());
    assert_eq!(ctrl.state(), MatchState::WaitingForInput);
    assert_eq!(ctrl.score(), Score::new(0, 0));
    assert!(ctrl.tile(Side::Player).active);

    // Nothing left over from the old match fires later
    ctrl.drain_events();
    ctrl.update(TURN_SECS);
    assert_eq!(ctrl.state(), MatchState::WaitingForInput);
    assert!(ctrl.drain_events().is_empty());
}

#[test]
fn input_ignored_while_throwing() {
    let mut ctrl = started(Tuning::default(), PcgSource::seeded(3));
    perfect_throw(&mut ctrl);

    for _ in 0..10 {
        assert!(!ctrl.activate());
        ctrl.update(0.25);
    }
    run_until(&mut ctrl, TURN_SECS, |c| c.state() == MatchState::OpponentThrowing);
    assert_eq!(ctrl.state(), MatchState::OpponentThrowing);
    ctrl.drain_events();
    for _ in 0..4 {
        assert!(!ctrl.activate());
        assert_eq!(ctrl.state(), MatchState::OpponentThrowing);
        ctrl.update(0.1);
    }
    assert!(!ctrl.events().iter().any(|e| matches!(e, MatchEvent::PowerBarStarted)));
}

#[test]
fn real_randomness_completes_a_match() {
    let mut ctrl = started(Tuning::default(), PcgSource::from_entropy());
    let mut guard = 0;
    while ctrl.state() != MatchState::GameOver && guard < 200 {
        perfect_throw(&mut ctrl);
        run_until(&mut ctrl, TURN_SECS, |c| {
            matches!(c.state(), MatchState::WaitingForInput | MatchState::GameOver)
        });
        guard += 1;
    }
    assert_eq!(ctrl.state(), MatchState::GameOver);
    let score = ctrl.score();
    assert!(score.player == WIN_SCORE || score.opponent == WIN_SCORE);
    assert!(score.player <= WIN_SCORE && score.opponent <= WIN_SCORE);
}
