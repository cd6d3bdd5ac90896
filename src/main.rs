//! Ddakji entry point
//!
//! The web build starts from `ddakji::web::wasm_start`. Natively this runs a
//! headless demo match: a bot player stops the power bar after a random sweep
//! time and every match event is logged.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ddakji::Tuning;
    use ddakji::consts::*;
    use ddakji::sim::{MatchController, MatchEvent, MatchState, PcgSource, RandomSource, text};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("{}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Failed to read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Ddakji (native demo) starting...");
    let mut ctrl = MatchController::new(tuning);
    let mut bot = PcgSource::from_entropy();
    ctrl.start();

    // Seconds the bot lets the bar sweep before releasing
    let mut hold = 0.0f32;
    let mut frames: u64 = 0;
    // Ten minutes of frames is far more than any match needs
    let max_frames = (600.0 / SIM_DT) as u64;

    while ctrl.state() != MatchState::GameOver && frames < max_frames {
        match ctrl.state() {
            MatchState::WaitingForInput => {
                ctrl.activate();
                hold = bot.next_in(0.0, POWER_SWEEP_SECS * 2.0);
            }
            MatchState::PoweringUp => {
                hold -= SIM_DT;
                if hold <= 0.0 {
                    log::info!("Bot releases at {:.1}%", ctrl.power().percent());
                    ctrl.activate();
                }
            }
            _ => {}
        }

        ctrl.update(SIM_DT);
        frames += 1;

        for event in ctrl.drain_events() {
            match &event {
                MatchEvent::ThrowStarted { quality: Some(q), .. } => {
                    log::info!("{}", q.label());
                }
                MatchEvent::ThrowResolved { attacker, success, score, .. } => {
                    log::info!(
                        "{} ({}-{})",
                        text::outcome_banner(*attacker, *success),
                        score.player,
                        score.opponent
                    );
                }
                MatchEvent::GameOver { winner, .. } => {
                    log::info!("{}", text::result_text(*winner));
                }
                _ => log::debug!("{:?}", event),
            }
        }
    }

    let score = ctrl.score();
    log::info!(
        "Final score {}-{} after {:.1}s of match time",
        score.player,
        score.opponent,
        ctrl.now()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start, this is just to satisfy the compiler
}
