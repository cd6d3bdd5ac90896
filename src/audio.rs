//! Sound cues for match events
//!
//! `cues_for` decides what plays and when; on wasm the [`AudioManager`] plays
//! them as procedurally generated Web Audio tones. Playback is best-effort:
//! a missing or suspended audio context never touches match state.

use crate::consts::{THROW_ANTICIPATION_SECS, THROW_SETUP_SECS};
use crate::sim::{MatchEvent, Side};
use crate::tuning::Tuning;

#[cfg(target_arch = "wasm32")]
pub use playback::AudioManager;

/// Background music level during play
pub const MUSIC_VOLUME: f32 = 0.4;
/// Background music level under the win/lose sting
pub const MUSIC_DUCKED_VOLUME: f32 = 0.1;
/// Fade time between music levels
pub const MUSIC_FADE_SECS: f32 = 1.0;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// UI click (tutorial start, power bar start, replay)
    Click,
    /// Tile leaves the hand
    Throw,
    /// Tile lands and flips the defender
    ImpactHit,
    /// Tile lands without flipping
    ImpactMiss,
    /// Point scored
    Score,
    /// Player won the match
    Win,
    /// Player lost the match
    Lose,
}

impl SoundEffect {
    /// Per-effect mix level
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Click => 0.6,
            SoundEffect::Throw => 0.5,
            SoundEffect::ImpactMiss => 0.8,
            SoundEffect::ImpactHit | SoundEffect::Score | SoundEffect::Win | SoundEffect::Lose => {
                1.0
            }
        }
    }
}

/// A sound effect to play `delay` seconds after the event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub delay: f32,
}

impl Cue {
    fn now(effect: SoundEffect) -> Self {
        Self { effect, delay: 0.0 }
    }
}

/// Background music changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// First real interaction: start the loop
    Start,
    /// Make room for the win/lose sting
    Duck,
    /// Back to normal after a restart
    Restore,
}

impl MusicCue {
    pub fn level(&self) -> f32 {
        match self {
            MusicCue::Start | MusicCue::Restore => MUSIC_VOLUME,
            MusicCue::Duck => MUSIC_DUCKED_VOLUME,
        }
    }
}

/// Sound effects for one match event
pub fn cues_for(event: &MatchEvent, tuning: &Tuning) -> Vec<Cue> {
    match event {
        MatchEvent::TutorialDismissed | MatchEvent::PowerBarStarted | MatchEvent::MatchReset => {
            vec![Cue::now(SoundEffect::Click)]
        }
        // Whoosh after the wind-up
        MatchEvent::ThrowStarted { .. } => vec![Cue {
            effect: SoundEffect::Throw,
            delay: THROW_SETUP_SECS + THROW_ANTICIPATION_SECS,
        }],
        MatchEvent::ThrowResolved { success: true, .. } => vec![
            Cue::now(SoundEffect::ImpactHit),
            Cue {
                effect: SoundEffect::Score,
                delay: tuning.score_sound_delay_secs,
            },
        ],
        MatchEvent::ThrowResolved { success: false, .. } => vec![Cue::now(SoundEffect::ImpactMiss)],
        MatchEvent::GameOver { winner: Side::Player, .. } => vec![Cue::now(SoundEffect::Win)],
        MatchEvent::GameOver { winner: Side::Opponent, .. } => vec![Cue::now(SoundEffect::Lose)],
        MatchEvent::StateChanged { .. } | MatchEvent::TurnReady => Vec::new(),
    }
}

/// Music change for one match event
pub fn music_for(event: &MatchEvent) -> Option<MusicCue> {
    match event {
        MatchEvent::TutorialDismissed => Some(MusicCue::Start),
        MatchEvent::GameOver { .. } => Some(MusicCue::Duck),
        MatchEvent::MatchReset => Some(MusicCue::Restore),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
mod playback {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Cue, MUSIC_FADE_SECS, MusicCue, SoundEffect};
    use crate::Settings;

    /// Looping background drone
    struct Music {
        oscillators: Vec<OscillatorNode>,
        gain: GainNode,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<Music>,
        sfx_gain: f32,
        music_gain: f32,
        /// Current music level before settings gain
        music_level: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                music: None,
                sfx_gain: settings.sfx_gain(),
                music_gain: settings.music_gain(),
                music_level: 0.0,
            }
        }

        /// Pick up volume/mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_gain = settings.sfx_gain();
            self.music_gain = settings.music_gain();
            self.fade_music(self.music_level, 0.1);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a cue, scheduled on the audio clock
        pub fn play(&self, cue: Cue) {
            let vol = self.sfx_gain * cue.effect.base_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let t = ctx.current_time() + f64::from(cue.delay.max(0.0));
            match cue.effect {
                SoundEffect::Click => self.play_click(ctx, t, vol),
                SoundEffect::Throw => self.play_throw(ctx, t, vol),
                SoundEffect::ImpactHit => self.play_impact_hit(ctx, t, vol),
                SoundEffect::ImpactMiss => self.play_impact_miss(ctx, t, vol),
                SoundEffect::Score => self.play_score(ctx, t, vol),
                SoundEffect::Win => self.play_win(ctx, t, vol),
                SoundEffect::Lose => self.play_lose(ctx, t, vol),
            }
        }

        pub fn music(&mut self, cue: MusicCue) {
            if cue == MusicCue::Start {
                self.start_music();
            }
            self.fade_music(cue.level(), MUSIC_FADE_SECS);
        }

        fn start_music(&mut self) {
            if self.music.is_some() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            let Ok(gain) = ctx.create_gain() else { return };
            if gain.connect_with_audio_node(&ctx.destination()).is_err() {
                log::warn!("Failed to connect music gain");
                return;
            }
            gain.gain().set_value(0.0);

            // Low open fifth
            let mut oscillators = Vec::new();
            for (freq, osc_type) in [(110.0, OscillatorType::Sine), (165.0, OscillatorType::Triangle)] {
                let Ok(osc) = ctx.create_oscillator() else { continue };
                osc.set_type(osc_type);
                osc.frequency().set_value(freq);
                if osc.connect_with_audio_node(&gain).is_ok() && osc.start().is_ok() {
                    oscillators.push(osc);
                }
            }
            log::info!("Music started ({} voices)", oscillators.len());
            self.music = Some(Music { oscillators, gain });
        }

        fn fade_music(&mut self, level: f32, secs: f32) {
            self.music_level = level;
            let (Some(ctx), Some(music)) = (&self.ctx, &self.music) else {
                return;
            };
            let t = ctx.current_time();
            let param = music.gain.gain();
            param.cancel_scheduled_values(t).ok();
            param.set_value_at_time(param.value(), t).ok();
            param
                .linear_ramp_to_value_at_time(level * self.music_gain, t + f64::from(secs))
                .ok();
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short decaying tone starting at `t`
        fn blip(&self, ctx: &AudioContext, t: f64, freq: f32, osc_type: OscillatorType, vol: f32, len: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + len + 0.02).ok();
        }

        /// Click - crisp tick
        fn play_click(&self, ctx: &AudioContext, t: f64, vol: f32) {
            self.blip(ctx, t, 900.0, OscillatorType::Square, vol * 0.2, 0.04);
        }

        /// Throw - rising whoosh
        fn play_throw(&self, ctx: &AudioContext, t: f64, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
                return;
            };
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(800.0, t + 0.25)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.32).ok();
        }

        /// Impact hit - heavy slap with a crack on top
        fn play_impact_hit(&self, ctx: &AudioContext, t: f64, vol: f32) {
            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(45.0, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
            self.blip(ctx, t, 1800.0, OscillatorType::Square, vol * 0.15, 0.06);
        }

        /// Impact miss - dull thud
        fn play_impact_miss(&self, ctx: &AudioContext, t: f64, vol: f32) {
            self.blip(ctx, t, 90.0, OscillatorType::Triangle, vol * 0.5, 0.15);
        }

        /// Score - two-note chime
        fn play_score(&self, ctx: &AudioContext, t: f64, vol: f32) {
            self.blip(ctx, t, 880.0, OscillatorType::Sine, vol * 0.25, 0.15);
            self.blip(ctx, t + 0.1, 1320.0, OscillatorType::Sine, vol * 0.25, 0.25);
        }

        /// Win - rising arpeggio
        fn play_win(&self, ctx: &AudioContext, t: f64, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let start = t + i as f64 * 0.12;
                self.blip(ctx, start, *freq, OscillatorType::Triangle, vol * 0.3, 0.3);
            }
        }

        /// Lose - falling minor line
        fn play_lose(&self, ctx: &AudioContext, t: f64, vol: f32) {
            for (i, freq) in [392.0, 311.0, 262.0, 196.0].iter().enumerate() {
                let start = t + i as f64 * 0.18;
                self.blip(ctx, start, *freq, OscillatorType::Sawtooth, vol * 0.15, 0.35);
            }
        }
    }

    impl Drop for AudioManager {
        fn drop(&mut self) {
            if let Some(music) = &self.music {
                for osc in &music.oscillators {
                    osc.stop().ok();
                }
            }
        }
    }
}
