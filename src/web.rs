//! Browser bridge
//!
//! The host page owns the scene, tweens and DOM. It forwards clicks to
//! [`Game::activate`], calls [`Game::update`] every animation frame, and
//! renders the JSON events it gets back.

use wasm_bindgen::prelude::*;

use crate::audio::{self, AudioManager};
use crate::consts::MAX_FRAME_DT;
use crate::sim::{InputDevice, MatchController, Side, text};
use crate::{Settings, Tuning};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Ddakji starting...");
}

/// Touch-capable browsers get "Tap" wording
fn detect_device() -> InputDevice {
    let Some(window) = web_sys::window() else {
        return InputDevice::Mouse;
    };
    let touch_events = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    if touch_events || window.navigator().max_touch_points() > 0 {
        InputDevice::Touch
    } else {
        InputDevice::Mouse
    }
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct Game {
    ctrl: MatchController,
    settings: Settings,
    audio: AudioManager,
    device: InputDevice,
}

#[wasm_bindgen]
impl Game {
    /// Optional tuning JSON overrides the built-in balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<Game, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let settings = Settings::load();
        let device = settings.device_or(detect_device());
        log::info!("Input device: {:?}", device);

        let mut ctrl = MatchController::new(tuning);
        ctrl.set_slow_motion(settings.slow_motion_enabled());

        Ok(Game {
            ctrl,
            audio: AudioManager::new(&settings),
            settings,
            device,
        })
    }

    /// Tutorial start button
    pub fn start(&mut self) -> bool {
        self.audio.resume();
        self.ctrl.start()
    }

    /// Pointer tap/click anywhere on the page
    pub fn activate(&mut self) -> bool {
        self.ctrl.activate()
    }

    /// Advance by the frame delta (seconds); returns the frame's events as JSON
    pub fn update(&mut self, dt: f32) -> String {
        self.ctrl.update(dt.min(MAX_FRAME_DT));

        let events = self.ctrl.drain_events();
        for event in &events {
            for cue in audio::cues_for(event, self.ctrl.tuning()) {
                self.audio.play(cue);
            }
            if let Some(music) = audio::music_for(event) {
                self.audio.music(music);
            }
        }

        match serde_json::to_string(&events) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize events: {}", e);
                "[]".to_string()
            }
        }
    }

    /// Status line for the current phase
    pub fn prompt(&self) -> String {
        text::prompt(self.ctrl.state(), self.device)
    }

    /// Tutorial overlay text, one instruction per line
    pub fn tutorial(&self) -> String {
        text::tutorial_lines(self.device).join("\n")
    }

    /// Power bar indicator position (0-100)
    pub fn power_percent(&self) -> f32 {
        self.ctrl.power().percent()
    }

    /// Hit feedback class for the indicator after a stop
    pub fn power_feedback(&self) -> Option<String> {
        self.ctrl
            .power()
            .last_outcome()
            .map(|o| o.quality.feedback_class().to_string())
    }

    pub fn phase(&self) -> String {
        self.ctrl.state().as_str().to_string()
    }

    pub fn player_score(&self) -> u8 {
        self.ctrl.score().get(Side::Player)
    }

    pub fn opponent_score(&self) -> u8 {
        self.ctrl.score().get(Side::Opponent)
    }

    pub fn win_score(&self) -> u8 {
        self.ctrl.tuning().win_score
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.apply_settings(&self.settings);
        self.settings.save();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.settings.reduced_motion = reduced;
        self.ctrl.set_slow_motion(self.settings.slow_motion_enabled());
        self.settings.save();
    }
}
