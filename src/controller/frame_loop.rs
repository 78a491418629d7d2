use anyhow::Result;
use glam::Vec2;

use crate::config::PlayerConfig;
use crate::controller::input::{InputEvent, InputProcessor, InputState};
use crate::controller::player_controller::PlayerController;
use crate::model::SpriteState;

/// Default upper bound for a single frame step, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Turns host timestamps into per-frame deltas and keeps FPS stats
pub struct FrameClock {
    last_time: Option<f64>,
    max_delta: f32,
    frame_count: u32,
    fps_timer: f32,
    fps: f32,
}

impl FrameClock {
    /// A `max_delta` that is not a positive number falls back to the default.
    pub fn new(max_delta: f32) -> Self {
        let max_delta = if max_delta.is_finite() && max_delta > 0.0 {
            max_delta
        } else {
            tracing::warn!(max_delta, "invalid frame delta cap, using {}", DEFAULT_MAX_DELTA);
            DEFAULT_MAX_DELTA
        };
        Self {
            last_time: None,
            max_delta,
            frame_count: 0,
            fps_timer: 0.0,
            fps: 0.0,
        }
    }

    /// Feed the current time in seconds, get the delta since the previous tick.
    ///
    /// The first tick yields 0. Clocks going backwards yield 0 and long stalls
    /// (a background tab, a debugger pause) are capped at `max_delta`.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).max(0.0).min(self.max_delta),
            None => 0.0,
        };
        self.last_time = Some(now);

        self.frame_count += 1;
        self.fps_timer += dt;
        if self.fps_timer >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer;
            tracing::debug!(fps = self.fps, "frame rate");
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }

        dt
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

/// Everything one host frame touches: input, the player and its sprite
pub struct FrameLoopContext {
    pub controller: PlayerController,
    pub sprite: SpriteState,
    pub input_state: InputState,
    pub input_processor: InputProcessor,
    pub clock: FrameClock,
}

impl FrameLoopContext {
    /// Build the player for a viewport and start it at the configured spot.
    pub fn new(config: &PlayerConfig, viewport: Vec2) -> Result<Self> {
        let mut controller = PlayerController::new(config.speed)?;
        controller.ready(viewport);
        controller.start(config.start_position_in(viewport));

        Ok(Self {
            controller,
            sprite: SpriteState::new(),
            input_state: InputState::new(),
            input_processor: InputProcessor::new(config.bindings.clone()),
            clock: FrameClock::new(config.max_frame_delta),
        })
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input_state.process_event(event);
    }

    /// Run one frame at host time `now` (seconds); returns the delta used.
    pub fn update(&mut self, now: f64) -> f32 {
        let dt = self.clock.tick(now);
        let input = self.input_processor.view(&self.input_state);
        self.controller.update(dt, &input, &mut self.sprite);

        let pos = self.controller.position();
        tracing::trace!(
            x = pos.x,
            y = pos.y,
            animation = %self.sprite.animation,
            playing = self.sprite.playing,
            "frame"
        );
        dt
    }
}
