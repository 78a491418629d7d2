// CONTROLLER: Input, player logic, and frame timing
pub mod input;
pub mod player_controller;
pub mod frame_loop;

pub use input::{Action, ActionSource, ActionView, InputEvent, InputProcessor, InputState, KeyBindings};
pub use player_controller::PlayerController;
pub use frame_loop::{FrameClock, FrameLoopContext, DEFAULT_MAX_DELTA};
