// MODEL: Player state and sprite data
pub mod player;
pub mod sprite;

pub use player::{Player, DEFAULT_SPEED};
pub use sprite::{Animation, AnimatedSprite, SpriteState};
