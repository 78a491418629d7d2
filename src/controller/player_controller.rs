use anyhow::{ensure, Result};
use glam::Vec2;

use crate::controller::input::{Action, ActionSource};
use crate::model::{Animation, AnimatedSprite, Player};

/// Drives the player from directional input, one host frame at a time.
#[derive(Debug, Clone)]
pub struct PlayerController {
    player: Player,
    velocity: Vec2,
}

impl PlayerController {
    pub fn new(speed: f32) -> Result<Self> {
        ensure_speed(speed)?;
        Ok(Self {
            player: Player::new(speed),
            velocity: Vec2::ZERO,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn position(&self) -> Vec2 {
        self.player.position
    }

    /// Velocity computed by the most recent `update`.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Called once when the player enters the scene.
    pub fn ready(&mut self, viewport_size: Vec2) {
        self.player.set_screen_size(viewport_size);
        self.player.hide();
        tracing::debug!(width = viewport_size.x, height = viewport_size.y, "player ready");
    }

    /// Place the player and make it visible.
    pub fn start(&mut self, position: Vec2) {
        self.player.position = position;
        self.player.show();
        tracing::debug!(x = position.x, y = position.y, "player started");
    }

    pub fn show(&mut self) {
        self.player.show();
    }

    pub fn hide(&mut self) {
        self.player.hide();
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        ensure_speed(speed)?;
        self.player.speed = speed;
        Ok(())
    }

    /// Advance one frame of `delta` seconds.
    pub fn update<I, S>(&mut self, delta: f32, input: &I, sprite: &mut S)
    where
        I: ActionSource + ?Sized,
        S: AnimatedSprite + ?Sized,
    {
        let mut velocity = Vec2::ZERO;
        if input.is_action_pressed(Action::MoveRight) {
            velocity.x += 1.0;
        }
        if input.is_action_pressed(Action::MoveLeft) {
            velocity.x -= 1.0;
        }
        if input.is_action_pressed(Action::MoveDown) {
            velocity.y += 1.0;
        }
        if input.is_action_pressed(Action::MoveUp) {
            velocity.y -= 1.0;
        }

        if velocity.length_squared() > 0.0 {
            // Diagonals move at the same speed as straight lines
            velocity = velocity.normalize() * self.player.speed;
            sprite.play();
        } else {
            sprite.stop();
        }

        self.player.position += velocity * delta;
        self.player.clamp_to_screen();

        if velocity.x != 0.0 {
            sprite.set_animation(Animation::Walk);
            sprite.set_flip_v(false);
            sprite.set_flip_h(velocity.x < 0.0);
        } else if velocity.y != 0.0 {
            // flip_h keeps whatever the last horizontal move left behind
            sprite.set_animation(Animation::Up);
            sprite.set_flip_v(velocity.y > 0.0);
        }

        self.velocity = velocity;
    }
}

fn ensure_speed(speed: f32) -> Result<()> {
    ensure!(
        speed.is_finite() && speed >= 0.0,
        "speed must be a finite, non-negative number, got {speed}"
    );
    Ok(())
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            player: Player::default(),
            velocity: Vec2::ZERO,
        }
    }
}
