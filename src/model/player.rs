use glam::Vec2;

/// Default movement speed in pixels per second.
pub const DEFAULT_SPEED: f32 = 400.0;

/// Player state - position, speed, screen bounds, visibility
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub speed: f32,
    screen_size: Vec2,
    visible: bool,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            speed,
            screen_size: Vec2::ZERO,
            visible: true,
        }
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Capture the viewport size used as movement bounds.
    pub(crate) fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Keep the position inside `[0, screen_size]` on both axes.
    pub fn clamp_to_screen(&mut self) {
        self.position.x = self.position.x.max(0.0).min(self.screen_size.x);
        self.position.y = self.position.y.max(0.0).min(self.screen_size.y);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speed() {
        assert_eq!(Player::default().speed, 400.0);
    }

    #[test]
    fn test_clamp_each_axis_independently() {
        let mut player = Player::default();
        player.set_screen_size(Vec2::new(800.0, 600.0));

        player.position = Vec2::new(-10.0, 50.0);
        player.clamp_to_screen();
        assert_eq!(player.position, Vec2::new(0.0, 50.0));

        player.position = Vec2::new(900.0, 700.0);
        player.clamp_to_screen();
        assert_eq!(player.position, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_visibility_toggles() {
        let mut player = Player::default();
        player.hide();
        assert!(!player.is_visible());
        player.show();
        assert!(player.is_visible());
    }
}
