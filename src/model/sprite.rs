use std::fmt;

/// Animations the player sprite sheet provides.
///
/// There is no explicit idle animation: standing still is expressed by
/// stopping whatever animation is currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    Walk,
    Up,
}

impl Animation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::Walk => "walk",
            Animation::Up => "up",
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities the controller needs from an animated sprite.
///
/// The sprite is owned by whoever draws it; the controller only gets a
/// mutable handle for the duration of a frame.
pub trait AnimatedSprite {
    /// Start the current animation, or keep it running if it already is.
    fn play(&mut self);
    /// Freeze on the current frame.
    fn stop(&mut self);
    fn set_animation(&mut self, animation: Animation);
    fn set_flip_h(&mut self, flip: bool);
    fn set_flip_v(&mut self, flip: bool);
}

/// Plain sprite state, enough for a host to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteState {
    pub animation: Animation,
    pub playing: bool,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl SpriteState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimatedSprite for SpriteState {
    fn play(&mut self) {
        if !self.playing {
            tracing::trace!(animation = %self.animation, "sprite play");
        }
        self.playing = true;
    }

    fn stop(&mut self) {
        if self.playing {
            tracing::trace!(animation = %self.animation, "sprite stop");
        }
        self.playing = false;
    }

    fn set_animation(&mut self, animation: Animation) {
        if self.animation != animation {
            tracing::debug!(from = %self.animation, to = %animation, "sprite animation changed");
        }
        self.animation = animation;
    }

    fn set_flip_h(&mut self, flip: bool) {
        self.flip_h = flip;
    }

    fn set_flip_v(&mut self, flip: bool) {
        self.flip_v = flip;
    }
}
