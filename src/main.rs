use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

// Import from the library crate
use dodger::{
    logging,
    config::PlayerConfig,
    controller::{FrameLoopContext, InputEvent},
};

struct App {
    config: PlayerConfig,
    window: Option<Arc<Window>>,
    frame_ctx: Option<FrameLoopContext>,
    started: Instant,
}

impl App {
    fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            window: None,
            frame_ctx: None,
            started: Instant::now(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: &Key, state: ElementState) {
        if matches!(key, Key::Named(NamedKey::Escape)) && state == ElementState::Pressed {
            tracing::info!("escape pressed, exiting");
            event_loop.exit();
            return;
        }

        let (Some(name), Some(ctx)) = (key_name(key), self.frame_ctx.as_mut()) else {
            return;
        };
        let event = match state {
            ElementState::Pressed => InputEvent::KeyDown(name),
            ElementState::Released => InputEvent::KeyUp(name),
        };
        ctx.handle_event(&event);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let [width, height] = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title("dodger")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size().to_logical::<f32>(window.scale_factor());
        let viewport = Vec2::new(size.width, size.height);
        tracing::info!(width = viewport.x, height = viewport.y, speed = self.config.speed, "player ready");

        match FrameLoopContext::new(&self.config, viewport) {
            Ok(ctx) => self.frame_ctx = Some(ctx),
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "failed to set up player");
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event.logical_key, event.state);
            }
            WindowEvent::Focused(false) => {
                if let Some(ctx) = self.frame_ctx.as_mut() {
                    ctx.handle_event(&InputEvent::FocusLost);
                }
            }
            WindowEvent::Occluded(occluded) => {
                if let Some(ctx) = self.frame_ctx.as_mut() {
                    ctx.handle_event(&InputEvent::VisibilityChanged { visible: !occluded });
                }
            }
            WindowEvent::RedrawRequested => {
                let now = self.started.elapsed().as_secs_f64();
                if let Some(ctx) = self.frame_ctx.as_mut() {
                    ctx.update(now);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

/// Browser-style key names so bindings read the same on both platforms.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_string()),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight".to_string()),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft".to_string()),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown".to_string()),
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp".to_string()),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = PlayerConfig::load().context("load player config")?;
    let event_loop = EventLoop::new().context("create event loop")?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("run event loop")?;
    Ok(())
}
