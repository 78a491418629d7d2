// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod logging;

// MVC Architecture (no view: drawing belongs to the host)
pub mod model;
pub mod controller;

pub use config::PlayerConfig;
pub use controller::{Action, ActionSource, FrameLoopContext, InputEvent, PlayerController};
pub use model::{Animation, AnimatedSprite, Player, SpriteState};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{Document, Event, KeyboardEvent, Window};

    use crate::config::PlayerConfig;
    use crate::controller::input::wasm::keyboard_event_to_input;
    use crate::controller::{FrameLoopContext, InputEvent, InputProcessor};
    use crate::logging;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();

        let window = web_sys::window().ok_or(js_error("no global `window`"))?;
        let document = window.document().ok_or(js_error("no document on window"))?;

        let config = PlayerConfig::default();
        let viewport = viewport_size(&window, &config);
        tracing::info!(width = viewport.x, height = viewport.y, "starting player");

        let frame_ctx = FrameLoopContext::new(&config, viewport)
            .map_err(|e| js_error(format!("player setup failed: {e:#}")))?;
        let frame_ctx = Rc::new(RefCell::new(frame_ctx));
        setup_input_listeners(&document, &window, frame_ctx.clone())?;

        let performance = window.performance();
        let f = RcCellCallback::new(window.clone(), move || {
            let now = performance.as_ref().map(|p| p.now()).unwrap_or(0.0) / 1000.0;
            frame_ctx.borrow_mut().update(now);
        });
        f.start()
    }

    fn viewport_size(window: &Window, config: &PlayerConfig) -> Vec2 {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(config.window_size[0] as f64);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(config.window_size[1] as f64);
        Vec2::new(w as f32, h as f32)
    }

    /// Keyboard, focus and visibility listeners feeding the frame context
    fn setup_input_listeners(
        document: &Document,
        window: &Window,
        frame_ctx: Rc<RefCell<FrameLoopContext>>,
    ) -> Result<(), JsValue> {
        let input_processor: InputProcessor = frame_ctx.borrow().input_processor.clone();

        // Keyboard down
        {
            let frame_ctx = frame_ctx.clone();
            let input_processor = input_processor.clone();
            let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                // Keep arrow keys from scrolling the page
                if input_processor.is_movement_key(&e.key()) {
                    e.prevent_default();
                }
                frame_ctx
                    .borrow_mut()
                    .handle_event(&keyboard_event_to_input(&e, true));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
            keydown.forget();
        }

        // Keyboard up
        {
            let frame_ctx = frame_ctx.clone();
            let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                frame_ctx
                    .borrow_mut()
                    .handle_event(&keyboard_event_to_input(&e, false));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
            keyup.forget();
        }

        // Focus loss - release all keys
        {
            let frame_ctx = frame_ctx.clone();
            let blur = Closure::wrap(Box::new(move |_e: Event| {
                frame_ctx.borrow_mut().handle_event(&InputEvent::FocusLost);
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
            blur.forget();
        }

        // Visibility change - release all keys
        {
            let doc = document.clone();
            let visibility = Closure::wrap(Box::new(move |_e: Event| {
                let visible = !doc.hidden();
                frame_ctx
                    .borrow_mut()
                    .handle_event(&InputEvent::VisibilityChanged { visible });
            }) as Box<dyn FnMut(Event)>);
            document.add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
            visibility.forget();
        }

        Ok(())
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }

    /// Re-arms itself through requestAnimationFrame every frame
    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut()>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) -> Result<(), JsValue> {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                inner.borrow_mut().as_mut()();

                // Schedule the next frame
                if let Some(cb) = callback_clone.borrow().as_ref() {
                    if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        tracing::error!(?e, "requestAnimationFrame failed");
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(cb) = callback.borrow().as_ref() {
                self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            }

            // Leak the closure to keep it alive
            std::mem::forget(callback);
            Ok(())
        }
    }
}
