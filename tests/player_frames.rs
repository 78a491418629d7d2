use dodger::controller::{InputEvent, InputProcessor, InputState};
use dodger::{Action, Animation, AnimatedSprite, PlayerConfig, PlayerController, SpriteState};
use glam::Vec2;

const EPS: f32 = 1e-3;

fn started(position: Vec2) -> PlayerController {
    let mut controller = PlayerController::default();
    controller.ready(Vec2::new(800.0, 600.0));
    controller.start(position);
    controller
}

/// Records every call so ordering and untouched flags can be checked.
#[derive(Default)]
struct CallLog {
    calls: Vec<String>,
}

impl AnimatedSprite for CallLog {
    fn play(&mut self) {
        self.calls.push("play".to_string());
    }
    fn stop(&mut self) {
        self.calls.push("stop".to_string());
    }
    fn set_animation(&mut self, animation: Animation) {
        self.calls.push(format!("animation={animation}"));
    }
    fn set_flip_h(&mut self, flip: bool) {
        self.calls.push(format!("flip_h={flip}"));
    }
    fn set_flip_v(&mut self, flip: bool) {
        self.calls.push(format!("flip_v={flip}"));
    }
}

#[test]
fn idle_frames_leave_position_and_stop_sprite() {
    let mut controller = started(Vec2::new(320.0, 200.0));
    let mut sprite = SpriteState::new();
    let idle: &[Action] = &[];

    for _ in 0..10 {
        controller.update(0.016, idle, &mut sprite);
        assert_eq!(controller.position(), Vec2::new(320.0, 200.0));
        assert!(!sprite.playing);
    }
}

#[test]
fn walking_into_the_corner_stays_on_screen() {
    let mut controller = started(Vec2::new(790.0, 590.0));
    let mut sprite = SpriteState::new();

    for _ in 0..30 {
        controller.update(0.1, &[Action::MoveRight, Action::MoveDown][..], &mut sprite);
        let p = controller.position();
        assert!(p.x >= 0.0 && p.x <= 800.0);
        assert!(p.y >= 0.0 && p.y <= 600.0);
    }
    assert_eq!(controller.position(), Vec2::new(800.0, 600.0));
    // still pushing, so the sprite keeps walking
    assert!(sprite.playing);
    assert_eq!(sprite.animation, Animation::Walk);
}

#[test]
fn sprite_calls_for_each_branch() {
    let mut controller = started(Vec2::new(400.0, 300.0));

    let mut log = CallLog::default();
    controller.update(0.1, &[Action::MoveLeft][..], &mut log);
    assert_eq!(log.calls, ["play", "animation=walk", "flip_v=false", "flip_h=true"]);

    let mut log = CallLog::default();
    controller.update(0.1, &[Action::MoveDown][..], &mut log);
    assert_eq!(log.calls, ["play", "animation=up", "flip_v=true"]);

    let mut log = CallLog::default();
    let idle: &[Action] = &[];
    controller.update(0.1, idle, &mut log);
    assert_eq!(log.calls, ["stop"]);
}

#[test]
fn keyboard_driven_session() {
    let processor = InputProcessor::default();
    let mut input = InputState::new();
    let mut controller = started(Vec2::new(100.0, 100.0));
    let mut sprite = SpriteState::new();

    input.process_event(&InputEvent::KeyDown("d".to_string()));
    controller.update(0.1, &processor.view(&input), &mut sprite);
    assert!((controller.position() - Vec2::new(140.0, 100.0)).length() < EPS);

    input.process_event(&InputEvent::KeyUp("d".to_string()));
    input.process_event(&InputEvent::KeyDown("ArrowUp".to_string()));
    controller.update(0.1, &processor.view(&input), &mut sprite);
    assert!((controller.position() - Vec2::new(140.0, 60.0)).length() < EPS);
    assert_eq!(sprite.animation, Animation::Up);
    assert!(!sprite.flip_v);
    assert!(!sprite.flip_h);
}

#[test]
fn configured_speed_drives_the_controller() {
    let config = PlayerConfig::from_json(r#"{ "speed": 100 }"#).expect("valid config");
    let mut controller = PlayerController::new(config.speed).expect("validated speed");
    controller.ready(Vec2::new(800.0, 600.0));
    controller.start(Vec2::new(400.0, 300.0));

    let mut sprite = SpriteState::new();
    controller.update(0.5, &[Action::MoveUp][..], &mut sprite);
    assert!((controller.position() - Vec2::new(400.0, 250.0)).length() < EPS);
}

#[test]
fn hidden_player_still_moves() {
    let mut controller = PlayerController::default();
    controller.ready(Vec2::new(800.0, 600.0));
    assert!(!controller.player().is_visible());

    let mut sprite = SpriteState::new();
    controller.update(0.1, &[Action::MoveRight][..], &mut sprite);
    assert!((controller.position().x - 40.0).abs() < EPS);

    controller.show();
    assert!(controller.player().is_visible());
    controller.hide();
    assert!(!controller.player().is_visible());
}
