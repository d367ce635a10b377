use crate::input::Action;
use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use iced::futures::sink::SinkExt;
use iced::Subscription;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{error, info};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const REPEAT_DELAY: Duration = Duration::from_millis(400);
const REPEAT_INTERVAL: Duration = Duration::from_millis(100);
const DEADZONE: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum GamepadInput {
    Press(Action),
    Release(Action),
}

#[derive(Default)]
struct AxisState {
    dir_x: i8,
    dir_y: i8,
}

/// Turns gamepad / remote buttons into launcher actions.
pub fn gamepad_subscription() -> Subscription<Action> {
    Subscription::run(|| {
        iced::stream::channel(
            100,
            |mut output: iced::futures::channel::mpsc::Sender<Action>| async move {
                let mut gilrs = match Gilrs::new() {
                    Ok(g) => g,
                    Err(e) => {
                        error!("Failed to initialize Gilrs: {}", e);
                        return;
                    }
                };

                let mut axis_states: HashMap<GamepadId, AxisState> = HashMap::new();
                let mut current_repeater: Option<(Action, Instant, Instant)> = None;

                loop {
                    while let Some(Event { id, event, .. }) = gilrs.next_event() {
                        match event {
                            EventType::Connected => {
                                info!("Gamepad connected: {}", gilrs.gamepad(id).name());
                            }
                            EventType::Disconnected => {
                                axis_states.remove(&id);
                                current_repeater = None;
                                continue;
                            }
                            _ => {}
                        }

                        let state = axis_states.entry(id).or_default();
                        match process_event(event, state) {
                            Some(GamepadInput::Press(action)) => {
                                let _ = output.send(action).await;
                                if action.repeats() {
                                    current_repeater =
                                        Some((action, Instant::now(), Instant::now()));
                                }
                            }
                            Some(GamepadInput::Release(action)) => {
                                if current_repeater.is_some_and(|(held, _, _)| held == action) {
                                    current_repeater = None;
                                }
                            }
                            None => {}
                        }
                    }

                    if let Some((action, start_time, last_emit)) = &mut current_repeater {
                        let now = Instant::now();
                        if now.duration_since(*start_time) >= REPEAT_DELAY
                            && now.duration_since(*last_emit) >= REPEAT_INTERVAL
                        {
                            let _ = output.send(*action).await;
                            *last_emit = now;
                        }
                    }

                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            },
        )
    })
}

fn map_axis_value(value: f32) -> i8 {
    if value <= -DEADZONE {
        -1
    } else if value >= DEADZONE {
        1
    } else {
        0
    }
}

fn button_action(button: Button) -> Option<Action> {
    match button {
        Button::South => Some(Action::Enter),
        Button::DPadUp => Some(Action::Up),
        Button::DPadDown => Some(Action::Down),
        Button::DPadLeft => Some(Action::Left),
        Button::DPadRight => Some(Action::Right),
        Button::LeftTrigger | Button::LeftTrigger2 => Some(Action::PageUp),
        Button::RightTrigger | Button::RightTrigger2 => Some(Action::PageDown),
        _ => None,
    }
}

/// Emits a press when the stick crosses the deadzone and a release when it returns.
fn axis_input(dir: &mut i8, value: f32, negative: Action, positive: Action) -> Option<GamepadInput> {
    let new_dir = map_axis_value(value);
    if new_dir == *dir {
        return None;
    }

    let old_dir = std::mem::replace(dir, new_dir);
    match (new_dir, old_dir) {
        (-1, _) => Some(GamepadInput::Press(negative)),
        (1, _) => Some(GamepadInput::Press(positive)),
        (0, -1) => Some(GamepadInput::Release(negative)),
        (0, 1) => Some(GamepadInput::Release(positive)),
        _ => None,
    }
}

fn process_event(event: EventType, state: &mut AxisState) -> Option<GamepadInput> {
    match event {
        EventType::ButtonPressed(button, _) => button_action(button).map(GamepadInput::Press),
        EventType::ButtonReleased(button, _) => button_action(button).map(GamepadInput::Release),
        EventType::AxisChanged(Axis::LeftStickX, value, _) => {
            axis_input(&mut state.dir_x, value, Action::Left, Action::Right)
        }
        // gilrs reports stick-up as positive Y.
        EventType::AxisChanged(Axis::LeftStickY, value, _) => {
            axis_input(&mut state.dir_y, value, Action::Down, Action::Up)
        }
        _ => None,
    }
}
