use sdl2::controller::{Axis, Button};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// Axis travel (out of i16::MAX) that counts as a deliberate stick push
const AXIS_BIND_THRESHOLD: i16 = 24_000;

/// Actions the player can perform in the menu
///
/// This enum decouples raw input (keyboard, mouse, game controllers) from the
/// menu logic. The menu never sees SDL2 events, only these.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    // === Focus Navigation ===
    Up,
    Down,
    Left(bool),  // bool = shift held (for larger increments)
    Right(bool), // bool = shift held
    Confirm,
    Back,

    // === Pointer ===
    Click(i32, i32), // x, y in logical coordinates

    // === Text Entry ===
    Char(char),
    Backspace,

    // === Control Configuration ===
    /// A raw input captured for a binding, e.g. "Key:W" or "Pad:A"
    Bind(String),

    // === System ===
    Quit,
}

/// Input context determines how raw input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Arrow keys move focus, Enter activates
    Navigation,
    /// A text box has focus, typed characters are forwarded
    TextEntry,
    /// The control configuration screen is waiting for an input to bind
    Binding,
}

/// InputSystem processes SDL2 events and produces MenuActions
///
/// Input processing happens in phases:
/// 1. Determine current InputContext (from the menu's focus/binding state)
/// 2. Poll SDL2 events
/// 3. Translate events to MenuActions according to the context
/// 4. Return actions to the host loop, which hands them to the menu
pub struct InputSystem {
    /// Current input context
    pub context: InputContext,
}

impl InputSystem {
    /// Creates a new InputSystem starting in Navigation context
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::Navigation,
        }
    }

    /// Update the input context from the menu state
    ///
    /// Binding takes priority: while a binding step is waiting, every key is
    /// captured, including ones that would normally type into a text box.
    pub fn update_context(&mut self, binding_active: bool, text_focused: bool) {
        self.context = if binding_active {
            InputContext::Binding
        } else if text_focused {
            InputContext::TextEntry
        } else {
            InputContext::Navigation
        };
    }

    /// Process SDL2 events and return list of actions to handle
    pub fn poll_events(&self, event_pump: &mut EventPump, shift_held: bool) -> Vec<MenuAction> {
        let mut actions = Vec::new();
        for event in event_pump.poll_iter() {
            self.translate(&event, shift_held, &mut actions);
        }
        actions
    }

    /// Translate a single SDL2 event into zero or more actions
    pub fn translate(&self, event: &Event, shift_held: bool, actions: &mut Vec<MenuAction>) {
        match event {
            Event::Quit { .. } => actions.push(MenuAction::Quit),
            Event::KeyDown {
                keycode: Some(key), ..
            } => self.handle_keydown(*key, shift_held, actions),
            Event::TextInput { text, .. } => {
                if self.context == InputContext::TextEntry {
                    actions.extend(text.chars().map(MenuAction::Char));
                }
            }
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => self.handle_mouse_down(*mouse_btn, *x, *y, actions),
            Event::ControllerButtonDown { button, .. } => {
                self.handle_controller_button(*button, actions);
            }
            Event::ControllerAxisMotion { axis, value, .. } => {
                self.handle_controller_axis(*axis, *value, actions);
            }
            _ => {
                // Ignore other event types
            }
        }
    }

    fn handle_keydown(&self, key: Keycode, shift_held: bool, actions: &mut Vec<MenuAction>) {
        match self.context {
            InputContext::Binding => match key {
                Keycode::Escape => actions.push(MenuAction::Back),
                other => actions.push(MenuAction::Bind(format!("Key:{}", other.name()))),
            },
            InputContext::TextEntry => match key {
                Keycode::Backspace => actions.push(MenuAction::Backspace),
                Keycode::Escape => actions.push(MenuAction::Back),
                Keycode::Up => actions.push(MenuAction::Up),
                Keycode::Down | Keycode::Tab => actions.push(MenuAction::Down),
                Keycode::Return => actions.push(MenuAction::Char('\n')),
                _ => {
                    // Printable keys arrive as TextInput events
                }
            },
            InputContext::Navigation => match key {
                Keycode::Up => actions.push(MenuAction::Up),
                Keycode::Down | Keycode::Tab => actions.push(MenuAction::Down),
                Keycode::Left => actions.push(MenuAction::Left(shift_held)),
                Keycode::Right => actions.push(MenuAction::Right(shift_held)),
                Keycode::Return | Keycode::Space => actions.push(MenuAction::Confirm),
                Keycode::Escape | Keycode::Backspace => actions.push(MenuAction::Back),
                _ => {
                    // Other keys ignored
                }
            },
        }
    }

    fn handle_mouse_down(&self, button: MouseButton, x: i32, y: i32, actions: &mut Vec<MenuAction>) {
        match button {
            MouseButton::Left => actions.push(MenuAction::Click(x, y)),
            other if self.context == InputContext::Binding => {
                actions.push(MenuAction::Bind(format!("Mouse:{:?}", other)));
            }
            _ => {
                // Ignore other mouse buttons
            }
        }
    }

    fn handle_controller_button(&self, button: Button, actions: &mut Vec<MenuAction>) {
        if self.context == InputContext::Binding {
            match button {
                Button::Back => actions.push(MenuAction::Back),
                other => actions.push(MenuAction::Bind(format!("Pad:{:?}", other))),
            }
            return;
        }

        match button {
            Button::DPadUp => actions.push(MenuAction::Up),
            Button::DPadDown => actions.push(MenuAction::Down),
            Button::DPadLeft => actions.push(MenuAction::Left(false)),
            Button::DPadRight => actions.push(MenuAction::Right(false)),
            Button::A | Button::Start => actions.push(MenuAction::Confirm),
            Button::B | Button::Back => actions.push(MenuAction::Back),
            _ => {}
        }
    }

    fn handle_controller_axis(&self, axis: Axis, value: i16, actions: &mut Vec<MenuAction>) {
        if self.context != InputContext::Binding || value.unsigned_abs() < AXIS_BIND_THRESHOLD as u16 {
            return;
        }
        let direction = if value > 0 { '+' } else { '-' };
        actions.push(MenuAction::Bind(format!("Axis:{:?}{}", axis, direction)));
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Mod;

    fn key_event(key: Keycode) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(key),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    fn translate(input: &InputSystem, event: Event) -> Vec<MenuAction> {
        let mut actions = Vec::new();
        input.translate(&event, false, &mut actions);
        actions
    }

    #[test]
    fn test_input_system_creation() {
        let input = InputSystem::new();
        assert_eq!(input.context, InputContext::Navigation);
    }

    #[test]
    fn test_context_priority() {
        let mut input = InputSystem::new();

        input.update_context(false, true);
        assert_eq!(input.context, InputContext::TextEntry);

        // Binding wins over a focused text box
        input.update_context(true, true);
        assert_eq!(input.context, InputContext::Binding);

        input.update_context(false, false);
        assert_eq!(input.context, InputContext::Navigation);
    }

    #[test]
    fn test_navigation_keys() {
        let input = InputSystem::new();
        assert_eq!(translate(&input, key_event(Keycode::Up)), vec![MenuAction::Up]);
        assert_eq!(translate(&input, key_event(Keycode::Return)), vec![MenuAction::Confirm]);
        assert_eq!(translate(&input, key_event(Keycode::Escape)), vec![MenuAction::Back]);
        assert!(translate(&input, key_event(Keycode::W)).is_empty());
    }

    #[test]
    fn test_binding_captures_keys() {
        let mut input = InputSystem::new();
        input.update_context(true, false);

        assert_eq!(
            translate(&input, key_event(Keycode::W)),
            vec![MenuAction::Bind("Key:W".to_string())]
        );
        // Escape still backs out of the binding step
        assert_eq!(translate(&input, key_event(Keycode::Escape)), vec![MenuAction::Back]);
    }

    #[test]
    fn test_text_input_only_in_text_context() {
        let mut input = InputSystem::new();
        let typed = Event::TextInput {
            timestamp: 0,
            window_id: 0,
            text: "hi".to_string(),
        };

        assert!(translate(&input, typed.clone()).is_empty());

        input.update_context(false, true);
        assert_eq!(
            translate(&input, typed),
            vec![MenuAction::Char('h'), MenuAction::Char('i')]
        );
    }

    #[test]
    fn test_menu_action_equality() {
        assert_eq!(MenuAction::Click(1, 2), MenuAction::Click(1, 2));
        assert_ne!(MenuAction::Left(false), MenuAction::Left(true));
    }
}
