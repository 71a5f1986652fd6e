//! Control configuration wizard
//!
//! Walks one player's device through its binding steps. Gamepads start with a
//! type pick because the step list depends on the layout. Bindings are edited
//! on a copy and only written back to the player's settings once the wizard
//! finishes.

use crate::settings::{GamepadType, InputDevice, InputElement, PlayerInput, SchemeKind};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    PickGamepadType,
    Binding { scheme: SchemeKind, step: usize },
    Done,
}

#[derive(Debug, Clone)]
pub struct ConfigWizard {
    player: usize,
    device: InputDevice,
    gamepad_type: Option<GamepadType>,
    stage: WizardStage,
    bindings: BTreeMap<InputElement, String>,
}

impl ConfigWizard {
    /// Begins configuring `player` with their current settings
    pub fn start(player: usize, input: &PlayerInput) -> Self {
        let stage = match input.device {
            InputDevice::Keyboard => WizardStage::Binding { scheme: SchemeKind::Keyboard, step: 0 },
            InputDevice::Mouse => WizardStage::Binding { scheme: SchemeKind::Mouse, step: 0 },
            InputDevice::Gamepad(_) => WizardStage::PickGamepadType,
        };
        ConfigWizard {
            player,
            device: input.device,
            gamepad_type: input.gamepad_type,
            stage,
            bindings: input.bindings.clone(),
        }
    }

    pub fn player(&self) -> usize {
        self.player
    }

    pub fn device(&self) -> InputDevice {
        self.device
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn is_done(&self) -> bool {
        self.stage == WizardStage::Done
    }

    pub fn choose_gamepad_type(&mut self, gamepad_type: GamepadType) {
        if self.stage == WizardStage::PickGamepadType {
            self.gamepad_type = Some(gamepad_type);
            self.stage = WizardStage::Binding { scheme: SchemeKind::Gamepad(gamepad_type), step: 0 };
        }
    }

    /// Element waiting for input, if on a binding step
    pub fn current_element(&self) -> Option<InputElement> {
        match self.stage {
            WizardStage::Binding { scheme, step } => scheme.steps().get(step).copied(),
            _ => None,
        }
    }

    /// Input currently bound to `element` in this run
    pub fn binding(&self, element: InputElement) -> Option<&str> {
        self.bindings.get(&element).map(String::as_str)
    }

    /// "Step 3 of 16" style progress text
    pub fn step_label(&self) -> String {
        match self.stage {
            WizardStage::PickGamepadType => "Select your gamepad type".to_string(),
            WizardStage::Binding { scheme, step } => {
                format!("Step {} of {}", step + 1, scheme.steps().len())
            }
            WizardStage::Done => "Configuration complete".to_string(),
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match (self.device, self.gamepad_type) {
            (InputDevice::Keyboard, _) => "Keyboard only play is hard; a mouse is recommended",
            (InputDevice::Mouse, _) => "Mouse aims, keyboard moves",
            (InputDevice::Gamepad(_), Some(GamepadType::DPad)) => "Digital pads cannot aim precisely",
            (InputDevice::Gamepad(_), _) => "Dual analog pads are recommended",
        }
    }

    /// Binds the current element and moves on; false if nothing was waiting
    pub fn bind(&mut self, input: &str) -> bool {
        let Some(element) = self.current_element() else {
            return false;
        };
        self.bindings.insert(element, input.to_string());
        self.advance();
        true
    }

    /// Moves on without binding
    pub fn skip(&mut self) {
        if self.current_element().is_some() {
            self.advance();
        }
    }

    /// Steps back; false when already at the start and the wizard should close
    pub fn back(&mut self) -> bool {
        match self.stage {
            WizardStage::Binding { scheme, step } if step > 0 => {
                self.stage = WizardStage::Binding { scheme, step: step - 1 };
                true
            }
            WizardStage::Binding { scheme: SchemeKind::Gamepad(_), .. } => {
                self.stage = WizardStage::PickGamepadType;
                true
            }
            _ => false,
        }
    }

    /// Restores the scheme's default bindings and finishes
    pub fn apply_defaults(&mut self) {
        let scheme = match self.stage {
            WizardStage::Binding { scheme, .. } => Some(scheme),
            _ => SchemeKind::for_device(self.device, self.gamepad_type),
        };
        if let Some(scheme) = scheme {
            self.bindings = scheme.default_bindings();
            self.stage = WizardStage::Done;
        }
    }

    /// Writes the result into the player's settings
    pub fn apply(&self, input: &mut PlayerInput) {
        input.bindings = self.bindings.clone();
        if matches!(self.device, InputDevice::Gamepad(_)) {
            input.gamepad_type = self.gamepad_type;
        }
    }

    fn advance(&mut self) {
        if let WizardStage::Binding { scheme, step } = self.stage {
            self.stage = if step + 1 >= scheme.steps().len() {
                WizardStage::Done
            } else {
                WizardStage::Binding { scheme, step: step + 1 }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(device: InputDevice) -> PlayerInput {
        PlayerInput {
            device,
            ..PlayerInput::default()
        }
    }

    fn steps_until_done(wizard: &mut ConfigWizard) -> usize {
        let mut count = 0;
        while !wizard.is_done() {
            assert!(wizard.bind(&format!("Key:{}", count)));
            count += 1;
        }
        count
    }

    #[test]
    fn test_keyboard_has_sixteen_steps() {
        let mut wizard = ConfigWizard::start(0, &input(InputDevice::Keyboard));
        assert_eq!(wizard.step_label(), "Step 1 of 16");
        assert_eq!(steps_until_done(&mut wizard), 16);
    }

    #[test]
    fn test_mouse_has_eleven_steps() {
        let mut wizard = ConfigWizard::start(0, &input(InputDevice::Mouse));
        assert_eq!(steps_until_done(&mut wizard), 11);
    }

    #[test]
    fn test_gamepad_picks_type_first() {
        let mut wizard = ConfigWizard::start(1, &input(InputDevice::Gamepad(0)));
        assert_eq!(wizard.stage(), WizardStage::PickGamepadType);
        assert!(!wizard.bind("Pad:A"));

        wizard.choose_gamepad_type(GamepadType::DPad);
        assert_eq!(steps_until_done(&mut wizard), 13);

        let mut wizard = ConfigWizard::start(1, &input(InputDevice::Gamepad(0)));
        wizard.choose_gamepad_type(GamepadType::Xbox360);
        assert_eq!(steps_until_done(&mut wizard), 19);
    }

    #[test]
    fn test_back_returns_to_type_pick_then_closes() {
        let mut wizard = ConfigWizard::start(1, &input(InputDevice::Gamepad(2)));
        wizard.choose_gamepad_type(GamepadType::DualAnalog);
        wizard.skip();
        assert!(wizard.back());
        assert_eq!(wizard.current_element(), Some(InputElement::MoveUp));
        assert!(wizard.back());
        assert_eq!(wizard.stage(), WizardStage::PickGamepadType);
        assert!(!wizard.back());
    }

    #[test]
    fn test_skip_leaves_binding_untouched() {
        let mut wizard = ConfigWizard::start(0, &input(InputDevice::Mouse));
        wizard.skip();
        wizard.bind("Key:Down");
        let mut result = PlayerInput::default();
        wizard.apply(&mut result);
        assert!(!result.bindings.contains_key(&InputElement::MoveUp));
        assert_eq!(result.bindings[&InputElement::MoveDown], "Key:Down");
    }

    #[test]
    fn test_defaults_finish_wizard() {
        let mut wizard = ConfigWizard::start(1, &input(InputDevice::Gamepad(0)));
        wizard.choose_gamepad_type(GamepadType::DPad);
        wizard.apply_defaults();
        assert!(wizard.is_done());

        let mut result = input(InputDevice::Gamepad(0));
        wizard.apply(&mut result);
        assert_eq!(result.gamepad_type, Some(GamepadType::DPad));
        assert_eq!(result.bindings.len(), 13);
        assert_eq!(result.bindings[&InputElement::Fire], "Pad:A");
    }
}
