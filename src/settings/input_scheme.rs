//! Per-player input devices and binding tables
//!
//! Each device kind walks a fixed, ordered list of input elements during
//! control configuration. The lists here are the single source for both the
//! configuration wizard's step count and the default bindings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of local players the menu configures
pub const MAX_PLAYERS: usize = 4;

/// Number of game controllers a device can refer to
pub const MAX_GAMEPADS: u8 = 4;

/// Physical device a player uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputDevice {
    Keyboard,
    /// Mouse plus keyboard
    Mouse,
    /// Game controller by index (0-3)
    Gamepad(u8),
}

impl InputDevice {
    /// Cycle order used by the Next/Prev buttons
    pub fn all() -> Vec<InputDevice> {
        let mut devices = vec![InputDevice::Keyboard, InputDevice::Mouse];
        devices.extend((0..MAX_GAMEPADS).map(InputDevice::Gamepad));
        devices
    }

    /// Next device in cycle order (wraps)
    pub fn next(self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|&d| d == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// Previous device in cycle order (wraps)
    pub fn previous(self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|&d| d == self).unwrap_or(0);
        all[(index + all.len() - 1) % all.len()]
    }

    pub fn label(self) -> String {
        match self {
            InputDevice::Keyboard => "Keyboard Only".to_string(),
            InputDevice::Mouse => "Mouse + Keyboard".to_string(),
            InputDevice::Gamepad(index) => format!("Gamepad {}", index + 1),
        }
    }
}

/// Layout family of a game controller, chosen at the start of configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadType {
    DPad,
    DualAnalog,
    Xbox360,
}

impl GamepadType {
    pub const ALL: [GamepadType; 3] = [GamepadType::DPad, GamepadType::DualAnalog, GamepadType::Xbox360];

    pub fn label(self) -> &'static str {
        match self {
            GamepadType::DPad => "D-Pad",
            GamepadType::DualAnalog => "Dual Analog",
            GamepadType::Xbox360 => "Xbox 360",
        }
    }
}

/// Shape of the analog stick dead zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeadZoneShape {
    #[default]
    Circle,
    Square,
}

/// Game input an input can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InputElement {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    AimUp,
    AimDown,
    AimLeft,
    AimRight,
    Fire,
    Aim,
    PieMenu,
    Jump,
    Crouch,
    NextActor,
    PrevActor,
    WeaponChangeNext,
    WeaponChangePrev,
    WeaponPickup,
    WeaponDrop,
    WeaponReload,
    Start,
    Back,
}

impl InputElement {
    /// Instruction shown while waiting for this element's input
    pub fn prompt(self) -> &'static str {
        match self {
            InputElement::MoveUp => "Press the key for MOVE UP / JUMP",
            InputElement::MoveDown => "Press the key for MOVE DOWN / CROUCH",
            InputElement::MoveLeft => "Press the key for MOVE LEFT",
            InputElement::MoveRight => "Press the key for MOVE RIGHT",
            InputElement::AimUp => "Press the input for AIM UP",
            InputElement::AimDown => "Press the input for AIM DOWN",
            InputElement::AimLeft => "Press the input for AIM LEFT",
            InputElement::AimRight => "Press the input for AIM RIGHT",
            InputElement::Fire => "Press the input for FIRE / ACTIVATE",
            InputElement::Aim => "Press the input for SHARP AIM",
            InputElement::PieMenu => "Press the input for the COMMAND MENU",
            InputElement::Jump => "Press the input for JUMP",
            InputElement::Crouch => "Press the input for CROUCH",
            InputElement::NextActor => "Press the input for NEXT BODY",
            InputElement::PrevActor => "Press the input for PREVIOUS BODY",
            InputElement::WeaponChangeNext => "Press the input for NEXT WEAPON",
            InputElement::WeaponChangePrev => "Press the input for PREVIOUS WEAPON",
            InputElement::WeaponPickup => "Press the input for PICK UP",
            InputElement::WeaponDrop => "Press the input for DROP",
            InputElement::WeaponReload => "Press the input for RELOAD",
            InputElement::Start => "Press the START button",
            InputElement::Back => "Press the BACK button",
        }
    }
}

/// The binding table a configuration run walks through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeKind {
    Keyboard,
    Mouse,
    Gamepad(GamepadType),
}

impl SchemeKind {
    /// Scheme for a device; gamepads need their type to be known
    pub fn for_device(device: InputDevice, gamepad_type: Option<GamepadType>) -> Option<Self> {
        match device {
            InputDevice::Keyboard => Some(SchemeKind::Keyboard),
            InputDevice::Mouse => Some(SchemeKind::Mouse),
            InputDevice::Gamepad(_) => gamepad_type.map(SchemeKind::Gamepad),
        }
    }

    /// Ordered elements configured for this scheme, one per wizard step
    pub fn steps(self) -> &'static [InputElement] {
        use InputElement::*;
        match self {
            SchemeKind::Keyboard => &[
                MoveUp, MoveDown, MoveLeft, MoveRight, Fire, Aim, AimUp, AimDown, PieMenu, Jump,
                Crouch, NextActor, PrevActor, WeaponReload, WeaponPickup, WeaponDrop,
            ],
            SchemeKind::Mouse => &[
                MoveUp, MoveDown, MoveLeft, MoveRight, Fire, PieMenu, Jump, Crouch, NextActor,
                PrevActor, WeaponReload,
            ],
            SchemeKind::Gamepad(GamepadType::DPad) => &[
                MoveUp, MoveDown, MoveLeft, MoveRight, Fire, Aim, PieMenu, Jump, Crouch, NextActor,
                PrevActor, Start, Back,
            ],
            SchemeKind::Gamepad(GamepadType::DualAnalog | GamepadType::Xbox360) => &[
                MoveUp, MoveDown, MoveLeft, MoveRight, AimUp, AimDown, AimLeft, AimRight, Fire,
                PieMenu, Jump, Crouch, NextActor, PrevActor, WeaponChangeNext, WeaponChangePrev,
                WeaponReload, Start, Back,
            ],
        }
    }

    /// Bindings restored by the Default button
    pub fn default_bindings(self) -> BTreeMap<InputElement, String> {
        let inputs: &[&str] = match self {
            SchemeKind::Keyboard => &[
                "Key:W", "Key:S", "Key:A", "Key:D", "Key:J", "Key:K", "Key:Up", "Key:Down",
                "Key:L", "Key:Space", "Key:C", "Key:E", "Key:Q", "Key:R", "Key:F", "Key:G",
            ],
            SchemeKind::Mouse => &[
                "Key:W", "Key:S", "Key:A", "Key:D", "Mouse:Left", "Mouse:Right", "Key:Space",
                "Key:C", "Key:E", "Key:Q", "Key:R",
            ],
            SchemeKind::Gamepad(GamepadType::DPad) => &[
                "Pad:DPadUp", "Pad:DPadDown", "Pad:DPadLeft", "Pad:DPadRight", "Pad:A", "Pad:X",
                "Pad:B", "Pad:Y", "Pad:LeftShoulder", "Pad:RightShoulder", "Pad:LeftStick",
                "Pad:Start", "Pad:Back",
            ],
            SchemeKind::Gamepad(GamepadType::DualAnalog | GamepadType::Xbox360) => &[
                "Axis:LeftY-", "Axis:LeftY+", "Axis:LeftX-", "Axis:LeftX+", "Axis:RightY-",
                "Axis:RightY+", "Axis:RightX-", "Axis:RightX+", "Axis:TriggerRight+", "Pad:B",
                "Pad:A", "Pad:LeftStick", "Pad:RightShoulder", "Pad:LeftShoulder", "Pad:DPadRight",
                "Pad:DPadLeft", "Pad:X", "Pad:Start", "Pad:Back",
            ],
        };

        self.steps()
            .iter()
            .zip(inputs)
            .map(|(&element, &input)| (element, input.to_string()))
            .collect()
    }
}

/// Everything the menu stores about one player's controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    pub device: InputDevice,
    pub gamepad_type: Option<GamepadType>,
    /// Dead zone radius, 0.0 to 1.0
    pub dead_zone: f32,
    pub dead_zone_shape: DeadZoneShape,
    pub bindings: BTreeMap<InputElement, String>,
}

impl PlayerInput {
    /// Default device for each player slot (0-based)
    pub fn for_player(index: usize) -> Self {
        let device = match index {
            0 => InputDevice::Mouse,
            n => InputDevice::Gamepad((n - 1).min(MAX_GAMEPADS as usize - 1) as u8),
        };
        PlayerInput {
            device,
            gamepad_type: None,
            dead_zone: 0.1,
            dead_zone_shape: DeadZoneShape::Circle,
            bindings: BTreeMap::new(),
        }
    }
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self::for_player(0)
    }
}
