//! Closed sets of screens and controls, and the tables mapping them to widgets
//!
//! Every enum here names the controls it stands for; the layout creates
//! widgets under those names and [`ControlMap::resolve`] looks them up again
//! when the menu is created, failing if any is missing.

use crate::activity::EditorKind;
use crate::gui::{ControlManager, GuiError, WidgetId};
use crate::settings::GamepadType;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::game_config::Difficulty;

/// Mutually exclusive top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuScreen {
    /// Empty backdrop shown while the menu is disabled
    Root,
    Main,
    Players,
    Skirmish,
    Difficulty,
    Options,
    Config,
    Editor,
    WorkshopManager,
    PublishSteps,
    Credits,
    /// Campaign notice and tutorial offer
    Meta,
    Quit,
    ModManager,
}

impl MenuScreen {
    pub const ALL: [MenuScreen; 14] = [
        MenuScreen::Root,
        MenuScreen::Main,
        MenuScreen::Players,
        MenuScreen::Skirmish,
        MenuScreen::Difficulty,
        MenuScreen::Options,
        MenuScreen::Config,
        MenuScreen::Editor,
        MenuScreen::WorkshopManager,
        MenuScreen::PublishSteps,
        MenuScreen::Credits,
        MenuScreen::Meta,
        MenuScreen::Quit,
        MenuScreen::ModManager,
    ];

    /// Screens with a plain "back" button that returns to [`parent`](Self::parent)
    pub const WITH_BACK_BUTTON: [MenuScreen; 9] = [
        MenuScreen::Players,
        MenuScreen::Skirmish,
        MenuScreen::Difficulty,
        MenuScreen::Options,
        MenuScreen::Editor,
        MenuScreen::WorkshopManager,
        MenuScreen::Credits,
        MenuScreen::Meta,
        MenuScreen::ModManager,
    ];

    pub fn box_name(self) -> String {
        format!("Screen{:?}", self)
    }

    pub fn back_button_name(self) -> String {
        format!("ButtonBack{:?}", self)
    }

    /// Where "back" leads; Main and Root have no parent
    pub fn parent(self) -> Option<MenuScreen> {
        match self {
            MenuScreen::Root | MenuScreen::Main => None,
            MenuScreen::Skirmish => Some(MenuScreen::Players),
            MenuScreen::Difficulty => Some(MenuScreen::Skirmish),
            MenuScreen::Config => Some(MenuScreen::Options),
            MenuScreen::WorkshopManager => Some(MenuScreen::Editor),
            MenuScreen::PublishSteps => Some(MenuScreen::WorkshopManager),
            MenuScreen::Players
            | MenuScreen::Options
            | MenuScreen::Editor
            | MenuScreen::Credits
            | MenuScreen::Meta
            | MenuScreen::Quit
            | MenuScreen::ModManager => Some(MenuScreen::Main),
        }
    }
}

/// Buttons on the main, meta and quit screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainButton {
    Campaign,
    Skirmish,
    Multiplayer,
    Options,
    ModManager,
    Editor,
    Credits,
    Quit,
    Resume,
    PlayTutorial,
    MetaContinue,
    QuitConfirm,
    QuitCancel,
}

impl MainButton {
    pub const ALL: [MainButton; 13] = [
        MainButton::Campaign,
        MainButton::Skirmish,
        MainButton::Multiplayer,
        MainButton::Options,
        MainButton::ModManager,
        MainButton::Editor,
        MainButton::Credits,
        MainButton::Quit,
        MainButton::Resume,
        MainButton::PlayTutorial,
        MainButton::MetaContinue,
        MainButton::QuitConfirm,
        MainButton::QuitCancel,
    ];

    pub fn control_name(self) -> String {
        format!("Button{:?}", self)
    }

    /// Screen whose box holds the button
    pub fn screen(self) -> MenuScreen {
        match self {
            MainButton::PlayTutorial | MainButton::MetaContinue => MenuScreen::Meta,
            MainButton::QuitConfirm | MainButton::QuitCancel => MenuScreen::Quit,
            _ => MenuScreen::Main,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            MainButton::Campaign => "Campaign",
            MainButton::Skirmish => "Skirmish",
            MainButton::Multiplayer => "Multiplayer",
            MainButton::Options => "Options",
            MainButton::ModManager => "Mod Manager",
            MainButton::Editor => "Editors",
            MainButton::Credits => "Credits",
            MainButton::Quit => "Quit",
            MainButton::Resume => "Resume",
            MainButton::PlayTutorial => "Play Tutorial",
            MainButton::MetaContinue => "Continue",
            MainButton::QuitConfirm => "Quit",
            MainButton::QuitCancel => "Cancel",
        }
    }
}

/// Local player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
    P3,
    P4,
}

impl Player {
    pub const ALL: [Player; 4] = [Player::P1, Player::P2, Player::P3, Player::P4];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn number(self) -> usize {
        self.index() + 1
    }
}

/// Buttons on the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsButton {
    Fullscreen,
    NextDevice(Player),
    PrevDevice(Player),
    Configure(Player),
    Clear(Player),
}

impl OptionsButton {
    pub fn all() -> Vec<OptionsButton> {
        let mut all = vec![OptionsButton::Fullscreen];
        for player in Player::ALL {
            all.extend([
                OptionsButton::NextDevice(player),
                OptionsButton::PrevDevice(player),
                OptionsButton::Configure(player),
                OptionsButton::Clear(player),
            ]);
        }
        all
    }

    pub fn control_name(self) -> String {
        match self {
            OptionsButton::Fullscreen => "ButtonFullscreen".to_string(),
            OptionsButton::NextDevice(p) => format!("ButtonP{}NextDevice", p.number()),
            OptionsButton::PrevDevice(p) => format!("ButtonP{}PrevDevice", p.number()),
            OptionsButton::Configure(p) => format!("ButtonP{}Config", p.number()),
            OptionsButton::Clear(p) => format!("ButtonP{}Clear", p.number()),
        }
    }
}

/// Gameplay checkboxes on the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsCheckbox {
    FlashOnBrainDamage,
    BlipOnRevealUnseen,
    ShowForeignItems,
    ShowToolTips,
    PreciseCollisions,
}

impl OptionsCheckbox {
    pub const ALL: [OptionsCheckbox; 5] = [
        OptionsCheckbox::FlashOnBrainDamage,
        OptionsCheckbox::BlipOnRevealUnseen,
        OptionsCheckbox::ShowForeignItems,
        OptionsCheckbox::ShowToolTips,
        OptionsCheckbox::PreciseCollisions,
    ];

    pub fn control_name(self) -> String {
        format!("Check{:?}", self)
    }

    pub fn text(self) -> &'static str {
        match self {
            OptionsCheckbox::FlashOnBrainDamage => "Red flash when brain is damaged",
            OptionsCheckbox::BlipOnRevealUnseen => "Blip when unseen areas are revealed",
            OptionsCheckbox::ShowForeignItems => "Show items from other factions",
            OptionsCheckbox::ShowToolTips => "Show tooltips",
            OptionsCheckbox::PreciseCollisions => "Precise collisions",
        }
    }
}

/// Labels on the control configuration screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigLabel {
    Title,
    Recommendation,
    Instruction,
    Input,
    Steps,
}

impl ConfigLabel {
    pub const ALL: [ConfigLabel; 5] = [
        ConfigLabel::Title,
        ConfigLabel::Recommendation,
        ConfigLabel::Instruction,
        ConfigLabel::Input,
        ConfigLabel::Steps,
    ];

    pub fn control_name(self) -> String {
        format!("LabelConfig{:?}", self)
    }
}

/// Buttons on the editor screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorButton {
    Launch(EditorKind),
    WorkshopPublish,
}

impl EditorButton {
    pub const ALL: [EditorButton; 6] = [
        EditorButton::Launch(EditorKind::Scene),
        EditorButton::Launch(EditorKind::Area),
        EditorButton::Launch(EditorKind::Assembly),
        EditorButton::Launch(EditorKind::Gib),
        EditorButton::Launch(EditorKind::Actor),
        EditorButton::WorkshopPublish,
    ];

    pub fn control_name(self) -> String {
        match self {
            EditorButton::Launch(kind) => format!("Button{:?}Editor", kind),
            EditorButton::WorkshopPublish => "ButtonWorkshopPublish".to_string(),
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            EditorButton::Launch(kind) => kind.label(),
            EditorButton::WorkshopPublish => "Workshop Publish",
        }
    }
}

/// Steps of the publish wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PublishStep {
    #[default]
    First,
    Description,
    Tags,
    Agreement,
    Last,
}

impl PublishStep {
    pub const ALL: [PublishStep; 5] = [
        PublishStep::First,
        PublishStep::Description,
        PublishStep::Tags,
        PublishStep::Agreement,
        PublishStep::Last,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// One step forward, clamped at Last
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// One step back, clamped at First
    pub fn previous(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn box_name(self) -> String {
        format!("BoxPublish{:?}", self)
    }

    pub fn header(self) -> &'static str {
        match self {
            PublishStep::First => "Step 1: Choose what to publish",
            PublishStep::Description => "Step 2: Title and description",
            PublishStep::Tags => "Step 3: Tags",
            PublishStep::Agreement => "Step 4: Agreement",
            PublishStep::Last => "Step 5: Publishing",
        }
    }
}

/// Workshop tags the publisher can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PublishTag {
    Actors,
    Weapons,
    Tools,
    Craft,
    Bunker,
    Scenes,
    Activities,
    Tech,
    Vanilla,
    Friends,
}

impl PublishTag {
    pub const ALL: [PublishTag; 10] = [
        PublishTag::Actors,
        PublishTag::Weapons,
        PublishTag::Tools,
        PublishTag::Craft,
        PublishTag::Bunker,
        PublishTag::Scenes,
        PublishTag::Activities,
        PublishTag::Tech,
        PublishTag::Vanilla,
        PublishTag::Friends,
    ];

    pub fn control_name(self) -> String {
        format!("CheckTag{:?}", self)
    }

    /// Tag string as submitted
    pub fn tag(self) -> &'static str {
        match self {
            PublishTag::Actors => "Actors",
            PublishTag::Weapons => "Weapons",
            PublishTag::Tools => "Tools",
            PublishTag::Craft => "Craft",
            PublishTag::Bunker => "Bunker Modules",
            PublishTag::Scenes => "Scenes",
            PublishTag::Activities => "Activities",
            PublishTag::Tech => "Tech",
            PublishTag::Vanilla => "Vanilla",
            PublishTag::Friends => "Friends",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.tag() == tag)
    }
}

pub fn difficulty_button_name(difficulty: Difficulty) -> String {
    format!("ButtonDifficulty{:?}", difficulty)
}

pub fn gamepad_type_button_name(gamepad_type: GamepadType) -> String {
    format!("ButtonGamepad{:?}", gamepad_type)
}

/// Mapping from a closed set of keys to widgets, complete by construction
#[derive(Debug, Clone)]
pub struct ControlMap<K> {
    ids: HashMap<K, WidgetId>,
    keys: HashMap<WidgetId, K>,
}

impl<K: Copy + Eq + Hash + Debug> ControlMap<K> {
    /// Looks up one control of `kind` per key, failing on the first missing one
    pub fn resolve(
        gui: &ControlManager,
        keys: &[K],
        kind: &'static str,
        name: impl Fn(K) -> String,
    ) -> Result<Self, GuiError> {
        let mut map = ControlMap {
            ids: HashMap::with_capacity(keys.len()),
            keys: HashMap::with_capacity(keys.len()),
        };
        for &key in keys {
            let id = gui.id_of_kind(&name(key), kind)?;
            map.ids.insert(key, id);
            map.keys.insert(id, key);
        }
        Ok(map)
    }

    /// Widget for a key that was part of the resolved set
    pub fn get(&self, key: K) -> WidgetId {
        self.ids[&key]
    }

    /// Reverse lookup from an event's widget
    pub fn key_of(&self, id: WidgetId) -> Option<K> {
        self.keys.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, WidgetId)> + '_ {
        self.ids.iter().map(|(&k, &id)| (k, id))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
