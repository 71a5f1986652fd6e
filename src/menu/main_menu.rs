//! Main Menu Controller
//!
//! Drives every menu screen from the widgets a [`ControlManager`] owns.
//!
//! # Frame flow
//!
//! 1. The host forwards translated input with [`MainMenu::handle_input`]
//! 2. [`MainMenu::update`] advances the fade, drains GUI events, applies them
//!    to the pending game config or the settings and returns at most one
//!    [`MenuEvent`]
//! 3. [`MainMenu::draw`] renders the GUI at the fader's opacity
//!
//! Only one screen's box is visible at a time; everything on a screen is a
//! child of its box, so switching screens is a matter of toggling the boxes.

use super::blink::{BlinkNotice, Blinker};
use super::config_wizard::{ConfigWizard, WizardStage};
use super::error::MenuError;
use super::event::MenuEvent;
use super::fader::{Fader, VisibilityState};
use super::game_config::{Difficulty, PendingGameConfig};
use super::ids::*;
use super::layout::*;
use super::mod_manager::{make_mod_string, make_script_string, ModList};
use super::options;
use super::publish::{
    ProgressQueue, ProgressReport, PublishError, PublishProgress, PublishWizard, PublishingBackend,
};
use crate::activity::ActivityRequest;
use crate::audio::{AudioSink, SoundCue};
use crate::gui::{render_gui, ControlManager, GuiError, GuiEvent, GuiEventKind, GuiStyle, WidgetId};
use crate::input_system::MenuAction;
use crate::modules::{ModuleRegistry, SceneInfo};
use crate::settings::{DeadZoneShape, GamepadType, InputDevice, MenuSettings, Resolution, SettingsManager};
use log::{debug, info, warn};
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::collections::BTreeSet;

/// Seconds between credit scroll steps
const CREDITS_SCROLL_INTERVAL: f32 = 0.75;

/// Collaborators the menu talks to
pub struct MenuServices {
    pub audio: Box<dyn AudioSink>,
    pub modules: Box<dyn ModuleRegistry>,
    pub publisher: Box<dyn PublishingBackend>,
    /// Where changed settings are saved; None keeps them in memory only
    pub settings_store: Option<SettingsManager>,
}

/// Every widget the menu touches, resolved once by name
struct Controls {
    screens: ControlMap<MenuScreen>,
    back_buttons: ControlMap<MenuScreen>,
    main_buttons: ControlMap<MainButton>,
    promo_button: WidgetId,

    players_buttons: ControlMap<Player>,
    team_labels: ControlMap<Player>,
    team_buttons: ControlMap<Player>,
    scene_combo: WidgetId,
    scene_description: WidgetId,
    cpu_team_button: WidgetId,
    cpu_team_label: WidgetId,
    skirmish_next: WidgetId,

    funds_slider: WidgetId,
    funds_label: WidgetId,
    difficulty_buttons: ControlMap<Difficulty>,
    difficulty_label: WidgetId,
    start_skirmish: WidgetId,

    options_buttons: ControlMap<OptionsButton>,
    options_checkboxes: ControlMap<OptionsCheckbox>,
    resolution_combo: WidgetId,
    resolution_restart: WidgetId,
    music_slider: WidgetId,
    music_label: WidgetId,
    sound_slider: WidgetId,
    sound_label: WidgetId,
    device_labels: ControlMap<Player>,
    dead_zone_sliders: ControlMap<Player>,
    dead_zone_labels: ControlMap<Player>,
    dead_zone_shapes: ControlMap<Player>,

    config_labels: ControlMap<ConfigLabel>,
    gamepad_type_buttons: ControlMap<GamepadType>,
    config_skip: WidgetId,
    config_back: WidgetId,
    config_default: WidgetId,

    editor_buttons: ControlMap<EditorButton>,

    unpublished_list: WidgetId,
    published_list: WidgetId,
    publish_new: WidgetId,
    publish_update: WidgetId,
    workshop_info: WidgetId,

    publish_steps: ControlMap<PublishStep>,
    publish_tags: ControlMap<PublishTag>,
    publish_header: WidgetId,
    publish_module_combo: WidgetId,
    publish_title: WidgetId,
    publish_description: WidgetId,
    publish_status: WidgetId,
    publish_result: WidgetId,
    publish_back: WidgetId,
    publish_next: WidgetId,
    publish_cancel: WidgetId,

    credits_list: WidgetId,

    mods_list: WidgetId,
    scripts_list: WidgetId,
    toggle_mod: WidgetId,
    toggle_script: WidgetId,
    mod_description: WidgetId,
}

impl Controls {
    fn resolve(gui: &ControlManager) -> Result<Self, GuiError> {
        let button = |name: &str| gui.id_of_kind(name, "button");
        let label = |name: &str| gui.id_of_kind(name, "label");
        let slider = |name: &str| gui.id_of_kind(name, "slider");
        let list = |name: &str| gui.id_of_kind(name, "list box");
        let combo = |name: &str| gui.id_of_kind(name, "combo box");
        let text_box = |name: &str| gui.id_of_kind(name, "text box");

        Ok(Controls {
            screens: ControlMap::resolve(gui, &MenuScreen::ALL, "collection box", MenuScreen::box_name)?,
            back_buttons: ControlMap::resolve(
                gui,
                &MenuScreen::WITH_BACK_BUTTON,
                "button",
                MenuScreen::back_button_name,
            )?,
            main_buttons: ControlMap::resolve(gui, &MainButton::ALL, "button", MainButton::control_name)?,
            promo_button: button(BUTTON_PROMO)?,

            players_buttons: ControlMap::resolve(gui, &Player::ALL, "button", players_button_name)?,
            team_labels: ControlMap::resolve(gui, &Player::ALL, "label", team_label_name)?,
            team_buttons: ControlMap::resolve(gui, &Player::ALL, "button", team_button_name)?,
            scene_combo: combo(COMBO_SCENE)?,
            scene_description: label(LABEL_SCENE_DESCRIPTION)?,
            cpu_team_button: button(BUTTON_CPU_TEAM)?,
            cpu_team_label: label(LABEL_CPU_TEAM)?,
            skirmish_next: button(BUTTON_SKIRMISH_NEXT)?,

            funds_slider: slider(SLIDER_FUNDS)?,
            funds_label: label(LABEL_FUNDS)?,
            difficulty_buttons: ControlMap::resolve(gui, &Difficulty::ALL, "button", difficulty_button_name)?,
            difficulty_label: label(LABEL_DIFFICULTY)?,
            start_skirmish: button(BUTTON_START_SKIRMISH)?,

            options_buttons: ControlMap::resolve(gui, &OptionsButton::all(), "button", OptionsButton::control_name)?,
            options_checkboxes: ControlMap::resolve(
                gui,
                &OptionsCheckbox::ALL,
                "checkbox",
                OptionsCheckbox::control_name,
            )?,
            resolution_combo: combo(COMBO_RESOLUTION)?,
            resolution_restart: label(LABEL_RESOLUTION_RESTART)?,
            music_slider: slider(SLIDER_MUSIC_VOLUME)?,
            music_label: label(LABEL_MUSIC_VOLUME)?,
            sound_slider: slider(SLIDER_SOUND_VOLUME)?,
            sound_label: label(LABEL_SOUND_VOLUME)?,
            device_labels: ControlMap::resolve(gui, &Player::ALL, "label", device_label_name)?,
            dead_zone_sliders: ControlMap::resolve(gui, &Player::ALL, "slider", dead_zone_slider_name)?,
            dead_zone_labels: ControlMap::resolve(gui, &Player::ALL, "label", dead_zone_label_name)?,
            dead_zone_shapes: ControlMap::resolve(gui, &Player::ALL, "checkbox", dead_zone_shape_name)?,

            config_labels: ControlMap::resolve(gui, &ConfigLabel::ALL, "label", ConfigLabel::control_name)?,
            gamepad_type_buttons: ControlMap::resolve(gui, &GamepadType::ALL, "button", gamepad_type_button_name)?,
            config_skip: button(BUTTON_CONFIG_SKIP)?,
            config_back: button(BUTTON_CONFIG_BACK)?,
            config_default: button(BUTTON_CONFIG_DEFAULT)?,

            editor_buttons: ControlMap::resolve(gui, &EditorButton::ALL, "button", EditorButton::control_name)?,

            unpublished_list: list(LIST_UNPUBLISHED)?,
            published_list: list(LIST_PUBLISHED)?,
            publish_new: button(BUTTON_PUBLISH_NEW)?,
            publish_update: button(BUTTON_PUBLISH_UPDATE)?,
            workshop_info: label(LABEL_WORKSHOP_INFO)?,

            publish_steps: ControlMap::resolve(gui, &PublishStep::ALL, "collection box", PublishStep::box_name)?,
            publish_tags: ControlMap::resolve(gui, &PublishTag::ALL, "checkbox", PublishTag::control_name)?,
            publish_header: label(LABEL_PUBLISH_HEADER)?,
            publish_module_combo: combo(COMBO_PUBLISH_MODULE)?,
            publish_title: text_box(TEXT_PUBLISH_TITLE)?,
            publish_description: text_box(TEXT_PUBLISH_DESCRIPTION)?,
            publish_status: list(LIST_PUBLISH_STATUS)?,
            publish_result: label(LABEL_PUBLISH_RESULT)?,
            publish_back: button(BUTTON_PUBLISH_BACK)?,
            publish_next: button(BUTTON_PUBLISH_NEXT)?,
            publish_cancel: button(BUTTON_PUBLISH_CANCEL)?,

            credits_list: list(LIST_CREDITS)?,

            mods_list: list(LIST_MODS)?,
            scripts_list: list(LIST_SCRIPTS)?,
            toggle_mod: button(BUTTON_TOGGLE_MOD)?,
            toggle_script: button(BUTTON_TOGGLE_SCRIPT)?,
            mod_description: label(LABEL_MOD_DESCRIPTION)?,
        })
    }
}

/// The front-end menu
///
/// Borrows the control manager for its whole life; the manager must be built
/// with [`build_layout`] before [`create`](Self::create).
pub struct MainMenu<'a> {
    gui: &'a mut ControlManager,
    controls: Controls,
    style: GuiStyle,

    audio: Box<dyn AudioSink>,
    modules: Box<dyn ModuleRegistry>,
    publisher: Box<dyn PublishingBackend>,
    settings_store: Option<SettingsManager>,

    settings: MenuSettings,
    settings_dirty: bool,

    fader: Fader,
    screen: MenuScreen,
    last_event: MenuEvent,

    config: PendingGameConfig,
    scenes: Vec<SceneInfo>,

    /// Resolution the game is running at; changing it needs a restart
    running_resolution: Resolution,
    resolutions: Vec<Resolution>,

    config_wizard: Option<ConfigWizard>,
    mod_list: ModList,

    wizard: PublishWizard,
    unpublished_modules: Vec<String>,
    published_modules: Vec<String>,
    publish_modules: Vec<String>,

    activity_running: bool,
    tutorial_offered: bool,
    credits_timer: f32,
    blink: Blinker,

    promo_enabled: bool,
    promo_clicked: bool,
}

impl<'a> MainMenu<'a> {
    /// Resolves every control and shows the main screen
    pub fn create(
        gui: &'a mut ControlManager,
        services: MenuServices,
        settings: MenuSettings,
    ) -> Result<Self, MenuError> {
        let controls = Controls::resolve(gui).map_err(MenuError::MissingControl)?;
        let MenuServices {
            mut audio,
            modules,
            publisher,
            settings_store,
        } = services;
        audio.set_volumes(settings.audio.music_volume, settings.audio.sound_volume);

        let running_resolution = settings.video.resolution;
        let max_resolution = options::RESOLUTIONS[options::RESOLUTIONS.len() - 1];
        let config = PendingGameConfig {
            resolution: running_resolution,
            ..PendingGameConfig::default()
        };

        let mut menu = MainMenu {
            gui,
            controls,
            style: GuiStyle::default(),
            audio,
            modules,
            publisher,
            settings_store,
            settings,
            settings_dirty: false,
            fader: Fader::new(),
            screen: MenuScreen::Root,
            last_event: MenuEvent::None,
            config,
            scenes: Vec::new(),
            running_resolution,
            resolutions: options::available_resolutions(max_resolution),
            config_wizard: None,
            mod_list: ModList::default(),
            wizard: PublishWizard::new(),
            unpublished_modules: Vec::new(),
            published_modules: Vec::new(),
            publish_modules: Vec::new(),
            activity_running: false,
            tutorial_offered: false,
            credits_timer: 0.0,
            blink: Blinker::new(),
            promo_enabled: false,
            promo_clicked: false,
        };
        menu.activate_screen(MenuScreen::Main);
        info!("Main menu created");
        Ok(menu)
    }

    // === Per-frame ===

    /// Advances the menu one frame and returns the decision it produced
    pub fn update(&mut self, dt: f32) -> MenuEvent {
        self.last_event = MenuEvent::None;
        self.promo_clicked = false;

        if self.fader.update(dt) == Some(VisibilityState::Disabled) {
            self.activate_screen(MenuScreen::Root);
        }
        if self.blink.update(dt) {
            match self.screen {
                MenuScreen::Skirmish => self.refresh_skirmish_labels(),
                MenuScreen::Difficulty => self.refresh_difficulty(),
                _ => {}
            }
        }

        let events = self.gui.drain_events();
        if !self.fader.is_enabled() {
            return MenuEvent::None;
        }

        if self.screen == MenuScreen::Credits {
            self.scroll_credits(dt);
        }

        let mut decision = MenuEvent::None;
        for event in events {
            // Events queued on a screen we have since left
            if !self.gui.is_shown(event.widget) {
                continue;
            }
            let outcome = self.handle_event(&event);
            if outcome.is_none() {
                continue;
            }
            if decision.is_none() {
                decision = outcome;
            } else {
                warn!("Dropping {:?}, already decided {:?} this frame", outcome, decision);
            }
        }

        if !decision.is_none() {
            info!("Menu decision: {:?}", decision);
            if decision != MenuEvent::Quit {
                self.audio.play(SoundCue::ExitMenuAlt);
                self.fader.set_enabled(false);
                self.persist_settings();
            }
        }
        self.last_event = decision.clone();
        decision
    }

    /// Forwards input to the focused screen; ignored unless enabled
    pub fn handle_input(&mut self, actions: &[MenuAction]) {
        if !self.fader.is_enabled() {
            return;
        }
        for action in actions {
            match action {
                MenuAction::Back => self.go_back(),
                MenuAction::Bind(input) => self.bind_input(input),
                // A left click that misses every control is the input being bound
                MenuAction::Click(x, y) if self.is_capturing_binding() && self.gui.widget_at(*x, *y).is_none() => {
                    self.bind_input("Mouse:Left");
                }
                MenuAction::Quit => {}
                other => {
                    let focus = self.gui.focus();
                    self.gui.handle_action(other);
                    if self.gui.focus() != focus && !matches!(other, MenuAction::Click(..)) {
                        self.audio.play(SoundCue::FocusChange);
                    }
                }
            }
        }
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        render_gui(&*self.gui, canvas, &self.style, self.fader.opacity())
    }

    // === Visibility ===

    /// Fades the menu in (back to the main screen) or out
    pub fn set_enabled(&mut self, enable: bool) {
        if enable == self.fader.is_enabled() {
            return;
        }
        self.fader.set_enabled(enable);
        if enable {
            self.audio.play(SoundCue::EnterMenu);
            self.activate_screen(MenuScreen::Main);
        } else {
            self.audio.play(SoundCue::ExitMenu);
            self.persist_settings();
        }
    }

    /// Visible or becoming visible
    pub fn is_enabled(&self) -> bool {
        self.fader.is_enabled()
    }

    pub fn fade_state(&self) -> VisibilityState {
        self.fader.state()
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    /// Shows `screen` and hides every other one
    pub fn activate_screen(&mut self, screen: MenuScreen) {
        let leaving = self.screen;
        if leaving != screen
            && matches!(leaving, MenuScreen::Options | MenuScreen::Config | MenuScreen::ModManager)
        {
            self.persist_settings();
        }

        for (key, id) in self.controls.screens.iter() {
            self.gui.set_visible(id, key == screen);
        }
        self.gui.clear_transient();
        self.blink.stop();
        self.screen = screen;
        debug!("Screen {:?} -> {:?}", leaving, screen);

        match screen {
            MenuScreen::Main => self.refresh_main(),
            MenuScreen::Skirmish => self.refresh_skirmish(),
            MenuScreen::Difficulty => self.refresh_difficulty(),
            MenuScreen::Options => self.refresh_options(),
            MenuScreen::Config => self.refresh_config(),
            MenuScreen::WorkshopManager => self.refresh_workshop(),
            MenuScreen::PublishSteps => self.refresh_publish_steps(),
            MenuScreen::Credits => {
                self.credits_timer = 0.0;
                self.gui.set_scroll(self.controls.credits_list, 0);
            }
            MenuScreen::ModManager => self.refresh_mod_manager(),
            MenuScreen::Root
            | MenuScreen::Players
            | MenuScreen::Editor
            | MenuScreen::Meta
            | MenuScreen::Quit => {}
        }
    }

    // === One-shot queries, valid for the last update ===

    pub fn scenario_started(&self) -> bool {
        self.last_event == MenuEvent::StartScenario
    }

    pub fn campaign_started(&self) -> bool {
        self.last_event == MenuEvent::StartCampaign
    }

    pub fn activity_restarted(&self) -> Option<&ActivityRequest> {
        match &self.last_event {
            MenuEvent::RestartActivity(request) => Some(request),
            _ => None,
        }
    }

    pub fn activity_resumed(&self) -> bool {
        self.last_event == MenuEvent::ResumeActivity
    }

    pub fn quit_program(&self) -> bool {
        self.last_event == MenuEvent::Quit
    }

    // === Host-facing setters and accessors ===

    pub fn set_start_funds(&mut self, funds: i32) {
        self.config.set_starting_funds(funds);
        self.refresh_difficulty();
    }

    /// Whether there is a paused activity the Resume button can return to
    pub fn set_activity_running(&mut self, running: bool) {
        self.activity_running = running;
        self.refresh_main();
    }

    /// Caps the resolution choices to what the display supports
    pub fn set_max_resolution(&mut self, max: Resolution) {
        self.resolutions = options::available_resolutions(max);
        if self.screen == MenuScreen::Options {
            self.refresh_options();
        }
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    pub fn pending_config(&self) -> &PendingGameConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn publish_wizard(&self) -> &PublishWizard {
        &self.wizard
    }

    pub fn gui_control_manager(&mut self) -> &mut ControlManager {
        self.gui
    }

    /// True while the control configuration waits for an input to bind
    pub fn is_capturing_binding(&self) -> bool {
        self.screen == MenuScreen::Config
            && self.config_wizard.as_ref().is_some_and(|w| w.current_element().is_some())
    }

    // === Promo ===

    /// The promo area only shows on the main screen
    pub fn allow_promo(&self) -> bool {
        self.promo_enabled && self.screen == MenuScreen::Main && self.fader.is_enabled()
    }

    pub fn set_promo_enabled(&mut self, enabled: bool) {
        self.promo_enabled = enabled;
        self.refresh_main();
    }

    /// Places the promo area; `area` is in logical screen coordinates
    pub fn set_promo_box(&mut self, area: Rect) {
        let origin = self.gui.absolute_rect(self.controls.screens.get(MenuScreen::Main));
        let relative = Rect::new(area.x() - origin.x(), area.y() - origin.y(), area.width(), area.height());
        self.gui.set_rect(self.controls.promo_button, relative);
    }

    /// One-shot: the promo area was clicked during the last update
    pub fn promo_clicked(&self) -> bool {
        self.promo_clicked
    }

    /// Progress line from the publishing backend
    pub fn publishing_progress_report(&mut self, text: &str, new_item: bool) {
        self.wizard.progress_report(text, new_item);
        self.refresh_publish_status();
    }

    pub fn publishing_success_report(&mut self, published_id: &str) {
        self.wizard.success_report(published_id);
        self.refresh_publish_status();
    }

    // === Event dispatch ===

    fn handle_event(&mut self, event: &GuiEvent) -> MenuEvent {
        if self.controls.back_buttons.key_of(event.widget).is_some() {
            self.go_back();
            return MenuEvent::None;
        }

        match self.screen {
            MenuScreen::Main | MenuScreen::Meta | MenuScreen::Quit => self.main_event(event),
            MenuScreen::Players => {
                if let Some(player) = self.controls.players_buttons.key_of(event.widget) {
                    self.audio.play(SoundCue::ButtonPress);
                    self.config.set_players(player.number());
                    self.activate_screen(MenuScreen::Skirmish);
                }
                MenuEvent::None
            }
            MenuScreen::Skirmish => {
                self.skirmish_event(event);
                MenuEvent::None
            }
            MenuScreen::Difficulty => self.difficulty_event(event),
            MenuScreen::Options => {
                self.options_event(event);
                MenuEvent::None
            }
            MenuScreen::Config => {
                self.config_event(event);
                MenuEvent::None
            }
            MenuScreen::Editor => self.editor_event(event),
            MenuScreen::WorkshopManager => {
                self.workshop_event(event);
                MenuEvent::None
            }
            MenuScreen::PublishSteps => {
                self.publish_event(event);
                MenuEvent::None
            }
            MenuScreen::ModManager => {
                self.mod_manager_event(event);
                MenuEvent::None
            }
            MenuScreen::Root | MenuScreen::Credits => MenuEvent::None,
        }
    }

    fn main_event(&mut self, event: &GuiEvent) -> MenuEvent {
        if event.widget == self.controls.promo_button {
            if self.allow_promo() {
                self.audio.play(SoundCue::ButtonPress);
                self.promo_clicked = true;
            }
            return MenuEvent::None;
        }
        let Some(button) = self.controls.main_buttons.key_of(event.widget) else {
            return MenuEvent::None;
        };
        self.audio.play(SoundCue::ButtonPress);

        match button {
            MainButton::Campaign => {
                if self.tutorial_offered {
                    return MenuEvent::StartCampaign;
                }
                self.tutorial_offered = true;
                self.activate_screen(MenuScreen::Meta);
            }
            MainButton::Skirmish => self.activate_screen(MenuScreen::Players),
            MainButton::Multiplayer => return MenuEvent::StartScenario,
            MainButton::Options => self.activate_screen(MenuScreen::Options),
            MainButton::ModManager => self.activate_screen(MenuScreen::ModManager),
            MainButton::Editor => self.activate_screen(MenuScreen::Editor),
            MainButton::Credits => self.activate_screen(MenuScreen::Credits),
            MainButton::Quit => self.quit_logic(),
            MainButton::Resume => return MenuEvent::ResumeActivity,
            MainButton::PlayTutorial => return MenuEvent::RestartActivity(ActivityRequest::Tutorial),
            MainButton::MetaContinue => return MenuEvent::StartCampaign,
            MainButton::QuitConfirm => return MenuEvent::Quit,
            MainButton::QuitCancel => self.activate_screen(MenuScreen::Main),
        }
        MenuEvent::None
    }

    fn skirmish_event(&mut self, event: &GuiEvent) {
        let c = &self.controls;
        if event.widget == c.scene_combo {
            if let GuiEventKind::SelectionChanged(Some(index)) = event.kind {
                self.config.scene = self.scenes.get(index).map(|s| s.name.clone());
                self.audio.play(SoundCue::SelectionChange);
                self.refresh_skirmish_labels();
            }
        } else if let Some(player) = c.team_buttons.key_of(event.widget) {
            self.config.cycle_team(player.index());
            self.audio.play(SoundCue::ItemChange);
            self.refresh_skirmish_labels();
        } else if event.widget == c.cpu_team_button {
            self.config.cycle_cpu_team();
            self.audio.play(SoundCue::ItemChange);
            self.refresh_skirmish_labels();
        } else if event.widget == c.skirmish_next {
            if self.config.scene.is_none() {
                self.audio.play(SoundCue::UserError);
                self.blink.start(BlinkNotice::NoScene);
                self.refresh_skirmish_labels();
                return;
            }
            self.audio.play(SoundCue::ButtonPress);
            self.activate_screen(MenuScreen::Difficulty);
        }
    }

    fn difficulty_event(&mut self, event: &GuiEvent) -> MenuEvent {
        let c = &self.controls;
        if event.widget == c.funds_slider {
            if let GuiEventKind::ValueChanged(value) = event.kind {
                self.config.set_starting_funds(value);
                self.refresh_difficulty();
            }
        } else if let Some(difficulty) = c.difficulty_buttons.key_of(event.widget) {
            self.config.difficulty = difficulty;
            self.audio.play(SoundCue::ItemChange);
            self.refresh_difficulty();
        } else if event.widget == c.start_skirmish {
            if !self.config.can_start() {
                self.audio.play(SoundCue::UserError);
                return MenuEvent::None;
            }
            if self.config.starting_funds <= 0 {
                self.audio.play(SoundCue::UserError);
                self.blink.start(BlinkNotice::NoFunds);
                self.refresh_difficulty();
                return MenuEvent::None;
            }
            self.audio.play(SoundCue::ButtonPress);
            return MenuEvent::RestartActivity(ActivityRequest::Skirmish(self.config.clone()));
        }
        MenuEvent::None
    }

    fn options_event(&mut self, event: &GuiEvent) {
        let c = &self.controls;
        if let Some(button) = c.options_buttons.key_of(event.widget) {
            self.audio.play(SoundCue::ButtonPress);
            match button {
                OptionsButton::Fullscreen => {
                    self.settings.video.fullscreen = !self.settings.video.fullscreen;
                }
                OptionsButton::NextDevice(player) => {
                    let device = self.settings.players[player.index()].device.next();
                    self.set_device(player, device);
                }
                OptionsButton::PrevDevice(player) => {
                    let device = self.settings.players[player.index()].device.previous();
                    self.set_device(player, device);
                }
                OptionsButton::Configure(player) => {
                    let input = &self.settings.players[player.index()];
                    self.config_wizard = Some(ConfigWizard::start(player.index(), input));
                    self.activate_screen(MenuScreen::Config);
                    return;
                }
                OptionsButton::Clear(player) => {
                    self.settings.players[player.index()].bindings.clear();
                    info!("Cleared bindings for player {}", player.number());
                }
            }
            self.settings_dirty = true;
            self.refresh_options();
            return;
        }

        if let Some(checkbox) = c.options_checkboxes.key_of(event.widget) {
            if let GuiEventKind::Toggled(checked) = event.kind {
                *options::gameplay_flag_mut(&mut self.settings.gameplay, checkbox) = checked;
                self.settings_dirty = true;
                self.audio.play(SoundCue::ItemChange);
            }
            return;
        }

        if let Some(player) = c.dead_zone_sliders.key_of(event.widget) {
            if let GuiEventKind::ValueChanged(value) = event.kind {
                self.settings.players[player.index()].dead_zone = options::from_percent(value);
                self.settings_dirty = true;
                self.refresh_options();
            }
            return;
        }

        if let Some(player) = c.dead_zone_shapes.key_of(event.widget) {
            if let GuiEventKind::Toggled(square) = event.kind {
                self.settings.players[player.index()].dead_zone_shape =
                    if square { DeadZoneShape::Square } else { DeadZoneShape::Circle };
                self.settings_dirty = true;
                self.audio.play(SoundCue::ItemChange);
            }
            return;
        }

        match event.kind {
            GuiEventKind::ValueChanged(value) if event.widget == c.music_slider => {
                self.settings.audio.music_volume = options::from_percent(value);
                self.apply_volumes();
            }
            GuiEventKind::ValueChanged(value) if event.widget == c.sound_slider => {
                self.settings.audio.sound_volume = options::from_percent(value);
                self.apply_volumes();
                self.audio.play(SoundCue::Test);
            }
            GuiEventKind::SelectionChanged(Some(index)) if event.widget == c.resolution_combo => {
                if let Some(&resolution) = self.resolutions.get(index) {
                    self.settings.video.resolution = resolution;
                    self.settings_dirty = true;
                    self.audio.play(SoundCue::SelectionChange);
                    self.refresh_options();
                }
            }
            _ => {}
        }
    }

    fn set_device(&mut self, player: Player, device: InputDevice) {
        let input = &mut self.settings.players[player.index()];
        if input.device != device {
            input.device = device;
            input.bindings.clear();
            input.gamepad_type = None;
        }
    }

    fn apply_volumes(&mut self) {
        self.settings_dirty = true;
        self.audio
            .set_volumes(self.settings.audio.music_volume, self.settings.audio.sound_volume);
        self.refresh_options();
    }

    fn config_event(&mut self, event: &GuiEvent) {
        let c = &self.controls;
        let Some(wizard) = self.config_wizard.as_mut() else {
            return;
        };

        if let Some(gamepad_type) = c.gamepad_type_buttons.key_of(event.widget) {
            wizard.choose_gamepad_type(gamepad_type);
        } else if event.widget == c.config_skip {
            wizard.skip();
        } else if event.widget == c.config_default {
            wizard.apply_defaults();
        } else if event.widget == c.config_back {
            self.go_back();
            return;
        } else {
            return;
        }
        self.audio.play(SoundCue::ButtonPress);
        self.after_config_change();
    }

    fn bind_input(&mut self, input: &str) {
        if self.screen != MenuScreen::Config {
            return;
        }
        let bound = self.config_wizard.as_mut().is_some_and(|w| w.bind(input));
        if bound {
            debug!("Bound {}", input);
            self.audio.play(SoundCue::ItemChange);
            self.after_config_change();
        }
    }

    /// Writes a finished configuration back and returns to options
    fn after_config_change(&mut self) {
        let finished = self.config_wizard.as_ref().is_some_and(ConfigWizard::is_done);
        if !finished {
            self.refresh_config();
            return;
        }
        if let Some(wizard) = self.config_wizard.take() {
            wizard.apply(&mut self.settings.players[wizard.player()]);
            self.settings_dirty = true;
            info!("Controls configured for player {}", wizard.player() + 1);
        }
        self.activate_screen(MenuScreen::Options);
    }

    fn editor_event(&mut self, event: &GuiEvent) -> MenuEvent {
        let Some(button) = self.controls.editor_buttons.key_of(event.widget) else {
            return MenuEvent::None;
        };
        self.audio.play(SoundCue::ButtonPress);
        match button {
            EditorButton::Launch(kind) => MenuEvent::RestartActivity(ActivityRequest::Editor(kind)),
            EditorButton::WorkshopPublish => {
                self.activate_screen(MenuScreen::WorkshopManager);
                MenuEvent::None
            }
        }
    }

    fn workshop_event(&mut self, event: &GuiEvent) {
        let c = &self.controls;
        if event.widget == c.unpublished_list || event.widget == c.published_list {
            if let GuiEventKind::SelectionChanged(Some(index)) = event.kind {
                let module = if event.widget == c.unpublished_list {
                    self.unpublished_modules.get(index)
                } else {
                    self.published_modules.get(index)
                };
                let info = module
                    .and_then(|path| self.modules.modules().into_iter().find(|m| &m.path == path))
                    .map(|m| format!("{}: {}", m.name, m.description))
                    .unwrap_or_default();
                self.gui.set_text(c.workshop_info, &info);
                self.audio.play(SoundCue::SelectionChange);
            }
        } else if event.widget == c.publish_new {
            let selected = self.gui.selected_index(c.unpublished_list);
            let Some(module) = selected.and_then(|i| self.unpublished_modules.get(i)).cloned() else {
                self.audio.play(SoundCue::UserError);
                return;
            };
            self.wizard.reset();
            self.wizard.module = Some(module);
            self.audio.play(SoundCue::ButtonPress);
            self.activate_screen(MenuScreen::PublishSteps);
        } else if event.widget == c.publish_update {
            let selected = self.gui.selected_index(c.published_list);
            let Some(module) = selected.and_then(|i| self.published_modules.get(i)).cloned() else {
                self.audio.play(SoundCue::UserError);
                return;
            };
            self.wizard.reset();
            self.populate_publishing_with_previous(&module);
            self.audio.play(SoundCue::ButtonPress);
            self.activate_screen(MenuScreen::PublishSteps);
        }
    }

    /// Prefills the wizard from the backend's record of `module`
    pub fn populate_publishing_with_previous(&mut self, module: &str) {
        match self.publisher.previous(module) {
            Some(previous) => self.wizard.prefill(&previous),
            None => {
                warn!("No previous submission of {}, publishing as new", module);
                self.wizard.module = Some(module.to_string());
            }
        }
    }

    fn publish_event(&mut self, event: &GuiEvent) {
        let c = &self.controls;
        if event.widget == c.publish_module_combo {
            if let GuiEventKind::SelectionChanged(Some(index)) = event.kind {
                self.wizard.module = self.publish_modules.get(index).cloned();
                self.audio.play(SoundCue::SelectionChange);
            }
        } else if event.widget == c.publish_title {
            self.wizard.title = self.gui.text(c.publish_title).to_string();
        } else if event.widget == c.publish_description {
            self.wizard.description = self.gui.text(c.publish_description).to_string();
        } else if let Some(tag) = c.publish_tags.key_of(event.widget) {
            if let GuiEventKind::Toggled(on) = event.kind {
                self.wizard.set_tag(tag, on);
                self.audio.play(SoundCue::ItemChange);
            }
        } else if event.widget == c.publish_next {
            if !self.wizard.can_advance() {
                self.audio.play(SoundCue::UserError);
                return;
            }
            self.audio.play(SoundCue::ButtonPress);
            if self.wizard.next() == PublishStep::Last {
                self.setup_and_submit_publishing();
            }
            self.show_publish_step();
            return;
        } else if event.widget == c.publish_back {
            self.audio.play(SoundCue::BackButtonPress);
            self.wizard.back();
            self.show_publish_step();
            return;
        } else if event.widget == c.publish_cancel {
            self.audio.play(SoundCue::BackButtonPress);
            self.wizard.reset();
            self.activate_screen(MenuScreen::WorkshopManager);
            return;
        }
        self.refresh_publish_navigation();
    }

    /// Hands the wizard's fields to the publishing backend
    pub fn setup_and_submit_publishing(&mut self) {
        let Some(submission) = self.wizard.submission() else {
            warn!("Publish attempted without a module");
            self.wizard.fail(&PublishError::Rejected("no module selected".to_string()));
            self.audio.play(SoundCue::UserError);
            self.refresh_publish_status();
            return;
        };

        info!("Submitting {} for publishing", submission.module);
        let mut reports = ProgressQueue::new();
        let result = self.publisher.submit(&submission, &mut reports);
        for report in reports.drain() {
            match report {
                ProgressReport::Progress { text, new_item } => self.publishing_progress_report(&text, new_item),
                ProgressReport::Success(id) => self.publishing_success_report(&id),
            }
        }
        match result {
            Ok(()) => {
                info!("Published {}", self.wizard.published_id().unwrap_or("?"));
            }
            Err(e) => {
                warn!("Publishing {} failed: {}", submission.module, e);
                self.wizard.fail(&e);
                self.audio.play(SoundCue::UserError);
            }
        }
        self.refresh_publish_status();
    }

    fn mod_manager_event(&mut self, event: &GuiEvent) {
        let c = &self.controls;
        match event.kind {
            GuiEventKind::SelectionChanged(Some(index)) if event.widget == c.mods_list => {
                let description = self.mod_list.mods().get(index).map(|m| m.description.clone());
                self.gui.set_text(c.mod_description, &description.unwrap_or_default());
                self.audio.play(SoundCue::SelectionChange);
            }
            GuiEventKind::SelectionChanged(Some(index)) if event.widget == c.scripts_list => {
                let description = self.mod_list.scripts().get(index).map(|s| s.description.clone());
                self.gui.set_text(c.mod_description, &description.unwrap_or_default());
                self.audio.play(SoundCue::SelectionChange);
            }
            GuiEventKind::Clicked if event.widget == c.toggle_mod => {
                let selected = self.gui.selected_index(c.mods_list);
                match selected {
                    Some(index) => self.toggle_mod(index),
                    None => self.audio.play(SoundCue::UserError),
                }
            }
            GuiEventKind::Clicked if event.widget == c.toggle_script => {
                let selected = self.gui.selected_index(c.scripts_list);
                match selected {
                    Some(index) => self.toggle_script(index),
                    None => self.audio.play(SoundCue::UserError),
                }
            }
            _ => {}
        }
    }

    /// Flips the mod at list row `index` on or off
    pub fn toggle_mod(&mut self, index: usize) {
        let Some(record) = self.mod_list.toggle_mod(index, &mut self.settings) else {
            return;
        };
        let text = make_mod_string(record);
        self.gui.set_item(self.controls.mods_list, index, text);
        self.settings_dirty = true;
        self.audio.play(SoundCue::ItemChange);
    }

    /// Flips the script at list row `index` on or off
    pub fn toggle_script(&mut self, index: usize) {
        let Some(record) = self.mod_list.toggle_script(index, &mut self.settings) else {
            return;
        };
        let text = make_script_string(record);
        self.gui.set_item(self.controls.scripts_list, index, text);
        self.settings_dirty = true;
        self.audio.play(SoundCue::ItemChange);
    }

    fn quit_logic(&mut self) {
        self.activate_screen(MenuScreen::Quit);
    }

    /// What Back/Escape does on the current screen
    fn go_back(&mut self) {
        self.audio.play(SoundCue::BackButtonPress);
        match self.screen {
            MenuScreen::Root => {}
            MenuScreen::Main => self.quit_logic(),
            MenuScreen::Config => {
                let stay = self.config_wizard.as_mut().is_some_and(ConfigWizard::back);
                if stay {
                    self.refresh_config();
                } else {
                    self.config_wizard = None;
                    self.activate_screen(MenuScreen::Options);
                }
            }
            MenuScreen::PublishSteps if self.wizard.step() != PublishStep::First && !self.wizard.is_complete() => {
                self.wizard.back();
                self.show_publish_step();
            }
            MenuScreen::PublishSteps => {
                self.wizard.reset();
                self.activate_screen(MenuScreen::WorkshopManager);
            }
            screen => {
                if let Some(parent) = screen.parent() {
                    self.activate_screen(parent);
                }
            }
        }
    }

    fn persist_settings(&mut self) {
        if !self.settings_dirty {
            return;
        }
        self.settings_dirty = false;
        if let Some(store) = &self.settings_store {
            if let Err(e) = store.save(&self.settings) {
                warn!("Could not save settings: {}", e);
            }
        }
    }

    fn scroll_credits(&mut self, dt: f32) {
        self.credits_timer += dt;
        let list = self.controls.credits_list;
        while self.credits_timer >= CREDITS_SCROLL_INTERVAL {
            self.credits_timer -= CREDITS_SCROLL_INTERVAL;
            let Some(state) = self.gui.list(list) else {
                return;
            };
            let next = if state.scroll + 1 >= state.items.len() { 0 } else { state.scroll + 1 };
            self.gui.set_scroll(list, next);
        }
    }

    // === Copying state into controls ===

    fn refresh_main(&mut self) {
        let resume = self.controls.main_buttons.get(MainButton::Resume);
        self.gui.set_visible(resume, self.activity_running);
        self.gui.set_visible(self.controls.promo_button, self.promo_enabled);
    }

    fn refresh_skirmish(&mut self) {
        let players = self.config.players;
        self.scenes = self
            .modules
            .scenes()
            .into_iter()
            .filter(|s| s.max_players >= players)
            .collect();

        let names: Vec<String> = self.scenes.iter().map(|s| s.name.clone()).collect();
        let index = self
            .config
            .scene
            .as_ref()
            .and_then(|current| names.iter().position(|n| n == current))
            .or(if names.is_empty() { None } else { Some(0) });
        self.config.scene = index.map(|i| names[i].clone());

        let combo = self.controls.scene_combo;
        self.gui.set_items(combo, names);
        self.gui.select(combo, index);
        self.refresh_skirmish_labels();
    }

    fn refresh_skirmish_labels(&mut self) {
        let c = &self.controls;
        let description = self
            .config
            .scene
            .as_ref()
            .and_then(|name| self.scenes.iter().find(|s| &s.name == name))
            .map(|s| s.description.clone())
            .unwrap_or_else(|| "No scenes available for this many players".to_string());
        let description = match self.blink.lit() {
            Some(notice @ BlinkNotice::NoScene) => notice.text().to_string(),
            _ => description,
        };
        self.gui.set_text(c.scene_description, &description);

        for player in Player::ALL {
            let active = player.index() < self.config.players;
            let label = c.team_labels.get(player);
            self.gui.set_visible(label, active);
            self.gui.set_visible(c.team_buttons.get(player), active);
            let team = self.config.team_assignments[player.index()];
            self.gui
                .set_text(label, &format!("Player {}: {}", player.number(), team.label()));
        }

        let cpu = self.config.cpu_team.map(|t| t.label()).unwrap_or_else(|| "None".to_string());
        self.gui.set_text(c.cpu_team_button, &cpu);
        self.gui.set_text(c.cpu_team_label, &format!("CPU ({} teams)", self.config.team_count()));
    }

    fn refresh_difficulty(&mut self) {
        let c = &self.controls;
        self.gui.set_slider_value(c.funds_slider, self.config.starting_funds);
        let funds = match self.blink.lit() {
            Some(notice @ BlinkNotice::NoFunds) => notice.text().to_string(),
            _ => format!("Starting Funds: {} oz", self.config.starting_funds),
        };
        self.gui.set_text(c.funds_label, &funds);

        let can_start = self.config.can_start();
        self.gui.set_enabled(c.start_skirmish, can_start);
        let text = if can_start {
            format!("Difficulty: {}", self.config.difficulty.label())
        } else {
            "Pick a scene and at least two teams to start".to_string()
        };
        self.gui.set_text(c.difficulty_label, &text);
    }

    fn refresh_options(&mut self) {
        let c = &self.controls;
        let settings = &self.settings;

        let fullscreen = if settings.video.fullscreen { "Fullscreen: On" } else { "Fullscreen: Off" };
        self.gui.set_text(c.options_buttons.get(OptionsButton::Fullscreen), fullscreen);

        let labels = self.resolutions.iter().map(Resolution::label).collect();
        self.gui.set_items(c.resolution_combo, labels);
        let index = options::resolution_index(&self.resolutions, settings.video.resolution);
        self.gui.select(c.resolution_combo, index);
        self.gui.set_text(
            c.resolution_restart,
            options::restart_notice(settings.video.resolution, self.running_resolution),
        );

        let music = options::to_percent(settings.audio.music_volume);
        let sound = options::to_percent(settings.audio.sound_volume);
        self.gui.set_slider_value(c.music_slider, music);
        self.gui.set_text(c.music_label, &options::volume_label("Music", music));
        self.gui.set_slider_value(c.sound_slider, sound);
        self.gui.set_text(c.sound_label, &options::volume_label("Sound", sound));

        for player in Player::ALL {
            let input = &settings.players[player.index()];
            let device_text = format!("P{}: {}", player.number(), input.device.label());
            self.gui.set_text(c.device_labels.get(player), &device_text);

            let is_gamepad = matches!(input.device, InputDevice::Gamepad(_));
            let dead_zone = options::to_percent(input.dead_zone);
            for id in [
                c.dead_zone_sliders.get(player),
                c.dead_zone_labels.get(player),
                c.dead_zone_shapes.get(player),
            ] {
                self.gui.set_visible(id, is_gamepad);
            }
            self.gui.set_slider_value(c.dead_zone_sliders.get(player), dead_zone);
            self.gui
                .set_text(c.dead_zone_labels.get(player), &options::dead_zone_label(dead_zone));
            self.gui.set_checked(
                c.dead_zone_shapes.get(player),
                input.dead_zone_shape == DeadZoneShape::Square,
            );
        }

        for checkbox in OptionsCheckbox::ALL {
            let checked = options::gameplay_flag(&settings.gameplay, checkbox);
            self.gui.set_checked(c.options_checkboxes.get(checkbox), checked);
        }
    }

    fn refresh_config(&mut self) {
        let c = &self.controls;
        let Some(wizard) = &self.config_wizard else {
            return;
        };

        let title = format!("Player {}: {}", wizard.player() + 1, wizard.device().label());
        self.gui.set_text(c.config_labels.get(ConfigLabel::Title), &title);
        self.gui
            .set_text(c.config_labels.get(ConfigLabel::Recommendation), wizard.recommendation());
        self.gui.set_text(c.config_labels.get(ConfigLabel::Steps), &wizard.step_label());

        let (instruction, current) = match wizard.current_element() {
            Some(element) => (
                element.prompt(),
                format!("Current: {}", wizard.binding(element).unwrap_or("none")),
            ),
            None => ("Which kind of gamepad is this?", String::new()),
        };
        self.gui.set_text(c.config_labels.get(ConfigLabel::Instruction), instruction);
        self.gui.set_text(c.config_labels.get(ConfigLabel::Input), &current);

        let picking = wizard.stage() == WizardStage::PickGamepadType;
        for (_, id) in c.gamepad_type_buttons.iter() {
            self.gui.set_visible(id, picking);
        }
        self.gui.set_visible(c.config_skip, !picking);
        self.gui.set_visible(c.config_default, !picking);
    }

    /// Modules can be installed while the game runs
    fn rescan_modules(&mut self) {
        if let Err(e) = self.modules.refresh() {
            warn!("Module rescan failed, keeping the last scan: {}", e);
        }
    }

    fn refresh_workshop(&mut self) {
        self.rescan_modules();
        let c = &self.controls;
        let published = self.publisher.published();
        let published_paths: BTreeSet<&str> = published.iter().map(|p| p.module.as_str()).collect();

        self.unpublished_modules = self
            .modules
            .modules()
            .into_iter()
            .map(|m| m.path)
            .filter(|path| !published_paths.contains(path.as_str()))
            .collect();
        self.published_modules = published.iter().map(|p| p.module.clone()).collect();

        self.gui.set_items(c.unpublished_list, self.unpublished_modules.clone());
        let published_items = published
            .iter()
            .map(|p| format!("{} ({})", p.title, p.published_id.as_deref().unwrap_or("?")))
            .collect();
        self.gui.set_items(c.published_list, published_items);
        self.gui.set_text(c.workshop_info, "");
    }

    fn refresh_publish_steps(&mut self) {
        let c = &self.controls;
        self.publish_modules = self.modules.modules().into_iter().map(|m| m.path).collect();
        let selected = self
            .wizard
            .module
            .as_ref()
            .and_then(|m| self.publish_modules.iter().position(|p| p == m));
        self.gui.set_items(c.publish_module_combo, self.publish_modules.clone());
        self.gui.select(c.publish_module_combo, selected);

        self.gui.set_text(c.publish_title, &self.wizard.title);
        self.gui.set_text(c.publish_description, &self.wizard.description);
        for (tag, id) in c.publish_tags.iter() {
            self.gui.set_checked(id, self.wizard.tags.contains(&tag));
        }
        self.show_publish_step();
    }

    fn show_publish_step(&mut self) {
        let c = &self.controls;
        let step = self.wizard.step();
        for (key, id) in c.publish_steps.iter() {
            self.gui.set_visible(id, key == step);
        }
        self.gui.set_text(c.publish_header, step.header());
        self.refresh_publish_navigation();
        self.refresh_publish_status();
    }

    fn refresh_publish_navigation(&mut self) {
        let c = &self.controls;
        let step = self.wizard.step();
        let complete = self.wizard.is_complete();
        self.gui.set_enabled(c.publish_next, !complete && self.wizard.can_advance());
        self.gui.set_enabled(c.publish_back, !complete && step != PublishStep::First);
        let next = if step == PublishStep::Agreement { "Publish" } else { "Next" };
        self.gui.set_text(c.publish_next, next);
        let cancel = if self.wizard.is_complete() { "Close" } else { "Cancel" };
        self.gui.set_text(c.publish_cancel, cancel);
    }

    fn refresh_publish_status(&mut self) {
        let c = &self.controls;
        let log = self.wizard.log().to_vec();
        let last = log.len().checked_sub(1);
        self.gui.set_items(c.publish_status, log);
        self.gui.select(c.publish_status, last);

        let result = match self.wizard.published_id() {
            Some(id) => format!("Published! Item id: {}", id),
            None => String::new(),
        };
        self.gui.set_text(c.publish_result, &result);
    }

    fn refresh_mod_manager(&mut self) {
        self.rescan_modules();
        self.mod_list = ModList::load(self.modules.as_ref(), &self.settings);
        let c = &self.controls;
        self.gui.set_items(c.mods_list, self.mod_list.mod_strings());
        self.gui.set_items(c.scripts_list, self.mod_list.script_strings());
        self.gui.set_text(c.mod_description, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::menu::publish::testing::MemoryPublisher;
    use crate::modules::{ModuleInfo, ScriptInfo, StaticRegistry};
    use crate::settings::InputElement;

    const FRAME: f32 = 1.0 / 60.0;

    fn registry() -> StaticRegistry {
        StaticRegistry {
            modules: vec![
                ModuleInfo {
                    path: "Ronin.rte".to_string(),
                    name: "Ronin".to_string(),
                    description: "Mercenaries".to_string(),
                },
                ModuleInfo {
                    path: "Coalition.rte".to_string(),
                    name: "Coalition".to_string(),
                    description: "Soldiers".to_string(),
                },
            ],
            scripts: vec![ScriptInfo {
                preset_name: "Auto Reload".to_string(),
                description: "Reloads empty weapons".to_string(),
            }],
            scenes: vec![
                SceneInfo {
                    name: "Grasslands".to_string(),
                    description: "Open fields".to_string(),
                    max_players: 4,
                },
                SceneInfo {
                    name: "Duel Canyon".to_string(),
                    description: "Two player map".to_string(),
                    max_players: 2,
                },
            ],
        }
    }

    struct Harness {
        audio: RecordingAudio,
        publisher: MemoryPublisher,
    }

    impl Harness {
        fn new() -> Self {
            Harness {
                audio: RecordingAudio::default(),
                publisher: MemoryPublisher::default(),
            }
        }

        fn services(&self, modules: StaticRegistry) -> MenuServices {
            MenuServices {
                audio: Box::new(self.audio.clone()),
                modules: Box::new(modules),
                publisher: Box::new(self.publisher.clone()),
                settings_store: None,
            }
        }
    }

    fn built_gui() -> ControlManager {
        let mut gui = ControlManager::new();
        build_layout(&mut gui).unwrap();
        gui
    }

    /// Presses a named control and runs one frame
    fn press(menu: &mut MainMenu, name: &str) -> MenuEvent {
        let gui = menu.gui_control_manager();
        let id = gui.id(name).unwrap();
        assert!(gui.press(id), "{} is not pressable", name);
        menu.update(FRAME)
    }

    fn visible_screens(menu: &mut MainMenu) -> Vec<MenuScreen> {
        let gui = menu.gui_control_manager();
        MenuScreen::ALL
            .iter()
            .copied()
            .filter(|s| gui.is_visible(gui.id(&s.box_name()).unwrap()))
            .collect()
    }

    #[test]
    fn test_create_fails_on_missing_controls() {
        let mut gui = ControlManager::new();
        let harness = Harness::new();
        let result = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default());
        assert!(matches!(result, Err(MenuError::MissingControl(GuiError::UnknownControl(_)))));
    }

    #[test]
    fn test_exactly_one_screen_visible() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        assert_eq!(visible_screens(&mut menu), vec![MenuScreen::Main]);

        let sequence = [
            MenuScreen::Options,
            MenuScreen::Options,
            MenuScreen::Credits,
            MenuScreen::PublishSteps,
            MenuScreen::Root,
            MenuScreen::ModManager,
            MenuScreen::Main,
        ];
        for screen in sequence {
            menu.activate_screen(screen);
            assert_eq!(visible_screens(&mut menu), vec![screen]);
            assert_eq!(menu.screen(), screen);
        }
    }

    #[test]
    fn test_fader_reaches_both_ends() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();

        menu.set_enabled(false);
        assert!(!menu.is_enabled());
        for _ in 0..30 {
            menu.update(FRAME);
        }
        assert_eq!(menu.fade_state(), VisibilityState::Disabled);
        assert_eq!(menu.screen(), MenuScreen::Root);

        menu.set_enabled(true);
        assert!(menu.is_enabled());
        assert_eq!(menu.screen(), MenuScreen::Main);
        for _ in 0..30 {
            menu.update(FRAME);
        }
        assert_eq!(menu.fade_state(), VisibilityState::Enabled);
        assert!(harness.audio.cues.borrow().contains(&SoundCue::EnterMenu));
    }

    #[test]
    fn test_input_ignored_while_disabled() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        menu.set_enabled(false);
        menu.handle_input(&[MenuAction::Back]);
        assert_eq!(menu.screen(), MenuScreen::Main);

        let quit = menu.gui_control_manager().id(&MainButton::Quit.control_name()).unwrap();
        menu.gui_control_manager().press(quit);
        assert_eq!(menu.update(FRAME), MenuEvent::None);
        assert_eq!(menu.screen(), MenuScreen::Main);
    }

    #[test]
    fn test_skirmish_end_to_end() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();

        press(&mut menu, &MainButton::Skirmish.control_name());
        assert_eq!(menu.screen(), MenuScreen::Players);
        press(&mut menu, &players_button_name(Player::P2));
        assert_eq!(menu.screen(), MenuScreen::Skirmish);
        assert_eq!(menu.pending_config().scene.as_deref(), Some("Grasslands"));

        press(&mut menu, BUTTON_SKIRMISH_NEXT);
        assert_eq!(menu.screen(), MenuScreen::Difficulty);

        let slider = menu.gui_control_manager().id(SLIDER_FUNDS).unwrap();
        assert!(menu.gui_control_manager().drag(slider, 500));
        menu.update(FRAME);
        press(&mut menu, &difficulty_button_name(Difficulty::Medium));

        let event = press(&mut menu, BUTTON_START_SKIRMISH);
        let MenuEvent::RestartActivity(ActivityRequest::Skirmish(config)) = &event else {
            panic!("unexpected event {:?}", event);
        };
        assert_eq!(config.players, 2);
        assert_eq!(config.starting_funds, 500);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.scene.as_deref(), Some("Grasslands"));
        assert_eq!(menu.activity_restarted(), Some(&ActivityRequest::Skirmish(config.clone())));
        assert!(!menu.scenario_started());
        assert!(!menu.is_enabled());

        // One-shot: gone after the next frame
        menu.update(FRAME);
        assert!(menu.activity_restarted().is_none());
    }

    #[test]
    fn test_start_disabled_without_scene() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let modules = StaticRegistry {
            scenes: Vec::new(),
            ..registry()
        };
        let mut menu = MainMenu::create(&mut gui, harness.services(modules), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Skirmish.control_name());
        press(&mut menu, &players_button_name(Player::P1));
        press(&mut menu, BUTTON_SKIRMISH_NEXT);
        assert_eq!(menu.screen(), MenuScreen::Skirmish);

        menu.activate_screen(MenuScreen::Difficulty);
        let start = menu.gui_control_manager().id(BUTTON_START_SKIRMISH).unwrap();
        assert!(!menu.gui_control_manager().is_enabled(start));
        assert!(!menu.gui_control_manager().press(start));
    }

    #[test]
    fn test_next_without_scene_flashes_warning() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let modules = StaticRegistry {
            scenes: Vec::new(),
            ..registry()
        };
        let mut menu = MainMenu::create(&mut gui, harness.services(modules), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Skirmish.control_name());
        press(&mut menu, &players_button_name(Player::P1));
        press(&mut menu, BUTTON_SKIRMISH_NEXT);
        assert_eq!(menu.screen(), MenuScreen::Skirmish);
        assert_eq!(harness.audio.cues.borrow().last(), Some(&SoundCue::UserError));

        let description = menu.gui_control_manager().id(LABEL_SCENE_DESCRIPTION).unwrap();
        assert_eq!(menu.gui_control_manager().text(description), BlinkNotice::NoScene.text());
        menu.update(0.3);
        assert_eq!(menu.gui_control_manager().text(description), "No scenes available for this many players");
        menu.update(0.3);
        assert_eq!(menu.gui_control_manager().text(description), BlinkNotice::NoScene.text());

        // Settles on the normal text once the flashing is over
        for _ in 0..10 {
            menu.update(0.3);
        }
        assert_eq!(menu.gui_control_manager().text(description), "No scenes available for this many players");
    }

    #[test]
    fn test_start_without_funds_is_refused() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        menu.set_start_funds(0);
        press(&mut menu, &MainButton::Skirmish.control_name());
        press(&mut menu, &players_button_name(Player::P2));
        press(&mut menu, BUTTON_SKIRMISH_NEXT);

        let event = press(&mut menu, BUTTON_START_SKIRMISH);
        assert_eq!(event, MenuEvent::None);
        assert!(menu.is_enabled());
        assert_eq!(menu.screen(), MenuScreen::Difficulty);
        let funds = menu.gui_control_manager().id(LABEL_FUNDS).unwrap();
        assert_eq!(menu.gui_control_manager().text(funds), BlinkNotice::NoFunds.text());

        // Leaving the screen ends the warning
        menu.activate_screen(MenuScreen::Skirmish);
        menu.activate_screen(MenuScreen::Difficulty);
        assert_eq!(menu.gui_control_manager().text(funds), "Starting Funds: 0 oz");
    }

    #[test]
    fn test_promo_only_on_main_screen_once_enabled() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        let promo = menu.gui_control_manager().id(BUTTON_PROMO).unwrap();
        assert!(!menu.allow_promo());
        assert!(!menu.gui_control_manager().is_shown(promo));

        menu.set_promo_box(Rect::new(430, 270, 120, 40));
        menu.set_promo_enabled(true);
        assert!(menu.allow_promo());
        assert_eq!(menu.gui_control_manager().absolute_rect(promo), Rect::new(430, 270, 120, 40));

        menu.handle_input(&[MenuAction::Click(450, 280)]);
        assert_eq!(menu.update(FRAME), MenuEvent::None);
        assert!(menu.promo_clicked());
        assert!(menu.is_enabled());
        menu.update(FRAME);
        assert!(!menu.promo_clicked());

        menu.activate_screen(MenuScreen::Options);
        assert!(!menu.allow_promo());
        assert!(!menu.gui_control_manager().is_shown(promo));
    }

    #[test]
    fn test_scenes_filtered_by_player_count() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Skirmish.control_name());
        press(&mut menu, &players_button_name(Player::P3));
        let combo = menu.gui_control_manager().id(COMBO_SCENE).unwrap();
        assert_eq!(menu.gui_control_manager().list(combo).unwrap().items, vec!["Grasslands".to_string()]);
    }

    #[test]
    fn test_only_first_decision_per_frame() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        menu.set_activity_running(true);

        let gui = menu.gui_control_manager();
        let multiplayer = gui.id(&MainButton::Multiplayer.control_name()).unwrap();
        let resume = gui.id(&MainButton::Resume.control_name()).unwrap();
        assert!(gui.press(multiplayer));
        assert!(gui.press(resume));

        assert_eq!(menu.update(FRAME), MenuEvent::StartScenario);
        assert!(menu.scenario_started());
        assert!(!menu.activity_resumed());
        assert!(!menu.campaign_started());
        assert!(!menu.quit_program());
        assert!(menu.activity_restarted().is_none());
    }

    #[test]
    fn test_resume_hidden_without_activity() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        let resume = menu.gui_control_manager().id(&MainButton::Resume.control_name()).unwrap();
        assert!(!menu.gui_control_manager().is_shown(resume));
        menu.set_activity_running(true);
        assert!(menu.gui_control_manager().is_shown(resume));
        assert_eq!(press(&mut menu, &MainButton::Resume.control_name()), MenuEvent::ResumeActivity);
    }

    #[test]
    fn test_campaign_offers_tutorial_once() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();

        assert_eq!(press(&mut menu, &MainButton::Campaign.control_name()), MenuEvent::None);
        assert_eq!(menu.screen(), MenuScreen::Meta);
        assert_eq!(
            press(&mut menu, &MainButton::PlayTutorial.control_name()),
            MenuEvent::RestartActivity(ActivityRequest::Tutorial)
        );

        menu.set_enabled(true);
        assert_eq!(press(&mut menu, &MainButton::Campaign.control_name()), MenuEvent::StartCampaign);
        assert!(menu.campaign_started());
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();

        menu.handle_input(&[MenuAction::Back]);
        assert_eq!(menu.screen(), MenuScreen::Quit);
        press(&mut menu, &MainButton::QuitCancel.control_name());
        assert_eq!(menu.screen(), MenuScreen::Main);

        press(&mut menu, &MainButton::Quit.control_name());
        assert_eq!(press(&mut menu, &MainButton::QuitConfirm.control_name()), MenuEvent::Quit);
        assert!(menu.quit_program());
        assert!(menu.is_enabled());
    }

    #[test]
    fn test_back_follows_screen_parents() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Skirmish.control_name());
        press(&mut menu, &players_button_name(Player::P1));
        press(&mut menu, BUTTON_SKIRMISH_NEXT);

        menu.handle_input(&[MenuAction::Back]);
        assert_eq!(menu.screen(), MenuScreen::Skirmish);
        press(&mut menu, &MenuScreen::Skirmish.back_button_name());
        assert_eq!(menu.screen(), MenuScreen::Players);
        assert!(harness.audio.cues.borrow().contains(&SoundCue::BackButtonPress));
    }

    #[test]
    fn test_sound_slider_plays_test_cue_and_saves() {
        let dir = std::env::temp_dir().join(format!("game_menu_main_menu_options_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut services = harness.services(registry());
        services.settings_store = Some(SettingsManager::new(&dir).unwrap());
        let mut menu = MainMenu::create(&mut gui, services, MenuSettings::default()).unwrap();

        press(&mut menu, &MainButton::Options.control_name());
        let slider = menu.gui_control_manager().id(SLIDER_SOUND_VOLUME).unwrap();
        assert!(menu.gui_control_manager().drag(slider, 30));
        menu.update(FRAME);

        assert_eq!(menu.settings().audio.sound_volume, 0.3);
        assert_eq!(harness.audio.cues.borrow().last(), Some(&SoundCue::Test));
        assert_eq!(harness.audio.volumes.borrow().1, 0.3);

        press(&mut menu, &MenuScreen::Options.back_button_name());
        let saved = SettingsManager::new(&dir).unwrap().load().unwrap();
        assert_eq!(saved.audio.sound_volume, 0.3);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_device_cycle_clears_bindings() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut settings = MenuSettings::default();
        settings.players[0].bindings.insert(InputElement::Fire, "Mouse:Left".to_string());
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), settings).unwrap();

        press(&mut menu, &MainButton::Options.control_name());
        press(&mut menu, &OptionsButton::NextDevice(Player::P1).control_name());
        let input = &menu.settings().players[0];
        assert_eq!(input.device, InputDevice::Gamepad(0));
        assert!(input.bindings.is_empty());

        let label = menu.gui_control_manager().id(&device_label_name(Player::P1)).unwrap();
        assert_eq!(menu.gui_control_manager().text(label), "P1: Gamepad 1");
    }

    #[test]
    fn test_config_wizard_binds_and_returns_to_options() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();

        press(&mut menu, &MainButton::Options.control_name());
        press(&mut menu, &OptionsButton::Configure(Player::P1).control_name());
        assert_eq!(menu.screen(), MenuScreen::Config);
        assert!(menu.is_capturing_binding());

        menu.handle_input(&[MenuAction::Bind("Key:I".to_string())]);
        press(&mut menu, BUTTON_CONFIG_SKIP);
        let steps = menu.gui_control_manager().id(&ConfigLabel::Steps.control_name()).unwrap();
        assert_eq!(menu.gui_control_manager().text(steps), "Step 3 of 11");

        for i in 0..9 {
            menu.handle_input(&[MenuAction::Bind(format!("Key:{}", i))]);
        }
        assert_eq!(menu.screen(), MenuScreen::Options);
        let bindings = &menu.settings().players[0].bindings;
        assert_eq!(bindings[&InputElement::MoveUp], "Key:I");
        assert!(!bindings.contains_key(&InputElement::MoveDown));
        assert_eq!(bindings.len(), 10);
    }

    #[test]
    fn test_left_click_on_empty_space_binds_mouse_left() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Options.control_name());
        press(&mut menu, &OptionsButton::Configure(Player::P1).control_name());

        // Clicks on a control still press it
        let skip = menu.gui_control_manager().id(BUTTON_CONFIG_SKIP).unwrap();
        let rect = menu.gui_control_manager().absolute_rect(skip);
        for _ in 0..4 {
            menu.handle_input(&[MenuAction::Click(rect.x() + 2, rect.y() + 2)]);
            menu.update(FRAME);
        }
        let steps = menu.gui_control_manager().id(&ConfigLabel::Steps.control_name()).unwrap();
        assert_eq!(menu.gui_control_manager().text(steps), "Step 5 of 11");

        menu.handle_input(&[MenuAction::Click(80, 200)]);
        assert_eq!(menu.gui_control_manager().text(steps), "Step 6 of 11");
        for _ in 0..6 {
            press(&mut menu, BUTTON_CONFIG_SKIP);
        }
        assert_eq!(menu.screen(), MenuScreen::Options);
        let bindings = &menu.settings().players[0].bindings;
        assert_eq!(bindings[&InputElement::Fire], "Mouse:Left");
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_config_gamepad_defaults() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();

        press(&mut menu, &MainButton::Options.control_name());
        press(&mut menu, &OptionsButton::Configure(Player::P2).control_name());
        assert!(!menu.is_capturing_binding());
        let skip = menu.gui_control_manager().id(BUTTON_CONFIG_SKIP).unwrap();
        assert!(!menu.gui_control_manager().is_shown(skip));

        press(&mut menu, &gamepad_type_button_name(GamepadType::Xbox360));
        press(&mut menu, BUTTON_CONFIG_DEFAULT);
        assert_eq!(menu.screen(), MenuScreen::Options);
        let input = &menu.settings().players[1];
        assert_eq!(input.gamepad_type, Some(GamepadType::Xbox360));
        assert_eq!(input.bindings.len(), 19);
    }

    #[test]
    fn test_config_back_on_first_step_cancels() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Options.control_name());
        press(&mut menu, &OptionsButton::Configure(Player::P1).control_name());
        menu.handle_input(&[MenuAction::Back]);
        assert_eq!(menu.screen(), MenuScreen::Options);
        assert!(menu.settings().players[0].bindings.is_empty());
    }

    #[test]
    fn test_mod_toggle_twice_restores() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::ModManager.control_name());

        let list = menu.gui_control_manager().id(LIST_MODS).unwrap();
        assert!(menu.gui_control_manager().choose(list, 1));
        menu.update(FRAME);
        let before = menu.gui_control_manager().list(list).unwrap().items.clone();

        press(&mut menu, BUTTON_TOGGLE_MOD);
        assert!(menu.settings().disabled_mods.contains("Ronin.rte"));
        assert_eq!(menu.gui_control_manager().list(list).unwrap().items[1], "[OFF] Ronin - Ronin.rte");
        assert_eq!(menu.gui_control_manager().selected_index(list), Some(1));

        press(&mut menu, BUTTON_TOGGLE_MOD);
        assert!(menu.settings().disabled_mods.is_empty());
        assert_eq!(menu.gui_control_manager().list(list).unwrap().items, before);
    }

    #[test]
    fn test_script_toggle_without_selection_is_error() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::ModManager.control_name());
        press(&mut menu, BUTTON_TOGGLE_SCRIPT);
        assert!(menu.settings().enabled_scripts.is_empty());
        assert_eq!(harness.audio.cues.borrow().last(), Some(&SoundCue::UserError));

        menu.toggle_script(0);
        assert!(menu.settings().enabled_scripts.contains("Auto Reload"));
    }

    #[test]
    fn test_mod_manager_lists_modules_installed_meanwhile() {
        use crate::modules::DirectoryRegistry;
        use std::fs;

        let dir = std::env::temp_dir().join(format!("game_menu_menu_rescan_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("Ronin.rte")).unwrap();

        let mut gui = built_gui();
        let harness = Harness::new();
        let services = MenuServices {
            modules: Box::new(DirectoryRegistry::scan(&dir).unwrap()),
            ..harness.services(StaticRegistry::default())
        };
        let mut menu = MainMenu::create(&mut gui, services, MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::ModManager.control_name());
        let list = menu.gui_control_manager().id(LIST_MODS).unwrap();
        assert_eq!(menu.gui_control_manager().list(list).unwrap().items.len(), 1);

        fs::create_dir(dir.join("Coalition.rte")).unwrap();
        menu.activate_screen(MenuScreen::Main);
        press(&mut menu, &MainButton::ModManager.control_name());
        let items = menu.gui_control_manager().list(list).unwrap().items.clone();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|item| item.ends_with("Coalition.rte")));

        fs::remove_dir_all(&dir).unwrap();
    }

    fn open_publish_wizard(menu: &mut MainMenu) {
        press(menu, &MainButton::Editor.control_name());
        press(menu, &EditorButton::WorkshopPublish.control_name());
        assert_eq!(menu.screen(), MenuScreen::WorkshopManager);
        let list = menu.gui_control_manager().id(LIST_UNPUBLISHED).unwrap();
        assert!(menu.gui_control_manager().choose(list, 0));
        menu.update(FRAME);
        press(menu, BUTTON_PUBLISH_NEW);
        assert_eq!(menu.screen(), MenuScreen::PublishSteps);
    }

    #[test]
    fn test_publish_steps_stay_in_range() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        open_publish_wizard(&mut menu);

        let back = menu.gui_control_manager().id(BUTTON_PUBLISH_BACK).unwrap();
        assert!(!menu.gui_control_manager().press(back));
        assert_eq!(menu.publish_wizard().step(), PublishStep::First);

        press(&mut menu, BUTTON_PUBLISH_NEXT);
        assert_eq!(menu.publish_wizard().step(), PublishStep::Description);
        // Next is disabled until there is a title
        let next = menu.gui_control_manager().id(BUTTON_PUBLISH_NEXT).unwrap();
        assert!(!menu.gui_control_manager().press(next));

        menu.handle_input(&[MenuAction::Back]);
        assert_eq!(menu.publish_wizard().step(), PublishStep::First);
        assert_eq!(menu.screen(), MenuScreen::PublishSteps);
        menu.handle_input(&[MenuAction::Back]);
        assert_eq!(menu.screen(), MenuScreen::WorkshopManager);
        assert!(menu.publish_wizard().module.is_none());
    }

    #[test]
    fn test_publish_submits_and_reports_success() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        open_publish_wizard(&mut menu);
        assert_eq!(menu.publish_wizard().module.as_deref(), Some("Ronin.rte"));

        press(&mut menu, BUTTON_PUBLISH_NEXT);
        let title = menu.gui_control_manager().id(TEXT_PUBLISH_TITLE).unwrap();
        assert!(menu.gui_control_manager().type_text(title, "Ronin Pack"));
        menu.update(FRAME);
        press(&mut menu, BUTTON_PUBLISH_NEXT);
        press(&mut menu, &PublishTag::Weapons.control_name());
        press(&mut menu, BUTTON_PUBLISH_NEXT);
        press(&mut menu, BUTTON_PUBLISH_NEXT);

        let wizard = menu.publish_wizard();
        assert_eq!(wizard.step(), PublishStep::Last);
        assert!(wizard.is_complete());
        assert_eq!(wizard.published_id(), Some("item-1"));

        let submissions = harness.publisher.submissions.borrow();
        assert_eq!(submissions[0].title, "Ronin Pack");
        assert_eq!(submissions[0].tags, vec!["Weapons".to_string()]);
        drop(submissions);

        let result = menu.gui_control_manager().id(LABEL_PUBLISH_RESULT).unwrap();
        assert_eq!(menu.gui_control_manager().text(result), "Published! Item id: item-1");

        press(&mut menu, BUTTON_PUBLISH_CANCEL);
        let published = menu.gui_control_manager().id(LIST_PUBLISHED).unwrap();
        assert_eq!(menu.gui_control_manager().list(published).unwrap().items.len(), 1);
    }

    #[test]
    fn test_completed_publish_cannot_be_stepped_back_into() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        open_publish_wizard(&mut menu);
        press(&mut menu, BUTTON_PUBLISH_NEXT);
        let title = menu.gui_control_manager().id(TEXT_PUBLISH_TITLE).unwrap();
        menu.gui_control_manager().type_text(title, "Ronin Pack");
        menu.update(FRAME);
        for _ in 0..3 {
            press(&mut menu, BUTTON_PUBLISH_NEXT);
        }
        assert!(menu.publish_wizard().is_complete());

        let gui = menu.gui_control_manager();
        let back = gui.id(BUTTON_PUBLISH_BACK).unwrap();
        let next = gui.id(BUTTON_PUBLISH_NEXT).unwrap();
        assert!(!gui.press(back));
        assert!(!gui.press(next));
        assert_eq!(menu.publish_wizard().step(), PublishStep::Last);

        menu.handle_input(&[MenuAction::Back]);
        assert_eq!(menu.screen(), MenuScreen::WorkshopManager);
        assert!(!menu.publish_wizard().is_complete());
        assert_eq!(harness.publisher.submissions.borrow().len(), 1);
    }

    #[test]
    fn test_submit_without_module_reports_error() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        menu.setup_and_submit_publishing();
        assert!(menu.publish_wizard().log().last().unwrap().starts_with("ERROR:"));
        assert!(harness.publisher.submissions.borrow().is_empty());
        assert_eq!(harness.audio.cues.borrow().last(), Some(&SoundCue::UserError));
    }

    #[test]
    fn test_publish_failure_stays_on_agreement() {
        let mut gui = built_gui();
        let mut harness = Harness::new();
        harness.publisher.status = 7;
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        open_publish_wizard(&mut menu);

        press(&mut menu, BUTTON_PUBLISH_NEXT);
        let title = menu.gui_control_manager().id(TEXT_PUBLISH_TITLE).unwrap();
        menu.gui_control_manager().type_text(title, "Ronin Pack");
        menu.update(FRAME);
        for _ in 0..3 {
            press(&mut menu, BUTTON_PUBLISH_NEXT);
        }

        let wizard = menu.publish_wizard();
        assert_eq!(wizard.step(), PublishStep::Agreement);
        assert!(!wizard.is_complete());
        assert!(wizard.log().last().unwrap().contains("status 7"));
        assert!(harness.publisher.submissions.borrow().is_empty());
    }

    #[test]
    fn test_progress_reports_reach_status_list() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        menu.publishing_progress_report("Uploading 10%", true);
        menu.publishing_progress_report("Uploading 50%", false);
        menu.publishing_success_report("abc");

        let status = menu.gui_control_manager().id(LIST_PUBLISH_STATUS).unwrap();
        let items = menu.gui_control_manager().list(status).unwrap().items.clone();
        assert_eq!(items, vec!["Uploading 50%".to_string(), "Published as abc".to_string()]);
        assert_eq!(menu.publish_wizard().published_id(), Some("abc"));
    }

    #[test]
    fn test_set_start_funds_updates_slider() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        menu.set_start_funds(2500);
        assert_eq!(menu.pending_config().starting_funds, 2500);
        let slider = menu.gui_control_manager().id(SLIDER_FUNDS).unwrap();
        assert_eq!(menu.gui_control_manager().slider_value(slider), 2500);
    }

    #[test]
    fn test_max_resolution_limits_choices() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        menu.set_max_resolution(Resolution::new(1280, 720));
        press(&mut menu, &MainButton::Options.control_name());

        let combo = menu.gui_control_manager().id(COMBO_RESOLUTION).unwrap();
        let items = menu.gui_control_manager().list(combo).unwrap().items.clone();
        assert_eq!(items, vec!["640x360", "960x540", "1280x720"]);

        assert!(menu.gui_control_manager().choose(combo, 0));
        menu.update(FRAME);
        assert_eq!(menu.settings().video.resolution, Resolution::new(640, 360));
        let notice = menu.gui_control_manager().id(LABEL_RESOLUTION_RESTART).unwrap();
        assert!(!menu.gui_control_manager().text(notice).is_empty());
    }

    #[test]
    fn test_editor_buttons_restart_into_editor() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Editor.control_name());
        let button = EditorButton::Launch(crate::activity::EditorKind::Gib);
        assert_eq!(
            press(&mut menu, &button.control_name()),
            MenuEvent::RestartActivity(ActivityRequest::Editor(crate::activity::EditorKind::Gib))
        );
    }

    #[test]
    fn test_credits_scroll_wraps() {
        let mut gui = built_gui();
        let harness = Harness::new();
        let mut menu = MainMenu::create(&mut gui, harness.services(registry()), MenuSettings::default()).unwrap();
        press(&mut menu, &MainButton::Credits.control_name());

        let list = menu.gui_control_manager().id(LIST_CREDITS).unwrap();
        menu.update(CREDITS_SCROLL_INTERVAL * 2.0 + 0.01);
        assert_eq!(menu.gui_control_manager().list(list).unwrap().scroll, 2);

        menu.update(CREDITS_SCROLL_INTERVAL * (CREDITS.len() - 2) as f32);
        assert_eq!(menu.gui_control_manager().list(list).unwrap().scroll, 0);
    }
}
