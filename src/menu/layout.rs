//! Widget layout for every menu screen
//!
//! Builds the controls at the 640x360 logical resolution under the names
//! [`MainMenu::create`](super::MainMenu::create) looks up. Each screen is a
//! top-level collection box; everything on the screen is its child, so hiding
//! the box hides the screen.

use super::game_config::{Difficulty, FUNDS_STEP, MAX_STARTING_FUNDS};
use super::ids::*;
use crate::gui::{ControlManager, GuiError, ListState, SliderState, WidgetId, WidgetKind};
use crate::settings::GamepadType;
use sdl2::rect::Rect;

// Single controls, by screen

pub const LABEL_VERSION: &str = "LabelVersion";
pub const BUTTON_PROMO: &str = "ButtonPromo";

pub const COMBO_SCENE: &str = "ComboScene";
pub const LABEL_SCENE_DESCRIPTION: &str = "LabelSceneDescription";
pub const BUTTON_CPU_TEAM: &str = "ButtonCpuTeam";
pub const LABEL_CPU_TEAM: &str = "LabelCpuTeam";
pub const BUTTON_SKIRMISH_NEXT: &str = "ButtonSkirmishNext";

pub const SLIDER_FUNDS: &str = "SliderFunds";
pub const LABEL_FUNDS: &str = "LabelFunds";
pub const LABEL_DIFFICULTY: &str = "LabelDifficulty";
pub const BUTTON_START_SKIRMISH: &str = "ButtonStartSkirmish";

pub const COMBO_RESOLUTION: &str = "ComboResolution";
pub const LABEL_RESOLUTION_RESTART: &str = "LabelResolutionRestart";
pub const SLIDER_MUSIC_VOLUME: &str = "SliderMusicVolume";
pub const LABEL_MUSIC_VOLUME: &str = "LabelMusicVolume";
pub const SLIDER_SOUND_VOLUME: &str = "SliderSoundVolume";
pub const LABEL_SOUND_VOLUME: &str = "LabelSoundVolume";

pub const BUTTON_CONFIG_SKIP: &str = "ButtonConfigSkip";
pub const BUTTON_CONFIG_BACK: &str = "ButtonConfigBack";
pub const BUTTON_CONFIG_DEFAULT: &str = "ButtonConfigDefault";

pub const LIST_UNPUBLISHED: &str = "ListUnpublished";
pub const LIST_PUBLISHED: &str = "ListPublished";
pub const BUTTON_PUBLISH_NEW: &str = "ButtonPublishNew";
pub const BUTTON_PUBLISH_UPDATE: &str = "ButtonPublishUpdate";
pub const LABEL_WORKSHOP_INFO: &str = "LabelWorkshopInfo";

pub const LABEL_PUBLISH_HEADER: &str = "LabelPublishHeader";
pub const COMBO_PUBLISH_MODULE: &str = "ComboPublishModule";
pub const TEXT_PUBLISH_TITLE: &str = "TextPublishTitle";
pub const TEXT_PUBLISH_DESCRIPTION: &str = "TextPublishDescription";
pub const LABEL_PUBLISH_AGREEMENT: &str = "LabelPublishAgreement";
pub const LIST_PUBLISH_STATUS: &str = "ListPublishStatus";
pub const LABEL_PUBLISH_RESULT: &str = "LabelPublishResult";
pub const BUTTON_PUBLISH_BACK: &str = "ButtonPublishBack";
pub const BUTTON_PUBLISH_NEXT: &str = "ButtonPublishNext";
pub const BUTTON_PUBLISH_CANCEL: &str = "ButtonPublishCancel";

pub const LIST_CREDITS: &str = "ListCredits";
pub const LABEL_META_NOTICE: &str = "LabelMetaNotice";
pub const LABEL_QUIT_NAG: &str = "LabelQuitNag";

pub const LIST_MODS: &str = "ListMods";
pub const LIST_SCRIPTS: &str = "ListScripts";
pub const BUTTON_TOGGLE_MOD: &str = "ButtonToggleMod";
pub const BUTTON_TOGGLE_SCRIPT: &str = "ButtonToggleScript";
pub const LABEL_MOD_DESCRIPTION: &str = "LabelModDescription";

pub const TITLE_MAX_LEN: usize = 64;
pub const DESCRIPTION_MAX_LEN: usize = 512;

// Per-player controls

pub fn players_button_name(player: Player) -> String {
    format!("ButtonPlayers{}", player.number())
}

pub fn team_label_name(player: Player) -> String {
    format!("LabelP{}Team", player.number())
}

pub fn team_button_name(player: Player) -> String {
    format!("ButtonP{}Team", player.number())
}

pub fn device_label_name(player: Player) -> String {
    format!("LabelP{}Device", player.number())
}

pub fn dead_zone_slider_name(player: Player) -> String {
    format!("SliderP{}DeadZone", player.number())
}

pub fn dead_zone_label_name(player: Player) -> String {
    format!("LabelP{}DeadZone", player.number())
}

pub fn dead_zone_shape_name(player: Player) -> String {
    format!("CheckP{}DeadZoneSquare", player.number())
}

pub const CREDITS: &[&str] = &[
    "GAME MENU",
    "",
    "Programming",
    "  The menu team",
    "",
    "Art",
    "  Bitmap font by hand",
    "",
    "Testing",
    "  Everyone who clicked every button",
    "",
    "Thanks for playing!",
];

/// Bottom row button: 0 left (back), 1 center, 2 right (next)
fn bottom(slot: i32) -> Rect {
    Rect::new(10 + slot * 200, 296, 80, 16)
}

/// Centered column button at `row`
fn column(y: i32, row: usize) -> Rect {
    Rect::new(170, y + row as i32 * 20, 160, 16)
}

fn screen(gui: &mut ControlManager, screen: MenuScreen, title: &str) -> Result<WidgetId, GuiError> {
    let rect = if screen == MenuScreen::Root { Rect::new(0, 0, 640, 360) } else { Rect::new(70, 20, 500, 320) };
    gui.add(None, &screen.box_name(), rect, WidgetKind::panel(title))
}

fn back_button(gui: &mut ControlManager, parent: WidgetId, screen: MenuScreen) -> Result<WidgetId, GuiError> {
    gui.add(Some(parent), &screen.back_button_name(), bottom(0), WidgetKind::button("Back"))
}

fn list_box(gui: &mut ControlManager, parent: WidgetId, name: &str, rect: Rect) -> Result<WidgetId, GuiError> {
    gui.add(Some(parent), name, rect, WidgetKind::ListBox(ListState::default()))
}

fn combo_box(gui: &mut ControlManager, parent: WidgetId, name: &str, rect: Rect) -> Result<WidgetId, GuiError> {
    gui.add(Some(parent), name, rect, WidgetKind::ComboBox(ListState::default()))
}

fn slider(
    gui: &mut ControlManager,
    parent: WidgetId,
    name: &str,
    rect: Rect,
    state: SliderState,
) -> Result<WidgetId, GuiError> {
    gui.add(Some(parent), name, rect, WidgetKind::Slider(state))
}

/// Creates every menu control
pub fn build_layout(gui: &mut ControlManager) -> Result<(), GuiError> {
    screen(gui, MenuScreen::Root, "")?;
    build_main(gui)?;
    build_players(gui)?;
    build_skirmish(gui)?;
    build_difficulty(gui)?;
    build_options(gui)?;
    build_config(gui)?;
    build_editor(gui)?;
    build_workshop_manager(gui)?;
    build_publish_steps(gui)?;
    build_credits(gui)?;
    build_meta(gui)?;
    build_quit(gui)?;
    build_mod_manager(gui)?;
    Ok(())
}

fn build_main(gui: &mut ControlManager) -> Result<(), GuiError> {
    let main = screen(gui, MenuScreen::Main, "MAIN MENU")?;
    let buttons = MainButton::ALL.iter().filter(|b| b.screen() == MenuScreen::Main);
    for (row, button) in buttons.enumerate() {
        gui.add(Some(main), &button.control_name(), column(40, row), WidgetKind::button(button.text()))?;
    }
    let version = concat!("v", env!("CARGO_PKG_VERSION"));
    gui.add(Some(main), LABEL_VERSION, Rect::new(10, 304, 120, 8), WidgetKind::label(version))?;

    // Shown only once the host turns it on
    let promo = gui.add(Some(main), BUTTON_PROMO, Rect::new(340, 250, 140, 40), WidgetKind::button("Pioneer"))?;
    gui.set_visible(promo, false);
    Ok(())
}

fn build_players(gui: &mut ControlManager) -> Result<(), GuiError> {
    let players = screen(gui, MenuScreen::Players, "HOW MANY PLAYERS?")?;
    for player in Player::ALL {
        let text = match player.number() {
            1 => "One Player".to_string(),
            n => format!("{} Players", n),
        };
        gui.add(Some(players), &players_button_name(player), column(60, player.index()), WidgetKind::button(&text))?;
    }
    back_button(gui, players, MenuScreen::Players)?;
    Ok(())
}

fn build_skirmish(gui: &mut ControlManager) -> Result<(), GuiError> {
    let skirmish = screen(gui, MenuScreen::Skirmish, "SKIRMISH SETUP")?;
    combo_box(gui, skirmish, COMBO_SCENE, Rect::new(20, 40, 220, 16))?;
    gui.add(Some(skirmish), LABEL_SCENE_DESCRIPTION, Rect::new(20, 62, 460, 56), WidgetKind::label(""))?;

    for player in Player::ALL {
        let y = 130 + player.index() as i32 * 20;
        gui.add(Some(skirmish), &team_label_name(player), Rect::new(20, y + 4, 120, 8), WidgetKind::label(""))?;
        gui.add(Some(skirmish), &team_button_name(player), Rect::new(150, y, 90, 16), WidgetKind::button("Team"))?;
    }
    gui.add(Some(skirmish), LABEL_CPU_TEAM, Rect::new(20, 224, 120, 8), WidgetKind::label("CPU Team"))?;
    gui.add(Some(skirmish), BUTTON_CPU_TEAM, Rect::new(150, 220, 90, 16), WidgetKind::button("None"))?;

    gui.add(Some(skirmish), BUTTON_SKIRMISH_NEXT, bottom(2), WidgetKind::button("Next"))?;
    back_button(gui, skirmish, MenuScreen::Skirmish)?;
    Ok(())
}

fn build_difficulty(gui: &mut ControlManager) -> Result<(), GuiError> {
    let difficulty = screen(gui, MenuScreen::Difficulty, "DIFFICULTY")?;
    gui.add(Some(difficulty), LABEL_FUNDS, Rect::new(20, 40, 200, 8), WidgetKind::label(""))?;
    slider(
        gui,
        difficulty,
        SLIDER_FUNDS,
        Rect::new(20, 52, 460, 10),
        SliderState::new(0, MAX_STARTING_FUNDS, FUNDS_STEP),
    )?;
    for (row, level) in Difficulty::ALL.iter().enumerate() {
        gui.add(Some(difficulty), &difficulty_button_name(*level), column(80, row), WidgetKind::button(level.label()))?;
    }
    gui.add(Some(difficulty), LABEL_DIFFICULTY, Rect::new(20, 190, 460, 8), WidgetKind::label(""))?;
    gui.add(Some(difficulty), BUTTON_START_SKIRMISH, bottom(2), WidgetKind::button("Start"))?;
    back_button(gui, difficulty, MenuScreen::Difficulty)?;
    Ok(())
}

fn build_options(gui: &mut ControlManager) -> Result<(), GuiError> {
    let options = screen(gui, MenuScreen::Options, "OPTIONS")?;
    let fullscreen = OptionsButton::Fullscreen;
    gui.add(Some(options), &fullscreen.control_name(), Rect::new(10, 34, 120, 16), WidgetKind::button("Fullscreen"))?;
    combo_box(gui, options, COMBO_RESOLUTION, Rect::new(140, 34, 140, 16))?;
    gui.add(Some(options), LABEL_RESOLUTION_RESTART, Rect::new(290, 38, 200, 8), WidgetKind::label(""))?;

    gui.add(Some(options), LABEL_MUSIC_VOLUME, Rect::new(10, 57, 150, 8), WidgetKind::label(""))?;
    slider(gui, options, SLIDER_MUSIC_VOLUME, Rect::new(160, 56, 120, 10), SliderState::new(0, 100, 1))?;
    gui.add(Some(options), LABEL_SOUND_VOLUME, Rect::new(10, 71, 150, 8), WidgetKind::label(""))?;
    slider(gui, options, SLIDER_SOUND_VOLUME, Rect::new(160, 70, 120, 10), SliderState::new(0, 100, 1))?;

    for player in Player::ALL {
        let x = 10 + player.index() as i32 * 120;
        gui.add(Some(options), &device_label_name(player), Rect::new(x, 90, 118, 8), WidgetKind::label(""))?;
        gui.add(
            Some(options),
            &OptionsButton::PrevDevice(player).control_name(),
            Rect::new(x, 100, 28, 14),
            WidgetKind::button("<"),
        )?;
        gui.add(
            Some(options),
            &OptionsButton::NextDevice(player).control_name(),
            Rect::new(x + 30, 100, 28, 14),
            WidgetKind::button(">"),
        )?;
        gui.add(
            Some(options),
            &OptionsButton::Configure(player).control_name(),
            Rect::new(x + 60, 100, 56, 14),
            WidgetKind::button("Config"),
        )?;
        gui.add(
            Some(options),
            &OptionsButton::Clear(player).control_name(),
            Rect::new(x, 118, 56, 14),
            WidgetKind::button("Clear"),
        )?;
        gui.add(Some(options), &dead_zone_label_name(player), Rect::new(x, 136, 118, 8), WidgetKind::label(""))?;
        slider(gui, options, &dead_zone_slider_name(player), Rect::new(x, 146, 110, 10), SliderState::new(0, 100, 1))?;
        gui.add(Some(options), &dead_zone_shape_name(player), Rect::new(x, 160, 110, 10), WidgetKind::checkbox("Square"))?;
    }

    for (row, checkbox) in OptionsCheckbox::ALL.iter().enumerate() {
        let rect = Rect::new(10, 182 + row as i32 * 14, 300, 10);
        gui.add(Some(options), &checkbox.control_name(), rect, WidgetKind::checkbox(checkbox.text()))?;
    }
    back_button(gui, options, MenuScreen::Options)?;
    Ok(())
}

fn build_config(gui: &mut ControlManager) -> Result<(), GuiError> {
    let config = screen(gui, MenuScreen::Config, "CONTROL SETUP")?;
    for label in ConfigLabel::ALL {
        let rect = match label {
            ConfigLabel::Title => Rect::new(20, 34, 460, 8),
            ConfigLabel::Recommendation => Rect::new(20, 48, 460, 8),
            ConfigLabel::Steps => Rect::new(20, 62, 460, 8),
            ConfigLabel::Instruction => Rect::new(20, 90, 460, 16),
            ConfigLabel::Input => Rect::new(20, 120, 460, 8),
        };
        gui.add(Some(config), &label.control_name(), rect, WidgetKind::label(""))?;
    }
    for (row, gamepad_type) in GamepadType::ALL.iter().enumerate() {
        gui.add(
            Some(config),
            &gamepad_type_button_name(*gamepad_type),
            column(150, row),
            WidgetKind::button(gamepad_type.label()),
        )?;
    }
    gui.add(Some(config), BUTTON_CONFIG_BACK, bottom(0), WidgetKind::button("Back"))?;
    gui.add(Some(config), BUTTON_CONFIG_DEFAULT, bottom(1), WidgetKind::button("Default"))?;
    gui.add(Some(config), BUTTON_CONFIG_SKIP, bottom(2), WidgetKind::button("Skip"))?;
    Ok(())
}

fn build_editor(gui: &mut ControlManager) -> Result<(), GuiError> {
    let editor = screen(gui, MenuScreen::Editor, "EDITORS")?;
    for (row, button) in EditorButton::ALL.iter().enumerate() {
        gui.add(Some(editor), &button.control_name(), column(40, row), WidgetKind::button(button.text()))?;
    }
    back_button(gui, editor, MenuScreen::Editor)?;
    Ok(())
}

fn build_workshop_manager(gui: &mut ControlManager) -> Result<(), GuiError> {
    let workshop = screen(gui, MenuScreen::WorkshopManager, "WORKSHOP")?;
    gui.add(Some(workshop), "LabelUnpublished", Rect::new(10, 34, 230, 8), WidgetKind::label("Unpublished"))?;
    list_box(gui, workshop, LIST_UNPUBLISHED, Rect::new(10, 44, 230, 200))?;
    gui.add(Some(workshop), "LabelPublished", Rect::new(260, 34, 230, 8), WidgetKind::label("Published"))?;
    list_box(gui, workshop, LIST_PUBLISHED, Rect::new(260, 44, 230, 200))?;
    gui.add(Some(workshop), BUTTON_PUBLISH_NEW, Rect::new(10, 252, 120, 16), WidgetKind::button("Publish New"))?;
    gui.add(Some(workshop), BUTTON_PUBLISH_UPDATE, Rect::new(260, 252, 120, 16), WidgetKind::button("Update"))?;
    gui.add(Some(workshop), LABEL_WORKSHOP_INFO, Rect::new(10, 276, 480, 8), WidgetKind::label(""))?;
    back_button(gui, workshop, MenuScreen::WorkshopManager)?;
    Ok(())
}

fn build_publish_steps(gui: &mut ControlManager) -> Result<(), GuiError> {
    let publish = screen(gui, MenuScreen::PublishSteps, "PUBLISH")?;
    gui.add(Some(publish), LABEL_PUBLISH_HEADER, Rect::new(10, 34, 480, 8), WidgetKind::label(""))?;

    let step_rect = Rect::new(10, 46, 480, 240);
    let first = gui.add(Some(publish), &PublishStep::First.box_name(), step_rect, WidgetKind::panel(""))?;
    gui.add(Some(first), "LabelPublishModule", Rect::new(10, 10, 200, 8), WidgetKind::label("Module to publish:"))?;
    combo_box(gui, first, COMBO_PUBLISH_MODULE, Rect::new(10, 22, 300, 16))?;

    let description = gui.add(Some(publish), &PublishStep::Description.box_name(), step_rect, WidgetKind::panel(""))?;
    gui.add(Some(description), "LabelPublishTitle", Rect::new(10, 10, 200, 8), WidgetKind::label("Title"))?;
    gui.add(Some(description), TEXT_PUBLISH_TITLE, Rect::new(10, 22, 460, 14), WidgetKind::text_box(TITLE_MAX_LEN))?;
    gui.add(
        Some(description),
        "LabelPublishDescription",
        Rect::new(10, 44, 200, 8),
        WidgetKind::label("Description"),
    )?;
    gui.add(
        Some(description),
        TEXT_PUBLISH_DESCRIPTION,
        Rect::new(10, 56, 460, 120),
        WidgetKind::text_box(DESCRIPTION_MAX_LEN),
    )?;

    let tags = gui.add(Some(publish), &PublishStep::Tags.box_name(), step_rect, WidgetKind::panel(""))?;
    for (i, tag) in PublishTag::ALL.iter().enumerate() {
        let rect = Rect::new(10 + (i / 5) as i32 * 230, 10 + (i % 5) as i32 * 16, 200, 10);
        gui.add(Some(tags), &tag.control_name(), rect, WidgetKind::checkbox(tag.tag()))?;
    }

    let agreement = gui.add(Some(publish), &PublishStep::Agreement.box_name(), step_rect, WidgetKind::panel(""))?;
    gui.add(
        Some(agreement),
        LABEL_PUBLISH_AGREEMENT,
        Rect::new(10, 10, 460, 100),
        WidgetKind::label(
            "By publishing you confirm you made this content or have permission to share it. \
             Press Next to publish.",
        ),
    )?;

    let last = gui.add(Some(publish), &PublishStep::Last.box_name(), step_rect, WidgetKind::panel(""))?;
    list_box(gui, last, LIST_PUBLISH_STATUS, Rect::new(10, 10, 460, 180))?;
    gui.add(Some(last), LABEL_PUBLISH_RESULT, Rect::new(10, 200, 460, 8), WidgetKind::label(""))?;

    gui.add(Some(publish), BUTTON_PUBLISH_BACK, bottom(0), WidgetKind::button("Back"))?;
    gui.add(Some(publish), BUTTON_PUBLISH_CANCEL, bottom(1), WidgetKind::button("Cancel"))?;
    gui.add(Some(publish), BUTTON_PUBLISH_NEXT, bottom(2), WidgetKind::button("Next"))?;
    Ok(())
}

fn build_credits(gui: &mut ControlManager) -> Result<(), GuiError> {
    let credits = screen(gui, MenuScreen::Credits, "CREDITS")?;
    let list = list_box(gui, credits, LIST_CREDITS, Rect::new(20, 40, 460, 240))?;
    gui.set_items(list, CREDITS.iter().map(|line| line.to_string()).collect());
    back_button(gui, credits, MenuScreen::Credits)?;
    Ok(())
}

fn build_meta(gui: &mut ControlManager) -> Result<(), GuiError> {
    let meta = screen(gui, MenuScreen::Meta, "CAMPAIGN")?;
    gui.add(
        Some(meta),
        LABEL_META_NOTICE,
        Rect::new(20, 40, 460, 80),
        WidgetKind::label(
            "The campaign is a long game across many scenes. \
             New players should try the tutorial first.",
        ),
    )?;
    for (row, button) in [MainButton::PlayTutorial, MainButton::MetaContinue].iter().enumerate() {
        gui.add(Some(meta), &button.control_name(), column(140, row), WidgetKind::button(button.text()))?;
    }
    back_button(gui, meta, MenuScreen::Meta)?;
    Ok(())
}

fn build_quit(gui: &mut ControlManager) -> Result<(), GuiError> {
    let quit = screen(gui, MenuScreen::Quit, "QUIT")?;
    gui.add(
        Some(quit),
        LABEL_QUIT_NAG,
        Rect::new(20, 40, 460, 16),
        WidgetKind::label("Are you sure you want to quit?"),
    )?;
    for (row, button) in [MainButton::QuitConfirm, MainButton::QuitCancel].iter().enumerate() {
        gui.add(Some(quit), &button.control_name(), column(100, row), WidgetKind::button(button.text()))?;
    }
    Ok(())
}

fn build_mod_manager(gui: &mut ControlManager) -> Result<(), GuiError> {
    let mods = screen(gui, MenuScreen::ModManager, "MOD MANAGER")?;
    gui.add(Some(mods), "LabelMods", Rect::new(10, 34, 230, 8), WidgetKind::label("Mods"))?;
    list_box(gui, mods, LIST_MODS, Rect::new(10, 44, 230, 180))?;
    gui.add(Some(mods), "LabelScripts", Rect::new(260, 34, 230, 8), WidgetKind::label("Global Scripts"))?;
    list_box(gui, mods, LIST_SCRIPTS, Rect::new(260, 44, 230, 180))?;
    gui.add(Some(mods), BUTTON_TOGGLE_MOD, Rect::new(10, 230, 120, 16), WidgetKind::button("Toggle Mod"))?;
    gui.add(Some(mods), BUTTON_TOGGLE_SCRIPT, Rect::new(260, 230, 120, 16), WidgetKind::button("Toggle Script"))?;
    gui.add(Some(mods), LABEL_MOD_DESCRIPTION, Rect::new(10, 254, 480, 32), WidgetKind::label(""))?;
    back_button(gui, mods, MenuScreen::ModManager)?;
    Ok(())
}
