use log::{error, info, warn};
use sdl2::keyboard::Scancode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

mod activity;
mod audio;
mod gui;
mod input_system;
mod menu;
mod modules;
mod settings;
mod text;

use activity::{ActivityManager, ActivityRequest};
use audio::LogAudio;
use gui::ControlManager;
use input_system::{InputSystem, MenuAction};
use menu::{build_layout, DirectoryPublisher, MainMenu, MenuServices, VisibilityState};
use modules::{DirectoryRegistry, ModuleRegistry, StaticRegistry};
use settings::{Resolution, SettingsManager};
use text::{draw_text_centered, LINE_HEIGHT};

// Menu resolution constants
const GAME_WIDTH: u32 = 640;
const GAME_HEIGHT: u32 = 360;

/// Fixed frame step
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Largest resolution the primary display can show
fn desktop_resolution(video_subsystem: &sdl2::VideoSubsystem) -> Option<Resolution> {
    match video_subsystem.desktop_display_mode(0) {
        Ok(mode) => Some(Resolution::new(mode.w.max(0) as u32, mode.h.max(0) as u32)),
        Err(e) => {
            warn!("Could not detect display mode: {}", e);
            None
        }
    }
}

/// Installed modules, or an empty registry if the folder can't be read
fn load_modules() -> Box<dyn ModuleRegistry> {
    match DirectoryRegistry::scan(DirectoryRegistry::default_directory()) {
        Ok(registry) => Box::new(registry),
        Err(e) => {
            warn!("Module scan failed, continuing without modules: {}", e);
            Box::new(StaticRegistry::default())
        }
    }
}

/// Stand-in for the game while an activity runs
fn draw_activity(canvas: &mut Canvas<Window>, activities: &ActivityManager) -> Result<(), String> {
    canvas.set_draw_color(Color::RGB(10, 25, 15));
    canvas.clear();

    let Some(current) = activities.current() else {
        return Ok(());
    };
    let text_color = Color::RGB(220, 220, 220);
    let line = (LINE_HEIGHT * 2) as i32;
    let top = GAME_HEIGHT as i32 / 2 - line * 2;

    draw_text_centered(canvas, &current.describe(), 0, GAME_WIDTH, top, text_color, 1)?;
    if let Some(started) = activities.started_at() {
        let since = format!("Started {}", started.format("%H:%M:%S"));
        draw_text_centered(canvas, &since, 0, GAME_WIDTH, top + line, text_color, 1)?;
    }
    if activities.is_paused() {
        draw_text_centered(canvas, "Paused", 0, GAME_WIDTH, top + line * 2, text_color, 1)?;
    }
    draw_text_centered(canvas, "Press Escape for the menu", 0, GAME_WIDTH, top + line * 3, text_color, 1)
}

fn main() -> Result<(), String> {
    // Settings first: they carry the log level
    let settings_manager = SettingsManager::new(SettingsManager::default_directory())
        .map_err(|e| format!("Failed to create settings manager: {}", e))?;
    let settings = settings_manager.load_or_default();

    env_logger::Builder::from_default_env()
        .filter_level(settings.log_filter())
        .init();
    info!("Settings file: {}", settings_manager.path().display());

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let controller_subsystem = sdl_context.game_controller()?;

    let resolution = settings.video.resolution;
    let mut window_builder = video_subsystem.window("Game Menu", resolution.width, resolution.height);
    window_builder.position_centered();
    if settings.video.fullscreen {
        window_builder.fullscreen_desktop();
    }
    let window = window_builder.build().map_err(|e| e.to_string())?;
    info!("Window: {}", resolution.label());

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // Set logical size for automatic pixel-perfect scaling
    canvas.set_logical_size(GAME_WIDTH, GAME_HEIGHT).map_err(|e| e.to_string())?;

    let mut event_pump = sdl_context.event_pump()?;
    video_subsystem.text_input().start();

    // Opened controllers close when dropped, so keep them for the whole run
    let mut controllers = Vec::new();
    for index in 0..controller_subsystem.num_joysticks()? {
        if !controller_subsystem.is_game_controller(index) {
            continue;
        }
        match controller_subsystem.open(index) {
            Ok(controller) => {
                info!("Opened controller {}: {}", index, controller.name());
                controllers.push(controller);
            }
            Err(e) => warn!("Could not open controller {}: {}", index, e),
        }
    }

    let publisher = DirectoryPublisher::new(DirectoryPublisher::default_directory())
        .map_err(|e| format!("Failed to open publishing outbox: {}", e))?;
    let services = MenuServices {
        audio: Box::new(LogAudio::new()),
        modules: load_modules(),
        publisher: Box::new(publisher),
        settings_store: Some(settings_manager),
    };

    let starting_funds = settings.starting_funds;
    let mut gui = ControlManager::new();
    build_layout(&mut gui).map_err(|e| format!("Failed to build menu layout: {}", e))?;
    let mut menu = MainMenu::create(&mut gui, services, settings)
        .map_err(|e| format!("Failed to create main menu: {}", e))?;
    if let Some(max) = desktop_resolution(&video_subsystem) {
        menu.set_max_resolution(max);
    }
    menu.set_start_funds(starting_funds);
    menu.set_promo_box(Rect::new(430, 270, 120, 40));
    menu.set_promo_enabled(true);

    let mut input_system = InputSystem::new();
    let mut activities = ActivityManager::new();

    'running: loop {
        let keyboard = event_pump.keyboard_state();
        let shift_held =
            keyboard.is_scancode_pressed(Scancode::LShift) || keyboard.is_scancode_pressed(Scancode::RShift);

        let text_focused = menu.gui_control_manager().text_focused();
        input_system.update_context(menu.is_capturing_binding(), text_focused);
        let actions = input_system.poll_events(&mut event_pump, shift_held);

        if actions.contains(&MenuAction::Quit) {
            break 'running;
        }

        if menu.is_enabled() {
            menu.handle_input(&actions);
        } else if activities.has_activity() && actions.contains(&MenuAction::Back) {
            activities.pause();
            menu.set_activity_running(true);
            menu.set_enabled(true);
        }

        // At most one of these holds after an update
        menu.update(FRAME_TIME);
        if menu.quit_program() {
            break 'running;
        }
        if menu.scenario_started() {
            let config = menu.pending_config().clone();
            activities.start(ActivityRequest::Skirmish(config));
        }
        if menu.campaign_started() {
            activities.start(ActivityRequest::Campaign);
        }
        if let Some(request) = menu.activity_restarted() {
            let request = request.clone();
            activities.end();
            activities.start(request);
        }
        if menu.activity_resumed() && !activities.resume() {
            warn!("Nothing to resume, returning to the menu");
            menu.set_enabled(true);
        }
        if menu.promo_clicked() {
            info!("Promo clicked");
        }

        if menu.fade_state() != VisibilityState::Enabled {
            draw_activity(&mut canvas, &activities)?;
        } else {
            canvas.set_draw_color(Color::RGB(0, 0, 0));
            canvas.clear();
        }
        if menu.fade_state() != VisibilityState::Disabled {
            if let Err(e) = menu.draw(&mut canvas) {
                error!("Menu draw failed: {}", e);
            }
        }
        canvas.present();

        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    info!("Shutting down");
    Ok(())
}
