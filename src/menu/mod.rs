//! Front-End Menu
//!
//! Everything between launching the game and starting an activity.
//!
//! # Architecture
//!
//! - `ids`: Closed sets of screens and controls, and their widget names
//! - `layout`: Builds every screen's widgets into a [`ControlManager`](crate::gui::ControlManager)
//! - `main_menu`: [`MainMenu`], the controller that reacts to GUI events
//! - `fader`: Fade-in/fade-out visibility state
//! - `blink`: Flashing warnings for refused actions
//! - `game_config`: The skirmish being set up
//! - `config_wizard`: Step-by-step control binding
//! - `mod_manager`: Enabling and disabling modules and global scripts
//! - `publish`: Publishing wizard and backends
//! - `options`: Settings value conversions for the options screen
//!
//! # Example Usage
//!
//! ```ignore
//! let mut gui = ControlManager::new();
//! build_layout(&mut gui)?;
//! let mut menu = MainMenu::create(&mut gui, services, settings)?;
//!
//! menu.handle_input(&actions);
//! menu.update(dt);
//! if menu.quit_program() {
//!     break;
//! }
//! if let Some(request) = menu.activity_restarted() {
//!     start_activity(request.clone());
//! }
//! menu.draw(&mut canvas)?;
//! ```

pub mod blink;
pub mod config_wizard;
pub mod error;
pub mod event;
pub mod fader;
pub mod game_config;
pub mod ids;
pub mod layout;
pub mod main_menu;
pub mod mod_manager;
pub mod options;
pub mod publish;

pub use fader::VisibilityState;
pub use game_config::PendingGameConfig;
pub use layout::build_layout;
pub use main_menu::{MainMenu, MenuServices};
pub use publish::DirectoryPublisher;
