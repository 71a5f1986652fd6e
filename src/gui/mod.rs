//! Screen-Space GUI Toolkit
//!
//! A small retained-mode widget system the menu is built on.
//!
//! # Architecture
//!
//! - [`ControlManager`] owns every widget and hands out [`WidgetId`]s
//! - Widgets are looked up by name once, when the owner is created
//! - Input arrives as [`MenuAction`](crate::input_system::MenuAction)s and
//!   leaves as queued [`GuiEvent`]s, drained once per frame
//! - [`render_gui`] draws everything with SDL2 primitives at one opacity
//!
//! # Example Usage
//!
//! ```ignore
//! let mut gui = ControlManager::new();
//! let ok = gui.add(None, "ButtonOK", Rect::new(10, 10, 80, 16), WidgetKind::button("OK"))?;
//!
//! gui.handle_action(&MenuAction::Click(20, 15));
//! for event in gui.drain_events() {
//!     if event.widget == ok { /* ... */ }
//! }
//!
//! render_gui(&gui, &mut canvas, &GuiStyle::default(), 1.0)?;
//! ```

pub mod control_manager;
pub mod error;
pub mod render;
pub mod widgets;

pub use control_manager::{ControlManager, GuiEvent, GuiEventKind};
pub use error::GuiError;
pub use render::{render_gui, GuiStyle};
pub use widgets::{ListState, SliderState, WidgetId, WidgetKind};
