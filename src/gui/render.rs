//! Widget Rendering
//!
//! Draws every shown widget of a [`ControlManager`] with SDL2 primitives and the
//! bitmap font. The whole GUI is drawn with one opacity so the menu can fade in
//! and out as a unit.

use super::control_manager::{ControlManager, LIST_ROW_HEIGHT};
use super::widgets::{WidgetId, WidgetKind};
use crate::text::{draw_text, draw_text_centered, wrap_text, GLYPH_ADVANCE, LINE_HEIGHT};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

/// Configuration for GUI appearance
#[derive(Debug, Clone)]
pub struct GuiStyle {
    /// Full-screen backdrop behind all panels
    pub backdrop_color: Color,

    /// Panel background color
    pub panel_color: Color,

    /// Border color
    pub border_color: Color,

    /// Panel title text color
    pub title_color: Color,

    /// Normal text color
    pub text_color: Color,

    /// Text color for disabled controls
    pub disabled_text_color: Color,

    /// Focused control highlight
    pub highlight_color: Color,

    /// Fill for buttons, tracks and boxes
    pub control_color: Color,
}

impl Default for GuiStyle {
    fn default() -> Self {
        GuiStyle {
            backdrop_color: Color::RGBA(10, 10, 16, 230),
            panel_color: Color::RGB(30, 30, 40),
            border_color: Color::RGB(100, 100, 120),
            title_color: Color::RGB(220, 220, 240),
            text_color: Color::RGB(200, 200, 210),
            disabled_text_color: Color::RGB(90, 90, 100),
            highlight_color: Color::RGB(80, 100, 140),
            control_color: Color::RGB(45, 45, 60),
        }
    }
}

/// Scales a color's alpha by `opacity` (0.0 to 1.0)
fn faded(color: Color, opacity: f32) -> Color {
    let alpha = (color.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color::RGBA(color.r, color.g, color.b, alpha)
}

/// Renders all shown widgets in creation order (children after parents)
pub fn render_gui(
    gui: &ControlManager,
    canvas: &mut Canvas<Window>,
    style: &GuiStyle,
    opacity: f32,
) -> Result<(), String> {
    if opacity <= 0.0 {
        return Ok(());
    }

    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(faded(style.backdrop_color, opacity));
    canvas.fill_rect(None)?;

    for (id, _) in gui.widgets() {
        if gui.is_shown(id) {
            render_widget(gui, id, canvas, style, opacity)?;
        }
    }

    canvas.set_blend_mode(BlendMode::None);
    Ok(())
}

fn render_widget(
    gui: &ControlManager,
    id: WidgetId,
    canvas: &mut Canvas<Window>,
    style: &GuiStyle,
    opacity: f32,
) -> Result<(), String> {
    let widget = gui.widget(id);
    let rect = gui.absolute_rect(id);
    let focused = gui.focus() == Some(id);
    let text_color = faded(
        if widget.enabled { style.text_color } else { style.disabled_text_color },
        opacity,
    );
    let border = faded(style.border_color, opacity);

    match &widget.kind {
        WidgetKind::CollectionBox { title } => {
            canvas.set_draw_color(faded(style.panel_color, opacity));
            canvas.fill_rect(rect)?;
            canvas.set_draw_color(border);
            canvas.draw_rect(rect)?;
            canvas.draw_rect(Rect::new(rect.x() + 2, rect.y() + 2, rect.width().saturating_sub(4), rect.height().saturating_sub(4)))?;
            if !title.is_empty() {
                draw_text_centered(canvas, title, rect.x(), rect.width(), rect.y() + 8, faded(style.title_color, opacity), 2)?;
            }
        }
        WidgetKind::Button { text } => {
            let fill = if focused { style.highlight_color } else { style.control_color };
            canvas.set_draw_color(faded(fill, opacity));
            canvas.fill_rect(rect)?;
            canvas.set_draw_color(border);
            canvas.draw_rect(rect)?;
            let text_y = rect.y() + (rect.height() as i32 - 7) / 2;
            draw_text_centered(canvas, text, rect.x(), rect.width(), text_y, text_color, 1)?;
        }
        WidgetKind::Label { text } => {
            let max_chars = (rect.width() / GLYPH_ADVANCE) as usize;
            for (i, line) in wrap_text(text, max_chars).iter().enumerate() {
                let y = rect.y() + (i as u32 * LINE_HEIGHT) as i32;
                if y + LINE_HEIGHT as i32 > rect.bottom() {
                    break;
                }
                draw_text(canvas, line, rect.x(), y, text_color, 1)?;
            }
        }
        WidgetKind::Checkbox { text, checked } => {
            let square = Rect::new(rect.x(), rect.y(), 8, 8);
            if focused {
                canvas.set_draw_color(faded(style.highlight_color, opacity));
                canvas.fill_rect(rect)?;
            }
            canvas.set_draw_color(border);
            canvas.draw_rect(square)?;
            if *checked {
                canvas.set_draw_color(text_color);
                canvas.fill_rect(Rect::new(rect.x() + 2, rect.y() + 2, 4, 4))?;
            }
            draw_text(canvas, text, rect.x() + 12, rect.y(), text_color, 1)?;
        }
        WidgetKind::Slider(slider) => {
            let mid_y = rect.y() + rect.height() as i32 / 2;
            canvas.set_draw_color(faded(style.control_color, opacity));
            canvas.fill_rect(Rect::new(rect.x(), mid_y - 1, rect.width(), 3))?;
            let knob_x = rect.x() + (slider.fraction() * rect.width().saturating_sub(6) as f32) as i32;
            let knob = if focused { style.highlight_color } else { style.border_color };
            canvas.set_draw_color(faded(knob, opacity));
            canvas.fill_rect(Rect::new(knob_x, rect.y(), 6, rect.height()))?;
        }
        WidgetKind::TextBox { text, .. } => {
            canvas.set_draw_color(faded(style.control_color, opacity));
            canvas.fill_rect(rect)?;
            canvas.set_draw_color(if focused { faded(style.highlight_color, opacity) } else { border });
            canvas.draw_rect(rect)?;
            let max_chars = (rect.width().saturating_sub(4) / GLYPH_ADVANCE) as usize;
            let mut lines = wrap_text(text, max_chars);
            if focused {
                if let Some(last) = lines.last_mut() {
                    last.push('_');
                }
            }
            for (i, line) in lines.iter().enumerate() {
                let y = rect.y() + 2 + (i as u32 * LINE_HEIGHT) as i32;
                if y + LINE_HEIGHT as i32 > rect.bottom() {
                    break;
                }
                draw_text(canvas, line, rect.x() + 2, y, text_color, 1)?;
            }
        }
        WidgetKind::ListBox(list) => {
            canvas.set_draw_color(faded(style.control_color, opacity));
            canvas.fill_rect(rect)?;
            canvas.set_draw_color(if focused { faded(style.highlight_color, opacity) } else { border });
            canvas.draw_rect(rect)?;
            let rows = (rect.height() as i32 / LIST_ROW_HEIGHT) as usize;
            for (row, item) in list.items.iter().enumerate().skip(list.scroll).take(rows) {
                let y = rect.y() + ((row - list.scroll) as i32 * LIST_ROW_HEIGHT);
                if list.selected == Some(row) {
                    canvas.set_draw_color(faded(style.highlight_color, opacity));
                    canvas.fill_rect(Rect::new(rect.x() + 1, y, rect.width().saturating_sub(2), LIST_ROW_HEIGHT as u32))?;
                }
                draw_text(canvas, item, rect.x() + 3, y + 1, text_color, 1)?;
            }
        }
        WidgetKind::ComboBox(list) => {
            canvas.set_draw_color(faded(style.control_color, opacity));
            canvas.fill_rect(rect)?;
            canvas.set_draw_color(if focused { faded(style.highlight_color, opacity) } else { border });
            canvas.draw_rect(rect)?;
            let text_y = rect.y() + (rect.height() as i32 - 7) / 2;
            draw_text(canvas, "<", rect.x() + 3, text_y, text_color, 1)?;
            draw_text(canvas, ">", rect.right() - 9, text_y, text_color, 1)?;
            let current = list.selected_text().unwrap_or("-");
            draw_text_centered(canvas, current, rect.x(), rect.width(), text_y, text_color, 1)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faded_scales_alpha() {
        let color = faded(Color::RGBA(10, 20, 30, 200), 0.5);
        assert_eq!(color, Color::RGBA(10, 20, 30, 100));
    }

    #[test]
    fn test_faded_clamps_opacity() {
        assert_eq!(faded(Color::RGB(1, 2, 3), 2.0).a, 255);
        assert_eq!(faded(Color::RGB(1, 2, 3), -1.0).a, 0);
    }

    #[test]
    fn test_default_style_is_opaque_panels() {
        let style = GuiStyle::default();
        assert_eq!(style.panel_color.a, 255);
        assert!(style.backdrop_color.a < 255);
    }
}
