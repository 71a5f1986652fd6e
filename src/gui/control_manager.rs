//! Control Manager
//!
//! Owns every widget of a GUI, resolves names to ids, tracks focus and turns
//! [`MenuAction`]s into [`GuiEvent`]s that the owner drains once per frame.
//!
//! Visibility is hierarchical: a widget is *shown* only if it and all of its
//! ancestors are visible. Hidden or disabled widgets never produce events.

use super::error::GuiError;
use super::widgets::{ListState, Widget, WidgetId, WidgetKind};
#[cfg(test)]
use super::widgets::SliderState;
use crate::input_system::MenuAction;
use sdl2::rect::{Point, Rect};
use std::collections::HashMap;

/// Height of one list box row in pixels
pub const LIST_ROW_HEIGHT: i32 = 10;

/// What happened to a widget
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEventKind {
    Clicked,
    Toggled(bool),
    ValueChanged(i32),
    SelectionChanged(Option<usize>),
    TextChanged,
}

/// A user interaction with a widget, queued until the owner drains it
#[derive(Debug, Clone, PartialEq)]
pub struct GuiEvent {
    pub widget: WidgetId,
    pub kind: GuiEventKind,
}

/// Retained-mode owner of all widgets
pub struct ControlManager {
    widgets: Vec<Widget>,
    names: HashMap<String, WidgetId>,
    focus: Option<WidgetId>,
    events: Vec<GuiEvent>,
}

impl ControlManager {
    pub fn new() -> Self {
        ControlManager {
            widgets: Vec::new(),
            names: HashMap::new(),
            focus: None,
            events: Vec::new(),
        }
    }

    /// Adds a widget; `rect` is relative to the parent's top-left corner
    pub fn add(
        &mut self,
        parent: Option<WidgetId>,
        name: &str,
        rect: Rect,
        kind: WidgetKind,
    ) -> Result<WidgetId, GuiError> {
        if self.names.contains_key(name) {
            return Err(GuiError::DuplicateName(name.to_string()));
        }

        let id = WidgetId(self.widgets.len());
        self.widgets.push(Widget {
            parent,
            rect,
            visible: true,
            enabled: true,
            kind,
        });
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Looks up a control by name
    pub fn id(&self, name: &str) -> Result<WidgetId, GuiError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| GuiError::UnknownControl(name.to_string()))
    }

    /// Looks up a control by name and checks its kind
    pub fn id_of_kind(&self, name: &str, expected: &'static str) -> Result<WidgetId, GuiError> {
        let id = self.id(name)?;
        let found = self.widget(id).kind.kind_name();
        if found != expected {
            return Err(GuiError::WrongKind {
                name: name.to_string(),
                expected,
                found,
            });
        }
        Ok(id)
    }

    pub fn widget(&self, id: WidgetId) -> &Widget {
        &self.widgets[id.0]
    }

    /// Moves or resizes a widget; `rect` is relative to its parent
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        self.widgets[id.0].rect = rect;
    }

    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.widgets.iter().enumerate().map(|(i, w)| (WidgetId(i), w))
    }

    // === Visibility and enabled state ===

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        self.widgets[id.0].visible = visible;
        if !visible && self.focus.is_some_and(|f| self.is_descendant_or_self(f, id)) {
            self.focus = None;
        }
    }

    /// True if the widget and every ancestor are visible
    pub fn is_shown(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            let widget = &self.widgets[c.0];
            if !widget.visible {
                return false;
            }
            current = widget.parent;
        }
        true
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        self.widgets[id.0].enabled = enabled;
        if !enabled && self.focus == Some(id) {
            self.focus = None;
        }
    }

    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.widgets[id.0].enabled
    }

    fn is_descendant_or_self(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.widgets[c.0].parent;
        }
        false
    }

    /// Rectangle in screen coordinates (parents' offsets applied)
    pub fn absolute_rect(&self, id: WidgetId) -> Rect {
        let widget = &self.widgets[id.0];
        let mut rect = widget.rect;
        let mut parent = widget.parent;
        while let Some(p) = parent {
            let parent_widget = &self.widgets[p.0];
            rect.offset(parent_widget.rect.x(), parent_widget.rect.y());
            parent = parent_widget.parent;
        }
        rect
    }

    // === Content accessors ===

    /// Text of a button, label, checkbox, text box or collection box title
    pub fn text(&self, id: WidgetId) -> &str {
        match &self.widgets[id.0].kind {
            WidgetKind::Button { text }
            | WidgetKind::Label { text }
            | WidgetKind::Checkbox { text, .. }
            | WidgetKind::TextBox { text, .. }
            | WidgetKind::CollectionBox { title: text } => text.as_str(),
            WidgetKind::ListBox(list) | WidgetKind::ComboBox(list) => list.selected_text().unwrap_or(""),
            WidgetKind::Slider(_) => "",
        }
    }

    pub fn set_text(&mut self, id: WidgetId, value: &str) {
        match &mut self.widgets[id.0].kind {
            WidgetKind::Button { text }
            | WidgetKind::Label { text }
            | WidgetKind::Checkbox { text, .. }
            | WidgetKind::CollectionBox { title: text } => *text = value.to_string(),
            WidgetKind::TextBox { text, max_len } => *text = value.chars().take(*max_len).collect(),
            other => log::debug!("set_text ignored on {}", other.kind_name()),
        }
    }

    pub fn set_checked(&mut self, id: WidgetId, value: bool) {
        if let WidgetKind::Checkbox { checked, .. } = &mut self.widgets[id.0].kind {
            *checked = value;
        }
    }

    pub fn set_slider_value(&mut self, id: WidgetId, value: i32) {
        if let WidgetKind::Slider(slider) = &mut self.widgets[id.0].kind {
            slider.set_value(value);
        }
    }

    /// Items and selection of a list box or combo box
    pub fn list(&self, id: WidgetId) -> Option<&ListState> {
        match &self.widgets[id.0].kind {
            WidgetKind::ListBox(list) | WidgetKind::ComboBox(list) => Some(list),
            _ => None,
        }
    }

    fn list_mut(&mut self, id: WidgetId) -> Option<&mut ListState> {
        match &mut self.widgets[id.0].kind {
            WidgetKind::ListBox(list) | WidgetKind::ComboBox(list) => Some(list),
            _ => None,
        }
    }

    pub fn selected_index(&self, id: WidgetId) -> Option<usize> {
        self.list(id).and_then(|l| l.selected)
    }

    /// Replaces the items; selection is cleared and scroll reset
    pub fn set_items(&mut self, id: WidgetId, items: Vec<String>) {
        if let Some(list) = self.list_mut(id) {
            list.items = items;
            list.selected = None;
            list.scroll = 0;
        }
    }

    /// Replaces one item's text in place, keeping the selection
    pub fn set_item(&mut self, id: WidgetId, index: usize, text: String) {
        if let Some(item) = self.list_mut(id).and_then(|l| l.items.get_mut(index)) {
            *item = text;
        }
    }

    pub fn select(&mut self, id: WidgetId, index: Option<usize>) {
        if let Some(list) = self.list_mut(id) {
            list.select(index);
        }
    }

    /// Sets the first visible row of a list box, clamped to the items
    pub fn set_scroll(&mut self, id: WidgetId, row: usize) {
        if let Some(list) = self.list_mut(id) {
            list.scroll = row.min(list.items.len().saturating_sub(1));
        }
    }

    // === Focus ===

    pub fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    /// True when keyboard focus is on a text box
    pub fn text_focused(&self) -> bool {
        self.focus
            .is_some_and(|f| matches!(self.widgets[f.0].kind, WidgetKind::TextBox { .. }))
    }

    fn can_interact(&self, id: WidgetId) -> bool {
        let widget = &self.widgets[id.0];
        widget.enabled && widget.kind.is_focusable() && self.is_shown(id)
    }

    fn focus_order(&self) -> Vec<WidgetId> {
        (0..self.widgets.len())
            .map(WidgetId)
            .filter(|&id| self.can_interact(id))
            .collect()
    }

    /// Move focus down (wraps to top)
    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        if order.is_empty() {
            self.focus = None;
            return;
        }
        let next = match self.focus.and_then(|f| order.iter().position(|&o| o == f)) {
            Some(i) => (i + 1) % order.len(),
            None => 0,
        };
        self.focus = Some(order[next]);
    }

    /// Move focus up (wraps to bottom)
    pub fn focus_previous(&mut self) {
        let order = self.focus_order();
        if order.is_empty() {
            self.focus = None;
            return;
        }
        let previous = match self.focus.and_then(|f| order.iter().position(|&o| o == f)) {
            Some(0) | None => order.len() - 1,
            Some(i) => i - 1,
        };
        self.focus = Some(order[previous]);
    }

    // === Events ===

    pub fn drain_events(&mut self) -> Vec<GuiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drops queued events and focus, used when the owning screen changes
    pub fn clear_transient(&mut self) {
        self.events.clear();
        self.focus = None;
    }

    fn push(&mut self, widget: WidgetId, kind: GuiEventKind) {
        self.events.push(GuiEvent { widget, kind });
    }

    /// Routes a menu action to the focused or clicked widget
    ///
    /// Back, Bind and Quit are not GUI concerns and are ignored here.
    pub fn handle_action(&mut self, action: &MenuAction) {
        match action {
            MenuAction::Up => self.focus_previous(),
            MenuAction::Down => self.focus_next(),
            MenuAction::Left(shift) => self.nudge(-1, *shift),
            MenuAction::Right(shift) => self.nudge(1, *shift),
            MenuAction::Confirm => {
                if let Some(f) = self.focus {
                    self.activate(f, None);
                }
            }
            MenuAction::Click(x, y) => {
                let point = Point::new(*x, *y);
                if let Some(id) = self.hit_test(point) {
                    self.focus = Some(id);
                    self.activate(id, Some(point));
                }
            }
            MenuAction::Char(c) => self.edit_text(|text, max_len| {
                if text.chars().count() < max_len {
                    text.push(*c);
                    true
                } else {
                    false
                }
            }),
            MenuAction::Backspace => self.edit_text(|text, _| text.pop().is_some()),
            MenuAction::Back | MenuAction::Bind(_) | MenuAction::Quit => {}
        }
    }

    /// Topmost interactive widget under the point (later widgets draw on top)
    /// Topmost interactive widget under a logical-coordinate point
    pub fn widget_at(&self, x: i32, y: i32) -> Option<WidgetId> {
        self.hit_test(Point::new(x, y))
    }

    fn hit_test(&self, point: Point) -> Option<WidgetId> {
        (0..self.widgets.len())
            .rev()
            .map(WidgetId)
            .find(|&id| self.can_interact(id) && self.absolute_rect(id).contains_point(point))
    }

    fn activate(&mut self, id: WidgetId, point: Option<Point>) {
        let rect = self.absolute_rect(id);
        let kind = match &mut self.widgets[id.0].kind {
            WidgetKind::Button { .. } => Some(GuiEventKind::Clicked),
            WidgetKind::Checkbox { checked, .. } => {
                *checked = !*checked;
                Some(GuiEventKind::Toggled(*checked))
            }
            WidgetKind::Slider(slider) => point.map(|p| {
                let fraction = (p.x() - rect.x()) as f32 / rect.width().max(1) as f32;
                let span = (slider.max - slider.min) as f32;
                slider.set_value(slider.min + (fraction * span).round() as i32);
                GuiEventKind::ValueChanged(slider.value)
            }),
            WidgetKind::ListBox(list) => point.map(|p| {
                let row = ((p.y() - rect.y()) / LIST_ROW_HEIGHT).max(0) as usize + list.scroll;
                list.select(Some(row));
                GuiEventKind::SelectionChanged(list.selected)
            }),
            WidgetKind::ComboBox(list) => {
                if list.items.is_empty() {
                    None
                } else {
                    let next = list.selected.map(|i| (i + 1) % list.items.len()).unwrap_or(0);
                    list.select(Some(next));
                    Some(GuiEventKind::SelectionChanged(list.selected))
                }
            }
            WidgetKind::TextBox { .. } | WidgetKind::Label { .. } | WidgetKind::CollectionBox { .. } => None,
        };

        if let Some(kind) = kind {
            self.push(id, kind);
        }
    }

    fn nudge(&mut self, direction: i32, shift: bool) {
        let Some(focus) = self.focus else { return };
        let kind = match &mut self.widgets[focus.0].kind {
            WidgetKind::Slider(slider) => {
                let multiplier = if shift { 5 } else { 1 };
                let before = slider.value;
                slider.set_value(slider.value + direction * slider.step * multiplier);
                (slider.value != before).then_some(GuiEventKind::ValueChanged(slider.value))
            }
            WidgetKind::ListBox(list) | WidgetKind::ComboBox(list) => {
                let before = list.selected;
                list.step(direction);
                (list.selected != before).then_some(GuiEventKind::SelectionChanged(list.selected))
            }
            _ => None,
        };

        if let Some(kind) = kind {
            self.push(focus, kind);
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String, usize) -> bool) {
        let Some(focus) = self.focus else { return };
        let changed = match &mut self.widgets[focus.0].kind {
            WidgetKind::TextBox { text, max_len } => edit(text, *max_len),
            _ => false,
        };
        if changed {
            self.push(focus, GuiEventKind::TextChanged);
        }
    }
}

impl Default for ControlManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Drivers that stand in for a user in tests
#[cfg(test)]
impl ControlManager {
    /// Own visibility flag, ignoring ancestors
    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.widgets[id.0].visible
    }

    pub fn is_checked(&self, id: WidgetId) -> bool {
        matches!(self.widgets[id.0].kind, WidgetKind::Checkbox { checked: true, .. })
    }

    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        self.focus = id.filter(|&i| self.can_interact(i));
    }

    pub fn slider(&self, id: WidgetId) -> Option<&SliderState> {
        match &self.widgets[id.0].kind {
            WidgetKind::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    pub fn slider_value(&self, id: WidgetId) -> i32 {
        self.slider(id).map(|s| s.value).unwrap_or(0)
    }

    /// Simulates a user activating the widget (click, toggle, cycle)
    ///
    /// Returns false and queues nothing if the widget is hidden or disabled.
    pub fn press(&mut self, id: WidgetId) -> bool {
        if !self.can_interact(id) {
            return false;
        }
        self.activate(id, None);
        true
    }

    /// Simulates a user choosing a list or combo entry
    pub fn choose(&mut self, id: WidgetId, index: usize) -> bool {
        if !self.can_interact(id) {
            return false;
        }
        let selected = match self.list_mut(id) {
            Some(list) => {
                list.select(Some(index));
                list.selected
            }
            None => return false,
        };
        self.push(id, GuiEventKind::SelectionChanged(selected));
        true
    }

    /// Simulates a user dragging a slider to `value`
    pub fn drag(&mut self, id: WidgetId, value: i32) -> bool {
        if !self.can_interact(id) || self.slider(id).is_none() {
            return false;
        }
        self.set_slider_value(id, value);
        let value = self.slider_value(id);
        self.push(id, GuiEventKind::ValueChanged(value));
        true
    }

    /// Simulates a user typing into a text box, replacing its content
    pub fn type_text(&mut self, id: WidgetId, value: &str) -> bool {
        if !self.can_interact(id) || !matches!(self.widgets[id.0].kind, WidgetKind::TextBox { .. }) {
            return false;
        }
        self.set_text(id, value);
        self.push(id, GuiEventKind::TextChanged);
        true
    }
}
