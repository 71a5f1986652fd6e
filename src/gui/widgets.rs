//! Widget Definitions
//!
//! Plain data for every control the [`ControlManager`](super::ControlManager) owns.
//! Widgets hold no references to each other; parent links are ids, so the
//! manager can hand out ids freely while keeping sole ownership of the widgets.

use sdl2::rect::Rect;

/// Handle to a widget owned by a control manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) usize);

/// Slider range and current position
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub value: i32,
}

impl SliderState {
    pub fn new(min: i32, max: i32, step: i32) -> Self {
        SliderState {
            min,
            max,
            step: step.max(1),
            value: min,
        }
    }

    /// Sets the value, clamped to the range and snapped to the step grid
    pub fn set_value(&mut self, value: i32) {
        let clamped = value.clamp(self.min, self.max);
        let snapped = self.min + ((clamped - self.min) + self.step / 2) / self.step * self.step;
        self.value = snapped.min(self.max);
    }

    /// Position of the value within the range (0.0 to 1.0)
    pub fn fraction(&self) -> f32 {
        if self.max <= self.min {
            0.0
        } else {
            (self.value - self.min) as f32 / (self.max - self.min) as f32
        }
    }
}

/// Items plus selection, shared by list boxes and combo boxes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub items: Vec<String>,
    pub selected: Option<usize>,
    /// First visible row (list boxes only)
    pub scroll: usize,
}

impl ListState {
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
    }

    /// Moves the selection by `delta`, clamped to the list bounds
    pub fn step(&mut self, delta: i32) {
        if self.items.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.items.len() as i32 - 1;
        let next = match self.selected {
            Some(i) => (i as i32 + delta).clamp(0, last),
            None => 0,
        };
        self.selected = Some(next as usize);
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }
}

/// The kind-specific state of a widget
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Container panel; children are hidden with it
    CollectionBox { title: String },
    Button { text: String },
    Label { text: String },
    Checkbox { text: String, checked: bool },
    Slider(SliderState),
    TextBox { text: String, max_len: usize },
    ListBox(ListState),
    ComboBox(ListState),
}

impl WidgetKind {
    pub fn button(text: &str) -> Self {
        WidgetKind::Button { text: text.to_string() }
    }

    pub fn label(text: &str) -> Self {
        WidgetKind::Label { text: text.to_string() }
    }

    pub fn panel(title: &str) -> Self {
        WidgetKind::CollectionBox { title: title.to_string() }
    }

    pub fn checkbox(text: &str) -> Self {
        WidgetKind::Checkbox { text: text.to_string(), checked: false }
    }

    pub fn text_box(max_len: usize) -> Self {
        WidgetKind::TextBox { text: String::new(), max_len }
    }

    /// Human-readable kind name, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            WidgetKind::CollectionBox { .. } => "collection box",
            WidgetKind::Button { .. } => "button",
            WidgetKind::Label { .. } => "label",
            WidgetKind::Checkbox { .. } => "checkbox",
            WidgetKind::Slider(_) => "slider",
            WidgetKind::TextBox { .. } => "text box",
            WidgetKind::ListBox(_) => "list box",
            WidgetKind::ComboBox(_) => "combo box",
        }
    }

    /// Whether keyboard focus can land on this widget
    pub fn is_focusable(&self) -> bool {
        !matches!(self, WidgetKind::CollectionBox { .. } | WidgetKind::Label { .. })
    }
}

/// A single control
#[derive(Debug, Clone)]
pub struct Widget {
    pub parent: Option<WidgetId>,
    pub rect: Rect,
    pub visible: bool,
    pub enabled: bool,
    pub kind: WidgetKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_snaps_to_step() {
        let mut slider = SliderState::new(0, 10000, 500);
        slider.set_value(740);
        assert_eq!(slider.value, 500);
        slider.set_value(760);
        assert_eq!(slider.value, 1000);
        slider.set_value(99999);
        assert_eq!(slider.value, 10000);
        slider.set_value(-5);
        assert_eq!(slider.value, 0);
    }

    #[test]
    fn test_slider_fraction() {
        let mut slider = SliderState::new(0, 100, 1);
        slider.set_value(25);
        assert_eq!(slider.fraction(), 0.25);
    }

    #[test]
    fn test_list_step_clamps() {
        let mut list = ListState {
            items: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };
        list.step(1);
        assert_eq!(list.selected, Some(0));
        list.step(5);
        assert_eq!(list.selected, Some(2));
        list.step(-10);
        assert_eq!(list.selected, Some(0));
    }

    #[test]
    fn test_list_select_out_of_range_clears() {
        let mut list = ListState {
            items: vec!["a".into()],
            ..Default::default()
        };
        list.select(Some(3));
        assert_eq!(list.selected, None);
        list.select(Some(0));
        assert_eq!(list.selected_text(), Some("a"));
    }

    #[test]
    fn test_labels_are_not_focusable() {
        assert!(!WidgetKind::label("x").is_focusable());
        assert!(!WidgetKind::panel("x").is_focusable());
        assert!(WidgetKind::button("x").is_focusable());
    }
}
