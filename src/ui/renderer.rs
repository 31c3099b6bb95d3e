// Renderer Protocol
// Immediate-mode calls the widget tree issues every frame

use bitflags::bitflags;
use ratatui::style::Color;

use crate::core::WidgetId;

bitflags! {
    /// Options passed to [`Renderer::begin_tab_bar`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TabBarFlags: u32 {
        /// Tabs may be dragged to a new position
        const REORDERABLE = 1 << 0;
        /// Newly appearing tabs become selected
        const AUTO_SELECT_NEW_TABS = 1 << 1;
        /// Show a button listing every tab
        const TAB_LIST_POPUP_BUTTON = 1 << 2;
        /// Middle click does not close closable tabs
        const NO_CLOSE_WITH_MIDDLE_MOUSE_BUTTON = 1 << 3;
        /// No tooltip when hovering a tab header
        const NO_TOOLTIP = 1 << 4;
    }
}

/// Style slot a pushed color applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleColor {
    Text,
    Tab,
    TabHovered,
    TabActive,
    Button,
    Border,
}

impl StyleColor {
    /// Parse a style slot from a configuration key
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "text" => Some(StyleColor::Text),
            "tab" => Some(StyleColor::Tab),
            "tab_hovered" | "tabhovered" => Some(StyleColor::TabHovered),
            "tab_active" | "tabactive" => Some(StyleColor::TabActive),
            "button" => Some(StyleColor::Button),
            "border" => Some(StyleColor::Border),
            _ => None,
        }
    }
}

/// Interaction state of the most recently submitted item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStatus {
    pub hovered: bool,
    pub active: bool,
    pub focused: bool,
    pub clicked: bool,
    pub visible: bool,
}

/// Immediate-mode renderer driven by [`WidgetTree::draw_frame`](crate::core::WidgetTree::draw_frame)
///
/// Every `push_*`/`begin_*` call is matched by its `pop_*`/`end_*` within the
/// same frame. `end_tab_bar` and `end_tab_item` are only called when the
/// corresponding `begin_*` returned true; `end_group` and `pop_id` always are.
pub trait Renderer {
    /// Called once before the first widget of a frame
    fn new_frame(&mut self) {}

    /// Called once after the last widget of a frame
    fn end_frame(&mut self) {}

    fn push_id(&mut self, id: WidgetId);
    fn pop_id(&mut self);

    fn begin_group(&mut self);
    fn end_group(&mut self);

    /// Returns true when the tab bar is visible and its tabs should be submitted
    fn begin_tab_bar(&mut self, label: &str, flags: TabBarFlags) -> bool;
    fn end_tab_bar(&mut self);

    /// Make the tab pushed as `tab` the selected one of the open tab bar
    ///
    /// Called between `begin_tab_bar` and the first `begin_tab_item`.
    fn select_tab_item(&mut self, tab: WidgetId);

    /// Returns true when this tab is the selected one
    ///
    /// A tab is identified by the id pushed right before this call; `label`
    /// is only displayed and may repeat within a tab bar. `open` is only
    /// passed for closable tabs; the renderer clears it when the close
    /// button is pressed.
    fn begin_tab_item(&mut self, label: &str, open: Option<&mut bool>) -> bool;
    fn end_tab_item(&mut self);

    /// Width override for the next submitted item
    fn set_next_item_width(&mut self, width: f32);

    fn push_style_color(&mut self, target: StyleColor, color: Color);
    fn pop_style_color(&mut self, count: usize);

    fn set_tooltip(&mut self, text: &str);
    fn open_popup(&mut self, name: &str);

    fn text(&mut self, text: &str);

    /// Returns true when the button was pressed this frame
    fn button(&mut self, label: &str) -> bool;

    /// Status of the last submitted item
    fn item_status(&self) -> ItemStatus;

    fn is_item_hovered(&self) -> bool {
        self.item_status().hovered
    }
}
