// Scripted Renderer
// Headless renderer that records every call and answers interaction queries from a script
//
// Usage:
//   let mut renderer = ScriptedRenderer::new();
//   tree.draw_frame(&mut renderer, &mut callbacks);   // first tab selected
//   renderer.click("Details");
//   tree.draw_frame(&mut renderer, &mut callbacks);   // "Details" selected

use ratatui::style::Color;
use std::collections::{HashMap, HashSet};

use super::renderer::{ItemStatus, Renderer, StyleColor, TabBarFlags};
use crate::core::WidgetId;

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    PushId(WidgetId),
    PopId,
    BeginGroup,
    EndGroup,
    BeginTabBar { label: String, flags: TabBarFlags, opened: bool },
    EndTabBar,
    BeginTabItem { label: String, closable: bool, selected: bool },
    EndTabItem,
    SetNextItemWidth(f32),
    PushStyleColor(StyleColor, Color),
    PopStyleColor(usize),
    Tooltip(String),
    OpenPopup(String),
    Text(String),
    Button { label: String, pressed: bool },
}

/// Per-frame bookkeeping for an open tab bar
#[derive(Debug)]
struct BarFrame {
    key: Option<WidgetId>,
    /// Tab clicked this frame
    clicked: Option<WidgetId>,
    submitted_selected: bool,
    closed_selected: bool,
}

/// Renderer for tests and headless runs
///
/// Tab selection follows the usual immediate-mode rules: the first tab
/// submitted in a tab bar is selected until another one is clicked, and a
/// selection whose tab disappears is dropped so the first tab takes over on
/// the following frame. Tabs are told apart by the id pushed before them. A
/// click is matched against the labels the tab bar submitted in the previous
/// frame and lands on the first tab carrying that label.
#[derive(Debug, Default)]
pub struct ScriptedRenderer {
    calls: Vec<DrawCall>,
    id_stack: Vec<WidgetId>,
    bar_stack: Vec<BarFrame>,
    /// Selected tab, keyed by the id pushed before the tab bar
    selections: HashMap<Option<WidgetId>, WidgetId>,
    /// Tabs submitted per tab bar in the latest frame
    submitted: HashMap<Option<WidgetId>, Vec<(WidgetId, String)>>,
    clicks: HashSet<String>,
    closes: HashSet<String>,
    hovered: Option<String>,
    tab_bars_closed: bool,
    last_item: ItemStatus,
    frames: u64,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click the tab or button with this label during the next frame
    pub fn click(&mut self, label: &str) {
        self.clicks.insert(label.to_string());
    }

    /// Press the close button of the tab with this label during the next frame
    pub fn close(&mut self, label: &str) {
        self.closes.insert(label.to_string());
    }

    /// Keep the pointer over the item with this label until changed
    pub fn hover(&mut self, label: Option<&str>) {
        self.hovered = label.map(str::to_string);
    }

    /// Make `begin_tab_bar` report every tab bar as not visible
    pub fn set_tab_bars_open(&mut self, open: bool) {
        self.tab_bars_closed = !open;
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Tab this renderer considers selected in the tab bar pushed as `bar`
    pub fn selected(&self, bar: WidgetId) -> Option<WidgetId> {
        self.selections.get(&Some(bar)).copied()
    }

    /// Whether every push/begin recorded so far has its matching pop/end
    pub fn is_balanced(&self) -> bool {
        let mut ids = 0i64;
        let mut groups = 0i64;
        let mut bars = 0i64;
        let mut items = 0i64;
        let mut colors = 0i64;
        for call in &self.calls {
            match call {
                DrawCall::PushId(_) => ids += 1,
                DrawCall::PopId => ids -= 1,
                DrawCall::BeginGroup => groups += 1,
                DrawCall::EndGroup => groups -= 1,
                DrawCall::BeginTabBar { opened: true, .. } => bars += 1,
                DrawCall::EndTabBar => bars -= 1,
                DrawCall::BeginTabItem { selected: true, .. } => items += 1,
                DrawCall::EndTabItem => items -= 1,
                DrawCall::PushStyleColor(..) => colors += 1,
                DrawCall::PopStyleColor(count) => colors -= *count as i64,
                _ => {}
            }
            if ids < 0 || groups < 0 || bars < 0 || items < 0 || colors < 0 {
                return false;
            }
        }
        ids == 0 && groups == 0 && bars == 0 && items == 0 && colors == 0
    }

    fn status_for(&self, label: &str, clicked: bool) -> ItemStatus {
        ItemStatus {
            hovered: self.hovered.as_deref() == Some(label),
            active: clicked,
            focused: false,
            clicked,
            visible: true,
        }
    }
}

impl Renderer for ScriptedRenderer {
    fn new_frame(&mut self) {
        self.frames += 1;
        self.id_stack.clear();
        self.bar_stack.clear();
        self.last_item = ItemStatus::default();
    }

    fn end_frame(&mut self) {
        self.clicks.clear();
        self.closes.clear();
    }

    fn push_id(&mut self, id: WidgetId) {
        self.id_stack.push(id);
        self.calls.push(DrawCall::PushId(id));
    }

    fn pop_id(&mut self) {
        self.id_stack.pop();
        self.calls.push(DrawCall::PopId);
    }

    fn begin_group(&mut self) {
        self.calls.push(DrawCall::BeginGroup);
    }

    fn end_group(&mut self) {
        self.calls.push(DrawCall::EndGroup);
    }

    fn begin_tab_bar(&mut self, label: &str, flags: TabBarFlags) -> bool {
        let opened = !self.tab_bars_closed;
        self.calls.push(DrawCall::BeginTabBar {
            label: label.to_string(),
            flags,
            opened,
        });
        if opened {
            let key = self.id_stack.last().copied();
            let previous = self.submitted.insert(key, Vec::new()).unwrap_or_default();
            let clicked = previous
                .into_iter()
                .find(|(_, label)| self.clicks.contains(label))
                .map(|(tab, label)| {
                    self.clicks.remove(&label);
                    tab
                });
            if let Some(tab) = clicked {
                self.selections.insert(key, tab);
            }
            self.bar_stack.push(BarFrame {
                key,
                clicked,
                submitted_selected: false,
                closed_selected: false,
            });
        }
        opened
    }

    fn end_tab_bar(&mut self) {
        if let Some(frame) = self.bar_stack.pop() {
            if !frame.submitted_selected && !frame.closed_selected {
                self.selections.remove(&frame.key);
            }
        }
        self.calls.push(DrawCall::EndTabBar);
    }

    fn select_tab_item(&mut self, tab: WidgetId) {
        if let Some(frame) = self.bar_stack.last() {
            self.selections.insert(frame.key, tab);
        }
    }

    fn begin_tab_item(&mut self, label: &str, open: Option<&mut bool>) -> bool {
        let closable = open.is_some();
        let (Some(frame), Some(&tab)) = (self.bar_stack.last(), self.id_stack.last()) else {
            return false;
        };
        let key = frame.key;
        let claim_blocked = frame.closed_selected;
        let clicked = frame.clicked == Some(tab);
        self.submitted.entry(key).or_default().push((tab, label.to_string()));

        let selected = match self.selections.get(&key) {
            Some(&current) => current == tab,
            None if claim_blocked => false,
            None => {
                self.selections.insert(key, tab);
                true
            }
        };

        let closed = match open {
            Some(open) if self.closes.remove(label) => {
                *open = false;
                true
            }
            _ => false,
        };

        if let Some(frame) = self.bar_stack.last_mut() {
            if selected && closed {
                frame.closed_selected = true;
                self.selections.remove(&key);
            } else if selected {
                frame.submitted_selected = true;
            }
        }

        self.last_item = self.status_for(label, clicked);
        self.calls.push(DrawCall::BeginTabItem {
            label: label.to_string(),
            closable,
            selected,
        });
        selected
    }

    fn end_tab_item(&mut self) {
        self.calls.push(DrawCall::EndTabItem);
    }

    fn set_next_item_width(&mut self, width: f32) {
        self.calls.push(DrawCall::SetNextItemWidth(width));
    }

    fn push_style_color(&mut self, target: StyleColor, color: Color) {
        self.calls.push(DrawCall::PushStyleColor(target, color));
    }

    fn pop_style_color(&mut self, count: usize) {
        self.calls.push(DrawCall::PopStyleColor(count));
    }

    fn set_tooltip(&mut self, text: &str) {
        self.calls.push(DrawCall::Tooltip(text.to_string()));
    }

    fn open_popup(&mut self, name: &str) {
        self.calls.push(DrawCall::OpenPopup(name.to_string()));
    }

    fn text(&mut self, text: &str) {
        self.last_item = self.status_for(text, false);
        self.calls.push(DrawCall::Text(text.to_string()));
    }

    fn button(&mut self, label: &str) -> bool {
        let pressed = self.clicks.remove(label);
        self.last_item = self.status_for(label, pressed);
        self.calls.push(DrawCall::Button {
            label: label.to_string(),
            pressed,
        });
        pressed
    }

    fn item_status(&self) -> ItemStatus {
        self.last_item
    }
}
