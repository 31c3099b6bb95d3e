// Terminal Renderer
// Immediate-mode renderer drawing tab strips and text into a ratatui buffer
//
// Interaction is resolved against the previous frame's layout: a click is
// tested against the tab and button bounds recorded while drawing the frame
// before it, the same way click detection works for the static tab bars.

use crossterm::event::{Event, MouseButton, MouseEventKind};
use log::trace;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use std::collections::HashMap;

use super::renderer::{ItemStatus, Renderer, StyleColor, TabBarFlags};
use crate::core::{RenderSettings, WidgetId};

/// Bounding box of a clickable element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl TabBounds {
    /// Check if a coordinate (x, y) is within these bounds
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (u32::from(x), u32::from(y));
        let (left, top) = (u32::from(self.x), u32::from(self.y));
        x >= left && x < left + u32::from(self.width) && y >= top && y < top + u32::from(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HitKey {
    Tab { bar: Option<WidgetId>, tab: WidgetId },
    Button { owner: Option<WidgetId>, label: String },
}

#[derive(Debug, Clone)]
struct Hit {
    key: HitKey,
    bounds: TabBounds,
    close: Option<TabBounds>,
}

/// Layout state of a tab bar being submitted
#[derive(Debug)]
struct BarLayout {
    key: Option<WidgetId>,
    clicked: Option<WidgetId>,
    header_y: u16,
    start_x: u16,
    next_x: u16,
    no_tooltip: bool,
    submitted_selected: bool,
    closed_selected: bool,
}

/// Renderer for the terminal front end
pub struct TerminalRenderer {
    settings: RenderSettings,
    area: Rect,
    buffer: Buffer,
    cursor_y: u16,
    group_depth: usize,
    next_width: Option<u16>,
    id_stack: Vec<WidgetId>,
    bars: Vec<BarLayout>,
    /// Selected tab, keyed by the id pushed before the tab bar
    selections: HashMap<Option<WidgetId>, WidgetId>,
    colors: Vec<(StyleColor, Color)>,
    hits: Vec<Hit>,
    prev_hits: Vec<Hit>,
    pending_click: Option<(u16, u16)>,
    mouse: Option<(u16, u16)>,
    tooltip: Option<String>,
    tooltip_suppressed: bool,
    popup: Option<String>,
    popup_fresh: bool,
    last_item: ItemStatus,
}

impl TerminalRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            area: Rect::default(),
            buffer: Buffer::empty(Rect::default()),
            cursor_y: 0,
            group_depth: 0,
            next_width: None,
            id_stack: Vec::new(),
            bars: Vec::new(),
            selections: HashMap::new(),
            colors: Vec::new(),
            hits: Vec::new(),
            prev_hits: Vec::new(),
            pending_click: None,
            mouse: None,
            tooltip: None,
            tooltip_suppressed: false,
            popup: None,
            popup_fresh: false,
            last_item: ItemStatus::default(),
        }
    }

    /// Area the next frame is laid out in
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Popup opened by the last selection change, until the next click
    pub fn open_popup_name(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    /// Feed a terminal event; returns true if the renderer used it
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.settings.mouse_enabled {
            return false;
        }
        let Event::Mouse(mouse) = event else {
            return false;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pending_click = Some((mouse.column, mouse.row));
                self.mouse = Some((mouse.column, mouse.row));
                true
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.mouse = Some((mouse.column, mouse.row));
                true
            }
            _ => false,
        }
    }

    /// Text of one buffer row, trailing blanks trimmed
    pub fn line_text(&self, y: u16) -> String {
        let area = self.buffer.area;
        let line: String = (area.left()..area.right())
            .filter_map(|x| self.buffer.cell((x, y)).map(|cell| cell.symbol().to_string()))
            .collect();
        line.trim_end().to_string()
    }

    fn color_for(&self, target: StyleColor) -> Option<Color> {
        self.colors.iter().rev().find(|(slot, _)| *slot == target).map(|(_, color)| *color)
    }

    fn clicked_in(&self, bounds: TabBounds) -> bool {
        self.pending_click.map(|(x, y)| bounds.contains(x, y)).unwrap_or(false)
    }

    fn hovered_in(&self, bounds: TabBounds) -> bool {
        self.mouse.map(|(x, y)| bounds.contains(x, y)).unwrap_or(false)
    }

    /// Tab of `bar` whose header is under the pending click
    fn clicked_tab(&self, bar: Option<WidgetId>) -> Option<WidgetId> {
        self.prev_hits.iter().find_map(|hit| match hit.key {
            HitKey::Tab { bar: owner, tab } if owner == bar && self.clicked_in(hit.bounds) => Some(tab),
            _ => None,
        })
    }

    fn previous_hit(&self, key: &HitKey) -> Option<&Hit> {
        self.prev_hits.iter().find(|hit| hit.key == *key)
    }

    /// Write clipped text, returning the column after it
    fn put(&mut self, x: u16, y: u16, text: &str, max_width: Option<u16>, style: Style) -> u16 {
        let area = self.buffer.area;
        if y < area.top() || y >= area.bottom() || x < area.left() || x >= area.right() {
            return x.saturating_add(text.chars().count() as u16);
        }
        let room = area.right() - x;
        let width = max_width.map(|w| w.min(room)).unwrap_or(room);
        let (end_x, _) = self.buffer.set_stringn(x, y, text, width as usize, style);
        end_x
    }

    /// Left edge for content; nested tab bars are indented two columns per level
    fn indent_x(&self) -> u16 {
        let depth = self.group_depth.saturating_sub(1) as u16;
        self.area.x.saturating_add(depth.saturating_mul(2))
    }

    fn line_item(&mut self, text: &str, style: Style) -> TabBounds {
        let x = self.indent_x();
        let y = self.cursor_y;
        let width = self.next_width.take();
        let end_x = self.put(x, y, text, width, style);
        self.cursor_y = self.cursor_y.saturating_add(1);
        TabBounds {
            x,
            y,
            width: end_x.saturating_sub(x),
            height: 1,
        }
    }
}

impl Renderer for TerminalRenderer {
    fn new_frame(&mut self) {
        self.buffer = Buffer::empty(self.area);
        self.cursor_y = self.area.y;
        self.group_depth = 0;
        self.next_width = None;
        self.id_stack.clear();
        self.bars.clear();
        self.colors.clear();
        self.prev_hits = std::mem::take(&mut self.hits);
        self.tooltip = None;
        self.last_item = ItemStatus::default();
    }

    fn end_frame(&mut self) {
        if self.pending_click.is_some() && !self.popup_fresh {
            self.popup = None;
        }
        self.popup_fresh = false;
        self.pending_click = None;

        let bottom = self.area.bottom().saturating_sub(1);
        if let Some(tooltip) = self.tooltip.take() {
            let (x, y) = self.mouse.unwrap_or((self.area.x, bottom));
            let y = y.saturating_add(1).min(bottom);
            let style = Style::default()
                .fg(self.settings.colors.hovered_tab)
                .bg(self.settings.colors.tooltip_bg);
            self.put(x, y, &format!(" {} ", tooltip), None, style);
        }
        if let Some(popup) = self.popup.clone() {
            let text = format!("[ {} ]", popup);
            let x = self.area.right().saturating_sub(text.chars().count() as u16);
            let style = Style::default()
                .fg(self.settings.colors.active_tab)
                .add_modifier(Modifier::REVERSED);
            self.put(x.max(self.area.x), bottom, &text, None, style);
        }
    }

    fn push_id(&mut self, id: WidgetId) {
        self.id_stack.push(id);
    }

    fn pop_id(&mut self) {
        self.id_stack.pop();
    }

    fn begin_group(&mut self) {
        self.group_depth += 1;
    }

    fn end_group(&mut self) {
        self.group_depth = self.group_depth.saturating_sub(1);
    }

    fn begin_tab_bar(&mut self, label: &str, flags: TabBarFlags) -> bool {
        if self.cursor_y >= self.area.bottom() {
            trace!("tab bar '{}' clipped", label);
            return false;
        }

        let header_y = self.cursor_y;
        let mut start_x = self.indent_x();
        if flags.contains(TabBarFlags::TAB_LIST_POPUP_BUTTON) {
            let style = Style::default().fg(self.settings.colors.inactive_tab);
            start_x = self.put(start_x, header_y, "▾ ", None, style);
        }

        // Rule under the tab headers
        let rule_style = Style::default().fg(self.color_for(StyleColor::Border).unwrap_or(self.settings.colors.inactive_tab));
        let rule_x = self.indent_x();
        let rule = "─".repeat(self.area.right().saturating_sub(rule_x) as usize);
        self.put(rule_x, header_y.saturating_add(1), &rule, None, rule_style);
        self.cursor_y = header_y.saturating_add(2);

        let key = self.id_stack.last().copied();
        let clicked = self.clicked_tab(key);
        if let Some(tab) = clicked {
            self.selections.insert(key, tab);
        }
        self.bars.push(BarLayout {
            key,
            clicked,
            header_y,
            start_x,
            next_x: start_x,
            no_tooltip: flags.contains(TabBarFlags::NO_TOOLTIP),
            submitted_selected: false,
            closed_selected: false,
        });
        true
    }

    fn end_tab_bar(&mut self) {
        if let Some(bar) = self.bars.pop() {
            if !bar.submitted_selected && !bar.closed_selected {
                self.selections.remove(&bar.key);
            }
        }
        self.cursor_y = self.cursor_y.saturating_add(1);
    }

    fn select_tab_item(&mut self, tab: WidgetId) {
        if let Some(bar) = self.bars.last() {
            self.selections.insert(bar.key, tab);
        }
    }

    fn begin_tab_item(&mut self, label: &str, open: Option<&mut bool>) -> bool {
        let (Some(bar), Some(&tab)) = (self.bars.last(), self.id_stack.last()) else {
            return false;
        };
        let key = bar.key;
        let header_y = bar.header_y;
        let first = bar.next_x == bar.start_x;
        let claim_blocked = bar.closed_selected;
        let no_tooltip = bar.no_tooltip;
        let clicked = bar.clicked == Some(tab);
        let mut x = bar.next_x;

        let hit_key = HitKey::Tab { bar: key, tab };
        let previous = self.previous_hit(&hit_key).cloned();
        let close_clicked = previous
            .as_ref()
            .and_then(|hit| hit.close)
            .map(|close| self.clicked_in(close))
            .unwrap_or(false);
        let hovered = previous.as_ref().map(|hit| self.hovered_in(hit.bounds)).unwrap_or(false);

        let selected = match self.selections.get(&key) {
            Some(&current) => current == tab,
            None if claim_blocked => false,
            None => {
                self.selections.insert(key, tab);
                true
            }
        };

        if !first {
            let style = Style::default().fg(self.settings.colors.inactive_tab);
            let separator = self.settings.tab_separator.clone();
            x = self.put(x, header_y, &separator, None, style);
        }

        let style = if selected {
            Style::default()
                .fg(self.color_for(StyleColor::TabActive).unwrap_or(self.settings.colors.active_tab))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if hovered {
            Style::default().fg(self.color_for(StyleColor::TabHovered).unwrap_or(self.settings.colors.hovered_tab))
        } else {
            Style::default().fg(self.color_for(StyleColor::Tab).unwrap_or(self.settings.colors.inactive_tab))
        };
        let text = format!(" {} ", label);
        let label_x = x;
        let width = self.next_width.take();
        x = self.put(x, header_y, &text, width, style);
        let bounds = TabBounds {
            x: label_x,
            y: header_y,
            width: x.saturating_sub(label_x),
            height: 1,
        };

        let closable = open.is_some();
        let mut close = None;
        if closable {
            let glyph = format!("{} ", self.settings.close_glyph);
            let close_x = x;
            x = self.put(x, header_y, &glyph, None, style.remove_modifier(Modifier::UNDERLINED));
            close = Some(TabBounds {
                x: close_x,
                y: header_y,
                width: x.saturating_sub(close_x),
                height: 1,
            });
        }

        if let Some(open) = open {
            if close_clicked {
                *open = false;
            }
        }

        if let Some(bar) = self.bars.last_mut() {
            bar.next_x = x;
            if selected && close_clicked {
                bar.closed_selected = true;
                self.selections.remove(&key);
            } else if selected {
                bar.submitted_selected = true;
            }
        }

        self.hits.push(Hit {
            key: hit_key,
            bounds,
            close,
        });
        self.tooltip_suppressed = no_tooltip;
        self.last_item = ItemStatus {
            hovered,
            active: clicked,
            focused: selected,
            clicked,
            visible: header_y < self.area.bottom(),
        };
        selected
    }

    fn end_tab_item(&mut self) {}

    fn set_next_item_width(&mut self, width: f32) {
        self.next_width = Some(width.max(0.0).round() as u16);
    }

    fn push_style_color(&mut self, target: StyleColor, color: Color) {
        self.colors.push((target, color));
    }

    fn pop_style_color(&mut self, count: usize) {
        let keep = self.colors.len().saturating_sub(count);
        self.colors.truncate(keep);
    }

    fn set_tooltip(&mut self, text: &str) {
        if !self.tooltip_suppressed {
            self.tooltip = Some(text.to_string());
        }
    }

    fn open_popup(&mut self, name: &str) {
        self.popup = Some(name.to_string());
        self.popup_fresh = true;
    }

    fn text(&mut self, text: &str) {
        let style = Style::default().fg(self.color_for(StyleColor::Text).unwrap_or(self.settings.colors.text));
        let bounds = self.line_item(text, style);
        self.tooltip_suppressed = false;
        self.last_item = ItemStatus {
            hovered: self.hovered_in(bounds),
            visible: bounds.y < self.area.bottom(),
            ..Default::default()
        };
    }

    fn button(&mut self, label: &str) -> bool {
        let key = HitKey::Button {
            owner: self.id_stack.last().copied(),
            label: label.to_string(),
        };
        let pressed = self
            .previous_hit(&key)
            .map(|hit| self.clicked_in(hit.bounds))
            .unwrap_or(false);

        let style = Style::default()
            .fg(self.color_for(StyleColor::Button).unwrap_or(self.settings.colors.active_tab))
            .add_modifier(Modifier::BOLD);
        let bounds = self.line_item(label, style);
        self.hits.push(Hit {
            key,
            bounds,
            close: None,
        });

        self.tooltip_suppressed = false;
        self.last_item = ItemStatus {
            hovered: self.hovered_in(bounds),
            active: pressed,
            focused: false,
            clicked: pressed,
            visible: bounds.y < self.area.bottom(),
        };
        pressed
    }

    fn item_status(&self) -> ItemStatus {
        self.last_item
    }
}

impl Widget for &TerminalRenderer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (self.buffer.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}
