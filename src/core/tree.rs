// Widget Tree (HWND-like handles)
// Arena that owns every widget and the parent/child relations between them
//
// Usage:
//   let mut tree = WidgetTree::new();
//   let bar = tree.add_tab_bar(None, "main")?;
//   let files = tree.add_tab(bar, "files")?;
//   tree.add_text(Some(files), "hint", "Nothing here yet")?;
//   tree.draw_frame(&mut renderer, &mut callbacks);

use log::{debug, trace};
use ratatui::style::Color;
use std::collections::HashMap;
use std::fmt;

use super::config_dict::{self, ConfigDict, ExtraConfig};
use super::error::TreeError;
use super::events::CallbackQueue;
use super::item_state::ItemState;
use crate::elements::{self, Button, DrawContext, Tab, TabBar, Text};
use crate::ui::{Renderer, StyleColor};

/// Handle to a widget in a [`WidgetTree`]
///
/// Handles are never reused, so a handle to a removed widget stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Get the internal ID of this handle
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind-specific data of a widget
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    TabBar(TabBar),
    Tab(Tab),
    Text(Text),
    Button(Button),
}

impl WidgetKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            WidgetKind::TabBar(_) => "tab_bar",
            WidgetKind::Tab(_) => "tab",
            WidgetKind::Text(_) => "text",
            WidgetKind::Button(_) => "button",
        }
    }

    /// Whether widgets of this kind may have children
    pub fn is_container(&self) -> bool {
        matches!(self, WidgetKind::TabBar(_) | WidgetKind::Tab(_))
    }

    pub fn as_tab_bar(&self) -> Option<&TabBar> {
        match self {
            WidgetKind::TabBar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn as_tab_bar_mut(&mut self) -> Option<&mut TabBar> {
        match self {
            WidgetKind::TabBar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn as_tab(&self) -> Option<&Tab> {
        match self {
            WidgetKind::Tab(tab) => Some(tab),
            _ => None,
        }
    }

    pub fn as_tab_mut(&mut self) -> Option<&mut Tab> {
        match self {
            WidgetKind::Tab(tab) => Some(tab),
            _ => None,
        }
    }

    fn extra_config(&self) -> Option<&dyn ExtraConfig> {
        match self {
            WidgetKind::TabBar(bar) => Some(bar as &dyn ExtraConfig),
            WidgetKind::Tab(tab) => Some(tab as &dyn ExtraConfig),
            WidgetKind::Text(_) | WidgetKind::Button(_) => None,
        }
    }

    fn extra_config_mut(&mut self) -> Option<&mut dyn ExtraConfig> {
        match self {
            WidgetKind::TabBar(bar) => Some(bar as &mut dyn ExtraConfig),
            WidgetKind::Tab(tab) => Some(tab as &mut dyn ExtraConfig),
            WidgetKind::Text(_) | WidgetKind::Button(_) => None,
        }
    }
}

/// A node in the widget tree
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Unique name, also the payload of selection callbacks
    pub name: String,
    /// Text shown by the renderer (defaults to the name)
    pub label: String,
    /// Hidden widgets are skipped entirely by their parent
    pub shown: bool,
    /// Explicit width override, 0 = renderer default
    pub width: i32,
    /// Tooltip shown while hovered (empty = none)
    pub tip: String,
    /// Popup opened when a tab becomes selected (empty = none)
    pub popup: String,
    /// Name of the callback dispatched by this widget
    pub callback: Option<String>,
    /// Colors pushed around this widget's draw
    pub colors: Vec<(StyleColor, Color)>,
    /// Interaction state from the last frame this widget was drawn
    pub state: ItemState,
    pub kind: WidgetKind,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

impl Widget {
    pub fn new(name: &str, kind: WidgetKind) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            shown: true,
            width: 0,
            tip: String::new(),
            popup: String::new(),
            callback: None,
            colors: Vec::new(),
            state: ItemState::default(),
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }
}

/// Arena owning every widget of one UI
#[derive(Debug, Clone)]
pub struct WidgetTree {
    /// Map of handle ID to widget
    widgets: HashMap<u64, Widget>,
    /// Map of name to handle ID (for lookup by name)
    name_to_handle: HashMap<String, u64>,
    /// Top-level widgets in draw order
    roots: Vec<WidgetId>,
    /// Next handle ID to assign
    next_id: u64,
}

impl WidgetTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
            name_to_handle: HashMap::new(),
            roots: Vec::new(),
            next_id: 1, // Start at 1, 0 is never a valid handle
        }
    }

    // ┌────────────────────────────────────────────────────────────────────────────────────────┐
    // │                                  Construction                                          │
    // └────────────────────────────────────────────────────────────────────────────────────────┘

    /// Insert a widget under `parent` (or as a root) and return its handle
    pub fn add(&mut self, parent: Option<WidgetId>, mut widget: Widget) -> Result<WidgetId, TreeError> {
        if widget.name.is_empty() {
            return Err(TreeError::EmptyName);
        }
        if self.name_to_handle.contains_key(&widget.name) {
            return Err(TreeError::DuplicateName(widget.name));
        }

        match parent {
            Some(parent_id) => {
                let parent_widget = self.get(parent_id).ok_or(TreeError::UnknownWidget(parent_id))?;
                check_child(parent_widget, &widget)?;
            }
            None => {
                if matches!(widget.kind, WidgetKind::Tab(_)) {
                    return Err(TreeError::TabOutsideTabBar {
                        tab: widget.name,
                        parent: "<root>".to_string(),
                    });
                }
            }
        }

        let id = WidgetId(self.next_id);
        self.next_id += 1;

        debug!("adding {} '{}' as {} under {:?}", widget.kind.type_name(), widget.name, id, parent);

        widget.parent = parent;
        widget.children.clear();
        self.name_to_handle.insert(widget.name.clone(), id.0);
        self.widgets.insert(id.0, widget);

        match parent {
            Some(parent_id) => {
                if let Some(parent_widget) = self.widgets.get_mut(&parent_id.0) {
                    parent_widget.children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        Ok(id)
    }

    pub fn add_tab_bar(&mut self, parent: Option<WidgetId>, name: &str) -> Result<WidgetId, TreeError> {
        self.add(parent, Widget::new(name, WidgetKind::TabBar(TabBar::new())))
    }

    pub fn add_tab(&mut self, tab_bar: WidgetId, name: &str) -> Result<WidgetId, TreeError> {
        self.add(Some(tab_bar), Widget::new(name, WidgetKind::Tab(Tab::new())))
    }

    pub fn add_text(&mut self, parent: Option<WidgetId>, name: &str, value: &str) -> Result<WidgetId, TreeError> {
        self.add(parent, Widget::new(name, WidgetKind::Text(Text::new(value))))
    }

    pub fn add_button(&mut self, parent: Option<WidgetId>, name: &str) -> Result<WidgetId, TreeError> {
        self.add(parent, Widget::new(name, WidgetKind::Button(Button::default())))
    }

    /// Remove a widget and its whole subtree
    ///
    /// If the widget was the selected tab of its tab bar, the selection is
    /// cleared so the next frame picks a new default.
    pub fn remove(&mut self, id: WidgetId) -> Result<(), TreeError> {
        let widget = self.get(id).ok_or(TreeError::UnknownWidget(id))?;
        let parent = widget.parent;
        let name = widget.name.clone();

        match parent {
            Some(parent_id) => {
                if let Some(parent_widget) = self.widgets.get_mut(&parent_id.0) {
                    parent_widget.children.retain(|&child| child != id);
                    if let WidgetKind::TabBar(bar) = &mut parent_widget.kind {
                        if bar.value == name {
                            bar.value.clear();
                        }
                    }
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(removed) = self.widgets.remove(&next.0) {
                self.name_to_handle.remove(&removed.name);
                pending.extend(removed.children);
            }
        }

        debug!("removed '{}' ({}) and its children", name, id);
        Ok(())
    }

    /// Remove every widget
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.name_to_handle.clear();
        self.roots.clear();
    }

    // ┌────────────────────────────────────────────────────────────────────────────────────────┐
    // │                                     Queries                                            │
    // └────────────────────────────────────────────────────────────────────────────────────────┘

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id.0)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(&id.0)
    }

    /// Get handle by name
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.name_to_handle.get(name).map(|&id| WidgetId(id))
    }

    pub fn exists(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(|widget| widget.parent)
    }

    /// Children of `id` in draw order (empty for unknown handles)
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.get(id).map(|widget| widget.children.as_slice()).unwrap_or(&[])
    }

    pub fn tab_bar(&self, id: WidgetId) -> Option<&TabBar> {
        self.get(id).and_then(|widget| widget.kind.as_tab_bar())
    }

    pub fn tab_bar_mut(&mut self, id: WidgetId) -> Option<&mut TabBar> {
        self.get_mut(id).and_then(|widget| widget.kind.as_tab_bar_mut())
    }

    pub fn tab(&self, id: WidgetId) -> Option<&Tab> {
        self.get(id).and_then(|widget| widget.kind.as_tab())
    }

    pub fn tab_mut(&mut self, id: WidgetId) -> Option<&mut Tab> {
        self.get_mut(id).and_then(|widget| widget.kind.as_tab_mut())
    }

    /// Selection value of a tab bar: the name of its selected tab
    pub fn tab_bar_value(&self, id: WidgetId) -> Option<&str> {
        self.tab_bar(id).map(|bar| bar.value.as_str())
    }

    /// Whether a tab is currently selected
    pub fn tab_value(&self, id: WidgetId) -> Option<bool> {
        self.tab(id).map(|tab| tab.value)
    }

    /// Name of a widget, or its handle when it no longer exists
    pub(crate) fn display_name(&self, id: WidgetId) -> String {
        self.get(id).map(|widget| widget.name.clone()).unwrap_or_else(|| id.to_string())
    }

    // ┌────────────────────────────────────────────────────────────────────────────────────────┐
    // │                                    Selection                                           │
    // └────────────────────────────────────────────────────────────────────────────────────────┘

    /// Select the default tab of a tab bar whose selection value is empty
    ///
    /// The default is the first shown tab. Returns the tab that was selected,
    /// or None when the bar already had a selection or has no shown tabs.
    pub fn ensure_default_selection(&mut self, bar: WidgetId) -> Option<WidgetId> {
        if !self.tab_bar(bar)?.value.is_empty() {
            return None;
        }

        let first = elements::tab_bar::default_selection(self, bar)?;
        let name = self.get(first)?.name.clone();
        debug!("tab bar {} defaults to tab '{}'", self.display_name(bar), name);

        self.tab_bar_mut(bar)?.value = name;
        self.tab_mut(first)?.value = true;
        Some(first)
    }

    /// Select a tab explicitly, outside of the draw loop
    ///
    /// The selection callback is not dispatched. The renderer is told to
    /// select the tab on the next frame.
    pub fn select_tab(&mut self, bar: WidgetId, tab_name: &str) -> Result<(), TreeError> {
        let bar_name = self.get(bar).ok_or(TreeError::UnknownWidget(bar))?.name.clone();
        if self.tab_bar(bar).is_none() {
            return Err(TreeError::NotATabBar(bar_name));
        }

        let tab_id = self.find(tab_name).ok_or_else(|| TreeError::NotFound(tab_name.to_string()))?;
        if self.parent(tab_id) != Some(bar) || self.tab(tab_id).is_none() {
            return Err(TreeError::NotInTabBar {
                tab: tab_name.to_string(),
                bar: bar_name,
            });
        }

        if let Some(tab_bar) = self.tab_bar_mut(bar) {
            tab_bar.value = tab_name.to_string();
        }
        self.set_sibling_tab_values(bar, tab_id);
        self.request_tab_selection(bar, tab_id);

        debug!("tab '{}' selected explicitly in '{}'", tab_name, bar_name);
        Ok(())
    }

    /// Make `tab` the only pending selection request of `bar`
    pub(crate) fn request_tab_selection(&mut self, bar: WidgetId, tab: WidgetId) {
        let siblings = self.children(bar).to_vec();
        for sibling in siblings {
            if let Some(sibling) = self.tab_mut(sibling) {
                sibling.cancel_selection();
            }
        }
        if let Some(tab) = self.tab_mut(tab) {
            tab.request_selection();
        }
    }

    /// Clear every tab value of `bar`, then set `selected` to true
    pub(crate) fn set_sibling_tab_values(&mut self, bar: WidgetId, selected: WidgetId) {
        let siblings = self.children(bar).to_vec();
        for sibling in siblings {
            if let Some(tab) = self.tab_mut(sibling) {
                tab.value = false;
            }
        }
        if let Some(tab) = self.tab_mut(selected) {
            tab.value = true;
        }
    }

    // ┌────────────────────────────────────────────────────────────────────────────────────────┐
    // │                                  Configuration                                         │
    // └────────────────────────────────────────────────────────────────────────────────────────┘

    /// Apply kind-specific options (`"reorderable"`, `"closable"`, ...)
    ///
    /// A missing dictionary is a no-op.
    pub fn set_extra_config(&mut self, id: WidgetId, dict: Option<&ConfigDict>) -> Result<(), TreeError> {
        let widget = self.get_mut(id).ok_or(TreeError::UnknownWidget(id))?;
        let Some(dict) = dict else {
            return Ok(());
        };
        if let Some(extra) = widget.kind.extra_config_mut() {
            extra.set_extra_config(dict);
        }
        Ok(())
    }

    /// Read kind-specific options into `dict`
    ///
    /// A missing dictionary is a no-op.
    pub fn get_extra_config(&self, id: WidgetId, dict: Option<&mut ConfigDict>) -> Result<(), TreeError> {
        let widget = self.get(id).ok_or(TreeError::UnknownWidget(id))?;
        let Some(dict) = dict else {
            return Ok(());
        };
        if let Some(extra) = widget.kind.extra_config() {
            extra.get_extra_config(dict);
        }
        Ok(())
    }

    /// Apply common options (`label`, `show`, `width`, `tip`, `popup`,
    /// `callback`) and then the kind-specific ones
    pub fn configure_item(&mut self, id: WidgetId, dict: Option<&ConfigDict>) -> Result<(), TreeError> {
        let widget = self.get_mut(id).ok_or(TreeError::UnknownWidget(id))?;
        let Some(dict) = dict else {
            return Ok(());
        };

        if let Some(label) = config_dict::get_str(dict, "label") {
            widget.label = label.to_string();
        }
        if let Some(show) = config_dict::get_bool(dict, "show") {
            widget.shown = show;
        }
        if let Some(width) = config_dict::get_int(dict, "width") {
            widget.width = width.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        }
        if let Some(tip) = config_dict::get_str(dict, "tip") {
            widget.tip = tip.to_string();
        }
        if let Some(popup) = config_dict::get_str(dict, "popup") {
            widget.popup = popup.to_string();
        }
        if let Some(callback) = dict.get("callback") {
            widget.callback = callback.as_str().filter(|s| !s.is_empty()).map(str::to_string);
        }
        if let WidgetKind::Text(text) = &mut widget.kind {
            if let Some(value) = config_dict::get_str(dict, "value") {
                text.value = value.to_string();
            }
        }

        trace!("configured '{}' with {} keys", widget.name, dict.len());
        self.set_extra_config(id, Some(dict))
    }

    /// Read common and kind-specific options into `dict`
    pub fn get_item_configuration(&self, id: WidgetId, dict: &mut ConfigDict) -> Result<(), TreeError> {
        let widget = self.get(id).ok_or(TreeError::UnknownWidget(id))?;

        config_dict::set_str(dict, "name", &widget.name);
        config_dict::set_str(dict, "type", widget.kind.type_name());
        config_dict::set_str(dict, "label", &widget.label);
        config_dict::set_bool(dict, "show", widget.shown);
        config_dict::set_int(dict, "width", widget.width as i64);
        config_dict::set_str(dict, "tip", &widget.tip);
        config_dict::set_str(dict, "popup", &widget.popup);
        match &widget.callback {
            Some(callback) => config_dict::set_str(dict, "callback", callback),
            None => config_dict::set_null(dict, "callback"),
        }
        if let WidgetKind::Text(text) = &widget.kind {
            config_dict::set_str(dict, "value", &text.value);
        }

        self.get_extra_config(id, Some(dict))
    }

    /// Push a color around this widget's draw
    pub fn add_color_style(&mut self, id: WidgetId, target: StyleColor, color: Color) -> Result<(), TreeError> {
        let widget = self.get_mut(id).ok_or(TreeError::UnknownWidget(id))?;
        widget.colors.retain(|(existing, _)| *existing != target);
        widget.colors.push((target, color));
        Ok(())
    }

    // ┌────────────────────────────────────────────────────────────────────────────────────────┐
    // │                                       Draw                                             │
    // └────────────────────────────────────────────────────────────────────────────────────────┘

    /// Draw one frame: every shown root and, recursively, its children
    ///
    /// Callbacks raised during the frame are queued on `callbacks`; nothing is
    /// dispatched here.
    pub fn draw_frame(&mut self, renderer: &mut dyn Renderer, callbacks: &mut CallbackQueue) {
        trace!("drawing frame with {} roots", self.roots.len());
        renderer.new_frame();
        let roots = self.roots.clone();
        {
            let mut ctx = DrawContext {
                tree: self,
                renderer: &mut *renderer,
                callbacks,
            };
            elements::draw_children(&mut ctx, &roots);
        }
        renderer.end_frame();
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

fn check_child(parent: &Widget, child: &Widget) -> Result<(), TreeError> {
    match (&parent.kind, &child.kind) {
        (WidgetKind::TabBar(_), WidgetKind::Tab(_)) => Ok(()),
        (WidgetKind::TabBar(_), _) => Err(TreeError::NonTabInTabBar {
            child: child.name.clone(),
            parent: parent.name.clone(),
        }),
        (_, WidgetKind::Tab(_)) => Err(TreeError::TabOutsideTabBar {
            tab: child.name.clone(),
            parent: parent.name.clone(),
        }),
        (kind, _) if !kind.is_container() => Err(TreeError::NotAContainer {
            parent: parent.name.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_dict::{get_bool, set_bool};

    fn bar_with_tabs(names: &[&str]) -> (WidgetTree, WidgetId, Vec<WidgetId>) {
        let mut tree = WidgetTree::new();
        let bar = tree.add_tab_bar(None, "bar").unwrap();
        let tabs = names.iter().map(|name| tree.add_tab(bar, name).unwrap()).collect();
        (tree, bar, tabs)
    }

    #[test]
    fn test_add_and_lookup() {
        let (tree, bar, tabs) = bar_with_tabs(&["a", "b"]);
        assert_eq!(tree.find("bar"), Some(bar));
        assert_eq!(tree.find("b"), Some(tabs[1]));
        assert_eq!(tree.children(bar), tabs.as_slice());
        assert_eq!(tree.parent(tabs[0]), Some(bar));
        assert_eq!(tree.roots(), &[bar]);
        assert_eq!(tree.get(tabs[0]).unwrap().label, "a");
        assert_eq!(tree.tab_bar_value(bar), Some(""));
    }

    #[test]
    fn test_rejects_type_contract_violations() {
        let (mut tree, bar, tabs) = bar_with_tabs(&["a"]);

        let err = tree.add_text(Some(bar), "stray", "x").unwrap_err();
        assert_eq!(err, TreeError::NonTabInTabBar { child: "stray".into(), parent: "bar".into() });

        let err = tree.add(Some(tabs[0]), Widget::new("nested", WidgetKind::Tab(Tab::new()))).unwrap_err();
        assert_eq!(err, TreeError::TabOutsideTabBar { tab: "nested".into(), parent: "a".into() });

        let err = tree.add(None, Widget::new("orphan", WidgetKind::Tab(Tab::new()))).unwrap_err();
        assert!(matches!(err, TreeError::TabOutsideTabBar { .. }));

        let text = tree.add_text(Some(tabs[0]), "label", "x").unwrap();
        let err = tree.add_text(Some(text), "inner", "y").unwrap_err();
        assert_eq!(err, TreeError::NotAContainer { parent: "label".into() });
    }

    #[test]
    fn test_rejects_duplicate_and_empty_names() {
        let (mut tree, bar, _) = bar_with_tabs(&["a"]);
        assert_eq!(tree.add_tab(bar, "a").unwrap_err(), TreeError::DuplicateName("a".into()));
        assert_eq!(tree.add_tab(bar, "").unwrap_err(), TreeError::EmptyName);
    }

    #[test]
    fn test_nested_tab_bar_inside_tab() {
        let (mut tree, _, tabs) = bar_with_tabs(&["a"]);
        let inner = tree.add_tab_bar(Some(tabs[0]), "inner").unwrap();
        tree.add_tab(inner, "inner_a").unwrap();
        assert_eq!(tree.children(tabs[0]), &[inner]);
    }

    #[test]
    fn test_remove_subtree_clears_selection() {
        let (mut tree, bar, tabs) = bar_with_tabs(&["a", "b"]);
        let text = tree.add_text(Some(tabs[0]), "body", "hi").unwrap();
        tree.ensure_default_selection(bar);
        assert_eq!(tree.tab_bar_value(bar), Some("a"));

        tree.remove(tabs[0]).unwrap();
        assert!(!tree.exists(tabs[0]));
        assert!(!tree.exists(text));
        assert_eq!(tree.find("body"), None);
        assert_eq!(tree.children(bar), &[tabs[1]]);
        assert_eq!(tree.tab_bar_value(bar), Some(""));
        assert_eq!(tree.remove(tabs[0]).unwrap_err(), TreeError::UnknownWidget(tabs[0]));
    }

    #[test]
    fn test_default_selection_skips_hidden_tabs() {
        let (mut tree, bar, tabs) = bar_with_tabs(&["a", "b"]);
        tree.get_mut(tabs[0]).unwrap().shown = false;

        assert_eq!(tree.ensure_default_selection(bar), Some(tabs[1]));
        assert_eq!(tree.tab_bar_value(bar), Some("b"));
        assert_eq!(tree.tab_value(tabs[1]), Some(true));
        assert_eq!(tree.tab_value(tabs[0]), Some(false));

        // Already selected: nothing changes
        assert_eq!(tree.ensure_default_selection(bar), None);
    }

    #[test]
    fn test_default_selection_empty_bar() {
        let mut tree = WidgetTree::new();
        let bar = tree.add_tab_bar(None, "bar").unwrap();
        assert_eq!(tree.ensure_default_selection(bar), None);
        assert_eq!(tree.tab_bar_value(bar), Some(""));
    }

    #[test]
    fn test_select_tab() {
        let (mut tree, bar, tabs) = bar_with_tabs(&["a", "b"]);
        tree.ensure_default_selection(bar);
        tree.select_tab(bar, "b").unwrap();

        assert_eq!(tree.tab_bar_value(bar), Some("b"));
        assert_eq!(tree.tab_value(tabs[0]), Some(false));
        assert_eq!(tree.tab_value(tabs[1]), Some(true));

        let other = tree.add_tab_bar(None, "other").unwrap();
        tree.add_tab(other, "c").unwrap();
        assert_eq!(
            tree.select_tab(bar, "c").unwrap_err(),
            TreeError::NotInTabBar { tab: "c".into(), bar: "bar".into() }
        );
        assert_eq!(tree.select_tab(tabs[0], "b").unwrap_err(), TreeError::NotATabBar("a".into()));
        assert_eq!(tree.select_tab(bar, "zzz").unwrap_err(), TreeError::NotFound("zzz".into()));
    }

    #[test]
    fn test_extra_config_round_trip() {
        let (mut tree, bar, tabs) = bar_with_tabs(&["a"]);

        let mut dict = ConfigDict::new();
        set_bool(&mut dict, "closable", true);
        tree.set_extra_config(tabs[0], Some(&dict)).unwrap();

        let mut dict = ConfigDict::new();
        set_bool(&mut dict, "reorderable", true);
        tree.set_extra_config(bar, Some(&dict)).unwrap();

        let mut out = ConfigDict::new();
        tree.get_extra_config(tabs[0], Some(&mut out)).unwrap();
        assert_eq!(get_bool(&out, "closable"), Some(true));

        let mut out = ConfigDict::new();
        tree.get_extra_config(bar, Some(&mut out)).unwrap();
        assert_eq!(get_bool(&out, "reorderable"), Some(true));
    }

    #[test]
    fn test_missing_dict_is_noop() {
        let (mut tree, bar, tabs) = bar_with_tabs(&["a"]);
        let before = tree.get(tabs[0]).cloned();
        tree.set_extra_config(tabs[0], None).unwrap();
        tree.get_extra_config(bar, None).unwrap();
        tree.configure_item(tabs[0], None).unwrap();
        assert_eq!(tree.get(tabs[0]).cloned(), before);
    }

    #[test]
    fn test_configure_item_common_keys() {
        let (mut tree, _, tabs) = bar_with_tabs(&["a"]);
        let dict: ConfigDict = serde_yaml::from_str(
            "label: Files\nshow: false\nwidth: 120\ntip: hint\npopup: menu\ncallback: changed\nclosable: 1",
        )
        .unwrap();
        tree.configure_item(tabs[0], Some(&dict)).unwrap();

        let widget = tree.get(tabs[0]).unwrap();
        assert_eq!(widget.label, "Files");
        assert!(!widget.shown);
        assert_eq!(widget.width, 120);
        assert_eq!(widget.tip, "hint");
        assert_eq!(widget.popup, "menu");
        assert_eq!(widget.callback.as_deref(), Some("changed"));
        assert!(tree.tab(tabs[0]).unwrap().closable);

        let mut out = ConfigDict::new();
        tree.get_item_configuration(tabs[0], &mut out).unwrap();
        assert_eq!(config_dict::get_str(&out, "type"), Some("tab"));
        assert_eq!(config_dict::get_str(&out, "label"), Some("Files"));
        assert_eq!(get_bool(&out, "show"), Some(false));
        assert_eq!(get_bool(&out, "closable"), Some(true));

        // A null callback clears it
        let dict: ConfigDict = serde_yaml::from_str("callback: ~").unwrap();
        tree.configure_item(tabs[0], Some(&dict)).unwrap();
        assert_eq!(tree.get(tabs[0]).unwrap().callback, None);
    }

    #[test]
    fn test_unknown_handle_errors() {
        let mut tree = WidgetTree::new();
        let bar = tree.add_tab_bar(None, "bar").unwrap();
        tree.remove(bar).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.add_tab(bar, "a").unwrap_err(), TreeError::UnknownWidget(bar));
        assert_eq!(tree.set_extra_config(bar, None).unwrap_err(), TreeError::UnknownWidget(bar));
    }
}
