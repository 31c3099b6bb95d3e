// Tab Component
// A selectable tab inside a tab bar, hosting its own child widgets

use log::{debug, warn};

use super::{draw_children, show_tooltip, DrawContext};
use crate::core::config_dict::{self, ConfigDict, ExtraConfig};
use crate::core::{CallbackEvent, WidgetId};

/// Tab data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tab {
    /// Whether this tab is the selected one of its tab bar
    pub value: bool,
    /// Draw a close button; pressing it hides the tab
    pub closable: bool,
    /// Ask the renderer to select this tab on the next frame
    pending_select: bool,
}

impl Tab {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn request_selection(&mut self) {
        self.pending_select = true;
    }

    pub(crate) fn cancel_selection(&mut self) {
        self.pending_select = false;
    }

    pub fn selection_pending(&self) -> bool {
        self.pending_select
    }
}

impl ExtraConfig for Tab {
    fn set_extra_config(&mut self, dict: &ConfigDict) {
        if let Some(closable) = config_dict::get_bool(dict, "closable") {
            self.closable = closable;
        }
    }

    fn get_extra_config(&self, dict: &mut ConfigDict) {
        config_dict::set_bool(dict, "closable", self.closable);
    }
}

/// Draw one tab
///
/// When the renderer reports the tab as selected, the tab writes its name
/// into the tab bar's value, makes itself the only selected sibling and
/// draws its children. The tab bar's callback fires only when the value
/// held a different name before this frame.
pub(crate) fn draw(ctx: &mut DrawContext<'_>, id: WidgetId) {
    let Some(parent) = ctx.tree.parent(id) else {
        warn!("tab {} has no parent tab bar", id);
        return;
    };
    let Some(widget) = ctx.tree.get(id) else {
        return;
    };
    let Some(tab) = widget.kind.as_tab() else {
        return;
    };
    let name = widget.name.clone();
    let label = widget.label.clone();
    let tip = widget.tip.clone();
    let popup = widget.popup.clone();
    let closable = tab.closable;

    // first tab drawn claims the selection when nothing is selected yet
    if ctx.tree.tab_bar_value(parent).map(str::is_empty).unwrap_or(false) {
        if let Some(bar) = ctx.tree.tab_bar_mut(parent) {
            bar.value = name.clone();
        }
        if let Some(tab) = ctx.tree.tab_mut(id) {
            tab.value = true;
        }
    }

    ctx.renderer.push_id(id);

    let mut open = true;
    let selected = ctx
        .renderer
        .begin_tab_item(&label, if closable { Some(&mut open) } else { None });

    if !open {
        debug!("tab '{}' closed", name);
        if let Some(widget) = ctx.tree.get_mut(id) {
            widget.shown = false;
        }
    }

    if selected {
        show_tooltip(ctx, &tip);

        let previous = match ctx.tree.tab_bar_mut(parent) {
            Some(bar) => std::mem::replace(&mut bar.value, name.clone()),
            None => String::new(),
        };

        // deactivate every sibling, then activate self
        ctx.tree.set_sibling_tab_values(parent, id);

        if previous != name {
            debug!("tab '{}' selected (was '{}')", name, previous);
            if let Some(callback) = ctx.tree.get(parent).and_then(|bar| bar.callback.clone()) {
                ctx.callbacks.push(CallbackEvent::new(&callback, parent, &name));
            }

            // Context Menu
            if !popup.is_empty() {
                ctx.renderer.open_popup(&popup);
            }
        }

        let children = ctx.tree.children(id).to_vec();
        draw_children(ctx, &children);

        ctx.renderer.end_tab_item();
    } else {
        show_tooltip(ctx, &tip);
    }

    ctx.renderer.pop_id();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_dict::get_bool;

    #[test]
    fn test_closable_round_trip() {
        let mut tab = Tab::new();
        let dict: ConfigDict = serde_yaml::from_str("closable: true").unwrap();
        tab.set_extra_config(&dict);
        assert!(tab.closable);

        let mut out = ConfigDict::new();
        tab.get_extra_config(&mut out);
        assert_eq!(get_bool(&out, "closable"), Some(true));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut tab = Tab::new();
        let dict: ConfigDict = serde_yaml::from_str("reorderable: true").unwrap();
        tab.set_extra_config(&dict);
        assert_eq!(tab, Tab::new());
    }
}
