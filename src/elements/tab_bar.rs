// Tab Bar Component
// Container drawing a horizontal strip of tabs and hosting the selected tab's content

use log::trace;

use super::{draw_children, DrawContext};
use crate::core::config_dict::{self, ConfigDict, ExtraConfig};
use crate::core::{WidgetId, WidgetTree};
use crate::ui::TabBarFlags;

/// Configuration keys mapped onto [`TabBarFlags`]
const FLAG_KEYS: [(&str, TabBarFlags); 5] = [
    ("reorderable", TabBarFlags::REORDERABLE),
    ("autoselect_new_tabs", TabBarFlags::AUTO_SELECT_NEW_TABS),
    ("tab_list_popup", TabBarFlags::TAB_LIST_POPUP_BUTTON),
    ("no_close_middle_click", TabBarFlags::NO_CLOSE_WITH_MIDDLE_MOUSE_BUTTON),
    ("no_tooltip", TabBarFlags::NO_TOOLTIP),
];

/// Tab bar data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabBar {
    /// Name of the selected tab (empty until a tab is selected)
    pub value: String,
    /// Options passed to the renderer
    pub flags: TabBarFlags,
}

impl TabBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reorderable(&self) -> bool {
        self.flags.contains(TabBarFlags::REORDERABLE)
    }

    pub fn set_reorderable(&mut self, reorderable: bool) {
        self.flags.set(TabBarFlags::REORDERABLE, reorderable);
    }
}

impl ExtraConfig for TabBar {
    fn set_extra_config(&mut self, dict: &ConfigDict) {
        for (key, flag) in FLAG_KEYS {
            if let Some(on) = config_dict::get_bool(dict, key) {
                self.flags.set(flag, on);
            }
        }
    }

    fn get_extra_config(&self, dict: &mut ConfigDict) {
        for (key, flag) in FLAG_KEYS {
            config_dict::set_bool(dict, key, self.flags.contains(flag));
        }
    }
}

/// The tab a tab bar selects when nothing is selected yet: its first shown tab
pub fn default_selection(tree: &WidgetTree, bar: WidgetId) -> Option<WidgetId> {
    tree.children(bar).iter().copied().find(|&child| {
        tree.get(child)
            .map(|widget| widget.shown && widget.kind.as_tab().is_some())
            .unwrap_or(false)
    })
}

/// Clear every pending selection request of `bar`, returning the shown tab that asked
fn take_requested_tab(tree: &mut WidgetTree, bar: WidgetId) -> Option<WidgetId> {
    let mut requested = None;
    for child in tree.children(bar).to_vec() {
        let shown = tree.get(child).map(|widget| widget.shown).unwrap_or(false);
        if let Some(tab) = tree.tab_mut(child) {
            if tab.selection_pending() && shown && requested.is_none() {
                requested = Some(child);
            }
            tab.cancel_selection();
        }
    }
    requested
}

/// Draw a tab bar and its tabs
///
/// Call order: push id, begin group, begin tab bar; if it opened, the tabs
/// and end tab bar; then end group and pop id whether or not it opened.
pub(crate) fn draw(ctx: &mut DrawContext<'_>, id: WidgetId) {
    let Some(widget) = ctx.tree.get(id) else {
        return;
    };
    let Some(bar) = widget.kind.as_tab_bar() else {
        return;
    };
    let label = widget.label.clone();
    let flags = bar.flags;

    ctx.renderer.push_id(id);
    ctx.renderer.begin_group();

    if ctx.renderer.begin_tab_bar(&label, flags) {
        if let Some(requested) = take_requested_tab(ctx.tree, id) {
            ctx.renderer.select_tab_item(requested);
        }
        ctx.tree.ensure_default_selection(id);

        let children = ctx.tree.children(id).to_vec();
        trace!("tab bar '{}' drawing {} tabs", label, children.len());
        draw_children(ctx, &children);

        ctx.renderer.end_tab_bar();
    }

    ctx.renderer.end_group();
    ctx.renderer.pop_id();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_dict::get_bool;

    #[test]
    fn test_reorderable_round_trip() {
        let mut bar = TabBar::new();
        let dict: ConfigDict = serde_yaml::from_str("reorderable: true").unwrap();
        bar.set_extra_config(&dict);
        assert!(bar.reorderable());

        let mut out = ConfigDict::new();
        bar.get_extra_config(&mut out);
        assert_eq!(get_bool(&out, "reorderable"), Some(true));
        assert_eq!(get_bool(&out, "no_tooltip"), Some(false));
    }

    #[test]
    fn test_absent_keys_leave_flags_alone() {
        let mut bar = TabBar::new();
        bar.set_reorderable(true);
        let dict: ConfigDict = serde_yaml::from_str("no_tooltip: 1").unwrap();
        bar.set_extra_config(&dict);
        assert_eq!(bar.flags, TabBarFlags::REORDERABLE | TabBarFlags::NO_TOOLTIP);

        let dict: ConfigDict = serde_yaml::from_str("reorderable: false").unwrap();
        bar.set_extra_config(&dict);
        assert_eq!(bar.flags, TabBarFlags::NO_TOOLTIP);
    }

    #[test]
    fn test_default_selection_is_first_shown_tab() {
        let mut tree = WidgetTree::new();
        let bar = tree.add_tab_bar(None, "bar").unwrap();
        assert_eq!(default_selection(&tree, bar), None);

        let a = tree.add_tab(bar, "a").unwrap();
        let b = tree.add_tab(bar, "b").unwrap();
        assert_eq!(default_selection(&tree, bar), Some(a));

        tree.get_mut(a).unwrap().shown = false;
        assert_eq!(default_selection(&tree, bar), Some(b));
    }
}
