// Tab Bar Manager
// Handle-style wrapper for tab bar operations

use log::debug;

use crate::core::{TreeError, WidgetId, WidgetTree};

// ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                            Tab Bar Manager - Tab Bar Operations                                │
// └────────────────────────────────────────────────────────────────────────────────────────────────┘

/// Tab bar manager wrapper
/// Associates tab bar operations with a widget handle
#[derive(Debug, Clone)]
pub struct TabBarManager {
    handle: WidgetId,
    name: String,
}

impl TabBarManager {
    /// Create a new, empty tab bar under `parent`
    pub fn create(tree: &mut WidgetTree, parent: Option<WidgetId>, name: &str) -> Result<Self, TreeError> {
        let handle = tree.add_tab_bar(parent, name)?;
        Ok(Self {
            handle,
            name: name.to_string(),
        })
    }

    /// Wrap an existing tab bar by name
    pub fn attach(tree: &WidgetTree, name: &str) -> Result<Self, TreeError> {
        let handle = tree.find(name).ok_or_else(|| TreeError::NotFound(name.to_string()))?;
        if tree.tab_bar(handle).is_none() {
            return Err(TreeError::NotATabBar(name.to_string()));
        }
        Ok(Self {
            handle,
            name: name.to_string(),
        })
    }

    /// Get the handle (object identifier)
    pub fn handle(&self) -> WidgetId {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handles of the tabs that are currently shown, in order
    pub fn tabs(&self, tree: &WidgetTree) -> Vec<WidgetId> {
        tree.children(self.handle)
            .iter()
            .copied()
            .filter(|&child| tree.get(child).map(|widget| widget.shown).unwrap_or(false))
            .collect()
    }

    /// Name of the selected tab, if any
    pub fn selected<'a>(&self, tree: &'a WidgetTree) -> Option<&'a str> {
        tree.tab_bar_value(self.handle).filter(|value| !value.is_empty())
    }

    /// Select a tab by name without dispatching the selection callback
    pub fn select(&self, tree: &mut WidgetTree, tab_name: &str) -> Result<(), TreeError> {
        tree.select_tab(self.handle, tab_name)
    }

    /// Navigate to the next tab
    pub fn navigate_next(&self, tree: &mut WidgetTree) -> bool {
        self.navigate(tree, 1)
    }

    /// Navigate to the previous tab
    pub fn navigate_previous(&self, tree: &mut WidgetTree) -> bool {
        self.navigate(tree, -1)
    }

    /// Ask the renderer to switch tabs, wrapping around at either end
    ///
    /// The switch happens on the next frame like a click would, so the
    /// selection callback fires for it.
    fn navigate(&self, tree: &mut WidgetTree, step: isize) -> bool {
        let tabs = self.tabs(tree);
        if tabs.is_empty() {
            return false;
        }

        let pending = tabs
            .iter()
            .position(|&tab| tree.tab(tab).map(|t| t.selection_pending()).unwrap_or(false));
        let current = pending.or_else(|| {
            let selected = self.selected(tree)?;
            tabs.iter().position(|&tab| tree.get(tab).map(|w| w.name == selected).unwrap_or(false))
        });

        let len = tabs.len() as isize;
        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(len) as usize,
            None => 0,
        };
        if Some(next) == current {
            return false;
        }

        tree.request_tab_selection(self.handle, tabs[next]);
        debug!("tab bar '{}' navigating to tab #{}", self.name, next);
        true
    }

    pub fn reorderable(&self, tree: &WidgetTree) -> bool {
        tree.tab_bar(self.handle).map(|bar| bar.reorderable()).unwrap_or(false)
    }

    pub fn set_reorderable(&self, tree: &mut WidgetTree, reorderable: bool) -> Result<(), TreeError> {
        let bar = tree
            .tab_bar_mut(self.handle)
            .ok_or_else(|| TreeError::NotATabBar(self.name.clone()))?;
        bar.set_reorderable(reorderable);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CallbackQueue;
    use crate::ui::ScriptedRenderer;

    fn manager_with_tabs(names: &[&str]) -> (WidgetTree, TabBarManager) {
        let mut tree = WidgetTree::new();
        let manager = TabBarManager::create(&mut tree, None, "bar").unwrap();
        tree.get_mut(manager.handle()).unwrap().callback = Some("changed".into());
        for name in names {
            tree.add_tab(manager.handle(), name).unwrap();
        }
        (tree, manager)
    }

    #[test]
    fn test_attach_requires_tab_bar() {
        let (mut tree, _) = manager_with_tabs(&["a"]);
        tree.add_text(None, "label", "hi").unwrap();

        assert!(TabBarManager::attach(&tree, "bar").is_ok());
        assert_eq!(
            TabBarManager::attach(&tree, "label").unwrap_err(),
            TreeError::NotATabBar("label".into())
        );
        assert_eq!(
            TabBarManager::attach(&tree, "missing").unwrap_err(),
            TreeError::NotFound("missing".into())
        );
    }

    #[test]
    fn test_navigation_wraps_and_fires_callback() {
        let (mut tree, manager) = manager_with_tabs(&["a", "b", "c"]);
        let mut renderer = ScriptedRenderer::new();
        let mut queue = CallbackQueue::new();
        tree.draw_frame(&mut renderer, &mut queue);
        assert_eq!(manager.selected(&tree), Some("a"));

        assert!(manager.navigate_previous(&mut tree));
        tree.draw_frame(&mut renderer, &mut queue);
        assert_eq!(manager.selected(&tree), Some("c"));
        let events = queue.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload, "c");

        assert!(manager.navigate_next(&mut tree));
        tree.draw_frame(&mut renderer, &mut queue);
        assert_eq!(manager.selected(&tree), Some("a"));
    }

    #[test]
    fn test_navigation_skips_hidden_tabs() {
        let (mut tree, manager) = manager_with_tabs(&["a", "b", "c"]);
        let b = tree.find("b").unwrap();
        tree.get_mut(b).unwrap().shown = false;

        let mut renderer = ScriptedRenderer::new();
        let mut queue = CallbackQueue::new();
        tree.draw_frame(&mut renderer, &mut queue);

        manager.navigate_next(&mut tree);
        tree.draw_frame(&mut renderer, &mut queue);
        assert_eq!(manager.selected(&tree), Some("c"));
    }

    #[test]
    fn test_navigation_single_tab_is_noop() {
        let (mut tree, manager) = manager_with_tabs(&["only"]);
        tree.draw_frame(&mut ScriptedRenderer::new(), &mut CallbackQueue::new());
        assert!(!manager.navigate_next(&mut tree));

        let (mut empty, manager) = manager_with_tabs(&[]);
        assert!(!manager.navigate_next(&mut empty));
    }

    #[test]
    fn test_select_does_not_fire() {
        let (mut tree, manager) = manager_with_tabs(&["a", "b"]);
        let mut renderer = ScriptedRenderer::new();
        let mut queue = CallbackQueue::new();
        tree.draw_frame(&mut renderer, &mut queue);

        manager.select(&mut tree, "b").unwrap();
        tree.draw_frame(&mut renderer, &mut queue);
        assert_eq!(manager.selected(&tree), Some("b"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_select_replaces_pending_navigation() {
        let (mut tree, manager) = manager_with_tabs(&["a", "b", "c"]);
        let mut renderer = ScriptedRenderer::new();
        let mut queue = CallbackQueue::new();
        tree.draw_frame(&mut renderer, &mut queue);
        manager.select(&mut tree, "c").unwrap();
        tree.draw_frame(&mut renderer, &mut queue);

        assert!(manager.navigate_next(&mut tree));
        manager.select(&mut tree, "b").unwrap();
        tree.draw_frame(&mut renderer, &mut queue);

        assert_eq!(manager.selected(&tree), Some("b"));
        assert_eq!(renderer.selected(manager.handle()), tree.find("b"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reorderable() {
        let (mut tree, manager) = manager_with_tabs(&[]);
        assert!(!manager.reorderable(&tree));
        manager.set_reorderable(&mut tree, true).unwrap();
        assert!(manager.reorderable(&tree));
    }
}
