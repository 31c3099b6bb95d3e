// Application State
// Everything the event loop owns between frames

use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

use super::events::{CallbackQueue, CallbackRegistry};
use super::shared::SharedTree;
use crate::managers::TabBarManager;
use crate::ui::TerminalRenderer;

/// Main application state
pub struct App {
    pub title: String,
    pub tree: SharedTree,
    pub renderer: TerminalRenderer,
    pub callbacks: CallbackRegistry,
    pub queue: CallbackQueue,
    /// Tab bar driven by the keyboard
    pub navigator: Option<TabBarManager>,
    /// Status line text, shared with callback handlers
    pub status: Rc<RefCell<String>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(title: &str, tree: SharedTree, renderer: TerminalRenderer) -> Self {
        Self {
            title: title.to_string(),
            tree,
            renderer,
            callbacks: CallbackRegistry::new(),
            queue: CallbackQueue::new(),
            navigator: None,
            status: Rc::new(RefCell::new(String::new())),
            should_quit: false,
        }
    }

    /// Drive the first root tab bar with the keyboard
    pub fn with_navigator(mut self) -> Self {
        let tree = self.tree.lock();
        self.navigator = tree
            .roots()
            .iter()
            .find(|&&root| tree.tab_bar(root).is_some())
            .and_then(|&root| tree.get(root))
            .and_then(|widget| TabBarManager::attach(&tree, &widget.name).ok());
        drop(tree);

        if let Some(navigator) = &self.navigator {
            debug!("keyboard drives tab bar '{}'", navigator.name());
        }
        self
    }

    pub fn set_status(&self, text: &str) {
        *self.status.borrow_mut() = text.to_string();
    }

    /// Run the handlers of every callback queued during the last frame
    pub fn dispatch_callbacks(&mut self) -> usize {
        self.callbacks.run(&mut self.queue)
    }

    pub fn navigate_next(&mut self) -> bool {
        let Some(navigator) = &self.navigator else {
            return false;
        };
        navigator.navigate_next(&mut self.tree.lock())
    }

    pub fn navigate_previous(&mut self) -> bool {
        let Some(navigator) = &self.navigator else {
            return false;
        };
        navigator.navigate_previous(&mut self.tree.lock())
    }

    pub fn quit(&mut self) {
        info!("quit requested");
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RenderSettings, WidgetTree};

    fn demo_app() -> App {
        let mut tree = WidgetTree::new();
        tree.add_text(None, "heading", "hello").unwrap();
        let bar = tree.add_tab_bar(None, "bar").unwrap();
        tree.get_mut(bar).unwrap().callback = Some("changed".into());
        tree.add_tab(bar, "a").unwrap();
        tree.add_tab(bar, "b").unwrap();
        App::new("demo", SharedTree::new(tree), TerminalRenderer::new(RenderSettings::default())).with_navigator()
    }

    #[test]
    fn test_navigator_attaches_to_first_tab_bar() {
        let app = demo_app();
        assert_eq!(app.navigator.as_ref().map(TabBarManager::name), Some("bar"));
    }

    #[test]
    fn test_keyboard_switch_reaches_handler() {
        let mut app = demo_app();
        let status = Rc::clone(&app.status);
        app.callbacks
            .register("changed", move |event| *status.borrow_mut() = format!("now {}", event.payload));

        app.renderer.set_area(ratatui::layout::Rect::new(0, 0, 40, 8));
        app.tree.lock().draw_frame(&mut app.renderer, &mut app.queue);
        assert_eq!(app.dispatch_callbacks(), 0);

        assert!(app.navigate_next());
        app.tree.lock().draw_frame(&mut app.renderer, &mut app.queue);
        assert_eq!(app.dispatch_callbacks(), 1);
        assert_eq!(*app.status.borrow(), "now b");
    }

    #[test]
    fn test_quit() {
        let mut app = demo_app();
        app.quit();
        assert!(app.should_quit);
    }
}
