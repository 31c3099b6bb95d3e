// Event Handling
// Callback dispatch queue and terminal event translation

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};

use super::tree::WidgetId;

// ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                        Callback Queue                                          │
// └────────────────────────────────────────────────────────────────────────────────────────────────┘

/// A callback raised by a widget during a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEvent {
    /// Registered callback name
    pub callback: String,
    /// Widget that owns the callback
    pub sender: WidgetId,
    /// Callback argument (for tab bars: the newly selected tab's name)
    pub payload: String,
}

impl CallbackEvent {
    pub fn new(callback: &str, sender: WidgetId, payload: &str) -> Self {
        Self {
            callback: callback.to_string(),
            sender,
            payload: payload.to_string(),
        }
    }
}

/// FIFO of callbacks raised while drawing, dispatched after the frame
#[derive(Debug, Clone, Default)]
pub struct CallbackQueue {
    events: VecDeque<CallbackEvent>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CallbackEvent) {
        debug!("queued callback '{}' from {} with '{}'", event.callback, event.sender, event.payload);
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<CallbackEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallbackEvent> {
        self.events.iter()
    }

    /// Take every queued event in order
    pub fn drain(&mut self) -> Vec<CallbackEvent> {
        self.events.drain(..).collect()
    }
}

/// Handler invoked for a dispatched callback
pub type CallbackFn = Box<dyn FnMut(&CallbackEvent)>;

/// Named callback handlers
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: HashMap<String, CallbackFn>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for `name`
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&CallbackEvent) + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatch every queued event, returning how many reached a handler
    ///
    /// Events without a registered handler are dropped with a warning.
    pub fn run(&mut self, queue: &mut CallbackQueue) -> usize {
        let mut dispatched = 0;
        while let Some(event) = queue.pop() {
            match self.handlers.get_mut(&event.callback) {
                Some(handler) => {
                    handler(&event);
                    dispatched += 1;
                }
                None => warn!("no handler registered for callback '{}'", event.callback),
            }
        }
        dispatched
    }
}

// ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                       Terminal Events                                          │
// └────────────────────────────────────────────────────────────────────────────────────────────────┘

/// Application events that can be handled
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Quit the application
    Quit,

    /// Select the next tab of the focused tab bar
    NextTab,

    /// Select the previous tab of the focused tab bar
    PreviousTab,

    /// Mouse input, forwarded to the renderer for hit testing
    Pointer(Event),

    /// No operation
    None,
}

/// Event handler that converts terminal events to application events
pub struct EventHandler;

impl EventHandler {
    /// Convert a crossterm event to an application event
    pub fn handle(event: Event) -> AppEvent {
        match event {
            Event::Key(key) => Self::handle_key(key),
            Event::Mouse(_) => AppEvent::Pointer(event),
            _ => AppEvent::None,
        }
    }

    /// Handle keyboard events
    fn handle_key(key: KeyEvent) -> AppEvent {
        // Only handle key press events
        if key.kind != KeyEventKind::Press {
            return AppEvent::None;
        }

        match key.code {
            // Quit
            KeyCode::Char('q') => AppEvent::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppEvent::Quit,

            // Tab navigation
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => AppEvent::NextTab,
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => AppEvent::PreviousTab,

            _ => AppEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sender() -> WidgetId {
        let mut tree = crate::core::WidgetTree::new();
        tree.add_tab_bar(None, "bar").unwrap()
    }

    #[test]
    fn test_queue_is_fifo() {
        let id = sender();
        let mut queue = CallbackQueue::new();
        queue.push(CallbackEvent::new("changed", id, "a"));
        queue.push(CallbackEvent::new("changed", id, "b"));
        assert_eq!(queue.len(), 2);
        let payloads: Vec<String> = queue.drain().into_iter().map(|e| e.payload).collect();
        assert_eq!(payloads, vec!["a", "b"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_registry_dispatches_known_callbacks() {
        let id = sender();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut registry = CallbackRegistry::new();
        registry.register("changed", move |event| sink.borrow_mut().push(event.payload.clone()));

        let mut queue = CallbackQueue::new();
        queue.push(CallbackEvent::new("changed", id, "files"));
        queue.push(CallbackEvent::new("unknown", id, "x"));

        assert_eq!(registry.run(&mut queue), 1);
        assert!(queue.is_empty());
        assert_eq!(*seen.borrow(), vec!["files".to_string()]);
    }

    #[test]
    fn test_key_mapping() {
        let press = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert!(matches!(EventHandler::handle(press(KeyCode::Char('q'))), AppEvent::Quit));
        assert!(matches!(EventHandler::handle(press(KeyCode::Tab)), AppEvent::NextTab));
        assert!(matches!(EventHandler::handle(press(KeyCode::BackTab)), AppEvent::PreviousTab));
        assert!(matches!(EventHandler::handle(press(KeyCode::Char('z'))), AppEvent::None));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(EventHandler::handle(ctrl_c), AppEvent::Quit));
    }

    #[test]
    fn test_mouse_is_forwarded() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert!(matches!(EventHandler::handle(click), AppEvent::Pointer(Event::Mouse(_))));
    }
}
