// Tab Tree Library
// Retained tab bar and tab widgets drawn through an immediate-mode renderer

// Core infrastructure - widget arena, configuration, callbacks
pub mod core;

// Elements - per-kind widget data and draw routines
pub mod elements;

// Managers - handle-based wrappers for widget operations
pub mod managers;

// UI - renderer protocol and back ends
pub mod ui;

// Layout files
pub mod config;

// Re-export commonly used items for convenience
pub use crate::core::{
    App, CallbackEvent, CallbackQueue, CallbackRegistry, ConfigDict, ExtraConfig, RenderSettings, SharedTree, TreeError,
    WidgetId, WidgetKind, WidgetTree,
};
pub use config::{build_layout, load_layout, LayoutConfig, LayoutError};
pub use managers::TabBarManager;
pub use ui::{Renderer, ScriptedRenderer, TerminalRenderer};
