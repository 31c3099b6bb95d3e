// Tree Errors
// Structural errors raised when building or editing the widget tree

use thiserror::Error;

use super::tree::WidgetId;

/// Errors returned by widget tree operations
///
/// The draw path never produces these; every type contract between a tab bar
/// and its tabs is checked when the widget is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Handle does not refer to a live widget
    #[error("unknown widget handle {0}")]
    UnknownWidget(WidgetId),

    /// No widget registered under this name
    #[error("no widget named '{0}'")]
    NotFound(String),

    /// Widget names must be non-empty
    #[error("widget names must not be empty")]
    EmptyName,

    /// Widget names are unique across the tree
    #[error("a widget named '{0}' already exists")]
    DuplicateName(String),

    /// Parent is a leaf widget
    #[error("'{parent}' cannot hold child widgets")]
    NotAContainer { parent: String },

    /// Tabs may only live directly under a tab bar
    #[error("tab '{tab}' must be placed in a tab bar, not in '{parent}'")]
    TabOutsideTabBar { tab: String, parent: String },

    /// Tab bars only accept tabs as children
    #[error("tab bar '{parent}' only accepts tabs, got '{child}'")]
    NonTabInTabBar { child: String, parent: String },

    /// Operation needs a tab bar
    #[error("'{0}' is not a tab bar")]
    NotATabBar(String),

    /// Tab is not a child of the given tab bar
    #[error("tab '{tab}' does not belong to tab bar '{bar}'")]
    NotInTabBar { tab: String, bar: String },
}
