// Managers module
// Handle-based wrappers for operating on widgets in a tree

pub mod tab_bar;

pub use tab_bar::TabBarManager;
