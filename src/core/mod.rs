// Core infrastructure module
// Widget arena, configuration protocol and callback dispatch

pub mod app;
pub mod app_config;
pub mod config_dict;
pub mod error;
pub mod events;
pub mod item_state;
pub mod shared;
pub mod tree;

pub use app::App;
pub use app_config::{RenderSettings, ThemeColors};
pub use config_dict::{ConfigDict, ExtraConfig};
pub use error::TreeError;
pub use events::{AppEvent, CallbackEvent, CallbackQueue, CallbackRegistry, EventHandler};
pub use item_state::ItemState;
pub use shared::SharedTree;
pub use tree::{Widget, WidgetId, WidgetKind, WidgetTree};
