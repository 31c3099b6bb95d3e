// Button Component
// Clickable label that dispatches its own callback

use log::debug;

use super::{show_tooltip, DrawContext};
use crate::core::{CallbackEvent, WidgetId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Button;

/// Draw a button; a press queues the button's callback with its name as payload
pub(crate) fn draw(ctx: &mut DrawContext<'_>, id: WidgetId) {
    let Some(widget) = ctx.tree.get(id) else {
        return;
    };
    let name = widget.name.clone();
    let label = widget.label.clone();
    let tip = widget.tip.clone();
    let callback = widget.callback.clone();

    if ctx.renderer.button(&label) {
        debug!("button '{}' pressed", name);
        if let Some(callback) = callback {
            ctx.callbacks.push(CallbackEvent::new(&callback, id, &name));
        }
    }
    show_tooltip(ctx, &tip);
}
