// Text Component
// Static line of text inside a container

use super::{show_tooltip, DrawContext};
use crate::core::WidgetId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

pub(crate) fn draw(ctx: &mut DrawContext<'_>, id: WidgetId) {
    let Some(widget) = ctx.tree.get(id) else {
        return;
    };
    let crate::core::WidgetKind::Text(text) = &widget.kind else {
        return;
    };
    let value = text.value.clone();
    let tip = widget.tip.clone();

    ctx.renderer.text(&value);
    show_tooltip(ctx, &tip);
}
