// Widget elements module
// Per-kind widget data and the per-frame draw protocol shared by containers

pub mod button;
pub mod tab;
pub mod tab_bar;
pub mod text;

pub use button::Button;
pub use tab::Tab;
pub use tab_bar::TabBar;
pub use text::Text;

use log::warn;

use crate::core::{CallbackQueue, WidgetId, WidgetKind, WidgetTree};
use crate::ui::Renderer;

/// Everything a widget needs while it is being drawn
pub(crate) struct DrawContext<'a> {
    pub tree: &'a mut WidgetTree,
    pub renderer: &'a mut dyn Renderer,
    pub callbacks: &'a mut CallbackQueue,
}

/// Draw `children` in order
///
/// Hidden children are skipped entirely. For the others: width override,
/// color push, draw, color pop, then the interaction state is refreshed.
pub(crate) fn draw_children(ctx: &mut DrawContext<'_>, children: &[WidgetId]) {
    for &child in children {
        let Some(widget) = ctx.tree.get(child) else {
            warn!("skipping stale widget handle {}", child);
            continue;
        };

        // skip item if it's not shown
        if !widget.shown {
            continue;
        }

        if widget.width != 0 {
            ctx.renderer.set_next_item_width(widget.width as f32);
        }

        let pushed = push_color_styles(ctx, child);
        draw_widget(ctx, child);
        pop_color_styles(ctx, pushed);

        let status = ctx.renderer.item_status();
        if let Some(widget) = ctx.tree.get_mut(child) {
            widget.state.update(status);
        }
    }
}

fn draw_widget(ctx: &mut DrawContext<'_>, id: WidgetId) {
    let Some(widget) = ctx.tree.get(id) else {
        return;
    };
    let draw: fn(&mut DrawContext<'_>, WidgetId) = match widget.kind {
        WidgetKind::TabBar(_) => tab_bar::draw,
        WidgetKind::Tab(_) => tab::draw,
        WidgetKind::Text(_) => text::draw,
        WidgetKind::Button(_) => button::draw,
    };
    draw(ctx, id);
}

/// Push the widget's colors, returning how many were pushed
fn push_color_styles(ctx: &mut DrawContext<'_>, id: WidgetId) -> usize {
    let Some(widget) = ctx.tree.get(id) else {
        return 0;
    };
    for &(target, color) in &widget.colors {
        ctx.renderer.push_style_color(target, color);
    }
    widget.colors.len()
}

fn pop_color_styles(ctx: &mut DrawContext<'_>, count: usize) {
    if count > 0 {
        ctx.renderer.pop_style_color(count);
    }
}

/// Tooltip for the item just submitted, if one is configured and it is hovered
pub(crate) fn show_tooltip(ctx: &mut DrawContext<'_>, tip: &str) {
    if !tip.is_empty() && ctx.renderer.is_item_hovered() {
        ctx.renderer.set_tooltip(tip);
    }
}
