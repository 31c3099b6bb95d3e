// Item State
// Per-widget interaction state, refreshed after every draw

use crate::ui::ItemStatus;

/// Interaction state kept on each widget between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemState {
    pub hovered: bool,
    pub active: bool,
    pub focused: bool,
    pub clicked: bool,
    pub visible: bool,
    /// Became active this frame
    pub activated: bool,
    /// Stopped being active this frame
    pub deactivated: bool,
}

impl ItemState {
    /// Take the renderer's status for the item that was just drawn
    pub fn update(&mut self, status: ItemStatus) {
        let was_active = self.active;

        self.hovered = status.hovered;
        self.active = status.active;
        self.focused = status.focused;
        self.clicked = status.clicked;
        self.visible = status.visible;

        self.activated = status.active && !was_active;
        self.deactivated = !status.active && was_active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_edges() {
        let mut state = ItemState::default();
        let active = ItemStatus { active: true, visible: true, ..Default::default() };
        let idle = ItemStatus { visible: true, ..Default::default() };

        state.update(active);
        assert!(state.activated);
        assert!(!state.deactivated);

        state.update(active);
        assert!(!state.activated);

        state.update(idle);
        assert!(state.deactivated);
        assert!(!state.active);
        assert!(state.visible);
    }
}
