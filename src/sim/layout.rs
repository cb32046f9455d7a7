//! Sidebar geometry
//!
//! Computed once at start-up and shared by input hit-testing and drawing, so the
//! two can never disagree about where a button is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// Horizontal inset of buttons and readouts from the sidebar's left edge
const CONTENT_INSET: f32 = 20.0;
/// Horizontal inset of button captions
const CAPTION_INSET: f32 = 50.0;
/// Vertical offset of a caption below its button's top edge
const CAPTION_DROP: f32 = 10.0;

/// Positions of everything drawn in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SidebarLayout {
    pub panel: Rect,
    pub increase_button: Rect,
    pub decrease_button: Rect,
    pub increase_caption: Vec2,
    pub decrease_caption: Vec2,
    pub gravity_label: Vec2,
    pub gravity_value: Vec2,
    pub fps_readout: Vec2,
}

impl SidebarLayout {
    /// Layout for a sidebar of `width` docked to the right of a `viewport`
    pub fn new(viewport: Vec2, width: f32) -> Self {
        let left = viewport.x - width;
        let increase_button = Rect::new(left + CONTENT_INSET, 50.0, BUTTON_WIDTH, BUTTON_HEIGHT);
        let decrease_button = Rect::new(left + CONTENT_INSET, 110.0, BUTTON_WIDTH, BUTTON_HEIGHT);

        Self {
            panel: Rect::new(left, 0.0, width, viewport.y),
            increase_button,
            decrease_button,
            increase_caption: Vec2::new(left + CAPTION_INSET, increase_button.y + CAPTION_DROP),
            decrease_caption: Vec2::new(left + CAPTION_INSET, decrease_button.y + CAPTION_DROP),
            gravity_label: Vec2::new(left + CONTENT_INSET, 180.0),
            gravity_value: Vec2::new(left + CONTENT_INSET, 210.0),
            fps_readout: Vec2::new(left + CONTENT_INSET, viewport.y - 40.0),
        }
    }
}

impl Default for SidebarLayout {
    fn default() -> Self {
        Self::new(Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT), SIDEBAR_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_positions() {
        let layout = SidebarLayout::default();
        assert_eq!(layout.panel, Rect::new(800.0, 0.0, 200.0, 600.0));
        assert_eq!(layout.increase_button, Rect::new(820.0, 50.0, 160.0, 40.0));
        assert_eq!(layout.decrease_button, Rect::new(820.0, 110.0, 160.0, 40.0));
        assert_eq!(layout.increase_caption, Vec2::new(850.0, 60.0));
        assert_eq!(layout.decrease_caption, Vec2::new(850.0, 120.0));
        assert_eq!(layout.gravity_label, Vec2::new(820.0, 180.0));
        assert_eq!(layout.gravity_value, Vec2::new(820.0, 210.0));
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let layout = SidebarLayout::default();
        let inc = layout.increase_button;
        let dec = layout.decrease_button;
        assert!(inc.max().y <= dec.min().y);
        assert!(!inc.contains(dec.min()));
    }

    #[test]
    fn test_buttons_inside_panel() {
        let layout = SidebarLayout::default();
        for button in [layout.increase_button, layout.decrease_button] {
            assert!(layout.panel.contains(button.min()));
            assert!(button.max().x <= layout.panel.max().x);
        }
    }
}
