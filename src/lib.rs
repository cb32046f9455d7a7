//! Ball Drop - an interactive 2D ball-drop sandbox
//!
//! Core modules:
//! - `sim`: Interaction loop state (balls, dragging, gravity) over a rigid-body world
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame pacing and FPS measurement
//! - `settings`: Persisted tunables

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Sandbox configuration constants
pub mod consts {
    /// Fixed simulation timestep, one step per rendered frame
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Frame rate cap for the interactive loop
    pub const TARGET_FPS: f32 = 60.0;

    /// Logical viewport (play area + sidebar)
    pub const VIEWPORT_WIDTH: f32 = 1000.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Strip reserved on the right for the gravity controls
    pub const SIDEBAR_WIDTH: f32 = 200.0;
    pub const PLAY_AREA_WIDTH: f32 = VIEWPORT_WIDTH - SIDEBAR_WIDTH;
    pub const PLAY_AREA_HEIGHT: f32 = VIEWPORT_HEIGHT;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_MASS: f32 = 1.0;
    pub const BALL_RESTITUTION: f32 = 0.95;
    pub const BALL_FRICTION: f32 = 0.9;
    /// Extra radius of the ring drawn around the dragged ball
    pub const HIGHLIGHT_OFFSET: f32 = 2.0;
    pub const HIGHLIGHT_WIDTH: f32 = 2.0;

    /// Boundary walls (segment radius)
    pub const WALL_THICKNESS: f32 = 10.0;
    pub const WALL_RESTITUTION: f32 = 0.95;
    pub const WALL_FRICTION: f32 = 0.9;

    /// Downward acceleration at start-up (pixels/s²)
    pub const DEFAULT_GRAVITY: f32 = 900.0;
    /// Change applied by one press of a gravity button
    pub const GRAVITY_STEP: f32 = 100.0;

    /// Sidebar buttons
    pub const BUTTON_WIDTH: f32 = 160.0;
    pub const BUTTON_HEIGHT: f32 = 40.0;
}

/// RGBA palette (sRGB, 0-1)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const DRAG_HIGHLIGHT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const SIDEBAR: [f32; 4] = [240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0, 1.0];
    pub const INCREASE_BUTTON: [f32; 4] = [200.0 / 255.0, 200.0 / 255.0, 1.0, 1.0];
    pub const DECREASE_BUTTON: [f32; 4] = [1.0, 200.0 / 255.0, 200.0 / 255.0, 1.0];
    pub const TEXT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

/// True when both components are neither NaN nor infinite
#[inline]
pub fn is_finite_point(p: Vec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Format a 0-1 RGBA color as a CSS `rgba(...)` string
pub fn css_color(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_point() {
        assert!(is_finite_point(Vec2::new(1.0, 2.0)));
        assert!(!is_finite_point(Vec2::new(f32::NAN, 2.0)));
        assert!(!is_finite_point(Vec2::new(1.0, f32::INFINITY)));
        assert!(!is_finite_point(Vec2::new(f32::NEG_INFINITY, f32::NAN)));
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(colors::TEXT), "rgba(0, 0, 0, 1)");
        assert_eq!(css_color(colors::SIDEBAR), "rgba(240, 240, 240, 1)");
    }
}
