//! Frame description independent of the GPU backend
//!
//! `build` turns sandbox state into shapes (tessellated for wgpu) and text
//! labels (drawn by the platform's overlay, since the GPU path has no fonts).

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::Vertex;
use crate::colors;
use crate::consts::*;
use crate::is_finite_point;
use crate::sim::{BallSprite, Rect, SidebarLayout, SimState};

/// A filled or outlined primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: [f32; 4],
    },
    Rect {
        rect: Rect,
        color: [f32; 4],
    },
}

impl Shape {
    fn tessellate(&self, out: &mut Vec<Vertex>) {
        match *self {
            Shape::Circle {
                center,
                radius,
                color,
            } => out.extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS)),
            Shape::Ring {
                center,
                radius,
                width,
                color,
            } => out.extend(shapes::ring(center, radius, width, color, CIRCLE_SEGMENTS)),
            Shape::Rect { rect, color } => out.extend(shapes::rect(&rect, color)),
        }
    }
}

/// Which overlay element a label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelId {
    IncreaseCaption,
    DecreaseCaption,
    GravityLabel,
    GravityValue,
    Fps,
}

impl LabelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelId::IncreaseCaption => "increase-caption",
            LabelId::DecreaseCaption => "decrease-caption",
            LabelId::GravityLabel => "gravity-label",
            LabelId::GravityValue => "gravity-value",
            LabelId::Fps => "fps",
        }
    }
}

/// Text anchored at its top-left corner in viewport pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub id: LabelId,
    pub text: String,
    pub pos: Vec2,
    pub color: [f32; 4],
}

/// Everything drawn in one frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear_color: [f32; 4],
    pub shapes: Vec<Shape>,
    pub labels: Vec<TextLabel>,
}

impl Scene {
    /// Triangle list for every shape, in draw order
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut out = Vec::new();
        for shape in &self.shapes {
            shape.tessellate(&mut out);
        }
        out
    }

    pub fn label(&self, id: LabelId) -> Option<&TextLabel> {
        self.labels.iter().find(|l| l.id == id)
    }
}

/// Describe the current frame; `fps` adds a readout when present
pub fn build(state: &SimState, fps: Option<u32>) -> Scene {
    let mut shapes = Vec::new();
    push_balls(&mut shapes, state.sprites());
    push_sidebar(&mut shapes, &state.layout);

    Scene {
        clear_color: colors::BACKGROUND,
        shapes,
        labels: sidebar_labels(&state.layout, state.gravity, fps),
    }
}

/// Balls with a non-finite position are skipped for this frame
pub fn push_balls(shapes: &mut Vec<Shape>, sprites: impl Iterator<Item = BallSprite>) {
    for sprite in sprites.filter(|s| is_finite_point(s.pos)) {
        shapes.push(Shape::Circle {
            center: sprite.pos,
            radius: BALL_RADIUS,
            color: sprite.color,
        });
        if sprite.dragged {
            shapes.push(Shape::Ring {
                center: sprite.pos,
                radius: BALL_RADIUS + HIGHLIGHT_OFFSET,
                width: HIGHLIGHT_WIDTH,
                color: colors::DRAG_HIGHLIGHT,
            });
        }
    }
}

fn push_sidebar(shapes: &mut Vec<Shape>, layout: &SidebarLayout) {
    shapes.push(Shape::Rect {
        rect: layout.panel,
        color: colors::SIDEBAR,
    });
    shapes.push(Shape::Rect {
        rect: layout.increase_button,
        color: colors::INCREASE_BUTTON,
    });
    shapes.push(Shape::Rect {
        rect: layout.decrease_button,
        color: colors::DECREASE_BUTTON,
    });
}

fn sidebar_labels(layout: &SidebarLayout, gravity: f32, fps: Option<u32>) -> Vec<TextLabel> {
    let label = |id, text: String, pos| TextLabel {
        id,
        text,
        pos,
        color: colors::TEXT,
    };

    let mut labels = vec![
        label(
            LabelId::IncreaseCaption,
            "↑ Increase".to_string(),
            layout.increase_caption,
        ),
        label(
            LabelId::DecreaseCaption,
            "↓ Decrease".to_string(),
            layout.decrease_caption,
        ),
        label(
            LabelId::GravityLabel,
            "Gravity Y:".to_string(),
            layout.gravity_label,
        ),
        label(
            LabelId::GravityValue,
            format_gravity(gravity),
            layout.gravity_value,
        ),
    ];
    if let Some(fps) = fps {
        labels.push(label(LabelId::Fps, format!("FPS: {fps}"), layout.fps_readout));
    }
    labels
}

/// Whole values print without a fraction (`900`), others with one decimal
pub fn format_gravity(gravity: f32) -> String {
    if gravity.fract() == 0.0 {
        format!("{gravity:.0}")
    } else {
        format!("{gravity:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(x: f32, y: f32, dragged: bool) -> BallSprite {
        BallSprite {
            pos: Vec2::new(x, y),
            color: colors::BALL,
            dragged,
        }
    }

    #[test]
    fn test_non_finite_balls_skipped() {
        let mut shapes = Vec::new();
        let sprites = [
            sprite(100.0, 100.0, false),
            sprite(f32::NAN, 100.0, false),
            sprite(200.0, f32::INFINITY, true),
            sprite(300.0, 100.0, false),
        ];
        push_balls(&mut shapes, sprites.into_iter());
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| matches!(s, Shape::Circle { .. })));
    }

    #[test]
    fn test_only_dragged_ball_gets_ring() {
        let mut shapes = Vec::new();
        push_balls(
            &mut shapes,
            [sprite(100.0, 100.0, false), sprite(200.0, 100.0, true)].into_iter(),
        );
        assert_eq!(shapes.len(), 3);
        assert_eq!(
            shapes[2],
            Shape::Ring {
                center: Vec2::new(200.0, 100.0),
                radius: 17.0,
                width: 2.0,
                color: colors::DRAG_HIGHLIGHT,
            }
        );
    }

    #[test]
    fn test_build_empty_state_draws_sidebar() {
        let state = SimState::default();
        let scene = build(&state, None);
        assert_eq!(scene.clear_color, colors::BACKGROUND);
        assert_eq!(scene.shapes.len(), 3);
        assert_eq!(scene.labels.len(), 4);
        assert!(scene.label(LabelId::Fps).is_none());
        assert_eq!(
            scene.label(LabelId::GravityValue).map(|l| l.text.as_str()),
            Some("900")
        );
    }

    #[test]
    fn test_build_draws_balls_before_sidebar() {
        let mut state = SimState::default();
        state.create_ball(Vec2::new(200.0, 200.0));
        let scene = build(&state, Some(60));
        assert!(matches!(scene.shapes[0], Shape::Circle { .. }));
        assert!(matches!(scene.shapes[1], Shape::Rect { .. }));
        assert_eq!(
            scene.label(LabelId::Fps).map(|l| l.text.as_str()),
            Some("FPS: 60")
        );
    }

    #[test]
    fn test_gravity_readout_tracks_state() {
        let mut state = SimState::default();
        state.increase_gravity();
        let scene = build(&state, None);
        assert_eq!(scene.label(LabelId::GravityValue).unwrap().text, "1000");
    }

    #[test]
    fn test_format_gravity() {
        assert_eq!(format_gravity(0.0), "0");
        assert_eq!(format_gravity(900.0), "900");
        assert_eq!(format_gravity(912.5), "912.5");
    }

    #[test]
    fn test_vertices_cover_all_shapes() {
        let mut state = SimState::default();
        state.create_ball(Vec2::new(200.0, 200.0));
        state.start_drag(0, Vec2::new(200.0, 200.0));
        let scene = build(&state, None);
        let expected = CIRCLE_SEGMENTS as usize * 3 + CIRCLE_SEGMENTS as usize * 6 + 3 * 6;
        assert_eq!(scene.vertices().len(), expected);
    }
}
