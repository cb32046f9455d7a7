//! Fixed timestep frame loop
//!
//! One frame: apply queued input, pin the dragged ball to the pointer, then
//! step the world by exactly `SIM_DT` whatever the wall-clock time was.

use glam::Vec2;

use super::state::SimState;
use crate::consts::*;

/// Input event captured by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button / touch pressed at a viewport position
    PointerDown(Vec2),
    /// Primary button / touch released
    PointerUp(Vec2),
    /// Window or page is going away
    Quit,
}

/// Everything the loop needs from the platform for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Events since the previous frame, oldest first
    pub events: Vec<InputEvent>,
    /// Latest known pointer position
    pub pointer: Vec2,
}

/// Apply one batch of input events
///
/// Returns `false` once a quit request is seen; events after it are dropped.
pub fn handle_frame_input(state: &mut SimState, events: &[InputEvent]) -> bool {
    for event in events {
        match *event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                return false;
            }
            InputEvent::PointerDown(pos) => pointer_down(state, pos),
            InputEvent::PointerUp(_) => state.end_drag(),
        }
    }
    true
}

/// Map a page-hide notification to an input event
///
/// `persisted` pages may be restored later, so they do not quit.
pub fn page_hide_event(persisted: bool) -> Option<InputEvent> {
    (!persisted).then_some(InputEvent::Quit)
}

fn pointer_down(state: &mut SimState, pos: Vec2) {
    if state.layout.increase_button.contains(pos) {
        state.increase_gravity();
    } else if state.layout.decrease_button.contains(pos) {
        state.decrease_gravity();
    } else if let Some(index) = state.ball_at(pos) {
        state.start_drag(index, pos);
    } else {
        state.create_ball(pos);
    }
}

/// Teleport the dragged ball to follow the pointer, cancelling its motion
pub fn update_drag(state: &mut SimState, pointer: Vec2) {
    let Some(drag) = state.drag else {
        return;
    };
    let Some(ball) = state.balls.get(drag.ball) else {
        return;
    };
    let body = ball.body;
    // Keep the whole ball clear of the walls, or it is released out of the world
    let margin = Vec2::splat(BALL_RADIUS + WALL_THICKNESS);
    let target = (pointer + drag.offset).clamp(margin, state.play_area - margin);
    state.world.set_position(body, target);
    state.world.set_velocity(body, Vec2::ZERO);
    state.world.set_angular_velocity(body, 0.0);
}

/// Sync gravity into the world and step it once by `SIM_DT`
pub fn advance(state: &mut SimState) {
    state.world.set_gravity(Vec2::new(0.0, state.gravity));
    state.world.step(SIM_DT);
    state.frame_count += 1;
}

/// Run one full frame; returns `false` when the loop should stop
pub fn frame(state: &mut SimState, input: &FrameInput) -> bool {
    if !handle_frame_input(state, &input.events) {
        return false;
    }
    update_drag(state, input.pointer);
    advance(state);
    true
}
