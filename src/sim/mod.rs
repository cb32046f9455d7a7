//! Sandbox simulation module
//!
//! Everything the interaction loop owns lives here:
//! - Fixed timestep only, one step per frame
//! - Balls kept in creation order (drag picks the first hit)
//! - No rendering or platform dependencies

pub mod geom;
pub mod layout;
pub mod state;
pub mod tick;
pub mod world;

pub use geom::{Rect, is_valid_position};
pub use layout::SidebarLayout;
pub use state::{BALL_DESC, Ball, BallPhase, BallSprite, Drag, SimState};
pub use tick::{
    FrameInput, InputEvent, advance, frame, handle_frame_input, page_hide_event, update_drag,
};
pub use world::{BallDesc, BodyId, PhysicsWorld, WallDesc};
