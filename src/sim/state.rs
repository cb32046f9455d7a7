//! Sandbox state and core simulation types
//!
//! `SimState` owns the physics world, every ball, the drag target and the
//! gravity scalar. It is mutated only from the frame loop.

use glam::Vec2;

use super::geom::is_valid_position;
use super::layout::SidebarLayout;
use super::world::{BallDesc, BodyId, PhysicsWorld, WallDesc};
use crate::colors;
use crate::consts::*;
use crate::settings::Settings;

/// Ball material shared by every spawned ball
pub const BALL_DESC: BallDesc = BallDesc {
    radius: BALL_RADIUS,
    mass: BALL_MASS,
    restitution: BALL_RESTITUTION,
    friction: BALL_FRICTION,
};

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    pub body: BodyId,
    pub color: [f32; 4],
}

/// The ball currently following the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Index into `SimState::balls`
    pub ball: usize,
    /// Ball center minus pointer position at drag start
    pub offset: Vec2,
}

/// Interaction phase of a single ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    Free,
    Dragging,
}

/// Snapshot of a ball for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSprite {
    pub pos: Vec2,
    pub color: [f32; 4],
    pub dragged: bool,
}

/// Complete sandbox state
#[derive(Debug)]
pub struct SimState {
    pub world: PhysicsWorld,
    /// Balls in creation order; never removed, so indices are stable
    pub balls: Vec<Ball>,
    pub drag: Option<Drag>,
    /// Downward acceleration, never negative
    pub gravity: f32,
    pub gravity_step: f32,
    pub layout: SidebarLayout,
    /// Size of the walled play area
    pub play_area: Vec2,
    /// Fixed steps taken so far
    pub frame_count: u64,
    next_id: u32,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl SimState {
    /// Build the walled world and sidebar for the default viewport
    pub fn new(settings: &Settings) -> Self {
        let viewport = Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        let play_area = Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT);
        let gravity = settings.initial_gravity.max(0.0);

        let mut world = PhysicsWorld::new(Vec2::new(0.0, gravity));
        for wall in boundary_walls(play_area) {
            world.add_wall(&wall);
        }

        Self {
            world,
            balls: Vec::new(),
            drag: None,
            gravity,
            gravity_step: settings.gravity_step,
            layout: SidebarLayout::new(viewport, SIDEBAR_WIDTH),
            play_area,
            frame_count: 0,
            next_id: 1,
        }
    }

    pub fn is_valid_position(&self, pos: Vec2) -> bool {
        is_valid_position(pos, self.play_area)
    }

    /// Spawn a ball at rest at `pos`; invalid positions are ignored
    ///
    /// Returns the new ball's index.
    pub fn create_ball(&mut self, pos: Vec2) -> Option<usize> {
        if !self.is_valid_position(pos) {
            log::trace!("Rejected spawn at {pos}");
            return None;
        }

        let body = self.world.add_ball(pos, &BALL_DESC);
        let id = self.next_id;
        self.next_id += 1;
        self.balls.push(Ball {
            id,
            body,
            color: colors::BALL,
        });
        log::debug!("Ball {} spawned at {}", id, pos);
        Some(self.balls.len() - 1)
    }

    /// Index of the first ball (creation order) whose center is closer than
    /// `BALL_RADIUS` to `pos`
    pub fn ball_at(&self, pos: Vec2) -> Option<usize> {
        self.balls.iter().position(|ball| {
            self.world
                .position(ball.body)
                .is_some_and(|center| center.distance(pos) < BALL_RADIUS)
        })
    }

    /// Make ball `index` the drag target, anchored to the pointer at `pointer`
    pub fn start_drag(&mut self, index: usize, pointer: Vec2) {
        let Some(ball) = self.balls.get(index) else {
            return;
        };
        let Some(center) = self.world.position(ball.body) else {
            return;
        };
        self.world.set_velocity(ball.body, Vec2::ZERO);
        self.world.set_angular_velocity(ball.body, 0.0);
        self.drag = Some(Drag {
            ball: index,
            offset: center - pointer,
        });
        log::debug!("Dragging ball {}", ball.id);
    }

    pub fn end_drag(&mut self) {
        if let Some(ball) = self.drag.take().and_then(|d| self.balls.get(d.ball)) {
            log::debug!("Released ball {}", ball.id);
        }
    }

    pub fn phase_of(&self, index: usize) -> BallPhase {
        match self.drag {
            Some(drag) if drag.ball == index => BallPhase::Dragging,
            _ => BallPhase::Free,
        }
    }

    pub fn increase_gravity(&mut self) {
        self.gravity += self.gravity_step;
        log::info!("Gravity raised to {}", self.gravity);
    }

    pub fn decrease_gravity(&mut self) {
        self.gravity = (self.gravity - self.gravity_step).max(0.0);
        log::info!("Gravity lowered to {}", self.gravity);
    }

    pub fn ball_position(&self, index: usize) -> Option<Vec2> {
        self.balls
            .get(index)
            .and_then(|ball| self.world.position(ball.body))
    }

    pub fn ball_velocity(&self, index: usize) -> Option<Vec2> {
        self.balls
            .get(index)
            .and_then(|ball| self.world.velocity(ball.body))
    }

    pub fn ball_angular_velocity(&self, index: usize) -> Option<f32> {
        self.balls
            .get(index)
            .and_then(|ball| self.world.angular_velocity(ball.body))
    }

    /// Drawable view of every ball, in creation order
    pub fn sprites(&self) -> impl Iterator<Item = BallSprite> + '_ {
        self.balls.iter().enumerate().filter_map(|(i, ball)| {
            let pos = self.world.position(ball.body)?;
            Some(BallSprite {
                pos,
                color: ball.color,
                dragged: self.phase_of(i) == BallPhase::Dragging,
            })
        })
    }
}

/// Four segments enclosing `(0, 0)..area`
fn boundary_walls(area: Vec2) -> [WallDesc; 4] {
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, area.y),
        Vec2::new(area.x, area.y),
        Vec2::new(area.x, 0.0),
    ];
    std::array::from_fn(|i| WallDesc {
        a: corners[i],
        b: corners[(i + 1) % 4],
        thickness: WALL_THICKNESS,
        restitution: WALL_RESTITUTION,
        friction: WALL_FRICTION,
    })
}
