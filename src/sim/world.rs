//! Rigid-body world
//!
//! Thin adapter over `rapier2d`. The rest of the crate speaks `glam::Vec2`;
//! nalgebra types never leave this module. Only the operations the sandbox
//! needs are exposed: walls, balls, gravity, fixed stepping, and body state.

use glam::Vec2;
use rapier2d::prelude::*;

/// Rapier tolerances scale with this; the world is measured in pixels
const PIXELS_PER_METER: f32 = 100.0;

/// Opaque handle to a body owned by a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyId(RigidBodyHandle);

/// Material and shape of a dynamic ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallDesc {
    pub radius: f32,
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
}

/// Static segment collider with rounded ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallDesc {
    pub a: Vec2,
    pub b: Vec2,
    pub thickness: f32,
    pub restitution: f32,
    pub friction: f32,
}

#[inline]
fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

#[inline]
fn to_point(v: Vec2) -> Point<Real> {
    point![v.x, v.y]
}

#[inline]
fn from_vector(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("gravity", &self.gravity())
            .field("bodies", &self.bodies.len())
            .field("colliders", &self.colliders.len())
            .finish()
    }
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.length_unit = PIXELS_PER_METER;

        Self {
            gravity: to_vector(gravity),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    pub fn gravity(&self) -> Vec2 {
        from_vector(&self.gravity)
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = to_vector(gravity);
    }

    /// Add an immovable segment collider
    pub fn add_wall(&mut self, wall: &WallDesc) {
        let collider = ColliderBuilder::new(SharedShape::capsule(
            to_point(wall.a),
            to_point(wall.b),
            wall.thickness,
        ))
        .restitution(wall.restitution)
        .friction(wall.friction)
        .restitution_combine_rule(CoefficientCombineRule::Multiply)
        .friction_combine_rule(CoefficientCombineRule::Multiply)
        .build();
        self.colliders.insert(collider);
    }

    /// Add a dynamic ball at rest at `pos`
    pub fn add_ball(&mut self, pos: Vec2, ball: &BallDesc) -> BodyId {
        // Sleeping bodies would ignore later gravity changes
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(pos))
            .linvel(vector![0.0, 0.0])
            .can_sleep(false)
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(ball.radius)
            .mass(ball.mass)
            .restitution(ball.restitution)
            .friction(ball.friction)
            .restitution_combine_rule(CoefficientCombineRule::Multiply)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        BodyId(handle)
    }

    /// Number of dynamic bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance every body by exactly `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Duration of the most recent step
    pub fn last_dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(id.0).map(|b| from_vector(b.translation()))
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(id.0).map(|b| from_vector(b.linvel()))
    }

    pub fn angular_velocity(&self, id: BodyId) -> Option<f32> {
        self.bodies.get(id.0).map(|b| b.angvel())
    }

    pub fn set_position(&mut self, id: BodyId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.set_translation(to_vector(pos), true);
        }
    }

    pub fn set_velocity(&mut self, id: BodyId, vel: Vec2) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.set_linvel(to_vector(vel), true);
        }
    }

    pub fn set_angular_velocity(&mut self, id: BodyId, angvel: f32) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.set_angvel(angvel, true);
        }
    }
}
