use crate::BALL_FRICTION;
use crate::BALL_MASS;
use crate::BALL_RADIUS;
use crate::BALL_RESTITUTION;
use crate::GRAVITY;
use crate::SEGMENT_FRICTION;
use crate::SEGMENT_RESTITUTION;
use glam::Vec2;
use rapier2d::prelude::*;

/// Wrapper around a single rapier2d simulation instance. A fresh instance is
/// created on every world reset, so handles from before a reset are invalid.
/// Stepping is driven by the caller, the wrapper itself is not a clock.
pub struct PhysicsWorld {
    pub rigidbodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub gravity: Vector<Real>,

    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigidbodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            gravity: vector![0.0, GRAVITY],
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn add_ball(&mut self, start: Vec2) -> RigidBodyHandle {
        let rigidbody = RigidBodyBuilder::dynamic().translation(vector![start.x, start.y]).build();
        let handle = self.rigidbodies.insert(rigidbody);

        let collider = ColliderBuilder::ball(BALL_RADIUS).restitution(BALL_RESTITUTION).friction(BALL_FRICTION).mass(BALL_MASS).build();
        self.colliders.insert_with_parent(collider, handle, &mut self.rigidbodies);

        handle
    }

    pub fn add_static_segment(&mut self, from: Vec2, to: Vec2, thickness: f32) -> ColliderHandle {
        let shape = SharedShape::capsule(point![from.x, from.y], point![to.x, to.y], thickness);
        let collider = ColliderBuilder::new(shape).restitution(SEGMENT_RESTITUTION).friction(SEGMENT_FRICTION).build();

        self.colliders.insert(collider)
    }

    /// Advances the simulation by exactly `dt` seconds of simulated time.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigidbodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    pub fn ball_position(&self, handle: RigidBodyHandle) -> Vec2 {
        Vec2::from(self.rigidbodies[handle].position().translation)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

pub fn squared_distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn ball_falls_under_gravity() {
        let mut physics = PhysicsWorld::new();
        let ball = physics.add_ball(Vec2::new(100.0, 50.0));

        for _ in 0..60 {
            physics.step(DT);
        }

        let position = physics.ball_position(ball);
        assert!(position.y > 50.0, "ball did not fall, y = {}", position.y);
        assert!((position.x - 100.0).abs() < 1.0, "ball drifted horizontally, x = {}", position.x);
    }

    #[test]
    fn static_segment_blocks_falling_ball() {
        let mut physics = PhysicsWorld::new();
        let ball = physics.add_ball(Vec2::new(100.0, 50.0));
        physics.add_static_segment(Vec2::new(20.0, 200.0), Vec2::new(180.0, 200.0), 5.0);

        for _ in 0..600 {
            physics.step(DT);
        }

        let position = physics.ball_position(ball);
        assert!(position.y < 200.0, "ball passed through the segment, y = {}", position.y);
        assert!(position.y > 100.0, "ball never reached the segment, y = {}", position.y);
    }

    #[test]
    fn squared_distance_is_euclidean() {
        assert_eq!(squared_distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 25.0);
        assert_eq!(squared_distance(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), 0.0);
    }
}
