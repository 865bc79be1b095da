use crate::game::gesture::GestureTracker;
use crate::game::gesture::HandDetection;
use crate::game::gesture::Marker;
use crate::game::physics::squared_distance;
use crate::game::physics::PhysicsWorld;
use crate::levels::LevelCatalog;
use crate::GOAL_RADIUS;
use crate::SEGMENT_THICKNESS;
use glam::Vec2;
use log::info;
use rapier2d::prelude::RigidBodyHandle;
use std::fmt;

pub mod gesture;
pub mod physics;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Running,
    LevelComplete,
    GameOver,
}

/// Edge-triggered phase transition raised by a tick that detected a win.
/// Returned exactly once per transition, `level` is the 1-based number of the
/// finished level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinEvent {
    LevelComplete { level: u32 },
    GameOver { level: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameStatus {
    pub phase: GamePhase,
    pub level: u32,
    pub total_levels: u32,
}

/// The sole unit of shared mutable truth. Every loop and every control
/// operation goes through one lock acquisition around a `World` method, so
/// phase checks and the actions they gate are atomic across contexts.
pub struct World {
    pub catalog: LevelCatalog,
    pub level_index: usize,
    pub phase: GamePhase,
    pub ball: Option<RigidBodyHandle>,
    pub segments: Vec<(Vec2, Vec2)>,
    pub physics: PhysicsWorld,
    pub gesture: GestureTracker,
}

impl World {
    pub fn new(catalog: LevelCatalog) -> Self {
        let mut world = Self {
            catalog,
            level_index: 0,
            phase: GamePhase::Idle,
            ball: None,
            segments: Vec::new(),
            physics: PhysicsWorld::new(),
            gesture: GestureTracker::default(),
        };
        world.reset_world(0, true);

        world
    }

    /// Replaces the physics instance with a fresh one, destroying the ball and
    /// returning to `Idle`. Drawn segments are cleared iff `clear_drawing`,
    /// otherwise they are re-registered as colliders in the new instance.
    pub fn reset_world(&mut self, level_index: usize, clear_drawing: bool) {
        self.physics = PhysicsWorld::new();
        self.ball = None;
        self.phase = GamePhase::Idle;
        self.level_index = level_index;

        if clear_drawing {
            self.segments.clear();
            self.gesture.reset();
        } else {
            for (from, to) in &self.segments {
                self.physics.add_static_segment(*from, *to, SEGMENT_THICKNESS);
            }
        }
    }

    /// No-op if the ball already exists, at most one ball lives at a time.
    pub fn spawn_ball(&mut self) {
        if self.ball.is_none() {
            let level = self.catalog.get(self.level_index).unwrap();
            self.ball = Some(self.physics.add_ball(level.ball_start));
        }
    }

    /// Legal only while `Idle`, otherwise a silent no-op returning the current
    /// phase. Calling it twice has the same effect as once.
    pub fn request_start(&mut self) -> GamePhase {
        if self.phase == GamePhase::Idle {
            self.spawn_ball();
            self.phase = GamePhase::Running;
        }

        self.phase
    }

    /// Legal only while `LevelComplete` and when more levels remain, otherwise
    /// a silent no-op. Returns the current 0-based level index.
    pub fn request_advance(&mut self) -> usize {
        if self.phase == GamePhase::LevelComplete && self.level_index + 1 < self.catalog.count() {
            self.reset_world(self.level_index + 1, true);
        }

        self.level_index
    }

    /// Always legal, rewinds to level 0 and clears the drawing. The only way
    /// out of `GameOver`.
    pub fn request_reset(&mut self) -> GamePhase {
        self.reset_world(0, true);
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        GameStatus { phase: self.phase, level: self.level_index as u32 + 1, total_levels: self.catalog.count() as u32 }
    }

    /// One simulation tick. Steps the physics while `Running` and evaluates
    /// the win condition, performing the phase transition at most once. Any
    /// other phase is a wait state, the tick is a no-op there.
    pub fn tick(&mut self, dt: f32) -> Option<WinEvent> {
        if self.phase != GamePhase::Running {
            return None;
        }

        self.physics.step(dt);

        let ball = self.ball?;
        let position = self.physics.ball_position(ball);
        let goal = self.catalog.get(self.level_index).unwrap().goal_position;

        if squared_distance(position, goal) < GOAL_RADIUS * GOAL_RADIUS {
            let level = self.level_index as u32 + 1;

            if self.level_index == self.catalog.last_index() {
                self.phase = GamePhase::GameOver;
                info!("Level {} complete, game finished", level);
                return Some(WinEvent::GameOver { level });
            }

            self.phase = GamePhase::LevelComplete;
            info!("Level {} complete", level);
            return Some(WinEvent::LevelComplete { level });
        }

        None
    }

    /// Routes one detection result through the gesture interpreter and applies
    /// its mutations. Drawing is only legal while `Idle`, calls in any other
    /// phase change nothing.
    pub fn apply_gesture(&mut self, detection: Option<HandDetection>, width: u32, height: u32) -> Option<Marker> {
        if self.phase != GamePhase::Idle {
            return None;
        }

        let output = self.gesture.process(detection, width, height);
        if let Some((from, to)) = output.segment {
            self.add_segment(from, to);
        }

        output.marker
    }

    fn add_segment(&mut self, from: Vec2, to: Vec2) {
        self.physics.add_static_segment(from, to, SEGMENT_THICKNESS);
        self.segments.push((from, to));
    }
}

impl GamePhase {
    pub fn id(&self) -> u32 {
        match self {
            GamePhase::Idle => 0,
            GamePhase::Running => 1,
            GamePhase::LevelComplete => 2,
            GamePhase::GameOver => 3,
        }
    }

    pub fn from_id(id: u32) -> Option<GamePhase> {
        match id {
            0 => Some(GamePhase::Idle),
            1 => Some(GamePhase::Running),
            2 => Some(GamePhase::LevelComplete),
            3 => Some(GamePhase::GameOver),
            _ => None,
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GamePhase::Idle => write!(f, "idle"),
            GamePhase::Running => write!(f, "running"),
            GamePhase::LevelComplete => write!(f, "level_complete"),
            GamePhase::GameOver => write!(f, "game_over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelDefinition;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        World::new(LevelCatalog::default())
    }

    fn place_ball(world: &mut World, position: Vec2) {
        let ball = world.ball.unwrap();
        let body = world.physics.rigidbodies.get_mut(ball).unwrap();
        body.set_translation(rapier2d::prelude::vector![position.x, position.y], true);
        body.set_linvel(rapier2d::prelude::vector![0.0, 0.0], true);
    }

    fn goal(world: &World) -> Vec2 {
        world.catalog.get(world.level_index).unwrap().goal_position
    }

    #[test]
    fn reset_restores_idle_world_for_every_level() {
        let mut world = world();

        for index in 0..world.catalog.count() {
            world.request_start();
            world.apply_gesture(None, 640, 480);
            world.reset_world(index, true);

            assert_eq!(world.phase, GamePhase::Idle);
            assert_eq!(world.level_index, index);
            assert!(world.ball.is_none());
            assert!(world.segments.is_empty());
            assert_eq!(world.physics.rigidbodies.len(), 0);
            assert_eq!(world.physics.colliders.len(), 0);
        }
    }

    #[test]
    fn start_is_idempotent() {
        let mut world = world();

        assert_eq!(world.request_start(), GamePhase::Running);
        assert_eq!(world.request_start(), GamePhase::Running);

        assert!(world.ball.is_some());
        assert_eq!(world.physics.rigidbodies.len(), 1);
    }

    #[test]
    fn advance_is_a_noop_outside_level_complete() {
        let mut world = world();

        assert_eq!(world.request_advance(), 0);
        assert_eq!(world.phase, GamePhase::Idle);

        world.request_start();
        assert_eq!(world.request_advance(), 0);
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn ball_inside_goal_radius_completes_the_level() {
        let mut world = world();
        world.request_start();
        let goal_pos = goal(&world) + Vec2::new(20.0, 0.0);
        place_ball(&mut world, goal_pos);

        let event = world.tick(DT);

        assert_eq!(event, Some(WinEvent::LevelComplete { level: 1 }));
        assert_eq!(world.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn ball_outside_goal_radius_keeps_running() {
        let mut world = world();
        world.request_start();
        let goal_pos = goal(&world) + Vec2::new(27.0, 0.0);
        place_ball(&mut world, goal_pos);

        assert_eq!(world.tick(DT), None);
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn win_fires_exactly_once() {
        let mut world = world();
        world.request_start();
        let goal_pos = goal(&world);
        place_ball(&mut world, goal_pos);

        assert!(world.tick(DT).is_some());
        assert!(world.tick(DT).is_none());
        assert_eq!(world.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn final_level_win_is_game_over() {
        let mut world = world();
        world.reset_world(world.catalog.last_index(), true);
        world.request_start();
        let goal_pos = goal(&world);
        place_ball(&mut world, goal_pos);

        let event = world.tick(DT);

        assert_eq!(event, Some(WinEvent::GameOver { level: 3 }));
        assert_eq!(world.phase, GamePhase::GameOver);

        // No legal path out of GameOver besides reset
        assert_eq!(world.request_advance(), world.catalog.last_index());
        assert_eq!(world.request_start(), GamePhase::GameOver);
        assert_eq!(world.request_reset(), GamePhase::Idle);
        assert_eq!(world.level_index, 0);
    }

    #[test]
    fn level_walkthrough_advances_and_clears_drawing() {
        let mut world = world();

        // Draw one segment while idle, then run level 1 to its goal
        world.add_segment(Vec2::new(100.0, 200.0), Vec2::new(200.0, 200.0));
        world.request_start();
        let goal_pos = goal(&world);
        place_ball(&mut world, goal_pos);

        assert_eq!(world.tick(DT), Some(WinEvent::LevelComplete { level: 1 }));
        assert_eq!(world.segments.len(), 1, "drawing must stay visible during the level_complete banner");

        assert_eq!(world.request_advance(), 1);
        assert_eq!(world.phase, GamePhase::Idle);
        assert!(world.segments.is_empty());
        assert!(world.ball.is_none());
    }

    #[test]
    fn gestures_are_ignored_outside_idle() {
        let mut world = world();
        world.request_start();

        let detection = HandDetection { index_tip: Vec2::new(0.5, 0.5), middle_tip: Vec2::new(0.5, 0.5) };
        assert!(world.apply_gesture(Some(detection), 640, 480).is_none());
        assert!(world.segments.is_empty());
    }

    #[test]
    fn pinched_gestures_append_segments_and_colliders() {
        let mut world = world();
        let pinch = |tip: Vec2| HandDetection { index_tip: tip, middle_tip: tip };

        world.apply_gesture(Some(pinch(Vec2::new(0.25, 0.25))), 640, 480);
        world.apply_gesture(Some(pinch(Vec2::new(0.5, 0.25))), 640, 480);

        assert_eq!(world.segments, vec![(Vec2::new(160.0, 120.0), Vec2::new(320.0, 120.0))]);
        assert_eq!(world.physics.colliders.len(), 1);
    }

    #[test]
    fn reset_without_clearing_rebuilds_segment_colliders() {
        let mut world = world();
        world.add_segment(Vec2::new(100.0, 200.0), Vec2::new(200.0, 200.0));
        world.reset_world(0, false);

        assert_eq!(world.segments.len(), 1);
        assert_eq!(world.physics.colliders.len(), 1);
    }

    #[test]
    fn custom_catalog_drives_game_over_boundary() {
        let catalog = LevelCatalog::new(vec![LevelDefinition { ball_start: Vec2::new(50.0, 50.0), goal_position: Vec2::new(300.0, 300.0) }]).unwrap();
        let mut world = World::new(catalog);
        world.request_start();
        place_ball(&mut world, Vec2::new(300.0, 300.0));

        assert_eq!(world.tick(DT), Some(WinEvent::GameOver { level: 1 }));
    }
}
