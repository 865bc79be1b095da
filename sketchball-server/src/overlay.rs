use crate::media::Frame;
use sketchball_base::game::gesture::Marker;
use sketchball_base::game::gesture::MarkerStyle;
use sketchball_base::game::GamePhase;
use sketchball_base::game::World;
use sketchball_base::glam::Vec2;
use sketchball_base::BALL_RADIUS;
use sketchball_base::GOAL_RADIUS;
use sketchball_base::SEGMENT_THICKNESS;

pub const MARKER_RADIUS: f32 = 12.0;

const MARKER_DRAWING_COLOR: [u8; 3] = [126, 255, 107];
const MARKER_IDLE_COLOR: [u8; 3] = [107, 107, 255];
const GOAL_COLOR: [u8; 3] = [0, 255, 0];
const SEGMENT_COLOR: [u8; 3] = [255, 150, 50];
const BALL_COLOR: [u8; 3] = [80, 80, 255];
const PROMPT_COLOR: [u8; 3] = [255, 255, 0];
const BANNER_COLOR: [u8; 3] = [255, 215, 0];
const WIN_COLOR: [u8; 3] = [0, 255, 127];

/// Stamps the fingertip marker onto the frame that produced it, colored by
/// whether the pinch is active.
pub fn draw_marker(frame: &mut Frame, marker: &Marker) {
    let color = match marker.style {
        MarkerStyle::Drawing => MARKER_DRAWING_COLOR,
        MarkerStyle::Idle => MARKER_IDLE_COLOR,
    };

    frame.draw_disc(marker.position, MARKER_RADIUS, color);
}

/// Composes the game overlays over a snapshot of the world: goal circle with
/// its label, drawn segments, the ball disc while a ball exists, and the
/// phase banner. Reads the world, never mutates it.
pub fn compose(frame: &mut Frame, world: &World) {
    let level = world.catalog.get(world.level_index).unwrap();
    let goal = level.goal_position;

    frame.draw_circle(goal, GOAL_RADIUS, 2.0, GOAL_COLOR);
    frame.draw_text(goal + Vec2::new(-20.0, -36.0), "GOAL", 1, GOAL_COLOR);

    for (from, to) in &world.segments {
        frame.draw_line(*from, *to, SEGMENT_THICKNESS, SEGMENT_COLOR);
    }

    if let Some(ball) = world.ball {
        frame.draw_disc(world.physics.ball_position(ball), BALL_RADIUS, BALL_COLOR);
    }

    match world.phase {
        GamePhase::Idle => {
            let prompt = format!("LEVEL {}: DRAW WITH YOUR HAND", world.level_index + 1);
            frame.draw_text(Vec2::new(50.0, 50.0), &prompt, 2, PROMPT_COLOR);
        }
        GamePhase::LevelComplete => frame.draw_text(Vec2::new(150.0, 240.0), "LEVEL COMPLETE!", 3, BANNER_COLOR),
        GamePhase::GameOver => frame.draw_text(Vec2::new(200.0, 240.0), "YOU WIN!", 4, WIN_COLOR),
        GamePhase::Running => {}
    }
}
