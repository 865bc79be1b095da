#![allow(clippy::collapsible_else_if, clippy::collapsible_if)]

pub mod game;
pub mod levels;
pub mod network;
pub mod packets;
pub mod utils;

pub use anyhow;
pub use fastrand;
pub use glam;
pub use log;
pub use nalgebra;
pub use parking_lot;
pub use rapier2d;

/// Gravity in pixel units, +y points down the frame.
pub const GRAVITY: f32 = 981.0;

pub const GOAL_RADIUS: f32 = 25.0;
pub const PINCH_THRESHOLD: f32 = 25.0;

pub const BALL_MASS: f32 = 10.0;
pub const BALL_RADIUS: f32 = 15.0;
pub const BALL_RESTITUTION: f32 = 0.8;
pub const BALL_FRICTION: f32 = 0.5;

pub const SEGMENT_THICKNESS: f32 = 5.0;
pub const SEGMENT_RESTITUTION: f32 = 0.8;
pub const SEGMENT_FRICTION: f32 = 0.7;

#[macro_export]
macro_rules! error_return {
    ($($arg:tt)+) => { { log::error!($($arg)+); return; } };
}

#[macro_export]
macro_rules! error_break {
    ($($arg:tt)+) => { { log::error!($($arg)+); break; } };
}

#[macro_export]
macro_rules! error_continue {
    ($($arg:tt)+) => { { log::error!($($arg)+); continue; } };
}
