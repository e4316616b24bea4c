//! Configuration constants for the racing game.

use crate::types::Point;

// Window
pub const WINDOW_WIDTH: i32 = 620;
pub const WINDOW_HEIGHT: i32 = 600;
pub const TICKS_PER_SECOND: u32 = 60; // Fixed simulation rate

// HUD
pub const HUD_FONT_SIZE: f32 = 29.0;
pub const BANNER_FONT_SIZE: f32 = 32.0;

// Race rules
pub const LEVELS: u32 = 10; // Levels to clear before the game is won
pub const OUTCOME_PAUSE_SECS: f64 = 5.0; // How long "You Lost!" / "You won" stays up
pub const LEVEL_SPEED_STEP: f64 = 0.2; // Computer cruising speed gained per level

// Car tuning
pub const ACCELERATION: f64 = 0.1 / 1.5;
pub const PLAYER_MAX_VELOCITY: f64 = 2.0;
pub const PLAYER_TURN_RATE: f64 = 2.0; // Degrees per tick
pub const COMPUTER_MAX_VELOCITY: f64 = 1.0;
pub const COMPUTER_TURN_RATE: f64 = 2.0;

// Fallback sprite size used when a car image is unavailable
pub const CAR_WIDTH: f64 = 14.0;
pub const CAR_HEIGHT: f64 = 28.0;

// Track layout
pub const PLAYER_START: Point = Point { x: 145.0, y: 180.0 };
pub const COMPUTER_START: Point = Point { x: 115.0, y: 180.0 };
pub const FINISH_POSITION: Point = Point { x: 100.0, y: 210.0 };

/// Racing line followed by the computer car, in track pixels.
pub const PATH: [(f64, f64); 23] = [
    (135.0, 122.0),
    (108.0, 55.0),
    (41.0, 125.0),
    (42.0, 364.0),
    (229.0, 548.0),
    (276.0, 557.0),
    (325.0, 436.0),
    (329.0, 402.0),
    (400.0, 373.0),
    (463.0, 435.0),
    (455.0, 506.0),
    (490.0, 546.0),
    (548.0, 542.0),
    (563.0, 375.0),
    (558.0, 310.0),
    (406.0, 288.0),
    (332.0, 247.0),
    (387.0, 201.0),
    (518.0, 210.0),
    (554.0, 82.0),
    (264.0, 69.0),
    (232.0, 285.0),
    (121.0, 218.0),
];

// Mask generation
pub const MASK_ALPHA_THRESHOLD: u8 = 127; // Alpha above this counts as solid

pub fn waypoints() -> Vec<Point> {
    PATH.iter().map(|&(x, y)| Point { x, y }).collect()
}
