use std::path::PathBuf;

use clap::Parser;

/// Fixed game tuning. These are not exposed on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Clock
    pub const TICK_MS: u64 = 50;

    // Speed, in paddle widths per millisecond
    pub const INITIAL_SPEED: f32 = 0.03;
    pub const SPEED_MULTIPLIER: f32 = 1.1;

    // Score
    pub const MAX_SCORE: u32 = 10;

    // Moves smaller than this are not applied
    pub const MOVE_THRESHOLD: f32 = 0.5;

    // Layout, relative to the field width
    pub const PADDLE_WIDTH_DIVISOR: f32 = 100.0;
    pub const PADDLE_HEIGHT_FACTOR: f32 = 10.0;

    // Terminals without release reporting: a key counts as held this long
    // after a first press (past the OS auto-repeat delay) or after a repeat
    pub const KEY_FIRST_HOLD_MS: u64 = 700;
    pub const KEY_REPEAT_HOLD_MS: u64 = 200;
}

/// Values a `GameSession` is built with.
#[derive(Debug, Clone)]
pub struct Config {
    pub tick_ms: f32,
    pub initial_speed: f32,
    pub speed_multiplier: f32,
    pub max_score: u32,
    pub move_threshold: f32,
    pub paddle_width_divisor: f32,
    pub paddle_height_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: Params::TICK_MS as f32,
            initial_speed: Params::INITIAL_SPEED,
            speed_multiplier: Params::SPEED_MULTIPLIER,
            max_score: Params::MAX_SCORE,
            move_threshold: Params::MOVE_THRESHOLD,
            paddle_width_divisor: Params::PADDLE_WIDTH_DIVISOR,
            paddle_height_factor: Params::PADDLE_HEIGHT_FACTOR,
        }
    }
}

/// Two-player terminal tennis. Left: W/S, right: Up/Down.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Seed for the first serve side (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log (defaults to tennis.log next to the executable)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
