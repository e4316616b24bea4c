mod assets;
mod car;
mod computer;
mod config;
mod error;
mod game;
mod input;
mod kinematics;
mod logging;
mod mask;
mod player;
mod progress;
mod race;
mod render;
mod types;

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use clap::Parser;
use log::info;
use macroquad::prelude::*;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of levels to clear to win the game.
    #[arg(long, default_value_t = config::LEVELS, value_parser = clap::value_parser!(u32).range(1..))]
    levels: u32,

    /// Draw the computer car's waypoints.
    #[arg(long)]
    show_path: bool,

    /// Record left clicks as waypoints and print them on exit.
    #[arg(long)]
    record_path: bool,

    /// Debug filter to specify log topics (e.g., "car,path,race,progress")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Racing Game!".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing racing game...");
    let assets = assets::Assets::load();
    let mut game = game::Game::new(assets, args.levels, args.record_path);

    let renderer = render::Renderer::new(args.show_path);
    game.run(&renderer).await;
}
