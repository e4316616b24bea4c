use crate::assets::Assets;
use crate::car::CarParams;
use crate::computer::ComputerCar;
use crate::config;
use crate::input::FrameInput;
use crate::player::PlayerCar;
use crate::progress::Clock;
use crate::race::{Race, RaceEvent, Track};
use crate::render::Renderer;
use crate::types::Point;
use log::info;
use macroquad::prelude::{get_frame_time, get_time, next_frame};

/// Wall-clock time since the window opened.
pub struct MacroquadClock;

impl Clock for MacroquadClock {
    fn now(&self) -> f64 {
        get_time()
    }
}

/// The Game struct owns the race, the loaded assets, and the frame loop state
pub struct Game {
    race: Race,
    assets: Assets,
    record_path: bool,
    recorded_path: Vec<Point>,
    time_accumulator: f32,
    tick_duration: f32,
}

impl Game {
    pub fn new(assets: Assets, levels: u32, record_path: bool) -> Self {
        let player = PlayerCar::new(
            CarParams {
                label: "player",
                start: config::PLAYER_START,
                max_velocity: config::PLAYER_MAX_VELOCITY,
                turn_rate: config::PLAYER_TURN_RATE,
                acceleration: config::ACCELERATION,
            },
            assets.player_mask(),
            (config::CAR_WIDTH, config::CAR_HEIGHT),
        );
        let computer = ComputerCar::new(
            CarParams {
                label: "computer",
                start: config::COMPUTER_START,
                max_velocity: config::COMPUTER_MAX_VELOCITY,
                turn_rate: config::COMPUTER_TURN_RATE,
                acceleration: config::ACCELERATION,
            },
            assets.computer_mask(),
            (config::CAR_WIDTH, config::CAR_HEIGHT),
            config::waypoints(),
        );
        let track = Track {
            border: assets.border_mask(),
            finish: assets.finish_mask(),
            finish_origin: config::FINISH_POSITION,
        };
        info!(
            "Race set up: {} levels, {} waypoints.",
            levels,
            computer.waypoints().len()
        );

        Game {
            race: Race::new(player, computer, track, levels, Box::new(MacroquadClock)),
            assets,
            record_path,
            recorded_path: Vec::new(),
            time_accumulator: 0.0,
            tick_duration: 1.0 / config::TICKS_PER_SECOND as f32,
        }
    }

    /// Run the frame loop until the player quits
    pub async fn run(&mut self, renderer: &Renderer) {
        info!("Starting main loop...");

        loop {
            let input = FrameInput::poll();
            if input.quit {
                info!("Quit requested.");
                break;
            }

            if input.key_pressed {
                if let Some(event) = self.race.press_start() {
                    log_event(event);
                }
            }

            if self.record_path {
                if let Some(point) = input.click {
                    info!("Recorded waypoint ({:.0}, {:.0})", point.x, point.y);
                    self.recorded_path.push(point);
                }
            }

            // Fixed simulation steps for the time that passed this frame
            self.time_accumulator += get_frame_time();
            while self.time_accumulator >= self.tick_duration {
                self.time_accumulator -= self.tick_duration;
                for event in self.race.tick(&input.controls) {
                    log_event(event);
                }
            }

            renderer.draw_frame(&self.assets, &self.race, &self.recorded_path);
            next_frame().await;
        }

        if !self.recorded_path.is_empty() {
            info!("Recorded path: {}", format_path(&self.recorded_path));
        }
        info!("Exiting.");
    }
}

fn log_event(event: RaceEvent) {
    match event {
        RaceEvent::WallHit | RaceEvent::WrongWayFinish => {
            log::debug!(target: "race", "{:?}", event);
        }
        RaceEvent::Lost => info!("You Lost!"),
        RaceEvent::Won => info!("You won the game!"),
        other => info!("{:?}", other),
    }
}

/// Formats points as a Rust array literal ready to paste into `config::PATH`.
pub fn format_path(points: &[Point]) -> String {
    let items: Vec<String> = points
        .iter()
        .map(|p| format!("({:.1}, {:.1})", p.x.round(), p.y.round()))
        .collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_path() {
        let points = [Point::new(135.2, 122.0), Point::new(108.0, 54.6)];
        assert_eq!(format_path(&points), "[(135.0, 122.0), (108.0, 55.0)]");
        assert_eq!(format_path(&[]), "[]");
    }
}
