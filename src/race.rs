//! Race controller: per-tick orchestration of both cars, collision outcomes
//! and level flow.

use crate::car::{Car, Racer};
use crate::computer::ComputerCar;
use crate::config::OUTCOME_PAUSE_SECS;
use crate::mask::Mask;
use crate::player::PlayerCar;
use crate::progress::{Clock, GameProgress};
use crate::types::{Controls, Point};
use log::info;

/// Collision geometry of the track. A missing mask never reports a collision.
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub border: Option<Mask>,
    pub finish: Option<Mask>,
    pub finish_origin: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lost,
    Won,
}

/// What the frame loop is currently doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    WaitingToStart,
    Racing,
    ShowingOutcome { outcome: Outcome, until: f64 },
}

/// Notable things that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceEvent {
    LevelStarted { level: u32 },
    WallHit,
    WrongWayFinish,
    LevelComplete { level: u32, seconds: u64 },
    Lost,
    Won,
    Reset,
}

/// Values shown on the heads-up display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub level: u32,
    pub seconds: u64,
    pub speed: f64,
}

pub struct Race {
    player: PlayerCar,
    computer: ComputerCar,
    progress: GameProgress,
    track: Track,
    phase: Phase,
    clock: Box<dyn Clock>,
}

impl Race {
    pub fn new(
        player: PlayerCar,
        computer: ComputerCar,
        track: Track,
        levels: u32,
        clock: Box<dyn Clock>,
    ) -> Self {
        Race {
            player,
            computer,
            progress: GameProgress::new(levels),
            track,
            phase: Phase::WaitingToStart,
            clock,
        }
    }

    pub fn player(&self) -> &PlayerCar {
        &self.player
    }

    pub fn computer(&self) -> &ComputerCar {
        &self.computer
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hud(&self) -> HudState {
        HudState {
            level: self.progress.level,
            seconds: self.progress.level_time(self.clock.as_ref()),
            speed: self.player.car().velocity,
        }
    }

    /// Centre-screen message for the current phase, if any.
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            Phase::WaitingToStart => Some(format!(
                "Press any key to start level {}!",
                self.progress.level
            )),
            Phase::Racing => None,
            Phase::ShowingOutcome {
                outcome: Outcome::Lost,
                ..
            } => Some("You Lost!".to_string()),
            Phase::ShowingOutcome {
                outcome: Outcome::Won,
                ..
            } => Some("You won the game!".to_string()),
        }
    }

    /// Starts the level timer if the race is waiting for the player.
    pub fn press_start(&mut self) -> Option<RaceEvent> {
        if self.phase != Phase::WaitingToStart {
            return None;
        }
        self.progress.start_level(self.clock.as_ref());
        self.phase = Phase::Racing;
        info!("Level {} started", self.progress.level);
        Some(RaceEvent::LevelStarted {
            level: self.progress.level,
        })
    }

    /// Advances the simulation by one fixed step.
    pub fn tick(&mut self, controls: &Controls) -> Vec<RaceEvent> {
        let mut events = Vec::new();
        match self.phase {
            Phase::WaitingToStart => {}
            Phase::ShowingOutcome { until, .. } => {
                if self.clock.now() >= until {
                    self.reset_all();
                    events.push(RaceEvent::Reset);
                }
            }
            Phase::Racing => {
                self.player.update(controls);
                self.computer.update(controls);
                self.resolve_collisions(&mut events);

                if !matches!(self.phase, Phase::ShowingOutcome { .. }) {
                    self.check_finished(&mut events);
                }
            }
        }
        events
    }

    fn resolve_collisions(&mut self, events: &mut Vec<RaceEvent>) {
        let level = self.progress.level;

        if collide(self.player.car(), self.track.border.as_ref(), Point::default()).is_some() {
            self.player.bounce();
            events.push(RaceEvent::WallHit);
        }

        let finish = self.track.finish.as_ref();
        let origin = self.track.finish_origin;

        if collide(self.computer.car(), finish, origin).is_some() {
            info!("Computer car crossed the finish first on Level {}", level);
            self.show_outcome(Outcome::Lost);
            events.push(RaceEvent::Lost);
            return;
        }

        if let Some(point) = collide(self.player.car(), finish, origin) {
            // Touching the top row means the line was entered from the wrong side
            if point.y == 0 {
                crate::debug_race!(level, "wrong-way finish crossing at x={}", point.x);
                self.player.bounce();
                events.push(RaceEvent::WrongWayFinish);
            } else {
                let seconds = self.progress.level_time(self.clock.as_ref());
                info!("Level {} complete in {}s", level, seconds);
                self.progress.next_level();
                self.player.reset();
                self.computer.set_level(self.progress.level);
                self.phase = Phase::WaitingToStart;
                events.push(RaceEvent::LevelComplete { level, seconds });
            }
        }
    }

    fn check_finished(&mut self, events: &mut Vec<RaceEvent>) {
        if self.progress.is_game_finished() {
            info!("All {} levels cleared", self.progress.levels());
            self.show_outcome(Outcome::Won);
            events.push(RaceEvent::Won);
        }
    }

    fn show_outcome(&mut self, outcome: Outcome) {
        self.phase = Phase::ShowingOutcome {
            outcome,
            until: self.clock.now() + OUTCOME_PAUSE_SECS,
        };
    }

    fn reset_all(&mut self) {
        crate::debug_race!(self.progress.level, "resetting race");
        self.progress.reset();
        self.player.reset();
        self.computer.reset();
        self.phase = Phase::WaitingToStart;
    }
}

// Collision against a mask that may have failed to load
fn collide(car: &Car, mask: Option<&Mask>, origin: Point) -> Option<crate::mask::MaskPoint> {
    mask.and_then(|mask| car.collide(mask, origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::CarParams;
    use crate::progress::tests::ManualClock;
    use assert_approx_eq::assert_approx_eq;

    const FINISH_ORIGIN: Point = Point { x: 100.0, y: 210.0 };

    fn solid(width: usize, height: usize) -> Mask {
        Mask::from_fn(width, height, |_, _| true)
    }

    fn params(label: &'static str, start: Point, max_velocity: f64) -> CarParams {
        CarParams {
            label,
            start,
            max_velocity,
            turn_rate: 2.0,
            acceleration: 0.1 / 1.5,
        }
    }

    fn track() -> Track {
        Track {
            // A wall just right of the player's starting lane
            border: Some(Mask::from_fn(620, 600, |x, _| (160..165).contains(&x))),
            finish: Some(solid(60, 12)),
            finish_origin: FINISH_ORIGIN,
        }
    }

    // The computer gets no waypoints so it stays parked on the grid
    fn race_with(track: Track, levels: u32) -> (Race, ManualClock) {
        let clock = ManualClock::default();
        let player = PlayerCar::new(
            params("player", Point::new(145.0, 180.0), 2.0),
            Some(solid(14, 28)),
            (14.0, 28.0),
        );
        let computer = ComputerCar::new(
            params("computer", Point::new(115.0, 180.0), 1.0),
            Some(solid(14, 28)),
            (14.0, 28.0),
            Vec::new(),
        );
        let race = Race::new(player, computer, track, levels, Box::new(clock.clone()));
        (race, clock)
    }

    fn racing(track: Track) -> (Race, ManualClock) {
        let (mut race, clock) = race_with(track, 10);
        assert!(race.press_start().is_some());
        (race, clock)
    }

    #[test]
    fn test_waits_for_start() {
        let (mut race, _clock) = race_with(track(), 10);
        assert_eq!(race.phase(), Phase::WaitingToStart);
        assert_eq!(
            race.banner().as_deref(),
            Some("Press any key to start level 1!")
        );

        let throttle = Controls {
            forward: true,
            ..Default::default()
        };
        assert!(race.tick(&throttle).is_empty());
        assert_eq!(race.player().car().position, Point::new(145.0, 180.0));

        assert_eq!(race.press_start(), Some(RaceEvent::LevelStarted { level: 1 }));
        assert_eq!(race.phase(), Phase::Racing);
        assert_eq!(race.banner(), None);
        // A second press while racing does nothing
        assert_eq!(race.press_start(), None);

        race.tick(&throttle);
        assert_approx_eq!(race.player().car().velocity, 0.1 / 1.5);
    }

    #[test]
    fn test_clean_start_has_no_collisions() {
        let (mut race, _clock) = racing(track());
        let events = race.tick(&Controls::default());
        assert!(events.is_empty(), "unexpected events {:?}", events);
    }

    #[test]
    fn test_player_bounces_off_border() {
        let (mut race, _clock) = racing(track());
        race.player.car_mut().position.x = 147.2;
        race.player.car_mut().velocity = 1.0;

        let events = race.tick(&Controls::default());
        assert_eq!(events, vec![RaceEvent::WallHit]);
        assert!(race.player().car().velocity < 0.0);
        assert_eq!(race.phase(), Phase::Racing);
    }

    #[test]
    fn test_wrong_way_finish_bounces_without_level_change() {
        let (mut race, _clock) = racing(track());
        {
            let car = race.player.car_mut();
            car.position = Point::new(120.0, 190.0);
            car.heading = 180.0;
            car.velocity = 1.0;
        }

        let events = race.tick(&Controls::default());
        assert_eq!(events, vec![RaceEvent::WrongWayFinish]);
        assert!(race.player().car().velocity < 0.0);
        assert_eq!(race.progress().level, 1);
        assert_eq!(race.phase(), Phase::Racing);
    }

    #[test]
    fn test_forward_finish_advances_level() {
        let (mut race, clock) = racing(track());
        race.progress.next_level();
        race.progress.next_level();
        race.progress.start_level(&clock);
        clock.advance(31.0);
        {
            let car = race.player.car_mut();
            car.position = Point::new(120.0, 215.0);
            car.velocity = 1.0;
        }

        let throttle = Controls {
            forward: true,
            ..Default::default()
        };
        let events = race.tick(&throttle);
        assert_eq!(
            events,
            vec![RaceEvent::LevelComplete {
                level: 3,
                seconds: 31
            }]
        );
        assert_eq!(race.progress().level, 4);
        assert_eq!(race.player().car().position, Point::new(145.0, 180.0));
        assert_eq!(race.player().car().velocity, 0.0);
        // Level 4 cruising speed: max_velocity + 3 * 0.2
        assert_approx_eq!(race.computer().car().velocity, 1.6);
        assert_eq!(race.phase(), Phase::WaitingToStart);
        assert_eq!(race.hud().seconds, 0);
    }

    #[test]
    fn test_computer_reaching_finish_loses_then_resets() {
        let (mut race, clock) = racing(track());
        race.progress.next_level();
        race.computer.set_level(2);
        race.computer.car_mut().position = Point::new(115.0, 200.0);
        race.player.car_mut().position = Point::new(300.0, 300.0);

        let events = race.tick(&Controls::default());
        assert_eq!(events, vec![RaceEvent::Lost]);
        assert_eq!(race.banner().as_deref(), Some("You Lost!"));

        // The outcome holds for the pause duration with the simulation frozen
        clock.advance(4.9);
        assert!(race.tick(&Controls::default()).is_empty());
        assert_eq!(race.player().car().position, Point::new(300.0, 300.0));
        assert_eq!(race.press_start(), None);

        clock.advance(0.2);
        assert_eq!(race.tick(&Controls::default()), vec![RaceEvent::Reset]);
        assert_eq!(race.phase(), Phase::WaitingToStart);
        assert_eq!(race.progress().level, 1);
        assert_eq!(race.player().car().position, Point::new(145.0, 180.0));
        assert_eq!(race.computer().car().position, Point::new(115.0, 180.0));
        assert_approx_eq!(race.computer().car().velocity, 1.0);
    }

    #[test]
    fn test_clearing_last_level_wins() {
        let (mut race, clock) = racing(track());
        for _ in 0..9 {
            race.progress.next_level();
        }
        race.progress.start_level(&clock);
        race.player.car_mut().position = Point::new(120.0, 215.0);

        let events = race.tick(&Controls {
            forward: true,
            ..Default::default()
        });
        assert_eq!(
            events,
            vec![
                RaceEvent::LevelComplete {
                    level: 10,
                    seconds: 0
                },
                RaceEvent::Won
            ]
        );
        assert!(race.progress().is_game_finished());
        assert_eq!(race.banner().as_deref(), Some("You won the game!"));

        clock.advance(OUTCOME_PAUSE_SECS);
        assert_eq!(race.tick(&Controls::default()), vec![RaceEvent::Reset]);
        assert_eq!(race.progress().level, 1);
        assert!(!race.progress().is_game_finished());
    }

    #[test]
    fn test_missing_masks_never_collide() {
        let (mut race, _clock) = racing(Track::default());
        race.computer.car_mut().position = FINISH_ORIGIN;
        race.player.car_mut().position = FINISH_ORIGIN;

        assert!(race.tick(&Controls::default()).is_empty());
        assert_eq!(race.phase(), Phase::Racing);
    }

    #[test]
    fn test_hud_reports_level_time_and_speed() {
        let (mut race, clock) = racing(track());
        for _ in 0..3 {
            race.tick(&Controls {
                forward: true,
                ..Default::default()
            });
        }
        clock.advance(7.4);

        let hud = race.hud();
        assert_eq!(hud.level, 1);
        assert_eq!(hud.seconds, 7);
        assert_approx_eq!(hud.speed, 0.2);
    }
}
