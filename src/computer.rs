use crate::car::{Car, CarParams, Racer};
use crate::config::LEVEL_SPEED_STEP;
use crate::kinematics;
use crate::mask::Mask;
use crate::types::{Controls, Point};

/// The scripted opponent. Follows a fixed list of waypoints at a constant
/// cruising speed that grows with the level.
#[derive(Debug, Clone)]
pub struct ComputerCar {
    car: Car,
    waypoints: Vec<Point>,
    current_waypoint: usize, // == waypoints.len() once the path is complete
}

impl ComputerCar {
    pub fn new(params: CarParams, sprite: Option<Mask>, size: (f64, f64), waypoints: Vec<Point>) -> Self {
        let mut computer = ComputerCar {
            car: Car::new(params, sprite, size),
            waypoints,
            current_waypoint: 0,
        };
        computer.set_level(1);
        computer
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    pub fn path_complete(&self) -> bool {
        self.current_waypoint >= self.waypoints.len()
    }

    /// Puts the car back on the grid with the cruising speed of `level`.
    pub fn set_level(&mut self, level: u32) {
        self.car.reset();
        let bonus = level.saturating_sub(1) as f64 * LEVEL_SPEED_STEP;
        self.car.velocity = self.car.params().max_velocity + bonus;
        self.current_waypoint = 0;
        crate::debug_path!(
            "Level {} cruising velocity {:.2}",
            level,
            self.car.velocity
        );
    }

    // Turns towards the current waypoint by at most the turn rate
    fn steer_towards_waypoint(&mut self) {
        let target = self.waypoints[self.current_waypoint];
        let desired = kinematics::desired_heading(self.car.position, target);
        let diff = kinematics::heading_delta(self.car.heading, desired);

        let turn = self.car.params().turn_rate.min(diff.abs());
        if diff > 0.0 {
            self.car.heading -= turn;
        } else {
            self.car.heading += turn;
        }
    }

    fn update_waypoint(&mut self) {
        let target = self.waypoints[self.current_waypoint];
        if self.car.contains_point(target) {
            self.current_waypoint += 1;
            crate::debug_path!(
                "reached waypoint {}/{} at ({:.0}, {:.0})",
                self.current_waypoint,
                self.waypoints.len(),
                target.x,
                target.y
            );
        }
    }
}

impl Racer for ComputerCar {
    fn car(&self) -> &Car {
        &self.car
    }

    fn car_mut(&mut self) -> &mut Car {
        &mut self.car
    }

    // The computer drives itself; controls are ignored
    fn update(&mut self, _controls: &Controls) {
        if self.path_complete() {
            return;
        }

        self.steer_towards_waypoint();
        self.update_waypoint();
        self.car.integrate_position();
    }

    fn reset(&mut self) {
        self.set_level(1);
    }
}
