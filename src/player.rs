use crate::car::{Car, CarParams, Racer};
use crate::mask::Mask;
use crate::types::{Controls, Steer};

/// The human-driven car.
#[derive(Debug, Clone)]
pub struct PlayerCar {
    car: Car,
}

impl PlayerCar {
    pub fn new(params: CarParams, sprite: Option<Mask>, size: (f64, f64)) -> Self {
        PlayerCar {
            car: Car::new(params, sprite, size),
        }
    }

    /// Coasts towards a standstill when no throttle is applied. Never reverses the car.
    pub fn decay_speed(&mut self) {
        let step = self.car.params().acceleration / 2.0;
        self.car.velocity = (self.car.velocity - step).max(0.0);
        self.car.integrate_position();
    }

    /// Wall response: reverse the velocity and immediately step away from the obstacle.
    pub fn bounce(&mut self) {
        crate::debug_car!(
            self.car.label(),
            "bounce at ({:.1}, {:.1}), velocity {:.3} -> {:.3}",
            self.car.position.x,
            self.car.position.y,
            self.car.velocity,
            -self.car.velocity
        );
        self.car.velocity = -self.car.velocity;
        self.car.integrate_position();
    }
}

impl Racer for PlayerCar {
    fn car(&self) -> &Car {
        &self.car
    }

    fn car_mut(&mut self) -> &mut Car {
        &mut self.car
    }

    fn update(&mut self, controls: &Controls) {
        // Both steering keys cancel out
        let steer = match (controls.left, controls.right) {
            (true, false) => Steer::Left,
            (false, true) => Steer::Right,
            _ => Steer::Straight,
        };
        self.car.rotate(steer);

        // At most one throttle action per tick; coasting only without throttle
        if controls.forward {
            self.car.accelerate_forward();
        } else if controls.backward {
            self.car.accelerate_backward();
        } else {
            self.decay_speed();
        }
    }

    fn reset(&mut self) {
        self.car.reset();
    }
}
