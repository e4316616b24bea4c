use crate::kinematics;
use crate::mask::{Mask, MaskPoint};
use crate::types::{Controls, Point, Steer};

/// Fixed tuning of a car variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarParams {
    pub label: &'static str, // Used as log context
    pub start: Point,
    pub max_velocity: f64,
    pub turn_rate: f64,    // Degrees per tick
    pub acceleration: f64, // Velocity gained per tick of throttle
}

// State shared by every car on the track
#[derive(Debug, Clone)]
pub struct Car {
    pub position: Point, // Top-left of the unrotated sprite
    pub heading: f64,    // Degrees, 0 = up, counter-clockwise positive
    pub velocity: f64,   // Along the heading, positive = forward
    params: CarParams,
    sprite: Option<Mask>,
    width: f64,
    height: f64,
}

impl Car {
    /// Creates a car at its start position. `size` is used for hit testing when
    /// no sprite mask is available.
    pub fn new(params: CarParams, sprite: Option<Mask>, size: (f64, f64)) -> Self {
        let (width, height) = match &sprite {
            Some(mask) => (mask.width() as f64, mask.height() as f64),
            None => size,
        };
        Car {
            position: params.start,
            heading: 0.0,
            velocity: 0.0,
            params,
            sprite,
            width,
            height,
        }
    }

    pub fn params(&self) -> &CarParams {
        &self.params
    }

    pub fn label(&self) -> &'static str {
        self.params.label
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn rotate(&mut self, steer: Steer) {
        match steer {
            Steer::Left => self.heading += self.params.turn_rate,
            Steer::Right => self.heading -= self.params.turn_rate,
            Steer::Straight => {}
        }
    }

    pub fn accelerate_forward(&mut self) {
        self.velocity = (self.velocity + self.params.acceleration).min(self.params.max_velocity);
        self.integrate_position();
    }

    // Reverse speed is capped at a third of the forward maximum
    pub fn accelerate_backward(&mut self) {
        let reverse_cap = -self.params.max_velocity / 3.0;
        self.velocity = (self.velocity - self.params.acceleration).max(reverse_cap);
        self.integrate_position();
    }

    pub fn integrate_position(&mut self) {
        let (dx, dy) = kinematics::displacement(self.heading, self.velocity);
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Pixel-accurate overlap of this car's rotated sprite against `mask`, where
    /// `origin` is the mask's top-left in track space. The returned point is in
    /// `mask` coordinates.
    pub fn collide(&self, mask: &Mask, origin: Point) -> Option<MaskPoint> {
        let sprite = self.sprite.as_ref()?;
        let rotated = sprite.rotated(self.heading);

        // The sprite turns about its centre, so the rotated box is re-anchored there
        let anchor_x = self.position.x + (self.width - rotated.width() as f64) / 2.0;
        let anchor_y = self.position.y + (self.height - rotated.height() as f64) / 2.0;
        let offset = ((anchor_x - origin.x) as i32, (anchor_y - origin.y) as i32);

        mask.overlap(&rotated, offset)
    }

    /// Whether `point` lies within the car's unrotated bounding rectangle. The
    /// rectangle sits on whole pixels, so the position is truncated first.
    pub fn contains_point(&self, point: Point) -> bool {
        let (x, y) = (self.position.x.trunc(), self.position.y.trunc());
        point.x >= x && point.x < x + self.width && point.y >= y && point.y < y + self.height
    }

    pub fn reset(&mut self) {
        self.position = self.params.start;
        self.heading = 0.0;
        self.velocity = 0.0;
    }
}

/// Per-tick behaviour shared by the player and computer cars.
pub trait Racer {
    fn car(&self) -> &Car;

    fn car_mut(&mut self) -> &mut Car;

    /// Advances the car by one simulation tick.
    fn update(&mut self, controls: &Controls);

    /// Returns the car to its initial state.
    fn reset(&mut self);
}
