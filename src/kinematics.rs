use crate::types::Point;

/// Displacement for one tick of travel along `heading_deg` at `velocity`.
/// Heading 0 points up the screen and grows counter-clockwise.
pub fn displacement(heading_deg: f64, velocity: f64) -> (f64, f64) {
    let radians = heading_deg.to_radians();
    (-radians.sin() * velocity, -radians.cos() * velocity)
}

/// Heading (degrees) a car at `from` should face to drive towards `target`.
pub fn desired_heading(from: Point, target: Point) -> f64 {
    let x_diff = target.x - from.x;
    let y_diff = target.y - from.y;

    let mut radians = if y_diff == 0.0 {
        std::f64::consts::FRAC_PI_2
    } else {
        (x_diff / y_diff).atan()
    };

    // atan cannot tell "above" from "below"; targets further down the screen face the other way
    if target.y > from.y {
        radians += std::f64::consts::PI;
    }

    radians.to_degrees()
}

/// Signed shortest difference `current - desired`, normalised into (-180, 180].
/// Headings accumulate without wrapping, so the raw difference can span several turns.
pub fn heading_delta(current_deg: f64, desired_deg: f64) -> f64 {
    let diff = current_deg - desired_deg;
    180.0 - (180.0 - diff).rem_euclid(360.0)
}
