use crate::types::{Controls, Point};
use macroquad::prelude::*;

/// Everything the game needs from the keyboard and mouse for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub quit: bool,
    pub key_pressed: bool, // Any key went down this frame
    pub controls: Controls,
    pub click: Option<Point>,
}

impl FrameInput {
    pub fn poll() -> Self {
        let last_key = get_last_key_pressed();
        FrameInput {
            quit: is_quit_requested() || is_key_down(KeyCode::Escape),
            key_pressed: last_key.is_some_and(|key| key != KeyCode::Escape),
            controls: controls_from(is_key_down),
            click: is_mouse_button_pressed(MouseButton::Left).then(|| {
                let (x, y) = mouse_position();
                Point::new(x as f64, y as f64)
            }),
        }
    }
}

/// WASD or arrow keys, given a "is this key held" query.
pub fn controls_from<F>(held: F) -> Controls
where
    F: Fn(KeyCode) -> bool,
{
    Controls {
        left: held(KeyCode::A) || held(KeyCode::Left),
        right: held(KeyCode::D) || held(KeyCode::Right),
        forward: held(KeyCode::W) || held(KeyCode::Up),
        backward: held(KeyCode::S) || held(KeyCode::Down),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_mapping() {
        let controls = controls_from(|key| matches!(key, KeyCode::W | KeyCode::A));
        assert_eq!(
            controls,
            Controls {
                left: true,
                right: false,
                forward: true,
                backward: false,
            }
        );
    }

    #[test]
    fn test_arrow_mapping() {
        let controls = controls_from(|key| matches!(key, KeyCode::Down | KeyCode::Right));
        assert_eq!(
            controls,
            Controls {
                left: false,
                right: true,
                forward: false,
                backward: true,
            }
        );
    }

    #[test]
    fn test_no_keys() {
        assert_eq!(controls_from(|_| false), Controls::default());
    }
}
