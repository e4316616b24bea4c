use crate::assets::{Assets, Sprite};
use crate::car::{Car, Racer};
use crate::config::{BANNER_FONT_SIZE, FINISH_POSITION, HUD_FONT_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::race::Race;
use crate::types::Point;
use macroquad::prelude::*;

const WAYPOINT_RADIUS: f32 = 5.0;

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

// Handles drawing the race state using macroquad
pub struct Renderer {
    show_path: bool,
}

impl Renderer {
    pub fn new(show_path: bool) -> Self {
        Renderer { show_path }
    }

    pub fn draw_frame(&self, assets: &Assets, race: &Race, recorded_path: &[Point]) {
        clear_background(BLACK);

        // Static layers, border last so it covers the track edges
        Self::draw_layer(assets.grass.as_ref(), Point::default());
        Self::draw_layer(assets.track.as_ref(), Point::default());
        Self::draw_layer(assets.finish.as_ref(), FINISH_POSITION);
        Self::draw_layer(assets.border.as_ref(), Point::default());

        if self.show_path {
            let target = race.computer().current_waypoint();
            for (i, waypoint) in race.computer().waypoints().iter().enumerate() {
                let color = if i == target { ORANGE } else { RED };
                draw_circle(waypoint.x as f32, waypoint.y as f32, WAYPOINT_RADIUS, color);
            }
        }
        for point in recorded_path {
            draw_circle(point.x as f32, point.y as f32, WAYPOINT_RADIUS, YELLOW);
        }

        self.draw_hud(race);

        Self::draw_car(race.player().car(), assets.player_car.as_ref(), RED);
        Self::draw_car(race.computer().car(), assets.computer_car.as_ref(), GREEN);

        if let Some(message) = race.banner() {
            Self::draw_banner(&message);
        }
    }

    fn draw_layer(sprite: Option<&Sprite>, at: Point) {
        if let Some(sprite) = sprite {
            draw_texture(&sprite.texture, at.x as f32, at.y as f32, WHITE);
        }
    }

    // Rotates about the sprite centre; a missing sprite falls back to a plain box
    fn draw_car(car: &Car, sprite: Option<&Sprite>, fallback: Color) {
        let (x, y) = (car.position.x as f32, car.position.y as f32);
        // Screen rotation is clockwise, headings are counter-clockwise
        let rotation = -(car.heading.to_radians() as f32);

        match sprite {
            Some(sprite) => draw_texture_ex(
                &sprite.texture,
                x,
                y,
                WHITE,
                DrawTextureParams {
                    rotation,
                    ..Default::default()
                },
            ),
            None => {
                let (w, h) = car.size();
                draw_rectangle_ex(
                    x + w as f32 / 2.0,
                    y + h as f32 / 2.0,
                    w as f32,
                    h as f32,
                    DrawRectangleParams {
                        offset: vec2(0.5, 0.5),
                        rotation,
                        color: fallback,
                    },
                );
            }
        }
    }

    fn draw_hud(&self, race: &Race) {
        let hud = race.hud();
        let bottom = WINDOW_HEIGHT as f32;

        let lines = [
            (format!("Level {}", hud.level), 70.0),
            (format!("Time: {}s", hud.seconds), 40.0),
            (format!("Vel: {:.1}px/s", hud.speed), 10.0),
        ];
        for (text, margin) in lines.iter() {
            draw_text(text, 10.0, bottom - margin, HUD_FONT_SIZE, WHITE);
        }
    }

    fn draw_banner(message: &str) {
        let dims = measure_text(message, None, BANNER_FONT_SIZE as u16, 1.0);
        let padding = 20.0;
        let rect_width = dims.width + padding * 2.0;
        let rect_height = dims.height + padding * 2.0;
        let x = (WINDOW_WIDTH as f32 - rect_width) / 2.0;
        let y = (WINDOW_HEIGHT as f32 - rect_height) / 2.0;

        draw_rectangle(x, y, rect_width, rect_height, faded_color(BLACK, 0.7));
        draw_text(
            message,
            x + padding,
            y + padding + dims.offset_y,
            BANNER_FONT_SIZE,
            WHITE,
        );
    }
}
