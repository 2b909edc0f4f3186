use macroquad::prelude::*;
use turtledraw_core::StatusSnapshot;

const HUD_FONT_SIZE: f32 = 20.0;
const HUD_MARGIN: f32 = 12.0;
const OVERLAY_WIDTH: f32 = 420.0;
const OVERLAY_HEIGHT: f32 = 110.0;
const HELP_TEXT: &str =
    "WASD move/turn  Space pen  C/V/B colors  F fill  Z undo  R reset  Bksp clear  T text  K square  M speed  N snap";

pub fn draw_status(status: &StatusSnapshot) {
    let line = status.to_string();
    draw_text(&line, HUD_MARGIN, HUD_MARGIN + HUD_FONT_SIZE, HUD_FONT_SIZE, WHITE);
    draw_text(
        HELP_TEXT,
        HUD_MARGIN,
        screen_height() - HUD_MARGIN,
        HUD_FONT_SIZE * 0.75,
        GRAY,
    );
}

/// Modal prompt shown while text entry is open.
pub fn draw_text_entry(draft: &str, elapsed_seconds: f64) {
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::from_rgba(0, 0, 0, 160),
    );

    let x = (screen_width() - OVERLAY_WIDTH) * 0.5;
    let y = (screen_height() - OVERLAY_HEIGHT) * 0.5;
    draw_rectangle(x, y, OVERLAY_WIDTH, OVERLAY_HEIGHT, Color::from_rgba(34, 34, 34, 255));
    draw_rectangle_lines(x, y, OVERLAY_WIDTH, OVERLAY_HEIGHT, 2.0, WHITE);

    draw_text("Text to place:", x + 16.0, y + 30.0, HUD_FONT_SIZE, WHITE);

    let caret = if (elapsed_seconds * 2.0).fract() < 0.5 { "_" } else { " " };
    draw_text(
        &format!("{draft}{caret}"),
        x + 16.0,
        y + 62.0,
        HUD_FONT_SIZE * 1.2,
        YELLOW,
    );
    draw_text(
        "Enter to draw, Esc to cancel",
        x + 16.0,
        y + 94.0,
        HUD_FONT_SIZE * 0.8,
        GRAY,
    );
}
