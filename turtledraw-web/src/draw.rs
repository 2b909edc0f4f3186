use macroquad::prelude::*;
use turtledraw_core::pen::Color as CanvasColor;
use turtledraw_core::{DrawOp, Frame, Point, Span, ViewTransform, fill_spans};

const LETTERBOX_COLOR: Color = Color::from_rgba(16, 16, 16, 255);

pub fn to_color(color: CanvasColor) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

struct CachedFill {
    points: Vec<Point>,
    clip_bottom: f32,
    spans: Vec<Span>,
}

/// Scanline spans of the committed polygons. Polygons never change once
/// committed, so only new or replaced entries are rasterized.
#[derive(Default)]
pub struct FillCache {
    entries: Vec<CachedFill>,
}

impl FillCache {
    /// Lines the cache up with the frame's polygons; returns how many were
    /// rasterized.
    pub fn sync(&mut self, frame: &Frame) -> usize {
        let mut index = 0;
        let mut rasterized = 0;
        for op in &frame.ops {
            let DrawOp::FillPolygon { points, .. } = op else {
                continue;
            };
            let stale = self.entries.get(index).is_none_or(|cached| {
                cached.clip_bottom != frame.height || cached.points != *points
            });
            if stale {
                self.entries.truncate(index);
                self.entries.push(CachedFill {
                    points: points.clone(),
                    clip_bottom: frame.height,
                    spans: fill_spans(points, 0.0, frame.height),
                });
                rasterized += 1;
            }
            index += 1;
        }
        self.entries.truncate(index);
        rasterized
    }

    fn spans(&self, index: usize) -> &[Span] {
        self.entries
            .get(index)
            .map(|cached| cached.spans.as_slice())
            .unwrap_or(&[])
    }
}

fn screen(transform: &ViewTransform, point: Point) -> Vec2 {
    let mapped = transform.to_screen(point);
    vec2(mapped.x, mapped.y)
}

/// Draws a core frame with the given logical-to-screen mapping.
pub fn draw_frame(frame: &Frame, transform: &ViewTransform, fills: &mut FillCache) {
    fills.sync(frame);
    clear_background(LETTERBOX_COLOR);
    let origin = screen(transform, Point::new(0.0, 0.0));
    draw_rectangle(
        origin.x,
        origin.y,
        transform.length(frame.width),
        transform.length(frame.height),
        to_color(frame.background),
    );

    let mut polygon_index = 0;
    for op in &frame.ops {
        match op {
            DrawOp::FillPolygon { color, .. } => {
                draw_spans(fills.spans(polygon_index), to_color(*color), frame, transform);
                polygon_index += 1;
            }
            DrawOp::Polyline {
                points,
                color,
                width,
            } => {
                let thickness = transform.length(*width).max(1.0);
                for pair in points.windows(2) {
                    let a = screen(transform, pair[0]);
                    let b = screen(transform, pair[1]);
                    draw_line(a.x, a.y, b.x, b.y, thickness, to_color(*color));
                }
            }
            DrawOp::Line {
                start,
                end,
                color,
                width,
            } => draw_round_line(
                screen(transform, *start),
                screen(transform, *end),
                transform.length(*width).max(1.0),
                to_color(*color),
            ),
            DrawOp::Text {
                content,
                anchor,
                color,
                size,
            } => draw_centered_text(
                content,
                screen(transform, *anchor),
                transform.length(*size),
                to_color(*color),
            ),
            DrawOp::Turtle { vertices, color } => draw_triangle(
                screen(transform, vertices[0]),
                screen(transform, vertices[1]),
                screen(transform, vertices[2]),
                to_color(*color),
            ),
        }
    }

    draw_letterbox(frame, transform);
}

fn draw_spans(spans: &[Span], color: Color, frame: &Frame, transform: &ViewTransform) {
    let row_height = transform.length(1.0);
    for span in spans {
        let x_start = span.x_start.max(0.0);
        let x_end = span.x_end.min(frame.width);
        if x_end <= x_start {
            continue;
        }
        let top_left = screen(transform, Point::new(x_start, span.y as f32));
        draw_rectangle(
            top_left.x,
            top_left.y,
            transform.length(x_end - x_start),
            row_height,
            color,
        );
    }
}

fn draw_round_line(start: Vec2, end: Vec2, thickness: f32, color: Color) {
    draw_line(start.x, start.y, end.x, end.y, thickness, color);
    draw_circle(start.x, start.y, thickness * 0.5, color);
    draw_circle(end.x, end.y, thickness * 0.5, color);
}

fn draw_centered_text(content: &str, center: Vec2, size: f32, color: Color) {
    let font_size = size.round().clamp(1.0, u16::MAX as f32) as u16;
    let dims = measure_text(content, None, font_size, 1.0);
    let x = center.x - dims.width * 0.5;
    let y = center.y - dims.height * 0.5 + dims.offset_y;
    draw_text(content, x, y, font_size as f32, color);
}

/// Covers anything drawn past the canvas edges.
fn draw_letterbox(frame: &Frame, transform: &ViewTransform) {
    let origin = screen(transform, Point::new(0.0, 0.0));
    let far = screen(transform, Point::new(frame.width, frame.height));
    let (width, height) = (screen_width(), screen_height());

    draw_rectangle(0.0, 0.0, width, origin.y.max(0.0), LETTERBOX_COLOR);
    draw_rectangle(0.0, far.y, width, (height - far.y).max(0.0), LETTERBOX_COLOR);
    draw_rectangle(0.0, 0.0, origin.x.max(0.0), height, LETTERBOX_COLOR);
    draw_rectangle(far.x, 0.0, (width - far.x).max(0.0), height, LETTERBOX_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_canvas_colors() {
        let converted = to_color(CanvasColor::rgb(255, 0, 0));
        assert_eq!(converted, Color::from_rgba(255, 0, 0, 255));
    }

    fn square(x: f32) -> Vec<Point> {
        vec![
            Point::new(x, 10.0),
            Point::new(x + 10.0, 10.0),
            Point::new(x + 10.0, 20.0),
            Point::new(x, 20.0),
        ]
    }

    fn frame_with(polygons: &[Vec<Point>]) -> Frame {
        Frame {
            width: 800.0,
            height: 600.0,
            background: CanvasColor::rgb(0, 0, 0),
            ops: polygons
                .iter()
                .map(|points| DrawOp::FillPolygon {
                    points: points.clone(),
                    color: CanvasColor::rgb(255, 0, 0),
                })
                .collect(),
        }
    }

    #[test]
    fn committed_polygons_are_rasterized_once() {
        let mut fills = FillCache::default();
        let first = frame_with(&[square(0.0)]);
        assert_eq!(fills.sync(&first), 1);
        assert_eq!(fills.sync(&first), 0);
        assert_eq!(fills.spans(0).len(), 10);

        let grown = frame_with(&[square(0.0), square(50.0)]);
        assert_eq!(fills.sync(&grown), 1);
        assert_eq!(fills.spans(1)[0].x_start, 50.0);
    }

    #[test]
    fn cleared_or_replaced_polygons_are_dropped() {
        let mut fills = FillCache::default();
        fills.sync(&frame_with(&[square(0.0), square(50.0)]));

        assert_eq!(fills.sync(&frame_with(&[])), 0);
        assert!(fills.spans(0).is_empty());

        fills.sync(&frame_with(&[square(0.0)]));
        assert_eq!(fills.sync(&frame_with(&[square(100.0)])), 1);
        assert_eq!(fills.spans(0)[0].x_start, 100.0);
    }
}
