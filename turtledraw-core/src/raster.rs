use crate::pose::Point;

/// One filled run on pixel row `y`, covering `[x_start, x_end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub y: i32,
    pub x_start: f32,
    pub x_end: f32,
}

impl Span {
    pub fn width(&self) -> f32 {
        self.x_end - self.x_start
    }
}

/// Scanline-fills the closed path through `points` using the nonzero winding
/// rule, sampling each row at its vertical center. Rows outside
/// `[clip_top, clip_bottom)` are skipped.
pub fn fill_spans(points: &[Point], clip_top: f32, clip_bottom: f32) -> Vec<Span> {
    let points: Vec<Point> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    if points.len() < 3 {
        return Vec::new();
    }

    let (min_y, max_y) = points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let first_row = min_y.max(clip_top).floor() as i32;
    let last_row = max_y.min(clip_bottom).ceil() as i32;

    let mut spans = Vec::new();
    let mut crossings: Vec<(f32, i32)> = Vec::new();

    for row in first_row..last_row {
        let sample = row as f32 + 0.5;
        if sample < clip_top || sample >= clip_bottom {
            continue;
        }
        crossings.clear();

        for (index, start) in points.iter().enumerate() {
            let end = points[(index + 1) % points.len()];
            if start.y == end.y {
                continue;
            }
            let (low, high, winding) = if start.y < end.y {
                (*start, end, 1)
            } else {
                (end, *start, -1)
            };
            if sample < low.y || sample >= high.y {
                continue;
            }
            let t = (sample - low.y) / (high.y - low.y);
            crossings.push((low.x + t * (high.x - low.x), winding));
        }

        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        let mut run_start = 0.0;
        for &(x, delta) in &crossings {
            let was_inside = winding != 0;
            winding += delta;
            let is_inside = winding != 0;
            if !was_inside && is_inside {
                run_start = x;
            } else if was_inside && !is_inside && x > run_start {
                spans.push(Span {
                    y: row,
                    x_start: run_start,
                    x_end: x,
                });
            }
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(spans: &[Span]) -> Vec<i32> {
        let mut rows: Vec<i32> = spans.iter().map(|span| span.y).collect();
        rows.dedup();
        rows
    }

    #[test]
    fn degenerate_inputs_produce_nothing() {
        assert!(fill_spans(&[], 0.0, 600.0).is_empty());
        assert!(fill_spans(&[Point::new(1.0, 1.0), Point::new(5.0, 5.0)], 0.0, 600.0).is_empty());
        let collinear = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        assert!(fill_spans(&collinear, 0.0, 600.0).is_empty());
    }

    #[test]
    fn square_fills_full_rows() {
        let square = [
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(10.0, 20.0),
        ];
        let spans = fill_spans(&square, 0.0, 600.0);
        assert_eq!(spans.len(), 10);
        assert_eq!(rows(&spans), (10..20).collect::<Vec<_>>());
        for span in &spans {
            assert_eq!(span.x_start, 10.0);
            assert_eq!(span.x_end, 20.0);
        }
    }

    #[test]
    fn concave_shape_splits_rows() {
        // A "U": two prongs joined at the bottom.
        let shape = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 20.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(0.0, 30.0),
        ];
        let spans = fill_spans(&shape, 0.0, 600.0);
        let top_row: Vec<&Span> = spans.iter().filter(|span| span.y == 5).collect();
        assert_eq!(top_row.len(), 2);
        assert_eq!((top_row[0].x_start, top_row[0].x_end), (0.0, 10.0));
        assert_eq!((top_row[1].x_start, top_row[1].x_end), (20.0, 30.0));

        let bottom_row: Vec<&Span> = spans.iter().filter(|span| span.y == 25).collect();
        assert_eq!(bottom_row.len(), 1);
        assert_eq!(bottom_row[0].width(), 30.0);
    }

    #[test]
    fn nonzero_rule_fills_overlapping_loops() {
        // The same square traced twice winds to 2 and stays filled.
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let twice: Vec<Point> = square.iter().chain(square.iter()).copied().collect();
        let spans = fill_spans(&twice, 0.0, 600.0);
        assert_eq!(spans.len(), 10);
        assert!(spans.iter().all(|span| span.width() == 10.0));
    }

    #[test]
    fn rows_are_clipped() {
        let tall = [
            Point::new(0.0, -100.0),
            Point::new(10.0, -100.0),
            Point::new(10.0, 1000.0),
            Point::new(0.0, 1000.0),
        ];
        let spans = fill_spans(&tall, 0.0, 600.0);
        assert_eq!(spans.len(), 600);
        assert_eq!(spans.first().map(|span| span.y), Some(0));
        assert_eq!(spans.last().map(|span| span.y), Some(599));
    }
}
