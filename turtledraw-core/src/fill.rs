use crate::drawing::{DrawingLog, Polygon};
use crate::pen::Color;
use crate::pose::Point;
use log::{debug, info};

pub const DEFAULT_FILL_MIN_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillExit {
    Committed { points: usize },
    BelowThreshold { points: usize },
    NotFilling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillCapture {
    active: bool,
    buffer: Vec<Point>,
    min_points: usize,
}

impl FillCapture {
    pub fn new(min_points: usize) -> Self {
        Self {
            active: false,
            buffer: Vec::new(),
            min_points: min_points.max(1),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn buffer(&self) -> &[Point] {
        &self.buffer
    }

    pub fn enter(&mut self, position: Point) {
        self.active = true;
        self.buffer.clear();
        self.buffer.push(position);
    }

    /// Only records while active; called by motion with the pre-move position.
    pub fn capture(&mut self, position: Point) {
        if self.active {
            self.buffer.push(position);
        }
    }

    pub fn exit(&mut self, color: Color, log: &mut DrawingLog) -> FillExit {
        if !self.active {
            return FillExit::NotFilling;
        }
        self.active = false;

        let points = self.buffer.len();
        if points < self.min_points {
            debug!(
                "fill ended with {} point(s), below threshold {}; nothing committed",
                points, self.min_points
            );
            self.buffer.clear();
            return FillExit::BelowThreshold { points };
        }

        log.push_polygon(Polygon {
            points: std::mem::take(&mut self.buffer),
            color,
        });
        info!("committed fill polygon with {} points", points);
        FillExit::Committed { points }
    }

    pub fn toggle(&mut self, position: Point, color: Color, log: &mut DrawingLog) -> Option<FillExit> {
        if self.active {
            Some(self.exit(color, log))
        } else {
            self.enter(position);
            None
        }
    }
}

impl Default for FillCapture {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_MIN_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Color = Color::rgb(255, 0, 0);

    #[test]
    fn enter_seeds_buffer_with_position() {
        let mut fill = FillCapture::default();
        fill.capture(Point::new(9.0, 9.0));
        assert!(fill.buffer().is_empty());

        fill.enter(Point::new(1.0, 2.0));
        assert!(fill.is_active());
        assert_eq!(fill.buffer(), &[Point::new(1.0, 2.0)]);
    }

    #[test]
    fn exit_below_threshold_commits_nothing() {
        let mut fill = FillCapture::default();
        let mut log = DrawingLog::new();
        fill.enter(Point::new(0.0, 0.0));
        fill.capture(Point::new(1.0, 0.0));

        assert_eq!(fill.exit(FILL, &mut log), FillExit::BelowThreshold { points: 2 });
        assert!(log.polygons().is_empty());
        assert!(fill.buffer().is_empty());
        assert!(!fill.is_active());
    }

    #[test]
    fn exit_at_threshold_commits_buffer() {
        let mut fill = FillCapture::default();
        let mut log = DrawingLog::new();
        let points = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0),
        ];
        fill.enter(points[0]);
        fill.capture(points[1]);
        fill.capture(points[2]);

        assert_eq!(fill.exit(FILL, &mut log), FillExit::Committed { points: 3 });
        assert_eq!(log.polygons().len(), 1);
        assert_eq!(log.polygons()[0].points, points.to_vec());
        assert_eq!(log.polygons()[0].color, FILL);
        assert!(fill.buffer().is_empty());
    }

    #[test]
    fn double_toggle_without_movement_is_noop_commit() {
        let mut fill = FillCapture::default();
        let mut log = DrawingLog::new();
        let origin = Point::new(3.0, 3.0);

        assert_eq!(fill.toggle(origin, FILL, &mut log), None);
        assert_eq!(
            fill.toggle(origin, FILL, &mut log),
            Some(FillExit::BelowThreshold { points: 1 })
        );
        assert!(log.polygons().is_empty());
    }

    #[test]
    fn exit_when_not_filling_reports_it() {
        let mut fill = FillCapture::default();
        let mut log = DrawingLog::new();
        assert_eq!(fill.exit(FILL, &mut log), FillExit::NotFilling);
    }
}
