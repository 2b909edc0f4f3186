use crate::drawing::{DrawingLog, Segment};
use crate::fill::FillCapture;
use crate::pen::PenState;
use crate::pose::{Point, Pose};

pub const DEFAULT_TURN_STEP: f32 = 15.0;
pub const DEFAULT_SNAP_STEP: f32 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnSteps {
    pub free: f32,
    pub snapped: f32,
}

impl TurnSteps {
    pub fn step(&self, snap_lock: bool) -> f32 {
        if snap_lock { self.snapped } else { self.free }
    }
}

impl Default for TurnSteps {
    fn default() -> Self {
        Self {
            free: DEFAULT_TURN_STEP,
            snapped: DEFAULT_SNAP_STEP,
        }
    }
}

pub fn target_position(pose: &Pose, direction: Direction) -> Point {
    let unit = pose.direction();
    let sign = match direction {
        Direction::Forward => 1.0,
        Direction::Backward => -1.0,
    };
    Point::new(
        pose.x + sign * pose.speed * unit.x,
        pose.y + sign * pose.speed * unit.y,
    )
}

/// Moves one speed-length step. The segment and the fill point both use the
/// position from before the move.
pub fn step(
    pose: &mut Pose,
    direction: Direction,
    record: bool,
    pen: &PenState,
    log: &mut DrawingLog,
    fill: &mut FillCapture,
) {
    let start = pose.position();
    let end = target_position(pose, direction);

    if record && pen.down {
        log.push_segment(Segment {
            start,
            end,
            color: pen.color.color,
            width: pen.width,
        });
    }
    fill.capture(start);
    pose.set_position(end);
}

pub fn turn(pose: &mut Pose, turn: Turn, steps: &TurnSteps, snap_lock: bool) {
    let step = steps.step(snap_lock);
    match turn {
        Turn::Left => pose.rotate_by(step),
        Turn::Right => pose.rotate_by(-step),
    }
}
