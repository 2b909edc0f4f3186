use serde::{Deserialize, Serialize};

pub const FULL_TURN: f32 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub heading: f32, // degrees in [0, 360), 0 points to +x, counter-clockwise on screen
    pub speed: f32,   // logical pixels per move
}

impl Pose {
    pub fn new(position: Point, heading: f32, speed: f32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            heading: normalize_heading(heading),
            speed,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn heading_radians(&self) -> f32 {
        self.heading.to_radians()
    }

    /// Unit step along the heading in screen space (y grows downward).
    pub fn direction(&self) -> Point {
        let radians = self.heading_radians();
        Point::new(radians.cos(), -radians.sin())
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.heading = normalize_heading(self.heading + degrees);
    }
}

pub fn normalize_heading(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3
}
