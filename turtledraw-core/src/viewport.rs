use crate::pose::Point;

/// Fixed logical drawing surface, letterboxed into whatever the display offers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest uniform scale that fits the physical surface, centered.
    pub fn fit(&self, physical_width: f32, physical_height: f32) -> ViewTransform {
        if self.width <= 0.0 || self.height <= 0.0 {
            return ViewTransform::identity();
        }
        let scale = (physical_width / self.width)
            .min(physical_height / self.height)
            .max(f32::EPSILON);
        ViewTransform {
            scale,
            offset_x: (physical_width - self.width * scale) * 0.5,
            offset_y: (physical_height - self.height * scale) * 0.5,
        }
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn to_screen(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.scale + self.offset_x,
            logical.y * self.scale + self.offset_y,
        )
    }

    pub fn length(&self, logical: f32) -> f32 {
        logical * self.scale
    }
}
