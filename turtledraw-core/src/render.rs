use crate::pen::Color;
use crate::pose::{Point, Pose};
use crate::state::TurtleState;

/// Turtle triangle in its local frame, tip pointing up (-y).
pub const TURTLE_GLYPH: [Point; 3] = [
    Point { x: 0.0, y: -12.0 },
    Point { x: 10.0, y: 8.0 },
    Point { x: -10.0, y: 8.0 },
];

pub const FILL_OUTLINE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillPolygon {
        points: Vec<Point>,
        color: Color,
    },
    /// Open stroked path.
    Polyline {
        points: Vec<Point>,
        color: Color,
        width: f32,
    },
    /// Straight stroke with round caps.
    Line {
        start: Point,
        end: Point,
        color: Color,
        width: f32,
    },
    /// Text centered on `anchor`.
    Text {
        content: String,
        anchor: Point,
        color: Color,
        size: f32,
    },
    Turtle {
        vertices: [Point; 3],
        color: Color,
    },
}

/// Display list for one frame in logical canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub ops: Vec<DrawOp>,
}

pub fn render(state: &TurtleState) -> Frame {
    let (width, height) = state.canvas_size();
    let log = &state.log;
    let mut ops = Vec::with_capacity(
        log.polygons().len() + log.segments().len() + log.texts().len() + 2,
    );

    for polygon in log.polygons() {
        if polygon.points.is_empty() {
            continue;
        }
        ops.push(DrawOp::FillPolygon {
            points: polygon.points.clone(),
            color: polygon.color,
        });
    }

    if state.fill.is_active() && !state.fill.buffer().is_empty() {
        ops.push(DrawOp::Polyline {
            points: state.fill.buffer().to_vec(),
            color: state.fill_color.color,
            width: FILL_OUTLINE_WIDTH,
        });
    }

    ops.extend(log.segments().iter().map(|segment| DrawOp::Line {
        start: segment.start,
        end: segment.end,
        color: segment.color,
        width: segment.width,
    }));

    ops.extend(log.texts().iter().map(|text| DrawOp::Text {
        content: text.content.clone(),
        anchor: text.anchor,
        color: text.color,
        size: state.text_size(),
    }));

    ops.push(DrawOp::Turtle {
        vertices: turtle_vertices(&state.pose),
        color: state.pen.color.color,
    });

    Frame {
        width,
        height,
        background: state.background.color,
        ops,
    }
}

/// Glyph rotated by `90° - heading` so the tip follows the movement direction.
pub fn turtle_vertices(pose: &Pose) -> [Point; 3] {
    let angle = (90.0 - pose.heading).to_radians();
    let (sin, cos) = angle.sin_cos();
    TURTLE_GLYPH.map(|local| {
        Point::new(
            pose.x + local.x * cos - local.y * sin,
            pose.y + local.x * sin + local.y * cos,
        )
    })
}
