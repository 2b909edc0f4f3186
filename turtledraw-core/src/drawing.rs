use crate::pen::Color;
use crate::pose::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    pub content: String,
    pub anchor: Point,
    pub color: Color,
}

/// Committed geometry in render order. Only segments can be removed, and only
/// from the end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingLog {
    segments: Vec<Segment>,
    polygons: Vec<Polygon>,
    texts: Vec<TextRecord>,
}

impl DrawingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn texts(&self) -> &[TextRecord] {
        &self.texts
    }

    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn push_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn push_text(&mut self, text: TextRecord) {
        self.texts.push(text);
    }

    pub fn undo_last_segment(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.polygons.clear();
        self.texts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.polygons.is_empty() && self.texts.is_empty()
    }
}
