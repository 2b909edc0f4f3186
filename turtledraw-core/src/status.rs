use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of the fields a status bar shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub pen_down: bool,
    pub pen_color: String,
    pub fill_on: bool,
    pub fill_color: String,
    pub speed: f32,
    pub snap_lock: bool,
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pen: {} ({}) | Fill: {} ({}) | Speed: {} | Snap: {}",
            if self.pen_down { "DOWN" } else { "UP" },
            self.pen_color,
            on_off(self.fill_on),
            self.fill_color,
            self.speed,
            on_off(self.snap_lock)
        )
    }
}
