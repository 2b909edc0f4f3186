pub mod config;
pub mod drawing;
pub mod fill;
pub mod input;
pub mod motion;
pub mod pen;
pub mod pose;
pub mod raster;
pub mod render;
pub mod session;
pub mod state;
pub mod status;
pub mod text;
pub mod viewport;

pub use config::{ConfigError, TurtleConfig};
pub use drawing::{DrawingLog, Polygon, Segment, TextRecord};
pub use fill::{FillCapture, FillExit};
pub use input::{Command, InputDispatcher, Key, KeyBindings};
pub use pen::{Color, Palette, PenState, Swatch};
pub use pose::{Point, Pose};
pub use raster::{Span, fill_spans};
pub use render::{DrawOp, Frame, render};
pub use session::Session;
pub use state::TurtleState;
pub use status::StatusSnapshot;
pub use text::{SubmitOutcome, TextEntry};
pub use viewport::{ViewTransform, Viewport};
