//! Session configuration.
//!
//! Every field falls back to its default when missing, so a config file only
//! needs the keys it wants to change. `bindings` is merged over the default
//! key map rather than replacing it.

use crate::fill::DEFAULT_FILL_MIN_POINTS;
use crate::input::{Command, Key, KeyBindings};
use crate::motion::{DEFAULT_SNAP_STEP, DEFAULT_TURN_STEP, TurnSteps};
use crate::pen::{
    Color, ColorParseError, DEFAULT_BACKGROUND_COLORS, DEFAULT_PEN_COLORS, Palette,
};
use crate::pose::Point;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub start_speed: f32,
    pub speeds: Vec<f32>,
    pub pen_width: f32,
    pub pen_colors: Vec<String>,
    pub background_colors: Vec<String>,
    pub turn_step: f32,
    pub snap_step: f32,
    pub fill_min_points: usize,
    pub text_size: f32,
    pub input_tick_ms: u64,
    pub log_level: String,
    pub bindings: HashMap<Key, Command>,
}

fn color_names(table: &[(&str, Color)]) -> Vec<String> {
    table.iter().map(|(name, _)| name.to_string()).collect()
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            start_speed: 5.0,
            speeds: vec![5.0, 10.0, 25.0, 50.0, 75.0, 100.0],
            pen_width: 4.0,
            pen_colors: color_names(&DEFAULT_PEN_COLORS),
            background_colors: color_names(&DEFAULT_BACKGROUND_COLORS),
            turn_step: DEFAULT_TURN_STEP,
            snap_step: DEFAULT_SNAP_STEP,
            fill_min_points: DEFAULT_FILL_MIN_POINTS,
            text_size: 16.0,
            input_tick_ms: 50,
            log_level: "info".to_string(),
            bindings: HashMap::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidColor(ColorParseError),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config: {err}"),
            ConfigError::InvalidColor(err) => write!(f, "invalid config color: {err}"),
            ConfigError::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::InvalidColor(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<ColorParseError> for ConfigError {
    fn from(err: ColorParseError) -> Self {
        ConfigError::InvalidColor(err)
    }
}

impl TurtleConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Like [`TurtleConfig::load`], but a missing file yields the defaults.
    pub fn load_if_present(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Invalid("canvas size must be positive".into()));
        }
        if self.speeds.is_empty() {
            return Err(ConfigError::Invalid("speed list is empty".into()));
        }
        if let Some(speed) = self
            .speeds
            .iter()
            .chain(std::iter::once(&self.start_speed))
            .find(|speed| !(**speed > 0.0 && speed.is_finite()))
        {
            return Err(ConfigError::Invalid(format!("speed {speed} is not positive")));
        }
        if !(self.pen_width > 0.0) {
            return Err(ConfigError::Invalid("pen width must be positive".into()));
        }
        if !(self.turn_step > 0.0 && self.snap_step > 0.0) {
            return Err(ConfigError::Invalid("turn steps must be positive".into()));
        }
        if self.input_tick_ms == 0 {
            return Err(ConfigError::Invalid("input tick must be at least 1 ms".into()));
        }
        if self.pen_colors.is_empty() || self.background_colors.is_empty() {
            return Err(ConfigError::Invalid("color palettes must not be empty".into()));
        }
        self.pen_palette()?;
        self.background_palette()?;
        self.log_level_filter()?;
        Ok(())
    }

    pub fn pen_palette(&self) -> Result<Palette, ColorParseError> {
        Palette::from_names(&self.pen_colors)
    }

    pub fn background_palette(&self) -> Result<Palette, ColorParseError> {
        Palette::from_names(&self.background_colors)
    }

    pub fn key_bindings(&self) -> KeyBindings {
        let mut bindings = KeyBindings::default();
        for (key, command) in &self.bindings {
            bindings.bind(*key, *command);
        }
        bindings
    }

    pub fn turn_steps(&self) -> TurnSteps {
        TurnSteps {
            free: self.turn_step,
            snapped: self.snap_step,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level `{}`", self.log_level)))
    }
}
