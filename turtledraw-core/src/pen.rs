use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse(name: &str) -> Result<Self, ColorParseError> {
        let trimmed = name.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::new(name));
        }

        let lowered = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| *candidate == lowered)
            .map(|(_, color)| *color)
            .ok_or_else(|| ColorParseError::new(name))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, index) in rgb.iter_mut().zip(0..3) {
                let nibble = channel(&hex[index..index + 1])?;
                *slot = nibble * 17;
            }
            Some(Color::rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("green", Color::rgb(0, 128, 0)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("lime", Color::rgb(0, 255, 0)),
    ("pink", Color::rgb(255, 192, 203)),
    ("teal", Color::rgb(0, 128, 128)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("navy", Color::rgb(0, 0, 128)),
    ("brown", Color::rgb(165, 42, 42)),
    ("darkslateblue", Color::rgb(72, 61, 139)),
    ("darkgreen", Color::rgb(0, 100, 0)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("indigo", Color::rgb(75, 0, 130)),
    ("saddlebrown", Color::rgb(139, 69, 19)),
];

pub const DEFAULT_PEN_COLORS: [(&str, Color); 12] = [
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("green", Color::rgb(0, 128, 0)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("lime", Color::rgb(0, 255, 0)),
    ("pink", Color::rgb(255, 192, 203)),
    ("teal", Color::rgb(0, 128, 128)),
];

pub const DEFAULT_BACKGROUND_COLORS: [(&str, Color); 7] = [
    ("black", Color::rgb(0, 0, 0)),
    ("darkslateblue", Color::rgb(72, 61, 139)),
    ("darkgreen", Color::rgb(0, 100, 0)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("indigo", Color::rgb(75, 0, 130)),
    ("saddlebrown", Color::rgb(139, 69, 19)),
    ("#333333", Color::rgb(51, 51, 51)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl ColorParseError {
    pub fn new(input: impl Into<String>) -> Self {
        Self(input.into())
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color `{}`", self.0)
    }
}

impl Error for ColorParseError {}

/// A palette entry: the name is what the status interface reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub color: Color,
}

impl Swatch {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    pub fn parse(name: &str) -> Result<Self, ColorParseError> {
        Ok(Self {
            name: name.trim().to_string(),
            color: Color::parse(name)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Swatch>,
}

impl Palette {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ColorParseError> {
        let entries = names
            .iter()
            .map(|name| Swatch::parse(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Palette from an already-resolved table.
    pub fn builtin(table: &[(&str, Color)]) -> Self {
        Self {
            entries: table
                .iter()
                .map(|(name, color)| Swatch::new(*name, *color))
                .collect(),
        }
    }

    pub fn first(&self) -> Option<&Swatch> {
        self.entries.first()
    }

    pub fn next_after(&self, current: &Swatch) -> Swatch {
        cycle(&self.entries, current)
            .cloned()
            .unwrap_or_else(|| current.clone())
    }
}

/// Next element after `current`, wrapping. A value missing from the list
/// yields the first element; an empty list yields `None`.
pub fn cycle<'a, T: PartialEq>(list: &'a [T], current: &T) -> Option<&'a T> {
    if list.is_empty() {
        return None;
    }
    let next = list
        .iter()
        .position(|candidate| candidate == current)
        .map_or(0, |index| (index + 1) % list.len());
    list.get(next)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PenState {
    pub down: bool,
    pub color: Swatch,
    pub width: f32,
}

impl PenState {
    pub fn new(color: Swatch, width: f32) -> Self {
        Self {
            down: true,
            color,
            width,
        }
    }

    pub fn toggle(&mut self) {
        self.down = !self.down;
    }
}
