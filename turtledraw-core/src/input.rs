use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    TogglePen,
    CyclePenColor,
    CycleBgColor,
    CycleFillColor,
    ToggleFill,
    UndoLast,
    ResetPose,
    ClearAll,
    OpenTextEntry,
    DrawFixedSquare,
    CycleSpeed,
    ToggleSnapLock,
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
}

/// Order in which held keys are applied within one input tick.
pub const LEVEL_ORDER: [Command; 5] = [
    Command::MoveForward,
    Command::MoveBackward,
    Command::TurnLeft,
    Command::TurnRight,
    Command::UndoLast,
];

impl Command {
    pub const ALL: [Command; 16] = [
        Command::TogglePen,
        Command::CyclePenColor,
        Command::CycleBgColor,
        Command::CycleFillColor,
        Command::ToggleFill,
        Command::UndoLast,
        Command::ResetPose,
        Command::ClearAll,
        Command::OpenTextEntry,
        Command::DrawFixedSquare,
        Command::CycleSpeed,
        Command::ToggleSnapLock,
        Command::MoveForward,
        Command::MoveBackward,
        Command::TurnLeft,
        Command::TurnRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::TogglePen => "toggle-pen",
            Command::CyclePenColor => "cycle-pen-color",
            Command::CycleBgColor => "cycle-bg-color",
            Command::CycleFillColor => "cycle-fill-color",
            Command::ToggleFill => "toggle-fill",
            Command::UndoLast => "undo-last",
            Command::ResetPose => "reset-pose",
            Command::ClearAll => "clear-all",
            Command::OpenTextEntry => "open-text-entry",
            Command::DrawFixedSquare => "draw-fixed-square",
            Command::CycleSpeed => "cycle-speed",
            Command::ToggleSnapLock => "toggle-snap-lock",
            Command::MoveForward => "move-forward",
            Command::MoveBackward => "move-backward",
            Command::TurnLeft => "turn-left",
            Command::TurnRight => "turn-right",
        }
    }

    /// Fires once on the key-down edge.
    pub fn is_edge(self) -> bool {
        !matches!(
            self,
            Command::MoveForward | Command::MoveBackward | Command::TurnLeft | Command::TurnRight
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParseError(pub String);

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command `{}`", self.0)
    }
}

impl Error for CommandParseError {}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Command::ALL
            .iter()
            .copied()
            .find(|command| command.name() == wanted)
            .ok_or_else(|| CommandParseError(s.to_string()))
    }
}

/// Physical key identity, independent of any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Char(char),
    Space,
    Backspace,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Letters are folded to lowercase so bindings are case-insensitive.
    pub fn char(c: char) -> Self {
        if c == ' ' {
            return Key::Space;
        }
        Key::Char(c.to_ascii_lowercase())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("space"),
            Key::Backspace => f.write_str("backspace"),
            Key::Enter => f.write_str("enter"),
            Key::Escape => f.write_str("escape"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError(pub String);

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key `{}`", self.0)
    }
}

impl Error for KeyParseError {}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == " " {
            return Ok(Key::Space);
        }
        let lowered = s.trim().to_ascii_lowercase();
        let key = match lowered.as_str() {
            "space" => Key::Space,
            "backspace" => Key::Backspace,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Key::char(c),
                    _ => return Err(KeyParseError(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: HashMap<Key, Command>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, command: Command) {
        self.map.insert(key, command);
    }

    pub fn command_for(&self, key: Key) -> Option<Command> {
        self.map.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (key, command) in [
            (Key::Char('w'), Command::MoveForward),
            (Key::Char('s'), Command::MoveBackward),
            (Key::Char('a'), Command::TurnLeft),
            (Key::Char('d'), Command::TurnRight),
            (Key::Up, Command::MoveForward),
            (Key::Down, Command::MoveBackward),
            (Key::Left, Command::TurnLeft),
            (Key::Right, Command::TurnRight),
            (Key::Space, Command::TogglePen),
            (Key::Char('c'), Command::CyclePenColor),
            (Key::Char('b'), Command::CycleBgColor),
            (Key::Char('v'), Command::CycleFillColor),
            (Key::Char('f'), Command::ToggleFill),
            (Key::Char('z'), Command::UndoLast),
            (Key::Char('r'), Command::ResetPose),
            (Key::Backspace, Command::ClearAll),
            (Key::Char('t'), Command::OpenTextEntry),
            (Key::Char('k'), Command::DrawFixedSquare),
            (Key::Char('m'), Command::CycleSpeed),
            (Key::Char('n'), Command::ToggleSnapLock),
        ] {
            bindings.bind(key, command);
        }
        bindings
    }
}

/// Tracks held keys and turns key transitions and ticks into commands.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    bindings: KeyBindings,
    held: HashSet<Key>,
}

impl InputDispatcher {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Returns the edge command for a fresh press; repeats while held yield nothing.
    pub fn key_down(&mut self, key: Key) -> Option<Command> {
        if !self.held.insert(key) {
            return None;
        }
        self.bindings
            .command_for(key)
            .filter(|command| command.is_edge())
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn tick(&self) -> Vec<Command> {
        if self.held.is_empty() {
            return Vec::new();
        }
        LEVEL_ORDER
            .iter()
            .copied()
            .filter(|command| {
                self.held
                    .iter()
                    .any(|key| self.bindings.command_for(*key) == Some(*command))
            })
            .collect()
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_round_trip_through_from_str() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }
        assert!("fly".parse::<Command>().is_err());
    }

    #[test]
    fn serde_uses_command_vocabulary() {
        let json = serde_json::to_string(&Command::CycleBgColor).unwrap();
        assert_eq!(json, "\"cycle-bg-color\"");
        let parsed: Command = serde_json::from_str("\"toggle-snap-lock\"").unwrap();
        assert_eq!(parsed, Command::ToggleSnapLock);
    }

    #[test]
    fn keys_parse_case_insensitively() {
        assert_eq!("W".parse::<Key>(), Ok(Key::Char('w')));
        assert_eq!(" ".parse::<Key>(), Ok(Key::Space));
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::Left));
        assert_eq!("Backspace".parse::<Key>(), Ok(Key::Backspace));
        assert!("ww".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
        assert_eq!(Key::char('Z'), Key::Char('z'));
    }

    #[test]
    fn edge_commands_fire_once_per_press() {
        let mut input = InputDispatcher::default();
        assert_eq!(input.key_down(Key::Space), Some(Command::TogglePen));
        assert_eq!(input.key_down(Key::Space), None);
        input.key_up(Key::Space);
        assert_eq!(input.key_down(Key::Space), Some(Command::TogglePen));
    }

    #[test]
    fn movement_keys_only_act_on_ticks() {
        let mut input = InputDispatcher::default();
        assert_eq!(input.key_down(Key::Char('w')), None);
        assert_eq!(input.tick(), vec![Command::MoveForward]);
        assert_eq!(input.tick(), vec![Command::MoveForward]);
        input.key_up(Key::Char('w'));
        assert!(input.tick().is_empty());
    }

    #[test]
    fn undo_is_edge_and_level() {
        let mut input = InputDispatcher::default();
        assert_eq!(input.key_down(Key::Char('z')), Some(Command::UndoLast));
        assert_eq!(input.tick(), vec![Command::UndoLast]);
    }

    #[test]
    fn tick_order_ignores_press_order() {
        let mut input = InputDispatcher::default();
        for key in ['z', 'd', 'a', 's', 'w'] {
            input.key_down(Key::Char(key));
        }
        assert_eq!(input.tick(), LEVEL_ORDER.to_vec());
    }

    #[test]
    fn aliases_for_same_command_emit_once() {
        let mut input = InputDispatcher::default();
        input.key_down(Key::Char('w'));
        input.key_down(Key::Up);
        assert_eq!(input.tick(), vec![Command::MoveForward]);
    }

    #[test]
    fn unbound_keys_are_tracked_but_inert() {
        let mut input = InputDispatcher::default();
        assert_eq!(input.key_down(Key::Char('q')), None);
        assert!(input.is_held(Key::Char('q')));
        assert!(input.tick().is_empty());
        input.release_all();
        assert_eq!(input.held_count(), 0);
    }
}
