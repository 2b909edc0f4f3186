use crate::config::{ConfigError, TurtleConfig};
use crate::input::{Command, InputDispatcher, Key};
use crate::render::{Frame, render};
use crate::state::{Effect, TurtleState};
use crate::status::StatusSnapshot;
use crate::text::{SubmitOutcome, TextEntry};
use log::debug;

/// Turtle state plus the input policy around it. The frontend feeds key
/// transitions in, calls [`Session::input_tick`] on a fixed interval and
/// [`Session::frame`] once per display refresh.
#[derive(Debug, Clone)]
pub struct Session {
    state: TurtleState,
    input: InputDispatcher,
    text: TextEntry,
}

impl Session {
    pub fn new() -> Self {
        Self::with_state(TurtleState::new(), InputDispatcher::default())
    }

    pub fn from_config(config: &TurtleConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_state(
            TurtleState::from_config(config)?,
            InputDispatcher::new(config.key_bindings()),
        ))
    }

    pub fn with_state(state: TurtleState, input: InputDispatcher) -> Self {
        Self {
            state,
            input,
            text: TextEntry::new(),
        }
    }

    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TurtleState {
        &mut self.state
    }

    pub fn is_typing(&self) -> bool {
        self.text.is_open()
    }

    pub fn text_draft(&self) -> Option<&str> {
        self.text.draft()
    }

    pub fn key_pressed(&mut self, key: Key) {
        if self.is_typing() {
            match key {
                Key::Enter => {
                    self.submit_draft();
                }
                Key::Escape => self.cancel_text(),
                Key::Backspace => self.text.backspace(),
                _ => {}
            }
            return;
        }

        if let Some(command) = self.input.key_down(key) {
            self.run(command);
        }
    }

    pub fn key_released(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn type_char(&mut self, c: char) {
        self.text.push_char(c);
    }

    /// Applies a command as if its key had just been pressed. Ignored while
    /// text entry is open.
    pub fn command(&mut self, command: Command) -> bool {
        if self.is_typing() {
            debug!("text entry open; ignoring {command}");
            return false;
        }
        self.run(command);
        true
    }

    fn run(&mut self, command: Command) {
        if self.state.apply(command) == Effect::OpenTextEntry {
            self.text.open();
            self.input.release_all();
        }
    }

    /// Applies level-triggered commands for the held keys. Returns how many ran.
    pub fn input_tick(&mut self) -> usize {
        if self.is_typing() {
            return 0;
        }
        let commands = self.input.tick();
        for command in &commands {
            self.state.apply(*command);
        }
        commands.len()
    }

    pub fn submit_draft(&mut self) -> SubmitOutcome {
        let anchor = self.state.pose.position();
        let color = self.state.pen.color.color;
        self.text.submit(anchor, color, &mut self.state.log)
    }

    /// Records `raw` at the current pose and closes text entry; blank input
    /// leaves everything unchanged.
    pub fn submit_text(&mut self, raw: &str) -> SubmitOutcome {
        let outcome = self.state.submit_text(raw);
        if matches!(outcome, SubmitOutcome::Recorded(_)) {
            self.text.close();
        }
        outcome
    }

    pub fn cancel_text(&mut self) {
        self.text.close();
    }

    pub fn frame(&self) -> Frame {
        render(&self.state)
    }

    pub fn status(&self) -> StatusSnapshot {
        self.state.status()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
