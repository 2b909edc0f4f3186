use crate::config::{ConfigError, TurtleConfig};
use crate::drawing::DrawingLog;
use crate::fill::{FillCapture, FillExit};
use crate::input::Command;
use crate::motion::{self, Direction, Turn, TurnSteps};
use crate::pen::{
    DEFAULT_BACKGROUND_COLORS, DEFAULT_PEN_COLORS, Palette, PenState, Swatch, cycle,
};
use crate::pose::{Point, Pose};
use crate::status::StatusSnapshot;
use crate::text::{SubmitOutcome, submit_text};
use log::{debug, info};

const SQUARE_SIDES: usize = 4;
const SQUARE_MOVES_PER_SIDE: usize = 4;
const SQUARE_TURN: f32 = 90.0;

/// Effects a command has outside the turtle state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    OpenTextEntry,
}

#[derive(Debug, Clone)]
pub struct TurtleState {
    pub pose: Pose,
    pub pen: PenState,
    pub log: DrawingLog,
    pub fill: FillCapture,
    pub fill_color: Swatch,
    pub background: Swatch,
    pub snap_lock: bool,
    home: Point,
    turn_steps: TurnSteps,
    speeds: Vec<f32>,
    pen_palette: Palette,
    background_palette: Palette,
    canvas_size: (f32, f32),
    text_size: f32,
}

impl TurtleState {
    /// Default session, built from the builtin palettes without validation.
    pub fn new() -> Self {
        let (pen_name, pen_color) = DEFAULT_PEN_COLORS[0];
        let (background_name, background) = DEFAULT_BACKGROUND_COLORS[0];
        Self::assemble(
            &TurtleConfig::default(),
            Palette::builtin(&DEFAULT_PEN_COLORS),
            Palette::builtin(&DEFAULT_BACKGROUND_COLORS),
            Swatch::new(pen_name, pen_color),
            Swatch::new(background_name, background),
        )
    }

    pub fn from_config(config: &TurtleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pen_palette = config.pen_palette()?;
        let background_palette = config.background_palette()?;
        let (Some(pen_color), Some(background)) =
            (pen_palette.first().cloned(), background_palette.first().cloned())
        else {
            return Err(ConfigError::Invalid("color palettes must not be empty".into()));
        };
        Ok(Self::assemble(
            config,
            pen_palette,
            background_palette,
            pen_color,
            background,
        ))
    }

    fn assemble(
        config: &TurtleConfig,
        pen_palette: Palette,
        background_palette: Palette,
        pen_color: Swatch,
        background: Swatch,
    ) -> Self {
        let home = config.center();
        Self {
            pose: Pose::new(home, 0.0, config.start_speed),
            pen: PenState::new(pen_color.clone(), config.pen_width),
            log: DrawingLog::new(),
            fill: FillCapture::new(config.fill_min_points),
            fill_color: pen_color,
            background,
            snap_lock: false,
            home,
            turn_steps: config.turn_steps(),
            speeds: config.speeds.clone(),
            pen_palette,
            background_palette,
            canvas_size: (config.canvas_width, config.canvas_height),
            text_size: config.text_size,
        }
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.canvas_size
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn move_forward(&mut self, record: bool) {
        self.step(Direction::Forward, record);
    }

    pub fn move_backward(&mut self, record: bool) {
        self.step(Direction::Backward, record);
    }

    fn step(&mut self, direction: Direction, record: bool) {
        motion::step(
            &mut self.pose,
            direction,
            record,
            &self.pen,
            &mut self.log,
            &mut self.fill,
        );
    }

    pub fn turn_left(&mut self) {
        motion::turn(&mut self.pose, Turn::Left, &self.turn_steps, self.snap_lock);
    }

    pub fn turn_right(&mut self) {
        motion::turn(&mut self.pose, Turn::Right, &self.turn_steps, self.snap_lock);
    }

    pub fn toggle_fill(&mut self) -> Option<FillExit> {
        self.fill
            .toggle(self.pose.position(), self.fill_color.color, &mut self.log)
    }

    pub fn undo_last(&mut self) -> bool {
        match self.log.undo_last_segment() {
            Some(_) => true,
            None => {
                debug!("undo with no segments left");
                false
            }
        }
    }

    pub fn reset_pose(&mut self) {
        self.pose.set_position(self.home);
        self.pose.heading = 0.0;
    }

    pub fn clear_all(&mut self) {
        self.log.clear();
        self.reset_pose();
        if let Some(background) = self.background_palette.first() {
            self.background = background.clone();
        }
        info!("cleared drawing");
    }

    /// Four sides of four recorded moves, each followed by a 90° right turn.
    pub fn draw_fixed_square(&mut self) {
        for _ in 0..SQUARE_SIDES {
            for _ in 0..SQUARE_MOVES_PER_SIDE {
                self.move_forward(true);
            }
            self.pose.rotate_by(-SQUARE_TURN);
        }
    }

    pub fn cycle_speed(&mut self) {
        if let Some(speed) = cycle(&self.speeds, &self.pose.speed) {
            self.pose.speed = *speed;
        }
    }

    pub fn submit_text(&mut self, raw: &str) -> SubmitOutcome {
        submit_text(raw, self.pose.position(), self.pen.color.color, &mut self.log)
    }

    pub fn apply(&mut self, command: Command) -> Effect {
        debug!("apply {command}");
        match command {
            Command::TogglePen => self.pen.toggle(),
            Command::CyclePenColor => self.pen.color = self.pen_palette.next_after(&self.pen.color),
            Command::CycleBgColor => {
                self.background = self.background_palette.next_after(&self.background)
            }
            Command::CycleFillColor => {
                self.fill_color = self.pen_palette.next_after(&self.fill_color)
            }
            Command::ToggleFill => {
                self.toggle_fill();
            }
            Command::UndoLast => {
                self.undo_last();
            }
            Command::ResetPose => self.reset_pose(),
            Command::ClearAll => self.clear_all(),
            Command::OpenTextEntry => return Effect::OpenTextEntry,
            Command::DrawFixedSquare => self.draw_fixed_square(),
            Command::CycleSpeed => self.cycle_speed(),
            Command::ToggleSnapLock => self.snap_lock = !self.snap_lock,
            Command::MoveForward => self.move_forward(true),
            Command::MoveBackward => self.move_backward(true),
            Command::TurnLeft => self.turn_left(),
            Command::TurnRight => self.turn_right(),
        }
        Effect::None
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            pen_down: self.pen.down,
            pen_color: self.pen.color.name.clone(),
            fill_on: self.fill.is_active(),
            fill_color: self.fill_color.name.clone(),
            speed: self.pose.speed,
            snap_lock: self.snap_lock,
        }
    }
}

impl Default for TurtleState {
    fn default() -> Self {
        Self::new()
    }
}
