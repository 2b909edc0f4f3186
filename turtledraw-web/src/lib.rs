use log::{LevelFilter, info, warn};
#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::prelude::*;
use std::path::PathBuf;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use turtledraw_core::{Command, Session, StatusSnapshot, TurtleConfig, Viewport};

use crate::clock::InputClock;
use crate::draw::FillCache;
use crate::keys::key_from_code;

mod clock;
mod draw;
mod hud;
mod keys;
mod logging;

pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 600;
const CONFIG_ENV: &str = "TURTLEDRAW_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "turtledraw.json";

static PENDING_CLEAR: AtomicBool = AtomicBool::new(false);
static TEXT_ENTRY_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Copy of the latest status snapshot for a hosting page to query.
#[derive(Default)]
struct StatusUi {
    pen_down: bool,
    pen_color: String,
    fill_on: bool,
    fill_color: String,
    speed: f32,
    snap_lock: bool,
}

fn status_ui() -> MutexGuard<'static, StatusUi> {
    static STATUS_UI: OnceLock<Mutex<StatusUi>> = OnceLock::new();
    STATUS_UI
        .get_or_init(|| Mutex::new(StatusUi::default()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

#[unsafe(no_mangle)]
pub extern "C" fn status_pen_down() -> i32 {
    if status_ui().pen_down { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn status_pen_color_ptr() -> *const u8 {
    let ui = status_ui();
    if ui.pen_color.is_empty() {
        ptr::null()
    } else {
        ui.pen_color.as_ptr()
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn status_pen_color_len() -> usize {
    status_ui().pen_color.len()
}

#[unsafe(no_mangle)]
pub extern "C" fn status_fill_on() -> i32 {
    if status_ui().fill_on { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn status_fill_color_ptr() -> *const u8 {
    let ui = status_ui();
    if ui.fill_color.is_empty() {
        ptr::null()
    } else {
        ui.fill_color.as_ptr()
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn status_fill_color_len() -> usize {
    status_ui().fill_color.len()
}

#[unsafe(no_mangle)]
pub extern "C" fn status_speed() -> f32 {
    status_ui().speed
}

#[unsafe(no_mangle)]
pub extern "C" fn status_snap_lock() -> i32 {
    if status_ui().snap_lock { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn text_entry_active() -> i32 {
    if TEXT_ENTRY_ACTIVE.load(Ordering::SeqCst) {
        1
    } else {
        0
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn request_clear_all() {
    info!("page action: clear");
    PENDING_CLEAR.store(true, Ordering::SeqCst);
}

/// Runs a page-requested clear once text entry is closed; until then the
/// request stays queued.
fn apply_pending_clear(session: &mut Session, pending: &AtomicBool) -> bool {
    if session.is_typing() || !pending.swap(false, Ordering::SeqCst) {
        return false;
    }
    session.command(Command::ClearAll)
}

fn publish_status(status: &StatusSnapshot, typing: bool) {
    let mut ui = status_ui();
    ui.pen_down = status.pen_down;
    ui.pen_color.clone_from(&status.pen_color);
    ui.fill_on = status.fill_on;
    ui.fill_color.clone_from(&status.fill_color);
    ui.speed = status.speed;
    ui.snap_lock = status.snap_lock;
    TEXT_ENTRY_ACTIVE.store(typing, Ordering::SeqCst);
}

fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub struct GameState {
    session: Session,
    viewport: Viewport,
    clock: InputClock,
    fills: FillCache,
    published: Option<StatusSnapshot>,
}

impl GameState {
    pub fn new(config: &TurtleConfig) -> Self {
        let session = Session::from_config(config).unwrap_or_else(|err| {
            warn!("{err}; starting with default settings");
            Session::new()
        });
        let (width, height) = session.state().canvas_size();
        let game = Self {
            session,
            viewport: Viewport::new(width, height),
            clock: InputClock::from_millis(config.input_tick_ms),
            fills: FillCache::default(),
            published: None,
        };
        info!(
            "canvas {}x{}, input tick {:.0} ms",
            width,
            height,
            game.clock.interval_seconds() * 1000.0
        );
        game
    }

    fn handle_keyboard(&mut self) {
        let was_typing = self.session.is_typing();
        // Characters typed on the frame that opens the prompt belong to the
        // key that opened it.
        while let Some(c) = get_char_pressed() {
            if was_typing {
                self.session.type_char(c);
            }
        }

        for code in get_keys_pressed() {
            if let Some(key) = key_from_code(code) {
                self.session.key_pressed(key);
            }
        }
        for code in get_keys_released() {
            if let Some(key) = key_from_code(code) {
                self.session.key_released(key);
            }
        }
    }

    fn apply_pending_ui_actions(&mut self) {
        apply_pending_clear(&mut self.session, &PENDING_CLEAR);
    }

    fn fixed_update(&mut self) {
        self.session.input_tick();
    }

    fn sync_status_ui(&mut self) {
        let status = self.session.status();
        if self.published.as_ref() != Some(&status) {
            publish_status(&status, self.session.is_typing());
            self.published = Some(status);
        } else {
            TEXT_ENTRY_ACTIVE.store(self.session.is_typing(), Ordering::SeqCst);
        }
    }

    fn render(&mut self) {
        let transform = self.viewport.fit(screen_width(), screen_height());
        draw::draw_frame(&self.session.frame(), &transform, &mut self.fills);

        if let Some(status) = &self.published {
            hud::draw_status(status);
        }
        if let Some(draft) = self.session.text_draft() {
            hud::draw_text_entry(draft, get_time());
        }
    }
}

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Turtle Draw".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: true,
        ..Default::default()
    }
}

pub async fn run() {
    install_panic_hook();

    let loaded = TurtleConfig::load_if_present(&config_path());
    let level = loaded
        .as_ref()
        .ok()
        .and_then(|config| config.log_level_filter().ok())
        .unwrap_or(LevelFilter::Info);
    logging::init(level);

    let config = loaded.unwrap_or_else(|err| {
        warn!("{err}; falling back to default config");
        TurtleConfig::default()
    });
    let mut game = GameState::new(&config);

    loop {
        game.handle_keyboard();
        game.apply_pending_ui_actions();

        for _ in 0..game.clock.advance(get_frame_time()) {
            game.fixed_update();
        }

        game.sync_status_ui();
        game.render();

        next_frame().await;
    }
}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_status_is_queryable() {
        let status = StatusSnapshot {
            pen_down: false,
            pen_color: "cyan".into(),
            fill_on: true,
            fill_color: "pink".into(),
            speed: 50.0,
            snap_lock: true,
        };
        publish_status(&status, true);

        assert_eq!(status_pen_down(), 0);
        assert_eq!(status_pen_color_len(), 4);
        assert_eq!(status_fill_on(), 1);
        assert_eq!(status_fill_color_len(), 4);
        assert_eq!(status_speed(), 50.0);
        assert_eq!(status_snap_lock(), 1);
        assert_eq!(text_entry_active(), 1);
        assert!(!status_pen_color_ptr().is_null());
    }

    #[test]
    fn page_clear_request_is_queued() {
        request_clear_all();
        assert!(PENDING_CLEAR.swap(false, Ordering::SeqCst));
    }

    #[test]
    fn clear_request_runs_once() {
        let pending = AtomicBool::new(true);
        let mut session = Session::new();
        session.command(Command::MoveForward);

        assert!(apply_pending_clear(&mut session, &pending));
        assert!(session.state().log.is_empty());
        assert!(!apply_pending_clear(&mut session, &pending));
    }

    #[test]
    fn clear_request_waits_for_text_entry_to_close() {
        let pending = AtomicBool::new(true);
        let mut session = Session::new();
        session.command(Command::MoveForward);
        session.command(Command::OpenTextEntry);

        assert!(!apply_pending_clear(&mut session, &pending));
        assert!(pending.load(Ordering::SeqCst));
        assert_eq!(session.state().log.segments().len(), 1);

        session.cancel_text();
        assert!(apply_pending_clear(&mut session, &pending));
        assert!(session.state().log.is_empty());
        assert!(!pending.load(Ordering::SeqCst));
    }
}
