use log::LevelFilter;

#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    if let Err(err) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("logger already installed: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
struct MiniquadLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for MiniquadLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            log::Level::Error | log::Level::Warn => {
                macroquad::miniquad::error!("[{}] {}", record.level(), record.args())
            }
            _ => macroquad::miniquad::info!("[{}] {}", record.level(), record.args()),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    static LOGGER: MiniquadLogger = MiniquadLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
