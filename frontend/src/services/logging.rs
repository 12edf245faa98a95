use anyhow::anyhow;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to the browser devtools console
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, component: &str, message: &str) -> String {
    format!("[{} {}] {}", level, component, message)
}

pub fn init() -> anyhow::Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow!("Logger already installed: {}", e))?;
    log::set_max_level(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    Ok(())
}
