//! Coloured `log` backend writing to stderr.
use std::io::Write;

use chrono::NaiveDateTime;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// A single captured log record.
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub level: Level,
    pub timepoint: NaiveDateTime,
    pub message: String,
    pub module: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub thread_name: Option<String>,
}

impl LogMessage {
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            level: record.level(),
            timepoint: chrono::Local::now().naive_local(),
            message: record.args().to_string(),
            module: record.module_path().unwrap_or("<unknown>").to_string(),
            file: record.file().map(str::to_string),
            line: record.line(),
            thread_name: std::thread::current().name().map(str::to_string),
        }
    }

    fn color_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self.level {
            Level::Error => spec.set_fg(Some(Color::Red)).set_intense(true),
            Level::Warn => spec.set_fg(Some(Color::Yellow)).set_intense(true),
            Level::Info => spec.set_fg(Some(Color::Green)),
            Level::Debug => spec.set_fg(Some(Color::Cyan)),
            Level::Trace => spec.set_dimmed(true),
        };
        spec
    }

    /// Write `[time LEVEL module (thread)] message`, optionally followed by
    /// the source location.
    pub fn write_to<W: WriteColor>(&self, out: &mut W, with_location: bool) -> std::io::Result<()> {
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(out, "[{} ", self.timepoint.format("%H:%M:%S%.3f"))?;
        out.set_color(&self.color_spec())?;
        write!(out, "{:<5}", self.level)?;
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(out, " {}", self.module)?;
        if let Some(thread_name) = &self.thread_name {
            write!(out, " ({thread_name})")?;
        }
        write!(out, "]")?;
        out.reset()?;
        write!(out, " {}", self.message)?;

        if with_location {
            if let (Some(file), Some(line)) = (&self.file, self.line) {
                out.set_color(ColorSpec::new().set_dimmed(true))?;
                write!(out, " @ {file}:{line}")?;
                out.reset()?;
            }
        }
        writeln!(out)
    }
}

/// Writes every record allowed by [`log::max_level`], so the level can be
/// raised for a while after installation with [`raise_level`].
pub struct GusLogger {
    level: LevelFilter,
    stream: StandardStream,
}

impl GusLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            stream: StandardStream::stderr(ColorChoice::Auto),
        }
    }

    /// Install as the global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for GusLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = LogMessage::from_record(record);
        let mut stream = self.stream.lock();
        let _ = message.write_to(&mut stream, log::max_level() >= LevelFilter::Debug);
    }

    fn flush(&self) {
        let _ = self.stream.lock().flush();
    }
}

/// Restores the previous global level when dropped.
#[must_use]
pub struct LevelGuard {
    previous: LevelFilter,
}

/// Raise the global level to at least `level` until the guard is dropped.
pub fn raise_level(level: LevelFilter) -> LevelGuard {
    let previous = log::max_level();
    log::set_max_level(previous.max(level));
    LevelGuard { previous }
}

impl Drop for LevelGuard {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}
