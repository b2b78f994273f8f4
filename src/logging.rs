//! # Logging Context
//!
//! Engine operations do not log through a process-wide logger. Each
//! operation receives a `LogContext`, which owns a `log::Log`
//! implementation and emits `log::Record`s to it directly. The binary wraps
//! an `env_logger::Logger`; tests either use [`LogContext::silent`] or a
//! capturing logger.
//!
//! ```rust
//! use muxplug::logging::LogContext;
//!
//! let log = LogContext::silent();
//! log.debug(format_args!("found tmux conf file at {}", "/tmp/tmux.conf"));
//! ```

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;

const TARGET: &str = "muxplug";

/// Explicitly threaded logging handle.
pub struct LogContext {
    logger: Box<dyn Log>,
    target: &'static str,
}

impl LogContext {
    pub fn new(logger: Box<dyn Log>) -> Self {
        Self {
            logger,
            target: TARGET,
        }
    }

    /// Builds a context around an `env_logger` logger.
    ///
    /// `level` is the base filter; directives in the `MUXPLUG_LOG`
    /// environment variable are applied on top of it.
    pub fn from_env(level: LevelFilter) -> Self {
        let logger = env_logger::Builder::new()
            .filter_level(level)
            .parse_env(env_logger::Env::new().filter("MUXPLUG_LOG"))
            .format_target(false)
            .build();
        Self::new(Box::new(logger))
    }

    /// A context that discards everything.
    pub fn silent() -> Self {
        Self::new(Box::new(NullLogger))
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn flush(&self) {
        self.logger.flush();
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(self.target).build();
        if !self.logger.enabled(&metadata) {
            return;
        }
        self.logger.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path_static(Some(module_path!()))
                .build(),
        );
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

struct NullLogger;

impl Log for NullLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        false
    }

    fn log(&self, _record: &Record) {}

    fn flush(&self) {}
}


#[cfg(test)]
mod tests {
    use super::testing::capturing;
    use super::*;

    #[test]
    fn test_messages_reach_the_supplied_logger() {
        let (log, records) = capturing(LevelFilter::Debug);
        log.debug(format_args!("cloning {}", "a/b"));
        log.info(format_args!("installed {}", "b"));

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], (Level::Debug, "cloning a/b".to_string()));
        assert_eq!(records[1], (Level::Info, "installed b".to_string()));
    }

    #[test]
    fn test_level_filter_is_respected() {
        let (log, records) = capturing(LevelFilter::Warn);
        log.debug(format_args!("hidden"));
        log.info(format_args!("hidden"));
        log.warn(format_args!("shown"));
        log.error(format_args!("shown too"));

        assert_eq!(records.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_silent_context_discards() {
        let log = LogContext::silent();
        log.error(format_args!("nobody hears this"));
        log.flush();
    }
}
