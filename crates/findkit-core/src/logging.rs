//! Five severity-leveled log sinks behind the `log` facade.
//!
//! Each level (trace, debug, info, warn, error) writes to its own [`Sink`].
//! Lines look like:
//!
//! ```text
//! INFO : 2024/01/02 03:04:05 server.rs:42: listening on 192.168.1.20
//! ```
//!
//! Install once at startup with [`init`]; afterwards use `log::info!` and
//! friends as usual.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDateTime};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Destination for one level's output.
pub enum Sink {
    /// Drop everything. Levels routed here report as disabled.
    Discard,
    Stdout,
    Stderr,
    /// Any writer: a file, a socket, an in-memory buffer.
    Writer(Box<dyn Write + Send>),
}

impl Sink {
    fn is_discard(&self) -> bool {
        matches!(self, Self::Discard)
    }

    /// Write one complete line under a single stream lock so lines from
    /// different levels sharing stdout or stderr never interleave.
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        match self {
            Self::Discard => Ok(()),
            Self::Stdout => io::stdout().lock().write_all(line),
            Self::Stderr => io::stderr().lock().write_all(line),
            Self::Writer(w) => w.write_all(line),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discard => write!(f, "Discard"),
            Self::Stdout => write!(f, "Stdout"),
            Self::Stderr => write!(f, "Stderr"),
            Self::Writer(_) => write!(f, "Writer(..)"),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Discard => Ok(buf.len()),
            Self::Stdout => io::stdout().lock().write(buf),
            Self::Stderr => io::stderr().lock().write(buf),
            Self::Writer(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Discard => Ok(()),
            Self::Stdout => io::stdout().lock().flush(),
            Self::Stderr => io::stderr().lock().flush(),
            Self::Writer(w) => w.flush(),
        }
    }
}

/// Per-level sink selection.
#[derive(Debug)]
pub struct LogConfig {
    pub trace: Sink,
    pub debug: Sink,
    pub info: Sink,
    pub warn: Sink,
    pub error: Sink,
}

impl Default for LogConfig {
    /// Trace is discarded, error goes to stderr, everything else to stdout.
    fn default() -> Self {
        Self {
            trace: Sink::Discard,
            debug: Sink::Stdout,
            info: Sink::Stdout,
            warn: Sink::Stdout,
            error: Sink::Stderr,
        }
    }
}

impl LogConfig {
    /// Every level discarded.
    pub fn quiet() -> Self {
        Self {
            trace: Sink::Discard,
            debug: Sink::Discard,
            info: Sink::Discard,
            warn: Sink::Discard,
            error: Sink::Discard,
        }
    }
}

/// Line prefix for a level.
pub fn prefix(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRACE : ",
        Level::Debug => "DEBUG: ",
        Level::Info => "INFO : ",
        Level::Warn => "WARN : ",
        Level::Error => "ERR  : ",
    }
}

/// Render one log line (without trailing newline).
pub fn format_line(
    level: Level,
    at: NaiveDateTime,
    file: Option<&str>,
    line: Option<u32>,
    args: &fmt::Arguments<'_>,
) -> String {
    let file = file
        .and_then(|f| Path::new(f).file_name())
        .and_then(|f| f.to_str())
        .unwrap_or("???");
    format!(
        "{}{} {}:{}: {}",
        prefix(level),
        at.format("%Y/%m/%d %H:%M:%S"),
        file,
        line.unwrap_or(0),
        args
    )
}

/// `log::Log` implementation that routes each level to its own sink.
pub struct LevelRouter {
    // Indexed by `slot`: error, warn, info, debug, trace.
    sinks: [Mutex<Sink>; 5],
}

fn slot(level: Level) -> usize {
    match level {
        Level::Error => 0,
        Level::Warn => 1,
        Level::Info => 2,
        Level::Debug => 3,
        Level::Trace => 4,
    }
}

impl LevelRouter {
    pub fn new(config: LogConfig) -> Self {
        Self {
            sinks: [
                Mutex::new(config.error),
                Mutex::new(config.warn),
                Mutex::new(config.info),
                Mutex::new(config.debug),
                Mutex::new(config.trace),
            ],
        }
    }

    fn sink(&self, level: Level) -> std::sync::MutexGuard<'_, Sink> {
        self.sinks[slot(level)]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Most verbose level that is not discarded.
    pub fn max_level(&self) -> LevelFilter {
        [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error]
            .into_iter()
            .find(|&level| !self.sink(level).is_discard())
            .map_or(LevelFilter::Off, |level| level.to_level_filter())
    }
}

impl Log for LevelRouter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !self.sink(metadata.level()).is_discard()
    }

    fn log(&self, record: &Record<'_>) {
        let mut sink = self.sink(record.level());
        if sink.is_discard() {
            return;
        }
        let mut line = format_line(
            record.level(),
            Local::now().naive_local(),
            record.file(),
            record.line(),
            record.args(),
        );
        line.push('\n');
        // A failing sink must not take the caller down with it.
        let _ = sink.write_line(line.as_bytes());
    }

    fn flush(&self) {
        for sink in &self.sinks {
            let _ = sink.lock().unwrap_or_else(PoisonError::into_inner).flush();
        }
    }
}

/// Install a [`LevelRouter`] built from `config` as the global logger.
///
/// Fails if a logger is already installed.
pub fn init(config: LogConfig) -> Result<(), SetLoggerError> {
    let router = LevelRouter::new(config);
    let max = router.max_level();
    log::set_boxed_logger(Box::new(router))?;
    log::set_max_level(max);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap()
    }

    #[test]
    fn test_format_line_uses_base_file_name() {
        let line = format_line(
            Level::Info,
            at(),
            Some("crates/app/src/server.rs"),
            Some(42),
            &format_args!("listening on {}", "192.168.1.20"),
        );
        assert_eq!(
            line,
            "INFO : 2024/01/02 03:04:05 server.rs:42: listening on 192.168.1.20"
        );
    }

    #[test]
    fn test_format_line_without_location() {
        let line = format_line(Level::Error, at(), None, None, &format_args!("boom"));
        assert_eq!(line, "ERR  : 2024/01/02 03:04:05 ???:0: boom");
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(prefix(Level::Trace), "TRACE : ");
        assert_eq!(prefix(Level::Debug), "DEBUG: ");
        assert_eq!(prefix(Level::Warn), "WARN : ");
    }

    #[test]
    fn test_router_sends_each_level_to_its_sink() {
        let info = SharedBuf::default();
        let error = SharedBuf::default();
        let router = LevelRouter::new(LogConfig {
            info: Sink::Writer(Box::new(info.clone())),
            error: Sink::Writer(Box::new(error.clone())),
            ..LogConfig::quiet()
        });

        router.log(
            &Record::builder()
                .level(Level::Info)
                .file(Some("src/net.rs"))
                .line(Some(7))
                .args(format_args!("found {}", "192.168.0.4"))
                .build(),
        );
        router.log(
            &Record::builder()
                .level(Level::Error)
                .args(format_args!("lookup failed"))
                .build(),
        );
        router.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("dropped"))
                .build(),
        );

        let info_text = info.text();
        assert!(info_text.starts_with("INFO : "));
        assert!(info_text.ends_with(" net.rs:7: found 192.168.0.4\n"));
        assert!(error.text().starts_with("ERR  : "));
        assert!(error.text().ends_with("lookup failed\n"));
        assert!(!info_text.contains("dropped"));
    }

    #[test]
    fn test_discarded_levels_are_disabled() {
        let router = LevelRouter::new(LogConfig::default());
        let trace = Metadata::builder().level(Level::Trace).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(!router.enabled(&trace));
        assert!(router.enabled(&info));
        assert_eq!(router.max_level(), LevelFilter::Debug);
        assert_eq!(LevelRouter::new(LogConfig::quiet()).max_level(), LevelFilter::Off);
    }

    /// Records each `write` call separately.
    #[derive(Clone, Default)]
    struct WriteCalls(Arc<Mutex<Vec<Vec<u8>>>>);

    impl Write for WriteCalls {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().push(buf.to_vec());
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_each_record_is_a_single_write() {
        let calls = WriteCalls::default();
        let router = LevelRouter::new(LogConfig {
            info: Sink::Writer(Box::new(calls.clone())),
            ..LogConfig::quiet()
        });
        for i in 0..3 {
            router.log(
                &Record::builder()
                    .level(Level::Info)
                    .file(Some("src/codec.rs"))
                    .line(Some(12))
                    .args(format_args!("frame {i}"))
                    .build(),
            );
        }
        let calls = calls.0.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for (i, call) in calls.iter().enumerate() {
            let text = std::str::from_utf8(call).unwrap();
            assert!(text.starts_with("INFO : "));
            assert!(text.ends_with(&format!("codec.rs:12: frame {i}\n")));
        }
    }

    #[test]
    fn test_file_sink() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let router = LevelRouter::new(LogConfig {
            warn: Sink::Writer(Box::new(file.reopen().unwrap())),
            ..LogConfig::quiet()
        });
        router.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("disk nearly full"))
                .build(),
        );
        router.flush();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.starts_with("WARN : "));
        assert!(text.trim_end().ends_with("disk nearly full"));
    }
}
