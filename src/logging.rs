use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Size at which the rolling log moves on to the next sequence number.
pub const ROLLING_SIZE_BYTES: u64 = 1024 * 1024;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Log file writer that starts a new file every day and whenever the current one is full.
///
/// Files are named `<dir>/<YYYY-MM-DD>_<NN>.log`.
pub struct RollingFile {
    dir: PathBuf,
    max_bytes: u64,
    current: Option<OpenLog>,
}

struct OpenLog {
    date: NaiveDate,
    sequence: u32,
    written: u64,
    file: File,
}

impl RollingFile {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: u64) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            max_bytes,
            current: None,
        })
    }

    pub fn file_name(dir: &Path, date: NaiveDate, sequence: u32) -> PathBuf {
        dir.join(format!("{}_{sequence:02}.log", date.format("%Y-%m-%d")))
    }

    fn write_on(&mut self, date: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        let incoming = buf.len() as u64;
        let rotate = match &self.current {
            Some(log) => log.date != date || (log.written > 0 && log.written + incoming > self.max_bytes),
            None => true,
        };
        if rotate {
            let next = match &self.current {
                Some(log) if log.date == date => log.sequence + 1,
                _ => 0,
            };
            self.current = Some(self.open(date, next, incoming)?);
        }

        let Some(log) = self.current.as_mut() else {
            return Err(io::Error::other("log file is not open"));
        };
        let n = log.file.write(buf)?;
        log.written += n as u64;
        Ok(n)
    }

    /// Opens the first file from `sequence` on that still has room for `incoming` bytes.
    fn open(&self, date: NaiveDate, mut sequence: u32, incoming: u64) -> io::Result<OpenLog> {
        loop {
            let path = Self::file_name(&self.dir, date, sequence);
            let written = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            if written == 0 || written + incoming <= self.max_bytes {
                let file = OpenOptions::new().create(true).append(true).open(&path)?;
                return Ok(OpenLog {
                    date,
                    sequence,
                    written,
                    file,
                });
            }
            sequence += 1;
        }
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_on(Local::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.current.as_mut() {
            Some(log) => log.file.flush(),
            None => Ok(()),
        }
    }
}

/// Console verbosity picked on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::Trace,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

/// Installs the global subscriber: stderr always, plus rolling files under `log_dir`.
///
/// `RUST_LOG` overrides the level chosen by `verbosity`.
pub fn init(verbosity: Verbosity, log_dir: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.level().to_string().to_lowercase()));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));

    let file = match log_dir {
        Some(dir) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(RollingFile::new(dir, ROLLING_SIZE_BYTES)?))
                .with_ansi(false)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string())),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(io::Error::other)
}
