//! Lightweight performance instrumentation.
//!
//! Timing scopes are collected while the terminal is in raw mode and printed
//! by [`report`] once it has been restored. The debug log gets a line per
//! event as it happens.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOGGER: LazyLock<Mutex<DebugLogger>> =
    LazyLock::new(|| Mutex::new(DebugLogger::new()));
static TIMINGS: Mutex<Vec<(&'static str, f64)>> = Mutex::new(Vec::new());

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        lock(&TIMINGS).push((self.name, elapsed_ms));
        log_event("perf.scope", format!("{}: {elapsed_ms:.2} ms", self.name));
    }
}

#[derive(Debug)]
struct DebugLogger {
    enabled: bool,
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLogger {
    fn new() -> Self {
        Self {
            enabled: false,
            start: Instant::now(),
            writer: None,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Drain collected scope timings, slowest first.
pub fn take_timings() -> Vec<(&'static str, f64)> {
    let mut timings = std::mem::take(&mut *lock(&TIMINGS));
    timings.sort_by(|a, b| b.1.total_cmp(&a.1));
    timings
}

/// Print collected timings to stderr.
pub fn report() {
    for (name, elapsed_ms) in take_timings() {
        eprintln!("[perf] {name}: {elapsed_ms:.2} ms");
    }
}

pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut logger = lock(&DEBUG_LOGGER);
    if let Some(path) = path {
        let file = File::create(path)?;
        logger.enabled = true;
        logger.start = Instant::now();
        let mut writer = BufWriter::new(file);
        writeln!(writer, "stickies debug log start")?;
        writer.flush()?;
        logger.writer = Some(writer);
    } else {
        logger.enabled = false;
        logger.writer = None;
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    lock(&DEBUG_LOGGER).enabled
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    tracing::trace!(target: "stickies::events", kind = name, detail = detail.as_ref());
    let mut logger = lock(&DEBUG_LOGGER);
    if !logger.enabled {
        return;
    }
    let elapsed_ms = logger.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = logger.writer.as_mut() {
        let _ = writeln!(
            writer,
            "[{elapsed_ms:>10.3} ms] {name}: {}",
            detail.as_ref()
        );
        let _ = writer.flush();
    }
}
