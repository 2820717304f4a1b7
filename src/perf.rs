//! Lightweight timing instrumentation.
//!
//! Scopes report their elapsed time through `tracing` when enabled with
//! `--perf`, so timings land wherever the log subscriber writes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Timer that logs its elapsed time on drop.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        tracing::debug!(target: "mdpreview::perf", scope = self.name, elapsed_ms = self.elapsed_ms());
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Record a one-off event with free-form detail.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    if !is_enabled() {
        return;
    }
    tracing::trace!(target: "mdpreview::perf", event = name, detail = detail.as_ref());
}
