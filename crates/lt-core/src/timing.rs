//! Lightweight performance timing utilities.
//!
//! Timing can be enabled programmatically or by setting `LT_TIMING`
//! in the environment; when disabled, timers report nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable performance timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("LT_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        if self.enabled {
            Some(self.start.elapsed().as_secs_f64())
        } else {
            None
        }
    }
}

/// Wall-clock breakdown of one simulation run.
#[derive(Default, Debug, Clone)]
pub struct RunPerf {
    pub load_time_s: f64,
    pub run_time_s: f64,
    pub save_time_s: f64,
    pub steps: usize,
    pub records: usize,
}

impl RunPerf {
    /// Print a formatted summary of the statistics.
    pub fn print_summary(&self) {
        if !is_enabled() {
            return;
        }

        println!("\n=== Performance Summary ===");

        if self.load_time_s > 0.0 {
            println!("Scenario load:       {:.3}s", self.load_time_s);
        }

        if self.run_time_s > 0.0 {
            println!("Run total:           {:.3}s", self.run_time_s);
            if self.steps > 0 {
                println!("  Steps:             {}", self.steps);
                println!(
                    "  Avg step time:     {:.3}us",
                    1e6 * self.run_time_s / self.steps as f64
                );
            }
            println!("  Records:           {}", self.records);
        }

        if self.save_time_s > 0.0 {
            println!("Run save time:       {:.3}s", self.save_time_s);
        }

        println!("==========================\n");
    }
}
