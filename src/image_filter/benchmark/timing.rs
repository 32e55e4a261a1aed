use std::fmt;
use std::time::{Duration, Instant};

/// One measured call: its own duration and the running average over every
/// call recorded so far, whatever the phase.
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub name: String,
    pub duration: Duration,
    pub average: Duration,
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: time: {:.6}s avgTime: {:.6}s",
            self.name,
            self.duration.as_secs_f64(),
            self.average.as_secs_f64()
        )
    }
}

/// Cumulative time and call count shared by all phases.
///
/// The average is deliberately not split per phase.
#[derive(Debug, Default)]
pub struct PhaseTimings {
    reports: Vec<PhaseReport>,
    total: Duration,
    calls: u32,
}

impl PhaseTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, duration: Duration) -> PhaseReport {
        self.total += duration;
        self.calls += 1;
        let report = PhaseReport {
            name: name.into(),
            duration,
            average: self.total / self.calls,
        };
        self.reports.push(report.clone());
        report
    }

    pub fn total_duration(&self) -> Duration {
        self.total
    }

    pub fn call_count(&self) -> u32 {
        self.calls
    }

    /// `Duration::ZERO` before the first call.
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total / self.calls
        }
    }

    pub fn reports(&self) -> &[PhaseReport] {
        &self.reports
    }

    pub fn print_summary(&self) {
        let total = self.total_duration();
        println!("\nFilter Timing Summary:");
        println!("{:-<60}", "");
        for report in &self.reports {
            let percentage = if total.as_secs_f64() > 0.0 {
                (report.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            println!(
                "{:<30} {:>12.3}ms ({:>5.1}%)",
                report.name,
                report.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        println!("{:-<60}", "");
        println!(
            "{:<30} {:>12.3}ms",
            "Average",
            self.average().as_secs_f64() * 1000.0
        );
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}
