//! Derived metrics: uptime decomposition, CPU and memory utilization.
//!
//! All functions here are pure; sampling and sleeping happen in the
//! renderers.

use std::fmt;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = 365 * DAY;

/// Kibibytes per gibibyte.
const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Seconds since boot split into fixed-length units.
///
/// Years are always 365 days; there is no calendar or leap handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uptime {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            years: secs / YEAR,
            days: secs % YEAR / DAY,
            hours: secs % DAY / HOUR,
            minutes: secs % HOUR / MINUTE,
            seconds: secs % MINUTE,
        }
    }
}

/// Years, days and hours appear only when nonzero; minutes and seconds
/// always do.
impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.years > 0 {
            write!(f, "{} years, ", self.years)?;
        }
        if self.days > 0 {
            write!(f, "{} days, ", self.days)?;
        }
        if self.hours > 0 {
            write!(f, "{} hours, ", self.hours)?;
        }
        write!(f, "{} minutes, {} seconds", self.minutes, self.seconds)
    }
}

/// Aggregate CPU counters at one point in time, in jiffies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub total: u64,
    pub idle: u64,
}

impl CpuSample {
    /// Busy percentage between `self` and a `later` sample.
    ///
    /// `100 * (1 - idle_delta / total_delta)`. Returns 0 when the total
    /// counter did not move, and never returns NaN.
    pub fn utilization(&self, later: &CpuSample) -> f64 {
        let total_delta = later.total as f64 - self.total as f64;
        if total_delta == 0.0 {
            return 0.0;
        }
        let idle_delta = later.idle as f64 - self.idle as f64;
        let busy = (1.0 - idle_delta / total_delta) * 100.0;
        if busy.is_finite() { busy } else { 0.0 }
    }
}

/// `MemTotal` and `Active` from `meminfo`, in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySample {
    pub total_kb: u64,
    pub active_kb: u64,
}

impl MemorySample {
    /// Active memory as a percentage of total; 0 when total is unknown.
    pub fn utilization(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        100.0 * self.active_kb as f64 / self.total_kb as f64
    }

    pub fn total_gb(&self) -> f64 {
        self.total_kb as f64 / KB_PER_GB
    }

    pub fn active_gb(&self) -> f64 {
        self.active_kb as f64 / KB_PER_GB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_zero() {
        assert_eq!(Uptime::from_secs(0).to_string(), "0 minutes, 0 seconds");
    }

    #[test]
    fn test_uptime_all_units() {
        assert_eq!(
            Uptime::from_secs(90061).to_string(),
            "1 days, 1 hours, 1 minutes, 1 seconds"
        );
    }

    #[test]
    fn test_uptime_exact_year_skips_days_and_hours() {
        let uptime = Uptime::from_secs(31_536_000);
        assert_eq!(uptime.years, 1);
        assert_eq!(uptime.to_string(), "1 years, 0 minutes, 0 seconds");
    }

    #[test]
    fn test_uptime_days_without_hours() {
        assert_eq!(
            Uptime::from_secs(2 * DAY + 5 * MINUTE + 7).to_string(),
            "2 days, 5 minutes, 7 seconds"
        );
    }

    #[test]
    fn test_uptime_hours_only() {
        assert_eq!(
            Uptime::from_secs(3 * HOUR + 59).to_string(),
            "3 hours, 0 minutes, 59 seconds"
        );
    }

    #[test]
    fn test_cpu_utilization_half_busy() {
        let first = CpuSample { total: 1000, idle: 900 };
        let second = CpuSample { total: 1100, idle: 950 };
        assert!((first.utilization(&second) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_utilization_zero_delta_is_zero() {
        let sample = CpuSample { total: 500, idle: 400 };
        let util = sample.utilization(&sample);
        assert_eq!(util, 0.0);
        assert!(!util.is_nan());
    }

    #[test]
    fn test_cpu_utilization_fully_idle() {
        let first = CpuSample { total: 0, idle: 0 };
        let second = CpuSample { total: 200, idle: 200 };
        assert_eq!(first.utilization(&second), 0.0);
    }

    #[test]
    fn test_memory_utilization() {
        let mem = MemorySample {
            total_kb: 16_777_216,
            active_kb: 4_194_304,
        };
        assert!((mem.utilization() - 25.0).abs() < 1e-9);
        assert!((mem.total_gb() - 16.0).abs() < 1e-9);
        assert!((mem.active_gb() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_memory_utilization_zero_total() {
        let mem = MemorySample {
            total_kb: 0,
            active_kb: 1024,
        };
        assert_eq!(mem.utilization(), 0.0);
    }
}
