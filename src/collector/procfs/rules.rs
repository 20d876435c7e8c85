//! Label and column rules for locating fields in `/proc` text.
//!
//! Each rule encodes the exact column layout the kernel emits for one field:
//! which line carries it, how that line is split, and which token to take.
//! Keeping them as named constants lets each mapping be tested on its own.

use super::tokenizer::Tokens;

/// Where a single field lives inside a pseudo-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name used in diagnostics.
    pub field: &'static str,
    /// Substring a line must contain. Empty matches every line.
    pub label: &'static str,
    /// Substrings that disqualify an otherwise matching line.
    pub excludes: &'static [&'static str],
    /// Delimiter set used to split the matching line.
    pub delimiters: &'static str,
    /// Zero-based token position of the value.
    pub index: usize,
}

impl FieldRule {
    /// Returns `true` if `line` is the line this rule reads from.
    pub fn matches(&self, line: &str) -> bool {
        line.contains(self.label) && !self.excludes.iter().any(|ex| line.contains(ex))
    }

    /// Splits `line` with this rule's delimiters.
    pub fn tokens<'a>(&self, line: &'a str) -> Tokens<'a, 'static> {
        Tokens::new(line, self.delimiters)
    }

    /// Returns the token at `index` if `line` matches.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        if !self.matches(line) {
            return None;
        }
        self.tokens(line).nth(self.index)
    }
}

/// Integer seconds since boot, first token of `uptime`.
pub const UPTIME_SECONDS: FieldRule = FieldRule {
    field: "uptime",
    label: "",
    excludes: &[],
    delimiters: " |,?!\n",
    index: 0,
};

/// CPU model; the value runs from this token to the end of the line.
pub const CPU_MODEL: FieldRule = FieldRule {
    field: "cpu model",
    label: "model name",
    excludes: &[],
    delimiters: " :,?!",
    index: 2,
};

/// One `cpuinfo` line per logical processor.
pub const PROCESSOR: FieldRule = FieldRule {
    field: "processor count",
    label: "processor",
    excludes: &[],
    delimiters: " \t:",
    index: 0,
};

/// The 1/5/15-minute averages are tokens 0..3 of `loadavg`.
pub const LOAD_AVERAGE: FieldRule = FieldRule {
    field: "load average",
    label: "",
    excludes: &[],
    delimiters: " ",
    index: 0,
};

/// Number of load-average columns shown.
pub const LOAD_AVERAGE_COLUMNS: usize = 3;

/// Aggregate CPU counters; tokens 1..=9 are summed, `index` is idle.
pub const CPU_COUNTERS: FieldRule = FieldRule {
    field: "cpu counters",
    label: "cpu",
    excludes: &[],
    delimiters: " ,?!\n",
    index: 4,
};

/// Token positions of the counters that make up total CPU time.
pub const CPU_COUNTER_RANGE: std::ops::RangeInclusive<usize> = 1..=9;

pub const MEM_TOTAL: FieldRule = FieldRule {
    field: "memory total",
    label: "MemTotal:",
    excludes: &[],
    delimiters: " ,?!\n",
    index: 1,
};

pub const MEM_ACTIVE: FieldRule = FieldRule {
    field: "memory active",
    label: "Active:",
    excludes: &[],
    delimiters: " ,?!\n",
    index: 1,
};

pub const TASK_NAME: FieldRule = FieldRule {
    field: "task name",
    label: "Name:",
    excludes: &[],
    delimiters: "\t ():,?!\n",
    index: 1,
};

/// Longest task name shown in the task table.
pub const TASK_NAME_WIDTH: usize = 25;

/// Long state name, e.g. `sleeping` from `State:\tS (sleeping)`.
pub const TASK_STATE: FieldRule = FieldRule {
    field: "task state",
    label: "State:",
    excludes: &[],
    delimiters: "\t():,?!\n",
    index: 2,
};

pub const TASK_PID: FieldRule = FieldRule {
    field: "task pid",
    label: "Pid:",
    excludes: &["PPid:", "TracerPid"],
    delimiters: "\t :,?!\n",
    index: 1,
};

pub const TASK_THREADS: FieldRule = FieldRule {
    field: "task threads",
    label: "Threads:",
    excludes: &[],
    delimiters: "\t :,?!\n",
    index: 1,
};

/// Parses the leading decimal digits of `s`, ignoring anything after them.
///
/// `"90061.52"` yields 90061; text without leading digits yields 0.
pub fn leading_u64(s: &str) -> u64 {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_takes_first_token() {
        assert_eq!(UPTIME_SECONDS.extract("90061.52 170000.10 "), Some("90061.52"));
    }

    #[test]
    fn test_cpu_model_token_and_rest() {
        let line = "model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz ";
        assert_eq!(CPU_MODEL.extract(line), Some("Intel(R)"));
        assert_eq!(CPU_MODEL.extract("vendor_id\t: GenuineIntel "), None);
    }

    #[test]
    fn test_processor_label() {
        assert!(PROCESSOR.matches("processor\t: 3 "));
        assert!(!PROCESSOR.matches("model name\t: Foo "));
    }

    #[test]
    fn test_cpu_counters_idle_column() {
        let line = "cpu  24310 118 9102 611540 2231 0 417 0 0 0 ";
        assert_eq!(CPU_COUNTERS.extract(line), Some("611540"));
    }

    #[test]
    fn test_memory_rules() {
        assert_eq!(MEM_TOTAL.extract("MemTotal:       16777216 kB "), Some("16777216"));
        assert_eq!(MEM_ACTIVE.extract("Active:          4194304 kB "), Some("4194304"));
        assert_eq!(MEM_ACTIVE.extract("Active(anon):    1048576 kB "), None);
    }

    #[test]
    fn test_task_name_stops_at_space() {
        assert_eq!(TASK_NAME.extract("Name:\tbash "), Some("bash"));
        assert_eq!(TASK_NAME.extract("Name:\tWeb Content "), Some("Web"));
    }

    #[test]
    fn test_task_state_takes_long_form() {
        assert_eq!(TASK_STATE.extract("State:\tS (sleeping) "), Some("sleeping"));
        assert_eq!(TASK_STATE.extract("State:\tZ (zombie) "), Some("zombie"));
    }

    #[test]
    fn test_task_pid_excludes_ppid_and_tracer() {
        assert_eq!(TASK_PID.extract("Pid:\t1234 "), Some("1234"));
        assert_eq!(TASK_PID.extract("PPid:\t1 "), None);
        assert_eq!(TASK_PID.extract("TracerPid:\t0 "), None);
    }

    #[test]
    fn test_task_threads() {
        assert_eq!(TASK_THREADS.extract("Threads:\t12 "), Some("12"));
    }

    #[test]
    fn test_leading_u64() {
        assert_eq!(leading_u64("90061.52"), 90061);
        assert_eq!(leading_u64("  42kB"), 42);
        assert_eq!(leading_u64("abc"), 0);
        assert_eq!(leading_u64(""), 0);
    }
}
