//! System collector for host identity, uptime, CPU and memory fields.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::error::ExtractError;
use super::reader::scan_lines;
use super::rules::{
    CPU_COUNTER_RANGE, CPU_COUNTERS, CPU_MODEL, FieldRule, LOAD_AVERAGE, LOAD_AVERAGE_COLUMNS,
    MEM_ACTIVE, MEM_TOTAL, PROCESSOR, UPTIME_SECONDS, leading_u64,
};
use crate::collector::traits::FileSystem;
use crate::metrics::CpuSample;

/// The 1, 5 and 15 minute load averages as the kernel prints them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadAverage {
    pub values: Vec<String>,
}

impl fmt::Display for LoadAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(" "))
    }
}

/// Collects system-wide fields from the proc mount.
#[derive(Debug, Clone)]
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Proc mount directory; `.` once the session has
    ///   changed into it
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.proc_path.join(relative)
    }

    /// Reads the first line of `relative`, without its terminator.
    fn first_line(&self, relative: &str, field: &'static str) -> Result<String, ExtractError> {
        let path = self.path(relative);
        scan_lines(&self.fs, &path, |line| Some(line.trim_end().to_string()))?
            .ok_or_else(|| missing(&path, field))
    }

    /// Finds the first line matching `rule` and returns its selected token.
    fn field(&self, relative: &str, rule: &FieldRule) -> Result<String, ExtractError> {
        let path = self.path(relative);
        scan_lines(&self.fs, &path, |line| rule.extract(line).map(str::to_string))?
            .ok_or_else(|| missing(&path, rule.field))
    }

    /// Hostname from `sys/kernel/hostname`.
    pub fn hostname(&self) -> Result<String, ExtractError> {
        self.first_line("sys/kernel/hostname", "hostname")
    }

    /// Kernel release from `sys/kernel/osrelease`.
    pub fn kernel_release(&self) -> Result<String, ExtractError> {
        self.first_line("sys/kernel/osrelease", "kernel release")
    }

    /// Whole seconds since boot from `uptime`; the fraction is dropped.
    pub fn uptime_secs(&self) -> Result<u64, ExtractError> {
        self.field("uptime", &UPTIME_SECONDS)
            .map(|token| leading_u64(&token))
    }

    /// CPU model name from the first `model name` line of `cpuinfo`.
    pub fn cpu_model(&self) -> Result<String, ExtractError> {
        let path = self.path("cpuinfo");
        scan_lines(&self.fs, &path, |line| {
            if !CPU_MODEL.matches(line) {
                return None;
            }
            let mut tokens = CPU_MODEL.tokens(line);
            let first = tokens.nth(CPU_MODEL.index)?;
            let model = format!("{} {}", first, tokens.remainder());
            Some(model.trim_end().to_string())
        })?
        .ok_or_else(|| missing(&path, CPU_MODEL.field))
    }

    /// Number of `processor` lines in `cpuinfo`.
    pub fn processor_count(&self) -> Result<u32, ExtractError> {
        let path = self.path("cpuinfo");
        let mut count = 0;
        scan_lines(&self.fs, &path, |line| {
            if PROCESSOR.matches(line) {
                count += 1;
            }
            None::<()>
        })?;
        trace!(count, "counted processors");
        Ok(count)
    }

    /// Up to three load-average columns from `loadavg`.
    pub fn load_average(&self) -> Result<LoadAverage, ExtractError> {
        let path = self.path("loadavg");
        let values = scan_lines(&self.fs, &path, |line| {
            Some(
                LOAD_AVERAGE
                    .tokens(line)
                    .skip(LOAD_AVERAGE.index)
                    .take(LOAD_AVERAGE_COLUMNS)
                    .map(str::to_string)
                    .collect::<Vec<_>>(),
            )
        })?
        .filter(|values| !values.is_empty())
        .ok_or_else(|| missing(&path, LOAD_AVERAGE.field))?;
        Ok(LoadAverage { values })
    }

    /// Aggregate CPU counters from the first `cpu` line of `stat`.
    ///
    /// Total is the sum of counter columns 1 through 9; idle is column 4.
    pub fn cpu_sample(&self) -> Result<CpuSample, ExtractError> {
        let path = self.path("stat");
        scan_lines(&self.fs, &path, |line| {
            if !CPU_COUNTERS.matches(line) {
                return None;
            }
            let mut sample = CpuSample::default();
            for (i, token) in CPU_COUNTERS.tokens(line).enumerate() {
                if !CPU_COUNTER_RANGE.contains(&i) {
                    continue;
                }
                let value = leading_u64(token);
                sample.total = sample.total.saturating_add(value);
                if i == CPU_COUNTERS.index {
                    sample.idle = value;
                }
            }
            Some(sample)
        })?
        .ok_or_else(|| missing(&path, CPU_COUNTERS.field))
    }

    /// `MemTotal` in kB.
    pub fn mem_total_kb(&self) -> Result<u64, ExtractError> {
        self.field("meminfo", &MEM_TOTAL)
            .map(|token| leading_u64(&token))
    }

    /// `Active` memory in kB.
    pub fn mem_active_kb(&self) -> Result<u64, ExtractError> {
        self.field("meminfo", &MEM_ACTIVE)
            .map(|token| leading_u64(&token))
    }
}

fn missing(path: &Path, field: &'static str) -> ExtractError {
    ExtractError::MissingField {
        path: path.to_path_buf(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    fn typical() -> SystemCollector<MockFs> {
        SystemCollector::new(MockFs::typical_system(), "/proc")
    }

    fn sparse() -> SystemCollector<MockFs> {
        SystemCollector::new(MockFs::sparse_system(), "/proc")
    }

    #[test]
    fn test_identity_lines() {
        let collector = typical();
        assert_eq!(collector.hostname().unwrap(), "testbox");
        assert_eq!(collector.kernel_release().unwrap(), "6.1.0-18-amd64");
    }

    #[test]
    fn test_missing_hostname_is_unavailable() {
        let err = sparse().hostname().unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_uptime_ignores_fraction() {
        assert_eq!(typical().uptime_secs().unwrap(), 90061);
        assert_eq!(sparse().uptime_secs().unwrap(), 59);
    }

    #[test]
    fn test_cpu_model_rejoins_rest_of_line() {
        assert_eq!(
            typical().cpu_model().unwrap(),
            "Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz"
        );
    }

    #[test]
    fn test_processor_count() {
        assert_eq!(typical().processor_count().unwrap(), 2);
    }

    #[test]
    fn test_processor_count_without_cpuinfo() {
        assert!(sparse().processor_count().is_err());
    }

    #[test]
    fn test_load_average() {
        assert_eq!(typical().load_average().unwrap().to_string(), "0.42 0.31 0.27");
        assert_eq!(sparse().load_average().unwrap().values, vec!["1.00", "0.50"]);
    }

    #[test]
    fn test_cpu_sample_sums_nine_counters() {
        let sample = typical().cpu_sample().unwrap();
        assert_eq!(sample.total, 24310 + 118 + 9102 + 611540 + 2231 + 417);
        assert_eq!(sample.idle, 611540);
    }

    #[test]
    fn test_cpu_sample_saturates_huge_counters() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/stat",
            "cpu  18446744073709551615 18446744073709551615 1 1 0 0 0 0 0 0\n",
        );
        let sample = SystemCollector::new(fs, "/proc").cpu_sample().unwrap();
        assert_eq!(sample.total, u64::MAX);
        assert_eq!(sample.idle, 1);
    }

    #[test]
    fn test_cpu_sample_missing_line() {
        let err = sparse().cpu_sample().unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingField {
                field: "cpu counters",
                ..
            }
        ));
    }

    #[test]
    fn test_memory_totals() {
        let collector = typical();
        assert_eq!(collector.mem_total_kb().unwrap(), 16_777_216);
        assert_eq!(collector.mem_active_kb().unwrap(), 4_194_304);
    }

    #[test]
    fn test_memory_active_missing() {
        let collector = sparse();
        assert_eq!(collector.mem_total_kb().unwrap(), 8_388_608);
        assert!(!collector.mem_active_kb().unwrap_err().is_unavailable());
    }

    #[test]
    fn test_relative_proc_path() {
        let mut fs = MockFs::new();
        fs.add_file("./loadavg", "2.00 1.00 0.50 3/300 999\n");
        let collector = SystemCollector::new(fs, ".");
        assert_eq!(collector.load_average().unwrap().to_string(), "2.00 1.00 0.50");
    }
}
