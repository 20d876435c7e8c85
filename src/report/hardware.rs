use std::io::{self, Write};
use std::thread;

use super::gauge::gauge;
use super::{Inspector, write_heading};
use crate::collector::FileSystem;
use crate::metrics::MemorySample;

impl<F: FileSystem + Clone> Inspector<F> {
    /// CPU model, processor count, load average and usage gauges.
    ///
    /// Blocks for one sample interval while measuring CPU usage.
    pub fn render_hardware<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        write_heading(out, "Hardware Information")?;

        let model = self.diagnostics.settle("cpu model", self.system.cpu_model());
        writeln!(out, "CPU Model: {}", model.unwrap_or_default())?;

        let units = self
            .diagnostics
            .settle("processor count", self.system.processor_count());
        writeln!(out, "Processing Units: {}", units.unwrap_or_default())?;

        self.write_load_line(out)?;
        self.write_cpu_line(out)?;
        self.write_memory_line(out)
    }

    pub(super) fn write_load_line<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let load = self
            .diagnostics
            .settle("load average", self.system.load_average());
        writeln!(
            out,
            "Load Average (1/5/15 min): {}",
            load.map(|l| l.to_string()).unwrap_or_default()
        )
    }

    pub(super) fn write_cpu_line<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let usage = self.cpu_utilization();
        writeln!(out, "CPU Usage:    [{}] {:.1}%", gauge(usage), usage)
    }

    pub(super) fn write_memory_line<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let mem = self.memory_sample();
        let usage = mem.utilization();
        writeln!(
            out,
            "Memory Usage: [{}] {:.1}% ({:.1} GB / {:.1} GB)",
            gauge(usage),
            usage,
            mem.active_gb(),
            mem.total_gb()
        )
    }

    /// Samples the CPU counters twice, one sample interval apart.
    ///
    /// Any failed sample yields 0%.
    pub fn cpu_utilization(&mut self) -> f64 {
        let Some(first) = self
            .diagnostics
            .settle("cpu counters", self.system.cpu_sample())
        else {
            return 0.0;
        };
        if !self.sample_interval.is_zero() {
            thread::sleep(self.sample_interval);
        }
        let Some(second) = self
            .diagnostics
            .settle("cpu counters", self.system.cpu_sample())
        else {
            return 0.0;
        };
        first.utilization(&second)
    }

    /// Reads `MemTotal` and `Active`; a missing value counts as zero.
    pub fn memory_sample(&mut self) -> MemorySample {
        let total_kb = self
            .diagnostics
            .settle("memory total", self.system.mem_total_kb());
        let active_kb = self
            .diagnostics
            .settle("memory active", self.system.mem_active_kb());
        MemorySample {
            total_kb: total_kb.unwrap_or_default(),
            active_kb: active_kb.unwrap_or_default(),
        }
    }
}
