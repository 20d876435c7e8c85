use std::io::{self, Write};

use super::{Inspector, write_heading};
use crate::collector::FileSystem;
use crate::metrics::Uptime;

impl<F: FileSystem + Clone> Inspector<F> {
    /// Hostname, kernel release and uptime.
    pub fn render_system<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        write_heading(out, "System Information")?;

        let hostname = self.diagnostics.settle("hostname", self.system.hostname());
        writeln!(out, "Hostname: {}", hostname.unwrap_or_default())?;

        let release = self
            .diagnostics
            .settle("kernel release", self.system.kernel_release());
        writeln!(out, "Kernel Version: {}", release.unwrap_or_default())?;

        let uptime = self
            .diagnostics
            .settle("uptime", self.system.uptime_secs())
            .map(|secs| Uptime::from_secs(secs).to_string());
        writeln!(out, "Uptime: {}", uptime.unwrap_or_default())
    }
}
