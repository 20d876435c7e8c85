//! Report renderers.
//!
//! [`Inspector`] owns the collectors and renders each section to any
//! `io::Write`. Extraction failures never abort a section: the affected
//! field is printed blank (or zero) and recorded in [`Diagnostics`].

mod diagnostics;
pub mod gauge;
mod hardware;
mod live;
mod system;
mod tasks;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::collector::{FileSystem, ProcessCollector, SystemCollector};

pub use diagnostics::{Diagnostics, Failure};
pub use live::{HiddenCursor, LiveView};

/// Renders report sections from one proc mount.
pub struct Inspector<F: FileSystem + Clone> {
    system: SystemCollector<F>,
    processes: ProcessCollector<F>,
    sample_interval: Duration,
    diagnostics: Diagnostics,
}

impl<F: FileSystem + Clone> Inspector<F> {
    /// Delay between the two CPU counter samples.
    pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates an inspector over `proc_path` (`.` after the session has
    /// changed into the mount point).
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        let proc_path = proc_path.into();
        Self {
            system: SystemCollector::new(fs.clone(), proc_path.clone()),
            processes: ProcessCollector::new(fs, proc_path),
            sample_interval: Self::DEFAULT_SAMPLE_INTERVAL,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Overrides the CPU sampling delay.
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    /// Failures recorded since creation or the last [`Diagnostics::clear`].
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}

/// Writes a section title underlined with dashes.
fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.len()))
}
