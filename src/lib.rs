//! procinspect - /proc inspector library.
//!
//! Reads kernel runtime state from a proc mount and renders it as a
//! plain-text report:
//! - `system` - hostname, kernel release, uptime
//! - `hardware` - CPU model, processor count, load average, usage gauges
//! - `tasks` - one row per process with state, name, owner and thread count
//! - `live` - load and usage gauges redrawn in place until stopped
//!
//! The `inspector` binary wires these to a command line.

pub mod collector;
pub mod metrics;
pub mod report;
pub mod session;
pub mod util;
pub mod view;
