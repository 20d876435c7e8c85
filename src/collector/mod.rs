//! Field extraction from the `/proc` pseudo-filesystem.
//!
//! # Architecture
//!
//! ```text
//!   ProcessCollector            SystemCollector
//!   - <pid>/status              - sys/kernel/*, uptime
//!   - UserResolver              - cpuinfo, loadavg, stat, meminfo
//!          │                           │
//!          └─ rules/tokenizer/reader ──┘
//!                          │
//!                   FileSystem (trait)
//!                          │
//!          ┌───────────────┼───────────────┐
//!       RealFs          MockFs         Scenarios
//!      (Linux)        (Testing)       (Fixtures)
//! ```
//!
//! # Usage
//!
//! ```
//! use procinspect::collector::{MockFs, SystemCollector};
//!
//! let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
//! assert_eq!(collector.hostname().unwrap(), "testbox");
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{ExtractError, ProcessCollector, SystemCollector, TaskRecord, TaskScan};
pub use traits::{FileSystem, RealFs};
