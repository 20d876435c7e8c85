//! Extractors for the `/proc` pseudo-filesystem.
//!
//! Lines are pulled with a byte-at-a-time [`reader`], split by the
//! delimiter-set [`tokenizer`], and located with the label/column
//! [`rules`]. The collectors wrap these per topic.

mod error;
pub mod process;
pub mod reader;
pub mod rules;
pub mod system;
pub mod tokenizer;

pub use error::ExtractError;
pub use process::{ProcessCollector, TaskRecord, TaskScan};
pub use system::{LoadAverage, SystemCollector};
pub use tokenizer::Tokens;
